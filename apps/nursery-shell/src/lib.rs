//! # Nursery Shell Library
//!
//! The process that hosts one cart session for an external front end.
//!
//! ## Module Organization
//! ```text
//! nursery_shell_lib/
//! ├── lib.rs          ◄─── You are here (startup & request loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── ShellConfig (env + defaults)
//! │   └── session.rs  ◄─── Session: CartStore + CartView + Navigation
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── cart.rs     ◄─── Request decoding, Reply encoding
//! └── error.rs        ◄─── ApiError (replies) and ShellError (fatal)
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ShellResult;
use state::{Session, ShellConfig};

/// Runs the shell on stdin/stdout until input closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Shell Startup                                     │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults, overridden by NURSERY_* variables                       │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • RUST_LOG overrides NURSERY_LOG                                    │
/// │                                                                         │
/// │  3. Start Session ────────────────────────────────────────────────────► │
/// │     • One CartStore, constructed here and passed by reference           │
/// │                                                                         │
/// │  4. Serve ────────────────────────────────────────────────────────────► │
/// │     • One request line in, one reply line out                           │
/// │     • EOF ends the session and resets the cart                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ShellResult<()> {
    let config = ShellConfig::from_env();
    init_tracing(&config);

    info!(store = %config.store_name, "Starting Nursery cart shell");

    let mut session = Session::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(stdin.lock(), stdout.lock(), &mut session, &config)?;

    Ok(())
}

/// Reads request lines until EOF, answering each one.
///
/// Blank lines are skipped. The session ends when input closes or an I/O
/// error stops the loop. Returns the number of requests handled.
pub fn serve<R, W>(
    reader: R,
    mut writer: W,
    session: &mut Session,
    config: &ShellConfig,
) -> ShellResult<usize>
where
    R: BufRead,
    W: Write,
{
    let result = answer_lines(reader, &mut writer, session, config);
    session.end();

    let handled = result?;
    info!(handled, "input closed");
    Ok(handled)
}

fn answer_lines<R, W>(
    mut reader: R,
    writer: &mut W,
    session: &mut Session,
    config: &ShellConfig,
) -> ShellResult<usize>
where
    R: BufRead,
    W: Write,
{
    let mut handled = 0;
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(handled);
        }

        let request = trim_line_ending(&line);
        if request.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let reply = commands::cart::handle_bytes(session, request, config.echo_navigation);
        if config.pretty_json {
            serde_json::to_writer_pretty(&mut *writer, &reply)?;
        } else {
            serde_json::to_writer(&mut *writer, &reply)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        handled += 1;
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `NURSERY_LOG=warn` - Quieter default without touching RUST_LOG
/// - Default: INFO, DEBUG for the nursery crates
fn init_tracing(config: &ShellConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_lines(input: &str, config: &ShellConfig) -> (usize, Vec<serde_json::Value>) {
        let mut session = Session::new();
        let mut output = Vec::new();
        let handled = serve(Cursor::new(input), &mut output, &mut session, config).unwrap();

        assert!(session.store().state().is_empty(), "session not reset at EOF");

        let text = String::from_utf8(output).unwrap();
        let replies = serde_json::Deserializer::from_str(&text)
            .into_iter::<serde_json::Value>()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        (handled, replies)
    }

    #[test]
    fn test_serve_one_reply_per_request() {
        let input = concat!(
            r#"{"intent":"add","name":"Fern","cost":"$5.00"}"#,
            "\n\n",
            r#"{"intent":"add","name":"Oak","cost":"$3.33"}"#,
            "\n",
            r#"{"intent":"decrement","name":"Fern"}"#,
            "\n",
            "garbage\n",
        );

        let (handled, replies) = run_lines(input, &ShellConfig::default());
        assert_eq!(handled, 4);
        assert_eq!(replies.len(), 4);
        assert_eq!(replies[2]["cart"]["total"], "3.33");
        assert_eq!(replies[3]["ok"], false);
    }

    #[test]
    fn test_serve_pretty_output() {
        let config = ShellConfig {
            pretty_json: true,
            ..ShellConfig::default()
        };

        let (handled, replies) = run_lines("{\"intent\":\"cart\"}\n", &config);
        assert_eq!(handled, 1);
        assert_eq!(replies[0]["cart"]["total"], "0.00");
    }

    #[test]
    fn test_serve_survives_non_utf8_line() {
        let mut input = b"{\"intent\":\"add\",\"name\":\"Fern\",\"cost\":5}\r\n".to_vec();
        input.extend_from_slice(b"\xff\xfe\n");
        input.extend_from_slice(b"{\"intent\":\"cart\"}");

        let mut session = Session::new();
        let mut output = Vec::new();
        let handled = serve(Cursor::new(input), &mut output, &mut session, &ShellConfig::default()).unwrap();
        assert_eq!(handled, 3);
        assert!(session.store().state().is_empty());

        let replies: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(replies[1]["ok"], false);
        assert_eq!(replies[1]["error"]["code"], "INVALID_REQUEST");
        assert_eq!(replies[2]["cart"]["itemCount"], 1);
        assert_eq!(replies[2]["cart"]["total"], "5.00");
    }

    #[test]
    fn test_serve_ends_session_on_write_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut session = Session::new();
        let input = "{\"intent\":\"add\",\"name\":\"Fern\",\"cost\":5}\n";
        let result = serve(Cursor::new(input), Broken, &mut session, &ShellConfig::default());

        assert!(result.is_err());
        assert!(session.store().state().is_empty());
    }

    #[test]
    fn test_serve_empty_input() {
        let (handled, replies) = run_lines("", &ShellConfig::default());
        assert_eq!(handled, 0);
        assert!(replies.is_empty());
    }
}
