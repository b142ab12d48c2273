//! # Nursery Shell Entry Point
//!
//! Hosts one cart session. A front end writes JSON requests to stdin, one
//! per line, and reads one JSON reply per request from stdout. Logs go to
//! stderr.
//!
//! ```text
//! $ printf '%s\n' '{"intent":"add","name":"Fern","cost":"$5.00"}' | nursery-shell
//! {"ok":true,"cart":{"items":[...],"itemCount":1,"totalQuantity":1,"total":"5.00"},...}
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match nursery_shell_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("nursery-shell: {err}");
            ExitCode::FAILURE
        }
    }
}
