//! # Configuration State
//!
//! Stores shell configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`NURSERY_*`; `RUST_LOG` wins over `NURSERY_LOG`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after startup.

use serde::{Deserialize, Serialize};

/// Default log filter when neither `RUST_LOG` nor `NURSERY_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,nursery_core=debug,nursery_shell_lib=debug";

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellConfig {
    /// Store name, logged at startup
    pub store_name: String,

    /// tracing-subscriber filter directives
    pub log_filter: String,

    /// Pretty-print replies (one reply may then span several lines)
    pub pretty_json: bool,

    /// Report continue-shopping navigation in the reply
    pub echo_navigation: bool,
}

impl Default for ShellConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        ShellConfig {
            store_name: "Paradise Nursery".to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            pretty_json: false,
            echo_navigation: true,
        }
    }
}

impl ShellConfig {
    /// Creates a ShellConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `NURSERY_STORE_NAME`: Override store name
    /// - `NURSERY_LOG`: Override log filter
    /// - `NURSERY_PRETTY_JSON`: `true`/`1` to pretty-print replies
    /// - `NURSERY_ECHO_NAVIGATION`: `false`/`0` to omit navigation events
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ShellConfig::default();

        if let Some(store_name) = lookup("NURSERY_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(filter) = lookup("NURSERY_LOG") {
            config.log_filter = filter;
        }

        if let Some(flag) = lookup("NURSERY_PRETTY_JSON").and_then(|v| parse_flag(&v)) {
            config.pretty_json = flag;
        }

        if let Some(flag) = lookup("NURSERY_ECHO_NAVIGATION").and_then(|v| parse_flag(&v)) {
            config.echo_navigation = flag;
        }

        config
    }
}

/// Unrecognized values leave the default in place.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
