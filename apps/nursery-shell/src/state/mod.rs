//! # State Module
//!
//! Application state for the shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │      ShellConfig         │      │        Session           │        │
//! │  │                          │      │                          │        │
//! │  │  store name              │      │  CartStore (owned)       │        │
//! │  │  log filter              │      │  CartView (snapshot)     │        │
//! │  │  reply formatting        │      │  Navigation              │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! │                                                                         │
//! │  ShellConfig: read-only after startup                                  │
//! │  Session: single-threaded, passed by &mut, no lock                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ShellConfig, DEFAULT_LOG_FILTER};
pub use session::{Navigation, Session};
