//! # Commands Module
//!
//! Every request the front end can send.
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! └── cart.rs     ◄─── Cart intents, clear, read
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Front end writes one JSON object per line to stdin                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  handle_line(&mut Session, line)                                        │
//! │         │  decode Request ─► Intent ─► CartView ─► CartStore            │
//! │         ▼                                                               │
//! │  Reply { ok, cart, transition, navigation | error }                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  One JSON object per line on stdout                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
