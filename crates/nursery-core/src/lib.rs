//! # nursery-core: Pure Cart Logic for the Nursery Storefront
//!
//! This crate holds the shopping cart: its state, the transitions that change
//! it, and the money math behind every displayed price. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nursery Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (external)                         │   │
//! │  │    Product list ──► Cart page ──► (Checkout, not wired)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON lines                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    nursery-shell                                │   │
//! │  │    config, logging, request decoding, Session                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ nursery-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   types   │  │   store   │  │   view    │  │   │
//! │  │   │   Money   │  │ LineItem  │  │ CartStore │  │ CartView  │  │   │
//! │  │   │   cost    │  │ CartState │  │ CartAction│  │  Intent   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cost`] - The one place a price string or number becomes `Money`
//! - [`types`] - `LineItem`, `CartState`, `Transition`
//! - [`store`] - `CartStore`, the sole mutation authority
//! - [`view`] - Display derivations and user intents
//! - [`validation`] - Guards on names and quantities
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use nursery_core::{CartStore, CartView};
//!
//! let mut store = CartStore::new();
//! store.add_item("Fern", "fern.jpg", "$5.00");
//! store.add_item("Fern", "fern.jpg", "$5.00");
//!
//! let view = CartView::of(&store);
//! assert_eq!(view.items()[0].quantity, 2);
//! assert_eq!(view.total(), "10.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cost;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cost::CostInput;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use store::{CartAction, CartStore, Snapshot, SubscriptionId};
pub use types::*;
pub use view::{CartSummary, CartView, Intent, LineItemView, Navigator};
