//! # Cart Store
//!
//! The single mutation authority for the cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Caller                   CartStore               Effect                │
//! │  ──────                   ─────────               ──────                │
//! │                                                                         │
//! │  Add from catalog ───────► add_item() ──────────► push or qty + 1       │
//! │                                                                         │
//! │  Increment / decrement ──► set_quantity() ──────► items[i].qty = n      │
//! │                                                                         │
//! │  Delete / qty 1 → 0 ─────► remove_item() ───────► items.retain(..)      │
//! │                                                                         │
//! │  End of session ─────────► clear() ─────────────► items.clear()         │
//! │                                                                         │
//! │  Re-render ──────────────► snapshot() ──────────► Arc<CartState>        │
//! │                                                                         │
//! │  After every change: subscribers receive (new snapshot, Transition)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots
//! The state lives behind an `Arc`. Writes go through `Arc::make_mut`, so a
//! snapshot handed out earlier is never modified: if a view still holds it,
//! the store clones before writing and the view keeps the old picture until
//! it asks again.
//!
//! Execution is single-threaded; every operation runs to completion before
//! the next one starts, so no lock is involved.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cost::CostInput;
use crate::error::CoreResult;
use crate::types::{CartState, Transition};
use crate::validation::{validate_quantity, ValidationResult};

/// An immutable, shareable picture of the cart at one point in time.
pub type Snapshot = Arc<CartState>;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Snapshot, &Transition)>;

// =============================================================================
// Cart Action
// =============================================================================

/// A serializable request for one store transition.
///
/// ```rust
/// use nursery_core::{CartAction, CartStore};
///
/// let action: CartAction =
///     serde_json::from_str(r#"{"type":"add_item","name":"Fern","cost":"$5.00"}"#).unwrap();
///
/// let mut store = CartStore::new();
/// store.dispatch(action).unwrap();
/// assert_eq!(store.state().get("Fern").unwrap().quantity, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum CartAction {
    AddItem {
        name: String,
        #[serde(default)]
        image: String,
        cost: CostInput,
    },
    UpdateQuantity {
        name: String,
        quantity: i64,
    },
    RemoveItem {
        name: String,
    },
    Clear,
}

// =============================================================================
// Cart Store
// =============================================================================

/// Owns the cart state and applies every transition to it.
///
/// Constructed explicitly by the application and passed by reference; there
/// is no process-wide instance.
pub struct CartStore {
    state: Snapshot,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// Creates a store holding an empty cart.
    pub fn new() -> Self {
        CartStore {
            state: Arc::new(CartState::new()),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.state)
    }

    /// Borrows the current state without taking a snapshot.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Adds one unit of an item.
    ///
    /// ## Behavior
    /// - `cost` is normalized to a non-negative `Money` first; malformed
    ///   input becomes zero
    /// - Item already in cart: quantity + 1
    /// - Item not in cart: appended with quantity 1
    ///
    /// ```rust
    /// use nursery_core::CartStore;
    ///
    /// let mut store = CartStore::new();
    /// store.add_item("Fern", "fern.jpg", "$5.00");
    /// store.add_item("Fern", "fern.jpg", "$5.00");
    ///
    /// let fern = store.state().get("Fern").unwrap();
    /// assert_eq!(fern.quantity, 2);
    /// assert_eq!(fern.subtotal().to_decimal_string(), "10.00");
    /// ```
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        image: impl Into<String>,
        cost: impl Into<CostInput>,
    ) -> Transition {
        let unit_cost = cost.into().normalize();
        let transition = Arc::make_mut(&mut self.state).add_item(name.into(), image.into(), unit_cost);
        self.publish(&transition);
        transition
    }

    /// Sets an item's quantity.
    ///
    /// ## Behavior
    /// - `quantity < 1`: `Err(ValidationError::MustBePositive)`, nothing changes
    /// - Item not in cart, or already at `quantity`: `Ok(Transition::Unchanged)`
    pub fn set_quantity(&mut self, name: &str, quantity: i64) -> ValidationResult<Transition> {
        validate_quantity(quantity)?;

        match self.state.get(name) {
            None => {
                debug!(name = %name, "set_quantity on item not in cart");
                return Ok(Transition::Unchanged);
            }
            Some(item) if item.quantity == quantity => return Ok(Transition::Unchanged),
            Some(_) => {}
        }

        let transition = Arc::make_mut(&mut self.state).set_quantity(name, quantity)?;
        self.publish(&transition);
        Ok(transition)
    }

    /// Removes an item. Removing a missing item is a no-op.
    pub fn remove_item(&mut self, name: &str) -> Transition {
        if !self.state.contains(name) {
            debug!(name = %name, "remove_item on item not in cart");
            return Transition::Unchanged;
        }

        let transition = Arc::make_mut(&mut self.state).remove_item(name);
        self.publish(&transition);
        transition
    }

    /// Empties the cart. Safe to call on an empty cart.
    pub fn clear(&mut self) -> Transition {
        if self.state.is_empty() {
            return Transition::Unchanged;
        }

        let transition = Arc::make_mut(&mut self.state).clear();
        self.publish(&transition);
        transition
    }

    /// Applies a serialized action.
    pub fn dispatch(&mut self, action: CartAction) -> CoreResult<Transition> {
        let transition = match action {
            CartAction::AddItem { name, image, cost } => self.add_item(name, image, cost),
            CartAction::UpdateQuantity { name, quantity } => self.set_quantity(&name, quantity)?,
            CartAction::RemoveItem { name } => self.remove_item(&name),
            CartAction::Clear => self.clear(),
        };
        Ok(transition)
    }

    /// Registers a listener called after every change.
    ///
    /// ```rust
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use nursery_core::CartStore;
    ///
    /// let seen = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&seen);
    ///
    /// let mut store = CartStore::new();
    /// store.subscribe(move |_snapshot, _transition| counter.set(counter.get() + 1));
    ///
    /// store.add_item("Fern", "", "$5.00");
    /// store.remove_item("Ghost"); // no change, no notification
    /// assert_eq!(seen.get(), 1);
    /// ```
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot, &Transition) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drops a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let initial_len = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() < initial_len
    }

    fn publish(&mut self, transition: &Transition) {
        if !transition.is_change() {
            return;
        }

        debug!(
            ?transition,
            items = self.state.len(),
            listeners = self.listeners.len(),
            "cart transition applied"
        );

        let state = &self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(state, transition);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
