//! # Domain Types
//!
//! Core cart types and the pure transitions that change them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────────┐                │
//! │  │     CartState       │ 1    * │      LineItem       │                │
//! │  │  ─────────────────  │───────►│  ─────────────────  │                │
//! │  │  items (ordered)    │        │  name (unique key)  │                │
//! │  │  created_at         │        │  image              │                │
//! │  └─────────────────────┘        │  unit_cost (Money)  │                │
//! │                                 │  quantity (>= 1)    │                │
//! │  ┌─────────────────────┐        └─────────────────────┘                │
//! │  │     Transition      │                                               │
//! │  │  Added / Incremented / QuantitySet / Removed / Cleared / Unchanged  │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CartState` only changes through its `pub(crate)` transitions, which the
//! [`CartStore`](crate::store::CartStore) drives. Consumers see it read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{validate_quantity, ValidationResult};

// =============================================================================
// Line Item
// =============================================================================

/// One distinct product entry in the cart, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Display name, also the cart key.
    pub name: String,

    /// Image URL or asset reference, passed through untouched.
    pub image: String,

    /// Normalized unit cost. Never negative.
    pub unit_cost: Money,

    /// Quantity in cart. Always at least 1 while stored.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item with quantity 1.
    pub fn new(name: impl Into<String>, image: impl Into<String>, unit_cost: Money) -> Self {
        LineItem {
            name: name.into(),
            image: image.into(),
            unit_cost,
            quantity: 1,
        }
    }

    /// Unit cost × quantity, unrounded.
    ///
    /// Derived on every call so it can never drift from its inputs.
    ///
    /// ```rust
    /// use nursery_core::{LineItem, Money};
    ///
    /// let mut fern = LineItem::new("Fern", "fern.jpg", Money::from_cents(500));
    /// fern.quantity = 3;
    /// assert_eq!(fern.subtotal(), Money::from_cents(1500));
    /// ```
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_cost.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Transition
// =============================================================================

/// What a cart operation did.
///
/// Returned by every store operation and handed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Transition {
    /// A new item was appended with quantity 1.
    Added { name: String },
    /// An existing item was added again.
    Incremented { name: String, quantity: i64 },
    /// An item's quantity was set directly.
    QuantitySet { name: String, quantity: i64 },
    /// An item left the cart.
    Removed { name: String },
    /// The cart was emptied.
    Cleared { removed: usize },
    /// Nothing changed (missing item, inert intent, empty clear).
    Unchanged,
}

impl Transition {
    /// True when the cart's contents changed.
    pub fn is_change(&self) -> bool {
        !matches!(self, Transition::Unchanged)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The ordered collection of line items.
///
/// ## Invariants
/// - At most one item per `name`
/// - Insertion order is preserved
/// - Every stored item has `quantity >= 1`
///
/// Serialize-only. A cart is only ever built through the transitions below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartState {
    items: Vec<LineItem>,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl CartState {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartState {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up an item by name.
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Checks whether an item with this name is in the cart.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sum of all quantities, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.quantity))
    }

    /// Sum of every item's unrounded subtotal.
    ///
    /// Rounding is left to the caller and must happen once, on this value.
    pub fn total_cost(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    // -------------------------------------------------------------------------
    // Transitions (driven by CartStore)
    // -------------------------------------------------------------------------

    /// Appends a new item, or adds one more of an existing item.
    ///
    /// For an existing item the stored `unit_cost` wins; the new cost is
    /// ignored so a repeated add never reprices the line.
    pub(crate) fn add_item(&mut self, name: String, image: String, unit_cost: Money) -> Transition {
        if let Some(item) = self.items.iter_mut().find(|i| i.name == name) {
            item.quantity = item.quantity.saturating_add(1);
            return Transition::Incremented {
                name,
                quantity: item.quantity,
            };
        }

        self.items.push(LineItem::new(name.clone(), image, unit_cost));
        Transition::Added { name }
    }

    /// Sets an item's quantity.
    ///
    /// ## Behavior
    /// - `quantity < 1`: rejected, nothing changes
    /// - item not found, or already at `quantity`: `Transition::Unchanged`
    pub(crate) fn set_quantity(&mut self, name: &str, quantity: i64) -> ValidationResult<Transition> {
        validate_quantity(quantity)?;

        match self.items.iter_mut().find(|i| i.name == name) {
            Some(item) if item.quantity == quantity => Ok(Transition::Unchanged),
            Some(item) => {
                item.quantity = quantity;
                Ok(Transition::QuantitySet {
                    name: item.name.clone(),
                    quantity,
                })
            }
            None => Ok(Transition::Unchanged),
        }
    }

    /// Removes an item by name. Idempotent.
    pub(crate) fn remove_item(&mut self, name: &str) -> Transition {
        let initial_len = self.items.len();
        self.items.retain(|i| i.name != name);

        if self.items.len() == initial_len {
            Transition::Unchanged
        } else {
            Transition::Removed {
                name: name.to_string(),
            }
        }
    }

    /// Empties the cart and restamps `created_at`. Safe on an empty cart.
    pub(crate) fn clear(&mut self) -> Transition {
        if self.items.is_empty() {
            return Transition::Unchanged;
        }

        let removed = self.items.len();
        self.items.clear();
        self.created_at = Utc::now();
        Transition::Cleared { removed }
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
