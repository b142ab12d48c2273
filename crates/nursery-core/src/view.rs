//! # Cart View
//!
//! Read-only derivations over a cart snapshot, plus the intents a user can
//! fire from the cart page.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Total Cart Amount: $13.33                                              │
//! │                                                                         │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  Fern      Price: $5.00    [-] 2 [+]    Total: $10.00  [Delete]│    │
//! │  │  Oak       Price: $3.33    [-] 1 [+]    Total: $3.33   [Delete]│    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  [Continue Shopping]   [Checkout]                                       │
//! │                                                                         │
//! │  [+]  ──► Intent::Increment  ──► set_quantity(name, qty + 1)            │
//! │  [-]  ──► Intent::Decrement  ──► qty > 1 ? set_quantity(qty - 1)        │
//! │                                          : remove_item(name)            │
//! │  [Delete] ► Intent::Remove   ──► remove_item(name)                      │
//! │  [Continue Shopping] ───────────► Navigator::continue_shopping()        │
//! │  [Checkout] ────────────────────► nothing (not wired yet)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Policy
//! The cart total is the exact sum of unrounded subtotals, rounded ONCE.
//! Rounding each row and adding the rounded rows can be a cent off.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cost::CostInput;
use crate::error::CoreResult;
use crate::money::Money;
use crate::store::{CartStore, Snapshot};
use crate::types::{CartState, LineItem, Transition};

// =============================================================================
// Derivations
// =============================================================================

/// Row subtotal as display text, e.g. `"10.00"`.
///
/// ```rust
/// use nursery_core::{view::per_item_subtotal, LineItem, Money};
///
/// let mut oak = LineItem::new("Oak", "oak.jpg", Money::from_cents(333));
/// oak.quantity = 2;
/// assert_eq!(per_item_subtotal(&oak), "6.66");
/// ```
pub fn per_item_subtotal(item: &LineItem) -> String {
    item.subtotal().to_decimal_string()
}

/// Cart total as display text; `"0.00"` for an empty cart.
///
/// ```rust
/// use nursery_core::{view::cart_total, LineItem, Money};
///
/// let half_cent = Money::from_micros(5_000);
/// let items: Vec<LineItem> = ["A", "B", "C"]
///     .iter()
///     .map(|name| LineItem::new(*name, "", half_cent))
///     .collect();
///
/// // 0.005 × 3 = 0.015 → "0.02"  (rounding each row first would give "0.03")
/// assert_eq!(cart_total(&items), "0.02");
/// assert_eq!(cart_total(&[]), "0.00");
/// ```
pub fn cart_total(items: &[LineItem]) -> String {
    items
        .iter()
        .map(LineItem::subtotal)
        .sum::<Money>()
        .to_decimal_string()
}

// =============================================================================
// Presentation Types
// =============================================================================

/// One cart row with every display string precomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItemView {
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: i64,
    pub subtotal: String,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        LineItemView {
            name: item.name.clone(),
            image: item.image.clone(),
            unit_price: item.unit_cost.to_decimal_string(),
            quantity: item.quantity,
            subtotal: per_item_subtotal(item),
        }
    }
}

/// Everything a cart page needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    pub items: Vec<LineItemView>,
    /// Distinct items.
    pub item_count: usize,
    /// Sum of quantities.
    pub total_quantity: i64,
    pub total: String,
}

impl From<&CartState> for CartSummary {
    fn from(state: &CartState) -> Self {
        CartSummary {
            items: state.items().iter().map(LineItemView::from).collect(),
            item_count: state.len(),
            total_quantity: state.total_quantity(),
            total: cart_total(state.items()),
        }
    }
}

// =============================================================================
// Intents
// =============================================================================

/// A named user action on the cart page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "intent", rename_all = "snake_case")]
#[ts(export)]
pub enum Intent {
    Add {
        name: String,
        #[serde(default)]
        image: String,
        cost: CostInput,
    },
    Increment {
        name: String,
    },
    Decrement {
        name: String,
    },
    Remove {
        name: String,
    },
    ContinueShopping,
    /// Inert for now: no transition happens.
    Checkout,
}

/// The navigation seam behind "Continue Shopping".
///
/// Any `FnMut()` closure is a navigator.
pub trait Navigator {
    fn continue_shopping(&mut self);
}

impl<F: FnMut()> Navigator for F {
    fn continue_shopping(&mut self) {
        self()
    }
}

/// `+`: one more of the item the user is looking at.
pub fn increment(store: &mut CartStore, item: &LineItem) -> CoreResult<Transition> {
    Ok(store.set_quantity(&item.name, item.quantity.saturating_add(1))?)
}

/// `-`: one fewer, or gone when the item is at 1. Never stores 0.
pub fn decrement(store: &mut CartStore, item: &LineItem) -> CoreResult<Transition> {
    if item.quantity > 1 {
        Ok(store.set_quantity(&item.name, item.quantity - 1)?)
    } else {
        Ok(store.remove_item(&item.name))
    }
}

// =============================================================================
// Cart View
// =============================================================================

/// A read-only consumer of the store.
///
/// Holds a snapshot; intents are resolved against the item as this view last
/// saw it, then forwarded to the store, after which the view refreshes.
///
/// ```rust
/// use nursery_core::{CartStore, CartView, Intent};
///
/// let mut store = CartStore::new();
/// store.add_item("Fern", "fern.jpg", "$5.00");
/// store.add_item("Oak", "oak.jpg", "$3.33");
///
/// let mut view = CartView::of(&store);
/// let mut navigate = || {};
/// view.apply(Intent::Decrement { name: "Fern".into() }, &mut store, &mut navigate)
///     .unwrap();
///
/// assert_eq!(view.items().len(), 1);
/// assert_eq!(view.total(), "3.33");
/// ```
#[derive(Debug, Clone)]
pub struct CartView {
    snapshot: Snapshot,
}

impl CartView {
    /// Wraps an existing snapshot.
    pub fn new(snapshot: Snapshot) -> Self {
        CartView { snapshot }
    }

    /// Takes the store's current snapshot.
    pub fn of(store: &CartStore) -> Self {
        Self::new(store.snapshot())
    }

    /// Picks up the store's latest snapshot.
    pub fn refresh(&mut self, store: &CartStore) {
        self.snapshot = store.snapshot();
    }

    pub fn snapshot(&self) -> &CartState {
        &self.snapshot
    }

    pub fn items(&self) -> &[LineItem] {
        self.snapshot.items()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.snapshot.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.snapshot.total_quantity()
    }

    /// Rows with display strings.
    pub fn line_items(&self) -> Vec<LineItemView> {
        self.items().iter().map(LineItemView::from).collect()
    }

    /// Cart total as display text.
    pub fn total(&self) -> String {
        cart_total(self.items())
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::from(&*self.snapshot)
    }

    /// Forwards an intent to the store and refreshes this view.
    ///
    /// Intents naming an item this view does not show are ignored.
    pub fn apply(
        &mut self,
        intent: Intent,
        store: &mut CartStore,
        navigator: &mut dyn Navigator,
    ) -> CoreResult<Transition> {
        let transition = match intent {
            Intent::Add { name, image, cost } => store.add_item(name, image, cost),
            Intent::Increment { name } => match self.snapshot.get(&name) {
                Some(item) => increment(store, item)?,
                None => self.unknown_item(&name),
            },
            Intent::Decrement { name } => match self.snapshot.get(&name) {
                Some(item) => decrement(store, item)?,
                None => self.unknown_item(&name),
            },
            Intent::Remove { name } => store.remove_item(&name),
            Intent::ContinueShopping => {
                navigator.continue_shopping();
                Transition::Unchanged
            }
            Intent::Checkout => {
                debug!("checkout requested; no checkout flow is wired");
                Transition::Unchanged
            }
        };

        self.refresh(store);
        Ok(transition)
    }

    fn unknown_item(&self, name: &str) -> Transition {
        debug!(name = %name, "intent for item not in view");
        Transition::Unchanged
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn no_nav() -> impl FnMut() {
        || {}
    }

    fn fern_and_oak() -> CartStore {
        let mut store = CartStore::new();
        store.add_item("Fern", "fern.jpg", "$5.00");
        store.add_item("Oak", "oak.jpg", "$3.33");
        store
    }

    #[test]
    fn test_empty_cart_total() {
        let store = CartStore::new();
        let view = CartView::of(&store);
        assert!(view.is_empty());
        assert_eq!(view.total(), "0.00");
    }

    #[test]
    fn test_fern_added_twice() {
        let mut store = CartStore::new();
        store.add_item("Fern", "fern.jpg", "$5.00");
        store.add_item("Fern", "fern.jpg", "$5.00");

        let view = CartView::of(&store);
        assert_eq!(view.item_count(), 1);
        assert_eq!(view.items()[0].quantity, 2);
        assert_eq!(per_item_subtotal(&view.items()[0]), "10.00");
        assert_eq!(view.total(), "10.00");
    }

    #[test]
    fn test_decrement_at_one_removes() {
        let mut store = fern_and_oak();
        let mut view = CartView::of(&store);

        let t = view
            .apply(Intent::Decrement { name: "Fern".into() }, &mut store, &mut no_nav())
            .unwrap();

        assert_eq!(t, Transition::Removed { name: "Fern".into() });
        assert!(!store.state().contains("Fern"));
        assert_eq!(view.item_count(), 1);
        assert_eq!(view.total(), "3.33");
    }

    #[test]
    fn test_increment_then_decrement() {
        let mut store = fern_and_oak();
        let mut view = CartView::of(&store);
        let mut nav = no_nav();

        view.apply(Intent::Increment { name: "Oak".into() }, &mut store, &mut nav)
            .unwrap();
        view.apply(Intent::Increment { name: "Oak".into() }, &mut store, &mut nav)
            .unwrap();
        assert_eq!(view.snapshot().get("Oak").unwrap().quantity, 3);
        assert_eq!(per_item_subtotal(view.snapshot().get("Oak").unwrap()), "9.99");

        let t = view
            .apply(Intent::Decrement { name: "Oak".into() }, &mut store, &mut nav)
            .unwrap();
        assert_eq!(
            t,
            Transition::QuantitySet {
                name: "Oak".into(),
                quantity: 2
            }
        );
        assert_eq!(view.total(), "11.66");
    }

    #[test]
    fn test_remove_intent_is_unconditional() {
        let mut store = fern_and_oak();
        store.add_item("Fern", "", "$5.00");
        let mut view = CartView::of(&store);

        view.apply(Intent::Remove { name: "Fern".into() }, &mut store, &mut no_nav())
            .unwrap();
        assert!(!view.snapshot().contains("Fern"));

        let again = view
            .apply(Intent::Remove { name: "Fern".into() }, &mut store, &mut no_nav())
            .unwrap();
        assert_eq!(again, Transition::Unchanged);
    }

    #[test]
    fn test_intent_for_unknown_item_is_ignored() {
        let mut store = fern_and_oak();
        let mut view = CartView::of(&store);

        let t = view
            .apply(Intent::Increment { name: "Ghost".into() }, &mut store, &mut no_nav())
            .unwrap();
        assert_eq!(t, Transition::Unchanged);
        assert_eq!(view.item_count(), 2);
    }

    #[test]
    fn test_continue_shopping_calls_navigator_only() {
        let mut store = fern_and_oak();
        let before = store.snapshot();
        let mut view = CartView::of(&store);

        let mut calls = 0;
        let mut nav = || calls += 1;
        let t = view
            .apply(Intent::ContinueShopping, &mut store, &mut nav)
            .unwrap();

        assert_eq!(t, Transition::Unchanged);
        assert_eq!(calls, 1);
        assert_eq!(*store.state(), *before);
    }

    #[test]
    fn test_checkout_is_inert() {
        let mut store = fern_and_oak();
        let mut view = CartView::of(&store);

        let t = view.apply(Intent::Checkout, &mut store, &mut no_nav()).unwrap();
        assert_eq!(t, Transition::Unchanged);
        assert_eq!(view.item_count(), 2);
    }

    #[test]
    fn test_view_snapshot_is_stale_until_refresh() {
        let mut store = fern_and_oak();
        let mut view = CartView::of(&store);

        store.add_item("Ivy", "", "$1.00");
        assert_eq!(view.item_count(), 2);

        view.refresh(&store);
        assert_eq!(view.item_count(), 3);
    }

    #[test]
    fn test_total_rounds_once() {
        let mut store = CartStore::new();
        for name in ["Moss", "Lichen", "Clover"] {
            store.add_item(name, "", "$0.005");
        }
        let view = CartView::of(&store);

        let row_sum: i64 = view
            .items()
            .iter()
            .map(|i| i.subtotal().round_to_cents())
            .sum();
        assert_eq!(row_sum, 3);
        assert_eq!(view.total(), "0.02");
    }

    #[test]
    fn test_summary() {
        let mut store = fern_and_oak();
        store.add_item("Fern", "", "$5.00");
        let summary = CartView::of(&store).summary();

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.total, "13.33");
        assert_eq!(
            summary.items[0],
            LineItemView {
                name: "Fern".into(),
                image: "fern.jpg".into(),
                unit_price: "5.00".into(),
                quantity: 2,
                subtotal: "10.00".into(),
            }
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["items"][1]["unitPrice"], "3.33");
        assert_eq!(json["totalQuantity"], 3);
    }

    #[test]
    fn test_increment_at_max_quantity_is_unchanged() {
        let mut store = fern_and_oak();
        store.set_quantity("Fern", i64::MAX).unwrap();
        let mut view = CartView::of(&store);
        let before = store.snapshot();

        let t = view
            .apply(Intent::Increment { name: "Fern".into() }, &mut store, &mut no_nav())
            .unwrap();

        assert_eq!(t, Transition::Unchanged);
        assert!(std::sync::Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_summary_with_huge_quantities() {
        let mut store = fern_and_oak();
        store.set_quantity("Fern", i64::MAX).unwrap();
        store.set_quantity("Oak", i64::MAX).unwrap();

        let summary = CartView::of(&store).summary();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, i64::MAX);
    }

    #[test]
    fn test_intent_wire_format() {
        let intent: Intent =
            serde_json::from_str(r#"{"intent":"add","name":"Fern","cost":"$5.00"}"#).unwrap();
        assert_eq!(
            intent,
            Intent::Add {
                name: "Fern".into(),
                image: String::new(),
                cost: CostInput::Text("$5.00".into()),
            }
        );

        let intent: Intent = serde_json::from_str(r#"{"intent":"continue_shopping"}"#).unwrap();
        assert_eq!(intent, Intent::ContinueShopping);
    }
}
