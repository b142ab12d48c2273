//! # Session State
//!
//! The composition root for one shopping session: it constructs the
//! `CartStore`, keeps the `CartView` the front end is looking at, and owns
//! the navigator behind "Continue Shopping".
//!
//! ```text
//! Session
//! ├── store: CartStore       ◄── sole mutation authority
//! ├── view: CartView         ◄── snapshot the last reply rendered
//! └── navigator: Navigation  ◄── records continue-shopping requests
//! ```
//!
//! Everything runs on the shell's single thread; the session is passed by
//! `&mut` to each command.

use tracing::{debug, info};

use nursery_core::{CartStore, CartSummary, CartView, CoreResult, Intent, Navigator, Transition};

/// Records "Continue Shopping" so the reply can tell the front end to leave
/// the cart page.
#[derive(Debug, Default)]
pub struct Navigation {
    pending: bool,
    total: u64,
}

impl Navigation {
    /// True if navigation was requested since the last call.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Number of navigation requests this session.
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Navigator for Navigation {
    fn continue_shopping(&mut self) {
        debug!("continue shopping requested");
        self.pending = true;
        self.total += 1;
    }
}

/// One shopping session.
#[derive(Debug)]
pub struct Session {
    store: CartStore,
    view: CartView,
    navigation: Navigation,
}

impl Session {
    /// Starts a session with an empty cart.
    pub fn new() -> Self {
        let mut store = CartStore::new();
        store.subscribe(|snapshot, transition| {
            info!(
                ?transition,
                items = snapshot.len(),
                total = %snapshot.total_cost(),
                "cart updated"
            );
        });

        let view = CartView::of(&store);
        Session {
            store,
            view,
            navigation: Navigation::default(),
        }
    }

    /// Forwards a user intent through the view to the store.
    pub fn apply(&mut self, intent: Intent) -> CoreResult<Transition> {
        self.view
            .apply(intent, &mut self.store, &mut self.navigation)
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> Transition {
        let transition = self.store.clear();
        self.view.refresh(&self.store);
        transition
    }

    /// What the cart page should render right now.
    pub fn summary(&self) -> CartSummary {
        self.view.summary()
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    pub fn navigation_mut(&mut self) -> &mut Navigation {
        &mut self.navigation
    }

    /// Resets the cart at the end of the session.
    pub fn end(&mut self) {
        let transition = self.clear();
        info!(
            ?transition,
            navigations = self.navigation.total(),
            "session ended"
        );
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nursery_core::CostInput;

    #[test]
    fn test_session_starts_empty() {
        let session = Session::new();
        assert!(session.store().state().is_empty());
        assert_eq!(session.summary().total, "0.00");
    }

    #[test]
    fn test_apply_refreshes_view() {
        let mut session = Session::new();
        session
            .apply(Intent::Add {
                name: "Fern".into(),
                image: "fern.jpg".into(),
                cost: "$5.00".into(),
            })
            .unwrap();
        session
            .apply(Intent::Increment { name: "Fern".into() })
            .unwrap();

        let summary = session.summary();
        assert_eq!(summary.items[0].quantity, 2);
        assert_eq!(summary.total, "10.00");
    }

    #[test]
    fn test_continue_shopping_is_recorded_once() {
        let mut session = Session::new();
        session.apply(Intent::ContinueShopping).unwrap();

        assert!(session.navigation_mut().take_pending());
        assert!(!session.navigation_mut().take_pending());
        assert_eq!(session.navigation_mut().total(), 1);
    }

    #[test]
    fn test_end_resets_cart() {
        let mut session = Session::new();
        session
            .apply(Intent::Add {
                name: "Oak".into(),
                image: String::new(),
                cost: CostInput::Amount(3.33),
            })
            .unwrap();

        session.end();
        assert!(session.store().state().is_empty());
        assert!(session.summary().items.is_empty());

        session.end();
        assert!(session.store().state().is_empty());
    }
}
