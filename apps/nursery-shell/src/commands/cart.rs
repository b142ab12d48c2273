//! # Cart Commands
//!
//! Decodes one request line, runs it against the session, encodes the reply.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add   ┌──────────┐  continue_shopping  ┌──────────────┐  │
//! │  │  Empty   │───────►│ In Cart  │────────────────────►│ Product list │  │
//! │  │  Cart    │        │          │                     │ (front end)  │  │
//! │  └──────────┘        └──────────┘                     └──────────────┘  │
//! │       ▲                   │                                             │
//! │       │              increment                                          │
//! │       │              decrement                                          │
//! │       │              remove                                             │
//! │       │                   │                                             │
//! │       └──── clear ◄───────┘      checkout: accepted, does nothing       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! ```text
//! → {"intent":"add","name":"Fern","image":"fern.jpg","cost":"$5.00"}
//! ← {"ok":true,"cart":{"items":[...],"itemCount":1,"totalQuantity":1,"total":"5.00"},
//!    "transition":{"kind":"added","name":"Fern"}}
//!
//! → {"intent":"decrement"}
//! ← {"ok":false,"error":{"code":"INVALID_REQUEST","message":"missing field `name` ..."}}
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use nursery_core::validation::validate_item_name;
use nursery_core::{CartSummary, CostInput, Intent, Transition};

use crate::error::ApiError;
use crate::state::Session;

/// A request from the front end.
#[derive(Debug, Clone, PartialEq, Deserialize, TS)]
#[serde(tag = "intent", rename_all = "snake_case")]
#[ts(export)]
pub enum Request {
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
    Checkout,
    /// Empty the cart.
    Clear,
    /// Read the cart without changing it.
    Cart,
}

/// Navigation the front end should perform after this reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NavigationEvent {
    ContinueShopping,
}

/// One reply line.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Reply {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart: Option<CartSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationEvent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Reply {
    fn success(cart: CartSummary, transition: Transition, navigation: Option<NavigationEvent>) -> Self {
        Reply {
            ok: true,
            cart: Some(cart),
            transition: Some(transition),
            navigation,
            error: None,
        }
    }

    fn failure(error: ApiError) -> Self {
        Reply {
            ok: false,
            cart: None,
            transition: None,
            navigation: None,
            error: Some(error),
        }
    }
}

/// Runs one decoded request.
///
/// ## Behavior
/// - `add`: name is validated here; the cost is never rejected
/// - item intents: resolved against the quantity the front end last saw
/// - `clear` / `cart`: handled by the session directly
pub fn handle(session: &mut Session, request: Request) -> Result<Transition, ApiError> {
    let intent = match request {
        Request::Add { name, image, cost } => {
            validate_item_name(&name)?;
            Intent::Add { name, image, cost }
        }
        Request::Increment { name } => Intent::Increment { name },
        Request::Decrement { name } => Intent::Decrement { name },
        Request::Remove { name } => Intent::Remove { name },
        Request::ContinueShopping => Intent::ContinueShopping,
        Request::Checkout => Intent::Checkout,
        Request::Clear => return Ok(session.clear()),
        Request::Cart => return Ok(Transition::Unchanged),
    };

    Ok(session.apply(intent)?)
}

/// Answers one raw request line. Bytes that are not UTF-8 get an
/// `INVALID_REQUEST` reply instead of ending the session.
pub fn handle_bytes(session: &mut Session, line: &[u8], echo_navigation: bool) -> Reply {
    match std::str::from_utf8(line) {
        Ok(line) => handle_line(session, line, echo_navigation),
        Err(err) => {
            warn!(error = %err, "request line is not UTF-8");
            Reply::failure(ApiError::invalid_request(format!("request is not valid UTF-8: {err}")))
        }
    }
}

/// Decodes and runs one request line, producing the reply to send back.
pub fn handle_line(session: &mut Session, line: &str, echo_navigation: bool) -> Reply {
    let request = match serde_json::from_str::<Request>(line) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "malformed request line");
            return Reply::failure(err.into());
        }
    };
    debug!(?request, "request received");

    match handle(session, request) {
        Ok(transition) => {
            let navigated = session.navigation_mut().take_pending();
            let navigation = (navigated && echo_navigation).then_some(NavigationEvent::ContinueShopping);
            Reply::success(session.summary(), transition, navigation)
        }
        Err(err) => {
            debug!(error = %err, "request rejected");
            Reply::failure(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn send(session: &mut Session, line: &str) -> Reply {
        handle_line(session, line, true)
    }

    fn add(session: &mut Session, name: &str, cost: &str) -> Reply {
        send(
            session,
            &format!(r#"{{"intent":"add","name":"{}","cost":"{}"}}"#, name, cost),
        )
    }

    #[test]
    fn test_add_twice() {
        let mut session = Session::new();
        add(&mut session, "Fern", "$5.00");
        let reply = add(&mut session, "Fern", "$5.00");

        assert!(reply.ok);
        let cart = reply.cart.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[0].subtotal, "10.00");
        assert_eq!(cart.total, "10.00");
        assert_eq!(
            reply.transition,
            Some(Transition::Incremented {
                name: "Fern".into(),
                quantity: 2
            })
        );
    }

    #[test]
    fn test_decrement_last_unit_removes() {
        let mut session = Session::new();
        add(&mut session, "Fern", "$5.00");
        add(&mut session, "Oak", "$3.33");

        let reply = send(&mut session, r#"{"intent":"decrement","name":"Fern"}"#);
        let cart = reply.cart.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].name, "Oak");
        assert_eq!(cart.total, "3.33");
    }

    #[test]
    fn test_numeric_cost_and_increment() {
        let mut session = Session::new();
        send(&mut session, r#"{"intent":"add","name":"Ivy","cost":2.5}"#);
        let reply = send(&mut session, r#"{"intent":"increment","name":"Ivy"}"#);

        let cart = reply.cart.unwrap();
        assert_eq!(cart.items[0].unit_price, "2.50");
        assert_eq!(cart.total, "5.00");
    }

    #[test]
    fn test_malformed_cost_is_zero_not_error() {
        let mut session = Session::new();
        let reply = add(&mut session, "Mystery", "ask staff");

        assert!(reply.ok);
        assert_eq!(reply.cart.unwrap().items[0].unit_price, "0.00");
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut session = Session::new();
        let reply = add(&mut session, "  ", "$1.00");

        assert!(!reply.ok);
        assert_eq!(reply.error.unwrap().code, ErrorCode::ValidationError);
        assert!(session.store().state().is_empty());
    }

    #[test]
    fn test_malformed_lines() {
        let mut session = Session::new();

        for line in [
            "not json",
            r#"{"intent":"teleport"}"#,
            r#"{"intent":"remove"}"#,
            r#"{"name":"Fern"}"#,
        ] {
            let reply = send(&mut session, line);
            assert!(!reply.ok, "accepted: {line}");
            assert_eq!(reply.error.unwrap().code, ErrorCode::InvalidRequest);
        }
    }

    #[test]
    fn test_non_utf8_line_is_invalid_request() {
        let mut session = Session::new();
        add(&mut session, "Fern", "$5.00");

        let reply = handle_bytes(&mut session, b"\xff\xfe", true);
        assert!(!reply.ok);
        assert_eq!(reply.error.unwrap().code, ErrorCode::InvalidRequest);

        let reply = handle_bytes(&mut session, br#"{"intent":"cart"}"#, true);
        assert!(reply.ok);
        assert_eq!(reply.cart.unwrap().item_count, 1);
    }

    #[test]
    fn test_continue_shopping_reports_navigation() {
        let mut session = Session::new();
        add(&mut session, "Fern", "$5.00");

        let reply = send(&mut session, r#"{"intent":"continue_shopping"}"#);
        assert!(reply.ok);
        assert_eq!(reply.navigation, Some(NavigationEvent::ContinueShopping));
        assert_eq!(reply.transition, Some(Transition::Unchanged));
        assert_eq!(reply.cart.unwrap().items.len(), 1);

        let reply = send(&mut session, r#"{"intent":"cart"}"#);
        assert_eq!(reply.navigation, None);
    }

    #[test]
    fn test_navigation_echo_can_be_disabled() {
        let mut session = Session::new();
        let reply = handle_line(&mut session, r#"{"intent":"continue_shopping"}"#, false);
        assert!(reply.ok);
        assert_eq!(reply.navigation, None);
    }

    #[test]
    fn test_checkout_and_clear() {
        let mut session = Session::new();
        add(&mut session, "Fern", "$5.00");

        let reply = send(&mut session, r#"{"intent":"checkout"}"#);
        assert_eq!(reply.transition, Some(Transition::Unchanged));
        assert_eq!(reply.cart.unwrap().items.len(), 1);

        let reply = send(&mut session, r#"{"intent":"clear"}"#);
        assert_eq!(reply.transition, Some(Transition::Cleared { removed: 1 }));
        assert_eq!(reply.cart.unwrap().total, "0.00");
    }

    #[test]
    fn test_reply_json_shape() {
        let mut session = Session::new();
        let reply = add(&mut session, "Fern", "$5.00");
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["ok"], true);
        assert_eq!(json["cart"]["itemCount"], 1);
        assert_eq!(json["transition"]["kind"], "added");
        assert!(json.get("error").is_none());
        assert!(json.get("navigation").is_none());

        let reply = send(&mut session, "{");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["code"], "INVALID_REQUEST");
        assert!(json.get("cart").is_none());
    }
}
