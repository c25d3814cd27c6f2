//! # Cart Commands
//!
//! Commands for cart manipulation and the cart drawer.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart  ┌──────────┐  navigate("/checkout")         │
//! │  │  Empty   │──────────────►│ In Cart  │─────────────────────────►      │
//! │  │  Cart    │               │          │                                │
//! │  └──────────┘               └──────────┘                                │
//! │       ▲                        │    ▲                                   │
//! │       │           update_cart_item  │ add_to_cart (quantity + 1)        │
//! │       │           remove_from_cart  │                                   │
//! │       │                        ▼    │                                   │
//! │       └──────── clear_cart ─────────┘                                   │
//! │                                                                         │
//! │  Drawer visibility (toggle/open/close) is independent of contents.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating command returns the full [`CartResponse`] so the frontend
//! can re-render the drawer from one reply.

use rigmart_core::{Cart, CartChange, CartTotals, CoreError, LineItem, ProductId};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::Session;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    pub is_open: bool,
    /// `cart_total` in the store's currency, e.g. `৳16500.00`.
    pub formatted_total: String,
    /// Set on replies to mutating commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<CartChange>,
}

impl CartResponse {
    fn build(session: &Session, change: Option<CartChange>) -> Self {
        let cart: &Cart = session.cart();
        let totals = cart.totals();
        CartResponse {
            items: cart.cart_items().to_vec(),
            totals,
            is_open: cart.is_open(),
            formatted_total: session
                .config()
                .format_currency(totals.cart_total.minor()),
            change,
        }
    }
}

/// Reply to `get_cart_item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemStatus {
    pub product_id: ProductId,
    pub in_cart: bool,
    /// 0 when the product is not in the cart.
    pub quantity: i64,
}

/// Gets the current cart contents.
pub fn get_cart(session: &Session) -> CartResponse {
    debug!("get_cart command");
    CartResponse::build(session, None)
}

/// Adds one unit of a catalog product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity increases by 1
/// - Not in cart: added as a new line item with quantity 1
/// - The listing is snapshotted when first added
///
/// ## Errors
/// - `NOT_FOUND` if the id is not in the catalog
/// - `VALIDATION_ERROR` if the listing is no longer available
pub fn add_to_cart(session: &mut Session, product_id: ProductId) -> Result<CartResponse, ApiError> {
    debug!(product_id, "add_to_cart command");

    let product = session
        .catalog()
        .get(product_id)
        .cloned()
        .ok_or(CoreError::ProductNotFound(product_id))?;

    if !product.is_available {
        return Err(CoreError::ProductUnavailable(product_id).into());
    }

    let change = session.cart_mut().add_to_cart(&product);
    info!(
        product_id,
        cart_count = session.cart().cart_count(),
        "Added to cart"
    );
    Ok(CartResponse::build(session, Some(change)))
}

/// Removes a line item. Unknown ids leave the cart unchanged.
pub fn remove_from_cart(session: &mut Session, product_id: ProductId) -> CartResponse {
    debug!(product_id, "remove_from_cart command");
    let change = session.cart_mut().remove_from_cart(product_id);
    CartResponse::build(session, Some(change))
}

/// Sets an item's quantity.
///
/// ## Behavior
/// - Quantity 0 or below: removes the item
/// - Unknown id: no change
pub fn update_cart_item(
    session: &mut Session,
    product_id: ProductId,
    quantity: i64,
) -> CartResponse {
    debug!(product_id, quantity, "update_cart_item command");
    let change = session.cart_mut().update_quantity(product_id, quantity);
    CartResponse::build(session, Some(change))
}

/// Empties the cart. Drawer visibility is kept.
pub fn clear_cart(session: &mut Session) -> CartResponse {
    debug!("clear_cart command");
    let change = session.cart_mut().clear_cart();
    CartResponse::build(session, Some(change))
}

pub fn toggle_cart(session: &mut Session) -> CartResponse {
    debug!("toggle_cart command");
    let change = session.cart_mut().toggle_cart();
    CartResponse::build(session, Some(change))
}

pub fn open_cart(session: &mut Session) -> CartResponse {
    debug!("open_cart command");
    let change = session.cart_mut().open_cart();
    CartResponse::build(session, Some(change))
}

pub fn close_cart(session: &mut Session) -> CartResponse {
    debug!("close_cart command");
    let change = session.cart_mut().close_cart();
    CartResponse::build(session, Some(change))
}

/// Whether a product is in the cart, and how many.
pub fn get_cart_item(session: &Session, product_id: ProductId) -> CartItemStatus {
    let cart = session.cart();
    CartItemStatus {
        product_id,
        in_cart: cart.is_in_cart(product_id),
        quantity: cart.get_cart_item_quantity(product_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::session;
    use crate::error::ErrorCode;

    #[test]
    fn test_add_to_cart_increments() {
        let mut session = session();

        let first = add_to_cart(&mut session, 3).unwrap();
        assert_eq!(first.change, Some(CartChange::Added { id: 3 }));

        let second = add_to_cart(&mut session, 3).unwrap();
        assert_eq!(
            second.change,
            Some(CartChange::Incremented { id: 3, quantity: 2 })
        );
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.totals.cart_count, 2);
        assert_eq!(second.totals.cart_total.minor(), 960000);
        assert_eq!(second.formatted_total, "৳9600.00");
    }

    #[test]
    fn test_add_unknown_product_is_not_found() {
        let mut session = session();
        let err = add_to_cart(&mut session, 404).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_add_unavailable_product_is_rejected() {
        let mut session = session();
        let err = add_to_cart(&mut session, 8).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut session = session();
        add_to_cart(&mut session, 1).unwrap();
        add_to_cart(&mut session, 2).unwrap();

        let reply = update_cart_item(&mut session, 1, 0);
        assert_eq!(reply.change, Some(CartChange::Removed { id: 1 }));
        assert_eq!(reply.items.iter().map(|i| i.id()).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_unknown_ids_leave_cart_unchanged() {
        let mut session = session();
        add_to_cart(&mut session, 1).unwrap();

        assert_eq!(
            remove_from_cart(&mut session, 77).change,
            Some(CartChange::Unchanged)
        );
        assert_eq!(
            update_cart_item(&mut session, 77, 5).change,
            Some(CartChange::Unchanged)
        );
        assert_eq!(session.cart().cart_count(), 1);
    }

    #[test]
    fn test_drawer_visibility() {
        let mut session = session();
        assert!(toggle_cart(&mut session).is_open);
        assert!(open_cart(&mut session).is_open);
        assert!(!close_cart(&mut session).is_open);
        assert!(!close_cart(&mut session).is_open);
    }

    #[test]
    fn test_clear_keeps_drawer_open() {
        let mut session = session();
        add_to_cart(&mut session, 1).unwrap();
        add_to_cart(&mut session, 5).unwrap();
        open_cart(&mut session);

        let reply = clear_cart(&mut session);
        assert_eq!(reply.change, Some(CartChange::Cleared { removed: 2 }));
        assert!(reply.items.is_empty());
        assert!(reply.is_open);
        assert_eq!(reply.formatted_total, "৳0.00");
    }

    #[test]
    fn test_get_cart_item() {
        let mut session = session();
        add_to_cart(&mut session, 4).unwrap();
        add_to_cart(&mut session, 4).unwrap();

        assert_eq!(
            get_cart_item(&session, 4),
            CartItemStatus {
                product_id: 4,
                in_cart: true,
                quantity: 2
            }
        );
        assert!(!get_cart_item(&session, 5).in_cart);
        assert_eq!(get_cart_item(&session, 5).quantity, 0);
    }

    #[test]
    fn test_get_cart_has_no_change() {
        let json = serde_json::to_value(get_cart(&session())).unwrap();
        assert!(json.get("change").is_none());
        assert_eq!(json["isOpen"], false);
    }
}
