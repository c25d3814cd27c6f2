//! # Cart
//!
//! The shopping cart: line items plus the cart drawer's visibility flag.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Frontend Action          Operation               State Change          │
//! │  ───────────────          ─────────               ────────────          │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_to_cart() ───────► push / qty + 1        │
//! │  Quantity stepper ───────► update_quantity() ───► qty = n (0 removes)   │
//! │  Trash icon ─────────────► remove_from_cart() ──► items.remove(i)       │
//! │  "Clear" ────────────────► clear_cart() ────────► items.clear()         │
//! │  Cart icon ──────────────► toggle_cart() ───────► is_open = !is_open    │
//! │                                                                         │
//! │  Badge / drawer footer ──► cart_count(), cart_total() (read only)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per product id
//! - Every line item has `quantity >= 1`
//!
//! Operations on ids that are not in the cart are silent no-ops reported as
//! [`CartChange::Unchanged`]. Derived values are recomputed on every read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Line Item
// =============================================================================

/// One product in the cart with its quantity.
///
/// The product is a snapshot taken when it was first added, flattened so the
/// serialized item is the product's own fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,

    /// Always at least 1 while the item is in a cart.
    pub quantity: i64,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    fn new(product: &Product) -> Self {
        LineItem {
            product: product.clone(),
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.product.price
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.line_total(self.quantity)
    }
}

// =============================================================================
// Cart Change
// =============================================================================

/// What a mutating cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartChange {
    /// New line item with quantity 1.
    Added { id: ProductId },
    Incremented { id: ProductId, quantity: i64 },
    Updated { id: ProductId, quantity: i64 },
    Removed { id: ProductId },
    Cleared { removed: usize },
    #[serde(rename_all = "camelCase")]
    Visibility { is_open: bool },
    /// The operation targeted an id that is not in the cart.
    Unchanged,
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
    is_open: bool,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates an empty, closed cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            is_open: false,
            created_at: Utc::now(),
        }
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn find(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Already in cart: quantity + 1 (no upper bound; saturates at `i64::MAX`)
    /// - Not in cart: appended with quantity 1
    pub fn add_to_cart(&mut self, product: &Product) -> CartChange {
        if let Some(item) = self.items.iter_mut().find(|i| i.id() == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return CartChange::Incremented {
                id: product.id,
                quantity: item.quantity,
            };
        }

        self.items.push(LineItem::new(product));
        CartChange::Added { id: product.id }
    }

    /// Removes the line item for `id`, if any.
    pub fn remove_from_cart(&mut self, id: ProductId) -> CartChange {
        match self.position(id) {
            Some(index) => {
                self.items.remove(index);
                CartChange::Removed { id }
            }
            None => CartChange::Unchanged,
        }
    }

    /// Sets the quantity for `id`.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove_from_cart`]
    /// - Item absent: no-op
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> CartChange {
        if quantity <= 0 {
            return self.remove_from_cart(id);
        }

        match self.items.iter_mut().find(|i| i.id() == id) {
            Some(item) => {
                item.quantity = quantity;
                CartChange::Updated { id, quantity }
            }
            None => CartChange::Unchanged,
        }
    }

    /// Empties the cart. Visibility is left as it is.
    pub fn clear_cart(&mut self) -> CartChange {
        let removed = self.items.len();
        self.items.clear();
        self.created_at = Utc::now();
        CartChange::Cleared { removed }
    }

    pub fn toggle_cart(&mut self) -> CartChange {
        self.is_open = !self.is_open;
        CartChange::Visibility {
            is_open: self.is_open,
        }
    }

    pub fn open_cart(&mut self) -> CartChange {
        self.is_open = true;
        CartChange::Visibility { is_open: true }
    }

    pub fn close_cart(&mut self) -> CartChange {
        self.is_open = false;
        CartChange::Visibility { is_open: false }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Line items in the order they were first added.
    pub fn cart_items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Total number of units across all line items, saturating at `i64::MAX`.
    pub fn cart_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, item| count.saturating_add(item.quantity))
    }

    /// Sum of `price × quantity` over all line items, saturating like [`Money`].
    pub fn cart_total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn is_in_cart(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Quantity of `id` in the cart, or 0 when absent.
    pub fn get_cart_item_quantity(&self, id: ProductId) -> i64 {
        self.find(id).map_or(0, |item| item.quantity)
    }

    /// Number of distinct line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub cart_count: i64,
    pub cart_total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            cart_count: cart.cart_count(),
            cart_total: cart.cart_total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
