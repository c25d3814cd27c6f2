//! # Domain Types
//!
//! Core domain types shared by the cart, the router and the storefront app.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │     PageId      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (integer)   │   │  CPU, RAM       │   │  landing        │       │
//! │  │  name           │   │  Storage        │   │  cpu, ram, ...  │       │
//! │  │  price (Money)  │   │  Monitor        │   │  product_detail │       │
//! │  │  category       │   │  Motherboard    │   │  not_found      │       │
//! │  │  condition      │   │  PSU            │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Serialized field names are camelCase because the web frontend consumes
//! these types directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

/// Marketplace listing identifier.
pub type ProductId = u64;

// =============================================================================
// Category
// =============================================================================

/// Hardware component category of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "RAM")]
    Ram,
    Storage,
    Monitor,
    Motherboard,
    #[serde(rename = "PSU")]
    Psu,
}

impl Category {
    /// All categories in the order the components index lists them.
    pub const ALL: [Category; 6] = [
        Category::Cpu,
        Category::Ram,
        Category::Storage,
        Category::Monitor,
        Category::Motherboard,
        Category::Psu,
    ];

    /// URL slug used under `/components/`.
    pub const fn slug(&self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Ram => "ram",
            Category::Storage => "storage",
            Category::Monitor => "monitor",
            Category::Motherboard => "motherboard",
            Category::Psu => "psu",
        }
    }

    /// Human-readable label.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Ram => "RAM",
            Category::Storage => "Storage",
            Category::Monitor => "Monitor",
            Category::Motherboard => "Motherboard",
            Category::Psu => "PSU",
        }
    }

    /// Looks a category up by slug or label, ignoring ASCII case.
    ///
    /// ```rust
    /// use rigmart_core::Category;
    ///
    /// assert_eq!(Category::from_slug("CPU"), Some(Category::Cpu));
    /// assert_eq!(Category::from_slug("gpu"), None);
    /// ```
    pub fn from_slug(slug: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(slug))
    }

    /// The dedicated listing page for this category.
    pub const fn page(&self) -> PageId {
        match self {
            Category::Cpu => PageId::Cpu,
            Category::Ram => PageId::Ram,
            Category::Storage => PageId::Storage,
            Category::Monitor => PageId::Monitor,
            Category::Motherboard => PageId::Motherboard,
            Category::Psu => PageId::Psu,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// Listing Attributes
// =============================================================================

/// Condition of a second-hand part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Condition {
    #[serde(rename = "Used-Like New")]
    LikeNew,
    #[serde(rename = "Used-Good")]
    Good,
    #[serde(rename = "Used-Fair")]
    Fair,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    #[default]
    Fixed,
    Negotiable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    Now,
    Soon,
}

// =============================================================================
// Product
// =============================================================================

/// A marketplace listing.
///
/// The cart snapshots the whole listing into each line item, so every field
/// here also appears on the serialized line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,

    /// Display name, at most 255 characters.
    pub name: String,

    /// Asking price in minor units.
    pub price: Money,

    pub category: Category,

    pub condition: Condition,

    #[serde(default)]
    pub description: String,

    /// Image URL, if the seller uploaded one.
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub price_type: PriceType,

    #[serde(default)]
    pub availability: Availability,

    /// Unlisted products stay in the catalog but cannot be added to a cart.
    #[serde(default = "default_true")]
    pub is_available: bool,

    /// Seller's username.
    #[serde(default)]
    pub seller: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Price of `quantity` units of this listing.
    #[inline]
    pub fn line_total(&self, quantity: i64) -> Money {
        self.price.multiply_quantity(quantity)
    }
}

// =============================================================================
// Page Identifier
// =============================================================================

/// Every page the route table can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PageId {
    Landing,
    Login,
    Register,
    /// Marketplace listing index.
    Marketplace,
    SellProduct,
    MyListings,
    ProductDetail,
    /// Components index (all categories).
    Components,
    Cpu,
    Ram,
    Storage,
    Monitor,
    Motherboard,
    Psu,
    /// Generic `/components/:slug` page.
    ComponentDetail,
    Cart,
    Checkout,
    Orders,
    Chats,
    ChatDetail,
    /// Hardware advice chat.
    Assistant,
    NotFound,
}

impl PageId {
    /// Stable snake_case name, identical to the serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PageId::Landing => "landing",
            PageId::Login => "login",
            PageId::Register => "register",
            PageId::Marketplace => "marketplace",
            PageId::SellProduct => "sell_product",
            PageId::MyListings => "my_listings",
            PageId::ProductDetail => "product_detail",
            PageId::Components => "components",
            PageId::Cpu => "cpu",
            PageId::Ram => "ram",
            PageId::Storage => "storage",
            PageId::Monitor => "monitor",
            PageId::Motherboard => "motherboard",
            PageId::Psu => "psu",
            PageId::ComponentDetail => "component_detail",
            PageId::Cart => "cart",
            PageId::Checkout => "checkout",
            PageId::Orders => "orders",
            PageId::Chats => "chats",
            PageId::ChatDetail => "chat_detail",
            PageId::Assistant => "assistant",
            PageId::NotFound => "not_found",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
