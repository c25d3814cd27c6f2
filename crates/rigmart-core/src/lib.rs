//! # rigmart-core: Pure Marketplace Logic for RigMart
//!
//! Cart state, route resolution and the domain types the storefront shares
//! with its web frontend. Nothing in this crate performs I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RigMart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend                                 │   │
//! │  │    Landing ──► Components ──► Product Detail ──► Cart Drawer    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    rigmart-storefront                           │   │
//! │  │    navigate, add_to_cart, update_cart_item, toggle_cart, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ rigmart-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  router   │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ RouteTable│  │   │
//! │  │   │  PageId   │  │           │  │ LineItem  │  │ RouteMatch│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, PageId)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart store and derived totals
//! - [`router`] - Route patterns and the ordered route table
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use rigmart_core::router::marketplace_routes;
//! use rigmart_core::PageId;
//!
//! let routes = marketplace_routes().unwrap();
//! assert_eq!(routes.resolve("/components/cpu").page(), PageId::Cpu);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod router;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartChange, CartTotals, LineItem};
pub use error::{CoreError, RouteError, ValidationError};
pub use money::Money;
pub use router::{Resolution, RouteMatch, RouteParams, RouteTable};
pub use types::*;
