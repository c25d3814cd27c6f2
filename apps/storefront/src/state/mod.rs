//! # State Module
//!
//! Application state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  main ──► ConfigState::from_env() ──► Session::start(config)            │
//! │                                            │                            │
//! │                     ┌──────────────────────┼──────────────────┐         │
//! │                     ▼                      ▼                  ▼         │
//! │             ┌──────────────┐      ┌──────────────┐   ┌──────────────┐   │
//! │             │   Catalog    │      │     Cart     │   │ ConfigState  │   │
//! │             │  (seed JSON) │      │ (rigmart-    │   │ (env vars)   │   │
//! │             │              │      │   core)      │   │              │   │
//! │             └──────────────┘      └──────────────┘   └──────────────┘   │
//! │                                                                         │
//! │  The Session is the only owner; commands borrow it mutably one at a     │
//! │  time from the command loop.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod session;

pub use catalog::{
    Catalog, CatalogSource, ListingAge, ListingPage, ProductFilter, SortOrder, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
pub use config::{ConfigState, DEFAULT_LOG_FILTER};
pub use session::{Location, Session};
