//! # Session
//!
//! The application session: one per process, created at startup and passed
//! to every command handler by `&mut`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session                                                                │
//! │  ├── id          UUID v4, attached to every log line                    │
//! │  ├── started_at  when the session was created                           │
//! │  ├── config      ConfigState (read-only)                                │
//! │  ├── routes      RouteTable (read-only)                                 │
//! │  ├── catalog     Catalog (read-only)                                    │
//! │  ├── cart        Cart (mutated by cart commands)                        │
//! │  └── location    last resolved path + RouteMatch                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on one thread, so nothing here is locked.

use chrono::{DateTime, Utc};
use rigmart_core::router::marketplace_routes;
use rigmart_core::{Cart, RouteMatch, RouteTable};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::{Catalog, ConfigState};

/// Where the session currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub path: String,
    #[serde(flatten)]
    pub route: RouteMatch,
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    config: ConfigState,
    routes: RouteTable,
    catalog: Catalog,
    cart: Cart,
    location: Location,
}

impl Session {
    /// Creates a session at `/` with an empty, closed cart.
    pub fn new(config: ConfigState, routes: RouteTable, catalog: Catalog) -> Self {
        let route = routes.resolve_or_not_found("/");
        Session {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            config,
            routes,
            catalog,
            cart: Cart::new(),
            location: Location {
                path: "/".to_string(),
                route,
            },
        }
    }

    /// Loads the catalog and route table for `config` and starts a session.
    pub fn start(config: ConfigState) -> Result<Self, AppError> {
        let routes = marketplace_routes()?;
        let (catalog, source) = Catalog::load(&config)?;

        info!(
            %source,
            products = catalog.len(),
            routes = routes.len(),
            "Catalog and routes loaded"
        );

        Ok(Session::new(config, routes, catalog))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = location;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigmart_core::PageId;

    #[test]
    fn test_new_session_starts_at_landing() {
        let session = Session::new(
            ConfigState::default(),
            marketplace_routes().unwrap(),
            Catalog::demo().unwrap(),
        );

        assert_eq!(session.location().route.page, PageId::Landing);
        assert!(session.cart().is_empty());
        assert!(!session.cart().is_open());
        assert_eq!(session.catalog().len(), 10);
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let make = || {
            Session::new(
                ConfigState::default(),
                marketplace_routes().unwrap(),
                Catalog::demo().unwrap(),
            )
        };
        assert_ne!(make().id(), make().id());
    }

    #[test]
    fn test_location_serializes_flat() {
        let session = Session::new(
            ConfigState::default(),
            marketplace_routes().unwrap(),
            Catalog::demo().unwrap(),
        );
        let json = serde_json::to_value(session.location()).unwrap();
        assert_eq!(json["path"], "/");
        assert_eq!(json["page"], "landing");
        assert!(json["params"].as_object().unwrap().is_empty());
    }
}
