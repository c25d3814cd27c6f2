//! # Navigation Commands
//!
//! Path resolution against the session's route table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  navigate("/products/42?tab=specs")                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_path ──► RouteTable::resolve ──► first matching entry wins    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Location { path, page: product_detail, params: { id: "42" } }          │
//! │                                                                         │
//! │  No match ──► page: not_found (still a successful reply)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rigmart_core::validation::validate_path;
use rigmart_core::{PageId, Resolution, RouteMatch, RouteParams};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::{Location, Session};

/// Reply to `href`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Href {
    pub page: PageId,
    pub path: String,
}

/// Resolves `path` and moves the session there.
///
/// ## Errors
/// `VALIDATION_ERROR` for empty, relative, oversized or control-character
/// paths. An unmatched path is not an error.
pub fn navigate(session: &mut Session, path: &str) -> Result<Location, ApiError> {
    debug!(path, "navigate command");
    validate_path(path)?;

    let route = match session.routes().resolve(path) {
        Resolution::Matched(found) => found,
        Resolution::NotFound { path } => {
            warn!(%path, "No route matched");
            RouteMatch::not_found()
        }
    };

    let location = Location {
        path: path.to_string(),
        route,
    };
    session.set_location(location.clone());
    debug!(page = %location.route.page, "Location changed");
    Ok(location)
}

/// Builds the path for `page` from `params`.
///
/// Only the params the page's pattern uses are checked; extra ones are ignored.
pub fn href(session: &Session, page: PageId, params: &RouteParams) -> Result<Href, ApiError> {
    debug!(%page, "href command");
    let path = session.routes().href(page, params)?;
    Ok(Href { page, path })
}

pub fn get_location(session: &Session) -> Location {
    session.location().clone()
}
