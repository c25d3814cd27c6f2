//! # Error Types
//!
//! Domain-specific error types for rigmart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rigmart-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                           │
//! │  ├── ValidationError  - Input validation failures                       │
//! │  └── RouteError       - Bad route patterns / reverse lookups            │
//! │                                                                         │
//! │  storefront errors (app crate)                                          │
//! │  └── ApiError         - What the frontend sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError/RouteError → CoreError → ApiError → Frontend     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations never fail: a missing line item is a no-op, not an error.

use thiserror::Error;

use crate::types::{PageId, ProductId};

// =============================================================================
// Core Error
// =============================================================================

#[derive(Debug, Error)]
pub enum CoreError {
    /// No listing with this id exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The listing exists but is no longer for sale.
    #[error("Product {0} is not available")]
    ProductUnavailable(ProductId),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Route Error
// =============================================================================

/// Route table construction and reverse lookup failures.
///
/// Resolution itself never fails: an unmatched path is a
/// [`Resolution::NotFound`](crate::router::Resolution::NotFound), not an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route pattern '{pattern}' is invalid: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A later entry can never match because an earlier one covers every path it would.
    #[error("Route '{shadowed}' is unreachable: '{by}' is listed first and matches every path it would")]
    Shadowed { shadowed: String, by: String },

    #[error("No route is registered for page {0}")]
    UnknownPage(PageId),

    #[error("Route '{pattern}' needs parameter '{param}'")]
    MissingParam { pattern: String, param: String },

    #[error("Parameter '{param}' must be numeric, got '{value}'")]
    NonNumericParam { param: String, value: String },

    #[error("Parameter '{param}' is not a single path segment: '{value}'")]
    InvalidParam { param: String, value: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
