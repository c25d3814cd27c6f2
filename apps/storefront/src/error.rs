//! # API Error Type
//!
//! Unified error type for storefront commands, plus the startup error that
//! aborts the process before the command loop begins.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in RigMart                                │
//! │                                                                         │
//! │  {"cmd":"add_to_cart","productId":99}                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command handler: Result<T, ApiError>                            │  │
//! │  │         │                                                        │  │
//! │  │  Unknown product? ── CoreError::ProductNotFound ──┐             │  │
//! │  │  Bad path?        ── ValidationError ─────────────┼─► ApiError ─►│  │
//! │  │  Bad href params? ── RouteError ──────────────────┘             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄── {"ok":false,"error":{"code":"NOT_FOUND","message":"..."}}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use rigmart_core::{CoreError, ProductId, RouteError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 99"
/// }
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or category does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Reverse route lookup failed
    RouteError,

    /// Command line was not a valid command
    BadRequest,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::ProductUnavailable(id) => {
                ApiError::validation(format!("Product {} is no longer available", id))
            }
            CoreError::Validation(e) => e.into(),
            CoreError::Route(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::UnknownPage(page) => ApiError::not_found("Route for page", page),
            other => ApiError::new(ErrorCode::RouteError, other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Catalog & Startup Errors
// =============================================================================

/// Problems with a catalog seed file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog product {id} is invalid: {source}")]
    InvalidProduct {
        id: ProductId,
        #[source]
        source: ValidationError,
    },

    #[error("Could not read catalog file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that end the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Route table is invalid: {0}")]
    Routes(#[from] RouteError),

    #[error("Command channel failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not encode reply: {0}")]
    Encode(#[from] serde_json::Error),
}
