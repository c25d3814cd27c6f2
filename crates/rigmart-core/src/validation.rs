//! # Validation Module
//!
//! Input validation for data entering the store from outside: catalog seed
//! files, navigation requests and search boxes.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Command deserialization (serde)    type/shape checks          │
//! │  Layer 2: THIS MODULE                        business rule checks       │
//! │  Layer 3: Cart / Router                      invariants by construction │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rigmart_core::validation::{validate_path, validate_search_query};
//!
//! assert!(validate_path("/components/cpu").is_ok());
//! assert_eq!(validate_search_query("  ryzen ").unwrap(), "ryzen");
//! ```

use crate::error::ValidationError;
use crate::types::Product;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest listing name the marketplace accepts.
pub const MAX_PRODUCT_NAME_LEN: usize = 255;

/// Longest path accepted for navigation.
pub const MAX_PATH_LEN: usize = 2048;

pub const MAX_SEARCH_QUERY_LEN: usize = 100;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a listing before it enters the catalog.
///
/// ## Rules
/// - Name must not be blank and must be at most 255 characters
/// - Price must not be negative (zero is allowed for giveaways)
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    let name = product.name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    if product.price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Navigation Validators
// =============================================================================

/// Validates a path handed to the router.
///
/// ## Rules
/// - Must start with `/`
/// - At most 2048 characters
/// - No control characters
pub fn validate_path(path: &str) -> ValidationResult<()> {
    if path.is_empty() {
        return Err(ValidationError::Required {
            field: "path".to_string(),
        });
    }

    if path.len() > MAX_PATH_LEN {
        return Err(ValidationError::TooLong {
            field: "path".to_string(),
            max: MAX_PATH_LEN,
        });
    }

    if !path.starts_with('/') {
        return Err(ValidationError::InvalidFormat {
            field: "path".to_string(),
            reason: "must start with '/'".to_string(),
        });
    }

    if path.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "path".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(())
}

/// Validates a value substituted into a route pattern.
///
/// A value must be exactly one non-empty path segment.
pub fn validate_route_param(name: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: name.to_string(),
        });
    }

    if value.contains(['/', '?', '#']) {
        return Err(ValidationError::InvalidFormat {
            field: name.to_string(),
            reason: "must be a single path segment".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// Empty queries are allowed (they list everything). Returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
