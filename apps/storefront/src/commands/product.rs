//! # Product Commands
//!
//! Catalog lookups for the marketplace, product detail and components pages.
//!
//! ## Which Command Serves Which Page
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  /products            ──► search_products { filter }                    │
//! │  /products/:id        ──► get_product { productId }                     │
//! │  /components          ──► list_categories                               │
//! │  /components/:slug    ──► list_category { slug }                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listings only include products that are still available, newest first
//! unless the search asks for another ordering. `get_product` is the
//! exception: a detail page can still show a listing that has been sold.

use std::time::Instant;

use rigmart_core::{Category, CoreError, PageId, Product, ProductId};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ListingPage, ProductFilter, Session};

/// One entry of the components index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: Category,
    pub slug: &'static str,
    pub name: &'static str,
    pub page: PageId,
    /// Available listings in this category.
    pub count: usize,
}

/// A category page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListing {
    pub category: Category,
    pub name: &'static str,
    pub products: Vec<Product>,
}

/// Gets a single listing by id, available or not.
pub fn get_product(session: &Session, product_id: ProductId) -> Result<Product, ApiError> {
    debug!(product_id, "get_product command");
    session
        .catalog()
        .get(product_id)
        .cloned()
        .ok_or_else(|| CoreError::ProductNotFound(product_id).into())
}

/// Searches available listings, one page at a time.
///
/// ## Arguments
/// * `filter` - listing attributes, price range, listing age, free-text
///   query, ordering and page
///
/// ## Errors
/// `VALIDATION_ERROR` for an over-long query, `minPrice > maxPrice` or page 0.
pub fn search_products(session: &Session, filter: &ProductFilter) -> Result<ListingPage, ApiError> {
    let start = Instant::now();
    debug!(?filter, "search_products command");

    let page = session.catalog().search(filter)?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = page.products.len(),
        total = page.total,
        page = page.page,
        "search_products complete"
    );
    Ok(page)
}

/// Every category with its available listing count, in index order.
pub fn list_categories(session: &Session) -> Vec<CategorySummary> {
    debug!("list_categories command");
    Category::ALL
        .into_iter()
        .map(|category| CategorySummary {
            category,
            slug: category.slug(),
            name: category.display_name(),
            page: category.page(),
            count: session.catalog().by_category(category).len(),
        })
        .collect()
}

/// Listings for the category named by a `/components/:slug` segment.
pub fn list_category(session: &Session, slug: &str) -> Result<CategoryListing, ApiError> {
    debug!(slug, "list_category command");
    let category = Category::from_slug(slug).ok_or_else(|| ApiError::not_found("Category", slug))?;

    Ok(CategoryListing {
        category,
        name: category.display_name(),
        products: session
            .catalog()
            .by_category(category)
            .into_iter()
            .cloned()
            .collect(),
    })
}
