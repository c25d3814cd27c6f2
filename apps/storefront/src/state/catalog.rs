//! # Catalog State
//!
//! In-memory product catalog that cart commands look listings up in.
//!
//! ## Catalog Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. RIGMART_CATALOG_PATH ────────────────► must exist and parse         │
//! │  2. <data dir>/catalog.json ─────────────► used when present            │
//! │       Linux:   ~/.local/share/rigmart-storefront/catalog.json           │
//! │       macOS:   ~/Library/Application Support/com.rigmart.storefront/    │
//! │  3. Built-in demo catalog ───────────────► always available             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Listing Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  available only ──► filters ──► ordering ──► page (20 per page, ≤ 100)  │
//! │                                                                         │
//! │  filters:  category, condition, brand, priceType, availability,         │
//! │            minPrice / maxPrice, listingAge, free-text query             │
//! │  ordering: -created_at (default), created_at, price, -price             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use rigmart_core::validation::{validate_product, validate_search_query};
use rigmart_core::{
    Availability, Category, Condition, Money, PriceType, Product, ProductId, ValidationError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::state::ConfigState;

const DEMO_CATALOG: &str = include_str!("../../data/demo_catalog.json");

/// Listings per page when the request does not say.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page a request may ask for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Where the catalog was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    BuiltIn,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::BuiltIn => f.write_str("built-in demo catalog"),
        }
    }
}

// =============================================================================
// Search Filter
// =============================================================================

/// How recently a listing was posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingAge {
    /// Posted on the current UTC date.
    Today,
    /// Posted within the last 7 days.
    Week,
    /// Posted within the last 30 days.
    Month,
}

impl ListingAge {
    fn admits(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            ListingAge::Today => created_at.date_naive() == now.date_naive(),
            ListingAge::Week => created_at >= now - Duration::days(7),
            ListingAge::Month => created_at >= now - Duration::days(30),
        }
    }
}

/// Sort order for listings, named the way the marketplace API names it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "-created_at")]
    Newest,
    #[serde(rename = "created_at")]
    Oldest,
    #[serde(rename = "price")]
    PriceAscending,
    #[serde(rename = "-price")]
    PriceDescending,
}

/// Search criteria for the marketplace listing.
///
/// Every field is optional; an empty filter returns the first page of every
/// available product, newest first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    /// Brand slug, compared ignoring ASCII case.
    pub brand: Option<String>,
    pub price_type: Option<PriceType>,
    pub availability: Option<Availability>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub listing_age: Option<ListingAge>,
    /// Case-insensitive match against name and description.
    pub query: Option<String>,
    pub ordering: SortOrder,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Falls back to [`DEFAULT_PAGE_SIZE`] when 0, capped at [`MAX_PAGE_SIZE`].
    pub page_size: Option<u32>,
}

impl ProductFilter {
    pub fn category(category: Category) -> Self {
        ProductFilter {
            category: Some(category),
            ..Default::default()
        }
    }

    fn page_size(&self) -> u32 {
        match self.page_size {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(size) => size.min(MAX_PAGE_SIZE),
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    pub products: Vec<Product>,
    pub page: u32,
    pub page_size: u32,
    /// Matching listings across all pages.
    pub total: usize,
    pub has_next: bool,
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog from products, validating each one.
    pub fn new(mut products: Vec<Product>) -> Result<Self, CatalogError> {
        for product in &products {
            validate_product(product).map_err(|source| CatalogError::InvalidProduct {
                id: product.id,
                source,
            })?;
        }

        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::InvalidProduct {
                    id: product.id,
                    source: ValidationError::Duplicate {
                        field: "id".to_string(),
                        value: product.id.to_string(),
                    },
                });
            }
        }

        Ok(Catalog { products, index })
    }

    /// Parses a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    pub fn demo() -> Result<Self, CatalogError> {
        Self::from_json(DEMO_CATALOG)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Loads the catalog following the source priority above.
    pub fn load(config: &ConfigState) -> Result<(Self, CatalogSource), CatalogError> {
        if let Some(path) = &config.catalog_path {
            debug!(?path, "Loading catalog from configured path");
            return Ok((Self::from_file(path)?, CatalogSource::File(path.clone())));
        }

        if let Some(path) = default_catalog_path().filter(|p| p.is_file()) {
            debug!(?path, "Loading catalog from data directory");
            let catalog = Self::from_file(&path)?;
            return Ok((catalog, CatalogSource::File(path)));
        }

        info!("No catalog file found, using built-in demo catalog");
        Ok((Self::demo()?, CatalogSource::BuiltIn))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks a listing up by id, whether or not it is still available.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&i| self.products.get(i))
    }

    /// One page of available listings matching `filter`.
    pub fn search(&self, filter: &ProductFilter) -> Result<ListingPage, ValidationError> {
        self.search_at(filter, Utc::now())
    }

    /// [`Catalog::search`] with `listingAge` measured from `now`.
    pub fn search_at(
        &self,
        filter: &ProductFilter,
        now: DateTime<Utc>,
    ) -> Result<ListingPage, ValidationError> {
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                return Err(ValidationError::InvalidFormat {
                    field: "price range".to_string(),
                    reason: "minPrice must not exceed maxPrice".to_string(),
                });
            }
        }

        let page = filter.page.unwrap_or(1);
        if page == 0 {
            return Err(ValidationError::InvalidFormat {
                field: "page".to_string(),
                reason: "pages start at 1".to_string(),
            });
        }

        let query = match &filter.query {
            Some(q) => validate_search_query(q)?.to_lowercase(),
            None => String::new(),
        };
        let brand = filter.brand.as_deref().map(str::trim);

        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.is_available)
            .filter(|p| filter.category.map_or(true, |c| p.category == c))
            .filter(|p| filter.condition.map_or(true, |c| p.condition == c))
            .filter(|p| {
                brand.map_or(true, |b| {
                    p.brand.as_deref().is_some_and(|pb| pb.eq_ignore_ascii_case(b))
                })
            })
            .filter(|p| filter.price_type.map_or(true, |t| p.price_type == t))
            .filter(|p| filter.availability.map_or(true, |a| p.availability == a))
            .filter(|p| filter.min_price.map_or(true, |min| p.price >= min))
            .filter(|p| filter.max_price.map_or(true, |max| p.price <= max))
            .filter(|p| filter.listing_age.map_or(true, |age| age.admits(p.created_at, now)))
            .filter(|p| {
                query.is_empty()
                    || p.name.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
            })
            .collect();

        // Stable sorts over the newest-first base order, so ties stay newest first.
        match filter.ordering {
            SortOrder::Newest => {}
            SortOrder::Oldest => matches.reverse(),
            SortOrder::PriceAscending => matches.sort_by_key(|p| p.price),
            SortOrder::PriceDescending => matches.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        let page_size = filter.page_size();
        let total = matches.len();
        let start = (page as usize - 1).saturating_mul(page_size as usize);
        let products: Vec<Product> = matches
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();
        let has_next = start.saturating_add(products.len()) < total;

        Ok(ListingPage {
            products,
            page,
            page_size,
            total,
            has_next,
        })
    }

    /// Available listings in one category, newest first.
    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_available && p.category == category)
            .collect()
    }
}

fn default_catalog_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "rigmart", "storefront")
        .map(|dirs| dirs.data_dir().join("catalog.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Catalog {
        Catalog::demo().unwrap()
    }

    fn ids(page: &ListingPage) -> Vec<ProductId> {
        page.products.iter().map(|p| p.id).collect()
    }

    /// Evening of the newest demo listing's day.
    fn demo_now() -> DateTime<Utc> {
        "2024-05-12T20:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_demo_catalog_loads() {
        let catalog = demo();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.get(1).unwrap().name, "AMD Ryzen 5 5600X");
        assert!(catalog.get(404).is_none());
    }

    #[test]
    fn test_listing_is_newest_first_and_hides_unavailable() {
        let catalog = demo();
        let all = catalog.search(&ProductFilter::default()).unwrap();

        assert_eq!(all.total, 9);
        assert_eq!(ids(&all), vec![6, 4, 9, 2, 1, 7, 3, 5, 10]);
        assert!(!all.has_next);
        assert_eq!(all.page, 1);
        assert_eq!(all.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_unavailable_product_is_still_retrievable() {
        let catalog = demo();
        assert!(!catalog.get(8).unwrap().is_available);
    }

    #[test]
    fn test_filters() {
        let catalog = demo();

        let cpus = catalog.search(&ProductFilter::category(Category::Cpu)).unwrap();
        assert_eq!(ids(&cpus), vec![2, 1]);

        let cheap = catalog
            .search(&ProductFilter {
                max_price: Some(Money::from_major_minor(4800, 0)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(cheap.total, 3);

        let fair = catalog
            .search(&ProductFilter {
                condition: Some(Condition::Fair),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(fair.total, 2);

        let corsair = catalog
            .search(&ProductFilter {
                query: Some("  CORSAIR ".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(corsair.total, 2);

        let described = catalog
            .search(&ProductFilter {
                query: Some("no dead pixels".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&described), vec![6]);
    }

    #[test]
    fn test_listing_attribute_filters() {
        let catalog = demo();

        let corsair = catalog
            .search(&ProductFilter {
                brand: Some("Corsair".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&corsair), vec![9, 3]);

        let negotiable = catalog
            .search(&ProductFilter {
                price_type: Some(PriceType::Negotiable),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&negotiable), vec![2, 5, 10]);

        let soon = catalog
            .search(&ProductFilter {
                availability: Some(Availability::Soon),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&soon), vec![5]);
    }

    #[test]
    fn test_listing_age() {
        let catalog = demo();
        let age = |listing_age| {
            catalog
                .search_at(
                    &ProductFilter {
                        listing_age: Some(listing_age),
                        ..Default::default()
                    },
                    demo_now(),
                )
                .unwrap()
        };

        assert_eq!(ids(&age(ListingAge::Today)), vec![6]);
        assert_eq!(ids(&age(ListingAge::Week)), vec![6, 4, 9, 2]);
        assert_eq!(ids(&age(ListingAge::Month)), vec![6, 4, 9, 2, 1, 7, 3]);
    }

    #[test]
    fn test_ordering() {
        let catalog = demo();
        let ordered = |ordering| {
            catalog
                .search(&ProductFilter {
                    ordering,
                    ..Default::default()
                })
                .unwrap()
        };

        assert_eq!(ids(&ordered(SortOrder::Oldest)), vec![10, 5, 3, 7, 1, 2, 9, 4, 6]);
        assert_eq!(
            ids(&ordered(SortOrder::PriceAscending)),
            vec![10, 5, 3, 4, 9, 7, 2, 1, 6]
        );
        assert_eq!(ids(&ordered(SortOrder::PriceDescending))[..2], [6, 1]);
    }

    #[test]
    fn test_filter_deserializes_api_names() {
        let filter: ProductFilter = serde_json::from_str(
            r#"{"priceType":"negotiable","listingAge":"week","ordering":"-price","pageSize":5}"#,
        )
        .unwrap();
        assert_eq!(filter.price_type, Some(PriceType::Negotiable));
        assert_eq!(filter.listing_age, Some(ListingAge::Week));
        assert_eq!(filter.ordering, SortOrder::PriceDescending);
        assert_eq!(filter.page_size, Some(5));
    }

    #[test]
    fn test_pagination() {
        let catalog = demo();
        let page = |page, page_size| {
            catalog.search(&ProductFilter {
                page,
                page_size,
                ..Default::default()
            })
        };

        let first = page(None, Some(4)).unwrap();
        assert_eq!(ids(&first), vec![6, 4, 9, 2]);
        assert_eq!(first.total, 9);
        assert!(first.has_next);

        let last = page(Some(3), Some(4)).unwrap();
        assert_eq!(ids(&last), vec![5, 10]);
        assert!(!last.has_next);

        let past_end = page(Some(4), Some(4)).unwrap();
        assert!(past_end.products.is_empty());
        assert_eq!(past_end.total, 9);

        assert_eq!(page(None, Some(0)).unwrap().page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(page(None, Some(500)).unwrap().page_size, MAX_PAGE_SIZE);
        assert!(matches!(
            page(Some(0), None),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_inverted_price_range_is_rejected() {
        let err = demo()
            .search(&ProductFilter {
                min_price: Some(Money::from_minor(500)),
                max_price: Some(Money::from_minor(100)),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_by_category_skips_unavailable() {
        let catalog = demo();
        let boards = catalog.by_category(Category::Motherboard);
        assert_eq!(boards.iter().map(|p| p.id).collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": 1, "name": "A", "price": 100, "category": "RAM", "condition": "Used-Good", "createdAt": "2024-01-01T00:00:00Z"},
            {"id": 1, "name": "B", "price": 200, "category": "RAM", "condition": "Used-Good", "createdAt": "2024-01-02T00:00:00Z"}
        ]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidProduct {
                id: 1,
                source: ValidationError::Duplicate { .. }
            }
        ));
    }

    #[test]
    fn test_invalid_products_are_rejected() {
        let json = r#"[
            {"id": 3, "name": " ", "price": 100, "category": "PSU", "condition": "Used-Fair", "createdAt": "2024-01-01T00:00:00Z"}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::InvalidProduct { id: 3, .. })
        ));
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_configured_path_must_exist() {
        let config = ConfigState {
            catalog_path: Some(PathBuf::from("/definitely/not/here/catalog.json")),
            ..ConfigState::default()
        };
        assert!(matches!(
            Catalog::load(&config),
            Err(CatalogError::Read { .. })
        ));
    }
}
