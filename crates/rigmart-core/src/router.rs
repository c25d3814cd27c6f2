//! # Router
//!
//! Ordered route table mapping URL paths to page identifiers.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve("/components/cpu?sort=price")                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  strip query/fragment, split on '/', drop empty segments                │
//! │       │             ["components", "cpu"]                               │
//! │       ▼                                                                 │
//! │  test entries in declared order ── first match wins                     │
//! │       │   /components              ✗ (length)                           │
//! │       │   /components/cpu          ✓ ──► Matched(cpu)                   │
//! │       │   /components/:slug        (never reached)                      │
//! │       ▼                                                                 │
//! │  nothing matched ──► Resolution::NotFound                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pattern Syntax
//! - `/products/create` static segments (ASCII case-insensitive)
//! - `/components/:slug` named parameter, any single segment
//! - `/products/:id(\d+)` named parameter restricted to ASCII digits
//!
//! Trailing slashes and repeated slashes in a request path are ignored.
//!
//! ## Ordering
//! Static entries must precede parametric entries that would shadow them.
//! [`RouteTableBuilder::build`] rejects a table where an entry can never match.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use ts_rs::TS;

use crate::error::RouteError;
use crate::types::{PageId, ProductId};
use crate::validation::validate_route_param;

/// Path parameters captured by a match, keyed by name.
pub type RouteParams = BTreeMap<String, String>;

const DIGITS_CONSTRAINT: &str = r"\d+";

// =============================================================================
// Segment
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
    /// Parameter that only matches ASCII digits.
    Digits(String),
}

impl Segment {
    fn matches(&self, value: &str) -> bool {
        match self {
            Segment::Static(s) => s.eq_ignore_ascii_case(value),
            Segment::Param(_) => !value.is_empty(),
            Segment::Digits(_) => is_digits(value),
        }
    }

    /// True when every value `other` accepts is also accepted by `self`.
    fn covers(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Param(_), _) => true,
            (Segment::Digits(_), Segment::Digits(_)) => true,
            (Segment::Digits(_), Segment::Static(s)) => is_digits(s),
            (Segment::Static(a), Segment::Static(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }

    fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Static(_) => None,
            Segment::Param(name) | Segment::Digits(name) => Some(name),
        }
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Splits a request path into segments, ignoring query, fragment and empty segments.
fn path_segments(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty()).collect()
}

// =============================================================================
// Route Pattern
// =============================================================================

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    template: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses a template such as `/products/:id(\d+)`.
    ///
    /// ```rust
    /// use rigmart_core::router::RoutePattern;
    ///
    /// let pattern = RoutePattern::parse(r"/products/:id(\d+)").unwrap();
    /// assert!(pattern.matches("/products/42").is_some());
    /// assert!(pattern.matches("/products/create").is_none());
    /// assert!(RoutePattern::parse("products").is_err());
    /// ```
    pub fn parse(template: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: template.to_string(),
            reason: reason.to_string(),
        };

        let rest = template
            .strip_prefix('/')
            .ok_or_else(|| invalid("must start with '/'"))?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for raw in rest.split('/') {
                segments.push(parse_segment(raw).map_err(|reason| invalid(&reason))?);
            }
        }

        let mut seen = Vec::new();
        for name in segments.iter().filter_map(Segment::param_name) {
            if seen.contains(&name) {
                return Err(invalid(&format!("duplicate parameter '{}'", name)));
            }
            seen.push(name);
        }

        Ok(RoutePattern {
            template: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Matches a request path, returning the captured parameters.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        self.match_segments(&path_segments(path))
    }

    fn match_segments(&self, values: &[&str]) -> Option<RouteParams> {
        if values.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, value) in self.segments.iter().zip(values) {
            if !segment.matches(value) {
                return None;
            }
            if let Some(name) = segment.param_name() {
                params.insert(name.to_string(), (*value).to_string());
            }
        }
        Some(params)
    }

    /// True when every path `other` matches is also matched by `self`.
    pub fn covers(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.covers(b))
    }

    /// Builds a concrete path by substituting `params`.
    pub fn build(&self, params: &RouteParams) -> Result<String, RouteError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) | Segment::Digits(name) => {
                    let value = params.get(name).ok_or_else(|| RouteError::MissingParam {
                        pattern: self.template.clone(),
                        param: name.clone(),
                    })?;

                    validate_route_param(name, value).map_err(|_| RouteError::InvalidParam {
                        param: name.clone(),
                        value: value.clone(),
                    })?;

                    if matches!(segment, Segment::Digits(_)) && !is_digits(value) {
                        return Err(RouteError::NonNumericParam {
                            param: name.clone(),
                            value: value.clone(),
                        });
                    }
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }
}

fn parse_segment(raw: &str) -> Result<Segment, String> {
    if raw.is_empty() {
        return Err("empty path segment".to_string());
    }

    let Some(param) = raw.strip_prefix(':') else {
        if raw.contains([':', '(', ')']) {
            return Err(format!("unexpected character in segment '{}'", raw));
        }
        return Ok(Segment::Static(raw.to_string()));
    };

    let (name, constraint) = match param.split_once('(') {
        Some((name, rest)) => {
            let constraint = rest
                .strip_suffix(')')
                .ok_or_else(|| format!("unclosed constraint in '{}'", raw))?;
            (name, Some(constraint))
        }
        None => (param, None),
    };

    if name.is_empty() {
        return Err("empty parameter name".to_string());
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("invalid parameter name '{}'", name));
    }

    match constraint {
        None => Ok(Segment::Param(name.to_string())),
        Some(DIGITS_CONSTRAINT) => Ok(Segment::Digits(name.to_string())),
        Some(other) => Err(format!("unsupported constraint '({})'", other)),
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

// =============================================================================
// Route Table
// =============================================================================

#[derive(Debug, Clone)]
pub struct Route {
    pub pattern: RoutePattern,
    pub page: PageId,
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RouteMatch {
    pub page: PageId,
    pub params: RouteParams,
}

impl RouteMatch {
    pub fn not_found() -> Self {
        RouteMatch {
            page: PageId::NotFound,
            params: RouteParams::new(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Parses the `id` parameter of detail pages.
    pub fn id_param(&self) -> Option<ProductId> {
        self.param("id").and_then(|v| v.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteMatch),
    NotFound { path: String },
}

impl Resolution {
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }

    pub fn page(&self) -> PageId {
        match self {
            Resolution::Matched(m) => m.page,
            Resolution::NotFound { .. } => PageId::NotFound,
        }
    }
}

/// Ordered list of routes; the first matching entry wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolves a request path to the first matching page.
    pub fn resolve(&self, path: &str) -> Resolution {
        let segments = path_segments(path);
        self.routes
            .iter()
            .find_map(|route| {
                route.pattern.match_segments(&segments).map(|params| RouteMatch {
                    page: route.page,
                    params,
                })
            })
            .map_or_else(
                || Resolution::NotFound {
                    path: path.to_string(),
                },
                Resolution::Matched,
            )
    }

    /// Like [`RouteTable::resolve`], falling back to the not-found page.
    pub fn resolve_or_not_found(&self, path: &str) -> RouteMatch {
        match self.resolve(path) {
            Resolution::Matched(m) => m,
            Resolution::NotFound { .. } => RouteMatch::not_found(),
        }
    }

    /// Reverse lookup: the path of the first entry for `page`.
    ///
    /// ```rust
    /// use rigmart_core::router::{marketplace_routes, RouteParams};
    /// use rigmart_core::PageId;
    ///
    /// let routes = marketplace_routes().unwrap();
    /// let params = RouteParams::from([("id".to_string(), "42".to_string())]);
    /// assert_eq!(routes.href(PageId::ProductDetail, &params).unwrap(), "/products/42");
    /// ```
    pub fn href(&self, page: PageId, params: &RouteParams) -> Result<String, RouteError> {
        self.routes
            .iter()
            .find(|route| route.page == page)
            .ok_or(RouteError::UnknownPage(page))?
            .pattern
            .build(params)
    }
}

/// Builds a [`RouteTable`], reporting the first invalid or unreachable entry.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    error: Option<RouteError>,
}

impl RouteTableBuilder {
    pub fn route(mut self, template: &str, page: PageId) -> Self {
        if self.error.is_some() {
            return self;
        }
        match RoutePattern::parse(template) {
            Ok(pattern) => self.routes.push(Route { pattern, page }),
            Err(e) => self.error = Some(e),
        }
        self
    }

    pub fn build(self) -> Result<RouteTable, RouteError> {
        if let Some(e) = self.error {
            return Err(e);
        }

        for (i, later) in self.routes.iter().enumerate() {
            if let Some(earlier) = self.routes[..i]
                .iter()
                .find(|earlier| earlier.pattern.covers(&later.pattern))
            {
                return Err(RouteError::Shadowed {
                    shadowed: later.pattern.to_string(),
                    by: earlier.pattern.to_string(),
                });
            }
        }

        Ok(RouteTable {
            routes: self.routes,
        })
    }
}

// =============================================================================
// Application Routes
// =============================================================================

/// The marketplace's route table.
pub fn marketplace_routes() -> Result<RouteTable, RouteError> {
    RouteTable::builder()
        .route("/", PageId::Landing)
        .route("/login", PageId::Login)
        .route("/register", PageId::Register)
        .route("/products", PageId::Marketplace)
        .route("/products/create", PageId::SellProduct)
        .route("/products/my", PageId::MyListings)
        .route(r"/products/:id(\d+)", PageId::ProductDetail)
        .route("/components", PageId::Components)
        .route("/components/cpu", PageId::Cpu)
        .route("/components/ram", PageId::Ram)
        .route("/components/storage", PageId::Storage)
        .route("/components/monitor", PageId::Monitor)
        .route("/components/motherboard", PageId::Motherboard)
        .route("/components/psu", PageId::Psu)
        .route("/components/:slug", PageId::ComponentDetail)
        .route("/cart", PageId::Cart)
        .route("/checkout", PageId::Checkout)
        .route("/orders", PageId::Orders)
        .route("/chats", PageId::Chats)
        .route(r"/chats/:id(\d+)", PageId::ChatDetail)
        .route("/assistant", PageId::Assistant)
        .build()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn routes() -> RouteTable {
        marketplace_routes().unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> RouteParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_static_component_page_wins_over_slug() {
        let resolution = routes().resolve("/components/cpu");
        assert_eq!(resolution.page(), PageId::Cpu);

        let resolution = routes().resolve("/components/gpu");
        assert_eq!(
            resolution,
            Resolution::Matched(RouteMatch {
                page: PageId::ComponentDetail,
                params: params(&[("slug", "gpu")]),
            })
        );
    }

    #[test]
    fn test_every_category_page_is_routed() {
        let table = routes();
        for category in Category::ALL {
            let path = format!("/components/{}", category.slug());
            assert_eq!(table.resolve(&path).page(), category.page());
        }
    }

    #[test]
    fn test_digits_constraint() {
        let table = routes();

        let m = table.resolve_or_not_found("/products/42");
        assert_eq!(m.page, PageId::ProductDetail);
        assert_eq!(m.id_param(), Some(42));

        assert_eq!(table.resolve("/products/create").page(), PageId::SellProduct);
        assert_eq!(
            table.resolve("/products/4x2"),
            Resolution::NotFound {
                path: "/products/4x2".to_string(),
            }
        );
        assert_eq!(table.resolve("/chats/7").page(), PageId::ChatDetail);
        assert!(!table.resolve("/chats/seven").is_match());
    }

    #[test]
    fn test_path_normalization() {
        let table = routes();
        assert_eq!(table.resolve("/").page(), PageId::Landing);
        assert_eq!(table.resolve("").page(), PageId::Landing);
        assert_eq!(table.resolve("/cart/").page(), PageId::Cart);
        assert_eq!(table.resolve("//components//ram").page(), PageId::Ram);
        assert_eq!(table.resolve("/products?category=CPU").page(), PageId::Marketplace);
        assert_eq!(table.resolve("/checkout#summary").page(), PageId::Checkout);
        assert_eq!(table.resolve("/Components/CPU").page(), PageId::Cpu);
    }

    #[test]
    fn test_unmatched_path_falls_back_to_not_found() {
        let table = routes();
        assert!(!table.resolve("/admin").is_match());
        assert_eq!(table.resolve_or_not_found("/admin"), RouteMatch::not_found());
        assert_eq!(table.resolve_or_not_found("/products/1/edit").page, PageId::NotFound);
    }

    #[test]
    fn test_param_case_is_preserved() {
        let m = routes().resolve_or_not_found("/components/Ryzen-5600X");
        assert_eq!(m.param("slug"), Some("Ryzen-5600X"));
    }

    #[test]
    fn test_builder_rejects_shadowed_entry() {
        let err = RouteTable::builder()
            .route("/components/:slug", PageId::ComponentDetail)
            .route("/components/cpu", PageId::Cpu)
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            RouteError::Shadowed {
                shadowed: "/components/cpu".to_string(),
                by: "/components/:slug".to_string(),
            }
        );
    }

    #[test]
    fn test_builder_shadowing_rules() {
        // digits param shadows numeric static segments only
        assert!(RouteTable::builder()
            .route(r"/products/:id(\d+)", PageId::ProductDetail)
            .route("/products/create", PageId::SellProduct)
            .build()
            .is_ok());
        assert!(RouteTable::builder()
            .route(r"/products/:id(\d+)", PageId::ProductDetail)
            .route("/products/100", PageId::SellProduct)
            .build()
            .is_err());

        // a generic param shadows a constrained one
        assert!(RouteTable::builder()
            .route("/chats/:id", PageId::Chats)
            .route(r"/chats/:id(\d+)", PageId::ChatDetail)
            .build()
            .is_err());

        // duplicates are unreachable
        assert!(RouteTable::builder()
            .route("/cart", PageId::Cart)
            .route("/cart/", PageId::Checkout)
            .build()
            .is_err());
    }

    #[test]
    fn test_pattern_parse_errors() {
        for bad in [
            "cart",
            "/a//b",
            "/:",
            "/:id(\\w+)",
            "/:id(\\d+",
            "/:a/:a",
            "/:bad-name",
            "/a:b",
        ] {
            assert!(
                matches!(RoutePattern::parse(bad), Err(RouteError::InvalidPattern { .. })),
                "pattern {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_builder_reports_first_parse_error() {
        let err = RouteTable::builder()
            .route("/ok", PageId::Landing)
            .route("oops", PageId::Cart)
            .route("/:x(", PageId::Orders)
            .build()
            .unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { pattern, .. } if pattern == "oops"));
    }

    #[test]
    fn test_href() {
        let table = routes();
        assert_eq!(table.href(PageId::Landing, &RouteParams::new()).unwrap(), "/");
        assert_eq!(
            table.href(PageId::ComponentDetail, &params(&[("slug", "b550-tomahawk")])).unwrap(),
            "/components/b550-tomahawk"
        );
        assert_eq!(
            table.href(PageId::ProductDetail, &RouteParams::new()),
            Err(RouteError::MissingParam {
                pattern: r"/products/:id(\d+)".to_string(),
                param: "id".to_string(),
            })
        );
        assert!(matches!(
            table.href(PageId::ProductDetail, &params(&[("id", "abc")])),
            Err(RouteError::NonNumericParam { .. })
        ));
        assert!(matches!(
            table.href(PageId::ComponentDetail, &params(&[("slug", "a/b")])),
            Err(RouteError::InvalidParam { .. })
        ));
        assert_eq!(
            table.href(PageId::NotFound, &RouteParams::new()),
            Err(RouteError::UnknownPage(PageId::NotFound))
        );
    }

    #[test]
    fn test_href_round_trips_through_resolve() {
        let table = routes();
        let cases = [
            (PageId::Cart, params(&[])),
            (PageId::ProductDetail, params(&[("id", "9")])),
            (PageId::ChatDetail, params(&[("id", "31")])),
            (PageId::ComponentDetail, params(&[("slug", "rx-6600")])),
        ];
        for (page, p) in cases {
            let path = table.href(page, &p).unwrap();
            let m = table.resolve_or_not_found(&path);
            assert_eq!(m.page, page, "path {}", path);
            assert_eq!(m.params, p);
        }
    }
}
