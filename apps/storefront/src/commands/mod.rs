//! # Commands Module
//!
//! Every command the web frontend can send to the storefront.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (wire format + dispatch)
//! ├── navigation.rs  ◄─── navigate, href, get_location
//! ├── cart.rs        ◄─── Cart manipulation
//! ├── product.rs     ◄─── Catalog lookups and search
//! └── config.rs      ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Frontend writes one JSON object per line:                              │
//! │    {"cmd":"add_to_cart","productId":3}                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  handle_line() ── serde ──► Command::AddToCart { product_id: 3 }        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatch(&mut Session, Command) ──► cart::add_to_cart(...)             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Reply: {"ok":true,"data":{...}}                                        │
//! │     or  {"ok":false,"error":{"code":"NOT_FOUND","message":"..."}}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod config;
pub mod navigation;
pub mod product;

use rigmart_core::{PageId, ProductId, RouteParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::error::{ApiError, ErrorCode};
use crate::state::{ProductFilter, Session};

/// A command as sent by the frontend.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    // Navigation
    Navigate {
        path: String,
    },
    Href {
        page: PageId,
        #[serde(default)]
        params: RouteParams,
    },
    GetLocation,

    // Cart
    GetCart,
    #[serde(rename_all = "camelCase")]
    AddToCart {
        product_id: ProductId,
    },
    #[serde(rename_all = "camelCase")]
    RemoveFromCart {
        product_id: ProductId,
    },
    #[serde(rename_all = "camelCase")]
    UpdateCartItem {
        product_id: ProductId,
        quantity: i64,
    },
    ClearCart,
    ToggleCart,
    OpenCart,
    CloseCart,
    #[serde(rename_all = "camelCase")]
    GetCartItem {
        product_id: ProductId,
    },

    // Catalog
    #[serde(rename_all = "camelCase")]
    GetProduct {
        product_id: ProductId,
    },
    SearchProducts {
        #[serde(default)]
        filter: ProductFilter,
    },
    ListCategories,
    ListCategory {
        slug: String,
    },

    // Config
    GetConfig,
}

impl Command {
    /// The `cmd` tag, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Navigate { .. } => "navigate",
            Command::Href { .. } => "href",
            Command::GetLocation => "get_location",
            Command::GetCart => "get_cart",
            Command::AddToCart { .. } => "add_to_cart",
            Command::RemoveFromCart { .. } => "remove_from_cart",
            Command::UpdateCartItem { .. } => "update_cart_item",
            Command::ClearCart => "clear_cart",
            Command::ToggleCart => "toggle_cart",
            Command::OpenCart => "open_cart",
            Command::CloseCart => "close_cart",
            Command::GetCartItem { .. } => "get_cart_item",
            Command::GetProduct { .. } => "get_product",
            Command::SearchProducts { .. } => "search_products",
            Command::ListCategories => "list_categories",
            Command::ListCategory { .. } => "list_category",
            Command::GetConfig => "get_config",
        }
    }
}

/// One response line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Reply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Reply {
    pub fn success(data: Value) -> Self {
        Reply {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: ApiError) -> Self {
        Reply {
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

impl From<Result<Value, ApiError>> for Reply {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Reply::success(data),
            Err(err) => Reply::failure(err),
        }
    }
}

fn to_data<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| {
        error!("Failed to encode command result: {}", e);
        ApiError::internal("Failed to encode result")
    })
}

/// Runs one command against the session.
pub fn dispatch(session: &mut Session, command: Command) -> Result<Value, ApiError> {
    match command {
        Command::Navigate { path } => to_data(navigation::navigate(session, &path)?),
        Command::Href { page, params } => to_data(navigation::href(session, page, &params)?),
        Command::GetLocation => to_data(navigation::get_location(session)),

        Command::GetCart => to_data(cart::get_cart(session)),
        Command::AddToCart { product_id } => to_data(cart::add_to_cart(session, product_id)?),
        Command::RemoveFromCart { product_id } => {
            to_data(cart::remove_from_cart(session, product_id))
        }
        Command::UpdateCartItem {
            product_id,
            quantity,
        } => to_data(cart::update_cart_item(session, product_id, quantity)),
        Command::ClearCart => to_data(cart::clear_cart(session)),
        Command::ToggleCart => to_data(cart::toggle_cart(session)),
        Command::OpenCart => to_data(cart::open_cart(session)),
        Command::CloseCart => to_data(cart::close_cart(session)),
        Command::GetCartItem { product_id } => to_data(cart::get_cart_item(session, product_id)),

        Command::GetProduct { product_id } => to_data(product::get_product(session, product_id)?),
        Command::SearchProducts { filter } => to_data(product::search_products(session, &filter)?),
        Command::ListCategories => to_data(product::list_categories(session)),
        Command::ListCategory { slug } => to_data(product::list_category(session, &slug)?),

        Command::GetConfig => to_data(config::get_config(session)),
    }
}

/// Parses and runs one line from the command channel.
pub fn handle_line(session: &mut Session, line: &str) -> Reply {
    let command: Command = match serde_json::from_str(line) {
        Ok(command) => command,
        Err(e) => {
            warn!(error = %e, "Rejected malformed command");
            return Reply::failure(ApiError::bad_request(format!("Invalid command: {}", e)));
        }
    };

    let name = command.name();
    let result = dispatch(session, command);
    if let Err(err) = &result {
        match err.code {
            ErrorCode::Internal => error!(command = name, %err, "Command failed"),
            _ => warn!(command = name, %err, "Command rejected"),
        }
    }
    result.into()
}


#[cfg(test)]
mod tests {
    use super::test_support::session;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_camel_case_args() {
        let command: Command =
            serde_json::from_str(r#"{"cmd":"update_cart_item","productId":4,"quantity":2}"#)
                .unwrap();
        assert!(matches!(
            command,
            Command::UpdateCartItem {
                product_id: 4,
                quantity: 2
            }
        ));
    }

    #[test]
    fn test_href_params_default_to_empty() {
        let command: Command = serde_json::from_str(r#"{"cmd":"href","page":"cart"}"#).unwrap();
        assert!(
            matches!(command, Command::Href { page: PageId::Cart, params } if params.is_empty())
        );
    }

    #[test]
    fn test_malformed_lines_are_bad_requests() {
        let mut session = session();
        for line in ["not json", r#"{"cmd":"teleport"}"#, r#"{"cmd":"add_to_cart"}"#] {
            let reply = handle_line(&mut session, line);
            assert!(!reply.ok);
            assert_eq!(reply.error.unwrap().code, ErrorCode::BadRequest);
        }
    }

    #[test]
    fn test_reply_shapes() {
        let mut session = session();

        let ok = serde_json::to_value(handle_line(&mut session, r#"{"cmd":"get_cart"}"#)).unwrap();
        assert_eq!(ok["ok"], true);
        assert!(ok.get("error").is_none());
        assert_eq!(ok["data"]["totals"]["cartCount"], 0);

        let err = serde_json::to_value(handle_line(
            &mut session,
            r#"{"cmd":"add_to_cart","productId":999}"#,
        ))
        .unwrap();
        assert_eq!(
            err,
            json!({
                "ok": false,
                "error": { "code": "NOT_FOUND", "message": "Product not found: 999" }
            })
        );
    }

    #[test]
    fn test_cart_session_flow() {
        let mut session = session();
        let lines = [
            r#"{"cmd":"add_to_cart","productId":1}"#,
            r#"{"cmd":"add_to_cart","productId":1}"#,
            r#"{"cmd":"add_to_cart","productId":3}"#,
            r#"{"cmd":"update_cart_item","productId":3,"quantity":0}"#,
            r#"{"cmd":"toggle_cart"}"#,
        ];
        for line in lines {
            assert!(handle_line(&mut session, line).ok, "{}", line);
        }

        let reply = handle_line(&mut session, r#"{"cmd":"get_cart"}"#);
        let data = reply.data.unwrap();
        assert_eq!(data["isOpen"], true);
        assert_eq!(data["totals"]["cartCount"], 2);
        assert_eq!(data["totals"]["cartTotal"], 3300000);
        assert_eq!(data["formattedTotal"], "৳33000.00");
        assert_eq!(data["items"][0]["quantity"], 2);
    }

    #[test]
    fn test_max_quantity_saturates_totals() {
        let mut session = session();
        let lines = [
            r#"{"cmd":"add_to_cart","productId":1}"#,
            r#"{"cmd":"add_to_cart","productId":3}"#,
            r#"{"cmd":"update_cart_item","productId":1,"quantity":9223372036854775807}"#,
        ];
        for line in lines {
            assert!(handle_line(&mut session, line).ok, "{}", line);
        }

        let data = handle_line(&mut session, r#"{"cmd":"get_cart"}"#).data.unwrap();
        assert_eq!(data["totals"]["cartCount"], i64::MAX);
        assert_eq!(data["totals"]["cartTotal"], i64::MAX);

        let again = handle_line(&mut session, r#"{"cmd":"add_to_cart","productId":1}"#);
        assert!(again.ok);
        assert_eq!(again.data.unwrap()["items"][0]["quantity"], i64::MAX);
    }
}
