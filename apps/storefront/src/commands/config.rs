//! # Config Commands
//!
//! Read-only access to the configuration the session was started with.

use tracing::debug;

use crate::state::{ConfigState, Session};

/// Gets the current store configuration.
///
/// ## When Used
/// - Page header (store name)
/// - Currency formatting on the frontend
pub fn get_config(session: &Session) -> ConfigState {
    debug!("get_config command");
    session.config().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::session;

    #[test]
    fn test_log_filter_is_not_exposed() {
        let json = serde_json::to_value(get_config(&session())).unwrap();
        assert_eq!(json["storeName"], "RigMart");
        assert_eq!(json["currencySymbol"], "৳");
        assert!(json.get("logFilter").is_none());
    }
}
