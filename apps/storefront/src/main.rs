//! # RigMart Storefront Entry Point
//!
//! Starts a single storefront session on stdin/stdout.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Web frontend (or any JSON-lines client)                                │
//! │        │  {"cmd":"navigate","path":"/components/cpu"}                   │
//! │        ▼                                                                │
//! │  rigmart-storefront ──► Session { cart, routes, catalog, config }       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  {"ok":true,"data":{"path":"/components/cpu","page":"cpu",...}}         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match rigmart_storefront::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Storefront stopped");
            ExitCode::FAILURE
        }
    }
}
