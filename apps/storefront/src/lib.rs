//! # RigMart Storefront Library
//!
//! Session state behind the RigMart web frontend: the shopping cart, page
//! navigation and the catalog the cart draws from.
//!
//! ## Module Organization
//! ```text
//! rigmart_storefront/
//! ├── lib.rs            ◄─── You are here (logging, command loop, run)
//! ├── state/
//! │   ├── mod.rs        ◄─── State type exports
//! │   ├── session.rs    ◄─── Session: the single owner of all state
//! │   ├── catalog.rs    ◄─── Product catalog (seed JSON)
//! │   └── config.rs     ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs        ◄─── Command wire format + dispatch
//! │   ├── navigation.rs ◄─── navigate / href / get_location
//! │   ├── cart.rs       ◄─── Cart manipulation commands
//! │   ├── product.rs    ◄─── Catalog lookups
//! │   └── config.rs     ◄─── Config retrieval
//! └── error.rs          ◄─── API and startup error types
//! ```
//!
//! ## Command Channel
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin  ──► one JSON command per line ──► handle_line(&mut Session)     │
//! │  stdout ◄── one JSON reply per line   ◄──────────────┘                  │
//! │  stderr ◄── tracing output                                              │
//! │                                                                         │
//! │  Commands are handled strictly in arrival order on one thread, so the   │
//! │  session needs no locking.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

use error::AppError;
use state::{ConfigState, Session};

/// Runs the storefront against stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Read configuration ── RIGMART_* environment variables               │
/// │  2. Initialize logging ── RUST_LOG, else RIGMART_LOG, else default      │
/// │  3. Build route table  ── invalid or shadowed entries abort startup     │
/// │  4. Load catalog       ── configured file, data dir, or built-in demo   │
/// │  5. Serve commands     ── until stdin closes                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), AppError> {
    let config = ConfigState::from_env();
    init_tracing(&config);

    info!(store = %config.store_name, "Starting RigMart storefront");

    let session = Session::start(config)?;
    serve(session, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RIGMART_LOG=warn` - Used when `RUST_LOG` is unset
/// - Default: `info,rigmart_storefront=debug`
///
/// Output goes to stderr; stdout carries replies.
pub fn init_tracing(config: &ConfigState) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads commands from `reader` and writes one reply line per command to
/// `writer` until the reader is exhausted. Blank lines are skipped.
pub async fn serve<R, W>(mut session: Session, reader: R, mut writer: W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let span = info_span!("session", id = %session.id());

    async move {
        let mut lines = reader.lines();
        let mut handled = 0u64;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let reply = commands::handle_line(&mut session, line);
            let mut out = serde_json::to_vec(&reply)?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;

            handled += 1;
            debug!(handled, ok = reply.ok, "Reply written");
        }

        let uptime = Utc::now() - session.started_at();
        info!(
            handled,
            uptime_secs = uptime.num_seconds(),
            cart_count = session.cart().cart_count(),
            "Input closed, shutting down"
        );
        Ok::<(), AppError>(())
    }
    .instrument(span)
    .await
}
