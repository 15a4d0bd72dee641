//! HTTP server wiring for Lineview.
//!
//! Configuration loading and router assembly live here so the binary stays
//! a thin shell and the assembled app can be exercised in tests.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use lineview_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` (overridable
/// via `LINEVIEW_`-prefixed environment variables).
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite database file; a leading `~` is expanded to `$HOME`.
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Assemble the full application: the analytics API nested under `/api`,
/// with per-request tracing.
pub fn app(store: Arc<SqliteStore>) -> Router {
  Router::new()
    .nest("/api", lineview_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
