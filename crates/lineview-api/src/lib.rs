//! JSON REST API for Lineview.
//!
//! Exposes an axum [`Router`] backed by any store implementing the
//! `lineview-core` store traits. Auth, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lineview_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod investigation;
pub mod issues;
pub mod score;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use lineview_core::store::{EventStore, IgnoreRegistry, SettingsStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: EventStore + IgnoreRegistry + SettingsStore + 'static,
{
  Router::new()
    // Recurring issues
    .route("/issues", get(issues::aggregate::<S>))
    .route("/issues/ignored", get(issues::list_ignored::<S>))
    .route("/issues/ignore", post(issues::ignore::<S>))
    .route("/issues/unignore", post(issues::unignore::<S>))
    // Drill-down
    .route("/issues/investigation", get(investigation::handler::<S>))
    // Scoring
    .route("/issues/priorities", get(score::priorities::<S>))
    .route("/score", post(score::handler))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
