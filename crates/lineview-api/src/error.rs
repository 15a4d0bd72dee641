//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// Duplicate ignore entry — surfaced as a user-actionable message; the
  /// registry state is unchanged.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a store-layer failure, routing duplicate ignore-entry inserts to
  /// [`ApiError::Conflict`].
  pub fn from_registry<E>(err: E) -> Self
  where
    E: std::error::Error
      + lineview_core::store::ConflictError
      + Send
      + Sync
      + 'static,
  {
    if err.is_conflict() {
      Self::Conflict(err.to_string())
    } else {
      Self::Store(Box::new(err))
    }
  }
}

impl From<lineview_core::Error> for ApiError {
  fn from(err: lineview_core::Error) -> Self {
    match err {
      lineview_core::Error::InvalidWindow { .. }
      | lineview_core::Error::InvalidImpact(_) => {
        Self::BadRequest(err.to_string())
      }
      lineview_core::Error::Store(inner) => Self::Store(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
