//! Error types for `lineview-core`.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The requested window has `start` after `end`.
  #[error("invalid window: start {start} is after end {end}")]
  InvalidWindow { start: NaiveDate, end: NaiveDate },

  /// Event impact must be a finite, non-negative number.
  #[error("invalid impact value: {0}")]
  InvalidImpact(f64),

  /// A collaborator query failed. The engine aborts the whole operation;
  /// no partial result is ever returned alongside this error.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a store backend error for propagation through the engine.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
