//! Error type for `lineview-store-sqlite`.

use lineview_core::{event::IssueType, store::ConflictError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] lineview_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown {column} discriminant: {value:?}")]
  UnknownDiscriminant {
    column: &'static str,
    value:  String,
  },

  /// An ignore entry with the same (category, issue type, scope) tuple
  /// already exists. Duplicate insert is a conflict, not an overwrite.
  #[error("ignore entry for {category:?} ({issue_type:?}, scope {scope_machine:?}) already exists")]
  DuplicateIgnore {
    category:      String,
    issue_type:    IssueType,
    scope_machine: Option<String>,
  },

  #[error("unparseable settings value for {key:?}: {value:?}")]
  SettingsParse { key: String, value: String },
}

impl ConflictError for Error {
  fn is_conflict(&self) -> bool {
    matches!(self, Self::DuplicateIgnore { .. })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
