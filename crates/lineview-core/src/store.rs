//! Store traits the analytics engine runs against.
//!
//! Implemented by storage backends (e.g. `lineview-store-sqlite`). The
//! engine and the API layer depend on these abstractions, not on any
//! concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  event::{Event, IssueType, MachineFilter},
  issue::{IgnoreEntry, NewIgnoreEntry},
  score::DetectionSettings,
  window::Window,
};

// ─── Row types ───────────────────────────────────────────────────────────────

/// One co-occurrence hit: an event of some other category referencing a
/// production run the investigated category also touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoOccurrence {
  pub category: String,
  pub run_id:   Uuid,
}

// ─── Error marker ────────────────────────────────────────────────────────────

/// Implemented by store error types so generic callers can tell a duplicate
/// ignore-entry insert apart from a backend failure.
pub trait ConflictError {
  fn is_conflict(&self) -> bool;
}

// ─── Event store ─────────────────────────────────────────────────────────────

/// Read access to the downtime/spoilage event log.
///
/// All methods return `Send` futures so the traits can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). Queries are
/// independent reads; a failure must surface as an error, never as an empty
/// result.
pub trait EventStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All events of `issue_type` dated within `window` (inclusive),
  /// restricted by the machine filter.
  fn query_events<'a>(
    &'a self,
    issue_type: IssueType,
    window:     Window,
    filter:     &'a MachineFilter,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + 'a;

  /// Categories (other than `exclude_category`) whose events reference any
  /// of `run_ids`, for co-occurrence tallying. Queried once per issue type.
  fn query_by_run_ids<'a>(
    &'a self,
    issue_type:       IssueType,
    run_ids:          &'a [Uuid],
    exclude_category: &'a str,
  ) -> impl Future<Output = Result<Vec<CoOccurrence>, Self::Error>> + Send + 'a;

  /// Work-order labels for the given production runs. Runs without a label
  /// (or unknown ids) come back as `None`.
  fn run_labels<'a>(
    &'a self,
    run_ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<(Uuid, Option<String>)>, Self::Error>> + Send + 'a;
}

// ─── Ignore registry ─────────────────────────────────────────────────────────

/// The persisted suppression list. The only writes in the whole core.
pub trait IgnoreRegistry: Send + Sync {
  type Error: std::error::Error + ConflictError + Send + Sync + 'static;

  /// Every entry for one issue type, across all scopes.
  fn list_entries(
    &self,
    issue_type: IssueType,
  ) -> impl Future<Output = Result<Vec<IgnoreEntry>, Self::Error>> + Send + '_;

  /// Insert a suppression. An entry with an identical
  /// `(category, issue_type, scope_machine)` tuple already present is a
  /// conflict (`Self::Error::is_conflict()`), not an overwrite.
  fn insert_entry(
    &self,
    entry: NewIgnoreEntry,
  ) -> impl Future<Output = Result<IgnoreEntry, Self::Error>> + Send + '_;

  /// Delete entries matching category, issue type, and scope (same
  /// null-or-equal rule as [`crate::issue::suppresses`]). Returns the
  /// number of rows removed; zero is success, so the operation is
  /// idempotent.
  fn delete_entries<'a>(
    &'a self,
    category:      &'a str,
    issue_type:    IssueType,
    scope_machine: Option<&'a str>,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;
}

// ─── Settings store ──────────────────────────────────────────────────────────

/// Tunable detection thresholds, read once per operation.
pub trait SettingsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Current detection settings; absent values fall back to
  /// [`DetectionSettings::default`].
  fn detection_settings(
    &self,
  ) -> impl Future<Output = Result<DetectionSettings, Self::Error>> + Send + '_;
}
