//! Handlers for the `/issues` list and the ignore registry.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/issues` | `?issue_type`, `?start`, `?end` required; optional `machine` |
//! | `GET`  | `/issues/ignored` | `?issue_type` required; lists registry entries |
//! | `POST` | `/issues/ignore` | Body: [`IgnoreBody`]; 201, or 409 on duplicate |
//! | `POST` | `/issues/unignore` | Body: [`UnignoreBody`]; idempotent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use lineview_core::{
  engine::aggregate_issues,
  event::{IssueType, MachineFilter},
  issue::{IgnoreEntry, IssueReport, NewIgnoreEntry},
  store::{EventStore, IgnoreRegistry},
  window::Window,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── Aggregate ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AggregateParams {
  pub issue_type: IssueType,
  /// First day of the window, inclusive.
  pub start:      NaiveDate,
  /// Last day of the window, inclusive.
  pub end:        NaiveDate,
  /// Restrict to one machine code; absent means the whole floor.
  pub machine:    Option<String>,
}

/// `GET /issues?issue_type=downtime&start=...&end=...[&machine=...]`
pub async fn aggregate<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<AggregateParams>,
) -> Result<Json<IssueReport>, ApiError>
where
  S: EventStore + IgnoreRegistry,
{
  let window = Window::new(params.start, params.end)?;
  let filter = MachineFilter::from(params.machine);

  let report = aggregate_issues(
    store.as_ref(),
    store.as_ref(),
    params.issue_type,
    window,
    &filter,
  )
  .await?;
  Ok(Json(report))
}

// ─── Registry listing ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListIgnoredParams {
  pub issue_type: IssueType,
}

/// `GET /issues/ignored?issue_type=...` — every entry, across all scopes.
pub async fn list_ignored<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListIgnoredParams>,
) -> Result<Json<Vec<IgnoreEntry>>, ApiError>
where
  S: IgnoreRegistry,
{
  let entries = store
    .list_entries(params.issue_type)
    .await
    .map_err(ApiError::from_registry)?;
  Ok(Json(entries))
}

// ─── Ignore ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /issues/ignore`.
#[derive(Debug, Deserialize)]
pub struct IgnoreBody {
  pub category:      String,
  pub issue_type:    IssueType,
  /// Omit (or null) to suppress the category on every machine.
  pub scope_machine: Option<String>,
  pub reason:        Option<String>,
  pub created_by:    String,
}

impl From<IgnoreBody> for NewIgnoreEntry {
  fn from(b: IgnoreBody) -> Self {
    NewIgnoreEntry {
      category:      b.category,
      issue_type:    b.issue_type,
      scope_machine: b.scope_machine,
      reason:        b.reason,
      created_by:    b.created_by,
    }
  }
}

/// `POST /issues/ignore` — returns 201 + the stored entry, or 409 if an
/// identical (category, issue type, scope) tuple already exists.
pub async fn ignore<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<IgnoreBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: IgnoreRegistry,
{
  let entry = store
    .insert_entry(NewIgnoreEntry::from(body))
    .await
    .map_err(ApiError::from_registry)?;
  Ok((StatusCode::CREATED, Json(entry)))
}

// ─── Unignore ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UnignoreBody {
  pub category:      String,
  pub issue_type:    IssueType,
  pub scope_machine: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnignoreResponse {
  /// Rows removed; zero means there was nothing to remove, which is still
  /// success.
  pub deleted: u64,
}

/// `POST /issues/unignore` — idempotent; deleting a non-existent entry
/// succeeds with `deleted: 0`.
pub async fn unignore<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<UnignoreBody>,
) -> Result<Json<UnignoreResponse>, ApiError>
where
  S: IgnoreRegistry,
{
  let deleted = store
    .delete_entries(
      &body.category,
      body.issue_type,
      body.scope_machine.as_deref(),
    )
    .await
    .map_err(ApiError::from_registry)?;
  Ok(Json(UnignoreResponse { deleted }))
}
