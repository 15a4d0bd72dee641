//! Handler for `GET /issues/investigation` — the root-cause drill-down.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use lineview_core::{
  engine::investigate,
  event::{IssueType, MachineFilter},
  investigation::Investigation,
  store::EventStore,
  window::Window,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct InvestigateParams {
  pub category:   String,
  pub issue_type: IssueType,
  pub start:      NaiveDate,
  pub end:        NaiveDate,
  pub machine:    Option<String>,
}

/// `GET /issues/investigation?category=...&issue_type=...&start=...&end=...[&machine=...]`
///
/// 404 (not 500) when no event matches: an empty result is a valid terminal
/// state scoped to this drill-down, and never disturbs the aggregate list
/// the caller already has.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<InvestigateParams>,
) -> Result<Json<Investigation>, ApiError>
where
  S: EventStore,
{
  let window = Window::new(params.start, params.end)?;
  let filter = MachineFilter::from(params.machine);

  let result = investigate(
    store.as_ref(),
    &params.category,
    params.issue_type,
    window,
    &filter,
  )
  .await?;

  match result {
    Some(investigation) => Ok(Json(investigation)),
    None => Err(ApiError::NotFound(format!(
      "no occurrences of {:?} in the requested window",
      params.category
    ))),
  }
}
