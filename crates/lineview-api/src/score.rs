//! Handlers for priority scoring and training recommendations.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use lineview_core::{
  engine::aggregate_issues,
  event::{IssueType, MachineFilter},
  issue::{IssueSummary, Trend},
  score::{PriorityScore, Severity, score_issue, training_priorities},
  store::{EventStore, IgnoreRegistry, SettingsStore},
  window::Window,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── Score one issue ──────────────────────────────────────────────────────────

/// JSON body accepted by `POST /score`. The severity is the dashboard's own
/// classification of the category, not this engine's output tier.
#[derive(Debug, Deserialize)]
pub struct ScoreBody {
  pub occurrence_count: u64,
  pub total_impact:     f64,
  /// Signed percentage deviation from the team average.
  pub variance_pct:     f64,
  pub trend:            Trend,
  pub severity:         Severity,
}

/// `POST /score` — pure computation; no store access.
pub async fn handler(Json(body): Json<ScoreBody>) -> Json<PriorityScore> {
  Json(score_issue(
    body.occurrence_count,
    body.total_impact,
    body.variance_pct,
    body.trend,
    body.severity,
  ))
}

// ─── Training priorities ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PrioritiesParams {
  pub issue_type: IssueType,
  pub start:      NaiveDate,
  pub end:        NaiveDate,
  pub machine:    Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingPriority {
  pub issue:    IssueSummary,
  pub priority: PriorityScore,
}

/// `GET /issues/priorities?issue_type=...&start=...&end=...[&machine=...]`
///
/// Aggregates the active issues, loads the detection thresholds, and ranks
/// everything above the occurrence/impact floors. Variance and severity
/// default to neutral here; a dashboard holding richer per-category context
/// scores through `POST /score` instead.
pub async fn priorities<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<PrioritiesParams>,
) -> Result<Json<Vec<TrainingPriority>>, ApiError>
where
  S: EventStore + IgnoreRegistry + SettingsStore,
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

  let settings = store
    .detection_settings()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let ranked = training_priorities(
    &report.active,
    &settings,
    |_| 0.0,
    |_| Severity::Medium,
  );

  Ok(Json(
    ranked
      .into_iter()
      .map(|(issue, priority)| TrainingPriority { issue, priority })
      .collect(),
  ))
}
