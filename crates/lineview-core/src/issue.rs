//! Issue summaries, trend classification, and the ignore-list overlay.
//!
//! Summaries are derived per query and never persisted. Ignore entries are
//! the one persisted record this module defines; the scope-matching rule is
//! the free function [`suppresses`] so the null-scope-vs-machine-scope
//! semantics stay testable in isolation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{IssueType, MachineFilter};

// ─── Trend ───────────────────────────────────────────────────────────────────

/// Fixed classification band: a change of more than ±10% versus the prior
/// period counts as a real trend. Distinct from the configurable
/// `trend_increase_threshold_pct` used by training-priority detection.
pub const TREND_BAND_PCT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
  Increasing,
  Stable,
  Decreasing,
}

/// Compare occurrence counts across two equal-length windows.
///
/// A category absent from the prior period is `Increasing` if it now occurs
/// at all; otherwise change is measured as a percentage of the prior count
/// against [`TREND_BAND_PCT`].
pub fn classify_trend(current: u64, previous: u64) -> Trend {
  if previous == 0 {
    return if current > 0 { Trend::Increasing } else { Trend::Stable };
  }
  let change_pct =
    (current as f64 - previous as f64) / previous as f64 * 100.0;
  if change_pct > TREND_BAND_PCT {
    Trend::Increasing
  } else if change_pct < -TREND_BAND_PCT {
    Trend::Decreasing
  } else {
    Trend::Stable
  }
}

// ─── Summaries ───────────────────────────────────────────────────────────────

/// Per-category aggregation over one window. Derived, recomputed per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueSummary {
  pub category:              String,
  pub occurrence_count:      u64,
  pub total_impact:          f64,
  /// Distinct non-empty machine codes, in first-seen order.
  pub affected_machines:     Vec<String>,
  /// Crew with the highest event count; first-seen wins ties.
  pub most_affected_crew:    Option<String>,
  pub trend:                 Trend,
  pub previous_period_count: u64,
}

/// The two disjoint summary sets produced by aggregation. Ignored items are
/// returned alongside active ones so the UI can render them struck through
/// rather than silently hiding them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueReport {
  pub active:  Vec<IssueSummary>,
  pub ignored: Vec<IssueSummary>,
}

// ─── Ignore entries ──────────────────────────────────────────────────────────

/// A persisted suppression of one category for one issue type. A `None`
/// scope suppresses the category on every machine; a machine-scoped entry
/// suppresses only that machine's view. At most one entry exists per
/// `(category, issue_type, scope_machine)` tuple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreEntry {
  pub category:      String,
  pub issue_type:    IssueType,
  pub scope_machine: Option<String>,
  pub reason:        Option<String>,
  pub created_by:    String,
  pub created_at:    DateTime<Utc>,
}

/// Input to the registry's insert. `created_at` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewIgnoreEntry {
  pub category:      String,
  pub issue_type:    IssueType,
  pub scope_machine: Option<String>,
  pub reason:        Option<String>,
  pub created_by:    String,
}

/// Does `entry` suppress its category under the active machine filter?
///
/// A null-scope entry suppresses every view. A machine-scoped entry
/// suppresses only the view filtered to that machine — in particular it
/// never suppresses the "all machines" aggregate, so switching between
/// "all" and a specific machine can change which categories are visible.
pub fn suppresses(entry: &IgnoreEntry, filter: &MachineFilter) -> bool {
  match (&entry.scope_machine, filter) {
    (None, _) => true,
    (Some(scope), MachineFilter::One(m)) => scope == m,
    (Some(_), MachineFilter::All) => false,
  }
}

/// Split summaries into `(active, ignored)` under the entries for one issue
/// type, preserving the incoming order within each set.
pub fn partition_issues(
  summaries: Vec<IssueSummary>,
  entries:   &[IgnoreEntry],
  filter:    &MachineFilter,
) -> (Vec<IssueSummary>, Vec<IssueSummary>) {
  summaries.into_iter().partition(|summary| {
    !entries
      .iter()
      .any(|e| e.category == summary.category && suppresses(e, filter))
  })
}
