//! Investigation result types — the drill-down read model for one category.
//!
//! Everything here is computed on demand by [`crate::engine::investigate`]
//! and discarded after the response is produced; nothing is persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  event::{IssueType, Shift},
  window::Window,
};

/// Projection of one raw event for the occurrence list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccurrenceDetail {
  pub date:       NaiveDate,
  pub machine:    String,
  pub crew:       Option<String>,
  pub shift:      Option<Shift>,
  pub impact:     f64,
  /// Display label: the linked production run's work order when one
  /// resolves, else the event's own inline work-order field, else nothing.
  pub work_order: Option<String>,
  pub comment:    Option<String>,
}

/// Per-crew share of the investigated category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewImpact {
  pub crew:         String,
  pub count:        u64,
  pub total_impact: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCount {
  pub shift: Shift,
  pub count: u64,
}

/// Which shifts the category clusters on. Events without shift data are
/// excluded; if none carry a shift, `most_common` is `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftPattern {
  pub most_common: Option<Shift>,
  pub histogram:   Vec<ShiftCount>,
}

/// Another category linked to the investigated one because their events
/// reference the same production runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedIssue {
  pub category: String,
  pub count:    u64,
}

/// The full drill-down payload for one category in one window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investigation {
  pub category:       String,
  pub issue_type:     IssueType,
  pub window:         Window,
  /// Raw occurrence projections, newest first.
  pub occurrences:    Vec<OccurrenceDetail>,
  /// Sorted descending by count.
  pub crew_breakdown: Vec<CrewImpact>,
  pub shift_pattern:  ShiftPattern,
  /// Top 5 co-occurring categories across both event types.
  pub related_issues: Vec<RelatedIssue>,
}
