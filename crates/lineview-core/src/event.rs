//! Event types — the raw material of the analytics engine.
//!
//! Events are written once by the file-ingestion subsystem and never mutated
//! afterwards. Downtime and spoilage events share one shape; `impact` is
//! minutes for downtime and spoiled units for spoilage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Placeholder category assigned at analysis time to events whose category
/// field was left blank in the uploaded report.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

// ─── Discriminants ───────────────────────────────────────────────────────────

/// Which event log an operation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
  Downtime,
  Spoilage,
}

impl IssueType {
  /// The opposite log, queried during co-occurrence analysis.
  pub fn other(self) -> Self {
    match self {
      Self::Downtime => Self::Spoilage,
      Self::Spoilage => Self::Downtime,
    }
  }
}

/// Work shift during which an event was recorded. Production runs three
/// shifts a day; reports that omit the shift leave the field empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
  Day,
  Afternoon,
  Night,
}

// ─── Machine filter ──────────────────────────────────────────────────────────

/// The machine scope of an analytics query: one machine code, or the whole
/// floor. Machine codes are opaque strings — the set of machines is site
/// configuration, not program structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineFilter {
  All,
  One(String),
}

impl MachineFilter {
  pub fn matches(&self, machine: &str) -> bool {
    match self {
      Self::All => true,
      Self::One(m) => m == machine,
    }
  }
}

impl From<Option<String>> for MachineFilter {
  fn from(machine: Option<String>) -> Self {
    match machine {
      Some(m) if !m.trim().is_empty() => Self::One(m),
      _ => Self::All,
    }
  }
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// One downtime or spoilage record. Immutable once ingested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  pub event_id:      Uuid,
  pub issue_type:    IssueType,
  pub date:          NaiveDate,
  pub machine:       String,
  /// Raw category label from the uploaded report; may be blank. Analysis
  /// resolves blanks via [`Event::category_label`], never by rewriting the
  /// stored value.
  pub category:      String,
  pub crew:          Option<String>,
  pub shift:         Option<Shift>,
  /// Non-negative. Minutes for downtime, spoiled units for spoilage.
  pub impact:        f64,
  pub linked_run_id: Option<Uuid>,
  /// Inline work-order label on the event itself; used as a fallback when
  /// no linked production run resolves.
  pub work_order:    Option<String>,
  pub comment:       Option<String>,
}

impl Event {
  /// The category this event is aggregated under: the raw label, or
  /// [`UNKNOWN_CATEGORY`] when the label is blank.
  pub fn category_label(&self) -> &str {
    if self.category.trim().is_empty() {
      UNKNOWN_CATEGORY
    } else {
      &self.category
    }
  }

  /// The crew identifier, with blank strings normalised to `None`.
  pub fn crew_label(&self) -> Option<&str> {
    self.crew.as_deref().filter(|c| !c.trim().is_empty())
  }
}

// ─── NewEvent ────────────────────────────────────────────────────────────────

/// Input to the store's event insert. `event_id` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewEvent {
  pub issue_type:    IssueType,
  pub date:          NaiveDate,
  pub machine:       String,
  pub category:      String,
  pub crew:          Option<String>,
  pub shift:         Option<Shift>,
  pub impact:        f64,
  pub linked_run_id: Option<Uuid>,
  pub work_order:    Option<String>,
  pub comment:       Option<String>,
}

impl NewEvent {
  /// Convenience constructor with all optional fields empty.
  pub fn new(
    issue_type: IssueType,
    date:       NaiveDate,
    machine:    impl Into<String>,
    category:   impl Into<String>,
    impact:     f64,
  ) -> Self {
    Self {
      issue_type,
      date,
      machine: machine.into(),
      category: category.into(),
      crew: None,
      shift: None,
      impact,
      linked_run_id: None,
      work_order: None,
      comment: None,
    }
  }

  /// Reject malformed input before any query is issued. Impact must be a
  /// finite, non-negative number.
  pub fn validate(&self) -> Result<()> {
    if !self.impact.is_finite() || self.impact < 0.0 {
      return Err(Error::InvalidImpact(self.impact));
    }
    Ok(())
  }
}

// ─── ProductionRun ───────────────────────────────────────────────────────────

/// A machine run, as parsed from an uploaded run report. Events optionally
/// reference a run via `linked_run_id`; the numeric fields feed the
/// performance metric calculators in [`crate::metrics`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionRun {
  pub run_id:             Uuid,
  pub machine:            String,
  pub date:               NaiveDate,
  /// Operator-facing work-order label shown in drill-down views.
  pub work_order:         Option<String>,
  pub good_production:    f64,
  pub production_minutes: f64,
  pub downtime_minutes:   f64,
}

/// Input to the store's run insert. `run_id` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewRun {
  pub machine:            String,
  pub date:               NaiveDate,
  pub work_order:         Option<String>,
  pub good_production:    f64,
  pub production_minutes: f64,
  pub downtime_minutes:   f64,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn event(category: &str, crew: Option<&str>) -> Event {
    Event {
      event_id:      Uuid::new_v4(),
      issue_type:    IssueType::Downtime,
      date:          "2024-03-01".parse().unwrap(),
      machine:       "CP01".into(),
      category:      category.into(),
      crew:          crew.map(Into::into),
      shift:         None,
      impact:        5.0,
      linked_run_id: None,
      work_order:    None,
      comment:       None,
    }
  }

  #[test]
  fn blank_category_resolves_to_unknown() {
    assert_eq!(event("", None).category_label(), UNKNOWN_CATEGORY);
    assert_eq!(event("   ", None).category_label(), UNKNOWN_CATEGORY);
    assert_eq!(event("Web Break", None).category_label(), "Web Break");
  }

  #[test]
  fn blank_crew_resolves_to_none() {
    assert_eq!(event("x", None).crew_label(), None);
    assert_eq!(event("x", Some(" ")).crew_label(), None);
    assert_eq!(event("x", Some("A")).crew_label(), Some("A"));
  }

  #[test]
  fn machine_filter_from_option() {
    assert_eq!(MachineFilter::from(None), MachineFilter::All);
    assert_eq!(MachineFilter::from(Some("  ".into())), MachineFilter::All);
    assert_eq!(
      MachineFilter::from(Some("CP01".into())),
      MachineFilter::One("CP01".into())
    );
  }

  #[test]
  fn negative_or_nonfinite_impact_rejected() {
    let mut e = NewEvent::new(
      IssueType::Spoilage,
      "2024-03-01".parse().unwrap(),
      "CP01",
      "Seal Fail",
      -1.0,
    );
    assert!(e.validate().is_err());
    e.impact = f64::NAN;
    assert!(e.validate().is_err());
    e.impact = 0.0;
    assert!(e.validate().is_ok());
  }
}
