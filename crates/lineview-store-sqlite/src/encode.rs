//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Calendar dates are stored as ISO 8601 `YYYY-MM-DD` (which also makes
//! lexicographic range comparison correct), timestamps as RFC 3339, UUIDs
//! as hyphenated lowercase strings, and enums as lowercase discriminants
//! matching their serde tags.

use chrono::{DateTime, NaiveDate, Utc};
use lineview_core::{
  event::{Event, IssueType, ProductionRun, Shift},
  issue::IgnoreEntry,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String {
  id.hyphenated().to_string()
}

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Ok(Uuid::parse_str(s)?)
}

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse().map_err(|_| Error::DateParse(s.to_owned()))
}

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── IssueType ───────────────────────────────────────────────────────────────

pub fn encode_issue_type(t: IssueType) -> &'static str {
  match t {
    IssueType::Downtime => "downtime",
    IssueType::Spoilage => "spoilage",
  }
}

pub fn decode_issue_type(s: &str) -> Result<IssueType> {
  match s {
    "downtime" => Ok(IssueType::Downtime),
    "spoilage" => Ok(IssueType::Spoilage),
    other => Err(Error::UnknownDiscriminant {
      column: "issue_type",
      value:  other.to_owned(),
    }),
  }
}

// ─── Shift ───────────────────────────────────────────────────────────────────

pub fn encode_shift(s: Shift) -> &'static str {
  match s {
    Shift::Day => "day",
    Shift::Afternoon => "afternoon",
    Shift::Night => "night",
  }
}

pub fn decode_shift(s: &str) -> Result<Shift> {
  match s {
    "day" => Ok(Shift::Day),
    "afternoon" => Ok(Shift::Afternoon),
    "night" => Ok(Shift::Night),
    other => Err(Error::UnknownDiscriminant {
      column: "shift",
      value:  other.to_owned(),
    }),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `events` row.
pub struct RawEvent {
  pub event_id:      String,
  pub issue_type:    String,
  pub date:          String,
  pub machine:       String,
  pub category:      String,
  pub crew:          Option<String>,
  pub shift:         Option<String>,
  pub impact:        f64,
  pub linked_run_id: Option<String>,
  pub work_order:    Option<String>,
  pub comment:       Option<String>,
}

impl RawEvent {
  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      event_id:      decode_uuid(&self.event_id)?,
      issue_type:    decode_issue_type(&self.issue_type)?,
      date:          decode_date(&self.date)?,
      machine:       self.machine,
      category:      self.category,
      crew:          self.crew,
      shift:         self.shift.as_deref().map(decode_shift).transpose()?,
      impact:        self.impact,
      linked_run_id: self
        .linked_run_id
        .as_deref()
        .map(decode_uuid)
        .transpose()?,
      work_order:    self.work_order,
      comment:       self.comment,
    })
  }
}

/// Raw strings read directly from an `ignore_entries` row.
pub struct RawIgnoreEntry {
  pub category:      String,
  pub issue_type:    String,
  pub scope_machine: Option<String>,
  pub reason:        Option<String>,
  pub created_by:    String,
  pub created_at:    String,
}

impl RawIgnoreEntry {
  pub fn into_entry(self) -> Result<IgnoreEntry> {
    Ok(IgnoreEntry {
      category:      self.category,
      issue_type:    decode_issue_type(&self.issue_type)?,
      scope_machine: self.scope_machine,
      reason:        self.reason,
      created_by:    self.created_by,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `production_runs` row.
pub struct RawRun {
  pub run_id:             String,
  pub machine:            String,
  pub date:               String,
  pub work_order:         Option<String>,
  pub good_production:    f64,
  pub production_minutes: f64,
  pub downtime_minutes:   f64,
}

impl RawRun {
  pub fn into_run(self) -> Result<ProductionRun> {
    Ok(ProductionRun {
      run_id:             decode_uuid(&self.run_id)?,
      machine:            self.machine,
      date:               decode_date(&self.date)?,
      work_order:         self.work_order,
      good_production:    self.good_production,
      production_minutes: self.production_minutes,
      downtime_minutes:   self.downtime_minutes,
    })
  }
}
