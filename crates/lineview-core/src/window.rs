//! Inclusive calendar-day windows for analytics queries.
//!
//! The prior-period comparison window is derived in exactly one place,
//! [`Window::previous`], so every call site agrees on its length for
//! arbitrary (non-default) windows.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An inclusive `[start, end]` range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
  pub start: NaiveDate,
  pub end:   NaiveDate,
}

impl Window {
  /// Build a window, rejecting ranges where `start` is after `end`.
  pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
    if start > end {
      return Err(Error::InvalidWindow { start, end });
    }
    Ok(Self { start, end })
  }

  /// Number of calendar days covered, inclusive of both endpoints.
  pub fn days(&self) -> u64 {
    (self.end - self.start).num_days() as u64 + 1
  }

  /// The equal-length window immediately preceding this one: it ends the
  /// day before `start` and spans the same number of days.
  pub fn previous(&self) -> Self {
    let end = self.start - Days::new(1);
    let start = end - Days::new(self.days() - 1);
    Self { start, end }
  }
}
