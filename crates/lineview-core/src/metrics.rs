//! Deterministic performance-metric formulas feeding dashboard display.
//!
//! These are small and boring on purpose; every branch is pinned by a test
//! because the dashboard renders their output verbatim.

use serde::{Deserialize, Serialize};

/// Run-status classification for one machine over one reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineStatus {
  Down,
  NoWork,
  Running,
  Setup,
}

/// Classify a machine's period. Excessive downtime wins over everything
/// else, even high efficiency; then zero production, then the 50%
/// efficiency split between running and setup.
pub fn classify_machine_status(
  total_production:       f64,
  efficiency_pct:         f64,
  total_downtime_minutes: f64,
) -> MachineStatus {
  if total_downtime_minutes > 240.0 {
    MachineStatus::Down
  } else if total_production == 0.0 {
    MachineStatus::NoWork
  } else if efficiency_pct > 50.0 {
    MachineStatus::Running
  } else {
    MachineStatus::Setup
  }
}

/// Good units per running hour, rounded to 2 decimal places. Logged
/// downtime is excluded from the denominator; a non-positive running time
/// yields 0 rather than a division error.
pub fn run_speed(
  good_production:        f64,
  production_minutes:     f64,
  logged_downtime_minutes: f64,
) -> f64 {
  let running_minutes = production_minutes - logged_downtime_minutes;
  if running_minutes <= 0.0 {
    return 0.0;
  }
  let per_hour = good_production / running_minutes * 60.0;
  (per_hour * 100.0).round() / 100.0
}

/// Signed percentage deviation of actual speed from target. Only defined
/// for a positive target.
pub fn speed_variance_pct(actual: f64, target: f64) -> Option<f64> {
  if target > 0.0 {
    Some((actual - target) / target * 100.0)
  } else {
    None
  }
}

/// Efficiency is already a percentage, so the variance is the plain signed
/// difference — no division.
pub fn efficiency_variance(actual_pct: f64, target_pct: f64) -> f64 {
  actual_pct - target_pct
}

/// Same rule as efficiency: spoilage percentages compare by difference.
pub fn spoilage_variance(actual_pct: f64, target_pct: f64) -> f64 {
  actual_pct - target_pct
}
