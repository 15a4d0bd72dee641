//! Training-priority scoring.
//!
//! Combines an issue's frequency, impact, variance-from-team-average, trend,
//! and externally supplied severity into a single 0–100 score with a
//! four-level tier. Pure and deterministic; non-finite numeric inputs
//! contribute zero rather than erroring.

use serde::{Deserialize, Serialize};

use crate::issue::{IssueSummary, Trend};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Externally supplied classification of the issue category itself —
/// independent of the tier this scorer outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Critical,
  High,
  Medium,
  Low,
}

// ─── Outputs ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
  Critical,
  High,
  Medium,
  Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityScore {
  /// Clamped to 0–100 and rounded to the nearest integer.
  pub score: u8,
  pub tier:  PriorityTier,
}

// ─── Scoring ─────────────────────────────────────────────────────────────────

fn capped(value: f64, cap: f64) -> f64 {
  if value.is_finite() { value.min(cap) } else { 0.0 }
}

/// Additive scoring heuristic; each term is capped before summing.
pub fn score_issue(
  occurrence_count: u64,
  total_impact:     f64,
  variance_pct:     f64,
  trend:            Trend,
  severity:         Severity,
) -> PriorityScore {
  let occurrence_term = capped(occurrence_count as f64 * 3.0, 25.0);
  let impact_term     = capped(total_impact / 10.0, 30.0);
  let variance_term   = capped(variance_pct.abs(), 20.0);
  let trend_term      = match trend {
    Trend::Increasing => 15.0,
    Trend::Stable => 5.0,
    Trend::Decreasing => 0.0,
  };
  let severity_term = match severity {
    Severity::Critical => 10.0,
    Severity::High => 7.0,
    Severity::Medium => 5.0,
    Severity::Low => 2.0,
  };

  let raw = occurrence_term
    + impact_term
    + variance_term
    + trend_term
    + severity_term;
  let score = raw.clamp(0.0, 100.0).round() as u8;

  let tier = if score >= 75 {
    PriorityTier::Critical
  } else if score >= 50 {
    PriorityTier::High
  } else if score >= 25 {
    PriorityTier::Medium
  } else {
    PriorityTier::Low
  };

  PriorityScore { score, tier }
}

// ─── Detection settings ──────────────────────────────────────────────────────

/// Tunable detection thresholds, loaded once per operation from the settings
/// store. Absent rows fall back to these defaults; the struct is explicit so
/// default-then-override never lives in ambient global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSettings {
  /// Minimum occurrences in the window before an issue is worth training on.
  pub min_occurrences:              u64,
  /// Minimum total impact (minutes or units) in the window.
  pub min_total_impact:             f64,
  /// Variance from the team average considered noteworthy, in percent.
  pub variance_threshold_pct:       f64,
  /// Occurrence growth versus the prior period that flags a worsening
  /// issue, in percent. Not the same constant as
  /// [`crate::issue::TREND_BAND_PCT`].
  pub trend_increase_threshold_pct: f64,
  /// Default analysis window length.
  pub lookback_days:                u32,
}

impl Default for DetectionSettings {
  fn default() -> Self {
    Self {
      min_occurrences:              3,
      min_total_impact:             60.0,
      variance_threshold_pct:       15.0,
      trend_increase_threshold_pct: 25.0,
      lookback_days:                30,
    }
  }
}

/// Rank aggregated issues for training recommendations.
///
/// Summaries under the occurrence or impact floor are dropped; the rest are
/// scored with caller-supplied variance and severity lookups (team-average
/// variance and category severity come from dashboard context this engine
/// does not own) and sorted descending by score.
pub fn training_priorities<V, C>(
  summaries:   &[IssueSummary],
  settings:    &DetectionSettings,
  variance_of: V,
  severity_of: C,
) -> Vec<(IssueSummary, PriorityScore)>
where
  V: Fn(&IssueSummary) -> f64,
  C: Fn(&IssueSummary) -> Severity,
{
  let mut ranked: Vec<(IssueSummary, PriorityScore)> = summaries
    .iter()
    .filter(|s| {
      s.occurrence_count >= settings.min_occurrences
        && s.total_impact >= settings.min_total_impact
    })
    .map(|s| {
      let score = score_issue(
        s.occurrence_count,
        s.total_impact,
        variance_of(s),
        s.trend,
        severity_of(s),
      );
      (s.clone(), score)
    })
    .collect();

  ranked.sort_by(|a, b| b.1.score.cmp(&a.1.score));
  ranked
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn worked_example_scores_97_critical() {
    // occ 25 + impact 30 + variance 20 + trend 15 + severity 7 = 97.
    let s = score_issue(10, 500.0, 50.0, Trend::Increasing, Severity::High);
    assert_eq!(s.score, 97);
    assert_eq!(s.tier, PriorityTier::Critical);
  }

  #[test]
  fn every_term_caps() {
    let s =
      score_issue(1000, 100_000.0, 900.0, Trend::Increasing, Severity::Critical);
    // 25 + 30 + 20 + 15 + 10 = 100.
    assert_eq!(s.score, 100);
    assert_eq!(s.tier, PriorityTier::Critical);
  }

  #[test]
  fn nonfinite_inputs_contribute_zero() {
    let s =
      score_issue(0, f64::NAN, f64::INFINITY, Trend::Decreasing, Severity::Low);
    // 0 + 0 + 0 + 0 + 2 = 2.
    assert_eq!(s.score, 2);
    assert_eq!(s.tier, PriorityTier::Low);
  }

  #[test]
  fn tier_boundaries() {
    // Decreasing trend and Low severity pin those terms at 0 and 2.
    let with = |occ: u64, impact: f64, var: f64| {
      score_issue(occ, impact, var, Trend::Decreasing, Severity::Low)
    };
    assert_eq!(with(9, 300.0, 18.0).score, 75); // 25 + 30 + 18 + 0 + 2
    assert_eq!(with(9, 300.0, 18.0).tier, PriorityTier::Critical);
    assert_eq!(with(9, 300.0, 17.0).tier, PriorityTier::High); // 74
    assert_eq!(with(6, 300.0, 0.0).score, 50); // 18 + 30 + 0 + 0 + 2
    assert_eq!(with(6, 300.0, 0.0).tier, PriorityTier::High);
    assert_eq!(with(6, 290.0, 0.0).tier, PriorityTier::Medium); // 49
    assert_eq!(with(1, 200.0, 0.0).score, 25); // 3 + 20 + 0 + 0 + 2
    assert_eq!(with(1, 200.0, 0.0).tier, PriorityTier::Medium);
    assert_eq!(with(1, 190.0, 0.0).tier, PriorityTier::Low); // 24
  }

  fn summary(category: &str, count: u64, impact: f64, trend: Trend) -> IssueSummary {
    IssueSummary {
      category:              category.into(),
      occurrence_count:      count,
      total_impact:          impact,
      affected_machines:     vec![],
      most_affected_crew:    None,
      trend,
      previous_period_count: 0,
    }
  }

  #[test]
  fn training_priorities_filters_and_ranks() {
    let summaries = vec![
      summary("Rare", 1, 500.0, Trend::Increasing),
      summary("Cheap", 10, 10.0, Trend::Increasing),
      summary("Minor", 5, 80.0, Trend::Decreasing),
      summary("Major", 8, 400.0, Trend::Increasing),
    ];
    let settings = DetectionSettings::default();

    let ranked = training_priorities(
      &summaries,
      &settings,
      |_| 0.0,
      |_| Severity::Medium,
    );

    // "Rare" fails min_occurrences, "Cheap" fails min_total_impact.
    let names: Vec<_> = ranked.iter().map(|(s, _)| s.category.as_str()).collect();
    assert_eq!(names, ["Major", "Minor"]);
    assert!(ranked[0].1.score > ranked[1].1.score);
  }
}
