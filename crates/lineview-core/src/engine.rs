//! The recurring-issue analytics engine: windowed aggregation and the
//! investigation drill-down.
//!
//! Both operations are stateless computations over data fetched fresh on
//! each call, generic over the store traits. A store failure aborts the
//! whole operation — partial results are never returned as final.

use uuid::Uuid;

use crate::{
  Error, Result,
  event::{Event, IssueType, MachineFilter},
  investigation::{
    CrewImpact, Investigation, OccurrenceDetail, RelatedIssue, ShiftCount,
    ShiftPattern,
  },
  issue::{IssueReport, IssueSummary, classify_trend, partition_issues},
  store::{EventStore, IgnoreRegistry},
  window::Window,
};

/// Co-occurring categories returned per investigation.
const RELATED_ISSUE_LIMIT: usize = 5;

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Per-category accumulator. Kept in a first-seen-ordered `Vec` rather than
/// a hash map so tie-breaks and output order are deterministic (categories
/// are free text, not a closed enumeration).
struct CategoryAcc {
  category:     String,
  count:        u64,
  total_impact: f64,
  machines:     Vec<String>,
  crews:        Vec<(String, u64)>,
}

fn accumulate(events: &[Event]) -> Vec<CategoryAcc> {
  let mut accs: Vec<CategoryAcc> = Vec::new();

  for event in events {
    let label = event.category_label();
    let acc = match accs.iter_mut().find(|a| a.category == label) {
      Some(a) => a,
      None => {
        accs.push(CategoryAcc {
          category:     label.to_owned(),
          count:        0,
          total_impact: 0.0,
          machines:     Vec::new(),
          crews:        Vec::new(),
        });
        accs.last_mut().unwrap()
      }
    };

    acc.count += 1;
    acc.total_impact += event.impact;

    if !event.machine.trim().is_empty()
      && !acc.machines.iter().any(|m| m == &event.machine)
    {
      acc.machines.push(event.machine.clone());
    }

    if let Some(crew) = event.crew_label() {
      match acc.crews.iter_mut().find(|(c, _)| c == crew) {
        Some((_, n)) => *n += 1,
        None => acc.crews.push((crew.to_owned(), 1)),
      }
    }
  }

  accs
}

/// Occurrence count per category; used for the prior-period comparison.
fn tally_categories(events: &[Event]) -> Vec<(String, u64)> {
  let mut counts: Vec<(String, u64)> = Vec::new();
  for event in events {
    let label = event.category_label();
    match counts.iter_mut().find(|(c, _)| c == label) {
      Some((_, n)) => *n += 1,
      None => counts.push((label.to_owned(), 1)),
    }
  }
  counts
}

/// Crew with the highest count; first-seen wins ties, so a strictly-greater
/// comparison over the first-seen-ordered tally is enough.
fn most_affected_crew(crews: &[(String, u64)]) -> Option<String> {
  let mut best: Option<&(String, u64)> = None;
  for entry in crews {
    if best.is_none_or(|b| entry.1 > b.1) {
      best = Some(entry);
    }
  }
  best.map(|(crew, _)| crew.clone())
}

/// Aggregate one window of events into per-category summaries, classify
/// each against the equal-length prior window, and split the result with
/// the ignore overlay.
///
/// Both output sets are sorted by occurrence count descending; equal counts
/// keep first-seen category order (stable sort).
pub async fn aggregate_issues<S, R>(
  store:      &S,
  registry:   &R,
  issue_type: IssueType,
  window:     Window,
  filter:     &MachineFilter,
) -> Result<IssueReport>
where
  S: EventStore,
  R: IgnoreRegistry,
{
  let current = store
    .query_events(issue_type, window, filter)
    .await
    .map_err(Error::store)?;
  let previous = store
    .query_events(issue_type, window.previous(), filter)
    .await
    .map_err(Error::store)?;

  let previous_counts = tally_categories(&previous);
  let prior_count = |category: &str| -> u64 {
    previous_counts
      .iter()
      .find(|(c, _)| c == category)
      .map_or(0, |(_, n)| *n)
  };

  let mut summaries: Vec<IssueSummary> = accumulate(&current)
    .into_iter()
    .map(|acc| {
      let previous_period_count = prior_count(&acc.category);
      IssueSummary {
        trend: classify_trend(acc.count, previous_period_count),
        most_affected_crew: most_affected_crew(&acc.crews),
        category: acc.category,
        occurrence_count: acc.count,
        total_impact: acc.total_impact,
        affected_machines: acc.machines,
        previous_period_count,
      }
    })
    .collect();

  summaries.sort_by(|a, b| b.occurrence_count.cmp(&a.occurrence_count));

  let entries = registry
    .list_entries(issue_type)
    .await
    .map_err(Error::store)?;
  let (active, ignored) = partition_issues(summaries, &entries, filter);

  Ok(IssueReport { active, ignored })
}

// ─── Investigation ───────────────────────────────────────────────────────────

/// Deep drill-down for one category: raw occurrences newest first, crew and
/// shift breakdowns, and co-occurring categories across both event types.
///
/// Returns `Ok(None)` when no event matches — an empty result, not an
/// error; the caller's aggregate view is unaffected.
pub async fn investigate<S>(
  store:      &S,
  category:   &str,
  issue_type: IssueType,
  window:     Window,
  filter:     &MachineFilter,
) -> Result<Option<Investigation>>
where
  S: EventStore,
{
  let mut events: Vec<Event> = store
    .query_events(issue_type, window, filter)
    .await
    .map_err(Error::store)?
    .into_iter()
    .filter(|e| e.category_label() == category)
    .collect();

  if events.is_empty() {
    return Ok(None);
  }

  events.sort_by(|a, b| b.date.cmp(&a.date));

  // Distinct linked run ids, in occurrence order.
  let run_ids: Vec<Uuid> = {
    let mut ids = Vec::new();
    for id in events.iter().filter_map(|e| e.linked_run_id) {
      if !ids.contains(&id) {
        ids.push(id);
      }
    }
    ids
  };

  let labels: Vec<(Uuid, Option<String>)> = if run_ids.is_empty() {
    Vec::new()
  } else {
    store.run_labels(&run_ids).await.map_err(Error::store)?
  };
  let label_of = |id: Uuid| -> Option<String> {
    labels
      .iter()
      .find(|(rid, _)| *rid == id)
      .and_then(|(_, label)| label.clone())
  };

  let occurrences: Vec<OccurrenceDetail> = events
    .iter()
    .map(|e| OccurrenceDetail {
      date:       e.date,
      machine:    e.machine.clone(),
      crew:       e.crew_label().map(str::to_owned),
      shift:      e.shift,
      impact:     e.impact,
      work_order: e
        .linked_run_id
        .and_then(|id| label_of(id))
        .or_else(|| e.work_order.clone()),
      comment:    e.comment.clone(),
    })
    .collect();

  let crew_breakdown = crew_breakdown(&events);
  let shift_pattern = shift_pattern(&events);
  let related_issues =
    related_issues(store, category, issue_type, &run_ids).await?;

  Ok(Some(Investigation {
    category: category.to_owned(),
    issue_type,
    window,
    occurrences,
    crew_breakdown,
    shift_pattern,
    related_issues,
  }))
}

fn crew_breakdown(events: &[Event]) -> Vec<CrewImpact> {
  let mut breakdown: Vec<CrewImpact> = Vec::new();
  for event in events {
    let Some(crew) = event.crew_label() else { continue };
    match breakdown.iter_mut().find(|c| c.crew == crew) {
      Some(c) => {
        c.count += 1;
        c.total_impact += event.impact;
      }
      None => breakdown.push(CrewImpact {
        crew:         crew.to_owned(),
        count:        1,
        total_impact: event.impact,
      }),
    }
  }
  breakdown.sort_by(|a, b| b.count.cmp(&a.count));
  breakdown
}

fn shift_pattern(events: &[Event]) -> ShiftPattern {
  let mut histogram: Vec<ShiftCount> = Vec::new();
  for event in events {
    let Some(shift) = event.shift else { continue };
    match histogram.iter_mut().find(|s| s.shift == shift) {
      Some(s) => s.count += 1,
      None => histogram.push(ShiftCount { shift, count: 1 }),
    }
  }
  histogram.sort_by(|a, b| b.count.cmp(&a.count));
  ShiftPattern {
    most_common: histogram.first().map(|s| s.shift),
    histogram,
  }
}

/// Tally co-occurring categories across the same and the opposite event
/// type, then keep the top entries by count (ties first-seen).
async fn related_issues<S>(
  store:      &S,
  category:   &str,
  issue_type: IssueType,
  run_ids:    &[Uuid],
) -> Result<Vec<RelatedIssue>>
where
  S: EventStore,
{
  if run_ids.is_empty() {
    return Ok(Vec::new());
  }

  let same = store
    .query_by_run_ids(issue_type, run_ids, category)
    .await
    .map_err(Error::store)?;
  let opposite = store
    .query_by_run_ids(issue_type.other(), run_ids, category)
    .await
    .map_err(Error::store)?;

  let mut related: Vec<RelatedIssue> = Vec::new();
  for hit in same.into_iter().chain(opposite) {
    match related.iter_mut().find(|r| r.category == hit.category) {
      Some(r) => r.count += 1,
      None => related.push(RelatedIssue { category: hit.category, count: 1 }),
    }
  }
  related.sort_by(|a, b| b.count.cmp(&a.count));
  related.truncate(RELATED_ISSUE_LIMIT);
  Ok(related)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use std::convert::Infallible;

  use super::*;
  use crate::{
    event::Shift,
    issue::{IgnoreEntry, NewIgnoreEntry, Trend},
    store::{CoOccurrence, ConflictError},
  };

  impl ConflictError for Infallible {
    fn is_conflict(&self) -> bool {
      false
    }
  }

  /// Fixed in-memory fixture implementing the store traits.
  #[derive(Default)]
  struct MemStore {
    events:  Vec<Event>,
    entries: Vec<IgnoreEntry>,
    labels:  Vec<(Uuid, Option<String>)>,
  }

  impl EventStore for MemStore {
    type Error = Infallible;

    async fn query_events(
      &self,
      issue_type: IssueType,
      window:     Window,
      filter:     &MachineFilter,
    ) -> Result<Vec<Event>, Infallible> {
      Ok(
        self
          .events
          .iter()
          .filter(|e| {
            e.issue_type == issue_type
              && e.date >= window.start
              && e.date <= window.end
              && filter.matches(&e.machine)
          })
          .cloned()
          .collect(),
      )
    }

    async fn query_by_run_ids(
      &self,
      issue_type:       IssueType,
      run_ids:          &[Uuid],
      exclude_category: &str,
    ) -> Result<Vec<CoOccurrence>, Infallible> {
      Ok(
        self
          .events
          .iter()
          .filter(|e| {
            e.issue_type == issue_type
              && e.category_label() != exclude_category
              && e.linked_run_id.is_some_and(|id| run_ids.contains(&id))
          })
          .map(|e| CoOccurrence {
            category: e.category_label().to_owned(),
            run_id:   e.linked_run_id.unwrap(),
          })
          .collect(),
      )
    }

    async fn run_labels(
      &self,
      run_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, Option<String>)>, Infallible> {
      Ok(
        self
          .labels
          .iter()
          .filter(|(id, _)| run_ids.contains(id))
          .cloned()
          .collect(),
      )
    }
  }

  impl IgnoreRegistry for MemStore {
    type Error = Infallible;

    async fn list_entries(
      &self,
      issue_type: IssueType,
    ) -> Result<Vec<IgnoreEntry>, Infallible> {
      Ok(
        self
          .entries
          .iter()
          .filter(|e| e.issue_type == issue_type)
          .cloned()
          .collect(),
      )
    }

    async fn insert_entry(
      &self,
      _entry: NewIgnoreEntry,
    ) -> Result<IgnoreEntry, Infallible> {
      unimplemented!("engine tests never insert")
    }

    async fn delete_entries(
      &self,
      _category:      &str,
      _issue_type:    IssueType,
      _scope_machine: Option<&str>,
    ) -> Result<u64, Infallible> {
      unimplemented!("engine tests never delete")
    }
  }

  fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
  }

  fn window() -> Window {
    Window::new(d("2024-03-01"), d("2024-03-30")).unwrap()
  }

  struct EventSpec<'a> {
    date:     &'a str,
    machine:  &'a str,
    category: &'a str,
    crew:     Option<&'a str>,
    shift:    Option<Shift>,
    impact:   f64,
    run:      Option<Uuid>,
  }

  fn event(issue_type: IssueType, spec: EventSpec<'_>) -> Event {
    Event {
      event_id: Uuid::new_v4(),
      issue_type,
      date: d(spec.date),
      machine: spec.machine.into(),
      category: spec.category.into(),
      crew: spec.crew.map(Into::into),
      shift: spec.shift,
      impact: spec.impact,
      linked_run_id: spec.run,
      work_order: None,
      comment: None,
    }
  }

  fn downtime(
    date:     &str,
    machine:  &str,
    category: &str,
    crew:     Option<&str>,
    impact:   f64,
  ) -> Event {
    event(IssueType::Downtime, EventSpec {
      date,
      machine,
      category,
      crew,
      shift: None,
      impact,
      run: None,
    })
  }

  // ── Aggregation ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn aggregates_counts_impact_machines_and_crew() {
    let store = MemStore {
      events: vec![
        downtime("2024-03-05", "CP01", "Web Break", Some("A"), 10.0),
        downtime("2024-03-06", "CP02", "Web Break", Some("B"), 20.0),
        downtime("2024-03-07", "CP01", "Web Break", Some("B"), 5.0),
        downtime("2024-03-08", "CP01", "Jam", Some("A"), 7.5),
      ],
      ..Default::default()
    };

    let report = aggregate_issues(
      &store,
      &store,
      IssueType::Downtime,
      window(),
      &MachineFilter::All,
    )
    .await
    .unwrap();

    assert_eq!(report.active.len(), 2);
    assert!(report.ignored.is_empty());

    let web = &report.active[0];
    assert_eq!(web.category, "Web Break");
    assert_eq!(web.occurrence_count, 3);
    assert_eq!(web.total_impact, 35.0);
    assert_eq!(web.affected_machines, ["CP01", "CP02"]);
    // Crew B has 2 of 3 events.
    assert_eq!(web.most_affected_crew.as_deref(), Some("B"));
    // No prior-period events at all.
    assert_eq!(web.previous_period_count, 0);
    assert_eq!(web.trend, Trend::Increasing);
  }

  #[tokio::test]
  async fn blank_category_becomes_unknown() {
    let store = MemStore {
      events: vec![
        downtime("2024-03-05", "CP01", "", None, 1.0),
        downtime("2024-03-06", "CP01", "  ", None, 2.0),
      ],
      ..Default::default()
    };

    let report = aggregate_issues(
      &store,
      &store,
      IssueType::Downtime,
      window(),
      &MachineFilter::All,
    )
    .await
    .unwrap();

    assert_eq!(report.active.len(), 1);
    assert_eq!(report.active[0].category, "Unknown");
    assert_eq!(report.active[0].occurrence_count, 2);
  }

  #[tokio::test]
  async fn crew_tie_resolves_first_seen() {
    let store = MemStore {
      events: vec![
        downtime("2024-03-05", "CP01", "Jam", Some("B"), 1.0),
        downtime("2024-03-06", "CP01", "Jam", Some("A"), 1.0),
      ],
      ..Default::default()
    };

    let report = aggregate_issues(
      &store,
      &store,
      IssueType::Downtime,
      window(),
      &MachineFilter::All,
    )
    .await
    .unwrap();

    assert_eq!(report.active[0].most_affected_crew.as_deref(), Some("B"));
  }

  #[tokio::test]
  async fn trend_uses_prior_equal_length_window() {
    // Current window: 12 occurrences. Prior window (Jan 31 – Feb 29): 10.
    let mut events = Vec::new();
    for day in 1..=12 {
      events.push(downtime(
        &format!("2024-03-{day:02}"),
        "CP01",
        "Web Break",
        None,
        1.0,
      ));
    }
    for day in 1..=10 {
      events.push(downtime(
        &format!("2024-02-{day:02}"),
        "CP01",
        "Web Break",
        None,
        1.0,
      ));
    }

    let store = MemStore { events, ..Default::default() };
    let report = aggregate_issues(
      &store,
      &store,
      IssueType::Downtime,
      window(),
      &MachineFilter::All,
    )
    .await
    .unwrap();

    let web = &report.active[0];
    assert_eq!(web.occurrence_count, 12);
    assert_eq!(web.previous_period_count, 10);
    // +20% clears the ±10% band.
    assert_eq!(web.trend, Trend::Increasing);
  }

  #[tokio::test]
  async fn sorted_by_count_descending() {
    let store = MemStore {
      events: vec![
        downtime("2024-03-05", "CP01", "Rare", None, 1.0),
        downtime("2024-03-05", "CP01", "Common", None, 1.0),
        downtime("2024-03-06", "CP01", "Common", None, 1.0),
      ],
      ..Default::default()
    };

    let report = aggregate_issues(
      &store,
      &store,
      IssueType::Downtime,
      window(),
      &MachineFilter::All,
    )
    .await
    .unwrap();

    let names: Vec<_> =
      report.active.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, ["Common", "Rare"]);
  }

  fn ignore(category: &str, scope: Option<&str>) -> IgnoreEntry {
    IgnoreEntry {
      category:      category.into(),
      issue_type:    IssueType::Downtime,
      scope_machine: scope.map(Into::into),
      reason:        None,
      created_by:    "op1".into(),
      created_at:    chrono::Utc::now(),
    }
  }

  #[tokio::test]
  async fn null_scope_entry_suppresses_all_views() {
    let store = MemStore {
      events:  vec![downtime("2024-03-05", "CP01", "Web Break", None, 1.0)],
      entries: vec![ignore("Web Break", None)],
      ..Default::default()
    };

    for filter in [MachineFilter::All, MachineFilter::One("CP01".into())] {
      let report = aggregate_issues(
        &store,
        &store,
        IssueType::Downtime,
        window(),
        &filter,
      )
      .await
      .unwrap();
      assert!(report.active.is_empty());
      assert_eq!(report.ignored.len(), 1);
      assert_eq!(report.ignored[0].category, "Web Break");
    }
  }

  #[tokio::test]
  async fn machine_scoped_entry_never_suppresses_all_view() {
    let store = MemStore {
      events:  vec![
        downtime("2024-03-05", "CP01", "Web Break", None, 1.0),
        downtime("2024-03-05", "CP02", "Web Break", None, 1.0),
      ],
      entries: vec![ignore("Web Break", Some("CP01"))],
      ..Default::default()
    };

    // Aggregate view: visible.
    let all = aggregate_issues(
      &store,
      &store,
      IssueType::Downtime,
      window(),
      &MachineFilter::All,
    )
    .await
    .unwrap();
    assert_eq!(all.active.len(), 1);

    // CP01 view: suppressed.
    let cp01 = aggregate_issues(
      &store,
      &store,
      IssueType::Downtime,
      window(),
      &MachineFilter::One("CP01".into()),
    )
    .await
    .unwrap();
    assert!(cp01.active.is_empty());
    assert_eq!(cp01.ignored.len(), 1);

    // CP02 view: visible.
    let cp02 = aggregate_issues(
      &store,
      &store,
      IssueType::Downtime,
      window(),
      &MachineFilter::One("CP02".into()),
    )
    .await
    .unwrap();
    assert_eq!(cp02.active.len(), 1);
  }

  // ── Investigation ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn no_occurrences_is_empty_result() {
    let store = MemStore::default();
    let result = investigate(
      &store,
      "Web Break",
      IssueType::Downtime,
      window(),
      &MachineFilter::All,
    )
    .await
    .unwrap();
    assert!(result.is_none());
  }

  #[tokio::test]
  async fn occurrences_newest_first_with_label_fallback() {
    let run = Uuid::new_v4();
    let mut labelled = event(IssueType::Downtime, EventSpec {
      date:     "2024-03-05",
      machine:  "CP01",
      category: "Web Break",
      crew:     Some("A"),
      shift:    Some(Shift::Day),
      impact:   10.0,
      run:      Some(run),
    });
    labelled.work_order = Some("inline-ignored".into());

    let mut inline_only = downtime("2024-03-09", "CP01", "Web Break", None, 4.0);
    inline_only.work_order = Some("WO-777".into());

    let store = MemStore {
      events: vec![labelled, inline_only],
      labels: vec![(run, Some("WO-123".into()))],
      ..Default::default()
    };

    let inv = investigate(
      &store,
      "Web Break",
      IssueType::Downtime,
      window(),
      &MachineFilter::All,
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(inv.occurrences.len(), 2);
    // Newest first.
    assert_eq!(inv.occurrences[0].date, d("2024-03-09"));
    // Inline work order when no run resolves; run label wins otherwise.
    assert_eq!(inv.occurrences[0].work_order.as_deref(), Some("WO-777"));
    assert_eq!(inv.occurrences[1].work_order.as_deref(), Some("WO-123"));
  }

  #[tokio::test]
  async fn crew_and_shift_breakdowns() {
    let mk = |date: &str, crew: Option<&str>, shift: Option<Shift>| {
      event(IssueType::Downtime, EventSpec {
        date,
        machine: "CP01",
        category: "Jam",
        crew,
        shift,
        impact: 2.0,
        run: None,
      })
    };
    let store = MemStore {
      events: vec![
        mk("2024-03-01", Some("A"), Some(Shift::Night)),
        mk("2024-03-02", Some("B"), Some(Shift::Night)),
        mk("2024-03-03", Some("B"), Some(Shift::Day)),
        mk("2024-03-04", None, None),
      ],
      ..Default::default()
    };

    let inv = investigate(
      &store,
      "Jam",
      IssueType::Downtime,
      window(),
      &MachineFilter::All,
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(inv.crew_breakdown.len(), 2);
    assert_eq!(inv.crew_breakdown[0].crew, "B");
    assert_eq!(inv.crew_breakdown[0].count, 2);
    assert_eq!(inv.crew_breakdown[0].total_impact, 4.0);

    assert_eq!(inv.shift_pattern.most_common, Some(Shift::Night));
    assert_eq!(inv.shift_pattern.histogram.len(), 2);
    assert_eq!(inv.shift_pattern.histogram[0].count, 2);
  }

  #[tokio::test]
  async fn shiftless_category_has_no_most_common() {
    let store = MemStore {
      events: vec![downtime("2024-03-04", "CP01", "Jam", None, 1.0)],
      ..Default::default()
    };
    let inv = investigate(
      &store,
      "Jam",
      IssueType::Downtime,
      window(),
      &MachineFilter::All,
    )
    .await
    .unwrap()
    .unwrap();
    assert!(inv.shift_pattern.most_common.is_none());
    assert!(inv.shift_pattern.histogram.is_empty());
  }

  #[tokio::test]
  async fn related_issues_span_both_types_capped_at_five() {
    let run = Uuid::new_v4();
    let linked = |issue_type, category: &str| {
      event(issue_type, EventSpec {
        date: "2024-03-10",
        machine: "CP01",
        category,
        crew: None,
        shift: None,
        impact: 1.0,
        run: Some(run),
      })
    };

    let mut events = vec![linked(IssueType::Downtime, "Web Break")];
    // Six distinct other categories sharing the run: five downtime, one
    // spoilage with two hits so it must rank first.
    for name in ["C1", "C2", "C3", "C4", "C5"] {
      events.push(linked(IssueType::Downtime, name));
    }
    events.push(linked(IssueType::Spoilage, "Seal Fail"));
    events.push(linked(IssueType::Spoilage, "Seal Fail"));

    let store = MemStore { events, ..Default::default() };
    let inv = investigate(
      &store,
      "Web Break",
      IssueType::Downtime,
      window(),
      &MachineFilter::All,
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(inv.related_issues.len(), 5);
    // Never lists the investigated category.
    assert!(inv.related_issues.iter().all(|r| r.category != "Web Break"));
    // The cross-type category with two hits ranks first.
    assert_eq!(inv.related_issues[0].category, "Seal Fail");
    assert_eq!(inv.related_issues[0].count, 2);
  }

  #[tokio::test]
  async fn machine_filter_scopes_investigation() {
    let store = MemStore {
      events: vec![
        downtime("2024-03-05", "CP01", "Jam", None, 1.0),
        downtime("2024-03-06", "CP02", "Jam", None, 1.0),
      ],
      ..Default::default()
    };

    let inv = investigate(
      &store,
      "Jam",
      IssueType::Downtime,
      window(),
      &MachineFilter::One("CP02".into()),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(inv.occurrences.len(), 1);
    assert_eq!(inv.occurrences[0].machine, "CP02");
  }
}
