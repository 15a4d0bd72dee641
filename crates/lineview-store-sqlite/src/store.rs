//! [`SqliteStore`] — the SQLite implementation of the core store traits.

use std::path::Path;

use chrono::Utc;
use lineview_core::{
  event::{Event, IssueType, MachineFilter, NewEvent, NewRun, ProductionRun},
  issue::{IgnoreEntry, NewIgnoreEntry},
  score::DetectionSettings,
  store::{CoOccurrence, EventStore, IgnoreRegistry, SettingsStore},
  window::Window,
};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    RawEvent, RawIgnoreEntry, RawRun, encode_date, encode_dt,
    encode_issue_type, encode_shift, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Lineview store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// True when `err` is SQLite rejecting a duplicate key.
fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Ingestion write path ──────────────────────────────────────────────────
  //
  // These are not part of the core traits: only the file-ingestion
  // subsystem (and tests) writes runs and events. The analytics engine is
  // read-only over this data.

  /// Persist a production run parsed from an uploaded report.
  pub async fn insert_run(&self, input: NewRun) -> Result<ProductionRun> {
    let run = ProductionRun {
      run_id:             Uuid::new_v4(),
      machine:            input.machine,
      date:               input.date,
      work_order:         input.work_order,
      good_production:    input.good_production,
      production_minutes: input.production_minutes,
      downtime_minutes:   input.downtime_minutes,
    };

    let id_str   = encode_uuid(run.run_id);
    let date_str = encode_date(run.date);
    let machine  = run.machine.clone();
    let wo       = run.work_order.clone();
    let (good, prod_min, down_min) =
      (run.good_production, run.production_minutes, run.downtime_minutes);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO production_runs (
             run_id, machine, date, work_order,
             good_production, production_minutes, downtime_minutes
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![id_str, machine, date_str, wo, good, prod_min, down_min],
        )?;
        Ok(())
      })
      .await?;

    Ok(run)
  }

  /// Persist one downtime/spoilage event. Rejects malformed input (negative
  /// or non-finite impact) before touching the database.
  pub async fn insert_event(&self, input: NewEvent) -> Result<Event> {
    input.validate()?;

    let event = Event {
      event_id:      Uuid::new_v4(),
      issue_type:    input.issue_type,
      date:          input.date,
      machine:       input.machine,
      category:      input.category,
      crew:          input.crew,
      shift:         input.shift,
      impact:        input.impact,
      linked_run_id: input.linked_run_id,
      work_order:    input.work_order,
      comment:       input.comment,
    };

    let id_str     = encode_uuid(event.event_id);
    let type_str   = encode_issue_type(event.issue_type).to_owned();
    let date_str   = encode_date(event.date);
    let machine    = event.machine.clone();
    let category   = event.category.clone();
    let crew       = event.crew.clone();
    let shift_str  = event.shift.map(encode_shift).map(str::to_owned);
    let impact     = event.impact;
    let run_id_str = event.linked_run_id.map(encode_uuid);
    let wo         = event.work_order.clone();
    let comment    = event.comment.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (
             event_id, issue_type, date, machine, category, crew, shift,
             impact, linked_run_id, work_order, comment
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id_str, type_str, date_str, machine, category, crew, shift_str,
            impact, run_id_str, wo, comment,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(event)
  }

  /// Runs for one machine within a window, oldest first. Feeds the
  /// performance-metric calculators in `lineview_core::metrics`.
  pub async fn runs_in_window(
    &self,
    machine: &str,
    window:  Window,
  ) -> Result<Vec<ProductionRun>> {
    let machine   = machine.to_owned();
    let start_str = encode_date(window.start);
    let end_str   = encode_date(window.end);

    let raws: Vec<RawRun> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT run_id, machine, date, work_order,
                  good_production, production_minutes, downtime_minutes
           FROM production_runs
           WHERE machine = ?1 AND date >= ?2 AND date <= ?3
           ORDER BY date",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![machine, start_str, end_str], |row| {
            Ok(RawRun {
              run_id:             row.get(0)?,
              machine:            row.get(1)?,
              date:               row.get(2)?,
              work_order:         row.get(3)?,
              good_production:    row.get(4)?,
              production_minutes: row.get(5)?,
              downtime_minutes:   row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRun::into_run).collect()
  }

  // ── Settings write path ───────────────────────────────────────────────────

  /// Replace the stored detection thresholds.
  pub async fn update_detection_settings(
    &self,
    settings: DetectionSettings,
  ) -> Result<()> {
    let pairs: Vec<(&'static str, String)> = vec![
      ("min_occurrences", settings.min_occurrences.to_string()),
      ("min_total_impact", settings.min_total_impact.to_string()),
      (
        "variance_threshold_pct",
        settings.variance_threshold_pct.to_string(),
      ),
      (
        "trend_increase_threshold_pct",
        settings.trend_increase_threshold_pct.to_string(),
      ),
      ("lookback_days", settings.lookback_days.to_string()),
    ];

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for (key, value) in &pairs {
          tx.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── EventStore impl ─────────────────────────────────────────────────────────

impl EventStore for SqliteStore {
  type Error = Error;

  async fn query_events(
    &self,
    issue_type: IssueType,
    window:     Window,
    filter:     &MachineFilter,
  ) -> Result<Vec<Event>> {
    let type_str  = encode_issue_type(issue_type).to_owned();
    let start_str = encode_date(window.start);
    let end_str   = encode_date(window.end);
    let machine   = match filter {
      MachineFilter::All => None,
      MachineFilter::One(m) => Some(m.clone()),
    };

    const COLUMNS: &str = "event_id, issue_type, date, machine, category, \
                           crew, shift, impact, linked_run_id, work_order, comment";
    let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<RawEvent> {
      Ok(RawEvent {
        event_id:      row.get(0)?,
        issue_type:    row.get(1)?,
        date:          row.get(2)?,
        machine:       row.get(3)?,
        category:      row.get(4)?,
        crew:          row.get(5)?,
        shift:         row.get(6)?,
        impact:        row.get(7)?,
        linked_run_id: row.get(8)?,
        work_order:    row.get(9)?,
        comment:       row.get(10)?,
      })
    };

    let raws: Vec<RawEvent> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(m) = machine {
          let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM events
             WHERE issue_type = ?1 AND date >= ?2 AND date <= ?3
               AND machine = ?4
             ORDER BY date"
          ))?;
          stmt
            .query_map(
              rusqlite::params![type_str, start_str, end_str, m],
              map_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM events
             WHERE issue_type = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date"
          ))?;
          stmt
            .query_map(rusqlite::params![type_str, start_str, end_str], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn query_by_run_ids(
    &self,
    issue_type:       IssueType,
    run_ids:          &[Uuid],
    exclude_category: &str,
  ) -> Result<Vec<CoOccurrence>> {
    if run_ids.is_empty() {
      return Ok(Vec::new());
    }

    // Params: issue type, excluded category, then one placeholder per run
    // id. Category comparison happens on the blank-resolved label so the
    // "Unknown" defaulting rule matches the engine's.
    let mut params: Vec<String> =
      vec![encode_issue_type(issue_type).to_owned(), exclude_category.to_owned()];
    params.extend(run_ids.iter().copied().map(encode_uuid));

    let placeholders: Vec<String> =
      (3..=params.len()).map(|n| format!("?{n}")).collect();
    let sql = format!(
      "SELECT COALESCE(NULLIF(TRIM(category), ''), 'Unknown') AS label,
              linked_run_id
       FROM events
       WHERE issue_type = ?1
         AND COALESCE(NULLIF(TRIM(category), ''), 'Unknown') != ?2
         AND linked_run_id IN ({})",
      placeholders.join(", ")
    );

    let rows: Vec<(String, String)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(category, run_id)| {
        Ok(CoOccurrence {
          category,
          run_id: crate::encode::decode_uuid(&run_id)?,
        })
      })
      .collect()
  }

  async fn run_labels(
    &self,
    run_ids: &[Uuid],
  ) -> Result<Vec<(Uuid, Option<String>)>> {
    if run_ids.is_empty() {
      return Ok(Vec::new());
    }

    let params: Vec<String> = run_ids.iter().copied().map(encode_uuid).collect();
    let placeholders: Vec<String> =
      (1..=params.len()).map(|n| format!("?{n}")).collect();
    let sql = format!(
      "SELECT run_id, work_order FROM production_runs
       WHERE run_id IN ({})",
      placeholders.join(", ")
    );

    let rows: Vec<(String, Option<String>)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(id, label)| Ok((crate::encode::decode_uuid(&id)?, label)))
      .collect()
  }
}

// ─── IgnoreRegistry impl ─────────────────────────────────────────────────────

impl IgnoreRegistry for SqliteStore {
  type Error = Error;

  async fn list_entries(&self, issue_type: IssueType) -> Result<Vec<IgnoreEntry>> {
    let type_str = encode_issue_type(issue_type).to_owned();

    let raws: Vec<RawIgnoreEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT category, issue_type, scope_machine, reason, created_by, created_at
           FROM ignore_entries
           WHERE issue_type = ?1
           ORDER BY created_at",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![type_str], |row| {
            Ok(RawIgnoreEntry {
              category:      row.get(0)?,
              issue_type:    row.get(1)?,
              scope_machine: row.get(2)?,
              reason:        row.get(3)?,
              created_by:    row.get(4)?,
              created_at:    row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawIgnoreEntry::into_entry).collect()
  }

  async fn insert_entry(&self, input: NewIgnoreEntry) -> Result<IgnoreEntry> {
    let entry = IgnoreEntry {
      category:      input.category,
      issue_type:    input.issue_type,
      scope_machine: input.scope_machine,
      reason:        input.reason,
      created_by:    input.created_by,
      created_at:    Utc::now(),
    };

    let category = entry.category.clone();
    let type_str = encode_issue_type(entry.issue_type).to_owned();
    let scope    = entry.scope_machine.clone();
    let reason   = entry.reason.clone();
    let by       = entry.created_by.clone();
    let at_str   = encode_dt(entry.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO ignore_entries (
             category, issue_type, scope_machine, reason, created_by, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![category, type_str, scope, reason, by, at_str],
        )?;
        Ok(())
      })
      .await;

    match inserted {
      Ok(()) => Ok(entry),
      Err(e) if is_unique_violation(&e) => Err(Error::DuplicateIgnore {
        category:      entry.category,
        issue_type:    entry.issue_type,
        scope_machine: entry.scope_machine,
      }),
      Err(e) => Err(e.into()),
    }
  }

  async fn delete_entries(
    &self,
    category:      &str,
    issue_type:    IssueType,
    scope_machine: Option<&str>,
  ) -> Result<u64> {
    let category = category.to_owned();
    let type_str = encode_issue_type(issue_type).to_owned();
    let scope    = scope_machine.map(str::to_owned);

    // Same null-or-equal rule as `lineview_core::issue::suppresses`:
    // deleting for the all-machines view removes only null-scope entries;
    // deleting for one machine removes whatever suppresses that machine.
    let deleted = self
      .conn
      .call(move |conn| {
        let n = if let Some(m) = scope {
          conn.execute(
            "DELETE FROM ignore_entries
             WHERE category = ?1 AND issue_type = ?2
               AND (scope_machine IS NULL OR scope_machine = ?3)",
            rusqlite::params![category, type_str, m],
          )?
        } else {
          conn.execute(
            "DELETE FROM ignore_entries
             WHERE category = ?1 AND issue_type = ?2
               AND scope_machine IS NULL",
            rusqlite::params![category, type_str],
          )?
        };
        Ok(n)
      })
      .await?;

    Ok(deleted as u64)
  }
}

// ─── SettingsStore impl ──────────────────────────────────────────────────────

fn parse_setting<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
  value.parse().map_err(|_| Error::SettingsParse {
    key:   key.to_owned(),
    value: value.to_owned(),
  })
}

impl SettingsStore for SqliteStore {
  type Error = Error;

  async fn detection_settings(&self) -> Result<DetectionSettings> {
    let pairs: Vec<(String, String)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut settings = DetectionSettings::default();
    for (key, value) in pairs {
      match key.as_str() {
        "min_occurrences" => {
          settings.min_occurrences = parse_setting(&key, &value)?;
        }
        "min_total_impact" => {
          settings.min_total_impact = parse_setting(&key, &value)?;
        }
        "variance_threshold_pct" => {
          settings.variance_threshold_pct = parse_setting(&key, &value)?;
        }
        "trend_increase_threshold_pct" => {
          settings.trend_increase_threshold_pct = parse_setting(&key, &value)?;
        }
        "lookback_days" => {
          settings.lookback_days = parse_setting(&key, &value)?;
        }
        // Unknown keys belong to other subsystems (per-machine targets).
        _ => {}
      }
    }
    Ok(settings)
  }
}
