//! SQL schema for the Lineview SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS production_runs (
    run_id             TEXT PRIMARY KEY,
    machine            TEXT NOT NULL,
    date               TEXT NOT NULL,   -- ISO 8601 calendar day
    work_order         TEXT,
    good_production    REAL NOT NULL DEFAULT 0,
    production_minutes REAL NOT NULL DEFAULT 0,
    downtime_minutes   REAL NOT NULL DEFAULT 0
);

-- Events are write-once: the ingestion subsystem inserts, nothing updates.
CREATE TABLE IF NOT EXISTS events (
    event_id      TEXT PRIMARY KEY,
    issue_type    TEXT NOT NULL,       -- 'downtime' | 'spoilage'
    date          TEXT NOT NULL,       -- ISO 8601 calendar day
    machine       TEXT NOT NULL,
    category      TEXT NOT NULL DEFAULT '',  -- raw label; may be blank
    crew          TEXT,
    shift         TEXT,                -- 'day' | 'afternoon' | 'night'
    impact        REAL NOT NULL CHECK (impact >= 0),
    linked_run_id TEXT REFERENCES production_runs(run_id),
    work_order    TEXT,                -- inline label fallback
    comment       TEXT
);

CREATE TABLE IF NOT EXISTS ignore_entries (
    category      TEXT NOT NULL,
    issue_type    TEXT NOT NULL,
    scope_machine TEXT,                -- NULL = all machines
    reason        TEXT,
    created_by    TEXT NOT NULL,
    created_at    TEXT NOT NULL        -- ISO 8601 UTC; server-assigned
);

-- SQLite treats NULLs as distinct in plain UNIQUE constraints, so the
-- at-most-one-entry-per-tuple invariant needs an expression index with a
-- sentinel for the null scope.
CREATE UNIQUE INDEX IF NOT EXISTS ignore_entries_tuple_idx
    ON ignore_entries(category, issue_type, COALESCE(scope_machine, '*'));

CREATE TABLE IF NOT EXISTS settings (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS events_type_date_idx ON events(issue_type, date);
CREATE INDEX IF NOT EXISTS events_machine_idx   ON events(machine);
CREATE INDEX IF NOT EXISTS events_run_idx       ON events(linked_run_id);

PRAGMA user_version = 1;
";
