use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::debug;

/// One schema revision: a stable name plus the SQL it applies.
pub(crate) struct Migration {
    pub name: &'static str,
    pub sql: &'static str,
}

/// Ordered, append-only journal of schema revisions. New revisions go at
/// the end; existing entries must never be edited or reordered, since the
/// applied-set is keyed by name.
pub(crate) const JOURNAL: &[Migration] = &[
    Migration {
        name: "0001_create_subscriptions",
        sql: r#"
CREATE TABLE IF NOT EXISTS subscriptions (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    amount     TEXT NOT NULL CHECK (CAST(amount AS REAL) >= 0),
    category   TEXT,
    cycle      TEXT NOT NULL DEFAULT 'Monthly',
    next_due   TEXT NOT NULL,
    notes      TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_subscriptions_next_due ON subscriptions(next_due);
CREATE INDEX IF NOT EXISTS idx_subscriptions_category ON subscriptions(category);
"#,
    },
    Migration {
        name: "0002_add_currency",
        sql: "ALTER TABLE subscriptions ADD COLUMN currency TEXT NOT NULL DEFAULT 'USD';",
    },
    Migration {
        name: "0003_add_icon",
        sql: "ALTER TABLE subscriptions ADD COLUMN icon TEXT;",
    },
];

const LEDGER_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_migrations (
    name       TEXT PRIMARY KEY,
    applied_at TEXT NOT NULL
);";

/// Replay the journal against `conn`: every revision not yet recorded in
/// `schema_migrations` is executed in journal order and then recorded.
/// Stops at the first failing revision without recording it; already-applied
/// revisions are never re-run.
pub(crate) fn apply_all(conn: &Connection, journal: &[Migration]) -> Result<usize> {
    conn.execute_batch(LEDGER_SQL)
        .context("Failed to create migration ledger")?;

    let mut applied = 0;
    for migration in journal {
        let done: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE name = ?1)",
            params![migration.name],
            |row| row.get(0),
        )?;
        if done {
            continue;
        }

        debug!(name = migration.name, "applying migration");
        conn.execute_batch(migration.sql)
            .with_context(|| format!("Migration '{}' failed", migration.name))?;
        conn.execute(
            "INSERT INTO schema_migrations (name, applied_at) VALUES (?1, ?2)",
            params![migration.name, chrono::Utc::now().to_rfc3339()],
        )?;
        applied += 1;
    }

    Ok(applied)
}

/// Names of revisions recorded as applied, in application order.
#[cfg(test)]
pub(crate) fn applied_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM schema_migrations ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}
