mod migrations;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::models::{BillingCycle, Subscription};

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let applied = migrations::apply_all(&conn, migrations::JOURNAL)
            .context("Database migration failed")?;
        if applied > 0 {
            debug!(applied, "schema migrations applied");
        }
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        migrations::apply_all(&conn, migrations::JOURNAL)?;
        Ok(Self { conn })
    }

    // ── Subscriptions ─────────────────────────────────────────

    pub(crate) fn insert_subscription(&self, sub: &Subscription) -> Result<i64> {
        validate_amount(sub)?;
        self.conn.execute(
            "INSERT INTO subscriptions (name, amount, category, cycle, next_due, currency, icon, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                sub.name,
                sub.amount.to_string(),
                sub.category,
                sub.cycle.as_str(),
                sub.next_due,
                sub.currency,
                sub.icon,
                sub.notes,
                sub.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_subscriptions(&self) -> Result<Vec<Subscription>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, amount, category, cycle, next_due, currency, icon, notes, created_at
             FROM subscriptions ORDER BY next_due, name",
        )?;
        let rows = stmt.query_map([], row_to_subscription)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_subscription_by_id(&self, id: i64) -> Result<Option<Subscription>> {
        let result = self.conn.query_row(
            "SELECT id, name, amount, category, cycle, next_due, currency, icon, notes, created_at
             FROM subscriptions WHERE id = ?1",
            params![id],
            row_to_subscription,
        );
        match result {
            Ok(sub) => Ok(Some(sub)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Full-row update keyed by id. The id itself never changes.
    pub(crate) fn update_subscription(&self, sub: &Subscription) -> Result<()> {
        let id = sub
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update a subscription without an ID"))?;
        validate_amount(sub)?;
        let changed = self.conn.execute(
            "UPDATE subscriptions
             SET name = ?1, amount = ?2, category = ?3, cycle = ?4, next_due = ?5,
                 currency = ?6, icon = ?7, notes = ?8
             WHERE id = ?9",
            params![
                sub.name,
                sub.amount.to_string(),
                sub.category,
                sub.cycle.as_str(),
                sub.next_due,
                sub.currency,
                sub.icon,
                sub.notes,
                id,
            ],
        )?;
        if changed == 0 {
            anyhow::bail!("No subscription with ID {id}");
        }
        Ok(())
    }

    pub(crate) fn delete_subscription(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM subscriptions WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Subscriptions whose next billing date falls on or before `date`
    /// (YYYY-MM-DD), soonest first.
    pub(crate) fn get_due_by(&self, date: &str) -> Result<Vec<Subscription>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, amount, category, cycle, next_due, currency, icon, notes, created_at
             FROM subscriptions WHERE next_due <= ?1 ORDER BY next_due, name",
        )?;
        let rows = stmt.query_map(params![date], row_to_subscription)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_subscription_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM subscriptions", [], |row| row.get(0))?)
    }
}

fn validate_amount(sub: &Subscription) -> Result<()> {
    if sub.amount < Decimal::ZERO {
        anyhow::bail!("Amount must be non-negative: {}", sub.amount);
    }
    Ok(())
}

fn row_to_subscription(row: &Row<'_>) -> rusqlite::Result<Subscription> {
    let amount_str: String = row.get(2)?;
    Ok(Subscription {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        amount: Decimal::from_str(&amount_str).unwrap_or_default(),
        category: row.get(3)?,
        cycle: BillingCycle::parse(&row.get::<_, String>(4)?),
        next_due: row.get(5)?,
        currency: row.get(6)?,
        icon: row.get(7)?,
        notes: row.get(8)?,
        created_at: row.get(9)?,
    })
}
