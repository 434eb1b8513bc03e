use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{schema, LedgerStore};
use crate::models::Expense;
use crate::util::parse_date;

/// Ledger kept in an SQLite file. Same full-rewrite contract as the CSV
/// ledger; the connection lives only for the duration of one call.
pub(crate) struct SqliteLedger {
    path: PathBuf,
}

impl SqliteLedger {
    pub(crate) fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)
            .with_context(|| format!("Failed to open database: {}", self.path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        migrate(&conn).context("Database migration failed")?;
        Ok(conn)
    }
}

fn migrate(conn: &Connection) -> Result<()> {
    let has_version_table: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !has_version_table {
        conn.execute_batch(schema::SCHEMA_V1)?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![schema::CURRENT_VERSION],
        )?;
        return Ok(());
    }

    let current: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);
    if current > schema::CURRENT_VERSION {
        anyhow::bail!(
            "Database schema version {current} is newer than supported version {}",
            schema::CURRENT_VERSION
        );
    }
    Ok(())
}

impl LedgerStore for SqliteLedger {
    fn load(&self) -> Result<Vec<Expense>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, date, category, amount FROM expenses ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let raw_date: Option<String> = row.get(1)?;
            let raw_amount: String = row.get(3)?;

            let date = raw_date.as_deref().and_then(parse_date);
            if date.is_none() {
                if let Some(raw) = raw_date.as_deref().filter(|d| !d.trim().is_empty()) {
                    tracing::warn!(id, date = %raw, "unparseable date treated as missing");
                }
            }
            let amount = Decimal::from_str(raw_amount.trim()).unwrap_or_else(|_| {
                tracing::warn!(id, amount = %raw_amount, "unparseable amount treated as zero");
                Decimal::ZERO
            });

            Ok(Expense {
                id,
                date,
                category: row.get(2)?,
                amount,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn save(&self, records: &[Expense]) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM expenses", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO expenses (id, date, category, amount) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for e in records {
                stmt.execute(params![
                    e.id,
                    e.date.map(|d| d.format("%Y-%m-%d").to_string()),
                    e.category,
                    e.amount.to_string(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
