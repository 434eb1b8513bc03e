mod csv_file;
mod schema;
mod sqlite;

use anyhow::{anyhow, Result};
use std::path::Path;

use crate::models::{Expense, NewExpense};

pub(crate) use csv_file::CsvLedger;
pub(crate) use sqlite::SqliteLedger;

/// Durable backing for the ledger. Every mutation is a full
/// load → modify → save cycle; implementations do no locking.
pub(crate) trait LedgerStore: Send + Sync {
    /// Read every record, creating an empty backing file if none exists.
    fn load(&self) -> Result<Vec<Expense>>;

    /// Replace the backing file's contents with `records`.
    fn save(&self, records: &[Expense]) -> Result<()>;

    fn describe(&self) -> String;
}

/// Pick a backend from the file extension: SQLite for `.db`, `.sqlite` and
/// `.sqlite3`, CSV for everything else.
pub(crate) fn open_store(path: &Path) -> Box<dyn LedgerStore> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "db" | "sqlite" | "sqlite3" => Box::new(SqliteLedger::new(path)),
        _ => Box::new(CsvLedger::new(path)),
    }
}

/// The ID the next inserted record receives: one past the highest in use.
/// Fails once the highest ID is `i64::MAX`.
pub(crate) fn next_id(records: &[Expense]) -> Result<i64> {
    match records.iter().map(|e| e.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| anyhow!("No expense IDs left after {max}")),
    }
}

pub(crate) fn insert(records: &mut Vec<Expense>, new: NewExpense) -> Result<i64> {
    let id = next_id(records)?;
    records.push(new.into_expense(id));
    Ok(id)
}

/// Remove the record with `id`. Returns whether anything was removed;
/// an unknown ID is not an error.
pub(crate) fn delete(records: &mut Vec<Expense>, id: i64) -> bool {
    let before = records.len();
    records.retain(|e| e.id != id);
    records.len() != before
}
