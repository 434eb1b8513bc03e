use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use super::LedgerStore;
use crate::models::Expense;
use crate::util::{parse_date, parse_decimal};

const HEADER: [&str; 4] = ["ID", "Date", "Category", "Amount"];

/// Ledger kept as a comma-separated file with an `ID,Date,Category,Amount`
/// header row.
pub(crate) struct CsvLedger {
    path: PathBuf,
}

/// Where each known column sits in the file. Files written by hand or by
/// older versions may reorder or omit columns.
#[derive(Debug, Default)]
struct ColumnMap {
    id: Option<usize>,
    date: Option<usize>,
    category: Option<usize>,
    amount: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut map = Self::default();
        for (i, name) in headers.iter().enumerate() {
            match name.trim().to_lowercase().as_str() {
                "id" => map.id = Some(i),
                "date" => map.date = Some(i),
                "category" => map.category = Some(i),
                "amount" => map.amount = Some(i),
                _ => {}
            }
        }
        map
    }
}

impl CsvLedger {
    pub(crate) fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn create_empty(&self) -> Result<()> {
        tracing::info!(path = %self.path.display(), "creating empty ledger");
        self.save(&[])
    }
}

impl LedgerStore for CsvLedger {
    fn load(&self) -> Result<Vec<Expense>> {
        if !self.path.exists() {
            self.create_empty()?;
            return Ok(Vec::new());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open ledger: {}", self.path.display()))?;

        let columns = ColumnMap::from_headers(rdr.headers().context("Failed to read CSV header")?);
        let rows = rdr
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to read CSV record")?;

        parse_rows(&rows, &columns)
    }

    fn save(&self, records: &[Expense]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to write ledger: {}", self.path.display()))?;

        wtr.write_record(HEADER)?;
        for e in records {
            let date = e
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            wtr.write_record([
                e.id.to_string(),
                date,
                e.category.clone(),
                e.amount.to_string(),
            ])?;
        }
        wtr.flush()
            .with_context(|| format!("Failed to flush ledger: {}", self.path.display()))?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

fn parse_rows(rows: &[csv::StringRecord], columns: &ColumnMap) -> Result<Vec<Expense>> {
    let field = |row: &csv::StringRecord, col: Option<usize>| -> String {
        col.and_then(|c| row.get(c))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let mut expenses = Vec::with_capacity(rows.len());
    let mut missing_ids = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let line = i + 2;

        let id = match columns.id {
            // Legacy files have no ID column: number rows in file order.
            None => Some(i as i64 + 1),
            Some(_) => {
                let raw = field(row, columns.id);
                let parsed = raw.parse::<i64>().ok().filter(|id| *id > 0);
                if parsed.is_none() {
                    tracing::warn!(line, id = %raw, "unusable ID, assigning a new one");
                }
                parsed
            }
        };

        let raw_date = field(row, columns.date);
        let date = parse_date(&raw_date);
        if date.is_none() && !raw_date.is_empty() {
            tracing::warn!(line, date = %raw_date, "unparseable date treated as missing");
        }

        let raw_amount = field(row, columns.amount);
        let amount = parse_decimal(&raw_amount).unwrap_or_else(|_| {
            tracing::warn!(line, amount = %raw_amount, "unparseable amount treated as zero");
            Decimal::ZERO
        });

        if id.is_none() {
            missing_ids.push(expenses.len());
        }
        expenses.push(Expense {
            id: id.unwrap_or(0),
            date,
            category: field(row, columns.category),
            amount,
        });
    }

    for idx in missing_ids {
        let id = super::next_id(&expenses)?;
        expenses[idx].id = id;
    }

    Ok(expenses)
}

#[cfg(test)]
#[path = "csv_file_tests.rs"]
mod tests;
