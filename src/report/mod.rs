use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Expense, YearMonth};

/// Sum of amounts per category, ordered by category name. Categories are
/// grouped by exact string match.
pub(crate) fn by_category(records: &[Expense]) -> Result<Vec<(String, Decimal)>> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for e in records {
        let sum = totals.entry(e.category.as_str()).or_default();
        *sum = add(*sum, e)?;
    }
    Ok(totals
        .into_iter()
        .map(|(name, total)| (name.to_string(), total))
        .collect())
}

/// Sum of amounts per calendar month, oldest first. Undated records are
/// left out.
pub(crate) fn by_month(records: &[Expense]) -> Result<Vec<(YearMonth, Decimal)>> {
    let mut totals: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for e in records {
        if let Some(month) = e.month() {
            let sum = totals.entry(month).or_default();
            *sum = add(*sum, e)?;
        }
    }
    Ok(totals.into_iter().collect())
}

pub(crate) fn total(records: &[Expense]) -> Result<Decimal> {
    records.iter().try_fold(Decimal::ZERO, add)
}

fn add(sum: Decimal, e: &Expense) -> Result<Decimal> {
    sum.checked_add(e.amount)
        .ok_or_else(|| anyhow!("Total overflows at expense {} ({})", e.id, e.amount))
}
