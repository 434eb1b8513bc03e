use anyhow::{Context, Result};
use serde::Serialize;
use tera::Tera;

use crate::chart::Chart;
use crate::models::{Category, Expense};
use crate::report;
use crate::util::format_amount;

const INDEX: &str = "index.html";

/// One table row, already formatted for display.
#[derive(Debug, Serialize)]
struct ExpenseRow {
    id: i64,
    date: String,
    category: String,
    amount: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id,
            date: e
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            category: e.category.clone(),
            amount: format_amount(e.amount),
        }
    }
}

/// Compiled page templates.
pub(crate) struct Pages {
    tera: Tera,
}

impl Pages {
    pub(crate) fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX, include_str!("templates/index.html"))
            .context("Failed to compile dashboard template")?;
        Ok(Self { tera })
    }

    pub(crate) fn dashboard(&self, records: &[Expense], charts: &[Chart]) -> Result<String> {
        let rows: Vec<ExpenseRow> = records.iter().map(ExpenseRow::from).collect();
        let categories: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();

        let mut ctx = tera::Context::new();
        ctx.insert("expenses", &rows);
        ctx.insert("count", &rows.len());
        ctx.insert("total", &format_amount(report::total(records)?));
        ctx.insert("categories", &categories);
        ctx.insert("charts", charts);

        self.tera
            .render(INDEX, &ctx)
            .context("Failed to render dashboard")
    }
}
