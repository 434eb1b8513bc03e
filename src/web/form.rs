use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::AppError;
use crate::models::NewExpense;
use crate::util::{format_amount, parse_decimal};

/// Largest amount a single entry may carry.
const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Raw fields of the "Add New Expense" form. Every field is optional so a
/// missing one is reported as a validation error rather than a rejection
/// from the extractor.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExpenseForm {
    #[serde(default)]
    pub(crate) date: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) amount: Option<String>,
}

impl ExpenseForm {
    pub(crate) fn validate(&self) -> Result<NewExpense, AppError> {
        let date = self.date.as_deref().map(str::trim).unwrap_or_default();
        if date.is_empty() {
            return Err(AppError::validation("Date is required."));
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| AppError::validation("Date must be a calendar date in YYYY-MM-DD form."))?;

        let category = self.category.as_deref().map(str::trim).unwrap_or_default();
        if category.is_empty() {
            return Err(AppError::validation("Category is required."));
        }

        let amount = self.amount.as_deref().map(str::trim).unwrap_or_default();
        if amount.is_empty() {
            return Err(AppError::validation("Amount is required."));
        }
        let amount = parse_decimal(amount)
            .map_err(|_| AppError::validation("Amount must be a number."))?;
        if amount < Decimal::ZERO {
            return Err(AppError::validation("Amount cannot be negative."));
        }
        if amount > MAX_AMOUNT {
            return Err(AppError::validation(format!(
                "Amount cannot exceed {}.",
                format_amount(MAX_AMOUNT)
            )));
        }

        Ok(NewExpense::new(date, category, amount))
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
