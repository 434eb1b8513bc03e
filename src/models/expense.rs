use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    /// `None` when the stored value could not be parsed as a date.
    pub date: Option<NaiveDate>,
    pub category: String,
    pub amount: Decimal,
}

impl Expense {
    pub fn month(&self) -> Option<YearMonth> {
        self.date.map(YearMonth::from_date)
    }
}

/// A validated entry that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
}

impl NewExpense {
    pub fn new(date: NaiveDate, category: &str, amount: Decimal) -> Self {
        Self {
            date,
            category: super::Category::normalize(category),
            amount,
        }
    }

    pub fn into_expense(self, id: i64) -> Expense {
        Expense {
            id,
            date: Some(self.date),
            category: self.category,
            amount: self.amount,
        }
    }
}

/// Calendar month key. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
