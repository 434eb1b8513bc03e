#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::NewExpense;
use crate::store::{delete, insert};

fn ledger_in(dir: &tempfile::TempDir) -> CsvLedger {
    CsvLedger::new(&dir.path().join("expenses.csv"))
}

fn write_file(dir: &tempfile::TempDir, content: &str) -> CsvLedger {
    let path = dir.path().join("expenses.csv");
    std::fs::write(&path, content).unwrap();
    CsvLedger::new(&path)
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Missing file ──────────────────────────────────────────────

#[test]
fn test_load_missing_creates_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = ledger_in(&dir);
    let records = ledger.load().unwrap();
    assert!(records.is_empty());

    let content = std::fs::read_to_string(dir.path().join("expenses.csv")).unwrap();
    assert_eq!(content.trim(), "ID,Date,Category,Amount");
}

#[test]
fn test_load_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "");
    assert!(ledger.load().unwrap().is_empty());
}

// ── Round trip ────────────────────────────────────────────────

#[test]
fn test_save_then_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = ledger_in(&dir);

    let mut records = ledger.load().unwrap();
    insert(&mut records, NewExpense::new(ymd(2024, 1, 5), "Food", dec!(12.50))).unwrap();
    insert(&mut records, NewExpense::new(ymd(2024, 2, 10), "Bills, Rent", dec!(900))).unwrap();
    records.push(Expense {
        id: 3,
        date: None,
        category: "Other".into(),
        amount: dec!(0.99),
    });
    ledger.save(&records).unwrap();

    let loaded = ledger.load().unwrap();
    assert_eq!(loaded, records);
}

#[test]
fn test_save_writes_iso_dates_and_header() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = ledger_in(&dir);
    let mut records = Vec::new();
    insert(&mut records, NewExpense::new(ymd(2024, 1, 5), "Food", dec!(12.50))).unwrap();
    ledger.save(&records).unwrap();

    let content = std::fs::read_to_string(dir.path().join("expenses.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["ID,Date,Category,Amount", "1,2024-01-05,Food,12.50"]);
}

#[test]
fn test_save_is_full_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = ledger_in(&dir);
    let mut records = Vec::new();
    insert(&mut records, NewExpense::new(ymd(2024, 1, 5), "Food", dec!(1))).unwrap();
    insert(&mut records, NewExpense::new(ymd(2024, 1, 6), "Food", dec!(2))).unwrap();
    ledger.save(&records).unwrap();

    delete(&mut records, 1);
    ledger.save(&records).unwrap();

    let loaded = ledger.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, 2);
}

// ── Coercion ──────────────────────────────────────────────────

#[test]
fn test_load_bad_date_becomes_missing() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(
        &dir,
        "ID,Date,Category,Amount\n1,not a date,Food,3.00\n2,2024-01-05,Food,4.00\n3,,Food,5\n",
    );
    let records = ledger.load().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].date, None);
    assert_eq!(records[1].date, Some(ymd(2024, 1, 5)));
    assert_eq!(records[2].date, None);
}

#[test]
fn test_load_accepts_timestamp_dates() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "ID,Date,Category,Amount\n1,2024-01-05 00:00:00,Food,3\n");
    let records = ledger.load().unwrap();
    assert_eq!(records[0].date, Some(ymd(2024, 1, 5)));
}

#[test]
fn test_load_bad_amount_becomes_zero() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "ID,Date,Category,Amount\n1,2024-01-05,Food,abc\n");
    let records = ledger.load().unwrap();
    assert_eq!(records[0].amount, Decimal::ZERO);
}

#[test]
fn test_load_short_row_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "ID,Date,Category,Amount\n1,2024-01-05\n");
    let records = ledger.load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category, "");
    assert_eq!(records[0].amount, Decimal::ZERO);
}

// ── Legacy layouts ────────────────────────────────────────────

#[test]
fn test_load_without_id_column_synthesizes_ids() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(
        &dir,
        "Date,Category,Amount\n2024-01-05,Food,12.50\n2024-01-06,Transport,3\n2024-01-07,Bills,40\n",
    );
    let records = ledger.load().unwrap();
    let ids: Vec<i64> = records.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(records[1].category, "Transport");
}

#[test]
fn test_load_reordered_columns() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(&dir, "Amount,Category,ID,Date\n9.99,Health,5,2024-03-01\n");
    let records = ledger.load().unwrap();
    assert_eq!(records[0].id, 5);
    assert_eq!(records[0].amount, dec!(9.99));
    assert_eq!(records[0].category, "Health");
    assert_eq!(records[0].date, Some(ymd(2024, 3, 1)));
}

#[test]
fn test_load_unusable_ids_get_fresh_ones() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(
        &dir,
        "ID,Date,Category,Amount\nx,2024-01-01,Food,1\n7,2024-01-02,Food,2\n,2024-01-03,Food,3\n",
    );
    let records = ledger.load().unwrap();
    let ids: Vec<i64> = records.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![8, 7, 9]);
}

#[test]
fn test_load_unusable_id_after_max_id_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = write_file(
        &dir,
        "ID,Date,Category,Amount\n9223372036854775807,2024-01-01,Food,1\nx,2024-01-02,Food,2\n",
    );
    assert!(ledger.load().is_err());
}
