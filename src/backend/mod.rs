// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Data client over the tables `transactions`, `daily_expenses` and
//! `total_assets`.
//!
//! Every operation hands backend errors back unchanged: no retry, no backoff.

pub mod rest;
pub mod sqlite;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{BackendKind, Settings};
use crate::error::Result;
use crate::models::{
    DailyExpense, ExpenseRecord, NewAsset, NewTransaction, TotalAsset, Transaction,
    TransactionPatch, UpsertOutcome,
};

pub use rest::RestBackend;
pub use sqlite::SqliteBackend;

pub const TRANSACTIONS: &str = "transactions";
pub const DAILY_EXPENSES: &str = "daily_expenses";
pub const TOTAL_ASSETS: &str = "total_assets";

/// Inclusive row window for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub from: u64,
    pub to: u64,
}

impl RowRange {
    /// `page` is 1-based; page 0 is treated as page 1. Offsets saturate at
    /// `i64::MAX` so they always fit a SQL `OFFSET`.
    pub fn for_page(page: u64, per_page: u64) -> Self {
        const MAX_ROW: u64 = i64::MAX as u64;
        let per_page = per_page.clamp(1, MAX_ROW);
        let from = page.saturating_sub(1).saturating_mul(per_page).min(MAX_ROW);
        Self {
            from,
            to: from.saturating_add(per_page - 1).min(MAX_ROW),
        }
    }

    pub fn limit(&self) -> u64 {
        self.to.saturating_sub(self.from) + 1
    }
}

/// Optional year/month filter applied to the monthly aggregate list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// One page of rows plus the exact number of rows matching the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub count: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            count: 0,
        }
    }
}

pub trait Backend {
    /// Distinct years present in `transactions`, newest first.
    fn list_years(&self) -> Result<Vec<i32>>;

    /// Distinct months recorded for `year`, ascending.
    fn list_months(&self, year: i32) -> Result<Vec<u32>>;

    /// Monthly aggregates, most recently created first.
    fn transactions_page(&self, filter: PeriodFilter, range: RowRange)
    -> Result<Page<Transaction>>;

    fn find_transaction(&self, year: i32, month: u32) -> Result<Option<Transaction>>;

    fn insert_transaction(&self, tx: &NewTransaction) -> Result<Transaction>;

    fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction>;

    /// Every aggregate of `year`, ordered by month.
    fn transactions_for_year(&self, year: i32) -> Result<Vec<Transaction>>;

    /// Expenses of one month, latest date first.
    fn expenses_page(&self, year: i32, month: u32, range: RowRange)
    -> Result<Page<DailyExpense>>;

    fn expense_amounts(&self, year: i32, month: u32) -> Result<Vec<Decimal>>;

    fn get_expense(&self, id: i64) -> Result<Option<DailyExpense>>;

    fn insert_expense(&self, rec: &ExpenseRecord) -> Result<DailyExpense>;

    fn update_expense(&self, id: i64, rec: &ExpenseRecord) -> Result<DailyExpense>;

    fn delete_expense(&self, id: i64) -> Result<()>;

    fn asset_values(&self) -> Result<Vec<Decimal>>;

    fn list_assets(&self) -> Result<Vec<TotalAsset>>;

    fn insert_asset(&self, asset: &NewAsset) -> Result<TotalAsset>;

    /// Returns the existing row for the period untouched, or inserts one.
    fn add_or_update_transaction(&self, tx: &NewTransaction) -> Result<UpsertOutcome> {
        if let Some(record) = self.find_transaction(tx.year, tx.month)? {
            return Ok(UpsertOutcome {
                exists: true,
                record,
            });
        }
        let record = self.insert_transaction(tx)?;
        Ok(UpsertOutcome {
            exists: false,
            record,
        })
    }
}

/// Opens the backend selected in `settings`. `access_token` is the signed-in
/// session, if any; the hosted backend falls back to the anon key without it.
pub fn connect(settings: &Settings, access_token: Option<String>) -> Result<Box<dyn Backend>> {
    match settings.backend {
        BackendKind::Local => {
            let path = match &settings.database {
                Some(p) => p.clone(),
                None => sqlite::db_path()?,
            };
            Ok(Box::new(SqliteBackend::open(&path)?))
        }
        BackendKind::Rest => {
            let (url, key) = settings.credentials()?;
            Ok(Box::new(
                RestBackend::new(url, key)?.with_access_token(access_token),
            ))
        }
    }
}
