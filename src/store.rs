// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! View state plus the multi-step expense writes.
//!
//! Each expense mutation is a sequence of separate backend calls: the expense
//! row write, then a read-modify-write of the monthly aggregate. A failure at
//! any step returns that error as-is and leaves earlier writes in place.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::assets;
use crate::backend::{Backend, PeriodFilter, RowRange};
use crate::error::{Error, Result};
use crate::models::{
    DailyExpense, ExpenseInput, NewTransaction, Transaction, TransactionPatch, UpsertOutcome,
};
use crate::pagination::total_pages;
use crate::utils::TimeFormat;

/// Transaction page size used when refreshing after an expense write.
const TX_REFRESH_PER_PAGE: u64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub total_asset: Decimal,
    pub total_spending: Decimal,
    pub total_saved: Decimal,
    pub income: Decimal,
}

pub struct TransactionsStore {
    backend: Box<dyn Backend>,

    pub transactions: Vec<Transaction>,
    pub total_count: u64,

    pub daily_expenses: Vec<DailyExpense>,
    pub daily_total_count: u64,
    pub total_spending: Decimal,
    pub total_saved: Decimal,

    pub selected_year: Option<i32>,
    pub selected_month: Option<u32>,

    pub years: Vec<i32>,
    pub months: Vec<u32>,

    pub per_page: u64,
    pub current_page: u64,

    pub total_asset: Decimal,
    pub time_format: TimeFormat,
}

impl TransactionsStore {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            transactions: Vec::new(),
            total_count: 0,
            daily_expenses: Vec::new(),
            daily_total_count: 0,
            total_spending: Decimal::ZERO,
            total_saved: Decimal::ZERO,
            selected_year: None,
            selected_month: None,
            years: Vec::new(),
            months: Vec::new(),
            per_page: 10,
            current_page: 1,
            total_asset: Decimal::ZERO,
            time_format: TimeFormat::default(),
        }
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn select_period(&mut self, year: Option<i32>, month: Option<u32>) {
        self.selected_year = year;
        self.selected_month = month;
    }

    /// Expense pages for the selected month; never less than one.
    pub fn total_pages(&self) -> u64 {
        total_pages(self.daily_total_count, self.per_page).max(1)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            year: self.selected_year,
            month: self.selected_month,
            total_asset: self.total_asset,
            total_spending: self.total_spending,
            total_saved: self.total_saved,
            income: self.total_saved + self.total_spending,
        }
    }

    pub fn load_transactions(&mut self, page: u64, per_page: u64) -> Result<()> {
        let filter = PeriodFilter {
            year: self.selected_year,
            month: self.selected_month,
        };
        let page = self
            .backend
            .transactions_page(filter, RowRange::for_page(page, per_page))?;
        self.transactions = page.rows;
        self.total_count = page.count;
        Ok(())
    }

    pub fn fetch_years(&mut self) -> Result<()> {
        self.years = self.backend.list_years()?;
        Ok(())
    }

    pub fn fetch_months(&mut self, year: Option<i32>) -> Result<()> {
        self.months = match year {
            Some(y) => self.backend.list_months(y)?,
            None => Vec::new(),
        };
        Ok(())
    }

    pub fn fetch_total_asset(&mut self) -> Result<()> {
        self.total_asset = assets::total_asset(self.backend.as_ref())?;
        Ok(())
    }

    /// Loads one page of the selected month's expenses and recomputes
    /// spending (whole month) and saved (the month's aggregate).
    pub fn load_daily_expenses(&mut self, page: u64, per_page: u64) -> Result<()> {
        let (Some(year), Some(month)) = (self.selected_year, self.selected_month) else {
            self.daily_expenses.clear();
            self.daily_total_count = 0;
            self.total_spending = Decimal::ZERO;
            self.total_saved = Decimal::ZERO;
            return Ok(());
        };

        let page = self
            .backend
            .expenses_page(year, month, RowRange::for_page(page, per_page))?;
        self.daily_expenses = page.rows;
        self.daily_total_count = page.count;

        self.total_spending = self.backend.expense_amounts(year, month)?.into_iter().sum();
        self.total_saved = self
            .backend
            .find_transaction(year, month)?
            .map(|tx| tx.amount)
            .unwrap_or_default();
        Ok(())
    }

    pub fn add_income(&mut self, year: i32, month: u32, amount: Decimal) -> Result<UpsertOutcome> {
        self.backend
            .add_or_update_transaction(&NewTransaction {
                year,
                month,
                amount,
            })
    }

    /// Point update of a monthly aggregate's amount.
    pub fn set_income(&mut self, id: i64, amount: Decimal) -> Result<Transaction> {
        info!(id, %amount, "setting monthly amount");
        self.backend
            .update_transaction(id, &TransactionPatch { amount })
    }

    pub fn add_expense(&mut self, input: &ExpenseInput) -> Result<DailyExpense> {
        input.validate()?;
        let inserted = self.backend.insert_expense(&input.to_record())?;
        info!(id = inserted.id, date = %inserted.date, amount = %input.amount, "expense added");

        self.apply_to_aggregate(input.year, input.month, input.amount, -input.amount)?;
        self.refresh()?;
        Ok(inserted)
    }

    /// `old_amount` is the amount the row held before this edit; the aggregate
    /// of the target period moves by `amount - old_amount`.
    pub fn edit_expense(
        &mut self,
        id: i64,
        input: &ExpenseInput,
        old_amount: Decimal,
    ) -> Result<DailyExpense> {
        input.validate()?;
        let updated = self.backend.update_expense(id, &input.to_record())?;
        info!(id, amount = %input.amount, %old_amount, "expense edited");

        let diff = input.amount - old_amount;
        self.apply_to_aggregate(input.year, input.month, diff, -input.amount)?;
        self.refresh()?;
        Ok(updated)
    }

    pub fn delete_expense(&mut self, id: i64) -> Result<()> {
        let rec = self.backend.get_expense(id)?.ok_or(Error::ExpenseNotFound)?;
        self.backend.delete_expense(id)?;
        info!(id, amount = %rec.amount, "expense deleted");

        if let Some(tx) = self.backend.find_transaction(rec.year, rec.month)? {
            self.backend.update_transaction(
                tx.id,
                &TransactionPatch {
                    amount: tx.amount + rec.amount,
                },
            )?;
        }
        self.refresh()
    }

    pub fn set_per_page(&mut self, n: u64) -> Result<()> {
        self.per_page = n.max(1);
        self.current_page = 1;
        self.load_daily_expenses(1, self.per_page)
    }

    pub fn goto_page(&mut self, page: u64) -> Result<()> {
        self.current_page = page.max(1);
        self.load_daily_expenses(self.current_page, self.per_page)
    }

    // Subtracts `spent` from the period's aggregate, or creates the aggregate
    // with `opening` when the period has none yet.
    fn apply_to_aggregate(
        &mut self,
        year: i32,
        month: u32,
        spent: Decimal,
        opening: Decimal,
    ) -> Result<()> {
        match self.backend.find_transaction(year, month)? {
            Some(tx) => {
                self.backend.update_transaction(
                    tx.id,
                    &TransactionPatch {
                        amount: tx.amount - spent,
                    },
                )?;
            }
            None => {
                self.backend.insert_transaction(&NewTransaction {
                    year,
                    month,
                    amount: opening,
                })?;
            }
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        self.fetch_total_asset()?;
        self.load_daily_expenses(self.current_page, self.per_page)?;
        self.load_transactions(1, TX_REFRESH_PER_PAGE)
    }
}
