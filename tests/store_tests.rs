// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::backend::{Backend, Page, PeriodFilter, RowRange, SqliteBackend};
use dompet::error::{Error, Result};
use dompet::models::{
    DailyExpense, ExpenseInput, ExpenseRecord, NewAsset, NewTransaction, TotalAsset, Transaction,
    TransactionPatch,
};
use dompet::store::TransactionsStore;
use rust_decimal::Decimal;

fn store() -> TransactionsStore {
    TransactionsStore::new(Box::new(SqliteBackend::open_in_memory().unwrap()))
}

fn rp(n: i64) -> Decimal {
    Decimal::from(n)
}

fn expense(day: u32, amount: i64) -> ExpenseInput {
    ExpenseInput {
        year: 2025,
        month: 3,
        day,
        time: Some("12:30".into()),
        description: Some(format!("spend {}", amount)),
        amount: rp(amount),
    }
}

fn aggregate(store: &TransactionsStore, year: i32, month: u32) -> Option<Decimal> {
    store
        .backend()
        .find_transaction(year, month)
        .unwrap()
        .map(|t| t.amount)
}

fn month_spending(store: &TransactionsStore) -> Decimal {
    store
        .backend()
        .expense_amounts(2025, 3)
        .unwrap()
        .into_iter()
        .sum()
}

#[test]
fn aggregate_tracks_income_minus_expenses() {
    let mut s = store();
    let income = rp(5_000_000);
    s.add_income(2025, 3, income).unwrap();

    let a = s.add_expense(&expense(1, 100_000)).unwrap();
    let b = s.add_expense(&expense(2, 250_000)).unwrap();
    s.add_expense(&expense(3, 50_000)).unwrap();
    assert_eq!(aggregate(&s, 2025, 3), Some(rp(4_600_000)));

    let mut edited = expense(2, 300_000);
    edited.description = Some("dinner".into());
    s.edit_expense(b.id, &edited, b.amount).unwrap();
    assert_eq!(aggregate(&s, 2025, 3), Some(rp(4_550_000)));

    s.delete_expense(a.id).unwrap();
    assert_eq!(aggregate(&s, 2025, 3), Some(rp(4_650_000)));
    assert_eq!(aggregate(&s, 2025, 3), Some(income - month_spending(&s)));
}

#[test]
fn edit_to_smaller_amount_gives_money_back() {
    let mut s = store();
    s.add_income(2025, 3, rp(1_000_000)).unwrap();
    let e = s.add_expense(&expense(5, 400_000)).unwrap();
    s.edit_expense(e.id, &expense(5, 150_000), e.amount).unwrap();
    assert_eq!(aggregate(&s, 2025, 3), Some(rp(850_000)));
}

#[test]
fn first_expense_creates_negative_aggregate() {
    let mut s = store();
    s.add_expense(&expense(7, 75_000)).unwrap();
    assert_eq!(aggregate(&s, 2025, 3), Some(rp(-75_000)));

    s.add_expense(&expense(8, 25_000)).unwrap();
    assert_eq!(aggregate(&s, 2025, 3), Some(rp(-100_000)));
    let page = s
        .backend()
        .transactions_page(PeriodFilter::default(), RowRange::for_page(1, 10))
        .unwrap();
    assert_eq!(page.count, 1);
}

#[test]
fn edit_without_aggregate_creates_one_from_new_amount() {
    let s = SqliteBackend::open_in_memory().unwrap();
    let row = s
        .insert_expense(&expense(9, 40_000).to_record())
        .unwrap();
    let mut s = TransactionsStore::new(Box::new(s));
    s.edit_expense(row.id, &expense(9, 60_000), row.amount)
        .unwrap();
    assert_eq!(aggregate(&s, 2025, 3), Some(rp(-60_000)));
}

#[test]
fn delete_without_aggregate_only_removes_row() {
    let backend = SqliteBackend::open_in_memory().unwrap();
    let row = backend
        .insert_expense(&expense(9, 40_000).to_record())
        .unwrap();
    let mut s = TransactionsStore::new(Box::new(backend));
    s.delete_expense(row.id).unwrap();
    assert!(s.backend().get_expense(row.id).unwrap().is_none());
    assert_eq!(aggregate(&s, 2025, 3), None);
}

#[test]
fn delete_missing_expense_is_an_error() {
    let mut s = store();
    let err = s.delete_expense(42).unwrap_err();
    assert!(matches!(err, Error::ExpenseNotFound));
    assert_eq!(err.to_string(), "Expense not found");
}

#[test]
fn add_expense_refreshes_view_state() {
    let mut s = store();
    s.backend()
        .insert_asset(&NewAsset {
            name: "Savings".into(),
            total_asset: rp(10_000_000),
        })
        .unwrap();
    s.add_income(2025, 3, rp(2_000_000)).unwrap();
    s.select_period(Some(2025), Some(3));

    s.add_expense(&expense(4, 300_000)).unwrap();

    assert_eq!(s.total_asset, rp(10_000_000));
    assert_eq!(s.daily_expenses.len(), 1);
    assert_eq!(s.daily_total_count, 1);
    assert_eq!(s.total_spending, rp(300_000));
    assert_eq!(s.total_saved, rp(1_700_000));
    assert_eq!(s.transactions.len(), 1);
    assert_eq!(s.summary().income, rp(2_000_000));
}

#[test]
fn invalid_date_is_rejected_before_any_write() {
    let mut s = store();
    let mut bad = expense(31, 10_000);
    bad.month = 2;
    assert!(matches!(s.add_expense(&bad), Err(Error::Invalid(_))));
    assert_eq!(aggregate(&s, 2025, 2), None);
}

#[test]
fn spending_covers_whole_month_not_just_page() {
    let mut s = store();
    s.add_income(2025, 3, rp(1_000_000)).unwrap();
    for (day, amt) in [(1, 10_000), (2, 20_000), (3, 30_000)] {
        s.add_expense(&expense(day, amt)).unwrap();
    }
    s.select_period(Some(2025), Some(3));
    s.set_per_page(2).unwrap();

    assert_eq!(s.current_page, 1);
    assert_eq!(s.daily_expenses.len(), 2);
    assert_eq!(s.daily_expenses[0].date, "2025-03-03");
    assert_eq!(s.daily_total_count, 3);
    assert_eq!(s.total_pages(), 2);
    assert_eq!(s.total_spending, rp(60_000));
    assert_eq!(s.total_saved, rp(940_000));

    s.goto_page(2).unwrap();
    assert_eq!(s.daily_expenses.len(), 1);
    assert_eq!(s.daily_expenses[0].date, "2025-03-01");
}

#[test]
fn no_selection_clears_expense_state() {
    let mut s = store();
    s.add_expense(&expense(1, 10_000)).unwrap();
    s.select_period(Some(2025), Some(3));
    s.load_daily_expenses(1, 10).unwrap();
    assert_eq!(s.daily_expenses.len(), 1);

    s.select_period(Some(2025), None);
    s.load_daily_expenses(1, 10).unwrap();
    assert!(s.daily_expenses.is_empty());
    assert_eq!(s.daily_total_count, 0);
    assert_eq!(s.total_spending, Decimal::ZERO);
    assert_eq!(s.total_saved, Decimal::ZERO);
    assert_eq!(s.total_pages(), 1);
}

#[test]
fn add_income_keeps_existing_month() {
    let mut s = store();
    let first = s.add_income(2024, 12, rp(3_000_000)).unwrap();
    assert!(!first.exists);
    let again = s.add_income(2024, 12, rp(9_000_000)).unwrap();
    assert!(again.exists);
    assert_eq!(again.record.id, first.record.id);
    assert_eq!(again.record.amount, rp(3_000_000));

    let set = s.set_income(first.record.id, rp(3_500_000)).unwrap();
    assert_eq!(set.amount, rp(3_500_000));
}

#[test]
fn years_and_months_follow_selection() {
    let mut s = store();
    s.add_income(2024, 11, rp(1)).unwrap();
    s.add_income(2025, 2, rp(1)).unwrap();
    s.add_income(2025, 1, rp(1)).unwrap();

    s.fetch_years().unwrap();
    assert_eq!(s.years, vec![2025, 2024]);
    s.fetch_months(Some(2025)).unwrap();
    assert_eq!(s.months, vec![1, 2]);
    s.fetch_months(None).unwrap();
    assert!(s.months.is_empty());

    s.select_period(Some(2025), None);
    s.load_transactions(1, 10).unwrap();
    assert_eq!(s.total_count, 2);
}

#[test]
fn far_page_is_empty_not_a_crash() {
    let mut s = store();
    s.add_expense(&expense(1, 10_000)).unwrap();
    s.select_period(Some(2025), Some(3));
    s.goto_page(u64::MAX).unwrap();
    assert!(s.daily_expenses.is_empty());
    assert_eq!(s.daily_total_count, 1);
    assert_eq!(s.total_spending, rp(10_000));
}

#[test]
fn rows_without_period_do_not_break_loading() {
    let backend = SqliteBackend::open_in_memory().unwrap();
    backend
        .connection()
        .execute("INSERT INTO transactions(year, month, amount) VALUES (NULL, NULL, '5')", [])
        .unwrap();
    backend
        .connection()
        .execute("INSERT INTO transactions(year, month, amount) VALUES (2025, NULL, '6')", [])
        .unwrap();
    let mut s = TransactionsStore::new(Box::new(backend));
    s.add_income(2025, 3, rp(1_000)).unwrap();

    s.load_transactions(1, 10).unwrap();
    assert_eq!(s.total_count, 1);
    assert_eq!(s.transactions[0].month, 3);

    s.add_expense(&expense(2, 400)).unwrap();
    assert_eq!(s.transactions.len(), 1);
    assert_eq!(s.backend().transactions_for_year(2025).unwrap().len(), 1);
}

/// Delegates to SQLite but rejects aggregate updates.
struct FailingUpdates(SqliteBackend);

impl Backend for FailingUpdates {
    fn list_years(&self) -> Result<Vec<i32>> {
        self.0.list_years()
    }
    fn list_months(&self, year: i32) -> Result<Vec<u32>> {
        self.0.list_months(year)
    }
    fn transactions_page(&self, f: PeriodFilter, r: RowRange) -> Result<Page<Transaction>> {
        self.0.transactions_page(f, r)
    }
    fn find_transaction(&self, year: i32, month: u32) -> Result<Option<Transaction>> {
        self.0.find_transaction(year, month)
    }
    fn insert_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        self.0.insert_transaction(tx)
    }
    fn update_transaction(&self, _id: i64, _patch: &TransactionPatch) -> Result<Transaction> {
        Err(Error::Api {
            status: 503,
            code: None,
            message: "service unavailable".into(),
        })
    }
    fn transactions_for_year(&self, year: i32) -> Result<Vec<Transaction>> {
        self.0.transactions_for_year(year)
    }
    fn expenses_page(&self, y: i32, m: u32, r: RowRange) -> Result<Page<DailyExpense>> {
        self.0.expenses_page(y, m, r)
    }
    fn expense_amounts(&self, year: i32, month: u32) -> Result<Vec<Decimal>> {
        self.0.expense_amounts(year, month)
    }
    fn get_expense(&self, id: i64) -> Result<Option<DailyExpense>> {
        self.0.get_expense(id)
    }
    fn insert_expense(&self, rec: &ExpenseRecord) -> Result<DailyExpense> {
        self.0.insert_expense(rec)
    }
    fn update_expense(&self, id: i64, rec: &ExpenseRecord) -> Result<DailyExpense> {
        self.0.update_expense(id, rec)
    }
    fn delete_expense(&self, id: i64) -> Result<()> {
        self.0.delete_expense(id)
    }
    fn asset_values(&self) -> Result<Vec<Decimal>> {
        self.0.asset_values()
    }
    fn list_assets(&self) -> Result<Vec<TotalAsset>> {
        self.0.list_assets()
    }
    fn insert_asset(&self, asset: &NewAsset) -> Result<TotalAsset> {
        self.0.insert_asset(asset)
    }
}

#[test]
fn failed_aggregate_write_leaves_expense_in_place() {
    let inner = SqliteBackend::open_in_memory().unwrap();
    inner
        .insert_transaction(&NewTransaction {
            year: 2025,
            month: 3,
            amount: rp(1_000_000),
        })
        .unwrap();
    let mut s = TransactionsStore::new(Box::new(FailingUpdates(inner)));

    let err = s.add_expense(&expense(6, 200_000)).unwrap_err();
    match err {
        Error::Api { status, message, .. } => {
            assert_eq!(status, 503);
            assert_eq!(message, "service unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }

    let left = s
        .backend()
        .expenses_page(2025, 3, RowRange::for_page(1, 10))
        .unwrap();
    assert_eq!(left.count, 1);
    assert_eq!(aggregate(&s, 2025, 3), Some(rp(1_000_000)));
}
