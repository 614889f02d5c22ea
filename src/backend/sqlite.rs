// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::debug;

use super::{Backend, Page, PeriodFilter, RowRange, DAILY_EXPENSES, TOTAL_ASSETS, TRANSACTIONS};
use crate::config::project_dirs;
use crate::error::{Error, Result};
use crate::models::{
    DailyExpense, ExpenseRecord, NewAsset, NewTransaction, TotalAsset, Transaction,
    TransactionPatch,
};

const TX_COLUMNS: &str = "id, year, month, amount, created_at";
const EXPENSE_COLUMNS: &str = "id, year, month, day, date, time, description, amount";

pub fn db_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("dompet.sqlite"))
}

/// Offline stand-in for the hosted backend, with the same table layout.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "opening local database");
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn transaction_by_id(&self, id: i64) -> Result<Transaction> {
        self.conn
            .query_row(
                &format!("SELECT {TX_COLUMNS} FROM transactions WHERE id=?1"),
                params![id],
                transaction_from_row,
            )
            .optional()?
            .ok_or(Error::NotFound {
                table: TRANSACTIONS,
                id,
            })
    }

    fn asset_by_id(&self, id: i64) -> Result<TotalAsset> {
        self.conn
            .query_row(
                "SELECT id, name, total_asset FROM total_assets WHERE id=?1",
                params![id],
                asset_from_row,
            )
            .optional()?
            .ok_or(Error::NotFound {
                table: TOTAL_ASSETS,
                id,
            })
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        year INTEGER,
        month INTEGER,
        amount TEXT,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%f', 'now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_period ON transactions(year, month);

    CREATE TABLE IF NOT EXISTS daily_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        year INTEGER NOT NULL,
        month INTEGER NOT NULL,
        day INTEGER NOT NULL,
        date TEXT NOT NULL,
        time TEXT,
        description TEXT,
        amount TEXT,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%f', 'now'))
    );
    CREATE INDEX IF NOT EXISTS idx_daily_expenses_period ON daily_expenses(year, month, date);

    CREATE TABLE IF NOT EXISTS total_assets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        total_asset TEXT
    );
    "#,
    )?;
    Ok(())
}

fn decimal_at(r: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: Option<String> = r.get(idx)?;
    match raw {
        None => Ok(Decimal::ZERO),
        Some(s) => s
            .parse::<Decimal>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
    }
}

fn transaction_from_row(r: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        year: r.get(1)?,
        month: r.get(2)?,
        amount: decimal_at(r, 3)?,
        created_at: r.get(4)?,
    })
}

fn expense_from_row(r: &Row) -> rusqlite::Result<DailyExpense> {
    Ok(DailyExpense {
        id: r.get(0)?,
        year: r.get(1)?,
        month: r.get(2)?,
        day: r.get(3)?,
        date: r.get(4)?,
        time: r.get(5)?,
        description: r.get(6)?,
        amount: decimal_at(r, 7)?,
    })
}

fn asset_from_row(r: &Row) -> rusqlite::Result<TotalAsset> {
    Ok(TotalAsset {
        id: r.get(0)?,
        name: r.get(1)?,
        total_asset: decimal_at(r, 2)?,
    })
}

impl Backend for SqliteBackend {
    fn list_years(&self) -> Result<Vec<i32>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT year FROM transactions WHERE year IS NOT NULL ORDER BY year DESC",
        )?;
        let rows = stmt.query_map([], |r| r.get::<_, i32>(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn list_months(&self, year: i32) -> Result<Vec<u32>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT month FROM transactions WHERE year=?1 AND month IS NOT NULL ORDER BY month",
        )?;
        let rows = stmt.query_map(params![year], |r| r.get::<_, u32>(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn transactions_page(
        &self,
        filter: PeriodFilter,
        range: RowRange,
    ) -> Result<Page<Transaction>> {
        let mut clause = String::from(" WHERE year IS NOT NULL AND month IS NOT NULL");
        let mut params_vec: Vec<i64> = Vec::new();
        if let Some(year) = filter.year {
            clause.push_str(" AND year=?");
            params_vec.push(year.into());
        }
        if let Some(month) = filter.month {
            clause.push_str(" AND month=?");
            params_vec.push(month.into());
        }
        debug!(table = TRANSACTIONS, ?filter, ?range, "select page");

        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM transactions{clause}"),
            params_from_iter(params_vec.iter()),
            |r| r.get(0),
        )?;

        let sql = format!(
            "SELECT {TX_COLUMNS} FROM transactions{clause} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        );
        params_vec.push(range.limit() as i64);
        params_vec.push(range.from as i64);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params_vec.iter()), transaction_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Page {
            rows,
            count: count as u64,
        })
    }

    fn find_transaction(&self, year: i32, month: u32) -> Result<Option<Transaction>> {
        Ok(self
            .conn
            .query_row(
                &format!(
                    "SELECT {TX_COLUMNS} FROM transactions WHERE year=?1 AND month=?2 ORDER BY id LIMIT 1"
                ),
                params![year, month],
                transaction_from_row,
            )
            .optional()?)
    }

    fn insert_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        self.conn.execute(
            "INSERT INTO transactions(year, month, amount) VALUES (?1, ?2, ?3)",
            params![tx.year, tx.month, tx.amount.to_string()],
        )?;
        self.transaction_by_id(self.conn.last_insert_rowid())
    }

    fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction> {
        let changed = self.conn.execute(
            "UPDATE transactions SET amount=?1 WHERE id=?2",
            params![patch.amount.to_string(), id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound {
                table: TRANSACTIONS,
                id,
            });
        }
        self.transaction_by_id(id)
    }

    fn transactions_for_year(&self, year: i32) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TX_COLUMNS} FROM transactions WHERE year=?1 AND month IS NOT NULL ORDER BY month, id"
        ))?;
        let rows = stmt.query_map(params![year], transaction_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn expenses_page(&self, year: i32, month: u32, range: RowRange) -> Result<Page<DailyExpense>> {
        debug!(table = DAILY_EXPENSES, year, month, ?range, "select page");
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM daily_expenses WHERE year=?1 AND month=?2",
            params![year, month],
            |r| r.get(0),
        )?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM daily_expenses WHERE year=?1 AND month=?2
             ORDER BY date DESC, id DESC LIMIT ?3 OFFSET ?4"
        ))?;
        let rows = stmt
            .query_map(
                params![year, month, range.limit() as i64, range.from as i64],
                expense_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Page {
            rows,
            count: count as u64,
        })
    }

    fn expense_amounts(&self, year: i32, month: u32) -> Result<Vec<Decimal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT amount FROM daily_expenses WHERE year=?1 AND month=?2")?;
        let rows = stmt.query_map(params![year, month], |r| decimal_at(r, 0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn get_expense(&self, id: i64) -> Result<Option<DailyExpense>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {EXPENSE_COLUMNS} FROM daily_expenses WHERE id=?1"),
                params![id],
                expense_from_row,
            )
            .optional()?)
    }

    fn insert_expense(&self, rec: &ExpenseRecord) -> Result<DailyExpense> {
        self.conn.execute(
            "INSERT INTO daily_expenses(year, month, day, date, time, description, amount)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                rec.year,
                rec.month,
                rec.day,
                rec.date,
                rec.time,
                rec.description,
                rec.amount.to_string()
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_expense(id)?.ok_or(Error::NotFound {
            table: DAILY_EXPENSES,
            id,
        })
    }

    fn update_expense(&self, id: i64, rec: &ExpenseRecord) -> Result<DailyExpense> {
        self.conn.execute(
            "UPDATE daily_expenses SET year=?1, month=?2, day=?3, date=?4, time=?5,
             description=?6, amount=?7 WHERE id=?8",
            params![
                rec.year,
                rec.month,
                rec.day,
                rec.date,
                rec.time,
                rec.description,
                rec.amount.to_string(),
                id
            ],
        )?;
        self.get_expense(id)?.ok_or(Error::NotFound {
            table: DAILY_EXPENSES,
            id,
        })
    }

    fn delete_expense(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM daily_expenses WHERE id=?1", params![id])?;
        Ok(())
    }

    fn asset_values(&self) -> Result<Vec<Decimal>> {
        let mut stmt = self.conn.prepare("SELECT total_asset FROM total_assets")?;
        let rows = stmt.query_map([], |r| decimal_at(r, 0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn list_assets(&self) -> Result<Vec<TotalAsset>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, total_asset FROM total_assets ORDER BY name, id")?;
        let rows = stmt.query_map([], asset_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn insert_asset(&self, asset: &NewAsset) -> Result<TotalAsset> {
        self.conn.execute(
            "INSERT INTO total_assets(name, total_asset) VALUES (?1, ?2)",
            params![asset.name, asset.total_asset.to_string()],
        )?;
        self.asset_by_id(self.conn.last_insert_rowid())
    }
}
