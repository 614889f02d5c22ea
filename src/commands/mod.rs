// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod assets;
pub mod auth;
pub mod dashboard;
pub mod expenses;
pub mod exporter;
pub mod income;
pub mod restore;
pub mod theme;
pub mod transactions;

use std::any::Any;
use std::fmt::Display;

use anyhow::{Context, Result};
use clap::ArgMatches;
use rust_decimal::Decimal;

use crate::models::{DailyExpense, Transaction};
use crate::rupiah::format_rupiah;
use crate::utils::{format_time, parse_amount, TimeFormat};

pub(crate) fn required<T: Any + Clone + Send + Sync + 'static>(
    m: &ArgMatches,
    name: &str,
) -> Result<T> {
    m.get_one::<T>(name)
        .cloned()
        .with_context(|| format!("missing --{}", name))
}

pub(crate) fn amount_arg(m: &ArgMatches, name: &str) -> Result<Option<Decimal>> {
    m.get_one::<String>(name)
        .map(|s| parse_amount(s))
        .transpose()
}

pub(crate) fn period_label(year: impl Display, month: u32) -> String {
    format!("{}-{:02}", year, month)
}

pub(crate) fn transaction_rows(rows: &[Transaction]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                period_label(t.year, t.month),
                format_rupiah(&t.amount),
                t.created_at.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

pub(crate) const TRANSACTION_HEADERS: [&str; 4] = ["ID", "Period", "Balance", "Created"];

pub(crate) fn expense_rows(rows: &[DailyExpense], fmt: TimeFormat) -> Vec<Vec<String>> {
    rows.iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.date.clone(),
                e.time
                    .as_deref()
                    .map(|t| format_time(t, fmt))
                    .unwrap_or_default(),
                e.description.clone().unwrap_or_default(),
                format_rupiah(&e.amount),
            ]
        })
        .collect()
}

pub(crate) const EXPENSE_HEADERS: [&str; 5] = ["ID", "Date", "Time", "Description", "Amount"];
