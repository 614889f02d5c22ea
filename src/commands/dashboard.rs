// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use serde::Serialize;

use super::{expense_rows, transaction_rows, EXPENSE_HEADERS, TRANSACTION_HEADERS};
use crate::models::{DailyExpense, Transaction};
use crate::pagination::PER_PAGE_OPTIONS;
use crate::rupiah::format_rupiah;
use crate::state::Theme;
use crate::store::{Summary, TransactionsStore};
use crate::utils::{maybe_print_json, pretty_table};

#[derive(Serialize)]
pub struct DashboardView<'a> {
    pub summary: Summary,
    pub years: &'a [i32],
    pub months: &'a [u32],
    pub page: u64,
    pub total_pages: u64,
    pub expenses: &'a [DailyExpense],
    pub transactions: &'a [Transaction],
}

pub fn handle(store: &mut TransactionsStore, theme: Theme, sub: &clap::ArgMatches) -> Result<()> {
    let year = sub.get_one::<i32>("year").copied();
    let month = sub.get_one::<u32>("month").copied();
    let page = sub.get_one::<u64>("page").copied().unwrap_or(1);
    if let Some(n) = sub.get_one::<u64>("per-page").copied() {
        if !PER_PAGE_OPTIONS.contains(&n) {
            bail!("--per-page must be one of {:?}", PER_PAGE_OPTIONS);
        }
        store.per_page = n;
    }

    store.select_period(year, month);
    store.fetch_years()?;
    store.fetch_months(year)?;
    store.fetch_total_asset()?;
    store.load_transactions(1, 10)?;
    store.goto_page(page)?;

    let view = DashboardView {
        summary: store.summary(),
        years: &store.years,
        months: &store.months,
        page: store.current_page,
        total_pages: store.total_pages(),
        expenses: &store.daily_expenses,
        transactions: &store.transactions,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }

    let s = &view.summary;
    let period = match (year, month) {
        (Some(y), Some(m)) => super::period_label(y, m),
        (Some(y), None) => y.to_string(),
        _ => "-".to_string(),
    };
    println!(
        "{}",
        pretty_table(
            theme,
            &["Period", "Total asset", "Income", "Spending", "Saved"],
            vec![vec![
                period,
                format_rupiah(&s.total_asset),
                format_rupiah(&s.income),
                format_rupiah(&s.total_spending),
                format_rupiah(&s.total_saved),
            ]],
        )
    );

    if store.selected_year.is_some() && store.selected_month.is_some() {
        println!(
            "{}",
            pretty_table(
                theme,
                &EXPENSE_HEADERS,
                expense_rows(&store.daily_expenses, store.time_format)
            )
        );
        println!(
            "Page {} of {} ({} expenses)",
            store.current_page,
            store.total_pages(),
            store.daily_total_count
        );
    } else {
        println!("Select --year and --month to see daily expenses.");
    }

    println!(
        "{}",
        pretty_table(theme, &TRANSACTION_HEADERS, transaction_rows(&store.transactions))
    );
    if !store.years.is_empty() {
        let years: Vec<String> = store.years.iter().map(|y| y.to_string()).collect();
        println!("Years: {}", years.join(", "));
    }
    if !store.months.is_empty() {
        let months: Vec<String> = store.months.iter().map(|m| format!("{:02}", m)).collect();
        println!("Months: {}", months.join(", "));
    }
    Ok(())
}
