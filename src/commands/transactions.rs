// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;

use super::{required, transaction_rows, TRANSACTION_HEADERS};
use crate::backend::{Page, PeriodFilter};
use crate::models::Transaction;
use crate::pagination::Pagination;
use crate::state::Theme;
use crate::store::TransactionsStore;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(store: &mut TransactionsStore, theme: Theme, m: &ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        list(store, theme, sub)?;
    }
    Ok(())
}

fn list(store: &mut TransactionsStore, theme: Theme, sub: &ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (page, pager) = query_page(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &page.rows)? {
        println!(
            "{}",
            pretty_table(theme, &TRANSACTION_HEADERS, transaction_rows(&page.rows))
        );
        println!(
            "Page {} of {} ({} months)",
            pager.current_page,
            pager.total_pages(page.count).max(1),
            page.count
        );
    }
    Ok(())
}

/// Loads the page of monthly balances the `tx list` arguments ask for.
pub fn query_page(
    store: &mut TransactionsStore,
    sub: &ArgMatches,
) -> Result<(Page<Transaction>, Pagination)> {
    let mut pager = Pagination::default();
    if let Some(n) = sub.get_one::<u64>("per-page") {
        pager.set_per_page(*n);
    }
    pager.current_page = sub.get_one::<u64>("page").copied().unwrap_or(1);

    let filter = PeriodFilter {
        year: sub.get_one::<i32>("year").copied(),
        month: sub.get_one::<u32>("month").copied(),
    };
    store.select_period(filter.year, filter.month);
    store.load_transactions(pager.current_page, pager.per_page)?;
    let page = Page {
        rows: std::mem::take(&mut store.transactions),
        count: store.total_count,
    };
    Ok((page, pager))
}

pub fn years(store: &mut TransactionsStore, sub: &ArgMatches) -> Result<()> {
    store.fetch_years()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &store.years)? {
        for y in &store.years {
            println!("{}", y);
        }
    }
    Ok(())
}

pub fn months(store: &mut TransactionsStore, sub: &ArgMatches) -> Result<()> {
    let year: i32 = required(sub, "year")?;
    store.fetch_months(Some(year))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &store.months)? {
        for m in &store.months {
            println!("{:02}", m);
        }
    }
    Ok(())
}
