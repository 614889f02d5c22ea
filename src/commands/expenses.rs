// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use clap::ArgMatches;

use super::{amount_arg, expense_rows, period_label, required, EXPENSE_HEADERS};
use crate::error::Error;
use crate::models::ExpenseInput;
use crate::pagination::Pagination;
use crate::rupiah::format_rupiah;
use crate::state::Theme;
use crate::store::TransactionsStore;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(store: &mut TransactionsStore, theme: Theme, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("list", sub)) => list(store, theme, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut TransactionsStore, sub: &ArgMatches) -> Result<()> {
    let input = ExpenseInput {
        year: required(sub, "year")?,
        month: required(sub, "month")?,
        day: required(sub, "day")?,
        time: sub.get_one::<String>("time").cloned(),
        description: sub.get_one::<String>("description").cloned(),
        amount: amount_arg(sub, "amount")?.unwrap_or_default(),
    };
    store.select_period(Some(input.year), Some(input.month));
    let rec = store.add_expense(&input)?;
    println!(
        "Recorded {} on {} (id {}); {} balance is now {}",
        format_rupiah(&rec.amount),
        rec.date,
        rec.id,
        period_label(input.year, input.month),
        format_rupiah(&store.total_saved)
    );
    Ok(())
}

fn edit(store: &mut TransactionsStore, sub: &ArgMatches) -> Result<()> {
    let id: i64 = required(sub, "id")?;
    let old = store.backend().get_expense(id)?.ok_or(Error::ExpenseNotFound)?;

    let mut input = ExpenseInput::from(&old);
    if let Some(y) = sub.get_one::<i32>("year") {
        input.year = *y;
    }
    if let Some(mo) = sub.get_one::<u32>("month") {
        input.month = *mo;
    }
    if let Some(d) = sub.get_one::<u32>("day") {
        input.day = *d;
    }
    if let Some(t) = sub.get_one::<String>("time") {
        input.time = Some(t.clone());
    }
    if let Some(desc) = sub.get_one::<String>("description") {
        input.description = Some(desc.clone());
    }
    if let Some(a) = amount_arg(sub, "amount")? {
        input.amount = a;
    }
    if (input.year, input.month) != (old.year, old.month) {
        bail!(
            "Cannot move expense {} from {} to {}: remove it and add it again",
            id,
            period_label(old.year, old.month),
            period_label(input.year, input.month)
        );
    }

    store.select_period(Some(input.year), Some(input.month));
    let rec = store.edit_expense(id, &input, old.amount)?;
    println!(
        "Updated expense {}: {} -> {}; {} balance is now {}",
        rec.id,
        format_rupiah(&old.amount),
        format_rupiah(&rec.amount),
        period_label(input.year, input.month),
        format_rupiah(&store.total_saved)
    );
    Ok(())
}

fn remove(store: &mut TransactionsStore, sub: &ArgMatches) -> Result<()> {
    let id: i64 = required(sub, "id")?;
    store.delete_expense(id)?;
    println!("Removed expense {}", id);
    Ok(())
}

fn list(store: &mut TransactionsStore, theme: Theme, sub: &ArgMatches) -> Result<()> {
    let year: i32 = required(sub, "year")?;
    let month: u32 = required(sub, "month")?;
    let mut pager = Pagination::default();
    if let Some(n) = sub.get_one::<u64>("per-page") {
        pager.set_per_page(*n);
    }
    pager.current_page = sub.get_one::<u64>("page").copied().unwrap_or(1);

    store.select_period(Some(year), Some(month));
    store.per_page = pager.per_page;
    store.goto_page(pager.current_page)?;

    if maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &store.daily_expenses,
    )? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            theme,
            &EXPENSE_HEADERS,
            expense_rows(&store.daily_expenses, store.time_format)
        )
    );
    println!(
        "Page {} of {} | spent {} | saved {}",
        pager.current_page,
        pager.total_pages(store.daily_total_count).max(1),
        format_rupiah(&store.total_spending),
        format_rupiah(&store.total_saved)
    );
    Ok(())
}
