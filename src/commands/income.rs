// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;

use super::{amount_arg, period_label, required};
use crate::rupiah::format_rupiah;
use crate::store::TransactionsStore;

pub fn handle(store: &mut TransactionsStore, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let year: i32 = required(sub, "year")?;
            let month: u32 = required(sub, "month")?;
            let amount = amount_arg(sub, "amount")?.unwrap_or_default();
            let outcome = store.add_income(year, month, amount)?;
            if outcome.exists {
                println!(
                    "{} already has a balance of {} (id {}); use `income set` to change it",
                    period_label(year, month),
                    format_rupiah(&outcome.record.amount),
                    outcome.record.id
                );
            } else {
                println!(
                    "Recorded income {} for {} (id {})",
                    format_rupiah(&outcome.record.amount),
                    period_label(year, month),
                    outcome.record.id
                );
            }
        }
        Some(("set", sub)) => {
            let id: i64 = required(sub, "id")?;
            let amount = amount_arg(sub, "amount")?.unwrap_or_default();
            let tx = store.set_income(id, amount)?;
            println!(
                "{} balance set to {}",
                period_label(tx.year, tx.month),
                format_rupiah(&tx.amount)
            );
        }
        _ => {}
    }
    Ok(())
}
