// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;

use super::{amount_arg, required};
use crate::models::NewAsset;
use crate::rupiah::format_rupiah;
use crate::state::Theme;
use crate::store::TransactionsStore;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(store: &mut TransactionsStore, theme: Theme, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name: String = required(sub, "name")?;
            let total_asset = amount_arg(sub, "amount")?.unwrap_or_default();
            let row = store
                .backend()
                .insert_asset(&NewAsset { name, total_asset })?;
            println!(
                "Added asset '{}' ({})",
                row.name,
                format_rupiah(&row.total_asset)
            );
        }
        Some(("list", sub)) => {
            let rows = store.backend().list_assets()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
                let data = rows
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            format_rupiah(&a.total_asset),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(theme, &["ID", "Name", "Value"], data));
            }
        }
        Some(("total", _)) => {
            store.fetch_total_asset()?;
            println!("{}", format_rupiah(&store.total_asset));
        }
        _ => {}
    }
    Ok(())
}
