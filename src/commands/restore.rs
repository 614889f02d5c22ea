// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::required;
use crate::backend::Backend;
use crate::backup::{read_records, restore_transactions, Format};
use crate::state::Theme;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(backend: &dyn Backend, theme: Theme, sub: &clap::ArgMatches) -> Result<()> {
    let path: PathBuf = required(sub, "path")?;
    let fmt = match sub.get_one::<String>("format") {
        Some(f) => f.parse::<Format>()?,
        None => Format::from_path(&path),
    };
    let records =
        read_records(&path, fmt).with_context(|| format!("Read {}", path.display()))?;
    let report = restore_transactions(backend, &records);

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    println!(
        "Restored from {}: {} inserted, {} updated, {} failed",
        path.display(),
        report.inserted,
        report.updated,
        report.errors.len()
    );
    if !report.errors.is_empty() {
        let rows = report
            .errors
            .iter()
            .map(|e| vec![e.record.to_string(), e.reason.clone()])
            .collect();
        println!("{}", pretty_table(theme, &["Record", "Reason"], rows));
    }
    Ok(())
}
