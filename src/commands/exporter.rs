// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::required;
use crate::backend::Backend;
use crate::backup::{download_year_data, write_export, Format};

pub fn handle(backend: &dyn Backend, sub: &clap::ArgMatches) -> Result<()> {
    let year: i32 = required(sub, "year")?;
    let fmt: Format = required::<String>(sub, "format")?.parse()?;
    let out: PathBuf = required(sub, "out")?;

    let rows = download_year_data(backend, year)?;
    write_export(&rows, fmt, &out)
        .with_context(|| format!("Write export to {}", out.display()))?;
    println!(
        "Exported {} month(s) of {} to {}",
        rows.len(),
        year,
        out.display()
    );
    Ok(())
}
