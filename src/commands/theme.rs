// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::Result;

use super::required;
use crate::state::{LocalState, Theme};

pub fn handle(state: &mut LocalState, path: &Path, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("toggle", _)) => {
            let theme = state.toggle_theme();
            state.save(path)?;
            println!("Theme set to {}", theme);
        }
        Some(("set", sub)) => {
            state.theme = required::<String>(sub, "theme")?.parse::<Theme>()?;
            state.save(path)?;
            println!("Theme set to {}", state.theme);
        }
        _ => println!("{}", state.theme),
    }
    Ok(())
}
