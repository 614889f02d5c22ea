// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use dompet::backend::{self, sqlite, SqliteBackend};
use dompet::config::{BackendKind, Settings};
use dompet::state::{default_state_path, LocalState};
use dompet::store::TransactionsStore;
use dompet::{cli, commands};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    let mut settings = Settings::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(db) = matches.get_one::<PathBuf>("db") {
        settings.database = Some(db.clone());
        settings.backend = BackendKind::Local;
    }
    if matches.get_flag("local") {
        settings.backend = BackendKind::Local;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let state_path = default_state_path()?;
    let mut state = LocalState::load(&state_path)?;

    match matches.subcommand() {
        Some(("theme", sub)) => return commands::theme::handle(&mut state, &state_path, sub),
        Some(("login", sub)) => {
            return commands::auth::login(&settings, &mut state, &state_path, sub);
        }
        Some(("logout", _)) => return commands::auth::logout(&settings, &mut state, &state_path),
        Some(("init", _)) => {
            let path = match settings.database.clone() {
                Some(p) => p,
                None => sqlite::db_path()?,
            };
            SqliteBackend::open(&path)?;
            println!("Database initialized at {}", path.display());
            return Ok(());
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
        _ => {}
    }

    let backend = backend::connect(&settings, state.active_token(Utc::now().timestamp()))?;
    let mut store = TransactionsStore::new(backend);
    store.per_page = settings.per_page;
    store.time_format = settings.time_format;
    let theme = state.theme;

    match matches.subcommand() {
        Some(("dashboard", sub)) => commands::dashboard::handle(&mut store, theme, sub)?,
        Some(("years", sub)) => commands::transactions::years(&mut store, sub)?,
        Some(("months", sub)) => commands::transactions::months(&mut store, sub)?,
        Some(("income", sub)) => commands::income::handle(&mut store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut store, theme, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut store, theme, sub)?,
        Some(("asset", sub)) => commands::assets::handle(&mut store, theme, sub)?,
        Some(("export", sub)) => commands::exporter::handle(store.backend(), sub)?,
        Some(("restore", sub)) => commands::restore::handle(store.backend(), theme, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
