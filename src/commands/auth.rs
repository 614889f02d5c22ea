// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{bail, Result};
use chrono::Utc;

use super::required;
use crate::backend::RestBackend;
use crate::config::{BackendKind, Settings};
use crate::state::LocalState;

fn rest_backend(settings: &Settings) -> Result<RestBackend> {
    if settings.backend == BackendKind::Local {
        bail!("The local database has no accounts; login only applies to the hosted backend");
    }
    let (url, key) = settings.credentials()?;
    Ok(RestBackend::new(url, key)?)
}

pub fn login(
    settings: &Settings,
    state: &mut LocalState,
    path: &Path,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let email: String = required(sub, "email")?;
    let password: String = required(sub, "password")?;
    let session = rest_backend(settings)?.sign_in(&email, &password)?;
    println!(
        "Signed in as {}",
        session.email.as_deref().unwrap_or(email.as_str())
    );
    state.session = Some(session);
    state.save(path)?;
    Ok(())
}

pub fn logout(settings: &Settings, state: &mut LocalState, path: &Path) -> Result<()> {
    let Some(token) = state.active_token(Utc::now().timestamp()) else {
        state.session = None;
        state.save(path)?;
        println!("Not signed in");
        return Ok(());
    };
    rest_backend(settings)?
        .with_access_token(Some(token))
        .sign_out()?;
    state.session = None;
    state.save(path)?;
    println!("Signed out");
    Ok(())
}
