// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::utils::TimeFormat;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("id.dompet", "Dompet", "dompet"));

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine platform-specific data dir",
        ))
    })
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Rest,
    Local,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendKind,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    /// Local database file; defaults to the platform data dir.
    pub database: Option<PathBuf>,
    pub per_page: u64,
    pub time_format: TimeFormat,
    /// `tracing` filter directive, e.g. `info` or `dompet=debug`.
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Rest,
            supabase_url: None,
            supabase_anon_key: None,
            database: None,
            per_page: 10,
            time_format: TimeFormat::H12,
            log: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Reads the optional TOML file then `DOMPET_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("DOMPET"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn credentials(&self) -> Result<(&str, &str)> {
        match (self.supabase_url.as_deref(), self.supabase_anon_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Ok((url, key)),
            _ => Err(Error::MissingCredentials),
        }
    }
}
