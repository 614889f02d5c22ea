// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Context;
use chrono::{NaiveTime, Timelike};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::rupiah::parse_rupiah_exact;
use crate::state::Theme;

const UA: &str = concat!("dompet/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> crate::error::Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12")]
    H12,
    #[serde(rename = "24")]
    H24,
}

impl std::str::FromStr for TimeFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim() {
            "12" => Ok(TimeFormat::H12),
            "24" => Ok(TimeFormat::H24),
            other => Err(anyhow::anyhow!("Invalid time format '{}', expected 12|24", other)),
        }
    }
}

pub fn parse_time(s: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .with_context(|| format!("Invalid time '{}', expected HH:MM", s))
}

/// Renders a stored `HH:MM[:SS]` time; unparseable values are shown as-is.
pub fn format_time(s: &str, fmt: TimeFormat) -> String {
    let Ok(t) = parse_time(s) else {
        return s.to_string();
    };
    match fmt {
        TimeFormat::H24 => t.format("%H:%M").to_string(),
        TimeFormat::H12 => {
            let (pm, hour) = t.hour12();
            format!(
                "{}:{:02} {}",
                hour,
                t.minute(),
                if pm { "PM" } else { "AM" }
            )
        }
    }
}

pub fn parse_decimal(s: &str) -> anyhow::Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Accepts a plain decimal (`150000`, `12.5`) or a Rupiah string
/// (`Rp150.000`, `Rp-2.500`, `Rp12,5`).
pub fn parse_amount(s: &str) -> anyhow::Result<Decimal> {
    let s = s.trim();
    if s.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("rp")) {
        return parse_rupiah_exact(s).with_context(|| {
            format!("Invalid Rupiah amount '{}', expected e.g. Rp1.500.000 or Rp12,5", s)
        });
    }
    parse_decimal(s)
}

pub fn parse_month_number(s: &str) -> anyhow::Result<u32> {
    let m: u32 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid month '{}', expected 1-12", s))?;
    if !(1..=12).contains(&m) {
        anyhow::bail!("Invalid month '{}', expected 1-12", s);
    }
    Ok(m)
}

pub fn pretty_table(theme: Theme, headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let header_color = match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Cyan,
    };
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h).fg(header_color)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
