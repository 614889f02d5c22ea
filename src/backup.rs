// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Year exports of the monthly aggregates and the batch restore that reads
//! them back.

use std::path::Path;
use std::str::FromStr;

use csv::ReaderBuilder;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => Err(Error::Invalid(format!(
                "unknown format '{other}' (use csv|json)"
            ))),
        }
    }
}

impl Format {
    /// Guesses from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Format::Csv,
            _ => Format::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestoreFailure {
    pub record: Value,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RestoreReport {
    pub inserted: u64,
    pub updated: u64,
    pub errors: Vec<RestoreFailure>,
}

/// Every monthly aggregate of `year`, ordered by month.
pub fn download_year_data(backend: &dyn Backend, year: i32) -> Result<Vec<Transaction>> {
    backend.transactions_for_year(year)
}

pub fn write_export(rows: &[Transaction], format: Format, out: &Path) -> Result<()> {
    match format {
        Format::Csv => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "year", "month", "amount", "created_at"])?;
            for r in rows {
                wtr.write_record([
                    r.id.to_string(),
                    r.year.to_string(),
                    r.month.to_string(),
                    r.amount.to_string(),
                    r.created_at.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            std::fs::write(out, serde_json::to_string_pretty(rows)?)?;
        }
    }
    Ok(())
}

/// Reads candidate records without validating them; that is left to
/// [`restore_transactions`] so bad rows are reported rather than fatal.
pub fn read_records(path: &Path, format: Format) -> Result<Vec<Value>> {
    match format {
        Format::Json => {
            let content = std::fs::read_to_string(path)?;
            match serde_json::from_str::<Value>(&content)? {
                Value::Array(items) => Ok(items),
                other => Err(Error::Invalid(format!(
                    "expected a JSON array of records, found {}",
                    kind_of(&other)
                ))),
            }
        }
        Format::Csv => {
            let mut rdr = ReaderBuilder::new()
                .has_headers(true)
                .trim(csv::Trim::All)
                .from_path(path)?;
            let headers = rdr.headers()?.clone();
            let mut out = Vec::new();
            for result in rdr.records() {
                let rec = result?;
                let obj: Map<String, Value> = headers
                    .iter()
                    .zip(rec.iter())
                    .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
                    .collect();
                out.push(Value::Object(obj));
            }
            Ok(out)
        }
    }
}

/// Upserts each record by (year, month), tallying outcomes instead of
/// stopping at the first bad record.
pub fn restore_transactions(backend: &dyn Backend, records: &[Value]) -> RestoreReport {
    let mut report = RestoreReport::default();
    for r in records {
        let Some((year, month, amount)) = validate(r) else {
            warn!(record = %r, "skipping record with invalid fields");
            report.errors.push(RestoreFailure {
                record: r.clone(),
                reason: "invalid fields".to_string(),
            });
            continue;
        };
        match restore_one(backend, year, month, amount) {
            Ok(true) => report.updated += 1,
            Ok(false) => report.inserted += 1,
            Err(err) => {
                warn!(record = %r, error = %err, "restore failed");
                report.errors.push(RestoreFailure {
                    record: r.clone(),
                    reason: match err {
                        Error::Api { message, .. } => message,
                        other => other.to_string(),
                    },
                });
            }
        }
    }
    report
}

// Ok(true) when an existing row was updated.
fn restore_one(backend: &dyn Backend, year: i32, month: u32, amount: Decimal) -> Result<bool> {
    match backend.find_transaction(year, month)? {
        Some(existing) => {
            backend.update_transaction(existing.id, &TransactionPatch { amount })?;
            Ok(true)
        }
        None => {
            backend.insert_transaction(&NewTransaction {
                year,
                month,
                amount,
            })?;
            Ok(false)
        }
    }
}

fn validate(r: &Value) -> Option<(i32, u32, Decimal)> {
    let year = number_field(r, "year")?;
    let month = number_field(r, "month")?;
    let amount = number_field(r, "amount")?;
    if !year.fract().is_zero() || !month.fract().is_zero() {
        return None;
    }
    let year: i32 = year.try_into().ok()?;
    let month: u32 = month.try_into().ok()?;
    if year == 0 || !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month, amount))
}

fn number_field(r: &Value, key: &str) -> Option<Decimal> {
    match r.get(key)? {
        Value::Number(n) => n
            .to_string()
            .parse()
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse().ok()
        }
        _ => None,
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
