// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Monthly aggregate: income minus that month's daily expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub year: i32,
    pub month: u32,
    #[serde(default, deserialize_with = "nullable_decimal")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub year: i32,
    pub month: u32,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyExpense {
    pub id: i64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable_decimal")]
    pub amount: Decimal,
}

/// Fields a user supplies when recording or editing an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub time: Option<String>,
    pub description: Option<String>,
    pub amount: Decimal,
}

/// Row shape written to `daily_expenses`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub date: String,
    pub time: Option<String>,
    pub description: Option<String>,
    pub amount: Decimal,
}

impl ExpenseInput {
    pub fn date_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    pub fn validate(&self) -> Result<()> {
        if NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_none() {
            return Err(Error::Invalid(format!(
                "no such date {}",
                self.date_string()
            )));
        }
        if let Some(t) = self.time.as_deref() {
            crate::utils::parse_time(t).map_err(|e| Error::Invalid(e.to_string()))?;
        }
        Ok(())
    }

    pub fn to_record(&self) -> ExpenseRecord {
        ExpenseRecord {
            year: self.year,
            month: self.month,
            day: self.day,
            date: self.date_string(),
            time: self.time.clone(),
            description: self.description.clone(),
            amount: self.amount,
        }
    }
}

impl From<&DailyExpense> for ExpenseInput {
    fn from(e: &DailyExpense) -> Self {
        Self {
            year: e.year,
            month: e.month,
            day: e.day,
            time: e.time.clone(),
            description: e.description.clone(),
            amount: e.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalAsset {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable_decimal")]
    pub total_asset: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAsset {
    pub name: String,
    pub total_asset: Decimal,
}

/// Outcome of an upsert-by-lookup on the monthly aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsertOutcome {
    pub exists: bool,
    pub record: Transaction,
}

// Backend numeric columns may come back as null; those count as zero.
fn nullable_decimal<'de, D>(d: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(d)?.unwrap_or_default())
}
