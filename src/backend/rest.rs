// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt::Display;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_RANGE;
use reqwest::{Method, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Backend, Page, PeriodFilter, RowRange, DAILY_EXPENSES, TOTAL_ASSETS, TRANSACTIONS};
use crate::error::{Error, Result};
use crate::models::{
    DailyExpense, ExpenseRecord, NewAsset, NewTransaction, TotalAsset, Transaction,
    TransactionPatch,
};
use crate::state::Session;
use crate::utils::http_client;

/// Query-string builder for PostgREST table endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostgrestQuery {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    offset: Option<u64>,
    limit: Option<u64>,
}

impl PostgrestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub fn not_null(mut self, column: &str) -> Self {
        self.filters
            .push((column.to_string(), "not.is.null".to_string()));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.order.push(format!("{column}.{dir}"));
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn range(mut self, range: RowRange) -> Self {
        self.offset = Some(range.from);
        self.limit = Some(range.limit());
        self
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(sel) = &self.select {
            pairs.push(("select".to_string(), sel.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            pairs.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Total row count from a `Content-Range` header such as `0-9/42` or `*/0`.
pub fn parse_content_range(value: &str) -> Option<u64> {
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    email: Option<String>,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AssetValue {
    #[serde(default)]
    total_asset: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct AmountValue {
    #[serde(default)]
    amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct YearValue {
    year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct MonthValue {
    month: Option<u32>,
}

/// Hosted backend reached over HTTPS (`/rest/v1` and `/auth/v1`).
#[derive(Debug, Clone)]
pub struct RestBackend {
    base_url: Url,
    anon_key: String,
    access_token: Option<String>,
    http: Client,
}

impl RestBackend {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| Error::Invalid(format!("invalid backend url: {err}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            anon_key: anon_key.to_string(),
            access_token: None,
            http: http_client()?,
        })
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    pub fn table_url(&self, table: &str) -> Result<Url> {
        self.base_url
            .join(&format!("rest/v1/{table}"))
            .map_err(|err| Error::Invalid(format!("invalid backend url: {err}")))
    }

    fn auth_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(&format!("auth/v1/{path}"))
            .map_err(|err| Error::Invalid(format!("invalid backend url: {err}")))
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    fn request(&self, method: Method, table: &str, query: &PostgrestQuery) -> Result<RequestBuilder> {
        let url = self.table_url(table)?;
        debug!(%method, table, query = ?query.to_pairs(), "backend request");
        Ok(self
            .http
            .request(method, url)
            .query(&query.to_pairs())
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer()))
    }

    fn select<T: DeserializeOwned>(&self, table: &str, query: &PostgrestQuery) -> Result<Vec<T>> {
        let res = check(self.request(Method::GET, table, query)?.send()?)?;
        Ok(res.json()?)
    }

    fn select_page<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &PostgrestQuery,
    ) -> Result<Page<T>> {
        let res = check(
            self.request(Method::GET, table, query)?
                .header("Prefer", "count=exact")
                .send()?,
        )?;
        let count = res
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range)
            .unwrap_or(0);
        let rows: Vec<T> = res.json()?;
        Ok(Page { rows, count })
    }

    fn insert<B: Serialize, T: DeserializeOwned>(&self, table: &str, body: &B) -> Result<T> {
        info!(table, "insert");
        let res = check(
            self.request(Method::POST, table, &PostgrestQuery::new())?
                .header("Prefer", "return=representation")
                .json(&[body])
                .send()?,
        )?;
        let mut rows: Vec<T> = res.json()?;
        if rows.is_empty() {
            return Err(Error::Invalid(format!("insert into {table} returned no rows")));
        }
        Ok(rows.remove(0))
    }

    fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &'static str,
        id: i64,
        body: &B,
    ) -> Result<T> {
        info!(table, id, "update");
        let res = check(
            self.request(Method::PATCH, table, &PostgrestQuery::new().eq("id", id))?
                .header("Prefer", "return=representation")
                .json(body)
                .send()?,
        )?;
        let mut rows: Vec<T> = res.json()?;
        if rows.is_empty() {
            return Err(Error::NotFound { table, id });
        }
        Ok(rows.remove(0))
    }

    /// Password grant against the auth endpoint.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let mut url = self.auth_url("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        info!(email, "signing in");
        let res = check(
            self.http
                .post(url)
                .header("apikey", &self.anon_key)
                .json(&PasswordGrant { email, password })
                .send()?,
        )?;
        let auth: AuthResponse = res.json()?;
        Ok(Session {
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
            email: auth
                .user
                .and_then(|u| u.email)
                .or_else(|| Some(email.to_string())),
            expires_at: auth.expires_at,
        })
    }

    pub fn sign_out(&self) -> Result<()> {
        if self.access_token.is_none() {
            return Ok(());
        }
        let url = self.auth_url("logout")?;
        check(
            self.http
                .post(url)
                .header("apikey", &self.anon_key)
                .bearer_auth(self.bearer())
                .send()?,
        )?;
        Ok(())
    }
}

fn check(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body: serde_json::Value = res.json().unwrap_or(serde_json::Value::Null);
    let message = ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|k| body.get(*k).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string());
    let code = body.get("code").map(|c| match c.as_str() {
        Some(s) => s.to_string(),
        None => c.to_string(),
    });
    Err(Error::Api {
        status: status.as_u16(),
        code,
        message,
    })
}

impl Backend for RestBackend {
    fn list_years(&self) -> Result<Vec<i32>> {
        let rows: Vec<YearValue> = self.select(
            TRANSACTIONS,
            &PostgrestQuery::new()
                .select("year")
                .not_null("year")
                .order("year", false),
        )?;
        let mut years: Vec<i32> = rows.into_iter().filter_map(|r| r.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Ok(years)
    }

    fn list_months(&self, year: i32) -> Result<Vec<u32>> {
        let rows: Vec<MonthValue> = self.select(
            TRANSACTIONS,
            &PostgrestQuery::new()
                .select("month")
                .eq("year", year)
                .not_null("month")
                .order("month", true),
        )?;
        let mut months: Vec<u32> = rows.into_iter().filter_map(|r| r.month).collect();
        months.sort_unstable();
        months.dedup();
        Ok(months)
    }

    fn transactions_page(
        &self,
        filter: PeriodFilter,
        range: RowRange,
    ) -> Result<Page<Transaction>> {
        let mut query = PostgrestQuery::new()
            .select("*")
            .not_null("year")
            .not_null("month")
            .order("created_at", false);
        if let Some(year) = filter.year {
            query = query.eq("year", year);
        }
        if let Some(month) = filter.month {
            query = query.eq("month", month);
        }
        self.select_page(TRANSACTIONS, &query.range(range))
    }

    fn find_transaction(&self, year: i32, month: u32) -> Result<Option<Transaction>> {
        let rows: Vec<Transaction> = self.select(
            TRANSACTIONS,
            &PostgrestQuery::new()
                .select("*")
                .eq("year", year)
                .eq("month", month)
                .limit(1),
        )?;
        Ok(rows.into_iter().next())
    }

    fn insert_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        self.insert(TRANSACTIONS, tx)
    }

    fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction> {
        self.update(TRANSACTIONS, id, patch)
    }

    fn transactions_for_year(&self, year: i32) -> Result<Vec<Transaction>> {
        self.select(
            TRANSACTIONS,
            &PostgrestQuery::new()
                .select("*")
                .eq("year", year)
                .not_null("month")
                .order("month", true),
        )
    }

    fn expenses_page(&self, year: i32, month: u32, range: RowRange) -> Result<Page<DailyExpense>> {
        self.select_page(
            DAILY_EXPENSES,
            &PostgrestQuery::new()
                .select("*")
                .eq("year", year)
                .eq("month", month)
                .order("date", false)
                .range(range),
        )
    }

    fn expense_amounts(&self, year: i32, month: u32) -> Result<Vec<Decimal>> {
        let rows: Vec<AmountValue> = self.select(
            DAILY_EXPENSES,
            &PostgrestQuery::new()
                .select("amount")
                .eq("year", year)
                .eq("month", month),
        )?;
        Ok(rows
            .into_iter()
            .map(|r| r.amount.unwrap_or_default())
            .collect())
    }

    fn get_expense(&self, id: i64) -> Result<Option<DailyExpense>> {
        let rows: Vec<DailyExpense> = self.select(
            DAILY_EXPENSES,
            &PostgrestQuery::new().select("*").eq("id", id).limit(1),
        )?;
        Ok(rows.into_iter().next())
    }

    fn insert_expense(&self, rec: &ExpenseRecord) -> Result<DailyExpense> {
        self.insert(DAILY_EXPENSES, rec)
    }

    fn update_expense(&self, id: i64, rec: &ExpenseRecord) -> Result<DailyExpense> {
        self.update(DAILY_EXPENSES, id, rec)
    }

    fn delete_expense(&self, id: i64) -> Result<()> {
        info!(table = DAILY_EXPENSES, id, "delete");
        check(
            self.request(Method::DELETE, DAILY_EXPENSES, &PostgrestQuery::new().eq("id", id))?
                .send()?,
        )?;
        Ok(())
    }

    fn asset_values(&self) -> Result<Vec<Decimal>> {
        let rows: Vec<AssetValue> =
            self.select(TOTAL_ASSETS, &PostgrestQuery::new().select("total_asset"))?;
        Ok(rows
            .into_iter()
            .map(|r| r.total_asset.unwrap_or_default())
            .collect())
    }

    fn list_assets(&self) -> Result<Vec<TotalAsset>> {
        self.select(
            TOTAL_ASSETS,
            &PostgrestQuery::new().select("*").order("name", true),
        )
    }

    fn insert_asset(&self, asset: &NewAsset) -> Result<TotalAsset> {
        self.insert(TOTAL_ASSETS, asset)
    }
}
