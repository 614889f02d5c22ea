// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::backend::rest::{parse_content_range, PostgrestQuery};
use dompet::backend::{RestBackend, RowRange};
use dompet::models::{DailyExpense, Transaction};
use rust_decimal::Decimal;

fn pairs(q: &PostgrestQuery) -> Vec<(String, String)> {
    q.to_pairs()
}

fn kv(k: &str, v: &str) -> (String, String) {
    (k.to_string(), v.to_string())
}

#[test]
fn paged_expense_query() {
    let q = PostgrestQuery::new()
        .select("*")
        .eq("year", 2025)
        .eq("month", 3)
        .order("date", false)
        .range(RowRange::for_page(2, 10));
    assert_eq!(
        pairs(&q),
        vec![
            kv("select", "*"),
            kv("year", "eq.2025"),
            kv("month", "eq.3"),
            kv("order", "date.desc"),
            kv("offset", "10"),
            kv("limit", "10"),
        ]
    );
}

#[test]
fn distinct_year_query() {
    let q = PostgrestQuery::new()
        .select("year")
        .not_null("year")
        .order("year", false);
    assert_eq!(
        pairs(&q),
        vec![
            kv("select", "year"),
            kv("year", "not.is.null"),
            kv("order", "year.desc"),
        ]
    );
}

#[test]
fn multiple_orders_join_with_commas() {
    let q = PostgrestQuery::new()
        .order("month", true)
        .order("id", false)
        .limit(1);
    assert_eq!(
        pairs(&q),
        vec![kv("order", "month.asc,id.desc"), kv("limit", "1")]
    );
}

#[test]
fn content_range_totals() {
    assert_eq!(parse_content_range("0-9/42"), Some(42));
    assert_eq!(parse_content_range("*/0"), Some(0));
    assert_eq!(parse_content_range("0-9/*"), None);
    assert_eq!(parse_content_range("garbage"), None);
}

#[test]
fn table_urls_keep_base_path() {
    let b = RestBackend::new("https://abc.supabase.co", "anon").unwrap();
    assert_eq!(
        b.table_url("transactions").unwrap().as_str(),
        "https://abc.supabase.co/rest/v1/transactions"
    );
    let proxied = RestBackend::new("https://example.com/api", "anon").unwrap();
    assert_eq!(
        proxied.table_url("daily_expenses").unwrap().as_str(),
        "https://example.com/api/rest/v1/daily_expenses"
    );
    assert!(RestBackend::new("not a url", "anon").is_err());
}

#[test]
fn rows_decode_from_backend_json() {
    let tx: Transaction = serde_json::from_str(
        r#"{"id": 4, "year": 2025, "month": 3, "amount": null, "created_at": "2025-03-01T10:00:00+00:00"}"#,
    )
    .unwrap();
    assert_eq!(tx.amount, Decimal::ZERO);

    let e: DailyExpense = serde_json::from_str(
        r#"{"id": 9, "year": 2025, "month": 3, "day": 2, "date": "2025-03-02",
            "time": "08:15", "description": "kopi", "amount": 18000.5}"#,
    )
    .unwrap();
    assert_eq!(e.amount, Decimal::new(180005, 1));
    assert_eq!(e.description.as_deref(), Some("kopi"));
}
