// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::rupiah::{format_rupiah, parse_rupiah, parse_rupiah_exact};
use dompet::utils::parse_amount;
use rust_decimal::Decimal;

#[test]
fn formats_with_dot_grouping() {
    assert_eq!(format_rupiah(&Decimal::ZERO), "Rp0");
    assert_eq!(format_rupiah(&Decimal::from(999)), "Rp999");
    assert_eq!(format_rupiah(&Decimal::from(1_000)), "Rp1.000");
    assert_eq!(format_rupiah(&Decimal::from(1_500_000)), "Rp1.500.000");
    assert_eq!(format_rupiah(&Decimal::from(-25_000)), "Rp-25.000");
}

#[test]
fn fractions_use_comma_and_three_digits_at_most() {
    assert_eq!(format_rupiah(&Decimal::new(12345, 1)), "Rp1.234,5");
    assert_eq!(format_rupiah(&Decimal::new(1_23456, 5)), "Rp1,235");
    assert_eq!(format_rupiah(&Decimal::new(2500, 2)), "Rp25");
}

#[test]
fn parse_keeps_only_digits() {
    assert_eq!(parse_rupiah("Rp1.500.000"), Decimal::from(1_500_000));
    assert_eq!(parse_rupiah(" Rp 25.000 "), Decimal::from(25_000));
    assert_eq!(parse_rupiah(""), Decimal::ZERO);
    assert_eq!(parse_rupiah("Rp"), Decimal::ZERO);
}

#[test]
fn format_then_parse_round_trips_whole_amounts() {
    for x in [0_i64, 1, 7, 10, 999, 1_000, 12_345, 1_000_000, 987_654_321, 10_000_000_000] {
        let d = Decimal::from(x);
        assert_eq!(parse_rupiah(&format_rupiah(&d)), d, "value {x}");
    }
}

#[test]
fn amounts_accept_plain_and_rupiah_forms() {
    assert_eq!(parse_amount("25000").unwrap(), Decimal::from(25_000));
    assert_eq!(parse_amount("rp25.000").unwrap(), Decimal::from(25_000));
    assert_eq!(parse_amount("12.5").unwrap(), Decimal::new(125, 1));
    assert!(parse_amount("abc").is_err());
}

#[test]
fn rupiah_amounts_keep_sign_and_fraction() {
    let fraction = Decimal::new(125, 1);
    assert_eq!(parse_amount(&format_rupiah(&fraction)).unwrap(), fraction);
    assert_eq!(parse_amount("Rp-25.000").unwrap(), Decimal::from(-25_000));
    assert_eq!(parse_amount("Rp 1.234,5").unwrap(), Decimal::new(12345, 1));
    assert_eq!(parse_amount("Rp1500").unwrap(), Decimal::from(1_500));
    assert_eq!(parse_rupiah_exact("Rp1.234.567"), Some(Decimal::from(1_234_567)));
}

#[test]
fn malformed_or_oversized_rupiah_amounts_are_errors() {
    assert!(parse_amount("Rp1.5").is_err());
    assert!(parse_amount("Rp12,").is_err());
    assert!(parse_amount("Rp").is_err());
    assert!(parse_amount("Rp--5").is_err());
    let huge = format!("Rp{}", "9".repeat(40));
    assert!(parse_amount(&huge).is_err());
    assert_eq!(parse_rupiah_exact(&huge), None);
}
