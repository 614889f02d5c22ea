// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Indonesian Rupiah display: `.` groups thousands, `,` marks decimals.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());
static RUPIAH_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:rp)(-)?(\d{1,3}(?:\.\d{3})*|\d+)(?:,(\d+))?$").unwrap()
});

/// `Rp1.500.000`, `Rp-2.500`, `Rp12,5`; zero renders as `Rp0`.
pub fn format_rupiah(value: &Decimal) -> String {
    let rounded = value.round_dp(3).normalize();
    if rounded.is_zero() {
        return "Rp0".to_string();
    }
    let negative = rounded.is_sign_negative();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::from("Rp");
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Keeps only the digits of `s`; no digits at all parses as zero. Sign and
/// decimal comma are dropped, as is anything too large for a `Decimal`.
pub fn parse_rupiah(s: &str) -> Decimal {
    let digits = NON_DIGIT.replace_all(s, "");
    if digits.is_empty() {
        return Decimal::ZERO;
    }
    digits.parse::<Decimal>().unwrap_or_default()
}

/// Reads `format_rupiah` output back, keeping the sign and the `,` fraction.
/// `None` for malformed grouping or values too large for a `Decimal`.
pub fn parse_rupiah_exact(s: &str) -> Option<Decimal> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let caps = RUPIAH_AMOUNT.captures(&compact)?;
    let mut plain = String::new();
    if caps.get(1).is_some() {
        plain.push('-');
    }
    plain.push_str(&caps[2].replace('.', ""));
    if let Some(frac) = caps.get(3) {
        plain.push('.');
        plain.push_str(frac.as_str());
    }
    plain.parse().ok()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
