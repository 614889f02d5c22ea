// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::backend::RowRange;
use dompet::pagination::{total_pages, Pagination, PER_PAGE_OPTIONS};

#[test]
fn total_pages_is_ceiling() {
    assert_eq!(total_pages(0, 10), 0);
    assert_eq!(total_pages(1, 10), 1);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(11, 10), 2);
    assert_eq!(total_pages(101, 20), 6);
}

#[test]
fn ranges_are_inclusive_windows() {
    assert_eq!(RowRange::for_page(1, 10), RowRange { from: 0, to: 9 });
    assert_eq!(RowRange::for_page(3, 20), RowRange { from: 40, to: 59 });
    assert_eq!(RowRange::for_page(0, 10), RowRange { from: 0, to: 9 });
    assert_eq!(RowRange::for_page(2, 50).limit(), 50);
}

#[test]
fn cursor_stays_within_bounds() {
    let mut p = Pagination::default();
    assert_eq!(p.per_page, PER_PAGE_OPTIONS[0]);

    p.prev_page();
    assert_eq!(p.current_page, 1);

    p.next_page(25);
    p.next_page(25);
    p.next_page(25);
    assert_eq!(p.current_page, 3);
    assert_eq!(p.range(), RowRange { from: 20, to: 29 });

    p.set_per_page(50);
    assert_eq!(p.current_page, 1);
    p.next_page(25);
    assert_eq!(p.current_page, 1);
}

#[test]
fn empty_list_has_no_next_page() {
    let mut p = Pagination::default();
    p.next_page(0);
    assert_eq!(p.current_page, 1);
    assert_eq!(p.total_pages(0), 0);
}

#[test]
fn huge_pages_saturate_instead_of_overflowing() {
    let r = RowRange::for_page(u64::MAX, 100);
    assert_eq!(r.from, i64::MAX as u64);
    assert_eq!(r.to, i64::MAX as u64);
    assert_eq!(r.limit(), 1);

    let r = RowRange::for_page(2, u64::MAX);
    assert!(r.from <= i64::MAX as u64);
    assert!(r.to <= i64::MAX as u64);
}
