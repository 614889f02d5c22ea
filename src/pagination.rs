// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backend::RowRange;

pub const PER_PAGE_OPTIONS: [u64; 4] = [10, 20, 50, 100];

/// `ceil(total / per_page)`; zero rows means zero pages.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1))
}

/// Page cursor for a list of `total` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub per_page: u64,
    pub current_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            per_page: PER_PAGE_OPTIONS[0],
            current_page: 1,
        }
    }
}

impl Pagination {
    pub fn total_pages(&self, total: u64) -> u64 {
        total_pages(total, self.per_page)
    }

    pub fn next_page(&mut self, total: u64) {
        if self.current_page < self.total_pages(total) {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn set_per_page(&mut self, n: u64) {
        self.per_page = n.max(1);
        self.current_page = 1;
    }

    pub fn range(&self) -> RowRange {
        RowRange::for_page(self.current_page, self.per_page)
    }
}
