// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::backend::Backend;
use crate::error::Result;

/// Net worth: the sum of `total_asset` over every asset row.
pub fn total_asset(backend: &dyn Backend) -> Result<Decimal> {
    Ok(backend.asset_values()?.into_iter().sum())
}
