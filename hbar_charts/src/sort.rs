// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordering of the finished data.

use serde::{Deserialize, Serialize};

use crate::data::Datum;

/// Produces the display order of the rows; row `0` is drawn at the top.
pub trait DataSorter {
    /// Reorders `data` in place.
    fn sort(&self, data: &mut [Datum]);
}

/// Keeps the input order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unsorted;

impl DataSorter for Unsorted {
    fn sort(&self, _data: &mut [Datum]) {}
}

/// What to sort by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Numeric value.
    #[default]
    Value,
    /// Category label (byte-wise).
    Label,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

/// Stable sort on one key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    /// Sort key.
    pub key: SortKey,
    /// Direction.
    pub order: SortOrder,
}

impl SortBy {
    /// Creates a sorter.
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

impl DataSorter for SortBy {
    fn sort(&self, data: &mut [Datum]) {
        data.sort_by(|a, b| {
            let ord = match self.key {
                SortKey::Value => a.value.total_cmp(&b.value),
                SortKey::Label => a.label.cmp(&b.label),
            };
            match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }
}
