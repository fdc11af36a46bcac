// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value classification and the value-axis domain.

/// Sign composition of a dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignPattern {
    /// No negative values (includes empty and all-zero data).
    AllPositive,
    /// Only negative values.
    AllNegative,
    /// Both positive and negative values.
    Mixed,
}

/// Extremes of a dataset, with the row of the first occurrence of each.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueExtremes {
    /// Smallest value (`0` for empty data).
    pub min: f64,
    /// Largest value (`0` for empty data).
    pub max: f64,
    /// `max > 0`.
    pub has_positive: bool,
    /// `min < 0`.
    pub has_negative: bool,
    /// Row holding `min`.
    pub min_index: Option<usize>,
    /// Row holding `max`.
    pub max_index: Option<usize>,
}

impl Default for ValueExtremes {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            has_positive: false,
            has_negative: false,
            min_index: None,
            max_index: None,
        }
    }
}

impl ValueExtremes {
    /// Scans `values`, skipping non-finite entries.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Self {
        let mut out = Self::default();
        let mut skipped = 0_usize;
        for (row, v) in values.into_iter().enumerate() {
            if !v.is_finite() {
                skipped += 1;
                continue;
            }
            if out.min_index.is_none() || v < out.min {
                out.min = v;
                out.min_index = Some(row);
            }
            if out.max_index.is_none() || v > out.max {
                out.max = v;
                out.max_index = Some(row);
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, "ignoring non-finite values when computing extremes");
        }
        out.has_positive = out.max > 0.0;
        out.has_negative = out.min < 0.0;
        out
    }

    /// Classifies the sign composition.
    pub fn sign_pattern(&self) -> SignPattern {
        match (self.has_positive, self.has_negative) {
            (true, true) => SignPattern::Mixed,
            (false, true) => SignPattern::AllNegative,
            _ => SignPattern::AllPositive,
        }
    }

    /// Returns the value-axis domain before "nice" rounding.
    ///
    /// Zero always lies within or on the boundary of the result.
    pub fn x_domain(&self) -> (f64, f64) {
        match self.sign_pattern() {
            SignPattern::Mixed => (self.min, self.max),
            SignPattern::AllNegative => (self.min, 0.0),
            SignPattern::AllPositive => (0.0, self.max),
        }
    }
}
