// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value label formatting.

use alloc::format;
use alloc::string::String;

use serde::{Deserialize, Serialize};

/// Turns a bar value into its label text.
pub trait ValueFormatter {
    /// Formats `value`.
    fn format(&self, value: f64) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(f64) -> String,
{
    fn format(&self, value: f64) -> String {
        self(value)
    }
}

/// Fixed-precision decimal format with optional thousands grouping.
///
/// The default (`precision: 2, grouping: true`) renders `1234.5` as `"1,234.50"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Digits after the decimal point.
    pub precision: usize,
    /// Whether to separate thousands in the integer part with `,`.
    pub grouping: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            precision: 2,
            grouping: true,
        }
    }
}

impl NumberFormat {
    /// Creates a format with `precision` decimals and grouping enabled.
    pub fn new(precision: usize) -> Self {
        Self {
            precision,
            grouping: true,
        }
    }

    /// Enables or disables thousands grouping.
    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.grouping = grouping;
        self
    }
}

impl ValueFormatter for NumberFormat {
    fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return String::from("NaN");
        }
        if value.is_infinite() {
            return String::from(if value < 0.0 { "-∞" } else { "∞" });
        }
        let digits = format!("{:.*}", self.precision, value.abs());
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        // Values that round to zero lose their sign.
        if value < 0.0 && digits.bytes().any(|b| matches!(b, b'1'..=b'9')) {
            out.push('-');
        }
        if self.grouping {
            let len = int_part.len();
            for (i, ch) in int_part.chars().enumerate() {
                if i > 0 && (len - i) % 3 == 0 {
                    out.push(',');
                }
                out.push(ch);
            }
        } else {
            out.push_str(int_part);
        }
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn default_groups_thousands_with_two_decimals() {
        let f = NumberFormat::default();
        assert_eq!(f.format(1234.5), "1,234.50");
        assert_eq!(f.format(7.0), "7.00");
        assert_eq!(f.format(-1_000_000.0), "-1,000,000.00");
        assert_eq!(f.format(999.999), "1,000.00");
    }

    #[test]
    fn negative_zero_prints_without_sign() {
        let f = NumberFormat::default();
        assert_eq!(f.format(-0.0), "0.00");
        assert_eq!(f.format(-0.001), "0.00");
    }

    #[test]
    fn precision_zero_and_no_grouping() {
        let f = NumberFormat::new(0).with_grouping(false);
        assert_eq!(f.format(12345.4), "12345");
    }

    #[test]
    fn closures_are_formatters() {
        let f = |v: f64| v.to_string();
        assert_eq!(ValueFormatter::format(&f, 3.5), "3.5");
    }
}
