// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Margin correction from measured label widths.

use crate::extent::{SignPattern, ValueExtremes};
use crate::layout::HorizontalMargins;

/// Slack added to every measured margin to absorb text-metric rounding.
pub const EXTRA_LABEL_PADDING: f64 = 4.0;

/// Measured widths of the placed labels, in row order.
#[derive(Clone, Copy, Debug)]
pub struct LabelWidths<'a> {
    /// Value label widths.
    pub values: &'a [f64],
    /// Group label widths.
    pub groups: &'a [f64],
}

/// Largest finite width, or `0` when there is none.
pub fn max_or_zero(widths: &[f64]) -> f64 {
    widths
        .iter()
        .copied()
        .filter(|w| w.is_finite())
        .fold(0.0, f64::max)
}

/// Computes left/right margins that fit the measured labels.
///
/// - All positive: group labels on the left (capped by `max_label_width`), value labels on the right.
/// - All negative: the mirror image.
/// - Mixed: each side fits the value label of the extreme row on that side. Wider
///   labels on rows nearer zero are not considered.
pub fn compute_margins(
    extremes: &ValueExtremes,
    widths: LabelWidths<'_>,
    label_padding: f64,
    max_label_width: Option<f64>,
) -> HorizontalMargins {
    let pad = label_padding + EXTRA_LABEL_PADDING;
    let capped = |w: f64| match max_label_width {
        Some(cap) => cap.min(w),
        None => w,
    };
    match extremes.sign_pattern() {
        SignPattern::AllPositive => HorizontalMargins {
            left: capped(max_or_zero(widths.groups) + pad),
            right: max_or_zero(widths.values) + pad,
        },
        SignPattern::AllNegative => HorizontalMargins {
            left: max_or_zero(widths.values) + pad,
            right: capped(max_or_zero(widths.groups) + pad),
        },
        SignPattern::Mixed => {
            let at = |row: Option<usize>| {
                row.and_then(|i| widths.values.get(i))
                    .copied()
                    .filter(|w| w.is_finite())
                    .unwrap_or(0.0)
            };
            HorizontalMargins {
                left: at(extremes.min_index) + pad,
                right: at(extremes.max_index) + pad,
            }
        }
    }
}

/// Width available to each group label once margins are final.
pub fn group_label_budget(
    pattern: SignPattern,
    margins: HorizontalMargins,
    label_padding: f64,
    outer_width: f64,
) -> f64 {
    match pattern {
        SignPattern::AllPositive => margins.left - label_padding,
        SignPattern::AllNegative => margins.right,
        SignPattern::Mixed => outer_width / 2.0,
    }
}
