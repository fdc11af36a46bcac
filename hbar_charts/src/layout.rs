// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outer/inner chart extents.
//!
//! The chart is arranged like a classic margin convention: an outer box of
//! `outer` size, and an inner plot of `width × height` offset by
//! `(margins.left, margins.top)`.

use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

/// Space reserved around the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Left gutter.
    pub left: f64,
    /// Right gutter.
    pub right: f64,
    /// Top gutter.
    pub top: f64,
    /// Bottom gutter.
    pub bottom: f64,
}

impl Margins {
    /// Uniform margins.
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    /// Replaces the horizontal margins.
    pub fn with_horizontal(self, h: HorizontalMargins) -> Self {
        Self {
            left: h.left,
            right: h.right,
            ..self
        }
    }

    /// Offset of the plot origin inside the outer box.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

/// The left/right pair produced by label fitting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HorizontalMargins {
    /// Left gutter.
    pub left: f64,
    /// Right gutter.
    pub right: f64,
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds.
    pub outer: Size,
    /// Margins between the outer bounds and the plot.
    pub margins: Margins,
    /// Plot width (never negative).
    pub width: f64,
    /// Plot height (never negative).
    pub height: f64,
}

impl ChartLayout {
    /// Arranges a plot inside `outer` with `margins`.
    pub fn arrange(outer: Size, margins: Margins) -> Self {
        Self {
            outer,
            margins,
            width: (outer.width - margins.left - margins.right).max(0.0),
            height: (outer.height - margins.top - margins.bottom).max(0.0),
        }
    }

    /// Plot size.
    pub fn inner(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_size_subtracts_margins() {
        let m = Margins::uniform(20.0).with_horizontal(HorizontalMargins {
            left: 34.0,
            right: 64.0,
        });
        let l = ChartLayout::arrange(Size::new(400.0, 160.0), m);
        assert_eq!(l.inner(), Size::new(302.0, 120.0));
        assert_eq!(m.offset(), Vec2::new(34.0, 20.0));
    }

    #[test]
    fn inner_size_never_goes_negative() {
        let l = ChartLayout::arrange(Size::new(30.0, 10.0), Margins::uniform(20.0));
        assert_eq!((l.width, l.height), (0.0, 0.0));
    }
}
