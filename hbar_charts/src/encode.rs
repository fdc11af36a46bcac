// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-bar attribute generators.
//!
//! Everything here is a pure function of the current scales, the label padding
//! and one datum, so re-encoding unchanged inputs yields identical attributes.

use hbar_scene::{RectNode, TextAnchor, TextNode};
use kurbo::{Line, Point, Vec2};
use peniko::{Brush, Color};

use crate::data::Datum;
use crate::geometry::BarScales;

/// Vertical text shift centering a label on its bar, in em.
pub const LABEL_DY_EM: f64 = 0.35;

/// The two sign-based bar tints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fills {
    /// Tint for values `>= 0`.
    pub positive: Color,
    /// Tint for values `< 0`.
    pub negative: Color,
}

/// Position and anchor of a label relative to its bar group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelAttrs {
    /// Horizontal anchor position.
    pub x: f64,
    /// Vertical anchor position (the bar's center line).
    pub y: f64,
    /// Baseline shift in em.
    pub dy_em: f64,
    /// Which end of the text sits at `x`.
    pub anchor: TextAnchor,
}

impl LabelAttrs {
    /// Writes position, shift and anchor into `text`, leaving content and paint alone.
    pub fn apply(&self, text: &mut TextNode) {
        text.pos = Point::new(self.x, self.y);
        text.dy_em = self.dy_em;
        text.anchor = self.anchor;
        text.stroke_width = 0.0;
    }
}

/// Attribute generator bound to one layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Encoder {
    scales: BarScales,
    label_padding: f64,
    fills: Fills,
}

impl Encoder {
    /// Creates an encoder.
    pub fn new(scales: BarScales, label_padding: f64, fills: Fills) -> Self {
        Self {
            scales,
            label_padding,
            fills,
        }
    }

    fn zero(&self) -> f64 {
        self.scales.x.map(0.0)
    }

    /// Group origin: `(x(min(0, v)), y(index))`.
    ///
    /// Negative bars start left of the zero line so a positive-width rect grows towards it.
    pub fn group_translate(&self, index: usize, value: f64) -> Vec2 {
        let v = finite_or_zero(value);
        Vec2::new(self.scales.x.map(v.min(0.0)), self.scales.y.position(index))
    }

    /// The bar rectangle.
    pub fn bar(&self, datum: &Datum) -> RectNode {
        let v = finite_or_zero(datum.value);
        RectNode {
            width: (self.scales.x.map(v) - self.zero()).abs(),
            height: self.scales.bar_thickness(),
            fill: Brush::Solid(self.fill(datum)),
            stroke_width: 0.0,
        }
    }

    /// Explicit datum color, else the tint for the value's sign.
    pub fn fill(&self, datum: &Datum) -> Color {
        match datum.color {
            Some(c) => c,
            None if datum.value < 0.0 => self.fills.negative,
            None => self.fills.positive,
        }
    }

    /// Value label, just beyond the far end of the bar.
    pub fn value_label(&self, value: f64) -> LabelAttrs {
        let v = finite_or_zero(value);
        let (x, anchor) = if v < 0.0 {
            (-self.label_padding, TextAnchor::End)
        } else {
            (
                self.scales.x.map(v) - self.zero() + self.label_padding,
                TextAnchor::Start,
            )
        };
        self.label(x, anchor)
    }

    /// Group label, on the zero-line side opposite the value label.
    pub fn group_label(&self, value: f64) -> LabelAttrs {
        let v = finite_or_zero(value);
        let (x, anchor) = if v < 0.0 {
            (
                self.zero() - self.scales.x.map(v) + self.label_padding,
                TextAnchor::Start,
            )
        } else {
            (-self.label_padding, TextAnchor::End)
        };
        self.label(x, anchor)
    }

    /// Zero line spanning the plot height.
    pub fn axis(&self, height: f64) -> Line {
        let x = self.zero();
        Line::new((x, 0.0), (x, height))
    }

    fn label(&self, x: f64, anchor: TextAnchor) -> LabelAttrs {
        LabelAttrs {
            x,
            y: self.scales.bar_thickness() / 2.0,
            dy_em: LABEL_DY_EM,
            anchor,
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
