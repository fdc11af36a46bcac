// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for chart label layout.
//!
//! Horizontal bar charts size their left/right margins from the rendered
//! width of their labels. The scene measures placed text nodes through the
//! small [`TextMeasurer`] interface defined here, so the chart engine never
//! depends on a particular shaping backend.
//!
//! This crate is `no_std`-friendly (it uses `alloc` for owned font family
//! names) and renderer-agnostic.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::sync::Arc;

/// A minimal single-line text measurement interface.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// Only the first line of `text` is considered; an empty line measures as
    /// [`TextMetrics::EMPTY`].
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Returns the advance width of `text`, the quantity label layout cares about.
    fn advance_width(&self, text: &str, style: &TextStyle) -> f64 {
        let width = self.measure(text, style).advance_width;
        if width.is_finite() { width.max(0.0) } else { 0.0 }
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the chart's coordinate system (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
}

impl TextStyle {
    /// Creates a sans-serif, normal-weight `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (the rendered length of the line).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
}

impl TextMetrics {
    /// Metrics of an empty line.
    pub const EMPTY: Self = Self {
        advance_width: 0.0,
        ascent: 0.0,
        descent: 0.0,
    };

    /// Returns `ascent + descent`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent
    }
}

fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("")
}

/// A heuristic measurer: every glyph advances by a fixed fraction of the em.
///
/// The default assumes an average glyph width of ~0.6em, which is close enough
/// for sans-serif Latin labels when no shaping backend is available.
#[derive(Clone, Copy, Debug)]
pub struct HeuristicTextMeasurer {
    /// Average glyph advance as a fraction of the font size.
    pub glyph_width_em: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            glyph_width_em: 0.6,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let line = first_line(text);
        if line.is_empty() {
            return TextMetrics::EMPTY;
        }
        TextMetrics {
            advance_width: self.glyph_width_em * style.font_size * line.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
        }
    }
}

/// A measurer with a constant per-character advance, independent of font size.
///
/// Widths are exact multiples of `advance`, which makes layout arithmetic
/// predictable in tests and for monospace output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance per character.
    pub advance: f64,
}

impl FixedAdvanceMeasurer {
    /// Creates a measurer advancing `advance` units per character.
    #[must_use]
    pub fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let line = first_line(text);
        if line.is_empty() {
            return TextMetrics::EMPTY;
        }
        TextMetrics {
            advance_width: self.advance * line.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn heuristic_width_scales_with_font_size_and_length() {
        let m = HeuristicTextMeasurer::default();
        let small = m.advance_width("abcd", &TextStyle::new(10.0));
        let large = m.advance_width("abcd", &TextStyle::new(20.0));
        assert!((small - 24.0).abs() < 1e-9, "got {small}");
        assert!((large - 2.0 * small).abs() < 1e-9, "got {large}");
    }

    #[test]
    fn empty_text_measures_zero() {
        let m = HeuristicTextMeasurer::default();
        assert_eq!(m.measure("", &TextStyle::default()), TextMetrics::EMPTY);
        assert_eq!(FixedAdvanceMeasurer::new(7.0).advance_width("", &TextStyle::default()), 0.0);
    }

    #[test]
    fn only_the_first_line_is_measured() {
        let m = FixedAdvanceMeasurer::new(10.0);
        assert_eq!(m.advance_width("ab\ncdef", &TextStyle::default()), 20.0);
    }

    #[test]
    fn non_finite_advance_is_reported_as_zero() {
        let m = FixedAdvanceMeasurer::new(f64::NAN);
        assert_eq!(m.advance_width("abc", &TextStyle::default()), 0.0);
    }

    #[test]
    fn boxed_measurer_delegates() {
        let m: Box<dyn TextMeasurer> = Box::new(FixedAdvanceMeasurer::new(3.0));
        assert_eq!(m.advance_width("abc", &TextStyle::default()), 9.0);
    }
}
