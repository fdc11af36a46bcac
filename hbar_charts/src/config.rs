// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::format::NumberFormat;

/// User-facing settings of a [`HorizontalBarChart`](crate::HorizontalBarChart).
///
/// Every field has a default, so a partial JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizontalBarChartConfig {
    /// Preferred outer height, before bar thickness bounds are enforced.
    pub default_outer_height: f64,
    /// Gap between labels and bars (or the zero line); also the top and bottom margin.
    pub label_padding: f64,
    /// Fraction of each band slot reserved for the gutter between bars.
    pub bar_padding: f64,
    /// Lower bound on the band slot, `None` for unbounded.
    pub min_bar_thickness: Option<f64>,
    /// Upper bound on the band slot, `None` for unbounded.
    pub max_bar_thickness: Option<f64>,
    /// Cap on the margin reserved for group labels, `None` for no cap.
    pub max_label_width: Option<f64>,
    /// Tint for bars with values `>= 0`.
    #[serde(with = "crate::css_color")]
    pub positive_fill: Color,
    /// Tint for bars with values `< 0`.
    #[serde(with = "crate::css_color")]
    pub negative_fill: Color,
    /// Label font size.
    pub font_size: f64,
    /// Whether hover handlers do anything.
    pub interactive: bool,
    /// Name line shown in the tooltip next to the formatted value.
    pub tooltip_value_display_name: String,
    /// Default value label format.
    pub value_format: NumberFormat,
}

impl Default for HorizontalBarChartConfig {
    fn default() -> Self {
        Self {
            default_outer_height: 500.0,
            label_padding: 20.0,
            bar_padding: 0.2,
            min_bar_thickness: Some(20.0),
            max_bar_thickness: Some(60.0),
            max_label_width: None,
            positive_fill: Color::from_rgb8(0x8c, 0x8c, 0x8c),
            negative_fill: Color::from_rgb8(0x41, 0x41, 0x41),
            font_size: 12.0,
            interactive: true,
            tooltip_value_display_name: String::from("Value"),
            value_format: NumberFormat::default(),
        }
    }
}

impl HorizontalBarChartConfig {
    /// Sets the preferred outer height.
    pub fn with_default_outer_height(mut self, height: f64) -> Self {
        self.default_outer_height = height;
        self
    }

    /// Sets the label padding.
    pub fn with_label_padding(mut self, padding: f64) -> Self {
        self.label_padding = padding;
        self
    }

    /// Sets the bar gutter fraction.
    pub fn with_bar_padding(mut self, padding: f64) -> Self {
        self.bar_padding = padding;
        self
    }

    /// Sets both bar thickness bounds.
    pub fn with_bar_thickness(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_bar_thickness = min;
        self.max_bar_thickness = max;
        self
    }

    /// Caps the group label margin.
    pub fn with_max_label_width(mut self, width: Option<f64>) -> Self {
        self.max_label_width = width;
        self
    }

    /// Sets the sign-based tints.
    pub fn with_fills(mut self, positive: Color, negative: Color) -> Self {
        self.positive_fill = positive;
        self.negative_fill = negative;
        self
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Enables or disables hover handling.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Sets the tooltip's value name.
    pub fn with_tooltip_value_display_name(mut self, name: impl Into<String>) -> Self {
        self.tooltip_value_display_name = name.into();
        self
    }

    /// Sets the default value format.
    pub fn with_value_format(mut self, format: NumberFormat) -> Self {
        self.value_format = format;
        self
    }

    /// Checks that every length is finite and non-negative and the bounds are ordered.
    pub fn validate(&self) -> ChartResult<()> {
        if !(0.0..=1.0).contains(&self.bar_padding) {
            return Err(ChartError::BarPadding(self.bar_padding));
        }
        check_length("default_outer_height", self.default_outer_height)?;
        check_length("label_padding", self.label_padding)?;
        check_length("font_size", self.font_size)?;
        for (name, value) in [
            ("min_bar_thickness", self.min_bar_thickness),
            ("max_bar_thickness", self.max_bar_thickness),
            ("max_label_width", self.max_label_width),
        ] {
            if let Some(v) = value {
                check_length(name, v)?;
            }
        }
        if let (Some(min), Some(max)) = (self.min_bar_thickness, self.max_bar_thickness)
            && min > max
        {
            return Err(ChartError::ThicknessBounds { min, max });
        }
        Ok(())
    }
}

fn check_length(name: &'static str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidLength { name, value })
    }
}
