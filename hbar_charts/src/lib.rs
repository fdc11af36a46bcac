// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal bar charts for `hbar_scene`.
//!
//! This crate turns a sequence of labeled values into positioned bars, value
//! labels, category labels and a zero line:
//! - **Scales** map values to horizontal pixels (over a "nice" domain) and bar
//!   indices to vertical bands.
//! - **Geometry** bounds the bar thickness and derives the outer height.
//! - **Encoders** are pure per-bar attribute generators.
//! - **Label fitting** measures the placed labels and corrects the left/right
//!   margins in a single pass, then trims category labels to their budget.
//!
//! [`HorizontalBarChart::render`] sequences all of it against a [`hbar_scene::Scene`].
//!
//! ```
//! use hbar_charts::{Datum, HorizontalBarChart, HorizontalBarChartConfig};
//! use hbar_scene::Scene;
//!
//! let mut chart = HorizontalBarChart::new(HorizontalBarChartConfig::default(), 400.0)?;
//! chart.set_data(vec![Datum::new("Apples", 3.0), Datum::new("Pears", -1.5)]);
//! let mut scene = Scene::default();
//! chart.render(&mut scene)?;
//! assert!(scene.to_svg_string().contains("Apples"));
//! # Ok::<(), hbar_charts::ChartError>(())
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod chart;
#[cfg(test)]
mod chart_tests;
mod config;
mod css_color;
mod data;
mod encode;
mod error;
mod extent;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod geometry;
mod label_fit;
mod layout;
mod scale;
mod sort;
mod tooltip;
mod trim;

pub use chart::{
    AXIS_CLASS, BAR_CLASS, GROUP_CLASS, HOVERED_CLASS, HorizontalBarChart, RenderSummary,
    VALUE_CLASS,
};
pub use config::HorizontalBarChartConfig;
pub use css_color::{parse_css_color, to_hex};
pub use data::Datum;
pub use encode::{Encoder, Fills, LABEL_DY_EM, LabelAttrs};
pub use error::{ChartError, ChartResult};
pub use extent::{SignPattern, ValueExtremes};
pub use format::{NumberFormat, ValueFormatter};
pub use geometry::{
    BarScales, ScaleCache, ScalesKey, max_outer_height, min_outer_height, outer_height,
};
pub use label_fit::{
    EXTRA_LABEL_PADDING, LabelWidths, compute_margins, group_label_budget, max_or_zero,
};
pub use layout::{ChartLayout, HorizontalMargins, Margins};
pub use scale::{DEFAULT_NICE_TICKS, ScaleBand, ScaleLinear, ScaleLinearSpec};
pub use sort::{DataSorter, SortBy, SortKey, SortOrder, Unsorted};
pub use tooltip::{NoTooltip, Tooltip, TooltipContent};
pub use trim::{LabelTrimmer, trim_str};
