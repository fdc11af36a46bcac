// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The horizontal bar chart and its render pass.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hbar_scene::{GroupNode, Insert, LineNode, NodeId, NodePayload, RectNode, Scene, TextNode};
use kurbo::Size;

use crate::config::HorizontalBarChartConfig;
use crate::data::Datum;
use crate::encode::{Encoder, Fills};
use crate::error::{ChartError, ChartResult};
use crate::extent::ValueExtremes;
use crate::format::ValueFormatter;
use crate::geometry::{self, BarScales, ScaleCache, ScalesKey};
use crate::label_fit::{self, LabelWidths};
use crate::layout::{ChartLayout, Margins};
use crate::sort::{DataSorter, Unsorted};
use crate::tooltip::{Tooltip, TooltipContent};
use crate::trim::LabelTrimmer;

/// Class of the bar group of every row.
pub const BAR_CLASS: &str = "bar";
/// Class of value labels.
pub const VALUE_CLASS: &str = "value";
/// Class of group (category) labels.
pub const GROUP_CLASS: &str = "group";
/// Class of the zero-line axis group.
pub const AXIS_CLASS: &str = "y-axis";
/// Class added to a bar group while it is hovered.
pub const HOVERED_CLASS: &str = "hovered";

/// Stable ids of the nodes the chart owns.
#[derive(Clone, Copy, Debug)]
struct Ids {
    viewport: NodeId,
    bars: NodeId,
    axis: NodeId,
    axis_line: NodeId,
}

impl Ids {
    fn new() -> Self {
        let viewport = NodeId::ROOT.named("viewport");
        let axis = viewport.named("y-axis");
        Self {
            viewport,
            bars: viewport.named("bars"),
            axis,
            axis_line: axis.named("line"),
        }
    }

    fn row(&self, index: usize) -> NodeId {
        self.bars.child(index as u64)
    }
}

/// What one [`HorizontalBarChart::render`] call did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSummary {
    /// Bar groups created.
    pub entered: usize,
    /// Bar groups removed.
    pub exited: usize,
    /// Margins after the correction pass.
    pub margins: Margins,
    /// Whether the correction pass moved the margins.
    pub margins_changed: bool,
    /// Group labels shortened to fit their budget.
    pub trimmed: usize,
}

/// A horizontal bar chart: one bar per datum, growing left or right from a zero line.
///
/// The chart owns its data, scales and margins; the host owns the [`Scene`] it
/// renders into. Left and right margins are corrected after each render that
/// follows a data, width or configuration change, from the measured widths of
/// the labels actually placed in the scene.
pub struct HorizontalBarChart {
    config: HorizontalBarChartConfig,
    formatter: Option<Box<dyn ValueFormatter>>,
    sorter: Box<dyn DataSorter>,
    data: Vec<Datum>,
    extremes: ValueExtremes,
    outer_width: f64,
    margins: Margins,
    margins_resolved: bool,
    scales: ScaleCache,
    ids: Ids,
}

impl fmt::Debug for HorizontalBarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HorizontalBarChart")
            .field("config", &self.config)
            .field("custom_formatter", &self.formatter.is_some())
            .field("data", &self.data.len())
            .field("extremes", &self.extremes)
            .field("outer_width", &self.outer_width)
            .field("margins", &self.margins)
            .field("margins_resolved", &self.margins_resolved)
            .finish_non_exhaustive()
    }
}

impl HorizontalBarChart {
    /// Creates an empty chart `outer_width` wide.
    pub fn new(config: HorizontalBarChartConfig, outer_width: f64) -> ChartResult<Self> {
        config.validate()?;
        check_width(outer_width)?;
        let margins = Margins::uniform(config.label_padding);
        Ok(Self {
            config,
            formatter: None,
            sorter: Box::new(Unsorted),
            data: Vec::new(),
            extremes: ValueExtremes::default(),
            outer_width,
            margins,
            margins_resolved: false,
            scales: ScaleCache::default(),
            ids: Ids::new(),
        })
    }

    /// Replaces the configured number format with a custom formatter.
    pub fn with_value_formatter(mut self, formatter: impl ValueFormatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self.margins_resolved = false;
        self
    }

    /// Sets the sorter that orders the data, and re-sorts the current data.
    pub fn with_sorter(mut self, sorter: impl DataSorter + 'static) -> Self {
        self.sorter = Box::new(sorter);
        let data = core::mem::take(&mut self.data);
        self.set_data(data);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HorizontalBarChartConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: HorizontalBarChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.margins.top = config.label_padding;
        self.margins.bottom = config.label_padding;
        self.config = config;
        self.margins_resolved = false;
        Ok(())
    }

    /// Returns the finished (sorted) data.
    pub fn data(&self) -> &[Datum] {
        &self.data
    }

    /// Replaces the data. The sorter runs once here, not on every render.
    pub fn set_data(&mut self, mut data: Vec<Datum>) {
        self.sorter.sort(&mut data);
        self.extremes = ValueExtremes::of(data.iter().map(|d| d.value));
        self.data = data;
        self.margins_resolved = false;
    }

    /// Returns the extremes of the current data.
    pub fn extremes(&self) -> &ValueExtremes {
        &self.extremes
    }

    /// Returns the outer width.
    pub fn outer_width(&self) -> f64 {
        self.outer_width
    }

    /// Resizes the chart horizontally.
    pub fn set_outer_width(&mut self, outer_width: f64) -> ChartResult<()> {
        check_width(outer_width)?;
        if outer_width != self.outer_width {
            self.outer_width = outer_width;
            self.margins_resolved = false;
        }
        Ok(())
    }

    /// Returns the current margins, which may be provisional.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Returns the margins if a render has corrected them for the current inputs.
    pub fn resolved_margins(&self) -> Option<Margins> {
        self.margins_resolved.then_some(self.margins)
    }

    /// Outer height implied by the bar count and the thickness bounds.
    pub fn outer_height(&self) -> f64 {
        let n = self.data.len();
        let vertical = self.margins.top + self.margins.bottom;
        geometry::outer_height(
            self.config.default_outer_height,
            geometry::min_outer_height(n, self.config.min_bar_thickness, vertical),
            geometry::max_outer_height(n, self.config.max_bar_thickness, vertical),
        )
    }

    /// Outer size, margins and plot size under the current margins.
    pub fn layout(&self) -> ChartLayout {
        ChartLayout::arrange(Size::new(self.outer_width, self.outer_height()), self.margins)
    }

    /// Value and index scales under the current margins.
    pub fn scales(&mut self) -> BarScales {
        let layout = self.layout();
        self.scales.get(ScalesKey {
            width: layout.width,
            height: layout.height,
            domain: self.extremes.x_domain(),
            num_bars: self.data.len(),
            bar_padding: self.config.bar_padding,
        })
    }

    /// Formats a value with the custom formatter, or the configured number format.
    pub fn format_value(&self, value: f64) -> String {
        match &self.formatter {
            Some(f) => f.format(value),
            None => self.config.value_format.format(value),
        }
    }

    /// Tooltip content for `row`.
    pub fn tooltip_content(&self, row: usize) -> Option<TooltipContent> {
        let datum = self.data.get(row)?;
        Some(TooltipContent {
            label: datum.label.clone(),
            name: self.config.tooltip_value_display_name.clone(),
            value: self.format_value(datum.value),
        })
    }

    /// Renders into `scene`, correcting the horizontal margins from measured labels.
    ///
    /// The pass is: join rows, ensure the axis, write label text, place
    /// everything under the current margins, measure, correct the margins and
    /// re-place, then trim group labels to their budget. Rendering unchanged
    /// inputs again leaves the scene untouched.
    pub fn render(&mut self, scene: &mut Scene) -> ChartResult<RenderSummary> {
        let ids = self.ids;
        let n = self.data.len();
        tracing::debug!(bars = n, outer_width = self.outer_width, "render");

        scene.ensure(NodeId::ROOT, ids.viewport, Insert::Append, "viewport", || {
            GroupNode::default().into()
        })?;
        let join = scene.join(ids.viewport, ids.bars, n, BAR_CLASS)?;
        for &group in &join.enter {
            self.enter_row(scene, group)?;
        }
        scene.ensure(ids.viewport, ids.axis, Insert::First, AXIS_CLASS, || {
            GroupNode::default().into()
        })?;
        scene.ensure(ids.axis, ids.axis_line, Insert::Append, "", || {
            LineNode::default().into()
        })?;

        self.apply_text(scene);
        self.apply_geometry(scene);

        let value_widths: Vec<f64> = join
            .rows()
            .map(|row| scene.measure_text(row.named(VALUE_CLASS)))
            .collect();
        let group_widths: Vec<f64> = join
            .rows()
            .map(|row| scene.measure_text(row.named(GROUP_CLASS)))
            .collect();
        let horizontal = label_fit::compute_margins(
            &self.extremes,
            LabelWidths {
                values: &value_widths,
                groups: &group_widths,
            },
            self.config.label_padding,
            self.config.max_label_width,
        );
        let corrected = self.margins.with_horizontal(horizontal);
        let margins_changed = corrected != self.margins;
        self.margins = corrected;
        self.margins_resolved = true;
        if margins_changed {
            tracing::debug!(
                left = corrected.left,
                right = corrected.right,
                "margins corrected from measured labels"
            );
            self.apply_geometry(scene);
        }

        let budget = label_fit::group_label_budget(
            self.extremes.sign_pattern(),
            horizontal,
            self.config.label_padding,
            self.outer_width,
        );
        let trimmer = LabelTrimmer::new(budget);
        let mut trimmed = 0;
        for (i, datum) in self.data.iter().enumerate() {
            if trimmer.trim_node(scene, ids.row(i).named(GROUP_CLASS), &datum.label) {
                trimmed += 1;
            }
        }
        if trimmed > 0 {
            tracing::debug!(trimmed, budget, "group labels trimmed");
        }

        Ok(RenderSummary {
            entered: join.enter.len(),
            exited: join.exit.len(),
            margins: self.margins,
            margins_changed,
            trimmed,
        })
    }

    /// Hover-enter on `node`: marks its bar group hovered and shows the tooltip.
    ///
    /// Returns `false` without touching anything when the chart is not
    /// interactive or `node` is not inside a bar.
    pub fn show_details(
        &self,
        scene: &mut Scene,
        tooltip: &mut (impl Tooltip + ?Sized),
        node: NodeId,
    ) -> bool {
        if !self.config.interactive {
            return false;
        }
        let Some((group, row)) = scene.hover_target(node) else {
            return false;
        };
        let Some(content) = self.tooltip_content(row) else {
            return false;
        };
        if let Some(g) = scene.get_mut(group) {
            g.set_class(HOVERED_CLASS, true);
        }
        tooltip.show(&content, group);
        true
    }

    /// Hover-exit on `node`: clears the hovered class and hides the tooltip.
    pub fn hide_details(
        &self,
        scene: &mut Scene,
        tooltip: &mut (impl Tooltip + ?Sized),
        node: NodeId,
    ) -> bool {
        if !self.config.interactive {
            return false;
        }
        let Some((group, _)) = scene.hover_target(node) else {
            return false;
        };
        if let Some(g) = scene.get_mut(group) {
            g.set_class(HOVERED_CLASS, false);
        }
        tooltip.hide();
        true
    }

    fn enter_row(&self, scene: &mut Scene, group: NodeId) -> ChartResult<()> {
        if let Some(node) = scene.get_mut(group) {
            node.hover = true;
        }
        let font_size = self.config.font_size;
        let label = || -> NodePayload {
            TextNode {
                font_size,
                ..TextNode::default()
            }
            .into()
        };
        scene.ensure(group, group.named("rect"), Insert::Append, "", || {
            RectNode::default().into()
        })?;
        scene.ensure(group, group.named(VALUE_CLASS), Insert::Append, VALUE_CLASS, label)?;
        scene.ensure(group, group.named(GROUP_CLASS), Insert::Append, GROUP_CLASS, label)?;
        Ok(())
    }

    /// Writes untrimmed label text, so measurement always sees the full strings.
    fn apply_text(&self, scene: &mut Scene) {
        for (i, datum) in self.data.iter().enumerate() {
            let row = self.ids.row(i);
            if let Some(t) = scene.text_mut(row.named(VALUE_CLASS)) {
                t.text = self.format_value(datum.value);
                t.font_size = self.config.font_size;
            }
            if let Some(t) = scene.text_mut(row.named(GROUP_CLASS)) {
                t.text.clone_from(&datum.label);
                t.font_size = self.config.font_size;
            }
        }
    }

    /// Places every node under the current margins.
    fn apply_geometry(&mut self, scene: &mut Scene) {
        let layout = self.layout();
        let scales = self.scales();
        let encoder = Encoder::new(
            scales,
            self.config.label_padding,
            Fills {
                positive: self.config.positive_fill,
                negative: self.config.negative_fill,
            },
        );
        let ids = self.ids;

        scene.set_size(layout.outer);
        if let Some(g) = scene.group_mut(ids.viewport) {
            g.translate = layout.margins.offset();
        }
        if let Some(line) = scene.line_mut(ids.axis_line) {
            line.line = encoder.axis(layout.height);
        }
        for (i, datum) in self.data.iter().enumerate() {
            let row = ids.row(i);
            if let Some(g) = scene.group_mut(row) {
                g.translate = encoder.group_translate(i, datum.value);
            }
            if let Some(r) = scene.rect_mut(row.named("rect")) {
                *r = encoder.bar(datum);
            }
            if let Some(t) = scene.text_mut(row.named(VALUE_CLASS)) {
                encoder.value_label(datum.value).apply(t);
            }
            if let Some(t) = scene.text_mut(row.named(GROUP_CLASS)) {
                encoder.group_label(datum.value).apply(t);
            }
        }
    }
}

fn check_width(outer_width: f64) -> ChartResult<()> {
    if outer_width.is_finite() && outer_width >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidLength {
            name: "outer_width",
            value: outer_width,
        })
    }
}
