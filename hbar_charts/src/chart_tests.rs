// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hbar_scene::{NodeId, Scene, TextAnchor};
use hbar_text::FixedAdvanceMeasurer;
use peniko::{Brush, Color};

use crate::{
    AXIS_CLASS, BAR_CLASS, Datum, GROUP_CLASS, HOVERED_CLASS, HorizontalBarChart,
    HorizontalBarChartConfig, Margins, SortBy, SortKey, SortOrder, Tooltip, TooltipContent,
    VALUE_CLASS,
};

fn scene() -> Scene {
    Scene::new(FixedAdvanceMeasurer::new(10.0))
}

fn chart(data: Vec<Datum>) -> HorizontalBarChart {
    let mut chart = HorizontalBarChart::new(HorizontalBarChartConfig::default(), 400.0).unwrap();
    chart.set_data(data);
    chart
}

fn texts(scene: &Scene, class: &str) -> Vec<(String, TextAnchor)> {
    scene
        .find_by_class(class)
        .into_iter()
        .filter_map(|id| scene.get(id)?.as_text().map(|t| (t.text.clone(), t.anchor)))
        .collect()
}

#[derive(Default)]
struct RecordingTooltip {
    shown: Vec<(TooltipContent, NodeId)>,
    hidden: usize,
}

impl Tooltip for RecordingTooltip {
    fn show(&mut self, content: &TooltipContent, anchor: NodeId) {
        self.shown.push((content.clone(), anchor));
    }

    fn hide(&mut self) {
        self.hidden += 1;
    }
}

#[test]
fn positive_data_lays_out_groups_left_and_values_right() {
    let mut chart = chart(vec![Datum::new("X", 3.0), Datum::new("Y", 7.0)]);
    let mut scene = scene();
    let summary = chart.render(&mut scene).unwrap();

    assert_eq!(chart.extremes().x_domain(), (0.0, 7.0));
    assert_eq!(
        summary.margins,
        Margins {
            left: 34.0,
            right: 64.0,
            top: 20.0,
            bottom: 20.0
        }
    );
    assert!(summary.margins_changed);
    assert_eq!(chart.resolved_margins(), Some(summary.margins));

    let layout = chart.layout();
    assert_eq!(chart.outer_height(), 160.0);
    assert_eq!((layout.width, layout.height), (302.0, 120.0));
    let scales = chart.scales();
    assert_eq!(scales.x.domain(), (0.0, 7.0));
    assert_eq!(scales.bar_thickness(), 43.0);
    assert_eq!(scales.y.position(0), 11.0);

    assert_eq!(
        texts(&scene, GROUP_CLASS),
        vec![(String::from("X"), TextAnchor::End), (String::from("Y"), TextAnchor::End)]
    );
    assert_eq!(
        texts(&scene, VALUE_CLASS),
        vec![
            (String::from("3.00"), TextAnchor::Start),
            (String::from("7.00"), TextAnchor::Start)
        ]
    );
    assert_eq!(scene.size().width, 400.0);
    assert_eq!(scene.size().height, 160.0);
}

#[test]
fn negative_data_mirrors_label_roles() {
    let mut chart = chart(vec![Datum::new("X", -3.0), Datum::new("Y", -7.0)]);
    let mut scene = scene();
    let summary = chart.render(&mut scene).unwrap();

    assert_eq!(chart.extremes().x_domain(), (-7.0, 0.0));
    // "-3.00" is five characters wide; the group side fits "X".
    assert_eq!((summary.margins.left, summary.margins.right), (74.0, 34.0));
    assert!(
        texts(&scene, GROUP_CLASS)
            .iter()
            .all(|(_, a)| *a == TextAnchor::Start)
    );
    assert!(
        texts(&scene, VALUE_CLASS)
            .iter()
            .all(|(_, a)| *a == TextAnchor::End)
    );
}

#[test]
fn mixed_margins_come_from_the_extreme_rows() {
    let mut chart = chart(vec![
        Datum::new("A", -5.0),
        Datum::new("B", 10.0),
        Datum::new("C", 3.25),
    ])
    .with_value_formatter(|v: f64| format!("{v}"));
    let mut scene = scene();
    let summary = chart.render(&mut scene).unwrap();

    // "3.25" is the widest value label, but only "-5" and "10" size the margins.
    assert_eq!((summary.margins.left, summary.margins.right), (44.0, 44.0));
}

#[test]
fn empty_data_renders_no_bars_and_padding_only_margins() {
    let mut chart = chart(Vec::new());
    let mut scene = scene();
    let summary = chart.render(&mut scene).unwrap();

    assert_eq!(scene.find_by_class(BAR_CLASS).len(), 0);
    assert_eq!((summary.margins.left, summary.margins.right), (24.0, 24.0));
    assert_eq!(chart.extremes().x_domain(), (0.0, 0.0));
    assert_eq!(chart.outer_height(), 40.0);
    assert_eq!(scene.find_by_class(AXIS_CLASS).len(), 1);
}

#[test]
fn second_render_with_unchanged_inputs_is_a_no_op() {
    let mut chart = chart(vec![
        Datum::new("A very long category", 3.0),
        Datum::new("B", -1.0),
    ]);
    let mut scene = scene();
    chart.render(&mut scene).unwrap();
    scene.commit();
    let svg = scene.to_svg_string();

    let summary = chart.render(&mut scene).unwrap();
    assert!(!summary.margins_changed);
    assert_eq!(summary.entered, 0);
    assert!(scene.commit().is_empty());
    assert_eq!(scene.to_svg_string(), svg);
}

#[test]
fn long_group_labels_are_trimmed_to_the_margin_budget() {
    let config = HorizontalBarChartConfig::default().with_max_label_width(Some(84.0));
    let mut chart = HorizontalBarChart::new(config, 400.0).unwrap();
    chart.set_data(vec![
        Datum::new("A very long category", 3.0),
        Datum::new("Short", 7.0),
    ]);
    let mut scene = scene();
    let summary = chart.render(&mut scene).unwrap();

    assert_eq!(summary.margins.left, 84.0);
    assert_eq!(summary.trimmed, 1);
    let groups = texts(&scene, GROUP_CLASS);
    assert_eq!(groups[0].0, "A v...");
    assert_eq!(groups[1].0, "Short");
    for id in scene.find_by_class(GROUP_CLASS) {
        assert!(scene.measure_text(id) <= 64.0, "label exceeds its budget");
    }
}

#[test]
fn explicit_color_overrides_sign_tint() {
    let red = Color::from_rgb8(255, 0, 0);
    let mut chart = chart(vec![
        Datum::new("A", -2.0).with_color(red),
        Datum::new("B", -1.0),
    ]);
    let mut scene = scene();
    chart.render(&mut scene).unwrap();

    let fills: Vec<Brush> = scene
        .find_by_class(BAR_CLASS)
        .into_iter()
        .filter_map(|g| scene.get(g.named("rect"))?.as_rect().map(|r| r.fill.clone()))
        .collect();
    assert_eq!(
        fills,
        vec![
            Brush::Solid(red),
            Brush::Solid(chart.config().negative_fill)
        ]
    );
}

#[test]
fn shrinking_data_removes_rows_and_growing_adds_them() {
    let mut chart = chart(vec![
        Datum::new("a", 1.0),
        Datum::new("b", 2.0),
        Datum::new("c", 3.0),
    ]);
    let mut scene = scene();
    assert_eq!(chart.render(&mut scene).unwrap().entered, 3);

    chart.set_data(vec![Datum::new("a", 1.0)]);
    let summary = chart.render(&mut scene).unwrap();
    assert_eq!((summary.entered, summary.exited), (0, 2));
    assert_eq!(scene.find_by_class(BAR_CLASS).len(), 1);

    chart.set_data(vec![Datum::new("a", 1.0), Datum::new("z", 9.0)]);
    assert_eq!(chart.render(&mut scene).unwrap().entered, 1);
    assert_eq!(scene.find_by_class(AXIS_CLASS).len(), 1, "axis is never duplicated");
}

#[test]
fn axis_is_painted_before_bars_at_the_zero_line() {
    let mut chart = chart(vec![Datum::new("A", -10.0), Datum::new("B", 20.0)]);
    let mut scene = scene();
    chart.render(&mut scene).unwrap();

    let svg = scene.to_svg_string();
    let axis_at = svg.find(r#"class="y-axis""#).unwrap();
    let bar_at = svg.find(r#"class="bar""#).unwrap();
    assert!(axis_at < bar_at, "{svg}");

    let zero = chart.scales().x.map(0.0);
    let axis = scene.find_by_class(AXIS_CLASS)[0];
    let line = scene.children(axis)[0];
    let line = scene.get(line).unwrap().as_line().unwrap().line;
    assert_eq!((line.p0.x, line.p1.x), (zero, zero));
    assert_eq!(line.p1.y, chart.layout().height);
}

#[test]
fn hover_shows_and_hides_tooltip_details() {
    let mut chart = chart(vec![Datum::new("Apples", 1234.5)]);
    let mut scene = scene();
    chart.render(&mut scene).unwrap();
    let group = scene.find_by_class(BAR_CLASS)[0];
    let rect = group.named("rect");
    let mut tooltip = RecordingTooltip::default();

    assert!(chart.show_details(&mut scene, &mut tooltip, rect));
    assert!(scene.get(group).unwrap().has_class(HOVERED_CLASS));
    let (content, anchor) = &tooltip.shown[0];
    assert_eq!(*anchor, group);
    assert_eq!(content.label, "Apples");
    assert_eq!(content.name, "Value");
    assert_eq!(content.value, "1,234.50");

    assert!(chart.hide_details(&mut scene, &mut tooltip, rect));
    assert!(!scene.get(group).unwrap().has_class(HOVERED_CLASS));
    assert_eq!(tooltip.hidden, 1);
}

#[test]
fn non_interactive_hover_is_a_no_op() {
    let config = HorizontalBarChartConfig::default().with_interactive(false);
    let mut chart = HorizontalBarChart::new(config, 400.0).unwrap();
    chart.set_data(vec![Datum::new("A", 1.0)]);
    let mut scene = scene();
    chart.render(&mut scene).unwrap();
    let group = scene.find_by_class(BAR_CLASS)[0];
    let mut tooltip = RecordingTooltip::default();

    assert!(!chart.show_details(&mut scene, &mut tooltip, group));
    assert!(!chart.hide_details(&mut scene, &mut tooltip, group));
    assert!(tooltip.shown.is_empty());
    assert_eq!(tooltip.hidden, 0);
    assert!(!scene.get(group).unwrap().has_class(HOVERED_CLASS));
}

#[test]
fn hovering_outside_bars_does_nothing() {
    let mut chart = chart(vec![Datum::new("A", 1.0)]);
    let mut scene = scene();
    chart.render(&mut scene).unwrap();
    let axis = scene.find_by_class(AXIS_CLASS)[0];
    let mut tooltip = RecordingTooltip::default();
    assert!(!chart.show_details(&mut scene, &mut tooltip, axis));
    assert!(!chart.show_details(&mut scene, &mut tooltip, NodeId::ROOT));
}

#[test]
fn sorter_orders_rows_before_layout() {
    let mut chart = chart(vec![
        Datum::new("low", 1.0),
        Datum::new("high", 9.0),
        Datum::new("mid", 5.0),
    ])
    .with_sorter(SortBy::new(SortKey::Value, SortOrder::Desc));
    let labels: Vec<&str> = chart.data().iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, ["high", "mid", "low"]);

    let mut scene = scene();
    chart.render(&mut scene).unwrap();
    assert_eq!(texts(&scene, GROUP_CLASS)[0].0, "high");
}

#[test]
fn data_or_width_changes_invalidate_margins() {
    let mut chart = chart(vec![Datum::new("X", 3.0)]);
    let mut scene = scene();
    chart.render(&mut scene).unwrap();
    assert!(chart.resolved_margins().is_some());

    chart.set_outer_width(600.0).unwrap();
    assert!(chart.resolved_margins().is_none());
    chart.render(&mut scene).unwrap();

    chart.set_data(vec![Datum::new("X", 12345.0)]);
    assert!(chart.resolved_margins().is_none());
    let summary = chart.render(&mut scene).unwrap();
    // "12,345.00" is nine characters wide.
    assert_eq!(summary.margins.right, 114.0);
    assert!(chart.set_outer_width(f64::NAN).is_err());
}

#[test]
fn all_zero_data_keeps_a_finite_scale() {
    let mut chart = chart(vec![Datum::new("a", 0.0), Datum::new("b", 0.0)]);
    let mut scene = scene();
    chart.render(&mut scene).unwrap();
    let scales = chart.scales();
    assert_eq!(scales.x.domain(), (0.0, 1.0));
    for g in scene.find_by_class(BAR_CLASS) {
        let rect = scene.get(g.named("rect")).unwrap().as_rect().unwrap();
        assert_eq!(rect.width, 0.0);
        let translate = scene.get(g).unwrap().as_group().unwrap().translate;
        assert!(translate.x.is_finite() && translate.y.is_finite());
    }
}

#[test]
fn many_bars_grow_the_chart_but_padding_thins_each_bar() {
    let data = (0..30).map(|i| Datum::new("r", f64::from(i))).collect();
    let mut chart = chart(data);
    chart.render(&mut scene()).unwrap();

    assert_eq!(chart.outer_height(), 640.0);
    assert_eq!(chart.layout().height, 600.0);
    let scales = chart.scales();
    // The minimum covers the whole slot; the gutter and outer padding come
    // out of it, so both fall under 20.
    assert_eq!(scales.y.step(), 19.0);
    assert_eq!(scales.bar_thickness(), 15.0);
}

#[test]
fn value_domain_matches_a_second_nice_pass() {
    let mut chart = chart(vec![Datum::new("a", -835.69), Datum::new("b", 477.33)]);
    chart.render(&mut scene()).unwrap();
    assert_eq!(chart.scales().x.domain(), (-1000.0, 600.0));
}
