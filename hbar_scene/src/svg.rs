// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of a [`Scene`].

extern crate alloc;

use alloc::string::String;
use core::fmt::Write;

use peniko::Brush;

use crate::node::{Node, NodePayload};
use crate::{NodeId, Scene};

impl Scene {
    /// Serializes the scene as a standalone SVG document.
    ///
    /// Children are emitted in paint order; group translations become
    /// `transform="translate(x, y)"` attributes.
    pub fn to_svg_string(&self) -> String {
        let size = self.size();
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{family}">"#,
            w = size.width,
            h = size.height,
            family = self.font_family().as_css_family(),
        );
        out.push('\n');
        for child in self.children(NodeId::ROOT) {
            self.write_node(&mut out, *child, 1);
        }
        out.push_str("</svg>\n");
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let Some(node) = self.get(id) else {
            return;
        };
        for _ in 0..depth {
            out.push_str("  ");
        }
        match &node.payload {
            NodePayload::Group(g) => {
                out.push_str("<g");
                write_common_attrs(out, node);
                if g.translate.x != 0.0 || g.translate.y != 0.0 {
                    let _ = write!(
                        out,
                        r#" transform="translate({}, {})""#,
                        g.translate.x, g.translate.y
                    );
                }
                if node.children().is_empty() {
                    out.push_str("/>\n");
                    return;
                }
                out.push_str(">\n");
                for child in node.children() {
                    self.write_node(out, *child, depth + 1);
                }
                for _ in 0..depth {
                    out.push_str("  ");
                }
                out.push_str("</g>\n");
            }
            NodePayload::Rect(r) => {
                out.push_str("<rect");
                write_common_attrs(out, node);
                let _ = write!(out, r#" width="{}" height="{}""#, r.width, r.height);
                write_paint_attr(out, "fill", &r.fill);
                let _ = write!(out, r#" stroke-width="{}""#, r.stroke_width);
                out.push_str("/>\n");
            }
            NodePayload::Text(t) => {
                out.push_str("<text");
                write_common_attrs(out, node);
                let _ = write!(
                    out,
                    r#" x="{}" y="{}" dy="{}em" text-anchor="{}" font-size="{}""#,
                    t.pos.x,
                    t.pos.y,
                    t.dy_em,
                    t.anchor.as_str(),
                    t.font_size
                );
                write_paint_attr(out, "fill", &t.fill);
                let _ = write!(out, r#" stroke-width="{}">"#, t.stroke_width);
                escape_xml_into(out, &t.text);
                out.push_str("</text>\n");
            }
            NodePayload::Line(l) => {
                out.push_str("<line");
                write_common_attrs(out, node);
                let _ = write!(
                    out,
                    r#" x1="{}" y1="{}" x2="{}" y2="{}""#,
                    l.line.p0.x, l.line.p0.y, l.line.p1.x, l.line.p1.y
                );
                write_paint_attr(out, "stroke", &l.stroke);
                let _ = write!(out, r#" stroke-width="{}""#, l.stroke_width);
                out.push_str("/>\n");
            }
        }
    }
}

fn write_common_attrs(out: &mut String, node: &Node) {
    if !node.classes.is_empty() {
        out.push_str(r#" class=""#);
        for (i, class) in node.classes.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(class);
        }
        out.push('"');
    }
    if let Some(row) = node.datum {
        let _ = write!(out, r#" data-index="{row}""#);
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let _ = write!(
                out,
                r##" {name}="#{:02x}{:02x}{:02x}""##,
                rgba.r, rgba.g, rgba.b
            );
            if rgba.a != 255 {
                let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
            }
        }
        _ => {
            let _ = write!(out, r#" {name}="none""#);
        }
    }
}

fn escape_xml_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}
