// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report of rendered charts.

use std::fmt::Write;

use hbar_charts::Margins;

#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) svg: String,
    pub(crate) margins: Margins,
    pub(crate) tooltip_html: Option<String>,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    escape_into(&mut out, title);
    out.push_str("</title>\n<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n<h1>");
    escape_into(&mut out, title);
    out.push_str("</h1>\n");
    for section in sections {
        out.push_str("<section>\n<h2>");
        escape_into(&mut out, &section.title);
        out.push_str("</h2>\n<p>");
        escape_into(&mut out, &section.description);
        out.push_str("</p>\n");
        let m = section.margins;
        let _ = writeln!(
            out,
            "<p class=\"margins\">margins: left {} · right {} · top {} · bottom {}</p>",
            m.left, m.right, m.top, m.bottom
        );
        out.push_str(&section.svg);
        if let Some(tip) = &section.tooltip_html {
            out.push_str("<div class=\"tooltip\">");
            // Already escaped by `TooltipContent::to_html`.
            out.push_str(tip);
            out.push_str("</div>\n");
        }
        out.push_str("</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; color: #222; }
section { margin-bottom: 2.5em; }
.margins { color: #666; font-size: 0.85em; }
.tooltip { display: inline-block; border: 1px solid #ccc; padding: 4px 8px; font-size: 0.85em; }
.tooltip .tip-label { display: block; font-weight: bold; }
svg .y-axis line { shape-rendering: crispEdges; }
svg .hovered rect { opacity: 0.8; }
";

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
