// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover details.

use alloc::string::String;

use hbar_scene::NodeId;

/// What the tooltip shows for one bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipContent {
    /// The bar's category label (untrimmed).
    pub label: String,
    /// The configured display name of the value.
    pub name: String,
    /// The formatted value.
    pub value: String,
}

impl TooltipContent {
    /// Renders the content as three HTML spans: label, `name: ` and value.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<span class="tip-label">"#);
        escape_html_into(&mut out, &self.label);
        out.push_str(r#"</span><span class="name">"#);
        escape_html_into(&mut out, &self.name);
        out.push_str(r#": </span><span class="value">"#);
        escape_html_into(&mut out, &self.value);
        out.push_str("</span>");
        out
    }
}

/// A tooltip surface owned by the host.
pub trait Tooltip {
    /// Shows `content` next to the hovered bar group `anchor`.
    fn show(&mut self, content: &TooltipContent, anchor: NodeId);
    /// Hides the tooltip.
    fn hide(&mut self);
}

/// A tooltip that shows nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTooltip;

impl Tooltip for NoTooltip {
    fn show(&mut self, _content: &TooltipContent, _anchor: NodeId) {}

    fn hide(&mut self) {}
}

fn escape_html_into(out: &mut String, s: &str) {
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
