// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ellipsis truncation of labels to a pixel budget.

use alloc::string::String;

use hbar_scene::{NodeId, Scene};

const ELLIPSIS: &str = "...";

/// Truncates `text` so that `measure` of the result is at most `budget`.
///
/// Text that already fits is returned unchanged. Otherwise the result is the
/// longest prefix (trailing whitespace removed) followed by `"..."` that fits,
/// or the empty string when not even the ellipsis fits.
pub fn trim_str(measure: impl Fn(&str) -> f64, text: &str, budget: f64) -> String {
    if measure(text) <= budget {
        return String::from(text);
    }
    let mut candidate = String::with_capacity(text.len() + ELLIPSIS.len());
    for (end, _) in text.char_indices().rev() {
        candidate.clear();
        candidate.push_str(text[..end].trim_end());
        candidate.push_str(ELLIPSIS);
        if measure(&candidate) <= budget {
            return candidate;
        }
    }
    String::new()
}

/// Keeps placed labels within a fixed width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelTrimmer {
    budget: f64,
}

impl LabelTrimmer {
    /// Creates a trimmer for `budget` pixels.
    pub fn new(budget: f64) -> Self {
        Self { budget }
    }

    /// The width budget.
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Sets the text node `id` to `full_text`, truncated to the budget.
    ///
    /// Measurements go through the scene, so they use the node's own font size.
    /// Returns `true` if the displayed text had to be shortened.
    pub fn trim_node(&self, scene: &mut Scene, id: NodeId, full_text: &str) -> bool {
        let Some(font_size) = scene.get(id).and_then(|n| n.as_text()).map(|t| t.font_size) else {
            return false;
        };
        let fitted = if self.budget.is_nan() {
            tracing::warn!("label budget is NaN; leaving label untrimmed");
            String::from(full_text)
        } else {
            trim_str(|s| scene.measure_str(s, font_size), full_text, self.budget)
        };
        let trimmed = fitted != full_text;
        if let Some(text) = scene.text_mut(id) {
            text.text = fitted;
        }
        trimmed
    }
}
