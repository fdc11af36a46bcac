// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use peniko::Color;
use serde::{Deserialize, Serialize};

/// One bar: a category label, its value and an optional explicit color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    /// Category name, shown as the group label.
    pub label: String,
    /// Bar value; its sign decides which side of the zero line the bar grows to.
    pub value: f64,
    /// Overrides the sign-based tint when set.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::css_color::option"
    )]
    pub color: Option<Color>,
}

impl Datum {
    /// Creates an uncolored datum.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }

    /// Sets an explicit fill color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_optional_css_color() {
        let rows: alloc::vec::Vec<Datum> = serde_json::from_str(
            r##"[{"label":"A","value":-5},{"label":"B","value":2.5,"color":"#ff0000"}]"##,
        )
        .unwrap();
        assert_eq!(rows[0], Datum::new("A", -5.0));
        assert_eq!(rows[1].color, Some(Color::from_rgb8(255, 0, 0)));
    }

    #[test]
    fn rejects_bad_color_strings() {
        let err = serde_json::from_str::<Datum>(r#"{"label":"A","value":1,"color":"nope"}"#);
        assert!(err.is_err());
    }
}
