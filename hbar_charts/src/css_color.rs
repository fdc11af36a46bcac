// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS color strings on the wire, `peniko::Color` in memory.

use alloc::format;
use alloc::string::{String, ToString};

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{ChartError, ChartResult};

/// Parses any CSS color syntax (`#8c8c8c`, `rgb(…)`, `steelblue`, …) into an sRGB color.
pub fn parse_css_color(value: &str) -> ChartResult<Color> {
    parse_color(value.trim())
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|e| ChartError::InvalidColor {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Formats a color as `#rrggbb`, or `#rrggbbaa` when it is not opaque.
pub fn to_hex(color: Color) -> String {
    let c = color.to_rgba8();
    if c.a == 255 {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
    }
}

pub(crate) fn serialize<S: Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&to_hex(*color))
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Color, D::Error> {
    let raw = String::deserialize(d)?;
    parse_css_color(&raw).map_err(serde::de::Error::custom)
}

pub(crate) mod option {
    use alloc::string::String;

    use peniko::Color;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(color: &Option<Color>, s: S) -> Result<S::Ok, S::Error> {
        match color {
            Some(c) => s.serialize_some(&super::to_hex(*c)),
            None => s.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Color>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|raw| super::parse_css_color(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
