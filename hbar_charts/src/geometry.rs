// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar thickness bounds, the outer height they imply, and the cached scale pair.

use crate::scale::{ScaleBand, ScaleLinear, ScaleLinearSpec};

/// Smallest outer height that gives every bar `min_thickness`, or `None` when unbounded.
pub fn min_outer_height(
    num_bars: usize,
    min_thickness: Option<f64>,
    vertical_margins: f64,
) -> Option<f64> {
    min_thickness.map(|t| num_bars as f64 * t + vertical_margins)
}

/// Largest outer height that keeps every bar within `max_thickness`, or `None` when unbounded.
pub fn max_outer_height(
    num_bars: usize,
    max_thickness: Option<f64>,
    vertical_margins: f64,
) -> Option<f64> {
    max_thickness.map(|t| num_bars as f64 * t + vertical_margins)
}

/// Clamps `default` into the optional bounds: `min(max(default, min), max)`.
///
/// A `None` bound does not take part in the clamp.
pub fn outer_height(default: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut h = default;
    if let Some(min) = min {
        h = h.max(min);
    }
    if let Some(max) = max {
        h = h.min(max);
    }
    h
}

/// Inputs that determine the scale pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalesKey {
    /// Inner width (value range).
    pub width: f64,
    /// Inner height (index range).
    pub height: f64,
    /// Value domain before "nice" rounding.
    pub domain: (f64, f64),
    /// Number of bands.
    pub num_bars: usize,
    /// Gutter fraction.
    pub bar_padding: f64,
}

/// The value scale and the index scale of one layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarScales {
    /// Value to horizontal position, over a niced domain.
    pub x: ScaleLinear,
    /// Bar index to vertical position.
    pub y: ScaleBand,
}

impl BarScales {
    /// Builds both scales for `key`.
    pub fn new(key: &ScalesKey) -> Self {
        let x = ScaleLinearSpec::new(key.domain)
            .with_nice(true)
            .instantiate((0.0, key.width));
        let y = ScaleBand::new((0.0, key.height), key.num_bars)
            .with_padding(key.bar_padding, key.bar_padding)
            .with_round(true);
        Self { x, y }
    }

    /// Visible thickness of every bar.
    pub fn bar_thickness(&self) -> f64 {
        self.y.band_width()
    }
}

/// Keeps the last scale pair and rebuilds it only when its key changes.
#[derive(Clone, Debug, Default)]
pub struct ScaleCache {
    entry: Option<(ScalesKey, BarScales)>,
}

impl ScaleCache {
    /// Returns the scales for `key`, rebuilding on a key change.
    pub fn get(&mut self, key: ScalesKey) -> BarScales {
        if let Some((cached, scales)) = &self.entry
            && *cached == key
        {
            tracing::trace!("scale cache hit");
            return *scales;
        }
        tracing::trace!(
            width = key.width,
            height = key.height,
            num_bars = key.num_bars,
            "scale cache miss"
        );
        let scales = BarScales::new(&key);
        self.entry = Some((key, scales));
        scales
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bounds_do_not_clamp() {
        assert_eq!(outer_height(500.0, None, None), 500.0);
        assert_eq!(outer_height(500.0, Some(600.0), None), 600.0);
        assert_eq!(outer_height(500.0, None, Some(160.0)), 160.0);
        assert_eq!(outer_height(500.0, Some(80.0), Some(160.0)), 160.0);
        assert_eq!(outer_height(100.0, Some(120.0), Some(160.0)), 120.0);
    }

    #[test]
    fn outer_bounds_scale_with_bar_count() {
        assert_eq!(min_outer_height(3, Some(20.0), 40.0), Some(100.0));
        assert_eq!(max_outer_height(3, Some(60.0), 40.0), Some(220.0));
        assert_eq!(max_outer_height(3, None, 40.0), None);
        assert_eq!(min_outer_height(0, Some(20.0), 40.0), Some(40.0));
    }

    #[test]
    fn cache_rebuilds_only_on_key_change() {
        let key = ScalesKey {
            width: 302.0,
            height: 120.0,
            domain: (0.0, 7.0),
            num_bars: 2,
            bar_padding: 0.2,
        };
        let mut cache = ScaleCache::default();
        let a = cache.get(key);
        assert_eq!(a.bar_thickness(), 43.0);
        assert_eq!(a.x.domain(), (0.0, 7.0));
        assert_eq!(cache.get(key), a);

        let b = cache.get(ScalesKey {
            height: 240.0,
            ..key
        });
        assert!(b.bar_thickness() > a.bar_thickness());
        let again = cache.get(ScalesKey {
            height: 240.0,
            ..key
        });
        assert_eq!(again, b);
    }

    #[test]
    fn min_thickness_bounds_the_outer_height_not_the_band() {
        // 30 bars at the default bounds: 30 * 20 + 40 outer, 600 inner.
        let lo = min_outer_height(30, Some(20.0), 40.0);
        let hi = max_outer_height(30, Some(60.0), 40.0);
        let outer = outer_height(500.0, lo, hi);
        assert_eq!(outer, 640.0);

        let key = ScalesKey {
            width: 300.0,
            height: outer - 40.0,
            domain: (0.0, 1.0),
            num_bars: 30,
            bar_padding: 0.2,
        };
        // floor(600 / 30.2) and round(19 * 0.8): the outer padding and the
        // gutter both come out of the minimum slot.
        let padded = BarScales::new(&key);
        assert_eq!(padded.y.step(), 19.0);
        assert_eq!(padded.bar_thickness(), 15.0);

        let unpadded = BarScales::new(&ScalesKey {
            bar_padding: 0.0,
            ..key
        });
        assert_eq!(unpadded.bar_thickness(), 20.0);
    }
}
