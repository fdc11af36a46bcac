// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value and index scales.
//!
//! A horizontal bar chart needs exactly two mappings:
//! - a continuous [`ScaleLinear`] from bar values to horizontal pixels, with a
//!   "nice" domain so bar ends never sit on ragged numbers, and
//! - a discrete [`ScaleBand`] from bar indices to vertical slots, with a gutter
//!   between adjacent bars.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Target tick count used when "nicing" a linear domain.
pub const DEFAULT_NICE_TICKS: usize = 10;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A zero-width domain maps everything to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 || !denom.is_finite() {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the domain as instantiated.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to round the domain outward to tick-step multiples.
    pub nice: bool,
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    ///
    /// A degenerate `[0, 0]` domain resolves to `[0, 1]` so the scale stays
    /// finite; value `0` still maps to the start of the range.
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        nice_domain(self.domain.0, self.domain.1, tick_count)
    }

    /// Instantiates a concrete scale using the resolved domain.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(DEFAULT_NICE_TICKS), range)
    }
}

fn nice_domain(d0: f64, d1: f64, count: usize) -> (f64, f64) {
    if !d0.is_finite() || !d1.is_finite() {
        return (0.0, 1.0);
    }
    if d0 == d1 {
        if d0 == 0.0 {
            return (0.0, 1.0);
        }
        // Widen to include zero, then nice that.
        return nice_domain(d0.min(0.0), d0.max(0.0), count);
    }
    let reversed = d0 > d1;
    let (lo, hi) = if reversed { (d1, d0) } else { (d0, d1) };
    // The first rounding can widen the span enough to pick a coarser step.
    let (lo, hi) = round_to_step(round_to_step((lo, hi), count), count);
    if reversed { (hi, lo) } else { (lo, hi) }
}

fn round_to_step((lo, hi): (f64, f64), count: usize) -> (f64, f64) {
    let step = tick_step(hi - lo, count);
    if step == 0.0 {
        return (lo, hi);
    }
    ((lo / step).floor() * step, (hi / step).ceil() * step)
}

/// Returns a 1/2/5 × 10ⁿ step yielding roughly `count` ticks over `span`.
fn tick_step(span: f64, count: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 || count == 0 {
        return 0.0;
    }
    let m = count as f64;
    let power = (span / m).log10().floor();
    let power = power.clamp(-300.0, 300.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range above")]
    let mut step = 10_f64.powi(power as i32);
    let err = m / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    step
}

/// A discrete band scale: `count` equal slots over a range, each split into a
/// visible band and a gutter.
///
/// `padding` is the gutter's share of each slot; `outer_padding` is the space
/// before the first and after the last slot, in slot units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding: f64,
    outer_padding: f64,
    round: bool,
}

impl ScaleBand {
    /// Creates a band scale with no padding.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding: 0.0,
            outer_padding: 0.0,
            round: false,
        }
    }

    /// Sets the inner padding (gutter fraction) and outer padding, both clamped to `[0, 1]`.
    pub fn with_padding(mut self, padding: f64, outer_padding: f64) -> Self {
        self.padding = clamp_unit(padding);
        self.outer_padding = clamp_unit(outer_padding);
        self
    }

    /// Enables whole-pixel slot steps and band widths.
    ///
    /// Leftover pixels are split evenly before the first and after the last slot.
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        self.layout().1
    }

    /// Returns the visible band width (the slot minus its gutter).
    pub fn band_width(&self) -> f64 {
        self.layout().2
    }

    /// Returns the start position of the band at `index`.
    pub fn position(&self, index: usize) -> f64 {
        let (first, step, _) = self.layout();
        let (r0, r1) = self.range;
        let slot = if r1 < r0 {
            self.count.saturating_sub(index + 1)
        } else {
            index
        };
        first + step * slot as f64
    }

    /// Returns `(first band start, step, band width)`.
    fn layout(&self) -> (f64, f64, f64) {
        let (r0, r1) = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        if self.count == 0 || !(stop - start).is_finite() {
            return (start, 0.0, 0.0);
        }
        let n = self.count as f64;
        let denom = n - self.padding + 2.0 * self.outer_padding;
        if denom <= 0.0 {
            return (start, 0.0, 0.0);
        }
        let span = stop - start;
        if self.round {
            let step = (span / denom).floor().max(0.0);
            let error = span - (n - self.padding) * step;
            let band = (step * (1.0 - self.padding)).round();
            (start + (error / 2.0).round(), step, band)
        } else {
            let step = span / denom;
            (
                start + step * self.outer_padding,
                step,
                step * (1.0 - self.padding),
            )
        }
    }
}

fn clamp_unit(x: f64) -> f64 {
    if x.is_finite() { x.clamp(0.0, 1.0) } else { 0.0 }
}
