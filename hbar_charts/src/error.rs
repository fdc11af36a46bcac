// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use hbar_scene::SceneError;

/// Errors reported when configuring or rendering a chart.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// `bar_padding` must be a fraction of the band slot.
    #[error("bar padding must lie in [0, 1], got {0}")]
    BarPadding(f64),
    /// A length setting was negative, NaN or infinite.
    #[error("`{name}` must be a finite, non-negative number, got {value}")]
    InvalidLength {
        /// Configuration field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The thickness bounds are inverted.
    #[error("min bar thickness {min} exceeds max bar thickness {max}")]
    ThicknessBounds {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// A color string could not be parsed.
    #[error("invalid color {value:?}: {reason}")]
    InvalidColor {
        /// The rejected input.
        value: String,
        /// Parser message.
        reason: String,
    },
    /// The render target rejected a structural mutation.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result alias for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;
