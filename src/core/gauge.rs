use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::arc::ArcGenerator;
use crate::core::label_format::{LabelLocale, format_number};
use crate::error::{ChartError, ChartResult};

/// Ratio at or above which the gauge reports [`GaugeStatus::Good`].
pub const GAUGE_GOOD_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeConfig {
    /// Side of the square the gauge is drawn in.
    pub size: f64,
    /// Inner radius as a fraction of the outer radius.
    pub inner_radius_ratio: f64,
    pub corner_radius: f64,
    pub locale: LabelLocale,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            size: 240.0,
            inner_radius_ratio: 0.75,
            corner_radius: 16.0,
            locale: LabelLocale::default(),
        }
    }
}

impl GaugeConfig {
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: LabelLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "gauge size must be finite and > 0".to_owned(),
            ));
        }
        if !self.inner_radius_ratio.is_finite() || !(0.0..=1.0).contains(&self.inner_radius_ratio)
        {
            return Err(ChartError::InvalidConfig(
                "gauge inner radius ratio must be in [0, 1]".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidConfig(
                "gauge corner radius must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn outer_radius(self) -> f64 {
        self.size / 2.0
    }

    #[must_use]
    pub fn inner_radius(self) -> f64 {
        self.outer_radius() * self.inner_radius_ratio
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeStatus {
    Good,
    Bad,
}

impl GaugeStatus {
    #[must_use]
    pub fn from_ratio(value: f64) -> Self {
        if value >= GAUGE_GOOD_THRESHOLD {
            Self::Good
        } else {
            Self::Bad
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

/// Draw plan of a single-value radial gauge. Paths are centred on the origin;
/// the renderer translates them by `size / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugePlan {
    pub size: f64,
    pub value: f64,
    pub background: String,
    pub foreground: String,
    /// Percentage without the `%` sign, one fraction digit at most.
    pub label: String,
    pub status: GaugeStatus,
}

/// Computes the gauge for `value`, conceptually a ratio in `[0, 1]`.
///
/// Values are not clamped: a ratio above 1 sweeps past a full turn and draws
/// the whole ring, a negative ratio sweeps counter-clockwise.
pub fn compute_gauge(value: f64, config: GaugeConfig) -> ChartResult<GaugePlan> {
    let config = config.validate()?;

    if !(0.0..=1.0).contains(&value) {
        debug!(value, "gauge value outside [0, 1]; drawing unclamped sweep");
    }

    let arc = ArcGenerator::new(config.inner_radius(), config.outer_radius())
        .with_corner_radius(config.corner_radius);

    Ok(GaugePlan {
        size: config.size,
        value,
        background: arc.path(0.0, TAU),
        foreground: arc.path(0.0, value * TAU),
        label: format_number(value * 100.0, 1, config.locale),
        status: GaugeStatus::from_ratio(value),
    })
}
