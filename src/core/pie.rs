use std::cmp::Reverse;
use std::f64::consts::TAU;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::arc::{ArcGenerator, pointer_angle};
use crate::core::label_format::{LabelLocale, format_tooltip_row};
use crate::core::primitives::{TooltipContent, TooltipRow};
use crate::core::types::CategoryValue;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieConfig {
    /// Side of the square the pie is drawn in.
    pub size: f64,
    pub locale: LabelLocale,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            size: 240.0,
            locale: LabelLocale::default(),
        }
    }
}

impl PieConfig {
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "pie size must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Path centred on the origin.
    pub path: String,
}

impl PieSlice {
    #[must_use]
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiePlan {
    pub size: f64,
    pub outer_radius: f64,
    /// Slices in draw order: descending value, ties in input order.
    pub slices: Vec<PieSlice>,
    /// Rows for every slice in input order.
    pub tooltip: TooltipContent,
}

impl PiePlan {
    /// Slice under `(x, y)`, given relative to the plan's top-left corner.
    #[must_use]
    pub fn locate(&self, x: f64, y: f64) -> Option<&str> {
        let dx = x - self.size / 2.0;
        let dy = y - self.size / 2.0;
        if (dx * dx + dy * dy).sqrt() > self.outer_radius {
            return None;
        }

        let angle = pointer_angle(dx, dy);
        self.slices
            .iter()
            .find(|slice| slice.span() > 0.0 && angle >= slice.start_angle && angle < slice.end_angle)
            .map(|slice| slice.id.as_str())
    }
}

/// Computes slice angles and paths.
///
/// Slice `i` spans `[sum(v[..i]) / total, sum(v[..=i]) / total] * TAU` after
/// sorting. A zero total collapses every slice to `[0, 0]`.
pub fn compute_pie(data: &[CategoryValue], config: PieConfig) -> ChartResult<PiePlan> {
    let config = config.validate()?;
    let outer_radius = config.size / 2.0;
    let arc = ArcGenerator::new(0.0, outer_radius);

    let mut sorted: Vec<&CategoryValue> = data.iter().collect();
    sorted.sort_by_key(|item| Reverse(OrderedFloat(item.value)));

    let total: f64 = sorted.iter().map(|item| item.value).sum();
    let scale = if total > 0.0 { TAU / total } else { 0.0 };
    trace!(slices = sorted.len(), total, "compute pie");

    let mut cumulative = 0.0;
    let slices = sorted
        .into_iter()
        .map(|item| {
            let start_angle = cumulative * scale;
            cumulative += item.value;
            let end_angle = cumulative * scale;
            PieSlice {
                id: item.id.clone(),
                label: item.label.clone(),
                value: item.value,
                start_angle,
                end_angle,
                path: arc.path(start_angle, end_angle),
            }
        })
        .collect();

    let tooltip = TooltipContent {
        title: None,
        rows: data
            .iter()
            .map(|item| TooltipRow {
                id: item.id.clone(),
                text: format_tooltip_row(&item.label, item.value, config.locale),
            })
            .collect(),
    };

    Ok(PiePlan {
        size: config.size,
        outer_radius,
        slices,
        tooltip,
    })
}
