use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::band_scale::BandScale;
use crate::core::label_format::{LabelLocale, format_tooltip_row, format_value};
use crate::core::primitives::{AxisTick, Rect, TooltipContent, TooltipRow};
use crate::core::scale::{LinearScale, ticks};
use crate::core::types::{CategoryValue, Margins, Viewport};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarChartConfig {
    pub viewport: Viewport,
    pub margins: Margins,
    /// Band padding between rows, as a fraction of the row step.
    pub band_padding: f64,
    pub tick_count: usize,
    pub locale: LabelLocale,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(376, 240),
            margins: Margins::new(16.0, 16.0, 0.0, 64.0),
            band_padding: 0.3,
            tick_count: 5,
            locale: LabelLocale::default(),
        }
    }
}

impl BarChartConfig {
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_band_padding(mut self, band_padding: f64) -> Self {
        self.band_padding = band_padding;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.margins.validate_within(self.viewport)?;
        if !self.band_padding.is_finite() || !(0.0..1.0).contains(&self.band_padding) {
            return Err(ChartError::InvalidConfig(
                "bar band padding must be in [0, 1)".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub rect: Rect,
}

/// Full-row hover target for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPointer {
    pub id: String,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartPlan {
    pub viewport: Viewport,
    pub margins: Margins,
    pub value_scale: LinearScale,
    /// Bars in input order.
    pub bars: Vec<Bar>,
    /// Value ticks along the horizontal axis.
    pub x_ticks: Vec<AxisTick>,
    /// Category labels at band centres, top to bottom.
    pub y_ticks: Vec<AxisTick>,
    pub pointers: Vec<BarPointer>,
    locale: LabelLocale,
}

impl BarChartPlan {
    /// Category whose row contains `(x, y)`.
    #[must_use]
    pub fn locate(&self, x: f64, y: f64) -> Option<&str> {
        self.pointers
            .iter()
            .find(|pointer| pointer.rect.contains(x, y))
            .map(|pointer| pointer.id.as_str())
    }

    /// `label: value` for the focused category.
    #[must_use]
    pub fn tooltip(&self, id: &str) -> Option<TooltipContent> {
        let bar = self.bars.iter().find(|bar| bar.id == id)?;
        Some(TooltipContent {
            title: None,
            rows: vec![TooltipRow {
                id: bar.id.clone(),
                text: format_tooltip_row(&bar.label, bar.value, self.locale),
            }],
        })
    }
}

/// Lays out horizontal bars, one row per category, largest value on top.
pub fn compute_bar_chart(data: &[CategoryValue], config: BarChartConfig) -> ChartResult<BarChartPlan> {
    let config = config.validate()?;
    let width = config.viewport.width_px();
    let height = config.viewport.height_px();
    let margins = config.margins;

    let max = data
        .iter()
        .map(|item| OrderedFloat(item.value))
        .max()
        .map_or(0.0, |max| max.0);
    let x = LinearScale::new((0.0, max), (margins.left, width - margins.right)).nice();

    let mut rows: Vec<&CategoryValue> = data.iter().collect();
    rows.sort_by_key(|item| Reverse(OrderedFloat(item.value)));
    let y = BandScale::new(rows.iter().map(|item| item.id.as_str()), (margins.top, height))
        .padding(config.band_padding);
    trace!(rows = rows.len(), max, "compute bar chart");

    let x0 = x.map(0.0);
    let bars = data
        .iter()
        .map(|item| Bar {
            id: item.id.clone(),
            label: item.label.clone(),
            value: item.value,
            rect: Rect::new(
                x0,
                y.position_or_default(item.id.as_str()),
                x.map(item.value) - x0,
                y.bandwidth(),
            ),
        })
        .collect();

    let (d0, d1) = x.domain();
    let x_ticks = ticks(d0, d1, config.tick_count)
        .into_iter()
        .map(|value| AxisTick::new(format_value(value, config.locale), x.map(value)))
        .collect();

    let y_ticks = rows
        .iter()
        .map(|item| {
            AxisTick::new(
                item.label.clone(),
                y.position_or_default(item.id.as_str()) + y.bandwidth() / 2.0,
            )
        })
        .collect();

    let pointer_height = y.step();
    let pointer_inset = (pointer_height - y.bandwidth()) / 2.0;
    let pointers = data
        .iter()
        .map(|item| BarPointer {
            id: item.id.clone(),
            rect: Rect::new(
                x0,
                y.position_or_default(item.id.as_str()) - pointer_inset,
                width - margins.left - margins.right,
                pointer_height,
            ),
        })
        .collect();

    Ok(BarChartPlan {
        viewport: config.viewport,
        margins,
        value_scale: x,
        bars,
        x_ticks,
        y_ticks,
        pointers,
        locale: config.locale,
    })
}
