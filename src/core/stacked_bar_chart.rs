use chrono::NaiveDate;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::band_scale::BandScale;
use crate::core::label_format::{
    LabelLocale, format_date_full, format_tooltip_row, format_value, time_tick_labels,
};
use crate::core::primitives::{AxisTick, GuideLine, Rect, TooltipContent, TooltipRow};
use crate::core::scale::LinearScale;
use crate::core::time_scale::TimeScale;
use crate::core::types::{Category, Margins, Period, StackedBarPoint, Viewport};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedBarChartConfig {
    pub viewport: Viewport,
    pub margins: Margins,
    pub padding_inner: f64,
    pub padding_outer: f64,
    pub tick_count: usize,
    pub locale: LabelLocale,
}

impl Default for StackedBarChartConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(920, 240),
            margins: Margins::new(0.0, 0.0, 24.0, 40.0),
            padding_inner: 0.5,
            padding_outer: 0.25,
            tick_count: 5,
            locale: LabelLocale::default(),
        }
    }
}

impl StackedBarChartConfig {
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
    pub fn with_locale(mut self, locale: LabelLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.margins.validate_within(self.viewport)?;
        if !self.padding_inner.is_finite() || !(0.0..1.0).contains(&self.padding_inner) {
            return Err(ChartError::InvalidConfig(
                "stacked bar inner padding must be in [0, 1)".to_owned(),
            ));
        }
        if !self.padding_outer.is_finite() || self.padding_outer < 0.0 {
            return Err(ChartError::InvalidConfig(
                "stacked bar outer padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// One segment of a stacked column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedCell {
    pub id: String,
    pub value: f64,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedColumn {
    pub date: NaiveDate,
    pub total: f64,
    /// Segments from the bottom of the stack upwards.
    pub cells: Vec<StackedCell>,
    /// Hover target spanning the whole slot and plot height.
    pub pointer: Rect,
    rows: Vec<TooltipRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBarChartPlan {
    pub viewport: Viewport,
    pub margins: Margins,
    pub value_scale: LinearScale,
    /// Category universe in first-seen order.
    pub categories: Vec<Category>,
    /// Stack order, bottom first.
    pub stack_order: Vec<String>,
    pub columns: Vec<StackedColumn>,
    pub frame: Vec<GuideLine>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    locale: LabelLocale,
}

impl StackedBarChartPlan {
    /// Day whose slot contains `(x, y)`.
    #[must_use]
    pub fn locate(&self, x: f64, y: f64) -> Option<NaiveDate> {
        self.columns
            .iter()
            .find(|column| column.pointer.contains(x, y))
            .map(|column| column.date)
    }

    #[must_use]
    pub fn column(&self, date: NaiveDate) -> Option<&StackedColumn> {
        self.columns.iter().find(|column| column.date == date)
    }

    /// Full date heading plus the day's items in input order.
    #[must_use]
    pub fn tooltip(&self, date: NaiveDate) -> Option<TooltipContent> {
        let column = self.column(date)?;
        Some(TooltipContent {
            title: Some(format_date_full(date, self.locale)),
            rows: column.rows.clone(),
        })
    }
}

/// Stacks every day's items into one column per day of `period`.
///
/// Categories are stacked in reverse discovery order, so the category seen
/// last sits at the bottom. Days missing a category contribute a zero-height
/// segment.
pub fn compute_stacked_bar_chart(
    data: &[StackedBarPoint],
    period: Period,
    config: StackedBarChartConfig,
) -> ChartResult<StackedBarChartPlan> {
    let config = config.validate()?;
    let period = period.validate()?;
    let width = config.viewport.width_px();
    let height = config.viewport.height_px();
    let margins = config.margins;
    let plot_bottom = height - margins.bottom;

    let band = BandScale::new(period.days_inclusive(), (margins.left, width))
        .padding_inner(config.padding_inner)
        .padding_outer(config.padding_outer);
    let x = TimeScale::from_dates(period.start, period.end_exclusive(), (margins.left, width));

    let max = data
        .iter()
        .map(|point| OrderedFloat(point.total))
        .max()
        .map_or(0.0, |max| max.0);
    let y = LinearScale::new((max, 0.0), (0.0, plot_bottom)).nice();

    let mut universe: IndexMap<&str, &str> = IndexMap::new();
    for item in data.iter().flat_map(|point| point.items.iter()) {
        universe.entry(item.id.as_str()).or_insert(item.label.as_str());
    }
    let stack_order: Vec<&str> = universe.keys().rev().copied().collect();
    trace!(
        columns = data.len(),
        categories = universe.len(),
        max,
        "compute stacked bar chart"
    );

    let bandwidth = band.bandwidth();
    let step = band.step();
    let inset = (step - bandwidth) / 2.0;
    let columns = data
        .iter()
        .map(|point| {
            let left = band.position_or_default(&point.date);
            let mut base = 0.0;
            let cells = stack_order
                .iter()
                .map(|id| {
                    let value = point
                        .items
                        .iter()
                        .find(|item| item.id == *id)
                        .map_or(0.0, |item| item.value);
                    let bottom = y.map(base);
                    base += value;
                    let top = y.map(base);
                    StackedCell {
                        id: (*id).to_owned(),
                        value,
                        rect: Rect::new(left, top, bandwidth, bottom - top),
                    }
                })
                .collect();
            StackedColumn {
                date: point.date,
                total: point.total,
                cells,
                pointer: Rect::new(left - inset, 0.0, step, plot_bottom),
                rows: point
                    .items
                    .iter()
                    .map(|item| TooltipRow {
                        id: item.id.clone(),
                        text: format_tooltip_row(&item.label, item.value, config.locale),
                    })
                    .collect(),
            }
        })
        .collect();

    let frame = vec![
        GuideLine::new(margins.left, plot_bottom, width, plot_bottom),
        GuideLine::new(margins.left, 0.0, margins.left, plot_bottom),
    ];

    let tick_dates = x.ticks(config.tick_count);
    let x_ticks = time_tick_labels(&tick_dates, config.locale)
        .into_iter()
        .zip(&tick_dates)
        .map(|(label, date)| AxisTick::new(label, x.map_date(*date) + step / 2.0))
        .collect();
    let y_ticks = y
        .ticks(config.tick_count)
        .into_iter()
        .map(|value| AxisTick::new(format_value(value, config.locale), y.map(value)))
        .collect();

    Ok(StackedBarChartPlan {
        viewport: config.viewport,
        margins,
        value_scale: y,
        categories: universe
            .iter()
            .map(|(id, label)| Category::new(*id, *label))
            .collect(),
        stack_order: stack_order.iter().map(|id| (*id).to_owned()).collect(),
        columns,
        frame,
        x_ticks,
        y_ticks,
        locale: config.locale,
    })
}
