use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::band_scale::BandScale;
use crate::core::label_format::{
    LabelLocale, format_date_full, format_tooltip_row, format_value, time_tick_labels,
};
use crate::core::path::line_path;
use crate::core::primitives::{AxisTick, GuideLine, Rect, TooltipContent, TooltipRow};
use crate::core::scale::LinearScale;
use crate::core::time_scale::TimeScale;
use crate::core::types::{Margins, Period, TimeSeriesPoint, Viewport};
use crate::error::{ChartError, ChartResult};

pub const LINE_MARKER_RADIUS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineChartConfig {
    pub viewport: Viewport,
    pub margins: Margins,
    pub tick_count: usize,
    pub marker_radius: f64,
    pub locale: LabelLocale,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(920, 240),
            margins: Margins::new(0.0, 0.0, 24.0, 40.0),
            tick_count: 5,
            marker_radius: LINE_MARKER_RADIUS,
            locale: LabelLocale::default(),
        }
    }
}

impl LineChartConfig {
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
        if !self.marker_radius.is_finite() || self.marker_radius < 0.0 {
            return Err(ChartError::InvalidConfig(
                "line marker radius must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub id: String,
    pub label: String,
    /// Polyline path; breaks where a day lacks this category.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineMarker {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

/// Hover decorations of one day: a vertical guide and one marker per item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerGroup {
    pub date: NaiveDate,
    pub guide: GuideLine,
    pub markers: Vec<LineMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartPlan {
    pub viewport: Viewport,
    pub margins: Margins,
    pub value_scale: LinearScale,
    pub time_scale: TimeScale,
    /// Width of one day in the snapping band.
    pub bandwidth: f64,
    pub lines: Vec<LineSeries>,
    pub marker_groups: Vec<MarkerGroup>,
    pub frame: Vec<GuideLine>,
    pub pointer: Rect,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    locale: LabelLocale,
}

impl LineChartPlan {
    /// Day whose data point is nearest to the pointer column.
    ///
    /// The pixel is shifted by half a band so the snap switches halfway
    /// between two days, then truncated to midnight and matched exactly.
    #[must_use]
    pub fn locate(&self, x: f64) -> Option<NaiveDate> {
        let date = self.time_scale.invert(x + self.bandwidth / 2.0)?.date();
        self.marker_groups
            .iter()
            .any(|group| group.date == date)
            .then_some(date)
    }

    #[must_use]
    pub fn marker_group(&self, date: NaiveDate) -> Option<&MarkerGroup> {
        self.marker_groups.iter().find(|group| group.date == date)
    }

    /// Full date heading plus `label: value` per item of `date`.
    #[must_use]
    pub fn tooltip(&self, date: NaiveDate) -> Option<TooltipContent> {
        let group = self.marker_group(date)?;
        Some(TooltipContent {
            title: Some(format_date_full(date, self.locale)),
            rows: group
                .markers
                .iter()
                .map(|marker| TooltipRow {
                    id: marker.id.clone(),
                    text: format_tooltip_row(&marker.label, marker.value, self.locale),
                })
                .collect(),
        })
    }
}

/// Lays out one polyline per category of the first point over `period`.
pub fn compute_line_chart(
    data: &[TimeSeriesPoint],
    period: Period,
    config: LineChartConfig,
) -> ChartResult<LineChartPlan> {
    let config = config.validate()?;
    let period = period.validate()?;
    let width = config.viewport.width_px();
    let height = config.viewport.height_px();
    let margins = config.margins;
    let plot_bottom = height - margins.bottom;

    let x = TimeScale::from_dates(period.start, period.end, (margins.left, width));
    let band = BandScale::new(period.days_exclusive(), (margins.left, width));

    let max = data
        .iter()
        .flat_map(|point| point.items.iter())
        .map(|item| OrderedFloat(item.value))
        .max()
        .map_or(0.0, |max| max.0);
    let y = LinearScale::new((max, 0.0), (0.0, plot_bottom)).nice();
    trace!(points = data.len(), max, "compute line chart");

    let canonical = data.first().map(|point| point.items.as_slice()).unwrap_or_default();
    let lines = canonical
        .iter()
        .map(|category| {
            let series: Vec<(NaiveDate, Option<f64>)> = data
                .iter()
                .map(|point| (point.date, point.value_of(&category.id)))
                .collect();
            LineSeries {
                id: category.id.clone(),
                label: category.label.clone(),
                path: line_path(
                    &series,
                    |(_, value)| value.is_some(),
                    |(date, _)| x.map_date(*date),
                    |(_, value)| y.map(value.unwrap_or_default()),
                ),
            }
        })
        .collect();

    let marker_groups = data
        .iter()
        .map(|point| {
            let cx = x.map_date(point.date);
            MarkerGroup {
                date: point.date,
                guide: GuideLine::new(cx, 0.0, cx, plot_bottom),
                markers: point
                    .items
                    .iter()
                    .map(|item| LineMarker {
                        id: item.id.clone(),
                        label: item.label.clone(),
                        value: item.value,
                        cx,
                        cy: y.map(item.value),
                        r: config.marker_radius,
                    })
                    .collect(),
            }
        })
        .collect();

    let frame = vec![
        GuideLine::new(margins.left, plot_bottom, width, plot_bottom),
        GuideLine::new(margins.left, 0.0, margins.left, plot_bottom),
    ];
    let pointer = Rect::new(margins.left, 0.0, width - margins.left, plot_bottom);

    let tick_dates = x.ticks(config.tick_count);
    let x_ticks = time_tick_labels(&tick_dates, config.locale)
        .into_iter()
        .zip(&tick_dates)
        .map(|(label, date)| AxisTick::new(label, x.map_date(*date)))
        .collect();
    let y_ticks = y
        .ticks(config.tick_count)
        .into_iter()
        .map(|value| AxisTick::new(format_value(value, config.locale), y.map(value)))
        .collect();

    Ok(LineChartPlan {
        viewport: config.viewport,
        margins,
        value_scale: y,
        time_scale: x,
        bandwidth: band.bandwidth(),
        lines,
        marker_groups,
        frame,
        pointer,
        x_ticks,
        y_ticks,
        locale: config.locale,
    })
}
