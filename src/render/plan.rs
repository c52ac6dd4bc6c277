use serde::{Deserialize, Serialize};

use crate::core::{
    AxisTick, BarChartPlan, GaugePlan, GuideLine, LineChartPlan, PiePlan, Rect,
    StackedBarChartPlan,
};
use crate::error::{ChartError, ChartResult};

/// Geometry of one chart, ready for a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "plan", rename_all = "snake_case")]
pub enum DrawPlan {
    Gauge(GaugePlan),
    Pie(PiePlan),
    Bar(BarChartPlan),
    Line(LineChartPlan),
    StackedBar(StackedBarChartPlan),
}

/// Primitive counts of a plan, as recorded by [`crate::render::NullRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanStats {
    pub paths: usize,
    pub rects: usize,
    pub lines: usize,
    pub circles: usize,
    pub texts: usize,
}

impl DrawPlan {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Gauge(_) => "gauge",
            Self::Pie(_) => "pie",
            Self::Bar(_) => "bar",
            Self::Line(_) => "line",
            Self::StackedBar(_) => "stacked_bar",
        }
    }

    /// Pixel size of the plan's drawing surface.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Gauge(plan) => (plan.size, plan.size),
            Self::Pie(plan) => (plan.size, plan.size),
            Self::Bar(plan) => (plan.viewport.width_px(), plan.viewport.height_px()),
            Self::Line(plan) => (plan.viewport.width_px(), plan.viewport.height_px()),
            Self::StackedBar(plan) => (plan.viewport.width_px(), plan.viewport.height_px()),
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    #[must_use]
    pub fn stats(&self) -> PlanStats {
        match self {
            Self::Gauge(_) => PlanStats {
                paths: 2,
                texts: 1,
                ..PlanStats::default()
            },
            Self::Pie(plan) => PlanStats {
                paths: plan.slices.len(),
                ..PlanStats::default()
            },
            Self::Bar(plan) => PlanStats {
                rects: plan.bars.len() + plan.pointers.len(),
                texts: plan.x_ticks.len() + plan.y_ticks.len(),
                ..PlanStats::default()
            },
            Self::Line(plan) => PlanStats {
                paths: plan.lines.len(),
                rects: 1,
                lines: plan.frame.len() + plan.marker_groups.len(),
                circles: plan
                    .marker_groups
                    .iter()
                    .map(|group| group.markers.len())
                    .sum(),
                texts: plan.x_ticks.len() + plan.y_ticks.len(),
            },
            Self::StackedBar(plan) => PlanStats {
                rects: plan
                    .columns
                    .iter()
                    .map(|column| column.cells.len() + 1)
                    .sum(),
                lines: plan.frame.len(),
                texts: plan.x_ticks.len() + plan.y_ticks.len(),
                ..PlanStats::default()
            },
        }
    }

    /// Rejects plans carrying non-finite coordinates or an empty surface.
    pub fn validate(&self) -> ChartResult<()> {
        let (width, height) = self.size();
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::Render(format!(
                "{} plan has an invalid surface {width}x{height}",
                self.kind()
            )));
        }

        match self {
            Self::Gauge(_) => Ok(()),
            Self::Pie(plan) => plan.slices.iter().try_for_each(|slice| {
                check_finite("pie slice angle", &[slice.start_angle, slice.end_angle])
            }),
            Self::Bar(plan) => {
                plan.bars
                    .iter()
                    .try_for_each(|bar| check_rect("bar", bar.rect))?;
                plan.pointers
                    .iter()
                    .try_for_each(|pointer| check_rect("bar pointer", pointer.rect))?;
                check_ticks(&plan.x_ticks)?;
                check_ticks(&plan.y_ticks)
            }
            Self::Line(plan) => {
                check_rect("line pointer", plan.pointer)?;
                plan.frame
                    .iter()
                    .try_for_each(|line| check_line("line frame", *line))?;
                for group in &plan.marker_groups {
                    check_line("line guide", group.guide)?;
                    group.markers.iter().try_for_each(|marker| {
                        check_finite("line marker", &[marker.cx, marker.cy, marker.r])
                    })?;
                }
                check_ticks(&plan.x_ticks)?;
                check_ticks(&plan.y_ticks)
            }
            Self::StackedBar(plan) => {
                for column in &plan.columns {
                    check_rect("stacked pointer", column.pointer)?;
                    column
                        .cells
                        .iter()
                        .try_for_each(|cell| check_rect("stacked cell", cell.rect))?;
                }
                plan.frame
                    .iter()
                    .try_for_each(|line| check_line("stacked frame", *line))?;
                check_ticks(&plan.x_ticks)?;
                check_ticks(&plan.y_ticks)
            }
        }
    }
}

fn check_finite(what: &str, values: &[f64]) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::Render(format!("{what} coordinates must be finite")))
    }
}

fn check_rect(what: &str, rect: Rect) -> ChartResult<()> {
    if rect.is_finite() {
        Ok(())
    } else {
        Err(ChartError::Render(format!("{what} rect must be finite")))
    }
}

fn check_line(what: &str, line: GuideLine) -> ChartResult<()> {
    if line.is_finite() {
        Ok(())
    } else {
        Err(ChartError::Render(format!("{what} line must be finite")))
    }
}

fn check_ticks(ticks: &[AxisTick]) -> ChartResult<()> {
    ticks
        .iter()
        .try_for_each(|tick| check_finite("axis tick", &[tick.position]))
}
