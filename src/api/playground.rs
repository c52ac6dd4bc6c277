use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::api::mock_data::{
    fruits, generate_category_values, generate_gauge_value, generate_stacked_bars,
    generate_time_series,
};
use crate::core::{
    BarChartConfig, BarChartPlan, Category, CategoryValue, GaugeConfig, GaugePlan, LabelLocale,
    LineChartConfig, LineChartPlan, Period, PieConfig, PiePlan, StackedBarChartConfig,
    StackedBarChartPlan, StackedBarPoint, TimeSeriesPoint, TooltipContent, compute_bar_chart,
    compute_gauge, compute_line_chart, compute_pie, compute_stacked_bar_chart,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HoverState;
use crate::render::{DrawPlan, Renderer};

/// Chart kinds hosted by the playground, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    Gauge,
    Pie,
    Bar,
    Line,
    StackedBar,
}

impl ChartSlot {
    pub const ALL: [Self; 5] = [
        Self::Gauge,
        Self::Pie,
        Self::Bar,
        Self::Line,
        Self::StackedBar,
    ];
}

/// Per-chart configuration of the playground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PlaygroundConfig {
    pub gauge: GaugeConfig,
    pub pie: PieConfig,
    pub bar: BarChartConfig,
    pub line: LineChartConfig,
    pub stacked_bar: StackedBarChartConfig,
}

impl PlaygroundConfig {
    /// Applies `locale` to every chart.
    #[must_use]
    pub fn with_locale(mut self, locale: LabelLocale) -> Self {
        self.gauge.locale = locale;
        self.pie.locale = locale;
        self.bar.locale = locale;
        self.line.locale = locale;
        self.stacked_bar.locale = locale;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.gauge.validate()?;
        self.pie.validate()?;
        self.bar.validate()?;
        self.line.validate()?;
        self.stacked_bar.validate()?;
        Ok(self)
    }
}

/// Current dataset of every slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlaygroundData {
    pub gauge: f64,
    pub pie: Vec<CategoryValue>,
    pub bar: Vec<CategoryValue>,
    pub line: Vec<TimeSeriesPoint>,
    pub stacked_bar: Vec<StackedBarPoint>,
}

/// Hosts one chart of each kind over a shared period and category set.
///
/// Plans are recomputed from the current data on demand; pointer handlers
/// drive a hover machine per interactive slot through the plans' hit testing.
#[derive(Debug, Clone)]
pub struct ChartPlayground {
    config: PlaygroundConfig,
    period: Period,
    categories: Vec<Category>,
    data: PlaygroundData,
    pie_hover: HoverState<String>,
    bar_hover: HoverState<String>,
    line_hover: HoverState<NaiveDate>,
    stacked_bar_hover: HoverState<NaiveDate>,
}

impl ChartPlayground {
    /// Creates an empty playground charting the fruit categories.
    pub fn new(period: Period, config: PlaygroundConfig) -> ChartResult<Self> {
        Ok(Self {
            config: config.validate()?,
            period: period.validate()?,
            categories: fruits(),
            data: PlaygroundData::default(),
            pie_hover: HoverState::Idle,
            bar_hover: HoverState::Idle,
            line_hover: HoverState::Idle,
            stacked_bar_hover: HoverState::Idle,
        })
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> ChartResult<Self> {
        if categories.is_empty() {
            return Err(ChartError::InvalidConfig(
                "playground needs at least one category".to_owned(),
            ));
        }
        self.categories = categories;
        Ok(self)
    }

    #[must_use]
    pub fn config(&self) -> PlaygroundConfig {
        self.config
    }

    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn data(&self) -> &PlaygroundData {
        &self.data
    }

    /// Replaces every dataset wholesale and resets hover state.
    pub fn set_data(&mut self, data: PlaygroundData) {
        self.data = data;
        self.reset_hover();
    }

    /// Draws fresh random data for every slot.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let data = PlaygroundData {
            gauge: generate_gauge_value(rng),
            pie: generate_category_values(rng, &self.categories),
            bar: generate_category_values(rng, &self.categories),
            line: generate_time_series(rng, &self.categories, self.period),
            stacked_bar: generate_stacked_bars(rng, &self.categories, self.period),
        };
        debug!(
            categories = self.categories.len(),
            days = data.line.len(),
            gauge = data.gauge,
            "regenerated playground data"
        );
        self.set_data(data);
    }

    pub fn gauge_plan(&self) -> ChartResult<GaugePlan> {
        compute_gauge(self.data.gauge, self.config.gauge)
    }

    pub fn pie_plan(&self) -> ChartResult<PiePlan> {
        compute_pie(&self.data.pie, self.config.pie)
    }

    pub fn bar_plan(&self) -> ChartResult<BarChartPlan> {
        compute_bar_chart(&self.data.bar, self.config.bar)
    }

    pub fn line_plan(&self) -> ChartResult<LineChartPlan> {
        compute_line_chart(&self.data.line, self.period, self.config.line)
    }

    pub fn stacked_bar_plan(&self) -> ChartResult<StackedBarChartPlan> {
        compute_stacked_bar_chart(&self.data.stacked_bar, self.period, self.config.stacked_bar)
    }

    pub fn draw_plan(&self, slot: ChartSlot) -> ChartResult<DrawPlan> {
        Ok(match slot {
            ChartSlot::Gauge => DrawPlan::Gauge(self.gauge_plan()?),
            ChartSlot::Pie => DrawPlan::Pie(self.pie_plan()?),
            ChartSlot::Bar => DrawPlan::Bar(self.bar_plan()?),
            ChartSlot::Line => DrawPlan::Line(self.line_plan()?),
            ChartSlot::StackedBar => DrawPlan::StackedBar(self.stacked_bar_plan()?),
        })
    }

    /// Plans of every slot in display order.
    pub fn draw_plans(&self) -> ChartResult<Vec<DrawPlan>> {
        ChartSlot::ALL
            .into_iter()
            .map(|slot| self.draw_plan(slot))
            .collect()
    }

    /// Hands every plan to `renderer` in display order.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        for plan in self.draw_plans()? {
            renderer.render(&plan)?;
        }
        Ok(())
    }

    /// Hit-tests `slot` at `(x, y)` and returns the tooltip of the focused key.
    pub fn on_pointer_move(
        &mut self,
        slot: ChartSlot,
        x: f64,
        y: f64,
    ) -> ChartResult<Option<TooltipContent>> {
        trace!(?slot, x, y, "playground pointer move");
        Ok(match slot {
            ChartSlot::Gauge => None,
            ChartSlot::Pie => {
                let plan = self.pie_plan()?;
                self.pie_hover
                    .track(&plan, x, y)
                    .map(|_| plan.tooltip.clone())
            }
            ChartSlot::Bar => {
                let plan = self.bar_plan()?;
                self.bar_hover
                    .track(&plan, x, y)
                    .and_then(|id| plan.tooltip(id))
            }
            ChartSlot::Line => {
                let plan = self.line_plan()?;
                self.line_hover
                    .track(&plan, x, y)
                    .and_then(|date| plan.tooltip(*date))
            }
            ChartSlot::StackedBar => {
                let plan = self.stacked_bar_plan()?;
                self.stacked_bar_hover
                    .track(&plan, x, y)
                    .and_then(|date| plan.tooltip(*date))
            }
        })
    }

    pub fn on_pointer_leave(&mut self, slot: ChartSlot) {
        match slot {
            ChartSlot::Gauge => {}
            ChartSlot::Pie => self.pie_hover.on_pointer_leave(),
            ChartSlot::Bar => self.bar_hover.on_pointer_leave(),
            ChartSlot::Line => self.line_hover.on_pointer_leave(),
            ChartSlot::StackedBar => self.stacked_bar_hover.on_pointer_leave(),
        }
    }

    /// Pointer position of the focused slot, if any.
    #[must_use]
    pub fn hover_pointer(&self, slot: ChartSlot) -> Option<(f64, f64)> {
        match slot {
            ChartSlot::Gauge => None,
            ChartSlot::Pie => self.pie_hover.pointer(),
            ChartSlot::Bar => self.bar_hover.pointer(),
            ChartSlot::Line => self.line_hover.pointer(),
            ChartSlot::StackedBar => self.stacked_bar_hover.pointer(),
        }
    }

    #[must_use]
    pub fn focused_category(&self, slot: ChartSlot) -> Option<&str> {
        match slot {
            ChartSlot::Pie => self.pie_hover.focused().map(String::as_str),
            ChartSlot::Bar => self.bar_hover.focused().map(String::as_str),
            _ => None,
        }
    }

    #[must_use]
    pub fn focused_date(&self, slot: ChartSlot) -> Option<NaiveDate> {
        match slot {
            ChartSlot::Line => self.line_hover.focused().copied(),
            ChartSlot::StackedBar => self.stacked_bar_hover.focused().copied(),
            _ => None,
        }
    }

    fn reset_hover(&mut self) {
        self.pie_hover.on_pointer_leave();
        self.bar_hover.on_pointer_leave();
        self.line_hover.on_pointer_leave();
        self.stacked_bar_hover.on_pointer_leave();
    }
}
