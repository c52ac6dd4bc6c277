use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

/// Pixel insets between the viewport edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Checks the margins are finite, non-negative and leave a non-empty plot area.
    pub fn validate_within(self, viewport: Viewport) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }

        if self.left + self.right >= viewport.width_px()
            || self.top + self.bottom >= viewport.height_px()
        {
            return Err(ChartError::InvalidConfig(
                "margins must leave a non-empty plot area".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Identity of one bar, slice or series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
}

impl Category {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    #[must_use]
    pub fn with_value(&self, value: f64) -> CategoryValue {
        CategoryValue {
            id: self.id.clone(),
            label: self.label.clone(),
            value,
        }
    }
}

/// One non-negative value for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub id: String,
    pub label: String,
    pub value: f64,
}

impl CategoryValue {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
        }
    }
}

/// Values of every category on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub items: Vec<CategoryValue>,
}

impl TimeSeriesPoint {
    #[must_use]
    pub fn new(date: NaiveDate, items: Vec<CategoryValue>) -> Self {
        Self { date, items }
    }

    #[must_use]
    pub fn value_of(&self, id: &str) -> Option<f64> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.value)
    }
}

/// One stacked column: the per-category breakdown of a day plus its total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBarPoint {
    pub date: NaiveDate,
    pub items: Vec<CategoryValue>,
    pub total: f64,
}

impl StackedBarPoint {
    /// Builds a point whose `total` is the sum of `items`.
    #[must_use]
    pub fn from_items(date: NaiveDate, items: Vec<CategoryValue>) -> Self {
        let total = items.iter().map(|item| item.value).sum();
        Self { date, items, total }
    }
}

/// Inclusive calendar period shown on a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ChartResult<Self> {
        Self { start, end }.validate()
    }

    /// Rejects a period whose end precedes its start.
    pub fn validate(self) -> ChartResult<Self> {
        if self.end < self.start {
            return Err(ChartError::InvalidConfig(format!(
                "period end {} precedes start {}",
                self.end, self.start
            )));
        }
        Ok(self)
    }

    /// Days in `[start, end)`.
    #[must_use]
    pub fn days_exclusive(self) -> Vec<NaiveDate> {
        self.start.iter_days().take_while(|day| *day < self.end).collect()
    }

    /// Days in `[start, end]`.
    #[must_use]
    pub fn days_inclusive(self) -> Vec<NaiveDate> {
        self.start.iter_days().take_while(|day| *day <= self.end).collect()
    }

    /// The day after `end`, saturating at the calendar maximum.
    #[must_use]
    pub fn end_exclusive(self) -> NaiveDate {
        self.end.checked_add_days(Days::new(1)).unwrap_or(self.end)
    }
}
