use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{BarChartPlan, LineChartPlan, PiePlan, StackedBarChartPlan};

/// Hit testing shared by interactive plans.
pub trait Locate {
    type Key: Clone + PartialEq;

    /// Key of the hit region containing `(x, y)`, if any.
    fn locate_key(&self, x: f64, y: f64) -> Option<Self::Key>;
}

impl Locate for PiePlan {
    type Key = String;

    fn locate_key(&self, x: f64, y: f64) -> Option<String> {
        self.locate(x, y).map(str::to_owned)
    }
}

impl Locate for BarChartPlan {
    type Key = String;

    fn locate_key(&self, x: f64, y: f64) -> Option<String> {
        self.locate(x, y).map(str::to_owned)
    }
}

impl Locate for LineChartPlan {
    type Key = NaiveDate;

    fn locate_key(&self, x: f64, y: f64) -> Option<NaiveDate> {
        if !self.pointer.contains(x, y) {
            return None;
        }
        self.locate(x)
    }
}

impl Locate for StackedBarChartPlan {
    type Key = NaiveDate;

    fn locate_key(&self, x: f64, y: f64) -> Option<NaiveDate> {
        self.locate(x, y)
    }
}

/// Focus of one chart: nothing, or one key plus the last pointer position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum HoverState<K> {
    #[default]
    Idle,
    Focused { key: K, pointer: (f64, f64) },
}

impl<K: Clone + PartialEq> HoverState<K> {
    #[must_use]
    pub fn focused(&self) -> Option<&K> {
        match self {
            Self::Idle => None,
            Self::Focused { key, .. } => Some(key),
        }
    }

    #[must_use]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        match self {
            Self::Idle => None,
            Self::Focused { pointer, .. } => Some(*pointer),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn on_pointer_enter(&mut self, key: K, x: f64, y: f64) {
        *self = Self::Focused {
            key,
            pointer: (x, y),
        };
    }

    /// Records the pointer position. Ignored while idle.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if let Self::Focused { pointer, .. } = self {
            *pointer = (x, y);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        *self = Self::Idle;
    }

    /// Hit-tests `plan` at `(x, y)` and updates the state accordingly.
    ///
    /// A hit on the focused key only moves the pointer; a hit on another key
    /// refocuses; a miss returns to idle.
    pub fn track<P>(&mut self, plan: &P, x: f64, y: f64) -> Option<&K>
    where
        P: Locate<Key = K>,
    {
        match plan.locate_key(x, y) {
            Some(key) if self.focused() == Some(&key) => self.on_pointer_move(x, y),
            Some(key) => {
                trace!(x, y, "hover focus changed");
                self.on_pointer_enter(key, x, y);
            }
            None => {
                if !self.is_idle() {
                    trace!(x, y, "hover left hit regions");
                }
                self.on_pointer_leave();
            }
        }
        self.focused()
    }
}
