use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Tick values for one axis. Axes rarely carry more than a dozen ticks.
pub type TickValues = SmallVec<[f64; 12]>;

/// Tick count `nice()` uses when the caller does not pick one.
pub const DEFAULT_NICE_TICK_COUNT: usize = 10;

const MAX_NICE_PASSES: usize = 10;

/// Continuous linear mapping from a data domain to a pixel range.
///
/// The domain may be inverted (`[max, 0]`) to flip an axis so larger values land
/// at smaller pixels. A zero-width domain maps every value to `range.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain.0 == self.domain.1
    }

    /// Rounds the domain outward to the default tick increment.
    #[must_use]
    pub fn nice(self) -> Self {
        self.nice_with(DEFAULT_NICE_TICK_COUNT)
    }

    /// Rounds the domain outward until both ends sit on multiples of the tick
    /// increment for `count` ticks. Orientation is preserved.
    #[must_use]
    pub fn nice_with(self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        if !d0.is_finite() || !d1.is_finite() || d0 == d1 || count == 0 {
            return self;
        }

        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };
        let mut previous_step: Option<f64> = None;

        for _ in 0..MAX_NICE_PASSES {
            let step = tick_increment(start, stop, count);
            if previous_step == Some(step) {
                let domain = if reversed { (stop, start) } else { (start, stop) };
                return Self {
                    domain,
                    range: self.range,
                };
            }

            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous_step = Some(step);
        }

        self
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return r0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        d0 + (pixel - r0) / span * (d1 - d0)
    }

    /// Round tick values spanning the domain, in domain order.
    #[must_use]
    pub fn ticks(self, count: usize) -> TickValues {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// Human-friendly tick values between `start` and `stop`.
///
/// The step is the `{1, 2, 5} x 10^k` value geometrically closest to
/// `span / count`; every multiple of it inside the bounds is emitted. Reversed
/// bounds yield descending ticks.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> TickValues {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return TickValues::new();
    }
    if start == stop {
        return smallvec::smallvec![start];
    }

    let reversed = stop < start;
    let spec = if reversed {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    let Some(TickSpec {
        first,
        last,
        increment,
    }) = spec
    else {
        return TickValues::new();
    };
    if last < first {
        return TickValues::new();
    }

    let tick_at = |index: f64| {
        if increment < 0.0 {
            index / -increment
        } else {
            index * increment
        }
    };

    let n = (last - first) as usize + 1;
    (0..n)
        .map(|i| {
            let index = if reversed {
                last - i as f64
            } else {
                first + i as f64
            };
            tick_at(index)
        })
        .collect()
}

/// Signed tick increment for `count` ticks over `[start, stop]`.
///
/// Positive values are the step itself; negative values encode `-1 / step`
/// for sub-unit steps so callers can stay in integer multiples. Returns `0.0`
/// when no increment exists (degenerate or non-finite bounds).
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).map_or(0.0, |spec| spec.increment)
}

/// Unsigned tick step for `count` ticks over the bounds, in either order.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reversed = stop < start;
    let increment = if reversed {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if increment < 0.0 {
        1.0 / -increment
    } else {
        increment
    };
    if reversed { -step } else { step }
}

#[derive(Debug, Clone, Copy)]
struct TickSpec {
    first: f64,
    last: f64,
    increment: f64,
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }

    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (first, last, increment) = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut first = round_half_up(start * inc);
        let mut last = round_half_up(stop * inc);
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        (first, last, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut first = round_half_up(start / inc);
        let mut last = round_half_up(stop / inc);
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        (first, last, inc)
    };

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    if !first.is_finite() || !last.is_finite() {
        return None;
    }

    Some(TickSpec {
        first,
        last,
        increment,
    })
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
