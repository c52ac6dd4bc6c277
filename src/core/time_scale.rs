use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::scale::{LinearScale, tick_step};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Calendar interval used to place time ticks on day boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeTickInterval {
    /// Days whose zero-based day-of-month is a multiple of `step`.
    Day { step: u32 },
    /// Sundays.
    Week,
    /// First day of months whose zero-based month is a multiple of `step`.
    Month { step: u32 },
    /// January 1st of years that are a multiple of `step`.
    Year { step: i32 },
}

impl TimeTickInterval {
    /// Approximate duration used to rank intervals against a target spacing.
    #[must_use]
    pub fn approx_millis(self) -> f64 {
        match self {
            Self::Day { step } => MILLIS_PER_DAY * f64::from(step),
            Self::Week => MILLIS_PER_DAY * 7.0,
            Self::Month { step } => MILLIS_PER_DAY * 30.0 * f64::from(step),
            Self::Year { step } => MILLIS_PER_DAY * 365.0 * f64::from(step),
        }
    }
}

const TICK_INTERVALS: [TimeTickInterval; 5] = [
    TimeTickInterval::Day { step: 1 },
    TimeTickInterval::Day { step: 2 },
    TimeTickInterval::Week,
    TimeTickInterval::Month { step: 1 },
    TimeTickInterval::Month { step: 3 },
];

/// Linear mapping from calendar time to pixels, interpolated over elapsed
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    domain: (NaiveDateTime, NaiveDateTime),
    linear: LinearScale,
}

impl TimeScale {
    #[must_use]
    pub fn new(domain: (NaiveDateTime, NaiveDateTime), range: (f64, f64)) -> Self {
        let linear = LinearScale::new((to_millis(domain.0), to_millis(domain.1)), range);
        Self { domain, linear }
    }

    /// Scale whose domain runs from midnight of `start` to midnight of `end`.
    #[must_use]
    pub fn from_dates(start: NaiveDate, end: NaiveDate, range: (f64, f64)) -> Self {
        Self::new((midnight(start), midnight(end)), range)
    }

    #[must_use]
    pub fn domain(self) -> (NaiveDateTime, NaiveDateTime) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn map(self, time: NaiveDateTime) -> f64 {
        self.linear.map(to_millis(time))
    }

    #[must_use]
    pub fn map_date(self, date: NaiveDate) -> f64 {
        self.map(midnight(date))
    }

    /// Maps a pixel back to a timestamp, or `None` when the result falls
    /// outside the representable calendar.
    #[must_use]
    pub fn invert(self, pixel: f64) -> Option<NaiveDateTime> {
        let millis = self.linear.invert(pixel);
        if !millis.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(millis.round() as i64).map(|dt| dt.naive_utc())
    }

    /// Interval used by [`TimeScale::ticks`] for `count` ticks.
    #[must_use]
    pub fn tick_interval(self, count: usize) -> TimeTickInterval {
        let (start, stop) = ordered(self.domain);
        let span = to_millis(stop) - to_millis(start);
        let target = span / count.max(1) as f64;

        let index = TICK_INTERVALS.partition_point(|interval| interval.approx_millis() <= target);
        if index == TICK_INTERVALS.len() {
            let years_start = to_millis(start) / TimeTickInterval::Year { step: 1 }.approx_millis();
            let years_stop = to_millis(stop) / TimeTickInterval::Year { step: 1 }.approx_millis();
            let step = tick_step(years_start, years_stop, count).round().max(1.0);
            return TimeTickInterval::Year { step: step as i32 };
        }
        if index == 0 {
            return TICK_INTERVALS[0];
        }

        let below = TICK_INTERVALS[index - 1];
        let above = TICK_INTERVALS[index];
        if target / below.approx_millis() < above.approx_millis() / target {
            below
        } else {
            above
        }
    }

    /// Calendar-day tick dates inside the domain, in ascending order.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<NaiveDate> {
        if count == 0 {
            return Vec::new();
        }
        let (start, stop) = ordered(self.domain);
        let first = ceil_to_day(start);
        let last = stop.date();
        if first > last {
            return Vec::new();
        }

        match self.tick_interval(count) {
            TimeTickInterval::Day { step } => first
                .iter_days()
                .take_while(|day| *day <= last)
                .filter(|day| day.day0() % step == 0)
                .collect(),
            TimeTickInterval::Week => {
                let offset = days_until_sunday(first.weekday());
                let Some(first_sunday) = first.checked_add_days(Days::new(offset)) else {
                    return Vec::new();
                };
                first_sunday
                    .iter_weeks()
                    .take_while(|day| *day <= last)
                    .collect()
            }
            TimeTickInterval::Month { step } => month_starts(first, last)
                .filter(|day| day.month0() % step == 0)
                .collect(),
            TimeTickInterval::Year { step } => month_starts(first, last)
                .filter(|day| day.month0() == 0 && day.year().rem_euclid(step) == 0)
                .collect(),
        }
    }
}

#[must_use]
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn to_millis(time: NaiveDateTime) -> f64 {
    time.and_utc().timestamp_millis() as f64
}

fn ordered(domain: (NaiveDateTime, NaiveDateTime)) -> (NaiveDateTime, NaiveDateTime) {
    if domain.1 < domain.0 {
        (domain.1, domain.0)
    } else {
        domain
    }
}

fn ceil_to_day(time: NaiveDateTime) -> NaiveDate {
    let date = time.date();
    if time.time() == NaiveTime::MIN {
        date
    } else {
        date.succ_opt().unwrap_or(date)
    }
}

fn days_until_sunday(weekday: Weekday) -> u64 {
    u64::from((7 - weekday.num_days_from_sunday()) % 7)
}

fn month_starts(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let first_month = NaiveDate::from_ymd_opt(first.year(), first.month(), 1)
        .and_then(|start| {
            if start < first {
                start.checked_add_months(Months::new(1))
            } else {
                Some(start)
            }
        });

    std::iter::successors(first_month, |day| day.checked_add_months(Months::new(1)))
        .take_while(move |day| *day <= last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn one_month_span_with_five_ticks_uses_weeks() {
        let scale = TimeScale::from_dates(day(2024, 12, 15), day(2025, 1, 15), (0.0, 100.0));
        assert_eq!(scale.tick_interval(5), TimeTickInterval::Week);
        assert_eq!(
            scale.ticks(5),
            vec![
                day(2024, 12, 15),
                day(2024, 12, 22),
                day(2024, 12, 29),
                day(2025, 1, 5),
                day(2025, 1, 12),
            ]
        );
    }

    #[test]
    fn short_span_uses_odd_days_of_month() {
        let scale = TimeScale::from_dates(day(2025, 1, 30), day(2025, 2, 8), (0.0, 100.0));
        assert_eq!(scale.tick_interval(5), TimeTickInterval::Day { step: 2 });
        assert_eq!(
            scale.ticks(5),
            vec![
                day(2025, 1, 31),
                day(2025, 2, 1),
                day(2025, 2, 3),
                day(2025, 2, 5),
                day(2025, 2, 7),
            ]
        );
    }

    #[test]
    fn multi_year_span_uses_year_boundaries() {
        let scale = TimeScale::from_dates(day(2015, 6, 1), day(2025, 6, 1), (0.0, 100.0));
        assert_eq!(scale.tick_interval(5), TimeTickInterval::Year { step: 2 });
        assert_eq!(
            scale.ticks(5),
            vec![
                day(2016, 1, 1),
                day(2018, 1, 1),
                day(2020, 1, 1),
                day(2022, 1, 1),
                day(2024, 1, 1),
            ]
        );
    }

    #[test]
    fn invert_round_trips_midnight() {
        let scale = TimeScale::from_dates(day(2025, 1, 1), day(2025, 1, 11), (40.0, 140.0));
        let px = scale.map_date(day(2025, 1, 4));
        assert!((px - 70.0).abs() <= 1e-9);
        assert_eq!(scale.invert(px), Some(midnight(day(2025, 1, 4))));
    }
}
