//! Random datasets for the playground.

use chrono::{Datelike, Days, NaiveDate};
use rand::Rng;

use crate::core::{Category, CategoryValue, Period, StackedBarPoint, TimeSeriesPoint};
use crate::error::{ChartError, ChartResult};

/// The five fruit categories the playground charts.
#[must_use]
pub fn fruits() -> Vec<Category> {
    [
        ("apple", "Apple"),
        ("blueberry", "Blueberry"),
        ("grape", "Grape"),
        ("muscat", "Muscat"),
        ("orange", "Orange"),
    ]
    .into_iter()
    .map(|(id, label)| Category::new(id, label))
    .collect()
}

/// First to last day of the calendar month before `today`.
pub fn default_period(today: NaiveDate) -> ChartResult<Period> {
    let end = today
        .with_day(1)
        .and_then(|first| first.checked_sub_days(Days::new(1)))
        .ok_or_else(|| {
            ChartError::InvalidConfig(format!("no calendar month precedes {today}"))
        })?;
    let start = end.with_day(1).ok_or_else(|| {
        ChartError::InvalidConfig(format!("cannot resolve the first day of {end}"))
    })?;
    Period::new(start, end)
}

/// Gauge ratio in `[0, 1)`.
pub fn generate_gauge_value<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.r#gen::<f64>()
}

/// One whole value in `[0, 3000]` per category.
pub fn generate_category_values<R: Rng + ?Sized>(
    rng: &mut R,
    categories: &[Category],
) -> Vec<CategoryValue> {
    categories
        .iter()
        .map(|category| category.with_value((rng.r#gen::<f64>() * 3000.0).round()))
        .collect()
}

/// One point per day of `period`.
///
/// Category `i` of `n` is offset by `(n - 1 - i) * 500`, so earlier
/// categories sit higher and the lines rarely cross.
pub fn generate_time_series<R: Rng + ?Sized>(
    rng: &mut R,
    categories: &[Category],
    period: Period,
) -> Vec<TimeSeriesPoint> {
    let count = categories.len();
    period
        .days_inclusive()
        .into_iter()
        .map(|date| {
            let items = categories
                .iter()
                .enumerate()
                .map(|(index, category)| {
                    let offset = (count - 1 - index) as f64 * 500.0;
                    category.with_value((rng.r#gen::<f64>() * 1000.0).round() + offset)
                })
                .collect();
            TimeSeriesPoint::new(date, items)
        })
        .collect()
}

/// One column per day of `period`, each cell a whole value in `[0, 500]`.
pub fn generate_stacked_bars<R: Rng + ?Sized>(
    rng: &mut R,
    categories: &[Category],
    period: Period,
) -> Vec<StackedBarPoint> {
    period
        .days_inclusive()
        .into_iter()
        .map(|date| {
            let items = categories
                .iter()
                .map(|category| category.with_value((rng.r#gen::<f64>() * 500.0).round()))
                .collect();
            StackedBarPoint::from_items(date, items)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn default_period_is_previous_month() {
        let period = default_period(day(2025, 1, 15)).expect("period");
        assert_eq!(period.start, day(2024, 12, 1));
        assert_eq!(period.end, day(2024, 12, 31));

        let period = default_period(day(2024, 3, 1)).expect("period");
        assert_eq!(period.start, day(2024, 2, 1));
        assert_eq!(period.end, day(2024, 2, 29));
    }

    #[test]
    fn time_series_offsets_keep_first_category_highest_floor() {
        let mut rng = StdRng::seed_from_u64(7);
        let period = Period::new(day(2025, 1, 1), day(2025, 1, 10)).expect("period");
        let points = generate_time_series(&mut rng, &fruits(), period);
        assert_eq!(points.len(), 10);
        for point in &points {
            let apple = point.value_of("apple").expect("apple");
            assert!((2000.0..=3000.0).contains(&apple));
            let orange = point.value_of("orange").expect("orange");
            assert!((0.0..=1000.0).contains(&orange));
        }
    }

    #[test]
    fn stacked_totals_match_items() {
        let mut rng = StdRng::seed_from_u64(11);
        let period = Period::new(day(2025, 2, 1), day(2025, 2, 28)).expect("period");
        let points = generate_stacked_bars(&mut rng, &fruits(), period);
        assert_eq!(points.len(), 28);
        for point in &points {
            let sum: f64 = point.items.iter().map(|item| item.value).sum();
            assert!((point.total - sum).abs() <= 1e-9);
            assert!(point.items.iter().all(|item| (0.0..=500.0).contains(&item.value)));
        }
    }
}
