use chart_geometry::api::{ChartPlayground, ChartSlot, PlaygroundConfig, PlaygroundData, default_period};
use chart_geometry::core::{LabelLocale, Period};
use chart_geometry::render::NullRenderer;
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn january_playground(seed: u64) -> ChartPlayground {
    let period = Period::new(day(2025, 1, 1), day(2025, 1, 31)).expect("period");
    let mut playground =
        ChartPlayground::new(period, PlaygroundConfig::default()).expect("playground");
    playground.regenerate(&mut StdRng::seed_from_u64(seed));
    playground
}

#[test]
fn regeneration_is_reproducible_for_a_seed() {
    let first = january_playground(42);
    let second = january_playground(42);
    assert_eq!(first.data(), second.data());

    let data = first.data();
    assert_eq!(data.pie.len(), 5);
    assert_eq!(data.bar.len(), 5);
    assert_eq!(data.line.len(), 31);
    assert_eq!(data.stacked_bar.len(), 31);
    assert!((0.0..1.0).contains(&data.gauge));
}

#[test]
fn draw_plans_cover_every_slot_in_order() {
    let playground = january_playground(1);
    let plans = playground.draw_plans().expect("plans");
    let kinds: Vec<&str> = plans.iter().map(|plan| plan.kind()).collect();
    assert_eq!(kinds, vec!["gauge", "pie", "bar", "line", "stacked_bar"]);

    let mut renderer = NullRenderer::default();
    playground.render(&mut renderer).expect("render");
    assert_eq!(renderer.rendered_plans, 5);
    assert_eq!(renderer.last_stats.rects, 31 * 6);
}

#[test]
fn bar_hover_focuses_largest_value_on_top_row() {
    let mut playground = january_playground(3);
    let max = playground
        .data()
        .bar
        .iter()
        .map(|item| item.value)
        .fold(f64::MIN, f64::max);

    let tooltip = playground
        .on_pointer_move(ChartSlot::Bar, 100.0, 40.0)
        .expect("pointer move")
        .expect("tooltip");
    let focused = playground
        .focused_category(ChartSlot::Bar)
        .expect("focused")
        .to_owned();
    assert_eq!(tooltip.rows.len(), 1);
    assert_eq!(tooltip.rows[0].id, focused);

    let focused_value = playground
        .data()
        .bar
        .iter()
        .find(|item| item.id == focused)
        .map(|item| item.value)
        .expect("value");
    assert_eq!(focused_value, max);
    assert_eq!(playground.hover_pointer(ChartSlot::Bar), Some((100.0, 40.0)));
}

#[test]
fn line_hover_reports_day_and_clears_on_leave() {
    let mut playground = january_playground(5);
    let x = 40.0 + 2.0 * 880.0 / 30.0;
    let tooltip = playground
        .on_pointer_move(ChartSlot::Line, x, 100.0)
        .expect("pointer move")
        .expect("tooltip");
    assert_eq!(tooltip.title.as_deref(), Some("2025/01/03"));
    assert_eq!(tooltip.rows.len(), 5);
    assert_eq!(playground.focused_date(ChartSlot::Line), Some(day(2025, 1, 3)));

    playground.on_pointer_leave(ChartSlot::Line);
    assert_eq!(playground.focused_date(ChartSlot::Line), None);
    assert_eq!(playground.hover_pointer(ChartSlot::Line), None);
}

#[test]
fn stacked_hover_and_misses() {
    let mut playground = january_playground(9);
    let tooltip = playground
        .on_pointer_move(ChartSlot::StackedBar, 45.0, 100.0)
        .expect("pointer move")
        .expect("tooltip");
    assert_eq!(tooltip.title.as_deref(), Some("2025/01/01"));
    assert_eq!(
        playground.focused_date(ChartSlot::StackedBar),
        Some(day(2025, 1, 1))
    );

    let miss = playground
        .on_pointer_move(ChartSlot::StackedBar, 45.0, 500.0)
        .expect("pointer move");
    assert_eq!(miss, None);
    assert_eq!(playground.focused_date(ChartSlot::StackedBar), None);

    assert_eq!(
        playground
            .on_pointer_move(ChartSlot::Gauge, 10.0, 10.0)
            .expect("pointer move"),
        None
    );
}

#[test]
fn replacing_data_resets_hover() {
    let mut playground = january_playground(13);
    playground
        .on_pointer_move(ChartSlot::Line, 100.0, 100.0)
        .expect("pointer move");
    assert!(playground.focused_date(ChartSlot::Line).is_some());

    playground.set_data(PlaygroundData::default());
    assert_eq!(playground.focused_date(ChartSlot::Line), None);
    let plans = playground.draw_plans().expect("plans");
    assert_eq!(plans.len(), 5);
}

#[test]
fn locale_and_categories_are_configurable() {
    let period = default_period(day(2025, 3, 10)).expect("period");
    assert_eq!(period.start, day(2025, 2, 1));
    assert_eq!(period.end, day(2025, 2, 28));

    let config = PlaygroundConfig::default().with_locale(LabelLocale::EsEs);
    assert_eq!(config.line.locale, LabelLocale::EsEs);
    let playground = ChartPlayground::new(period, config).expect("playground");
    assert_eq!(playground.categories().len(), 5);
    assert!(playground.with_categories(Vec::new()).is_err());
}

#[test]
fn inverted_period_literal_is_rejected() {
    let period = Period {
        start: day(2025, 1, 31),
        end: day(2025, 1, 1),
    };
    assert!(ChartPlayground::new(period, PlaygroundConfig::default()).is_err());
}
