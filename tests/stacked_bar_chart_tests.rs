use chart_geometry::core::{
    CategoryValue, Period, StackedBarChartConfig, StackedBarChartPlan, StackedBarPoint,
    compute_stacked_bar_chart,
};
use chrono::NaiveDate;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn two_day_plan() -> StackedBarChartPlan {
    let data = vec![
        StackedBarPoint::from_items(
            day(2025, 1, 1),
            vec![
                CategoryValue::new("fruit", "Fruit", 3.0),
                CategoryValue::new("veg", "Veg", 2.0),
            ],
        ),
        StackedBarPoint::from_items(day(2025, 1, 2), vec![CategoryValue::new("veg", "Veg", 1.0)]),
    ];
    let period = Period::new(day(2025, 1, 1), day(2025, 1, 2)).expect("period");
    compute_stacked_bar_chart(&data, period, StackedBarChartConfig::default())
        .expect("stacked bar chart")
}

#[test]
fn last_discovered_category_sits_at_the_bottom() {
    let plan = two_day_plan();
    let universe: Vec<&str> = plan.categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(universe, vec!["fruit", "veg"]);
    assert_eq!(plan.stack_order, vec!["veg".to_owned(), "fruit".to_owned()]);

    let first = plan.column(day(2025, 1, 1)).expect("column");
    let ids: Vec<&str> = first.cells.iter().map(|cell| cell.id.as_str()).collect();
    assert_eq!(ids, vec!["veg", "fruit"]);

    let veg = &first.cells[0];
    let fruit = &first.cells[1];
    assert!((veg.rect.bottom() - 216.0).abs() <= 1e-9);
    assert!((veg.rect.y - 129.6).abs() <= 1e-9);
    assert!((fruit.rect.bottom() - veg.rect.y).abs() <= 1e-9);
    assert!(fruit.rect.y.abs() <= 1e-9);
}

#[test]
fn columns_occupy_padded_band_slots() {
    let plan = two_day_plan();
    let first = plan.column(day(2025, 1, 1)).expect("column");
    let second = plan.column(day(2025, 1, 2)).expect("column");

    assert!((first.cells[0].rect.x - 150.0).abs() <= 1e-9);
    assert!((first.cells[0].rect.width - 220.0).abs() <= 1e-9);
    assert!((second.cells[0].rect.x - 590.0).abs() <= 1e-9);

    assert!((first.pointer.x - 40.0).abs() <= 1e-9);
    assert!((first.pointer.width - 440.0).abs() <= 1e-9);
    assert_eq!(first.pointer.height, 216.0);
}

#[test]
fn stack_top_matches_total() {
    let plan = two_day_plan();
    let y = plan.value_scale;
    assert_eq!(y.domain(), (5.0, 0.0));
    for column in &plan.columns {
        let top = column.cells.last().expect("cells").rect.y;
        assert!((top - y.map(column.total)).abs() <= 1e-9);
    }
}

#[test]
fn missing_category_contributes_zero_height() {
    let plan = two_day_plan();
    let second = plan.column(day(2025, 1, 2)).expect("column");
    let fruit = second.cells.iter().find(|cell| cell.id == "fruit").expect("fruit");
    assert_eq!(fruit.value, 0.0);
    assert!(fruit.rect.height.abs() <= 1e-9);
    assert!((fruit.rect.y - plan.value_scale.map(1.0)).abs() <= 1e-9);
}

#[test]
fn locate_resolves_day_slot_within_plot_height() {
    let plan = two_day_plan();
    assert_eq!(plan.locate(100.0, 100.0), Some(day(2025, 1, 1)));
    assert_eq!(plan.locate(479.0, 10.0), Some(day(2025, 1, 1)));
    assert_eq!(plan.locate(500.0, 100.0), Some(day(2025, 1, 2)));
    assert_eq!(plan.locate(500.0, 230.0), None);
    assert_eq!(plan.locate(20.0, 100.0), None);
}

#[test]
fn tooltip_lists_items_in_input_order() {
    let plan = two_day_plan();
    let tooltip = plan.tooltip(day(2025, 1, 1)).expect("tooltip");
    assert_eq!(tooltip.title.as_deref(), Some("2025/01/01"));
    let rows: Vec<&str> = tooltip.rows.iter().map(|row| row.text.as_str()).collect();
    assert_eq!(rows, vec!["Fruit: 3", "Veg: 2"]);
    assert!(plan.tooltip(day(2025, 1, 5)).is_none());
}

#[test]
fn time_ticks_are_centred_on_slots() {
    let plan = two_day_plan();
    assert_eq!(plan.x_ticks[0].label, "2025/01/01");
    assert!((plan.x_ticks[0].position - 260.0).abs() <= 1e-9);
    assert_eq!(plan.x_ticks[1].label, "01/02");
}

#[test]
fn invalid_padding_is_rejected() {
    let period = Period::new(day(2025, 1, 1), day(2025, 1, 2)).expect("period");
    let mut config = StackedBarChartConfig::default();
    config.padding_inner = 1.0;
    assert!(compute_stacked_bar_chart(&[], period, config).is_err());

    let mut config = StackedBarChartConfig::default();
    config.padding_outer = -0.1;
    assert!(compute_stacked_bar_chart(&[], period, config).is_err());
}

#[test]
fn inverted_period_literal_is_rejected() {
    let period = Period {
        start: day(2025, 1, 31),
        end: day(2025, 1, 1),
    };
    assert!(compute_stacked_bar_chart(&[], period, StackedBarChartConfig::default()).is_err());
}

#[test]
fn all_zero_columns_are_flat_and_finite() {
    let data: Vec<StackedBarPoint> = [day(2025, 1, 1), day(2025, 1, 2)]
        .into_iter()
        .map(|date| {
            StackedBarPoint::from_items(
                date,
                vec![
                    CategoryValue::new("fruit", "Fruit", 0.0),
                    CategoryValue::new("veg", "Veg", 0.0),
                ],
            )
        })
        .collect();
    let period = Period::new(day(2025, 1, 1), day(2025, 1, 2)).expect("period");
    let plan = compute_stacked_bar_chart(&data, period, StackedBarChartConfig::default())
        .expect("stacked bar chart");

    assert_eq!(plan.value_scale.domain(), (0.0, 0.0));
    for column in &plan.columns {
        assert!(column.pointer.is_finite());
        for cell in &column.cells {
            assert!(cell.rect.is_finite());
            assert_eq!(cell.rect.height, 0.0);
            assert_eq!(cell.rect.y, 0.0);
        }
    }
}
