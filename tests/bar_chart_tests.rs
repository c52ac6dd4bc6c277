use chart_geometry::core::{
    BarChartConfig, CategoryValue, Margins, Viewport, compute_bar_chart,
};

fn scenario_config() -> BarChartConfig {
    BarChartConfig::default()
        .with_viewport(Viewport::new(640, 240))
        .with_margins(Margins::new(16.0, 0.0, 0.0, 64.0))
}

fn scenario_data() -> Vec<CategoryValue> {
    vec![
        CategoryValue::new("b", "Beta", 50.0),
        CategoryValue::new("a", "Alpha", 100.0),
    ]
}

#[test]
fn bar_widths_follow_niced_value_scale() {
    let plan = compute_bar_chart(&scenario_data(), scenario_config()).expect("bar chart");
    assert_eq!(plan.value_scale.domain(), (0.0, 100.0));

    let ids: Vec<&str> = plan.bars.iter().map(|bar| bar.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);

    let beta = &plan.bars[0];
    let alpha = &plan.bars[1];
    assert!((alpha.rect.x - 64.0).abs() <= 1e-9);
    assert!((beta.rect.x - 64.0).abs() <= 1e-9);
    assert!((alpha.rect.width - 576.0).abs() <= 1e-9);
    assert!((beta.rect.width - 288.0).abs() <= 1e-9);
}

#[test]
fn largest_value_occupies_the_top_row() {
    let plan = compute_bar_chart(&scenario_data(), scenario_config()).expect("bar chart");
    let alpha = plan.bars.iter().find(|bar| bar.id == "a").expect("alpha");
    let beta = plan.bars.iter().find(|bar| bar.id == "b").expect("beta");
    assert!(alpha.rect.y < beta.rect.y);
    assert!((alpha.rect.height - beta.rect.height).abs() <= 1e-9);

    let labels: Vec<&str> = plan.y_ticks.iter().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels, vec!["Alpha", "Beta"]);
    let centre = alpha.rect.y + alpha.rect.height / 2.0;
    assert!((plan.y_ticks[0].position - centre).abs() <= 1e-9);
}

#[test]
fn value_ticks_span_niced_domain() {
    let plan = compute_bar_chart(&scenario_data(), scenario_config()).expect("bar chart");
    let labels: Vec<&str> = plan.x_ticks.iter().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels, vec!["0", "20", "40", "60", "80", "100"]);
    assert!((plan.x_ticks[0].position - 64.0).abs() <= 1e-9);
    assert!((plan.x_ticks[5].position - 640.0).abs() <= 1e-9);
}

#[test]
fn locate_matches_full_row_including_padding() {
    let plan = compute_bar_chart(&scenario_data(), scenario_config()).expect("bar chart");

    // Rows step by 224 / 2.3 px; the alpha row starts half a gap above its bar.
    assert_eq!(plan.locate(100.0, 50.0), Some("a"));
    assert_eq!(plan.locate(600.0, 35.0), Some("a"));
    assert_eq!(plan.locate(100.0, 200.0), Some("b"));
    assert_eq!(plan.locate(100.0, 5.0), None);
    assert_eq!(plan.locate(30.0, 50.0), None);
    assert_eq!(plan.locate(100.0, 235.0), None);
}

#[test]
fn tooltip_shows_single_label_value_row() {
    let plan = compute_bar_chart(&scenario_data(), scenario_config()).expect("bar chart");
    let tooltip = plan.tooltip("a").expect("tooltip");
    assert_eq!(tooltip.title, None);
    assert_eq!(tooltip.rows.len(), 1);
    assert_eq!(tooltip.rows[0].text, "Alpha: 100");
    assert!(plan.tooltip("missing").is_none());
}

#[test]
fn empty_dataset_yields_no_bars() {
    let plan = compute_bar_chart(&[], BarChartConfig::default()).expect("bar chart");
    assert!(plan.bars.is_empty());
    assert!(plan.pointers.is_empty());
    assert_eq!(plan.locate(100.0, 100.0), None);
}

#[test]
fn invalid_configuration_is_rejected() {
    let data = scenario_data();
    assert!(compute_bar_chart(&data, scenario_config().with_band_padding(1.0)).is_err());
    assert!(compute_bar_chart(&data, scenario_config().with_band_padding(f64::NAN)).is_err());
    assert!(
        compute_bar_chart(
            &data,
            scenario_config().with_margins(Margins::new(0.0, 320.0, 0.0, 320.0))
        )
        .is_err()
    );
    assert!(
        compute_bar_chart(&data, scenario_config().with_viewport(Viewport::new(0, 240))).is_err()
    );
}

#[test]
fn bar_chart_is_idempotent() {
    let first = compute_bar_chart(&scenario_data(), scenario_config()).expect("bar chart");
    let second = compute_bar_chart(&scenario_data(), scenario_config()).expect("bar chart");
    assert_eq!(first, second);
}
