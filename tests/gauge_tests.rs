use chart_geometry::core::{GaugeConfig, GaugeStatus, LabelLocale, compute_gauge};
use chart_geometry::error::ChartError;

#[test]
fn default_gauge_geometry_matches_config() {
    let config = GaugeConfig::default();
    assert_eq!(config.outer_radius(), 120.0);
    assert_eq!(config.inner_radius(), 90.0);

    let plan = compute_gauge(0.425, config).expect("gauge");
    assert_eq!(plan.size, 240.0);
    assert_eq!(plan.label, "42.5");
    assert_eq!(plan.status, GaugeStatus::Bad);
    assert!(plan.background.starts_with("M0,-120A120,120"));
    assert_eq!(plan.background.matches('M').count(), 2);
    assert!(plan.background.ends_with('Z'));
    assert!(plan.foreground.starts_with('M'));
}

#[test]
fn status_threshold_is_inclusive_at_half() {
    let good = compute_gauge(0.5, GaugeConfig::default()).expect("gauge");
    assert_eq!(good.status, GaugeStatus::Good);
    assert_eq!(good.label, "50");

    let bad = compute_gauge(0.4999, GaugeConfig::default()).expect("gauge");
    assert_eq!(bad.status, GaugeStatus::Bad);
    assert_eq!(bad.label, "50");
}

#[test]
fn label_uses_locale_decimal_separator() {
    let config = GaugeConfig::default().with_locale(LabelLocale::EsEs);
    let plan = compute_gauge(0.125, config).expect("gauge");
    assert_eq!(plan.label, "12,5");
}

#[test]
fn full_ratio_draws_whole_ring() {
    let plan = compute_gauge(1.0, GaugeConfig::default()).expect("gauge");
    assert_eq!(plan.foreground, plan.background);
    assert_eq!(plan.status, GaugeStatus::Good);
    assert_eq!(plan.label, "100");
}

#[test]
fn out_of_range_values_are_not_clamped() {
    let over = compute_gauge(1.5, GaugeConfig::default()).expect("gauge");
    assert_eq!(over.label, "150");
    assert_eq!(over.status, GaugeStatus::Good);
    assert_eq!(over.foreground.matches('M').count(), 2);
    assert_eq!(over.foreground.matches('A').count(), 4);

    let negative = compute_gauge(-0.25, GaugeConfig::default()).expect("gauge");
    assert_eq!(negative.label, "-25");
    assert_eq!(negative.status, GaugeStatus::Bad);
    assert!(!negative.foreground.is_empty());
}

#[test]
fn non_finite_value_yields_empty_foreground() {
    let plan = compute_gauge(f64::NAN, GaugeConfig::default()).expect("gauge");
    assert!(plan.foreground.is_empty());
    assert_eq!(plan.status, GaugeStatus::Bad);
}

#[test]
fn invalid_size_is_rejected() {
    let result = compute_gauge(0.5, GaugeConfig::default().with_size(0.0));
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));

    let result = compute_gauge(0.5, GaugeConfig::default().with_size(f64::INFINITY));
    assert!(result.is_err());
}

#[test]
fn gauge_is_idempotent() {
    let first = compute_gauge(0.73, GaugeConfig::default()).expect("gauge");
    let second = compute_gauge(0.73, GaugeConfig::default()).expect("gauge");
    assert_eq!(first, second);
}
