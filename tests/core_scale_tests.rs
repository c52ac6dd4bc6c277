use chart_geometry::core::{BandScale, LinearScale, TimeScale, tick_increment, ticks};
use chrono::NaiveDate;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((10.0, 110.0), (0.0, 1000.0));

    let original = 42.5;
    let px = scale.map(original);
    let recovered = scale.invert(px);

    assert!((px - 325.0).abs() <= 1e-9);
    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn degenerate_domain_maps_to_range_start() {
    let scale = LinearScale::new((5.0, 5.0), (10.0, 20.0));
    assert!(scale.is_degenerate());
    assert_eq!(scale.map(5.0), 10.0);
    assert_eq!(scale.map(123.0), 10.0);
    assert_eq!(scale.nice().domain(), (5.0, 5.0));
}

#[test]
fn nice_rounds_outward_and_keeps_orientation() {
    let scale = LinearScale::new((0.0, 97.3), (0.0, 100.0)).nice();
    assert_eq!(scale.domain(), (0.0, 100.0));

    let inverted = LinearScale::new((97.3, 0.0), (0.0, 216.0)).nice();
    assert_eq!(inverted.domain(), (100.0, 0.0));
    assert_eq!(inverted.map(100.0), 0.0);
    assert!((inverted.map(0.0) - 216.0).abs() <= 1e-9);

    let fractional = LinearScale::new((1.3, 8.7), (0.0, 1.0)).nice();
    assert_eq!(fractional.domain(), (1.0, 9.0));
}

#[test]
fn ticks_follow_one_two_five_steps() {
    assert_eq!(
        ticks(0.0, 100.0, 5).as_slice(),
        &[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
    );
    assert_eq!(
        ticks(0.0, 1.0, 5).as_slice(),
        &[0.0, 0.2, 0.4, 0.6, 0.8, 1.0]
    );
    assert_eq!(
        ticks(10.0, 0.0, 5).as_slice(),
        &[10.0, 8.0, 6.0, 4.0, 2.0, 0.0]
    );
    assert_eq!(ticks(3.0, 3.0, 5).as_slice(), &[3.0]);
    assert!(ticks(0.0, 1.0, 0).is_empty());
}

#[test]
fn tick_increment_encodes_sub_unit_steps_as_negative_inverse() {
    assert_eq!(tick_increment(0.0, 100.0, 5), 20.0);
    assert_eq!(tick_increment(0.0, 1.0, 5), -5.0);
    assert_eq!(tick_increment(0.0, 0.0, 5), 0.0);
}

#[test]
fn band_scale_orders_slots_by_key_order() {
    let scale = BandScale::new(["b", "a", "c"], (0.0, 300.0));
    assert_eq!(scale.position("b"), Some(0.0));
    assert_eq!(scale.position("a"), Some(100.0));
    assert_eq!(scale.position("c"), Some(200.0));
    assert_eq!(scale.domain().copied().collect::<Vec<_>>(), vec!["b", "a", "c"]);
}

#[test]
fn band_scale_unknown_key_falls_back_to_zero() {
    let scale = BandScale::new(["a"], (50.0, 150.0)).padding(0.3);
    assert_eq!(scale.position("missing"), None);
    assert_eq!(scale.position_or_default("missing"), 0.0);
}

#[test]
fn time_scale_maps_midnights_linearly() {
    let scale = TimeScale::from_dates(day(2025, 1, 1), day(2025, 1, 11), (40.0, 920.0));
    assert!((scale.map_date(day(2025, 1, 1)) - 40.0).abs() <= 1e-9);
    assert!((scale.map_date(day(2025, 1, 6)) - 480.0).abs() <= 1e-9);
    assert!((scale.map_date(day(2025, 1, 11)) - 920.0).abs() <= 1e-9);

    let back = scale.invert(480.0).expect("in calendar");
    assert_eq!(back.date(), day(2025, 1, 6));
}
