#![allow(clippy::float_cmp)]

use std::f64::consts::PI;
use std::rc::Rc;

use super::*;

fn range(min: f64, max: f64) -> KnobConfig {
    KnobConfig {
        value_min: min,
        value_max: max,
        ..KnobConfig::default()
    }
}

// =============================================================
// Converters
// =============================================================

#[test]
fn parse_int_prefix_reads_plain_integers() {
    assert_eq!(parse_int_prefix("42"), Some(42.0));
    assert_eq!(parse_int_prefix("-7"), Some(-7.0));
    assert_eq!(parse_int_prefix("+3"), Some(3.0));
    assert_eq!(parse_int_prefix("  12"), Some(12.0));
}

#[test]
fn parse_int_prefix_stops_at_first_non_digit() {
    assert_eq!(parse_int_prefix("3.7"), Some(3.0));
    assert_eq!(parse_int_prefix("12abc"), Some(12.0));
    assert_eq!(parse_int_prefix("99 "), Some(99.0));
}

#[test]
fn parse_int_prefix_rejects_text_without_digits() {
    assert_eq!(parse_int_prefix(""), None);
    assert_eq!(parse_int_prefix("abc"), None);
    assert_eq!(parse_int_prefix("-"), None);
    assert_eq!(parse_int_prefix(".5"), None);
}

#[test]
fn default_converters_round_trip_every_integer_in_range() {
    let config = range(-50.0, 50.0);
    for v in -50..=50 {
        let text = config.format_value(v);
        assert_eq!(config.parse_value(&text), Some(v as f64), "value {v}");
    }
}

#[test]
fn parse_value_rejects_non_finite_results() {
    let config = KnobConfig {
        converters: Converters {
            string_to_value: Rc::new(|_| Some(f64::INFINITY)),
            ..Converters::default()
        },
        ..KnobConfig::default()
    };
    assert_eq!(config.parse_value("1"), None);
}

#[test]
fn converters_compare_by_identity() {
    let a = Converters::default();
    let b = a.clone();
    assert_eq!(a, b);
    assert_ne!(a, Converters::default());
}

// =============================================================
// KnobConfig
// =============================================================

#[test]
fn config_defaults_match_stock_knob() {
    let c = KnobConfig::default();
    assert_eq!(c.width, 300.0);
    assert_eq!(c.height, 300.0);
    assert_eq!(c.angle_start, -0.75 * PI);
    assert_eq!(c.angle_end, 0.75 * PI);
    assert_eq!(c.angle_offset, -0.5 * PI);
    assert_eq!(c.track_width, 0.4);
    assert_eq!(c.value_min, 0.0);
    assert_eq!(c.value_max, 100.0);
    assert!(c.label.is_none());
    assert!(!c.needle);
    assert!(!c.read_only);
}

#[test]
fn from_json_fills_missing_fields_with_defaults() {
    let c = KnobConfig::from_json(r#"{"valueMax": 10, "label": "Gain", "readOnly": true}"#)
        .expect("valid json");
    assert_eq!(c.value_max, 10.0);
    assert_eq!(c.value_min, 0.0);
    assert_eq!(c.label.as_deref(), Some("Gain"));
    assert!(c.read_only);
    assert_eq!(c.color_fg, "#ff8800");
}

#[test]
fn from_json_keeps_degenerate_ranges() {
    let c = KnobConfig::from_json(r#"{"valueMin": 5, "valueMax": 5}"#).expect("valid json");
    assert_eq!(c.value_min, 5.0);
    assert_eq!(c.value_max, 5.0);
}

#[test]
fn from_json_reports_malformed_input() {
    let err = KnobConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("invalid knob config"));
}

#[test]
fn clamp_does_not_panic_on_inverted_range() {
    let c = range(10.0, 0.0);
    assert_eq!(c.clamp(5.0), 10.0);
}

#[test]
fn quantize_rounds_halves_up() {
    let c = range(-10.0, 10.0);
    assert_eq!(c.quantize(2.5), 3);
    assert_eq!(c.quantize(2.49), 2);
    assert_eq!(c.quantize(-2.5), -2);
    assert_eq!(c.quantize(-2.51), -3);
}

// =============================================================
// InitialValue
// =============================================================

#[test]
fn initial_value_parses_text_through_config() {
    let c = range(0.0, 100.0);
    assert_eq!(InitialValue::from("37").resolve(&c), 37.0);
    assert_eq!(InitialValue::from(12.0).resolve(&c), 12.0);
    assert_eq!(InitialValue::default().resolve(&c), 0.0);
}

#[test]
fn initial_value_falls_back_to_minimum() {
    let c = range(20.0, 100.0);
    assert_eq!(InitialValue::from("abc").resolve(&c), 20.0);
    assert_eq!(InitialValue::from(f64::NAN).resolve(&c), 20.0);
}

#[test]
fn initial_value_deserializes_untagged() {
    let n: InitialValue = serde_json::from_str("42").expect("number");
    let s: InitialValue = serde_json::from_str(r#""42""#).expect("string");
    assert_eq!(n, InitialValue::Number(42.0));
    assert_eq!(s, InitialValue::Text("42".to_string()));
}

// =============================================================
// ValueModel
// =============================================================

#[test]
fn new_value_counts_as_committed() {
    let m = ValueModel::new(42.4, &range(0.0, 100.0));
    assert_eq!(m.value(), 42);
    assert_eq!(m.committed(), 42);
}

#[test]
fn floating_in_range_is_rounded() {
    let c = range(0.0, 100.0);
    let mut m = ValueModel::new(0.0, &c);
    for raw in [0.0, 0.4, 12.5, 49.9, 73.2, 99.5, 100.0] {
        assert_eq!(m.apply_floating(raw, &c), (raw + 0.5_f64).floor() as i64);
    }
}

#[test]
fn floating_out_of_range_lands_on_nearest_bound() {
    let c = range(-20.0, 80.0);
    let mut m = ValueModel::new(0.0, &c);
    assert_eq!(m.apply_floating(-1000.0, &c), -20);
    assert_eq!(m.apply_floating(80.0001, &c), 80);
    assert_eq!(m.apply_floating(f64::INFINITY, &c), 80);
}

#[test]
fn floating_leaves_committed_alone() {
    let c = range(0.0, 100.0);
    let mut m = ValueModel::new(10.0, &c);
    m.apply_floating(60.0, &c);
    assert_eq!(m.value(), 60);
    assert_eq!(m.committed(), 10);
}

#[test]
fn commit_twice_is_idempotent() {
    let c = range(0.0, 100.0);
    let mut m = ValueModel::new(10.0, &c);
    m.apply_floating(33.0, &c);
    assert_eq!(m.commit(), 33);
    assert_eq!(m.commit(), 33);
    assert_eq!(m.value(), 33);
    assert_eq!(m.committed(), 33);
}

#[test]
fn rollback_restores_value_committed_before_gesture() {
    let c = range(0.0, 100.0);
    let mut m = ValueModel::new(10.0, &c);
    m.apply_floating(40.0, &c);
    m.apply_floating(70.0, &c);
    assert_eq!(m.rollback(), 10);
    assert_eq!(m.value(), 10);
}
