//! Integration tests for measurement parsing.

use metron::measurable::{
    ismeasurable, measure, parse, parse_distributed, Input, Measurable, ParsingError,
};
use metron::Error;

// ---------------------------------------------------------------------------
// The parse table
// ---------------------------------------------------------------------------

#[test]
fn bare_numbers_are_unitless() {
    let parsed = parse(&Input::from(1.1)).unwrap();
    assert_eq!(parsed.values, vec![1.1]);
    assert_eq!(parsed.unit, "1");

    let parsed = parse(&Input::from(2)).unwrap();
    assert_eq!(parsed.values, vec![2.0]);
    assert_eq!(parsed.unit, "1");
}

#[test]
fn a_trailing_text_item_names_the_unit() {
    let parsed = parse(&Input::from((1.1, "m"))).unwrap();
    assert_eq!(parsed.values, vec![1.1]);
    assert_eq!(parsed.unit, "m");

    let parsed = parse(&Input::from((1.1, 2.3, "m"))).unwrap();
    assert_eq!(parsed.values, vec![1.1, 2.3]);
    assert_eq!(parsed.unit, "m");
}

#[test]
fn all_numbers_stay_unitless() {
    let parsed = parse(&Input::from(vec![1.1, 2.3])).unwrap();
    assert_eq!(parsed.values, vec![1.1, 2.3]);
    assert_eq!(parsed.unit, "1");
}

#[test]
fn all_text_input_parses_numerically() {
    let input = Input::items([Input::from("1.1"), Input::from("2.3"), Input::from("m")]);
    let parsed = parse(&input).unwrap();
    assert_eq!(parsed.values, vec![1.1, 2.3]);
    assert_eq!(parsed.unit, "m");
}

#[test]
fn lone_text_is_unparsable() {
    assert!(matches!(
        parse(&Input::from("1.1 m")),
        Err(ParsingError::Unparsable(_))
    ));
}

#[test]
fn nested_measurables_agree_on_a_unit() {
    let input = Input::items([Input::from((1.1, "m")), Input::from((2.3, "m"))]);
    let parsed = parse(&input).unwrap();
    assert_eq!(parsed.values, vec![1.1, 2.3]);
    assert_eq!(parsed.unit, "m");
}

#[test]
fn nested_disagreement_mixes_units() {
    let input = Input::items([Input::from((1.1, "m")), Input::from((2.3, "km"))]);
    assert!(matches!(
        parse(&input),
        Err(ParsingError::MixedUnits(_, _))
    ));
}

#[test]
fn a_single_nested_item_unwraps() {
    let input = Input::items([Input::from((1.1, "m"))]);
    let parsed = parse(&input).unwrap();
    assert_eq!(parsed.values, vec![1.1]);
    assert_eq!(parsed.unit, "m");
}

#[test]
fn distributed_form_pairs_every_value_with_the_unit() {
    let input = Input::from((1.1, 2.3, "m"));
    let pairs = parse_distributed(&input).unwrap();
    assert_eq!(
        pairs,
        vec![(1.1, "m".to_string()), (2.3, "m".to_string())]
    );
}

#[test]
fn measurability_probe() {
    assert!(ismeasurable(&Input::from(1.1)));
    assert!(ismeasurable(&Input::from((1.1, "m"))));
    assert!(!ismeasurable(&Input::from("words")));
}

// ---------------------------------------------------------------------------
// measure: parsed input becomes a Measurement
// ---------------------------------------------------------------------------

#[test]
fn measure_builds_a_measurement() {
    let measurement = measure(&Input::from((1.1, 2.3, "m"))).unwrap();
    assert_eq!(measurement.data(), &[1.1, 2.3]);
    assert_eq!(*measurement.unit(), "m");
}

#[test]
fn measure_rejects_empty_input() {
    let result = measure(&Input::items([]));
    assert!(matches!(result, Err(Error::Empty)));
}

#[test]
fn measure_rejects_unknown_units() {
    assert!(measure(&Input::from((1.0, "snorkel"))).is_err());
}

// ---------------------------------------------------------------------------
// Measurable implementations
// ---------------------------------------------------------------------------

#[test]
fn plain_numbers_measure_unitless() {
    let measurement = 2.5f64.measure().unwrap();
    assert_eq!(measurement.data(), &[2.5]);
    assert!(measurement.unit().is_one());
}

#[test]
fn slices_and_vectors_measure_unitless() {
    assert_eq!([1.0, 2.0].measure().unwrap().data(), &[1.0, 2.0]);
    assert_eq!(vec![3.0, 4.0].measure().unwrap().data(), &[3.0, 4.0]);
}

#[test]
fn value_unit_pairs_measure() {
    let measurement = (3.5, "km").measure().unwrap();
    assert_eq!(measurement.data(), &[3.5]);
    assert_eq!(*measurement.unit(), "km");
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn inputs_display_like_their_structure() {
    let input = Input::items([Input::from(1.1), Input::from("m")]);
    assert_eq!(input.to_string(), "[1.1, 'm']");
}
