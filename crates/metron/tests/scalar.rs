//! Integration tests for single measured values.

use metron::error::Error;
use metron::measurable::Measurable;
use metron::measured::Value;
use metron::scalar::Scalar;

use approx::assert_relative_eq;

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn construction_parses_the_unit() {
    let speed = Scalar::new(1.5, "m / s");
    assert_relative_eq!(speed.data(), 1.5);
    assert_eq!(*speed.unit(), "m / s");
    assert!(!speed.is_unitless());
    assert!(Scalar::unitless(2.0).is_unitless());
    assert!(Scalar::try_new(1.0, "furlong").is_err());
}

#[test]
#[should_panic]
fn construction_panics_on_a_bad_unit() {
    let _ = Scalar::new(1.0, "furlong");
}

#[test]
fn single_element_input_collapses_to_a_scalar() {
    let plain = Scalar::from_measured(&2.5f64).unwrap();
    assert!(plain.is_unitless());
    assert_relative_eq!(plain.data(), 2.5);

    let paired = Scalar::from_measured(&(3.5, "km")).unwrap();
    assert_eq!(*paired.unit(), "km");

    assert!(matches!(
        Scalar::from_measured(&[1.0, 2.0]),
        Err(Error::NotSingular { size: 2 })
    ));
}

#[test]
fn conversion_from_a_measured_value() {
    let value = Value::new(4.0, "J");
    let scalar = Scalar::from(&value);
    assert_relative_eq!(scalar.data(), 4.0);
    assert_eq!(*scalar.unit(), "J");
}

// ---------------------------------------------------------------------------
// Unit conversion and rounding
// ---------------------------------------------------------------------------

#[test]
fn rescaling_to_a_commensurable_unit() {
    let length = Scalar::new(1500.0, "m");
    let converted = length.withunit("km").unwrap();
    assert_relative_eq!(converted.data(), 1.5, epsilon = 1e-12);
    assert_eq!(*converted.unit(), "km");
    assert!(length.withunit("s").is_err());
}

#[test]
fn rounding_keeps_the_unit() {
    let value = Scalar::new(-1.6, "m");
    assert_relative_eq!(value.abs().data(), 1.6);
    assert_relative_eq!(value.floor().data(), -2.0);
    assert_relative_eq!(value.ceil().data(), -1.0);
    assert_relative_eq!(value.round().data(), -2.0);
    assert_relative_eq!(value.trunc().data(), -1.0);
    assert_eq!(*value.round().unit(), "m");
    assert_eq!(value.to_i64(), -1);
}

// ---------------------------------------------------------------------------
// Additive arithmetic
// ---------------------------------------------------------------------------

#[test]
fn addition_requires_identical_units() {
    let a = Scalar::new(1.0, "m");
    let b = Scalar::new(2.5, "m");
    assert_relative_eq!(a.try_add(&b).unwrap().data(), 3.5);
    assert_relative_eq!((&b - &a).data(), 1.5);

    let km = Scalar::new(1.0, "km");
    assert!(matches!(
        a.try_add(&km),
        Err(Error::UnitMismatch { .. })
    ));
}

#[test]
fn plain_numbers_act_as_unitless_values() {
    let bare = Scalar::unitless(1.0);
    assert_relative_eq!(bare.try_add(&2.0).unwrap().data(), 3.0);

    // A unitful scalar cannot absorb a bare number additively.
    assert!(Scalar::new(1.0, "m").try_add(&2.0).is_err());
}

#[test]
#[should_panic]
fn the_addition_operator_panics_across_units() {
    let _ = &Scalar::new(1.0, "m") + &Scalar::new(1.0, "s");
}

// ---------------------------------------------------------------------------
// Multiplicative arithmetic
// ---------------------------------------------------------------------------

#[test]
fn multiplication_combines_units() {
    let force = Scalar::new(2.0, "kg m / s^2");
    let distance = Scalar::new(3.0, "m");
    let work = &force * &distance;
    assert_relative_eq!(work.data(), 6.0);
    assert_eq!(*work.unit(), "kg m^2 / s^2");

    let speed = &distance / &Scalar::new(2.0, "s");
    assert_relative_eq!(speed.data(), 1.5);
    assert_eq!(*speed.unit(), "m / s");
}

#[test]
fn bare_numbers_scale_without_touching_the_unit() {
    let length = Scalar::new(2.0, "m");
    assert_relative_eq!((&length * 3.0).data(), 6.0);
    assert_relative_eq!((3.0 * &length).data(), 6.0);
    assert_relative_eq!((&length / 2.0).data(), 1.0);
    assert_eq!(*(&length * 3.0).unit(), "m");

    let inverted = 6.0 / &length;
    assert_relative_eq!(inverted.data(), 3.0);
    assert_eq!(*inverted.unit(), "1 / m");
}

#[test]
fn floor_division_takes_the_quotient_unit() {
    let distance = Scalar::new(7.0, "m");
    let step = Scalar::new(2.0, "s");
    let quotient = distance.try_floordiv(&step).unwrap();
    assert_relative_eq!(quotient.data(), 3.0);
    assert_eq!(*quotient.unit(), "m / s");
}

#[test]
fn remainder_is_the_floored_modulo() {
    let a = Scalar::unitless(-7.0);
    let b = Scalar::unitless(3.0);
    assert_relative_eq!((&a % &b).data(), 2.0);
    assert_relative_eq!((&Scalar::unitless(7.0) % &Scalar::unitless(-3.0)).data(), -2.0);
    assert_relative_eq!((&Scalar::new(7.5, "m") % 2.0).data(), 1.5);
}

#[test]
fn negation_keeps_the_unit() {
    let value = -&Scalar::new(1.5, "m");
    assert_relative_eq!(value.data(), -1.5);
    assert_eq!(*value.unit(), "m");
}

// ---------------------------------------------------------------------------
// Powers and roots
// ---------------------------------------------------------------------------

#[test]
fn integral_powers_raise_the_unit() {
    let length = Scalar::new(2.0, "m");
    let volume = length.powi(3);
    assert_relative_eq!(volume.data(), 8.0);
    assert_eq!(*volume.unit(), "m^3");

    let inverse = length.powi(-1);
    assert_relative_eq!(inverse.data(), 0.5);
    assert_eq!(*inverse.unit(), "1 / m");
}

#[test]
fn fractional_powers_scale_the_exponents() {
    let area = Scalar::new(9.0, "m^2");
    let side = area.try_powf(0.5).unwrap();
    assert_relative_eq!(side.data(), 3.0);
    assert_eq!(*side.unit(), "m");

    assert_eq!(*area.sqrt().unit(), "m");
    assert_eq!(*Scalar::new(4.0, "m").sqrt().unit(), "m^1/2");
}

#[test]
fn measured_exponents_must_be_unitless() {
    let base = Scalar::new(2.0, "m");
    let squared = base.try_pow(&Scalar::unitless(2.0)).unwrap();
    assert_relative_eq!(squared.data(), 4.0);
    assert_eq!(*squared.unit(), "m^2");

    assert!(matches!(
        base.try_pow(&Scalar::new(2.0, "s")),
        Err(Error::NotUnitless { .. })
    ));
}

// ---------------------------------------------------------------------------
// Transcendental functions
// ---------------------------------------------------------------------------

#[test]
fn trigonometry_requires_an_angular_operand() {
    let angle = Scalar::new(std::f64::consts::FRAC_PI_2, "rad");
    assert_relative_eq!(angle.sin().unwrap().data(), 1.0);
    assert!(angle.cos().unwrap().is_unitless());

    assert!(matches!(
        Scalar::new(1.0, "m").sin(),
        Err(Error::NotAngular { .. })
    ));
}

#[test]
fn trigonometry_takes_the_stored_data_as_is() {
    // Degrees pass the angularity check but are not rescaled.
    let angle = Scalar::new(180.0, "deg");
    assert_relative_eq!(angle.sin().unwrap().data(), (180.0f64).sin());
}

#[test]
fn logarithms_require_a_unitless_operand() {
    let value = Scalar::unitless(std::f64::consts::E);
    assert_relative_eq!(value.ln().unwrap().data(), 1.0);
    assert_relative_eq!(Scalar::unitless(100.0).log10().unwrap().data(), 2.0);
    assert_relative_eq!(Scalar::unitless(8.0).log2().unwrap().data(), 3.0);
    assert_relative_eq!(Scalar::unitless(0.0).ln_1p().unwrap().data(), 0.0);

    assert!(matches!(
        Scalar::new(1.0, "m").ln(),
        Err(Error::NotUnitless { .. })
    ));
}

// ---------------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------------

#[test]
fn reductions_of_a_single_value_are_identities() {
    let value = Scalar::new(1.5, "m");
    assert_eq!(value.mean(), value);
    assert_eq!(value.sum(), value);

    let summed = value.cumsum();
    assert_eq!(summed.len(), 1);
    assert_relative_eq!(summed.data()[0], 1.5);
    assert_eq!(*summed.unit(), "m");
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[test]
fn ordering_only_exists_within_a_unit() {
    let small = Scalar::new(1.0, "m");
    let large = Scalar::new(2.0, "m");
    assert!(small < large);
    assert!(large >= small);

    // Even commensurable units do not compare.
    let kilometers = Scalar::new(1.0, "km");
    assert_eq!(small.partial_cmp(&kilometers), None);
}

// ---------------------------------------------------------------------------
// Measuring and serialization
// ---------------------------------------------------------------------------

#[test]
fn a_scalar_measures_as_a_single_element() {
    let measurement = Scalar::new(1.5, "m").measure().unwrap();
    assert_eq!(measurement.len(), 1);
    assert_eq!(*measurement.unit(), "m");
}

#[test]
fn serialization_round_trips() {
    let speed = Scalar::new(1.5, "km / s");
    let encoded = serde_json::to_string(&speed).unwrap();
    assert_eq!(encoded, r#"{"data":1.5,"unit":"km / s"}"#);
    let decoded: Scalar = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, speed);
}

#[test]
fn display_shows_the_value_and_unit() {
    assert_eq!(Scalar::new(1.5, "m").to_string(), "1.5 [m]");
    assert_eq!(Scalar::unitless(2.0).to_string(), "2 [1]");
}
