//! Integration tests for units, dimensions, and conversion factors.

use approx::assert_relative_eq;
use metron::metric::{dimension, unit, Dimension, MetricError, System, Unit};

// ---------------------------------------------------------------------------
// Parsing and identity
// ---------------------------------------------------------------------------

#[test]
fn parse_and_display_round_trip() {
    let u = Unit::parse("m / s").unwrap();
    assert_eq!(u.to_string(), "m / s");
    assert_eq!(u, "m s^-1");
}

#[test]
fn the_identity_unit() {
    assert!(Unit::one().is_one());
    assert!(Unit::parse("1").unwrap().is_one());
    assert_eq!(Unit::one().to_string(), "1");
}

#[test]
fn unknown_symbols_are_rejected() {
    assert!(matches!(
        Unit::parse("furlong"),
        Err(MetricError::UnknownUnit(_))
    ));
}

#[test]
fn numeric_factors_are_rejected() {
    assert!(matches!(
        Unit::parse("2 m"),
        Err(MetricError::NumericFactor(_))
    ));
}

#[test]
fn prefixes_resolve() {
    assert_relative_eq!(
        unit("km").unwrap().factor_to(&unit("m").unwrap()).unwrap(),
        1e3
    );
    assert_relative_eq!(
        unit("µm").unwrap().factor_to(&unit("m").unwrap()).unwrap(),
        1e-6
    );
    assert_relative_eq!(
        unit("um").unwrap().factor_to(&unit("m").unwrap()).unwrap(),
        1e-6
    );
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

#[test]
fn units_know_their_dimension() {
    let joule = unit("J").unwrap();
    assert_eq!(joule.dimension(), Dimension::parse("M L^2 T^-2").unwrap());
    assert!(unit("1").unwrap().dimension().is_one());
}

#[test]
fn dimension_rejects_unknown_quantities() {
    assert!(matches!(
        dimension("Q"),
        Err(MetricError::UnknownQuantity(_))
    ));
}

#[test]
fn angular_units_are_recognized() {
    assert!(unit("rad").unwrap().is_angle());
    assert!(unit("deg").unwrap().is_angle());
    assert!(unit("mrad").unwrap().is_angle());
    assert!(!unit("m").unwrap().is_angle());
    assert!(!unit("sr").unwrap().is_angle());
}

// ---------------------------------------------------------------------------
// Conversion factors
// ---------------------------------------------------------------------------

#[test]
fn length_conversions() {
    let m = unit("m").unwrap();
    let km = unit("km").unwrap();
    assert_relative_eq!(m.factor_to(&km).unwrap(), 1e-3);
    assert_relative_eq!(km.factor_to(&m).unwrap(), 1e3);
}

#[test]
fn energy_conversions() {
    let joule = unit("J").unwrap();
    assert_relative_eq!(joule.factor_to(&unit("erg").unwrap()).unwrap(), 1e7);
    assert_relative_eq!(
        unit("eV").unwrap().factor_to(&joule).unwrap(),
        1.602176634e-19
    );
}

#[test]
fn angle_conversions() {
    let factor = unit("deg")
        .unwrap()
        .factor_to(&unit("rad").unwrap())
        .unwrap();
    assert_relative_eq!(factor, std::f64::consts::PI / 180.0);
}

#[test]
fn compound_conversions() {
    let kmh = unit("km / h").unwrap();
    let ms = unit("m / s").unwrap();
    assert_relative_eq!(kmh.factor_to(&ms).unwrap(), 1e3 / 3600.0, epsilon = 1e-12);

    let mks_energy = unit("kg m^2 / s^2").unwrap();
    assert_relative_eq!(
        mks_energy.factor_to(&unit("J").unwrap()).unwrap(),
        1.0,
        epsilon = 1e-12
    );

    let cgs_energy = unit("g cm^2 / s^2").unwrap();
    assert_relative_eq!(
        cgs_energy.factor_to(&unit("erg").unwrap()).unwrap(),
        1.0,
        epsilon = 1e-12
    );
}

#[test]
fn incommensurable_units_refuse_to_convert() {
    let result = unit("m").unwrap().factor_to(&unit("s").unwrap());
    assert!(matches!(result, Err(MetricError::Incommensurable { .. })));
}

// ---------------------------------------------------------------------------
// Algebra
// ---------------------------------------------------------------------------

#[test]
fn units_multiply_and_divide() {
    let m = unit("m").unwrap();
    let s = unit("s").unwrap();
    assert_eq!((&m * &s).to_string(), "m s");
    assert_eq!((&m / &s).to_string(), "m / s");
    assert!((&m / &m).is_one());
}

#[test]
fn powers_and_roots() {
    let m = unit("m").unwrap();
    assert_eq!(m.powi(3), "m^3");
    assert_eq!(unit("m^2").unwrap().sqrt(), "m");
    assert_eq!(m.sqrt().to_string(), "m^1/2");
}

#[test]
fn power_scales_the_conversion_factor() {
    let km2 = unit("km").unwrap().powi(2);
    assert_relative_eq!(km2.factor_to(&unit("m^2").unwrap()).unwrap(), 1e6);
    assert_relative_eq!(
        km2.sqrt().factor_to(&unit("m").unwrap()).unwrap(),
        1e3,
        epsilon = 1e-9
    );
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[test]
fn normalize_to_mks() {
    let erg = unit("erg").unwrap();
    let coherent = erg.normalized(System::Mks).unwrap();
    assert_eq!(coherent, "kg m^2 / s^2");
    assert_relative_eq!(erg.factor_to(&coherent).unwrap(), 1e-7, epsilon = 1e-18);
}

#[test]
fn normalize_to_cgs() {
    let joule = unit("J").unwrap();
    let coherent = joule.normalized(System::Cgs).unwrap();
    assert_eq!(coherent, "g cm^2 / s^2");
    assert_relative_eq!(joule.factor_to(&coherent).unwrap(), 1e7, epsilon = 1e-3);
}

#[test]
fn system_names_parse_case_insensitively() {
    assert_eq!("MKS".parse::<System>().unwrap(), System::Mks);
    assert_eq!("cgs".parse::<System>().unwrap(), System::Cgs);
    assert!("imperial".parse::<System>().is_err());
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn units_serialize_as_text() {
    let u = unit("km / s").unwrap();
    let json = serde_json::to_string(&u).unwrap();
    assert_eq!(json, "\"km / s\"");
    let back: Unit = serde_json::from_str(&json).unwrap();
    assert_eq!(back, u);
}

#[test]
fn bad_unit_text_fails_deserialization() {
    assert!(serde_json::from_str::<Unit>("\"2 m\"").is_err());
}
