//! Integration tests for symbolic expressions and terms.

use metron::symbolic::{
    equivalent, expression, is_compound, power, product, ratio, term, Exponent, Expression,
    SymbolicError, Term,
};

// ---------------------------------------------------------------------------
// Terms
// ---------------------------------------------------------------------------

#[test]
fn term_from_symbol() {
    let t = Term::new("m");
    assert_eq!(t.base(), "m");
    assert_eq!(t.exponent(), Exponent::from_integer(1));
    assert_eq!(t.coefficient(), 1.0);
}

#[test]
fn term_parses_coefficient_and_exponent() {
    let t = term("3a^-1/2").unwrap();
    assert_eq!(t.base(), "a");
    assert_eq!(t.exponent(), Exponent::new(-1, 2));
    assert_eq!(t.coefficient(), 3.0);
}

#[test]
fn term_display_hides_trivial_parts() {
    assert_eq!(Term::new("m").to_string(), "m");
    assert_eq!(
        Term::with_exponent("s", Exponent::from_integer(-2)).to_string(),
        "s^-2"
    );
}

#[test]
fn term_pow_multiplies_exponents() {
    let t = Term::with_exponent("m", Exponent::new(1, 2)).pow(Exponent::from_integer(4));
    assert_eq!(t.exponent(), Exponent::from_integer(2));
}

#[test]
fn term_rejects_compound_text() {
    assert!(term("a b").is_err());
    assert!(term("a / b").is_err());
}

// ---------------------------------------------------------------------------
// Expression parsing and canonical form
// ---------------------------------------------------------------------------

#[test]
fn juxtaposition_multiplies() {
    let e = expression("kg m^2 s^-2").unwrap();
    assert_eq!(e.terms().len(), 3);
    assert_eq!(e.to_string(), "kg m^2 / s^2");
}

#[test]
fn like_bases_merge_and_sort() {
    let e = expression("s m s m^2").unwrap();
    assert_eq!(e.to_string(), "m^3 s^2");
}

#[test]
fn zero_exponents_drop_out() {
    let e = expression("m^2 m^-2").unwrap();
    assert!(e.is_one());
    assert_eq!(e.to_string(), "1");
}

#[test]
fn slash_and_negative_exponent_agree() {
    assert!(equivalent("m / s", "m s^-1").unwrap());
    assert!(equivalent("J / (kg m)", "J kg^-1 m^-1").unwrap());
}

#[test]
fn numeric_factors_fold_into_the_coefficient() {
    let e = expression("2 m * 3 s").unwrap();
    assert_eq!(e.coefficient(), 6.0);
    assert_eq!(e.terms().len(), 2);
}

#[test]
fn lone_one_is_the_identity() {
    let e = expression("1").unwrap();
    assert!(e.is_one());
}

#[test]
fn parenthesized_group_takes_a_power() {
    let e = expression("(m / s)^2").unwrap();
    assert!(equivalent("m^2 / s^2", &e.to_string()).unwrap());
}

// ---------------------------------------------------------------------------
// Algebra
// ---------------------------------------------------------------------------

#[test]
fn product_of_strings() {
    let e = product("a", "a b").unwrap();
    assert_eq!(e.to_string(), "a^2 b");
}

#[test]
fn ratio_cancels() {
    let e = ratio("a b", "b").unwrap();
    assert_eq!(e.to_string(), "a");
    assert!(ratio("a", "a").unwrap().is_one());
}

#[test]
fn power_with_rational_exponent() {
    let e = power("m", Exponent::new(1, 2)).unwrap();
    assert_eq!(e.to_string(), "m^1/2");
}

#[test]
fn inverse_flips_every_exponent() {
    let e = expression("m^2 / s").unwrap().inverse();
    assert!(equivalent("s / m^2", &e.to_string()).unwrap());
}

#[test]
fn expression_pow_distributes() {
    let e = Expression::parse("kg m^2 / s^2").unwrap().pow(Exponent::new(1, 2));
    assert!(equivalent("kg^1/2 m / s", &e.to_string()).unwrap());
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn single_denominator_skips_parentheses() {
    assert_eq!(expression("m / s").unwrap().to_string(), "m / s");
}

#[test]
fn multiple_denominators_group() {
    assert_eq!(
        expression("J / (kg m)").unwrap().to_string(),
        "J / (kg m)"
    );
}

#[test]
fn pure_denominator_shows_a_unit_numerator() {
    assert_eq!(expression("s^-1").unwrap().to_string(), "1 / s");
}

// ---------------------------------------------------------------------------
// Errors and classification
// ---------------------------------------------------------------------------

#[test]
fn empty_text_is_an_error() {
    assert!(matches!(expression(""), Err(SymbolicError::Empty)));
    assert!(matches!(expression("   "), Err(SymbolicError::Empty)));
}

#[test]
fn stray_characters_are_malformed() {
    assert!(expression("m & s").is_err());
}

#[test]
fn compound_text_is_detected() {
    assert!(is_compound("m / s"));
    assert!(is_compound("kg m"));
    assert!(!is_compound("m^2"));
}
