//! Integration tests for one-dimensional measured sequences.

use metron::error::Error;
use metron::scalar::Scalar;
use metron::tensor::Tensor;
use metron::vector::Vector;

use approx::assert_relative_eq;
use ndarray::{ArrayD, IxDyn};

fn close(vector: &Vector, expected: &[f64]) {
    assert_eq!(vector.len(), expected.len());
    for (got, want) in vector.data().iter().zip(expected) {
        assert_relative_eq!(*got, *want, epsilon = 1e-12);
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn construction_parses_the_unit() {
    let lengths = Vector::new(vec![1.0, 2.0], "m");
    assert_eq!(lengths.len(), 2);
    assert_eq!(*lengths.unit(), "m");
    assert!(!lengths.is_unitless());
    assert!(Vector::unitless(vec![1.0]).is_unitless());
    assert!(Vector::try_new(vec![1.0], "furlong").is_err());
}

#[test]
fn loose_input_measures_into_a_vector() {
    let paired = Vector::from_measured(&(vec![1.0, 2.0], "km")).unwrap();
    assert_eq!(paired.len(), 2);
    assert_eq!(*paired.unit(), "km");

    let bare = Vector::from_measured(&3.0f64).unwrap();
    assert_eq!(bare.len(), 1);
    assert!(bare.is_unitless());
}

#[test]
fn only_one_dimensional_tensors_convert() {
    let flat = Tensor::new(
        ArrayD::from_shape_vec(IxDyn(&[3]), vec![1.0, 2.0, 3.0]).unwrap(),
        "m",
    );
    let vector = Vector::from_tensor(&flat).unwrap();
    assert_eq!(vector.len(), 3);
    assert_eq!(*vector.unit(), "m");

    let square = Tensor::new(
        ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1.0, 2.0, 3.0, 4.0]).unwrap(),
        "m",
    );
    assert!(matches!(
        Vector::from_tensor(&square),
        Err(Error::NotOneDimensional { ndim: 2 })
    ));
}

// ---------------------------------------------------------------------------
// Element access
// ---------------------------------------------------------------------------

#[test]
fn elements_come_out_as_scalars() {
    let lengths = Vector::new(vec![1.0, 2.5], "m");
    assert_eq!(lengths.get(1), Some(Scalar::new(2.5, "m")));
    assert_eq!(lengths.get(2), None);

    let collected: Vec<Scalar> = lengths.iter().collect();
    assert_eq!(collected[0], Scalar::new(1.0, "m"));
}

#[test]
fn slicing_keeps_the_unit() {
    let lengths = Vector::new(vec![1.0, 2.0, 3.0, 4.0], "m");
    let middle = lengths.slice(1..3);
    close(&middle, &[2.0, 3.0]);
    assert_eq!(*middle.unit(), "m");
}

#[test]
fn only_single_element_vectors_collapse_to_a_scalar() {
    let single = Vector::new(vec![1.5], "m");
    assert_eq!(single.scalar().unwrap(), Scalar::new(1.5, "m"));
    assert!(matches!(
        Vector::new(vec![1.0, 2.0], "m").scalar(),
        Err(Error::NotSingular { size: 2 })
    ));
}

// ---------------------------------------------------------------------------
// Additive arithmetic
// ---------------------------------------------------------------------------

#[test]
fn equal_lengths_pair_up_elementwise() {
    let a = Vector::new(vec![1.0, 2.0], "m");
    let b = Vector::new(vec![0.5, 1.0], "m");
    close(&a.try_add(&b).unwrap(), &[1.5, 3.0]);
    close(&(&a - &b), &[0.5, 1.0]);
}

#[test]
fn single_element_operands_broadcast() {
    let a = Vector::new(vec![1.0, 2.0, 3.0], "m");
    let offset = Scalar::new(10.0, "m");
    close(&(&a + &offset), &[11.0, 12.0, 13.0]);

    let single = Vector::new(vec![1.0], "m");
    close(&single.try_add(&a).unwrap(), &[2.0, 3.0, 4.0]);
}

#[test]
fn mismatched_lengths_and_units_are_rejected() {
    let a = Vector::new(vec![1.0, 2.0], "m");
    assert!(matches!(
        a.try_add(&Vector::new(vec![1.0, 2.0, 3.0], "m")),
        Err(Error::ShapeMismatch { .. })
    ));
    assert!(matches!(
        a.try_add(&Vector::new(vec![1.0, 2.0], "km")),
        Err(Error::UnitMismatch { .. })
    ));
}

#[test]
#[should_panic]
fn the_addition_operator_panics_across_units() {
    let _ = &Vector::new(vec![1.0], "m") + &Vector::new(vec![1.0], "s");
}

// ---------------------------------------------------------------------------
// Multiplicative arithmetic
// ---------------------------------------------------------------------------

#[test]
fn multiplication_combines_units() {
    let force = Vector::new(vec![1.0, 2.0], "N");
    let distance = Vector::new(vec![3.0, 4.0], "m");
    let work = &force * &distance;
    close(&work, &[3.0, 8.0]);
    assert_eq!(*work.unit(), "N m");

    let speed = &distance / &Scalar::new(2.0, "s");
    close(&speed, &[1.5, 2.0]);
    assert_eq!(*speed.unit(), "m / s");
}

#[test]
fn bare_numbers_scale_without_touching_the_unit() {
    let lengths = Vector::new(vec![1.0, 2.0], "m");
    close(&(&lengths * 3.0), &[3.0, 6.0]);
    close(&(2.0 * &lengths), &[2.0, 4.0]);
    close(&(&lengths / 2.0), &[0.5, 1.0]);
    assert_eq!(*(&lengths * 3.0).unit(), "m");

    let inverted = 6.0 / &lengths;
    close(&inverted, &[6.0, 3.0]);
    assert_eq!(*inverted.unit(), "1 / m");
}

#[test]
fn floored_division_and_modulo() {
    let values = Vector::new(vec![7.0, -7.0], "m");
    let step = Scalar::new(3.0, "m");
    close(&values.try_floordiv(&step).unwrap(), &[2.0, -3.0]);

    let remainder = values.try_rem(&step).unwrap();
    close(&remainder, &[1.0, 2.0]);
    assert_eq!(*remainder.unit(), "1");

    close(&(&Vector::unitless(vec![7.0]) % (-3.0)), &[-2.0]);
}

#[test]
fn negation_and_absolute_value() {
    let values = Vector::new(vec![1.0, -2.0], "m");
    close(&-&values, &[-1.0, 2.0]);
    close(&values.abs(), &[1.0, 2.0]);
}

// ---------------------------------------------------------------------------
// Comparisons
// ---------------------------------------------------------------------------

#[test]
fn comparisons_yield_element_masks() {
    let a = Vector::new(vec![1.0, 2.0, 3.0], "m");
    let b = Vector::new(vec![2.0, 2.0, 2.0], "m");
    assert_eq!(a.lt(&b).unwrap(), vec![true, false, false]);
    assert_eq!(a.le(&b).unwrap(), vec![true, true, false]);
    assert_eq!(a.gt(&b).unwrap(), vec![false, false, true]);
    assert_eq!(a.ge(&Scalar::new(2.0, "m")).unwrap(), vec![false, true, true]);

    assert!(a.lt(&Vector::new(vec![1.0, 2.0, 3.0], "km")).is_err());
}

// ---------------------------------------------------------------------------
// Powers and transcendentals
// ---------------------------------------------------------------------------

#[test]
fn powers_raise_the_unit() {
    let lengths = Vector::new(vec![2.0, 3.0], "m");
    let squared = lengths.powi(2);
    close(&squared, &[4.0, 9.0]);
    assert_eq!(*squared.unit(), "m^2");
    assert_eq!(*squared.sqrt().unit(), "m");
    close(&squared.sqrt(), &[2.0, 3.0]);
}

#[test]
fn elementwise_exponentiation_requires_unitless_operands() {
    let base = Vector::unitless(vec![2.0, 3.0]);
    let exponent = Vector::unitless(vec![3.0, 2.0]);
    close(&base.try_pow(&exponent).unwrap(), &[8.0, 9.0]);

    assert!(matches!(
        Vector::new(vec![2.0], "m").try_pow(&exponent),
        Err(Error::NotUnitless { .. })
    ));
}

#[test]
fn trigonometry_requires_an_angular_unit() {
    let angles = Vector::new(vec![0.0, std::f64::consts::FRAC_PI_2], "rad");
    close(&angles.sin().unwrap(), &[0.0, 1.0]);
    assert!(angles.cos().unwrap().is_unitless());
    assert!(Vector::new(vec![1.0], "m").tan().is_err());
}

#[test]
fn logarithms_require_a_unitless_operand() {
    let values = Vector::unitless(vec![1.0, std::f64::consts::E]);
    close(&values.ln().unwrap(), &[0.0, 1.0]);
    assert!(Vector::new(vec![1.0], "m").log10().is_err());
}

// ---------------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------------

#[test]
fn reductions_keep_the_unit() {
    let lengths = Vector::new(vec![1.0, 2.0, 3.0], "m");
    assert_eq!(lengths.mean().unwrap(), Scalar::new(2.0, "m"));
    assert_eq!(lengths.sum(), Scalar::new(6.0, "m"));
    close(&lengths.cumsum(), &[1.0, 3.0, 6.0]);
    assert!(Vector::new(Vec::<f64>::new(), "m").mean().is_err());
}

// ---------------------------------------------------------------------------
// Differentiation
// ---------------------------------------------------------------------------

#[test]
fn gradient_against_an_implicit_unit_spacing() {
    let samples = Vector::new(vec![1.0, 2.0, 4.0], "m");
    let slope = samples.gradient().unwrap();
    close(&slope, &[1.0, 1.5, 2.0]);
    assert_eq!(*slope.unit(), "m");
}

#[test]
fn gradient_against_a_measured_step() {
    let samples = Vector::new(vec![1.0, 2.0, 4.0], "m");
    let slope = samples.gradient_step(&Scalar::new(0.5, "s")).unwrap();
    close(&slope, &[2.0, 3.0, 4.0]);
    assert_eq!(*slope.unit(), "m / s");
}

#[test]
fn gradient_against_explicit_coordinates() {
    let samples = Vector::new(vec![1.0, 2.0, 4.0], "m");
    let coordinates = Vector::new(vec![-1.0, 0.5, 1.5], "s");
    let slope = samples.gradient_points(&coordinates).unwrap();
    close(&slope, &[2.0 / 3.0, 22.0 / 15.0, 2.0]);
    assert_eq!(*slope.unit(), "m / s");

    let short = Vector::new(vec![0.0, 1.0], "s");
    assert!(matches!(
        samples.gradient_points(&short),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn differentiation_needs_at_least_two_samples() {
    let single = Vector::new(vec![1.0], "m");
    assert!(matches!(
        single.gradient(),
        Err(Error::TooFewSamples { needed: 2, got: 1 })
    ));
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn display_shows_values_and_unit() {
    assert_eq!(Vector::new(vec![1.0, 2.5], "m").to_string(), "[1, 2.5] [m]");
}
