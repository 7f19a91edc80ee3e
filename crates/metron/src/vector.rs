//! One-dimensional measured sequences.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Range, Rem, Sub};

use itertools::Itertools;
use ndarray::Array1;

use crate::data;
use crate::error::{Error, Result};
use crate::indexer::{IndexError, IndexLike};
use crate::measurable::Measurable;
use crate::measured::Measurement;
use crate::metric::{Unit, UnitLike};
use crate::scalar::Scalar;
use crate::symbolic::{Exponent, SymbolicError};
use crate::tensor::Tensor;

/// A one-dimensional sequence of values with a single unit.
///
/// Arithmetic accepts any [`Measurable`] operand: a length-1 operand
/// broadcasts, equal lengths pair up elementwise, and anything else is
/// [`Error::ShapeMismatch`]. Additive operations require identical
/// units; multiplicative operations combine them.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    data: Array1<f64>,
    unit: Unit,
}

impl Vector {
    /// A vector with the given unit.
    ///
    /// Panics when the unit does not parse; [`Vector::try_new`] is the
    /// checked form.
    pub fn new(data: impl Into<Array1<f64>>, unit: impl UnitLike) -> Self {
        match Self::try_new(data, unit) {
            Ok(vector) => vector,
            Err(error) => panic!("{}", error),
        }
    }

    pub fn try_new(data: impl Into<Array1<f64>>, unit: impl UnitLike) -> Result<Self> {
        Ok(Self {
            data: data.into(),
            unit: unit.into_unit()?,
        })
    }

    pub fn unitless(data: impl Into<Array1<f64>>) -> Self {
        Self {
            data: data.into(),
            unit: Unit::one(),
        }
    }

    /// Measures any loose input into a vector.
    pub fn from_measured<M: Measurable + ?Sized>(input: &M) -> Result<Self> {
        let measurement = input.measure()?;
        Ok(Self {
            data: Array1::from(measurement.data().to_vec()),
            unit: measurement.unit().clone(),
        })
    }

    /// Converts a one-dimensional tensor; higher ranks are
    /// [`Error::NotOneDimensional`].
    pub fn from_tensor(tensor: &Tensor) -> Result<Self> {
        if tensor.ndim() != 1 {
            return Err(Error::NotOneDimensional {
                ndim: tensor.ndim(),
            });
        }
        Ok(Self {
            data: Array1::from(tensor.data().iter().copied().collect::<Vec<_>>()),
            unit: tensor.unit().clone(),
        })
    }

    pub fn data(&self) -> &Array1<f64> {
        &self.data
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn is_unitless(&self) -> bool {
        self.unit.is_one()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Scalar> {
        self.data
            .get(index)
            .map(|&x| Scalar::new(x, &self.unit))
    }

    pub fn iter(&self) -> impl Iterator<Item = Scalar> + '_ {
        self.data.iter().map(|&x| Scalar::new(x, &self.unit))
    }

    pub fn slice(&self, range: Range<usize>) -> Vector {
        Self {
            data: Array1::from(self.data.to_vec()[range].to_vec()),
            unit: self.unit.clone(),
        }
    }

    /// Collapses a single-element vector; anything longer is
    /// [`Error::NotSingular`].
    pub fn scalar(&self) -> Result<Scalar> {
        if self.len() != 1 {
            return Err(Error::NotSingular { size: self.len() });
        }
        Ok(Scalar::new(self.data[0], &self.unit))
    }

    /// Converts to a unit with the same dimension, rescaling the data.
    pub fn withunit(&self, unit: impl UnitLike) -> Result<Self> {
        let target = unit.into_unit()?;
        let factor = self.unit.factor_to(&target)?;
        Ok(Self {
            data: self.data.mapv(|x| x * factor),
            unit: target,
        })
    }

    pub fn abs(&self) -> Self {
        self.map(f64::abs)
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.mapv(&f),
            unit: self.unit.clone(),
        }
    }

    pub fn try_add<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let measurement = other.measure()?;
        self.matching(&measurement)?;
        self.zip(&measurement, |a, b| a + b, self.unit.clone())
    }

    pub fn try_sub<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let measurement = other.measure()?;
        self.matching(&measurement)?;
        self.zip(&measurement, |a, b| a - b, self.unit.clone())
    }

    pub fn try_mul<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let measurement = other.measure()?;
        let unit = &self.unit * measurement.unit();
        self.zip(&measurement, |a, b| a * b, unit)
    }

    pub fn try_div<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let measurement = other.measure()?;
        let unit = &self.unit / measurement.unit();
        self.zip(&measurement, |a, b| a / b, unit)
    }

    /// `floor(a / b)` elementwise, with the quotient unit.
    pub fn try_floordiv<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let measurement = other.measure()?;
        let unit = &self.unit / measurement.unit();
        self.zip(&measurement, |a, b| (a / b).floor(), unit)
    }

    /// Floored modulo; the result takes the sign of the divisor.
    pub fn try_rem<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let measurement = other.measure()?;
        let unit = &self.unit / measurement.unit();
        self.zip(&measurement, modulo, unit)
    }

    fn matching(&self, measurement: &Measurement) -> Result<()> {
        if self.unit != *measurement.unit() {
            return Err(Error::unit_mismatch(&self.unit, measurement.unit()));
        }
        Ok(())
    }

    fn zip(
        &self,
        measurement: &Measurement,
        f: impl Fn(f64, f64) -> f64,
        unit: Unit,
    ) -> Result<Self> {
        let (left, right) = paired(&self.data.to_vec(), measurement.data()).ok_or_else(|| {
            Error::ShapeMismatch {
                left: vec![self.len()],
                right: vec![measurement.len()],
            }
        })?;
        let data = left
            .iter()
            .zip(right.iter())
            .map(|(&a, &b)| f(a, b))
            .collect::<Vec<_>>();
        Ok(Self {
            data: Array1::from(data),
            unit,
        })
    }

    pub fn lt<M: Measurable + ?Sized>(&self, other: &M) -> Result<Vec<bool>> {
        self.compare(other, |a, b| a < b)
    }

    pub fn le<M: Measurable + ?Sized>(&self, other: &M) -> Result<Vec<bool>> {
        self.compare(other, |a, b| a <= b)
    }

    pub fn gt<M: Measurable + ?Sized>(&self, other: &M) -> Result<Vec<bool>> {
        self.compare(other, |a, b| a > b)
    }

    pub fn ge<M: Measurable + ?Sized>(&self, other: &M) -> Result<Vec<bool>> {
        self.compare(other, |a, b| a >= b)
    }

    fn compare<M: Measurable + ?Sized>(
        &self,
        other: &M,
        f: impl Fn(f64, f64) -> bool,
    ) -> Result<Vec<bool>> {
        let measurement = other.measure()?;
        self.matching(&measurement)?;
        let (left, right) = paired(&self.data.to_vec(), measurement.data()).ok_or_else(|| {
            Error::ShapeMismatch {
                left: vec![self.len()],
                right: vec![measurement.len()],
            }
        })?;
        Ok(left
            .iter()
            .zip(right.iter())
            .map(|(&a, &b)| f(a, b))
            .collect())
    }

    pub fn powi(&self, exponent: i32) -> Self {
        Self {
            data: self.data.mapv(|x| x.powi(exponent)),
            unit: self.unit.powi(exponent),
        }
    }

    pub fn try_powf(&self, exponent: f64) -> Result<Self> {
        let k = Exponent::approximate_float(exponent)
            .ok_or_else(|| SymbolicError::Exponent(exponent.to_string()))?;
        Ok(Self {
            data: self.data.mapv(|x| x.powf(exponent)),
            unit: self.unit.powr(k),
        })
    }

    /// Elementwise exponentiation; both operands must be unitless.
    pub fn try_pow(&self, exponent: &Vector) -> Result<Self> {
        for vector in [self, exponent] {
            if !vector.unit.is_one() {
                return Err(Error::NotUnitless {
                    unit: vector.unit.to_string(),
                });
            }
        }
        self.zip(
            &exponent.measure()?,
            |a, b| a.powf(b),
            Unit::one(),
        )
    }

    pub fn sqrt(&self) -> Self {
        Self {
            data: self.data.mapv(f64::sqrt),
            unit: self.unit.sqrt(),
        }
    }

    pub fn sin(&self) -> Result<Self> {
        self.angular(f64::sin)
    }

    pub fn cos(&self) -> Result<Self> {
        self.angular(f64::cos)
    }

    pub fn tan(&self) -> Result<Self> {
        self.angular(f64::tan)
    }

    pub fn ln(&self) -> Result<Self> {
        self.dimensionless(f64::ln)
    }

    pub fn log10(&self) -> Result<Self> {
        self.dimensionless(f64::log10)
    }

    pub fn log2(&self) -> Result<Self> {
        self.dimensionless(f64::log2)
    }

    pub fn ln_1p(&self) -> Result<Self> {
        self.dimensionless(f64::ln_1p)
    }

    fn angular(&self, f: impl Fn(f64) -> f64) -> Result<Self> {
        if !self.unit.is_angle() {
            return Err(Error::NotAngular {
                unit: self.unit.to_string(),
            });
        }
        Ok(Self::unitless(self.data.mapv(&f)))
    }

    fn dimensionless(&self, f: impl Fn(f64) -> f64) -> Result<Self> {
        if !self.unit.is_one() {
            return Err(Error::NotUnitless {
                unit: self.unit.to_string(),
            });
        }
        Ok(Self::unitless(self.data.mapv(&f)))
    }

    pub fn mean(&self) -> Result<Scalar> {
        let mean = self.data.mean().ok_or(Error::Empty)?;
        Ok(Scalar::new(mean, &self.unit))
    }

    pub fn sum(&self) -> Scalar {
        Scalar::new(self.data.sum(), &self.unit)
    }

    pub fn cumsum(&self) -> Vector {
        let mut total = 0.0;
        let data: Vec<f64> = self
            .data
            .iter()
            .map(|&x| {
                total += x;
                total
            })
            .collect();
        Self {
            data: Array1::from(data),
            unit: self.unit.clone(),
        }
    }

    /// The derivative against an implicit unit-spaced coordinate.
    pub fn gradient(&self) -> Result<Vector> {
        self.sampled()?;
        Ok(Self {
            data: Array1::from(data::gradient_uniform(&self.data.to_vec(), 1.0)),
            unit: self.unit.clone(),
        })
    }

    /// The derivative against a uniform measured step; the step's unit
    /// divides the result.
    pub fn gradient_step(&self, step: &Scalar) -> Result<Vector> {
        self.sampled()?;
        Ok(Self {
            data: Array1::from(data::gradient_uniform(&self.data.to_vec(), step.data())),
            unit: &self.unit / step.unit(),
        })
    }

    /// The derivative against explicit coordinates of the same length.
    pub fn gradient_points(&self, coordinates: &Vector) -> Result<Vector> {
        self.sampled()?;
        if coordinates.len() != self.len() {
            return Err(Error::ShapeMismatch {
                left: vec![self.len()],
                right: vec![coordinates.len()],
            });
        }
        Ok(Self {
            data: Array1::from(data::gradient_spaced(
                &self.data.to_vec(),
                &coordinates.data.to_vec(),
            )),
            unit: &self.unit / &coordinates.unit,
        })
    }

    fn sampled(&self) -> Result<()> {
        if self.len() < 2 {
            return Err(Error::TooFewSamples {
                needed: 2,
                got: self.len(),
            });
        }
        Ok(())
    }
}

/// Pairs two slices for elementwise work: equal lengths zip, a
/// length-1 operand repeats.
fn paired(left: &[f64], right: &[f64]) -> Option<(Vec<f64>, Vec<f64>)> {
    if left.len() == right.len() {
        return Some((left.to_vec(), right.to_vec()));
    }
    if right.len() == 1 {
        return Some((left.to_vec(), vec![right[0]; left.len()]));
    }
    if left.len() == 1 {
        return Some((vec![left[0]; right.len()], right.to_vec()));
    }
    None
}

fn modulo(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}

impl Measurable for Vector {
    fn measure(&self) -> Result<Measurement> {
        Measurement::try_new(self.data.to_vec(), &self.unit)
    }
}

impl IndexLike for Vector {
    fn index_values(&self) -> std::result::Result<Vec<i64>, IndexError> {
        Err(IndexError::Type(
            "measured data are not index-like".to_string(),
        ))
    }
}

impl From<&Measurement> for Vector {
    fn from(measurement: &Measurement) -> Self {
        Self {
            data: Array1::from(measurement.data().to_vec()),
            unit: measurement.unit().clone(),
        }
    }
}

impl From<&Scalar> for Vector {
    fn from(scalar: &Scalar) -> Self {
        Self {
            data: Array1::from(vec![scalar.data()]),
            unit: scalar.unit().clone(),
        }
    }
}

macro_rules! delegated {
    ($trait:ident, $method:ident, $checked:ident, $rhs:ty) => {
        impl $trait<$rhs> for &Vector {
            type Output = Vector;

            fn $method(self, rhs: $rhs) -> Vector {
                match self.$checked(&rhs) {
                    Ok(vector) => vector,
                    Err(error) => panic!("{}", error),
                }
            }
        }
    };
}

delegated!(Add, add, try_add, &Vector);
delegated!(Add, add, try_add, &Scalar);
delegated!(Sub, sub, try_sub, &Vector);
delegated!(Sub, sub, try_sub, &Scalar);
delegated!(Mul, mul, try_mul, &Vector);
delegated!(Mul, mul, try_mul, &Scalar);
delegated!(Div, div, try_div, &Vector);
delegated!(Div, div, try_div, &Scalar);
delegated!(Rem, rem, try_rem, &Vector);

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.map(|x| x * rhs)
    }
}

impl Div<f64> for &Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        self.map(|x| x / rhs)
    }
}

impl Rem<f64> for &Vector {
    type Output = Vector;

    fn rem(self, rhs: f64) -> Vector {
        self.map(|x| modulo(x, rhs))
    }
}

impl Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Vector {
        rhs.map(|x| self * x)
    }
}

impl Div<&Vector> for f64 {
    type Output = Vector;

    fn div(self, rhs: &Vector) -> Vector {
        Vector {
            data: rhs.data.mapv(|x| self / x),
            unit: rhs.unit.powi(-1),
        }
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.map(|x| -x)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] [{}]", self.data.iter().format(", "), self.unit)
    }
}
