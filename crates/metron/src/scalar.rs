//! A single value with a unit.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::indexer::{IndexError, IndexLike};
use crate::measurable::Measurable;
use crate::measured::{Measurement, Value};
use crate::metric::{Unit, UnitLike};
use crate::symbolic::{Exponent, SymbolicError};
use crate::vector::Vector;

/// A single measured value.
///
/// Additive operations and comparisons require identical units;
/// multiplicative operations combine units symbolically. The operator
/// impls panic on a unit error and the `try_*` methods are the checked
/// path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scalar {
    data: f64,
    unit: Unit,
}

impl Scalar {
    /// A scalar with the given unit.
    ///
    /// Panics when the unit does not parse; [`Scalar::try_new`] is the
    /// checked form.
    pub fn new(data: f64, unit: impl UnitLike) -> Self {
        match Self::try_new(data, unit) {
            Ok(scalar) => scalar,
            Err(error) => panic!("{}", error),
        }
    }

    pub fn try_new(data: f64, unit: impl UnitLike) -> Result<Self> {
        Ok(Self {
            data,
            unit: unit.into_unit()?,
        })
    }

    pub fn unitless(data: f64) -> Self {
        Self {
            data,
            unit: Unit::one(),
        }
    }

    /// Collapses any single-element measurable input into a scalar.
    ///
    /// Multi-element input is [`Error::NotSingular`].
    pub fn from_measured<M: Measurable + ?Sized>(input: &M) -> Result<Self> {
        let value = single(input)?;
        Ok(Self {
            data: value.data(),
            unit: value.unit().clone(),
        })
    }

    pub fn data(&self) -> f64 {
        self.data
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn is_unitless(&self) -> bool {
        self.unit.is_one()
    }

    /// Converts to a unit with the same dimension, rescaling the value.
    pub fn withunit(&self, unit: impl UnitLike) -> Result<Self> {
        let target = unit.into_unit()?;
        let factor = self.unit.factor_to(&target)?;
        Ok(Self {
            data: self.data * factor,
            unit: target,
        })
    }

    pub fn abs(&self) -> Self {
        self.map(f64::abs)
    }

    pub fn floor(&self) -> Self {
        self.map(f64::floor)
    }

    pub fn ceil(&self) -> Self {
        self.map(f64::ceil)
    }

    pub fn round(&self) -> Self {
        self.map(f64::round)
    }

    pub fn trunc(&self) -> Self {
        self.map(f64::trunc)
    }

    pub fn to_f64(&self) -> f64 {
        self.data
    }

    /// The integral part, truncated toward zero.
    pub fn to_i64(&self) -> i64 {
        self.data as i64
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: f(self.data),
            unit: self.unit.clone(),
        }
    }

    pub fn try_add<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let value = single(other)?;
        self.matching(&value)?;
        Ok(self.map(|x| x + value.data()))
    }

    pub fn try_sub<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let value = single(other)?;
        self.matching(&value)?;
        Ok(self.map(|x| x - value.data()))
    }

    pub fn try_mul<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let value = single(other)?;
        Ok(Self {
            data: self.data * value.data(),
            unit: &self.unit * value.unit(),
        })
    }

    pub fn try_div<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let value = single(other)?;
        Ok(Self {
            data: self.data / value.data(),
            unit: &self.unit / value.unit(),
        })
    }

    /// `floor(a / b)`, with the quotient unit.
    pub fn try_floordiv<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let value = single(other)?;
        Ok(Self {
            data: (self.data / value.data()).floor(),
            unit: &self.unit / value.unit(),
        })
    }

    /// Floored modulo; the result takes the sign of the divisor.
    pub fn try_rem<M: Measurable + ?Sized>(&self, other: &M) -> Result<Self> {
        let value = single(other)?;
        Ok(Self {
            data: modulo(self.data, value.data()),
            unit: &self.unit / value.unit(),
        })
    }

    fn matching(&self, value: &Value) -> Result<()> {
        if self.unit != *value.unit() {
            return Err(Error::unit_mismatch(&self.unit, value.unit()));
        }
        Ok(())
    }

    pub fn powi(&self, exponent: i32) -> Self {
        Self {
            data: self.data.powi(exponent),
            unit: self.unit.powi(exponent),
        }
    }

    pub fn try_powf(&self, exponent: f64) -> Result<Self> {
        let k = Exponent::approximate_float(exponent)
            .ok_or_else(|| SymbolicError::Exponent(exponent.to_string()))?;
        Ok(Self {
            data: self.data.powf(exponent),
            unit: self.unit.powr(k),
        })
    }

    /// Raises to a unitless scalar exponent.
    pub fn try_pow(&self, exponent: &Scalar) -> Result<Self> {
        let p = exponent.dimensionless()?;
        if p.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(&p) {
            return Ok(self.powi(p as i32));
        }
        self.try_powf(p)
    }

    pub fn sqrt(&self) -> Self {
        Self {
            data: self.data.sqrt(),
            unit: self.unit.sqrt(),
        }
    }

    pub fn sin(&self) -> Result<Self> {
        Ok(Self::unitless(self.angular()?.sin()))
    }

    pub fn cos(&self) -> Result<Self> {
        Ok(Self::unitless(self.angular()?.cos()))
    }

    pub fn tan(&self) -> Result<Self> {
        Ok(Self::unitless(self.angular()?.tan()))
    }

    pub fn ln(&self) -> Result<Self> {
        Ok(Self::unitless(self.dimensionless()?.ln()))
    }

    pub fn log10(&self) -> Result<Self> {
        Ok(Self::unitless(self.dimensionless()?.log10()))
    }

    pub fn log2(&self) -> Result<Self> {
        Ok(Self::unitless(self.dimensionless()?.log2()))
    }

    pub fn ln_1p(&self) -> Result<Self> {
        Ok(Self::unitless(self.dimensionless()?.ln_1p()))
    }

    fn angular(&self) -> Result<f64> {
        if !self.unit.is_angle() {
            return Err(Error::NotAngular {
                unit: self.unit.to_string(),
            });
        }
        Ok(self.data)
    }

    fn dimensionless(&self) -> Result<f64> {
        if !self.unit.is_one() {
            return Err(Error::NotUnitless {
                unit: self.unit.to_string(),
            });
        }
        Ok(self.data)
    }

    pub fn mean(&self) -> Self {
        self.clone()
    }

    pub fn sum(&self) -> Self {
        self.clone()
    }

    pub fn cumsum(&self) -> Vector {
        Vector::new(vec![self.data], &self.unit)
    }
}

fn single<M: Measurable + ?Sized>(input: &M) -> Result<Value> {
    let measurement = input.measure()?;
    Value::from_measurement(&measurement)
}

fn modulo(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}

impl Measurable for Scalar {
    fn measure(&self) -> Result<Measurement> {
        Measurement::try_new(vec![self.data], &self.unit)
    }
}

impl IndexLike for Scalar {
    fn index_values(&self) -> std::result::Result<Vec<i64>, IndexError> {
        Err(IndexError::Type(
            "measured data are not index-like".to_string(),
        ))
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        Self {
            data: value.data(),
            unit: value.unit().clone(),
        }
    }
}

impl From<&Value> for Scalar {
    fn from(value: &Value) -> Self {
        Self {
            data: value.data(),
            unit: value.unit().clone(),
        }
    }
}

/// Comparable only within a unit; across units there is no order.
impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.unit != other.unit {
            return None;
        }
        self.data.partial_cmp(&other.data)
    }
}

impl Add for &Scalar {
    type Output = Scalar;

    fn add(self, rhs: &Scalar) -> Scalar {
        match self.try_add(rhs) {
            Ok(scalar) => scalar,
            Err(error) => panic!("{}", error),
        }
    }
}

impl Sub for &Scalar {
    type Output = Scalar;

    fn sub(self, rhs: &Scalar) -> Scalar {
        match self.try_sub(rhs) {
            Ok(scalar) => scalar,
            Err(error) => panic!("{}", error),
        }
    }
}

impl Mul for &Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &Scalar) -> Scalar {
        Scalar {
            data: self.data * rhs.data,
            unit: &self.unit * &rhs.unit,
        }
    }
}

impl Div for &Scalar {
    type Output = Scalar;

    fn div(self, rhs: &Scalar) -> Scalar {
        Scalar {
            data: self.data / rhs.data,
            unit: &self.unit / &rhs.unit,
        }
    }
}

impl Rem for &Scalar {
    type Output = Scalar;

    fn rem(self, rhs: &Scalar) -> Scalar {
        Scalar {
            data: modulo(self.data, rhs.data),
            unit: &self.unit / &rhs.unit,
        }
    }
}

impl Mul<f64> for &Scalar {
    type Output = Scalar;

    fn mul(self, rhs: f64) -> Scalar {
        self.map(|x| x * rhs)
    }
}

impl Div<f64> for &Scalar {
    type Output = Scalar;

    fn div(self, rhs: f64) -> Scalar {
        self.map(|x| x / rhs)
    }
}

impl Rem<f64> for &Scalar {
    type Output = Scalar;

    fn rem(self, rhs: f64) -> Scalar {
        self.map(|x| modulo(x, rhs))
    }
}

impl Mul<&Scalar> for f64 {
    type Output = Scalar;

    fn mul(self, rhs: &Scalar) -> Scalar {
        rhs.map(|x| self * x)
    }
}

impl Div<&Scalar> for f64 {
    type Output = Scalar;

    fn div(self, rhs: &Scalar) -> Scalar {
        Scalar {
            data: self / rhs.data,
            unit: rhs.unit.powi(-1),
        }
    }
}

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        self.map(|x| -x)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.data, self.unit)
    }
}
