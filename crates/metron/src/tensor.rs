//! N-dimensional measured data without named dimensions.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use ndarray::{Array1, ArrayD, Axis, IxDyn, SliceInfoElem, Zip};

use crate::data;
use crate::error::{Error, Result};
use crate::indexer::{self, IndexError, IndexLike, IndexSpec};
use crate::measurable::Measurable;
use crate::measured::Measurement;
use crate::metric::{Unit, UnitLike};
use crate::scalar::Scalar;
use crate::symbolic::{Exponent, SymbolicError};
use crate::vector::Vector;

/// An n-dimensional block of values with a single unit.
///
/// Binary operations align shapes by numpy-style trailing-axis
/// broadcasting; incompatible shapes are [`Error::ShapeMismatch`].
/// Additive operations require identical units and multiplicative
/// operations combine them. Operator impls panic with the underlying
/// error message; the `try_*` methods are the checked path.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    data: ArrayD<f64>,
    unit: Unit,
}

impl Tensor {
    /// A tensor with the given unit.
    ///
    /// Panics when the unit does not parse; [`Tensor::try_new`] is the
    /// checked form.
    pub fn new(data: ArrayD<f64>, unit: impl UnitLike) -> Self {
        match Self::try_new(data, unit) {
            Ok(tensor) => tensor,
            Err(error) => panic!("{}", error),
        }
    }

    pub fn try_new(data: ArrayD<f64>, unit: impl UnitLike) -> Result<Self> {
        Ok(Self {
            data,
            unit: unit.into_unit()?,
        })
    }

    pub fn unitless(data: ArrayD<f64>) -> Self {
        Self {
            data,
            unit: Unit::one(),
        }
    }

    /// Measures loose input into a one-dimensional tensor.
    pub fn from_measured<M: Measurable + ?Sized>(input: &M) -> Result<Self> {
        let measurement = input.measure()?;
        Ok(Self {
            data: Array1::from(measurement.data().to_vec()).into_dyn(),
            unit: measurement.unit().clone(),
        })
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn is_unitless(&self) -> bool {
        self.unit.is_one()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// The element at a full position.
    pub fn at(&self, index: &[usize]) -> Result<Scalar> {
        let value = self.data.get(IxDyn(index)).ok_or(Error::OutOfBounds {
            index: index.to_vec(),
            shape: self.shape().to_vec(),
        })?;
        Ok(Scalar::new(*value, &self.unit))
    }

    /// Applies a subscript, normalized against the stored rank.
    ///
    /// Ranges follow `ndarray` slicing with negative bounds counted
    /// from the back and out-of-range bounds clipped.
    pub fn select(&self, spec: &[IndexSpec]) -> Result<Tensor> {
        let expanded = indexer::expand(self.ndim(), spec)?;
        let mut elements = Vec::with_capacity(expanded.len());
        let mut axis = 0usize;
        for entry in &expanded {
            match *entry {
                IndexSpec::At(position) => {
                    let extent = self.data.len_of(Axis(axis));
                    let wrapped = wrap(position, extent);
                    if wrapped < 0 || wrapped as usize >= extent {
                        return Err(Error::OutOfBounds {
                            index: vec![position.max(0) as usize],
                            shape: self.shape().to_vec(),
                        });
                    }
                    elements.push(SliceInfoElem::Index(wrapped));
                    axis += 1;
                }
                IndexSpec::Range { start, stop, step } => {
                    if step == 0 {
                        return Err(
                            IndexError::Type("slice step cannot be zero".to_string()).into()
                        );
                    }
                    let extent = self.data.len_of(Axis(axis));
                    let begin = clip(start.map_or(0, |s| wrap(s, extent)), extent);
                    let end = stop.map(|s| clip(wrap(s, extent), extent));
                    elements.push(SliceInfoElem::Slice {
                        start: begin,
                        end,
                        step,
                    });
                    axis += 1;
                }
                IndexSpec::All => {
                    elements.push(SliceInfoElem::Slice {
                        start: 0,
                        end: None,
                        step: 1,
                    });
                    axis += 1;
                }
                IndexSpec::NewAxis => elements.push(SliceInfoElem::NewAxis),
                IndexSpec::Ellipsis => {}
            }
        }
        Ok(Self {
            data: self.data.slice(elements.as_slice()).to_owned(),
            unit: self.unit.clone(),
        })
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

    pub fn try_add(&self, other: &Tensor) -> Result<Self> {
        self.matching(other)?;
        Ok(Self {
            data: self.broadcast_zip(other, |a, b| a + b)?,
            unit: self.unit.clone(),
        })
    }

    pub fn try_sub(&self, other: &Tensor) -> Result<Self> {
        self.matching(other)?;
        Ok(Self {
            data: self.broadcast_zip(other, |a, b| a - b)?,
            unit: self.unit.clone(),
        })
    }

    pub fn try_mul(&self, other: &Tensor) -> Result<Self> {
        Ok(Self {
            data: self.broadcast_zip(other, |a, b| a * b)?,
            unit: &self.unit * &other.unit,
        })
    }

    pub fn try_div(&self, other: &Tensor) -> Result<Self> {
        Ok(Self {
            data: self.broadcast_zip(other, |a, b| a / b)?,
            unit: &self.unit / &other.unit,
        })
    }

    /// `floor(a / b)` elementwise, with the quotient unit.
    pub fn try_floordiv(&self, other: &Tensor) -> Result<Self> {
        Ok(Self {
            data: self.broadcast_zip(other, |a, b| (a / b).floor())?,
            unit: &self.unit / &other.unit,
        })
    }

    /// Floored modulo; the result takes the sign of the divisor.
    pub fn try_rem(&self, other: &Tensor) -> Result<Self> {
        Ok(Self {
            data: self.broadcast_zip(other, modulo)?,
            unit: &self.unit / &other.unit,
        })
    }

    fn matching(&self, other: &Tensor) -> Result<()> {
        if self.unit != other.unit {
            return Err(Error::unit_mismatch(&self.unit, &other.unit));
        }
        Ok(())
    }

    fn broadcast_zip(&self, other: &Tensor, f: impl Fn(f64, f64) -> f64) -> Result<ArrayD<f64>> {
        let (left, right) = broadcast_pair(&self.data, &other.data)?;
        Ok(Zip::from(&left).and(&right).map_collect(|&a, &b| f(a, b)))
    }

    pub fn lt(&self, other: &Tensor) -> Result<ArrayD<bool>> {
        self.compare(other, |a, b| a < b)
    }

    pub fn le(&self, other: &Tensor) -> Result<ArrayD<bool>> {
        self.compare(other, |a, b| a <= b)
    }

    pub fn gt(&self, other: &Tensor) -> Result<ArrayD<bool>> {
        self.compare(other, |a, b| a > b)
    }

    pub fn ge(&self, other: &Tensor) -> Result<ArrayD<bool>> {
        self.compare(other, |a, b| a >= b)
    }

    fn compare(&self, other: &Tensor, f: impl Fn(f64, f64) -> bool) -> Result<ArrayD<bool>> {
        self.matching(other)?;
        let (left, right) = broadcast_pair(&self.data, &other.data)?;
        Ok(Zip::from(&left).and(&right).map_collect(|&a, &b| f(a, b)))
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
    pub fn try_pow(&self, exponent: &Tensor) -> Result<Self> {
        for tensor in [self, exponent] {
            if !tensor.unit.is_one() {
                return Err(Error::NotUnitless {
                    unit: tensor.unit.to_string(),
                });
            }
        }
        Ok(Self {
            data: self.broadcast_zip(exponent, |a, b| a.powf(b))?,
            unit: Unit::one(),
        })
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

    /// Drops every singleton axis.
    pub fn squeeze(&self) -> Tensor {
        let mut data = self.data.clone();
        while let Some(position) = data.shape().iter().position(|&n| n == 1) {
            data = data.remove_axis(Axis(position));
        }
        Self {
            data,
            unit: self.unit.clone(),
        }
    }

    /// Collapses a single-element tensor; anything larger is
    /// [`Error::NotSingular`].
    pub fn scalar(&self) -> Result<Scalar> {
        if self.size() != 1 {
            return Err(Error::NotSingular { size: self.size() });
        }
        let value = self.data.iter().copied().next().ok_or(Error::Empty)?;
        Ok(Scalar::new(value, &self.unit))
    }

    pub fn mean(&self) -> Result<Scalar> {
        let mean = self.data.mean().ok_or(Error::Empty)?;
        Ok(Scalar::new(mean, &self.unit))
    }

    pub fn sum(&self) -> Scalar {
        Scalar::new(self.data.sum(), &self.unit)
    }

    /// The mean along one axis; negative positions count from the back.
    pub fn mean_axis(&self, axis: isize) -> Result<Tensor> {
        let axis = self.normalized(axis)?;
        let data = self.data.mean_axis(Axis(axis)).ok_or(Error::Empty)?;
        Ok(Self {
            data,
            unit: self.unit.clone(),
        })
    }

    pub fn sum_axis(&self, axis: isize) -> Result<Tensor> {
        let axis = self.normalized(axis)?;
        Ok(Self {
            data: self.data.sum_axis(Axis(axis)),
            unit: self.unit.clone(),
        })
    }

    /// The running total over the flattened data.
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
        Vector::new(data, &self.unit)
    }

    /// The running total along one axis, keeping the shape.
    pub fn cumsum_axis(&self, axis: isize) -> Result<Tensor> {
        let axis = self.normalized(axis)?;
        let mut data = self.data.clone();
        data.accumulate_axis_inplace(Axis(axis), |&previous, current| *current += previous);
        Ok(Self {
            data,
            unit: self.unit.clone(),
        })
    }

    /// Derivatives along every axis against unit spacing.
    pub fn gradient(&self) -> Result<Vec<Tensor>> {
        (0..self.ndim() as isize)
            .map(|axis| self.gradient_axis(axis))
            .collect()
    }

    /// Derivatives along every axis against a uniform measured step.
    pub fn gradient_step(&self, step: &Scalar) -> Result<Vec<Tensor>> {
        (0..self.ndim() as isize)
            .map(|axis| self.gradient_axis_step(axis, step))
            .collect()
    }

    /// The derivative along one axis against unit spacing.
    pub fn gradient_axis(&self, axis: isize) -> Result<Tensor> {
        self.lane_gradient(axis, 1.0, self.unit.clone())
    }

    /// The derivative along one axis against a uniform measured step.
    pub fn gradient_axis_step(&self, axis: isize, step: &Scalar) -> Result<Tensor> {
        self.lane_gradient(axis, step.data(), &self.unit / step.unit())
    }

    /// The derivative along one axis against explicit coordinates.
    pub fn gradient_axis_points(&self, axis: isize, coordinates: &Vector) -> Result<Tensor> {
        let axis = self.normalized(axis)?;
        let extent = self.data.len_of(Axis(axis));
        self.sampled(extent)?;
        if coordinates.len() != extent {
            return Err(Error::ShapeMismatch {
                left: vec![extent],
                right: vec![coordinates.len()],
            });
        }
        let points = coordinates.data().to_vec();
        let mut data = self.data.clone();
        Zip::from(data.lanes_mut(Axis(axis)))
            .and(self.data.lanes(Axis(axis)))
            .for_each(|mut out, lane| {
                let values = data::gradient_spaced(&lane.to_vec(), &points);
                for (slot, value) in out.iter_mut().zip(values) {
                    *slot = value;
                }
            });
        Ok(Self {
            data,
            unit: &self.unit / coordinates.unit(),
        })
    }

    fn lane_gradient(&self, axis: isize, step: f64, unit: Unit) -> Result<Tensor> {
        let axis = self.normalized(axis)?;
        self.sampled(self.data.len_of(Axis(axis)))?;
        let mut data = self.data.clone();
        Zip::from(data.lanes_mut(Axis(axis)))
            .and(self.data.lanes(Axis(axis)))
            .for_each(|mut out, lane| {
                let values = data::gradient_uniform(&lane.to_vec(), step);
                for (slot, value) in out.iter_mut().zip(values) {
                    *slot = value;
                }
            });
        Ok(Self { data, unit })
    }

    /// The trapezoidal integral along one axis (the last by default),
    /// dropping that axis.
    pub fn trapz(&self, axis: Option<isize>) -> Result<Tensor> {
        let axis = self.normalized(axis.unwrap_or(-1))?;
        self.sampled(self.data.len_of(Axis(axis)))?;
        let data = self
            .data
            .map_axis(Axis(axis), |lane| trapz_lane(&lane.to_vec()));
        Ok(Self {
            data,
            unit: self.unit.clone(),
        })
    }

    /// Reorders the axes; `None` reverses them.
    pub fn transpose(&self, order: Option<&[usize]>) -> Result<Tensor> {
        let data = match order {
            None => self.data.t().to_owned(),
            Some(order) => {
                if !data::is_permutation(order, self.ndim()) {
                    return Err(IndexError::Type(format!(
                        "{:?} does not permute {} axes",
                        order,
                        self.ndim()
                    ))
                    .into());
                }
                self.data.clone().permuted_axes(order).to_owned()
            }
        };
        Ok(Self {
            data,
            unit: self.unit.clone(),
        })
    }

    fn normalized(&self, axis: isize) -> Result<usize> {
        let ndim = self.ndim() as isize;
        let wrapped = if axis < 0 { axis + ndim } else { axis };
        if wrapped < 0 || wrapped >= ndim {
            return Err(Error::OutOfBounds {
                index: vec![axis.unsigned_abs()],
                shape: self.shape().to_vec(),
            });
        }
        Ok(wrapped as usize)
    }

    fn sampled(&self, extent: usize) -> Result<()> {
        if extent < 2 {
            return Err(Error::TooFewSamples {
                needed: 2,
                got: extent,
            });
        }
        Ok(())
    }
}

fn wrap(position: isize, extent: usize) -> isize {
    if position < 0 {
        position + extent as isize
    } else {
        position
    }
}

fn clip(position: isize, extent: usize) -> isize {
    position.clamp(0, extent as isize)
}

fn modulo(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}

/// The trapezoidal sum over one lane against unit spacing.
fn trapz_lane(values: &[f64]) -> f64 {
    values.windows(2).map(|pair| (pair[0] + pair[1]) / 2.0).sum()
}

/// Broadcasts both operands onto their joint shape.
fn broadcast_pair(left: &ArrayD<f64>, right: &ArrayD<f64>) -> Result<(ArrayD<f64>, ArrayD<f64>)> {
    let shape = data::broadcast_shape(left.shape(), right.shape())?;
    let mismatch = || Error::ShapeMismatch {
        left: left.shape().to_vec(),
        right: right.shape().to_vec(),
    };
    let a = left
        .broadcast(IxDyn(&shape))
        .ok_or_else(mismatch)?
        .to_owned();
    let b = right
        .broadcast(IxDyn(&shape))
        .ok_or_else(mismatch)?
        .to_owned();
    Ok((a, b))
}

impl Measurable for Tensor {
    fn measure(&self) -> Result<Measurement> {
        Measurement::try_new(self.data.iter().copied().collect(), &self.unit)
    }
}

impl IndexLike for Tensor {
    fn index_values(&self) -> std::result::Result<Vec<i64>, IndexError> {
        Err(IndexError::Type(
            "measured data are not index-like".to_string(),
        ))
    }
}

impl From<&Scalar> for Tensor {
    fn from(scalar: &Scalar) -> Self {
        Self {
            data: Array1::from(vec![scalar.data()]).into_dyn(),
            unit: scalar.unit().clone(),
        }
    }
}

impl From<&Vector> for Tensor {
    fn from(vector: &Vector) -> Self {
        Self {
            data: vector.data().clone().into_dyn(),
            unit: vector.unit().clone(),
        }
    }
}

macro_rules! delegated {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait for &Tensor {
            type Output = Tensor;

            fn $method(self, rhs: &Tensor) -> Tensor {
                match self.$checked(rhs) {
                    Ok(tensor) => tensor,
                    Err(error) => panic!("{}", error),
                }
            }
        }
    };
}

delegated!(Add, add, try_add);
delegated!(Sub, sub, try_sub);
delegated!(Mul, mul, try_mul);
delegated!(Div, div, try_div);
delegated!(Rem, rem, try_rem);

impl Mul<f64> for &Tensor {
    type Output = Tensor;

    fn mul(self, rhs: f64) -> Tensor {
        self.map(|x| x * rhs)
    }
}

impl Div<f64> for &Tensor {
    type Output = Tensor;

    fn div(self, rhs: f64) -> Tensor {
        self.map(|x| x / rhs)
    }
}

impl Mul<&Tensor> for f64 {
    type Output = Tensor;

    fn mul(self, rhs: &Tensor) -> Tensor {
        rhs.map(|x| self * x)
    }
}

impl Div<&Tensor> for f64 {
    type Output = Tensor;

    fn div(self, rhs: &Tensor) -> Tensor {
        Tensor {
            data: rhs.data.mapv(|x| self / x),
            unit: rhs.unit.powi(-1),
        }
    }
}

impl Mul<&Scalar> for &Tensor {
    type Output = Tensor;

    fn mul(self, rhs: &Scalar) -> Tensor {
        Tensor {
            data: self.data.mapv(|x| x * rhs.data()),
            unit: &self.unit * rhs.unit(),
        }
    }
}

impl Div<&Scalar> for &Tensor {
    type Output = Tensor;

    fn div(self, rhs: &Scalar) -> Tensor {
        Tensor {
            data: self.data.mapv(|x| x / rhs.data()),
            unit: &self.unit / rhs.unit(),
        }
    }
}

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        self.map(|x| -x)
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.data, self.unit)
    }
}
