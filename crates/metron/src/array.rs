//! Labelled n-dimensional measured arrays.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use ndarray::{Array1, ArrayD, Axis as NdAxis, IxDyn, SliceInfoElem, Zip};

use crate::axes::{Axes, AxesError};
use crate::axis::{Axis, AxisError};
use crate::data::{self, Dimensions};
use crate::error::{Error, Result};
use crate::indexer::{self, IndexError, IndexLike, IndexSpec};
use crate::measurable::Measurable;
use crate::measured::Measurement;
use crate::metric::{Unit, UnitLike};
use crate::scalar::Scalar;
use crate::symbolic::{Exponent, SymbolicError};
use crate::tensor::Tensor;
use crate::vector::Vector;

/// An n-dimensional block of values with a unit and named, labelled
/// dimensions.
///
/// Additive operations require identical units and equal or nested
/// dimension sets; operands remesh by dimension name before their
/// shapes broadcast. Multiplicative operations combine units and
/// remesh onto the union of both operands' dimensions. Operator impls
/// panic with the underlying error message; the `try_*` methods are
/// the checked path.
#[derive(Clone, Debug, PartialEq)]
pub struct Array {
    data: data::Array,
    unit: Unit,
    axes: Axes,
}

impl Array {
    /// An array over explicit axes.
    ///
    /// Panics when the pieces are inconsistent; [`Array::try_new`] is
    /// the checked form.
    pub fn new(values: ArrayD<f64>, unit: impl UnitLike, axes: Axes) -> Self {
        match Self::try_new(values, unit, axes) {
            Ok(array) => array,
            Err(error) => panic!("{}", error),
        }
    }

    /// Builds an array, checking that the axes match the value shape.
    pub fn try_new(values: ArrayD<f64>, unit: impl UnitLike, axes: Axes) -> Result<Self> {
        if axes.shape() != values.shape() {
            return Err(Error::ShapeMismatch {
                left: values.shape().to_vec(),
                right: axes.shape(),
            });
        }
        let data = data::Array::try_new(values, axes.dimensions())?;
        Ok(Self {
            data,
            unit: unit.into_unit()?,
            axes,
        })
    }

    /// A unitless array over trivial integral axes.
    pub fn try_from_values(values: ArrayD<f64>) -> Result<Self> {
        let axes = Axes::try_from_shape(values.shape())?;
        Self::try_new(values, Unit::one(), axes)
    }

    /// An array over trivial integral axes.
    pub fn try_with_unit(values: ArrayD<f64>, unit: impl UnitLike) -> Result<Self> {
        let axes = Axes::try_from_shape(values.shape())?;
        Self::try_new(values, unit, axes)
    }

    /// An array over trivial integral axes with the given dimension
    /// names.
    pub fn try_with_dimensions(
        values: ArrayD<f64>,
        unit: impl UnitLike,
        names: &[&str],
    ) -> Result<Self> {
        let axes = Axes::try_from_shape_dims(values.shape(), names)?;
        Self::try_new(values, unit, axes)
    }

    /// Wraps a tensor, carrying its unit over.
    pub fn try_from_tensor(tensor: &Tensor, axes: Option<Axes>) -> Result<Self> {
        let axes = match axes {
            Some(axes) => axes,
            None => Axes::try_from_shape(tensor.shape())?,
        };
        Self::try_new(tensor.data().clone(), tensor.unit(), axes)
    }

    /// Wraps a raw tensor and assigns a unit.
    ///
    /// A tensor that already carries a unit cannot take another one
    /// ([`Error::AlreadyMeasured`]).
    pub fn try_from_tensor_with_unit(
        tensor: &Tensor,
        unit: impl UnitLike,
        axes: Option<Axes>,
    ) -> Result<Self> {
        if !tensor.is_unitless() {
            return Err(Error::AlreadyMeasured { what: "unit" });
        }
        let axes = match axes {
            Some(axes) => axes,
            None => Axes::try_from_shape(tensor.shape())?,
        };
        Self::try_new(tensor.data().clone(), unit, axes)
    }

    /// Measures loose input into a one-dimensional array.
    pub fn from_measured<M: Measurable + ?Sized>(input: &M) -> Result<Self> {
        let measurement = input.measure()?;
        let values = Array1::from(measurement.data().to_vec()).into_dyn();
        let axes = Axes::try_from_shape(values.shape())?;
        Self::try_new(values, measurement.unit(), axes)
    }

    pub fn data(&self) -> &data::Array {
        &self.data
    }

    pub fn values(&self) -> &ArrayD<f64> {
        self.data.values()
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn is_unitless(&self) -> bool {
        self.unit.is_one()
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn dimensions(&self) -> &Dimensions {
        self.data.dimensions()
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn size(&self) -> usize {
        self.data.values().len()
    }

    /// The element at a full position.
    pub fn at(&self, index: &[usize]) -> Result<Scalar> {
        let value = self.data.get(index).ok_or(Error::OutOfBounds {
            index: index.to_vec(),
            shape: self.shape().to_vec(),
        })?;
        Ok(Scalar::new(value, &self.unit))
    }

    /// Applies a subscript, slicing the axes together with the values.
    ///
    /// Integer entries remove their dimension and its axis; ranges
    /// keep the dimension and slice its axis. Labelled arrays slice
    /// with unit step only, and a subscript must leave at least one
    /// dimension (full positions go through [`Array::at`]).
    pub fn select(&self, spec: &[IndexSpec]) -> Result<Array> {
        let expanded = indexer::expand(self.ndim(), spec)?;
        let mut elements = Vec::with_capacity(expanded.len());
        let mut kept: Vec<(String, Axis)> = Vec::new();
        let mut position = 0usize;
        for entry in &expanded {
            match *entry {
                IndexSpec::At(index) => {
                    let extent = self.shape()[position];
                    let wrapped = wrap(index, extent);
                    if wrapped < 0 || wrapped as usize >= extent {
                        return Err(Error::OutOfBounds {
                            index: vec![index.unsigned_abs()],
                            shape: self.shape().to_vec(),
                        });
                    }
                    elements.push(SliceInfoElem::Index(wrapped));
                    position += 1;
                }
                IndexSpec::Range { start, stop, step } => {
                    if step != 1 {
                        return Err(IndexError::Type(
                            "labelled arrays slice with unit step".to_string(),
                        )
                        .into());
                    }
                    let extent = self.shape()[position];
                    let begin = clip(start.map_or(0, |s| wrap(s, extent)), extent) as usize;
                    let end = stop.map_or(extent, |s| clip(wrap(s, extent), extent) as usize);
                    let end = end.max(begin);
                    elements.push(SliceInfoElem::Slice {
                        start: begin as isize,
                        end: Some(end as isize),
                        step: 1,
                    });
                    let name = self.dimensions()[position].to_string();
                    let axis = self.axes[name.as_str()].slice(begin..end);
                    kept.push((name, axis));
                    position += 1;
                }
                IndexSpec::All => {
                    elements.push(SliceInfoElem::Slice {
                        start: 0,
                        end: None,
                        step: 1,
                    });
                    let name = self.dimensions()[position].to_string();
                    kept.push((name.clone(), self.axes[name.as_str()].clone()));
                    position += 1;
                }
                IndexSpec::NewAxis => {
                    return Err(IndexError::Type(
                        "labelled arrays cannot insert axes by subscript".to_string(),
                    )
                    .into());
                }
                IndexSpec::Ellipsis => {}
            }
        }
        let values = self.values().slice(elements.as_slice()).to_owned();
        let axes = Axes::try_from_pairs(kept)?;
        Self::try_new(values, &self.unit, axes)
    }

    /// Converts to a unit with the same dimension, rescaling the data.
    pub fn withunit(&self, unit: impl UnitLike) -> Result<Self> {
        let target = unit.into_unit()?;
        let factor = self.unit.factor_to(&target)?;
        Self::try_new(
            self.values().mapv(|x| x * factor),
            target,
            self.axes.clone(),
        )
    }

    pub fn abs(&self) -> Self {
        self.map(f64::abs)
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: data::Array::new(self.values().mapv(&f), self.dimensions().clone()),
            unit: self.unit.clone(),
            axes: self.axes.clone(),
        }
    }

    pub fn try_add(&self, other: &Array) -> Result<Self> {
        self.matching(other)?;
        self.additive(other, |a, b| a + b)
    }

    pub fn try_sub(&self, other: &Array) -> Result<Self> {
        self.matching(other)?;
        self.additive(other, |a, b| a - b)
    }

    fn additive(&self, other: &Array, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        let merged = self.dimensions().try_union(other.dimensions())?;
        if merged != *self.dimensions() && merged != *other.dimensions() {
            return Err(Error::DimensionMismatch {
                left: self.dimensions().to_string(),
                right: other.dimensions().to_string(),
            });
        }
        self.remeshed(other, f, self.unit.clone())
    }

    pub fn try_mul(&self, other: &Array) -> Result<Self> {
        self.remeshed(other, |a, b| a * b, &self.unit * &other.unit)
    }

    pub fn try_div(&self, other: &Array) -> Result<Self> {
        self.remeshed(other, |a, b| a / b, &self.unit / &other.unit)
    }

    fn remeshed(&self, other: &Array, f: impl Fn(f64, f64) -> f64, unit: Unit) -> Result<Self> {
        let (left, right, _) = data::remesh(&self.data, &other.data)?;
        let values = Zip::from(&left).and(&right).map_collect(|&a, &b| f(a, b));
        let axes = self.axes.try_add(&other.axes)?;
        Self::try_new(values, unit, axes)
    }

    fn matching(&self, other: &Array) -> Result<()> {
        if self.unit != other.unit {
            return Err(Error::unit_mismatch(&self.unit, &other.unit));
        }
        Ok(())
    }

    pub fn lt(&self, other: &Array) -> Result<ArrayD<bool>> {
        self.compare(other, |a, b| a < b)
    }

    pub fn le(&self, other: &Array) -> Result<ArrayD<bool>> {
        self.compare(other, |a, b| a <= b)
    }

    pub fn gt(&self, other: &Array) -> Result<ArrayD<bool>> {
        self.compare(other, |a, b| a > b)
    }

    pub fn ge(&self, other: &Array) -> Result<ArrayD<bool>> {
        self.compare(other, |a, b| a >= b)
    }

    /// Elementwise order comparison; requires identical units and
    /// dimensions, with shapes that broadcast.
    fn compare(&self, other: &Array, f: impl Fn(f64, f64) -> bool) -> Result<ArrayD<bool>> {
        self.matching(other)?;
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                left: self.dimensions().to_string(),
                right: other.dimensions().to_string(),
            });
        }
        let shape = data::broadcast_shape(self.shape(), other.shape())?;
        let mismatch = || Error::ShapeMismatch {
            left: self.shape().to_vec(),
            right: other.shape().to_vec(),
        };
        let left = self
            .values()
            .broadcast(IxDyn(&shape))
            .ok_or_else(mismatch)?
            .to_owned();
        let right = other
            .values()
            .broadcast(IxDyn(&shape))
            .ok_or_else(mismatch)?
            .to_owned();
        Ok(Zip::from(&left).and(&right).map_collect(|&a, &b| f(a, b)))
    }

    pub fn powi(&self, exponent: i32) -> Self {
        Self {
            data: data::Array::new(
                self.values().mapv(|x| x.powi(exponent)),
                self.dimensions().clone(),
            ),
            unit: self.unit.powi(exponent),
            axes: self.axes.clone(),
        }
    }

    pub fn try_powf(&self, exponent: f64) -> Result<Self> {
        let k = Exponent::approximate_float(exponent)
            .ok_or_else(|| SymbolicError::Exponent(exponent.to_string()))?;
        Self::try_new(
            self.values().mapv(|x| x.powf(exponent)),
            self.unit.powr(k),
            self.axes.clone(),
        )
    }

    /// Elementwise exponentiation; both operands must be unitless and
    /// share dimensions.
    pub fn try_pow(&self, exponent: &Array) -> Result<Self> {
        for array in [self, exponent] {
            if !array.unit.is_one() {
                return Err(Error::NotUnitless {
                    unit: array.unit.to_string(),
                });
            }
        }
        if self.dimensions() != exponent.dimensions() {
            return Err(Error::DimensionMismatch {
                left: self.dimensions().to_string(),
                right: exponent.dimensions().to_string(),
            });
        }
        self.remeshed(exponent, |a, b| a.powf(b), Unit::one())
    }

    pub fn sqrt(&self) -> Self {
        Self {
            data: data::Array::new(self.values().mapv(f64::sqrt), self.dimensions().clone()),
            unit: self.unit.sqrt(),
            axes: self.axes.clone(),
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
        Self::try_new(self.values().mapv(&f), Unit::one(), self.axes.clone())
    }

    fn dimensionless(&self, f: impl Fn(f64) -> f64) -> Result<Self> {
        if !self.unit.is_one() {
            return Err(Error::NotUnitless {
                unit: self.unit.to_string(),
            });
        }
        Self::try_new(self.values().mapv(&f), Unit::one(), self.axes.clone())
    }

    /// Drops every singular dimension and its axis.
    ///
    /// A fully singular array has no dimensions left to keep; collapse
    /// it through [`Array::scalar`] instead.
    pub fn squeeze(&self) -> Result<Array> {
        let mut values = self.values().clone();
        let mut kept = Vec::new();
        for (position, &extent) in self.shape().iter().enumerate() {
            if extent != 1 {
                let name = self.dimensions()[position].to_string();
                kept.push((name.clone(), self.axes[name.as_str()].clone()));
            }
        }
        while let Some(position) = values.shape().iter().position(|&n| n == 1) {
            values = values.remove_axis(NdAxis(position));
        }
        let axes = Axes::try_from_pairs(kept)?;
        Self::try_new(values, &self.unit, axes)
    }

    /// Collapses a single-element array; anything larger is
    /// [`Error::NotSingular`].
    pub fn scalar(&self) -> Result<Scalar> {
        if self.size() != 1 {
            return Err(Error::NotSingular { size: self.size() });
        }
        let value = self.values().iter().copied().next().ok_or(Error::Empty)?;
        Ok(Scalar::new(value, &self.unit))
    }

    pub fn mean(&self) -> Result<Scalar> {
        let mean = self.values().mean().ok_or(Error::Empty)?;
        Ok(Scalar::new(mean, &self.unit))
    }

    pub fn sum(&self) -> Scalar {
        Scalar::new(self.values().sum(), &self.unit)
    }

    /// The mean along one dimension, dropping it from the axes.
    pub fn mean_axis(&self, axis: isize) -> Result<Array> {
        let position = self.normalized(axis)?;
        let values = self
            .values()
            .mean_axis(NdAxis(position))
            .ok_or(Error::Empty)?;
        self.reduced(values, position)
    }

    pub fn sum_axis(&self, axis: isize) -> Result<Array> {
        let position = self.normalized(axis)?;
        let values = self.values().sum_axis(NdAxis(position));
        self.reduced(values, position)
    }

    /// The running total over the flattened values.
    pub fn cumsum(&self) -> Vector {
        let mut total = 0.0;
        let data: Vec<f64> = self
            .values()
            .iter()
            .map(|&x| {
                total += x;
                total
            })
            .collect();
        Vector::new(data, &self.unit)
    }

    /// The running total along one dimension, keeping the shape.
    pub fn cumsum_axis(&self, axis: isize) -> Result<Array> {
        let position = self.normalized(axis)?;
        let mut values = self.values().clone();
        values.accumulate_axis_inplace(NdAxis(position), |&previous, current| {
            *current += previous
        });
        Self::try_new(values, &self.unit, self.axes.clone())
    }

    /// Derivatives along every dimension against unit spacing.
    pub fn gradient(&self) -> Result<Vec<Array>> {
        (0..self.ndim() as isize)
            .map(|axis| self.gradient_axis(axis))
            .collect()
    }

    /// Derivatives along every dimension against a uniform measured
    /// step.
    pub fn gradient_step(&self, step: &Scalar) -> Result<Vec<Array>> {
        (0..self.ndim() as isize)
            .map(|axis| self.gradient_axis_step(axis, step))
            .collect()
    }

    /// The derivative along one dimension against unit spacing.
    pub fn gradient_axis(&self, axis: isize) -> Result<Array> {
        let tensor = self.tensor().gradient_axis(axis)?;
        Self::try_new(tensor.data().clone(), tensor.unit(), self.axes.clone())
    }

    /// The derivative along one dimension against a uniform measured
    /// step; the step's unit divides the result.
    pub fn gradient_axis_step(&self, axis: isize, step: &Scalar) -> Result<Array> {
        let tensor = self.tensor().gradient_axis_step(axis, step)?;
        Self::try_new(tensor.data().clone(), tensor.unit(), self.axes.clone())
    }

    /// The derivative along one dimension against explicit
    /// coordinates.
    pub fn gradient_axis_points(&self, axis: isize, coordinates: &Vector) -> Result<Array> {
        let tensor = self.tensor().gradient_axis_points(axis, coordinates)?;
        Self::try_new(tensor.data().clone(), tensor.unit(), self.axes.clone())
    }

    /// The derivative along a named dimension, drawing spacing from
    /// its own axis.
    ///
    /// A coordinate axis supplies unit-aware spacing; an integral axis
    /// supplies its stored positions; a symbolic axis cannot space a
    /// derivative.
    pub fn gradient_along(&self, name: &str) -> Result<Array> {
        let position = self
            .axes
            .position(name)
            .ok_or_else(|| AxesError::Missing(name.to_string()))? as isize;
        match &self.axes[name] {
            Axis::Coordinates(coordinates) => {
                let spacing = Vector::new(coordinates.data().to_vec(), coordinates.unit());
                self.gradient_axis_points(position, &spacing)
            }
            Axis::Points(points) => {
                let spacing: Vec<f64> = points.data().iter().map(|&p| p as f64).collect();
                self.gradient_axis_points(position, &Vector::unitless(spacing))
            }
            Axis::Symbols(_) => Err(AxisError::Flavor("coordinates", "symbols").into()),
        }
    }

    /// The trapezoidal integral along one dimension (the last by
    /// default), dropping it.
    pub fn trapz(&self, axis: Option<isize>) -> Result<Array> {
        let position = self.normalized(axis.unwrap_or(-1))?;
        let tensor = self.tensor().trapz(Some(position as isize))?;
        let values = tensor.data().clone();
        self.reduced(values, position)
    }

    /// Reorders the dimensions by position; `None` reverses them.
    pub fn transpose(&self, order: Option<&[usize]>) -> Result<Array> {
        let data = self.data.transpose(order)?;
        let order = match order {
            Some(order) => order.to_vec(),
            None => (0..self.ndim()).rev().collect(),
        };
        let axes = self.axes.permute(&order)?;
        Ok(Self {
            data,
            unit: self.unit.clone(),
            axes,
        })
    }

    /// Reorders the dimensions by name.
    pub fn transpose_names(&self, names: &[&str]) -> Result<Array> {
        let data = self.data.transpose_names(names)?;
        let axes = self.axes.permute_names(names)?;
        Ok(Self {
            data,
            unit: self.unit.clone(),
            axes,
        })
    }

    /// The position of the stored coordinate nearest the target along
    /// a named dimension, converting the target's unit first.
    pub fn nearest(&self, name: &str, target: &Scalar) -> Result<indexer::Value> {
        let axis = self
            .axes
            .get(name)
            .ok_or_else(|| AxesError::Missing(name.to_string()))?;
        match axis {
            Axis::Coordinates(coordinates) => {
                let converted = target.withunit(coordinates.unit())?;
                let found = data::nearest(
                    &Array1::from(coordinates.data().to_vec()),
                    converted.data(),
                )?;
                let position = found.index.first().copied().ok_or(Error::Empty)?;
                coordinates
                    .indices()
                    .get(position)
                    .ok_or(Error::OutOfBounds {
                        index: vec![position],
                        shape: vec![coordinates.len()],
                    })
            }
            Axis::Points(_) | Axis::Symbols(_) => {
                Err(AxisError::Flavor("coordinates", axis.flavor()).into())
            }
        }
    }

    fn reduced(&self, values: ArrayD<f64>, position: usize) -> Result<Array> {
        let name = self.dimensions()[position].to_string();
        let axes = self.axes.try_without(&name)?;
        Self::try_new(values, &self.unit, axes)
    }

    fn tensor(&self) -> Tensor {
        Tensor::new(self.values().clone(), &self.unit)
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

impl Measurable for Array {
    fn measure(&self) -> Result<Measurement> {
        Measurement::try_new(self.values().iter().copied().collect(), &self.unit)
    }
}

impl IndexLike for Array {
    fn index_values(&self) -> std::result::Result<Vec<i64>, IndexError> {
        Err(IndexError::Type(
            "measured data are not index-like".to_string(),
        ))
    }
}

macro_rules! delegated {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait for &Array {
            type Output = Array;

            fn $method(self, rhs: &Array) -> Array {
                match self.$checked(rhs) {
                    Ok(array) => array,
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

impl Mul<f64> for &Array {
    type Output = Array;

    fn mul(self, rhs: f64) -> Array {
        self.map(|x| x * rhs)
    }
}

impl Div<f64> for &Array {
    type Output = Array;

    fn div(self, rhs: f64) -> Array {
        self.map(|x| x / rhs)
    }
}

impl Mul<&Array> for f64 {
    type Output = Array;

    fn mul(self, rhs: &Array) -> Array {
        rhs.map(|x| self * x)
    }
}

impl Div<&Array> for f64 {
    type Output = Array;

    fn div(self, rhs: &Array) -> Array {
        Array {
            data: data::Array::new(
                rhs.values().mapv(|x| self / x),
                rhs.dimensions().clone(),
            ),
            unit: rhs.unit.powi(-1),
            axes: rhs.axes.clone(),
        }
    }
}

impl Mul<&Scalar> for &Array {
    type Output = Array;

    fn mul(self, rhs: &Scalar) -> Array {
        Array {
            data: data::Array::new(
                self.values().mapv(|x| x * rhs.data()),
                self.dimensions().clone(),
            ),
            unit: &self.unit * rhs.unit(),
            axes: self.axes.clone(),
        }
    }
}

impl Div<&Scalar> for &Array {
    type Output = Array;

    fn div(self, rhs: &Scalar) -> Array {
        Array {
            data: data::Array::new(
                self.values().mapv(|x| x / rhs.data()),
                self.dimensions().clone(),
            ),
            unit: &self.unit / rhs.unit(),
            axes: self.axes.clone(),
        }
    }
}

impl Neg for &Array {
    type Output = Array;

    fn neg(self) -> Array {
        self.map(|x| -x)
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}]",
            self.values(),
            self.dimensions(),
            self.unit
        )
    }
}
