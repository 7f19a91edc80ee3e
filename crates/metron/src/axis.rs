//! Axes over array dimensions.
//!
//! An axis pairs the values along one dimension with their original
//! positions, so that a sliced axis still reports indices into its
//! parent. Three flavors cover the use cases: integral [`Points`],
//! string [`Symbols`], and measured [`Coordinates`].

use std::fmt;
use std::ops::{BitOr, Range};

use itertools::Itertools;
use thiserror::Error;

use crate::data::{nearest_bounded, Bound};
use crate::error::Result;
use crate::indexer::{self, Sequence};
use crate::measured::Measurement;
use crate::metric::{Unit, UnitLike};

const RTOL: f64 = 1e-5;
const ATOL: f64 = 1e-8;

/// Relative-tolerance float comparison for coordinate lookups.
fn isclose(a: f64, b: f64) -> bool {
    (a - b).abs() <= ATOL + RTOL * b.abs()
}

/// Ways axis construction and lookups can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AxisError {
    /// No element of the axis matches the requested value.
    #[error("value {0} is not on the axis")]
    MissingValue(String),

    /// No element of the axis matches the requested label.
    #[error("label '{0}' is not on the axis")]
    MissingLabel(String),

    /// A positional lookup fell off the axis.
    #[error("index {index} is out of range for axis of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// Unions only exist between axes of the same flavor.
    #[error("cannot unite {0} and {1} axes")]
    Flavor(&'static str, &'static str),

    /// The operands do not merge into one ordering.
    #[error("axes do not merge: {0}")]
    Merge(String),
}

/// Which neighbor an inexact coordinate lookup should take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Closest {
    /// The nearest element at or below the target.
    Lower,
    /// The nearest element at or above the target.
    Upper,
}

/// Merges two orderings, inserting unique right-hand entries before
/// the next shared entry. `None` when the shared entries disagree on
/// their relative order.
fn merge_ordered_by<T, F>(left: &[T], right: &[T], eq: F) -> Option<Vec<T>>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    let contains = |haystack: &[T], needle: &T| haystack.iter().any(|x| eq(x, needle));
    let shared_left: Vec<&T> = left.iter().filter(|x| contains(right, x)).collect();
    let shared_right: Vec<&T> = right.iter().filter(|x| contains(left, x)).collect();
    if shared_left.len() != shared_right.len()
        || !shared_left
            .iter()
            .zip(&shared_right)
            .all(|(a, b)| eq(a, b))
    {
        return None;
    }
    let mut merged: Vec<T> = left.to_vec();
    for (i, x) in right.iter().enumerate() {
        if contains(&merged, x) {
            continue;
        }
        let anchor = right[i + 1..]
            .iter()
            .find_map(|later| merged.iter().position(|m| eq(m, later)));
        match anchor {
            Some(position) => merged.insert(position, x.clone()),
            None => merged.push(x.clone()),
        }
    }
    Some(merged)
}

/// An axis of integral point values.
#[derive(Clone, Debug)]
pub struct Points {
    data: Vec<i64>,
    indices: Sequence,
}

impl Points {
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let data: Vec<i64> = values.into_iter().collect();
        let indices = (0..data.len() as i64).collect();
        Self { data, indices }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    pub fn get(&self, index: usize) -> Option<i64> {
        self.data.get(index).copied()
    }

    /// The original position of every element.
    pub fn indices(&self) -> &Sequence {
        &self.indices
    }

    /// The original position of `target`.
    pub fn index(&self, target: i64) -> Result<indexer::Value> {
        let position = self
            .data
            .iter()
            .position(|&x| x == target)
            .ok_or_else(|| AxisError::MissingValue(target.to_string()))?;
        Ok(self.position_value(position))
    }

    /// The subaxis over `range`, retaining parent indices.
    pub fn slice(&self, range: Range<usize>) -> Points {
        Points {
            data: self.data[range.clone()].to_vec(),
            indices: self.indices.slice(range),
        }
    }

    /// The single-element subaxis at `index`.
    pub fn at(&self, index: usize) -> Result<Points> {
        if index >= self.len() {
            return Err(AxisError::OutOfRange {
                index,
                len: self.len(),
            }
            .into());
        }
        Ok(self.slice(index..index + 1))
    }

    /// Merges two point axes into one ordering.
    pub fn try_union(&self, other: &Points) -> Result<Points> {
        let merged = merge_ordered_by(&self.data, &other.data, |a, b| a == b)
            .ok_or_else(|| AxisError::Merge(format!("{} | {}", self, other)))?;
        Ok(Points::new(merged))
    }

    fn position_value(&self, position: usize) -> indexer::Value {
        self.indices
            .get(position)
            .unwrap_or_else(|| panic!("axis index bookkeeping out of sync"))
    }
}

/// Point-axis equality ignores positional bookkeeping.
impl PartialEq for Points {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.data.iter().format(", "))
    }
}

/// An axis of string labels.
#[derive(Clone, Debug)]
pub struct Symbols {
    data: Vec<String>,
    indices: Sequence,
}

impl Symbols {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let data: Vec<String> = labels.into_iter().map(Into::into).collect();
        let indices = (0..data.len() as i64).collect();
        Self { data, indices }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[String] {
        &self.data
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.data.get(index).map(String::as_str)
    }

    pub fn indices(&self) -> &Sequence {
        &self.indices
    }

    /// The original position of `label`.
    pub fn index(&self, label: &str) -> Result<indexer::Value> {
        let position = self
            .data
            .iter()
            .position(|x| x == label)
            .ok_or_else(|| AxisError::MissingLabel(label.to_string()))?;
        Ok(self.position_value(position))
    }

    pub fn slice(&self, range: Range<usize>) -> Symbols {
        Symbols {
            data: self.data[range.clone()].to_vec(),
            indices: self.indices.slice(range),
        }
    }

    pub fn at(&self, index: usize) -> Result<Symbols> {
        if index >= self.len() {
            return Err(AxisError::OutOfRange {
                index,
                len: self.len(),
            }
            .into());
        }
        Ok(self.slice(index..index + 1))
    }

    pub fn try_union(&self, other: &Symbols) -> Result<Symbols> {
        let merged = merge_ordered_by(&self.data, &other.data, |a, b| a == b)
            .ok_or_else(|| AxisError::Merge(format!("{} | {}", self, other)))?;
        Ok(Symbols::new(merged))
    }

    fn position_value(&self, position: usize) -> indexer::Value {
        self.indices
            .get(position)
            .unwrap_or_else(|| panic!("axis index bookkeeping out of sync"))
    }
}

impl PartialEq for Symbols {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl fmt::Display for Symbols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.data.iter().format(", "))
    }
}

/// An axis of measured coordinate values.
#[derive(Clone, Debug)]
pub struct Coordinates {
    data: Vec<f64>,
    unit: Unit,
    indices: Sequence,
}

impl Coordinates {
    /// Creates a coordinate axis.
    ///
    /// Panics when `unit` does not parse; [`Coordinates::try_new`] is
    /// the checked form.
    pub fn new(values: Vec<f64>, unit: impl UnitLike) -> Self {
        match Self::try_new(values, unit) {
            Ok(axis) => axis,
            Err(error) => panic!("{error}"),
        }
    }

    pub fn try_new(values: Vec<f64>, unit: impl UnitLike) -> Result<Self> {
        let unit = unit.into_unit()?;
        let indices = (0..values.len() as i64).collect();
        Ok(Self {
            data: values,
            unit,
            indices,
        })
    }

    pub fn from_measurement(measurement: &Measurement) -> Self {
        let indices = (0..measurement.len() as i64).collect();
        Self {
            data: measurement.data().to_vec(),
            unit: measurement.unit().clone(),
            indices,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn indices(&self) -> &Sequence {
        &self.indices
    }

    /// The original position of `target`, taken in the axis unit.
    ///
    /// The match tolerates relative floating-point error; anything
    /// farther off is an error.
    pub fn index(&self, target: f64) -> Result<indexer::Value> {
        let position = self
            .data
            .iter()
            .position(|&x| isclose(target, x))
            .ok_or_else(|| self.missing(target))?;
        Ok(self.position_value(position))
    }

    /// The original position of the nearest element at or beyond the
    /// target, per `closest`.
    pub fn index_closest(&self, target: f64, closest: Closest) -> Result<indexer::Value> {
        let values = ndarray::Array1::from_vec(self.data.clone());
        let bound = match closest {
            Closest::Lower => Bound::Upper,
            Closest::Upper => Bound::Lower,
        };
        let found = nearest_bounded(&values, target, bound)?;
        Ok(self.position_value(found.index[0]))
    }

    /// The original positions of measured targets, converted into the
    /// axis unit first.
    pub fn index_measured(&self, targets: &Measurement) -> Result<Sequence> {
        let converted = targets.withunit(&self.unit)?;
        let mut positions = Vec::with_capacity(converted.len());
        for target in converted.iter() {
            positions.push(self.index(*target)?.data());
        }
        Ok(Sequence::from(positions))
    }

    /// Rescales the axis to `unit`, retaining parent indices.
    pub fn withunit(&self, unit: impl UnitLike) -> Result<Coordinates> {
        let target = unit.into_unit()?;
        let factor = self.unit.factor_to(&target)?;
        Ok(Coordinates {
            data: self.data.iter().map(|x| x * factor).collect(),
            unit: target,
            indices: self.indices.clone(),
        })
    }

    pub fn slice(&self, range: Range<usize>) -> Coordinates {
        Coordinates {
            data: self.data[range.clone()].to_vec(),
            unit: self.unit.clone(),
            indices: self.indices.slice(range),
        }
    }

    pub fn at(&self, index: usize) -> Result<Coordinates> {
        if index >= self.len() {
            return Err(AxisError::OutOfRange {
                index,
                len: self.len(),
            }
            .into());
        }
        Ok(self.slice(index..index + 1))
    }

    /// Merges two coordinate axes after converting the right operand
    /// into the left operand's unit.
    pub fn try_union(&self, other: &Coordinates) -> Result<Coordinates> {
        let converted = other.withunit(&self.unit)?;
        let merged = merge_ordered_by(&self.data, &converted.data, |a, b| isclose(*a, *b))
            .ok_or_else(|| AxisError::Merge(format!("{} | {}", self, other)))?;
        Coordinates::try_new(merged, &self.unit)
    }

    fn missing(&self, target: f64) -> crate::error::Error {
        AxisError::MissingValue(format!("{} [{}]", target, self.unit)).into()
    }

    fn position_value(&self, position: usize) -> indexer::Value {
        self.indices
            .get(position)
            .unwrap_or_else(|| panic!("axis index bookkeeping out of sync"))
    }
}

/// Coordinate equality compares values in a common unit.
impl PartialEq for Coordinates {
    fn eq(&self, other: &Self) -> bool {
        if self.unit != other.unit || self.data.len() != other.data.len() {
            return false;
        }
        self.data
            .iter()
            .zip(&other.data)
            .all(|(a, b)| isclose(*a, *b))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] [{}]", self.data.iter().format(", "), self.unit)
    }
}

/// Any of the three axis flavors.
#[derive(Clone, Debug, PartialEq)]
pub enum Axis {
    Points(Points),
    Symbols(Symbols),
    Coordinates(Coordinates),
}

impl Axis {
    pub fn len(&self) -> usize {
        match self {
            Axis::Points(axis) => axis.len(),
            Axis::Symbols(axis) => axis.len(),
            Axis::Coordinates(axis) => axis.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn indices(&self) -> &Sequence {
        match self {
            Axis::Points(axis) => axis.indices(),
            Axis::Symbols(axis) => axis.indices(),
            Axis::Coordinates(axis) => axis.indices(),
        }
    }

    pub fn slice(&self, range: Range<usize>) -> Axis {
        match self {
            Axis::Points(axis) => Axis::Points(axis.slice(range)),
            Axis::Symbols(axis) => Axis::Symbols(axis.slice(range)),
            Axis::Coordinates(axis) => Axis::Coordinates(axis.slice(range)),
        }
    }

    pub fn at(&self, index: usize) -> Result<Axis> {
        match self {
            Axis::Points(axis) => Ok(Axis::Points(axis.at(index)?)),
            Axis::Symbols(axis) => Ok(Axis::Symbols(axis.at(index)?)),
            Axis::Coordinates(axis) => Ok(Axis::Coordinates(axis.at(index)?)),
        }
    }

    pub(crate) fn flavor(&self) -> &'static str {
        match self {
            Axis::Points(_) => "points",
            Axis::Symbols(_) => "symbols",
            Axis::Coordinates(_) => "coordinates",
        }
    }

    /// Merges two axes of the same flavor.
    pub fn try_union(&self, other: &Axis) -> Result<Axis> {
        match (self, other) {
            (Axis::Points(a), Axis::Points(b)) => Ok(Axis::Points(a.try_union(b)?)),
            (Axis::Symbols(a), Axis::Symbols(b)) => Ok(Axis::Symbols(a.try_union(b)?)),
            (Axis::Coordinates(a), Axis::Coordinates(b)) => {
                Ok(Axis::Coordinates(a.try_union(b)?))
            }
            _ => Err(AxisError::Flavor(self.flavor(), other.flavor()).into()),
        }
    }

    /// True for a single-element integral axis, which reductions and
    /// merges may treat as a placeholder.
    pub fn is_singular_points(&self) -> bool {
        matches!(self, Axis::Points(axis) if axis.len() == 1)
    }
}

impl From<Points> for Axis {
    fn from(axis: Points) -> Self {
        Axis::Points(axis)
    }
}

impl From<Symbols> for Axis {
    fn from(axis: Symbols) -> Self {
        Axis::Symbols(axis)
    }
}

impl From<Coordinates> for Axis {
    fn from(axis: Coordinates) -> Self {
        Axis::Coordinates(axis)
    }
}

/// Axis union. Panics when the operands do not merge;
/// [`Axis::try_union`] is the checked form.
impl BitOr for &Axis {
    type Output = Axis;

    fn bitor(self, rhs: &Axis) -> Axis {
        match self.try_union(rhs) {
            Ok(merged) => merged,
            Err(error) => panic!("{error}"),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Points(axis) => axis.fmt(f),
            Axis::Symbols(axis) => axis.fmt(f),
            Axis::Coordinates(axis) => axis.fmt(f),
        }
    }
}
