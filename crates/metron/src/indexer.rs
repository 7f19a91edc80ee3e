//! Integral index bookkeeping.
//!
//! Array subscripts are integral by nature. [`Value`] and [`Sequence`]
//! hold validated indices, [`IndexLike`] is the fallible conversion
//! from loose input, and [`expand`] normalizes subscripts against a
//! dimension count.

use std::fmt;
use std::ops::{Add, Bound, Div, Mul, Neg, Range, RangeBounds, Rem, Sub};

use itertools::Itertools;
use log::trace;
use thiserror::Error;

use crate::measurable::Input;

/// Ways index construction and subscript handling can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    /// The input does not reduce to integral indices.
    #[error("cannot interpret {0} as integral indices")]
    Type(String),

    /// Indices only support non-negative powers.
    #[error("cannot raise an index to the power {0}")]
    NegativePower(i64),

    /// A subscript does not fit the subscripted dimensions.
    #[error("cannot expand subscript: {0}")]
    Expand(String),
}

/// Fallible conversion into integral indices.
///
/// Floating-point input is rejected even when its value is integral;
/// measured quantities are never index-like.
pub trait IndexLike {
    fn index_values(&self) -> Result<Vec<i64>, IndexError>;
}

impl<T: IndexLike + ?Sized> IndexLike for &T {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        (**self).index_values()
    }
}

impl IndexLike for i64 {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Ok(vec![*self])
    }
}

impl IndexLike for i32 {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Ok(vec![*self as i64])
    }
}

impl IndexLike for usize {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Ok(vec![*self as i64])
    }
}

impl IndexLike for f64 {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Err(IndexError::Type(format!("{} is not integral", self)))
    }
}

impl IndexLike for str {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        match self.trim().parse::<i64>() {
            Ok(n) => Ok(vec![n]),
            Err(_) => Err(IndexError::Type(format!("'{}' is not integral", self))),
        }
    }
}

impl IndexLike for String {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        self.as_str().index_values()
    }
}

impl IndexLike for [i64] {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Ok(self.to_vec())
    }
}

impl<const N: usize> IndexLike for [i64; N] {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Ok(self.to_vec())
    }
}

impl IndexLike for Vec<i64> {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Ok(self.clone())
    }
}

impl IndexLike for [usize] {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Ok(self.iter().map(|&n| n as i64).collect())
    }
}

impl IndexLike for Vec<usize> {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        self.as_slice().index_values()
    }
}

impl IndexLike for Range<i64> {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Ok(self.clone().collect())
    }
}

impl IndexLike for Input {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        match strip_singletons(self) {
            Input::Items(items) => items.iter().map(leaf_index).collect(),
            other => Ok(vec![leaf_index(other)?]),
        }
    }
}

impl IndexLike for Value {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Ok(vec![self.data])
    }
}

impl IndexLike for Sequence {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Ok(self.data.clone())
    }
}

impl IndexLike for crate::measured::Value {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Err(IndexError::Type("measured data are not index-like".to_string()))
    }
}

impl IndexLike for crate::measured::Measurement {
    fn index_values(&self) -> Result<Vec<i64>, IndexError> {
        Err(IndexError::Type("measured data are not index-like".to_string()))
    }
}

/// Unwraps nested single-element sequences, so `[[1, 2]]` reads as
/// `[1, 2]`.
fn strip_singletons(input: &Input) -> &Input {
    let mut current = input;
    while let Input::Items(items) = current {
        if items.len() != 1 {
            break;
        }
        current = &items[0];
    }
    current
}

fn leaf_index(input: &Input) -> Result<i64, IndexError> {
    match strip_singletons(input) {
        Input::Integer(n) => Ok(*n),
        Input::Number(x) => Err(IndexError::Type(format!("{} is not integral", x))),
        Input::Text(text) => match text.trim().parse::<i64>() {
            Ok(n) => Ok(n),
            Err(_) => Err(IndexError::Type(format!("'{}' is not integral", text))),
        },
        Input::Items(_) => Err(IndexError::Type(
            "indices must be logically one-dimensional".to_string(),
        )),
    }
}

/// Creates a single index value from index-like input.
pub fn value(input: impl IndexLike) -> Result<Value, IndexError> {
    let values = input.index_values()?;
    match values.as_slice() {
        [only] => Ok(Value { data: *only }),
        _ => Err(IndexError::Type(format!(
            "expected a single index, got {} values",
            values.len()
        ))),
    }
}

/// Creates an index sequence from index-like input.
pub fn sequence(input: impl IndexLike) -> Result<Sequence, IndexError> {
    Ok(Sequence {
        data: input.index_values()?,
    })
}

/// A single integral index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value {
    data: i64,
}

impl Value {
    pub fn data(&self) -> i64 {
        self.data
    }

    pub fn abs(&self) -> Value {
        Value {
            data: self.data.abs(),
        }
    }

    /// Raises to a non-negative power.
    pub fn pow(&self, exponent: i64) -> Result<Value, IndexError> {
        if exponent < 0 {
            return Err(IndexError::NegativePower(exponent));
        }
        Ok(Value {
            data: self.data.pow(exponent as u32),
        })
    }

    pub fn shift(&self, delta: i64) -> Value {
        Value {
            data: self.data + delta,
        }
    }

    /// Shifts and clamps the result into `bounds`.
    pub fn shift_within<R: RangeBounds<i64>>(&self, delta: i64, bounds: R) -> Value {
        Value {
            data: clamp_within(self.data + delta, &bounds),
        }
    }
}

fn clamp_within<R: RangeBounds<i64>>(value: i64, bounds: &R) -> i64 {
    let mut out = value;
    match bounds.start_bound() {
        Bound::Included(&low) => out = out.max(low),
        Bound::Excluded(&low) => out = out.max(low + 1),
        Bound::Unbounded => {}
    }
    match bounds.end_bound() {
        Bound::Included(&high) => out = out.min(high),
        Bound::Excluded(&high) => out = out.min(high - 1),
        Bound::Unbounded => {}
    }
    out
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.data == *other
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        *self == other.data
    }
}

impl PartialOrd<i64> for Value {
    fn partial_cmp(&self, other: &i64) -> Option<std::cmp::Ordering> {
        self.data.partial_cmp(other)
    }
}

impl From<Value> for i64 {
    fn from(value: Value) -> Self {
        value.data
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value { data: -self.data }
    }
}

impl Add for Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        Value {
            data: self.data + rhs.data,
        }
    }
}

impl Add<i64> for Value {
    type Output = Value;

    fn add(self, rhs: i64) -> Value {
        Value {
            data: self.data + rhs,
        }
    }
}

impl Add<Value> for i64 {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        Value {
            data: self + rhs.data,
        }
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        Value {
            data: self.data - rhs.data,
        }
    }
}

impl Sub<i64> for Value {
    type Output = Value;

    fn sub(self, rhs: i64) -> Value {
        Value {
            data: self.data - rhs,
        }
    }
}

impl Sub<Value> for i64 {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        Value {
            data: self - rhs.data,
        }
    }
}

impl Mul for Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        Value {
            data: self.data * rhs.data,
        }
    }
}

impl Mul<i64> for Value {
    type Output = Value;

    fn mul(self, rhs: i64) -> Value {
        Value {
            data: self.data * rhs,
        }
    }
}

impl Mul<Value> for i64 {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        Value {
            data: self * rhs.data,
        }
    }
}

impl Rem for Value {
    type Output = Value;

    fn rem(self, rhs: Value) -> Value {
        Value {
            data: self.data % rhs.data,
        }
    }
}

impl Rem<i64> for Value {
    type Output = Value;

    fn rem(self, rhs: i64) -> Value {
        Value {
            data: self.data % rhs,
        }
    }
}

/// True division leaves the integral domain.
impl Div for Value {
    type Output = f64;

    fn div(self, rhs: Value) -> f64 {
        self.data as f64 / rhs.data as f64
    }
}

impl Div<i64> for Value {
    type Output = f64;

    fn div(self, rhs: i64) -> f64 {
        self.data as f64 / rhs as f64
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

/// A sequence of integral indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    data: Vec<i64>,
}

impl Sequence {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.data.iter().copied()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.data.get(index).map(|&data| Value { data })
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    /// The subsequence over `range`, with fresh positions.
    pub fn slice(&self, range: Range<usize>) -> Sequence {
        Sequence {
            data: self.data[range].to_vec(),
        }
    }

    /// The position of `target` within this sequence.
    pub fn position(&self, target: i64) -> Option<usize> {
        self.data.iter().position(|&n| n == target)
    }

    pub fn min(&self) -> Option<Value> {
        self.data.iter().min().map(|&data| Value { data })
    }

    pub fn max(&self) -> Option<Value> {
        self.data.iter().max().map(|&data| Value { data })
    }

    pub fn shift(&self, delta: i64) -> Sequence {
        Sequence {
            data: self.data.iter().map(|&n| n + delta).collect(),
        }
    }

    /// Shifts every element and clamps the results into `bounds`.
    pub fn shift_within<R: RangeBounds<i64>>(&self, delta: i64, bounds: R) -> Sequence {
        Sequence {
            data: self
                .data
                .iter()
                .map(|&n| clamp_within(n + delta, &bounds))
                .collect(),
        }
    }

    /// Raises every element to a non-negative power.
    pub fn pow(&self, exponent: i64) -> Result<Sequence, IndexError> {
        if exponent < 0 {
            return Err(IndexError::NegativePower(exponent));
        }
        Ok(Sequence {
            data: self.data.iter().map(|&n| n.pow(exponent as u32)).collect(),
        })
    }
}

impl From<Vec<i64>> for Sequence {
    fn from(data: Vec<i64>) -> Self {
        Sequence { data }
    }
}

impl FromIterator<i64> for Sequence {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Sequence {
            data: iter.into_iter().collect(),
        }
    }
}

impl PartialEq<[i64]> for Sequence {
    fn eq(&self, other: &[i64]) -> bool {
        self.data == other
    }
}

impl PartialEq<&[i64]> for Sequence {
    fn eq(&self, other: &&[i64]) -> bool {
        self.data == *other
    }
}

impl PartialEq<Vec<i64>> for Sequence {
    fn eq(&self, other: &Vec<i64>) -> bool {
        self.data == *other
    }
}

impl<const N: usize> PartialEq<[i64; N]> for Sequence {
    fn eq(&self, other: &[i64; N]) -> bool {
        self.data == other
    }
}

/// Pairs up the operands of an elementwise sequence operation,
/// broadcasting a single element across the other operand.
fn paired(lhs: &[i64], rhs: &[i64]) -> Vec<(i64, i64)> {
    if lhs.len() == rhs.len() {
        return lhs.iter().copied().zip(rhs.iter().copied()).collect();
    }
    if lhs.len() == 1 {
        return rhs.iter().map(|&b| (lhs[0], b)).collect();
    }
    if rhs.len() == 1 {
        return lhs.iter().map(|&a| (a, rhs[0])).collect();
    }
    panic!(
        "cannot pair index sequences of lengths {} and {}",
        lhs.len(),
        rhs.len()
    );
}

impl Neg for &Sequence {
    type Output = Sequence;

    fn neg(self) -> Sequence {
        Sequence {
            data: self.data.iter().map(|&n| -n).collect(),
        }
    }
}

impl Add for &Sequence {
    type Output = Sequence;

    fn add(self, rhs: &Sequence) -> Sequence {
        Sequence {
            data: paired(&self.data, &rhs.data)
                .into_iter()
                .map(|(a, b)| a + b)
                .collect(),
        }
    }
}

impl Add<i64> for &Sequence {
    type Output = Sequence;

    fn add(self, rhs: i64) -> Sequence {
        self.shift(rhs)
    }
}

impl Sub for &Sequence {
    type Output = Sequence;

    fn sub(self, rhs: &Sequence) -> Sequence {
        Sequence {
            data: paired(&self.data, &rhs.data)
                .into_iter()
                .map(|(a, b)| a - b)
                .collect(),
        }
    }
}

impl Sub<i64> for &Sequence {
    type Output = Sequence;

    fn sub(self, rhs: i64) -> Sequence {
        self.shift(-rhs)
    }
}

impl Mul for &Sequence {
    type Output = Sequence;

    fn mul(self, rhs: &Sequence) -> Sequence {
        Sequence {
            data: paired(&self.data, &rhs.data)
                .into_iter()
                .map(|(a, b)| a * b)
                .collect(),
        }
    }
}

impl Mul<i64> for &Sequence {
    type Output = Sequence;

    fn mul(self, rhs: i64) -> Sequence {
        Sequence {
            data: self.data.iter().map(|&n| n * rhs).collect(),
        }
    }
}

impl Rem<i64> for &Sequence {
    type Output = Sequence;

    fn rem(self, rhs: i64) -> Sequence {
        Sequence {
            data: self.data.iter().map(|&n| n % rhs).collect(),
        }
    }
}

impl Div<i64> for &Sequence {
    type Output = Vec<f64>;

    fn div(self, rhs: i64) -> Vec<f64> {
        self.data.iter().map(|&n| n as f64 / rhs as f64).collect()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.data.iter().format(", "))
    }
}

/// One entry of an array subscript.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexSpec {
    /// A single position; removes the subscripted dimension.
    At(isize),
    /// A slice; keeps the subscripted dimension.
    Range {
        start: Option<isize>,
        stop: Option<isize>,
        step: isize,
    },
    /// The full extent of the subscripted dimension.
    All,
    /// Placeholder for however many `All` entries balance the subscript.
    Ellipsis,
    /// Inserts a new singleton dimension; consumes nothing.
    NewAxis,
}

impl IndexSpec {
    fn consumes_axis(&self) -> bool {
        matches!(
            self,
            IndexSpec::At(_) | IndexSpec::Range { .. } | IndexSpec::All
        )
    }
}

/// Normalizes a subscript against `ndim` dimensions.
///
/// The result consumes exactly `ndim` axes: a single ellipsis expands
/// to the missing `All` entries and a missing tail is filled with
/// `All`. A subscript that consumes more than `ndim` axes, contains
/// more than one ellipsis, or strands a zero-width ellipsis before
/// other entries is an error.
pub fn expand(ndim: usize, spec: &[IndexSpec]) -> Result<Vec<IndexSpec>, IndexError> {
    let ellipses = spec
        .iter()
        .filter(|entry| matches!(entry, IndexSpec::Ellipsis))
        .count();
    if ellipses > 1 {
        return Err(IndexError::Expand(
            "a subscript may contain at most one ellipsis".to_string(),
        ));
    }
    let consumed = spec.iter().filter(|entry| entry.consumes_axis()).count();
    if consumed > ndim {
        return Err(IndexError::Expand(format!(
            "{} entries for {} dimensions",
            consumed, ndim
        )));
    }
    let fill = ndim - consumed;
    let mut out = Vec::with_capacity(ndim);
    if ellipses == 1 {
        let position = spec
            .iter()
            .position(|entry| matches!(entry, IndexSpec::Ellipsis))
            .unwrap_or(spec.len());
        if fill == 0 && position + 1 != spec.len() {
            return Err(IndexError::Expand(format!(
                "{} entries for {} dimensions",
                consumed, ndim
            )));
        }
        out.extend_from_slice(&spec[..position]);
        out.extend(std::iter::repeat(IndexSpec::All).take(fill));
        out.extend_from_slice(&spec[position + 1..]);
    } else {
        out.extend_from_slice(spec);
        out.extend(std::iter::repeat(IndexSpec::All).take(fill));
    }
    trace!("expanded subscript to {} entries for ndim {}", out.len(), ndim);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------
    // Subscript expansion
    // ------------------------------------------------------------------

    #[test]
    fn expand_balances_an_ellipsis() {
        let spec = [IndexSpec::Ellipsis, IndexSpec::At(-2), IndexSpec::At(4)];
        let out = expand(4, &spec).unwrap();
        assert_eq!(
            out,
            vec![
                IndexSpec::All,
                IndexSpec::All,
                IndexSpec::At(-2),
                IndexSpec::At(4)
            ]
        );
    }

    #[test]
    fn expand_fills_a_missing_tail() {
        let out = expand(3, &[IndexSpec::At(3)]).unwrap();
        assert_eq!(out, vec![IndexSpec::At(3), IndexSpec::All, IndexSpec::All]);
    }

    #[test]
    fn expand_drops_a_trailing_zero_width_ellipsis() {
        let spec = [IndexSpec::At(-2), IndexSpec::At(4), IndexSpec::Ellipsis];
        let out = expand(2, &spec).unwrap();
        assert_eq!(out, vec![IndexSpec::At(-2), IndexSpec::At(4)]);
    }

    #[test]
    fn expand_rejects_a_leading_zero_width_ellipsis() {
        let spec = [IndexSpec::Ellipsis, IndexSpec::At(-2), IndexSpec::At(4)];
        assert!(expand(2, &spec).is_err());
    }

    #[test]
    fn expand_rejects_multiple_ellipses() {
        let spec = [
            IndexSpec::At(1),
            IndexSpec::Ellipsis,
            IndexSpec::At(2),
            IndexSpec::Ellipsis,
        ];
        assert!(expand(4, &spec).is_err());
    }
}
