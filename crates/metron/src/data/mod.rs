//! Named dimensions, raw dimensioned arrays, and value lookups.

mod array;
mod dimensions;

pub use array::{remesh, Array};
pub use dimensions::{Dimensions, DimensionsError};

pub(crate) use dimensions::is_permutation;

use ndarray::{ArrayBase, Data, Dimension, IntoDimension};
use ndarray_stats::QuantileExt;

use crate::error::{Error, Result};
use crate::indexer::IndexLike;

/// Whether the input reduces to integral indices.
///
/// Anything that can initialize an index value or sequence tests true;
/// floating-point and measured input test false.
pub fn isindexlike<T: IndexLike>(input: &T) -> bool {
    input.index_values().is_ok()
}

/// Which side of a target a bounded nearest-value search may land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The target is a lower bound: find the nearest value at or above it.
    Lower,
    /// The target is an upper bound: find the nearest value at or below it.
    Upper,
}

/// The position and value of the element nearest a target.
#[derive(Clone, Debug, PartialEq)]
pub struct Nearest {
    pub index: Vec<usize>,
    pub value: f64,
}

/// Finds the element closest to `target` in absolute distance.
///
/// Ties resolve to the earliest position in row-major order.
pub fn nearest<S, D>(values: &ArrayBase<S, D>, target: f64) -> Result<Nearest>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let distance = values.mapv(|v| (v - target).abs());
    let pattern = distance.argmin().map_err(|_| Error::Empty)?;
    let index = pattern.into_dimension();
    let value = values.get(index.clone()).copied().ok_or(Error::Empty)?;
    Ok(Nearest {
        index: index.slice().to_vec(),
        value,
    })
}

/// Like [`nearest`], but only considers values on the admissible side
/// of the target.
pub fn nearest_bounded<S, D>(
    values: &ArrayBase<S, D>,
    target: f64,
    bound: Bound,
) -> Result<Nearest>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let distance = values.mapv(|v| {
        let admissible = match bound {
            Bound::Lower => v >= target,
            Bound::Upper => v <= target,
        };
        if admissible {
            (v - target).abs()
        } else {
            f64::INFINITY
        }
    });
    let pattern = distance.argmin().map_err(|_| Error::Empty)?;
    let index = pattern.into_dimension();
    let best = distance.get(index.clone()).copied().ok_or(Error::Empty)?;
    if best.is_infinite() {
        let relation = match bound {
            Bound::Lower => ">=",
            Bound::Upper => "<=",
        };
        return Err(Error::Unbounded { relation, target });
    }
    let value = values.get(index.clone()).copied().ok_or(Error::Empty)?;
    Ok(Nearest {
        index: index.slice().to_vec(),
        value,
    })
}

/// The joint shape of two operands under trailing-axis alignment.
pub(crate) fn broadcast_shape(left: &[usize], right: &[usize]) -> Result<Vec<usize>> {
    let ndim = left.len().max(right.len());
    let mut shape = vec![0usize; ndim];
    for i in 0..ndim {
        let a = aligned_extent(left, ndim, i);
        let b = aligned_extent(right, ndim, i);
        if a == b || b == 1 {
            shape[i] = a;
        } else if a == 1 {
            shape[i] = b;
        } else {
            return Err(Error::ShapeMismatch {
                left: left.to_vec(),
                right: right.to_vec(),
            });
        }
    }
    Ok(shape)
}

fn aligned_extent(shape: &[usize], ndim: usize, position: usize) -> usize {
    let offset = ndim - shape.len();
    if position < offset {
        1
    } else {
        shape[position - offset]
    }
}

/// Second-order finite differences over a uniformly spaced lane.
///
/// Interior points use the centered difference; the endpoints fall
/// back to one-sided first-order differences. Needs `values.len() >= 2`.
pub(crate) fn gradient_uniform(values: &[f64], step: f64) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![0.0; n];
    out[0] = (values[1] - values[0]) / step;
    for i in 1..n - 1 {
        out[i] = (values[i + 1] - values[i - 1]) / (2.0 * step);
    }
    out[n - 1] = (values[n - 1] - values[n - 2]) / step;
    out
}

/// Second-order finite differences against explicit coordinates.
pub(crate) fn gradient_spaced(values: &[f64], coordinates: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![0.0; n];
    out[0] = (values[1] - values[0]) / (coordinates[1] - coordinates[0]);
    for i in 1..n - 1 {
        let hs = coordinates[i] - coordinates[i - 1];
        let hd = coordinates[i + 1] - coordinates[i];
        out[i] = (hs * hs * values[i + 1] + (hd * hd - hs * hs) * values[i]
            - hd * hd * values[i - 1])
            / (hs * hd * (hd + hs));
    }
    out[n - 1] = (values[n - 1] - values[n - 2]) / (coordinates[n - 1] - coordinates[n - 2]);
    out
}
