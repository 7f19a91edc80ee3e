//! Crate-level error type and result alias.
//!
//! Each module defines a small error enum for its own failure modes;
//! everything converges into [`Error`] so that public operations can
//! return a single [`Result`] type.

use thiserror::Error;

use crate::axes::AxesError;
use crate::axis::AxisError;
use crate::data::DimensionsError;
use crate::indexer::IndexError;
use crate::measurable::ParsingError;
use crate::metric::MetricError;
use crate::symbolic::SymbolicError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure a measured-quantity operation can produce.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Symbolic(#[from] SymbolicError),

    #[error(transparent)]
    Metric(#[from] MetricError),

    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Dimensions(#[from] DimensionsError),

    #[error(transparent)]
    Axis(#[from] AxisError),

    #[error(transparent)]
    Axes(#[from] AxesError),

    /// Additive and comparison operations require identical units.
    #[error("unit mismatch: '{left}' vs '{right}'")]
    UnitMismatch { left: String, right: String },

    /// Shapes that do not broadcast against each other.
    #[error("shapes {left:?} and {right:?} do not broadcast")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },

    /// Labelled operations require equal or nested dimension sets.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: String, right: String },

    /// The operand must be unitless (exponents, logarithms).
    #[error("expected a unitless operand, got '{unit}'")]
    NotUnitless { unit: String },

    /// Trigonometric operations require an angular operand.
    #[error("expected an angular unit, got '{unit}'")]
    NotAngular { unit: String },

    /// A single-valued quantity was required.
    #[error("expected a single value, got {size}")]
    NotSingular { size: usize },

    /// A one-dimensional quantity was required.
    #[error("expected one-dimensional data, got {ndim} dimensions")]
    NotOneDimensional { ndim: usize },

    /// Measured input cannot take a second unit or axes argument.
    #[error("input is already measured; cannot re-specify {what}")]
    AlreadyMeasured { what: &'static str },

    /// There was nothing to measure.
    #[error("there is nothing to measure")]
    Empty,

    /// An element lookup fell outside the stored data.
    #[error("position {index:?} is out of bounds for shape {shape:?}")]
    OutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    /// No element satisfied a bounded nearest-value search.
    #[error("no value {relation} {target}")]
    Unbounded { relation: &'static str, target: f64 },

    /// Differentiation and integration need at least two samples.
    #[error("need at least {needed} samples along the axis, got {got}")]
    TooFewSamples { needed: usize, got: usize },
}

impl Error {
    /// Helper for the unit-equality checks shared by the measured types.
    pub(crate) fn unit_mismatch(left: &crate::metric::Unit, right: &crate::metric::Unit) -> Self {
        Error::UnitMismatch {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}
