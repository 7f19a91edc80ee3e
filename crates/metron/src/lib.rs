//! metron: measured quantities for scientific data.
//!
//! This crate provides symbolic algebra over unit expressions, a metric
//! system with conversion factors, measurement parsing, and four measured
//! data types (scalar, vector, tensor, and labelled array) whose
//! arithmetic carries units and dimension names through every operation.
//!
//! The design favors small, testable modules: low-level pieces (symbolic
//! expressions, index sequences, dimension bookkeeping) compose into the
//! higher-level quantity types without knowing about them.
pub mod array;
pub mod axes;
pub mod axis;
pub mod data;
pub mod error;
pub mod indexer;
pub mod measurable;
pub mod measured;
pub mod metric;
pub mod scalar;
pub mod symbolic;
pub mod tensor;
pub mod vector;

pub use array::Array;
pub use error::{Error, Result};
pub use measurable::Measurable;
pub use measured::Measurement;
pub use metric::Unit;
pub use scalar::Scalar;
pub use tensor::Tensor;
pub use vector::Vector;
