//! Containers for measured data.
//!
//! A [`Value`] is a single datum bound to a metric unit; a
//! [`Measurement`] is a one-dimensional sequence of data bound to a
//! common unit. Both are plain carriers: the arithmetic lives on the
//! physical types built from them ([`crate::Scalar`], [`crate::Vector`],
//! and friends).

use std::fmt;
use std::slice::Iter;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metric::{Unit, UnitLike};

/// A single datum with a unit of measure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Value {
    data: f64,
    unit: Unit,
}

impl Value {
    /// Creates a measured value.
    ///
    /// Panics when `unit` does not parse; [`Value::try_new`] is the
    /// checked form.
    pub fn new(data: f64, unit: impl UnitLike) -> Self {
        match Self::try_new(data, unit) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }

    pub fn try_new(data: f64, unit: impl UnitLike) -> Result<Self> {
        let unit = unit.into_unit()?;
        Ok(Self { data, unit })
    }

    /// Collapses a single-element measurement into a value.
    pub fn from_measurement(measurement: &Measurement) -> Result<Self> {
        if measurement.len() != 1 {
            return Err(Error::NotSingular {
                size: measurement.len(),
            });
        }
        Ok(Self {
            data: measurement.data[0],
            unit: measurement.unit.clone(),
        })
    }

    pub fn data(&self) -> f64 {
        self.data
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Rescales this value to `unit`, which must measure the same
    /// dimension.
    pub fn withunit(&self, unit: impl UnitLike) -> Result<Self> {
        let target = unit.into_unit()?;
        let factor = self.unit.factor_to(&target)?;
        Ok(Self {
            data: self.data * factor,
            unit: target,
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.data, self.unit)
    }
}

/// A one-dimensional sequence of data with a common unit of measure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    data: Vec<f64>,
    unit: Unit,
}

impl Measurement {
    /// Creates a measurement from raw data.
    ///
    /// Panics when `unit` does not parse; [`Measurement::try_new`] is
    /// the checked form.
    pub fn new(data: Vec<f64>, unit: impl UnitLike) -> Self {
        match Self::try_new(data, unit) {
            Ok(measurement) => measurement,
            Err(error) => panic!("{error}"),
        }
    }

    pub fn try_new(data: Vec<f64>, unit: impl UnitLike) -> Result<Self> {
        let unit = unit.into_unit()?;
        Ok(Self { data, unit })
    }

    /// A measurement carrying the identity unit.
    pub fn unitless(data: Vec<f64>) -> Self {
        Self {
            data,
            unit: Unit::one(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Rescales every element to `unit`, which must measure the same
    /// dimension.
    pub fn withunit(&self, unit: impl UnitLike) -> Result<Self> {
        let target = unit.into_unit()?;
        let factor = self.unit.factor_to(&target)?;
        Ok(Self {
            data: self.data.iter().map(|x| x * factor).collect(),
            unit: target,
        })
    }
}

impl From<Value> for Measurement {
    fn from(value: Value) -> Self {
        Self {
            data: vec![value.data],
            unit: value.unit,
        }
    }
}

impl From<&Value> for Measurement {
    fn from(value: &Value) -> Self {
        Self {
            data: vec![value.data],
            unit: value.unit.clone(),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] [{}]", self.data.iter().format(", "), self.unit)
    }
}
