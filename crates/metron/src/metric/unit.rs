//! The `Unit` type: canonical products of named-unit factors.

use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

use log::debug;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::system::{self, System};
use super::{Dimension, MetricError};
use crate::symbolic::{Exponent, Expression, Term};

/// A unit of measure.
///
/// Internally a canonical symbolic product of named-unit symbols
/// (prefixes included), together with its physical dimension and its
/// scale relative to the MKS-coherent unit of that dimension. `km^2 J
/// / erg` is a valid unit; so is the identity `1`.
#[derive(Debug, Clone)]
pub struct Unit {
    expr: Expression,
    dim: Expression,
    factor: f64,
}

impl Unit {
    /// The unitless identity, displayed as `1`.
    pub fn one() -> Self {
        Unit {
            expr: Expression::one(),
            dim: Expression::one(),
            factor: 1.0,
        }
    }

    /// Parse a unit expression. Unknown symbols are errors.
    pub fn parse(s: &str) -> Result<Self, MetricError> {
        Unit::from_expression(Expression::parse(s)?)
    }

    /// Validate a symbolic expression as a unit.
    pub fn from_expression(expr: Expression) -> Result<Self, MetricError> {
        if expr.coefficient() != 1.0 {
            return Err(MetricError::NumericFactor(expr.coefficient()));
        }
        let mut dim = Expression::one();
        let mut factor = 1.0;
        for t in expr.terms() {
            let resolved = system::resolve(t.base())?;
            let quantity = Expression::parse(resolved.quantity)?;
            dim = &dim * &quantity.pow(t.exponent());
            factor *= powf_ratio(resolved.factor, t.exponent());
        }
        Ok(Unit { expr, dim, factor })
    }

    pub fn is_one(&self) -> bool {
        self.expr.is_one()
    }

    /// Whether the unit measures plane angle (`rad`, `deg`, ...).
    pub fn is_angle(&self) -> bool {
        self.dim == Expression::from_terms([Term::new("A")])
    }

    /// The unit's physical dimension.
    pub fn dimension(&self) -> Dimension {
        Dimension::from_canonical(self.dim.clone())
    }

    /// The numeric factor converting amounts in `self` into amounts in
    /// `other`: `new = old * old_unit.factor_to(new_unit)`.
    pub fn factor_to(&self, other: &Unit) -> Result<f64, MetricError> {
        if self.dim != other.dim {
            return Err(MetricError::Incommensurable {
                from: self.to_string(),
                to: other.to_string(),
            });
        }
        let factor = self.factor / other.factor;
        debug!("conversion '{}' -> '{}': factor {}", self, other, factor);
        Ok(factor)
    }

    /// Raise to a rational power.
    pub fn powr(&self, k: Exponent) -> Unit {
        Unit {
            expr: self.expr.pow(k),
            dim: self.dim.pow(k),
            factor: powf_ratio(self.factor, k),
        }
    }

    pub fn powi(&self, n: i32) -> Unit {
        self.powr(Exponent::from_integer(i64::from(n)))
    }

    pub fn sqrt(&self) -> Unit {
        self.powr(Exponent::new(1, 2))
    }

    /// The coherent unit of the same dimension in `system`, e.g.
    /// `erg` normalized to mks is `kg m^2 / s^2`.
    pub fn normalized(&self, system: System) -> Result<Unit, MetricError> {
        let mut terms = Vec::new();
        for t in self.dim.terms() {
            let symbol = system
                .base_unit(t.base())
                .ok_or_else(|| MetricError::UnknownQuantity(t.base().to_string()))?;
            terms.push(Term::with_exponent(symbol, t.exponent()));
        }
        Unit::from_expression(Expression::from_terms(terms))
    }

    pub(crate) fn si_factor(&self) -> f64 {
        self.factor
    }
}

fn powf_ratio(value: f64, k: Exponent) -> f64 {
    if value == 1.0 {
        1.0
    } else if *k.denom() == 1 {
        value.powi(*k.numer() as i32)
    } else {
        value.powf(*k.numer() as f64 / *k.denom() as f64)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
    }
}

impl PartialEq<str> for Unit {
    fn eq(&self, other: &str) -> bool {
        Unit::parse(other).map_or(false, |u| u == *self)
    }
}

impl PartialEq<&str> for Unit {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Unit {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<Unit> for &str {
    fn eq(&self, other: &Unit) -> bool {
        other == *self
    }
}

impl Mul for &Unit {
    type Output = Unit;

    fn mul(self, rhs: &Unit) -> Unit {
        Unit {
            expr: &self.expr * &rhs.expr,
            dim: &self.dim * &rhs.dim,
            factor: self.factor * rhs.factor,
        }
    }
}

impl Div for &Unit {
    type Output = Unit;

    fn div(self, rhs: &Unit) -> Unit {
        Unit {
            expr: &self.expr / &rhs.expr,
            dim: &self.dim / &rhs.dim,
            factor: self.factor / rhs.factor,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

impl FromStr for Unit {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::parse(s)
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Unit::parse(&text).map_err(de::Error::custom)
    }
}
