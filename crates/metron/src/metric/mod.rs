//! Units of measure and physical dimensions.
//!
//! A [`Unit`] is a canonical product of named-unit symbols with
//! rational exponents; [`Dimension`] is the corresponding product of
//! base physical quantities. Conversion between commensurable units
//! goes through [`Unit::factor_to`], which yields the exact numeric
//! factor between them (`m` to `km` is `1e-3`, `deg` to `rad` is
//! `π/180`, `erg` to `J` is `1e-7`).

mod system;
mod unit;

pub use system::System;
pub use unit::Unit;

use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

use thiserror::Error;

use crate::symbolic::{Exponent, Expression, SymbolicError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("unknown base quantity '{0}'")]
    UnknownQuantity(String),

    #[error("unknown metric system '{0}'")]
    UnknownSystem(String),

    #[error("cannot convert '{from}' to '{to}': incommensurable dimensions")]
    Incommensurable { from: String, to: String },

    #[error("unit expressions cannot carry a numeric factor ({0})")]
    NumericFactor(f64),

    #[error(transparent)]
    Symbolic(#[from] SymbolicError),
}

/// A product of base physical quantities: `L`, `M`, `T`, `I`, `Θ`,
/// `N`, `J`, and plane angle `A`.
///
/// Dimensions classify units; they are not unit-like themselves and
/// never convert into a [`Unit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    expr: Expression,
}

impl Dimension {
    /// The dimensionless identity.
    pub fn one() -> Self {
        Dimension {
            expr: Expression::one(),
        }
    }

    /// Parse a dimension expression like `L` or `M L^2 T^-2`.
    pub fn parse(s: &str) -> Result<Self, MetricError> {
        let expr = Expression::parse(s)?;
        if expr.coefficient() != 1.0 {
            return Err(MetricError::NumericFactor(expr.coefficient()));
        }
        for t in expr.terms() {
            if !system::BASE_QUANTITIES.contains(&t.base()) {
                return Err(MetricError::UnknownQuantity(t.base().to_string()));
            }
        }
        Ok(Dimension { expr })
    }

    pub(crate) fn from_canonical(expr: Expression) -> Self {
        Dimension { expr }
    }

    pub fn is_one(&self) -> bool {
        self.expr.is_one()
    }

    pub fn pow(&self, k: Exponent) -> Dimension {
        Dimension {
            expr: self.expr.pow(k),
        }
    }
}

impl Mul for &Dimension {
    type Output = Dimension;

    fn mul(self, rhs: &Dimension) -> Dimension {
        Dimension {
            expr: &self.expr * &rhs.expr,
        }
    }
}

impl Div for &Dimension {
    type Output = Dimension;

    fn div(self, rhs: &Dimension) -> Dimension {
        Dimension {
            expr: &self.expr / &rhs.expr,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

impl FromStr for Dimension {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::parse(s)
    }
}

/// Parse a unit expression.
pub fn unit(s: &str) -> Result<Unit, MetricError> {
    Unit::parse(s)
}

/// Parse a dimension expression.
pub fn dimension(s: &str) -> Result<Dimension, MetricError> {
    Dimension::parse(s)
}

/// Anything acceptable where a unit argument is expected: an existing
/// [`Unit`], unit text, or a symbolic expression.
pub trait UnitLike {
    fn into_unit(self) -> Result<Unit, MetricError>;
}

impl UnitLike for Unit {
    fn into_unit(self) -> Result<Unit, MetricError> {
        Ok(self)
    }
}

impl UnitLike for &Unit {
    fn into_unit(self) -> Result<Unit, MetricError> {
        Ok(self.clone())
    }
}

impl UnitLike for &str {
    fn into_unit(self) -> Result<Unit, MetricError> {
        Unit::parse(self)
    }
}

impl UnitLike for String {
    fn into_unit(self) -> Result<Unit, MetricError> {
        Unit::parse(&self)
    }
}

impl UnitLike for &String {
    fn into_unit(self) -> Result<Unit, MetricError> {
        Unit::parse(self)
    }
}

impl UnitLike for Expression {
    fn into_unit(self) -> Result<Unit, MetricError> {
        Unit::from_expression(self)
    }
}

impl UnitLike for &Expression {
    fn into_unit(self) -> Result<Unit, MetricError> {
        Unit::from_expression(self.clone())
    }
}
