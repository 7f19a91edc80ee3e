//! Products of algebraic terms with rational exponents.
//!
//! An [`Expression`] represents `c * a^p * b^q * ...`: a real
//! coefficient times symbolic bases raised to rational exponents. The
//! text grammar accepts `*`, `/`, `^`, parentheses, and juxtaposition
//! (`kg m^2 s^-2` multiplies). An exponent and its `^` must be
//! contiguous, so `m^1/2` is the square root of `m` while `m^1 / 2`
//! divides `m` by two.
//!
//! Expressions are kept canonical: like bases merge, zero exponents
//! drop out, terms sort by base, and numeric factors fold into the
//! coefficient. Equality is therefore algebraic equality.

mod parse;

use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

use num_rational::Ratio;
use thiserror::Error;

/// Rational exponent of a term.
pub type Exponent = Ratio<i64>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SymbolicError {
    #[error("empty expression")]
    Empty,

    #[error("malformed expression '{0}'")]
    Malformed(String),

    #[error("invalid operand '{0}'")]
    Operand(String),

    #[error("invalid exponent in '{0}'")]
    Exponent(String),

    #[error("unbalanced parentheses in '{0}'")]
    Parentheses(String),
}

/// One factor of a product: `coefficient * base^exponent`.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    coefficient: f64,
    base: String,
    exponent: Exponent,
}

impl Term {
    /// A plain symbol with exponent 1.
    pub fn new(base: impl Into<String>) -> Self {
        Term {
            coefficient: 1.0,
            base: base.into(),
            exponent: Exponent::from_integer(1),
        }
    }

    pub fn with_exponent(base: impl Into<String>, exponent: Exponent) -> Self {
        Term {
            coefficient: 1.0,
            base: base.into(),
            exponent,
        }
    }

    /// Parse a single term like `a`, `a^2`, `3a^-1/2`.
    pub fn parse(s: &str) -> Result<Self, SymbolicError> {
        parse::term(s)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn exponent(&self) -> Exponent {
        self.exponent
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// `(c b^e)^k = c^k b^(e k)`.
    pub fn pow(&self, k: Exponent) -> Term {
        Term {
            coefficient: pow_f64(self.coefficient, k),
            base: self.base.clone(),
            exponent: self.exponent * k,
        }
    }

    pub(crate) fn with_coefficient(mut self, coefficient: f64) -> Term {
        self.coefficient = coefficient;
        self
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficient != 1.0 {
            write!(f, "{}", self.coefficient)?;
        }
        write!(f, "{}", self.base)?;
        if self.exponent != Exponent::from_integer(1) {
            write!(f, "^{}", self.exponent)?;
        }
        Ok(())
    }
}

/// A canonical product of terms with a numeric coefficient.
#[derive(Debug, Clone)]
pub struct Expression {
    coefficient: f64,
    terms: Vec<Term>,
}

impl Expression {
    /// The multiplicative identity, displayed as `1`.
    pub fn one() -> Self {
        Expression {
            coefficient: 1.0,
            terms: Vec::new(),
        }
    }

    /// Parse an expression from text.
    pub fn parse(s: &str) -> Result<Self, SymbolicError> {
        parse::expression(s)
    }

    /// Build from terms, folding and merging into canonical form.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = Term>,
    {
        canonical(1.0, terms.into_iter().collect())
    }

    pub fn is_one(&self) -> bool {
        self.terms.is_empty() && self.coefficient == 1.0
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Decompose into standalone terms; the coefficient rides on the
    /// first one.
    pub fn as_terms(&self) -> Vec<Term> {
        let mut out = self.terms.clone();
        if self.coefficient != 1.0 {
            match out.first_mut() {
                Some(first) => first.coefficient = self.coefficient,
                None => out.push(Term::new("1").with_coefficient(self.coefficient)),
            }
        }
        out
    }

    /// Raise the whole product to a rational power.
    pub fn pow(&self, k: Exponent) -> Expression {
        canonical(
            pow_f64(self.coefficient, k),
            self.terms.iter().map(|t| t.pow(k)).collect(),
        )
    }

    /// The reciprocal expression.
    pub fn inverse(&self) -> Expression {
        self.pow(Exponent::from_integer(-1))
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.coefficient == other.coefficient && self.terms == other.terms
    }
}

impl FromStr for Expression {
    type Err = SymbolicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

impl Mul for &Expression {
    type Output = Expression;

    fn mul(self, rhs: &Expression) -> Expression {
        canonical(
            self.coefficient * rhs.coefficient,
            self.terms
                .iter()
                .chain(rhs.terms.iter())
                .cloned()
                .collect(),
        )
    }
}

impl Div for &Expression {
    type Output = Expression;

    fn div(self, rhs: &Expression) -> Expression {
        self * &rhs.inverse()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        let one = Exponent::from_integer(1);
        let mut numerator: Vec<String> = Vec::new();
        if self.coefficient != 1.0 {
            numerator.push(format!("{}", self.coefficient));
        }
        let mut denominator: Vec<String> = Vec::new();
        for t in &self.terms {
            if t.exponent > Exponent::from_integer(0) {
                if t.exponent == one {
                    numerator.push(t.base.clone());
                } else {
                    numerator.push(format!("{}^{}", t.base, t.exponent));
                }
            } else {
                let flipped = -t.exponent;
                if flipped == one {
                    denominator.push(t.base.clone());
                } else {
                    denominator.push(format!("{}^{}", t.base, flipped));
                }
            }
        }
        let num = if numerator.is_empty() {
            "1".to_string()
        } else {
            numerator.join(" ")
        };
        if denominator.is_empty() {
            write!(f, "{num}")
        } else if denominator.len() == 1 {
            write!(f, "{num} / {}", denominator[0])
        } else {
            write!(f, "{num} / ({})", denominator.join(" "))
        }
    }
}

/// Merge like bases, drop zero exponents, fold term coefficients, and
/// sort by base.
fn canonical(coefficient: f64, terms: Vec<Term>) -> Expression {
    let mut coefficient = coefficient;
    let mut merged: Vec<Term> = Vec::with_capacity(terms.len());
    for t in terms {
        coefficient *= t.coefficient;
        match merged.iter_mut().find(|m| m.base == t.base) {
            Some(m) => m.exponent += t.exponent,
            None => merged.push(t.with_coefficient(1.0)),
        }
    }
    merged.retain(|t| t.exponent != Exponent::from_integer(0));
    merged.sort_by(|a, b| a.base.cmp(&b.base));
    Expression {
        coefficient,
        terms: merged,
    }
}

fn pow_f64(value: f64, k: Exponent) -> f64 {
    if value == 1.0 {
        1.0
    } else if *k.denom() == 1 {
        value.powi(*k.numer() as i32)
    } else {
        value.powf(*k.numer() as f64 / *k.denom() as f64)
    }
}

/// Parse text into an [`Expression`].
pub fn expression(s: &str) -> Result<Expression, SymbolicError> {
    Expression::parse(s)
}

/// Parse text into a single [`Term`].
pub fn term(s: &str) -> Result<Term, SymbolicError> {
    Term::parse(s)
}

/// The product of two parsed expressions.
pub fn product(a: &str, b: &str) -> Result<Expression, SymbolicError> {
    Ok(&Expression::parse(a)? * &Expression::parse(b)?)
}

/// The ratio of two parsed expressions.
pub fn ratio(a: &str, b: &str) -> Result<Expression, SymbolicError> {
    Ok(&Expression::parse(a)? / &Expression::parse(b)?)
}

/// A parsed expression raised to a rational power.
pub fn power(base: &str, k: Exponent) -> Result<Expression, SymbolicError> {
    Ok(Expression::parse(base)?.pow(k))
}

/// Whether two expression strings reduce to the same canonical form.
pub fn equivalent(a: &str, b: &str) -> Result<bool, SymbolicError> {
    Ok(Expression::parse(a)? == Expression::parse(b)?)
}

/// Whether text spells a compound expression rather than a single
/// operand.
pub fn is_compound(s: &str) -> bool {
    s.contains('*') || s.contains('/') || s.trim().contains(char::is_whitespace)
}
