//! Loosely-typed measurable input.
//!
//! The measuring interface accepts anything that looks like a
//! measurement: bare numbers, value-unit pairs, flat sequences of
//! values with a trailing unit, and nested sequences of those.
//! [`Input`] reifies that space, [`parse`] reduces it to numeric
//! values plus a unit string, and [`measure`] produces a
//! [`Measurement`].

use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use crate::error::{Error, Result};
use crate::measured::{Measurement, Value};

const UNITY: &str = "1";

/// Ways the parser can reject its input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParsingError {
    /// The input does not have a measurable structure.
    #[error("cannot parse {0} as a measurement")]
    Unparsable(String),

    /// Nested parts of the input disagree on the unit.
    #[error("parsed units do not agree: '{0}' != '{1}'")]
    MixedUnits(String, String),
}

impl ParsingError {
    fn unparsable(input: &Input) -> Self {
        ParsingError::Unparsable(input.to_string())
    }
}

/// A measurable input tree.
///
/// Integral and real numbers are distinct so that index-likeness
/// checks can tell `1` from `1.0` after the fact.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Integer(i64),
    Number(f64),
    Text(String),
    Items(Vec<Input>),
}

impl Input {
    pub fn items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Input>,
    {
        Input::Items(items.into_iter().collect())
    }
}

impl From<i64> for Input {
    fn from(value: i64) -> Self {
        Input::Integer(value)
    }
}

impl From<i32> for Input {
    fn from(value: i32) -> Self {
        Input::Integer(value as i64)
    }
}

impl From<usize> for Input {
    fn from(value: usize) -> Self {
        Input::Integer(value as i64)
    }
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Input::Number(value)
    }
}

impl From<f32> for Input {
    fn from(value: f32) -> Self {
        Input::Number(value as f64)
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Input::Text(value.to_string())
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Input::Text(value)
    }
}

impl<T: Into<Input>> From<Vec<T>> for Input {
    fn from(items: Vec<T>) -> Self {
        Input::Items(items.into_iter().map(Into::into).collect())
    }
}

impl From<(f64, &str)> for Input {
    fn from((value, unit): (f64, &str)) -> Self {
        Input::Items(vec![Input::Number(value), Input::from(unit)])
    }
}

impl From<(f64, f64, &str)> for Input {
    fn from((first, second, unit): (f64, f64, &str)) -> Self {
        Input::Items(vec![
            Input::Number(first),
            Input::Number(second),
            Input::from(unit),
        ])
    }
}

impl From<(f64, f64, f64, &str)> for Input {
    fn from((first, second, third, unit): (f64, f64, f64, &str)) -> Self {
        Input::Items(vec![
            Input::Number(first),
            Input::Number(second),
            Input::Number(third),
            Input::from(unit),
        ])
    }
}

impl From<(i64, &str)> for Input {
    fn from((value, unit): (i64, &str)) -> Self {
        Input::Items(vec![Input::Integer(value), Input::from(unit)])
    }
}

impl From<(&[f64], &str)> for Input {
    fn from((values, unit): (&[f64], &str)) -> Self {
        let mut items: Vec<Input> = values.iter().map(|&x| Input::Number(x)).collect();
        items.push(Input::from(unit));
        Input::Items(items)
    }
}

impl From<(Vec<f64>, &str)> for Input {
    fn from((values, unit): (Vec<f64>, &str)) -> Self {
        Input::from((values.as_slice(), unit))
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Integer(n) => write!(f, "{}", n),
            Input::Number(x) => write!(f, "{}", x),
            Input::Text(text) => write!(f, "'{}'", text),
            Input::Items(items) => write!(f, "[{}]", items.iter().format(", ")),
        }
    }
}

/// The numeric values and unit string extracted from an [`Input`].
#[derive(Clone, Debug, PartialEq)]
pub struct Parsed {
    pub values: Vec<f64>,
    pub unit: String,
}

/// Extracts numeric values and a unit from a measurable input.
///
/// A bare number is unitless (`1.1` parses as `[1.1]` with unit `1`).
/// A trailing text item names the unit for the values before it.
/// Nested sequences flatten when they agree on the unit; disagreement
/// is [`ParsingError::MixedUnits`]. Text parses numerically only when
/// the whole input is textual (`("1.1", "2.3", "m")`).
pub fn parse(input: &Input) -> Result<Parsed, ParsingError> {
    match input {
        Input::Integer(n) => Ok(Parsed {
            values: vec![*n as f64],
            unit: UNITY.to_string(),
        }),
        Input::Number(x) => Ok(Parsed {
            values: vec![*x],
            unit: UNITY.to_string(),
        }),
        Input::Text(_) => Err(ParsingError::unparsable(input)),
        Input::Items(items) => parse_items(input, items),
    }
}

/// The distributed form of [`parse`]: every value paired with the unit.
pub fn parse_distributed(input: &Input) -> Result<Vec<(f64, String)>, ParsingError> {
    let parsed = parse(input)?;
    Ok(parsed
        .values
        .iter()
        .map(|&value| (value, parsed.unit.clone()))
        .collect())
}

/// Whether [`parse`] accepts the input.
pub fn ismeasurable(input: &Input) -> bool {
    parse(input).is_ok()
}

/// Converts a measurable input into a [`Measurement`].
pub fn measure(input: &Input) -> Result<Measurement> {
    if let Input::Items(items) = input {
        if items.is_empty() {
            return Err(Error::Empty);
        }
    }
    let parsed = parse(input)?;
    if parsed.values.is_empty() {
        return Err(Error::Empty);
    }
    Measurement::try_new(parsed.values, parsed.unit.as_str())
}

fn parse_items(whole: &Input, items: &[Input]) -> Result<Parsed, ParsingError> {
    match items {
        [] => Err(ParsingError::unparsable(whole)),
        [only] => parse(only),
        _ => {
            if items.iter().all(|item| matches!(item, Input::Text(_))) {
                return parse_textual(whole, items);
            }
            if let Some(Input::Text(unit)) = items.last() {
                let rest = &items[..items.len() - 1];
                if rest.iter().all(|item| matches!(item, Input::Items(_))) {
                    let mut values = Vec::new();
                    for item in rest {
                        flatten_numbers(whole, item, &mut values)?;
                    }
                    return Ok(Parsed {
                        values,
                        unit: unit.clone(),
                    });
                }
                return parse_groups(whole, items);
            }
            if items.iter().all(is_number) {
                return Ok(Parsed {
                    values: items.iter().filter_map(number_of).collect(),
                    unit: UNITY.to_string(),
                });
            }
            if items.iter().all(|item| matches!(item, Input::Items(_))) {
                return parse_uniform(items);
            }
            Err(ParsingError::unparsable(whole))
        }
    }
}

/// All-text input: every item before the unit must read as a number.
fn parse_textual(whole: &Input, items: &[Input]) -> Result<Parsed, ParsingError> {
    match items {
        [rest @ .., Input::Text(unit)] => {
            let mut values = Vec::with_capacity(rest.len());
            for item in rest {
                match item {
                    Input::Text(text) => match text.trim().parse::<f64>() {
                        Ok(x) => values.push(x),
                        Err(_) => return Err(ParsingError::unparsable(whole)),
                    },
                    _ => return Err(ParsingError::unparsable(whole)),
                }
            }
            Ok(Parsed {
                values,
                unit: unit.clone(),
            })
        }
        _ => Err(ParsingError::unparsable(whole)),
    }
}

/// Flat numbers and text: each text item closes a group of the values
/// before it. Groups must agree on the unit.
fn parse_groups(whole: &Input, items: &[Input]) -> Result<Parsed, ParsingError> {
    let mut groups: Vec<(Vec<f64>, &str)> = Vec::new();
    let mut current = Vec::new();
    for item in items {
        match item {
            Input::Integer(n) => current.push(*n as f64),
            Input::Number(x) => current.push(*x),
            Input::Text(unit) => groups.push((std::mem::take(&mut current), unit)),
            Input::Items(_) => return Err(ParsingError::unparsable(whole)),
        }
    }
    if !current.is_empty() || groups.is_empty() {
        return Err(ParsingError::unparsable(whole));
    }
    let unit = groups[0].1;
    for (_, other) in &groups {
        if *other != unit {
            return Err(ParsingError::MixedUnits(
                unit.to_string(),
                (*other).to_string(),
            ));
        }
    }
    let values: Vec<f64> = groups.into_iter().flat_map(|(values, _)| values).collect();
    if values.is_empty() {
        return Err(ParsingError::unparsable(whole));
    }
    Ok(Parsed {
        values,
        unit: unit.to_string(),
    })
}

/// Nested measurables: parse each and require a common unit.
fn parse_uniform(items: &[Input]) -> Result<Parsed, ParsingError> {
    let mut values = Vec::new();
    let mut unit: Option<String> = None;
    for item in items {
        let parsed = parse(item)?;
        match &unit {
            None => unit = Some(parsed.unit),
            Some(seen) => {
                if *seen != parsed.unit {
                    return Err(ParsingError::MixedUnits(seen.clone(), parsed.unit));
                }
            }
        }
        values.extend(parsed.values);
    }
    Ok(Parsed {
        values,
        unit: unit.unwrap_or_else(|| UNITY.to_string()),
    })
}

fn flatten_numbers(whole: &Input, item: &Input, out: &mut Vec<f64>) -> Result<(), ParsingError> {
    match item {
        Input::Integer(n) => out.push(*n as f64),
        Input::Number(x) => out.push(*x),
        Input::Items(items) => {
            for inner in items {
                flatten_numbers(whole, inner, out)?;
            }
        }
        Input::Text(_) => return Err(ParsingError::unparsable(whole)),
    }
    Ok(())
}

fn is_number(item: &Input) -> bool {
    matches!(item, Input::Integer(_) | Input::Number(_))
}

fn number_of(item: &Input) -> Option<f64> {
    match item {
        Input::Integer(n) => Some(*n as f64),
        Input::Number(x) => Some(*x),
        _ => None,
    }
}

/// The seam between user data and measurements.
///
/// Anything that can describe itself as a one-dimensional measured
/// sequence implements this; the physical types accept `Measurable`
/// operands wherever loose input makes sense.
pub trait Measurable {
    fn measure(&self) -> Result<Measurement>;
}

impl<T: Measurable + ?Sized> Measurable for &T {
    fn measure(&self) -> Result<Measurement> {
        (**self).measure()
    }
}

impl Measurable for Input {
    fn measure(&self) -> Result<Measurement> {
        measure(self)
    }
}

impl Measurable for Measurement {
    fn measure(&self) -> Result<Measurement> {
        Ok(self.clone())
    }
}

impl Measurable for Value {
    fn measure(&self) -> Result<Measurement> {
        Ok(Measurement::from(self))
    }
}

impl Measurable for f64 {
    fn measure(&self) -> Result<Measurement> {
        Ok(Measurement::unitless(vec![*self]))
    }
}

impl Measurable for i64 {
    fn measure(&self) -> Result<Measurement> {
        Ok(Measurement::unitless(vec![*self as f64]))
    }
}

impl Measurable for (f64, &str) {
    fn measure(&self) -> Result<Measurement> {
        Measurement::try_new(vec![self.0], self.1)
    }
}

impl Measurable for (Vec<f64>, &str) {
    fn measure(&self) -> Result<Measurement> {
        Measurement::try_new(self.0.clone(), self.1)
    }
}

impl Measurable for [f64] {
    fn measure(&self) -> Result<Measurement> {
        Ok(Measurement::unitless(self.to_vec()))
    }
}

impl<const N: usize> Measurable for [f64; N] {
    fn measure(&self) -> Result<Measurement> {
        Ok(Measurement::unitless(self.to_vec()))
    }
}

impl Measurable for Vec<f64> {
    fn measure(&self) -> Result<Measurement> {
        Ok(Measurement::unitless(self.clone()))
    }
}
