//! Ordered, unique dimension names.

use std::fmt;
use std::ops::{BitAnd, BitOr, Index, Sub};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ways dimension bookkeeping can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DimensionsError {
    /// Two orderings disagree on the relative order of shared names.
    #[error("dimensions {0} and {1} order their shared names differently")]
    OrderConflict(String, String),

    /// A named dimension does not exist.
    #[error("no dimension named '{0}'")]
    Missing(String),

    /// Dimension names are unique.
    #[error("dimension '{0}' already present")]
    Duplicate(String),

    /// A positional argument fell outside the dimension count.
    #[error("position {position} is out of range for {len} dimensions")]
    Position { position: usize, len: usize },

    /// The argument is not a permutation of the dimension positions.
    #[error("{0:?} does not permute {1} dimensions")]
    Permutation(Vec<usize>, usize),

    /// The number of names must match the array rank.
    #[error("{len} dimension names for an array of rank {ndim}")]
    Rank { ndim: usize, len: usize },
}

/// An ordered collection of unique dimension names.
///
/// Construction deduplicates while preserving the first occurrence of
/// each name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    names: Vec<String>,
}

impl Dimensions {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { names: unique }
    }

    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Placeholder names `x0 .. x{n-1}`.
    pub fn generated(n: usize) -> Self {
        Self {
            names: (0..n).map(|i| format!("x{}", i)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Every name of `self` appears in `other`.
    pub fn is_subset(&self, other: &Dimensions) -> bool {
        self.names.iter().all(|n| other.contains(n))
    }

    pub fn is_superset(&self, other: &Dimensions) -> bool {
        other.is_subset(self)
    }

    /// Merges two orderings into one that preserves both.
    ///
    /// Names unique to `other` enter immediately before the next name
    /// the operands share; trailing names append. Shared names must
    /// appear in the same relative order on both sides.
    pub fn try_union(&self, other: &Dimensions) -> Result<Dimensions, DimensionsError> {
        let shared_left: Vec<&String> =
            self.names.iter().filter(|n| other.contains(n)).collect();
        let shared_right: Vec<&String> =
            other.names.iter().filter(|n| self.contains(n)).collect();
        if shared_left != shared_right {
            return Err(DimensionsError::OrderConflict(
                self.to_string(),
                other.to_string(),
            ));
        }
        let mut merged = self.names.clone();
        for (i, name) in other.names.iter().enumerate() {
            if merged.contains(name) {
                continue;
            }
            let anchor = other.names[i + 1..]
                .iter()
                .find_map(|later| merged.iter().position(|m| m == later));
            match anchor {
                Some(position) => merged.insert(position, name.clone()),
                None => merged.push(name.clone()),
            }
        }
        Ok(Dimensions { names: merged })
    }

    /// Renames a dimension in place.
    pub fn replace(&self, old: &str, new: &str) -> Result<Dimensions, DimensionsError> {
        let position = self
            .index_of(old)
            .ok_or_else(|| DimensionsError::Missing(old.to_string()))?;
        let mut names = self.names.clone();
        names[position] = new.to_string();
        Ok(Dimensions { names })
    }

    /// Inserts a new name at `position`.
    pub fn insert(&self, name: &str, position: usize) -> Result<Dimensions, DimensionsError> {
        if self.contains(name) {
            return Err(DimensionsError::Duplicate(name.to_string()));
        }
        if position > self.len() {
            return Err(DimensionsError::Position {
                position,
                len: self.len(),
            });
        }
        let mut names = self.names.clone();
        names.insert(position, name.to_string());
        Ok(Dimensions { names })
    }

    /// Reorders the names by position.
    pub fn permute(&self, order: &[usize]) -> Result<Dimensions, DimensionsError> {
        if !is_permutation(order, self.len()) {
            return Err(DimensionsError::Permutation(order.to_vec(), self.len()));
        }
        Ok(Dimensions {
            names: order.iter().map(|&i| self.names[i].clone()).collect(),
        })
    }
}

pub(crate) fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &position in order {
        if position >= len || seen[position] {
            return false;
        }
        seen[position] = true;
    }
    true
}

impl Index<usize> for Dimensions {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.names[index]
    }
}

impl<S: Into<String>> FromIterator<S> for Dimensions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Dimensions::new(iter)
    }
}

impl From<&[&str]> for Dimensions {
    fn from(names: &[&str]) -> Self {
        Dimensions::new(names.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Dimensions {
    fn from(names: [&str; N]) -> Self {
        Dimensions::new(names)
    }
}

impl From<Vec<&str>> for Dimensions {
    fn from(names: Vec<&str>) -> Self {
        Dimensions::new(names)
    }
}

impl From<Vec<String>> for Dimensions {
    fn from(names: Vec<String>) -> Self {
        Dimensions::new(names)
    }
}

impl PartialEq<[&str]> for Dimensions {
    fn eq(&self, other: &[&str]) -> bool {
        self.names.len() == other.len()
            && self.names.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for Dimensions {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}

impl PartialEq<Vec<&str>> for Dimensions {
    fn eq(&self, other: &Vec<&str>) -> bool {
        *self == other[..]
    }
}

/// Ordered union. Panics on an order conflict; [`Dimensions::try_union`]
/// is the checked form.
impl BitOr for &Dimensions {
    type Output = Dimensions;

    fn bitor(self, rhs: &Dimensions) -> Dimensions {
        match self.try_union(rhs) {
            Ok(merged) => merged,
            Err(error) => panic!("{error}"),
        }
    }
}

impl BitOr<&str> for &Dimensions {
    type Output = Dimensions;

    fn bitor(self, rhs: &str) -> Dimensions {
        self | &Dimensions::new([rhs])
    }
}

/// Intersection, in the left operand's order.
impl BitAnd for &Dimensions {
    type Output = Dimensions;

    fn bitand(self, rhs: &Dimensions) -> Dimensions {
        Dimensions {
            names: self
                .names
                .iter()
                .filter(|n| rhs.contains(n))
                .cloned()
                .collect(),
        }
    }
}

impl Sub<&str> for &Dimensions {
    type Output = Dimensions;

    fn sub(self, rhs: &str) -> Dimensions {
        Dimensions {
            names: self.names.iter().filter(|n| *n != rhs).cloned().collect(),
        }
    }
}

impl Sub for &Dimensions {
    type Output = Dimensions;

    fn sub(self, rhs: &Dimensions) -> Dimensions {
        Dimensions {
            names: self
                .names
                .iter()
                .filter(|n| !rhs.contains(n))
                .cloned()
                .collect(),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.names.iter().format(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------
    // Union ordering
    // ------------------------------------------------------------------

    #[test]
    fn union_interleaves_by_shared_names() {
        let yz = Dimensions::from(["y", "z"]);
        let xy = Dimensions::from(["x", "y"]);
        assert_eq!(yz.try_union(&xy).unwrap(), ["x", "y", "z"]);
        assert_eq!(xy.try_union(&yz).unwrap(), ["x", "y", "z"]);
    }

    #[test]
    fn union_appends_disjoint_names() {
        let zw = Dimensions::from(["z", "w"]);
        let xy = Dimensions::from(["x", "y"]);
        assert_eq!(zw.try_union(&xy).unwrap(), ["z", "w", "x", "y"]);
    }

    #[test]
    fn union_rejects_conflicting_shared_order() {
        let xyzw = Dimensions::from(["x", "y", "z", "w"]);
        let xwzy = Dimensions::from(["x", "w", "z", "y"]);
        assert!(matches!(
            xyzw.try_union(&xwzy),
            Err(DimensionsError::OrderConflict(_, _))
        ));
    }
}
