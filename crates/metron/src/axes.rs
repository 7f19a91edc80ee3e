//! Ordered mapping from dimension names to axes.

use std::fmt;
use std::ops::{BitOr, Index};

use itertools::Itertools;
use log::warn;
use thiserror::Error;

use crate::axis::{Axis, Points};
use crate::data::Dimensions;
use crate::error::Result;

/// Ways axes bookkeeping can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AxesError {
    /// Axes must span at least one dimension.
    #[error("cannot create empty axes")]
    Empty,

    /// Names and axes must pair up one to one.
    #[error("{axes} axes for {dims} dimension names")]
    Count { axes: usize, dims: usize },

    /// A named axis does not exist.
    #[error("no axis named '{0}'")]
    Missing(String),

    /// Axis names are unique.
    #[error("axis '{0}' already present")]
    Duplicate(String),

    /// Shared names must carry equal axes or a singular placeholder.
    #[error("axes for '{0}' differ and neither is a singular placeholder")]
    Incompatible(String),

    /// The argument is not a permutation of the axis positions.
    #[error("{0:?} does not permute {1} axes")]
    Permutation(Vec<usize>, usize),
}

/// Where [`Axes::insert`] places a new axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement<'a> {
    /// At this position.
    Index(usize),
    /// Immediately before the named dimension.
    Before(&'a str),
    /// Immediately after the named dimension.
    After(&'a str),
    /// At the end.
    Last,
}

/// An ordered dimension-name-to-axis mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    names: Vec<String>,
    axes: Vec<Axis>,
}

impl Axes {
    /// Trivial integral axes (`0..n` points) over generated names.
    pub fn try_from_shape(shape: &[usize]) -> Result<Self> {
        let names = Dimensions::generated(shape.len());
        Self::build(
            names.iter().map(str::to_string).collect(),
            shape
                .iter()
                .map(|&n| Axis::Points(Points::new(0..n as i64)))
                .collect(),
        )
    }

    /// Trivial integral axes over the given names.
    pub fn try_from_shape_dims(shape: &[usize], names: &[&str]) -> Result<Self> {
        if shape.len() != names.len() {
            return Err(AxesError::Count {
                axes: shape.len(),
                dims: names.len(),
            }
            .into());
        }
        Self::build(
            names.iter().map(|&n| n.to_string()).collect(),
            shape
                .iter()
                .map(|&n| Axis::Points(Points::new(0..n as i64)))
                .collect(),
        )
    }

    /// Axes over generated names.
    pub fn try_from_axes(axes: Vec<Axis>) -> Result<Self> {
        let names = Dimensions::generated(axes.len());
        Self::build(names.iter().map(str::to_string).collect(), axes)
    }

    /// Axes from name-axis pairs, in the given order.
    pub fn try_from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Axis)>,
        S: Into<String>,
    {
        let mut names = Vec::new();
        let mut axes = Vec::new();
        for (name, axis) in pairs {
            names.push(name.into());
            axes.push(axis);
        }
        Self::build(names, axes)
    }

    fn build(names: Vec<String>, axes: Vec<Axis>) -> Result<Self> {
        if names.is_empty() {
            return Err(AxesError::Empty.into());
        }
        if names.len() != axes.len() {
            return Err(AxesError::Count {
                axes: axes.len(),
                dims: names.len(),
            }
            .into());
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(AxesError::Duplicate(name.clone()).into());
            }
        }
        Ok(Self { names, axes })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&Axis> {
        self.position(name).map(|i| &self.axes[i])
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Axis)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.axes.iter())
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.names.iter().cloned())
    }

    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(Axis::len).collect()
    }

    /// Every (name, axis) pair of `self` appears in `other`.
    pub fn is_subset(&self, other: &Axes) -> bool {
        self.iter()
            .all(|(name, axis)| other.get(name) == Some(axis))
    }

    pub fn is_superset(&self, other: &Axes) -> bool {
        other.is_subset(self)
    }

    /// Merges shared names, filling in singular placeholders.
    ///
    /// A shared name must carry equal axes on both sides, or one
    /// side's axis must be a single-element integral placeholder; the
    /// substantive axis wins. Names unique to either side carry over.
    pub fn try_add(&self, other: &Axes) -> Result<Axes> {
        let merged = self.dimensions().try_union(&other.dimensions())?;
        let mut names = Vec::with_capacity(merged.len());
        let mut axes = Vec::with_capacity(merged.len());
        for name in merged.iter() {
            let axis = match (self.get(name), other.get(name)) {
                (Some(a), Some(b)) => {
                    if a == b {
                        a.clone()
                    } else if a.is_singular_points() {
                        b.clone()
                    } else if b.is_singular_points() {
                        a.clone()
                    } else {
                        return Err(AxesError::Incompatible(name.to_string()).into());
                    }
                }
                (Some(a), None) => a.clone(),
                (None, Some(b)) => b.clone(),
                (None, None) => return Err(AxesError::Missing(name.to_string()).into()),
            };
            names.push(name.to_string());
            axes.push(axis);
        }
        Self::build(names, axes)
    }

    /// Installs a new axis under an existing name.
    pub fn replace(&self, name: &str, axis: Axis) -> Result<Axes> {
        let position = self
            .position(name)
            .ok_or_else(|| AxesError::Missing(name.to_string()))?;
        let mut out = self.clone();
        out.axes[position] = axis;
        Ok(out)
    }

    /// Renames a dimension and installs its new axis.
    pub fn rename(&self, old: &str, new: &str, axis: Axis) -> Result<Axes> {
        let position = self
            .position(old)
            .ok_or_else(|| AxesError::Missing(old.to_string()))?;
        if old != new && self.contains(new) {
            return Err(AxesError::Duplicate(new.to_string()).into());
        }
        let mut out = self.clone();
        out.names[position] = new.to_string();
        out.axes[position] = axis;
        Ok(out)
    }

    /// Inserts a new named axis at the requested placement.
    pub fn insert(&self, name: &str, axis: Axis, placement: Placement<'_>) -> Result<Axes> {
        if self.contains(name) {
            return Err(AxesError::Duplicate(name.to_string()).into());
        }
        let position = match placement {
            Placement::Index(index) => {
                if index > self.len() {
                    return Err(AxesError::Permutation(vec![index], self.len()).into());
                }
                index
            }
            Placement::Before(target) => self
                .position(target)
                .ok_or_else(|| AxesError::Missing(target.to_string()))?,
            Placement::After(target) => {
                self.position(target)
                    .ok_or_else(|| AxesError::Missing(target.to_string()))?
                    + 1
            }
            Placement::Last => self.len(),
        };
        let mut out = self.clone();
        out.names.insert(position, name.to_string());
        out.axes.insert(position, axis);
        Ok(out)
    }

    /// Removes a named axis; an unknown name leaves the axes unchanged.
    pub fn without(&self, name: &str) -> Axes {
        match self.try_without(name) {
            Ok(out) => out,
            Err(_) => {
                warn!("no axis named '{}' to remove", name);
                self.clone()
            }
        }
    }

    /// Removes a named axis; an unknown name is an error, as is
    /// removing the last axis.
    pub fn try_without(&self, name: &str) -> Result<Axes> {
        let position = self
            .position(name)
            .ok_or_else(|| AxesError::Missing(name.to_string()))?;
        let mut names = self.names.clone();
        let mut axes = self.axes.clone();
        names.remove(position);
        axes.remove(position);
        Self::build(names, axes)
    }

    /// The named subset, in the given order.
    pub fn extract(&self, names: &[&str]) -> Result<Axes> {
        if names.is_empty() {
            return Err(AxesError::Empty.into());
        }
        let mut out_names = Vec::with_capacity(names.len());
        let mut out_axes = Vec::with_capacity(names.len());
        for &name in names {
            let position = self
                .position(name)
                .ok_or_else(|| AxesError::Missing(name.to_string()))?;
            out_names.push(self.names[position].clone());
            out_axes.push(self.axes[position].clone());
        }
        Self::build(out_names, out_axes)
    }

    /// Reorders the axes by position.
    pub fn permute(&self, order: &[usize]) -> Result<Axes> {
        if !crate::data::is_permutation(order, self.len()) {
            return Err(AxesError::Permutation(order.to_vec(), self.len()).into());
        }
        Ok(Axes {
            names: order.iter().map(|&i| self.names[i].clone()).collect(),
            axes: order.iter().map(|&i| self.axes[i].clone()).collect(),
        })
    }

    /// Reorders the axes by name.
    pub fn permute_names(&self, names: &[&str]) -> Result<Axes> {
        let mut order = Vec::with_capacity(names.len());
        for &name in names {
            let position = self
                .position(name)
                .ok_or_else(|| AxesError::Missing(name.to_string()))?;
            order.push(position);
        }
        self.permute(&order)
    }
}

impl Index<&str> for Axes {
    type Output = Axis;

    fn index(&self, name: &str) -> &Axis {
        match self.get(name) {
            Some(axis) => axis,
            None => panic!("no axis named '{}'", name),
        }
    }
}

/// Ordered merge: left order first, the right operand wins on shared
/// names, names unique to the right append in their own order.
impl BitOr for &Axes {
    type Output = Axes;

    fn bitor(self, rhs: &Axes) -> Axes {
        let mut names = self.names.clone();
        let mut axes = self.axes.clone();
        for (name, axis) in rhs.iter() {
            match names.iter().position(|n| n == name) {
                Some(position) => axes[position] = axis.clone(),
                None => {
                    names.push(name.to_string());
                    axes.push(axis.clone());
                }
            }
        }
        Axes { names, axes }
    }
}

impl fmt::Display for Axes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self.iter().map(|(name, axis)| format!("{}: {}", name, axis));
        write!(f, "{{{}}}", pairs.format(", "))
    }
}
