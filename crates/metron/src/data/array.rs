//! Raw numeric arrays with named dimensions.

use log::debug;
use ndarray::{ArrayD, Axis};

use crate::error::{Error, Result};

use super::dimensions::{is_permutation, Dimensions, DimensionsError};

/// An n-dimensional value array whose axes carry dimension names.
///
/// The names follow the values through every permutation, so axis
/// order is an implementation detail wherever names are available.
#[derive(Clone, Debug, PartialEq)]
pub struct Array {
    values: ArrayD<f64>,
    dimensions: Dimensions,
}

impl Array {
    /// Binds values to dimension names.
    ///
    /// Panics when the name count does not match the array rank;
    /// [`Array::try_new`] is the checked form.
    pub fn new(values: ArrayD<f64>, dimensions: Dimensions) -> Self {
        match Self::try_new(values, dimensions) {
            Ok(array) => array,
            Err(error) => panic!("{error}"),
        }
    }

    pub fn try_new(values: ArrayD<f64>, dimensions: Dimensions) -> Result<Self> {
        if values.ndim() != dimensions.len() {
            return Err(DimensionsError::Rank {
                ndim: values.ndim(),
                len: dimensions.len(),
            }
            .into());
        }
        Ok(Self { values, dimensions })
    }

    /// Binds values to generated dimension names.
    pub fn from_values(values: ArrayD<f64>) -> Self {
        let dimensions = Dimensions::generated(values.ndim());
        Self { values, dimensions }
    }

    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    pub fn ndim(&self) -> usize {
        self.values.ndim()
    }

    pub fn get(&self, index: &[usize]) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Permutes the axes; `None` reverses them. Dimension names move
    /// with their axes.
    pub fn transpose(&self, order: Option<&[usize]>) -> Result<Self> {
        let order: Vec<usize> = match order {
            Some(order) => order.to_vec(),
            None => (0..self.ndim()).rev().collect(),
        };
        if !is_permutation(&order, self.ndim()) {
            return Err(DimensionsError::Permutation(order, self.ndim()).into());
        }
        let values = self.values.clone().permuted_axes(order.as_slice());
        let dimensions = self.dimensions.permute(&order)?;
        Ok(Self { values, dimensions })
    }

    /// Permutes the axes into the order of the given dimension names.
    pub fn transpose_names(&self, names: &[&str]) -> Result<Self> {
        let mut order = Vec::with_capacity(names.len());
        for name in names {
            let position = self
                .dimensions
                .index_of(name)
                .ok_or_else(|| DimensionsError::Missing(name.to_string()))?;
            order.push(position);
        }
        self.transpose(Some(&order))
    }
}

/// Aligns two arrays by dimension name onto their merged dimensions.
///
/// Each operand gains a singleton axis for every merged dimension it
/// lacks; the padded shapes must then broadcast elementwise. Returns
/// both broadcast value arrays along with the merged dimensions.
pub fn remesh(a: &Array, b: &Array) -> Result<(ArrayD<f64>, ArrayD<f64>, Dimensions)> {
    let merged = a.dimensions.try_union(&b.dimensions)?;
    let left = aligned(&a.values, &a.dimensions, &merged);
    let right = aligned(&b.values, &b.dimensions, &merged);
    let shape = joint_shape(left.shape(), right.shape())?;
    debug!("remesh onto {} with shape {:?}", merged, shape);
    let left = broadcast_values(&left, &shape)?;
    let right = broadcast_values(&right, &shape)?;
    Ok((left, right, merged))
}

/// Inserts singleton axes so that `values` spans `merged`.
///
/// The union preserves each operand's internal axis order, so no
/// permutation is needed here.
fn aligned(values: &ArrayD<f64>, dims: &Dimensions, merged: &Dimensions) -> ArrayD<f64> {
    let mut out = values.clone();
    for (position, name) in merged.iter().enumerate() {
        if !dims.contains(name) {
            out = out.insert_axis(Axis(position));
        }
    }
    out
}

fn joint_shape(left: &[usize], right: &[usize]) -> Result<Vec<usize>> {
    let mut shape = Vec::with_capacity(left.len());
    for (&l, &r) in left.iter().zip(right) {
        if l == r || r == 1 {
            shape.push(l);
        } else if l == 1 {
            shape.push(r);
        } else {
            return Err(Error::ShapeMismatch {
                left: left.to_vec(),
                right: right.to_vec(),
            });
        }
    }
    Ok(shape)
}

fn broadcast_values(values: &ArrayD<f64>, shape: &[usize]) -> Result<ArrayD<f64>> {
    values
        .broadcast(shape)
        .map(|view| view.to_owned())
        .ok_or_else(|| Error::ShapeMismatch {
            left: values.shape().to_vec(),
            right: shape.to_vec(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn labelled(shape: &[usize], names: &[&str]) -> Array {
        let size: usize = shape.iter().product();
        let values = ArrayD::from_shape_vec(IxDyn(shape), (0..size).map(|i| i as f64).collect())
            .unwrap();
        Array::new(values, Dimensions::new(names.iter().copied()))
    }

    #[test]
    fn remesh_inserts_missing_dimensions() {
        let xy = labelled(&[3, 2], &["x", "y"]);
        let yz = labelled(&[2, 4], &["y", "z"]);
        let (left, right, merged) = remesh(&xy, &yz).unwrap();
        assert_eq!(merged, ["x", "y", "z"]);
        assert_eq!(left.shape(), &[3, 2, 4]);
        assert_eq!(right.shape(), &[3, 2, 4]);
    }

    #[test]
    fn remesh_rejects_incompatible_extents() {
        let a = labelled(&[3, 2], &["x", "y"]);
        let b = labelled(&[3, 4], &["x", "y"]);
        assert!(remesh(&a, &b).is_err());
    }

    #[test]
    fn transpose_carries_names() {
        let xy = labelled(&[3, 2], &["x", "y"]);
        let yx = xy.transpose(None).unwrap();
        assert_eq!(*yx.dimensions(), ["y", "x"]);
        assert_eq!(yx.shape(), &[2, 3]);
        assert_eq!(yx.get(&[1, 2]), xy.get(&[2, 1]));
    }
}
