//! `proptest` strategies for quadrature-point samples.
use crate::field::{FieldSample, ShapeFunctionSample};
use ::proptest::prelude::*;
use nalgebra::Vector3;

pub use ferrofem_tensor::proptest::*;

/// Strategy producing vectors with entries in `[-range, range]`.
pub fn vector3(range: f64) -> impl Strategy<Value = Vector3<f64>> {
    [-range..=range, -range..=range, -range..=range].prop_map(|[x, y, z]| Vector3::new(x, y, z))
}

/// Strategy producing shape function samples with value and gradient entries in `[-1, 1]`.
pub fn shape_function_sample() -> impl Strategy<Value = ShapeFunctionSample<f64>> {
    (-1.0..=1.0, vector3(1.0)).prop_map(|(value, gradient)| ShapeFunctionSample::new(value, gradient))
}

/// Strategy producing field samples with value and gradient entries in `[-range, range]`.
pub fn field_sample(range: f64) -> impl Strategy<Value = FieldSample<f64>> {
    (-range..=range, vector3(range)).prop_map(|(value, gradient)| FieldSample::new(value, gradient))
}
