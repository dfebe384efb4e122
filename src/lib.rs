//! Quadrature-point residual and Jacobian kernels for coupled ferroelectric finite element models.
//!
//! A host finite element framework evaluates [`Kernel`](kernel::Kernel)s at every quadrature
//! point of every element, supplying test and trial function samples together with the coupled
//! field samples and material values at that point. The kernels return the scalar contributions
//! to the weak-form residual and its Jacobian.
//!
//! Kernels are configured by name. Variables are resolved against a
//! [`VariableRegistry`](variable::VariableRegistry) and material properties against a
//! [`MaterialPropertyRegistry`](material::MaterialPropertyRegistry), so that every unknown name is
//! reported when a kernel is built rather than when it is evaluated.
//!
//! The material tensors and the contractions the kernels are built from live in the
//! [`tensor`] module.
pub mod assembly;
pub mod auxiliary;
pub mod energy;
pub mod field;
pub mod kernel;
pub mod kernels;
pub mod material;
pub mod variable;

#[cfg(feature = "proptest")]
pub mod proptest;

pub mod tensor {
    pub use ferrofem_tensor::*;
}

pub use ferrofem_tensor::{Component, Real};

pub extern crate nalgebra;
