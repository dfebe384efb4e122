//! Local element assembly of kernel contributions.
//!
//! The host owns the mesh, the quadrature rules and the global system. What it hands to this
//! module is one [`ElementData`] per element: quadrature weights, shape function samples and
//! the field and material values at each quadrature point. The routines here sum kernel
//! contributions into dense element vectors and matrices, which the host then scatters into its
//! global system.
use crate::field::{FieldSample, FieldSamples, ShapeFunctionSample};
use crate::kernel::{Kernel, QuadraturePointData};
use crate::material::MaterialPoint;
use crate::variable::VariableId;
use crate::Real;
use eyre::eyre;
use itertools::izip;
use log::debug;
use nalgebra::{DMatrix, DMatrixViewMut, DVector, DVectorViewMut, Scalar};
use rayon::prelude::*;

/// Quadrature data of a single element.
///
/// All per-quadrature-point arrays have the same length, and every entry of
/// `basis` holds one sample per element node.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementData<T: Scalar> {
    /// Quadrature weights, including the determinant of the element Jacobian.
    weights: Vec<T>,
    /// `basis[q][i]` is the $i$-th shape function at quadrature point $q$.
    basis: Vec<Vec<ShapeFunctionSample<T>>>,
    fields: Vec<FieldSamples<T>>,
    materials: Vec<MaterialPoint<T>>,
}

impl<T: Real> ElementData<T> {
    pub fn try_new(
        weights: Vec<T>,
        basis: Vec<Vec<ShapeFunctionSample<T>>>,
        fields: Vec<FieldSamples<T>>,
        materials: Vec<MaterialPoint<T>>,
    ) -> eyre::Result<Self> {
        let num_points = weights.len();
        if basis.len() != num_points || fields.len() != num_points || materials.len() != num_points {
            return Err(eyre!(
                "inconsistent quadrature data: {} weights, {} basis samples, {} field samples, {} material points",
                num_points,
                basis.len(),
                fields.len(),
                materials.len()
            ));
        }
        let num_nodes = basis.first().map(Vec::len).unwrap_or(0);
        if let Some(q) = basis.iter().position(|samples| samples.len() != num_nodes) {
            return Err(eyre!(
                "quadrature point {q} has {} shape function samples, expected {num_nodes}",
                basis[q].len()
            ));
        }
        Ok(Self {
            weights,
            basis,
            fields,
            materials,
        })
    }

    pub fn num_quadrature_points(&self) -> usize {
        self.weights.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.basis.first().map(Vec::len).unwrap_or(0)
    }

    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    pub fn basis(&self, q: usize) -> &[ShapeFunctionSample<T>] {
        &self.basis[q]
    }

    pub fn quadrature_point(&self, q: usize) -> QuadraturePointData<T> {
        QuadraturePointData::new(&self.fields[q], &self.materials[q])
    }

    pub fn fields_mut(&mut self, q: usize) -> &mut FieldSamples<T> {
        &mut self.fields[q]
    }

    pub fn material_mut(&mut self, q: usize) -> &mut MaterialPoint<T> {
        &mut self.materials[q]
    }

    /// Resamples a variable at every quadrature point from its nodal coefficients on this element.
    ///
    /// # Panics
    ///
    /// Panics if the number of coefficients differs from the number of element nodes.
    pub fn interpolate_field(&mut self, variable: VariableId, coefficients: &[T]) {
        for (basis, fields) in izip!(&self.basis, &mut self.fields) {
            fields.set(variable, FieldSample::interpolate(coefficients, basis));
        }
    }
}

/// Assembles the element residual $R_i = \sum_q w_q R(\psi_i, x_q)$ of a kernel.
///
/// # Panics
///
/// Panics if the output length differs from the number of element nodes.
pub fn assemble_element_residual<T, K>(mut output: DVectorViewMut<T>, kernel: &K, element: &ElementData<T>)
where
    T: Real,
    K: Kernel<T> + ?Sized,
{
    assert_eq!(output.len(), element.num_nodes(), "Output vector dimension mismatch");
    output.fill(T::zero());

    for (q, &weight) in element.weights.iter().enumerate() {
        let qp = element.quadrature_point(q);
        for (i, test) in element.basis(q).iter().enumerate() {
            output[i] += weight * kernel.compute_residual(test, &qp);
        }
    }
}

/// Assembles the element Jacobian block of a kernel with respect to `jvar`.
///
/// The block is computed with [`Kernel::compute_jacobian`] when `jvar` is the kernel's own
/// variable, and with [`Kernel::compute_off_diagonal_jacobian`] otherwise. Rows correspond to test
/// functions and columns to trial functions.
///
/// # Panics
///
/// Panics if the output is not a square matrix with one row per element node.
pub fn assemble_element_jacobian<T, K>(
    mut output: DMatrixViewMut<T>,
    kernel: &K,
    element: &ElementData<T>,
    jvar: VariableId,
) where
    T: Real,
    K: Kernel<T> + ?Sized,
{
    let n = element.num_nodes();
    assert_eq!(output.nrows(), n, "Output matrix dimension mismatch");
    assert_eq!(output.ncols(), n, "Output matrix dimension mismatch");
    output.fill(T::zero());

    let diagonal = jvar == kernel.variable();
    for (q, &weight) in element.weights.iter().enumerate() {
        let qp = element.quadrature_point(q);
        let basis = element.basis(q);
        for (i, test) in basis.iter().enumerate() {
            for (j, trial) in basis.iter().enumerate() {
                let entry = if diagonal {
                    kernel.compute_jacobian(test, trial, &qp)
                } else {
                    kernel.compute_off_diagonal_jacobian(test, trial, jvar, &qp)
                };
                output[(i, j)] += weight * entry;
            }
        }
    }
}

/// Assembles the residuals of many elements in parallel.
pub fn assemble_element_residuals_par<T, K>(kernel: &K, elements: &[ElementData<T>]) -> Vec<DVector<T>>
where
    T: Real + Send + Sync,
    K: Kernel<T> + ?Sized,
{
    debug!("Assembling residuals of {} elements in parallel", elements.len());
    elements
        .par_iter()
        .with_min_len(50)
        .map(|element| {
            let mut residual = DVector::zeros(element.num_nodes());
            assemble_element_residual(DVectorViewMut::from(&mut residual), kernel, element);
            residual
        })
        .collect()
}

/// Assembles the Jacobian blocks of many elements with respect to `jvar` in parallel.
pub fn assemble_element_jacobians_par<T, K>(
    kernel: &K,
    elements: &[ElementData<T>],
    jvar: VariableId,
) -> Vec<DMatrix<T>>
where
    T: Real + Send + Sync,
    K: Kernel<T> + ?Sized,
{
    debug!(
        "Assembling Jacobian blocks of {} elements with respect to {jvar} in parallel",
        elements.len()
    );
    elements
        .par_iter()
        .with_min_len(50)
        .map(|element| {
            let n = element.num_nodes();
            let mut jacobian = DMatrix::zeros(n, n);
            assemble_element_jacobian(DMatrixViewMut::from(&mut jacobian), kernel, element, jvar);
            jacobian
        })
        .collect()
}
