use crate::field::{FieldSamples, ShapeFunctionSample};
use crate::material::MaterialPoint;
use crate::variable::VariableId;
use crate::Real;
use nalgebra::Scalar;

/// Coupled field samples and material values at one quadrature point.
///
/// Supplied fresh by the host for every evaluation.
#[derive(Copy, Clone, Debug)]
pub struct QuadraturePointData<'a, T: Scalar> {
    pub fields: &'a FieldSamples<T>,
    pub material: &'a MaterialPoint<T>,
}

impl<'a, T: Scalar> QuadraturePointData<'a, T> {
    pub fn new(fields: &'a FieldSamples<T>, material: &'a MaterialPoint<T>) -> Self {
        Self { fields, material }
    }
}

/// A residual kernel together with its Jacobian contributions.
///
/// A kernel assembles one scalar equation for its primary [`variable`](Kernel::variable). For test
/// function $\psi_i$ and trial function $\phi_j$ at a quadrature point:
///
/// - [`compute_residual`](Kernel::compute_residual) returns the contribution $R_i$,
/// - [`compute_jacobian`](Kernel::compute_jacobian) returns $\partial R_i / \partial u_j$ for the
///   primary variable,
/// - [`compute_off_diagonal_jacobian`](Kernel::compute_off_diagonal_jacobian) returns
///   $\partial R_i / \partial v_j$ for the coupled variable `jvar`.
///
/// Every evaluation is a pure function of its arguments and the parameters fixed at construction.
pub trait Kernel<T: Real>: Send + Sync {
    /// The variable whose equation this kernel contributes to.
    fn variable(&self) -> VariableId;

    fn compute_residual(&self, test: &ShapeFunctionSample<T>, qp: &QuadraturePointData<T>) -> T;

    fn compute_jacobian(
        &self,
        test: &ShapeFunctionSample<T>,
        trial: &ShapeFunctionSample<T>,
        qp: &QuadraturePointData<T>,
    ) -> T;

    /// Defaults to zero, which is correct for kernels without cross-field coupling.
    fn compute_off_diagonal_jacobian(
        &self,
        test: &ShapeFunctionSample<T>,
        trial: &ShapeFunctionSample<T>,
        jvar: VariableId,
        qp: &QuadraturePointData<T>,
    ) -> T {
        let _ = (test, trial, jvar, qp);
        T::zero()
    }
}

impl<T, K> Kernel<T> for Box<K>
where
    T: Real,
    K: Kernel<T> + ?Sized,
{
    fn variable(&self) -> VariableId {
        K::variable(self)
    }

    fn compute_residual(&self, test: &ShapeFunctionSample<T>, qp: &QuadraturePointData<T>) -> T {
        K::compute_residual(self, test, qp)
    }

    fn compute_jacobian(
        &self,
        test: &ShapeFunctionSample<T>,
        trial: &ShapeFunctionSample<T>,
        qp: &QuadraturePointData<T>,
    ) -> T {
        K::compute_jacobian(self, test, trial, qp)
    }

    fn compute_off_diagonal_jacobian(
        &self,
        test: &ShapeFunctionSample<T>,
        trial: &ShapeFunctionSample<T>,
        jvar: VariableId,
        qp: &QuadraturePointData<T>,
    ) -> T {
        K::compute_off_diagonal_jacobian(self, test, trial, jvar, qp)
    }
}
