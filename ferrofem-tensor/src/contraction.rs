//! Quadrature-point tensor contractions.
//!
//! Each contraction fixes its own pairing of tensor indices with vector arguments. These pairings
//! are tied to the layout of the corresponding material tensor and are deliberately kept as
//! separate functions with literal index tables instead of going through a single generic routine.
use crate::{Component, RankFourTensor, RankThreeTensor, Real};
use nalgebra::Vector3;

/// The (row, column) strain index pairs summed by the piezoelectric strain contraction, in
/// summation order.
///
/// Every pair is visited once. The symmetric partial sum attached to a pair means that the diagonal
/// pairs effectively contribute twice their displacement gradient, while each of the two
/// off-diagonal orderings contributes the symmetric sum once.
pub const STRAIN_PAIRS: [(usize, usize); 9] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 1),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
];

/// The electrostrictive product
/// $$
/// \sum_{k, l} Q_{c k a l} \, v_k \, w_l,
/// $$
/// where $c$ is the equation `component`, $a$ is the free `axis`, $v$ is the gradient of the test
/// function and $w$ is the polarization.
///
/// The first and third indices of $Q$ are fixed while the second index is contracted with the test
/// gradient and the fourth with the polarization.
pub fn electrostrictive_product<T: Real>(
    tensor: &RankFourTensor<T>,
    component: Component,
    grad_test: &Vector3<T>,
    axis: Component,
    polarization: &Vector3<T>,
) -> T {
    let c = component.index();
    let a = axis.index();
    let mut sum = T::zero();
    for k in 0..3 {
        for l in 0..3 {
            sum += tensor[(c, k, a, l)] * grad_test[k] * polarization[l];
        }
    }
    sum
}

/// The symmetric strain sum
/// $$
/// \sum_{(r, c)} T_{j r c} \left( \frac{\partial u_r}{\partial x_c} + \frac{\partial u_c}{\partial x_r} \right)
/// $$
/// over [`STRAIN_PAIRS`], for the test-space index $j$ = `axis`.
///
/// `displacement_gradients[r]` holds $\nabla u_r$.
pub fn piezoelectric_strain_sum<T: Real>(
    tensor: &RankThreeTensor<T>,
    axis: Component,
    displacement_gradients: &[Vector3<T>; 3],
) -> T {
    let j = axis.index();
    let grad_u = displacement_gradients;
    let mut sum = T::zero();
    for &(row, col) in &STRAIN_PAIRS {
        sum += tensor[(j, row, col)] * (grad_u[row][col] + grad_u[col][row]);
    }
    sum
}

/// Derivative of [`piezoelectric_strain_sum`] with respect to the coefficient of a trial function
/// $\phi$ in the displacement component $m$ = `displacement`.
///
/// This is
/// $$
/// \sum_{(r, c)} T_{j r c} \left( \delta_{r m} \frac{\partial \phi}{\partial x_c} + \delta_{c m} \frac{\partial \phi}{\partial x_r} \right),
/// $$
/// where the sum runs over the same [`STRAIN_PAIRS`] as the strain sum itself.
pub fn piezoelectric_strain_derivative<T: Real>(
    tensor: &RankThreeTensor<T>,
    axis: Component,
    displacement: Component,
    grad_trial: &Vector3<T>,
) -> T {
    let j = axis.index();
    let m = displacement.index();
    let mut sum = T::zero();
    for &(row, col) in &STRAIN_PAIRS {
        if row == m {
            sum += tensor[(j, row, col)] * grad_trial[col];
        }
        if col == m {
            sum += tensor[(j, row, col)] * grad_trial[row];
        }
    }
    sum
}

/// The diagonal anisotropic contraction $\sum_a \varepsilon_a \, v_a \, w_a$.
pub fn diagonal_contraction<T: Real>(coefficients: &Vector3<T>, v: &Vector3<T>, w: &Vector3<T>) -> T {
    let mut sum = T::zero();
    for a in 0..3 {
        sum += coefficients[a] * v[a] * w[a];
    }
    sum
}
