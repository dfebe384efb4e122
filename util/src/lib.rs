//! Test helpers shared by the workspace crates.
use nalgebra::{DMatrix, DVector};

#[macro_export]
macro_rules! assert_panics {
    ($e:expr) => {{
        use std::panic::catch_unwind;
        use std::stringify;
        let expr_string = stringify!($e);
        let result = catch_unwind(|| $e);
        if result.is_ok() {
            panic!("assert_panics!({}) failed.", expr_string);
        }
    }};
}

/// Asserts that `approx` matches `exact` up to the given [`relative_error`].
#[macro_export]
macro_rules! assert_relative_error {
    ($approx:expr, $exact:expr, tol = $tol:expr) => {{
        let approx: f64 = $approx;
        let exact: f64 = $exact;
        let err = $crate::relative_error(approx, exact);
        assert!(
            err <= $tol,
            "relative error {:e} exceeds {:e} (approx: {:e}, exact: {:e})",
            err,
            $tol,
            approx,
            exact
        );
    }};
}

/// Relative error of `approx` with respect to `exact`.
///
/// Falls back to the absolute error when $|\text{exact}| < 1$, so that vanishing reference values
/// do not blow up the error.
pub fn relative_error(approx: f64, exact: f64) -> f64 {
    (approx - exact).abs() / exact.abs().max(1.0)
}

/// Approximates $f'(0)$ by $(f(h) - f(0)) / h$.
pub fn forward_difference(mut f: impl FnMut(f64) -> f64, h: f64) -> f64 {
    (f(h) - f(0.0)) / h
}

/// Approximates $f'(0)$ by $(f(h) - f(-h)) / 2h$.
pub fn central_difference(mut f: impl FnMut(f64) -> f64, h: f64) -> f64 {
    (f(h) - f(-h)) / (2.0 * h)
}

/// Approximates the Jacobian of `f: R^n -> R^m` at `x` by forward differences, one column per
/// perturbed coordinate.
pub fn finite_difference_jacobian(
    mut f: impl FnMut(&DVector<f64>) -> DVector<f64>,
    x: &DVector<f64>,
    h: f64,
) -> DMatrix<f64> {
    let f0 = f(x);
    let mut jacobian = DMatrix::zeros(f0.len(), x.len());
    let mut x_perturbed = x.clone();
    for j in 0..x.len() {
        x_perturbed[j] += h;
        let column = (f(&x_perturbed) - &f0) / h;
        jacobian.set_column(j, &column);
        x_perturbed[j] = x[j];
    }
    jacobian
}
