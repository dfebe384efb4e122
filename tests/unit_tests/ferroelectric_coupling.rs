use super::fixtures::{shape_function, Problem};
use ferrofem::field::{FieldSample, FieldSamples, ShapeFunctionSample};
use ferrofem::kernel::{Kernel, QuadraturePointData};
use ferrofem::kernels::{FerroelectricCoupling, FerroelectricCouplingConfig};
use ferrofem::material::{MaterialPoint, MaterialPropertyKind, MaterialPropertyRegistry};
use ferrofem::nalgebra::{vector, Vector3};
use ferrofem::proptest::{minor_symmetric_rank_four_tensor, rank_four_tensor, shape_function_sample, vector3};
use ferrofem::tensor::contraction::electrostrictive_product;
use ferrofem::tensor::RankFourTensor;
use ferrofem::variable::Coupled;
use ferrofem::Component;
use matrixcompare::assert_scalar_eq;
use proptest::prelude::*;
use util::{assert_relative_error, central_difference, forward_difference};

fn build(problem: &Problem, component: Component, len_scale: f64) -> FerroelectricCoupling<f64> {
    let variable = ["u_x", "u_y", "u_z"][component.index()];
    FerroelectricCouplingConfig::new(variable, component, ["u_x", "u_y"], ["polar_x", "polar_y"])
        .with_z("u_z", "polar_z")
        .with_len_scale(len_scale)
        .build(&problem.variables, &problem.materials)
        .unwrap()
}

fn samples(problem: &Problem, q: &RankFourTensor<f64>, p: &Vector3<f64>) -> (FieldSamples<f64>, MaterialPoint<f64>) {
    let mut fields = problem.fields();
    for (axis, &id) in problem.polar.iter().enumerate() {
        fields.set(id, FieldSample::from_value(p[axis]));
    }
    let material = problem.material().with(problem.electrostrictive_tensor, *q);
    (fields, material)
}

fn residual_at(
    kernel: &FerroelectricCoupling<f64>,
    problem: &Problem,
    q: &RankFourTensor<f64>,
    p: &Vector3<f64>,
    test: &ShapeFunctionSample<f64>,
) -> f64 {
    let (fields, material) = samples(problem, q, p);
    kernel.compute_residual(test, &QuadraturePointData::new(&fields, &material))
}

fn component() -> impl Strategy<Value = Component> {
    prop_oneof![Just(Component::X), Just(Component::Y), Just(Component::Z)]
}

#[test]
fn residual_with_cubic_tensor() {
    let problem = Problem::new();
    let q = RankFourTensor::from_cubic(2.0, 1.0, 0.5);
    let p = vector![1.0, 2.0, 0.0];
    let test = shape_function(0.3, [1.0, 0.0, 0.0]);

    // Q_{0000} p_0 p_0 + Q_{0011} p_1 p_1
    let kernel = build(&problem, Component::X, 1.0);
    assert_scalar_eq!(residual_at(&kernel, &problem, &q, &p, &test), 6.0, comp = abs, tol = 1e-14);

    // Q_{1001} p_1 p_0 + Q_{1010} p_0 p_1
    let kernel = build(&problem, Component::Y, 1.0);
    assert_scalar_eq!(residual_at(&kernel, &problem, &q, &p, &test), 2.0, comp = abs, tol = 1e-14);

    let kernel = build(&problem, Component::Z, 1.0);
    assert_scalar_eq!(residual_at(&kernel, &problem, &q, &p, &test), 0.0, comp = abs, tol = 1e-14);
}

#[test]
fn off_diagonal_jacobian_with_cubic_tensor() {
    let problem = Problem::new();
    let kernel = build(&problem, Component::X, 1.0);
    let q = RankFourTensor::from_cubic(2.0, 1.0, 0.5);
    let p = vector![1.0, 2.0, 0.0];
    let (fields, material) = samples(&problem, &q, &p);
    let qp = QuadraturePointData::new(&fields, &material);
    let test = shape_function(0.3, [1.0, 0.0, 0.0]);
    let trial = shape_function(0.5, [0.0, 7.0, 0.0]);

    let [px, py, pz] = problem.polar;
    // phi * Q_{0000} p_0
    assert_scalar_eq!(
        kernel.compute_off_diagonal_jacobian(&test, &trial, px, &qp),
        1.0,
        comp = abs,
        tol = 1e-14
    );
    // phi * Q_{0011} p_1
    assert_scalar_eq!(
        kernel.compute_off_diagonal_jacobian(&test, &trial, py, &qp),
        1.0,
        comp = abs,
        tol = 1e-14
    );
    assert_scalar_eq!(
        kernel.compute_off_diagonal_jacobian(&test, &trial, pz, &qp),
        0.0,
        comp = abs,
        tol = 1e-14
    );
}

#[test]
fn diagonal_jacobian_is_zero() {
    let problem = Problem::new();
    let kernel = build(&problem, Component::Y, 2.0);
    let q = RankFourTensor::from_fn(|i, j, k, l| (i + 2 * j + 3 * k + 4 * l) as f64);
    let (fields, material) = samples(&problem, &q, &vector![0.4, -0.2, 0.7]);
    let qp = QuadraturePointData::new(&fields, &material);
    let test = shape_function(0.3, [1.0, -2.0, 0.5]);
    let trial = shape_function(0.8, [0.1, 0.2, 0.3]);

    assert_eq!(kernel.compute_jacobian(&test, &trial, &qp), 0.0);
}

#[test]
fn unset_z_couplings_resolve_to_zero_field() {
    let problem = Problem::new();
    let kernel = FerroelectricCouplingConfig::new("u_x", Component::X, ["u_x", "u_y"], ["polar_x", "polar_y"])
        .build::<f64>(&problem.variables, &problem.materials)
        .unwrap();
    assert_eq!(kernel.displacement()[2], Coupled::Zero);
    assert_eq!(kernel.polarization()[2], Coupled::Zero);
    assert_eq!(kernel.artificial(), 1.0);
    assert_eq!(kernel.len_scale(), 1.0);

    // A registered polar_z that the kernel is not coupled to is ignored
    let q = RankFourTensor::from_fn(|i, j, k, l| 1.0 + (i + j + k + l) as f64);
    let with_z = vector![0.5, -1.0, 3.0];
    let without_z = vector![0.5, -1.0, 0.0];
    let test = shape_function(1.0, [0.2, 0.4, -0.6]);
    let full = build(&problem, Component::X, 1.0);

    assert_eq!(
        residual_at(&kernel, &problem, &q, &with_z, &test),
        residual_at(&full, &problem, &q, &without_z, &test)
    );

    let (fields, material) = samples(&problem, &q, &with_z);
    let qp = QuadraturePointData::new(&fields, &material);
    let trial = shape_function(0.7, [0.0, 0.0, 0.0]);
    assert_eq!(kernel.compute_off_diagonal_jacobian(&test, &trial, problem.polar[2], &qp), 0.0);
}

#[test]
fn build_reports_unknown_names() {
    let problem = Problem::new();
    let config = FerroelectricCouplingConfig::new("u_x", Component::X, ["u_x", "u_y"], ["polar_x", "p_y"]);
    let err = config.build::<f64>(&problem.variables, &problem.materials).unwrap_err();
    assert!(err.to_string().contains("polar_y"));
    assert!(err.to_string().contains("p_y"));

    let mut config = FerroelectricCouplingConfig::new("u_x", Component::X, ["u_x", "u_y"], ["polar_x", "polar_y"]);
    config.electrostrictive_tensor = "missing_tensor".to_string();
    let err = config.build::<f64>(&problem.variables, &problem.materials).unwrap_err();
    assert!(err.to_string().contains("missing_tensor"));
}

#[test]
fn build_reports_tensor_of_wrong_rank() {
    let problem = Problem::new();
    let mut materials = MaterialPropertyRegistry::new();
    materials
        .declare("electrostrictive_tensor", MaterialPropertyKind::RankThree)
        .unwrap();
    let config = FerroelectricCouplingConfig::new("u_x", Component::X, ["u_x", "u_y"], ["polar_x", "polar_y"]);
    let err = config.build::<f64>(&problem.variables, &materials).unwrap_err();
    assert!(err.to_string().contains("`electrostrictive_tensor`"));
    assert!(err.root_cause().to_string().contains("rank-four tensor"));
}

#[test]
fn artificial_does_not_enter_residual() {
    let problem = Problem::new();
    let mut config = FerroelectricCouplingConfig::new("u_x", Component::X, ["u_x", "u_y"], ["polar_x", "polar_y"])
        .with_z("u_z", "polar_z");
    let reference = config.build::<f64>(&problem.variables, &problem.materials).unwrap();
    config.artificial = 10.0;
    let amplified = config.build::<f64>(&problem.variables, &problem.materials).unwrap();
    assert_eq!(amplified.artificial(), 10.0);

    let q = RankFourTensor::from_cubic(2.0, 1.0, 0.5);
    let p = vector![0.3, -0.1, 0.2];
    let test = shape_function(1.0, [0.5, 1.0, -1.0]);
    assert_eq!(
        residual_at(&reference, &problem, &q, &p, &test),
        residual_at(&amplified, &problem, &q, &p, &test)
    );
}

proptest! {
    #[test]
    fn off_diagonal_jacobian_vanishes_for_non_polarization_variables(
        q in rank_four_tensor(),
        p in vector3(1.0),
        component in component(),
        test in shape_function_sample(),
        trial in shape_function_sample(),
    ) {
        let problem = Problem::new();
        let kernel = build(&problem, component, 1.3);
        let (fields, material) = samples(&problem, &q, &p);
        let qp = QuadraturePointData::new(&fields, &material);

        for jvar in problem.disp.into_iter().chain([problem.potential]) {
            prop_assert_eq!(kernel.compute_off_diagonal_jacobian(&test, &trial, jvar, &qp), 0.0);
        }
    }

    #[test]
    fn doubling_len_scale_quadruples_residual_and_off_diagonal_jacobian(
        q in rank_four_tensor(),
        p in vector3(1.0),
        component in component(),
        test in shape_function_sample(),
        trial in shape_function_sample(),
    ) {
        let problem = Problem::new();
        let kernel = build(&problem, component, 1.5);
        let doubled = build(&problem, component, 3.0);
        let (fields, material) = samples(&problem, &q, &p);
        let qp = QuadraturePointData::new(&fields, &material);

        assert_scalar_eq!(
            doubled.compute_residual(&test, &qp),
            4.0 * kernel.compute_residual(&test, &qp),
            comp = abs,
            tol = 1e-10
        );
        for jvar in problem.polar {
            assert_scalar_eq!(
                doubled.compute_off_diagonal_jacobian(&test, &trial, jvar, &qp),
                4.0 * kernel.compute_off_diagonal_jacobian(&test, &trial, jvar, &qp),
                comp = abs,
                tol = 1e-10
            );
        }
    }

    #[test]
    fn off_diagonal_jacobian_linearizes_outer_polarization_factor(
        q in rank_four_tensor(),
        p in vector3(1.0),
        component in component(),
        test in shape_function_sample(),
        trial in shape_function_sample(),
    ) {
        // R = l^2 sum_a Q_c(grad psi, a, p) p_a, differentiated in the trailing p_a only
        let problem = Problem::new();
        let len_scale = 1.2;
        let kernel = build(&problem, component, len_scale);
        let (fields, material) = samples(&problem, &q, &p);
        let qp = QuadraturePointData::new(&fields, &material);
        let frozen_residual = |outer: Vector3<f64>| {
            let mut sum = 0.0;
            for axis in Component::ALL {
                sum += electrostrictive_product(&q, component, &test.gradient, axis, &p) * outer[axis.index()];
            }
            len_scale * len_scale * sum
        };
        assert_scalar_eq!(frozen_residual(p), kernel.compute_residual(&test, &qp), comp = abs, tol = 1e-10);

        for m in Component::ALL {
            let jvar = problem.polar[m.index()];
            let fd = forward_difference(
                |h| {
                    let mut outer = p;
                    outer[m.index()] += h * trial.value;
                    frozen_residual(outer)
                },
                1e-6,
            );
            let analytic = kernel.compute_off_diagonal_jacobian(&test, &trial, jvar, &qp);
            assert_relative_error!(fd, analytic, tol = 1e-4);
        }
    }

    #[test]
    fn exact_derivative_is_twice_off_diagonal_jacobian_for_minor_symmetric_tensors(
        q in minor_symmetric_rank_four_tensor(),
        p in vector3(1.0),
        component in component(),
        test in shape_function_sample(),
        trial in shape_function_sample(),
    ) {
        let problem = Problem::new();
        let kernel = build(&problem, component, 0.8);
        let (fields, material) = samples(&problem, &q, &p);
        let qp = QuadraturePointData::new(&fields, &material);

        for m in Component::ALL {
            let fd = central_difference(
                |h| {
                    let mut perturbed = p;
                    perturbed[m.index()] += h * trial.value;
                    residual_at(&kernel, &problem, &q, &perturbed, &test)
                },
                1e-6,
            );
            let analytic = kernel.compute_off_diagonal_jacobian(&test, &trial, problem.polar[m.index()], &qp);
            assert_relative_error!(fd, 2.0 * analytic, tol = 1e-4);
        }
    }

    #[test]
    fn residual_is_independent_of_displacement(
        q in rank_four_tensor(),
        p in vector3(1.0),
        grad_u in vector3(5.0),
        test in shape_function_sample(),
    ) {
        let problem = Problem::new();
        let kernel = build(&problem, Component::Z, 1.0);
        let (mut fields, material) = samples(&problem, &q, &p);
        let reference = kernel.compute_residual(&test, &QuadraturePointData::new(&fields, &material));
        for id in problem.disp {
            fields.set(id, FieldSample::new(1.0, grad_u));
        }
        let displaced = kernel.compute_residual(&test, &QuadraturePointData::new(&fields, &material));
        prop_assert_eq!(reference, displaced);
    }
}
