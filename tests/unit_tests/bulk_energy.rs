use ferrofem::energy::{integrate_element, BulkEnergyEighthConfig, QuadratureIntegrand, LANDAU_COEFFICIENTS};
use ferrofem::field::{FieldSample, FieldSamples};
use ferrofem::kernel::QuadraturePointData;
use ferrofem::material::{MaterialPoint, MaterialPropertyKind, MaterialPropertyRegistry};
use ferrofem::nalgebra::vector;
use ferrofem::variable::VariableRegistry;
use matrixcompare::assert_scalar_eq;

struct Setup {
    variables: VariableRegistry,
    materials: MaterialPropertyRegistry,
}

impl Setup {
    fn new() -> Self {
        let mut variables = VariableRegistry::new();
        for name in ["polar_x", "polar_y", "polar_z"] {
            variables.register(name);
        }
        let mut materials = MaterialPropertyRegistry::new();
        for name in LANDAU_COEFFICIENTS {
            materials.declare(name, MaterialPropertyKind::Scalar).unwrap();
        }
        Self { variables, materials }
    }

    fn fields(&self, p: [f64; 3]) -> FieldSamples<f64> {
        let mut fields = FieldSamples::for_registry(&self.variables);
        for (name, value) in ["polar_x", "polar_y", "polar_z"].into_iter().zip(p) {
            fields.set(self.variables.get(name).unwrap(), FieldSample::from_value(value));
        }
        fields
    }

    fn material(&self, alpha: [f64; 10]) -> MaterialPoint<f64> {
        let mut material = MaterialPoint::for_registry(&self.materials);
        for (name, value) in LANDAU_COEFFICIENTS.into_iter().zip(alpha) {
            material.set_scalar(self.materials.get(name).unwrap(), value);
        }
        material
    }
}

fn unit_coefficient(index: usize) -> [f64; 10] {
    let mut alpha = [0.0; 10];
    alpha[index] = 1.0;
    alpha
}

#[test]
fn each_landau_term_has_expected_polynomial() {
    let setup = Setup::new();
    let energy = BulkEnergyEighthConfig::new(["polar_x", "polar_y"])
        .with_polar_z("polar_z")
        .build::<f64>(&setup.variables, &setup.materials)
        .unwrap();
    let p = vector![1.0, 2.0, 3.0];

    // x = 1, y = 4, z = 9 are the squared components
    let expected = [
        1.0 + 4.0 + 9.0,
        1.0 + 16.0 + 81.0,
        4.0 + 36.0 + 9.0,
        1.0 + 64.0 + 729.0,
        1.0 * 13.0 + 16.0 * 10.0 + 81.0 * 5.0,
        36.0,
        1.0 + 256.0 + 6561.0,
        1.0 * 13.0 + 64.0 * 10.0 + 729.0 * 5.0,
        16.0 + 1296.0 + 81.0,
        1.0 * 36.0 + 16.0 * 9.0 + 81.0 * 4.0,
    ];
    for (index, expected) in expected.into_iter().enumerate() {
        assert_scalar_eq!(
            energy.energy_density(&p, &unit_coefficient(index)),
            expected,
            comp = abs,
            tol = 1e-9
        );
    }
}

#[test]
fn integrand_reads_polarization_and_coefficients_at_quadrature_point() {
    let setup = Setup::new();
    let mut config = BulkEnergyEighthConfig::new(["polar_x", "polar_y"]).with_polar_z("polar_z");
    config.energy_scale = 0.5;
    let energy = config.build::<f64>(&setup.variables, &setup.materials).unwrap();

    let alpha = [-2.0, 1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let fields = setup.fields([1.0, -1.0, 0.0]);
    let material = setup.material(alpha);
    let qp = QuadraturePointData::new(&fields, &material);

    // 0.5 * (-2 * 2 + 1 * 2 + 0.5 * 1)
    assert_scalar_eq!(energy.compute_integrand(&qp), -0.75, comp = abs, tol = 1e-14);
}

#[test]
fn two_dimensional_energy_ignores_z_polarization() {
    let setup = Setup::new();
    let planar = BulkEnergyEighthConfig::new(["polar_x", "polar_y"])
        .build::<f64>(&setup.variables, &setup.materials)
        .unwrap();
    let full = BulkEnergyEighthConfig::new(["polar_x", "polar_y"])
        .with_polar_z("polar_z")
        .build::<f64>(&setup.variables, &setup.materials)
        .unwrap();
    let alpha = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    let material = setup.material(alpha);

    let with_z = setup.fields([0.3, 0.4, 0.5]);
    let without_z = setup.fields([0.3, 0.4, 0.0]);
    assert_eq!(
        planar.compute_integrand(&QuadraturePointData::new(&with_z, &material)),
        full.compute_integrand(&QuadraturePointData::new(&without_z, &material))
    );
}

#[test]
fn integrate_element_sums_weighted_densities() {
    let setup = Setup::new();
    let energy = BulkEnergyEighthConfig::new(["polar_x", "polar_y"])
        .build::<f64>(&setup.variables, &setup.materials)
        .unwrap();
    let material = setup.material(unit_coefficient(0));
    let fields = [setup.fields([1.0, 0.0, 0.0]), setup.fields([0.0, 2.0, 0.0])];
    let points: Vec<_> = fields
        .iter()
        .map(|fields| QuadraturePointData::new(fields, &material))
        .collect();

    let total = integrate_element(&energy, &[0.25, 0.5], &points);
    assert_scalar_eq!(total, 0.25 * 1.0 + 0.5 * 4.0, comp = abs, tol = 1e-14);
}

#[test]
fn build_requires_every_landau_coefficient() {
    let setup = Setup::new();
    let mut materials = MaterialPropertyRegistry::new();
    for name in &LANDAU_COEFFICIENTS[..9] {
        materials.declare(*name, MaterialPropertyKind::Scalar).unwrap();
    }
    let err = BulkEnergyEighthConfig::new(["polar_x", "polar_y"])
        .build::<f64>(&setup.variables, &materials)
        .unwrap_err();
    assert!(err.to_string().contains("alpha1123"));
}
