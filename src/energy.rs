//! Energy densities for postprocessing.
use crate::kernel::QuadraturePointData;
use crate::kernels::convert_parameter;
use crate::material::{MaterialPropertyKind, MaterialPropertyRegistry, PropertyId};
use crate::variable::{Coupled, VariableRegistry};
use crate::Real;
use eyre::eyre;
use itertools::izip;
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A quantity integrated over elements, evaluated at one quadrature point.
pub trait QuadratureIntegrand<T: Real>: Send + Sync {
    fn compute_integrand(&self, qp: &QuadraturePointData<T>) -> T;
}

/// Computes $\sum_q w_q f(x_q)$ over the quadrature points of one element.
///
/// # Panics
///
/// Panics if `weights` and `points` have different lengths.
pub fn integrate_element<T, F>(integrand: &F, weights: &[T], points: &[QuadraturePointData<T>]) -> T
where
    T: Real,
    F: QuadratureIntegrand<T> + ?Sized,
{
    assert_eq!(
        weights.len(),
        points.len(),
        "Number of weights must match number of quadrature points"
    );
    let mut result = T::zero();
    for (&w, qp) in izip!(weights, points) {
        result += w * integrand.compute_integrand(qp);
    }
    result
}

/// Names of the Landau coefficients consumed by [`BulkEnergyEighth`], in the order they are
/// stored.
pub const LANDAU_COEFFICIENTS: [&str; 10] = [
    "alpha1", "alpha11", "alpha12", "alpha111", "alpha112", "alpha123", "alpha1111", "alpha1112", "alpha1122",
    "alpha1123",
];

fn default_energy_scale() -> f64 {
    1.0
}

/// Configuration of a [`BulkEnergyEighth`] integrand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkEnergyEighthConfig {
    pub polar_x: String,
    pub polar_y: String,
    #[serde(default)]
    pub polar_z: Option<String>,
    #[serde(default = "default_energy_scale")]
    pub energy_scale: f64,
}

impl BulkEnergyEighthConfig {
    pub fn new([polar_x, polar_y]: [&str; 2]) -> Self {
        Self {
            polar_x: polar_x.to_string(),
            polar_y: polar_y.to_string(),
            polar_z: None,
            energy_scale: default_energy_scale(),
        }
    }

    pub fn with_polar_z(mut self, polar_z: &str) -> Self {
        self.polar_z = Some(polar_z.to_string());
        self
    }

    pub fn build<T: Real>(
        &self,
        variables: &VariableRegistry,
        materials: &MaterialPropertyRegistry,
    ) -> eyre::Result<BulkEnergyEighth<T>> {
        let polarization = [
            Coupled::required(variables, "polar_x", &self.polar_x)?,
            Coupled::required(variables, "polar_y", &self.polar_y)?,
            Coupled::optional(variables, "polar_z", self.polar_z.as_deref())?,
        ];
        let coefficients: Vec<PropertyId> = LANDAU_COEFFICIENTS
            .iter()
            .map(|name| materials.require(name, MaterialPropertyKind::Scalar))
            .collect::<eyre::Result<_>>()?;
        let coefficients: [PropertyId; 10] = coefficients
            .try_into()
            .map_err(|_| eyre!("expected {} Landau coefficients", LANDAU_COEFFICIENTS.len()))?;
        debug!("Built BulkEnergyEighth with energy scale {}", self.energy_scale);
        Ok(BulkEnergyEighth {
            polarization,
            coefficients,
            energy_scale: convert_parameter("energy_scale", self.energy_scale)?,
        })
    }
}

/// Eighth-order Landau bulk free-energy density of the polarization.
///
/// The density is $f = s \left( f_2 + f_4 + f_6 + f_8 \right)$ with energy scale $s$ and
///
/// - $f_2 = \alpha_1 \sum_i P_i^2$,
/// - $f_4 = \alpha_{11} \sum_i P_i^4 + \alpha_{12} \sum_{i<j} P_i^2 P_j^2$,
/// - $f_6 = \alpha_{111} \sum_i P_i^6 + \alpha_{112} \sum_{i \neq j} P_i^4 P_j^2 + \alpha_{123} P_x^2 P_y^2 P_z^2$,
/// - $f_8 = \alpha_{1111} \sum_i P_i^8 + \alpha_{1112} \sum_{i \neq j} P_i^6 P_j^2
///   + \alpha_{1122} \sum_{i<j} P_i^4 P_j^4 + \alpha_{1123} \sum_{i} P_i^4 P_j^2 P_k^2$,
///
/// where $(i, j, k)$ in the last sum runs over the cyclic permutations of the axes.
#[derive(Debug, Clone)]
pub struct BulkEnergyEighth<T> {
    polarization: [Coupled; 3],
    coefficients: [PropertyId; 10],
    energy_scale: T,
}

impl<T: Real> BulkEnergyEighth<T> {
    /// Evaluates the energy density for the given polarization and coefficients, ordered as in
    /// [`LANDAU_COEFFICIENTS`].
    pub fn energy_density(&self, p: &Vector3<T>, alpha: &[T; 10]) -> T {
        let [a1, a11, a12, a111, a112, a123, a1111, a1112, a1122, a1123] = *alpha;
        let (x2, y2, z2) = (p.x * p.x, p.y * p.y, p.z * p.z);
        let (x4, y4, z4) = (x2 * x2, y2 * y2, z2 * z2);
        let (x6, y6, z6) = (x4 * x2, y4 * y2, z4 * z2);

        let second = a1 * (x2 + y2 + z2);
        let fourth = a11 * (x4 + y4 + z4) + a12 * (x2 * y2 + y2 * z2 + x2 * z2);
        let sixth = a111 * (x6 + y6 + z6)
            + a112 * (x4 * (y2 + z2) + y4 * (x2 + z2) + z4 * (x2 + y2))
            + a123 * x2 * y2 * z2;
        let eighth = a1111 * (x4 * x4 + y4 * y4 + z4 * z4)
            + a1112 * (x6 * (y2 + z2) + y6 * (x2 + z2) + z6 * (x2 + y2))
            + a1122 * (x4 * y4 + y4 * z4 + x4 * z4)
            + a1123 * (x4 * y2 * z2 + y4 * x2 * z2 + z4 * x2 * y2);

        self.energy_scale * (second + fourth + sixth + eighth)
    }
}

impl<T: Real> QuadratureIntegrand<T> for BulkEnergyEighth<T> {
    fn compute_integrand(&self, qp: &QuadraturePointData<T>) -> T {
        let [px, py, pz] = self.polarization;
        let p = Vector3::new(qp.fields.value(px), qp.fields.value(py), qp.fields.value(pz));
        let alpha = self.coefficients.map(|id| qp.material.scalar(id));
        self.energy_density(&p, &alpha)
    }
}
