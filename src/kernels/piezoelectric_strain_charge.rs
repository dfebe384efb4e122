use crate::field::ShapeFunctionSample;
use crate::kernel::{Kernel, QuadraturePointData};
use crate::kernels::convert_parameter;
use crate::material::{MaterialPropertyKind, MaterialPropertyRegistry, PropertyId};
use crate::variable::{Coupled, VariableId, VariableRegistry};
use crate::Real;
use ferrofem_tensor::contraction::{piezoelectric_strain_derivative, piezoelectric_strain_sum};
use ferrofem_tensor::Component;
use log::{debug, warn};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

fn default_piezostrictive_tensor() -> String {
    "piezostrictive_tensor".to_string()
}

fn default_len_scale() -> f64 {
    1.0
}

/// Configuration of a [`PiezoelectricStrainCharge`] kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiezoelectricStrainChargeConfig {
    /// The electrostatic potential.
    pub variable: String,
    pub disp_x: String,
    pub disp_y: String,
    #[serde(default)]
    pub disp_z: Option<String>,
    #[serde(default = "default_len_scale")]
    pub len_scale: f64,
    #[serde(default = "default_piezostrictive_tensor")]
    pub piezostrictive_tensor: String,
}

impl PiezoelectricStrainChargeConfig {
    pub fn new(variable: impl Into<String>, [disp_x, disp_y]: [&str; 2]) -> Self {
        Self {
            variable: variable.into(),
            disp_x: disp_x.to_string(),
            disp_y: disp_y.to_string(),
            disp_z: None,
            len_scale: default_len_scale(),
            piezostrictive_tensor: default_piezostrictive_tensor(),
        }
    }

    pub fn with_disp_z(mut self, disp_z: &str) -> Self {
        self.disp_z = Some(disp_z.to_string());
        self
    }

    pub fn with_len_scale(mut self, len_scale: f64) -> Self {
        self.len_scale = len_scale;
        self
    }

    pub fn build<T: Real>(
        &self,
        variables: &VariableRegistry,
        materials: &MaterialPropertyRegistry,
    ) -> eyre::Result<PiezoelectricStrainCharge<T>> {
        let variable = variables.require("variable", &self.variable)?;
        let displacement = [
            Coupled::required(variables, "disp_x", &self.disp_x)?,
            Coupled::required(variables, "disp_y", &self.disp_y)?,
            Coupled::optional(variables, "disp_z", self.disp_z.as_deref())?,
        ];
        let piezostrictive_tensor = materials.require_parameter(
            "piezostrictive_tensor",
            &self.piezostrictive_tensor,
            MaterialPropertyKind::RankThree,
        )?;

        if self.len_scale <= 0.0 {
            warn!("PiezoelectricStrainCharge: non-positive len_scale {}", self.len_scale);
        }
        debug!(
            "Built PiezoelectricStrainCharge for `{}`, displacement {:?}",
            self.variable, displacement
        );

        Ok(PiezoelectricStrainCharge {
            variable,
            displacement,
            piezostrictive_tensor,
            len_scale: convert_parameter("len_scale", self.len_scale)?,
        })
    }
}

/// Charge density arising from piezoelectric coupling in the Poisson equation.
///
/// With piezostrictive tensor $T$, displacement $\vec u$ and length scale $\ell$ the residual is
/// $$
/// R = \ell \sum_j \frac{\partial \psi}{\partial x_j} \, \frac{1}{2} \sum_{(r, c)} T_{j r c}
///     \left( \frac{\partial u_r}{\partial x_c} + \frac{\partial u_c}{\partial x_r} \right),
/// $$
/// see [`piezoelectric_strain_sum`]. The length scale enters linearly, in contrast to the squared
/// length scale of [`FerroelectricCoupling`](crate::kernels::FerroelectricCoupling).
///
/// The diagonal Jacobian is zero: the residual does not depend on the potential. The
/// off-diagonal entries with respect to the displacement components are the exact derivatives of
/// the residual.
#[derive(Debug, Clone)]
pub struct PiezoelectricStrainCharge<T> {
    variable: VariableId,
    displacement: [Coupled; 3],
    piezostrictive_tensor: PropertyId,
    len_scale: T,
}

impl<T: Real> PiezoelectricStrainCharge<T> {
    pub fn displacement(&self) -> &[Coupled; 3] {
        &self.displacement
    }

    pub fn len_scale(&self) -> T {
        self.len_scale
    }
}

impl<T: Real> Kernel<T> for PiezoelectricStrainCharge<T> {
    fn variable(&self) -> VariableId {
        self.variable
    }

    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn compute_residual(&self, test: &ShapeFunctionSample<T>, qp: &QuadraturePointData<T>) -> T {
        let tensor = qp.material.rank_three(self.piezostrictive_tensor);
        let grad_u = self.displacement.map(|u| qp.fields.gradient(u));
        let mut sum = T::zero();
        for j in Component::ALL {
            sum += test.gradient[j.index()] * 0.5 * piezoelectric_strain_sum(tensor, j, &grad_u);
        }
        self.len_scale * sum
    }

    fn compute_jacobian(
        &self,
        _test: &ShapeFunctionSample<T>,
        _trial: &ShapeFunctionSample<T>,
        _qp: &QuadraturePointData<T>,
    ) -> T {
        T::zero()
    }

    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn compute_off_diagonal_jacobian(
        &self,
        test: &ShapeFunctionSample<T>,
        trial: &ShapeFunctionSample<T>,
        jvar: VariableId,
        qp: &QuadraturePointData<T>,
    ) -> T {
        let coupled_displacement = Component::ALL
            .into_iter()
            .find(|m| self.displacement[m.index()].matches(jvar));
        match coupled_displacement {
            Some(m) => {
                let tensor = qp.material.rank_three(self.piezostrictive_tensor);
                let mut sum = T::zero();
                for j in Component::ALL {
                    sum += test.gradient[j.index()]
                        * 0.5
                        * piezoelectric_strain_derivative(tensor, j, m, &trial.gradient);
                }
                self.len_scale * sum
            }
            None => T::zero(),
        }
    }
}
