use crate::field::ShapeFunctionSample;
use crate::kernel::{Kernel, QuadraturePointData};
use crate::kernels::convert_parameter;
use crate::material::{MaterialPropertyKind, MaterialPropertyRegistry, PropertyId};
use crate::variable::{Coupled, VariableId, VariableRegistry};
use crate::Real;
use ferrofem_tensor::contraction::electrostrictive_product;
use ferrofem_tensor::Component;
use log::{debug, warn};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

fn default_electrostrictive_tensor() -> String {
    "electrostrictive_tensor".to_string()
}

fn default_one() -> f64 {
    1.0
}

/// Configuration of a [`FerroelectricCoupling`] kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FerroelectricCouplingConfig {
    /// The displacement component whose equation the kernel contributes to.
    pub variable: String,
    /// Direction of the mechanical equilibrium equation.
    pub component: Component,
    pub disp_x: String,
    pub disp_y: String,
    #[serde(default)]
    pub disp_z: Option<String>,
    pub polar_x: String,
    pub polar_y: String,
    #[serde(default)]
    pub polar_z: Option<String>,
    /// Artificial increase of the coupling. Accepted for compatibility, does not enter the residual.
    #[serde(default = "default_one")]
    pub artificial: f64,
    #[serde(default = "default_one")]
    pub len_scale: f64,
    #[serde(default = "default_electrostrictive_tensor")]
    pub electrostrictive_tensor: String,
}

impl FerroelectricCouplingConfig {
    /// A configuration with default scales and without z couplings.
    pub fn new(
        variable: impl Into<String>,
        component: Component,
        [disp_x, disp_y]: [&str; 2],
        [polar_x, polar_y]: [&str; 2],
    ) -> Self {
        Self {
            variable: variable.into(),
            component,
            disp_x: disp_x.to_string(),
            disp_y: disp_y.to_string(),
            disp_z: None,
            polar_x: polar_x.to_string(),
            polar_y: polar_y.to_string(),
            polar_z: None,
            artificial: 1.0,
            len_scale: 1.0,
            electrostrictive_tensor: default_electrostrictive_tensor(),
        }
    }

    pub fn with_z(mut self, disp_z: &str, polar_z: &str) -> Self {
        self.disp_z = Some(disp_z.to_string());
        self.polar_z = Some(polar_z.to_string());
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
    ) -> eyre::Result<FerroelectricCoupling<T>> {
        let variable = variables.require("variable", &self.variable)?;
        let displacement = [
            Coupled::required(variables, "disp_x", &self.disp_x)?,
            Coupled::required(variables, "disp_y", &self.disp_y)?,
            Coupled::optional(variables, "disp_z", self.disp_z.as_deref())?,
        ];
        let polarization = [
            Coupled::required(variables, "polar_x", &self.polar_x)?,
            Coupled::required(variables, "polar_y", &self.polar_y)?,
            Coupled::optional(variables, "polar_z", self.polar_z.as_deref())?,
        ];
        let electrostrictive_tensor = materials.require_parameter(
            "electrostrictive_tensor",
            &self.electrostrictive_tensor,
            MaterialPropertyKind::RankFour,
        )?;

        if self.len_scale <= 0.0 {
            warn!("FerroelectricCoupling: non-positive len_scale {}", self.len_scale);
        }
        if self.artificial != 1.0 {
            warn!(
                "FerroelectricCoupling: artificial = {} has no effect on the residual",
                self.artificial
            );
        }
        debug!(
            "Built FerroelectricCoupling for `{}` (component {}), polarization {:?}",
            self.variable, self.component, polarization
        );

        Ok(FerroelectricCoupling {
            variable,
            component: self.component,
            displacement,
            polarization,
            electrostrictive_tensor,
            artificial: convert_parameter("artificial", self.artificial)?,
            len_scale: convert_parameter("len_scale", self.len_scale)?,
        })
    }
}

/// Residual contribution of the ferroelectric self-strain to mechanical equilibrium.
///
/// With electrostrictive tensor $Q$, polarization $\vec p$ and length scale $\ell$, the residual
/// for test function $\psi$ in equation `component` $c$ is
/// $$
/// R = \ell^2 \sum_a \mathcal{Q}_c(\nabla \psi, a, \vec p) \, p_a,
/// $$
/// where $\mathcal{Q}_c$ is the
/// [electrostrictive product](ferrofem_tensor::contraction::electrostrictive_product).
///
/// The residual does not depend on the displacement, so the diagonal Jacobian is zero. The
/// off-diagonal entry for polarization component $m$ is
/// $\ell^2 \phi \, \mathcal{Q}_c(\nabla \psi, m, \vec p)$, which linearizes the outer polarization
/// factor and keeps the polarization inside the product fixed.
#[derive(Debug, Clone)]
pub struct FerroelectricCoupling<T> {
    variable: VariableId,
    component: Component,
    displacement: [Coupled; 3],
    polarization: [Coupled; 3],
    electrostrictive_tensor: PropertyId,
    artificial: T,
    len_scale: T,
}

impl<T: Real> FerroelectricCoupling<T> {
    pub fn component(&self) -> Component {
        self.component
    }

    pub fn displacement(&self) -> &[Coupled; 3] {
        &self.displacement
    }

    pub fn polarization(&self) -> &[Coupled; 3] {
        &self.polarization
    }

    pub fn artificial(&self) -> T {
        self.artificial
    }

    pub fn len_scale(&self) -> T {
        self.len_scale
    }

    fn polarization_at(&self, qp: &QuadraturePointData<T>) -> Vector3<T> {
        let [px, py, pz] = self.polarization;
        Vector3::new(qp.fields.value(px), qp.fields.value(py), qp.fields.value(pz))
    }
}

impl<T: Real> Kernel<T> for FerroelectricCoupling<T> {
    fn variable(&self) -> VariableId {
        self.variable
    }

    fn compute_residual(&self, test: &ShapeFunctionSample<T>, qp: &QuadraturePointData<T>) -> T {
        let q = qp.material.rank_four(self.electrostrictive_tensor);
        let p = self.polarization_at(qp);
        let mut sum = T::zero();
        for axis in Component::ALL {
            sum += electrostrictive_product(q, self.component, &test.gradient, axis, &p) * p[axis.index()];
        }
        self.len_scale * self.len_scale * sum
    }

    fn compute_jacobian(
        &self,
        _test: &ShapeFunctionSample<T>,
        _trial: &ShapeFunctionSample<T>,
        _qp: &QuadraturePointData<T>,
    ) -> T {
        T::zero()
    }

    fn compute_off_diagonal_jacobian(
        &self,
        test: &ShapeFunctionSample<T>,
        trial: &ShapeFunctionSample<T>,
        jvar: VariableId,
        qp: &QuadraturePointData<T>,
    ) -> T {
        let coupled_axis = Component::ALL
            .into_iter()
            .find(|axis| self.polarization[axis.index()].matches(jvar));
        match coupled_axis {
            Some(axis) => {
                let q = qp.material.rank_four(self.electrostrictive_tensor);
                let p = self.polarization_at(qp);
                let product = electrostrictive_product(q, self.component, &test.gradient, axis, &p);
                self.len_scale * self.len_scale * trial.value * product
            }
            None => T::zero(),
        }
    }
}
