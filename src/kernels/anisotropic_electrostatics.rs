use crate::field::ShapeFunctionSample;
use crate::kernel::{Kernel, QuadraturePointData};
use crate::material::{MaterialPropertyKind, MaterialPropertyRegistry, PropertyId};
use crate::variable::{VariableId, VariableRegistry};
use crate::Real;
use ferrofem_tensor::contraction::diagonal_contraction;
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

fn default_eps1() -> String {
    "eps1".to_string()
}

fn default_eps2() -> String {
    "eps2".to_string()
}

fn default_eps3() -> String {
    "eps3".to_string()
}

/// Configuration of an [`AnisotropicElectrostatics`] kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnisotropicElectrostaticsConfig {
    /// The electrostatic potential.
    pub variable: String,
    /// Names of the scalar permittivity properties along x, y and z.
    #[serde(default = "default_eps1")]
    pub eps1: String,
    #[serde(default = "default_eps2")]
    pub eps2: String,
    #[serde(default = "default_eps3")]
    pub eps3: String,
}

impl AnisotropicElectrostaticsConfig {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            eps1: default_eps1(),
            eps2: default_eps2(),
            eps3: default_eps3(),
        }
    }

    pub fn build(
        &self,
        variables: &VariableRegistry,
        materials: &MaterialPropertyRegistry,
    ) -> eyre::Result<AnisotropicElectrostatics> {
        let variable = variables.require("variable", &self.variable)?;
        let permittivity = [
            materials.require_parameter("eps1", &self.eps1, MaterialPropertyKind::Scalar)?,
            materials.require_parameter("eps2", &self.eps2, MaterialPropertyKind::Scalar)?,
            materials.require_parameter("eps3", &self.eps3, MaterialPropertyKind::Scalar)?,
        ];
        debug!(
            "Built AnisotropicElectrostatics for `{}` with permittivities ({}, {}, {})",
            self.variable, self.eps1, self.eps2, self.eps3
        );
        Ok(AnisotropicElectrostatics { variable, permittivity })
    }
}

/// Poisson operator with a diagonal anisotropic permittivity.
///
/// The residual is $R = \sum_a \varepsilon_a \, \partial_a \psi \, \partial_a u$ and the Jacobian
/// is the corresponding bilinear form $\sum_a \varepsilon_a \, \partial_a \psi \, \partial_a \phi$.
/// There is no coupling between axes or to other fields.
#[derive(Debug, Clone)]
pub struct AnisotropicElectrostatics {
    variable: VariableId,
    permittivity: [PropertyId; 3],
}

impl AnisotropicElectrostatics {
    fn permittivity_at<T: Real>(&self, qp: &QuadraturePointData<T>) -> Vector3<T> {
        let [eps1, eps2, eps3] = self.permittivity;
        Vector3::new(
            qp.material.scalar(eps1),
            qp.material.scalar(eps2),
            qp.material.scalar(eps3),
        )
    }
}

impl<T: Real> Kernel<T> for AnisotropicElectrostatics {
    fn variable(&self) -> VariableId {
        self.variable
    }

    fn compute_residual(&self, test: &ShapeFunctionSample<T>, qp: &QuadraturePointData<T>) -> T {
        let grad_u = qp.fields.get(self.variable).gradient;
        diagonal_contraction(&self.permittivity_at(qp), &test.gradient, &grad_u)
    }

    fn compute_jacobian(
        &self,
        test: &ShapeFunctionSample<T>,
        trial: &ShapeFunctionSample<T>,
        qp: &QuadraturePointData<T>,
    ) -> T {
        diagonal_contraction(&self.permittivity_at(qp), &test.gradient, &trial.gradient)
    }
}
