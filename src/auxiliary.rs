//! Derived quantities evaluated at quadrature points.
use crate::kernel::QuadraturePointData;
use crate::variable::{Coupled, VariableRegistry};
use crate::Real;
use log::debug;
use serde::{Deserialize, Serialize};

/// A closed-form quantity derived from the current fields.
///
/// Auxiliary values are not solved for, so there is no Jacobian.
pub trait AuxiliaryKernel<T: Real>: Send + Sync {
    fn compute_value(&self, qp: &QuadraturePointData<T>) -> T;
}

/// Configuration of a [`Birefringence`] evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirefringenceConfig {
    /// Refractive index along the first direction perpendicular to propagation.
    pub per1: String,
    /// Refractive index along the second direction perpendicular to propagation.
    pub per2: String,
}

impl BirefringenceConfig {
    pub fn new(per1: impl Into<String>, per2: impl Into<String>) -> Self {
        Self {
            per1: per1.into(),
            per2: per2.into(),
        }
    }

    pub fn build(&self, variables: &VariableRegistry) -> eyre::Result<Birefringence> {
        let per1 = Coupled::required(variables, "per1", &self.per1)?;
        let per2 = Coupled::required(variables, "per2", &self.per2)?;
        debug!("Built Birefringence from `{}` and `{}`", self.per1, self.per2);
        Ok(Birefringence { per1, per2 })
    }
}

/// Difference between two refractive indices, $n_2 - n_1$.
#[derive(Debug, Clone)]
pub struct Birefringence {
    per1: Coupled,
    per2: Coupled,
}

impl<T: Real> AuxiliaryKernel<T> for Birefringence {
    fn compute_value(&self, qp: &QuadraturePointData<T>) -> T {
        qp.fields.value(self.per2) - qp.fields.value(self.per1)
    }
}
