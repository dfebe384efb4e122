//! Coupled-physics residual kernels.
use crate::kernel::Kernel;
use crate::material::MaterialPropertyRegistry;
use crate::variable::VariableRegistry;
use crate::Real;
use eyre::eyre;
use serde::{Deserialize, Serialize};

mod anisotropic_electrostatics;
mod ferroelectric_coupling;
mod piezoelectric_strain_charge;

pub use anisotropic_electrostatics::*;
pub use ferroelectric_coupling::*;
pub use piezoelectric_strain_charge::*;

pub(crate) fn convert_parameter<T: Real>(name: &str, value: f64) -> eyre::Result<T> {
    T::from_f64(value).ok_or_else(|| eyre!("parameter `{name}` = {value} is not representable"))
}

/// Configuration of any kernel, tagged by kernel type.
///
/// Deserializes from blocks such as
/// ```json
/// { "type": "PiezoelectricStrainCharge", "variable": "potential", "disp_x": "u_x", "disp_y": "u_y" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum KernelConfig {
    FerroelectricCoupling(FerroelectricCouplingConfig),
    PiezoelectricStrainCharge(PiezoelectricStrainChargeConfig),
    AnisotropicElectrostatics(AnisotropicElectrostaticsConfig),
}

impl KernelConfig {
    pub fn kernel_type(&self) -> &'static str {
        match self {
            Self::FerroelectricCoupling(_) => "FerroelectricCoupling",
            Self::PiezoelectricStrainCharge(_) => "PiezoelectricStrainCharge",
            Self::AnisotropicElectrostatics(_) => "AnisotropicElectrostatics",
        }
    }

    pub fn build<T: Real>(
        &self,
        variables: &VariableRegistry,
        materials: &MaterialPropertyRegistry,
    ) -> eyre::Result<Box<dyn Kernel<T>>> {
        let kernel: Box<dyn Kernel<T>> = match self {
            Self::FerroelectricCoupling(config) => Box::new(config.build::<T>(variables, materials)?),
            Self::PiezoelectricStrainCharge(config) => Box::new(config.build::<T>(variables, materials)?),
            Self::AnisotropicElectrostatics(config) => Box::new(config.build(variables, materials)?),
        };
        Ok(kernel)
    }
}

/// Builds every kernel in order, attaching the failing kernel's position and type to the error.
pub fn build_kernels<T: Real>(
    configs: &[KernelConfig],
    variables: &VariableRegistry,
    materials: &MaterialPropertyRegistry,
) -> eyre::Result<Vec<Box<dyn Kernel<T>>>> {
    configs
        .iter()
        .enumerate()
        .map(|(index, config)| {
            config
                .build(variables, materials)
                .map_err(|err| err.wrap_err(format!("failed to build kernel {index} ({})", config.kernel_type())))
        })
        .collect()
}
