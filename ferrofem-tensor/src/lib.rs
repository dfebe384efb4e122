//! Material tensors and tensor contractions for coupled electromechanical kernels.
//!
//! The crate provides fixed-size rank-three and rank-four tensors over three spatial dimensions,
//! together with the quadrature-point contractions used by the `ferrofem` residual and
//! Jacobian kernels. Index conventions are fixed per contraction and documented in
//! [`contraction`].
use nalgebra::RealField;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

pub mod contraction;

mod rank_four;
mod rank_three;

#[cfg(feature = "proptest")]
pub mod proptest;

pub use rank_four::RankFourTensor;
pub use rank_three::RankThreeTensor;

pub extern crate nalgebra;

/// Real scalar type used throughout the tensor and kernel crates.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}

/// Library-wide error type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A component index outside of `{0, 1, 2}` was supplied.
    ComponentOutOfRange(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ComponentOutOfRange(index) => {
                write!(f, "component index {index} is out of range (expected 0, 1 or 2)")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A Cartesian component (x, y or z).
///
/// Selects which scalar equation a kernel assembles, or which axis of a vector field a
/// contraction refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Component {
    X,
    Y,
    Z,
}

impl Component {
    /// All components in index order.
    pub const ALL: [Component; 3] = [Component::X, Component::Y, Component::Z];

    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl TryFrom<usize> for Component {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::X),
            1 => Ok(Self::Y),
            2 => Ok(Self::Z),
            _ => Err(Error::ComponentOutOfRange(index)),
        }
    }
}

impl From<Component> for usize {
    fn from(component: Component) -> Self {
        component.index()
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        write!(f, "{name}")
    }
}
