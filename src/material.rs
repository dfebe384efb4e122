//! Material properties evaluated at quadrature points.
//!
//! A host declares the available properties once in a [`MaterialPropertyRegistry`]. Kernels
//! resolve the names they consume at construction, which is where unknown names and kind
//! mismatches are reported. Values for one quadrature point live in a [`MaterialPoint`].
use crate::Real;
use eyre::{eyre, WrapErr};
use ferrofem_tensor::{RankFourTensor, RankThreeTensor};
use nalgebra::Scalar;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Handle to a declared material property, used to index a [`MaterialPoint`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialPropertyKind {
    Scalar,
    RankThree,
    RankFour,
}

impl Display for MaterialPropertyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::RankThree => write!(f, "rank-three tensor"),
            Self::RankFour => write!(f, "rank-four tensor"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MaterialProperty<T> {
    Scalar(T),
    RankThree(RankThreeTensor<T>),
    RankFour(RankFourTensor<T>),
}

impl<T: Real> MaterialProperty<T> {
    /// The zero value of the given kind.
    pub fn zero(kind: MaterialPropertyKind) -> Self {
        match kind {
            MaterialPropertyKind::Scalar => Self::Scalar(T::zero()),
            MaterialPropertyKind::RankThree => Self::RankThree(RankThreeTensor::zeros()),
            MaterialPropertyKind::RankFour => Self::RankFour(RankFourTensor::zeros()),
        }
    }

    pub fn kind(&self) -> MaterialPropertyKind {
        match self {
            Self::Scalar(_) => MaterialPropertyKind::Scalar,
            Self::RankThree(_) => MaterialPropertyKind::RankThree,
            Self::RankFour(_) => MaterialPropertyKind::RankFour,
        }
    }
}

impl<T> From<RankThreeTensor<T>> for MaterialProperty<T> {
    fn from(tensor: RankThreeTensor<T>) -> Self {
        Self::RankThree(tensor)
    }
}

impl<T> From<RankFourTensor<T>> for MaterialProperty<T> {
    fn from(tensor: RankFourTensor<T>) -> Self {
        Self::RankFour(tensor)
    }
}

/// Declared material properties.
#[derive(Debug, Clone, Default)]
pub struct MaterialPropertyRegistry {
    names: Vec<String>,
    kinds: Vec<MaterialPropertyKind>,
    ids: FxHashMap<String, PropertyId>,
}

impl MaterialPropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a property.
    ///
    /// Re-declaring a name with the same kind returns the existing handle, while re-declaring it
    /// with a different kind is an error.
    pub fn declare(&mut self, name: impl Into<String>, kind: MaterialPropertyKind) -> eyre::Result<PropertyId> {
        let name = name.into();
        if let Some(&id) = self.ids.get(&name) {
            let existing = self.kinds[id.0];
            return if existing == kind {
                Ok(id)
            } else {
                Err(eyre!(
                    "material property `{name}` is already declared as a {existing}, cannot redeclare as a {kind}"
                ))
            };
        }
        let id = PropertyId(self.names.len());
        self.names.push(name.clone());
        self.kinds.push(kind);
        self.ids.insert(name, id);
        Ok(id)
    }

    pub fn get(&self, name: &str) -> Option<PropertyId> {
        self.ids.get(name).copied()
    }

    /// Resolves a property that a kernel consumes, checking that it has the expected kind.
    pub fn require(&self, name: &str, kind: MaterialPropertyKind) -> eyre::Result<PropertyId> {
        let id = self
            .get(name)
            .ok_or_else(|| eyre!("unknown material property `{name}`"))?;
        let declared = self.kinds[id.0];
        if declared != kind {
            return Err(eyre!(
                "material property `{name}` is declared as a {declared}, but a {kind} is required"
            ));
        }
        Ok(id)
    }

    /// Like [`require`](Self::require), but names the configuration parameter that refers to the
    /// property in the error.
    pub fn require_parameter(
        &self,
        parameter: &str,
        name: &str,
        kind: MaterialPropertyKind,
    ) -> eyre::Result<PropertyId> {
        self.require(name, kind)
            .wrap_err_with(|| format!("parameter `{parameter}` refers to material property `{name}`"))
    }

    pub fn kind(&self, id: PropertyId) -> MaterialPropertyKind {
        self.kinds[id.0]
    }

    pub fn name(&self, id: PropertyId) -> &str {
        &self.names[id.0]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Values of all declared material properties at one quadrature point.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialPoint<T: Scalar> {
    properties: Vec<MaterialProperty<T>>,
}

impl<T: Real> MaterialPoint<T> {
    /// Zero values for every property declared in the registry.
    pub fn for_registry(registry: &MaterialPropertyRegistry) -> Self {
        Self {
            properties: registry
                .kinds
                .iter()
                .map(|&kind| MaterialProperty::zero(kind))
                .collect(),
        }
    }

    /// Stores a property value.
    ///
    /// # Panics
    ///
    /// Panics if the value has a different kind than the property was declared with.
    pub fn set(&mut self, id: PropertyId, value: impl Into<MaterialProperty<T>>) {
        let value = value.into();
        let slot = &mut self.properties[id.0];
        assert_eq!(
            slot.kind(),
            value.kind(),
            "Material property value must have the declared kind"
        );
        *slot = value;
    }

    pub fn set_scalar(&mut self, id: PropertyId, value: T) {
        self.set(id, MaterialProperty::Scalar(value));
    }

    pub fn with(mut self, id: PropertyId, value: impl Into<MaterialProperty<T>>) -> Self {
        self.set(id, value);
        self
    }

    pub fn get(&self, id: PropertyId) -> &MaterialProperty<T> {
        &self.properties[id.0]
    }

    /// # Panics
    ///
    /// Panics if the property is not a scalar.
    pub fn scalar(&self, id: PropertyId) -> T {
        match self.get(id) {
            MaterialProperty::Scalar(value) => *value,
            other => panic!("Material property {id:?} is a {}, not a scalar", other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if the property is not a rank-three tensor.
    pub fn rank_three(&self, id: PropertyId) -> &RankThreeTensor<T> {
        match self.get(id) {
            MaterialProperty::RankThree(tensor) => tensor,
            other => panic!("Material property {id:?} is a {}, not a rank-three tensor", other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if the property is not a rank-four tensor.
    pub fn rank_four(&self, id: PropertyId) -> &RankFourTensor<T> {
        match self.get(id) {
            MaterialProperty::RankFour(tensor) => tensor,
            other => panic!("Material property {id:?} is a {}, not a rank-four tensor", other.kind()),
        }
    }
}
