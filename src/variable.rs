//! Identity of coupled variables.
use eyre::eyre;
use log::debug;
use rustc_hash::FxHashMap;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Opaque handle identifying a global unknown.
///
/// Handles are only ever compared for equality. They are handed out by a [`VariableRegistry`] and
/// double as the index into [`FieldSamples`](crate::field::FieldSamples).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl VariableId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Named variables known to the host, in registration order.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    names: Vec<String>,
    ids: FxHashMap<String, VariableId>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variable, returning the existing handle if the name is already known.
    pub fn register(&mut self, name: impl Into<String>) -> VariableId {
        let name = name.into();
        if let Some(&id) = self.ids.get(&name) {
            return id;
        }
        let id = VariableId(self.names.len());
        self.names.push(name.clone());
        self.ids.insert(name, id);
        id
    }

    pub fn get(&self, name: &str) -> Option<VariableId> {
        self.ids.get(name).copied()
    }

    /// Looks up a variable that a kernel parameter requires.
    pub fn require(&self, parameter: &str, name: &str) -> eyre::Result<VariableId> {
        self.get(name)
            .ok_or_else(|| eyre!("parameter `{parameter}` refers to unknown variable `{name}`"))
    }

    pub fn name(&self, id: VariableId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (VariableId(index), name.as_str()))
    }
}

/// A coupled variable as seen by a kernel.
///
/// Optional couplings that are not supplied resolve to [`Coupled::Zero`], the constant zero field.
/// The zero field has zero value and gradient and never matches a requested Jacobian column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Coupled {
    Variable(VariableId),
    Zero,
}

impl Coupled {
    /// Resolves a required coupling.
    pub fn required(registry: &VariableRegistry, parameter: &str, name: &str) -> eyre::Result<Self> {
        registry.require(parameter, name).map(Coupled::Variable)
    }

    /// Resolves an optional coupling, falling back to the zero field when no name is given.
    pub fn optional(registry: &VariableRegistry, parameter: &str, name: Option<&str>) -> eyre::Result<Self> {
        match name {
            Some(name) => Self::required(registry, parameter, name),
            None => {
                debug!("Parameter `{parameter}` is not coupled, using the zero field");
                Ok(Coupled::Zero)
            }
        }
    }

    pub fn id(&self) -> Option<VariableId> {
        match self {
            Self::Variable(id) => Some(*id),
            Self::Zero => None,
        }
    }

    /// Whether this coupling corresponds to the requested Jacobian column.
    pub fn matches(&self, jvar: VariableId) -> bool {
        self.id() == Some(jvar)
    }
}
