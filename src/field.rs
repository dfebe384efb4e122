//! Field and shape function samples at a quadrature point.
use crate::variable::{Coupled, VariableId, VariableRegistry};
use crate::Real;
use nalgebra::{Scalar, Vector3};

/// Value and gradient of a scalar field at a quadrature point.
///
/// Gradients always have three components. Two-dimensional problems leave the z component at
/// zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldSample<T: Scalar> {
    pub value: T,
    pub gradient: Vector3<T>,
}

impl<T: Real> Default for FieldSample<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Real> FieldSample<T> {
    pub fn new(value: T, gradient: Vector3<T>) -> Self {
        Self { value, gradient }
    }

    pub fn zero() -> Self {
        Self::new(T::zero(), Vector3::zeros())
    }

    pub fn from_value(value: T) -> Self {
        Self::new(value, Vector3::zeros())
    }

    pub fn from_gradient(gradient: Vector3<T>) -> Self {
        Self::new(T::zero(), gradient)
    }

    /// Interpolates the field $u_h = \sum_I u_I \phi_I$ from nodal coefficients.
    ///
    /// # Panics
    ///
    /// Panics if the number of coefficients differs from the number of basis samples.
    pub fn interpolate(coefficients: &[T], basis: &[ShapeFunctionSample<T>]) -> Self {
        assert_eq!(
            coefficients.len(),
            basis.len(),
            "Number of coefficients must match number of basis functions"
        );
        let mut sample = Self::zero();
        for (&u_i, phi_i) in coefficients.iter().zip(basis) {
            sample.value += u_i * phi_i.value;
            sample.gradient += phi_i.gradient * u_i;
        }
        sample
    }
}

/// Value and gradient of a test or trial function at a quadrature point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeFunctionSample<T: Scalar> {
    pub value: T,
    pub gradient: Vector3<T>,
}

impl<T: Real> ShapeFunctionSample<T> {
    pub fn new(value: T, gradient: Vector3<T>) -> Self {
        Self { value, gradient }
    }
}

/// Samples of every registered variable at a single quadrature point, indexed by [`VariableId`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSamples<T: Scalar> {
    samples: Vec<FieldSample<T>>,
}

impl<T: Real> FieldSamples<T> {
    /// Zero samples for every variable in the registry.
    pub fn for_registry(registry: &VariableRegistry) -> Self {
        Self::zeros(registry.len())
    }

    pub fn zeros(num_variables: usize) -> Self {
        Self {
            samples: vec![FieldSample::zero(); num_variables],
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, id: VariableId) -> &FieldSample<T> {
        &self.samples[id.index()]
    }

    pub fn get_mut(&mut self, id: VariableId) -> &mut FieldSample<T> {
        &mut self.samples[id.index()]
    }

    pub fn set(&mut self, id: VariableId, sample: FieldSample<T>) {
        self.samples[id.index()] = sample;
    }

    pub fn with(mut self, id: VariableId, sample: FieldSample<T>) -> Self {
        self.set(id, sample);
        self
    }

    /// Value of a coupled field, zero for the zero field.
    pub fn value(&self, coupled: Coupled) -> T {
        match coupled {
            Coupled::Variable(id) => self.get(id).value,
            Coupled::Zero => T::zero(),
        }
    }

    /// Gradient of a coupled field, zero for the zero field.
    pub fn gradient(&self, coupled: Coupled) -> Vector3<T> {
        match coupled {
            Coupled::Variable(id) => self.get(id).gradient,
            Coupled::Zero => Vector3::zeros(),
        }
    }
}
