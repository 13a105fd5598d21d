use nalgebra::SMatrix;

use crate::errors::DomainError;
use crate::function::{Function, Update, ARGUMENT, D1};

use super::check_entries;

/// Trace of a square matrix. Linear, so only the first derivative is present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trace<const N: usize> {
    value: f64,
}

impl<const N: usize> Trace<N> {
    /// # Errors
    /// Returns [`DomainError::NonFinite`] if `a` has a NaN or infinite entry.
    pub fn new(a: SMatrix<f64, N, N>) -> Result<Self, DomainError> {
        let mut f = Trace { value: 0.0 };
        f.update(&a)?;
        Ok(f)
    }
}

impl<const N: usize> Function for Trace<N> {
    type Output = f64;

    fn d0(&self) -> f64 {
        self.value
    }
}

impl<const N: usize> Update<SMatrix<f64, N, N>> for Trace<N> {
    const PRESENT: bool = true;

    fn update(&mut self, a: &SMatrix<f64, N, N>) -> Result<(), DomainError> {
        check_entries("trace", a)?;
        self.value = a.trace();
        Ok(())
    }
}

impl<const N: usize, const X: usize> D1<X, SMatrix<f64, N, N>> for Trace<N> {
    const PRESENT: bool = X == ARGUMENT;

    fn d1(&self, da: &SMatrix<f64, N, N>) -> Option<f64> {
        (X == ARGUMENT).then(|| da.trace())
    }
}

crate::absent!([const N: usize] Trace<N>: update_variable, d2, d3);
