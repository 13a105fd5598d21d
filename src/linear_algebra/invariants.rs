use nalgebra::SMatrix;

use crate::constant::Constant;
use crate::errors::DomainError;
use crate::function::{Function, Update, ARGUMENT, D1, D2};
use crate::operations::Sum;

use super::{check_entries, Determinant, Trace};

/// First principal invariant `tr(A)`.
///
/// # Errors
/// Returns [`DomainError::NonFinite`] if `a` has a NaN or infinite entry.
pub fn first_principal_invariant<const N: usize>(
    a: SMatrix<f64, N, N>,
) -> Result<Trace<N>, DomainError> {
    Trace::new(a)
}

/// First principal invariant shifted by the dimension, `tr(A) - N`, which vanishes at the
/// identity.
///
/// # Errors
/// Returns [`DomainError::NonFinite`] if `a` has a NaN or infinite entry.
pub fn shifted_first_invariant<const N: usize>(
    a: SMatrix<f64, N, N>,
) -> Result<Sum<Trace<N>, Constant<f64>>, DomainError> {
    Ok(Trace::new(a)? - N as f64)
}

/// Third principal invariant `det(A)`.
///
/// # Errors
/// Returns [`DomainError::NonFinite`] if `a` has a NaN or infinite entry.
pub fn third_principal_invariant<const N: usize>(
    a: SMatrix<f64, N, N>,
) -> Result<Determinant<N>, DomainError>
where
    Determinant<N>: Update<SMatrix<f64, N, N>>,
{
    Determinant::new(a)
}

/// Second principal invariant `(tr(A)² - tr(A²)) / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondPrincipalInvariant<const N: usize> {
    a: SMatrix<f64, N, N>,
    trace: f64,
    value: f64,
}

impl<const N: usize> SecondPrincipalInvariant<N> {
    /// # Errors
    /// Returns [`DomainError::NonFinite`] if `a` has a NaN or infinite entry.
    pub fn new(a: SMatrix<f64, N, N>) -> Result<Self, DomainError> {
        let mut f = SecondPrincipalInvariant {
            a,
            trace: 0.0,
            value: 0.0,
        };
        f.update(&a)?;
        Ok(f)
    }
}

impl<const N: usize> Function for SecondPrincipalInvariant<N> {
    type Output = f64;

    fn d0(&self) -> f64 {
        self.value
    }
}

impl<const N: usize> Update<SMatrix<f64, N, N>> for SecondPrincipalInvariant<N> {
    const PRESENT: bool = true;

    fn update(&mut self, a: &SMatrix<f64, N, N>) -> Result<(), DomainError> {
        check_entries("second invariant", a)?;
        self.a = *a;
        self.trace = a.trace();
        self.value = 0.5 * (self.trace * self.trace - (a * a).trace());
        Ok(())
    }
}

impl<const N: usize, const X: usize> D1<X, SMatrix<f64, N, N>> for SecondPrincipalInvariant<N> {
    const PRESENT: bool = X == ARGUMENT;

    fn d1(&self, da: &SMatrix<f64, N, N>) -> Option<f64> {
        (X == ARGUMENT).then(|| self.trace * da.trace() - (self.a * da).trace())
    }
}

impl<const N: usize, const X: usize, const Y: usize>
    D2<X, Y, SMatrix<f64, N, N>, SMatrix<f64, N, N>> for SecondPrincipalInvariant<N>
{
    const PRESENT: bool = X == ARGUMENT && Y == ARGUMENT;

    fn d2(&self, da: &SMatrix<f64, N, N>, db: &SMatrix<f64, N, N>) -> Option<f64> {
        (X == ARGUMENT && Y == ARGUMENT).then(|| da.trace() * db.trace() - (da * db).trace())
    }
}

crate::absent!([const N: usize] SecondPrincipalInvariant<N>: update_variable, d3);
