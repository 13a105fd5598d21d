use nalgebra::SMatrix;

use crate::errors::DomainError;
use crate::function::{Function, Update, ARGUMENT, D1, D2};

use super::check_entries;

/// Squared Frobenius norm `A : A`.
///
/// Only the first two derivatives are implemented, the third one vanishes and is left to
/// [`Finalize`](crate::finalize::Finalize).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquaredFrobeniusNorm<const R: usize, const C: usize> {
    a: SMatrix<f64, R, C>,
    value: f64,
}

impl<const R: usize, const C: usize> SquaredFrobeniusNorm<R, C> {
    /// # Errors
    /// Returns [`DomainError::NonFinite`] if `a` has a NaN or infinite entry.
    pub fn new(a: SMatrix<f64, R, C>) -> Result<Self, DomainError> {
        let mut f = SquaredFrobeniusNorm { a, value: 0.0 };
        f.update(&a)?;
        Ok(f)
    }
}

impl<const R: usize, const C: usize> Function for SquaredFrobeniusNorm<R, C> {
    type Output = f64;

    fn d0(&self) -> f64 {
        self.value
    }
}

impl<const R: usize, const C: usize> Update<SMatrix<f64, R, C>> for SquaredFrobeniusNorm<R, C> {
    const PRESENT: bool = true;

    fn update(&mut self, a: &SMatrix<f64, R, C>) -> Result<(), DomainError> {
        check_entries("frobenius", a)?;
        self.a = *a;
        self.value = a.norm_squared();
        Ok(())
    }
}

impl<const R: usize, const C: usize, const X: usize> D1<X, SMatrix<f64, R, C>>
    for SquaredFrobeniusNorm<R, C>
{
    const PRESENT: bool = X == ARGUMENT;

    fn d1(&self, da: &SMatrix<f64, R, C>) -> Option<f64> {
        (X == ARGUMENT).then(|| 2.0 * self.a.dot(da))
    }
}

impl<const R: usize, const C: usize, const X: usize, const Y: usize>
    D2<X, Y, SMatrix<f64, R, C>, SMatrix<f64, R, C>> for SquaredFrobeniusNorm<R, C>
{
    const PRESENT: bool = X == ARGUMENT && Y == ARGUMENT;

    fn d2(&self, da: &SMatrix<f64, R, C>, db: &SMatrix<f64, R, C>) -> Option<f64> {
        (X == ARGUMENT && Y == ARGUMENT).then(|| 2.0 * da.dot(db))
    }
}

crate::absent!([const R: usize, const C: usize] SquaredFrobeniusNorm<R, C>: update_variable, d3);
