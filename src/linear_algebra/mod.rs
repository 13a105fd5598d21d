//! Functions of matrices.
//!
//! The leaves in this module take `nalgebra` matrices as arguments and directions. Scalar-valued
//! ones can be composed with the functions of [`cmath`](crate::cmath), e.g. `Ln` of a
//! [`Determinant`], matrix-valued ones like [`LeftCauchyGreen`] can be fed into the scalar-valued
//! ones. [`gradient`] and [`hessian`] assemble the full first and second derivative of a
//! finalized scalar function from its directional derivatives.

use nalgebra::SMatrix;

use crate::errors::DomainError;

mod derivatives;
mod determinant;
mod frobenius_norm;
mod invariants;
mod strain_tensor;
mod trace;

pub use derivatives::{basis, gradient, hessian};
pub use determinant::Determinant;
pub use frobenius_norm::SquaredFrobeniusNorm;
pub use invariants::{
    first_principal_invariant, shifted_first_invariant, third_principal_invariant,
    SecondPrincipalInvariant,
};
pub use strain_tensor::LeftCauchyGreen;
pub use trace::Trace;

/// Rejects matrices with NaN or infinite entries.
pub(crate) fn check_entries<const R: usize, const C: usize>(
    function: &str,
    a: &SMatrix<f64, R, C>,
) -> Result<(), DomainError> {
    a.iter()
        .try_for_each(|&value| DomainError::check_finite(function, value))
}
