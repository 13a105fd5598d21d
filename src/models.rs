//! Hyperelastic energy densities composed from the library's building blocks.
//!
//! The models are plain expression trees: they can be finalized and differentiated with respect
//! to the deformation gradient like any other function of a matrix, or combined further.
//!
//! # Example
//!
//! ```rust
//! use fung::prelude::*;
//! use fung::models::compressible_neo_hooke;
//! use nalgebra::Matrix3;
//!
//! let mut energy = Finalize::new(compressible_neo_hooke(1.0, 2.0, -5.0, Matrix3::identity())?);
//! assert_eq!(energy.d0(), 0.0);
//!
//! // a compression leaves the domain of the volumetric penalty
//! assert!(energy.update(&(-Matrix3::<f64>::identity())).is_err());
//! # Ok::<(), fung::errors::DomainError>(())
//! ```

use nalgebra::SMatrix;

use crate::arithmetic::Compose;
use crate::cmath::{Ln, Pow};
use crate::constant::Constant;
use crate::errors::DomainError;
use crate::function::Update;
use crate::linear_algebra::{shifted_first_invariant, Determinant, LeftCauchyGreen, Trace};
use crate::operations::{Chain, Scale, Sum};

/// `c (tr(FᵀF) - N)`.
pub type IncompressibleNeoHooke<const N: usize> =
    Scale<Chain<Sum<Trace<N>, Constant<f64>>, LeftCauchyGreen<N>>>;

/// `d0 j² + d1 ln(j) - d0` with `j = det(F)`, zero at `F = I`.
pub type VolumetricPenalty<const N: usize> =
    Chain<Sum<Sum<Scale<Pow<2>>, Scale<Ln>>, Constant<f64>>, Determinant<N>>;

/// Incompressible part plus volumetric penalty.
pub type CompressibleNeoHooke<const N: usize> =
    Sum<IncompressibleNeoHooke<N>, VolumetricPenalty<N>>;

/// Neo-Hooke energy `c (tr(FᵀF) - N)` at the deformation gradient `f`.
///
/// # Errors
/// Returns a [`DomainError`] if `f` has a NaN or infinite entry.
pub fn incompressible_neo_hooke<const N: usize>(
    c: f64,
    f: SMatrix<f64, N, N>,
) -> Result<IncompressibleNeoHooke<N>, DomainError> {
    let identity = SMatrix::<f64, N, N>::identity();
    let invariant = shifted_first_invariant(identity)?;
    Ok(c * invariant.of(LeftCauchyGreen::new(f)?)?)
}

/// Volumetric penalty `d0 j² + d1 ln(j) - d0` of the deformation gradient `f`, `j = det(f)`.
///
/// # Errors
/// Returns a [`DomainError`] if `det(f) <= 0`.
pub fn volumetric_penalty<const N: usize>(
    d0: f64,
    d1: f64,
    f: SMatrix<f64, N, N>,
) -> Result<VolumetricPenalty<N>, DomainError>
where
    Determinant<N>: Update<SMatrix<f64, N, N>, Output = f64>,
{
    let penalty = d0 * Pow::<2>::new(1.0)? + d1 * Ln::new(1.0)? - d0;
    penalty.of(Determinant::new(f)?)
}

/// Compressible neo-Hooke energy `c (tr(FᵀF) - N) + d0 j² + d1 ln(j) - d0`.
///
/// With `d1 = -(2 c + 2 d0)` the energy is stress free at `F = I`.
///
/// # Errors
/// Returns a [`DomainError`] if `f` has a non-finite entry or `det(f) <= 0`.
pub fn compressible_neo_hooke<const N: usize>(
    c: f64,
    d0: f64,
    d1: f64,
    f: SMatrix<f64, N, N>,
) -> Result<CompressibleNeoHooke<N>, DomainError>
where
    Determinant<N>: Update<SMatrix<f64, N, N>, Output = f64>,
{
    Ok(incompressible_neo_hooke(c, f)? + volumetric_penalty(d0, d1, f)?)
}
