//! Additive identity and canonical unit direction of result types.
//!
//! [`Zero`] is the extension point for new numeric back-ends: a result type that implements it
//! (together with the arithmetic the combinators need) can flow through every node, and
//! [`Finalize`](crate::finalize::Finalize) uses it to report derivatives that are identically
//! zero.

#[cfg(feature = "nalgebra")]
use nalgebra::SMatrix;

/// Additive identity of a type.
pub trait Zero {
    fn zero() -> Self;
}

/// Canonical unit direction of a type (`1` for scalars, the identity for square matrices).
///
/// For scalar functions of one argument, the derivative in unit direction is the ordinary
/// derivative.
pub trait Unit {
    fn unit() -> Self;
}

impl Zero for f64 {
    fn zero() -> Self {
        0.0
    }
}

impl Zero for f32 {
    fn zero() -> Self {
        0.0
    }
}

impl Unit for f64 {
    fn unit() -> Self {
        1.0
    }
}

impl Unit for f32 {
    fn unit() -> Self {
        1.0
    }
}

#[cfg(feature = "nalgebra")]
impl<const R: usize, const C: usize> Zero for SMatrix<f64, R, C> {
    fn zero() -> Self {
        SMatrix::zeros()
    }
}

#[cfg(feature = "nalgebra")]
impl<const N: usize> Unit for SMatrix<f64, N, N> {
    fn unit() -> Self {
        SMatrix::identity()
    }
}
