//! Expression templates for closed-form functions with exact derivatives up to third order.
//!
//! Functions are built as trees of statically typed nodes. Every node caches its value at the
//! last update and implements whichever of the first, second and third directional derivatives
//! it can provide. Which derivatives exist is known at compile time, so absent branches are
//! pruned from the generated code and asking a tree for a derivative it cannot give fails the
//! build instead of returning garbage.
//!
//! # Features
//!
//! - Scalar leaves from `<cmath>`: powers and roots, exponential and logarithms, trigonometric
//!   functions
//! - Sums, scalings, products, squares, inner products, compositions and min/max
//! - Independent variables in up to 64 slots, updated and differentiated slot by slot
//! - Matrix invariants, strain tensor and neo-Hooke energies (feature `nalgebra`)
//! - Parallel evaluation over many points with rayon
//!
//! # Example
//!
//! ```rust
//! use fung::prelude::*;
//!
//! // f(x) = x³ + 2 sin(x)
//! let mut f = finalize(Pow::<3>::new(0.0)? + 2.0 * Sin::new(0.0)?);
//! f.update(&1.0)?;
//!
//! assert_eq!(f.d0(), 1.0 + 2.0 * 1.0_f64.sin());
//! assert_eq!(f.d1(&1.0), 3.0 + 2.0 * 1.0_f64.cos());
//! assert_eq!(f.d3_unit::<f64>(), 6.0 - 2.0 * 1.0_f64.cos());
//! # Ok::<(), fung::errors::DomainError>(())
//! ```

pub mod prelude {
    pub use crate::arithmetic::Compose;
    pub use crate::cmath::{
        ArcCos, ArcSin, Cbrt, Cos, Exp, Exp2, Ln, Log10, Log2, Pow, Sin, Sqrt, Tan,
    };
    pub use crate::constant::{constant, Constant, Identity};
    pub use crate::errors::DomainError;
    pub use crate::finalize::{finalize, Finalize};
    pub use crate::function::{Function, Update, UpdateVariable, ARGUMENT, D1, D2, D3};
    #[cfg(feature = "nalgebra")]
    pub use crate::linear_algebra::{
        Determinant, LeftCauchyGreen, SecondPrincipalInvariant, SquaredFrobeniusNorm, Trace,
    };
    pub use crate::operations::{
        chain, dot, max, min, squared, Chain, Dot, Extremum, InnerProduct, Product, Scale,
        Squared, Sum,
    };
    pub use crate::variable::{variable, Variable};
    pub use crate::zero::{Unit, Zero};
}

/// Operator overloads and composition
pub mod arithmetic;
/// Parallel evaluation over many points
pub mod batch;
/// Scalar functions with closed-form derivatives
pub mod cmath;
/// Combination of optional derivative terms
pub mod compute;
/// Constants and the identity
pub mod constant;
/// Capability queries and gated derivative calls
pub mod derivative;
/// Error types for rejected arguments
pub mod errors;
/// Entry point for evaluation and differentiation of a tree
pub mod finalize;
/// The node protocol
pub mod function;
/// Matrix functions and their gradients
#[cfg(feature = "nalgebra")]
pub mod linear_algebra;
/// Hyperelastic energy densities
#[cfg(feature = "nalgebra")]
pub mod models;
/// Combinators building trees from sub-trees
pub mod operations;
/// Independent variables and slot predicates
pub mod variable;
/// Additive and multiplicative identities of output types
pub mod zero;

#[cfg(test)]
mod test_util;
