//! Elementary scalar functions.
//!
//! Every function caches its value and the first three derivatives at the current argument, so
//! a directional derivative is a single multiplication with the directions. Arguments outside the
//! domain are rejected by `new` and `update` with a [`DomainError`](crate::errors::DomainError),
//! which leaves the function unchanged.
//!
//! # Example
//!
//! ```rust
//! use fung::prelude::*;
//!
//! let mut f = Finalize::new(Ln::new(1.0)?);
//! assert_eq!(f.d1(&1.0), 1.0);
//! assert!(f.update(&-1.0).is_err());
//! # Ok::<(), fung::errors::DomainError>(())
//! ```

/// Implements the node protocol for scalar functions.
///
/// The type needs the fields `x: f64` and `d: [f64; 4]`, a constant `NAME` and a function
/// `derivatives(x) -> Result<[f64; 4], DomainError>` returning value and the first three
/// derivatives at `x`.
macro_rules! scalar_function {
    ($([$($gen:tt)*] $ty:ty);+ $(;)?) => {
        $(
            impl<$($gen)*> $ty {
                /// Creates the function at argument `x`.
                ///
                /// # Errors
                /// Returns a [`DomainError`](crate::errors::DomainError) if `x` lies outside
                /// the domain.
                pub fn new(x: f64) -> Result<Self, crate::errors::DomainError> {
                    let mut f = Self { x, d: [0.0; 4] };
                    crate::function::Update::update(&mut f, &x)?;
                    Ok(f)
                }

                /// Current argument.
                pub fn argument(&self) -> f64 {
                    self.x
                }
            }

            impl<$($gen)*> crate::function::Function for $ty {
                type Output = f64;

                fn d0(&self) -> f64 {
                    self.d[0]
                }
            }

            impl<$($gen)*> crate::function::Update<f64> for $ty {
                const PRESENT: bool = true;

                fn update(&mut self, x: &f64) -> Result<(), crate::errors::DomainError> {
                    crate::errors::DomainError::check_finite(Self::NAME, *x)?;
                    self.d = Self::derivatives(*x)?;
                    self.x = *x;
                    Ok(())
                }
            }

            impl<const __X: usize, $($gen)*> crate::function::D1<__X, f64> for $ty {
                const PRESENT: bool = __X == crate::function::ARGUMENT;

                fn d1(&self, dx: &f64) -> Option<f64> {
                    (__X == crate::function::ARGUMENT).then(|| self.d[1] * dx)
                }
            }

            impl<const __X: usize, const __Y: usize, $($gen)*> crate::function::D2<__X, __Y, f64, f64>
                for $ty
            {
                const PRESENT: bool =
                    __X == crate::function::ARGUMENT && __Y == crate::function::ARGUMENT;

                fn d2(&self, dx: &f64, dy: &f64) -> Option<f64> {
                    (<Self as crate::function::D2<__X, __Y, f64, f64>>::PRESENT)
                        .then(|| self.d[2] * dx * dy)
                }
            }

            impl<const __X: usize, const __Y: usize, const __Z: usize, $($gen)*>
                crate::function::D3<__X, __Y, __Z, f64, f64, f64> for $ty
            {
                const PRESENT: bool = __X == crate::function::ARGUMENT
                    && __Y == crate::function::ARGUMENT
                    && __Z == crate::function::ARGUMENT;

                fn d3(&self, dx: &f64, dy: &f64, dz: &f64) -> Option<f64> {
                    (<Self as crate::function::D3<__X, __Y, __Z, f64, f64, f64>>::PRESENT)
                        .then(|| self.d[3] * dx * dy * dz)
                }
            }

            crate::absent!([$($gen)*] $ty: update_variable);
        )+
    };
}

mod exp;
mod log;
mod pow;
mod trig;

pub use exp::{Exp, Exp2};
pub use log::{Ln, Log10, Log2};
pub use pow::{Cbrt, Pow, Sqrt};
pub use trig::{ArcCos, ArcSin, Cos, Sin, Tan};
