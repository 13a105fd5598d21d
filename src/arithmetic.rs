//! Operator sugar for building expression trees.
//!
//! Every node type gets the arithmetic operators, so trees can be written like formulas:
//!
//! | expression   | node                                  |
//! |--------------|---------------------------------------|
//! | `f + g`      | `Sum<F, G>`                           |
//! | `f - g`      | `Sum<F, Scale<G>>`                    |
//! | `f * g`      | `Product<F, G>`                       |
//! | `a * f`      | `Scale<F>` (also `f * a`)             |
//! | `f + a`      | `Sum<F, Constant<f64>>` (also `a + f`)|
//! | `-f`         | `Scale<F>` with factor `-1`           |
//!
//! Composition is spelled `f.of(g)`, see [`Compose`].
//!
//! # Example
//!
//! ```rust
//! use fung::prelude::*;
//!
//! let x = 0.5;
//! let mut f = 2.0 * Sin::new(x)? * Exp::new(x)? - Pow::<2>::new(x)? + 1.0;
//! assert_eq!(f.eval(&0.0)?, 1.0);
//! # Ok::<(), fung::errors::DomainError>(())
//! ```

use std::ops::{Add, Mul, Neg, Sub};

use crate::cmath::{
    ArcCos, ArcSin, Cbrt, Cos, Exp, Exp2, Ln, Log10, Log2, Pow, Sin, Sqrt, Tan,
};
use crate::constant::{Constant, Identity};
use crate::errors::DomainError;
use crate::function::{Function, Update};
#[cfg(feature = "nalgebra")]
use crate::linear_algebra::{
    Determinant, LeftCauchyGreen, SecondPrincipalInvariant, SquaredFrobeniusNorm, Trace,
};
use crate::operations::{
    Chain, Dot, Extremum, InnerProduct, Product, Scale, Squared, Sum,
};
use crate::variable::Variable;

/// Function composition for every node.
pub trait Compose: Function {
    /// `self ∘ g`, see [`Chain::new`].
    ///
    /// # Errors
    /// Returns a [`DomainError`] if the current value of `g` is outside the domain of `self`.
    fn of<G>(self, g: G) -> Result<Chain<Self, G>, DomainError>
    where
        G: Function,
        Self: Update<G::Output>,
    {
        Chain::new(self, g)
    }

    /// Updates the node and returns its new value.
    ///
    /// # Errors
    /// See [`Update::update`].
    fn eval<Arg>(&mut self, x: &Arg) -> Result<Self::Output, DomainError>
    where
        Self: Update<Arg>,
    {
        self.update(x)?;
        Ok(self.d0())
    }
}

impl<F: Function> Compose for F {}

/// Implements the arithmetic operators for node types.
///
/// Each entry reads `[generics] Type [extra where predicates]`. Operations with `f64` on the
/// right-hand side do not overlap with the node-node operations because `f64` is not a node.
macro_rules! impl_arithmetic {
    ($([$($gen:tt)*] $ty:ty [$($pred:tt)*]);+ $(;)?) => {
        $( impl_arithmetic!(@node [$($gen)*] $ty [$($pred)*]); )+
    };
    (@node [$($gen:tt)*] $ty:ty [$($pred:tt)*]) => {
        impl<__Rhs, $($gen)*> Add<__Rhs> for $ty
        where
            $($pred)*
            $ty: Function,
            __Rhs: Function<Output = <$ty as Function>::Output>,
            <$ty as Function>::Output: Add<Output = <$ty as Function>::Output>,
        {
            type Output = Sum<$ty, __Rhs>;

            fn add(self, rhs: __Rhs) -> Self::Output {
                Sum::new(self, rhs)
            }
        }

        impl<__Rhs, $($gen)*> Sub<__Rhs> for $ty
        where
            $($pred)*
            $ty: Function,
            __Rhs: Function<Output = <$ty as Function>::Output>,
            <$ty as Function>::Output: Add<Output = <$ty as Function>::Output>
                + Mul<f64, Output = <$ty as Function>::Output>,
        {
            type Output = Sum<$ty, Scale<__Rhs>>;

            fn sub(self, rhs: __Rhs) -> Self::Output {
                Sum::new(self, Scale::new(-1.0, rhs))
            }
        }

        impl<__Rhs, $($gen)*> Mul<__Rhs> for $ty
        where
            $($pred)*
            $ty: Function,
            __Rhs: Function,
            <$ty as Function>::Output: Mul<<__Rhs as Function>::Output>,
        {
            type Output = Product<$ty, __Rhs>;

            fn mul(self, rhs: __Rhs) -> Self::Output {
                Product::new(self, rhs)
            }
        }

        impl<$($gen)*> Mul<f64> for $ty
        where
            $($pred)*
            $ty: Function,
            <$ty as Function>::Output: Mul<f64, Output = <$ty as Function>::Output>,
        {
            type Output = Scale<$ty>;

            fn mul(self, a: f64) -> Self::Output {
                Scale::new(a, self)
            }
        }

        impl<$($gen)*> Mul<$ty> for f64
        where
            $($pred)*
            $ty: Function,
            <$ty as Function>::Output: Mul<f64, Output = <$ty as Function>::Output>,
        {
            type Output = Scale<$ty>;

            fn mul(self, f: $ty) -> Self::Output {
                Scale::new(self, f)
            }
        }

        impl<$($gen)*> Add<f64> for $ty
        where
            $($pred)*
            $ty: Function<Output = f64>,
        {
            type Output = Sum<$ty, Constant<f64>>;

            fn add(self, a: f64) -> Self::Output {
                Sum::new(self, Constant::new(a))
            }
        }

        impl<$($gen)*> Add<$ty> for f64
        where
            $($pred)*
            $ty: Function<Output = f64>,
        {
            type Output = Sum<Constant<f64>, $ty>;

            fn add(self, f: $ty) -> Self::Output {
                Sum::new(Constant::new(self), f)
            }
        }

        impl<$($gen)*> Sub<f64> for $ty
        where
            $($pred)*
            $ty: Function<Output = f64>,
        {
            type Output = Sum<$ty, Constant<f64>>;

            fn sub(self, a: f64) -> Self::Output {
                Sum::new(self, Constant::new(-a))
            }
        }

        impl<$($gen)*> Sub<$ty> for f64
        where
            $($pred)*
            $ty: Function<Output = f64>,
        {
            type Output = Sum<Constant<f64>, Scale<$ty>>;

            fn sub(self, f: $ty) -> Self::Output {
                Sum::new(Constant::new(self), Scale::new(-1.0, f))
            }
        }

        impl<$($gen)*> Neg for $ty
        where
            $($pred)*
            $ty: Function,
            <$ty as Function>::Output: Mul<f64, Output = <$ty as Function>::Output>,
        {
            type Output = Scale<$ty>;

            fn neg(self) -> Self::Output {
                Scale::new(-1.0, self)
            }
        }
    };
}

impl_arithmetic! {
    [T] Constant<T> [];
    [T] Identity<T> [];
    [T, const ID: usize] Variable<T, ID> [];
    [F: Function, G] Sum<F, G> [];
    [F: Function] Scale<F> [];
    [F: Function, G: Function] Product<F, G> [F::Output: Mul<G::Output>,];
    [F: Function] Squared<F> [];
    [F: Function, G: Function] Dot<F, G> [F::Output: InnerProduct<G::Output>,];
    [F, G] Chain<F, G> [];
    [F: Function, G, const MAX: bool] Extremum<F, G, MAX> [];
    [] Sin [];
    [] Cos [];
    [] Tan [];
    [] ArcSin [];
    [] ArcCos [];
    [] Exp [];
    [] Exp2 [];
    [] Ln [];
    [] Log10 [];
    [] Log2 [];
    [const K: i32, const L: i32] Pow<K, L> [];
    [] Sqrt [];
    [] Cbrt [];
}

#[cfg(feature = "nalgebra")]
impl_arithmetic! {
    [const N: usize] Trace<N> [];
    [const N: usize] Determinant<N> [];
    [const R: usize, const C: usize] SquaredFrobeniusNorm<R, C> [];
    [const N: usize] LeftCauchyGreen<N> [];
    [const N: usize] SecondPrincipalInvariant<N> [];
}
