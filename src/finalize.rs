//! Finalization of expression trees.
//!
//! [`Finalize`] is the terminal wrapper around a composed function. It is the only place where
//! an absent derivative becomes a zero derivative, and it checks at build time that every query
//! makes sense:
//!
//! - derivatives with respect to a variable require that variable to occur in the tree
//! - direction types must be compatible with the variables they address
//! - a second (third) derivative may only be present if the first (second) one is
//!
//! Violations fail the build with a descriptive message. Trees without variables are
//! differentiated with respect to their argument with `d1`, `d2`, `d3`; trees with variables
//! with `d1_wrt`, `d2_wrt`, `d3_wrt`.
//!
//! # Example
//!
//! ```rust
//! use fung::prelude::*;
//!
//! // x^3 + sqrt(x) at x = 2
//! let mut f = finalize(Pow::<3>::new(2.0)? + Sqrt::new(2.0)?);
//! assert_eq!(f.d1(&1.0), 12.0 + 0.5 / 2.0_f64.sqrt());
//!
//! // only the cubic term has a third derivative
//! assert_eq!(f.eval(&1.0)?, 2.0);
//! assert_eq!(f.d3_unit::<f64>(), 6.0 + 0.375);
//! # Ok::<(), fung::errors::DomainError>(())
//! ```

use log::debug;

use crate::derivative::{
    self, has_consistent_first_derivative, has_consistent_second_derivative,
    has_consistent_third_derivative, Capabilities,
};
use crate::errors::DomainError;
use crate::function::{Function, Update, UpdateVariable, ARGUMENT, D1, D2, D3};
use crate::variable::{has_variable, has_variable_id};
use crate::zero::{Unit, Zero};

/// Terminal wrapper that answers every derivative query, with zero where the tree has no
/// derivative of its own.
#[derive(Clone)]
pub struct Finalize<F> {
    f: F,
}

/// Wraps `f` into a [`Finalize`].
pub fn finalize<F: Function>(f: F) -> Finalize<F> {
    Finalize::new(f)
}

impl<F: Function> Finalize<F> {
    pub fn new(f: F) -> Self {
        Finalize { f }
    }

    /// The finalized tree.
    pub fn inner(&self) -> &F {
        &self.f
    }

    pub fn into_inner(self) -> F {
        self.f
    }

    /// Function value.
    pub fn d0(&self) -> F::Output {
        self.f.d0()
    }

    /// Moves the point of evaluation to `x`.
    ///
    /// # Errors
    /// Returns the [`DomainError`] of the first function in the tree that rejects its argument.
    /// The tree is then partially updated: nodes visited before the rejecting one hold the new
    /// point, the others the old one. Value and derivatives do not match any single point until
    /// the next successful update.
    pub fn update<Arg>(&mut self, x: &Arg) -> Result<(), DomainError>
    where
        F: Update<Arg>,
    {
        self.f.update(x).inspect_err(|err| debug!("update rejected: {err}"))
    }

    /// Moves the point of evaluation to `x` and returns the new function value.
    ///
    /// # Errors
    /// See [`Finalize::update`].
    pub fn eval<Arg>(&mut self, x: &Arg) -> Result<F::Output, DomainError>
    where
        F: Update<Arg>,
    {
        self.update(x)?;
        Ok(self.f.d0())
    }

    /// Sets the variable in slot `ID` to `x`. Sub-trees not containing the slot are not touched.
    ///
    /// # Errors
    /// Returns the [`DomainError`] of the first function depending on the slot that rejects its
    /// new argument. As with [`Finalize::update`], the tree is left partially updated.
    pub fn update_variable<const ID: usize, Arg>(&mut self, x: &Arg) -> Result<(), DomainError>
    where
        F: UpdateVariable<ID, Arg>,
    {
        const {
            assert!(
                has_variable_id::<F, ID>(),
                "You are trying to update a variable that is not present."
            )
        };
        self.f
            .update_variable(x)
            .inspect_err(|err| debug!("update of variable {ID} rejected: {err}"))
    }

    /// First directional derivative with respect to the argument.
    pub fn d1<Dx>(&self, dx: &Dx) -> F::Output
    where
        F: D1<ARGUMENT, Dx>,
        F::Output: Zero,
    {
        const {
            assert!(
                !has_variable::<F>(),
                "Functions of variables are differentiated with d1_wrt, d2_wrt and d3_wrt."
            )
        };
        const {
            assert!(
                has_consistent_first_derivative::<F>(),
                "Inconsistent functional definition encountered."
            )
        };
        derivative::d1::<ARGUMENT, _, _>(&self.f, dx).unwrap_or_else(Zero::zero)
    }

    /// Second directional derivative with respect to the argument.
    pub fn d2<Dx, Dy>(&self, dx: &Dx, dy: &Dy) -> F::Output
    where
        F: D1<ARGUMENT, Dx> + D1<ARGUMENT, Dy> + D2<ARGUMENT, ARGUMENT, Dx, Dy>,
        F::Output: Zero,
    {
        const {
            assert!(
                !has_variable::<F>(),
                "Functions of variables are differentiated with d1_wrt, d2_wrt and d3_wrt."
            )
        };
        const {
            assert!(
                has_consistent_second_derivative::<F, ARGUMENT, ARGUMENT, Dx, Dy>(),
                "Inconsistent functional definition encountered."
            )
        };
        derivative::d2::<ARGUMENT, ARGUMENT, _, _, _>(&self.f, dx, dy)
            .unwrap_or_else(Zero::zero)
    }

    /// Third directional derivative with respect to the argument.
    pub fn d3<Dx, Dy, Dz>(&self, dx: &Dx, dy: &Dy, dz: &Dz) -> F::Output
    where
        F: D1<ARGUMENT, Dx>
            + D1<ARGUMENT, Dy>
            + D2<ARGUMENT, ARGUMENT, Dx, Dy>
            + D3<ARGUMENT, ARGUMENT, ARGUMENT, Dx, Dy, Dz>,
        F::Output: Zero,
    {
        const {
            assert!(
                !has_variable::<F>(),
                "Functions of variables are differentiated with d1_wrt, d2_wrt and d3_wrt."
            )
        };
        const {
            assert!(
                has_consistent_third_derivative::<F, ARGUMENT, ARGUMENT, ARGUMENT, Dx, Dy, Dz>(),
                "Inconsistent functional definition encountered."
            )
        };
        derivative::d3::<ARGUMENT, ARGUMENT, ARGUMENT, _, _, _, _>(&self.f, dx, dy, dz)
            .unwrap_or_else(Zero::zero)
    }

    /// First derivative in the canonical unit direction, the ordinary derivative for scalar
    /// functions.
    pub fn d1_unit<Dx: Unit>(&self) -> F::Output
    where
        F: D1<ARGUMENT, Dx>,
        F::Output: Zero,
    {
        self.d1(&Dx::unit())
    }

    /// Second derivative in the canonical unit direction.
    pub fn d2_unit<Dx: Unit>(&self) -> F::Output
    where
        F: D1<ARGUMENT, Dx> + D2<ARGUMENT, ARGUMENT, Dx, Dx>,
        F::Output: Zero,
    {
        self.d2(&Dx::unit(), &Dx::unit())
    }

    /// Third derivative in the canonical unit direction.
    pub fn d3_unit<Dx: Unit>(&self) -> F::Output
    where
        F: D1<ARGUMENT, Dx> + D2<ARGUMENT, ARGUMENT, Dx, Dx> + D3<ARGUMENT, ARGUMENT, ARGUMENT, Dx, Dx, Dx>,
        F::Output: Zero,
    {
        self.d3(&Dx::unit(), &Dx::unit(), &Dx::unit())
    }

    /// First directional derivative with respect to the variable in slot `X`.
    pub fn d1_wrt<const X: usize, Dx>(&self, dx: &Dx) -> F::Output
    where
        F: D1<X, Dx>,
        F::Output: Zero,
    {
        const {
            assert!(
                has_variable_id::<F, X>(),
                "You are trying to compute the first derivative with respect to a variable that is not present."
            )
        };
        derivative::d1::<X, _, _>(&self.f, dx).unwrap_or_else(Zero::zero)
    }

    /// Second directional derivative with respect to the variables in slots `X` and `Y`.
    pub fn d2_wrt<const X: usize, const Y: usize, Dx, Dy>(&self, dx: &Dx, dy: &Dy) -> F::Output
    where
        F: D1<X, Dx> + D1<Y, Dy> + D2<X, Y, Dx, Dy>,
        F::Output: Zero,
    {
        const {
            assert!(
                has_variable_id::<F, X>() && has_variable_id::<F, Y>(),
                "You are trying to compute the second derivative with respect to at least one variable that is not present."
            )
        };
        const {
            assert!(
                has_consistent_second_derivative::<F, X, Y, Dx, Dy>(),
                "Inconsistent functional definition encountered."
            )
        };
        derivative::d2::<X, Y, _, _, _>(&self.f, dx, dy).unwrap_or_else(Zero::zero)
    }

    /// Third directional derivative with respect to the variables in slots `X`, `Y` and `Z`.
    pub fn d3_wrt<const X: usize, const Y: usize, const Z: usize, Dx, Dy, Dz>(
        &self,
        dx: &Dx,
        dy: &Dy,
        dz: &Dz,
    ) -> F::Output
    where
        F: D1<X, Dx> + D1<Y, Dy> + D1<Z, Dz> + D2<X, Y, Dx, Dy> + D3<X, Y, Z, Dx, Dy, Dz>,
        F::Output: Zero,
    {
        const {
            assert!(
                has_variable_id::<F, X>() && has_variable_id::<F, Y>() && has_variable_id::<F, Z>(),
                "You are trying to compute the third derivative with respect to at least one variable that is not present."
            )
        };
        const {
            assert!(
                has_consistent_third_derivative::<F, X, Y, Z, Dx, Dy, Dz>(),
                "Inconsistent functional definition encountered."
            )
        };
        derivative::d3::<X, Y, Z, _, _, _, _>(&self.f, dx, dy, dz).unwrap_or_else(Zero::zero)
    }

    /// Presence descriptor of the finalized tree for slot `X` and arguments of type `Dx`.
    pub fn capabilities<const X: usize, Dx>(&self) -> Capabilities
    where
        F: Update<Dx> + D1<X, Dx> + D2<X, X, Dx, Dx> + D3<X, X, X, Dx, Dx, Dx>,
    {
        Capabilities::of::<F, X, Dx>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use crate::test_util::assert_close;

    /// `x^2` with all derivatives.
    #[derive(Clone)]
    struct FullSquare {
        x: f64,
    }

    /// `x^2` without second and third derivative.
    #[derive(Clone)]
    struct TruncatedSquare {
        x: f64,
    }

    impl Function for FullSquare {
        type Output = f64;
        fn d0(&self) -> f64 {
            self.x * self.x
        }
    }

    impl Function for TruncatedSquare {
        type Output = f64;
        fn d0(&self) -> f64 {
            self.x * self.x
        }
    }

    impl Update<f64> for FullSquare {
        const PRESENT: bool = true;
        fn update(&mut self, x: &f64) -> Result<(), DomainError> {
            self.x = *x;
            Ok(())
        }
    }

    impl Update<f64> for TruncatedSquare {
        const PRESENT: bool = true;
        fn update(&mut self, x: &f64) -> Result<(), DomainError> {
            self.x = *x;
            Ok(())
        }
    }

    impl<const X: usize> D1<X, f64> for FullSquare {
        const PRESENT: bool = X == ARGUMENT;
        fn d1(&self, dx: &f64) -> Option<f64> {
            Some(2.0 * self.x * dx)
        }
    }

    impl<const X: usize> D1<X, f64> for TruncatedSquare {
        const PRESENT: bool = X == ARGUMENT;
        fn d1(&self, dx: &f64) -> Option<f64> {
            Some(2.0 * self.x * dx)
        }
    }

    impl<const X: usize, const Y: usize> D2<X, Y, f64, f64> for FullSquare {
        const PRESENT: bool = X == ARGUMENT && Y == ARGUMENT;
        fn d2(&self, dx: &f64, dy: &f64) -> Option<f64> {
            Some(2.0 * dx * dy)
        }
    }

    impl<const X: usize, const Y: usize, const Z: usize> D3<X, Y, Z, f64, f64, f64> for FullSquare {
        const PRESENT: bool = X == ARGUMENT && Y == ARGUMENT && Z == ARGUMENT;
        fn d3(&self, _: &f64, _: &f64, _: &f64) -> Option<f64> {
            Some(0.0)
        }
    }

    crate::absent!([] FullSquare: update_variable);
    crate::absent!([] TruncatedSquare: update_variable, d2, d3);

    #[test]
    fn test_truncated_leaf_finalizes_to_zero() {
        let x = 1.5;
        let full = Finalize::new(Sum::new(FullSquare { x }, Sin::new(x).unwrap()));
        let truncated = Finalize::new(Sum::new(TruncatedSquare { x }, Sin::new(x).unwrap()));

        assert_eq!(full.d0(), truncated.d0());
        assert_eq!(full.d1(&0.5), truncated.d1(&0.5));

        let sin = Finalize::new(Sin::new(x).unwrap());
        assert_eq!(truncated.d2(&0.5, &2.0), sin.d2(&0.5, &2.0));
        assert_eq!(truncated.d3(&0.5, &2.0, &1.0), sin.d3(&0.5, &2.0, &1.0));
        assert_eq!(full.d2(&0.5, &2.0), 2.0 + sin.d2(&0.5, &2.0));

        let alone = Finalize::new(TruncatedSquare { x });
        assert_eq!(alone.d2(&1.0, &1.0), 0.0);
        assert_eq!(alone.d3(&1.0, &1.0, &1.0), 0.0);
    }

    #[test]
    fn test_cubic_and_square_root() {
        let a = Pow::<3>::new(2.0).unwrap();
        let cubic = Finalize::new(a);
        assert_eq!(cubic.d0(), 8.0);
        assert_eq!(cubic.d1(&1.0), 12.0);
        assert_eq!(cubic.d2(&1.0, &1.0), 12.0);
        assert_eq!(cubic.d3(&1.0, &1.0, &1.0), 6.0);

        let mut f = Finalize::new(a + Sqrt::new(1.0).unwrap());
        f.update(&2.0).unwrap();
        assert_close(f.d0(), 8.0 + 2.0_f64.sqrt(), 1e-15);
        assert_close(f.d1(&1.0), 12.0 + 0.5 / 2.0_f64.sqrt(), 1e-15);
    }

    #[test]
    fn test_idempotent_update() {
        let mut f = Finalize::new(
            Sin::new(0.0).unwrap() * Exp::new(0.0).unwrap() + Pow::<-2>::new(1.0).unwrap(),
        );
        f.update(&0.8).unwrap();
        let first = (f.d0(), f.d1(&1.0), f.d2(&1.0, &0.5), f.d3(&1.0, &0.5, &2.0));
        f.update(&0.8).unwrap();
        let second = (f.d0(), f.d1(&1.0), f.d2(&1.0, &0.5), f.d3(&1.0, &0.5, &2.0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_unit_directions() {
        let f = Finalize::new(Exp::new(1.0).unwrap());
        assert_eq!(f.d1_unit::<f64>(), f.d1(&1.0));
        assert_eq!(f.d2_unit::<f64>(), f.d2(&1.0, &1.0));
        assert_eq!(f.d3_unit::<f64>(), f.d3(&1.0, &1.0, &1.0));
    }

    #[test]
    fn test_capabilities() {
        let f = Finalize::new(Identity::new(1.0) + Constant::new(2.0));
        let caps = f.capabilities::<ARGUMENT, f64>();
        assert!(caps.update);
        assert!(caps.d1);
        assert!(!caps.d2);
        assert_eq!(caps.variables, 0);
    }

    #[test_log::test]
    fn test_update_error_is_returned() {
        let mut f = Finalize::new(Ln::new(1.0).unwrap() + Identity::new(1.0));
        assert!(f.update(&0.0).is_err());
        assert!(f.eval(&3.0).is_ok());
    }

    #[test_log::test]
    fn test_successful_update_after_rejected_update() {
        let mut f = Finalize::new(Exp::new(0.0).unwrap() + Ln::new(1.0).unwrap());
        assert!(f.update(&-1.0).is_err());
        // exp moved to -1, ln stayed at 1, the cached sum still belongs to 0
        assert_eq!(f.d0(), 1.0);
        assert_close(f.d1(&1.0), (-1.0_f64).exp() + 1.0, 1e-15);

        let x = 2.0_f64;
        f.update(&x).unwrap();
        assert_close(f.d0(), x.exp() + x.ln(), 1e-14);
        assert_close(f.d1(&1.0), x.exp() + 1.0 / x, 1e-14);
        assert_close(f.d2(&1.0, &1.0), x.exp() - 1.0 / (x * x), 1e-14);
    }
}
