//! The node protocol every expression-tree node implements.
//!
//! A node is a value object that caches its function value (and whatever intermediates it needs)
//! at the current point of evaluation. The only mandatory member is `d0`. Everything else is an
//! optional capability expressed as a separate trait:
//!
//! - [`Update<Arg>`]: re-evaluate at a new argument
//! - [`UpdateVariable<ID, Arg>`]: re-evaluate after variable slot `ID` changed
//! - [`D1<X, Dx>`], [`D2<X, Y, Dx, Dy>`], [`D3<X, Y, Z, Dx, Dy, Dz>`]: directional derivatives
//!
//! Every optional trait has an associated `PRESENT` constant, `false` unless the implementor
//! overrides it, and a default method that reports absence (`Ok(())` for updates, `None` for
//! derivatives). A node that does not have a capability still implements the trait, usually
//! through [`absent!`](crate::absent), so combinators can be generic over all of them and decide
//! at compile time which terms of a rule contribute.
//!
//! The slot parameters `X`, `Y`, `Z` and `ID` name variable slots. The special slot
//! [`ARGUMENT`] addresses the argument handed to `update`, which is how elementary functions
//! (sine, power, trace, ...) expose their ordinary derivatives.

use crate::errors::DomainError;

/// Slot id of the argument passed to [`Update::update`].
///
/// Derivatives of leaves are taken with respect to this slot. Variable slots use the ids
/// `0..64`.
pub const ARGUMENT: usize = usize::MAX;

/// Value accessor and static description of a node.
pub trait Function: Clone {
    /// Type of the function value and of all derivatives.
    type Output: Clone;

    /// Bitset of the variable slots occurring in this node (bit `i` for slot `i`).
    const VARIABLES: u64 = 0;

    /// Function value at the current point of evaluation.
    fn d0(&self) -> Self::Output;
}

/// Re-evaluation at a new argument.
pub trait Update<Arg>: Function {
    /// Whether this node reacts to `update` with arguments of type `Arg`.
    const PRESENT: bool = false;

    /// Moves the point of evaluation to `x` and refreshes all cached quantities.
    ///
    /// # Errors
    /// Returns a [`DomainError`] if `x` lies outside the domain of the function.
    fn update(&mut self, _x: &Arg) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Re-evaluation after the variable in slot `ID` was set to a new value.
pub trait UpdateVariable<const ID: usize, Arg>: Function {
    /// Whether this node depends on slot `ID`.
    const PRESENT: bool = false;

    /// Sets the variable in slot `ID` to `x` and refreshes all cached quantities depending on it.
    ///
    /// # Errors
    /// Returns a [`DomainError`] if a function depending on the slot leaves its domain.
    fn update_variable(&mut self, _x: &Arg) -> Result<(), DomainError> {
        Ok(())
    }
}

/// First directional derivative with respect to slot `X` in direction `Dx`.
pub trait D1<const X: usize, Dx>: Function {
    const PRESENT: bool = false;

    /// Returns `None` iff the derivative is absent, i.e. identically zero.
    fn d1(&self, _dx: &Dx) -> Option<Self::Output> {
        None
    }
}

/// Second directional derivative with respect to slots `X`, `Y`.
pub trait D2<const X: usize, const Y: usize, Dx, Dy>: Function {
    const PRESENT: bool = false;

    fn d2(&self, _dx: &Dx, _dy: &Dy) -> Option<Self::Output> {
        None
    }
}

/// Third directional derivative with respect to slots `X`, `Y`, `Z`.
pub trait D3<const X: usize, const Y: usize, const Z: usize, Dx, Dy, Dz>: Function {
    const PRESENT: bool = false;

    fn d3(&self, _dx: &Dx, _dy: &Dy, _dz: &Dz) -> Option<Self::Output> {
        None
    }
}

/// Calls `f.update(x)` if `F` reacts to updates with `Arg`, does nothing otherwise.
#[inline(always)]
pub fn update_if_present<F: Update<Arg>, Arg>(f: &mut F, x: &Arg) -> Result<(), DomainError> {
    if <F as Update<Arg>>::PRESENT {
        f.update(x)
    } else {
        Ok(())
    }
}

/// Calls `f.update_variable(x)` if `F` depends on slot `ID`, does nothing otherwise.
///
/// Sub-trees that do not contain the slot are never visited, so their caches stay untouched.
#[inline(always)]
pub fn update_variable_if_present<const ID: usize, F: UpdateVariable<ID, Arg>, Arg>(
    f: &mut F,
    x: &Arg,
) -> Result<(), DomainError> {
    if <F as UpdateVariable<ID, Arg>>::PRESENT {
        f.update_variable(x)
    } else {
        Ok(())
    }
}

/// Declares the capabilities a node does not have.
///
/// Generates empty implementations of the optional protocol traits, which inherit `PRESENT =
/// false` and the absent defaults. Generic parameters of the node go into the leading brackets.
///
/// ```rust
/// use fung::absent;
/// use fung::function::Function;
///
/// #[derive(Clone)]
/// struct Answer;
///
/// impl Function for Answer {
///     type Output = f64;
///     fn d0(&self) -> f64 {
///         42.0
///     }
/// }
///
/// absent!([] Answer: update, update_variable, d1, d2, d3);
/// ```
#[macro_export]
macro_rules! absent {
    ($gens:tt $ty:ty : $($capability:ident),+ $(,)?) => {
        $( $crate::absent!(@impl $gens $ty, $capability); )+
    };
    (@impl [$($gen:tt)*] $ty:ty, update) => {
        impl<__Arg, $($gen)*> $crate::function::Update<__Arg> for $ty {}
    };
    (@impl [$($gen:tt)*] $ty:ty, update_variable) => {
        impl<const __ID: usize, __Arg, $($gen)*> $crate::function::UpdateVariable<__ID, __Arg> for $ty {}
    };
    (@impl [$($gen:tt)*] $ty:ty, d1) => {
        impl<const __X: usize, __Dx, $($gen)*> $crate::function::D1<__X, __Dx> for $ty {}
    };
    (@impl [$($gen:tt)*] $ty:ty, d2) => {
        impl<const __X: usize, const __Y: usize, __Dx, __Dy, $($gen)*>
            $crate::function::D2<__X, __Y, __Dx, __Dy> for $ty {}
    };
    (@impl [$($gen:tt)*] $ty:ty, d3) => {
        impl<const __X: usize, const __Y: usize, const __Z: usize, __Dx, __Dy, __Dz, $($gen)*>
            $crate::function::D3<__X, __Y, __Z, __Dx, __Dy, __Dz> for $ty {}
    };
}
