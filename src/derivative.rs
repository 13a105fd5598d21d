//! Capability queries.
//!
//! Compile-time queries answering which members of the node protocol a type implements, and the
//! gated call wrappers used by every combinator. All queries are `const fn` and can be used in
//! `const` items and inline `const` assertions.
//!
//! # Example
//!
//! ```rust
//! use fung::prelude::*;
//! use fung::derivative::{has_d1, has_d3};
//!
//! assert!(has_d1::<Sin, ARGUMENT, f64>());
//! assert!(has_d3::<Sin, ARGUMENT, ARGUMENT, ARGUMENT, f64, f64, f64>());
//! assert!(!has_d1::<Constant<f64>, ARGUMENT, f64>());
//! ```

use std::fmt;

use colored::Colorize;

use crate::function::{Function, Update, UpdateVariable, D1, D2, D3};

/// Whether `F` reacts to `update` with arguments of type `Arg`.
pub const fn has_update<F: Update<Arg>, Arg>() -> bool {
    <F as Update<Arg>>::PRESENT
}

/// Whether `F` reacts to updates of variable slot `ID` with arguments of type `Arg`.
pub const fn has_update_variable<F: UpdateVariable<ID, Arg>, const ID: usize, Arg>() -> bool {
    <F as UpdateVariable<ID, Arg>>::PRESENT
}

/// Whether `F` has a first derivative with respect to slot `X` in directions of type `Dx`.
pub const fn has_d1<F: D1<X, Dx>, const X: usize, Dx>() -> bool {
    <F as D1<X, Dx>>::PRESENT
}

/// Whether `F` has a second derivative with respect to slots `X`, `Y`.
pub const fn has_d2<F: D2<X, Y, Dx, Dy>, const X: usize, const Y: usize, Dx, Dy>() -> bool {
    <F as D2<X, Y, Dx, Dy>>::PRESENT
}

/// Whether `F` has a third derivative with respect to slots `X`, `Y`, `Z`.
pub const fn has_d3<F, const X: usize, const Y: usize, const Z: usize, Dx, Dy, Dz>() -> bool
where
    F: D3<X, Y, Z, Dx, Dy, Dz>,
{
    <F as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT
}

/// A first derivative only needs the function value, which every node has.
pub const fn has_consistent_first_derivative<F: Function>() -> bool {
    true
}

/// A second derivative with respect to `X`, `Y` requires both first derivatives.
pub const fn has_consistent_second_derivative<F, const X: usize, const Y: usize, Dx, Dy>() -> bool
where
    F: D1<X, Dx> + D1<Y, Dy> + D2<X, Y, Dx, Dy>,
{
    !<F as D2<X, Y, Dx, Dy>>::PRESENT
        || (<F as D1<X, Dx>>::PRESENT && <F as D1<Y, Dy>>::PRESENT)
}

/// A third derivative with respect to `X`, `Y`, `Z` requires the second derivative with respect
/// to `X`, `Y`, which in turn has to be consistent.
pub const fn has_consistent_third_derivative<
    F,
    const X: usize,
    const Y: usize,
    const Z: usize,
    Dx,
    Dy,
    Dz,
>() -> bool
where
    F: D1<X, Dx> + D1<Y, Dy> + D2<X, Y, Dx, Dy> + D3<X, Y, Z, Dx, Dy, Dz>,
{
    has_consistent_second_derivative::<F, X, Y, Dx, Dy>()
        && (!<F as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT || <F as D2<X, Y, Dx, Dy>>::PRESENT)
}

/// `f.d1(dx)` if present, `None` without calling into `f` otherwise.
#[inline(always)]
pub fn d1<const X: usize, F: D1<X, Dx>, Dx>(f: &F, dx: &Dx) -> Option<F::Output> {
    if <F as D1<X, Dx>>::PRESENT {
        <F as D1<X, Dx>>::d1(f, dx)
    } else {
        None
    }
}

/// `f.d2(dx, dy)` if present, `None` without calling into `f` otherwise.
#[inline(always)]
pub fn d2<const X: usize, const Y: usize, F: D2<X, Y, Dx, Dy>, Dx, Dy>(
    f: &F,
    dx: &Dx,
    dy: &Dy,
) -> Option<F::Output> {
    if <F as D2<X, Y, Dx, Dy>>::PRESENT {
        <F as D2<X, Y, Dx, Dy>>::d2(f, dx, dy)
    } else {
        None
    }
}

/// `f.d3(dx, dy, dz)` if present, `None` without calling into `f` otherwise.
#[inline(always)]
pub fn d3<const X: usize, const Y: usize, const Z: usize, F, Dx, Dy, Dz>(
    f: &F,
    dx: &Dx,
    dy: &Dy,
    dz: &Dz,
) -> Option<F::Output>
where
    F: D3<X, Y, Z, Dx, Dy, Dz>,
{
    if <F as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT {
        <F as D3<X, Y, Z, Dx, Dy, Dz>>::d3(f, dx, dy, dz)
    } else {
        None
    }
}

/// Derivative-presence descriptor of a node for one slot and one direction type.
///
/// Collects the capability queries so that a tree can be inspected, e.g. while debugging why a
/// derivative finalizes to zero.
///
/// # Example
///
/// ```rust
/// use fung::prelude::*;
/// use fung::derivative::Capabilities;
///
/// let caps = Capabilities::of::<Pow<3>, ARGUMENT, f64>();
/// assert!(caps.update && caps.d1 && caps.d2 && caps.d3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub slot: usize,
    pub update: bool,
    pub d1: bool,
    pub d2: bool,
    pub d3: bool,
    pub variables: u64,
}

impl Capabilities {
    /// Queries `F` for slot `X` with directions (and update arguments) of type `Dx`.
    pub const fn of<F, const X: usize, Dx>() -> Self
    where
        F: Update<Dx> + D1<X, Dx> + D2<X, X, Dx, Dx> + D3<X, X, X, Dx, Dx, Dx>,
    {
        Capabilities {
            slot: X,
            update: has_update::<F, Dx>(),
            d1: has_d1::<F, X, Dx>(),
            d2: has_d2::<F, X, X, Dx, Dx>(),
            d3: has_d3::<F, X, X, X, Dx, Dx, Dx>(),
            variables: F::VARIABLES,
        }
    }

    /// Highest derivative order that is present, `0` if there is none.
    pub const fn order(&self) -> usize {
        if self.d3 {
            3
        } else if self.d2 {
            2
        } else if self.d1 {
            1
        } else {
            0
        }
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |present: bool| if present { "present".green() } else { "absent".red() };
        writeln!(f, "{{")?;
        if self.slot == crate::function::ARGUMENT {
            writeln!(f, "    {}: argument", "Slot".cyan())?;
        } else {
            writeln!(f, "    {}: {}", "Slot".cyan(), self.slot)?;
        }
        writeln!(f, "    {}: {:#b}", "Variables".cyan(), self.variables)?;
        writeln!(f, "    {}: {}", "Update".cyan(), mark(self.update))?;
        writeln!(f, "    {}: {}", "d1".cyan(), mark(self.d1))?;
        writeln!(f, "    {}: {}", "d2".cyan(), mark(self.d2))?;
        writeln!(f, "    {}: {}", "d3".cyan(), mark(self.d3))?;
        write!(f, "}}")
    }
}
