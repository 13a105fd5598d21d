use log::trace;

use crate::derivative::{d1, d2, d3};
use crate::errors::DomainError;
use crate::function::{
    update_if_present, update_variable_if_present, Function, Update, UpdateVariable, D1, D2, D3,
};

/// Pointwise minimum (`MAX = false`) or maximum (`MAX = true`) of two functions.
///
/// Value and derivatives are those of the active operand. When both operands have the same
/// value the first one is active; the function is in general not differentiable there, which
/// [`Extremum::at_kink`] reports.
#[derive(Clone)]
pub struct Extremum<F: Function, G, const MAX: bool> {
    f: F,
    g: G,
    value: F::Output,
    first_active: bool,
}

/// `min(f, g)`.
pub type Min<F, G> = Extremum<F, G, false>;
/// `max(f, g)`.
pub type Max<F, G> = Extremum<F, G, true>;

impl<F, G, const MAX: bool> Extremum<F, G, MAX>
where
    F: Function,
    G: Function<Output = F::Output>,
    F::Output: PartialOrd,
{
    pub fn new(f: F, g: G) -> Self {
        let (value, first_active) = Self::select(&f, &g);
        Extremum {
            f,
            g,
            value,
            first_active,
        }
    }

    /// Whether the first operand determines value and derivatives.
    pub fn first_active(&self) -> bool {
        self.first_active
    }

    /// Whether both operands have the same value, i.e. the point may be a kink.
    pub fn at_kink(&self) -> bool {
        self.f.d0() == self.g.d0()
    }

    fn select(f: &F, g: &G) -> (F::Output, bool) {
        let (x, y) = (f.d0(), g.d0());
        let first_active = if MAX { x >= y } else { x <= y };
        if x == y {
            trace!("min/max evaluated where both operands coincide");
        }
        if first_active {
            (x, true)
        } else {
            (y, false)
        }
    }

    fn refresh(&mut self) {
        (self.value, self.first_active) = Self::select(&self.f, &self.g);
    }
}

/// Creates `min(f, g)`.
pub fn min<F, G>(f: F, g: G) -> Min<F, G>
where
    F: Function,
    G: Function<Output = F::Output>,
    F::Output: PartialOrd,
{
    Extremum::new(f, g)
}

/// Creates `max(f, g)`.
pub fn max<F, G>(f: F, g: G) -> Max<F, G>
where
    F: Function,
    G: Function<Output = F::Output>,
    F::Output: PartialOrd,
{
    Extremum::new(f, g)
}

impl<F, G, const MAX: bool> Function for Extremum<F, G, MAX>
where
    F: Function,
    G: Function<Output = F::Output>,
    F::Output: PartialOrd,
{
    type Output = F::Output;

    const VARIABLES: u64 = F::VARIABLES | G::VARIABLES;

    fn d0(&self) -> F::Output {
        self.value.clone()
    }
}

impl<F, G, Arg, const MAX: bool> Update<Arg> for Extremum<F, G, MAX>
where
    F: Update<Arg>,
    G: Update<Arg, Output = F::Output>,
    F::Output: PartialOrd,
{
    const PRESENT: bool = <F as Update<Arg>>::PRESENT || <G as Update<Arg>>::PRESENT;

    fn update(&mut self, x: &Arg) -> Result<(), DomainError> {
        update_if_present(&mut self.f, x)?;
        update_if_present(&mut self.g, x)?;
        self.refresh();
        Ok(())
    }
}

impl<const ID: usize, F, G, Arg, const MAX: bool> UpdateVariable<ID, Arg> for Extremum<F, G, MAX>
where
    F: UpdateVariable<ID, Arg>,
    G: UpdateVariable<ID, Arg, Output = F::Output>,
    F::Output: PartialOrd,
{
    const PRESENT: bool =
        <F as UpdateVariable<ID, Arg>>::PRESENT || <G as UpdateVariable<ID, Arg>>::PRESENT;

    fn update_variable(&mut self, x: &Arg) -> Result<(), DomainError> {
        if !<Self as UpdateVariable<ID, Arg>>::PRESENT {
            return Ok(());
        }
        update_variable_if_present::<ID, _, _>(&mut self.f, x)?;
        update_variable_if_present::<ID, _, _>(&mut self.g, x)?;
        self.refresh();
        Ok(())
    }
}

impl<const X: usize, F, G, Dx, const MAX: bool> D1<X, Dx> for Extremum<F, G, MAX>
where
    F: D1<X, Dx>,
    G: D1<X, Dx, Output = F::Output>,
    F::Output: PartialOrd,
{
    const PRESENT: bool = <F as D1<X, Dx>>::PRESENT || <G as D1<X, Dx>>::PRESENT;

    fn d1(&self, dx: &Dx) -> Option<F::Output> {
        if self.first_active {
            d1::<X, _, _>(&self.f, dx)
        } else {
            d1::<X, _, _>(&self.g, dx)
        }
    }
}

impl<const X: usize, const Y: usize, F, G, Dx, Dy, const MAX: bool> D2<X, Y, Dx, Dy>
    for Extremum<F, G, MAX>
where
    F: D2<X, Y, Dx, Dy>,
    G: D2<X, Y, Dx, Dy, Output = F::Output>,
    F::Output: PartialOrd,
{
    const PRESENT: bool = <F as D2<X, Y, Dx, Dy>>::PRESENT || <G as D2<X, Y, Dx, Dy>>::PRESENT;

    fn d2(&self, dx: &Dx, dy: &Dy) -> Option<F::Output> {
        if self.first_active {
            d2::<X, Y, _, _, _>(&self.f, dx, dy)
        } else {
            d2::<X, Y, _, _, _>(&self.g, dx, dy)
        }
    }
}

impl<const X: usize, const Y: usize, const Z: usize, F, G, Dx, Dy, Dz, const MAX: bool>
    D3<X, Y, Z, Dx, Dy, Dz> for Extremum<F, G, MAX>
where
    F: D3<X, Y, Z, Dx, Dy, Dz>,
    G: D3<X, Y, Z, Dx, Dy, Dz, Output = F::Output>,
    F::Output: PartialOrd,
{
    const PRESENT: bool =
        <F as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT || <G as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT;

    fn d3(&self, dx: &Dx, dy: &Dy, dz: &Dz) -> Option<F::Output> {
        if self.first_active {
            d3::<X, Y, Z, _, _, _, _>(&self.f, dx, dy, dz)
        } else {
            d3::<X, Y, Z, _, _, _, _>(&self.g, dx, dy, dz)
        }
    }
}
