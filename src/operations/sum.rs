use std::ops::Add;

use crate::compute;
use crate::derivative;
use crate::errors::DomainError;
use crate::function::{
    update_if_present, update_variable_if_present, Function, Update, UpdateVariable, D1, D2, D3,
};

/// Sum `f + g` of two functions with the same output type.
///
/// Derivatives are the sums of the present derivatives of the summands. A derivative is present
/// if it is present in at least one summand.
#[derive(Clone)]
pub struct Sum<F: Function, G> {
    f: F,
    g: G,
    value: F::Output,
}

impl<F, G> Sum<F, G>
where
    F: Function,
    G: Function<Output = F::Output>,
    F::Output: Add<Output = F::Output>,
{
    pub fn new(f: F, g: G) -> Self {
        let value = f.d0() + g.d0();
        Sum { f, g, value }
    }
}

impl<F, G> Function for Sum<F, G>
where
    F: Function,
    G: Function<Output = F::Output>,
    F::Output: Add<Output = F::Output>,
{
    type Output = F::Output;

    const VARIABLES: u64 = F::VARIABLES | G::VARIABLES;

    fn d0(&self) -> F::Output {
        self.value.clone()
    }
}

impl<F, G, Arg> Update<Arg> for Sum<F, G>
where
    F: Update<Arg>,
    G: Update<Arg, Output = F::Output>,
    F::Output: Add<Output = F::Output>,
{
    const PRESENT: bool = <F as Update<Arg>>::PRESENT || <G as Update<Arg>>::PRESENT;

    fn update(&mut self, x: &Arg) -> Result<(), DomainError> {
        update_if_present(&mut self.f, x)?;
        update_if_present(&mut self.g, x)?;
        self.value = self.f.d0() + self.g.d0();
        Ok(())
    }
}

impl<const ID: usize, F, G, Arg> UpdateVariable<ID, Arg> for Sum<F, G>
where
    F: UpdateVariable<ID, Arg>,
    G: UpdateVariable<ID, Arg, Output = F::Output>,
    F::Output: Add<Output = F::Output>,
{
    const PRESENT: bool =
        <F as UpdateVariable<ID, Arg>>::PRESENT || <G as UpdateVariable<ID, Arg>>::PRESENT;

    fn update_variable(&mut self, x: &Arg) -> Result<(), DomainError> {
        if !<Self as UpdateVariable<ID, Arg>>::PRESENT {
            return Ok(());
        }
        update_variable_if_present::<ID, _, _>(&mut self.f, x)?;
        update_variable_if_present::<ID, _, _>(&mut self.g, x)?;
        self.value = self.f.d0() + self.g.d0();
        Ok(())
    }
}

impl<const X: usize, F, G, Dx> D1<X, Dx> for Sum<F, G>
where
    F: D1<X, Dx>,
    G: D1<X, Dx, Output = F::Output>,
    F::Output: Add<Output = F::Output>,
{
    const PRESENT: bool = <F as D1<X, Dx>>::PRESENT || <G as D1<X, Dx>>::PRESENT;

    fn d1(&self, dx: &Dx) -> Option<F::Output> {
        compute::sum(
            derivative::d1::<X, _, _>(&self.f, dx),
            derivative::d1::<X, _, _>(&self.g, dx),
        )
    }
}

impl<const X: usize, const Y: usize, F, G, Dx, Dy> D2<X, Y, Dx, Dy> for Sum<F, G>
where
    F: D2<X, Y, Dx, Dy>,
    G: D2<X, Y, Dx, Dy, Output = F::Output>,
    F::Output: Add<Output = F::Output>,
{
    const PRESENT: bool = <F as D2<X, Y, Dx, Dy>>::PRESENT || <G as D2<X, Y, Dx, Dy>>::PRESENT;

    fn d2(&self, dx: &Dx, dy: &Dy) -> Option<F::Output> {
        compute::sum(
            derivative::d2::<X, Y, _, _, _>(&self.f, dx, dy),
            derivative::d2::<X, Y, _, _, _>(&self.g, dx, dy),
        )
    }
}

impl<const X: usize, const Y: usize, const Z: usize, F, G, Dx, Dy, Dz> D3<X, Y, Z, Dx, Dy, Dz>
    for Sum<F, G>
where
    F: D3<X, Y, Z, Dx, Dy, Dz>,
    G: D3<X, Y, Z, Dx, Dy, Dz, Output = F::Output>,
    F::Output: Add<Output = F::Output>,
{
    const PRESENT: bool =
        <F as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT || <G as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT;

    fn d3(&self, dx: &Dx, dy: &Dy, dz: &Dz) -> Option<F::Output> {
        compute::sum(
            derivative::d3::<X, Y, Z, _, _, _, _>(&self.f, dx, dy, dz),
            derivative::d3::<X, Y, Z, _, _, _, _>(&self.g, dx, dy, dz),
        )
    }
}
