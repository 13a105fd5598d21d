use std::ops::Mul;

use crate::derivative;
use crate::errors::DomainError;
use crate::function::{
    update_if_present, update_variable_if_present, Function, Update, UpdateVariable, D1, D2, D3,
};

/// Multiplication `a * f` of a function with a constant.
#[derive(Clone)]
pub struct Scale<F: Function> {
    a: f64,
    f: F,
    value: F::Output,
}

impl<F> Scale<F>
where
    F: Function,
    F::Output: Mul<f64, Output = F::Output>,
{
    pub fn new(a: f64, f: F) -> Self {
        let value = f.d0() * a;
        Scale { a, f, value }
    }

    /// The constant factor.
    pub fn factor(&self) -> f64 {
        self.a
    }
}

impl<F> Function for Scale<F>
where
    F: Function,
    F::Output: Mul<f64, Output = F::Output>,
{
    type Output = F::Output;

    const VARIABLES: u64 = F::VARIABLES;

    fn d0(&self) -> F::Output {
        self.value.clone()
    }
}

impl<F, Arg> Update<Arg> for Scale<F>
where
    F: Update<Arg>,
    F::Output: Mul<f64, Output = F::Output>,
{
    const PRESENT: bool = <F as Update<Arg>>::PRESENT;

    fn update(&mut self, x: &Arg) -> Result<(), DomainError> {
        update_if_present(&mut self.f, x)?;
        self.value = self.f.d0() * self.a;
        Ok(())
    }
}

impl<const ID: usize, F, Arg> UpdateVariable<ID, Arg> for Scale<F>
where
    F: UpdateVariable<ID, Arg>,
    F::Output: Mul<f64, Output = F::Output>,
{
    const PRESENT: bool = <F as UpdateVariable<ID, Arg>>::PRESENT;

    fn update_variable(&mut self, x: &Arg) -> Result<(), DomainError> {
        if <F as UpdateVariable<ID, Arg>>::PRESENT {
            update_variable_if_present::<ID, _, _>(&mut self.f, x)?;
            self.value = self.f.d0() * self.a;
        }
        Ok(())
    }
}

impl<const X: usize, F, Dx> D1<X, Dx> for Scale<F>
where
    F: D1<X, Dx>,
    F::Output: Mul<f64, Output = F::Output>,
{
    const PRESENT: bool = <F as D1<X, Dx>>::PRESENT;

    fn d1(&self, dx: &Dx) -> Option<F::Output> {
        derivative::d1::<X, _, _>(&self.f, dx).map(|v| v * self.a)
    }
}

impl<const X: usize, const Y: usize, F, Dx, Dy> D2<X, Y, Dx, Dy> for Scale<F>
where
    F: D2<X, Y, Dx, Dy>,
    F::Output: Mul<f64, Output = F::Output>,
{
    const PRESENT: bool = <F as D2<X, Y, Dx, Dy>>::PRESENT;

    fn d2(&self, dx: &Dx, dy: &Dy) -> Option<F::Output> {
        derivative::d2::<X, Y, _, _, _>(&self.f, dx, dy).map(|v| v * self.a)
    }
}

impl<const X: usize, const Y: usize, const Z: usize, F, Dx, Dy, Dz> D3<X, Y, Z, Dx, Dy, Dz>
    for Scale<F>
where
    F: D3<X, Y, Z, Dx, Dy, Dz>,
    F::Output: Mul<f64, Output = F::Output>,
{
    const PRESENT: bool = <F as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT;

    fn d3(&self, dx: &Dx, dy: &Dy, dz: &Dz) -> Option<F::Output> {
        derivative::d3::<X, Y, Z, _, _, _, _>(&self.f, dx, dy, dz).map(|v| v * self.a)
    }
}
