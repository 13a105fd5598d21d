use std::ops::{Add, Mul};

use crate::compute::{product, sum_all};
use crate::derivative::{d1, d2, d3};
use crate::errors::DomainError;
use crate::function::{
    update_if_present, update_variable_if_present, Function, Update, UpdateVariable, D1, D2, D3,
};

/// Square `f * f` of a function.
///
/// The derivative identities `2 f f'`, ... assume that the product of the output type is
/// commutative, which holds for scalars. Use [`Product`](super::Product) for matrix-valued
/// functions.
#[derive(Clone)]
pub struct Squared<F: Function> {
    f: F,
    value: F::Output,
}

impl<F> Squared<F>
where
    F: Function,
    F::Output: Mul<Output = F::Output>,
{
    pub fn new(f: F) -> Self {
        let value = f.d0() * f.d0();
        Squared { f, value }
    }
}

/// Creates `f * f`.
pub fn squared<F>(f: F) -> Squared<F>
where
    F: Function,
    F::Output: Mul<Output = F::Output>,
{
    Squared::new(f)
}

impl<F> Function for Squared<F>
where
    F: Function,
    F::Output: Mul<Output = F::Output> + Add<Output = F::Output> + Mul<f64, Output = F::Output>,
{
    type Output = F::Output;

    const VARIABLES: u64 = F::VARIABLES;

    fn d0(&self) -> F::Output {
        self.value.clone()
    }
}

impl<F, Arg> Update<Arg> for Squared<F>
where
    F: Update<Arg>,
    F::Output: Mul<Output = F::Output> + Add<Output = F::Output> + Mul<f64, Output = F::Output>,
{
    const PRESENT: bool = <F as Update<Arg>>::PRESENT;

    fn update(&mut self, x: &Arg) -> Result<(), DomainError> {
        update_if_present(&mut self.f, x)?;
        self.value = self.f.d0() * self.f.d0();
        Ok(())
    }
}

impl<const ID: usize, F, Arg> UpdateVariable<ID, Arg> for Squared<F>
where
    F: UpdateVariable<ID, Arg>,
    F::Output: Mul<Output = F::Output> + Add<Output = F::Output> + Mul<f64, Output = F::Output>,
{
    const PRESENT: bool = <F as UpdateVariable<ID, Arg>>::PRESENT;

    fn update_variable(&mut self, x: &Arg) -> Result<(), DomainError> {
        if <F as UpdateVariable<ID, Arg>>::PRESENT {
            update_variable_if_present::<ID, _, _>(&mut self.f, x)?;
            self.value = self.f.d0() * self.f.d0();
        }
        Ok(())
    }
}

impl<const X: usize, F, Dx> D1<X, Dx> for Squared<F>
where
    F: D1<X, Dx>,
    F::Output: Mul<Output = F::Output> + Add<Output = F::Output> + Mul<f64, Output = F::Output>,
{
    const PRESENT: bool = <F as D1<X, Dx>>::PRESENT;

    fn d1(&self, dx: &Dx) -> Option<F::Output> {
        product(Some(self.f.d0()), d1::<X, _, _>(&self.f, dx)).map(|v| v * 2.0)
    }
}

impl<const X: usize, const Y: usize, F, Dx, Dy> D2<X, Y, Dx, Dy> for Squared<F>
where
    F: D1<X, Dx> + D1<Y, Dy> + D2<X, Y, Dx, Dy>,
    F::Output: Mul<Output = F::Output> + Add<Output = F::Output> + Mul<f64, Output = F::Output>,
{
    const PRESENT: bool = <F as D2<X, Y, Dx, Dy>>::PRESENT
        || (<F as D1<X, Dx>>::PRESENT && <F as D1<Y, Dy>>::PRESENT);

    fn d2(&self, dx: &Dx, dy: &Dy) -> Option<F::Output> {
        let f = &self.f;
        sum_all([
            product(Some(f.d0()), d2::<X, Y, _, _, _>(f, dx, dy)),
            product(d1::<X, _, _>(f, dx), d1::<Y, _, _>(f, dy)),
        ])
        .map(|v| v * 2.0)
    }
}

impl<const X: usize, const Y: usize, const Z: usize, F, Dx, Dy, Dz> D3<X, Y, Z, Dx, Dy, Dz>
    for Squared<F>
where
    F: D1<X, Dx>
        + D1<Y, Dy>
        + D1<Z, Dz>
        + D2<X, Y, Dx, Dy>
        + D2<X, Z, Dx, Dz>
        + D2<Y, Z, Dy, Dz>
        + D3<X, Y, Z, Dx, Dy, Dz>,
    F::Output: Mul<Output = F::Output> + Add<Output = F::Output> + Mul<f64, Output = F::Output>,
{
    const PRESENT: bool = <F as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT
        || (<F as D1<Z, Dz>>::PRESENT && <F as D2<X, Y, Dx, Dy>>::PRESENT)
        || (<F as D1<Y, Dy>>::PRESENT && <F as D2<X, Z, Dx, Dz>>::PRESENT)
        || (<F as D2<Y, Z, Dy, Dz>>::PRESENT && <F as D1<X, Dx>>::PRESENT);

    fn d3(&self, dx: &Dx, dy: &Dy, dz: &Dz) -> Option<F::Output> {
        let f = &self.f;
        sum_all([
            product(Some(f.d0()), d3::<X, Y, Z, _, _, _, _>(f, dx, dy, dz)),
            product(d1::<Z, _, _>(f, dz), d2::<X, Y, _, _, _>(f, dx, dy)),
            product(d1::<Y, _, _>(f, dy), d2::<X, Z, _, _, _>(f, dx, dz)),
            product(d2::<Y, Z, _, _, _>(f, dy, dz), d1::<X, _, _>(f, dx)),
        ])
        .map(|v| v * 2.0)
    }
}
