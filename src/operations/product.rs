use std::ops::{Add, Mul};

use crate::compute::{product, sum_all};
use crate::derivative::{d1, d2, d3};
use crate::errors::DomainError;
use crate::function::{
    update_if_present, update_variable_if_present, Function, Update, UpdateVariable, D1, D2, D3,
};

/// Output type of `f * g`.
pub type ProductOutput<F, G> =
    <<F as Function>::Output as Mul<<G as Function>::Output>>::Output;

/// Product `f * g` of two functions.
///
/// Derivatives follow the Leibniz rule up to third order. The factors are multiplied in the
/// order `f * g`, so matrix-valued products keep their orientation.
pub struct Product<F: Function, G: Function>
where
    F::Output: Mul<G::Output>,
{
    f: F,
    g: G,
    value: ProductOutput<F, G>,
}

impl<F, G> Clone for Product<F, G>
where
    F: Function,
    G: Function,
    F::Output: Mul<G::Output>,
    ProductOutput<F, G>: Clone,
{
    fn clone(&self) -> Self {
        Product {
            f: self.f.clone(),
            g: self.g.clone(),
            value: self.value.clone(),
        }
    }
}

impl<F, G> Product<F, G>
where
    F: Function,
    G: Function,
    F::Output: Mul<G::Output>,
{
    pub fn new(f: F, g: G) -> Self {
        let value = f.d0() * g.d0();
        Product { f, g, value }
    }
}

impl<F, G> Function for Product<F, G>
where
    F: Function,
    G: Function,
    F::Output: Mul<G::Output>,
    ProductOutput<F, G>: Clone + Add<Output = ProductOutput<F, G>>,
{
    type Output = ProductOutput<F, G>;

    const VARIABLES: u64 = F::VARIABLES | G::VARIABLES;

    fn d0(&self) -> Self::Output {
        self.value.clone()
    }
}

impl<F, G, Arg> Update<Arg> for Product<F, G>
where
    F: Update<Arg>,
    G: Update<Arg>,
    F::Output: Mul<G::Output>,
    ProductOutput<F, G>: Clone + Add<Output = ProductOutput<F, G>>,
{
    const PRESENT: bool = <F as Update<Arg>>::PRESENT || <G as Update<Arg>>::PRESENT;

    fn update(&mut self, x: &Arg) -> Result<(), DomainError> {
        update_if_present(&mut self.f, x)?;
        update_if_present(&mut self.g, x)?;
        self.value = self.f.d0() * self.g.d0();
        Ok(())
    }
}

impl<const ID: usize, F, G, Arg> UpdateVariable<ID, Arg> for Product<F, G>
where
    F: UpdateVariable<ID, Arg>,
    G: UpdateVariable<ID, Arg>,
    F::Output: Mul<G::Output>,
    ProductOutput<F, G>: Clone + Add<Output = ProductOutput<F, G>>,
{
    const PRESENT: bool =
        <F as UpdateVariable<ID, Arg>>::PRESENT || <G as UpdateVariable<ID, Arg>>::PRESENT;

    fn update_variable(&mut self, x: &Arg) -> Result<(), DomainError> {
        if !<Self as UpdateVariable<ID, Arg>>::PRESENT {
            return Ok(());
        }
        update_variable_if_present::<ID, _, _>(&mut self.f, x)?;
        update_variable_if_present::<ID, _, _>(&mut self.g, x)?;
        self.value = self.f.d0() * self.g.d0();
        Ok(())
    }
}

impl<const X: usize, F, G, Dx> D1<X, Dx> for Product<F, G>
where
    F: D1<X, Dx>,
    G: D1<X, Dx>,
    F::Output: Mul<G::Output>,
    ProductOutput<F, G>: Clone + Add<Output = ProductOutput<F, G>>,
{
    const PRESENT: bool = <F as D1<X, Dx>>::PRESENT || <G as D1<X, Dx>>::PRESENT;

    fn d1(&self, dx: &Dx) -> Option<Self::Output> {
        let (f, g) = (&self.f, &self.g);
        sum_all([
            product(d1::<X, _, _>(f, dx), Some(g.d0())),
            product(Some(f.d0()), d1::<X, _, _>(g, dx)),
        ])
    }
}

impl<const X: usize, const Y: usize, F, G, Dx, Dy> D2<X, Y, Dx, Dy> for Product<F, G>
where
    F: D1<X, Dx> + D1<Y, Dy> + D2<X, Y, Dx, Dy>,
    G: D1<X, Dx> + D1<Y, Dy> + D2<X, Y, Dx, Dy>,
    F::Output: Mul<G::Output>,
    ProductOutput<F, G>: Clone + Add<Output = ProductOutput<F, G>>,
{
    const PRESENT: bool = <F as D2<X, Y, Dx, Dy>>::PRESENT
        || (<F as D1<X, Dx>>::PRESENT && <G as D1<Y, Dy>>::PRESENT)
        || (<F as D1<Y, Dy>>::PRESENT && <G as D1<X, Dx>>::PRESENT)
        || <G as D2<X, Y, Dx, Dy>>::PRESENT;

    fn d2(&self, dx: &Dx, dy: &Dy) -> Option<Self::Output> {
        let (f, g) = (&self.f, &self.g);
        sum_all([
            product(d2::<X, Y, _, _, _>(f, dx, dy), Some(g.d0())),
            product(d1::<X, _, _>(f, dx), d1::<Y, _, _>(g, dy)),
            product(d1::<Y, _, _>(f, dy), d1::<X, _, _>(g, dx)),
            product(Some(f.d0()), d2::<X, Y, _, _, _>(g, dx, dy)),
        ])
    }
}

impl<const X: usize, const Y: usize, const Z: usize, F, G, Dx, Dy, Dz> D3<X, Y, Z, Dx, Dy, Dz>
    for Product<F, G>
where
    F: D1<X, Dx>
        + D1<Y, Dy>
        + D1<Z, Dz>
        + D2<X, Y, Dx, Dy>
        + D2<X, Z, Dx, Dz>
        + D2<Y, Z, Dy, Dz>
        + D3<X, Y, Z, Dx, Dy, Dz>,
    G: D1<X, Dx>
        + D1<Y, Dy>
        + D1<Z, Dz>
        + D2<X, Y, Dx, Dy>
        + D2<X, Z, Dx, Dz>
        + D2<Y, Z, Dy, Dz>
        + D3<X, Y, Z, Dx, Dy, Dz>,
    F::Output: Mul<G::Output>,
    ProductOutput<F, G>: Clone + Add<Output = ProductOutput<F, G>>,
{
    const PRESENT: bool = <F as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT
        || (<F as D2<X, Y, Dx, Dy>>::PRESENT && <G as D1<Z, Dz>>::PRESENT)
        || (<F as D2<X, Z, Dx, Dz>>::PRESENT && <G as D1<Y, Dy>>::PRESENT)
        || (<F as D1<X, Dx>>::PRESENT && <G as D2<Y, Z, Dy, Dz>>::PRESENT)
        || (<F as D2<Y, Z, Dy, Dz>>::PRESENT && <G as D1<X, Dx>>::PRESENT)
        || (<F as D1<Y, Dy>>::PRESENT && <G as D2<X, Z, Dx, Dz>>::PRESENT)
        || (<F as D1<Z, Dz>>::PRESENT && <G as D2<X, Y, Dx, Dy>>::PRESENT)
        || <G as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT;

    fn d3(&self, dx: &Dx, dy: &Dy, dz: &Dz) -> Option<Self::Output> {
        let (f, g) = (&self.f, &self.g);
        sum_all([
            product(d3::<X, Y, Z, _, _, _, _>(f, dx, dy, dz), Some(g.d0())),
            product(d2::<X, Y, _, _, _>(f, dx, dy), d1::<Z, _, _>(g, dz)),
            product(d2::<X, Z, _, _, _>(f, dx, dz), d1::<Y, _, _>(g, dy)),
            product(d1::<X, _, _>(f, dx), d2::<Y, Z, _, _, _>(g, dy, dz)),
            product(d2::<Y, Z, _, _, _>(f, dy, dz), d1::<X, _, _>(g, dx)),
            product(d1::<Y, _, _>(f, dy), d2::<X, Z, _, _, _>(g, dx, dz)),
            product(d1::<Z, _, _>(f, dz), d2::<X, Y, _, _, _>(g, dx, dy)),
            product(Some(f.d0()), d3::<X, Y, Z, _, _, _, _>(g, dx, dy, dz)),
        ])
    }
}
