use std::ops::Add;

#[cfg(feature = "nalgebra")]
use nalgebra::SMatrix;

use crate::compute::sum_all;
use crate::derivative::{d1, d2, d3};
use crate::errors::DomainError;
use crate::function::{
    update_if_present, update_variable_if_present, Function, Update, UpdateVariable, D1, D2, D3,
};

/// Inner product of two values, e.g. the Frobenius product `A : B` of two matrices.
pub trait InnerProduct<Rhs = Self> {
    type Output;

    fn inner(&self, rhs: &Rhs) -> Self::Output;
}

impl InnerProduct for f64 {
    type Output = f64;

    fn inner(&self, rhs: &f64) -> f64 {
        self * rhs
    }
}

impl InnerProduct for f32 {
    type Output = f32;

    fn inner(&self, rhs: &f32) -> f32 {
        self * rhs
    }
}

#[cfg(feature = "nalgebra")]
impl<const R: usize, const C: usize> InnerProduct for SMatrix<f64, R, C> {
    type Output = f64;

    fn inner(&self, rhs: &Self) -> f64 {
        self.dot(rhs)
    }
}

/// Output type of `f · g`.
pub type DotOutput<F, G> =
    <<F as Function>::Output as InnerProduct<<G as Function>::Output>>::Output;

fn inner<X: InnerProduct<Y>, Y>(x: Option<X>, y: Option<Y>) -> Option<X::Output> {
    Some(x?.inner(&y?))
}

/// Inner product `f · g` of two functions.
///
/// The derivatives have the structure of the Leibniz rule of [`Product`](super::Product) with
/// the inner product in place of the multiplication.
pub struct Dot<F: Function, G: Function>
where
    F::Output: InnerProduct<G::Output>,
{
    f: F,
    g: G,
    value: DotOutput<F, G>,
}

impl<F, G> Clone for Dot<F, G>
where
    F: Function,
    G: Function,
    F::Output: InnerProduct<G::Output>,
    DotOutput<F, G>: Clone,
{
    fn clone(&self) -> Self {
        Dot {
            f: self.f.clone(),
            g: self.g.clone(),
            value: self.value.clone(),
        }
    }
}

impl<F, G> Dot<F, G>
where
    F: Function,
    G: Function,
    F::Output: InnerProduct<G::Output>,
{
    pub fn new(f: F, g: G) -> Self {
        let value = f.d0().inner(&g.d0());
        Dot { f, g, value }
    }
}

/// Creates `f · g`.
pub fn dot<F, G>(f: F, g: G) -> Dot<F, G>
where
    F: Function,
    G: Function,
    F::Output: InnerProduct<G::Output>,
{
    Dot::new(f, g)
}

impl<F, G> Function for Dot<F, G>
where
    F: Function,
    G: Function,
    F::Output: InnerProduct<G::Output>,
    DotOutput<F, G>: Clone + Add<Output = DotOutput<F, G>>,
{
    type Output = DotOutput<F, G>;

    const VARIABLES: u64 = F::VARIABLES | G::VARIABLES;

    fn d0(&self) -> Self::Output {
        self.value.clone()
    }
}

impl<F, G, Arg> Update<Arg> for Dot<F, G>
where
    F: Update<Arg>,
    G: Update<Arg>,
    F::Output: InnerProduct<G::Output>,
    DotOutput<F, G>: Clone + Add<Output = DotOutput<F, G>>,
{
    const PRESENT: bool = <F as Update<Arg>>::PRESENT || <G as Update<Arg>>::PRESENT;

    fn update(&mut self, x: &Arg) -> Result<(), DomainError> {
        update_if_present(&mut self.f, x)?;
        update_if_present(&mut self.g, x)?;
        self.value = self.f.d0().inner(&self.g.d0());
        Ok(())
    }
}

impl<const ID: usize, F, G, Arg> UpdateVariable<ID, Arg> for Dot<F, G>
where
    F: UpdateVariable<ID, Arg>,
    G: UpdateVariable<ID, Arg>,
    F::Output: InnerProduct<G::Output>,
    DotOutput<F, G>: Clone + Add<Output = DotOutput<F, G>>,
{
    const PRESENT: bool =
        <F as UpdateVariable<ID, Arg>>::PRESENT || <G as UpdateVariable<ID, Arg>>::PRESENT;

    fn update_variable(&mut self, x: &Arg) -> Result<(), DomainError> {
        if !<Self as UpdateVariable<ID, Arg>>::PRESENT {
            return Ok(());
        }
        update_variable_if_present::<ID, _, _>(&mut self.f, x)?;
        update_variable_if_present::<ID, _, _>(&mut self.g, x)?;
        self.value = self.f.d0().inner(&self.g.d0());
        Ok(())
    }
}

impl<const X: usize, F, G, Dx> D1<X, Dx> for Dot<F, G>
where
    F: D1<X, Dx>,
    G: D1<X, Dx>,
    F::Output: InnerProduct<G::Output>,
    DotOutput<F, G>: Clone + Add<Output = DotOutput<F, G>>,
{
    const PRESENT: bool = <F as D1<X, Dx>>::PRESENT || <G as D1<X, Dx>>::PRESENT;

    fn d1(&self, dx: &Dx) -> Option<Self::Output> {
        let (f, g) = (&self.f, &self.g);
        sum_all([
            inner(d1::<X, _, _>(f, dx), Some(g.d0())),
            inner(Some(f.d0()), d1::<X, _, _>(g, dx)),
        ])
    }
}

impl<const X: usize, const Y: usize, F, G, Dx, Dy> D2<X, Y, Dx, Dy> for Dot<F, G>
where
    F: D1<X, Dx> + D1<Y, Dy> + D2<X, Y, Dx, Dy>,
    G: D1<X, Dx> + D1<Y, Dy> + D2<X, Y, Dx, Dy>,
    F::Output: InnerProduct<G::Output>,
    DotOutput<F, G>: Clone + Add<Output = DotOutput<F, G>>,
{
    const PRESENT: bool = <F as D2<X, Y, Dx, Dy>>::PRESENT
        || (<F as D1<X, Dx>>::PRESENT && <G as D1<Y, Dy>>::PRESENT)
        || (<F as D1<Y, Dy>>::PRESENT && <G as D1<X, Dx>>::PRESENT)
        || <G as D2<X, Y, Dx, Dy>>::PRESENT;

    fn d2(&self, dx: &Dx, dy: &Dy) -> Option<Self::Output> {
        let (f, g) = (&self.f, &self.g);
        sum_all([
            inner(d2::<X, Y, _, _, _>(f, dx, dy), Some(g.d0())),
            inner(d1::<X, _, _>(f, dx), d1::<Y, _, _>(g, dy)),
            inner(d1::<Y, _, _>(f, dy), d1::<X, _, _>(g, dx)),
            inner(Some(f.d0()), d2::<X, Y, _, _, _>(g, dx, dy)),
        ])
    }
}

impl<const X: usize, const Y: usize, const Z: usize, F, G, Dx, Dy, Dz> D3<X, Y, Z, Dx, Dy, Dz>
    for Dot<F, G>
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
    F::Output: InnerProduct<G::Output>,
    DotOutput<F, G>: Clone + Add<Output = DotOutput<F, G>>,
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
            inner(d3::<X, Y, Z, _, _, _, _>(f, dx, dy, dz), Some(g.d0())),
            inner(d2::<X, Y, _, _, _>(f, dx, dy), d1::<Z, _, _>(g, dz)),
            inner(d2::<X, Z, _, _, _>(f, dx, dz), d1::<Y, _, _>(g, dy)),
            inner(d1::<X, _, _>(f, dx), d2::<Y, Z, _, _, _>(g, dy, dz)),
            inner(d2::<Y, Z, _, _, _>(f, dy, dz), d1::<X, _, _>(g, dx)),
            inner(d1::<Y, _, _>(f, dy), d2::<X, Z, _, _, _>(g, dx, dz)),
            inner(d1::<Z, _, _>(f, dz), d2::<X, Y, _, _, _>(g, dx, dy)),
            inner(Some(f.d0()), d3::<X, Y, Z, _, _, _, _>(g, dx, dy, dz)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_scalar_dot_is_product() {
        let (f, g) = (Cos::new(0.2).unwrap(), Ln::new(0.2).unwrap());
        let d = Finalize::new(dot(f, g));
        let p = Finalize::new(f * g);

        assert_eq!(d.d0(), p.d0());
        assert_eq!(d.d1(&1.5), p.d1(&1.5));
        assert_eq!(d.d2(&1.5, &0.5), p.d2(&1.5, &0.5));
        assert_eq!(d.d3(&1.5, &0.5, &-2.0), p.d3(&1.5, &0.5, &-2.0));
    }

    #[test]
    fn test_clone_evaluates_independently() {
        let mut f = dot(Identity::new(2.0), Pow::<2>::new(2.0).unwrap());
        let g = f.clone();
        f.update(&3.0).unwrap();

        assert_eq!(g.d0(), 8.0);
        assert_eq!(f.d0(), 27.0);
    }

    #[cfg(feature = "nalgebra")]
    #[test]
    fn test_frobenius_product() {
        use nalgebra::Matrix2;

        let a = Matrix2::new(1.0, 2.0, 3.0, 4.0);
        let da = Matrix2::new(0.5, 0.0, -1.0, 2.0);
        let db = Matrix2::new(1.0, 1.0, 0.0, -3.0);

        // A : A has derivatives 2 A : dA and 2 dA : dB
        let f = Finalize::new(dot(Identity::new(a), Identity::new(a)));
        assert_eq!(f.d0(), 30.0);
        assert_eq!(f.d1(&da), 2.0 * a.dot(&da));
        assert_eq!(f.d2(&da, &db), 2.0 * da.dot(&db));
        assert_eq!(f.d3(&da, &db, &da), 0.0);
    }
}
