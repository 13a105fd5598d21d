use std::ops::Add;

use crate::compute::{sum, sum_all};
use crate::derivative::{d1, d2, d3};
use crate::errors::DomainError;
use crate::function::{Function, Update, UpdateVariable, ARGUMENT, D1, D2, D3};

/// Composition `f ∘ g`.
///
/// `g` may be any tree, `f` is a function of the argument passed to its `update`, i.e. it
/// contains no variables. Derivatives of `f` are taken with respect to [`ARGUMENT`] in the
/// directions produced by `g`:
///
/// - `d1(dx) = f'(g'(dx))`
/// - `d2(dx, dy) = f''(g'(dx), g'(dy)) + f'(g''(dx, dy))`
/// - `d3(dx, dy, dz)` combines `f'''`, three `f''` terms and `f'(g''')`
#[derive(Clone)]
pub struct Chain<F, G> {
    f: F,
    g: G,
}

impl<F, G> Chain<F, G>
where
    G: Function,
    F: Update<G::Output>,
{
    /// Composes `f` with `g` and evaluates `f` at the current value of `g`.
    ///
    /// # Errors
    /// Returns a [`DomainError`] if the value of `g` lies outside the domain of `f`.
    pub fn new(mut f: F, g: G) -> Result<Self, DomainError> {
        const {
            assert!(
                F::VARIABLES == 0,
                "The outer function of a composition must not contain variables."
            )
        };
        f.update(&g.d0())?;
        Ok(Chain { f, g })
    }

    pub fn outer(&self) -> &F {
        &self.f
    }

    pub fn inner(&self) -> &G {
        &self.g
    }
}

/// Creates `f ∘ g`, see [`Chain::new`].
pub fn chain<F, G>(f: F, g: G) -> Result<Chain<F, G>, DomainError>
where
    G: Function,
    F: Update<G::Output>,
{
    Chain::new(f, g)
}

impl<F, G> Function for Chain<F, G>
where
    G: Function,
    F: Update<G::Output>,
{
    type Output = F::Output;

    const VARIABLES: u64 = G::VARIABLES;

    fn d0(&self) -> F::Output {
        self.f.d0()
    }
}

impl<F, G, Arg> Update<Arg> for Chain<F, G>
where
    G: Update<Arg>,
    F: Update<G::Output>,
{
    const PRESENT: bool = <G as Update<Arg>>::PRESENT;

    fn update(&mut self, x: &Arg) -> Result<(), DomainError> {
        if <G as Update<Arg>>::PRESENT {
            self.g.update(x)?;
            self.f.update(&self.g.d0())?;
        }
        Ok(())
    }
}

impl<const ID: usize, F, G, Arg> UpdateVariable<ID, Arg> for Chain<F, G>
where
    G: UpdateVariable<ID, Arg>,
    F: Update<G::Output>,
{
    const PRESENT: bool = <G as UpdateVariable<ID, Arg>>::PRESENT;

    fn update_variable(&mut self, x: &Arg) -> Result<(), DomainError> {
        if <G as UpdateVariable<ID, Arg>>::PRESENT {
            self.g.update_variable(x)?;
            self.f.update(&self.g.d0())?;
        }
        Ok(())
    }
}

impl<const X: usize, F, G, Dx> D1<X, Dx> for Chain<F, G>
where
    G: D1<X, Dx>,
    F: Update<G::Output> + D1<ARGUMENT, G::Output>,
{
    const PRESENT: bool = <F as D1<ARGUMENT, G::Output>>::PRESENT && <G as D1<X, Dx>>::PRESENT;

    fn d1(&self, dx: &Dx) -> Option<F::Output> {
        let gx = d1::<X, _, _>(&self.g, dx)?;
        d1::<ARGUMENT, _, _>(&self.f, &gx)
    }
}

impl<const X: usize, const Y: usize, F, G, Dx, Dy> D2<X, Y, Dx, Dy> for Chain<F, G>
where
    G: D1<X, Dx> + D1<Y, Dy> + D2<X, Y, Dx, Dy>,
    F: Update<G::Output>
        + D1<ARGUMENT, G::Output>
        + D2<ARGUMENT, ARGUMENT, G::Output, G::Output>,
    F::Output: Add<Output = F::Output>,
{
    const PRESENT: bool = (<F as D2<ARGUMENT, ARGUMENT, G::Output, G::Output>>::PRESENT
        && <G as D1<X, Dx>>::PRESENT
        && <G as D1<Y, Dy>>::PRESENT)
        || (<F as D1<ARGUMENT, G::Output>>::PRESENT && <G as D2<X, Y, Dx, Dy>>::PRESENT);

    fn d2(&self, dx: &Dx, dy: &Dy) -> Option<F::Output> {
        let (f, g) = (&self.f, &self.g);
        let gx = d1::<X, _, _>(g, dx);
        let gy = d1::<Y, _, _>(g, dy);
        let gxy = d2::<X, Y, _, _, _>(g, dx, dy);

        sum(
            gx.as_ref()
                .zip(gy.as_ref())
                .and_then(|(gx, gy)| d2::<ARGUMENT, ARGUMENT, _, _, _>(f, gx, gy)),
            gxy.and_then(|gxy| d1::<ARGUMENT, _, _>(f, &gxy)),
        )
    }
}

impl<const X: usize, const Y: usize, const Z: usize, F, G, Dx, Dy, Dz> D3<X, Y, Z, Dx, Dy, Dz>
    for Chain<F, G>
where
    G: D1<X, Dx>
        + D1<Y, Dy>
        + D1<Z, Dz>
        + D2<X, Y, Dx, Dy>
        + D2<X, Z, Dx, Dz>
        + D2<Y, Z, Dy, Dz>
        + D3<X, Y, Z, Dx, Dy, Dz>,
    F: Update<G::Output>
        + D1<ARGUMENT, G::Output>
        + D2<ARGUMENT, ARGUMENT, G::Output, G::Output>
        + D3<ARGUMENT, ARGUMENT, ARGUMENT, G::Output, G::Output, G::Output>,
    F::Output: Add<Output = F::Output>,
{
    const PRESENT: bool = {
        let f1 = <F as D1<ARGUMENT, G::Output>>::PRESENT;
        let f2 = <F as D2<ARGUMENT, ARGUMENT, G::Output, G::Output>>::PRESENT;
        let f3 = <F as D3<ARGUMENT, ARGUMENT, ARGUMENT, G::Output, G::Output, G::Output>>::PRESENT;
        let (gx, gy, gz) = (
            <G as D1<X, Dx>>::PRESENT,
            <G as D1<Y, Dy>>::PRESENT,
            <G as D1<Z, Dz>>::PRESENT,
        );
        let (gxy, gxz, gyz) = (
            <G as D2<X, Y, Dx, Dy>>::PRESENT,
            <G as D2<X, Z, Dx, Dz>>::PRESENT,
            <G as D2<Y, Z, Dy, Dz>>::PRESENT,
        );
        let gxyz = <G as D3<X, Y, Z, Dx, Dy, Dz>>::PRESENT;

        (f3 && gx && gy && gz)
            || (f2 && ((gxz && gy) || (gx && gyz) || (gxy && gz)))
            || (f1 && gxyz)
    };

    fn d3(&self, dx: &Dx, dy: &Dy, dz: &Dz) -> Option<F::Output> {
        let (f, g) = (&self.f, &self.g);
        let gx = d1::<X, _, _>(g, dx);
        let gy = d1::<Y, _, _>(g, dy);
        let gz = d1::<Z, _, _>(g, dz);
        let gxy = d2::<X, Y, _, _, _>(g, dx, dy);
        let gxz = d2::<X, Z, _, _, _>(g, dx, dz);
        let gyz = d2::<Y, Z, _, _, _>(g, dy, dz);
        let gxyz = d3::<X, Y, Z, _, _, _, _>(g, dx, dy, dz);

        let f2 = |a: &Option<G::Output>, b: &Option<G::Output>| {
            a.as_ref()
                .zip(b.as_ref())
                .and_then(|(a, b)| d2::<ARGUMENT, ARGUMENT, _, _, _>(f, a, b))
        };

        sum_all([
            gx.as_ref()
                .zip(gy.as_ref())
                .zip(gz.as_ref())
                .and_then(|((gx, gy), gz)| d3::<ARGUMENT, ARGUMENT, ARGUMENT, _, _, _, _>(f, gx, gy, gz)),
            f2(&gxz, &gy),
            f2(&gx, &gyz),
            f2(&gxy, &gz),
            gxyz.and_then(|gxyz| d1::<ARGUMENT, _, _>(f, &gxyz)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::test_util::{assert_close, central_difference, FD_TOLERANCE, STEP};

    #[test]
    fn test_update() {
        // (x^2)^(1/4) = sqrt(x)
        let mut f = Pow::<1, 4>::new(1.0).unwrap().of(Pow::<2>::new(1.0).unwrap()).unwrap();
        assert_eq!(f.d0(), 1.0);
        f.update(&9.0).unwrap();
        assert_close(f.d0(), 3.0, 1e-15);

        // no variables: slot updates are ignored
        UpdateVariable::<0, f64>::update_variable(&mut f, &4.0).unwrap();
        assert_close(f.d0(), 3.0, 1e-15);
    }

    #[test]
    fn test_derivatives_of_square_root() {
        let f = Finalize::new(Pow::<1, 4>::new(1.0).unwrap().of(Pow::<2>::new(16.0).unwrap()).unwrap());
        assert_close(f.d1(&1.0), 1.0 / 8.0, 1e-15);

        let f = Finalize::new(Pow::<1, 4>::new(1.0).unwrap().of(Pow::<2>::new(4.0).unwrap()).unwrap());
        assert_close(f.d2(&1.0, &1.0), -0.25 * 4.0_f64.powf(-1.5), 1e-15);
        assert_close(f.d3(&1.0, &1.0, &1.0), 3.0 / 8.0 * 4.0_f64.powf(-2.5), 1e-15);
    }

    /// Asserts the chain rule up to third order for `sin ∘ inner`, term by term.
    fn assert_chain_rule<G>(inner: G, dx: f64, dy: f64, dz: f64)
    where
        G: Update<f64, Output = f64>
            + D1<ARGUMENT, f64>
            + D2<ARGUMENT, ARGUMENT, f64, f64>
            + D3<ARGUMENT, ARGUMENT, ARGUMENT, f64, f64, f64>,
    {
        let fg = Finalize::new(Sin::new(0.0).unwrap().of(inner.clone()).unwrap());
        let f = Finalize::new(Sin::new(inner.d0()).unwrap());
        let g = Finalize::new(inner);

        assert_eq!(fg.d0(), f.d0());
        assert_eq!(fg.d1(&dx), f.d1(&g.d1(&dx)));
        assert_eq!(
            fg.d2(&dx, &dy),
            f.d2(&g.d1(&dx), &g.d1(&dy)) + f.d1(&g.d2(&dx, &dy))
        );
        assert_eq!(
            fg.d3(&dx, &dy, &dz),
            f.d3(&g.d1(&dx), &g.d1(&dy), &g.d1(&dz))
                + f.d2(&g.d2(&dx, &dz), &g.d1(&dy))
                + f.d2(&g.d1(&dx), &g.d2(&dy, &dz))
                + f.d2(&g.d2(&dx, &dy), &g.d1(&dz))
                + f.d1(&g.d3(&dx, &dy, &dz))
        );
    }

    #[test]
    fn test_chain_rule_identities() {
        assert_chain_rule(Exp::new(0.4).unwrap(), 0.3, -0.8, 1.7);
    }

    #[test]
    fn test_chain_rule_identities_three_levels() {
        // sin(exp(x^2 + x)), the inner composition is itself checked first
        let polynomial = Pow::<2>::new(0.5).unwrap() + Identity::new(0.5);
        assert_chain_rule(polynomial.clone(), 0.3, -0.8, 1.7);

        let inner = Exp::new(0.0).unwrap().of(polynomial).unwrap();
        assert_close(inner.d0(), 0.75_f64.exp(), 1e-15);
        assert_chain_rule(inner, 0.3, -0.8, 1.7);
    }

    #[test]
    fn test_nested_composition() {
        // ln(exp(sin(x)) + x^2), three levels deep, checked against finite differences
        let x = 0.6;
        let inner = Exp::new(0.0).unwrap().of(Sin::new(x).unwrap()).unwrap() + Pow::<2>::new(x).unwrap();
        let mut f = Finalize::new(Ln::new(1.0).unwrap().of(inner).unwrap());

        let exact = (x.sin().exp() + x * x).ln();
        assert_close(f.d0(), exact, 1e-14);

        let (d1, d2, d3) = (f.d1(&1.0), f.d2(&1.0, &1.0), f.d3(&1.0, &1.0, &1.0));
        let mut shifted = f.clone();
        assert_close(central_difference(|x| shifted.eval(&x).unwrap(), x, STEP), d1, FD_TOLERANCE);
        let mut shifted = f.clone();
        assert_close(
            central_difference(|x| shifted.update(&x).map(|_| shifted.d1(&1.0)).unwrap(), x, STEP),
            d2,
            FD_TOLERANCE,
        );
        assert_close(
            central_difference(|x| f.update(&x).map(|_| f.d2(&1.0, &1.0)).unwrap(), x, STEP),
            d3,
            FD_TOLERANCE,
        );
    }

    #[test]
    fn test_domain_error_propagates() {
        let mut f = Ln::new(1.0).unwrap().of(Identity::new(1.0)).unwrap();
        let err = f.update(&-1.0).unwrap_err();
        assert!(matches!(err, DomainError::OutOfDomain { .. }));

        assert!(Ln::new(1.0).unwrap().of(Identity::new(0.0)).is_err());
    }
}
