//! Helpers shared by the unit tests.

#[cfg(feature = "nalgebra")]
use nalgebra::SMatrix;

use crate::finalize::Finalize;
use crate::function::{Update, ARGUMENT, D1, D2, D3};

/// Asserts `|actual - expected| <= tol`.
#[track_caller]
pub(crate) fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tolerance {tol})"
    );
}

/// Central difference quotient `(f(x + h) - f(x - h)) / 2h`.
pub(crate) fn central_difference(mut f: impl FnMut(f64) -> f64, x: f64, h: f64) -> f64 {
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Step size used by the finite-difference checks.
pub(crate) const STEP: f64 = 1e-6;

/// Tolerance for central differences with [`STEP`].
pub(crate) const FD_TOLERANCE: f64 = 1e-6;

/// Checks d1, d2 and d3 of a scalar function of its argument against central differences of
/// the next lower order at `x`.
#[track_caller]
pub(crate) fn check_finite_differences<F>(f: F, x: f64, tol: f64)
where
    F: Update<f64, Output = f64>
        + D1<ARGUMENT, f64>
        + D2<ARGUMENT, ARGUMENT, f64, f64>
        + D3<ARGUMENT, ARGUMENT, ARGUMENT, f64, f64, f64>,
{
    let mut f = Finalize::new(f);
    f.update(&x).unwrap();
    let (d1, d2, d3) = (f.d1(&1.0), f.d2(&1.0, &1.0), f.d3(&1.0, &1.0, &1.0));

    let mut shifted = f.clone();
    assert_close(central_difference(|x| shifted.eval(&x).unwrap(), x, STEP), d1, tol);
    let mut shifted = f.clone();
    assert_close(
        central_difference(|x| shifted.update(&x).map(|_| shifted.d1(&1.0)).unwrap(), x, STEP),
        d2,
        tol,
    );
    assert_close(
        central_difference(|x| f.update(&x).map(|_| f.d2(&1.0, &1.0)).unwrap(), x, STEP),
        d3,
        tol,
    );
}

/// Checks the directional derivatives of a scalar function of a matrix at `a` in direction `da`
/// against central differences along `t -> a + t da`.
#[cfg(feature = "nalgebra")]
#[track_caller]
pub(crate) fn check_directional_finite_differences<F, const R: usize, const C: usize>(
    f: F,
    a: SMatrix<f64, R, C>,
    da: SMatrix<f64, R, C>,
    tol: f64,
) where
    F: Update<SMatrix<f64, R, C>, Output = f64>
        + D1<ARGUMENT, SMatrix<f64, R, C>>
        + D2<ARGUMENT, ARGUMENT, SMatrix<f64, R, C>, SMatrix<f64, R, C>>
        + D3<
            ARGUMENT,
            ARGUMENT,
            ARGUMENT,
            SMatrix<f64, R, C>,
            SMatrix<f64, R, C>,
            SMatrix<f64, R, C>,
        >,
{
    let mut f = Finalize::new(f);
    f.update(&a).unwrap();
    let (d1, d2, d3) = (f.d1(&da), f.d2(&da, &da), f.d3(&da, &da, &da));

    let mut shifted = f.clone();
    assert_close(
        central_difference(|t| shifted.eval(&(a + da * t)).unwrap(), 0.0, STEP),
        d1,
        tol,
    );
    let mut shifted = f.clone();
    assert_close(
        central_difference(
            |t| shifted.update(&(a + da * t)).map(|_| shifted.d1(&da)).unwrap(),
            0.0,
            STEP,
        ),
        d2,
        tol,
    );
    assert_close(
        central_difference(
            |t| f.update(&(a + da * t)).map(|_| f.d2(&da, &da)).unwrap(),
            0.0,
            STEP,
        ),
        d3,
        tol,
    );
}
