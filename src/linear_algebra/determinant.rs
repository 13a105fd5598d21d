use itertools::{iproduct, Itertools};
use nalgebra::{Matrix2, Matrix3, SMatrix, Vector3};

use crate::errors::DomainError;
use crate::function::{Function, Update, ARGUMENT, D1, D2, D3};

use super::check_entries;

/// Determinant of a 2x2 or 3x3 matrix.
///
/// The derivatives replace columns of the matrix by the corresponding columns of the
/// directions, one column per direction, and sum over all placements. The determinant of a 2x2
/// matrix is quadratic and has no third derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Determinant<const N: usize> {
    a: SMatrix<f64, N, N>,
    value: f64,
}

impl<const N: usize> Determinant<N>
where
    Self: Update<SMatrix<f64, N, N>>,
{
    /// # Errors
    /// Returns [`DomainError::NonFinite`] if `a` has a NaN or infinite entry.
    pub fn new(a: SMatrix<f64, N, N>) -> Result<Self, DomainError> {
        let mut f = Determinant { a, value: 0.0 };
        f.update(&a)?;
        Ok(f)
    }
}

impl<const N: usize> Function for Determinant<N> {
    type Output = f64;

    fn d0(&self) -> f64 {
        self.value
    }
}

fn det2(a: &Matrix2<f64>) -> f64 {
    a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)]
}

/// Symmetric bilinear form with `mixed2(a, a) = 2 det(a)`.
fn mixed2(a: &Matrix2<f64>, b: &Matrix2<f64>) -> f64 {
    a[(0, 0)] * b[(1, 1)] + b[(0, 0)] * a[(1, 1)] - a[(0, 1)] * b[(1, 0)] - b[(0, 1)] * a[(1, 0)]
}

impl Update<Matrix2<f64>> for Determinant<2> {
    const PRESENT: bool = true;

    fn update(&mut self, a: &Matrix2<f64>) -> Result<(), DomainError> {
        check_entries("det", a)?;
        self.a = *a;
        self.value = det2(a);
        Ok(())
    }
}

impl<const X: usize> D1<X, Matrix2<f64>> for Determinant<2> {
    const PRESENT: bool = X == ARGUMENT;

    fn d1(&self, da: &Matrix2<f64>) -> Option<f64> {
        (X == ARGUMENT).then(|| mixed2(&self.a, da))
    }
}

impl<const X: usize, const Y: usize> D2<X, Y, Matrix2<f64>, Matrix2<f64>> for Determinant<2> {
    const PRESENT: bool = X == ARGUMENT && Y == ARGUMENT;

    fn d2(&self, da: &Matrix2<f64>, db: &Matrix2<f64>) -> Option<f64> {
        (X == ARGUMENT && Y == ARGUMENT).then(|| mixed2(da, db))
    }
}

impl<const X: usize, const Y: usize, const Z: usize, Dx, Dy, Dz> D3<X, Y, Z, Dx, Dy, Dz>
    for Determinant<2>
{
}

fn columns(a: &Matrix3<f64>) -> [Vector3<f64>; 3] {
    [
        a.column(0).into_owned(),
        a.column(1).into_owned(),
        a.column(2).into_owned(),
    ]
}

fn det3(c: &[Vector3<f64>; 3]) -> f64 {
    c[0].dot(&c[1].cross(&c[2]))
}

impl Update<Matrix3<f64>> for Determinant<3> {
    const PRESENT: bool = true;

    fn update(&mut self, a: &Matrix3<f64>) -> Result<(), DomainError> {
        check_entries("det", a)?;
        self.a = *a;
        self.value = det3(&columns(a));
        Ok(())
    }
}

impl<const X: usize> D1<X, Matrix3<f64>> for Determinant<3> {
    const PRESENT: bool = X == ARGUMENT;

    fn d1(&self, da: &Matrix3<f64>) -> Option<f64> {
        if X != ARGUMENT {
            return None;
        }
        let (a, da) = (columns(&self.a), columns(da));
        Some(
            (0..3)
                .map(|i| {
                    let mut c = a;
                    c[i] = da[i];
                    det3(&c)
                })
                .sum(),
        )
    }
}

impl<const X: usize, const Y: usize> D2<X, Y, Matrix3<f64>, Matrix3<f64>> for Determinant<3> {
    const PRESENT: bool = X == ARGUMENT && Y == ARGUMENT;

    fn d2(&self, da: &Matrix3<f64>, db: &Matrix3<f64>) -> Option<f64> {
        if X != ARGUMENT || Y != ARGUMENT {
            return None;
        }
        let (a, da, db) = (columns(&self.a), columns(da), columns(db));
        Some(
            iproduct!(0..3, 0..3)
                .filter(|(i, j)| i != j)
                .map(|(i, j)| {
                    let mut c = a;
                    c[i] = da[i];
                    c[j] = db[j];
                    det3(&c)
                })
                .sum(),
        )
    }
}

impl<const X: usize, const Y: usize, const Z: usize>
    D3<X, Y, Z, Matrix3<f64>, Matrix3<f64>, Matrix3<f64>> for Determinant<3>
{
    const PRESENT: bool = X == ARGUMENT && Y == ARGUMENT && Z == ARGUMENT;

    fn d3(&self, da: &Matrix3<f64>, db: &Matrix3<f64>, dc: &Matrix3<f64>) -> Option<f64> {
        if X != ARGUMENT || Y != ARGUMENT || Z != ARGUMENT {
            return None;
        }
        let (da, db, dc) = (columns(da), columns(db), columns(dc));
        Some(
            (0..3)
                .permutations(3)
                .map(|p| {
                    let mut c = da;
                    c[p[1]] = db[p[1]];
                    c[p[2]] = dc[p[2]];
                    det3(&c)
                })
                .sum(),
        )
    }
}

crate::absent!([const N: usize] Determinant<N>: update_variable);
