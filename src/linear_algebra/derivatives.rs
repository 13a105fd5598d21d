use itertools::iproduct;
use nalgebra::{DMatrix, SMatrix};

use crate::finalize::Finalize;
use crate::function::{ARGUMENT, D1, D2};

/// Canonical basis matrix `E_ij` with a single one in row `i`, column `j`.
pub fn basis<const R: usize, const C: usize>(i: usize, j: usize) -> SMatrix<f64, R, C> {
    let mut e = SMatrix::zeros();
    e[(i, j)] = 1.0;
    e
}

/// Gradient of a scalar function of an `R x C` matrix, `g_ij = d1(E_ij)`.
pub fn gradient<F, const R: usize, const C: usize>(f: &Finalize<F>) -> SMatrix<f64, R, C>
where
    F: D1<ARGUMENT, SMatrix<f64, R, C>, Output = f64>,
{
    let mut g = SMatrix::zeros();
    for (i, j) in iproduct!(0..R, 0..C) {
        g[(i, j)] = f.d1(&basis::<R, C>(i, j));
    }
    g
}

/// Hessian of a scalar function of an `R x C` matrix.
///
/// Entries are addressed in row-major order: `h[(i * C + j, k * C + l)] = d2(E_ij, E_kl)`.
pub fn hessian<F, const R: usize, const C: usize>(f: &Finalize<F>) -> DMatrix<f64>
where
    F: D1<ARGUMENT, SMatrix<f64, R, C>, Output = f64>
        + D2<ARGUMENT, ARGUMENT, SMatrix<f64, R, C>, SMatrix<f64, R, C>>,
{
    let n = R * C;
    let mut h = DMatrix::zeros(n, n);
    for (i, j, k, l) in iproduct!(0..R, 0..C, 0..R, 0..C) {
        h[(i * C + j, k * C + l)] = f.d2(&basis::<R, C>(i, j), &basis::<R, C>(k, l));
    }
    h
}

#[cfg(test)]
mod tests {
    use nalgebra::{Matrix2, Matrix3};

    use super::*;
    use crate::prelude::*;
    use crate::test_util::assert_close;

    #[test]
    fn test_gradient_of_determinant_is_cofactor() {
        let a = Matrix3::new(2.0, 0.5, 0.0, 0.1, 1.5, -0.3, 0.4, 0.0, 1.0);
        let f = Finalize::new(Determinant::new(a).unwrap());
        let cofactor = a.determinant() * a.try_inverse().unwrap().transpose();

        let g = gradient::<_, 3, 3>(&f);
        assert_close((g - cofactor).norm(), 0.0, 1e-14);
    }

    #[test]
    fn test_hessian_of_frobenius_norm() {
        let a = Matrix2::new(1.0, -2.0, 0.5, 3.0);
        let f = Finalize::new(SquaredFrobeniusNorm::new(a).unwrap());

        assert_eq!(gradient::<_, 2, 2>(&f), 2.0 * a);
        let h = hessian::<_, 2, 2>(&f);
        assert_eq!(h, DMatrix::identity(4, 4) * 2.0);
    }

    #[test]
    fn test_hessian_is_symmetric() {
        let a = Matrix2::new(1.0, -2.0, 0.5, 3.0);
        let f = Finalize::new(
            Determinant::new(a).unwrap() * SecondPrincipalInvariant::new(a).unwrap(),
        );
        let h = hessian::<_, 2, 2>(&f);
        assert_close((&h - h.transpose()).norm(), 0.0, 1e-14);
        // row-major: d2(E_00, E_11) sits at (0, 3)
        assert_eq!(h[(0, 3)], f.d2(&basis::<2, 2>(0, 0), &basis::<2, 2>(1, 1)));
    }
}
