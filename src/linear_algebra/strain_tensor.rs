use nalgebra::SMatrix;

use crate::errors::DomainError;
use crate::function::{Function, Update, ARGUMENT, D1, D2};

use super::check_entries;

/// Strain tensor `FᵀF` of a deformation gradient `F`.
///
/// Matrix valued. Quadratic in `F`, so derivatives above the second order vanish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeftCauchyGreen<const N: usize> {
    f: SMatrix<f64, N, N>,
    value: SMatrix<f64, N, N>,
}

impl<const N: usize> LeftCauchyGreen<N> {
    /// # Errors
    /// Returns [`DomainError::NonFinite`] if `f` has a NaN or infinite entry.
    pub fn new(f: SMatrix<f64, N, N>) -> Result<Self, DomainError> {
        let mut strain = LeftCauchyGreen { f, value: f };
        strain.update(&f)?;
        Ok(strain)
    }
}

impl<const N: usize> Function for LeftCauchyGreen<N> {
    type Output = SMatrix<f64, N, N>;

    fn d0(&self) -> SMatrix<f64, N, N> {
        self.value
    }
}

impl<const N: usize> Update<SMatrix<f64, N, N>> for LeftCauchyGreen<N> {
    const PRESENT: bool = true;

    fn update(&mut self, f: &SMatrix<f64, N, N>) -> Result<(), DomainError> {
        check_entries("strain", f)?;
        self.f = *f;
        self.value = f.tr_mul(f);
        Ok(())
    }
}

impl<const N: usize, const X: usize> D1<X, SMatrix<f64, N, N>> for LeftCauchyGreen<N> {
    const PRESENT: bool = X == ARGUMENT;

    fn d1(&self, df: &SMatrix<f64, N, N>) -> Option<SMatrix<f64, N, N>> {
        (X == ARGUMENT).then(|| df.tr_mul(&self.f) + self.f.tr_mul(df))
    }
}

impl<const N: usize, const X: usize, const Y: usize>
    D2<X, Y, SMatrix<f64, N, N>, SMatrix<f64, N, N>> for LeftCauchyGreen<N>
{
    const PRESENT: bool = X == ARGUMENT && Y == ARGUMENT;

    fn d2(
        &self,
        df1: &SMatrix<f64, N, N>,
        df2: &SMatrix<f64, N, N>,
    ) -> Option<SMatrix<f64, N, N>> {
        (X == ARGUMENT && Y == ARGUMENT).then(|| df1.tr_mul(df2) + df2.tr_mul(df1))
    }
}

crate::absent!([const N: usize] LeftCauchyGreen<N>: update_variable, d3);

#[cfg(test)]
mod tests {
    use nalgebra::Matrix3;

    use crate::prelude::*;
    use crate::test_util::assert_close;

    #[test]
    fn test_strain_tensor() {
        let f = Matrix3::new(1.0, 0.2, 0.0, 0.0, 1.1, 0.3, 0.1, 0.0, 0.9);
        let df = Matrix3::new(0.0, 1.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, -1.0);
        let strain = Finalize::new(LeftCauchyGreen::new(f).unwrap());

        let linearized = df.transpose() * f + f.transpose() * df;
        assert_close((strain.d0() - f.transpose() * f).norm(), 0.0, 1e-14);
        assert_close((strain.d1(&df) - linearized).norm(), 0.0, 1e-14);
        assert_close((strain.d2(&df, &f) - linearized).norm(), 0.0, 1e-14);
        assert_eq!(strain.d3(&df, &df, &df), Matrix3::zeros());
    }

    #[test]
    fn test_composition_with_trace() {
        // tr(FᵀF) = F : F
        let f = Matrix3::new(1.0, 0.2, 0.0, 0.0, 1.1, 0.3, 0.1, 0.0, 0.9);
        let df = Matrix3::new(0.3, 0.0, -0.1, 0.0, 0.2, 0.0, 0.4, 0.0, 0.1);
        let composed = Finalize::new(
            Trace::new(Matrix3::identity())
                .unwrap()
                .of(LeftCauchyGreen::new(f).unwrap())
                .unwrap(),
        );
        let norm = Finalize::new(SquaredFrobeniusNorm::new(f).unwrap());

        assert_close(composed.d0(), norm.d0(), 1e-14);
        assert_close(composed.d1(&df), norm.d1(&df), 1e-14);
        assert_close(composed.d2(&df, &f), norm.d2(&df, &f), 1e-14);
        assert_eq!(composed.d3(&df, &f, &df), 0.0);
    }
}
