use std::f64::consts::LN_2;

use crate::errors::DomainError;

/// Exponential function `e^x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exp {
    x: f64,
    d: [f64; 4],
}

/// Base-2 exponential `2^x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exp2 {
    x: f64,
    d: [f64; 4],
}

impl Exp {
    const NAME: &'static str = "exp";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        let exp = x.exp();
        Ok([exp; 4])
    }
}

impl Exp2 {
    const NAME: &'static str = "exp2";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        let exp2 = x.exp2();
        Ok([exp2, LN_2 * exp2, LN_2 * LN_2 * exp2, LN_2 * LN_2 * LN_2 * exp2])
    }
}

scalar_function! {
    [] Exp;
    [] Exp2;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use crate::test_util::{assert_close, check_finite_differences, FD_TOLERANCE};

    #[test]
    fn test_exp() {
        let f = Finalize::new(Exp::new(1.0).unwrap());
        let e = 1.0_f64.exp();
        assert_eq!(f.d0(), e);
        assert_eq!(f.d1(&1.0), e);
        assert_eq!(f.d2(&1.0, &2.0), 2.0 * e);
        assert_eq!(f.d3(&1.0, &1.0, &1.0), e);

        check_finite_differences(Exp::new(0.0).unwrap(), -0.7, FD_TOLERANCE);
    }

    #[test]
    fn test_exp2() {
        let mut f = Exp2::new(3.0).unwrap();
        assert_eq!(f.d0(), 8.0);
        assert_close(f.eval(&0.5).unwrap(), 2.0_f64.sqrt(), 1e-15);

        check_finite_differences(Exp2::new(0.0).unwrap(), 1.3, FD_TOLERANCE);
    }
}
