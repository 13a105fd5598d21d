//! Independent variables and the slot predicates.
//!
//! A [`Variable<T, ID>`] marks an independent variable of type `T` in slot `ID`. A tree built from
//! several variables is updated slot by slot with `update_variable::<ID, _>` and differentiated
//! with respect to a slot with `d1::<ID, _, _>` and friends. The set of slots a tree contains is
//! the bitset `Function::VARIABLES`, the union of the sets of all its nodes.
//!
//! # Example
//!
//! ```rust
//! use fung::prelude::*;
//! use fung::variable::{has_variable_id, has_more_than_one_variable};
//!
//! let x = variable::<0, f64>(1.0);
//! let y = variable::<1, f64>(2.0);
//! let f = x * y;
//!
//! fn slots<F: Function>(_: &F) -> (bool, bool, bool) {
//!     (has_variable_id::<F, 0>(), has_variable_id::<F, 2>(), has_more_than_one_variable::<F>())
//! }
//! assert_eq!(slots(&f), (true, false, true));
//! ```

#[cfg(feature = "nalgebra")]
use nalgebra::SMatrix;

use crate::errors::DomainError;
use crate::function::{Function, UpdateVariable, D1};

/// Conversion of a direction or update argument into the value type of a variable.
///
/// `MATCHES` tells whether the argument type is compatible with the variable. Incompatible
/// pairs exist so that trees mixing variables of different types still compile: the variable
/// whose slot is not addressed simply ignores the argument. Addressing a slot with an
/// incompatible argument fails the build.
pub trait Extract<T> {
    const MATCHES: bool;

    fn extract(&self) -> Option<T>;
}

impl<T: Clone> Extract<T> for T {
    const MATCHES: bool = true;

    fn extract(&self) -> Option<T> {
        Some(self.clone())
    }
}

#[cfg(feature = "nalgebra")]
impl<const R: usize, const C: usize> Extract<f64> for SMatrix<f64, R, C> {
    const MATCHES: bool = false;

    fn extract(&self) -> Option<f64> {
        None
    }
}

#[cfg(feature = "nalgebra")]
impl<const R: usize, const C: usize> Extract<SMatrix<f64, R, C>> for f64 {
    const MATCHES: bool = false;

    fn extract(&self) -> Option<SMatrix<f64, R, C>> {
        None
    }
}

/// Independent variable of type `T` in slot `ID`.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable<T, const ID: usize> {
    value: T,
}

impl<T, const ID: usize> Variable<T, ID> {
    pub fn new(value: T) -> Self {
        Variable { value }
    }
}

/// Creates the variable for slot `ID` with initial value `value`.
pub fn variable<const ID: usize, T>(value: T) -> Variable<T, ID> {
    Variable::new(value)
}

impl<T: Clone, const ID: usize> Function for Variable<T, ID> {
    type Output = T;

    const VARIABLES: u64 = {
        assert!(ID < 64, "Variable slot ids must be smaller than 64.");
        1 << ID
    };

    fn d0(&self) -> T {
        self.value.clone()
    }
}

impl<T: Clone, const ID: usize, const I: usize, Arg: Extract<T>> UpdateVariable<I, Arg>
    for Variable<T, ID>
{
    const PRESENT: bool = I == ID;

    fn update_variable(&mut self, x: &Arg) -> Result<(), DomainError> {
        const {
            assert!(
                I != ID || <Arg as Extract<T>>::MATCHES,
                "Updating variable with incompatible argument."
            )
        };
        if I == ID {
            if let Some(value) = x.extract() {
                self.value = value;
            }
        }
        Ok(())
    }
}

impl<T: Clone, const ID: usize, const X: usize, Dx: Extract<T>> D1<X, Dx> for Variable<T, ID> {
    const PRESENT: bool = X == ID;

    fn d1(&self, dx: &Dx) -> Option<T> {
        const {
            assert!(
                X != ID || <Dx as Extract<T>>::MATCHES,
                "Incompatible argument in computation of first derivative."
            )
        };
        if X == ID {
            dx.extract()
        } else {
            None
        }
    }
}

crate::absent!([T: Clone, const ID: usize] Variable<T, ID>: update, d2, d3);

/// Whether `F` contains at least one variable.
pub const fn has_variable<F: Function>() -> bool {
    F::VARIABLES != 0
}

/// Whether `F` contains the variable with slot `ID`.
pub const fn has_variable_id<F: Function, const ID: usize>() -> bool {
    ID < 64 && (F::VARIABLES & (1u64 << ID)) != 0
}

/// Whether `F` contains variables in more than one slot.
pub const fn has_more_than_one_variable<F: Function>() -> bool {
    F::VARIABLES.count_ones() > 1
}

/// Number of distinct slots occurring in `F`.
pub const fn variable_count<F: Function>() -> usize {
    F::VARIABLES.count_ones() as usize
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::arithmetic::Compose;
    use crate::cmath::Sin;
    use crate::derivative;
    use crate::finalize::Finalize;
    use crate::function::ARGUMENT;
    use crate::operations::{squared, Product, Sum};
    use crate::test_util::assert_close;

    #[test]
    fn test_variable() {
        let mut x = variable::<2, f64>(1.5);
        assert_eq!(x.d0(), 1.5);

        UpdateVariable::<2, f64>::update_variable(&mut x, &3.0).unwrap();
        assert_eq!(x.d0(), 3.0);

        UpdateVariable::<1, f64>::update_variable(&mut x, &7.0).unwrap();
        assert_eq!(x.d0(), 3.0);

        assert_eq!(derivative::d1::<2, _, _>(&x, &0.5_f64), Some(0.5));
        assert_eq!(derivative::d1::<1, _, _>(&x, &0.5_f64), None);
        assert_eq!(derivative::d1::<ARGUMENT, _, _>(&x, &0.5_f64), None);
    }

    #[test]
    fn test_slot_predicates() {
        assert!(has_variable::<Variable<f64, 0>>());
        assert!(has_variable_id::<Variable<f64, 5>, 5>());
        assert!(!has_variable_id::<Variable<f64, 5>, 4>());
        assert!(!has_variable_id::<Variable<f64, 5>, ARGUMENT>());
        assert!(!has_more_than_one_variable::<Variable<f64, 5>>());
        assert_eq!(variable_count::<Variable<f64, 63>>(), 1);
    }

    #[cfg(feature = "nalgebra")]
    #[test]
    fn test_mixed_types() {
        use nalgebra::Matrix2;

        let mut x = variable::<0, f64>(1.0);
        UpdateVariable::<1, Matrix2<f64>>::update_variable(&mut x, &Matrix2::identity()).unwrap();
        assert_eq!(x.d0(), 1.0);
        assert_eq!(derivative::d1::<1, _, _>(&x, &Matrix2::<f64>::identity()), None);
    }

    /// Variable that counts how often it is visited by slot updates.
    #[derive(Clone)]
    struct Counted<const ID: usize> {
        value: f64,
        visits: Rc<Cell<usize>>,
    }

    impl<const ID: usize> Counted<ID> {
        fn new(value: f64) -> Self {
            Counted {
                value,
                visits: Rc::new(Cell::new(0)),
            }
        }
    }

    impl<const ID: usize> Function for Counted<ID> {
        type Output = f64;

        const VARIABLES: u64 = 1 << ID;

        fn d0(&self) -> f64 {
            self.value
        }
    }

    impl<const ID: usize, const I: usize> UpdateVariable<I, f64> for Counted<ID> {
        const PRESENT: bool = I == ID;

        fn update_variable(&mut self, x: &f64) -> Result<(), DomainError> {
            self.visits.set(self.visits.get() + 1);
            if I == ID {
                self.value = *x;
            }
            Ok(())
        }
    }

    impl<const ID: usize, const X: usize> D1<X, f64> for Counted<ID> {
        const PRESENT: bool = X == ID;

        fn d1(&self, dx: &f64) -> Option<f64> {
            (X == ID).then_some(*dx)
        }
    }

    crate::absent!([const ID: usize] Counted<ID>: update, d2, d3);

    #[test]
    fn test_three_variables() {
        // (x0 + x1) * x2² at (1, 2, 3)
        let (x0, x1, x2) = (Counted::<0>::new(0.0), Counted::<1>::new(0.0), Counted::<2>::new(0.0));
        let visits = [x0.visits.clone(), x1.visits.clone(), x2.visits.clone()];
        let mut f = Finalize::new(Product::new(Sum::new(x0, x1), squared(x2)));

        f.update_variable::<0, f64>(&1.0).unwrap();
        f.update_variable::<1, f64>(&2.0).unwrap();
        f.update_variable::<2, f64>(&3.0).unwrap();
        assert_eq!(visits.each_ref().map(|v| v.get()), [1, 1, 1]);

        assert_eq!(f.d0(), 27.0);
        assert_eq!(f.d1_wrt::<0, f64>(&1.0), 9.0);
        assert_eq!(f.d1_wrt::<1, f64>(&1.0), 9.0);
        assert_eq!(f.d1_wrt::<2, f64>(&1.0), 18.0);
        assert_eq!(f.d2_wrt::<0, 2, f64, f64>(&1.0, &1.0), 6.0);
        assert_eq!(f.d2_wrt::<2, 2, f64, f64>(&1.0, &1.0), 6.0);
        assert_eq!(f.d2_wrt::<0, 1, f64, f64>(&1.0, &1.0), 0.0);

        f.update_variable::<2, f64>(&1.0).unwrap();
        assert_eq!(visits.each_ref().map(|v| v.get()), [1, 1, 2]);
        assert_eq!(f.d0(), 3.0);
    }

    #[test]
    fn test_mixed_third_derivatives() {
        // (x0 + x1) * x2² at (1, 2, 3)
        let f = Finalize::new(
            (variable::<0, f64>(1.0) + variable::<1, f64>(2.0)) * squared(variable::<2, f64>(3.0)),
        );
        assert_eq!(f.d0(), 27.0);
        assert_eq!(f.d3_wrt::<0, 2, 2, f64, f64, f64>(&1.0, &1.0, &1.0), 2.0);
        assert_eq!(f.d3_wrt::<2, 0, 2, f64, f64, f64>(&1.0, &1.0, &1.0), 2.0);
        assert_eq!(f.d3_wrt::<2, 2, 0, f64, f64, f64>(&1.0, &1.0, &1.0), 2.0);
        assert_eq!(f.d3_wrt::<2, 2, 1, f64, f64, f64>(&1.0, &1.0, &0.5), 1.0);
        assert_eq!(f.d3_wrt::<2, 2, 2, f64, f64, f64>(&1.0, &1.0, &1.0), 0.0);
        assert_eq!(f.d3_wrt::<0, 1, 2, f64, f64, f64>(&1.0, &1.0, &1.0), 0.0);
    }

    #[test]
    fn test_composition_of_variables() {
        // sin(x0 * x1)
        let (x0, x1) = (0.7, 1.3);
        let u = x0 * x1;
        let mut f = Finalize::new(
            Sin::new(0.0)
                .unwrap()
                .of(variable::<0, f64>(x0) * variable::<1, f64>(x1))
                .unwrap(),
        );

        assert_close(f.d0(), u.sin(), 1e-15);
        assert_close(f.d1_wrt::<1, f64>(&1.0), x0 * u.cos(), 1e-15);
        assert_close(f.d2_wrt::<0, 1, f64, f64>(&1.0, &1.0), u.cos() - u * u.sin(), 1e-15);
        assert_close(f.d2_wrt::<0, 0, f64, f64>(&1.0, &1.0), -x1 * x1 * u.sin(), 1e-15);
        assert_close(
            f.d3_wrt::<0, 0, 1, f64, f64, f64>(&1.0, &1.0, &1.0),
            -x1 * (u * u.cos() + 2.0 * u.sin()),
            1e-14,
        );

        f.update_variable::<1, f64>(&0.0).unwrap();
        assert_eq!(f.d0(), 0.0);
        assert_eq!(f.d1_wrt::<0, f64>(&1.0), 0.0);
        assert_eq!(f.d1_wrt::<1, f64>(&1.0), x0);
    }

    #[test]
    fn test_variables_with_operators() {
        let mut f = Finalize::new((variable::<0, f64>(1.0) + variable::<1, f64>(2.0)) * 2.0);
        assert_eq!(f.d0(), 6.0);
        f.update_variable::<1, f64>(&-1.0).unwrap();
        assert_eq!(f.d0(), 0.0);
        assert_eq!(f.d1_wrt::<1, f64>(&0.5), 1.0);
    }
}
