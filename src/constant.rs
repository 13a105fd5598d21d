//! Constant function and identity.

use crate::errors::DomainError;
use crate::function::{Function, Update, ARGUMENT, D1};

/// Function that ignores every update and has no derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant<T> {
    value: T,
}

impl<T> Constant<T> {
    pub fn new(value: T) -> Self {
        Constant { value }
    }
}

/// Wraps `value` into a [`Constant`].
pub fn constant<T>(value: T) -> Constant<T> {
    Constant::new(value)
}

impl<T: Clone> Function for Constant<T> {
    type Output = T;

    fn d0(&self) -> T {
        self.value.clone()
    }
}

crate::absent!([T: Clone] Constant<T>: update, update_variable, d1, d2, d3);

/// Identity `f(x) = x`. The first derivative is the direction itself, higher ones vanish.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity<T> {
    x: T,
}

impl<T> Identity<T> {
    pub fn new(x: T) -> Self {
        Identity { x }
    }
}

impl<T: Clone> Function for Identity<T> {
    type Output = T;

    fn d0(&self) -> T {
        self.x.clone()
    }
}

impl<T: Clone> Update<T> for Identity<T> {
    const PRESENT: bool = true;

    fn update(&mut self, x: &T) -> Result<(), DomainError> {
        self.x = x.clone();
        Ok(())
    }
}

impl<T: Clone, const X: usize> D1<X, T> for Identity<T> {
    const PRESENT: bool = X == ARGUMENT;

    fn d1(&self, dx: &T) -> Option<T> {
        (X == ARGUMENT).then(|| dx.clone())
    }
}

crate::absent!([T: Clone] Identity<T>: update_variable, d2, d3);
