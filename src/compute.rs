//! Term arithmetic for the combinator rules.
//!
//! Every term of a differentiation rule is an `Option`: `None` marks a term whose factors are not
//! all present, which therefore vanishes identically. Sums skip such terms, products vanish as
//! soon as one factor does. A rule whose terms are all `None` yields `None`, so absence
//! propagates up the tree until [`Finalize`](crate::finalize::Finalize) turns it into zero.

use std::ops::{Add, Mul};

/// Sum of two optional terms.
#[inline(always)]
pub fn sum<T: Add<Output = T>>(x: Option<T>, y: Option<T>) -> Option<T> {
    match (x, y) {
        (Some(x), Some(y)) => Some(x + y),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Sum of all present terms, `None` if no term is present.
#[inline(always)]
pub fn sum_all<T: Add<Output = T>, const N: usize>(terms: [Option<T>; N]) -> Option<T> {
    terms.into_iter().flatten().reduce(|acc, term| acc + term)
}

/// Product of two optional factors.
#[inline(always)]
pub fn product<X: Mul<Y>, Y>(x: Option<X>, y: Option<Y>) -> Option<X::Output> {
    Some(x? * y?)
}
