use std::f64::consts::{LN_10, LN_2};

use crate::errors::DomainError;

/// Natural logarithm, defined for `x > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ln {
    x: f64,
    d: [f64; 4],
}

/// Decimal logarithm, defined for `x > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Log10 {
    x: f64,
    d: [f64; 4],
}

/// Binary logarithm, defined for `x > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Log2 {
    x: f64,
    d: [f64; 4],
}

/// Derivatives of `ln(x) / base` where `base` is the natural logarithm of the base.
fn log_derivatives(function: &str, x: f64, base: f64) -> Result<[f64; 3], DomainError> {
    if x <= 0.0 {
        return Err(DomainError::out_of_domain(function, "(0, inf)", x));
    }
    let inv = 1.0 / x;
    Ok([
        inv / base,
        -inv * inv / base,
        2.0 * inv * inv * inv / base,
    ])
}

impl Ln {
    const NAME: &'static str = "ln";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        let [d1, d2, d3] = log_derivatives(Self::NAME, x, 1.0)?;
        Ok([x.ln(), d1, d2, d3])
    }
}

impl Log10 {
    const NAME: &'static str = "log10";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        let [d1, d2, d3] = log_derivatives(Self::NAME, x, LN_10)?;
        Ok([x.log10(), d1, d2, d3])
    }
}

impl Log2 {
    const NAME: &'static str = "log2";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        let [d1, d2, d3] = log_derivatives(Self::NAME, x, LN_2)?;
        Ok([x.log2(), d1, d2, d3])
    }
}

scalar_function! {
    [] Ln;
    [] Log10;
    [] Log2;
}
