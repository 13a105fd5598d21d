use crate::errors::DomainError;

/// Sine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sin {
    x: f64,
    d: [f64; 4],
}

/// Cosine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cos {
    x: f64,
    d: [f64; 4],
}

/// Tangent, defined where `cos(x) != 0`.
///
/// `cos(x)` is never exactly zero for a finite `f64`, so arguments with `|cos(x)| < f64::EPSILON`
/// (the representable neighbours of the poles) are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tan {
    x: f64,
    d: [f64; 4],
}

/// Arc sine on the open interval `(-1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSin {
    x: f64,
    d: [f64; 4],
}

/// Arc cosine on the open interval `(-1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCos {
    x: f64,
    d: [f64; 4],
}

impl Sin {
    const NAME: &'static str = "sin";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        let (sin, cos) = x.sin_cos();
        Ok([sin, cos, -sin, -cos])
    }
}

impl Cos {
    const NAME: &'static str = "cos";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        let (sin, cos) = x.sin_cos();
        Ok([cos, -sin, -cos, sin])
    }
}

impl Tan {
    const NAME: &'static str = "tan";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        if x.cos().abs() < f64::EPSILON {
            return Err(DomainError::out_of_domain(Self::NAME, "|cos(x)| >= eps", x));
        }
        let tan = x.tan();
        let sec2 = 1.0 + tan * tan;
        Ok([
            tan,
            sec2,
            2.0 * tan * sec2,
            2.0 * sec2 * (sec2 + 2.0 * tan * tan),
        ])
    }
}

/// `1 / sqrt(1 - x^2)` and its first two derivatives, shared by arc sine and arc cosine.
fn arc_derivatives(function: &str, x: f64) -> Result<[f64; 3], DomainError> {
    if x.abs() >= 1.0 {
        return Err(DomainError::out_of_domain(function, "(-1, 1)", x));
    }
    let r = 1.0 - x * x;
    let s = r.sqrt();
    Ok([1.0 / s, x / (r * s), (1.0 + 2.0 * x * x) / (r * r * s)])
}

impl ArcSin {
    const NAME: &'static str = "asin";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        let [d1, d2, d3] = arc_derivatives(Self::NAME, x)?;
        Ok([x.asin(), d1, d2, d3])
    }
}

impl ArcCos {
    const NAME: &'static str = "acos";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        let [d1, d2, d3] = arc_derivatives(Self::NAME, x)?;
        Ok([x.acos(), -d1, -d2, -d3])
    }
}

scalar_function! {
    [] Sin;
    [] Cos;
    [] Tan;
    [] ArcSin;
    [] ArcCos;
}
