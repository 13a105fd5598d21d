use crate::errors::DomainError;

/// Power function `x^(K/L)` with a rational exponent.
///
/// Integer exponents (`L = 1`) are evaluated with `powi` and accept negative arguments, other
/// exponents are evaluated with `powf` and require `x >= 0`. At `x = 0` every derivative whose
/// exponent would be negative must vanish identically, otherwise `x = 0` is rejected.
///
/// ```rust
/// use fung::prelude::*;
///
/// let f = Finalize::new(Pow::<3>::new(2.0)?);
/// assert_eq!((f.d0(), f.d1(&1.0), f.d2(&1.0, &1.0), f.d3(&1.0, &1.0, &1.0)), (8.0, 12.0, 12.0, 6.0));
/// # Ok::<(), fung::errors::DomainError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pow<const K: i32, const L: i32 = 1> {
    x: f64,
    d: [f64; 4],
}

/// Square root, defined for `x >= 0`. The derivatives are infinite at `x = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sqrt {
    x: f64,
    d: [f64; 4],
}

/// Cube root. The derivatives are infinite at `x = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cbrt {
    x: f64,
    d: [f64; 4],
}

impl<const K: i32, const L: i32> Pow<K, L> {
    const NAME: &'static str = "pow";

    /// The exponent `K/L`.
    pub fn exponent() -> f64 {
        K as f64 / L as f64
    }

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        const { assert!(L > 0, "The denominator of the exponent must be positive.") };
        if L != 1 && x < 0.0 {
            return Err(DomainError::out_of_domain(Self::NAME, "[0, inf)", x));
        }

        let k = Self::exponent();
        let coefficients = [1.0, k, k * (k - 1.0), k * (k - 1.0) * (k - 2.0)];
        let mut d = [0.0; 4];
        for (j, (d, c)) in d.iter_mut().zip(coefficients).enumerate() {
            if c == 0.0 {
                continue;
            }
            let exponent = k - j as f64;
            if x == 0.0 && exponent < 0.0 {
                return Err(DomainError::out_of_domain(Self::NAME, "x != 0", x));
            }
            *d = if L == 1 {
                c * x.powi(K - j as i32)
            } else {
                c * x.powf(exponent)
            };
        }
        Ok(d)
    }
}

impl Sqrt {
    const NAME: &'static str = "sqrt";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        if x < 0.0 {
            return Err(DomainError::out_of_domain(Self::NAME, "[0, inf)", x));
        }
        let s = x.sqrt();
        Ok([s, 0.5 / s, -0.25 / (x * s), 0.375 / (x * x * s)])
    }
}

impl Cbrt {
    const NAME: &'static str = "cbrt";

    fn derivatives(x: f64) -> Result<[f64; 4], DomainError> {
        let c = x.cbrt();
        let c2 = c * c;
        let c4 = c2 * c2;
        Ok([
            c,
            1.0 / (3.0 * c2),
            -2.0 / (9.0 * c4 * c),
            10.0 / (27.0 * c4 * c4),
        ])
    }
}

scalar_function! {
    [const K: i32, const L: i32] Pow<K, L>;
    [] Sqrt;
    [] Cbrt;
}
