//! Error types for the fung crate.
//!
//! Contract violations of an expression tree (a derivative with respect to a missing variable,
//! an incompatible direction type, an inconsistent set of derivatives) are rejected while
//! building and never reach this module. What remains at runtime are domain violations of the
//! elementary functions:
//!
//! - `DomainError::OutOfDomain`: the point of evaluation lies outside the function's domain
//! - `DomainError::NonFinite`: the argument is NaN or infinite
//!
//! Combinators never inspect these errors, they hand them to the caller unchanged.

use thiserror::Error;

/// Errors that can occur when a function is evaluated at a new point.
///
/// Leaves raise these from their constructors and from `update`. Sums, products, chains and
/// all other combinators propagate them with `?`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Error when the point of evaluation is outside the domain of the function
    #[error("{function}: {value} is outside of the domain {domain}")]
    OutOfDomain {
        function: String,
        domain: &'static str,
        value: f64,
    },
    /// Error when the point of evaluation is NaN or infinite
    #[error("{function}: non-finite argument {value}")]
    NonFinite { function: String, value: f64 },
}

impl DomainError {
    pub(crate) fn out_of_domain(
        function: impl Into<String>,
        domain: &'static str,
        value: f64,
    ) -> Self {
        DomainError::OutOfDomain {
            function: function.into(),
            domain,
            value,
        }
    }

    /// Rejects NaN and infinite arguments before a leaf caches anything.
    pub(crate) fn check_finite(function: &str, value: f64) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(DomainError::NonFinite {
                function: function.to_string(),
                value,
            })
        }
    }
}
