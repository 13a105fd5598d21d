//! Combinators building new functions from existing ones.
//!
//! Each combinator owns its operands, recomputes its cached value on every update and combines
//! the present derivatives of its operands according to the corresponding calculus rule. A
//! derivative of a combinator is present iff at least one term of its rule is present.

mod chain;
mod dot;
mod min_max;
mod product;
mod scale;
mod squared;
mod sum;

pub use chain::{chain, Chain};
pub use dot::{dot, Dot, DotOutput, InnerProduct};
pub use min_max::{max, min, Extremum, Max, Min};
pub use product::{Product, ProductOutput};
pub use scale::Scale;
pub use squared::{squared, Squared};
pub use sum::Sum;
