//! Parallel evaluation of a finalized function at many points.
//!
//! The points are split into chunks that are processed in parallel with rayon. Every chunk works
//! on its own clone of the expression tree, so no state is shared between threads. A domain error
//! aborts the batch. If several points are rejected, which of their errors is returned depends on
//! the scheduling of the chunks.
//!
//! # Example
//!
//! ```rust
//! use fung::prelude::*;
//! use fung::batch::{evaluate_with_derivative, BatchOptions};
//!
//! let f = Finalize::new(Pow::<2>::new(0.0)?);
//! let points = [1.0, 2.0, 3.0];
//! let results = evaluate_with_derivative(&f, &points, &BatchOptions::default())?;
//! assert_eq!(results, vec![(1.0, 2.0), (4.0, 4.0), (9.0, 6.0)]);
//! # Ok::<(), fung::errors::DomainError>(())
//! ```

use log::debug;
use rayon::prelude::*;

use crate::errors::DomainError;
use crate::finalize::Finalize;
use crate::function::{Update, ARGUMENT, D1};

/// Options for the batch evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchOptions {
    /// Number of points per parallel task. `None` derives it from the number of points and the
    /// available parallelism.
    pub chunk_size: Option<usize>,
}

impl BatchOptions {
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        BatchOptions {
            chunk_size: Some(chunk_size),
        }
    }

    fn chunk_size(&self, points: usize) -> usize {
        self.chunk_size
            .unwrap_or_else(|| {
                let threads = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(8);
                points / (threads * 4)
            })
            .max(1)
    }
}

fn run<F, T, Arg>(
    f: &Finalize<F>,
    points: &[Arg],
    options: &BatchOptions,
    eval: impl Fn(&mut Finalize<F>, &Arg) -> Result<T, DomainError> + Sync,
) -> Result<Vec<T>, DomainError>
where
    F: Update<Arg> + Send + Sync,
    Arg: Sync,
    T: Send,
{
    let chunk_size = options.chunk_size(points.len());
    debug!(
        "evaluating {} points in chunks of {}",
        points.len(),
        chunk_size
    );

    let chunks = points
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut f = f.clone();
            chunk
                .iter()
                .map(|x| eval(&mut f, x))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(chunks.into_iter().flatten().collect())
}

/// Function values at all `points`, in order.
///
/// # Errors
/// Returns the [`DomainError`] of one of the rejected points. With several rejected points it is
/// unspecified which one.
pub fn evaluate<F, Arg>(
    f: &Finalize<F>,
    points: &[Arg],
    options: &BatchOptions,
) -> Result<Vec<F::Output>, DomainError>
where
    F: Update<Arg> + Send + Sync,
    F::Output: Send,
    Arg: Sync,
{
    run(f, points, options, |f, x| f.eval(x))
}

/// Function values and first derivatives in unit direction at all `points`, in order.
///
/// # Errors
/// Returns the [`DomainError`] of one of the rejected points. With several rejected points it is
/// unspecified which one.
pub fn evaluate_with_derivative<F>(
    f: &Finalize<F>,
    points: &[f64],
    options: &BatchOptions,
) -> Result<Vec<(f64, f64)>, DomainError>
where
    F: Update<f64, Output = f64> + D1<ARGUMENT, f64> + Send + Sync,
{
    run(f, points, options, |f, x| {
        let value = f.eval(x)?;
        Ok((value, f.d1(&1.0)))
    })
}
