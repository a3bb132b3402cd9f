use std::collections::TryReserveError;

use thiserror::Error;

/// Failures surfaced by the public sort entry points.
///
/// A returned error means no output was produced and the caller's input is
/// unchanged.
#[derive(Debug, Error)]
pub enum SortError {
    #[error("value {value} at index {index} does not fit in an unsigned 32-bit key")]
    InvalidValue { index: usize, value: i128 },
    #[error("failed to allocate a working buffer of {len} keys")]
    AllocationFailure {
        len: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("failed to build a worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
