use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::passes::{Plan, Stage, run_passes};
use crate::{IntoKey, Parallelism, SortConfig, SortError};

/// Sorts `u32` keys with a fixed [`SortConfig`].
///
/// Each call allocates its own working buffers (and, for
/// [`Parallelism::Workers`], its own thread pool), so a `Sorter` can be shared
/// between threads freely.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sorter {
    config: SortConfig,
}

impl Sorter {
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Copies `input` into a fresh buffer, sorts it, and returns it. `input` is
    /// never modified.
    ///
    /// # Errors
    ///
    /// [`SortError::InvalidValue`] for the first element outside `0..=u32::MAX`,
    /// [`SortError::AllocationFailure`] if a working buffer cannot be reserved,
    /// [`SortError::ThreadPool`] if a dedicated worker pool cannot be built.
    pub fn sort<T: IntoKey>(&self, input: &[T]) -> Result<Vec<u32>, SortError> {
        let n = input.len();
        debug!(stage = ?Stage::Received, len = n, "sort");
        if n == 0 {
            return Ok(Vec::new());
        }

        if let Some((index, &value)) = input
            .iter()
            .enumerate()
            .find(|(_, v)| v.into_key().is_none())
        {
            return Err(SortError::InvalidValue {
                index,
                value: value.widen(),
            });
        }

        let pool = self.pool_for(n)?;
        let mut primary = reserve(n)?;
        primary.extend(input.iter().filter_map(|v| v.into_key()));
        debug_assert_eq!(primary.len(), n);
        let mut scratch = zeroed(n)?;
        debug!(stage = ?Stage::Allocated, len = n, "buffers ready");

        run_passes(&mut primary, &mut scratch, self.plan(n, pool.as_ref()));
        debug!(stage = ?Stage::Returned, len = n, "sort");
        Ok(primary)
    }

    /// Sorts `keys`, reusing its allocation as the primary buffer. Only the
    /// scratch buffer is allocated.
    pub fn sort_vec(&self, mut keys: Vec<u32>) -> Result<Vec<u32>, SortError> {
        self.sort_in_place(&mut keys)?;
        Ok(keys)
    }

    /// Sorts `keys` in place. One scratch buffer of `keys.len()` is allocated
    /// for the duration of the call. On error `keys` is left untouched.
    pub fn sort_in_place(&self, keys: &mut [u32]) -> Result<(), SortError> {
        let n = keys.len();
        debug!(stage = ?Stage::Received, len = n, "sort in place");
        if n <= 1 {
            return Ok(());
        }

        let pool = self.pool_for(n)?;
        let mut scratch = zeroed(n)?;
        debug!(stage = ?Stage::Allocated, len = n, "scratch ready");

        run_passes(keys, &mut scratch, self.plan(n, pool.as_ref()));
        debug!(stage = ?Stage::Returned, len = n, "sort in place");
        Ok(())
    }

    fn chunked(&self, n: usize) -> bool {
        !matches!(self.config.parallelism, Parallelism::Sequential)
            && n >= self.config.parallel_threshold
    }

    fn pool_for(&self, n: usize) -> Result<Option<ThreadPool>, SortError> {
        match self.config.parallelism {
            Parallelism::Workers(workers) if self.chunked(n) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(workers.get())
                    .thread_name(|i| format!("radix256-{i}"))
                    .build()?;
                Ok(Some(pool))
            }
            _ => Ok(None),
        }
    }

    fn plan<'p>(&self, n: usize, pool: Option<&'p ThreadPool>) -> Plan<'p> {
        if !self.chunked(n) {
            return Plan::Sequential;
        }
        let workers = match (self.config.parallelism, pool) {
            (_, Some(pool)) => pool.current_num_threads(),
            (Parallelism::Workers(workers), None) => workers.get(),
            _ => rayon::current_num_threads(),
        };
        let chunk_len = n
            .div_ceil(workers.max(1))
            .max(self.config.min_chunk_len)
            .max(1);
        debug!(workers, chunk_len, "chunked passes");
        Plan::Chunked { chunk_len, pool }
    }
}

fn reserve(len: usize) -> Result<Vec<u32>, SortError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| SortError::AllocationFailure { len, source })?;
    Ok(buf)
}

fn zeroed(len: usize) -> Result<Vec<u32>, SortError> {
    let mut buf = reserve(len)?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Sorts a copy of `input` with the default (sequential) configuration.
///
/// ```
/// let sorted = radix256::sort(&[5_u64, 3, 5, 1, 3]).unwrap();
/// assert_eq!(sorted, vec![1, 3, 3, 5, 5]);
///
/// assert!(radix256::sort(&[1_i64, -1]).is_err());
/// ```
pub fn sort<T: IntoKey>(input: &[T]) -> Result<Vec<u32>, SortError> {
    Sorter::default().sort(input)
}

/// Sorts `keys` with the default configuration, reusing its allocation.
///
/// ```
/// let sorted = radix256::sort_vec(vec![5, 2, 9, 1, 5, 6]).unwrap();
/// assert_eq!(sorted, vec![1, 2, 5, 5, 6, 9]);
/// ```
pub fn sort_vec(keys: Vec<u32>) -> Result<Vec<u32>, SortError> {
    Sorter::default().sort_vec(keys)
}

/// Sorts `keys` in place with the default configuration.
///
/// ```
/// let mut keys = [5, 2, 9, 1, 5, 6];
/// radix256::sort_in_place(&mut keys).unwrap();
/// assert_eq!(keys, [1, 2, 5, 5, 6, 9]);
/// ```
pub fn sort_in_place(keys: &mut [u32]) -> Result<(), SortError> {
    Sorter::default().sort_in_place(keys)
}
