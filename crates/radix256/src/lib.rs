//! Four-pass LSD radix sort (base 256) for `u32` keys.
//!
//! Every sort runs exactly four stable counting-sort passes, least significant
//! byte first, alternating between two buffers of the input's length. Cost does
//! not depend on the input order. Equal keys keep their input order.
//!
//! [`sort`] copies its input and never modifies it; [`sort_vec`] and
//! [`sort_in_place`] reuse the caller's storage instead. A [`Sorter`] built from a
//! [`SortConfig`] can spread counting and redistribution over several workers
//! without changing the output.

mod boundary;
mod error;
mod histogram;
mod key;
mod passes;
mod scatter;

use std::num::NonZeroUsize;

pub use boundary::{Sorter, sort, sort_in_place, sort_vec};
pub use error::SortError;
pub use key::IntoKey;

#[derive(Clone, Copy, Debug)]
pub struct TunedParams {
    pub parallel_threshold: usize,
    pub min_chunk_len: usize,
}

pub const TUNED_PARAMS: TunedParams = TunedParams {
    parallel_threshold: 1 << 17,
    min_chunk_len: 1 << 14,
};

/// Worker model for the counting and redistribution steps of each pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Parallelism {
    #[default]
    Sequential,
    /// Chunks run on rayon's global pool.
    Global,
    /// Chunks run on a pool of this many threads built for the call.
    Workers(NonZeroUsize),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SortConfig {
    pub parallelism: Parallelism,
    /// Inputs shorter than this are always sorted sequentially.
    pub parallel_threshold: usize,
    pub min_chunk_len: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            parallelism: Parallelism::Sequential,
            parallel_threshold: TUNED_PARAMS.parallel_threshold,
            min_chunk_len: TUNED_PARAMS.min_chunk_len,
        }
    }
}

impl SortConfig {
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn with_min_chunk_len(mut self, min_chunk_len: usize) -> Self {
        self.min_chunk_len = min_chunk_len;
        self
    }

    /// `0` means sequential.
    pub fn with_workers(self, workers: usize) -> Self {
        let parallelism =
            NonZeroUsize::new(workers).map_or(Parallelism::Sequential, Parallelism::Workers);
        self.with_parallelism(parallelism)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn configs() -> Vec<(&'static str, Sorter)> {
        let eager = SortConfig::default()
            .with_parallel_threshold(0)
            .with_min_chunk_len(64);
        vec![
            ("sequential", Sorter::default()),
            (
                "global",
                Sorter::new(eager.with_parallelism(Parallelism::Global)),
            ),
            ("workers_1", Sorter::new(eager.with_workers(1))),
            ("workers_4", Sorter::new(eager.with_workers(4))),
        ]
    }

    fn assert_sorts_like_std(data: &[u32]) {
        let mut expected = data.to_vec();
        expected.sort_unstable();

        for (name, sorter) in configs() {
            assert_eq!(
                sorter.sort(data).unwrap(),
                expected,
                "config={name} entry=sort input_len={}",
                data.len(),
            );
            assert_eq!(
                sorter.sort_vec(data.to_vec()).unwrap(),
                expected,
                "config={name} entry=sort_vec input_len={}",
                data.len(),
            );
            let mut in_place = data.to_vec();
            sorter.sort_in_place(&mut in_place).unwrap();
            assert_eq!(
                in_place,
                expected,
                "config={name} entry=sort_in_place input_len={}",
                data.len(),
            );
        }
    }

    #[test]
    fn edge_cases() {
        let cases = [
            vec![],
            vec![42],
            vec![1, 2, 3, 4, 5, 6],
            vec![6, 5, 4, 3, 2, 1],
            vec![7; 128],
            vec![u32::MIN, 1, u32::MAX, 0, u32::MAX - 1, 2],
            vec![5, 5, 3, 3, 1, 1, 4, 4, 2, 2, 0, 0],
            vec![0x0100_0000, 0x0001_0000, 0x0000_0100, 0x0000_0001],
        ];

        for case in &cases {
            assert_sorts_like_std(case);
        }
    }

    #[test]
    fn fixed_seed_random_cases() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        for &size in &[2_usize, 3, 8, 31, 32, 63, 64, 127, 128, 511, 2048, 10_000] {
            let data: Vec<u32> = (0..size).map(|_| rng.random::<u32>()).collect();
            assert_sorts_like_std(&data);
        }
    }

    #[test]
    fn fixed_seed_many_duplicates() {
        let mut rng = StdRng::seed_from_u64(0xD0D1_2026);
        for &size in &[64_usize, 1024, 4096] {
            let data: Vec<u32> = (0..size).map(|_| (rng.random::<u32>() % 16) * 17).collect();
            assert_sorts_like_std(&data);
        }
    }

    #[test]
    fn presorted_and_reversed() {
        // 4999 * 859_000 stays below u32::MAX, so the top byte varies too.
        let ascending: Vec<u32> = (0..5_000_u32).map(|x| x * 859_000).collect();
        assert!(ascending.windows(2).all(|w| w[0] < w[1]));
        assert!(*ascending.last().unwrap() > 0xFF00_0000);
        let descending: Vec<u32> = ascending.iter().rev().copied().collect();
        assert_sorts_like_std(&ascending);
        assert_sorts_like_std(&descending);
    }

    #[test]
    fn duplicates_keep_original_order() {
        assert_eq!(sort(&[5_u32, 3, 5, 1, 3]).unwrap(), vec![1, 3, 3, 5, 5]);

        let tagged: Vec<u32> = [5_u32, 3, 5, 1, 3]
            .iter()
            .enumerate()
            .map(|(i, &v)| (v << 16) | i as u32)
            .collect();
        let order: Vec<u32> = sort(&tagged)
            .unwrap()
            .into_iter()
            .map(|x| x & 0xFFFF)
            .collect();
        assert_eq!(order, vec![3, 1, 4, 0, 2]);
    }

    #[test]
    fn input_is_left_untouched() {
        let input = vec![9_u64, 4, 7, 1];
        let sorted = sort(&input).unwrap();
        assert_eq!(sorted, vec![1, 4, 7, 9]);
        assert_eq!(input, vec![9, 4, 7, 1]);
    }

    #[test]
    fn range_boundaries() {
        assert_eq!(sort(&[u32::MAX as u64, 0]).unwrap(), vec![0, u32::MAX]);
        assert_eq!(sort(&[0_u64, u32::MAX as u64]).unwrap(), vec![0, u32::MAX]);

        match sort(&[3_u64, 1 << 32, 2]) {
            Err(SortError::InvalidValue { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, 1_i128 << 32);
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
        match sort(&[3_i64, 2, -1, -7]) {
            Err(SortError::InvalidValue { index, value }) => {
                assert_eq!(index, 2);
                assert_eq!(value, -1);
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn invalid_value_message_names_position() {
        let err = sort(&[-5_i32]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "value -5 at index 0 does not fit in an unsigned 32-bit key"
        );
    }

    #[test]
    fn stable_for_equal_keys() {
        // The low half holds the original index. Passes 2 and 3 only look at the
        // high half, so the output is sorted only if they keep the index order
        // left by passes 0 and 1.
        let mut rng = StdRng::seed_from_u64(0x57AB_2026);
        let groups: Vec<u32> = (0..4096).map(|_| rng.random_range(0..8_u32)).collect();
        let tagged: Vec<u32> = groups
            .iter()
            .enumerate()
            .map(|(i, &g)| (g << 16) | i as u32)
            .collect();
        let sorted = sort(&tagged).unwrap();
        for pair in sorted.windows(2) {
            let (g0, i0) = (pair[0] >> 16, pair[0] & 0xFFFF);
            let (g1, i1) = (pair[1] >> 16, pair[1] & 0xFFFF);
            assert!(g0 < g1 || (g0 == g1 && i0 < i1));
        }
    }

    #[test]
    fn idempotent() {
        let mut rng = StdRng::seed_from_u64(0x1D3E_2026);
        let data: Vec<u32> = (0..3000).map(|_| rng.random::<u32>()).collect();
        let once = sort(&data).unwrap();
        let twice = sort(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn million_random_keys_keep_counts() {
        let mut rng = StdRng::seed_from_u64(0x0001_0000_2026);
        let data: Vec<u32> = (0..1_000_000).map(|_| rng.random::<u32>()).collect();

        let sorter = Sorter::new(SortConfig::default().with_parallelism(Parallelism::Global));
        let sorted = sorter.sort(&data).unwrap();
        assert_eq!(sorted.len(), data.len());
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

        let mut before: HashMap<u32, usize> = HashMap::new();
        for &x in &data {
            *before.entry(x).or_default() += 1;
        }
        let mut after: HashMap<u32, usize> = HashMap::new();
        for &x in &sorted {
            *after.entry(x).or_default() += 1;
        }
        assert_eq!(before, after);
        assert_eq!(sorted, sort(&data).unwrap());
    }

    #[test]
    fn workers_zero_means_sequential() {
        let config = SortConfig::default().with_workers(0);
        assert_eq!(config.parallelism, Parallelism::Sequential);
        let config = SortConfig::default().with_workers(3);
        assert_eq!(
            config.parallelism,
            Parallelism::Workers(NonZeroUsize::new(3).unwrap())
        );
    }
}
