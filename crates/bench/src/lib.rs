use std::time::Duration;

use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, SamplingMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 3000;
const RNG_SEED: u64 = 0x5EED_2026;
const FEW_UNIQUE_VALUES: u32 = 16;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.sampling_mode(SamplingMode::Flat);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

/// Picks a runtime preset by input length.
pub fn apply_runtime_for_len<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, len: usize) {
    if len <= 1 << 16 {
        apply_small_runtime_config(group);
    } else if len <= 1 << 20 {
        apply_medium_runtime_config(group);
    } else {
        apply_large_runtime_config(group);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Distribution {
    Uniform,
    Sorted,
    Reverse,
    NearlySorted1pctSwaps,
    FewUnique,
}

impl Distribution {
    pub const ALL: [Self; 5] = [
        Self::Uniform,
        Self::Sorted,
        Self::Reverse,
        Self::NearlySorted1pctSwaps,
        Self::FewUnique,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Sorted => "sorted",
            Self::Reverse => "reverse",
            Self::NearlySorted1pctSwaps => "nearly_sorted_1pct_swaps",
            Self::FewUnique => "few_unique",
        }
    }
}

/// `len` keys drawn from `dist`, reproducible from `seed`.
pub fn generate(dist: Distribution, len: usize, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);

    match dist {
        Distribution::Uniform => (0..len).map(|_| rng.random::<u32>()).collect(),
        Distribution::Sorted => spread(len).collect(),
        Distribution::Reverse => {
            let mut data: Vec<u32> = spread(len).collect();
            data.reverse();
            data
        }
        Distribution::NearlySorted1pctSwaps => {
            let mut data: Vec<u32> = spread(len).collect();
            if len > 0 {
                let swaps = (len / 100).max(1);
                for _ in 0..swaps {
                    let a = rng.random_range(0..len);
                    let b = rng.random_range(0..len);
                    data.swap(a, b);
                }
            }
            data
        }
        Distribution::FewUnique => (0..len)
            .map(|_| rng.random_range(0..FEW_UNIQUE_VALUES).wrapping_mul(0x9E37_79B9))
            .collect(),
    }
}

/// Non-decreasing keys covering the whole `u32` range, so every byte varies.
fn spread(len: usize) -> impl Iterator<Item = u32> {
    let step = (u32::MAX as u64 / (len.max(1) as u64)).max(1);
    (0..len as u64).map(move |i| (i * step).min(u32::MAX as u64) as u32)
}

#[inline]
pub fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub fn seed_for(dist: Distribution, len: usize, salt: u64) -> u64 {
    let d = dist as u64 + 11;
    mix_seed(RNG_SEED ^ (d << 48) ^ (len as u64) ^ salt)
}
