use rayon::prelude::*;

use crate::key::digit;

pub(crate) const BUCKETS: usize = 256;
pub(crate) const PASSES: usize = 4;

#[inline]
pub(crate) fn shift_of(pass: usize) -> u32 {
    assert!(pass < PASSES, "pass {pass} out of range for a 32-bit key");
    (pass * 8) as u32
}

/// Per-bucket key counts for one byte position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Histogram {
    counts: [usize; BUCKETS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            counts: [0; BUCKETS],
        }
    }
}

impl Histogram {
    pub(crate) fn count(src: &[u32], pass: usize) -> Self {
        let shift = shift_of(pass);

        // Four interleaved tables break the store-to-load dependency on runs of
        // equal digits.
        let mut c0 = [0usize; BUCKETS];
        let mut c1 = [0usize; BUCKETS];
        let mut c2 = [0usize; BUCKETS];
        let mut c3 = [0usize; BUCKETS];

        let mut quads = src.chunks_exact(4);
        for quad in &mut quads {
            c0[digit(quad[0], shift)] += 1;
            c1[digit(quad[1], shift)] += 1;
            c2[digit(quad[2], shift)] += 1;
            c3[digit(quad[3], shift)] += 1;
        }
        for &x in quads.remainder() {
            c0[digit(x, shift)] += 1;
        }

        let mut counts = [0usize; BUCKETS];
        for idx in 0..BUCKETS {
            counts[idx] = c0[idx] + c1[idx] + c2[idx] + c3[idx];
        }
        Self { counts }
    }

    /// One histogram per `chunk_len`-sized chunk of `src`, in chunk order.
    pub(crate) fn count_chunks(src: &[u32], pass: usize, chunk_len: usize) -> Vec<Self> {
        debug_assert!(chunk_len > 0);
        src.par_chunks(chunk_len)
            .map(|chunk| Self::count(chunk, pass))
            .collect()
    }

    pub(crate) fn merge(parts: &[Self]) -> Self {
        let mut total = Self::default();
        for part in parts {
            for (acc, &c) in total.counts.iter_mut().zip(part.counts.iter()) {
                *acc += c;
            }
        }
        total
    }

    #[inline]
    pub(crate) fn get(&self, bucket: usize) -> usize {
        self.counts[bucket]
    }

    /// Exclusive prefix sums: the first output slot of every bucket.
    pub(crate) fn offsets(&self) -> Offsets {
        let mut starts = [0usize; BUCKETS];
        let mut sum = 0usize;
        for (start, &c) in starts.iter_mut().zip(self.counts.iter()) {
            *start = sum;
            sum += c;
        }
        Offsets { starts, total: sum }
    }
}

/// Next free destination slot per bucket. Starts as the prefix-sum table and
/// advances as keys are placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Offsets {
    pub(crate) starts: [usize; BUCKETS],
    total: usize,
}

impl Offsets {
    /// Number of keys the histogram behind these offsets described.
    pub(crate) fn total(&self) -> usize {
        self.total
    }
}
