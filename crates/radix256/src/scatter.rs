use rayon::prelude::*;

use crate::histogram::{BUCKETS, Histogram, Offsets, shift_of};
use crate::key::digit;

/// Stable counting-sort redistribution of `src` into `dst` on byte `pass`.
///
/// `offsets` must come from a histogram over `src` for the same pass; on return
/// each entry points one past the last slot written for its bucket.
pub(crate) fn scatter(src: &[u32], dst: &mut [u32], offsets: &mut Offsets, pass: usize) {
    assert!(
        dst.len() >= src.len(),
        "capacity mismatch: destination holds {} keys, source has {}",
        dst.len(),
        src.len(),
    );
    assert_eq!(
        offsets.total(),
        src.len(),
        "offsets describe a different number of keys than the source",
    );

    let shift = shift_of(pass);
    let dst = &mut dst[..src.len()];
    let starts = &mut offsets.starts;
    for &x in src {
        let bucket = digit(x, shift);
        let pos = starts[bucket];
        dst[pos] = x;
        starts[bucket] = pos + 1;
    }
}

/// Two-level parallel redistribution.
///
/// `parts[c]` is the histogram of the `c`-th `chunk_len`-sized chunk of `src`.
/// The destination is carved bucket-major, chunk-minor, so chunk `c` owns the
/// slots of bucket `b` that follow every earlier chunk's keys of that bucket.
/// Chunks then write in parallel into their own slices, which keeps the
/// redistribution stable.
pub(crate) fn scatter_chunks(
    src: &[u32],
    dst: &mut [u32],
    parts: &[Histogram],
    chunk_len: usize,
    pass: usize,
) {
    assert!(
        dst.len() >= src.len(),
        "capacity mismatch: destination holds {} keys, source has {}",
        dst.len(),
        src.len(),
    );
    assert_eq!(parts.len(), src.len().div_ceil(chunk_len));
    let base = Histogram::merge(parts).offsets();
    assert_eq!(
        base.total(),
        src.len(),
        "chunk histograms describe a different number of keys than the source",
    );

    let shift = shift_of(pass);
    let mut slots: Vec<Vec<&mut [u32]>> = (0..parts.len())
        .map(|_| Vec::with_capacity(BUCKETS))
        .collect();
    let mut rest = &mut dst[..src.len()];
    for bucket in 0..BUCKETS {
        debug_assert_eq!(src.len() - rest.len(), base.starts[bucket]);
        for (chunk_slots, part) in slots.iter_mut().zip(parts) {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(part.get(bucket));
            chunk_slots.push(head);
            rest = tail;
        }
    }
    debug_assert!(rest.is_empty());

    src.par_chunks(chunk_len)
        .zip(slots.into_par_iter())
        .for_each(|(chunk, mut buckets)| {
            let mut cursors = [0usize; BUCKETS];
            for &x in chunk {
                let bucket = digit(x, shift);
                buckets[bucket][cursors[bucket]] = x;
                cursors[bucket] += 1;
            }
        });
}
