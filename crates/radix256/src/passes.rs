use rayon::ThreadPool;
use tracing::trace;

use crate::histogram::{Histogram, PASSES};
use crate::scatter::{scatter, scatter_chunks};

// The sorted keys end up back in the primary buffer only for an even pass count.
const _: () = assert!(PASSES % 2 == 0);

/// Where a sort call is in its life. Calls move strictly forward through these.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Stage {
    Received,
    Allocated,
    Pass0,
    Pass1,
    Pass2,
    Pass3,
    Returned,
}

impl Stage {
    pub(crate) fn next(self) -> Option<Self> {
        match self {
            Self::Received => Some(Self::Allocated),
            Self::Allocated => Some(Self::Pass0),
            Self::Pass0 => Some(Self::Pass1),
            Self::Pass1 => Some(Self::Pass2),
            Self::Pass2 => Some(Self::Pass3),
            Self::Pass3 => Some(Self::Returned),
            Self::Returned => None,
        }
    }

    /// The stage a call is in while running byte pass `pass`.
    pub(crate) fn of_pass(pass: usize) -> Option<Self> {
        match pass {
            0 => Some(Self::Pass0),
            1 => Some(Self::Pass1),
            2 => Some(Self::Pass2),
            3 => Some(Self::Pass3),
            _ => None,
        }
    }
}

// One named stage per byte of a 32-bit key.
const _: () = assert!(PASSES == 4);

/// How each pass is executed.
#[derive(Clone, Copy)]
pub(crate) enum Plan<'p> {
    Sequential,
    Chunked {
        chunk_len: usize,
        pool: Option<&'p ThreadPool>,
    },
}

/// Runs the four byte passes, ping-ponging between `primary` and `scratch`.
/// The sorted keys are left in `primary`.
pub(crate) fn run_passes(primary: &mut [u32], scratch: &mut [u32], plan: Plan<'_>) {
    assert!(
        scratch.len() >= primary.len(),
        "capacity mismatch: scratch holds {} keys, primary has {}",
        scratch.len(),
        primary.len(),
    );
    let n = primary.len();
    if n <= 1 {
        return;
    }
    let scratch = &mut scratch[..n];

    match plan {
        Plan::Sequential => ping_pong(primary, scratch, |src, dst, pass| {
            let mut offsets = Histogram::count(src, pass).offsets();
            scatter(src, dst, &mut offsets, pass);
        }),
        Plan::Chunked { chunk_len, pool } => {
            let chunked = |src: &[u32], dst: &mut [u32], pass: usize| {
                let parts = Histogram::count_chunks(src, pass, chunk_len);
                scatter_chunks(src, dst, &parts, chunk_len, pass);
            };
            match pool {
                Some(pool) => pool.install(|| ping_pong(primary, scratch, chunked)),
                None => ping_pong(primary, scratch, chunked),
            }
        }
    }
}

fn ping_pong<'a, F>(primary: &'a mut [u32], scratch: &'a mut [u32], mut pass_fn: F)
where
    F: FnMut(&[u32], &mut [u32], usize),
{
    let mut src = primary;
    let mut dst = scratch;
    let mut stage = Stage::Allocated;
    for pass in 0..PASSES {
        stage = stage.next().unwrap_or(stage);
        debug_assert_eq!(Some(stage), Stage::of_pass(pass));
        trace!(?stage, len = src.len(), "running pass");
        pass_fn(&*src, &mut *dst, pass);
        std::mem::swap(&mut src, &mut dst);
    }
    debug_assert_eq!(stage, Stage::Pass3);
}
