use std::time::{Duration, Instant};

use anyhow::{Context, Result, ensure};
use bench::{Distribution, generate, mix_seed};
use clap::{Parser, ValueEnum};
use radix256::{SortConfig, Sorter};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "radix256-bench",
    about = "Times the radix256 sorter against the standard library sorts",
    version
)]
struct Cli {
    /// Number of keys to sort
    #[arg(long, default_value_t = 100_000_000)]
    size: usize,

    /// Seed for the data generator
    #[arg(long, default_value_t = 0x5EED_2026)]
    seed: u64,

    /// Key distribution
    #[arg(long, value_enum, default_value_t = DistributionArg::Uniform)]
    distribution: DistributionArg,

    /// Worker threads for the radix sort; 0 sorts sequentially
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Only time the radix sort
    #[arg(long)]
    skip_std: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DistributionArg {
    Uniform,
    Sorted,
    Reverse,
    NearlySorted,
    FewUnique,
}

impl From<DistributionArg> for Distribution {
    fn from(arg: DistributionArg) -> Self {
        match arg {
            DistributionArg::Uniform => Self::Uniform,
            DistributionArg::Sorted => Self::Sorted,
            DistributionArg::Reverse => Self::Reverse,
            DistributionArg::NearlySorted => Self::NearlySorted1pctSwaps,
            DistributionArg::FewUnique => Self::FewUnique,
        }
    }
}

fn timed<T>(label: &str, f: impl FnOnce() -> T) -> (T, Duration) {
    println!("Benchmarking {label}...");
    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed();
    println!("{label}: {:.4}s", elapsed.as_secs_f64());
    (out, elapsed)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dist = Distribution::from(cli.distribution);

    println!("Generating {} {} u32 keys...", cli.size, dist.label());
    let data = generate(dist, cli.size, mix_seed(cli.seed));
    info!(len = data.len(), seed = cli.seed, "dataset ready");

    let sorter = Sorter::new(SortConfig::default().with_workers(cli.workers));
    info!(config = ?sorter.config(), "sorter configured");

    let (sorted, radix_time) = timed("radix256 sort", || sorter.sort(&data));
    let sorted = sorted.context("radix256 sort failed")?;

    if cli.skip_std {
        ensure!(
            sorted.windows(2).all(|w| w[0] <= w[1]),
            "radix256 output is not sorted"
        );
        return Ok(());
    }

    let mut stable = data.clone();
    let ((), stable_time) = timed("std::slice::sort", || stable.sort());
    let mut unstable = data;
    let ((), unstable_time) = timed("std::slice::sort_unstable", || unstable.sort_unstable());

    ensure!(sorted == stable, "radix256 output differs from std::slice::sort");
    ensure!(stable == unstable, "std sorts disagree");

    println!(
        "speedup vs sort: {:.2}x, vs sort_unstable: {:.2}x",
        stable_time.as_secs_f64() / radix_time.as_secs_f64().max(f64::EPSILON),
        unstable_time.as_secs_f64() / radix_time.as_secs_f64().max(f64::EPSILON),
    );
    Ok(())
}
