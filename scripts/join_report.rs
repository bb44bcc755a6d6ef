use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use joinbench_core::{
    check_size,
    perf::{
        BenchContext, PARAM_SWEEP,
        alloc::{self, AllocStats, TrackingAllocator},
        bench_case_name,
    },
    report::{RunRecord, StrategyMetrics, load_time_stats, write_json, write_markdown},
    strategy::StrategyKind,
};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

#[global_allocator]
static GLOBAL_ALLOCATOR: TrackingAllocator = TrackingAllocator;

#[derive(Debug)]
struct Options {
    run_bench: bool,
    criterion_dir: PathBuf,
    output_dir: PathBuf,
    scales: Vec<usize>,
    memory_iterations: usize,
    timestamp: DateTime<Utc>,
}

fn main() -> Result<()> {
    let opts = parse_args(env::args().skip(1))?;
    if opts.run_bench {
        run_cargo_bench()?;
    }

    if !opts.output_dir.exists() {
        fs::create_dir_all(&opts.output_dir)
            .with_context(|| format!("create output directory {}", opts.output_dir.display()))?;
    }

    let mut metrics = Vec::new();
    let mut ctx = BenchContext::setup(opts.scales.first().copied().unwrap_or_default());
    for &scale in &opts.scales {
        ctx.ensure_scale(scale);
        for kind in StrategyKind::ALL {
            let case_name = bench_case_name(kind, scale);
            let time_stats = load_time_stats(&opts.criterion_dir, &case_name)?;
            let memory_stats = measure_allocations(&ctx, kind, opts.memory_iterations)?;
            metrics.push(StrategyMetrics::new(kind, scale, time_stats, memory_stats));
        }
    }

    let record = RunRecord::new(opts.timestamp, metrics);
    let json_path = opts.output_dir.join("latest.json");
    let report_path = opts.output_dir.join("report.md");
    write_json(&json_path, &record)?;
    write_markdown(&report_path, &record)?;

    println!("Join report updated -> {}, {}", report_path.display(), json_path.display());
    Ok(())
}

fn parse_args<I>(args: I) -> Result<Options>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = Options {
        run_bench: true,
        criterion_dir: PathBuf::from("target/criterion"),
        output_dir: PathBuf::from("target/join-report"),
        scales: PARAM_SWEEP.to_vec(),
        memory_iterations: 3,
        timestamp: Utc::now(),
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--criterion-dir" => {
                let value = iter.next().context("expected path after --criterion-dir <dir>")?;
                opts.criterion_dir = PathBuf::from(value);
            }
            "--output-dir" => {
                let value = iter.next().context("expected path after --output-dir <dir>")?;
                opts.output_dir = PathBuf::from(value);
            }
            "--scales" => {
                let value = iter.next().context("expected comma separated values after --scales")?;
                opts.scales = value
                    .split(',')
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(|s| joinbench_core::parse_scale(s).map_err(anyhow::Error::from))
                    .collect::<Result<_>>()?;
            }
            "--memory-iters" => {
                let value = iter.next().context("expected integer after --memory-iters <n>")?;
                opts.memory_iterations = value.parse().context("parse --memory-iters as positive integer")?;
            }
            "--timestamp" => {
                let value = iter.next().context("expected RFC3339 timestamp after --timestamp")?;
                opts.timestamp = DateTime::parse_from_rfc3339(&value)
                    .context("parse --timestamp as RFC3339")?
                    .with_timezone(&Utc);
            }
            "--skip-bench" => opts.run_bench = false,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                return Err(anyhow!(
                    "unknown argument '{}'. Use --help for usage information.",
                    other
                ));
            }
        }
    }

    if opts.scales.is_empty() {
        opts.scales = PARAM_SWEEP.to_vec();
    }

    Ok(opts)
}

fn print_help() {
    println!("Usage: join_report [options]");
    println!();
    println!("Options:");
    println!("  --criterion-dir <path>   Path to Criterion output (default: target/criterion)");
    println!("  --output-dir <path>      Destination directory for report.md and latest.json");
    println!("  --scales a,b,c           Scales to report (default: 1,10,100,1000,10000)");
    println!("  --memory-iters <n>       Allocation sampling iterations (default: 3)");
    println!("  --timestamp <RFC3339>    Override timestamp for this run");
    println!("  --skip-bench             Skip running cargo bench; reuse existing output");
    println!("  --help, -h               Show this help message");
}

fn run_cargo_bench() -> Result<()> {
    let status = Command::new("cargo")
        .args(["bench", "-p", "joinbench-core", "--bench", "join_bench", "--", "--noplot"])
        .status()
        .context("failed to spawn cargo bench")?;
    if !status.success() {
        return Err(anyhow!("cargo bench --bench join_bench exited with {}", status));
    }
    Ok(())
}

/// Largest per-invocation allocation figures over a warm run plus
/// `iterations` measured runs. Every run also passes the size check.
fn measure_allocations(ctx: &BenchContext, kind: StrategyKind, iterations: usize) -> Result<AllocStats> {
    ctx.run_checked(kind)?;

    let mut worst = AllocStats::default();
    for _ in 0..iterations.max(1) {
        let (result, stats) = alloc::measure(|| {
            ctx.run(kind)
                .and_then(|aggregates| check_size(&aggregates, ctx.scale()))
        });
        result.with_context(|| format!("strategy {} failed while measuring allocations", kind))?;
        worst.allocated_bytes = worst.allocated_bytes.max(stats.allocated_bytes);
        worst.allocations = worst.allocations.max(stats.allocations);
        worst.peak_bytes = worst.peak_bytes.max(stats.peak_bytes);
    }
    Ok(worst)
}
