use std::sync::Once;

use anyhow::Context;
use clap::Parser;
use joinbench_core::{
    parse_scale,
    perf::{BenchContext, DEFAULT_SCALE},
    report::render_outcomes,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
mod main_test;

static TRACE_INIT: Once = Once::new();
const TRACE_ENV: &str = "JOINBENCH_TRACE";
const DEFAULT_TRACE_FILTER: &str = "joinbench_core=debug,joinbench=info";

#[derive(Debug, Parser)]
#[command(
    name = "joinbench",
    author,
    version,
    about = "Runs every customer/preference join strategy once and checks its output size",
    long_about = None
)]
struct CliArgs {
    /// Number of customers and preferences to generate
    #[arg(value_name = "SCALE", default_value_t = DEFAULT_SCALE, value_parser = parse_scale_arg)]
    scale: usize,
}

fn parse_scale_arg(raw: &str) -> Result<usize, String> {
    parse_scale(raw).map_err(|e| e.to_string())
}

/// What `JOINBENCH_TRACE` asks for.
#[derive(Debug, PartialEq, Eq)]
enum TraceSetting {
    Off,
    /// Use `RUST_LOG`, falling back to [`DEFAULT_TRACE_FILTER`].
    Default,
    Filter(String),
}

fn trace_setting(raw: &str) -> TraceSetting {
    let value = raw.trim();
    match value.to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "off" => TraceSetting::Off,
        "1" | "true" | "on" => TraceSetting::Default,
        _ => TraceSetting::Filter(value.to_string()),
    }
}

fn init_tracing() {
    let Ok(raw) = std::env::var(TRACE_ENV) else {
        return;
    };
    let expr = match trace_setting(&raw) {
        TraceSetting::Off => return,
        TraceSetting::Default => std::env::var("RUST_LOG").ok(),
        TraceSetting::Filter(expr) => Some(expr),
    };
    let filter = expr
        .and_then(|expr| EnvFilter::try_new(expr).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_TRACE_FILTER));

    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init();
    });
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let ctx = BenchContext::setup(args.scale);
    info!(scale = args.scale, "running join strategies");
    let outcomes = ctx
        .run_all()
        .with_context(|| format!("join benchmark failed at scale {}", args.scale))?;

    print!("{}", render_outcomes(&outcomes));
    Ok(())
}
