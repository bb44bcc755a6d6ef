use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use crate::check::check_size;
use crate::dataset::Dataset;
use crate::error::JoinResult;
use crate::model::CustomerAggregate;
use crate::strategy::StrategyKind;

/// Dataset scale used by the standalone harness when none is given.
pub const DEFAULT_SCALE: usize = 1000;

/// Scales swept by the instrumented harness.
pub const PARAM_SWEEP: [usize; 5] = [1, 10, 100, 1_000, 10_000];

/// Criterion group every strategy is registered under.
pub const BENCH_GROUP: &str = "join";

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub strategy: StrategyKind,
    pub scale: usize,
    pub rows: usize,
    pub elapsed: Duration,
}

/// Holds the dataset for the current scale and hands it to strategies.
#[derive(Debug, Clone)]
pub struct BenchContext {
    dataset: Dataset,
    // False for a caller-supplied dataset, which never stands in for a scale.
    generated: bool,
}

impl BenchContext {
    pub fn setup(scale: usize) -> Self {
        debug!(scale, "benchmark setup");
        Self {
            dataset: Dataset::generate(scale),
            generated: true,
        }
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            dataset,
            generated: false,
        }
    }

    /// Regenerates the dataset when `scale` differs from the current one or
    /// the current one came from [`BenchContext::from_dataset`]. Returns
    /// whether a new dataset was built.
    pub fn ensure_scale(&mut self, scale: usize) -> bool {
        if self.generated && self.dataset.scale() == scale {
            return false;
        }
        *self = Self::setup(scale);
        true
    }

    pub fn scale(&self) -> usize {
        self.dataset.scale()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn run(&self, kind: StrategyKind) -> JoinResult<Vec<CustomerAggregate<'_>>> {
        kind.run(&self.dataset)
    }

    /// Runs one strategy, times it and applies the size check.
    pub fn run_checked(&self, kind: StrategyKind) -> Result<RunOutcome> {
        let started = Instant::now();
        let aggregates = self
            .run(kind)
            .with_context(|| format!("strategy {} failed at scale {}", kind, self.scale()))?;
        let elapsed = started.elapsed();
        check_size(&aggregates, self.scale())
            .with_context(|| format!("strategy {} produced a wrong result", kind))?;
        debug!(strategy = kind.key(), rows = aggregates.len(), ?elapsed, "strategy run");
        Ok(RunOutcome {
            strategy: kind,
            scale: self.scale(),
            rows: aggregates.len(),
            elapsed,
        })
    }

    pub fn run_all(&self) -> Result<Vec<RunOutcome>> {
        StrategyKind::ALL
            .into_iter()
            .map(|kind| self.run_checked(kind))
            .collect()
    }
}

/// Criterion case id for a strategy at one scale, e.g. `join/query_join/100`.
pub fn bench_case_name(kind: StrategyKind, scale: usize) -> String {
    format!("{}/{}/{}", BENCH_GROUP, kind.key(), scale)
}
