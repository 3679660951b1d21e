//! Parallel per-file execution.
//!
//! Each file is independent, so a batch is a plain parallel map on a dedicated rayon pool.
//! Results come back in input order whatever order the workers finish in.

use std::path::PathBuf;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::diagnostic::Diagnostic;
use crate::error::{Error, Result};

/// Result of processing one file in a batch.
#[derive(Debug)]
pub struct Outcome<T> {
    pub path: PathBuf,
    pub result: Result<T>,
}

/// Everything a batch produced. A failed file never stops its siblings.
#[derive(Debug)]
pub struct BatchReport<T> {
    pub outcomes: Vec<Outcome<T>>,

    /// Batch-level anomalies (e.g. unpaired files).
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> BatchReport<T> {
    pub fn failures(&self) -> impl Iterator<Item = &Outcome<T>> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }
}

/// Run `f` over every item on a pool of `jobs` threads (default: one per CPU).
///
/// Fails only if the pool cannot be started; per-item failures belong in `R`.
pub fn run_parallel<T, R, F>(items: &[T], jobs: Option<usize>, f: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    let threads = jobs.unwrap_or_else(num_cpus::get).max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("atc-vtt-worker-{i}"))
        .build()
        .map_err(|e| Error::msg(format!("failed to start worker pool: {e}")))?;

    Ok(pool.install(|| items.par_iter().map(f).collect()))
}
