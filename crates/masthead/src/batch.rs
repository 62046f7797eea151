//! Chunked, rate-limited execution of per-item work.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Counts for one batched run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub batches: usize,
}

/// Outcomes in input order plus the folded summary.
#[derive(Debug)]
pub struct BatchRun<T> {
    pub outcomes: Vec<anyhow::Result<T>>,
    pub summary: RunSummary,
}

/// Run `f` over `items` in contiguous chunks of `batch_size`.
///
/// Items within a chunk run concurrently and independently; `cooldown` is
/// awaited after every chunk, including the last.
pub async fn run_batches<I, T, F, Fut>(
    items: Vec<I>,
    batch_size: usize,
    cooldown: Duration,
    f: F,
) -> BatchRun<T>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let batch_size = batch_size.max(1);
    let mut summary = RunSummary {
        requested: items.len(),
        ..Default::default()
    };
    let mut outcomes = Vec::with_capacity(items.len());

    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        let chunk: Vec<I> = items.by_ref().take(batch_size).collect();
        summary.batches += 1;
        debug!("batch {} with {} items", summary.batches, chunk.len());

        let results = join_all(chunk.into_iter().map(&f)).await;
        for result in results {
            match &result {
                Ok(_) => summary.succeeded += 1,
                Err(_) => summary.failed += 1,
            }
            outcomes.push(result);
        }

        if !cooldown.is_zero() {
            tokio::time::sleep(cooldown).await;
        }
    }

    BatchRun { outcomes, summary }
}
