//! # Event Pipeline
//!
//! Four ordered stages connected by order-preserving queues, each running as
//! an independent task, plus the supervisor that wires them together:
//!
//! ```text
//! raw buffers ──▶ Decoder ──▶ Filter/Processor ──▶ Print Preparer ──▶ Sink
//!                    │               │                    │             │
//!                    └───────────────┴──── error fan-in ──┴─────────────┘
//!                                          │
//!                                          ▼
//!                                    error handler
//! ```
//!
//! Every inter-stage queue has exactly one producer and one consumer, so the
//! relative order of surviving events always matches decode order. A shared
//! cancellation token is observed at every blocking point; cancelling drops
//! in-flight events and lets every worker exit without flushing.
//!
//! No data error stops the stream: stages report on their own error streams
//! and continue. The pipeline ends only when the source closes or the token
//! is cancelled.

mod decode;
mod prepare;
mod process;
mod sink;

use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::PipelineConfig;
use crate::domain::PipelineError;
use crate::policy::{ErrorHandler, EventPolicy, EventRenderer, NameTable};
use crate::stacktrace::{StackResolver, StackTraceTable};
use crate::stats::Stats;

/// Everything the pipeline borrows from the embedding tool.
pub struct Collaborators {
    pub policy: Arc<dyn EventPolicy>,
    pub names: Arc<dyn NameTable>,
    pub stacks: Arc<dyn StackTraceTable>,
    pub renderer: Arc<dyn EventRenderer>,
    pub errors: Arc<dyn ErrorHandler>,
}

/// The assembled pipeline, ready to run once.
pub struct Pipeline {
    source: mpsc::Receiver<Vec<u8>>,
    collab: Collaborators,
    config: PipelineConfig,
    stats: Arc<Stats>,
}

impl Pipeline {
    /// Wire a pipeline to a raw-buffer source and its collaborators.
    #[must_use]
    pub fn new(
        source: mpsc::Receiver<Vec<u8>>,
        collab: Collaborators,
        config: PipelineConfig,
    ) -> Self {
        Self { source, collab, config, stats: Arc::new(Stats::default()) }
    }

    /// Shared counters, readable while the pipeline runs.
    #[must_use]
    pub fn stats(&self) -> Arc<Stats> {
        Arc::clone(&self.stats)
    }

    /// Run the pipeline until the source closes or `cancel` fires.
    ///
    /// Spawns the four stage workers and the error fan-in, then drains the
    /// merged error stream into the error handler. Returns only once every
    /// stage has exited and every error stream is closed; data errors are
    /// not failures and surface solely through the handler.
    ///
    /// # Errors
    /// Returns [`PipelineError::StageAborted`] if a stage worker panics;
    /// there is no other failure mode.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), PipelineError> {
        let cfg = self.config.clone();
        let (raw_tx, raw_rx) = mpsc::channel(cfg.stage_queue_depth);
        let (processed_tx, processed_rx) = mpsc::channel(cfg.stage_queue_depth);
        // Extra capacity here absorbs bursts from variable-cost stack-trace
        // resolution without stalling upstream decoding.
        let (print_tx, print_rx) = mpsc::channel(cfg.print_queue_depth);

        // Per-stage error streams are unbounded so a stage never blocks
        // emitting an error, no matter how slowly the handler drains.
        let (decode_errc, decode_errs) = mpsc::unbounded_channel();
        let (process_errc, process_errs) = mpsc::unbounded_channel();
        let (prepare_errc, prepare_errs) = mpsc::unbounded_channel();
        let (sink_errc, sink_errs) = mpsc::unbounded_channel::<PipelineError>();

        let decoder =
            tokio::spawn(decode::run(self.source, raw_tx, decode_errc, cancel.clone()));

        let processor = tokio::spawn(process::run(
            raw_rx,
            processed_tx,
            process_errc,
            cancel.clone(),
            Arc::clone(&self.collab.policy),
        ));

        let preparer = prepare::PrintPreparer {
            policy: Arc::clone(&self.collab.policy),
            names: Arc::clone(&self.collab.names),
            stacks: StackResolver::new(Arc::clone(&self.collab.stacks), cfg.max_stack_depth),
            selector: cfg.table_selector,
        };
        let preparer =
            tokio::spawn(preparer.run(processed_rx, print_tx, prepare_errc, cancel.clone()));

        let sink = tokio::spawn(sink::run(
            print_rx,
            Arc::clone(&self.collab.renderer),
            Arc::clone(&self.stats),
            sink_errc,
            cancel.clone(),
        ));

        let mut merged = merge_errors(vec![decode_errs, process_errs, prepare_errs, sink_errs]);
        while let Some(err) = merged.recv().await {
            self.collab.errors.handle(err);
        }
        debug!("all error streams closed, pipeline drained");

        for handle in [decoder, processor, preparer, sink] {
            handle.await.map_err(|e| PipelineError::StageAborted(e.to_string()))?;
        }
        Ok(())
    }
}

/// Merge per-stage error streams into one.
///
/// One copier task per source moves errors into a shared stream whose
/// capacity is at least one slot per source, so a copier holding the last
/// error of a closed source never blocks even if the consumer stopped early.
/// The merged stream closes only after every copier has finished, i.e. after
/// every source stream was closed by its owning stage.
fn merge_errors(
    sources: Vec<mpsc::UnboundedReceiver<PipelineError>>,
) -> mpsc::Receiver<PipelineError> {
    let (out, merged) = mpsc::channel(sources.len().max(1));
    for mut source in sources {
        let out = out.clone();
        tokio::spawn(async move {
            while let Some(err) = source.recv().await {
                if out.send(err).await.is_err() {
                    return;
                }
            }
        });
    }
    // Copier clones are now the only senders; the merged stream closes when
    // the last copier drops its clone.
    drop(out);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WireError;

    fn eof(needed: usize) -> PipelineError {
        PipelineError::HeaderDecode(WireError::UnexpectedEof { needed, remaining: 0 })
    }

    #[tokio::test]
    async fn test_merge_delivers_from_every_source() {
        let (tx_a, rx_a) = mpsc::unbounded_channel();
        let (tx_b, rx_b) = mpsc::unbounded_channel();

        tx_a.send(eof(1)).unwrap();
        tx_b.send(eof(2)).unwrap();
        tx_a.send(eof(3)).unwrap();
        drop(tx_a);
        drop(tx_b);

        let mut merged = merge_errors(vec![rx_a, rx_b]);
        let mut needs = Vec::new();
        while let Some(err) = merged.recv().await {
            match err {
                PipelineError::HeaderDecode(WireError::UnexpectedEof { needed, .. }) => {
                    needs.push(needed);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
        needs.sort_unstable();
        assert_eq!(needs, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_merged_stream_closes_after_all_sources_close() {
        let (tx, rx) = mpsc::unbounded_channel::<PipelineError>();
        let (tx_idle, rx_idle) = mpsc::unbounded_channel::<PipelineError>();

        let mut merged = merge_errors(vec![rx, rx_idle]);
        drop(tx);

        // Still open: the second source has not closed yet.
        assert!(
            tokio::time::timeout(std::time::Duration::from_millis(20), merged.recv())
                .await
                .is_err()
        );

        drop(tx_idle);
        assert!(merged.recv().await.is_none());
    }
}
