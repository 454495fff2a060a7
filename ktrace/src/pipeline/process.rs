//! Filter/processor stage
//!
//! Applies the pass/drop predicate and the in-place mutation hook. Events
//! the predicate rejects vanish silently; a hook failure is reported and the
//! event dropped, so a partially mutated event is never forwarded.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::PipelineError;
use crate::event::RawEvent;
use crate::policy::EventPolicy;

pub(crate) async fn run(
    mut input: mpsc::Receiver<RawEvent>,
    out: mpsc::Sender<RawEvent>,
    errc: mpsc::UnboundedSender<PipelineError>,
    cancel: CancellationToken,
    policy: Arc<dyn EventPolicy>,
) {
    loop {
        let mut event = tokio::select! {
            maybe = input.recv() => match maybe {
                Some(event) => event,
                None => return,
            },
            () = cancel.cancelled() => return,
        };

        if !policy.should_process(&event) {
            continue;
        }

        if let Err(source) = policy.process_event(&mut event.ctx, &mut event.args) {
            let _ = errc.send(PipelineError::ProcessHook { event_id: event.ctx.event_id, source });
            continue;
        }

        tokio::select! {
            res = out.send(event) => {
                if res.is_err() {
                    return;
                }
            }
            () = cancel.cancelled() => return,
        }
    }
}
