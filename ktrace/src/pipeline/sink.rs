//! Sink stage
//!
//! Counts and renders final events. No filtering happens here; anything
//! that reaches this stage is unconditionally printable.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::PipelineError;
use crate::event::FinalEvent;
use crate::policy::EventRenderer;
use crate::stats::Stats;

// The sink has no data errors today; it still owns an error stream so the
// shutdown discipline is uniform across stages (the stream closes when the
// stage exits).
pub(crate) async fn run(
    mut input: mpsc::Receiver<FinalEvent>,
    renderer: Arc<dyn EventRenderer>,
    stats: Arc<Stats>,
    _errc: mpsc::UnboundedSender<PipelineError>,
    cancel: CancellationToken,
) {
    loop {
        let event = tokio::select! {
            maybe = input.recv() => match maybe {
                Some(event) => event,
                None => return,
            },
            () = cancel.cancelled() => return,
        };

        stats.increment_printed();
        renderer.render(&event);
    }
}
