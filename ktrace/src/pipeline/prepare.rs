//! Print preparer stage
//!
//! Applies print-time policy, resolves argument display names in wire order,
//! attaches the best-effort stack trace, and builds the immutable
//! [`FinalEvent`].
//!
//! An unresolvable argument tag is reported but does NOT drop the event: the
//! record is still built with an empty string in that name slot, keeping the
//! name and value vectors aligned with wire order. Dropping the whole event
//! would hide the surviving arguments over a stale name table entry.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::TableSelector;
use crate::domain::PipelineError;
use crate::event::{FinalEvent, RawEvent};
use crate::policy::{EventPolicy, NameTable};
use crate::stacktrace::StackResolver;

pub(crate) struct PrintPreparer {
    pub policy: Arc<dyn EventPolicy>,
    pub names: Arc<dyn NameTable>,
    pub stacks: StackResolver,
    pub selector: TableSelector,
}

impl PrintPreparer {
    pub(crate) async fn run(
        self,
        mut input: mpsc::Receiver<RawEvent>,
        out: mpsc::Sender<FinalEvent>,
        errc: mpsc::UnboundedSender<PipelineError>,
        cancel: CancellationToken,
    ) {
        loop {
            let mut event = tokio::select! {
                maybe = input.recv() => match maybe {
                    Some(event) => event,
                    None => return,
                },
                () = cancel.cancelled() => return,
            };

            if !self.policy.should_print(&event) {
                continue;
            }

            if let Err(source) = self.policy.prepare_args_for_print(&mut event.ctx, &mut event.args)
            {
                let _ =
                    errc.send(PipelineError::PrintHook { event_id: event.ctx.event_id, source });
                continue;
            }

            let table = self.selector.table_for(event.ctx.event_id);
            let mut arg_names = Vec::with_capacity(event.arg_order.len());
            let mut arg_values = Vec::with_capacity(event.arg_order.len());
            for &tag in &event.arg_order {
                // Decode inserts every ordered tag into the map; a hole here
                // means a hook removed the value, and the slot goes with it.
                let Some(value) = event.arg(tag) else {
                    continue;
                };
                let name = match self.names.resolve_name(table, tag) {
                    Some(name) => name,
                    None => {
                        let _ = errc.send(PipelineError::InvalidArgTag {
                            event_id: event.ctx.event_id,
                            tag,
                        });
                        String::new()
                    }
                };
                arg_names.push(name);
                arg_values.push(value.clone());
            }

            // Best-effort: a lookup miss is an empty trace, never an error.
            let stack_trace = self.stacks.resolve(event.ctx.stack_id);

            let final_event = FinalEvent::new(&event.ctx, arg_names, arg_values, stack_trace);
            tokio::select! {
                res = out.send(final_event) => {
                    if res.is_err() {
                        return;
                    }
                }
                () = cancel.cancelled() => return,
            }
        }
    }
}
