//! Decoder stage
//!
//! Consumes raw byte buffers from the instrumentation backend's event feed
//! and turns each into a [`RawEvent`]. Failure granularity is deliberate:
//! a bad header abandons the whole buffer, a bad argument loses only that
//! argument slot while the remaining declared arguments are still attempted
//! against the same cursor.

use std::collections::HashMap;

use log::debug;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::PipelineError;
use crate::event::RawEvent;
use crate::wire::{decode_arg, EventContext};

pub(crate) async fn run(
    mut source: mpsc::Receiver<Vec<u8>>,
    out: mpsc::Sender<RawEvent>,
    errc: mpsc::UnboundedSender<PipelineError>,
    cancel: CancellationToken,
) {
    loop {
        let raw = tokio::select! {
            maybe = source.recv() => match maybe {
                Some(raw) => raw,
                None => {
                    debug!("event source closed, decoder exiting");
                    return;
                }
            },
            () = cancel.cancelled() => return,
        };

        let mut cursor = &raw[..];
        let ctx = match EventContext::decode(&mut cursor) {
            Ok(ctx) => ctx,
            Err(e) => {
                // Whole buffer is abandoned; no event is produced for it.
                let _ = errc.send(PipelineError::HeaderDecode(e));
                continue;
            }
        };

        let argnum = usize::from(ctx.argnum);
        let mut args = HashMap::with_capacity(argnum);
        let mut arg_order = Vec::with_capacity(argnum);
        for index in 0..argnum {
            match decode_arg(&mut cursor) {
                Ok((tag, value)) => {
                    arg_order.push(tag);
                    args.insert(tag, value);
                }
                Err(e) => {
                    // Only this slot is lost; later arguments are still
                    // attempted against the same cursor.
                    let _ = errc.send(PipelineError::ArgDecode { index, source: e });
                }
            }
        }

        let event = RawEvent { ctx, args, arg_order };
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
