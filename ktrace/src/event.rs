//! Event representations flowing through the pipeline
//!
//! A [`RawEvent`] is what the decoder produces and the two middle stages
//! mutate in place; a [`FinalEvent`] is the immutable printable record the
//! print preparer hands to the sink.

use std::collections::HashMap;

use crate::domain::{ArgTag, EventId};
use crate::wire::{ArgValue, EventContext};

/// A decoded but not yet printable event.
///
/// `args` gives O(1) lookup by tag; `arg_order` reproduces wire order, which
/// the map's iteration order does not guarantee. Owned by exactly one stage
/// at a time; ownership moves with the event across each queue boundary.
#[derive(Debug, Clone)]
pub struct RawEvent {
    pub ctx: EventContext,
    pub args: HashMap<ArgTag, ArgValue>,
    pub arg_order: Vec<ArgTag>,
}

impl RawEvent {
    /// Look up an argument value by tag.
    #[must_use]
    pub fn arg(&self, tag: ArgTag) -> Option<&ArgValue> {
        self.args.get(&tag)
    }
}

/// The final printable record, consumed exactly once by the sink.
///
/// `arg_names` and `arg_values` are parallel vectors in wire order.
#[derive(Debug, Clone)]
pub struct FinalEvent {
    pub timestamp_ns: u64,
    pub pid: u32,
    pub tid: u32,
    pub ppid: u32,
    pub uid: u32,
    pub comm: String,
    pub event_id: EventId,
    pub retval: i64,
    pub arg_names: Vec<String>,
    pub arg_values: Vec<ArgValue>,
    /// Comma-joined hex addresses, or `""` when no stack was captured.
    pub stack_trace: String,
}

impl FinalEvent {
    pub(crate) fn new(
        ctx: &EventContext,
        arg_names: Vec<String>,
        arg_values: Vec<ArgValue>,
        stack_trace: String,
    ) -> Self {
        Self {
            timestamp_ns: ctx.timestamp_ns,
            pid: ctx.pid,
            tid: ctx.tid,
            ppid: ctx.ppid,
            uid: ctx.uid,
            comm: ctx.comm_str(),
            event_id: ctx.event_id,
            retval: ctx.retval,
            arg_names,
            arg_values,
            stack_trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StackId;
    use ktrace_common::COMM_LEN;

    fn ctx() -> EventContext {
        EventContext {
            timestamp_ns: 1,
            pid: 2,
            tid: 3,
            ppid: 4,
            uid: 5,
            mount_ns: 6,
            pid_ns: 7,
            comm: [0; COMM_LEN],
            event_id: EventId(8),
            argnum: 1,
            retval: 0,
            stack_id: StackId(9),
        }
    }

    #[test]
    fn test_arg_lookup_by_tag() {
        let mut args = HashMap::new();
        args.insert(ArgTag(1), ArgValue::U32(5));
        let event = RawEvent { ctx: ctx(), args, arg_order: vec![ArgTag(1)] };
        assert_eq!(event.arg(ArgTag(1)), Some(&ArgValue::U32(5)));
        assert_eq!(event.arg(ArgTag(2)), None);
    }

    #[test]
    fn test_final_event_carries_context_fields() {
        let event = FinalEvent::new(&ctx(), vec!["fd".into()], vec![ArgValue::U32(5)], String::new());
        assert_eq!(event.pid, 2);
        assert_eq!(event.event_id, EventId(8));
        assert_eq!(event.comm, "");
        assert_eq!(event.stack_trace, "");
    }
}
