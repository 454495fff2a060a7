//! Pipeline configuration
//!
//! Queue depths, stack-trace bounds, and the argument-name table selection
//! policy. Everything has a default matching the observed behavior of the
//! instrumentation backend.

use ktrace_common::MAX_STACK_DEPTH;

use crate::domain::{EventId, TableId};

/// Policy selecting which argument-name table to consult for an event.
///
/// Historically the backend kept two name tables and picked one by the
/// parity of the event id. That split is preserved as the default, but the
/// selector is an explicit configuration knob so deployments with a single
/// (or versioned) table are not forced through the parity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSelector {
    /// `event_id % 2` picks table 0 or 1 (compatibility default).
    EventIdParity,
    /// Every event resolves names from the same table.
    Fixed(TableId),
}

impl TableSelector {
    /// The table to use for the given event.
    #[must_use]
    pub fn table_for(self, event_id: EventId) -> TableId {
        match self {
            TableSelector::EventIdParity => TableId(event_id.0 % 2),
            TableSelector::Fixed(table) => table,
        }
    }
}

/// Tuning knobs for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Capacity of the decoder → processor and processor → preparer queues.
    pub stage_queue_depth: usize,
    /// Capacity of the preparer → sink queue. Deliberately larger than the
    /// upstream queues to absorb bursts from variable-cost stack-trace
    /// resolution without stalling decoding.
    pub print_queue_depth: usize,
    /// Maximum number of stack frames rendered per event.
    pub max_stack_depth: usize,
    /// Argument-name table selection policy.
    pub table_selector: TableSelector,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stage_queue_depth: 64,
            print_queue_depth: 1000,
            max_stack_depth: MAX_STACK_DEPTH,
            table_selector: TableSelector::EventIdParity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_selector() {
        let sel = TableSelector::EventIdParity;
        assert_eq!(sel.table_for(EventId(6)), TableId(0));
        assert_eq!(sel.table_for(EventId(7)), TableId(1));
    }

    #[test]
    fn test_fixed_selector_ignores_event_id() {
        let sel = TableSelector::Fixed(TableId(3));
        assert_eq!(sel.table_for(EventId(6)), TableId(3));
        assert_eq!(sel.table_for(EventId(7)), TableId(3));
    }

    #[test]
    fn test_default_config() {
        let cfg = PipelineConfig::default();
        assert!(cfg.print_queue_depth > cfg.stage_queue_depth);
        assert_eq!(cfg.max_stack_depth, MAX_STACK_DEPTH);
    }
}
