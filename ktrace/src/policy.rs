//! Collaborator seams
//!
//! The pipeline never decides *whether* an event matters or *how* it is
//! shown; those decisions belong to the embedding tool and come in through
//! the traits here. All collaborators must be `Send + Sync` because every
//! stage runs as an independent task.

use std::collections::HashMap;

use crate::domain::{ArgTag, HookError, TableId};
use crate::event::{FinalEvent, RawEvent};
use crate::wire::{ArgValue, EventContext};

/// Filtering and mutation policy applied per event.
///
/// All methods default to pass-through so callers only override what they
/// need. `process_event` and `prepare_args_for_print` mutate the event in
/// place; when either returns an error the event is dropped and the error is
/// reported, never a half-mutated event forwarded.
pub trait EventPolicy: Send + Sync {
    /// Should this event enter the processing stage at all?
    fn should_process(&self, _event: &RawEvent) -> bool {
        true
    }

    /// Rewrite argument values or context fields before further processing.
    ///
    /// # Errors
    /// Any error drops the event and is forwarded to the error handler.
    fn process_event(
        &self,
        _ctx: &mut EventContext,
        _args: &mut HashMap<ArgTag, ArgValue>,
    ) -> Result<(), HookError> {
        Ok(())
    }

    /// Should this event be printed?
    fn should_print(&self, _event: &RawEvent) -> bool {
        true
    }

    /// Normalize argument values for human display.
    ///
    /// # Errors
    /// Any error drops the event and is forwarded to the error handler.
    fn prepare_args_for_print(
        &self,
        _ctx: &mut EventContext,
        _args: &mut HashMap<ArgTag, ArgValue>,
    ) -> Result<(), HookError> {
        Ok(())
    }
}

/// Read-only lookup of display names for argument tags.
///
/// Populated by the instrumentation backend; the pipeline only reads it, so
/// no locking is required beyond concurrent-read safety.
pub trait NameTable: Send + Sync {
    /// Resolve a display name, or `None` if the tag is unknown to `table`.
    fn resolve_name(&self, table: TableId, tag: ArgTag) -> Option<String>;
}

/// Final output sink for printable records.
pub trait EventRenderer: Send + Sync {
    fn render(&self, event: &FinalEvent);
}

/// Receiver for every error any stage reports.
///
/// Called from the supervisor's drain loop, one invocation per error, in the
/// order the merged stream delivers them.
pub trait ErrorHandler: Send + Sync {
    fn handle(&self, error: crate::domain::PipelineError);
}
