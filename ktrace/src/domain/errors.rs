//! Structured error types for ktrace
//!
//! Using thiserror for automatic Display implementation and error chaining.

use super::types::{ArgTag, EventId};
use thiserror::Error;

/// Opaque failure returned by externally supplied policy hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while decoding the binary wire format.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WireError {
    #[error("buffer too short: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("unknown argument type code {0}")]
    UnknownArgType(u8),
}

/// Everything a pipeline stage can report on its error stream.
///
/// None of these terminate a stage worker; each is emitted and the stage
/// moves on to the next item. They reach the caller only through the error
/// handler passed to [`crate::pipeline::Pipeline`].
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to decode event context: {0}")]
    HeaderDecode(WireError),

    #[error("failed to decode argument {index}: {source}")]
    ArgDecode { index: usize, source: WireError },

    #[error("process hook failed for event {event_id}: {source}")]
    ProcessHook { event_id: EventId, source: HookError },

    #[error("print hook failed for event {event_id}: {source}")]
    PrintHook { event_id: EventId, source: HookError },

    #[error("invalid argument tag {tag} for event {event_id}")]
    InvalidArgTag { event_id: EventId, tag: ArgTag },

    #[error("stage worker terminated abnormally: {0}")]
    StageAborted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_decode_display() {
        let err =
            PipelineError::HeaderDecode(WireError::UnexpectedEof { needed: 68, remaining: 12 });
        assert_eq!(
            err.to_string(),
            "failed to decode event context: buffer too short: needed 68 bytes, 12 remaining"
        );
    }

    #[test]
    fn test_invalid_arg_tag_display() {
        let err = PipelineError::InvalidArgTag { event_id: EventId(7), tag: ArgTag(3) };
        assert_eq!(err.to_string(), "invalid argument tag tag:3 for event 7");
    }
}
