//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers prevent common bugs like passing an argument tag
//! where an event id is expected, and make function signatures more
//! expressive.

use std::fmt;

/// Event identifier
///
/// Identifies the kind of kernel event (which probe fired). Assigned by the
/// instrumentation side and carried verbatim through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u32);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Argument tag
///
/// Small opaque identifier distinguishing one argument slot within a single
/// event's argument set. Tags are unique per event but carry no global
/// ordering; wire order is tracked separately by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgTag(pub u8);

impl fmt::Display for ArgTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag:{}", self.0)
    }
}

/// Stack trace id
///
/// Key into the kernel-side stack-trace table. The kernel deduplicates
/// identical stacks, so many events may share one id. An id may be absent
/// from the table (aged out, or stack capture disabled); that is never an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StackId(pub u32);

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stack:{}", self.0)
    }
}

/// Which argument-name table a display name is resolved from.
///
/// The instrumentation backend keeps one name table per parameter-set
/// version; the pipeline selects a table per event via
/// [`crate::config::TableSelector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(pub u32);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_display() {
        assert_eq!(EventId(7).to_string(), "7");
    }

    #[test]
    fn test_arg_tag_display() {
        assert_eq!(ArgTag(3).to_string(), "tag:3");
    }

    #[test]
    fn test_stack_id_display() {
        assert_eq!(StackId(42).to_string(), "stack:42");
    }
}
