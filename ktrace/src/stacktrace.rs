//! Stack trace resolution
//!
//! Turns a stack id from an event context into a printable address list.
//! The kernel-side table stores, per id, a fixed-size array of pointer-width
//! little-endian words; a zero word terminates the stack early and anything
//! past the configured depth is ignored.
//!
//! Resolution is strictly best-effort: ids age out of the table and stack
//! capture may be disabled entirely, so every lookup failure degrades to an
//! empty string instead of an error.

use std::fmt::Write as _;
use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::domain::StackId;

/// Width in bytes of one stack word (the platform pointer width).
pub const STACK_WORD_SIZE: usize = std::mem::size_of::<usize>();

/// Failures a stack-trace table lookup can report.
///
/// These never propagate past the resolver; they exist so table
/// implementations can be honest about why a lookup failed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StackLookupError {
    #[error("stack trace table unavailable")]
    TableUnavailable,

    #[error("no entry for {0}")]
    NotFound(StackId),
}

/// Read-only view of the kernel's stack-trace table.
///
/// The value for one id is up to `max_depth * STACK_WORD_SIZE` bytes of
/// little-endian addresses, zero-padded at the tail.
pub trait StackTraceTable: Send + Sync {
    /// Fetch the raw word buffer for a stack id.
    ///
    /// # Errors
    /// Any failure (table missing, id absent) is acceptable; the resolver
    /// treats every error as "no stack".
    fn lookup(&self, stack_id: StackId) -> Result<Vec<u8>, StackLookupError>;
}

/// Stack trace resolver - fetches raw stacks and renders them for print.
pub struct StackResolver {
    table: Arc<dyn StackTraceTable>,
    max_depth: usize,
}

impl StackResolver {
    pub fn new(table: Arc<dyn StackTraceTable>, max_depth: usize) -> Self {
        Self { table, max_depth }
    }

    /// Resolve a stack id to its printable form.
    ///
    /// Returns addresses as `0x<HEX>` joined by commas, no trailing comma;
    /// `""` when the lookup fails or the stack is empty.
    #[must_use]
    pub fn resolve(&self, stack_id: StackId) -> String {
        match self.table.lookup(stack_id) {
            Ok(bytes) => render_words(&bytes, self.max_depth),
            Err(e) => {
                debug!("stack lookup failed for {stack_id}: {e}");
                String::new()
            }
        }
    }
}

/// Render consecutive little-endian words as a comma-joined hex list.
///
/// Stops at the first zero word or after `max_depth` words, whichever comes
/// first. A trailing partial word is ignored.
fn render_words(bytes: &[u8], max_depth: usize) -> String {
    let mut out = String::new();
    for chunk in bytes.chunks_exact(STACK_WORD_SIZE).take(max_depth) {
        let mut word = [0u8; 8];
        word[..STACK_WORD_SIZE].copy_from_slice(chunk);
        let addr = u64::from_le_bytes(word);
        if addr == 0 {
            break;
        }
        if !out.is_empty() {
            out.push(',');
        }
        let _ = write!(out, "0x{addr:X}");
    }
    out
}
