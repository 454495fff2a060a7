//! # Shared Wire Format (kernel probes ↔ userspace)
//!
//! Defines the byte-level constants shared between the kernel-side probe
//! programs and the userspace pipeline. The probe side serializes one event
//! per ring-buffer record: a fixed-size little-endian context followed by
//! `argnum` self-describing tagged arguments.
//!
//! ## Wire layout
//!
//! ```text
//! ┌───────────────────────────────┐
//! │ EventContext (68 bytes, LE)   │
//! ├───────────────────────────────┤
//! │ arg 0: tag u8 │ type u8 │ ... │
//! │ arg 1: tag u8 │ type u8 │ ... │
//! │ ...  (argnum entries)         │
//! └───────────────────────────────┘
//! ```
//!
//! Variable-length payloads (strings, byte blobs) carry a `u32` length
//! prefix. Everything is little-endian.

#![cfg_attr(not(test), no_std)]

// ============================================================================
// Context Layout
// ============================================================================

/// Size in bytes of the fixed event context at the head of every raw buffer.
///
/// Layout (byte offsets, all fields little-endian):
///
/// | off | field        | type      |
/// |-----|--------------|-----------|
/// | 0   | timestamp_ns | u64       |
/// | 8   | pid          | u32       |
/// | 12  | tid          | u32       |
/// | 16  | ppid         | u32       |
/// | 20  | uid          | u32       |
/// | 24  | mount_ns     | u32       |
/// | 28  | pid_ns       | u32       |
/// | 32  | comm         | [u8; 16]  |
/// | 48  | event_id     | u32       |
/// | 52  | argnum       | u8        |
/// | 53  | (padding)    | [u8; 3]   |
/// | 56  | retval       | i64       |
/// | 64  | stack_id     | u32       |
pub const CONTEXT_SIZE: usize = 68;

/// Length of the `comm` (task command name) field, matching the kernel's
/// `TASK_COMM_LEN`.
pub const COMM_LEN: usize = 16;

// ============================================================================
// Stack Traces
// ============================================================================

/// Maximum number of frames stored per stack in the kernel stack-trace table.
///
/// The table value for one stack id is `MAX_STACK_DEPTH` words of the
/// platform pointer width; unused trailing slots are zero.
pub const MAX_STACK_DEPTH: usize = 20;

// ============================================================================
// Argument Type Codes
// ============================================================================

/// Wire type codes for tagged arguments.
///
/// Each argument on the wire is `tag: u8, type: u8, payload`, the payload
/// size being determined by the type code.
pub mod arg_type {
    /// `u8` payload, 1 byte.
    pub const U8: u8 = 1;
    /// `u16` payload, 2 bytes.
    pub const U16: u8 = 2;
    /// `u32` payload, 4 bytes.
    pub const U32: u8 = 3;
    /// `u64` payload, 8 bytes.
    pub const U64: u8 = 4;
    /// `i32` payload, 4 bytes.
    pub const I32: u8 = 5;
    /// `i64` payload, 8 bytes.
    pub const I64: u8 = 6;
    /// UTF-8 string payload, `u32` length prefix then bytes.
    pub const STR: u8 = 7;
    /// Opaque byte blob, `u32` length prefix then bytes.
    pub const BYTES: u8 = 8;
}
