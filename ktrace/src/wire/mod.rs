//! Binary wire protocol
//!
//! Decoding for the two units the instrumentation backend puts on the wire:
//! the fixed-size little-endian event context at the head of every raw
//! buffer, and the self-describing tagged arguments that follow it. Both
//! decode from a shared cursor (any [`bytes::Buf`]) so argument decoding
//! picks up exactly where the context ended.

pub mod args;
pub mod context;

pub use args::{decode_arg, ArgValue};
pub use context::EventContext;
