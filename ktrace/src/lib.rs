//! # ktrace - Kernel Event Pipeline
//!
//! ktrace is the event-processing core of a kernel-event tracing tool: raw
//! binary records produced by kernel probes are decoded, filtered, enriched
//! with call-stack symbolization, and rendered to an output sink. The core
//! is deliberately policy-free — what to keep, how to mutate arguments, and
//! how to print all come in through collaborator traits.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Kernel Probes (out of scope)                   │
//! │     ring buffer: context + tagged arguments, little-endian      │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ raw byte buffers
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      ktrace (This Crate)                        │
//! │                                                                 │
//! │  ┌─────────┐   ┌───────────┐   ┌──────────────┐   ┌──────┐     │
//! │  │ Decoder │──▶│ Filter /  │──▶│    Print     │──▶│ Sink │     │
//! │  │         │   │ Processor │   │   Preparer   │   │      │     │
//! │  └────┬────┘   └─────┬─────┘   └──────┬───────┘   └──┬───┘     │
//! │       │              │                │  ▲           │         │
//! │       │              │                │  │ stack     │         │
//! │       │              │                │  │ resolver  │         │
//! │       └──────────────┴── error fan-in ┴──┼───────────┘         │
//! │                          │               │                     │
//! │                          ▼               │                     │
//! │                    error handler   stack-trace table           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`pipeline`]: the four stage workers, error fan-in, and the
//!   [`pipeline::Pipeline`] entry point
//! - [`wire`]: binary protocol — fixed-size context and self-describing
//!   tagged argument decoding
//! - [`stacktrace`]: best-effort call-stack resolution from the kernel's
//!   stack-trace table
//! - [`policy`]: collaborator traits (filter predicates, mutation hooks,
//!   name tables, renderer, error handler)
//! - [`event`]: [`event::RawEvent`] and [`event::FinalEvent`]
//! - [`config`]: queue depths, stack bounds, name-table selection
//! - [`domain`]: newtype ids and structured errors
//! - [`stats`]: the shared printed-event counter
//!
//! ## Error Discipline
//!
//! Malformed data never stops the stream. A corrupt header abandons one
//! buffer; a corrupt argument loses one slot; hook failures drop one event.
//! Every such error travels on the owning stage's error stream, is merged by
//! the fan-in, and reaches the caller's error handler — the pipeline itself
//! only ever ends on source close or cancellation.

pub mod config;
pub mod domain;
pub mod event;
pub mod pipeline;
pub mod policy;
pub mod stacktrace;
pub mod stats;
pub mod wire;

pub use config::{PipelineConfig, TableSelector};
pub use event::{FinalEvent, RawEvent};
pub use pipeline::{Collaborators, Pipeline};
