//! # Synthetic trace generation
//!
//! The [`IdGenerator`] hands out trace and span identifiers, and the
//! [`TreeBuilder`] uses it to assemble the fixed causal topology of one
//! simulated user-profile request. A [`SpanBatch`] holds the spans of every
//! repetition in construction order, so a parent always precedes its children.
mod builder;
mod id;
mod id_generator;
mod span;

pub use builder::{build_request_trees, keys, TreeBuilder, SPANS_PER_TREE};
pub use id::{SpanId, TraceId};
#[cfg(any(feature = "testing", test))]
pub use id_generator::IncrementIdGenerator;
pub use id_generator::{DefaultIdGenerator, IdGenerator, IdSeed};
pub use span::{
    Event, LogEntry, SpanBatch, SpanData, SpanInfo, SpanKind, Status, USER_SUPPLIED_LOG,
};
