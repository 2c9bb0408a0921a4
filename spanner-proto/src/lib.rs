//! Protobuf messages for serialized span batches, and the transformations from
//! [`spanner`] spans into them.
//!
//! The messages are a subset of the OpenCensus `trace.v1` schema wrapped in a
//! `DumpSpans` container, which is what tracing collectors fed from Kafka expect
//! to find in each record.
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![allow(clippy::derive_partial_eq_without_eq)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

mod proto;

pub use proto::dump;
pub use proto::opencensus;

mod transform;

pub use transform::trace::{
    deserialize, serialize, DecodingError, EncodeResult, EncodingError, InvalidSpan,
};
