//! # Spanner
//!
//! Synthesizes realistic-looking distributed-tracing data. Each invocation builds
//! a fixed causal tree of spans that simulates a user-profile page request: an
//! HTTP entry point, an RPC client/server hop and a few datastore calls. The
//! resulting [`SpanBatch`](trace::SpanBatch) is handed to a
//! [`SpanPublisher`](export::SpanPublisher) once it has been serialized.
//!
//! ```
//! use std::num::NonZeroUsize;
//! use spanner::trace::{build_request_trees, DefaultIdGenerator};
//!
//! let generator = DefaultIdGenerator::new();
//! let batch = build_request_trees(&generator, NonZeroUsize::new(2).unwrap());
//! assert_eq!(batch.len(), 12);
//! ```
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

#[macro_use]
mod internal_logging;

pub mod attributes;
pub mod export;
pub mod trace;

pub use attributes::{AttributeValue, Attributes, Value};

#[doc(hidden)]
pub mod _private {
    #[cfg(feature = "internal-logs")]
    pub use tracing::{debug, error, warn};
}
