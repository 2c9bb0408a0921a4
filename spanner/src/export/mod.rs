//! Delivery of serialized span batches.
//!
//! A [`SpanPublisher`] is the seam between span generation and whatever
//! transport carries the bytes to a tracing backend. Publishing is
//! fire-and-forget: delivery failures are reported by the publisher itself and
//! never flow back into generation.
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[cfg(any(feature = "testing", test))]
mod in_memory;
#[cfg(any(feature = "testing", test))]
pub use in_memory::{InMemoryPublisher, InMemoryPublisherBuilder, Published};

/// Result of publisher operations.
pub type PublishResult = Result<(), PublishError>;

/// Errors returned by publisher construction and flushing.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PublishError {
    /// The publisher was already shut down.
    #[error("publisher already shut down")]
    AlreadyShutdown,

    /// Pending messages were not delivered before the timeout elapsed.
    #[error("flush timed out after {0:?}")]
    Timeout(Duration),

    /// The publisher configuration was rejected.
    #[error("invalid publisher configuration: {0}")]
    InvalidConfig(String),

    /// The underlying transport reported a failure.
    /// The message is intended for logging purposes only.
    #[error("transport failure: {0}")]
    Transport(String),

    /// An internal lock was poisoned.
    #[error("internal failure: {0}")]
    InternalFailure(String),
}

impl<T> From<std::sync::PoisonError<T>> for PublishError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        PublishError::InternalFailure(err.to_string())
    }
}

/// Sink for serialized span batches.
pub trait SpanPublisher: Send + Sync + fmt::Debug {
    /// Hand `payload` over for delivery to `topic`.
    ///
    /// Returns once the payload is queued. Failures, including failures to
    /// queue, are logged by the publisher and not returned.
    fn publish(&self, topic: &str, payload: Vec<u8>);

    /// Deliver everything still queued and release the transport.
    fn shutdown(&self) -> PublishResult {
        Ok(())
    }
}

impl<T: SpanPublisher + ?Sized> SpanPublisher for Box<T> {
    fn publish(&self, topic: &str, payload: Vec<u8>) {
        (**self).publish(topic, payload)
    }

    fn shutdown(&self) -> PublishResult {
        (**self).shutdown()
    }
}
