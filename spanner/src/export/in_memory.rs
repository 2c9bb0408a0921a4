use crate::export::{PublishError, PublishResult, SpanPublisher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A payload handed to an [`InMemoryPublisher`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Published {
    /// Destination topic.
    pub topic: String,
    /// Serialized batch.
    pub payload: Vec<u8>,
}

/// A publisher that keeps every payload in memory.
///
/// This publisher is useful for testing and debugging purposes. Clones share
/// the same storage, so a test can hand one clone to the code under test and
/// inspect the other.
///
/// # Example
/// ```
///# #[cfg(feature = "testing")]
///# {
///# use spanner::export::{InMemoryPublisher, SpanPublisher};
/// let publisher = InMemoryPublisher::default();
/// publisher.publish("spans", vec![1, 2, 3]);
///
/// let published = publisher.get_published().unwrap();
/// assert_eq!(published[0].topic, "spans");
///# }
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryPublisher {
    published: Arc<Mutex<Vec<Published>>>,
    is_shutdown: Arc<AtomicBool>,
}

impl Default for InMemoryPublisher {
    fn default() -> Self {
        InMemoryPublisherBuilder::new().build()
    }
}

/// Builder for [`InMemoryPublisher`].
/// # Example
/// ```
///# #[cfg(feature = "testing")]
///# {
///# use spanner::export::InMemoryPublisherBuilder;
///
/// let publisher = InMemoryPublisherBuilder::new().build();
///# }
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryPublisherBuilder {}

impl Default for InMemoryPublisherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPublisherBuilder {
    /// Creates a new instance of the `InMemoryPublisherBuilder`.
    pub fn new() -> Self {
        Self {}
    }

    /// Creates a new instance of the `InMemoryPublisher`.
    pub fn build(&self) -> InMemoryPublisher {
        InMemoryPublisher {
            published: Arc::new(Mutex::new(Vec::new())),
            is_shutdown: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl InMemoryPublisher {
    /// Returns every payload published so far, in order.
    ///
    /// # Errors
    ///
    /// Returns a `PublishError` if the internal lock cannot be acquired.
    pub fn get_published(&self) -> Result<Vec<Published>, PublishError> {
        self.published
            .lock()
            .map(|published| published.clone())
            .map_err(PublishError::from)
    }

    /// Clears the internal storage.
    pub fn reset(&self) {
        let _ = self.published.lock().map(|mut published| published.clear());
    }

    /// Whether [`SpanPublisher::shutdown`] was called.
    pub fn is_shutdown(&self) -> bool {
        self.is_shutdown.load(Ordering::SeqCst)
    }
}

impl SpanPublisher for InMemoryPublisher {
    fn publish(&self, topic: &str, payload: Vec<u8>) {
        if self.is_shutdown() {
            spanner_warn!(
                name: "InMemoryPublisher.PublishAfterShutdown",
                topic = topic,
                bytes = payload.len(),
            );
            return;
        }
        match self.published.lock() {
            Ok(mut published) => published.push(Published {
                topic: topic.to_string(),
                payload,
            }),
            Err(err) => {
                spanner_error!(
                    name: "InMemoryPublisher.PublishFailed",
                    reason = err.to_string().as_str(),
                );
            }
        }
    }

    fn shutdown(&self) -> PublishResult {
        if self.is_shutdown.swap(true, Ordering::SeqCst) {
            return Err(PublishError::AlreadyShutdown);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_payloads_in_order() {
        let publisher = InMemoryPublisher::default();
        publisher.publish("a", vec![1]);
        publisher.publish("b", vec![2, 3]);

        let published = publisher.get_published().unwrap();
        assert_eq!(
            published,
            vec![
                Published {
                    topic: "a".into(),
                    payload: vec![1]
                },
                Published {
                    topic: "b".into(),
                    payload: vec![2, 3]
                },
            ]
        );
    }

    #[test]
    fn clones_share_storage() {
        let publisher = InMemoryPublisher::default();
        let observer = publisher.clone();
        publisher.publish("spans", vec![42]);
        assert_eq!(observer.get_published().unwrap().len(), 1);

        observer.reset();
        assert!(publisher.get_published().unwrap().is_empty());
    }

    #[test]
    fn drops_payloads_after_shutdown() {
        let publisher = InMemoryPublisher::default();
        assert!(publisher.shutdown().is_ok());
        assert!(publisher.is_shutdown());

        publisher.publish("spans", vec![1]);
        assert!(publisher.get_published().unwrap().is_empty());
        assert!(matches!(
            publisher.shutdown(),
            Err(PublishError::AlreadyShutdown)
        ));
    }

    #[test]
    fn boxed_publisher_forwards() {
        let publisher = InMemoryPublisher::default();
        let boxed: Box<dyn SpanPublisher> = Box::new(publisher.clone());
        boxed.publish("spans", vec![7]);
        assert!(boxed.shutdown().is_ok());
        assert_eq!(publisher.get_published().unwrap()[0].payload, vec![7]);
        assert!(publisher.is_shutdown());
    }
}
