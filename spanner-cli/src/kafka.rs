use crate::config::KafkaConfig;
use rdkafka::client::ClientContext;
use rdkafka::config::{ClientConfig, RDKafkaLogLevel};
use rdkafka::message::Message;
use rdkafka::producer::{BaseRecord, DeliveryResult, Producer, ProducerContext, ThreadedProducer};
use rdkafka::util::Timeout;
use spanner::export::{PublishError, PublishResult, SpanPublisher};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Longest time [`KafkaPublisher::shutdown`] waits for queued batches.
const FLUSH_TIMEOUT: Duration = Duration::from_secs(30);

/// Logs the outcome of every delivery. Failures arrive here after the client
/// has exhausted its retries.
struct DeliveryLogger;

impl ClientContext for DeliveryLogger {}

impl ProducerContext for DeliveryLogger {
    type DeliveryOpaque = ();

    fn delivery(&self, delivery_result: &DeliveryResult<'_>, _: Self::DeliveryOpaque) {
        match delivery_result {
            Ok(message) => tracing::debug!(
                topic = message.topic(),
                partition = message.partition(),
                offset = message.offset(),
                "span batch delivered"
            ),
            Err((err, message)) => tracing::error!(
                topic = message.topic(),
                error = %err,
                "failed to deliver span batch"
            ),
        }
    }
}

/// Publishes span batches to Kafka from a background polling thread.
pub(crate) struct KafkaPublisher {
    producer: ThreadedProducer<DeliveryLogger>,
    is_shutdown: AtomicBool,
}

impl fmt::Debug for KafkaPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KafkaPublisher")
    }
}

impl KafkaPublisher {
    pub(crate) fn new(config: &KafkaConfig) -> Result<Self, PublishError> {
        let producer = client_config(config)
            .create_with_context(DeliveryLogger)
            .map_err(|err| PublishError::InvalidConfig(err.to_string()))?;
        tracing::info!(brokers = %config.brokers.join(", "), "connecting to Kafka");
        Ok(KafkaPublisher {
            producer,
            is_shutdown: AtomicBool::new(false),
        })
    }
}

fn client_config(config: &KafkaConfig) -> ClientConfig {
    let mut client = ClientConfig::new();
    client
        .set("bootstrap.servers", config.brokers.join(","))
        // only wait for the leader to acknowledge
        .set("acks", "1")
        .set("compression.type", "snappy")
        .set("linger.ms", "500");

    if let Some(tls) = &config.tls {
        client
            .set("security.protocol", "ssl")
            .set("ssl.certificate.location", tls.certificate.to_string_lossy())
            .set("ssl.key.location", tls.key.to_string_lossy())
            .set("ssl.ca.location", tls.ca.to_string_lossy())
            .set(
                "enable.ssl.certificate.verification",
                tls.verify.to_string(),
            );
    }

    if config.verbose {
        client
            .set("debug", "broker,topic,msg")
            .set_log_level(RDKafkaLogLevel::Debug);
    }
    client
}

impl SpanPublisher for KafkaPublisher {
    fn publish(&self, topic: &str, payload: Vec<u8>) {
        if self.is_shutdown.load(Ordering::SeqCst) {
            tracing::warn!(topic, "publisher is shut down, dropping span batch");
            return;
        }
        let record: BaseRecord<'_, (), [u8]> = BaseRecord::to(topic).payload(payload.as_slice());
        if let Err((err, _)) = self.producer.send(record) {
            tracing::error!(topic, error = %err, "failed to queue span batch");
        }
    }

    fn shutdown(&self) -> PublishResult {
        if self.is_shutdown.swap(true, Ordering::SeqCst) {
            return Err(PublishError::AlreadyShutdown);
        }
        self.producer
            .flush(Timeout::After(FLUSH_TIMEOUT))
            .map_err(|err| match err.rdkafka_error_code() {
                Some(rdkafka::types::RDKafkaErrorCode::OperationTimedOut) => {
                    PublishError::Timeout(FLUSH_TIMEOUT)
                }
                _ => PublishError::Transport(err.to_string()),
            })
    }
}
