use chrono::{DateTime, Utc};
use spanner::export::{PublishError, PublishResult, SpanPublisher};
use spanner::trace::{SpanId, TraceId};
use spanner_proto::dump::v1::DumpSpans;
use spanner_proto::opencensus::trace::v1::{attribute_value, span, AttributeValue};
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// A publisher that decodes every payload and prints its spans to stdout.
#[derive(Debug, Default)]
pub(crate) struct StdoutPublisher {
    is_shutdown: AtomicBool,
}

impl SpanPublisher for StdoutPublisher {
    fn publish(&self, topic: &str, payload: Vec<u8>) {
        if self.is_shutdown.load(Ordering::SeqCst) {
            tracing::warn!(topic, "publisher is shut down, dropping span batch");
            return;
        }
        let dump = match spanner_proto::deserialize(&payload) {
            Ok(dump) => dump,
            Err(err) => {
                tracing::error!(topic, error = %err, "payload is not a span batch");
                return;
            }
        };
        if let Err(err) = write_spans(&mut io::stdout().lock(), topic, payload.len(), &dump) {
            tracing::error!(topic, error = %err, "failed to write span batch to stdout");
        }
    }

    fn shutdown(&self) -> PublishResult {
        if self.is_shutdown.swap(true, Ordering::SeqCst) {
            return Err(PublishError::AlreadyShutdown);
        }
        io::stdout()
            .flush()
            .map_err(|err| PublishError::Transport(err.to_string()))
    }
}

fn write_spans<W: Write>(
    out: &mut W,
    topic: &str,
    payload_len: usize,
    dump: &DumpSpans,
) -> io::Result<()> {
    writeln!(out, "Topic: {topic} ({payload_len} bytes)")?;
    for (i, span) in dump.spans.iter().enumerate() {
        writeln!(out, "Span #{i}")?;
        let name = span.name.as_ref().map(|name| name.value.as_str());
        writeln!(out, "\t Name: {:?}", name.unwrap_or_default())?;
        writeln!(out, "\t TraceId: {}", format_id(&span.trace_id, TraceId::from_bytes))?;
        writeln!(out, "\t SpanId: {}", format_id(&span.span_id, SpanId::from_bytes))?;
        if !span.parent_span_id.is_empty() {
            let parent = format_id(&span.parent_span_id, SpanId::from_bytes);
            writeln!(out, "\t ParentSpanId: {parent}")?;
        }
        let kind = span::SpanKind::try_from(span.kind).unwrap_or(span::SpanKind::Unspecified);
        writeln!(out, "\t Kind: {}", kind.as_str_name())?;
        writeln!(out, "\t Start time: {}", format_time(&span.start_time))?;
        writeln!(out, "\t End time: {}", format_time(&span.end_time))?;
        if let Some(status) = &span.status {
            writeln!(out, "\t Status: {} {:?}", status.code, status.message)?;
        }

        if let Some(attributes) = &span.attributes {
            writeln!(out, "\t Attributes:")?;
            writeln!(
                out,
                "\t Dropped attributes count: {}",
                attributes.dropped_attributes_count
            )?;
            for (key, value) in &attributes.attribute_map {
                writeln!(out, "\t\t {key}: {}", format_value(value))?;
            }
        }

        let events = span.time_events.iter().flat_map(|events| &events.time_event);
        let mut print_header = true;
        for event in events {
            if print_header {
                writeln!(out, "\t Events:")?;
                print_header = false;
            }
            writeln!(out, "\t\t Timestamp: {}", format_time(&event.time))?;
            let Some(span::time_event::Value::Annotation(annotation)) = &event.value else {
                continue;
            };
            if let Some(description) = &annotation.description {
                writeln!(out, "\t\t Description: {:?}", description.value)?;
            }
            for (key, value) in annotation.attributes.iter().flat_map(|a| &a.attribute_map) {
                writeln!(out, "\t\t\t {key}: {}", format_value(value))?;
            }
        }
    }
    Ok(())
}

/// Formats wire id bytes through the typed id, or as raw bytes when the
/// length is wrong.
fn format_id<const N: usize, T: fmt::Display>(
    bytes: &[u8],
    from_bytes: fn([u8; N]) -> T,
) -> String {
    <[u8; N]>::try_from(bytes)
        .map(|id| from_bytes(id).to_string())
        .unwrap_or_else(|_| format!("{bytes:?}"))
}

fn format_time(timestamp: &Option<prost_types::Timestamp>) -> String {
    timestamp
        .as_ref()
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts.seconds, u32::try_from(ts.nanos).ok()?))
        .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S%.6f").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_value(value: &AttributeValue) -> String {
    match &value.value {
        Some(attribute_value::Value::StringValue(s)) => format!("{:?}", s.value),
        Some(attribute_value::Value::IntValue(i)) => i.to_string(),
        Some(attribute_value::Value::BoolValue(b)) => b.to_string(),
        Some(attribute_value::Value::DoubleValue(d)) => d.to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanner::trace::{build_request_trees, DefaultIdGenerator, SpanBatch};
    use std::num::NonZeroUsize;

    fn printed(trees: usize) -> (SpanBatch, String) {
        let generator = DefaultIdGenerator::new();
        let batch = build_request_trees(&generator, NonZeroUsize::new(trees).unwrap());
        let payload = spanner_proto::serialize(&batch).unwrap();
        let dump = spanner_proto::deserialize(&payload).unwrap();

        let mut out = Vec::new();
        write_spans(&mut out, "spans", payload.len(), &dump).unwrap();
        (batch, String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_every_span() {
        let (_, out) = printed(2);
        assert!(out.starts_with("Topic: spans ("));
        assert_eq!(out.matches("Span #").count(), 12);
        assert_eq!(out.matches("ParentSpanId").count(), 10);
        assert!(out.contains("\t Name: \"/api/user/:uid/profile\""));
        assert!(out.contains("\t Kind: SERVER"));
        assert!(out.contains("\t Status: 4 \"DeadlineExceeded\""));
        assert!(out.contains("\t\t count: 1000"));
        assert!(out.contains("\t\t Description: \"user supplied log\""));
    }

    #[test]
    fn ids_print_like_the_typed_ids() {
        let (batch, out) = printed(1);
        let root = &batch[0];
        let child = &batch[1];
        assert!(out.contains(&format!("\t TraceId: {}\n", root.trace_id)));
        assert!(out.contains(&format!("\t SpanId: {}\n", root.span_id)));
        assert!(out.contains(&format!("\t SpanId: {}\n", child.span_id)));
        assert!(out.contains(&format!("\t ParentSpanId: {}\n", root.span_id)));
    }

    #[test]
    fn ids_of_the_wrong_length_print_as_bytes() {
        assert_eq!(
            format_id(&[0, 0, 0, 0, 0, 0, 0, 42], SpanId::from_bytes),
            "000000000000002a"
        );
        assert_eq!(format_id(&[1, 2, 3], SpanId::from_bytes), "[1, 2, 3]");
        assert_eq!(format_id(&[], TraceId::from_bytes), "[]");
    }

    #[test]
    fn shutdown_twice_fails() {
        let publisher = StdoutPublisher::default();
        assert!(publisher.shutdown().is_ok());
        assert!(matches!(
            publisher.shutdown(),
            Err(PublishError::AlreadyShutdown)
        ));
    }
}
