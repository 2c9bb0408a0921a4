use crate::attributes::{self, Attributes, Value};
use crate::trace::{SpanId, TraceId};
use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Deref;
use std::time::SystemTime;

/// Description carried by every annotation built from a [`LogEntry`].
pub const USER_SUPPLIED_LOG: &str = "user supplied log";

/// `SpanKind` describes the relationship between the span, its parents, and
/// its children in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// The span covers server-side handling of a request, such as an inbound
    /// HTTP call or the callee side of an RPC.
    Server,
    /// The span covers an outbound call to a remote service or datastore.
    Client,
}

/// The final status of a span: an RPC-style code and a message.
///
/// Code `0` means success.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    /// Status code, `0` for OK.
    pub code: i32,
    /// Developer-facing message.
    pub message: Cow<'static, str>,
}

impl Status {
    /// The successful status.
    pub fn ok() -> Self {
        Status {
            code: 0,
            message: Cow::Borrowed("ok"),
        }
    }

    /// A status with the given code and message.
    pub fn new(code: i32, message: impl Into<Cow<'static, str>>) -> Self {
        Status {
            code,
            message: message.into(),
        }
    }

    /// Whether this status reports success.
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

/// A time-stamped log recorded while a simulated operation ran.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    /// When the log was recorded.
    pub timestamp: SystemTime,
    /// Annotation key-value pairs.
    pub annotations: HashMap<String, Value>,
}

impl LogEntry {
    /// A log entry timestamped now.
    pub fn now<I, K, V>(annotations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        LogEntry {
            timestamp: SystemTime::now(),
            annotations: annotations
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Construction record of one span.
///
/// Times are relative: the span starts `delay_seconds` after the moment it is
/// built and lasts `cost_seconds`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanInfo {
    /// Service that owns the span.
    pub service_name: Cow<'static, str>,
    /// Operation the span describes, used as the span name.
    pub operation_name: Cow<'static, str>,
    /// Dynamically typed tags.
    pub tags: HashMap<String, Value>,
    /// Logs recorded during the operation.
    pub logs: Vec<LogEntry>,
    /// Start offset in seconds.
    pub delay_seconds: u64,
    /// Duration in seconds.
    pub cost_seconds: u64,
    /// Final status.
    pub status: Status,
}

impl SpanInfo {
    /// Start a record for `operation_name` owned by `service_name`.
    pub fn new(
        service_name: impl Into<Cow<'static, str>>,
        operation_name: impl Into<Cow<'static, str>>,
    ) -> Self {
        SpanInfo {
            service_name: service_name.into(),
            operation_name: operation_name.into(),
            tags: HashMap::new(),
            logs: Vec::new(),
            delay_seconds: 0,
            cost_seconds: 0,
            status: Status::ok(),
        }
    }

    /// Add a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Append a log entry.
    pub fn with_log(mut self, log: LogEntry) -> Self {
        self.logs.push(log);
        self
    }

    /// Set the start offset and the duration, both in seconds.
    pub fn with_timing(mut self, delay_seconds: u64, cost_seconds: u64) -> Self {
        self.delay_seconds = delay_seconds;
        self.cost_seconds = cost_seconds;
        self
    }

    /// Set the final status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

/// An annotation event attached to a span.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// When the event occurred.
    pub timestamp: SystemTime,
    /// Human readable description.
    pub description: Cow<'static, str>,
    /// Encoded annotation attributes.
    pub attributes: Attributes,
}

impl From<&LogEntry> for Event {
    fn from(log: &LogEntry) -> Self {
        Event {
            timestamp: log.timestamp,
            description: Cow::Borrowed(USER_SUPPLIED_LOG),
            attributes: attributes::encode(&log.annotations),
        }
    }
}

/// A fully built span.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanData {
    /// Trace the span belongs to.
    pub trace_id: TraceId,
    /// Id of the span.
    pub span_id: SpanId,
    /// Id of the parent span, `None` for the root of a trace.
    pub parent_span_id: Option<SpanId>,
    /// Span name.
    pub name: Cow<'static, str>,
    /// Span kind.
    pub kind: SpanKind,
    /// Absolute start time.
    pub start_time: SystemTime,
    /// Absolute end time.
    pub end_time: SystemTime,
    /// Encoded span attributes.
    pub attributes: Attributes,
    /// Annotation events.
    pub events: Vec<Event>,
    /// Final status.
    pub status: Status,
}

impl SpanData {
    /// Whether this span is the root of its trace.
    pub fn is_root(&self) -> bool {
        self.parent_span_id.is_none()
    }
}

/// Ordered spans of one generator invocation.
///
/// Within a trace a parent always appears before its children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpanBatch(Vec<SpanData>);

impl SpanBatch {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        SpanBatch(Vec::with_capacity(capacity))
    }

    pub(crate) fn push(&mut self, span: SpanData) {
        self.0.push(span);
    }

    /// Consume the batch and return its spans.
    pub fn into_vec(self) -> Vec<SpanData> {
        self.0
    }

    /// Root spans, one per simulated request.
    pub fn roots(&self) -> impl Iterator<Item = &SpanData> {
        self.0.iter().filter(|span| span.is_root())
    }
}

impl Deref for SpanBatch {
    type Target = [SpanData];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for SpanBatch {
    type Item = SpanData;
    type IntoIter = std::vec::IntoIter<SpanData>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SpanBatch {
    type Item = &'a SpanData;
    type IntoIter = std::slice::Iter<'a, SpanData>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<SpanData>> for SpanBatch {
    fn from(spans: Vec<SpanData>) -> Self {
        SpanBatch(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeValue;

    #[test]
    fn span_info_builder_collects_tags_and_logs() {
        let info = SpanInfo::new("neo-api", "mget")
            .with_tag("count", 1000)
            .with_tag("source", "web")
            .with_log(LogEntry::now([("query", "mget 1,2,3,4...")]))
            .with_timing(9, 3)
            .with_status(Status::new(4, "DeadlineExceeded"));

        assert_eq!(info.tags.get("count"), Some(&Value::I64(1000)));
        assert_eq!(info.tags.get("source"), Some(&Value::from("web")));
        assert_eq!(info.logs.len(), 1);
        assert_eq!((info.delay_seconds, info.cost_seconds), (9, 3));
        assert!(!info.status.is_ok());
    }

    #[test]
    fn log_entry_becomes_user_supplied_event() {
        let log = LogEntry::now([("query", Value::from("select 1")), ("ratio", Value::from(0.5))]);
        let event = Event::from(&log);

        assert_eq!(event.timestamp, log.timestamp);
        assert_eq!(event.description, USER_SUPPLIED_LOG);
        assert_eq!(
            event.attributes.get("query"),
            Some(&AttributeValue::String("select 1".into()))
        );
        assert_eq!(event.attributes.len(), 1);
        assert_eq!(event.attributes.dropped_count(), 1);
    }

    #[test]
    fn default_status_is_ok() {
        assert!(Status::ok().is_ok());
        assert_eq!(Status::ok().message, "ok");
    }
}
