use crate::proto::dump::v1::DumpSpans;
use crate::proto::opencensus::trace::v1::{span, Span, Status};
use crate::transform::common::to_timestamp;
use prost::Message;
use spanner::spanner_debug;
use spanner::trace::{self, Event, SpanData, SpanKind};
use thiserror::Error;

/// Result of batch encoding.
pub type EncodeResult<T> = Result<T, EncodingError>;

/// Why a span cannot be put on the wire.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidSpan {
    /// The trace id is all zeroes.
    #[error("invalid trace id")]
    TraceId,

    /// The span id is all zeroes.
    #[error("invalid span id")]
    SpanId,

    /// The parent span id is all zeroes.
    #[error("invalid parent span id")]
    ParentSpanId,

    /// The span ends before it starts.
    #[error("end time precedes start time")]
    EndBeforeStart,

    /// A span or event time cannot be expressed as a protobuf timestamp.
    #[error("time before the unix epoch or out of range")]
    TimestampOutOfRange,
}

/// Errors returned by [`serialize`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EncodingError {
    /// A span in the batch is structurally invalid. No bytes are produced.
    #[error("span {index} cannot be encoded: {reason}")]
    InvalidSpan {
        /// Position of the span in the batch.
        index: usize,
        /// What is wrong with it.
        reason: InvalidSpan,
    },

    /// Protobuf encoding failed.
    #[error(transparent)]
    Prost(#[from] prost::EncodeError),
}

/// Errors returned by [`deserialize`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DecodingError {
    /// The bytes are not a valid `DumpSpans` message.
    #[error(transparent)]
    Prost(#[from] prost::DecodeError),
}

impl From<SpanKind> for span::SpanKind {
    fn from(span_kind: SpanKind) -> Self {
        match span_kind {
            SpanKind::Server => span::SpanKind::Server,
            SpanKind::Client => span::SpanKind::Client,
        }
    }
}

impl From<&trace::Status> for Status {
    fn from(status: &trace::Status) -> Self {
        Status {
            code: status.code,
            message: status.message.to_string(),
        }
    }
}

impl TryFrom<&Event> for span::TimeEvent {
    type Error = InvalidSpan;

    fn try_from(event: &Event) -> Result<Self, Self::Error> {
        Ok(span::TimeEvent {
            time: Some(to_timestamp(event.timestamp).ok_or(InvalidSpan::TimestampOutOfRange)?),
            value: Some(span::time_event::Value::Annotation(
                span::time_event::Annotation {
                    description: Some((&*event.description).into()),
                    attributes: Some((&event.attributes).into()),
                },
            )),
        })
    }
}

impl TryFrom<&SpanData> for Span {
    type Error = InvalidSpan;

    fn try_from(source_span: &SpanData) -> Result<Self, Self::Error> {
        if !source_span.trace_id.is_valid() {
            return Err(InvalidSpan::TraceId);
        }
        if !source_span.span_id.is_valid() {
            return Err(InvalidSpan::SpanId);
        }
        let parent_span_id = match source_span.parent_span_id {
            Some(parent) if !parent.is_valid() => return Err(InvalidSpan::ParentSpanId),
            Some(parent) => parent.as_bytes().to_vec(),
            None => vec![],
        };
        if source_span.end_time < source_span.start_time {
            return Err(InvalidSpan::EndBeforeStart);
        }
        let start_time =
            to_timestamp(source_span.start_time).ok_or(InvalidSpan::TimestampOutOfRange)?;
        let end_time =
            to_timestamp(source_span.end_time).ok_or(InvalidSpan::TimestampOutOfRange)?;
        let time_event = source_span
            .events
            .iter()
            .map(span::TimeEvent::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let span_kind: span::SpanKind = source_span.kind.into();

        Ok(Span {
            trace_id: source_span.trace_id.as_bytes().to_vec(),
            span_id: source_span.span_id.as_bytes().to_vec(),
            parent_span_id,
            name: Some((&*source_span.name).into()),
            start_time: Some(start_time),
            end_time: Some(end_time),
            attributes: Some((&source_span.attributes).into()),
            time_events: Some(span::TimeEvents {
                time_event,
                dropped_annotations_count: 0,
                dropped_message_events_count: 0,
            }),
            status: Some((&source_span.status).into()),
            kind: span_kind as i32,
        })
    }
}

/// Serializes `spans` into one `DumpSpans` message, keeping their order.
///
/// Encoding the same spans twice yields identical bytes.
///
/// # Errors
///
/// Fails without producing any bytes if one of the spans is structurally
/// invalid.
pub fn serialize(spans: &[SpanData]) -> EncodeResult<Vec<u8>> {
    let spans = spans
        .iter()
        .enumerate()
        .map(|(index, span)| {
            Span::try_from(span).map_err(|reason| EncodingError::InvalidSpan { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let dump = DumpSpans { spans };

    let mut buf = Vec::with_capacity(dump.encoded_len());
    dump.encode(&mut buf)?;
    spanner_debug!(
        name: "DumpSpans.Encoded",
        spans = dump.spans.len(),
        bytes = buf.len(),
    );
    Ok(buf)
}

/// Decodes a payload produced by [`serialize`].
pub fn deserialize(bytes: &[u8]) -> Result<DumpSpans, DecodingError> {
    Ok(DumpSpans::decode(bytes)?)
}
