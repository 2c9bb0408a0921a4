use spanner::trace::{build_request_trees, keys, DefaultIdGenerator, SpanData, SPANS_PER_TREE};
use spanner::AttributeValue;
use spanner_proto::opencensus::trace::v1::{attribute_value, span, Span};
use spanner_proto::{deserialize, serialize};
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::time::UNIX_EPOCH;

fn build(count: usize) -> Vec<SpanData> {
    let generator = DefaultIdGenerator::new();
    let count = NonZeroUsize::new(count).expect("count is positive");
    build_request_trees(&generator, count).into_vec()
}

fn nanos(timestamp: &Option<prost_types::Timestamp>) -> i128 {
    let timestamp = timestamp.as_ref().expect("timestamp is set");
    i128::from(timestamp.seconds) * 1_000_000_000 + i128::from(timestamp.nanos)
}

fn assert_same_span(source: &SpanData, decoded: &Span) {
    assert_eq!(decoded.trace_id, source.trace_id.to_bytes());
    assert_eq!(decoded.span_id, source.span_id.to_bytes());
    assert_eq!(
        decoded.parent_span_id,
        source
            .parent_span_id
            .map(|id| id.to_bytes().to_vec())
            .unwrap_or_default()
    );
    assert_eq!(
        decoded.name.as_ref().map(|name| name.value.as_str()),
        Some(&*source.name)
    );

    let since_epoch = |time: std::time::SystemTime| {
        time.duration_since(UNIX_EPOCH)
            .expect("after epoch")
            .as_nanos() as i128
    };
    assert_eq!(nanos(&decoded.start_time), since_epoch(source.start_time));
    assert_eq!(nanos(&decoded.end_time), since_epoch(source.end_time));

    let status = decoded.status.as_ref().expect("status is set");
    assert_eq!(status.code, source.status.code);
    assert_eq!(status.message, source.status.message);

    let attributes = decoded.attributes.as_ref().expect("attributes are set");
    assert_eq!(attributes.attribute_map.len(), source.attributes.len());
    for (key, value) in source.attributes.iter() {
        let expected = match value {
            AttributeValue::String(val) => attribute_value::Value::StringValue(val.as_str().into()),
            AttributeValue::Bool(val) => attribute_value::Value::BoolValue(*val),
            AttributeValue::I64(val) => attribute_value::Value::IntValue(*val),
        };
        assert_eq!(attributes.attribute_map[key].value, Some(expected), "key {key}");
    }

    let events = &decoded.time_events.as_ref().expect("time events are set").time_event;
    assert_eq!(events.len(), source.events.len());
}

#[test]
fn decoded_batch_matches_source_spans() {
    let spans = build(3);
    let decoded = deserialize(&serialize(&spans).expect("valid batch")).expect("decodes");

    assert_eq!(decoded.spans.len(), 3 * SPANS_PER_TREE);
    for (source, decoded) in spans.iter().zip(&decoded.spans) {
        assert_same_span(source, decoded);
    }
}

#[test]
fn decoded_trees_are_well_formed() {
    let decoded = deserialize(&serialize(&build(4)).expect("valid batch")).expect("decodes");

    let trace_ids: HashSet<_> = decoded.spans.iter().map(|s| s.trace_id.clone()).collect();
    assert_eq!(trace_ids.len(), 4);

    for tree in decoded.spans.chunks(SPANS_PER_TREE) {
        let roots: Vec<_> = tree.iter().filter(|s| s.parent_span_id.is_empty()).collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].kind, span::SpanKind::Server as i32);

        let ids: HashSet<_> = tree.iter().map(|s| s.span_id.clone()).collect();
        assert_eq!(ids.len(), SPANS_PER_TREE);
        for child in tree.iter().filter(|s| !s.parent_span_id.is_empty()) {
            assert!(ids.contains(&child.parent_span_id));
            assert!(nanos(&child.end_time) >= nanos(&child.start_time));
        }

        for span in tree {
            let attributes = span.attributes.as_ref().expect("attributes are set");
            assert!(attributes.attribute_map.contains_key(keys::SERVICE_NAME));
            assert!(attributes.attribute_map.contains_key(keys::REMOTE_KIND));
        }
    }
}
