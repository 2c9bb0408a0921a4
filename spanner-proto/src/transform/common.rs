use crate::proto::opencensus::trace::v1::{
    attribute_value, span, AttributeValue, TruncatableString,
};
use spanner::{AttributeValue as SourceValue, Attributes};
use std::time::{SystemTime, UNIX_EPOCH};

/// Converts `time` into a protobuf timestamp.
///
/// Returns `None` for times before the Unix epoch or past the range of the
/// timestamp's seconds field.
pub(crate) fn to_timestamp(time: SystemTime) -> Option<prost_types::Timestamp> {
    let since_epoch = time.duration_since(UNIX_EPOCH).ok()?;
    Some(prost_types::Timestamp {
        seconds: i64::try_from(since_epoch.as_secs()).ok()?,
        // always below one billion
        nanos: since_epoch.subsec_nanos() as i32,
    })
}

impl From<&str> for TruncatableString {
    fn from(value: &str) -> Self {
        TruncatableString {
            value: value.to_string(),
            truncated_byte_count: 0,
        }
    }
}

impl From<&SourceValue> for AttributeValue {
    fn from(value: &SourceValue) -> Self {
        AttributeValue {
            value: Some(match value {
                SourceValue::String(val) => {
                    attribute_value::Value::StringValue(val.as_str().into())
                }
                SourceValue::Bool(val) => attribute_value::Value::BoolValue(*val),
                SourceValue::I64(val) => attribute_value::Value::IntValue(*val),
            }),
        }
    }
}

impl From<&Attributes> for span::Attributes {
    fn from(attributes: &Attributes) -> Self {
        span::Attributes {
            attribute_map: attributes
                .iter()
                .map(|(key, value)| (key.to_string(), value.into()))
                .collect(),
            dropped_attributes_count: i32::try_from(attributes.dropped_count())
                .unwrap_or(i32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanner::attributes::encode;
    use spanner::Value;
    use std::collections::HashMap;
    use std::time::Duration;

    #[test]
    fn timestamp_keeps_sub_second_precision() {
        let time = UNIX_EPOCH + Duration::new(1_700_000_000, 123_456_789);
        assert_eq!(
            to_timestamp(time),
            Some(prost_types::Timestamp {
                seconds: 1_700_000_000,
                nanos: 123_456_789,
            })
        );
    }

    #[test]
    fn timestamp_before_epoch_is_rejected() {
        assert_eq!(to_timestamp(UNIX_EPOCH - Duration::from_secs(1)), None);
    }

    #[test]
    fn attributes_carry_values_and_dropped_count() {
        let tags: HashMap<String, Value> = [
            ("uid", Value::from(123456)),
            ("source", Value::from("web")),
            ("cached", Value::from(false)),
            ("ratio", Value::from(0.25)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let wire = span::Attributes::from(&encode(&tags));

        assert_eq!(wire.dropped_attributes_count, 1);
        assert_eq!(
            wire.attribute_map.keys().collect::<Vec<_>>(),
            vec!["cached", "source", "uid"]
        );
        assert_eq!(
            wire.attribute_map["uid"].value,
            Some(attribute_value::Value::IntValue(123456))
        );
        assert_eq!(
            wire.attribute_map["source"].value,
            Some(attribute_value::Value::StringValue("web".into()))
        );
        assert_eq!(
            wire.attribute_map["cached"].value,
            Some(attribute_value::Value::BoolValue(false))
        );
    }
}
