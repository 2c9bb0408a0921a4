/// A span represents a single operation within a trace. Spans can be
/// nested to form a trace tree. Often, a trace contains a root span
/// that describes the end-to-end latency, and one or more subspans for
/// its sub-operations.
///
/// The next available field id is 17.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Span {
    /// A unique identifier for a trace. All spans from the same trace share
    /// the same `trace_id`. The ID is a 16-byte array. An ID with all zeroes
    /// is considered invalid.
    ///
    /// This field is required.
    #[prost(bytes="vec", tag="1")]
    pub trace_id: ::prost::alloc::vec::Vec<u8>,
    /// A unique identifier for a span within a trace, assigned when the span
    /// is created. The ID is an 8-byte array. An ID with all zeroes is considered
    /// invalid.
    ///
    /// This field is required.
    #[prost(bytes="vec", tag="2")]
    pub span_id: ::prost::alloc::vec::Vec<u8>,
    /// The `span_id` of this span's parent span. If this is a root span, then this
    /// field must be empty. The ID is an 8-byte array.
    #[prost(bytes="vec", tag="3")]
    pub parent_span_id: ::prost::alloc::vec::Vec<u8>,
    /// A description of the span's operation.
    ///
    /// For example, the name can be a qualified method name or a file name
    /// and a line number where the operation is called. A best practice is to use
    /// the same display name at the same call point in an application.
    /// This makes it easier to correlate spans in different traces.
    ///
    /// This field is required.
    #[prost(message, optional, tag="4")]
    pub name: ::core::option::Option<TruncatableString>,
    /// The start time of the span. On the client side, this is the time kept by
    /// the local machine where the span execution starts. On the server side, this
    /// is the time when the server's application handler starts running.
    ///
    /// This field is semantically required. When not set on receive -
    /// receiver should set it to the value of end_time field if it was
    /// set. Or to the current time if neither was set.
    #[prost(message, optional, tag="5")]
    pub start_time: ::core::option::Option<::prost_types::Timestamp>,
    /// The end time of the span. On the client side, this is the time kept by
    /// the local machine where the span execution ends. On the server side, this
    /// is the time when the server application handler stops running.
    ///
    /// This field is semantically required. When not set on receive -
    /// receiver should set it to start_time value.
    #[prost(message, optional, tag="6")]
    pub end_time: ::core::option::Option<::prost_types::Timestamp>,
    /// A set of attributes on the span.
    #[prost(message, optional, tag="7")]
    pub attributes: ::core::option::Option<span::Attributes>,
    /// The included time events.
    #[prost(message, optional, tag="9")]
    pub time_events: ::core::option::Option<span::TimeEvents>,
    /// An optional final status for this span. Semantically when Status
    /// wasn't set it is means span ended without errors and assume
    /// Status.Ok (code = 0).
    #[prost(message, optional, tag="11")]
    pub status: ::core::option::Option<Status>,
    /// Distinguishes between spans generated in a particular context. For example,
    /// two spans with the same name may be distinguished using `CLIENT` (caller)
    /// and `SERVER` (callee) to identify queueing latency associated with the span.
    #[prost(enumeration="span::SpanKind", tag="14")]
    pub kind: i32,
}
/// Nested message and enum types in `Span`.
pub mod span {
    /// A set of attributes, each with a key and a value.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Attributes {
        /// The set of attributes. The value can be a string, an integer, a double
        /// or the Boolean values `true` or `false`. Note, global attributes like
        /// server name can be set as tags using resource API. Examples of attributes:
        ///
        ///      "/http/user_agent": "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36"
        ///      "/http/server_latency": 300
        ///      "abc.com/myattribute": true
        ///      "abc.com/score": 10.239
        #[prost(btree_map="string, message", tag="1")]
        pub attribute_map: ::prost::alloc::collections::BTreeMap<::prost::alloc::string::String, super::AttributeValue>,
        /// The number of attributes that were discarded. Attributes can be discarded
        /// because their keys are too long or because there are too many attributes.
        /// If this value is 0, then no attributes were dropped.
        #[prost(int32, tag="2")]
        pub dropped_attributes_count: i32,
    }
    /// A time-stamped annotation or message event in the Span.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TimeEvent {
        /// The time the event occurred.
        #[prost(message, optional, tag="1")]
        pub time: ::core::option::Option<::prost_types::Timestamp>,
        /// A `TimeEvent` can contain either an `Annotation` object or a
        /// `MessageEvent` object, but not both.
        #[prost(oneof="time_event::Value", tags="2")]
        pub value: ::core::option::Option<time_event::Value>,
    }
    /// Nested message and enum types in `TimeEvent`.
    pub mod time_event {
        /// A text annotation with a set of attributes.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Annotation {
            /// A user-supplied message describing the event.
            #[prost(message, optional, tag="1")]
            pub description: ::core::option::Option<super::super::TruncatableString>,
            /// A set of attributes on the annotation.
            #[prost(message, optional, tag="2")]
            pub attributes: ::core::option::Option<super::Attributes>,
        }
        /// A `TimeEvent` can contain either an `Annotation` object or a
        /// `MessageEvent` object, but not both.
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Value {
            /// A text annotation with a set of attributes.
            #[prost(message, tag="2")]
            Annotation(Annotation),
        }
    }
    /// A collection of `TimeEvent`s. A `TimeEvent` is a time-stamped annotation
    /// on the span, consisting of either user-supplied key-value pairs, or
    /// details of a message sent/received between Spans.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TimeEvents {
        /// A collection of `TimeEvent`s.
        #[prost(message, repeated, tag="1")]
        pub time_event: ::prost::alloc::vec::Vec<TimeEvent>,
        /// The number of dropped annotations in all the included time events.
        /// If the value is 0, then no annotations were dropped.
        #[prost(int32, tag="2")]
        pub dropped_annotations_count: i32,
        /// The number of dropped message events in all the included time events.
        /// If the value is 0, then no message events were dropped.
        #[prost(int32, tag="3")]
        pub dropped_message_events_count: i32,
    }
    /// Type of span. Can be used to specify additional relationships between spans
    /// in addition to a parent/child relationship.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum SpanKind {
        /// Unspecified.
        Unspecified = 0,
        /// Indicates that the span covers server-side handling of an RPC or other
        /// remote network request.
        Server = 1,
        /// Indicates that the span covers the client-side wrapper around an RPC or
        /// other remote request.
        Client = 2,
    }
    impl SpanKind {
        /// String value of the enum field names used in the ProtoBuf definition.
        ///
        /// The values are not transformed in any way and thus are considered stable
        /// (if the ProtoBuf definition does not change) and safe for programmatic use.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                SpanKind::Unspecified => "SPAN_KIND_UNSPECIFIED",
                SpanKind::Server => "SERVER",
                SpanKind::Client => "CLIENT",
            }
        }
        /// Creates an enum from field names used in the ProtoBuf definition.
        pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
            match value {
                "SPAN_KIND_UNSPECIFIED" => Some(Self::Unspecified),
                "SERVER" => Some(Self::Server),
                "CLIENT" => Some(Self::Client),
                _ => None,
            }
        }
    }
}
/// The `Status` type defines a logical error model that is suitable for different
/// programming environments, including REST APIs and RPC APIs. This proto's fields
/// are a subset of those of
/// [google.rpc.Status](<https://github.com/googleapis/googleapis/blob/master/google/rpc/status.proto>),
/// which is used by [gRPC](<https://github.com/grpc>).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Status {
    /// The status code. This is optional field. It is safe to assume 0 (OK)
    /// when not set.
    #[prost(int32, tag="1")]
    pub code: i32,
    /// A developer-facing error message, which should be in English.
    #[prost(string, tag="2")]
    pub message: ::prost::alloc::string::String,
}
/// The value of an Attribute.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AttributeValue {
    /// The type of the value.
    #[prost(oneof="attribute_value::Value", tags="1, 2, 3, 4")]
    pub value: ::core::option::Option<attribute_value::Value>,
}
/// Nested message and enum types in `AttributeValue`.
pub mod attribute_value {
    /// The type of the value.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        /// A string up to 256 bytes long.
        #[prost(message, tag="1")]
        StringValue(super::TruncatableString),
        /// A 64-bit signed integer.
        #[prost(int64, tag="2")]
        IntValue(i64),
        /// A Boolean value represented by `true` or `false`.
        #[prost(bool, tag="3")]
        BoolValue(bool),
        /// A double value.
        #[prost(double, tag="4")]
        DoubleValue(f64),
    }
}
/// A string that might be shortened to a specified length.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TruncatableString {
    /// The shortened string. For example, if the original string was 500 bytes long and
    /// the limit of the string was 128 bytes, then this value contains the first 128
    /// bytes of the 500-byte string. Note that truncation always happens on a
    /// character boundary, to ensure that a truncated string is still valid UTF-8.
    /// Because it may contain multi-byte characters, the size of the truncated string
    /// may be less than the truncation limit.
    #[prost(string, tag="1")]
    pub value: ::prost::alloc::string::String,
    /// The number of bytes removed from the original string. If this
    /// value is 0, then the string was not shortened.
    #[prost(int32, tag="2")]
    pub truncated_byte_count: i32,
}
