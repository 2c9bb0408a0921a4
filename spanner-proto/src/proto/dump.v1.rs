/// A batch of spans serialized together into one transport record.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DumpSpans {
    /// Spans in construction order.
    #[prost(message, repeated, tag="1")]
    pub spans: ::prost::alloc::vec::Vec<super::super::opencensus::trace::v1::Span>,
}
