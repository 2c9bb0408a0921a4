/// Generated types for the OpenCensus protocol.
pub mod opencensus {
    /// Trace messages.
    pub mod trace {
        /// Version 1 of the trace messages.
        #[allow(missing_docs)]
        pub mod v1 {
            include!("proto/opencensus.proto.trace.v1.rs");
        }
    }
}

/// Generated types for the batch container.
pub mod dump {
    /// Version 1 of the container.
    #[allow(missing_docs)]
    pub mod v1 {
        include!("proto/dump.v1.rs");
    }
}
