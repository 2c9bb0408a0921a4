//! Builds the simulated user-profile request.
//!
//! ```text
//! |----neo-api---------------------------------------------------------------|
//!   |---grpc client-------|
//!     |---grpc server---|
//!       |--mysql client-|
//!                           |---mysql client---|
//!                           |---redis client---|
//! ```
use crate::attributes::{self, Value};
use crate::trace::{
    Event, IdGenerator, LogEntry, SpanBatch, SpanData, SpanId, SpanInfo, SpanKind, Status, TraceId,
};
use std::num::NonZeroUsize;
use std::time::{Duration, SystemTime};

/// Number of spans in one simulated request.
pub const SPANS_PER_TREE: usize = 6;

const MAX_PREALLOCATED_SPANS: usize = 1 << 16;

/// Tag keys and values used by the simulated request.
pub mod keys {
    /// Service owning the span. Injected into every span.
    pub const SERVICE_NAME: &str = "service_name";
    /// Protocol of the remote side of the span.
    pub const REMOTE_KIND: &str = "remote_kind";
    /// Query text recorded in log annotations.
    pub const QUERY: &str = "query";

    /// `remote_kind` of RPC spans.
    pub const REMOTE_KIND_GRPC: &str = "grpc";
    /// `remote_kind` of the HTTP entry point.
    pub const REMOTE_KIND_HTTP: &str = "http";
    /// `remote_kind` of SQL datastore calls.
    pub const REMOTE_KIND_MYSQL: &str = "mysql";
    /// `remote_kind` of cache calls.
    pub const REMOTE_KIND_REDIS: &str = "redis";
}

const API_SERVICE: &str = "neo-api";
const USER_SERVICE: &str = "user-svc";
const UID: i64 = 123456;

/// Builds span trees, drawing every id from one [`IdGenerator`].
#[derive(Clone, Copy, Debug)]
pub struct TreeBuilder<'a> {
    id_generator: &'a dyn IdGenerator,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder backed by `id_generator`.
    pub fn new(id_generator: &'a dyn IdGenerator) -> Self {
        TreeBuilder { id_generator }
    }

    /// Build `count` independent request trees, each with a fresh trace id.
    ///
    /// Spans are returned in construction order: the root of each tree first,
    /// then its children in the fixed order of the simulated request.
    pub fn build_request_trees(&self, count: NonZeroUsize) -> SpanBatch {
        let mut batch = SpanBatch::with_capacity(batch_capacity(count));
        for _ in 0..count.get() {
            self.build_request_tree(&mut batch);
        }
        spanner_debug!(
            name: "TreeBuilder.BatchBuilt",
            trees = count.get(),
            spans = batch.len(),
        );
        batch
    }

    fn build_request_tree(&self, batch: &mut SpanBatch) {
        let root = self.root_span(profile_request());
        let trace_id = root.trace_id;
        let root_id = root.span_id;
        batch.push(root);

        let rpc_client = self.child_span(trace_id, root_id, SpanKind::Client, rpc_client());
        let rpc_client_id = rpc_client.span_id;
        batch.push(rpc_client);

        let rpc_server = self.child_span(trace_id, rpc_client_id, SpanKind::Server, rpc_server());
        let rpc_server_id = rpc_server.span_id;
        batch.push(rpc_server);

        batch.push(self.child_span(trace_id, rpc_server_id, SpanKind::Client, rpc_server_query()));
        batch.push(self.child_span(trace_id, root_id, SpanKind::Client, profile_query()));
        batch.push(self.child_span(trace_id, root_id, SpanKind::Client, cache_lookup()));
    }

    fn root_span(&self, info: SpanInfo) -> SpanData {
        let trace_id = self.id_generator.new_trace_id();
        self.build_span(trace_id, None, SpanKind::Server, info)
    }

    fn child_span(
        &self,
        trace_id: TraceId,
        parent_span_id: SpanId,
        kind: SpanKind,
        info: SpanInfo,
    ) -> SpanData {
        self.build_span(trace_id, Some(parent_span_id), kind, info)
    }

    fn build_span(
        &self,
        trace_id: TraceId,
        parent_span_id: Option<SpanId>,
        kind: SpanKind,
        mut info: SpanInfo,
    ) -> SpanData {
        info.tags.insert(
            keys::SERVICE_NAME.to_string(),
            Value::from(info.service_name.to_string()),
        );

        // every span anchors its times on its own construction instant
        let now = SystemTime::now();
        let span_id = self.id_generator.new_span_id();
        let start_time = now + Duration::from_secs(info.delay_seconds);
        let end_time = start_time + Duration::from_secs(info.cost_seconds);

        SpanData {
            trace_id,
            span_id,
            parent_span_id,
            name: info.operation_name,
            kind,
            start_time,
            end_time,
            attributes: attributes::encode(&info.tags),
            events: info.logs.iter().map(Event::from).collect(),
            status: info.status,
        }
    }
}

/// Spans to reserve up front. The batch grows past this if needed.
fn batch_capacity(count: NonZeroUsize) -> usize {
    count
        .get()
        .saturating_mul(SPANS_PER_TREE)
        .min(MAX_PREALLOCATED_SPANS)
}

/// Build `count` request trees with ids drawn from `id_generator`.
pub fn build_request_trees(id_generator: &dyn IdGenerator, count: NonZeroUsize) -> SpanBatch {
    TreeBuilder::new(id_generator).build_request_trees(count)
}

fn profile_request() -> SpanInfo {
    SpanInfo::new(API_SERVICE, "/api/user/:uid/profile")
        .with_tag(keys::REMOTE_KIND, keys::REMOTE_KIND_HTTP)
        .with_tag("uid", UID)
        .with_log(LogEntry::now([(
            keys::QUERY,
            "/api/user/123456/profile?from=web&version=1.0.1...",
        )]))
        .with_timing(0, 10)
}

fn rpc_client() -> SpanInfo {
    SpanInfo::new(API_SERVICE, "GetUserProfile")
        .with_tag(keys::REMOTE_KIND, keys::REMOTE_KIND_GRPC)
        .with_tag("uid", UID)
        .with_tag("source", "web")
        .with_timing(1, 4)
        .with_status(Status::new(4, "DeadlineExceeded"))
}

fn rpc_server() -> SpanInfo {
    SpanInfo::new(USER_SERVICE, "GetUserProfile")
        .with_tag(keys::REMOTE_KIND, keys::REMOTE_KIND_GRPC)
        .with_tag("uid", UID)
        .with_tag("source", "web")
        .with_timing(2, 6)
}

fn rpc_server_query() -> SpanInfo {
    SpanInfo::new(USER_SERVICE, "select")
        .with_tag(keys::REMOTE_KIND, keys::REMOTE_KIND_MYSQL)
        .with_tag("uid", UID)
        .with_tag("source", "grpc")
        .with_log(LogEntry::now([(
            keys::QUERY,
            "select * from user where uid=123456",
        )]))
        .with_timing(3, 5)
}

fn profile_query() -> SpanInfo {
    SpanInfo::new(API_SERVICE, "select")
        .with_tag(keys::REMOTE_KIND, keys::REMOTE_KIND_MYSQL)
        .with_tag("uid", UID)
        .with_tag("source", "web")
        .with_log(LogEntry::now([(
            keys::QUERY,
            "select * from profile where uid=123456",
        )]))
        .with_timing(9, 3)
}

fn cache_lookup() -> SpanInfo {
    SpanInfo::new(API_SERVICE, "mget")
        .with_tag(keys::REMOTE_KIND, keys::REMOTE_KIND_REDIS)
        .with_tag("uid", UID)
        .with_tag("source", "web")
        // number of keys in the batch lookup
        .with_tag("count", 1000)
        .with_log(LogEntry::now([(keys::QUERY, "mget 1,2,3,4...")]))
        .with_timing(9, 3)
}
