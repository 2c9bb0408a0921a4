//! Id Generator
#[cfg(any(feature = "testing", test))]
pub use increment::IncrementIdGenerator;

use crate::trace::{SpanId, TraceId};
use rand::{rngs, RngCore, SeedableRng};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Interface for generating IDs
pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// Generate a new `TraceId`
    fn new_trace_id(&self) -> TraceId;

    /// Generate a new `SpanId`
    fn new_span_id(&self) -> SpanId;
}

/// Seed material of a [`DefaultIdGenerator`].
///
/// [`IdSeed::from_entropy`] draws every field from the operating system's
/// entropy source. Tests can build a seed by hand to get a reproducible
/// sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdSeed {
    /// Seed of the pseudo-random source behind trace ids.
    pub rng_seed: u64,
    /// Constants added to the low and high halves of every trace id.
    pub trace_id_add: [u64; 2],
    /// Starting value of the span id counter.
    pub next_span_id: u64,
    /// Span id stride. Forced odd when the generator is built.
    pub span_id_inc: u64,
}

impl IdSeed {
    /// Draws all seed material from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        let mut os = rngs::StdRng::from_os_rng();
        IdSeed {
            rng_seed: os.next_u64(),
            trace_id_add: [os.next_u64(), os.next_u64()],
            next_span_id: os.next_u64(),
            span_id_inc: os.next_u64(),
        }
    }
}

/// Default [`IdGenerator`] implementation.
///
/// Span ids walk a counter with a per-process odd stride, so the sequence
/// visits every 64-bit value once before it repeats. The counter is advanced
/// with a single atomic add and never takes a lock.
///
/// Trace ids are two draws of a seeded pseudo-random source, each offset by a
/// per-process constant. The source is not shareable, so both draws happen
/// under one mutex that is held for nothing else.
///
/// One instance is meant to live for the whole process and be passed by
/// reference to every builder.
pub struct DefaultIdGenerator {
    trace_id_rng: Mutex<rngs::SmallRng>,
    trace_id_add: [u64; 2],
    next_span_id: AtomicU64,
    span_id_inc: u64,
}

impl DefaultIdGenerator {
    /// Create a generator seeded from the operating system's entropy source.
    pub fn new() -> Self {
        Self::from_seed(IdSeed::from_entropy())
    }

    /// Create a generator from explicit seed material.
    pub fn from_seed(seed: IdSeed) -> Self {
        DefaultIdGenerator {
            trace_id_rng: Mutex::new(rngs::SmallRng::seed_from_u64(seed.rng_seed)),
            trace_id_add: seed.trace_id_add,
            next_span_id: AtomicU64::new(seed.next_span_id),
            span_id_inc: seed.span_id_inc | 1,
        }
    }
}

impl Default for DefaultIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DefaultIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultIdGenerator")
            .field("span_id_inc", &self.span_id_inc)
            .finish_non_exhaustive()
    }
}

impl IdGenerator for DefaultIdGenerator {
    fn new_trace_id(&self) -> TraceId {
        let (low, high) = {
            // the rng state is valid after any panic, a poisoned lock is safe to reuse
            let mut rng = self
                .trace_id_rng
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            (
                rng.next_u64().wrapping_add(self.trace_id_add[0]),
                rng.next_u64().wrapping_add(self.trace_id_add[1]),
            )
        };

        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&low.to_le_bytes());
        bytes[8..].copy_from_slice(&high.to_le_bytes());
        TraceId::from_bytes(bytes)
    }

    fn new_span_id(&self) -> SpanId {
        loop {
            let id = self
                .next_span_id
                .fetch_add(self.span_id_inc, Ordering::Relaxed)
                .wrapping_add(self.span_id_inc);
            if id != 0 {
                return SpanId::from_bytes(id.to_le_bytes());
            }
        }
    }
}

#[cfg(any(feature = "testing", test))]
mod increment {
    use crate::trace::{IdGenerator, SpanId, TraceId};
    use std::sync::atomic::AtomicU64;
    use std::sync::Arc;

    /// [`IdGenerator`] implementation that increments a counter for each new ID. This helps produce
    /// predictable IDs for testing.
    #[derive(Clone, Debug)]
    pub struct IncrementIdGenerator(Arc<AtomicU64>);

    impl IncrementIdGenerator {
        /// Create a new [`IncrementIdGenerator`]
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Default for IncrementIdGenerator {
        fn default() -> Self {
            Self(Arc::new(AtomicU64::new(1)))
        }
    }

    impl IdGenerator for IncrementIdGenerator {
        fn new_trace_id(&self) -> TraceId {
            TraceId::from(self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst) as u128)
        }

        fn new_span_id(&self) -> SpanId {
            SpanId::from(self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst))
        }
    }
}
