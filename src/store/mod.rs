//! In-memory reference implementations of the engine's collaborator traits.
//!
//! These back the HTTP service and the test suite. Each store is a
//! `Mutex`-guarded map or vector; the run store additionally provides the
//! compare-and-set and period-idempotency guarantees its trait demands.

mod memory;

pub use memory::{
    FailingAuditSink, InMemoryAttendance, InMemoryAuditLog, InMemoryDirectory, InMemoryRequests,
    InMemoryRunStore,
};
