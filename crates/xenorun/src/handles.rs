//! Type-safe handles for the two id spaces that cross the boundary.
//!
//! Instead of raw integers, xenorun uses strongly-typed handles to prevent
//! accidental confusion between resource kinds.
//!
//! This "Go-style" safety means you can't accidentally pass a PollId where a
//! FutureHandle is expected - the type system catches it at compile time.

/// Handle to one poll cycle's registered resolver.
///
/// Issued when a poll cycle begins; the foreign side hands it back through
/// the continuation callback to identify which pending poll it is reporting
/// on. No semantic meaning beyond identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PollId(pub u64);

/// Opaque token for one in-flight foreign asynchronous operation.
///
/// Owned by the foreign side until explicitly freed; the bridge treats it as
/// a resource requiring exactly-once release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FutureHandle(pub u64);
