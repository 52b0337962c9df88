//! The contract between the bridge and the foreign side.
//!
//! The foreign side cannot push results; it can only be polled, and it
//! signals "done polling" by invoking a caller-supplied callback from an
//! unspecified execution context. This module defines the narrow,
//! function-shaped surface the bridge consumes - everything else about the
//! foreign call (marshalling, wire formats, per-method signatures) stays
//! outside.

use crate::handles::FutureHandle;
use crate::handles::PollId;
use crate::status::CallStatus;

/// The function shape the foreign side reports poll progress through.
///
/// The foreign side receives this together with a [`PollId`] and must
/// invoke it exactly once per poll request - possibly on the same call
/// stack, possibly later from another thread. The second argument is a raw
/// [`PollResult`](crate::PollResult) wire code; anything outside `{0, 1}`
/// is a fatal protocol violation.
///
/// A plain `fn` pointer, not a closure: at a real ABI edge the only things
/// that can cross are a static callback and an opaque handle, which is why
/// the resolver registry exists at all.
pub type Continuation = fn(PollId, u8);

/// One poll-driven foreign asynchronous operation, observable only through
/// start/poll/cancel/complete/free.
///
/// Implement this trait to bridge a foreign concurrency primitive into a
/// native `async` call via [`bridge_call`](crate::bridge_call).
///
/// # Protocol
///
/// 1. `start` begins the operation and yields its [`FutureHandle`].
/// 2. `poll` is called repeatedly; each call must eventually invoke the
///    continuation exactly once with a poll result code.
/// 3. Once `Ready` is reported, `complete` retrieves the final payload.
/// 4. `free` releases the foreign resources. The bridge calls it exactly
///    once, on every outcome; implementations need not make it idempotent.
pub trait ForeignCall: Send + Sync + 'static {
    /// Raw successful payload, converted by the caller's lift function.
    type Raw: Send;

    /// Begin the foreign operation. Called at most once per bridged call.
    fn start(&self) -> FutureHandle;

    /// Ask the foreign side to make progress on `fut`.
    ///
    /// The implementation must arrange for `continuation(id, code)` to be
    /// invoked exactly once - immediately or later, on any thread.
    fn poll(&self, fut: FutureHandle, continuation: Continuation, id: PollId);

    /// Best-effort cooperative cancellation request. May be a no-op on the
    /// foreign side; the poll loop remains the sole authority on readiness.
    fn cancel(&self, fut: FutureHandle);

    /// Retrieve the final raw payload and completion status.
    ///
    /// Called exactly once, only after a poll cycle reported `Ready`.
    fn complete(&self, fut: FutureHandle) -> (Self::Raw, CallStatus);

    /// Release all foreign resources held by `fut`.
    fn free(&self, fut: FutureHandle);
}
