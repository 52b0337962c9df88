//! # The async call bridge
//!
//! Drives one poll-driven foreign future to completion as a native `async`
//! call: start the foreign operation, poll it in a loop, turn each
//! continuation callback into an await point, decode the completion status,
//! and release the foreign resource.
//!
//! ## Invariants
//!
//! - Poll cycles are strictly sequential within one bridged call
//! - Nothing resumes on the foreign callback's own call stack
//! - The foreign future is freed exactly once, on every exit path

use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::BridgeError;
use crate::handles::FutureHandle;
use crate::handles::PollId;
use crate::registry::RESOLVERS;
use crate::signal::CancelSignal;
use crate::status::CallStatusCode;
use crate::status::PollResult;
use crate::traits::ForeignCall;

/// Maps the raw error payload of a failed call into a domain error.
pub type ErrorMapper = Box<dyn Fn(&[u8]) -> anyhow::Error + Send + Sync>;

/// Per-call configuration for [`bridge_call`].
#[derive(Default)]
pub struct CallOptions {
    cancel: Option<CancelSignal>,
    map_error: Option<ErrorMapper>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an external cancellation signal.
    ///
    /// If the signal is already triggered when the call begins, the foreign
    /// operation is never started. Triggered mid-call, it asks the foreign
    /// side to wind down; the poll loop keeps running until the foreign
    /// side reports readiness.
    pub fn cancel_signal(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    /// Translate `Error`-status payloads into a typed domain error instead
    /// of the generic [`BridgeError::Foreign`].
    pub fn map_error(
        mut self,
        mapper: impl Fn(&[u8]) -> anyhow::Error + Send + Sync + 'static,
    ) -> Self {
        self.map_error = Some(Box::new(mapper));
        self
    }
}

/// Bridge one foreign operation end to end.
///
/// Starts the foreign call, polls until it reports `Ready`, retrieves the
/// completion, and resolves with `lift(raw)` on success. Non-success
/// statuses reject with [`BridgeError`]; intermediate poll cycles are
/// invisible to the caller.
///
/// The foreign future is freed exactly once on every exit path - success,
/// rejection, cancellation, or a native-side drop of the returned future -
/// always on a later scheduler turn than the completion itself.
///
/// # Errors
///
/// - [`BridgeError::Aborted`]: the cancel signal was triggered before start,
///   or the foreign side completed with a cancellation status.
/// - [`BridgeError::Domain`]: an `Error` status translated by the
///   caller-supplied mapper.
/// - [`BridgeError::Foreign`]: any other non-success status, with the
///   message decoded by `lift_error`.
pub async fn bridge_call<F, T, L, E>(
    foreign: Arc<F>,
    options: CallOptions,
    lift: L,
    lift_error: E,
) -> Result<T, BridgeError>
where
    F: ForeignCall,
    L: FnOnce(F::Raw) -> T,
    E: FnOnce(&[u8]) -> String,
{
    if let Some(signal) = &options.cancel {
        if signal.is_triggered() {
            return Err(BridgeError::Aborted);
        }
    }

    let fut = foreign.start();
    let _free = FreeGuard { foreign: foreign.clone(), fut };
    let _watcher = options.cancel.as_ref().map(|signal| {
        let signal = signal.clone();
        let foreign = foreign.clone();
        AbortOnDrop(tokio::spawn(async move {
            signal.triggered().await;
            tracing::debug!(fut = fut.0, "cancellation requested");
            foreign.cancel(fut);
        }))
    });

    // The loop is the sole authority on readiness: cancellation only asks
    // the foreign side to wind down, it never tears the loop down.
    let mut cycles = 0u32;
    loop {
        // Never poll on the same turn that scheduled us.
        tokio::task::yield_now().await;
        cycles += 1;
        match poll_cycle(foreign.as_ref(), fut).await {
            PollResult::MaybeReady => continue,
            PollResult::Ready => break,
        }
    }
    tracing::trace!(fut = fut.0, cycles, "foreign future ready");

    // The readiness signal and the foreign side's settled state may not be
    // synchronized within a single turn; defer before retrieving.
    tokio::task::yield_now().await;

    let (raw, status) = foreign.complete(fut);
    match status.code {
        CallStatusCode::Success => Ok(lift(raw)),
        CallStatusCode::Cancelled => Err(BridgeError::Aborted),
        CallStatusCode::Error => match &options.map_error {
            Some(mapper) => Err(BridgeError::Domain(mapper(&status.error_buf))),
            None => Err(BridgeError::Foreign {
                code: status.code,
                message: lift_error(&status.error_buf),
            }),
        },
        CallStatusCode::UnexpectedError => Err(BridgeError::Foreign {
            code: status.code,
            message: lift_error(&status.error_buf),
        }),
    }
}

/// One request-progress/await-signal round trip with the foreign future.
///
/// Registers a one-shot resolver under a fresh handle, asks the foreign
/// side to make progress, and awaits its single continuation callback.
async fn poll_cycle<F: ForeignCall>(foreign: &F, fut: FutureHandle) -> PollResult {
    let (tx, rx) = oneshot::channel();
    let id = RESOLVERS.insert(tx);
    foreign.poll(fut, poll_continuation, id);
    match rx.await {
        Ok(result) => result,
        // Every poll cycle must be answered: the resolver can only vanish
        // without a send if the registry entry was dropped out of band.
        Err(_) => panic!("protocol violation: poll cycle {id:?} abandoned without a continuation"),
    }
}

/// The single [`Continuation`](crate::Continuation) implementation handed to
/// every [`ForeignCall::poll`].
///
/// Invoked by the foreign side - possibly on its own thread or call stack -
/// exactly once per poll request. Removes the resolver registered for `id`
/// and resolves it; the awaiting task resumes on a later scheduler turn,
/// never on this call stack. Re-entering a foreign poll machinery before it
/// has unwound is a documented deadlock hazard in poll-based future
/// protocols.
///
/// # Panics
///
/// Panics if `id` has no live resolver (double invocation or a stale
/// handle) or if `code` is not a known poll result.
pub fn poll_continuation(id: PollId, code: u8) {
    let resolver = RESOLVERS.remove(id);
    let result = PollResult::from_code(code);
    // The receiver may be gone if the bridged call was dropped mid-poll.
    let _ = resolver.send(result);
}

/// Schedules the exactly-once release of the foreign future.
///
/// Dropping the guard - on success, failure, abort, or a native-side drop
/// of the bridged call - schedules `free` on a later scheduler turn, never
/// inline with the completion path.
struct FreeGuard<F: ForeignCall> {
    foreign: Arc<F>,
    fut: FutureHandle,
}

impl<F: ForeignCall> Drop for FreeGuard<F> {
    fn drop(&mut self) {
        let foreign = self.foreign.clone();
        let fut = self.fut;
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            tracing::trace!(fut = fut.0, "releasing foreign future");
            foreign.free(fut);
        });
    }
}

/// Stops the cancellation watcher once the bridged call settles.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}
