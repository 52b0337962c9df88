//! # xenorun
//!
//! An asynchronous call bridge: adapts a poll-driven foreign future -
//! observable only through start/poll/cancel/complete/free - into a native
//! `async` call on the tokio runtime.
//!
//! ## Architecture
//!
//! The foreign side cannot push results; it can only be polled, and it
//! answers each poll by invoking a callback from an unspecified execution
//! context. xenorun reconciles the two models with two pieces:
//!
//! - **Resolver registry**: pending poll cycles are stored as one-shot
//!   resolvers under opaque integer handles, so the foreign side never
//!   holds a native reference - only `(callback, handle)`.
//! - **Bridge**: drives the poll loop without re-entrant stack hazards,
//!   turns each continuation callback into an await point, decodes the
//!   completion status, and guarantees the foreign future is freed exactly
//!   once on every exit path.
//!
//! ## Core Concepts
//!
//! - **ForeignCall**: the five-operation contract the foreign side exposes
//! - **bridge_call**: one foreign operation, bridged end to end
//! - **CancelSignal**: cooperative, best-effort cancellation
//! - **PollId / FutureHandle**: the two id spaces that cross the boundary
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xenorun::{bridge_call, BridgeError, CallOptions, ForeignCall};
//!
//! # async fn example<F: ForeignCall<Raw = Vec<u8>>>(api: Arc<F>) -> Result<(), BridgeError> {
//! let value = bridge_call(
//!     api,
//!     CallOptions::new(),
//!     |raw: Vec<u8>| String::from_utf8_lossy(&raw).into_owned(),
//!     |buf| String::from_utf8_lossy(buf).into_owned(),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod error;
pub mod handles;
pub mod registry;
pub mod signal;
pub mod status;
pub mod traits;

pub use bridge::CallOptions;
pub use bridge::ErrorMapper;
pub use bridge::bridge_call;
pub use bridge::poll_continuation;
pub use error::BridgeError;
pub use handles::FutureHandle;
pub use handles::PollId;
pub use registry::HandleMap;
pub use registry::live_resolver_count;
pub use signal::CancelSignal;
pub use status::CallStatus;
pub use status::CallStatusCode;
pub use status::PollResult;
pub use traits::Continuation;
pub use traits::ForeignCall;
