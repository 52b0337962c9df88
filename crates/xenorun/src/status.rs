//! Wire-level poll results and completion status codes.
//!
//! These mirror the codes the foreign side reports through the continuation
//! callback and the completion status. Decoding fails loudly: an unknown
//! code means one side broke the protocol, which is never a recoverable
//! runtime error.

/// Outcome of one poll cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollResult {
    /// The foreign future is done; no further poll is needed.
    Ready = 0,
    /// The foreign side made progress but may not be done; poll again.
    MaybeReady = 1,
}

impl PollResult {
    /// Decode the raw code passed through the continuation callback.
    ///
    /// # Panics
    ///
    /// Panics on any code outside `{0, 1}` - a protocol violation by the
    /// foreign side.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => PollResult::Ready,
            1 => PollResult::MaybeReady,
            other => panic!("protocol violation: unknown poll result code {other}"),
        }
    }
}

/// Discriminant of a completed foreign call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallStatusCode {
    /// The call produced its payload.
    Success = 0,
    /// The call failed with an expected error payload.
    Error = 1,
    /// The foreign side failed in an unexpected way (panic/abort).
    UnexpectedError = 2,
    /// The call wound down in response to a cancellation request.
    Cancelled = 3,
}

/// Final status of a foreign call: a discriminant plus the raw error
/// payload bytes for the non-success cases.
///
/// The payload encoding is opaque to the bridge; the caller's
/// `lift_error` or error mapper decodes it.
#[derive(Clone, Debug)]
pub struct CallStatus {
    pub code: CallStatusCode,
    pub error_buf: Vec<u8>,
}

impl CallStatus {
    /// A successful completion with no error payload.
    pub fn success() -> Self {
        Self { code: CallStatusCode::Success, error_buf: Vec::new() }
    }

    /// A failed completion carrying a raw error payload.
    pub fn failed(code: CallStatusCode, error_buf: Vec<u8>) -> Self {
        Self { code, error_buf }
    }
}
