//! # Error Definitions
//!
//! The failure kinds a bridged call surfaces to its caller.

use std::fmt;

use crate::status::CallStatusCode;

/// Errors a bridged call can reject with.
///
/// Protocol violations (unknown registry handle, unknown poll code) are
/// deliberately *not* represented here; they indicate a broken contract
/// between the two sides and panic instead of propagating as values.
#[derive(Debug)]
pub enum BridgeError {
    /// The call was cancelled: the signal was already triggered before the
    /// foreign call started, or the foreign side completed with a
    /// cancellation status.
    Aborted,
    /// The foreign side reported a non-success completion status.
    Foreign { code: CallStatusCode, message: String },
    /// A caller-supplied error mapper translated the failure payload into a
    /// domain-specific error.
    Domain(anyhow::Error),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aborted => write!(f, "Foreign call aborted"),
            Self::Foreign { code, message } => {
                write!(f, "Foreign call failed ({:?}): {}", code, message)
            }
            Self::Domain(e) => write!(f, "Foreign call failed: {}", e),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
