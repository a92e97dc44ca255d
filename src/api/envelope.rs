//! Uniform response envelope for every backend call
//!
//! The panel backend wraps every response body in the same three-field
//! shape: an integer `code`, a human-readable `msg`, and an optional typed
//! `data` payload. `code == 0` means success; every other integer is an
//! application-level failure code. The transport layer additionally
//! synthesizes envelopes with [`CLIENT_FAILURE_CODE`] for failures that
//! never produced a server response (network errors, timeouts, malformed
//! bodies), so callers only ever handle this one result shape.

use serde::{Deserialize, Serialize};

/// Application code designating success.
pub const SUCCESS_CODE: i64 = 0;

/// Reserved code for failures synthesized client-side, where no server
/// response was available (transport error, timeout, unparseable body).
pub const CLIENT_FAILURE_CODE: i64 = -1;

/// The `{code, msg, data}` wrapper around every backend response.
///
/// Both `msg` and `data` are always structurally present on the wire, but
/// exactly one of them is meaningful at a time: a success carries the
/// payload, a failure carries the message.
///
/// # Examples
///
/// ```
/// use panel_client::api::envelope::Envelope;
///
/// let env: Envelope<i64> = serde_json::from_str(r#"{"code":0,"msg":"","data":7}"#).unwrap();
/// assert!(env.is_success());
/// assert_eq!(env.data, Some(7));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Application result code; `0` is success.
    pub code: i64,

    /// Human-readable message; empty on success.
    #[serde(rename = "msg", default)]
    pub message: String,

    /// Typed payload; `null` on failure.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Builds a success envelope carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: String::new(),
            data: Some(data),
        }
    }

    /// Builds a failure envelope with a server-style code and message.
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Builds a client-synthesized failure envelope (code `-1`).
    ///
    /// Used by the transport layer when no usable server response exists.
    pub fn client_failure(message: impl Into<String>) -> Self {
        Self::failure(CLIENT_FAILURE_CODE, message)
    }

    /// Returns `true` iff the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}
