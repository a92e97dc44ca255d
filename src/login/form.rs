//! Login form state, local validation, and the credential wire shapes

use serde::{Deserialize, Serialize};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Mutable client-side login form state.
///
/// `challenge_token` transitions from absent to present exactly once per
/// challenge cycle and is reset to absent on challenge expiry or error.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Username as typed; trimmed only when the payload is built.
    pub username: String,
    /// Password as typed; never trimmed.
    pub password: String,
    /// Completion token delivered by the challenge widget.
    pub challenge_token: Option<String>,
}

/// Field-level validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Message for the username field, when invalid.
    pub username: Option<String>,
    /// Message for the password field, when invalid.
    pub password: Option<String>,
}

impl FieldErrors {
    /// Returns `true` when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Validates the two credential fields locally; no network is involved.
pub fn validate(username: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if username.trim().is_empty() {
        errors.username = Some("please enter a username".to_string());
    }

    if password.trim().is_empty() {
        errors.password = Some("please enter a password".to_string());
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.password = Some(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }

    errors
}

/// Credential-exchange request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Trimmed username.
    pub username: String,
    /// Raw password.
    pub password: String,
    /// Challenge completion token, omitted from the wire when absent.
    #[serde(rename = "challengeToken", skip_serializing_if = "Option::is_none")]
    pub challenge_token: Option<String>,
}

/// Credential-exchange success payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Numeric role identifier; role `0` is the administrator.
    pub role_id: i64,
    /// Display name of the signed-in user.
    pub name: String,
    /// Set when the server mandates an immediate password change.
    #[serde(rename = "requirePasswordChange", default)]
    pub require_password_change: bool,
}
