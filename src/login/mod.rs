//! Login feature
//!
//! - [`form`]: form state, local validation, and the credential wire
//!   shapes.
//! - [`orchestrator`]: the state machine sequencing requirement check,
//!   challenge, credential exchange, and session persistence.

pub mod form;
pub mod orchestrator;

pub use form::{validate, FieldErrors, LoginForm, LoginReply, LoginRequest, MIN_PASSWORD_LEN};
pub use orchestrator::{
    Destination, LoginOrchestrator, LoginOutcome, CAPTCHA_CHECK_PATH, CHANGE_PASSWORD_PATH,
    DASHBOARD_PATH, LOGIN_PATH,
};
