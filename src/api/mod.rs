//! Backend API layer
//!
//! - [`envelope`]: the uniform `{code, msg, data}` result shape.
//! - [`transport`]: the single entry point for GET/POST calls, with bearer
//!   auth, a fixed timeout, and full failure normalization.

pub mod envelope;
pub mod transport;

pub use envelope::{Envelope, CLIENT_FAILURE_CODE, SUCCESS_CODE};
pub use transport::{Transport, ADDRESS_NOT_CONFIGURED, REQUEST_TIMEOUT};
