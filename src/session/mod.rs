//! Session persistence and expiry handling
//!
//! - [`store`]: the key/value persistence port, the [`store::Session`]
//!   claims struct, and the in-memory and keyring-backed implementations.
//! - [`guard`]: expiry-signal detection and the clear-and-redirect side
//!   effect applied when a token stops being accepted.

pub mod guard;
pub mod store;

pub use guard::{is_expired_signal, SessionGuard, ENTRY_PATH, UNAUTHENTICATED_CODE};
pub use store::{keys, KeyringSessionStore, MemorySessionStore, Session, SessionStore};
