//! Session expiry detection and the resulting side effect
//!
//! The backend signals an invalid or expired token two ways: an HTTP `401`
//! status, or a `200` whose envelope carries code `401` together with one
//! of a small set of known phrases. Detection is an exact string match
//! against that allow-list, never a substring or heuristic match, so that
//! an application error which merely resembles an expiry phrase is not
//! mistaken for one.
//!
//! On detection the guard clears every session claim and redirects to the
//! entry view. The operation is idempotent: invoking it again (including
//! concurrently, after the first redirect landed) clears nothing further
//! and never issues a second navigation.

use std::sync::Arc;

use crate::api::envelope::Envelope;
use crate::ports::Navigator;
use crate::session::store::{Session, SessionStore};

/// Path of the login entry view.
pub const ENTRY_PATH: &str = "/";

/// Application code the backend uses for unauthenticated requests.
pub const UNAUTHENTICATED_CODE: i64 = 401;

/// Exact server phrases that mark an expired or invalid token.
const EXPIRY_PHRASES: [&str; 3] = [
    "not logged in or token expired",
    "invalid token or token expired",
    "cannot retrieve permission info",
];

/// Returns `true` iff the envelope is the backend's expiry signal.
///
/// The code must equal [`UNAUTHENTICATED_CODE`] *and* the message must be
/// exactly one of the allow-listed phrases. A near-miss (extra whitespace,
/// different punctuation) does not match.
///
/// # Examples
///
/// ```
/// use panel_client::api::envelope::Envelope;
/// use panel_client::session::guard::is_expired_signal;
///
/// let expired: Envelope<()> = Envelope::failure(401, "not logged in or token expired");
/// assert!(is_expired_signal(&expired));
///
/// let near_miss: Envelope<()> = Envelope::failure(401, "not logged in or token expired ");
/// assert!(!is_expired_signal(&near_miss));
/// ```
pub fn is_expired_signal<T>(envelope: &Envelope<T>) -> bool {
    envelope.code == UNAUTHENTICATED_CODE && EXPIRY_PHRASES.contains(&envelope.message.as_str())
}

/// Clears session state and forces navigation back to the entry view.
///
/// Held by the transport layer, which invokes [`SessionGuard::on_expired`]
/// before an expiry signal can reach feature code.
pub struct SessionGuard {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl SessionGuard {
    /// Creates a guard over the given store and navigator.
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Clears all session claims, then redirects to [`ENTRY_PATH`] unless
    /// the current view already is the entry view.
    ///
    /// Safe to call repeatedly: clearing an empty store is a no-op, and the
    /// path check prevents a second redirect once the first one landed.
    pub fn on_expired(&self) {
        tracing::debug!("Session expired; clearing stored claims");
        Session::clear(self.store.as_ref());

        if self.navigator.current_path() != ENTRY_PATH {
            self.navigator.navigate_to(ENTRY_PATH);
        }
    }
}
