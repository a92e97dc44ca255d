//! Transport client: the single entry point for backend calls
//!
//! Every authenticated call goes through [`Transport`]. It attaches the
//! bearer token from the session store, applies a fixed request timeout,
//! and maps *every* outcome (success, HTTP error, network failure) into an
//! [`Envelope`] so that the methods here never return `Err`. Expiry signals
//! are intercepted by the session guard before a caller can see them.
//!
//! The base URL is held behind interior mutability and replaced through
//! [`Transport::reconfigure`] or [`Transport::apply_panel_addresses`];
//! there is no globally reachable setter.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::envelope::{Envelope, CLIENT_FAILURE_CODE};
use crate::config::{select_active_base, ApiConfig, PanelAddress};
use crate::ports::Navigator;
use crate::session::guard::{is_expired_signal, SessionGuard, UNAUTHENTICATED_CODE};
use crate::session::store::{keys, SessionStore};

/// Fixed per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Message of the envelope returned when no base address is configured.
pub const ADDRESS_NOT_CONFIGURED: &str = "panel address not configured";

/// Message of the envelope returned after the guard intercepted an expiry
/// signal. Deliberately not one of the allow-listed server phrases: by the
/// time a caller sees it, the side effect has already run.
pub const SESSION_EXPIRED: &str = "session expired";

/// HTTP client over the panel API.
///
/// Cheap to share behind an [`Arc`]; all interior state is synchronized.
pub struct Transport {
    http: reqwest::Client,
    base: RwLock<Option<Url>>,
    store: Arc<dyn SessionStore>,
    guard: SessionGuard,
}

impl Transport {
    /// Creates a transport with an optional initial base URL.
    pub fn new(
        base: Option<Url>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let guard = SessionGuard::new(Arc::clone(&store), navigator);
        Self {
            http: reqwest::Client::new(),
            base: RwLock::new(base),
            store,
            guard,
        }
    }

    /// Creates a transport from the API section of the client config.
    pub fn from_config(
        api: &ApiConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::new(api.base_url(), store, navigator)
    }

    /// Replaces the base URL.
    pub fn reconfigure(&self, base: Option<Url>) {
        *self.base.write().expect("base url lock poisoned") = base;
    }

    /// Applies a panel-address update pushed by the host shell.
    ///
    /// Only the entry flagged active changes anything; a list without an
    /// active entry leaves the current base untouched.
    pub fn apply_panel_addresses(&self, addresses: &[PanelAddress]) {
        if let Some(base) = select_active_base(addresses) {
            tracing::debug!(base = %base, "Panel address update applied");
            self.reconfigure(Some(base));
        }
    }

    /// Returns a copy of the current base URL, if configured.
    pub fn base(&self) -> Option<Url> {
        self.base.read().expect("base url lock poisoned").clone()
    }

    /// Issues a `GET` request with no query parameters.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Envelope<T> {
        self.get_with_query(path, &[]).await
    }

    /// Issues a `GET` request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Envelope<T> {
        let url = match self.resolve(path) {
            Ok(url) => url,
            Err(message) => return Envelope::client_failure(message),
        };
        let mut builder = self.http.get(url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.dispatch(builder).await
    }

    /// Issues a `POST` request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Envelope<T> {
        let url = match self.resolve(path) {
            Ok(url) => url,
            Err(message) => return Envelope::client_failure(message),
        };
        self.dispatch(self.http.post(url).json(body)).await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Joins `path` onto the configured base, or explains why it cannot.
    fn resolve(&self, path: &str) -> std::result::Result<Url, String> {
        let base = self
            .base
            .read()
            .expect("base url lock poisoned")
            .clone()
            .ok_or_else(|| ADDRESS_NOT_CONFIGURED.to_string())?;
        base.join(path)
            .map_err(|e| format!("invalid request path '{}': {}", path, e))
    }

    /// Sends the request and normalizes every outcome into an envelope.
    async fn dispatch<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Envelope<T> {
        let builder = match self.store.get(keys::TOKEN) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = match builder.timeout(REQUEST_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Request failed before a response arrived: {}", e);
                return transport_failure(&e);
            }
        };

        let status = response.status();

        // An HTTP 401 is a session expiry regardless of what the body says.
        if status == StatusCode::UNAUTHORIZED {
            self.guard.on_expired();
            return Envelope::failure(UNAUTHENTICATED_CODE, SESSION_EXPIRED);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Envelope::client_failure(format!("failed to read response body: {}", e))
            }
        };

        if status.is_success() {
            match serde_json::from_str::<Envelope<T>>(&body) {
                Ok(envelope) => {
                    if is_expired_signal(&envelope) {
                        self.guard.on_expired();
                        return Envelope::failure(UNAUTHENTICATED_CODE, SESSION_EXPIRED);
                    }
                    envelope
                }
                Err(e) => {
                    tracing::warn!("Malformed response envelope: {}", e);
                    Envelope::client_failure(format!("malformed response body: {}", e))
                }
            }
        } else {
            normalize_http_error(status, &body)
        }
    }
}

/// Maps a transport-level failure (no response at all) to an envelope.
fn transport_failure<T>(error: &reqwest::Error) -> Envelope<T> {
    if error.is_timeout() {
        Envelope::client_failure("request timed out")
    } else {
        Envelope::client_failure(format!("network request failed: {}", error))
    }
}

/// Maps a non-2xx, non-401 response to an envelope.
///
/// A structured body contributes its `msg`/`code` (and `data` only when it
/// is structurally present); a bare string body becomes the message; an
/// empty or unusable body falls back to the status line.
fn normalize_http_error<T: DeserializeOwned>(status: StatusCode, body: &str) -> Envelope<T> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => {
            let message = map
                .get("msg")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| status_failure_message(status));
            let code = map
                .get("code")
                .and_then(|c| c.as_i64())
                .unwrap_or(CLIENT_FAILURE_CODE);
            let data = map
                .get("data")
                .filter(|d| !d.is_null())
                .cloned()
                .and_then(|d| serde_json::from_value::<T>(d).ok());
            Envelope {
                code,
                message,
                data,
            }
        }
        Ok(serde_json::Value::String(text)) => Envelope::client_failure(text),
        Ok(_) => Envelope::client_failure(status_failure_message(status)),
        Err(_) => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                Envelope::client_failure(status_failure_message(status))
            } else {
                Envelope::client_failure(trimmed.to_string())
            }
        }
    }
}

/// Builds `request failed (<status line>)` from the HTTP status.
fn status_failure_message(status: StatusCode) -> String {
    let line = match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    };
    format!("request failed ({})", line)
}
