//! Host-environment port for the challenge provider
//!
//! The verification widget lives in an environment the library does not
//! own: a page (or webview) that can load the provider's script, attach a
//! container element, and render the vendor widget into it. This module
//! defines the trait the host implements plus the opaque types flowing
//! across that seam. The coordinator drives the lifecycle; the host only
//! supplies the primitives.

use async_trait::async_trait;

use crate::error::Result;

/// Opaque identifier of the container element the widget renders into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerId(String);

impl ContainerId {
    /// Wraps a host-specific container identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque identifier of a rendered widget instance.
///
/// At most one live handle exists per page load; a repeated render request
/// resets the existing widget instead of creating a second one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetHandle(String);

impl WidgetHandle {
    /// Wraps a provider-issued widget identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Widget color theme, chosen from the host's color-scheme signal at
/// render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// Provider wire name for the theme.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Callbacks wired into the widget at render time.
///
/// The success callback fires on a macrotask unrelated to the call stack
/// that requested the render; it is a genuinely external event, which is
/// why these are owned closures rather than borrowed ones.
pub struct WidgetCallbacks {
    /// Receives the completion token when the user passes the challenge.
    pub on_success: Box<dyn Fn(String) + Send + Sync>,
    /// Fires when the widget fails to load or verify.
    pub on_error: Box<dyn Fn() + Send + Sync>,
    /// Fires when a previously delivered token expires unused.
    pub on_expire: Box<dyn Fn() + Send + Sync>,
}

impl WidgetCallbacks {
    /// Callbacks that ignore every event; useful for hosts that observe
    /// the widget some other way and in tests.
    pub fn noop() -> Self {
        Self {
            on_success: Box::new(|_| {}),
            on_error: Box::new(|| {}),
            on_expire: Box::new(|| {}),
        }
    }
}

/// Primitives the host environment supplies to the coordinator.
#[async_trait]
pub trait ChallengeHost: Send + Sync {
    /// Whether the provider's script object already exists globally.
    fn provider_loaded(&self) -> bool;

    /// Joins a script load started by another caller.
    ///
    /// Returns `true` once the already-present script tag finishes
    /// loading, or `false` immediately when no load is pending.
    async fn join_pending_load(&self) -> bool;

    /// Injects the provider script tag and resolves on its load event.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PanelError::ScriptLoad`] when the tag's
    /// error event fires instead.
    async fn inject_script(&self) -> Result<()>;

    /// The container the widget should render into, when attached.
    fn container(&self) -> Option<ContainerId>;

    /// Whether the host currently prefers a dark color scheme.
    fn prefers_dark(&self) -> bool;

    /// Renders a fresh widget and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PanelError::Widget`] when the provider
    /// rejects the render.
    fn render_widget(
        &self,
        container: &ContainerId,
        site_key: &str,
        theme: Theme,
        callbacks: WidgetCallbacks,
    ) -> Result<WidgetHandle>;

    /// Resets an existing widget in place, issuing a fresh challenge.
    fn reset_widget(&self, handle: &WidgetHandle);
}
