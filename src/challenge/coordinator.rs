//! Challenge coordinator: script and widget lifecycle
//!
//! The provider script moves through `Unloaded -> Loading -> Loaded` once
//! per page load; within `Loaded`, the widget moves `NoWidget -> Rendered`
//! and stays there, with later render requests resetting the existing
//! widget in place. The `Loading` state is modeled by holding an async
//! mutex across the load: concurrent callers queue behind the first one
//! instead of injecting a second script tag.

use std::sync::{Arc, Mutex};

use crate::challenge::host::{ChallengeHost, Theme, WidgetCallbacks, WidgetHandle};
use crate::config::ChallengeConfig;
use crate::error::Result;

/// What a render request actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Feature inactive, no site key, or container not attached.
    Skipped,
    /// A fresh widget was rendered and its handle recorded.
    Rendered,
    /// An existing widget was reset in place; same handle, fresh challenge.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptState {
    Unloaded,
    Loaded,
}

/// Manages the externally hosted verification widget.
pub struct ChallengeCoordinator {
    host: Arc<dyn ChallengeHost>,
    script: tokio::sync::Mutex<ScriptState>,
    widget: Mutex<Option<WidgetHandle>>,
}

impl ChallengeCoordinator {
    /// Creates a coordinator over the given host environment.
    pub fn new(host: Arc<dyn ChallengeHost>) -> Self {
        Self {
            host,
            script: tokio::sync::Mutex::new(ScriptState::Unloaded),
            widget: Mutex::new(None),
        }
    }

    /// Ensures the provider script is available, loading it at most once.
    ///
    /// Resolution order: the provider object already exists globally; a
    /// script tag injected by another caller is mid-load (join it); or no
    /// load has started (inject exactly one tag).
    ///
    /// # Errors
    ///
    /// Propagates the host's script-load failure.
    pub async fn ensure_script_loaded(&self) -> Result<()> {
        let mut state = self.script.lock().await;
        if *state == ScriptState::Loaded {
            return Ok(());
        }

        if self.host.provider_loaded() {
            *state = ScriptState::Loaded;
            return Ok(());
        }

        if self.host.join_pending_load().await {
            *state = ScriptState::Loaded;
            return Ok(());
        }

        self.host.inject_script().await?;
        tracing::debug!("Challenge provider script loaded");
        *state = ScriptState::Loaded;
        Ok(())
    }

    /// Renders the widget, or resets the existing one in place.
    ///
    /// Returns [`RenderOutcome::Skipped`] without touching the script when
    /// the feature is inactive, no site key is configured, or the host has
    /// no attached container. The theme is read from the host's
    /// color-scheme signal at render time, not cached.
    ///
    /// # Errors
    ///
    /// Propagates script-load and widget-render failures.
    pub async fn render(
        &self,
        config: &ChallengeConfig,
        callbacks: WidgetCallbacks,
    ) -> Result<RenderOutcome> {
        let site_key = match config.active_site_key() {
            Some(key) => key.to_string(),
            None => return Ok(RenderOutcome::Skipped),
        };
        let container = match self.host.container() {
            Some(container) => container,
            None => return Ok(RenderOutcome::Skipped),
        };

        self.ensure_script_loaded().await?;

        let mut widget = self.widget.lock().expect("widget lock poisoned");
        if let Some(handle) = widget.as_ref() {
            self.host.reset_widget(handle);
            return Ok(RenderOutcome::Reset);
        }

        let theme = if self.host.prefers_dark() {
            Theme::Dark
        } else {
            Theme::Light
        };
        let handle = self
            .host
            .render_widget(&container, &site_key, theme, callbacks)?;
        tracing::debug!(handle = %handle.as_str(), "Challenge widget rendered");
        *widget = Some(handle);
        Ok(RenderOutcome::Rendered)
    }

    /// Resets the live widget, forcing a fresh challenge; a no-op when no
    /// widget has been rendered.
    pub fn reset(&self) {
        let widget = self.widget.lock().expect("widget lock poisoned");
        if let Some(handle) = widget.as_ref() {
            self.host.reset_widget(handle);
        }
    }

    /// Whether a widget is currently rendered.
    pub fn has_widget(&self) -> bool {
        self.widget.lock().expect("widget lock poisoned").is_some()
    }
}
