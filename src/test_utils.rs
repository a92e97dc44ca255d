//! Shared fakes for unit tests
//!
//! Port implementations that record their interactions so tests can
//! assert on navigation, notices, and challenge-host calls without a real
//! host environment.

use std::sync::Mutex;

use crate::challenge::host::{ChallengeHost, ContainerId, Theme, WidgetCallbacks, WidgetHandle};
use crate::error::Result;
use crate::ports::{Navigator, Notifier};

/// Navigator fake tracking the current path and every navigation.
pub struct FakeNavigator {
    path: Mutex<String>,
    navigations: Mutex<Vec<String>>,
}

impl FakeNavigator {
    /// Creates a navigator positioned at `path`.
    pub fn at(path: &str) -> Self {
        Self {
            path: Mutex::new(path.to_string()),
            navigations: Mutex::new(Vec::new()),
        }
    }

    /// All paths navigated to, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl Navigator for FakeNavigator {
    fn navigate_to(&self, path: &str) {
        *self.path.lock().unwrap() = path.to_string();
        self.navigations.lock().unwrap().push(path.to_string());
    }

    fn current_path(&self) -> String {
        self.path.lock().unwrap().clone()
    }
}

/// Notifier fake recording every notice.
pub struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            errors: Mutex::new(Vec::new()),
            successes: Mutex::new(Vec::new()),
        }
    }

    /// Error notices shown so far.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    /// Success notices shown so far.
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Challenge-host fake whose script is already loaded and whose widget
/// renders immediately, capturing the callbacks for later firing.
pub struct FakeChallengeHost {
    callbacks: Mutex<Option<WidgetCallbacks>>,
    resets: Mutex<usize>,
}

impl FakeChallengeHost {
    /// Creates a ready host with an attached container.
    pub fn new() -> Self {
        Self {
            callbacks: Mutex::new(None),
            resets: Mutex::new(0),
        }
    }

    /// Fires the widget's success callback with `token`.
    ///
    /// # Panics
    ///
    /// Panics when no widget has been rendered.
    pub fn fire_success(&self, token: &str) {
        let callbacks = self.callbacks.lock().unwrap();
        let callbacks = callbacks.as_ref().expect("widget rendered");
        (callbacks.on_success)(token.to_string());
    }

    /// Number of reset calls observed.
    pub fn reset_count(&self) -> usize {
        *self.resets.lock().unwrap()
    }
}

impl Default for FakeChallengeHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ChallengeHost for FakeChallengeHost {
    fn provider_loaded(&self) -> bool {
        true
    }

    async fn join_pending_load(&self) -> bool {
        false
    }

    async fn inject_script(&self) -> Result<()> {
        Ok(())
    }

    fn container(&self) -> Option<ContainerId> {
        Some(ContainerId::new("challenge-container"))
    }

    fn prefers_dark(&self) -> bool {
        false
    }

    fn render_widget(
        &self,
        _container: &ContainerId,
        _site_key: &str,
        _theme: Theme,
        callbacks: WidgetCallbacks,
    ) -> Result<WidgetHandle> {
        *self.callbacks.lock().unwrap() = Some(callbacks);
        Ok(WidgetHandle::new("widget-1"))
    }

    fn reset_widget(&self, _handle: &WidgetHandle) {
        *self.resets.lock().unwrap() += 1;
    }
}
