//! Shared fixtures for integration tests
//!
//! Builds a full client stack (transport, coordinator, orchestrator)
//! against a wiremock server, with recording fakes for the navigation,
//! notification, and challenge-host ports.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use url::Url;
use wiremock::MockServer;

use panel_client::api::transport::Transport;
use panel_client::challenge::host::{
    ChallengeHost, ContainerId, Theme, WidgetCallbacks, WidgetHandle,
};
use panel_client::challenge::ChallengeCoordinator;
use panel_client::config::ChallengeConfig;
use panel_client::error::Result;
use panel_client::login::LoginOrchestrator;
use panel_client::ports::{Navigator, Notifier};
use panel_client::session::store::{MemorySessionStore, SessionStore};

// ---------------------------------------------------------------------------
// Port fakes
// ---------------------------------------------------------------------------

/// Navigator fake tracking the current path and every navigation.
pub struct FakeNavigator {
    path: Mutex<String>,
    navigations: Mutex<Vec<String>>,
}

impl FakeNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            path: Mutex::new(path.to_string()),
            navigations: Mutex::new(Vec::new()),
        }
    }

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
#[derive(Default)]
pub struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
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

/// Challenge-host fake: script preloaded, widget renders immediately,
/// callbacks captured for manual firing.
#[derive(Default)]
pub struct FakeChallengeHost {
    callbacks: Mutex<Option<WidgetCallbacks>>,
    renders: Mutex<usize>,
    resets: Mutex<usize>,
}

impl FakeChallengeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire_success(&self, token: &str) {
        let callbacks = self.callbacks.lock().unwrap();
        let callbacks = callbacks.as_ref().expect("widget rendered");
        (callbacks.on_success)(token.to_string());
    }

    pub fn render_count(&self) -> usize {
        *self.renders.lock().unwrap()
    }

    pub fn reset_count(&self) -> usize {
        *self.resets.lock().unwrap()
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
        *self.renders.lock().unwrap() += 1;
        *self.callbacks.lock().unwrap() = Some(callbacks);
        Ok(WidgetHandle::new("widget-1"))
    }

    fn reset_widget(&self, _handle: &WidgetHandle) {
        *self.resets.lock().unwrap() += 1;
    }
}

/// Challenge-host fake that completes the challenge from inside the
/// render call, like a widget whose user passed the challenge before the
/// render request resolved.
pub struct InstantChallengeHost {
    token: String,
}

impl InstantChallengeHost {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ChallengeHost for InstantChallengeHost {
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
        (callbacks.on_success)(self.token.clone());
        Ok(WidgetHandle::new("widget-1"))
    }

    fn reset_widget(&self, _handle: &WidgetHandle) {}
}

/// Challenge-host fake whose provider script never loads.
pub struct FailingScriptHost;

#[async_trait::async_trait]
impl ChallengeHost for FailingScriptHost {
    fn provider_loaded(&self) -> bool {
        false
    }

    async fn join_pending_load(&self) -> bool {
        false
    }

    async fn inject_script(&self) -> Result<()> {
        anyhow::bail!(panel_client::PanelError::ScriptLoad(
            "script tag error event".to_string()
        ))
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
        _callbacks: WidgetCallbacks,
    ) -> Result<WidgetHandle> {
        anyhow::bail!(panel_client::PanelError::ScriptLoad(
            "script never loaded".to_string()
        ))
    }

    fn reset_widget(&self, _handle: &WidgetHandle) {}
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A full client stack wired against one wiremock server.
pub struct Harness {
    pub server: MockServer,
    pub store: Arc<MemorySessionStore>,
    pub navigator: Arc<FakeNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub host: Arc<FakeChallengeHost>,
    pub transport: Arc<Transport>,
    pub orchestrator: Arc<LoginOrchestrator>,
}

/// Challenge configuration with the feature switched on and a site key.
pub fn enabled_challenge() -> ChallengeConfig {
    ChallengeConfig {
        enabled: true,
        provider: None,
        site_key: Some("0xTestKey".to_string()),
    }
}

/// Builds a harness whose transport points at a fresh mock server.
pub async fn make_harness(challenge_config: ChallengeConfig) -> Harness {
    let server = MockServer::start().await;
    let host = Arc::new(FakeChallengeHost::new());
    let (store, navigator, notifier, transport, orchestrator) = wire_stack(
        &server,
        Arc::clone(&host) as Arc<dyn ChallengeHost>,
        challenge_config,
    );

    Harness {
        server,
        store,
        navigator,
        notifier,
        host,
        transport,
        orchestrator,
    }
}

/// Wires a full stack against an existing mock server with a
/// caller-supplied challenge host; for hosts with nonstandard render
/// behavior, and for tests that build several stacks over one server.
pub fn wire_stack(
    server: &MockServer,
    host: Arc<dyn ChallengeHost>,
    challenge_config: ChallengeConfig,
) -> (
    Arc<MemorySessionStore>,
    Arc<FakeNavigator>,
    Arc<RecordingNotifier>,
    Arc<Transport>,
    Arc<LoginOrchestrator>,
) {
    let base = Url::parse(&format!("{}/api/v1/", server.uri())).expect("valid base");

    let store = Arc::new(MemorySessionStore::new());
    let navigator = Arc::new(FakeNavigator::at("/"));
    let notifier = Arc::new(RecordingNotifier::new());

    let transport = Arc::new(Transport::new(
        Some(base),
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
    ));
    let coordinator = Arc::new(ChallengeCoordinator::new(host));
    let orchestrator = Arc::new(LoginOrchestrator::new(
        Arc::clone(&transport),
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        coordinator,
        challenge_config,
    ));

    (store, navigator, notifier, transport, orchestrator)
}
