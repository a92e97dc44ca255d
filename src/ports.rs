//! Collaborator interfaces injected by the embedding application
//!
//! The panel client never touches the host environment directly. Routing
//! and user-facing notices are reached through the two small traits below,
//! implemented by whatever actually hosts the client (a webview bridge, a
//! desktop shell, or a test fake). This keeps the orchestrator and the
//! session guard runnable without a real browser environment.

/// Navigation port over the host's router.
pub trait Navigator: Send + Sync {
    /// Navigates the host view to the given path.
    fn navigate_to(&self, path: &str);

    /// Returns the path of the currently displayed view.
    fn current_path(&self) -> String;
}

/// Notification port for user-facing notices.
///
/// Every failure path in the client produces exactly one notice through
/// this trait; no failure is silent and nothing is reported twice.
pub trait Notifier: Send + Sync {
    /// Shows a success notice.
    fn success(&self, message: &str);

    /// Shows an error notice.
    fn error(&self, message: &str);
}
