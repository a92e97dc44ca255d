//! Login orchestration state machine
//!
//! One login attempt walks `Idle -> Validating -> CheckingRequirement ->
//! {Submitting | AwaitingChallenge} -> Submitting -> {Success | Failed}`.
//! The awkward part is `AwaitingChallenge`: the widget's completion
//! callback fires on a macrotask unrelated to the call stack that asked
//! for the render, so "challenge completed" can arrive before, during, or
//! after the requirement check resolves. The orchestrator joins the two
//! paths through the form's token slot and a pending flag, both guarded by
//! one mutex that is never held across an await: whichever side observes
//! both "required" and "token present" performs the submission, and only
//! that side flips the pending flag off, so credentials are submitted
//! exactly once.

use std::sync::{Arc, Mutex};

use crate::api::envelope::Envelope;
use crate::api::transport::Transport;
use crate::challenge::{ChallengeCoordinator, WidgetCallbacks};
use crate::config::ChallengeConfig;
use crate::login::form::{validate, FieldErrors, LoginForm, LoginReply, LoginRequest};
use crate::ports::{Navigator, Notifier};
use crate::session::store::{Session, SessionStore};

/// Requirement-check endpoint; `data` is `0` when no challenge is needed.
pub const CAPTCHA_CHECK_PATH: &str = "user/checkCaptcha";

/// Credential-exchange endpoint.
pub const LOGIN_PATH: &str = "user/login";

/// Destination after an ordinary successful login.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Destination when the server mandates a password change.
pub const CHANGE_PASSWORD_PATH: &str = "/change-password";

/// Where a successful login routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The main panel view.
    Dashboard,
    /// The mandatory password-change view.
    ChangePassword,
}

/// Result of a login entry or an externally driven resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// An attempt is already in flight; this entry was ignored.
    Busy,
    /// Local validation failed; no network call was issued.
    Invalid(FieldErrors),
    /// The attempt failed; exactly one notice has been surfaced.
    Failed,
    /// A challenge is required and rendered; the attempt resumes when the
    /// widget's success callback delivers a token.
    AwaitingChallenge,
    /// Session persisted; the caller has been routed.
    Success(Destination),
}

/// Per-attempt mutable state. Single-writer at any instant: either the
/// login call stack or the widget callback holds the lock, never both.
#[derive(Debug, Default)]
struct AttemptState {
    form: LoginForm,
    pending_login: bool,
    in_flight: bool,
}

/// Sequences requirement check, challenge, and credential exchange.
pub struct LoginOrchestrator {
    transport: Arc<Transport>,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    challenge: Arc<ChallengeCoordinator>,
    challenge_config: ChallengeConfig,
    state: Mutex<AttemptState>,
}

impl LoginOrchestrator {
    /// Creates an orchestrator over the injected collaborators.
    pub fn new(
        transport: Arc<Transport>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        challenge: Arc<ChallengeCoordinator>,
        challenge_config: ChallengeConfig,
    ) -> Self {
        Self {
            transport,
            store,
            navigator,
            notifier,
            challenge,
            challenge_config,
            state: Mutex::new(AttemptState::default()),
        }
    }

    /// Whether an attempt is currently in flight.
    ///
    /// Hosts use this to disable the submit control; the orchestrator
    /// also enforces it itself, so an Enter-key entry during an attempt
    /// simply returns [`LoginOutcome::Busy`].
    pub fn in_flight(&self) -> bool {
        self.lock_state().in_flight
    }

    /// Runs one login attempt from the top.
    ///
    /// Validation happens first and never touches the network. The
    /// requirement check follows; a failure there is surfaced as its own
    /// notice, distinct from a login failure. When a challenge is
    /// required, the attempt either submits immediately (a token from an
    /// earlier widget render is still on the form) or suspends until
    /// [`on_challenge_token`](Self::on_challenge_token) resumes it.
    pub async fn login(self: &Arc<Self>, username: &str, password: &str) -> LoginOutcome {
        {
            let mut state = self.lock_state();
            if state.in_flight {
                return LoginOutcome::Busy;
            }

            let errors = validate(username, password);
            if !errors.is_empty() {
                return LoginOutcome::Invalid(errors);
            }

            state.in_flight = true;
            state.pending_login = false;
            state.form.username = username.to_string();
            state.form.password = password.to_string();
        }

        let check: Envelope<i64> = self.transport.get(CAPTCHA_CHECK_PATH).await;
        if !check.is_success() {
            self.notifier.error(&format!(
                "could not determine challenge requirement: {}",
                check.message
            ));
            self.lock_state().in_flight = false;
            return LoginOutcome::Failed;
        }

        // Permissive reading kept from the original client: anything other
        // than an explicit 0, including absent data, counts as required.
        let required = check.data.map_or(true, |value| value != 0);

        if !required {
            self.lock_state().form.challenge_token = None;
            return self.perform_login().await;
        }

        if self.challenge_config.active_site_key().is_none() {
            self.notifier.error("challenge provider is not configured");
            self.lock_state().in_flight = false;
            return LoginOutcome::Failed;
        }

        if let Err(e) = self
            .challenge
            .render(&self.challenge_config, self.widget_callbacks())
            .await
        {
            tracing::warn!("Challenge render failed: {}", e);
            self.notifier.error("challenge failed to load, please retry");
            self.lock_state().in_flight = false;
            return LoginOutcome::Failed;
        }

        // A token may already be on the form: left over from an earlier
        // render cycle, or stored by the success callback while the render
        // resolved. The token check and the decision to suspend must happen
        // under one lock acquisition; a callback that lands in between
        // would see `pending_login == false` and not resume, stranding the
        // attempt with the token parked on the form.
        {
            let mut state = self.lock_state();
            if state.form.challenge_token.is_none() {
                state.pending_login = true;
                state.in_flight = false;
                return LoginOutcome::AwaitingChallenge;
            }
        }
        self.perform_login().await
    }

    /// Delivers a challenge completion token.
    ///
    /// Stores the token on the form and, when an attempt was suspended
    /// waiting for exactly this token, resumes it and returns its outcome.
    /// Returns `None` when no attempt was pending.
    pub async fn on_challenge_token(&self, token: String) -> Option<LoginOutcome> {
        let resume = {
            let mut state = self.lock_state();
            state.form.challenge_token = Some(token);
            if state.pending_login && !state.in_flight {
                state.pending_login = false;
                state.in_flight = true;
                true
            } else {
                false
            }
        };

        if resume {
            Some(self.perform_login().await)
        } else {
            None
        }
    }

    /// Handles a widget error: clears the token and surfaces one notice.
    /// Never resumes a pending attempt.
    pub fn on_challenge_error(&self) {
        self.lock_state().form.challenge_token = None;
        self.notifier
            .error("challenge verification failed, please retry");
    }

    /// Handles token expiry: clears the token silently. The user has not
    /// acted yet, so no notice is shown and nothing resumes.
    pub fn on_challenge_expired(&self) {
        self.lock_state().form.challenge_token = None;
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AttemptState> {
        self.state.lock().expect("attempt state poisoned")
    }

    /// Builds the callbacks wired into the widget at render time.
    ///
    /// The success callback hops onto a fresh task: it fires from the
    /// host's event context, which must not block on the credential
    /// exchange.
    fn widget_callbacks(self: &Arc<Self>) -> WidgetCallbacks {
        let on_success = {
            let orchestrator = Arc::clone(self);
            Box::new(move |token: String| {
                let orchestrator = Arc::clone(&orchestrator);
                tokio::spawn(async move {
                    let _ = orchestrator.on_challenge_token(token).await;
                });
            })
        };
        let on_error = {
            let orchestrator = Arc::clone(self);
            Box::new(move || orchestrator.on_challenge_error())
        };
        let on_expire = {
            let orchestrator = Arc::clone(self);
            Box::new(move || orchestrator.on_challenge_expired())
        };
        WidgetCallbacks {
            on_success,
            on_error,
            on_expire,
        }
    }

    /// Performs the credential exchange. Expects the in-flight flag to be
    /// held by the caller.
    async fn perform_login(&self) -> LoginOutcome {
        let request = {
            let state = self.lock_state();
            LoginRequest {
                username: state.form.username.trim().to_string(),
                password: state.form.password.clone(),
                challenge_token: state.form.challenge_token.clone(),
            }
        };

        let response: Envelope<LoginReply> = self.transport.post(LOGIN_PATH, &request).await;

        if !response.is_success() {
            let message = if response.message.is_empty() {
                "login failed".to_string()
            } else {
                response.message.clone()
            };
            self.notifier.error(&message);
            return self.fail_attempt();
        }

        let reply = match response.data {
            Some(reply) => reply,
            None => {
                self.notifier.error("login failed");
                return self.fail_attempt();
            }
        };

        let session = Session::new(reply.token, reply.role_id, reply.name);
        session.persist(self.store.as_ref());

        {
            let mut state = self.lock_state();
            state.in_flight = false;
            state.pending_login = false;
        }

        if reply.require_password_change {
            self.notifier
                .success("default password detected, please change it");
            self.navigator.navigate_to(CHANGE_PASSWORD_PATH);
            LoginOutcome::Success(Destination::ChangePassword)
        } else {
            self.notifier.success("signed in");
            self.navigator.navigate_to(DASHBOARD_PATH);
            LoginOutcome::Success(Destination::Dashboard)
        }
    }

    /// Failure epilogue: force a fresh challenge on retry and drop the
    /// spent token.
    fn fail_attempt(&self) -> LoginOutcome {
        self.challenge.reset();
        let mut state = self.lock_state();
        state.form.challenge_token = None;
        state.in_flight = false;
        LoginOutcome::Failed
    }
}
