//! panel-client - login and session core of an admin panel client
//!
//! This library implements the client side of the panel's authentication
//! flow: credential validation, the conditional bot-verification
//! challenge, the credential exchange, and bearer-token session state for
//! every subsequent authorized request.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: the uniform response envelope and the normalizing transport
//!   client; the single entry point for backend calls
//! - `session`: session claim storage and the expiry guard
//! - `challenge`: provider-script and widget lifecycle behind a host port
//! - `login`: the orchestration state machine for one login attempt
//! - `config`: configuration loading and validation
//! - `error`: error types and result aliases
//! - `ports`: navigation and notification collaborator traits
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use panel_client::api::transport::Transport;
//! use panel_client::challenge::ChallengeCoordinator;
//! use panel_client::config::ClientConfig;
//! use panel_client::login::LoginOrchestrator;
//! use panel_client::ports::{Navigator, Notifier};
//! use panel_client::session::store::{MemorySessionStore, SessionStore};
//!
//! # fn collaborators() -> (Arc<dyn Navigator>, Arc<dyn Notifier>, Arc<dyn panel_client::challenge::ChallengeHost>) { unimplemented!() }
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::load("panel-client.yaml")?;
//!     let (navigator, notifier, host) = collaborators();
//!
//!     let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
//!     let transport = Arc::new(Transport::from_config(
//!         &config.api,
//!         Arc::clone(&store),
//!         Arc::clone(&navigator),
//!     ));
//!     let challenge = Arc::new(ChallengeCoordinator::new(host));
//!     let login = Arc::new(LoginOrchestrator::new(
//!         transport, store, navigator, notifier, challenge, config.challenge,
//!     ));
//!
//!     login.login("admin", "secret1").await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod challenge;
pub mod config;
pub mod error;
pub mod login;
pub mod ports;
pub mod session;

// Re-export commonly used types
pub use api::envelope::Envelope;
pub use api::transport::Transport;
pub use challenge::{ChallengeCoordinator, ChallengeHost};
pub use config::ClientConfig;
pub use error::{PanelError, Result};
pub use login::{Destination, LoginOrchestrator, LoginOutcome};
pub use session::{Session, SessionGuard, SessionStore};

#[cfg(test)]
pub mod test_utils;
