//! Configuration management for the panel client
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files and environment variables. The client consumes
//! the configuration surface but does not own it: the base API address may
//! be replaced later through [`crate::api::transport::Transport::reconfigure`]
//! or a panel-address update pushed by the host shell.

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::error::{PanelError, Result};

/// Versioned API prefix appended to every configured panel address.
pub const API_PREFIX: &str = "api/v1/";

/// Main configuration structure for the panel client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Bot-verification challenge settings
    #[serde(default)]
    pub challenge: ChallengeConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Panel address, e.g. `https://panel.example.com`.
    ///
    /// When unset, every request resolves immediately to a client-side
    /// failure envelope without touching the network.
    #[serde(default)]
    pub base_address: Option<String>,
}

impl ApiConfig {
    /// Resolves the configured address into the versioned API base URL.
    ///
    /// A trailing slash is enforced before joining so that addresses with
    /// a path component keep their last segment, and the result always
    /// ends in `/api/v1/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use panel_client::config::ApiConfig;
    ///
    /// let api = ApiConfig {
    ///     base_address: Some("https://panel.example.com".to_string()),
    /// };
    /// assert_eq!(
    ///     api.base_url().unwrap().as_str(),
    ///     "https://panel.example.com/api/v1/",
    /// );
    /// ```
    pub fn base_url(&self) -> Option<Url> {
        let address = self.base_address.as_deref()?;
        join_api_prefix(address)
    }
}

/// Builds `<address>/api/v1/` from a raw panel address.
fn join_api_prefix(address: &str) -> Option<Url> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return None;
    }
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    let base = Url::parse(&with_slash).ok()?;
    base.join(API_PREFIX).ok()
}

/// Challenge (bot-verification) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeConfig {
    /// Whether the challenge feature is switched on directly.
    #[serde(default)]
    pub enabled: bool,

    /// Named challenge provider; `"turnstile"` also activates the feature
    /// regardless of `enabled`.
    #[serde(default)]
    pub provider: Option<String>,

    /// Site key issued by the challenge provider.
    #[serde(default)]
    pub site_key: Option<String>,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: None,
            site_key: None,
        }
    }
}

impl ChallengeConfig {
    /// Returns `true` when the challenge feature is active.
    ///
    /// Active means either the explicit flag is set or the configured
    /// provider is `turnstile` (case-insensitive), mirroring how the panel
    /// exposes the two settings.
    pub fn is_active(&self) -> bool {
        self.enabled
            || self
                .provider
                .as_deref()
                .map_or(false, |p| p.eq_ignore_ascii_case("turnstile"))
    }

    /// Returns the site key when the feature is active and fully
    /// configured, `None` otherwise.
    pub fn active_site_key(&self) -> Option<&str> {
        if !self.is_active() {
            return None;
        }
        self.site_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// A panel address entry pushed by the host shell.
///
/// Hosts that manage several panels hand the client the full list; the
/// entry flagged `inx` is the active one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelAddress {
    /// Human-readable panel name.
    pub name: String,
    /// Raw panel address without the API prefix.
    pub address: String,
    /// Marks the entry currently in use.
    pub inx: bool,
}

/// Selects the active entry and derives its API base URL.
///
/// Returns `None` when no entry is flagged active or the flagged address
/// does not parse.
pub fn select_active_base(addresses: &[PanelAddress]) -> Option<Url> {
    addresses
        .iter()
        .find(|a| a.inx)
        .and_then(|a| join_api_prefix(&a.address))
}

impl ClientConfig {
    /// Loads configuration from a YAML file and applies environment
    /// overrides.
    ///
    /// A missing file yields the default configuration (everything off,
    /// no base address) so that a host can run purely on overrides.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Io`] when the file cannot be read,
    /// [`PanelError::Yaml`] when it does not parse, and
    /// [`PanelError::Configuration`] when the resulting settings fail
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(PanelError::Io)?;
            Self::from_yaml(&contents)?
        } else {
            tracing::debug!("No config file at {}; using defaults", path.display());
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents).map_err(PanelError::Yaml)?)
    }

    /// Checks settings that would otherwise fail silently at request time.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Configuration`] when a base address is set
    /// but does not parse into a URL.
    pub fn validate(&self) -> Result<()> {
        if let Some(address) = self.api.base_address.as_deref() {
            if !address.trim().is_empty() && join_api_prefix(address).is_none() {
                anyhow::bail!(PanelError::Configuration(format!(
                    "invalid panel address '{}'",
                    address
                )));
            }
        }
        Ok(())
    }

    /// Applies `PANEL_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base) = std::env::var("PANEL_API_BASE") {
            self.api.base_address = Some(base.clone());
            tracing::debug!(base = %base, "Env override: PANEL_API_BASE");
        }

        if let Ok(enabled) = std::env::var("PANEL_CHALLENGE_ENABLED") {
            match enabled.parse::<bool>() {
                Ok(v) => {
                    self.challenge.enabled = v;
                    tracing::debug!(enabled = v, "Env override: PANEL_CHALLENGE_ENABLED");
                }
                Err(_) => {
                    tracing::warn!("Invalid value for PANEL_CHALLENGE_ENABLED: {}", enabled);
                }
            }
        }

        if let Ok(site_key) = std::env::var("PANEL_CHALLENGE_SITE_KEY") {
            self.challenge.site_key = Some(site_key);
            tracing::debug!("Env override: PANEL_CHALLENGE_SITE_KEY");
        }
    }
}
