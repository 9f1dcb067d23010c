//! Application state management

use crate::session::SessionStore;
use voiceiq_client::ApiClient;
use voiceiq_core::{Config, Result};

/// Shared application state
#[derive(Debug)]
pub struct AppState {
    /// Application configuration
    pub config: Config,

    /// Unauthenticated client for the backend API; per-session clients are
    /// derived from it with `with_token`
    pub api_client: ApiClient,

    /// Active sessions
    pub sessions: SessionStore,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let api_client = ApiClient::from_config(&config.backend)?;
        let sessions = SessionStore::new(config.session.ttl());

        Ok(Self {
            config,
            api_client,
            sessions,
        })
    }
}
