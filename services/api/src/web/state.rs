//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::{Config, ConfigError};
use crate::web::session::SessionSigner;
use food_api_core::ports::{RecordStore, SessionStore};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub signer: SessionSigner,
    pub config: Arc<Config>,
}

impl AppState {
    /// Assembles the state, keying the cookie signer with the configured secret.
    pub fn new(
        config: Arc<Config>,
        store: Arc<dyn RecordStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, ConfigError> {
        let signer = SessionSigner::new(&config.session_secret)?;
        Ok(Self {
            store,
            sessions,
            signer,
            config,
        })
    }
}
