//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::DocumentStore;
use crate::services::auth::{AuthService, TokenSigner};
use crate::services::contact::ContactService;
use crate::services::content::ContentService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// document store, configuration and services.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Arc<dyn DocumentStore>,
    tokens: TokenSigner,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `store` - Document store selected by `config.store`
    #[must_use]
    pub fn new(config: ServerConfig, store: Arc<dyn DocumentStore>) -> Self {
        let tokens = TokenSigner::new(config.jwt_secret.clone(), config.token_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                tokens,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    /// Authentication service bound to this state.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_, dyn DocumentStore> {
        AuthService::new(
            &*self.inner.store,
            &self.inner.tokens,
            &self.inner.config.admin_email,
        )
    }

    /// Content service bound to this state.
    #[must_use]
    pub fn content(&self) -> ContentService<'_, dyn DocumentStore> {
        ContentService::new(&*self.inner.store)
    }

    /// Contact intake service bound to this state.
    #[must_use]
    pub fn contact(&self) -> ContactService<'_, dyn DocumentStore> {
        ContactService::new(&*self.inner.store)
    }
}
