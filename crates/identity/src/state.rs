//! Shared application state.

use std::sync::Arc;

use crate::config::IdentityConfig;
use crate::db::UserStore;
use crate::services::AuthService;
use crate::token::TokenIssuer;

/// Shared state handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: IdentityConfig,
    store: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl AppState {
    /// Build state over the given store. The token issuer is derived from
    /// the configured signing secret.
    #[must_use]
    pub fn new(config: IdentityConfig, store: Arc<dyn UserStore>) -> Self {
        let tokens = TokenIssuer::new(&config.token_secret);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                tokens,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &IdentityConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.inner.store
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenIssuer {
        &self.inner.tokens
    }

    /// Auth service over this state's store and token issuer.
    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(Arc::clone(&self.inner.store), self.inner.tokens.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryUserStore;
    use secrecy::SecretString;
    use std::net::IpAddr;

    #[test]
    fn test_config_is_reachable_through_state() {
        let config = IdentityConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "0.0.0.0".parse::<IpAddr>().unwrap(),
            port: 8081,
            token_secret: SecretString::from("kx7Qw9mZp3Lr8Tv2Ny5Jc1Hb4Fd6Gs0A-test"),
            sentry_dsn: None,
        };
        let state = AppState::new(config, Arc::new(MemoryUserStore::new()));

        let addr = state.config().socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8081);
    }
}
