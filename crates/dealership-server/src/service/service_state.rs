//! Application state and dependency injection.

use dealership_store::SharedStore;

use crate::Result;
use crate::service::{ServiceConfig, TokenCodec};
use crate::utility::TRACING_TARGET_SERVICE_STATE as TRACING_TARGET;

/// Route-level options decided once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutePolicy {
    /// Category mutations require an administrator.
    pub protect_categories: bool,
}

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    store: SharedStore,
    token_codec: TokenCodec,
    route_policy: RoutePolicy,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Opens the store and prepares the token codec. Nothing is left open
    /// when this fails.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let token_codec = config.create_token_codec()?;
        let store = config.connect_store().await?;

        tracing::info!(
            target: TRACING_TARGET,
            backend = store.backend(),
            protect_categories = config.protect_categories,
            "service state initialized"
        );

        Ok(Self {
            store,
            token_codec,
            route_policy: RoutePolicy {
                protect_categories: config.protect_categories,
            },
        })
    }

    /// Assembles state from already opened parts.
    pub fn from_parts(
        store: SharedStore,
        token_codec: TokenCodec,
        route_policy: RoutePolicy,
    ) -> Self {
        Self {
            store,
            token_codec,
            route_policy,
        }
    }

    /// Returns the store handle.
    #[inline]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Returns the access token codec.
    #[inline]
    pub fn token_codec(&self) -> &TokenCodec {
        &self.token_codec
    }

    /// Returns the route-level options.
    #[inline]
    pub fn route_policy(&self) -> RoutePolicy {
        self.route_policy
    }

    /// Releases the store.
    ///
    /// Called once after the server stopped accepting requests.
    pub async fn close(&self) {
        tracing::info!(
            target: TRACING_TARGET,
            backend = self.store.backend(),
            "closing service state"
        );
        self.store.close().await;
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(store: SharedStore);
impl_di!(token_codec: TokenCodec);
impl_di!(route_policy: RoutePolicy);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::TokenConfig;

    #[tokio::test]
    async fn from_config_rejects_empty_secret() {
        let config = ServiceConfig {
            postgres_config: Default::default(),
            token_config: TokenConfig::new(""),
            in_memory: true,
            protect_categories: false,
        };

        assert!(ServiceState::from_config(&config).await.is_err());
    }

    #[tokio::test]
    async fn from_config_in_memory() -> anyhow::Result<()> {
        let config = ServiceConfig::builder()
            .with_token_config(TokenConfig::new("secret"))
            .with_in_memory(true)
            .with_protect_categories(true)
            .build()?;

        let state = ServiceState::from_config(&config).await?;
        assert_eq!(state.store().backend(), "memory");
        assert!(state.route_policy().protect_categories);

        state.close().await;
        Ok(())
    }
}
