use std::sync::Arc;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use dealership_store::{MemoryStore, PgClient, PgConfig, SharedStore, run_pending_migrations};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::service::{TokenCodec, TokenConfig};
use crate::utility::TRACING_TARGET_SERVICE_STATE as TRACING_TARGET;
use crate::{Error, Result};

/// Default values for configuration options.
mod defaults {
    /// Persistent storage is the default backend.
    pub const IN_MEMORY: bool = false;

    /// Category mutations stay public unless explicitly protected.
    pub const PROTECT_CATEGORIES: bool = false;
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Postgres connection and pool settings.
    #[cfg_attr(any(test, feature = "config"), command(flatten))]
    #[builder(default)]
    pub postgres_config: PgConfig,

    /// Access token signing secret.
    #[cfg_attr(any(test, feature = "config"), command(flatten))]
    pub token_config: TokenConfig,

    /// Keeps every collection in process memory instead of Postgres.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long = "in-memory", env = "IN_MEMORY")
    )]
    #[builder(default = "defaults::IN_MEMORY")]
    pub in_memory: bool,

    /// Requires an administrator for category mutations.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long = "protect-categories", env = "PROTECT_CATEGORIES")
    )]
    #[builder(default = "defaults::PROTECT_CATEGORIES")]
    pub protect_categories: bool,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Validates every nested configuration.
    ///
    /// The Postgres settings are only checked when the store is persistent.
    pub fn validate(&self) -> Result<()> {
        self.token_config.validate()?;

        if !self.in_memory {
            self.postgres_config.validate()?;
        }

        Ok(())
    }

    /// Opens the configured store.
    ///
    /// The Postgres backend applies pending migrations first; a client whose
    /// migrations fail is closed before the error is returned.
    pub async fn connect_store(&self) -> Result<SharedStore> {
        if self.in_memory {
            tracing::warn!(
                target: TRACING_TARGET,
                "using the in-memory store, data is lost on shutdown"
            );
            return Ok(Arc::new(MemoryStore::new()));
        }

        let client = PgClient::new(self.postgres_config.clone()).map_err(|e| {
            Error::internal("postgres", "failed to create database client").with_source(e)
        })?;

        match run_pending_migrations(&client).await {
            Ok(result) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    applied = result.applied_versions.len(),
                    "store migrations up to date"
                );
            }
            Err(e) => {
                client.close();
                return Err(Error::internal("postgres", "failed to apply database migrations")
                    .with_source(e));
            }
        }

        Ok(Arc::new(client))
    }

    /// Creates the access token codec.
    pub fn create_token_codec(&self) -> Result<TokenCodec> {
        TokenCodec::from_config(&self.token_config)
    }
}

impl ServiceConfigBuilder {
    /// Wrapper for builder validation that returns String errors.
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let Some(token_config) = &builder.token_config {
            token_config.validate().map_err(|e| e.to_string())?;
        }

        let in_memory = builder.in_memory.unwrap_or(defaults::IN_MEMORY);
        if let Some(postgres_config) = &builder.postgres_config
            && !in_memory
        {
            postgres_config.validate().map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        service: ServiceConfig,
    }

    #[test]
    fn builder_applies_defaults() -> anyhow::Result<()> {
        let config = ServiceConfig::builder()
            .with_token_config(TokenConfig::new("secret"))
            .build()?;

        assert!(!config.in_memory);
        assert!(!config.protect_categories);
        assert!(config.validate().is_ok());
        Ok(())
    }

    #[test]
    fn builder_rejects_empty_secret() {
        let result = ServiceConfig::builder()
            .with_token_config(TokenConfig::new(""))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn builder_requires_token_config() {
        assert!(ServiceConfig::builder().with_in_memory(true).build().is_err());
    }

    #[test]
    fn postgres_is_ignored_in_memory() -> anyhow::Result<()> {
        let config = ServiceConfig::builder()
            .with_postgres_config(PgConfig::new("mysql://localhost/dealership"))
            .with_token_config(TokenConfig::new("secret"))
            .with_in_memory(true)
            .build()?;
        assert!(config.validate().is_ok());

        let persistent = ServiceConfig {
            in_memory: false,
            ..config
        };
        assert!(persistent.validate().is_err());
        Ok(())
    }

    #[test]
    fn parses_flags() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "dealership",
            "--token-secret",
            "secret",
            "--in-memory",
            "--protect-categories",
        ])?;

        assert!(cli.service.in_memory);
        assert!(cli.service.protect_categories);
        assert_eq!(cli.service.token_config.token_secret, "secret");
        Ok(())
    }

    #[tokio::test]
    async fn connects_in_memory_store() -> anyhow::Result<()> {
        let config = ServiceConfig::builder()
            .with_token_config(TokenConfig::new("secret"))
            .with_in_memory(true)
            .build()?;

        let store = config.connect_store().await?;
        assert_eq!(store.backend(), "memory");
        Ok(())
    }
}
