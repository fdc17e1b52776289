//! CLI configuration.

use aas_sdk_client::Configuration;
use aas_sdk_service::AasServiceConfig;
use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

/// Service endpoints and credentials read from the environment.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// AAS registry URL
    pub registry_url: Option<String>,

    /// AAS repository URL
    pub repository_url: Option<String>,

    /// Submodel registry URL
    pub submodel_registry_url: Option<String>,

    /// Submodel repository URL
    pub submodel_repository_url: Option<String>,

    /// Concept description repository URL
    pub concept_description_repository_url: Option<String>,

    /// Discovery service URL
    pub discovery_url: Option<String>,

    /// Bearer token sent to every service
    pub bearer_token: Option<String>,

    /// Per-request timeout
    pub timeout: Option<Duration>,
}

fn url_var(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            Url::parse(&value).with_context(|| format!("Invalid {name}"))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

impl CliConfig {
    /// Load configuration from `AAS_SDK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            registry_url: url_var("AAS_SDK_REGISTRY_URL")?,
            repository_url: url_var("AAS_SDK_REPOSITORY_URL")?,
            submodel_registry_url: url_var("AAS_SDK_SUBMODEL_REGISTRY_URL")?,
            submodel_repository_url: url_var("AAS_SDK_SUBMODEL_REPOSITORY_URL")?,
            concept_description_repository_url: url_var(
                "AAS_SDK_CONCEPT_DESCRIPTION_REPOSITORY_URL",
            )?,
            discovery_url: url_var("AAS_SDK_DISCOVERY_URL")?,
            ..Self::default()
        };

        if let Ok(token) = std::env::var("AAS_SDK_BEARER_TOKEN") {
            config.bearer_token = Some(token);
        }

        if let Ok(secs) = std::env::var("AAS_SDK_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().context("Invalid AAS_SDK_TIMEOUT_SECS")?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    fn client_config(&self, url: Option<&String>) -> Option<Configuration> {
        url.map(|url| {
            let mut config = Configuration::new(url.as_str());
            if let Some(token) = &self.bearer_token {
                config = config.with_bearer_token(token.as_str());
            }
            if let Some(timeout) = self.timeout {
                config.timeout = timeout;
            }
            config
        })
    }

    /// Service configuration with one slot per URL that was set.
    #[must_use]
    pub fn service_config(&self) -> AasServiceConfig {
        AasServiceConfig {
            registry_config: self.client_config(self.registry_url.as_ref()),
            repository_config: self.client_config(self.repository_url.as_ref()),
            submodel_registry_config: self.client_config(self.submodel_registry_url.as_ref()),
            submodel_repository_config: self.client_config(self.submodel_repository_url.as_ref()),
            concept_description_repository_config: self
                .client_config(self.concept_description_repository_url.as_ref()),
            discovery_config: self.client_config(self.discovery_url.as_ref()),
        }
    }
}
