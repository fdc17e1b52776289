//! Service configuration.
//!
//! Every remote service is optional; which ones are present decides which
//! code paths an operation can take. Defaulting is resolved once, when a
//! service is constructed.

use aas_sdk_client::Configuration;

/// Configuration of an [`crate::AasService`].
#[derive(Debug, Clone, Default)]
pub struct AasServiceConfig {
    /// AAS registry
    pub registry_config: Option<Configuration>,
    /// AAS repository
    pub repository_config: Option<Configuration>,
    /// Submodel registry; defaults to `registry_config`
    pub submodel_registry_config: Option<Configuration>,
    /// Submodel repository; defaults to `repository_config`
    pub submodel_repository_config: Option<Configuration>,
    /// Concept description repository
    pub concept_description_repository_config: Option<Configuration>,
    /// AAS discovery service
    pub discovery_config: Option<Configuration>,
}

/// Configuration of a [`crate::SubmodelService`].
#[derive(Debug, Clone, Default)]
pub struct SubmodelServiceConfig {
    /// Submodel registry
    pub registry_config: Option<Configuration>,
    /// Submodel repository
    pub repository_config: Option<Configuration>,
    /// Concept description repository
    pub concept_description_repository_config: Option<Configuration>,
}

/// [`AasServiceConfig`] with defaults applied.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedAasConfig {
    pub registry: Option<Configuration>,
    pub repository: Option<Configuration>,
    pub discovery: Option<Configuration>,
    pub submodel: SubmodelServiceConfig,
}

impl AasServiceConfig {
    pub(crate) fn resolve(self) -> ResolvedAasConfig {
        let submodel = SubmodelServiceConfig {
            registry_config: self
                .submodel_registry_config
                .or_else(|| self.registry_config.clone()),
            repository_config: self
                .submodel_repository_config
                .or_else(|| self.repository_config.clone()),
            concept_description_repository_config: self.concept_description_repository_config,
        };

        ResolvedAasConfig {
            registry: self.registry_config,
            repository: self.repository_config,
            discovery: self.discovery_config,
            submodel,
        }
    }
}

/// Configuration for a host derived from a descriptor endpoint.
///
/// Transport settings come from the first configured service in
/// `inherit_from`; the base path is always `base_url`.
pub(crate) fn derived_config(base_url: &str, inherit_from: &[Option<&Configuration>]) -> Configuration {
    inherit_from
        .iter()
        .flatten()
        .next()
        .map_or_else(|| Configuration::new(base_url), |c| c.rebased(base_url))
}
