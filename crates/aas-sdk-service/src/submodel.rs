//! Submodel orchestration.
//!
//! Reads go registry-first: fetch the descriptor, take its
//! `SUBMODEL-3.0` endpoint, fetch the submodel from that host. Any failure
//! on that path falls back to the statically configured repository. Writes
//! go to the repository first and are mirrored into the registry.

use crate::config::{derived_config, SubmodelServiceConfig};
use crate::endpoints::{base_url_of, Resource};
use crate::error::{ServiceError, ServiceKind, ServiceResult};
use crate::policy::{BestEffortAggregate, FailLoudDualWrite};
use crate::Source;
use aas_sdk_client::{
    ConceptDescriptionRepositoryApi, ConceptDescriptionRepositoryClient, Configuration,
    HttpClient, SubmodelRegistryApi, SubmodelRegistryClient, SubmodelRepositoryApi,
    SubmodelRepositoryClient,
};
use aas_sdk_core::{
    ConceptDescription, Endpoint, PageRequest, PagingMetadata, Submodel, SubmodelDescriptor,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Clients used by a [`SubmodelService`].
#[derive(Clone)]
pub struct SubmodelClients {
    /// Submodel registry
    pub registry: Arc<dyn SubmodelRegistryApi>,
    /// Submodel repository
    pub repository: Arc<dyn SubmodelRepositoryApi>,
    /// Concept description repository
    pub concept_descriptions: Arc<dyn ConceptDescriptionRepositoryApi>,
}

impl SubmodelClients {
    /// HTTP clients sharing one transport.
    #[must_use]
    pub fn http(http: &HttpClient) -> Self {
        Self {
            registry: Arc::new(SubmodelRegistryClient::new(http.clone())),
            repository: Arc::new(SubmodelRepositoryClient::new(http.clone())),
            concept_descriptions: Arc::new(ConceptDescriptionRepositoryClient::new(http.clone())),
        }
    }
}

/// Options of [`SubmodelService::get_submodel_list`].
#[derive(Debug, Clone)]
pub struct GetSubmodelListOptions {
    /// Try the registry before the repository
    pub prefer_registry: bool,
    /// Page size
    pub limit: Option<u32>,
    /// Cursor of the page to fetch
    pub cursor: Option<String>,
    /// Also fetch concept descriptions referenced by the submodels
    pub include_concept_descriptions: bool,
}

impl Default for GetSubmodelListOptions {
    fn default() -> Self {
        Self {
            prefer_registry: true,
            limit: None,
            cursor: None,
            include_concept_descriptions: false,
        }
    }
}

/// Result of [`SubmodelService::get_submodel_list`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelList {
    /// Submodels found
    pub submodels: Vec<Submodel>,
    /// Which store answered
    pub source: Source,
    /// Paging state of the listing call
    pub paging_metadata: PagingMetadata,
    /// Referenced concept descriptions, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept_descriptions: Option<Vec<ConceptDescription>>,
}

/// Options of [`SubmodelService::get_submodel_by_id`].
#[derive(Debug, Clone)]
pub struct GetSubmodelByIdOptions {
    /// Submodel identifier
    pub submodel_identifier: String,
    /// Try the registry descriptor's endpoint before the repository
    pub use_registry_endpoint: bool,
    /// Also fetch referenced concept descriptions
    pub include_concept_descriptions: bool,
}

impl GetSubmodelByIdOptions {
    /// Default options for `submodel_identifier`.
    #[must_use]
    pub fn new(submodel_identifier: impl Into<String>) -> Self {
        Self {
            submodel_identifier: submodel_identifier.into(),
            use_registry_endpoint: true,
            include_concept_descriptions: false,
        }
    }
}

/// A submodel and, if it came through the registry, its descriptor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelWithDescriptor {
    /// The submodel
    pub submodel: Submodel,
    /// Registry descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<SubmodelDescriptor>,
    /// Referenced concept descriptions, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept_descriptions: Option<Vec<ConceptDescription>>,
}

/// Registry-first access to submodels.
#[derive(Clone)]
pub struct SubmodelService {
    config: SubmodelServiceConfig,
    clients: SubmodelClients,
}

impl SubmodelService {
    /// Create a service talking HTTP to the configured services.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: SubmodelServiceConfig) -> ServiceResult<Self> {
        let http = HttpClient::new()?;
        Ok(Self::with_clients(config, SubmodelClients::http(&http)))
    }

    /// Create a service on top of the given clients.
    #[must_use]
    pub fn with_clients(config: SubmodelServiceConfig, clients: SubmodelClients) -> Self {
        Self { config, clients }
    }

    fn repository_config(&self) -> ServiceResult<&Configuration> {
        self.config
            .repository_config
            .as_ref()
            .ok_or(ServiceError::missing(ServiceKind::SubmodelRepository))
    }

    fn endpoint_config(&self, base_url: &str) -> Configuration {
        derived_config(
            base_url,
            &[
                self.config.repository_config.as_ref(),
                self.config.registry_config.as_ref(),
            ],
        )
    }

    /// Fetch the submodel a descriptor points at.
    async fn fetch_from_descriptor(&self, descriptor: &SubmodelDescriptor) -> ServiceResult<Submodel> {
        let interface = Resource::Submodel.interface();
        let href = descriptor.endpoint_href(interface).ok_or_else(|| {
            ServiceError::invalid_endpoint("", format!("descriptor {} has no {interface} endpoint", descriptor.id))
        })?;
        let base_url = base_url_of(href)
            .ok_or_else(|| ServiceError::invalid_endpoint(href, "no scheme://host[:port] prefix"))?;

        let config = self.endpoint_config(base_url);
        Ok(self
            .clients
            .repository
            .get_submodel_by_id(&config, &descriptor.id)
            .await?)
    }

    async fn fetch_via_registry(
        &self,
        registry: &Configuration,
        submodel_id: &str,
    ) -> ServiceResult<(Submodel, SubmodelDescriptor)> {
        let descriptor = self
            .clients
            .registry
            .get_submodel_descriptor_by_id(registry, submodel_id)
            .await?;
        let submodel = self.fetch_from_descriptor(&descriptor).await?;
        Ok((submodel, descriptor))
    }

    /// List submodels, from the registry if possible.
    ///
    /// Registry-listed submodels that cannot be fetched are left out. If the
    /// registry listing itself fails, the repository is listed instead.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] if the repository is needed
    /// but not configured, or the repository's error.
    pub async fn get_submodel_list(&self, options: GetSubmodelListOptions) -> ServiceResult<SubmodelList> {
        let page = PageRequest {
            limit: options.limit,
            cursor: options.cursor.clone(),
        };

        if let Some(registry) = self.config.registry_config.as_ref().filter(|_| options.prefer_registry) {
            match self.clients.registry.get_all_submodel_descriptors(registry, &page).await {
                Ok(descriptors) => {
                    let mut aggregate = BestEffortAggregate::new("submodel list");
                    for descriptor in &descriptors.result {
                        let result = self.fetch_from_descriptor(descriptor).await;
                        aggregate.record(&descriptor.id, result);
                    }
                    let submodels = aggregate.finish();
                    let concept_descriptions = self
                        .concept_descriptions_for(&submodels, options.include_concept_descriptions)
                        .await;

                    return Ok(SubmodelList {
                        submodels,
                        source: Source::Registry,
                        paging_metadata: descriptors.paging_metadata,
                        concept_descriptions,
                    });
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Submodel registry listing failed, using repository");
                }
            }
        }

        let repository = self.repository_config()?;
        let listed = self.clients.repository.get_all_submodels(repository, &page).await?;
        let concept_descriptions = self
            .concept_descriptions_for(&listed.result, options.include_concept_descriptions)
            .await;

        Ok(SubmodelList {
            submodels: listed.result,
            source: Source::Repository,
            paging_metadata: listed.paging_metadata,
            concept_descriptions,
        })
    }

    /// Fetch a submodel, through its registry endpoint if possible.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] if the registry path failed
    /// and no repository is configured, or the repository's error.
    pub async fn get_submodel_by_id(
        &self,
        options: GetSubmodelByIdOptions,
    ) -> ServiceResult<SubmodelWithDescriptor> {
        let id = options.submodel_identifier.as_str();

        if let Some(registry) = self
            .config
            .registry_config
            .as_ref()
            .filter(|_| options.use_registry_endpoint)
        {
            match self.fetch_via_registry(registry, id).await {
                Ok((submodel, descriptor)) => {
                    return Ok(self
                        .with_concept_descriptions(submodel, Some(descriptor), options.include_concept_descriptions)
                        .await);
                }
                Err(e) => {
                    tracing::debug!(submodel_id = id, error = %e, "Registry path failed, using repository");
                }
            }
        }

        let repository = self.repository_config()?;
        let submodel = self.clients.repository.get_submodel_by_id(repository, id).await?;
        Ok(self
            .with_concept_descriptions(submodel, None, options.include_concept_descriptions)
            .await)
    }

    /// Absolute endpoint of a submodel.
    ///
    /// Uses the registry descriptor's `SUBMODEL-3.0` endpoint when available,
    /// otherwise derives `{repository}/submodels/{base64url(id)}`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] if the endpoint has to be
    /// derived and no repository is configured.
    pub async fn get_submodel_endpoint_by_id(
        &self,
        submodel_identifier: &str,
        use_registry: bool,
    ) -> ServiceResult<String> {
        if let Some(registry) = self.config.registry_config.as_ref().filter(|_| use_registry) {
            match self
                .clients
                .registry
                .get_submodel_descriptor_by_id(registry, submodel_identifier)
                .await
            {
                Ok(descriptor) => {
                    if let Some(href) = descriptor.endpoint_href(Resource::Submodel.interface()) {
                        return Ok(href.to_string());
                    }
                }
                Err(e) => {
                    tracing::debug!(submodel_id = submodel_identifier, error = %e, "No registry endpoint");
                }
            }
        }

        let repository = self.repository_config()?;
        Ok(Resource::Submodel.endpoint(repository, submodel_identifier))
    }

    /// Fetch a submodel from an endpoint URL, bypassing the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidEndpoint`] if the URL is not
    /// `scheme://host[:port]/submodels/{base64url(id)}`, or the repository's
    /// error.
    pub async fn get_submodel_by_endpoint(
        &self,
        endpoint: &str,
        include_concept_descriptions: bool,
    ) -> ServiceResult<SubmodelWithDescriptor> {
        let parsed = Resource::Submodel.parse(endpoint)?;
        let config = self.endpoint_config(&parsed.base_url);
        let submodel = self
            .clients
            .repository
            .get_submodel_by_id(&config, &parsed.id)
            .await?;

        Ok(self
            .with_concept_descriptions(submodel, None, include_concept_descriptions)
            .await)
    }

    /// Store a submodel and register its descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] without a repository, the
    /// repository's error, or the registry's error. In the last case the
    /// submodel already exists in the repository.
    pub async fn create_submodel(
        &self,
        submodel: Submodel,
        register_in_registry: bool,
    ) -> ServiceResult<SubmodelWithDescriptor> {
        let repository = self.repository_config()?;
        let mut write = FailLoudDualWrite::new("create submodel", &submodel.id);

        let created = write.step(
            "repository",
            self.clients.repository.post_submodel(repository, &submodel).await,
        )?;

        let descriptor = match self.config.registry_config.as_ref().filter(|_| register_in_registry) {
            Some(registry) => {
                let descriptor = self.create_descriptor_from_submodel(&created)?;
                Some(write.step(
                    "registry",
                    self.clients
                        .registry
                        .post_submodel_descriptor(registry, &descriptor)
                        .await,
                )?)
            }
            None => None,
        };

        Ok(SubmodelWithDescriptor {
            submodel: created,
            descriptor,
            concept_descriptions: None,
        })
    }

    /// Replace a submodel and its descriptor.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_submodel`].
    pub async fn update_submodel(
        &self,
        submodel: Submodel,
        update_in_registry: bool,
    ) -> ServiceResult<SubmodelWithDescriptor> {
        let repository = self.repository_config()?;
        let id = submodel.id.clone();
        let mut write = FailLoudDualWrite::new("update submodel", &id);

        let returned = write.step(
            "repository",
            self.clients
                .repository
                .put_submodel_by_id(repository, &id, &submodel)
                .await,
        )?;
        let updated = returned.unwrap_or(submodel);

        let descriptor = match self.config.registry_config.as_ref().filter(|_| update_in_registry) {
            Some(registry) => {
                let descriptor = self.create_descriptor_from_submodel(&updated)?;
                let returned = write.step(
                    "registry",
                    self.clients
                        .registry
                        .put_submodel_descriptor_by_id(registry, &id, &descriptor)
                        .await,
                )?;
                Some(returned.unwrap_or(descriptor))
            }
            None => None,
        };

        Ok(SubmodelWithDescriptor {
            submodel: updated,
            descriptor,
            concept_descriptions: None,
        })
    }

    /// Remove a submodel from the registry, then from the repository.
    ///
    /// If the registry delete fails the repository is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first failing store's error, or
    /// [`ServiceError::Configuration`] if neither store is configured.
    pub async fn delete_submodel(&self, submodel_identifier: &str, delete_from_registry: bool) -> ServiceResult<()> {
        let mut write = FailLoudDualWrite::new("delete submodel", submodel_identifier);
        let mut touched = false;

        if let Some(registry) = self.config.registry_config.as_ref().filter(|_| delete_from_registry) {
            write.step(
                "registry",
                self.clients
                    .registry
                    .delete_submodel_descriptor_by_id(registry, submodel_identifier)
                    .await,
            )?;
            touched = true;
        }

        match self.config.repository_config.as_ref() {
            Some(repository) => write.step(
                "repository",
                self.clients
                    .repository
                    .delete_submodel_by_id(repository, submodel_identifier)
                    .await,
            ),
            None if touched => Ok(()),
            None => Err(ServiceError::missing(ServiceKind::SubmodelRepository)),
        }
    }

    /// Descriptor for `submodel` pointing at the configured repository.
    ///
    /// The endpoint is always derived from the repository configuration,
    /// never copied from an existing descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] without a repository.
    pub fn create_descriptor_from_submodel(&self, submodel: &Submodel) -> ServiceResult<SubmodelDescriptor> {
        let repository = self.repository_config()?;
        let interface = Resource::Submodel.interface();

        Ok(SubmodelDescriptor {
            id: submodel.id.clone(),
            id_short: submodel.id_short.clone(),
            display_name: submodel.display_name.clone(),
            description: submodel.description.clone(),
            extensions: submodel.extensions.clone(),
            administration: submodel.administration.clone(),
            semantic_id: submodel.semantic_id.clone(),
            supplemental_semantic_id: submodel.supplemental_semantic_ids.clone(),
            endpoints: vec![Endpoint::http(
                interface,
                Resource::Submodel.endpoint(repository, &submodel.id),
            )],
        })
    }

    async fn with_concept_descriptions(
        &self,
        submodel: Submodel,
        descriptor: Option<SubmodelDescriptor>,
        include: bool,
    ) -> SubmodelWithDescriptor {
        let concept_descriptions = self
            .concept_descriptions_for(std::slice::from_ref(&submodel), include)
            .await;
        SubmodelWithDescriptor {
            submodel,
            descriptor,
            concept_descriptions,
        }
    }

    /// Concept descriptions for the semantic ids used in `submodels`.
    ///
    /// `None` unless requested and a concept description repository is
    /// configured. Ids that cannot be fetched are left out.
    pub(crate) async fn concept_descriptions_for(
        &self,
        submodels: &[Submodel],
        include: bool,
    ) -> Option<Vec<ConceptDescription>> {
        if !include {
            return None;
        }
        let Some(config) = self.config.concept_description_repository_config.as_ref() else {
            tracing::debug!("Concept descriptions requested but no repository configured");
            return None;
        };

        let ids: BTreeSet<String> = submodels.iter().flat_map(Submodel::semantic_ids).collect();
        let mut aggregate = BestEffortAggregate::new("concept descriptions");
        for id in &ids {
            let result = self
                .clients
                .concept_descriptions
                .get_concept_description_by_id(config, id)
                .await;
            aggregate.record(id, result);
        }

        Some(aggregate.finish())
    }
}
