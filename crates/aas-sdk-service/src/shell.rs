//! Shell orchestration.
//!
//! [`AasService`] answers shell-level queries across an AAS registry, an
//! AAS repository, and a discovery service, and delegates submodel work to
//! a nested [`SubmodelService`].
//!
//! | Operation | Registry | Repository | Partial failure |
//! |---|---|---|---|
//! | `get_aas_list` | first | fallback | best effort |
//! | `get_aas_by_id` | first | fallback | fallback |
//! | `create_aas` / `update_aas` | second | first | fail loud |
//! | `delete_aas` | first | second | fail loud |
//! | `get_aas_by_asset_id` | via `get_aas_by_id` | via `get_aas_by_id` | ≥1 success |

use crate::config::{derived_config, AasServiceConfig};
use crate::endpoints::{base_url_of, Resource};
use crate::error::{ServiceError, ServiceKind, ServiceResult};
use crate::policy::{BestEffortAggregate, FailLoudDualWrite};
use crate::reference::{element_endpoint, ResolvedReference};
use crate::submodel::{GetSubmodelByIdOptions, SubmodelClients, SubmodelService};
use crate::Source;
use aas_sdk_client::{
    AasDiscoveryApi, AasDiscoveryClient, AasRegistryApi, AasRegistryClient, AasRepositoryApi,
    AasRepositoryClient, Configuration, HttpClient,
};
use aas_sdk_core::{
    AssetAdministrationShell, AssetAdministrationShellDescriptor, ConceptDescription, Endpoint,
    KeyType, PageRequest, PagingMetadata, Reference, ReferenceType, SpecificAssetId, Submodel,
};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Submodels keyed by the identifier of the shell referencing them.
pub type SubmodelsByShell = HashMap<String, Vec<Submodel>>;

/// Clients used by an [`AasService`].
#[derive(Clone)]
pub struct AasClients {
    /// AAS registry
    pub registry: Arc<dyn AasRegistryApi>,
    /// AAS repository
    pub repository: Arc<dyn AasRepositoryApi>,
    /// AAS discovery service
    pub discovery: Arc<dyn AasDiscoveryApi>,
    /// Clients of the nested submodel service
    pub submodel: SubmodelClients,
}

impl AasClients {
    /// HTTP clients sharing one transport.
    #[must_use]
    pub fn http(http: &HttpClient) -> Self {
        Self {
            registry: Arc::new(AasRegistryClient::new(http.clone())),
            repository: Arc::new(AasRepositoryClient::new(http.clone())),
            discovery: Arc::new(AasDiscoveryClient::new(http.clone())),
            submodel: SubmodelClients::http(http),
        }
    }
}

/// Options of [`AasService::get_aas_list`].
#[derive(Debug, Clone)]
pub struct GetAasListOptions {
    /// Try the registry before the repository
    pub prefer_registry: bool,
    /// Page size
    pub limit: Option<u32>,
    /// Cursor of the page to fetch
    pub cursor: Option<String>,
    /// Also fetch each shell's submodels
    pub include_submodels: bool,
    /// Also fetch concept descriptions of those submodels
    pub include_concept_descriptions: bool,
}

impl Default for GetAasListOptions {
    fn default() -> Self {
        Self {
            prefer_registry: true,
            limit: None,
            cursor: None,
            include_submodels: false,
            include_concept_descriptions: false,
        }
    }
}

/// Result of [`AasService::get_aas_list`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AasList {
    /// Shells found
    pub shells: Vec<AssetAdministrationShell>,
    /// Which store answered
    pub source: Source,
    /// Paging state of the listing call
    pub paging_metadata: PagingMetadata,
    /// Submodels per shell, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submodels: Option<SubmodelsByShell>,
    /// Concept descriptions of those submodels, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept_descriptions: Option<Vec<ConceptDescription>>,
}

/// Options of [`AasService::get_aas_by_id`].
#[derive(Debug, Clone)]
pub struct GetAasByIdOptions {
    /// Shell identifier
    pub aas_identifier: String,
    /// Try the registry descriptor's endpoint before the repository
    pub use_registry_endpoint: bool,
    /// Also fetch the shell's submodels
    pub include_submodels: bool,
    /// Also fetch concept descriptions of those submodels
    pub include_concept_descriptions: bool,
}

impl GetAasByIdOptions {
    /// Default options for `aas_identifier`.
    #[must_use]
    pub fn new(aas_identifier: impl Into<String>) -> Self {
        Self {
            aas_identifier: aas_identifier.into(),
            use_registry_endpoint: true,
            include_submodels: false,
            include_concept_descriptions: false,
        }
    }
}

/// A shell and, if it came through the registry, its descriptor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AasWithDescriptor {
    /// The shell
    pub shell: AssetAdministrationShell,
    /// Registry descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<AssetAdministrationShellDescriptor>,
    /// The shell's submodels, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submodels: Option<Vec<Submodel>>,
    /// Concept descriptions of those submodels, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept_descriptions: Option<Vec<ConceptDescription>>,
}

/// Options of [`AasService::get_aas_by_asset_id`].
#[derive(Debug, Clone, Default)]
pub struct GetAasByAssetIdOptions {
    /// Asset identifiers to look up
    pub asset_ids: Vec<SpecificAssetId>,
    /// Also fetch each shell's submodels
    pub include_submodels: bool,
    /// Also fetch concept descriptions of those submodels
    pub include_concept_descriptions: bool,
}

/// Result of [`AasService::get_aas_by_asset_id`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AasByAssetId {
    /// Shells that could be fetched
    pub shells: Vec<AssetAdministrationShell>,
    /// All shell identifiers the discovery service returned
    pub aas_ids: Vec<String>,
    /// Submodels per shell, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submodels: Option<SubmodelsByShell>,
    /// Concept descriptions of those submodels, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept_descriptions: Option<Vec<ConceptDescription>>,
}

/// Registry-first access to Asset Administration Shells.
#[derive(Clone)]
pub struct AasService {
    registry_config: Option<Configuration>,
    repository_config: Option<Configuration>,
    discovery_config: Option<Configuration>,
    clients: AasClients,
    submodel_service: SubmodelService,
}

impl AasService {
    /// Create a service talking HTTP to the configured services.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: AasServiceConfig) -> ServiceResult<Self> {
        let http = HttpClient::new()?;
        Ok(Self::with_clients(config, AasClients::http(&http)))
    }

    /// Create a service on top of the given clients.
    #[must_use]
    pub fn with_clients(config: AasServiceConfig, clients: AasClients) -> Self {
        let resolved = config.resolve();
        let submodel_service = SubmodelService::with_clients(resolved.submodel, clients.submodel.clone());

        Self {
            registry_config: resolved.registry,
            repository_config: resolved.repository,
            discovery_config: resolved.discovery,
            clients,
            submodel_service,
        }
    }

    /// The nested submodel service.
    #[must_use]
    pub const fn submodel_service(&self) -> &SubmodelService {
        &self.submodel_service
    }

    fn repository_config(&self) -> ServiceResult<&Configuration> {
        self.repository_config
            .as_ref()
            .ok_or(ServiceError::missing(ServiceKind::AasRepository))
    }

    fn endpoint_config(&self, base_url: &str) -> Configuration {
        derived_config(
            base_url,
            &[self.repository_config.as_ref(), self.registry_config.as_ref()],
        )
    }

    /// Fetch the shell a descriptor points at.
    async fn fetch_from_descriptor(
        &self,
        descriptor: &AssetAdministrationShellDescriptor,
    ) -> ServiceResult<AssetAdministrationShell> {
        let interface = Resource::Shell.interface();
        let href = descriptor.endpoint_href(interface).ok_or_else(|| {
            ServiceError::invalid_endpoint("", format!("descriptor {} has no {interface} endpoint", descriptor.id))
        })?;
        let base_url = base_url_of(href)
            .ok_or_else(|| ServiceError::invalid_endpoint(href, "no scheme://host[:port] prefix"))?;

        let config = self.endpoint_config(base_url);
        Ok(self
            .clients
            .repository
            .get_shell_by_id(&config, &descriptor.id)
            .await?)
    }

    async fn fetch_via_registry(
        &self,
        registry: &Configuration,
        aas_id: &str,
    ) -> ServiceResult<(AssetAdministrationShell, AssetAdministrationShellDescriptor)> {
        let descriptor = self
            .clients
            .registry
            .get_shell_descriptor_by_id(registry, aas_id)
            .await?;
        let shell = self.fetch_from_descriptor(&descriptor).await?;
        Ok((shell, descriptor))
    }

    /// List shells, from the registry if possible.
    ///
    /// Registry-listed shells that cannot be fetched are left out. If the
    /// registry listing itself fails, the repository is listed instead.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] if the repository is needed
    /// but not configured, or the repository's error.
    pub async fn get_aas_list(&self, options: GetAasListOptions) -> ServiceResult<AasList> {
        let page = PageRequest {
            limit: options.limit,
            cursor: options.cursor.clone(),
        };

        let (shells, source, paging_metadata) = match self.list_via_registry(&options, &page).await {
            Some(listed) => listed,
            None => {
                let repository = self.repository_config()?;
                let listed = self.clients.repository.get_all_shells(repository, &page).await?;
                (listed.result, Source::Repository, listed.paging_metadata)
            }
        };

        let (submodels, concept_descriptions) = self
            .attach_submodels(
                &shells,
                options.include_submodels,
                options.include_concept_descriptions,
            )
            .await;

        Ok(AasList {
            shells,
            source,
            paging_metadata,
            submodels,
            concept_descriptions,
        })
    }

    /// `None` if the registry path was not taken or its listing failed.
    async fn list_via_registry(
        &self,
        options: &GetAasListOptions,
        page: &PageRequest,
    ) -> Option<(Vec<AssetAdministrationShell>, Source, PagingMetadata)> {
        let registry = self.registry_config.as_ref().filter(|_| options.prefer_registry)?;

        let descriptors = match self.clients.registry.get_all_shell_descriptors(registry, page).await {
            Ok(descriptors) => descriptors,
            Err(e) => {
                tracing::debug!(error = %e, "AAS registry listing failed, using repository");
                return None;
            }
        };

        let mut aggregate = BestEffortAggregate::new("shell list");
        for descriptor in &descriptors.result {
            let result = self.fetch_from_descriptor(descriptor).await;
            aggregate.record(&descriptor.id, result);
        }

        Some((aggregate.finish(), Source::Registry, descriptors.paging_metadata))
    }

    /// Fetch a shell, through its registry endpoint if possible.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] if the registry path failed
    /// and no repository is configured, or the repository's error.
    pub async fn get_aas_by_id(&self, options: GetAasByIdOptions) -> ServiceResult<AasWithDescriptor> {
        let id = options.aas_identifier.as_str();

        let mut found = None;
        if let Some(registry) = self
            .registry_config
            .as_ref()
            .filter(|_| options.use_registry_endpoint)
        {
            match self.fetch_via_registry(registry, id).await {
                Ok((shell, descriptor)) => found = Some((shell, Some(descriptor))),
                Err(e) => {
                    tracing::debug!(aas_id = id, error = %e, "Registry path failed, using repository");
                }
            }
        }

        let (shell, descriptor) = match found {
            Some(found) => found,
            None => {
                let repository = self.repository_config()?;
                let shell = self.clients.repository.get_shell_by_id(repository, id).await?;
                (shell, None)
            }
        };

        let (mut submodels, concept_descriptions) = self
            .attach_submodels(
                std::slice::from_ref(&shell),
                options.include_submodels,
                options.include_concept_descriptions,
            )
            .await;

        Ok(AasWithDescriptor {
            submodels: submodels.as_mut().map(|by_shell| by_shell.remove(&shell.id).unwrap_or_default()),
            shell,
            descriptor,
            concept_descriptions,
        })
    }

    /// Absolute endpoint of a shell.
    ///
    /// Uses the registry descriptor's `AAS-3.0` endpoint when available,
    /// otherwise derives `{repository}/shells/{base64url(id)}`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] if the endpoint has to be
    /// derived and no repository is configured.
    pub async fn get_aas_endpoint_by_id(&self, aas_identifier: &str, use_registry: bool) -> ServiceResult<String> {
        if let Some(registry) = self.registry_config.as_ref().filter(|_| use_registry) {
            match self
                .clients
                .registry
                .get_shell_descriptor_by_id(registry, aas_identifier)
                .await
            {
                Ok(descriptor) => {
                    if let Some(href) = descriptor.endpoint_href(Resource::Shell.interface()) {
                        return Ok(href.to_string());
                    }
                }
                Err(e) => {
                    tracing::debug!(aas_id = aas_identifier, error = %e, "No registry endpoint");
                }
            }
        }

        let repository = self.repository_config()?;
        Ok(Resource::Shell.endpoint(repository, aas_identifier))
    }

    /// Fetch a shell from an endpoint URL, bypassing the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidEndpoint`] if the URL is not
    /// `scheme://host[:port]/shells/{base64url(id)}`, or the repository's
    /// error.
    pub async fn get_aas_by_endpoint(
        &self,
        endpoint: &str,
        include_submodels: bool,
        include_concept_descriptions: bool,
    ) -> ServiceResult<AasWithDescriptor> {
        let parsed = Resource::Shell.parse(endpoint)?;
        let config = self.endpoint_config(&parsed.base_url);
        let shell = self.clients.repository.get_shell_by_id(&config, &parsed.id).await?;

        let (mut submodels, concept_descriptions) = self
            .attach_submodels(
                std::slice::from_ref(&shell),
                include_submodels,
                include_concept_descriptions,
            )
            .await;

        Ok(AasWithDescriptor {
            submodels: submodels.as_mut().map(|by_shell| by_shell.remove(&shell.id).unwrap_or_default()),
            shell,
            descriptor: None,
            concept_descriptions,
        })
    }

    /// Store a shell and register its descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] without a repository, the
    /// repository's error, or the registry's error. In the last case the
    /// shell already exists in the repository.
    pub async fn create_aas(
        &self,
        shell: AssetAdministrationShell,
        register_in_registry: bool,
    ) -> ServiceResult<AasWithDescriptor> {
        let repository = self.repository_config()?;
        let mut write = FailLoudDualWrite::new("create shell", &shell.id);

        let created = write.step(
            "repository",
            self.clients.repository.post_shell(repository, &shell).await,
        )?;

        let descriptor = match self.registry_config.as_ref().filter(|_| register_in_registry) {
            Some(registry) => {
                let descriptor = self.create_descriptor_from_aas(&created)?;
                Some(write.step(
                    "registry",
                    self.clients
                        .registry
                        .post_shell_descriptor(registry, &descriptor)
                        .await,
                )?)
            }
            None => None,
        };

        Ok(AasWithDescriptor {
            shell: created,
            descriptor,
            submodels: None,
            concept_descriptions: None,
        })
    }

    /// Replace a shell and its descriptor.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_aas`].
    pub async fn update_aas(
        &self,
        shell: AssetAdministrationShell,
        update_in_registry: bool,
    ) -> ServiceResult<AasWithDescriptor> {
        let repository = self.repository_config()?;
        let id = shell.id.clone();
        let mut write = FailLoudDualWrite::new("update shell", &id);

        let returned = write.step(
            "repository",
            self.clients.repository.put_shell_by_id(repository, &id, &shell).await,
        )?;
        let updated = returned.unwrap_or(shell);

        let descriptor = match self.registry_config.as_ref().filter(|_| update_in_registry) {
            Some(registry) => {
                let descriptor = self.create_descriptor_from_aas(&updated)?;
                let returned = write.step(
                    "registry",
                    self.clients
                        .registry
                        .put_shell_descriptor_by_id(registry, &id, &descriptor)
                        .await,
                )?;
                Some(returned.unwrap_or(descriptor))
            }
            None => None,
        };

        Ok(AasWithDescriptor {
            shell: updated,
            descriptor,
            submodels: None,
            concept_descriptions: None,
        })
    }

    /// Remove a shell from the registry, then from the repository.
    ///
    /// If the registry delete fails the repository is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first failing store's error, or
    /// [`ServiceError::Configuration`] if neither store is configured.
    pub async fn delete_aas(&self, aas_identifier: &str, delete_from_registry: bool) -> ServiceResult<()> {
        let mut write = FailLoudDualWrite::new("delete shell", aas_identifier);
        let mut touched = false;

        if let Some(registry) = self.registry_config.as_ref().filter(|_| delete_from_registry) {
            write.step(
                "registry",
                self.clients
                    .registry
                    .delete_shell_descriptor_by_id(registry, aas_identifier)
                    .await,
            )?;
            touched = true;
        }

        match self.repository_config.as_ref() {
            Some(repository) => write.step(
                "repository",
                self.clients
                    .repository
                    .delete_shell_by_id(repository, aas_identifier)
                    .await,
            ),
            None if touched => Ok(()),
            None => Err(ServiceError::missing(ServiceKind::AasRepository)),
        }
    }

    /// Shells linked to the given asset identifiers.
    ///
    /// Shell ids come from the discovery service; each is fetched with
    /// [`Self::get_aas_by_id`] concurrently. The call succeeds as long as
    /// one shell could be fetched.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] without discovery, the
    /// discovery service's error, or [`ServiceError::Fetch`] if every shell
    /// failed.
    pub async fn get_aas_by_asset_id(&self, options: GetAasByAssetIdOptions) -> ServiceResult<AasByAssetId> {
        let discovery = self
            .discovery_config
            .as_ref()
            .ok_or(ServiceError::missing(ServiceKind::Discovery))?;

        let aas_ids = self
            .clients
            .discovery
            .get_all_aas_ids_by_asset_link(discovery, &options.asset_ids)
            .await?;
        if aas_ids.is_empty() {
            return Ok(AasByAssetId::default());
        }

        let lookups = aas_ids.iter().map(|id| {
            self.get_aas_by_id(GetAasByIdOptions {
                include_submodels: options.include_submodels,
                ..GetAasByIdOptions::new(id.clone())
            })
        });
        let results = join_all(lookups).await;

        let mut shells = Vec::new();
        let mut by_shell = SubmodelsByShell::new();
        let mut failures = Vec::new();
        for (id, result) in aas_ids.iter().zip(results) {
            match result {
                Ok(found) => {
                    if let Some(submodels) = found.submodels {
                        by_shell.insert(found.shell.id.clone(), submodels);
                    }
                    shells.push(found.shell);
                }
                Err(e) => failures.push((id.clone(), e)),
            }
        }

        if shells.is_empty() {
            return Err(ServiceError::Fetch {
                attempted: aas_ids.len(),
                failures,
            });
        }
        if !failures.is_empty() {
            tracing::warn!(
                resolved = shells.len(),
                failed = failures.len(),
                "Some shells linked to the asset ids could not be fetched"
            );
        }

        let concept_descriptions = if options.include_submodels {
            let all: Vec<Submodel> = by_shell.values().flatten().cloned().collect();
            self.submodel_service
                .concept_descriptions_for(&all, options.include_concept_descriptions)
                .await
        } else {
            None
        };

        Ok(AasByAssetId {
            shells,
            aas_ids,
            submodels: options.include_submodels.then_some(by_shell),
            concept_descriptions,
        })
    }

    /// Walk a model reference into endpoints.
    ///
    /// A leading `AssetAdministrationShell` key resolves to the shell
    /// endpoint, a following (or leading) `Submodel` key to the submodel
    /// endpoint, and the remaining keys to an element path below it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UnsupportedReferenceType`] for external
    /// references, [`ServiceError::InvalidReference`] for an empty key list
    /// or element keys outside a submodel, or the error of an endpoint
    /// lookup.
    pub async fn resolve_reference(&self, reference: &Reference) -> ServiceResult<ResolvedReference> {
        if reference.reference_type != ReferenceType::ModelReference {
            return Err(ServiceError::UnsupportedReferenceType {
                reference_type: reference.reference_type,
            });
        }
        if reference.keys.is_empty() {
            return Err(ServiceError::InvalidReference {
                reason: "reference has no keys".to_string(),
            });
        }

        let mut resolved = ResolvedReference::default();
        let mut keys = reference.keys.as_slice();

        if let Some((first, rest)) = keys.split_first() {
            if first.key_type == KeyType::AssetAdministrationShell {
                resolved.aas_endpoint = Some(self.get_aas_endpoint_by_id(&first.value, true).await?);
                keys = rest;
            }
        }

        if let Some((first, rest)) = keys.split_first() {
            if first.key_type == KeyType::Submodel {
                resolved.submodel_endpoint = Some(
                    self.submodel_service
                        .get_submodel_endpoint_by_id(&first.value, true)
                        .await?,
                );
                keys = rest;
            }
        }

        if let Some(first) = keys.first() {
            let Some(submodel_endpoint) = resolved.submodel_endpoint.as_deref() else {
                return Err(ServiceError::InvalidReference {
                    reason: format!("{} key {:?} is not inside a submodel", first.key_type, first.value),
                });
            };
            resolved.submodel_element_path = Some(element_endpoint(submodel_endpoint, keys));
        }

        Ok(resolved)
    }

    /// Descriptor for `shell` pointing at the configured repository.
    ///
    /// The endpoint is always derived from the repository configuration,
    /// never copied from an existing descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] without a repository.
    pub fn create_descriptor_from_aas(
        &self,
        shell: &AssetAdministrationShell,
    ) -> ServiceResult<AssetAdministrationShellDescriptor> {
        let repository = self.repository_config()?;
        let info = shell.asset_information.as_ref();

        Ok(AssetAdministrationShellDescriptor {
            id: shell.id.clone(),
            id_short: shell.id_short.clone(),
            display_name: shell.display_name.clone(),
            description: shell.description.clone(),
            extensions: shell.extensions.clone(),
            administration: shell.administration.clone(),
            asset_kind: info.map(|i| i.asset_kind),
            asset_type: info.and_then(|i| i.asset_type.clone()),
            global_asset_id: info.and_then(|i| i.global_asset_id.clone()),
            specific_asset_ids: info.and_then(|i| i.specific_asset_ids.clone()),
            submodel_descriptors: None,
            endpoints: Some(vec![Endpoint::http(
                Resource::Shell.interface(),
                Resource::Shell.endpoint(repository, &shell.id),
            )]),
        })
    }

    /// Submodels (and their concept descriptions) of `shells`, if requested.
    async fn attach_submodels(
        &self,
        shells: &[AssetAdministrationShell],
        include_submodels: bool,
        include_concept_descriptions: bool,
    ) -> (Option<SubmodelsByShell>, Option<Vec<ConceptDescription>>) {
        if !include_submodels {
            return (None, None);
        }

        let by_shell = self.fetch_submodels_for_shells(shells).await;
        let concept_descriptions = if include_concept_descriptions {
            let all: Vec<Submodel> = by_shell.values().flatten().cloned().collect();
            self.submodel_service.concept_descriptions_for(&all, true).await
        } else {
            None
        };

        (Some(by_shell), concept_descriptions)
    }

    /// Submodels referenced by each shell, straight from the submodel
    /// repository.
    ///
    /// Shells are processed concurrently; the submodels of one shell are
    /// fetched one after another. Submodels that fail are left out.
    async fn fetch_submodels_for_shells(&self, shells: &[AssetAdministrationShell]) -> SubmodelsByShell {
        let per_shell = shells.iter().map(|shell| async move {
            let mut aggregate = BestEffortAggregate::new("shell submodels");
            for submodel_id in shell.submodel_ids() {
                let result = self
                    .submodel_service
                    .get_submodel_by_id(GetSubmodelByIdOptions {
                        use_registry_endpoint: false,
                        ..GetSubmodelByIdOptions::new(submodel_id)
                    })
                    .await
                    .map(|found| found.submodel);
                aggregate.record(submodel_id, result);
            }
            (shell.id.clone(), aggregate.finish())
        });

        join_all(per_shell).await.into_iter().collect()
    }
}
