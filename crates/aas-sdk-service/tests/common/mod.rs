#![allow(dead_code)]

//! In-memory stand-ins for registries, repositories, and discovery.

use aas_sdk_client::{
    AasDiscoveryApi, AasRegistryApi, AasRepositoryApi, ClientError, ConceptDescriptionRepositoryApi,
    Configuration, SubmodelRegistryApi, SubmodelRepositoryApi,
};
use aas_sdk_core::{
    AssetAdministrationShell, AssetAdministrationShellDescriptor, ConceptDescription, Endpoint,
    PageRequest, PagedResult, SpecificAssetId, Submodel, SubmodelDescriptor, AAS_INTERFACE,
    SUBMODEL_INTERFACE,
};
use aas_sdk_service::{
    shell_endpoint, submodel_endpoint, AasClients, AasService, AasServiceConfig, SubmodelClients,
    SubmodelService, SubmodelServiceConfig,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

pub const REGISTRY: &str = "http://registry:8080";
pub const REPOSITORY: &str = "http://localhost:8081";
pub const REMOTE: &str = "http://remote:9000";
pub const CD_REPOSITORY: &str = "http://concepts:8083";
pub const DISCOVERY: &str = "http://discovery:8084";

/// One recorded client call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub store: &'static str,
    pub op: &'static str,
    pub base_path: String,
    pub id: Option<String>,
}

pub type Journal = Arc<Mutex<Vec<Call>>>;

pub trait Identified: Clone + Send + Sync + 'static {
    fn identifier(&self) -> &str;
}

impl Identified for AssetAdministrationShell {
    fn identifier(&self) -> &str {
        &self.id
    }
}

impl Identified for AssetAdministrationShellDescriptor {
    fn identifier(&self) -> &str {
        &self.id
    }
}

impl Identified for Submodel {
    fn identifier(&self) -> &str {
        &self.id
    }
}

impl Identified for SubmodelDescriptor {
    fn identifier(&self) -> &str {
        &self.id
    }
}

impl Identified for ConceptDescription {
    fn identifier(&self) -> &str {
        &self.id
    }
}

struct StoreState<T> {
    items: BTreeMap<String, T>,
    failing: HashSet<String>,
    unreachable: HashSet<String>,
    fail_all: bool,
    fail_writes: bool,
    empty_put: bool,
}

/// A store keyed by identifier that records every call into a journal.
pub struct FakeStore<T> {
    name: &'static str,
    journal: Journal,
    state: Mutex<StoreState<T>>,
}

fn unreachable_error(base_path: &str) -> ClientError {
    ClientError::Request(format!("connection refused: {base_path}"))
}

fn api_error(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status,
        message: message.to_string(),
    }
}

impl<T: Identified> FakeStore<T> {
    pub fn new(name: &'static str, journal: Journal) -> Self {
        Self {
            name,
            journal,
            state: Mutex::new(StoreState {
                items: BTreeMap::new(),
                failing: HashSet::new(),
                unreachable: HashSet::new(),
                fail_all: false,
                fail_writes: false,
                empty_put: false,
            }),
        }
    }

    pub fn insert(&self, item: T) {
        let id = item.identifier().to_string();
        self.state.lock().unwrap().items.insert(id, item);
    }

    pub fn fail_id(&self, id: &str) {
        self.state.lock().unwrap().failing.insert(id.to_string());
    }

    pub fn unreachable(&self, base_path: &str) {
        self.state
            .lock()
            .unwrap()
            .unreachable
            .insert(base_path.to_string());
    }

    pub fn fail_all(&self) {
        self.state.lock().unwrap().fail_all = true;
    }

    pub fn fail_writes(&self) {
        self.state.lock().unwrap().fail_writes = true;
    }

    pub fn empty_put(&self) {
        self.state.lock().unwrap().empty_put = true;
    }

    pub fn contains(&self, id: &str) -> bool {
        self.state.lock().unwrap().items.contains_key(id)
    }

    pub fn item(&self, id: &str) -> Option<T> {
        self.state.lock().unwrap().items.get(id).cloned()
    }

    fn record(&self, op: &'static str, config: &Configuration, id: Option<&str>) {
        self.journal.lock().unwrap().push(Call {
            store: self.name,
            op,
            base_path: config.base_path.clone(),
            id: id.map(str::to_string),
        });
    }

    fn reachable(&self, config: &Configuration) -> Result<(), ClientError> {
        let state = self.state.lock().unwrap();
        if state.fail_all || state.unreachable.contains(&config.base_path) {
            return Err(unreachable_error(&config.base_path));
        }
        Ok(())
    }

    fn list(&self, config: &Configuration) -> Result<PagedResult<T>, ClientError> {
        self.record("list", config, None);
        self.reachable(config)?;
        let items = self.state.lock().unwrap().items.values().cloned().collect();
        Ok(PagedResult::last(items))
    }

    fn get(&self, config: &Configuration, id: &str) -> Result<T, ClientError> {
        self.record("get", config, Some(id));
        self.reachable(config)?;
        let state = self.state.lock().unwrap();
        if state.failing.contains(id) {
            return Err(api_error(500, "internal error"));
        }
        state
            .items
            .get(id)
            .cloned()
            .ok_or_else(|| api_error(404, "not found"))
    }

    fn write_check(&self, config: &Configuration) -> Result<(), ClientError> {
        self.reachable(config)?;
        if self.state.lock().unwrap().fail_writes {
            return Err(api_error(500, "write rejected"));
        }
        Ok(())
    }

    fn post(&self, config: &Configuration, item: &T) -> Result<T, ClientError> {
        self.record("post", config, Some(item.identifier()));
        self.write_check(config)?;
        self.insert(item.clone());
        Ok(item.clone())
    }

    fn put(&self, config: &Configuration, id: &str, item: &T) -> Result<Option<T>, ClientError> {
        self.record("put", config, Some(id));
        self.write_check(config)?;
        self.insert(item.clone());
        if self.state.lock().unwrap().empty_put {
            return Ok(None);
        }
        Ok(Some(item.clone()))
    }

    fn delete(&self, config: &Configuration, id: &str) -> Result<(), ClientError> {
        self.record("delete", config, Some(id));
        self.write_check(config)?;
        self.state
            .lock()
            .unwrap()
            .items
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| api_error(404, "not found"))
    }
}

#[async_trait]
impl AasRegistryApi for FakeStore<AssetAdministrationShellDescriptor> {
    async fn get_all_shell_descriptors(
        &self,
        config: &Configuration,
        _page: &PageRequest,
    ) -> Result<PagedResult<AssetAdministrationShellDescriptor>, ClientError> {
        self.list(config)
    }

    async fn get_shell_descriptor_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
    ) -> Result<AssetAdministrationShellDescriptor, ClientError> {
        self.get(config, aas_id)
    }

    async fn post_shell_descriptor(
        &self,
        config: &Configuration,
        descriptor: &AssetAdministrationShellDescriptor,
    ) -> Result<AssetAdministrationShellDescriptor, ClientError> {
        self.post(config, descriptor)
    }

    async fn put_shell_descriptor_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
        descriptor: &AssetAdministrationShellDescriptor,
    ) -> Result<Option<AssetAdministrationShellDescriptor>, ClientError> {
        self.put(config, aas_id, descriptor)
    }

    async fn delete_shell_descriptor_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
    ) -> Result<(), ClientError> {
        self.delete(config, aas_id)
    }
}

#[async_trait]
impl AasRepositoryApi for FakeStore<AssetAdministrationShell> {
    async fn get_all_shells(
        &self,
        config: &Configuration,
        _page: &PageRequest,
    ) -> Result<PagedResult<AssetAdministrationShell>, ClientError> {
        self.list(config)
    }

    async fn get_shell_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
    ) -> Result<AssetAdministrationShell, ClientError> {
        self.get(config, aas_id)
    }

    async fn post_shell(
        &self,
        config: &Configuration,
        shell: &AssetAdministrationShell,
    ) -> Result<AssetAdministrationShell, ClientError> {
        self.post(config, shell)
    }

    async fn put_shell_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
        shell: &AssetAdministrationShell,
    ) -> Result<Option<AssetAdministrationShell>, ClientError> {
        self.put(config, aas_id, shell)
    }

    async fn delete_shell_by_id(&self, config: &Configuration, aas_id: &str) -> Result<(), ClientError> {
        self.delete(config, aas_id)
    }
}

#[async_trait]
impl SubmodelRegistryApi for FakeStore<SubmodelDescriptor> {
    async fn get_all_submodel_descriptors(
        &self,
        config: &Configuration,
        _page: &PageRequest,
    ) -> Result<PagedResult<SubmodelDescriptor>, ClientError> {
        self.list(config)
    }

    async fn get_submodel_descriptor_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
    ) -> Result<SubmodelDescriptor, ClientError> {
        self.get(config, submodel_id)
    }

    async fn post_submodel_descriptor(
        &self,
        config: &Configuration,
        descriptor: &SubmodelDescriptor,
    ) -> Result<SubmodelDescriptor, ClientError> {
        self.post(config, descriptor)
    }

    async fn put_submodel_descriptor_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
        descriptor: &SubmodelDescriptor,
    ) -> Result<Option<SubmodelDescriptor>, ClientError> {
        self.put(config, submodel_id, descriptor)
    }

    async fn delete_submodel_descriptor_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
    ) -> Result<(), ClientError> {
        self.delete(config, submodel_id)
    }
}

#[async_trait]
impl SubmodelRepositoryApi for FakeStore<Submodel> {
    async fn get_all_submodels(
        &self,
        config: &Configuration,
        _page: &PageRequest,
    ) -> Result<PagedResult<Submodel>, ClientError> {
        self.list(config)
    }

    async fn get_submodel_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
    ) -> Result<Submodel, ClientError> {
        self.get(config, submodel_id)
    }

    async fn post_submodel(&self, config: &Configuration, submodel: &Submodel) -> Result<Submodel, ClientError> {
        self.post(config, submodel)
    }

    async fn put_submodel_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
        submodel: &Submodel,
    ) -> Result<Option<Submodel>, ClientError> {
        self.put(config, submodel_id, submodel)
    }

    async fn delete_submodel_by_id(&self, config: &Configuration, submodel_id: &str) -> Result<(), ClientError> {
        self.delete(config, submodel_id)
    }
}

#[async_trait]
impl ConceptDescriptionRepositoryApi for FakeStore<ConceptDescription> {
    async fn get_concept_description_by_id(
        &self,
        config: &Configuration,
        cd_id: &str,
    ) -> Result<ConceptDescription, ClientError> {
        self.get(config, cd_id)
    }
}

/// Discovery service answering from a fixed asset-link table.
pub struct FakeDiscovery {
    journal: Journal,
    links: Mutex<BTreeMap<String, Vec<String>>>,
}

impl FakeDiscovery {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            links: Mutex::new(BTreeMap::new()),
        }
    }

    /// Link `asset` (as `name=value`) to shell ids.
    pub fn link(&self, asset: &SpecificAssetId, aas_ids: &[&str]) {
        self.links.lock().unwrap().insert(
            format!("{}={}", asset.name, asset.value),
            aas_ids.iter().map(|id| (*id).to_string()).collect(),
        );
    }
}

#[async_trait]
impl AasDiscoveryApi for FakeDiscovery {
    async fn get_all_aas_ids_by_asset_link(
        &self,
        config: &Configuration,
        asset_ids: &[SpecificAssetId],
    ) -> Result<Vec<String>, ClientError> {
        self.journal.lock().unwrap().push(Call {
            store: "discovery",
            op: "lookup",
            base_path: config.base_path.clone(),
            id: None,
        });

        let links = self.links.lock().unwrap();
        let mut ids: Vec<String> = Vec::new();
        for asset in asset_ids {
            for id in links
                .get(&format!("{}={}", asset.name, asset.value))
                .into_iter()
                .flatten()
            {
                if !ids.contains(id) {
                    ids.push(id.clone());
                }
            }
        }
        Ok(ids)
    }
}

/// All fakes wired to one journal.
pub struct Fixture {
    pub journal: Journal,
    pub shell_registry: Arc<FakeStore<AssetAdministrationShellDescriptor>>,
    pub shell_repository: Arc<FakeStore<AssetAdministrationShell>>,
    pub submodel_registry: Arc<FakeStore<SubmodelDescriptor>>,
    pub submodel_repository: Arc<FakeStore<Submodel>>,
    pub concept_descriptions: Arc<FakeStore<ConceptDescription>>,
    pub discovery: Arc<FakeDiscovery>,
}

impl Fixture {
    pub fn new() -> Self {
        let journal = Journal::default();
        Self {
            shell_registry: Arc::new(FakeStore::new("shell-registry", journal.clone())),
            shell_repository: Arc::new(FakeStore::new("shell-repository", journal.clone())),
            submodel_registry: Arc::new(FakeStore::new("submodel-registry", journal.clone())),
            submodel_repository: Arc::new(FakeStore::new("submodel-repository", journal.clone())),
            concept_descriptions: Arc::new(FakeStore::new("concept-descriptions", journal.clone())),
            discovery: Arc::new(FakeDiscovery::new(journal.clone())),
            journal,
        }
    }

    pub fn submodel_clients(&self) -> SubmodelClients {
        SubmodelClients {
            registry: self.submodel_registry.clone(),
            repository: self.submodel_repository.clone(),
            concept_descriptions: self.concept_descriptions.clone(),
        }
    }

    pub fn clients(&self) -> AasClients {
        AasClients {
            registry: self.shell_registry.clone(),
            repository: self.shell_repository.clone(),
            discovery: self.discovery.clone(),
            submodel: self.submodel_clients(),
        }
    }

    pub fn aas_service(&self, config: AasServiceConfig) -> AasService {
        AasService::with_clients(config, self.clients())
    }

    pub fn submodel_service(&self, config: SubmodelServiceConfig) -> SubmodelService {
        SubmodelService::with_clients(config, self.submodel_clients())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.journal.lock().unwrap().clone()
    }

    pub fn calls_to(&self, store: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.store == store).collect()
    }

    pub fn clear_calls(&self) {
        self.journal.lock().unwrap().clear();
    }
}

/// Every slot configured.
pub fn full_config() -> AasServiceConfig {
    AasServiceConfig {
        registry_config: Some(Configuration::new(REGISTRY)),
        repository_config: Some(Configuration::new(REPOSITORY)),
        concept_description_repository_config: Some(Configuration::new(CD_REPOSITORY)),
        discovery_config: Some(Configuration::new(DISCOVERY)),
        ..Default::default()
    }
}

/// Only the repositories configured.
pub fn repository_only() -> AasServiceConfig {
    AasServiceConfig {
        repository_config: Some(Configuration::new(REPOSITORY)),
        ..Default::default()
    }
}

pub fn submodel_config() -> SubmodelServiceConfig {
    SubmodelServiceConfig {
        registry_config: Some(Configuration::new(REGISTRY)),
        repository_config: Some(Configuration::new(REPOSITORY)),
        concept_description_repository_config: Some(Configuration::new(CD_REPOSITORY)),
    }
}

/// Shell descriptor whose `AAS-3.0` endpoint lives on `host`.
pub fn shell_descriptor(aas_id: &str, host: &str) -> AssetAdministrationShellDescriptor {
    AssetAdministrationShellDescriptor {
        id: aas_id.to_string(),
        endpoints: Some(vec![Endpoint::http(
            AAS_INTERFACE,
            shell_endpoint(&Configuration::new(host), aas_id),
        )]),
        ..Default::default()
    }
}

/// Submodel descriptor whose `SUBMODEL-3.0` endpoint lives on `host`.
pub fn submodel_descriptor(submodel_id: &str, host: &str) -> SubmodelDescriptor {
    SubmodelDescriptor {
        id: submodel_id.to_string(),
        endpoints: vec![Endpoint::http(
            SUBMODEL_INTERFACE,
            submodel_endpoint(&Configuration::new(host), submodel_id),
        )],
        ..Default::default()
    }
}
