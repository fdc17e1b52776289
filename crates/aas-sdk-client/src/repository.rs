//! Shell, submodel, and concept description repository clients.

use crate::config::Configuration;
use crate::encoding::encode_id_base64url;
use crate::error::ClientError;
use crate::http::HttpClient;
use aas_sdk_core::{AssetAdministrationShell, ConceptDescription, PageRequest, PagedResult, Submodel};
use async_trait::async_trait;

/// Operations of an AAS repository (`/shells`).
#[async_trait]
pub trait AasRepositoryApi: Send + Sync {
    /// List shells.
    async fn get_all_shells(
        &self,
        config: &Configuration,
        page: &PageRequest,
    ) -> Result<PagedResult<AssetAdministrationShell>, ClientError>;

    /// Fetch one shell.
    async fn get_shell_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
    ) -> Result<AssetAdministrationShell, ClientError>;

    /// Create a shell.
    async fn post_shell(
        &self,
        config: &Configuration,
        shell: &AssetAdministrationShell,
    ) -> Result<AssetAdministrationShell, ClientError>;

    /// Replace a shell. Servers may answer without a body.
    async fn put_shell_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
        shell: &AssetAdministrationShell,
    ) -> Result<Option<AssetAdministrationShell>, ClientError>;

    /// Remove a shell.
    async fn delete_shell_by_id(&self, config: &Configuration, aas_id: &str)
        -> Result<(), ClientError>;
}

/// Operations of a submodel repository (`/submodels`).
#[async_trait]
pub trait SubmodelRepositoryApi: Send + Sync {
    /// List submodels.
    async fn get_all_submodels(
        &self,
        config: &Configuration,
        page: &PageRequest,
    ) -> Result<PagedResult<Submodel>, ClientError>;

    /// Fetch one submodel.
    async fn get_submodel_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
    ) -> Result<Submodel, ClientError>;

    /// Create a submodel.
    async fn post_submodel(
        &self,
        config: &Configuration,
        submodel: &Submodel,
    ) -> Result<Submodel, ClientError>;

    /// Replace a submodel. Servers may answer without a body.
    async fn put_submodel_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
        submodel: &Submodel,
    ) -> Result<Option<Submodel>, ClientError>;

    /// Remove a submodel.
    async fn delete_submodel_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
    ) -> Result<(), ClientError>;
}

/// Read access to a concept description repository.
#[async_trait]
pub trait ConceptDescriptionRepositoryApi: Send + Sync {
    /// Fetch one concept description.
    async fn get_concept_description_by_id(
        &self,
        config: &Configuration,
        cd_id: &str,
    ) -> Result<ConceptDescription, ClientError>;
}

fn shell_path(aas_id: &str) -> String {
    format!("/shells/{}", encode_id_base64url(aas_id))
}

fn submodel_path(submodel_id: &str) -> String {
    format!("/submodels/{}", encode_id_base64url(submodel_id))
}

/// HTTP client for an AAS repository.
#[derive(Debug, Clone)]
pub struct AasRepositoryClient {
    http: HttpClient,
}

impl AasRepositoryClient {
    /// Create a repository client on top of a shared transport.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AasRepositoryApi for AasRepositoryClient {
    async fn get_all_shells(
        &self,
        config: &Configuration,
        page: &PageRequest,
    ) -> Result<PagedResult<AssetAdministrationShell>, ClientError> {
        self.http.get_json(config, "/shells", &page.query()).await
    }

    async fn get_shell_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
    ) -> Result<AssetAdministrationShell, ClientError> {
        tracing::debug!(aas_id, "GET shell");
        self.http.get_json(config, &shell_path(aas_id), &[]).await
    }

    async fn post_shell(
        &self,
        config: &Configuration,
        shell: &AssetAdministrationShell,
    ) -> Result<AssetAdministrationShell, ClientError> {
        tracing::debug!(aas_id = %shell.id, "POST shell");
        self.http.post_json(config, "/shells", shell).await
    }

    async fn put_shell_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
        shell: &AssetAdministrationShell,
    ) -> Result<Option<AssetAdministrationShell>, ClientError> {
        tracing::debug!(aas_id, "PUT shell");
        self.http.put_json(config, &shell_path(aas_id), shell).await
    }

    async fn delete_shell_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
    ) -> Result<(), ClientError> {
        tracing::debug!(aas_id, "DELETE shell");
        self.http.delete(config, &shell_path(aas_id)).await
    }
}

/// HTTP client for a submodel repository.
#[derive(Debug, Clone)]
pub struct SubmodelRepositoryClient {
    http: HttpClient,
}

impl SubmodelRepositoryClient {
    /// Create a repository client on top of a shared transport.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SubmodelRepositoryApi for SubmodelRepositoryClient {
    async fn get_all_submodels(
        &self,
        config: &Configuration,
        page: &PageRequest,
    ) -> Result<PagedResult<Submodel>, ClientError> {
        self.http.get_json(config, "/submodels", &page.query()).await
    }

    async fn get_submodel_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
    ) -> Result<Submodel, ClientError> {
        tracing::debug!(submodel_id, "GET submodel");
        self.http
            .get_json(config, &submodel_path(submodel_id), &[])
            .await
    }

    async fn post_submodel(
        &self,
        config: &Configuration,
        submodel: &Submodel,
    ) -> Result<Submodel, ClientError> {
        tracing::debug!(submodel_id = %submodel.id, "POST submodel");
        self.http.post_json(config, "/submodels", submodel).await
    }

    async fn put_submodel_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
        submodel: &Submodel,
    ) -> Result<Option<Submodel>, ClientError> {
        tracing::debug!(submodel_id, "PUT submodel");
        self.http
            .put_json(config, &submodel_path(submodel_id), submodel)
            .await
    }

    async fn delete_submodel_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
    ) -> Result<(), ClientError> {
        tracing::debug!(submodel_id, "DELETE submodel");
        self.http.delete(config, &submodel_path(submodel_id)).await
    }
}

/// HTTP client for a concept description repository.
#[derive(Debug, Clone)]
pub struct ConceptDescriptionRepositoryClient {
    http: HttpClient,
}

impl ConceptDescriptionRepositoryClient {
    /// Create a repository client on top of a shared transport.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ConceptDescriptionRepositoryApi for ConceptDescriptionRepositoryClient {
    async fn get_concept_description_by_id(
        &self,
        config: &Configuration,
        cd_id: &str,
    ) -> Result<ConceptDescription, ClientError> {
        tracing::debug!(cd_id, "GET concept description");
        let path = format!("/concept-descriptions/{}", encode_id_base64url(cd_id));
        self.http.get_json(config, &path, &[]).await
    }
}
