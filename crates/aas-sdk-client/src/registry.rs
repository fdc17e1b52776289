//! Shell and submodel registry clients.

use crate::config::Configuration;
use crate::encoding::encode_id_base64url;
use crate::error::ClientError;
use crate::http::HttpClient;
use aas_sdk_core::{
    AssetAdministrationShellDescriptor, PageRequest, PagedResult, SubmodelDescriptor,
};
use async_trait::async_trait;

/// Operations of an AAS registry (`/shell-descriptors`).
#[async_trait]
pub trait AasRegistryApi: Send + Sync {
    /// List shell descriptors.
    async fn get_all_shell_descriptors(
        &self,
        config: &Configuration,
        page: &PageRequest,
    ) -> Result<PagedResult<AssetAdministrationShellDescriptor>, ClientError>;

    /// Fetch one shell descriptor.
    async fn get_shell_descriptor_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
    ) -> Result<AssetAdministrationShellDescriptor, ClientError>;

    /// Register a shell descriptor.
    async fn post_shell_descriptor(
        &self,
        config: &Configuration,
        descriptor: &AssetAdministrationShellDescriptor,
    ) -> Result<AssetAdministrationShellDescriptor, ClientError>;

    /// Replace a shell descriptor.
    async fn put_shell_descriptor_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
        descriptor: &AssetAdministrationShellDescriptor,
    ) -> Result<Option<AssetAdministrationShellDescriptor>, ClientError>;

    /// Remove a shell descriptor.
    async fn delete_shell_descriptor_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
    ) -> Result<(), ClientError>;
}

/// Operations of a submodel registry (`/submodel-descriptors`).
#[async_trait]
pub trait SubmodelRegistryApi: Send + Sync {
    /// List submodel descriptors.
    async fn get_all_submodel_descriptors(
        &self,
        config: &Configuration,
        page: &PageRequest,
    ) -> Result<PagedResult<SubmodelDescriptor>, ClientError>;

    /// Fetch one submodel descriptor.
    async fn get_submodel_descriptor_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
    ) -> Result<SubmodelDescriptor, ClientError>;

    /// Register a submodel descriptor.
    async fn post_submodel_descriptor(
        &self,
        config: &Configuration,
        descriptor: &SubmodelDescriptor,
    ) -> Result<SubmodelDescriptor, ClientError>;

    /// Replace a submodel descriptor.
    async fn put_submodel_descriptor_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
        descriptor: &SubmodelDescriptor,
    ) -> Result<Option<SubmodelDescriptor>, ClientError>;

    /// Remove a submodel descriptor.
    async fn delete_submodel_descriptor_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
    ) -> Result<(), ClientError>;
}

fn shell_descriptor_path(aas_id: &str) -> String {
    format!("/shell-descriptors/{}", encode_id_base64url(aas_id))
}

fn submodel_descriptor_path(submodel_id: &str) -> String {
    format!("/submodel-descriptors/{}", encode_id_base64url(submodel_id))
}

/// HTTP client for an AAS registry.
#[derive(Debug, Clone)]
pub struct AasRegistryClient {
    http: HttpClient,
}

impl AasRegistryClient {
    /// Create a registry client on top of a shared transport.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AasRegistryApi for AasRegistryClient {
    async fn get_all_shell_descriptors(
        &self,
        config: &Configuration,
        page: &PageRequest,
    ) -> Result<PagedResult<AssetAdministrationShellDescriptor>, ClientError> {
        self.http
            .get_json(config, "/shell-descriptors", &page.query())
            .await
    }

    async fn get_shell_descriptor_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
    ) -> Result<AssetAdministrationShellDescriptor, ClientError> {
        tracing::debug!(aas_id, "GET shell descriptor");
        self.http
            .get_json(config, &shell_descriptor_path(aas_id), &[])
            .await
    }

    async fn post_shell_descriptor(
        &self,
        config: &Configuration,
        descriptor: &AssetAdministrationShellDescriptor,
    ) -> Result<AssetAdministrationShellDescriptor, ClientError> {
        tracing::debug!(aas_id = %descriptor.id, "POST shell descriptor");
        self.http
            .post_json(config, "/shell-descriptors", descriptor)
            .await
    }

    async fn put_shell_descriptor_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
        descriptor: &AssetAdministrationShellDescriptor,
    ) -> Result<Option<AssetAdministrationShellDescriptor>, ClientError> {
        tracing::debug!(aas_id, "PUT shell descriptor");
        self.http
            .put_json(config, &shell_descriptor_path(aas_id), descriptor)
            .await
    }

    async fn delete_shell_descriptor_by_id(
        &self,
        config: &Configuration,
        aas_id: &str,
    ) -> Result<(), ClientError> {
        tracing::debug!(aas_id, "DELETE shell descriptor");
        self.http
            .delete(config, &shell_descriptor_path(aas_id))
            .await
    }
}

/// HTTP client for a submodel registry.
#[derive(Debug, Clone)]
pub struct SubmodelRegistryClient {
    http: HttpClient,
}

impl SubmodelRegistryClient {
    /// Create a registry client on top of a shared transport.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SubmodelRegistryApi for SubmodelRegistryClient {
    async fn get_all_submodel_descriptors(
        &self,
        config: &Configuration,
        page: &PageRequest,
    ) -> Result<PagedResult<SubmodelDescriptor>, ClientError> {
        self.http
            .get_json(config, "/submodel-descriptors", &page.query())
            .await
    }

    async fn get_submodel_descriptor_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
    ) -> Result<SubmodelDescriptor, ClientError> {
        tracing::debug!(submodel_id, "GET submodel descriptor");
        self.http
            .get_json(config, &submodel_descriptor_path(submodel_id), &[])
            .await
    }

    async fn post_submodel_descriptor(
        &self,
        config: &Configuration,
        descriptor: &SubmodelDescriptor,
    ) -> Result<SubmodelDescriptor, ClientError> {
        tracing::debug!(submodel_id = %descriptor.id, "POST submodel descriptor");
        self.http
            .post_json(config, "/submodel-descriptors", descriptor)
            .await
    }

    async fn put_submodel_descriptor_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
        descriptor: &SubmodelDescriptor,
    ) -> Result<Option<SubmodelDescriptor>, ClientError> {
        tracing::debug!(submodel_id, "PUT submodel descriptor");
        self.http
            .put_json(config, &submodel_descriptor_path(submodel_id), descriptor)
            .await
    }

    async fn delete_submodel_descriptor_by_id(
        &self,
        config: &Configuration,
        submodel_id: &str,
    ) -> Result<(), ClientError> {
        tracing::debug!(submodel_id, "DELETE submodel descriptor");
        self.http
            .delete(config, &submodel_descriptor_path(submodel_id))
            .await
    }
}
