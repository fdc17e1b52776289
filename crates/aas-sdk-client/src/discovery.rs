//! AAS discovery client.

use crate::config::Configuration;
use crate::encoding::encode_asset_id;
use crate::error::ClientError;
use crate::http::HttpClient;
use aas_sdk_core::{PagedResult, SpecificAssetId};
use async_trait::async_trait;

/// Operations of an AAS discovery service (`/lookup/shells`).
#[async_trait]
pub trait AasDiscoveryApi: Send + Sync {
    /// Identifiers of all shells linked to every given asset id.
    async fn get_all_aas_ids_by_asset_link(
        &self,
        config: &Configuration,
        asset_ids: &[SpecificAssetId],
    ) -> Result<Vec<String>, ClientError>;
}

/// HTTP client for an AAS discovery service.
#[derive(Debug, Clone)]
pub struct AasDiscoveryClient {
    http: HttpClient,
}

impl AasDiscoveryClient {
    /// Create a discovery client on top of a shared transport.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AasDiscoveryApi for AasDiscoveryClient {
    async fn get_all_aas_ids_by_asset_link(
        &self,
        config: &Configuration,
        asset_ids: &[SpecificAssetId],
    ) -> Result<Vec<String>, ClientError> {
        let query = asset_ids
            .iter()
            .map(|id| encode_asset_id(id).map(|encoded| ("assetIds", encoded)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = asset_ids.len(), "GET shell ids by asset link");

        let page: PagedResult<String> = self.http.get_json(config, "/lookup/shells", &query).await?;
        Ok(page.result)
    }
}
