//! # AAS SDK Service
//!
//! Orchestration over AAS registries, repositories, and discovery.
//!
//! ## Resolution
//!
//! Reads are registry-first: the registry's descriptor names the endpoint
//! an element lives at, and the element is fetched from that host. When
//! the registry is not configured, does not know the element, or its
//! endpoint cannot be reached, the statically configured repository
//! answers instead.
//!
//! Writes go to the repository first and are mirrored into the registry
//! with a descriptor whose endpoint is derived from the repository
//! configuration. Deletes run the other way round.
//!
//! ## Partial failure
//!
//! See [`policy`]: aggregate reads drop failing items, dual writes fail
//! loudly.
//!
//! ## Example
//!
//! ```no_run
//! use aas_sdk_client::Configuration;
//! use aas_sdk_service::{AasService, AasServiceConfig, GetAasByIdOptions};
//!
//! # async fn run() -> Result<(), aas_sdk_service::ServiceError> {
//! let service = AasService::new(AasServiceConfig {
//!     registry_config: Some(Configuration::new("http://localhost:8082")),
//!     repository_config: Some(Configuration::new("http://localhost:8081")),
//!     ..Default::default()
//! })?;
//!
//! let found = service
//!     .get_aas_by_id(GetAasByIdOptions::new("https://example.com/ids/aas/test-123"))
//!     .await?;
//! println!("{}", found.shell.id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod endpoints;
pub mod error;
pub mod policy;
pub mod reference;
pub mod shell;
pub mod submodel;

use serde::Serialize;

pub use config::{AasServiceConfig, SubmodelServiceConfig};
pub use endpoints::{
    base_url_of, parse_shell_endpoint, parse_submodel_endpoint, shell_endpoint,
    submodel_endpoint, ParsedEndpoint,
};
pub use error::{ServiceError, ServiceKind, ServiceResult};
pub use policy::{BestEffortAggregate, FailLoudDualWrite};
pub use reference::{element_endpoint, id_short_path, ResolvedReference};
pub use shell::{
    AasByAssetId, AasClients, AasList, AasService, AasWithDescriptor, GetAasByAssetIdOptions,
    GetAasByIdOptions, GetAasListOptions, SubmodelsByShell,
};
pub use submodel::{
    GetSubmodelByIdOptions, GetSubmodelListOptions, SubmodelClients, SubmodelList,
    SubmodelService, SubmodelWithDescriptor,
};

/// Store a listing was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Descriptors from the registry, elements from their endpoints
    Registry,
    /// The configured repository
    Repository,
}
