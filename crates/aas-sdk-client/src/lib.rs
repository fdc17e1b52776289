//! # AAS SDK Client
//!
//! Encoding utilities and one HTTP client per AAS Part 2 service.
//!
//! ## Encoding Rules (per AAS Part 2 HTTP/REST API)
//!
//! - **Identifiable IDs**: base64url-encoded WITHOUT padding
//! - **idShortPath**: URL-encoded (preserving `[]` for list indices)
//!
//! ## Clients
//!
//! Each remote API sits behind a capability trait so callers can swap in
//! their own implementation:
//!
//! | Trait | HTTP client |
//! |---|---|
//! | [`AasRegistryApi`] | [`AasRegistryClient`] |
//! | [`SubmodelRegistryApi`] | [`SubmodelRegistryClient`] |
//! | [`AasRepositoryApi`] | [`AasRepositoryClient`] |
//! | [`SubmodelRepositoryApi`] | [`SubmodelRepositoryClient`] |
//! | [`ConceptDescriptionRepositoryApi`] | [`ConceptDescriptionRepositoryClient`] |
//! | [`AasDiscoveryApi`] | [`AasDiscoveryClient`] |
//!
//! Every call takes the [`Configuration`] of the service it targets.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod discovery;
pub mod encoding;
pub mod error;
pub mod http;
pub mod registry;
pub mod repository;

pub use config::{Configuration, DEFAULT_BASE_PATH};
pub use discovery::{AasDiscoveryApi, AasDiscoveryClient};
pub use encoding::{
    decode_id_base64url, decode_idshort_path, encode_asset_id, encode_id_base64url,
    encode_idshort_path, EncodingError,
};
pub use error::ClientError;
pub use http::HttpClient;
pub use registry::{
    AasRegistryApi, AasRegistryClient, SubmodelRegistryApi, SubmodelRegistryClient,
};
pub use repository::{
    AasRepositoryApi, AasRepositoryClient, ConceptDescriptionRepositoryApi,
    ConceptDescriptionRepositoryClient, SubmodelRepositoryApi, SubmodelRepositoryClient,
};
