//! # AAS SDK Core
//!
//! Typed model shared by the AAS SDK clients and services.
//!
//! This crate provides:
//! - Identifiables: shells, submodels, concept descriptions
//! - Submodel element trees with verbatim pass-through of unknown fields
//! - References and keys for addressing into the model graph
//! - Registry descriptors and their endpoints
//! - Cursor-based paging envelopes
//!
//! All types serialize to the AAS Part 2 JSON format, so they double as
//! the wire representation.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod common;
pub mod concept;
pub mod descriptor;
pub mod paging;
pub mod reference;
pub mod shell;
pub mod submodel;

pub use common::{AdministrativeInformation, Extension, LangString, ModellingKind};
pub use concept::ConceptDescription;
pub use descriptor::{
    extract_endpoint_href, AssetAdministrationShellDescriptor, Endpoint, ProtocolInformation,
    SubmodelDescriptor, AAS_INTERFACE, SUBMODEL_INTERFACE,
};
pub use paging::{PageRequest, PagedResult, PagingMetadata};
pub use reference::{Key, KeyType, ParseKeyTypeError, Reference, ReferenceType};
pub use shell::{AssetAdministrationShell, AssetInformation, AssetKind, SpecificAssetId};
pub use submodel::{Submodel, SubmodelElement};
