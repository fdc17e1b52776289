//! Registry descriptors.
//!
//! A descriptor is routing metadata: a projection of a shell or submodel
//! plus the endpoints where the full entity can be fetched.

use crate::common::{AdministrativeInformation, Extension, LangString};
use crate::reference::Reference;
use crate::shell::{AssetKind, SpecificAssetId};
use serde::{Deserialize, Serialize};

/// Interface tag of a shell repository endpoint.
pub const AAS_INTERFACE: &str = "AAS-3.0";

/// Interface tag of a submodel repository endpoint.
pub const SUBMODEL_INTERFACE: &str = "SUBMODEL-3.0";

/// Where and how an endpoint is reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolInformation {
    /// Absolute URL of the entity
    pub href: String,
    /// Protocol (e.g., `HTTP`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_protocol: Option<String>,
    /// Protocol versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_protocol_version: Option<Vec<String>>,
    /// Sub-protocol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subprotocol: Option<String>,
    /// Sub-protocol body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subprotocol_body: Option<String>,
    /// Sub-protocol body encoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subprotocol_body_encoding: Option<String>,
    /// Security attributes, kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_attributes: Option<serde_json::Value>,
}

/// An endpoint record of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Interface tag (e.g., [`AAS_INTERFACE`])
    pub interface: String,
    /// Location of the entity
    pub protocol_information: ProtocolInformation,
}

impl Endpoint {
    /// HTTP endpoint with the given interface tag.
    #[must_use]
    pub fn http(interface: &str, href: impl Into<String>) -> Self {
        Self {
            interface: interface.to_string(),
            protocol_information: ProtocolInformation {
                href: href.into(),
                endpoint_protocol: Some("HTTP".to_string()),
                ..ProtocolInformation::default()
            },
        }
    }

    /// The endpoint's URL.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.protocol_information.href
    }
}

/// Registry record for a shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAdministrationShellDescriptor {
    /// Shell identifier
    pub id: String,
    /// Short name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,
    /// Display names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Vec<LangString>>,
    /// Descriptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<LangString>>,
    /// Extensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<Extension>>,
    /// Version information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administration: Option<AdministrativeInformation>,
    /// Asset kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_kind: Option<AssetKind>,
    /// Asset type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    /// Global asset id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,
    /// Specific asset ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_asset_ids: Option<Vec<SpecificAssetId>>,
    /// Embedded submodel descriptors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submodel_descriptors: Option<Vec<SubmodelDescriptor>>,
    /// Where the shell can be fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<Endpoint>>,
}

/// Registry record for a submodel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelDescriptor {
    /// Submodel identifier
    pub id: String,
    /// Short name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,
    /// Display names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Vec<LangString>>,
    /// Descriptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<LangString>>,
    /// Extensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<Extension>>,
    /// Version information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administration: Option<AdministrativeInformation>,
    /// Semantic id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    /// Supplemental semantic ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplemental_semantic_id: Option<Vec<Reference>>,
    /// Where the submodel can be fetched
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// First endpoint href tagged with `interface`, or `None`.
///
/// Endpoints with an empty href are treated as absent.
#[must_use]
pub fn extract_endpoint_href<'a>(endpoints: &'a [Endpoint], interface: &str) -> Option<&'a str> {
    endpoints
        .iter()
        .find(|e| e.interface == interface && !e.href().is_empty())
        .map(Endpoint::href)
}

impl AssetAdministrationShellDescriptor {
    /// Href of the first endpoint with the given interface tag.
    #[must_use]
    pub fn endpoint_href(&self, interface: &str) -> Option<&str> {
        self.endpoints
            .as_deref()
            .and_then(|endpoints| extract_endpoint_href(endpoints, interface))
    }
}

impl SubmodelDescriptor {
    /// Href of the first endpoint with the given interface tag.
    #[must_use]
    pub fn endpoint_href(&self, interface: &str) -> Option<&str> {
        extract_endpoint_href(&self.endpoints, interface)
    }
}
