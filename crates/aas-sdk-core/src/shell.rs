//! Asset Administration Shell and asset information.

use crate::common::{AdministrativeInformation, Extension, LangString};
use crate::reference::Reference;
use serde::{Deserialize, Serialize};

const SHELL_MODEL_TYPE: &str = "AssetAdministrationShell";

fn shell_model_type() -> String {
    SHELL_MODEL_TYPE.to_string()
}

/// Kind of the asset a shell represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    /// Asset type (e.g., a product line)
    Type,
    /// Concrete asset instance
    Instance,
    /// Neither type nor instance
    NotApplicable,
}

/// An asset identifier scoped by a name, such as a serial number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificAssetId {
    /// Name of the identifier (e.g., `serialNumber`)
    pub name: String,
    /// Identifier value
    pub value: String,
    /// Subject that issued the identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_subject_id: Option<Reference>,
    /// Semantic id of the identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
}

impl SpecificAssetId {
    /// Create a specific asset id from a name/value pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            external_subject_id: None,
            semantic_id: None,
        }
    }
}

/// Identification of the asset behind a shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInformation {
    /// Type or instance
    pub asset_kind: AssetKind,
    /// Global asset identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,
    /// Additional scoped identifiers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_asset_ids: Option<Vec<SpecificAssetId>>,
    /// Asset type identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    /// Thumbnail resource, kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_thumbnail: Option<serde_json::Value>,
}

impl AssetInformation {
    /// Asset information for an instance with a global asset id.
    #[must_use]
    pub fn instance(global_asset_id: impl Into<String>) -> Self {
        Self {
            asset_kind: AssetKind::Instance,
            global_asset_id: Some(global_asset_id.into()),
            specific_asset_ids: None,
            asset_type: None,
            default_thumbnail: None,
        }
    }
}

/// An Asset Administration Shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAdministrationShell {
    #[serde(rename = "modelType", default = "shell_model_type")]
    model_type: String,
    /// Globally unique identifier
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
    /// Asset behind this shell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_information: Option<AssetInformation>,
    /// Shell this one was derived from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Reference>,
    /// References to the shell's submodels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submodels: Option<Vec<Reference>>,
}

impl AssetAdministrationShell {
    /// Create a shell with only an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            model_type: shell_model_type(),
            id: id.into(),
            id_short: None,
            display_name: None,
            description: None,
            extensions: None,
            administration: None,
            asset_information: None,
            derived_from: None,
            submodels: None,
        }
    }

    /// Attach asset information.
    #[must_use]
    pub fn with_asset_information(mut self, info: AssetInformation) -> Self {
        self.asset_information = Some(info);
        self
    }

    /// Add a reference to a submodel.
    #[must_use]
    pub fn with_submodel(mut self, submodel_id: impl Into<String>) -> Self {
        self.submodels
            .get_or_insert_with(Vec::new)
            .push(Reference::to_submodel(submodel_id));
        self
    }

    /// Identifiers of the referenced submodels (first key of each reference).
    pub fn submodel_ids(&self) -> impl Iterator<Item = &str> {
        self.submodels
            .iter()
            .flatten()
            .filter_map(Reference::first_value)
    }
}
