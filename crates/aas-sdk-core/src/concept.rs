//! Concept descriptions.

use crate::common::{AdministrativeInformation, Extension, LangString};
use crate::reference::Reference;
use serde::{Deserialize, Serialize};

fn concept_model_type() -> String {
    "ConceptDescription".to_string()
}

/// Semantic definition referenced by submodels and elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDescription {
    #[serde(rename = "modelType", default = "concept_model_type")]
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
    /// External concepts this one is a case of
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_case_of: Option<Vec<Reference>>,
    /// Data specifications (e.g., IEC 61360), kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedded_data_specifications: Option<Vec<serde_json::Value>>,
}

impl ConceptDescription {
    /// Create a concept description with only an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            model_type: concept_model_type(),
            id: id.into(),
            id_short: None,
            display_name: None,
            description: None,
            extensions: None,
            administration: None,
            is_case_of: None,
            embedded_data_specifications: None,
        }
    }
}
