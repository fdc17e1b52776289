//! Metadata types shared by identifiables and descriptors.

use serde::{Deserialize, Serialize};

/// A string in a specific language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangString {
    /// Language tag (e.g., `en`, `de-DE`)
    pub language: String,
    /// Text in that language
    pub text: String,
}

impl LangString {
    /// Create a new language-tagged string.
    #[must_use]
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }
}

/// Versioning and provenance of an identifiable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministrativeInformation {
    /// Version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Creator reference, kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<serde_json::Value>,
    /// Template identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

/// An extension attached to a referable.
///
/// Extensions are passed through untouched, so the payload stays raw JSON.
pub type Extension = serde_json::Value;

/// Whether a submodel is a template or an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModellingKind {
    /// Template
    Template,
    /// Instance
    Instance,
}
