//! References and keys.
//!
//! A [`Reference`] is an ordered key path through the model graph, e.g.
//! shell → submodel → nested element. Only model references can be walked
//! into concrete endpoints; external references point outside the model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceType {
    /// Points to an entity outside the model
    ExternalReference,
    /// Points to an element of the model
    ModelReference,
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExternalReference => f.write_str("ExternalReference"),
            Self::ModelReference => f.write_str("ModelReference"),
        }
    }
}

/// Type of a single key in a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Annotated relationship element
    AnnotatedRelationshipElement,
    /// Asset administration shell
    AssetAdministrationShell,
    /// Basic event element
    BasicEventElement,
    /// Blob
    Blob,
    /// Capability
    Capability,
    /// Concept description
    ConceptDescription,
    /// Data element
    DataElement,
    /// Entity
    Entity,
    /// Event element
    EventElement,
    /// File
    File,
    /// Fragment of an external resource
    FragmentReference,
    /// Global reference
    GlobalReference,
    /// Identifiable
    Identifiable,
    /// Multi-language property
    MultiLanguageProperty,
    /// Operation
    Operation,
    /// Property
    Property,
    /// Range
    Range,
    /// Referable
    Referable,
    /// Reference element
    ReferenceElement,
    /// Relationship element
    RelationshipElement,
    /// Submodel
    Submodel,
    /// Submodel element
    SubmodelElement,
    /// Submodel element collection
    SubmodelElementCollection,
    /// Submodel element list
    SubmodelElementList,
}

impl KeyType {
    const ALL: [Self; 24] = [
        Self::AnnotatedRelationshipElement,
        Self::AssetAdministrationShell,
        Self::BasicEventElement,
        Self::Blob,
        Self::Capability,
        Self::ConceptDescription,
        Self::DataElement,
        Self::Entity,
        Self::EventElement,
        Self::File,
        Self::FragmentReference,
        Self::GlobalReference,
        Self::Identifiable,
        Self::MultiLanguageProperty,
        Self::Operation,
        Self::Property,
        Self::Range,
        Self::Referable,
        Self::ReferenceElement,
        Self::RelationshipElement,
        Self::Submodel,
        Self::SubmodelElement,
        Self::SubmodelElementCollection,
        Self::SubmodelElementList,
    ];

    /// Name of the key type as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
            Self::AssetAdministrationShell => "AssetAdministrationShell",
            Self::BasicEventElement => "BasicEventElement",
            Self::Blob => "Blob",
            Self::Capability => "Capability",
            Self::ConceptDescription => "ConceptDescription",
            Self::DataElement => "DataElement",
            Self::Entity => "Entity",
            Self::EventElement => "EventElement",
            Self::File => "File",
            Self::FragmentReference => "FragmentReference",
            Self::GlobalReference => "GlobalReference",
            Self::Identifiable => "Identifiable",
            Self::MultiLanguageProperty => "MultiLanguageProperty",
            Self::Operation => "Operation",
            Self::Property => "Property",
            Self::Range => "Range",
            Self::Referable => "Referable",
            Self::ReferenceElement => "ReferenceElement",
            Self::RelationshipElement => "RelationshipElement",
            Self::Submodel => "Submodel",
            Self::SubmodelElement => "SubmodelElement",
            Self::SubmodelElementCollection => "SubmodelElementCollection",
            Self::SubmodelElementList => "SubmodelElementList",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = ParseKeyTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKeyTypeError(s.to_string()))
    }
}

/// Returned when a string does not name a [`KeyType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key type: {0}")]
pub struct ParseKeyTypeError(pub String);

/// One step of a reference path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// What the key points at
    #[serde(rename = "type")]
    pub key_type: KeyType,
    /// Identifier or idShort, depending on the key type
    pub value: String,
}

impl Key {
    /// Create a new key.
    #[must_use]
    pub fn new(key_type: KeyType, value: impl Into<String>) -> Self {
        Self {
            key_type,
            value: value.into(),
        }
    }
}

/// An ordered key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Model or external reference
    #[serde(rename = "type")]
    pub reference_type: ReferenceType,
    /// Semantic id of the referred element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referred_semantic_id: Option<Box<Reference>>,
    /// Keys, outermost first
    #[serde(default)]
    pub keys: Vec<Key>,
}

impl Reference {
    /// Create a model reference from keys.
    #[must_use]
    pub fn model(keys: Vec<Key>) -> Self {
        Self {
            reference_type: ReferenceType::ModelReference,
            referred_semantic_id: None,
            keys,
        }
    }

    /// Create an external reference pointing at a single global id.
    #[must_use]
    pub fn external(global_id: impl Into<String>) -> Self {
        Self {
            reference_type: ReferenceType::ExternalReference,
            referred_semantic_id: None,
            keys: vec![Key::new(KeyType::GlobalReference, global_id)],
        }
    }

    /// Model reference to a submodel by identifier.
    #[must_use]
    pub fn to_submodel(submodel_id: impl Into<String>) -> Self {
        Self::model(vec![Key::new(KeyType::Submodel, submodel_id)])
    }

    /// Value of the first key, if any.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        self.keys.first().map(|k| k.value.as_str())
    }
}
