//! Submodels and their element trees.

use crate::common::{AdministrativeInformation, Extension, LangString, ModellingKind};
use crate::reference::{KeyType, Reference};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

const SUBMODEL_MODEL_TYPE: &str = "Submodel";

fn submodel_model_type() -> String {
    SUBMODEL_MODEL_TYPE.to_string()
}

/// A node in a submodel's element tree.
///
/// Only the fields needed for addressing are typed; everything else
/// (`value`, `valueType`, qualifiers, ...) is kept in [`Self::fields`] so
/// unknown element kinds pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelElement {
    /// Element kind on the wire (e.g., `Property`)
    pub model_type: String,
    /// Short name, used in idShort paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,
    /// Semantic id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    /// Remaining fields, verbatim
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SubmodelElement {
    /// Create a property element with a string value.
    #[must_use]
    pub fn property(id_short: impl Into<String>, value: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("valueType".to_string(), Value::from("xs:string"));
        fields.insert("value".to_string(), Value::from(value.into()));
        Self {
            model_type: KeyType::Property.as_str().to_string(),
            id_short: Some(id_short.into()),
            semantic_id: None,
            fields,
        }
    }

    /// Create a collection element holding `children`.
    #[must_use]
    pub fn collection(id_short: impl Into<String>, children: Vec<Self>) -> Self {
        let mut fields = Map::new();
        fields.insert(
            "value".to_string(),
            serde_json::to_value(children).unwrap_or(Value::Array(Vec::new())),
        );
        Self {
            model_type: KeyType::SubmodelElementCollection.as_str().to_string(),
            id_short: Some(id_short.into()),
            semantic_id: None,
            fields,
        }
    }

    /// Attach a semantic id.
    #[must_use]
    pub fn with_semantic_id(mut self, semantic_id: Reference) -> Self {
        self.semantic_id = Some(semantic_id);
        self
    }

    /// The element kind, if it is a known key type.
    #[must_use]
    pub fn kind(&self) -> Option<KeyType> {
        self.model_type.parse().ok()
    }

    /// Nested elements of collections, lists, entities, and annotated
    /// relationships. Malformed children are skipped.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        let field = match self.kind() {
            Some(KeyType::SubmodelElementCollection | KeyType::SubmodelElementList) => "value",
            Some(KeyType::Entity) => "statements",
            Some(KeyType::AnnotatedRelationshipElement) => "annotations",
            _ => return Vec::new(),
        };

        self.fields
            .get(field)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn collect_semantic_ids(&self, out: &mut BTreeSet<String>) {
        if let Some(id) = self.semantic_id.as_ref().and_then(Reference::first_value) {
            out.insert(id.to_string());
        }
        for child in self.children() {
            child.collect_semantic_ids(out);
        }
    }
}

/// A submodel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submodel {
    #[serde(rename = "modelType", default = "submodel_model_type")]
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
    /// Template or instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ModellingKind>,
    /// Semantic id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    /// Supplemental semantic ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplemental_semantic_ids: Option<Vec<Reference>>,
    /// Top-level elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submodel_elements: Option<Vec<SubmodelElement>>,
}

impl Submodel {
    /// Create a submodel with only an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            model_type: submodel_model_type(),
            id: id.into(),
            id_short: None,
            display_name: None,
            description: None,
            extensions: None,
            administration: None,
            kind: None,
            semantic_id: None,
            supplemental_semantic_ids: None,
            submodel_elements: None,
        }
    }

    /// Set the short name.
    #[must_use]
    pub fn with_id_short(mut self, id_short: impl Into<String>) -> Self {
        self.id_short = Some(id_short.into());
        self
    }

    /// Set the semantic id.
    #[must_use]
    pub fn with_semantic_id(mut self, semantic_id: Reference) -> Self {
        self.semantic_id = Some(semantic_id);
        self
    }

    /// Append a top-level element.
    #[must_use]
    pub fn with_element(mut self, element: SubmodelElement) -> Self {
        self.submodel_elements
            .get_or_insert_with(Vec::new)
            .push(element);
        self
    }

    /// Semantic ids (first key values) of the submodel and every nested
    /// element, de-duplicated and sorted.
    #[must_use]
    pub fn semantic_ids(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        if let Some(id) = self.semantic_id.as_ref().and_then(Reference::first_value) {
            out.insert(id.to_string());
        }
        for element in self.submodel_elements.iter().flatten() {
            element.collect_semantic_ids(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nameplate() -> Value {
        serde_json::json!({
            "modelType": "Submodel",
            "id": "urn:sm:nameplate",
            "idShort": "Nameplate",
            "semanticId": {"type": "ExternalReference", "keys": [{"type": "GlobalReference", "value": "urn:sem:nameplate"}]},
            "submodelElements": [
                {
                    "modelType": "Property",
                    "idShort": "ManufacturerName",
                    "valueType": "xs:string",
                    "value": "ACME",
                    "semanticId": {"type": "ExternalReference", "keys": [{"type": "GlobalReference", "value": "urn:sem:manufacturer"}]}
                },
                {
                    "modelType": "SubmodelElementCollection",
                    "idShort": "Address",
                    "value": [
                        {
                            "modelType": "Property",
                            "idShort": "Street",
                            "valueType": "xs:string",
                            "semanticId": {"type": "ExternalReference", "keys": [{"type": "GlobalReference", "value": "urn:sem:street"}]}
                        },
                        {
                            "modelType": "Property",
                            "idShort": "City",
                            "valueType": "xs:string",
                            "semanticId": {"type": "ExternalReference", "keys": [{"type": "GlobalReference", "value": "urn:sem:manufacturer"}]}
                        }
                    ]
                }
            ]
        })
    }

    #[test]
    fn keeps_unknown_fields() {
        let submodel: Submodel = serde_json::from_value(nameplate()).unwrap();
        let elements = submodel.submodel_elements.as_ref().unwrap();
        assert_eq!(elements[0].kind(), Some(KeyType::Property));
        assert_eq!(elements[0].fields["value"], "ACME");

        let json = serde_json::to_value(&submodel).unwrap();
        assert_eq!(json["submodelElements"][0]["valueType"], "xs:string");
        assert_eq!(json["modelType"], "Submodel");
    }

    #[test]
    fn walks_nested_semantic_ids() {
        let submodel: Submodel = serde_json::from_value(nameplate()).unwrap();
        let ids: Vec<_> = submodel.semantic_ids().into_iter().collect();
        assert_eq!(
            ids,
            vec!["urn:sem:manufacturer", "urn:sem:nameplate", "urn:sem:street"]
        );
    }

    #[test]
    fn unknown_element_kind_has_no_children() {
        let element: SubmodelElement = serde_json::from_value(serde_json::json!({
            "modelType": "VendorSpecificThing",
            "value": [{"modelType": "Property", "idShort": "x"}]
        }))
        .unwrap();
        assert!(element.kind().is_none());
        assert!(element.children().is_empty());
    }

    #[test]
    fn collection_builder_nests_children() {
        let collection = SubmodelElement::collection(
            "Limits",
            vec![SubmodelElement::property("Max", "90")],
        );
        let children = collection.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id_short.as_deref(), Some("Max"));
    }
}
