//! Reference resolution helpers.

use aas_sdk_client::encode_idshort_path;
use aas_sdk_core::{Key, KeyType};
use serde::Serialize;

/// Endpoints a model reference resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedReference {
    /// Endpoint of the referenced shell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aas_endpoint: Option<String>,
    /// Endpoint of the referenced submodel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submodel_endpoint: Option<String>,
    /// Endpoint of the referenced element inside the submodel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submodel_element_path: Option<String>,
}

/// idShort path of element keys.
///
/// Keys are dot-joined, except that a key directly below a
/// `SubmodelElementList` becomes a `[value]` suffix. The key value is used
/// verbatim as the index; it is not looked up in the list.
#[must_use]
pub fn id_short_path(keys: &[Key]) -> String {
    let mut path = String::new();
    let mut parent = None;

    for key in keys {
        if parent == Some(KeyType::SubmodelElementList) {
            path.push('[');
            path.push_str(&key.value);
            path.push(']');
        } else {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(&key.value);
        }
        parent = Some(key.key_type);
    }

    path
}

/// `{submodel_endpoint}/submodel-elements/{idShortPath}`.
#[must_use]
pub fn element_endpoint(submodel_endpoint: &str, keys: &[Key]) -> String {
    format!(
        "{submodel_endpoint}/submodel-elements/{}",
        encode_idshort_path(&id_short_path(keys))
    )
}
