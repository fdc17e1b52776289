//! Identifier and path encoding for service URLs.
//!
//! The AAS Part 2 HTTP/REST API never puts raw identifiers into a URL:
//!
//! - `/shells/{id}`, `/shell-descriptors/{id}`, `/submodels/{id}` and
//!   `/concept-descriptions/{id}` carry the id as unpadded base64url, so
//!   ids containing `/`, `:` or `#` stay a single path segment.
//! - `/submodel-elements/{idShortPath}` is percent-encoded instead. Dots
//!   separate idShorts and `[n]` addresses list items, so both stay literal.
//! - The discovery `assetIds` query value is the base64url of the
//!   specific asset id's JSON object.
//!
//! # References
//!
//! - IDTA 01002-3-0: Specification of the Asset Administration Shell Part 2,
//!   Application Programming Interfaces

use aas_sdk_core::SpecificAssetId;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Bytes escaped inside an idShort path segment.
///
/// Everything that would end the segment or start a query or fragment.
/// `.`, `[` and `]` are path syntax and pass through.
const IDSHORT_PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\');

/// Encode an identifier for use as a path segment.
///
/// # Examples
///
/// ```
/// use aas_sdk_client::encode_id_base64url;
///
/// let encoded = encode_id_base64url("https://example.com/ids/aas/test-123");
/// assert_eq!(encoded, "aHR0cHM6Ly9leGFtcGxlLmNvbS9pZHMvYWFzL3Rlc3QtMTIz");
/// ```
#[must_use]
pub fn encode_id_base64url(id: &str) -> String {
    URL_SAFE_NO_PAD.encode(id.as_bytes())
}

/// Decode a path segment back into an identifier.
///
/// Trailing `=` padding is tolerated, since some servers emit it.
///
/// # Errors
///
/// Returns error if the input is not base64url or not UTF-8.
pub fn decode_id_base64url(encoded: &str) -> Result<String, EncodingError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded.trim_end_matches('='))
        .map_err(|e| EncodingError::Base64Decode(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| EncodingError::Utf8Decode(e.to_string()))
}

/// Percent-encode an idShort path.
///
/// ```
/// use aas_sdk_client::encode_idshort_path;
///
/// assert_eq!(encode_idshort_path("Limits.Max"), "Limits.Max");
/// assert_eq!(encode_idshort_path("Components[0]"), "Components[0]");
/// assert_eq!(encode_idshort_path("My Property"), "My%20Property");
/// ```
#[must_use]
pub fn encode_idshort_path(path: &str) -> String {
    utf8_percent_encode(path, IDSHORT_PATH_ESCAPE).to_string()
}

/// Decode a percent-encoded idShort path.
///
/// # Errors
///
/// Returns error if the decoded bytes are not UTF-8.
pub fn decode_idshort_path(encoded: &str) -> Result<String, EncodingError> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| EncodingError::Utf8Decode(e.to_string()))
}

/// Encode a specific asset id for the discovery `assetIds` query parameter.
///
/// # Errors
///
/// Returns error if the asset id cannot be serialized.
pub fn encode_asset_id(asset_id: &SpecificAssetId) -> Result<String, EncodingError> {
    let json =
        serde_json::to_vec(asset_id).map_err(|e| EncodingError::Serialize(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Errors that can occur during encoding/decoding.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EncodingError {
    /// Base64 decoding failed
    #[error("base64 decode error: {0}")]
    Base64Decode(String),
    /// UTF-8 decoding failed
    #[error("UTF-8 decode error: {0}")]
    Utf8Decode(String),
    /// JSON serialization failed
    #[error("serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_identifier() {
        let decoded =
            decode_id_base64url("aHR0cHM6Ly9leGFtcGxlLmNvbS9pZHMvYWFzL3Rlc3QtMTIz").unwrap();
        assert_eq!(decoded, "https://example.com/ids/aas/test-123");
    }

    #[test]
    fn never_pads_or_uses_standard_alphabet() {
        for id in ["a", "ab", "abc", "urn:example:with+plus/and/slashes?"] {
            let encoded = encode_id_base64url(id);
            assert!(!encoded.contains('='), "{id} -> {encoded}");
            assert!(!encoded.contains('+'), "{id} -> {encoded}");
            assert!(!encoded.contains('/'), "{id} -> {encoded}");
        }
    }

    #[test]
    fn tolerates_padding_on_decode() {
        assert_eq!(decode_id_base64url("YQ==").unwrap(), "a");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            decode_id_base64url("not base64!"),
            Err(EncodingError::Base64Decode(_))
        ));
        // 0xFF is not valid UTF-8
        assert!(matches!(
            decode_id_base64url("_w"),
            Err(EncodingError::Utf8Decode(_))
        ));
    }

    #[test]
    fn idshort_path_escapes_separators() {
        let path = "Technical Data/Max<Temp>[2]";
        let encoded = encode_idshort_path(path);
        assert_eq!(encoded, "Technical%20Data%2FMax%3CTemp%3E[2]");
        assert_eq!(decode_idshort_path(&encoded).unwrap(), path);
    }

    #[test]
    fn idshort_path_keeps_dots_and_indices_for_nested_elements() {
        let path = "Documents[0].Title?lang=en#top";
        let encoded = encode_idshort_path(path);
        assert_eq!(encoded, "Documents[0].Title%3Flang=en%23top");
        assert!(!encoded.contains('/'));
        assert_eq!(decode_idshort_path(&encoded).unwrap(), path);
    }

    #[test]
    fn asset_id_is_base64url_json() {
        let encoded = encode_asset_id(&SpecificAssetId::new("serialNumber", "SN-1")).unwrap();
        let json = URL_SAFE_NO_PAD.decode(encoded).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "serialNumber", "value": "SN-1"})
        );
    }
}
