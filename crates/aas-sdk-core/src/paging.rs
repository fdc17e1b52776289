//! Cursor-based paging envelopes.

use serde::{Deserialize, Serialize};

/// Paging state returned by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingMetadata {
    /// Cursor of the next page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// A page of results.
///
/// The AAS API spells the metadata field `paging_metadata`; some servers
/// emit `pagingMetadata`, which is accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Paging state
    #[serde(default, alias = "pagingMetadata")]
    pub paging_metadata: PagingMetadata,
    /// Items of this page
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
}

impl<T> PagedResult<T> {
    /// A single, final page holding `result`.
    #[must_use]
    pub fn last(result: Vec<T>) -> Self {
        Self {
            paging_metadata: PagingMetadata::default(),
            result,
        }
    }
}

/// Paging parameters of a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of items
    pub limit: Option<u32>,
    /// Cursor returned by the previous page
    pub cursor: Option<String>,
}

impl PageRequest {
    /// Query parameters for this request.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            query.push(("cursor", cursor.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_without_cursor() {
        let page: PagedResult<String> =
            serde_json::from_value(serde_json::json!({"paging_metadata": {}, "result": ["a"]}))
                .unwrap();
        assert_eq!(page.result, vec!["a".to_string()]);
        assert!(page.paging_metadata.cursor.is_none());
    }

    #[test]
    fn parses_page_with_cursor() {
        let page: PagedResult<String> = serde_json::from_value(serde_json::json!({
            "paging_metadata": {"cursor": "next"},
            "result": []
        }))
        .unwrap();
        assert_eq!(page.paging_metadata.cursor.as_deref(), Some("next"));
    }

    #[test]
    fn query_skips_absent_parameters() {
        assert!(PageRequest::default().query().is_empty());
        let request = PageRequest {
            limit: Some(10),
            cursor: Some("abc".to_string()),
        };
        assert_eq!(
            request.query(),
            vec![("limit", "10".to_string()), ("cursor", "abc".to_string())]
        );
    }
}
