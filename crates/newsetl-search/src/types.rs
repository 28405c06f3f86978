//! Article search API response types.
//!
//! The API wraps every page in `{"status": "OK", "response": {...}}`. Only
//! the paging metadata is modelled; documents are kept as opaque JSON so the
//! raw archive stores exactly what the API returned.

use serde::Deserialize;
use serde_json::Value;

/// Top-level envelope of one search response.
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    pub response: SearchResponse,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub meta: SearchMeta,
    #[serde(default)]
    pub docs: Vec<Value>,
}

/// Paging metadata reported with every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SearchMeta {
    /// Total number of documents matching the query.
    pub hits: u64,
    /// Number of documents delivered by earlier pages of the same query.
    pub offset: u64,
}

/// One successfully fetched page.
#[derive(Debug, Clone)]
pub struct SearchPage {
    /// Zero-based page number that was requested.
    pub page: u32,
    pub total_hits: u64,
    pub offset: u64,
    pub docs: Vec<Value>,
}

impl SearchPage {
    /// `true` while documents remain beyond this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.docs.len() as u64) < self.total_hits
    }

    /// `headline.main` of every document that has one, in page order.
    #[must_use]
    pub fn headlines(&self) -> Vec<&str> {
        self.docs
            .iter()
            .filter_map(|doc| doc.pointer("/headline/main").and_then(Value::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(offset: u64, docs: usize, total_hits: u64) -> SearchPage {
        SearchPage {
            page: 0,
            total_hits,
            offset,
            docs: (0..docs).map(|i| json!({ "_id": i })).collect(),
        }
    }

    #[test]
    fn has_more_when_offset_plus_count_below_hits() {
        assert!(page(0, 10, 25).has_more());
        assert!(page(10, 10, 25).has_more());
    }

    #[test]
    fn no_more_on_last_page() {
        assert!(!page(20, 5, 25).has_more());
        assert!(!page(0, 0, 0).has_more());
    }

    #[test]
    fn empty_page_with_outstanding_hits_still_reports_more() {
        // The harvest page ceiling is what stops an API stuck in this state.
        assert!(page(10, 0, 25).has_more());
    }

    #[test]
    fn headlines_skip_documents_without_headline() {
        let p = SearchPage {
            page: 0,
            total_hits: 2,
            offset: 0,
            docs: vec![
                json!({ "headline": { "main": "First" } }),
                json!({ "abstract": "no headline" }),
                json!({ "headline": { "main": "Second" } }),
            ],
        };
        assert_eq!(p.headlines(), vec!["First", "Second"]);
    }

    #[test]
    fn envelope_defaults_missing_docs_to_empty() {
        let env: SearchEnvelope = serde_json::from_value(json!({
            "status": "OK",
            "response": { "meta": { "hits": 0, "offset": 0, "time": 12 } }
        }))
        .unwrap();
        assert!(env.response.docs.is_empty());
        assert_eq!(env.response.meta.hits, 0);
    }
}
