//! Minimum-shape check for raw article lines.

use serde_json::Value;
use thiserror::Error;

use crate::article::{MissingField, RawArticleRecord};

/// Longest prefix of a rejected line included in the diagnostic log.
const MAX_LOGGED_LINE_CHARS: usize = 500;

/// Why a raw line was dropped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidArticle {
    #[error("malformed article: {message}")]
    Malformed { message: String },

    #[error("no headline")]
    MissingHeadline,

    #[error("no pub_date")]
    MissingPubDate { headline: String },
}

/// Parses one raw line and checks that it has a non-empty `headline.main`
/// and `pub_date`. Any other content, whatever its types, is accepted.
///
/// Every rejection is logged here; callers drop the line and move on.
///
/// # Errors
///
/// Returns the [`InvalidArticle`] reason when the line is unusable.
pub fn validate_article(line: &str) -> Result<RawArticleRecord, InvalidArticle> {
    let doc = match serde_json::from_str::<Value>(line) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(
                invalid_article = %truncate_for_log(line),
                message = %e,
                "dropping malformed article"
            );
            return Err(InvalidArticle::Malformed {
                message: e.to_string(),
            });
        }
    };

    RawArticleRecord::from_document(&doc).map_err(|missing| match missing {
        MissingField::Headline => {
            tracing::warn!(invalid_article = "No headline", "dropping article");
            InvalidArticle::MissingHeadline
        }
        MissingField::PubDate { headline } => {
            tracing::warn!(
                headline = %headline,
                invalid_article = "No pub_date",
                "dropping article"
            );
            InvalidArticle::MissingPubDate { headline }
        }
    })
}

fn truncate_for_log(line: &str) -> &str {
    match line.char_indices().nth(MAX_LOGGED_LINE_CHARS) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_minimal_article() {
        let record =
            validate_article(r#"{"headline":{"main":"Title"},"pub_date":"2021-03-01T00:00:00+0000"}"#)
                .unwrap();
        assert_eq!(record.headline, "Title");
    }

    #[test]
    fn accepts_article_with_extra_fields() {
        let line = r#"{"headline":{"main":"T","kicker":null},"pub_date":"2021-03-01","byline":{"original":"By X"},"_id":"nyt://article/1"}"#;
        assert!(validate_article(line).is_ok());
    }

    #[test]
    fn accepts_numeric_section_name() {
        let record = validate_article(
            r#"{"headline":{"main":"Title"},"pub_date":"2021-03-01","section_name":42}"#,
        )
        .unwrap();
        assert_eq!(record.section_name, Some(json!(42)));
    }

    #[test]
    fn accepts_keyword_with_string_rank() {
        let record = validate_article(
            r#"{"headline":{"main":"Title"},"pub_date":"2021-03-01","keywords":[{"name":"subject","value":"Politics","rank":"1"}]}"#,
        )
        .unwrap();
        assert_eq!(record.keywords.len(), 1);
        assert_eq!(record.keywords[0].rank, Some(json!("1")));
    }

    #[test]
    fn accepts_keyword_with_object_value() {
        let record = validate_article(
            r#"{"headline":{"main":"Title"},"pub_date":"2021-03-01","keywords":[{"name":"subject","value":{"x":1},"rank":1}]}"#,
        )
        .unwrap();
        assert_eq!(record.keywords[0].value, Some(json!({ "x": 1 })));
    }

    #[test]
    fn rejects_non_json() {
        let err = validate_article("{not json").unwrap_err();
        assert!(matches!(err, InvalidArticle::Malformed { .. }));
    }

    #[test]
    fn rejects_empty_line() {
        assert!(matches!(
            validate_article("").unwrap_err(),
            InvalidArticle::Malformed { .. }
        ));
    }

    #[test]
    fn json_that_is_not_an_object_has_no_headline() {
        assert_eq!(
            validate_article("[1,2,3]").unwrap_err(),
            InvalidArticle::MissingHeadline
        );
    }

    #[test]
    fn rejects_missing_headline() {
        assert_eq!(
            validate_article(r#"{"pub_date":"2021-03-01"}"#).unwrap_err(),
            InvalidArticle::MissingHeadline
        );
    }

    #[test]
    fn rejects_headline_without_main() {
        assert_eq!(
            validate_article(r#"{"headline":{"print_headline":"x"},"pub_date":"2021-03-01"}"#)
                .unwrap_err(),
            InvalidArticle::MissingHeadline
        );
    }

    #[test]
    fn rejects_missing_pub_date() {
        assert_eq!(
            validate_article(r#"{"headline":{"main":"Title"}}"#).unwrap_err(),
            InvalidArticle::MissingPubDate {
                headline: "Title".into()
            }
        );
    }

    #[test]
    fn rejects_empty_required_fields() {
        assert_eq!(
            validate_article(r#"{"headline":{"main":""},"pub_date":"2021-03-01"}"#).unwrap_err(),
            InvalidArticle::MissingHeadline
        );
        assert!(matches!(
            validate_article(r#"{"headline":{"main":"T"},"pub_date":""}"#).unwrap_err(),
            InvalidArticle::MissingPubDate { .. }
        ));
    }

    #[test]
    fn truncate_for_log_respects_char_boundaries() {
        let long = "é".repeat(MAX_LOGGED_LINE_CHARS + 10);
        assert_eq!(truncate_for_log(&long).chars().count(), MAX_LOGGED_LINE_CHARS);
        assert_eq!(truncate_for_log("short"), "short");
    }
}
