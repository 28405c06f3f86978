//! Article record schemas.
//!
//! [`RawArticleRecord`] is a read of one archived search document: the two
//! required fields as text, plus the optional fields the cleaner copies,
//! kept as whatever JSON the API sent. A JSON `null` reads as absent.
//! [`CleanedArticleRecord`] is the reduced schema written to the cleaned
//! objects and read by the query engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A ranked tag attached to a document by the search API. Rank 1 is the
/// most salient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyword {
    pub name: Option<Value>,
    pub value: Option<Value>,
    pub rank: Option<Value>,
}

impl Keyword {
    /// `true` when `rank` is the integer 1.
    #[must_use]
    pub fn is_top_ranked(&self) -> bool {
        self.rank.as_ref().and_then(Value::as_i64) == Some(1)
    }

    #[must_use]
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }

    #[must_use]
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(Value::as_str)
    }
}

/// Which required field a document lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingField {
    Headline,
    PubDate { headline: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArticleRecord {
    pub headline: String,
    pub pub_date: String,
    pub section_name: Option<Value>,
    pub subsection_name: Option<Value>,
    pub type_of_material: Option<Value>,
    pub document_type: Option<Value>,
    pub web_url: Option<Value>,
    pub keywords: Vec<Keyword>,
}

impl RawArticleRecord {
    /// Reads a parsed document.
    ///
    /// `headline.main` and `pub_date` must be present, non-null, and not the
    /// empty string; a non-string value is kept as its JSON text. Optional
    /// fields are taken as-is. A `keywords` value that is not an array, and
    /// entries in it that are not objects, are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first [`MissingField`] found.
    pub fn from_document(doc: &Value) -> Result<Self, MissingField> {
        let headline = required_text(doc.pointer("/headline/main")).ok_or(MissingField::Headline)?;
        let Some(pub_date) = required_text(doc.get("pub_date")) else {
            return Err(MissingField::PubDate { headline });
        };

        Ok(Self {
            headline,
            pub_date,
            section_name: optional(doc, "section_name"),
            subsection_name: optional(doc, "subsection_name"),
            type_of_material: optional(doc, "type_of_material"),
            document_type: optional(doc, "document_type"),
            web_url: optional(doc, "web_url"),
            keywords: keywords(doc),
        })
    }
}

/// One line of a cleaned object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedArticleRecord {
    pub pub_date: String,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_material: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_keyword_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_keyword_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trump_person_keyword_rank: Option<Value>,
}

fn required_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn optional(doc: &Value, field: &str) -> Option<Value> {
    doc.get(field).filter(|v| !v.is_null()).cloned()
}

fn keywords(doc: &Value) -> Vec<Keyword> {
    let Some(entries) = doc.get("keywords").and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|entry| entry.is_object())
        .map(|entry| Keyword {
            name: optional(entry, "name"),
            value: optional(entry, "value"),
            rank: optional(entry, "rank"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_required_fields_and_ignores_unmodelled_ones() {
        let raw = RawArticleRecord::from_document(&json!({
            "headline": { "main": "Title", "print_headline": "Print" },
            "pub_date": "2021-03-01T10:00:00+0000",
            "multimedia": [{ "url": "a.jpg" }],
            "word_count": 812
        }))
        .unwrap();
        assert_eq!(raw.headline, "Title");
        assert_eq!(raw.pub_date, "2021-03-01T10:00:00+0000");
        assert!(raw.keywords.is_empty());
    }

    #[test]
    fn null_fields_read_as_absent() {
        let raw = RawArticleRecord::from_document(&json!({
            "headline": { "main": "Title" },
            "pub_date": "2021-03-01",
            "subsection_name": null,
            "keywords": null
        }))
        .unwrap();
        assert!(raw.subsection_name.is_none());
        assert!(raw.keywords.is_empty());
    }

    #[test]
    fn optional_fields_keep_any_json_type() {
        let raw = RawArticleRecord::from_document(&json!({
            "headline": { "main": "Title" },
            "pub_date": "2021-03-01",
            "section_name": 42,
            "web_url": { "href": "https://example.com" }
        }))
        .unwrap();
        assert_eq!(raw.section_name, Some(json!(42)));
        assert_eq!(raw.web_url, Some(json!({ "href": "https://example.com" })));
    }

    #[test]
    fn oddly_shaped_keywords_are_kept_or_skipped_without_failing() {
        let raw = RawArticleRecord::from_document(&json!({
            "headline": { "main": "Title" },
            "pub_date": "2021-03-01",
            "keywords": [
                "loose string",
                { "name": "subject", "value": { "x": 1 }, "rank": "1" },
                7
            ]
        }))
        .unwrap();
        assert_eq!(raw.keywords.len(), 1);
        assert_eq!(raw.keywords[0].value, Some(json!({ "x": 1 })));
        assert!(!raw.keywords[0].is_top_ranked());
    }

    #[test]
    fn keywords_that_are_not_an_array_are_ignored() {
        let raw = RawArticleRecord::from_document(&json!({
            "headline": { "main": "Title" },
            "pub_date": "2021-03-01",
            "keywords": { "name": "subject" }
        }))
        .unwrap();
        assert!(raw.keywords.is_empty());
    }

    #[test]
    fn non_string_required_fields_are_kept_as_json_text() {
        let raw = RawArticleRecord::from_document(&json!({
            "headline": { "main": 2024 },
            "pub_date": 20_210_301
        }))
        .unwrap();
        assert_eq!(raw.headline, "2024");
        assert_eq!(raw.pub_date, "20210301");
    }

    #[test]
    fn reports_first_missing_field() {
        assert_eq!(
            RawArticleRecord::from_document(&json!({ "pub_date": "2021-03-01" })),
            Err(MissingField::Headline)
        );
        assert_eq!(
            RawArticleRecord::from_document(&json!({ "headline": { "main": "T" }, "pub_date": null })),
            Err(MissingField::PubDate {
                headline: "T".into()
            })
        );
        assert_eq!(
            RawArticleRecord::from_document(&json!([1, 2, 3])),
            Err(MissingField::Headline)
        );
    }

    #[test]
    fn cleaned_record_omits_absent_optionals() {
        let cleaned = CleanedArticleRecord {
            pub_date: "2021-03-01".into(),
            headline: "Title".into(),
            section_name: None,
            subsection_name: None,
            type_of_material: None,
            document_type: None,
            web_url: None,
            top_keyword_type: None,
            top_keyword_value: None,
            trump_person_keyword_rank: None,
        };
        assert_eq!(
            serde_json::to_value(&cleaned).unwrap(),
            json!({ "pub_date": "2021-03-01", "headline": "Title" })
        );
    }
}
