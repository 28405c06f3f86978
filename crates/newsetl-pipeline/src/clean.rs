//! Projection of raw search documents into the cleaned schema.

use crate::article::{CleanedArticleRecord, RawArticleRecord};
use crate::error::PipelineError;
use crate::LINE_TERMINATOR;

const TRACKED_PERSON_NAME: &str = "persons";
const TRACKED_PERSON_VALUE: &str = "Trump, Donald J";

/// Reduces a validated raw record to the cleaned schema.
///
/// Keywords are scanned in order. An entry whose rank is the integer 1 sets
/// the top keyword, and a later such entry replaces an earlier one. The
/// tracked-person match is checked independently of rank, so one entry may
/// set both. Keyword and pass-through values are copied as the API sent them.
#[must_use]
pub fn clean_article(raw: &RawArticleRecord) -> CleanedArticleRecord {
    let mut cleaned = CleanedArticleRecord {
        pub_date: raw.pub_date.clone(),
        headline: raw.headline.clone(),
        section_name: raw.section_name.clone(),
        subsection_name: raw.subsection_name.clone(),
        type_of_material: raw.type_of_material.clone(),
        document_type: raw.document_type.clone(),
        web_url: raw.web_url.clone(),
        top_keyword_type: None,
        top_keyword_value: None,
        trump_person_keyword_rank: None,
    };

    for keyword in &raw.keywords {
        if keyword.is_top_ranked() {
            cleaned.top_keyword_type.clone_from(&keyword.name);
            cleaned.top_keyword_value.clone_from(&keyword.value);
        }
        if keyword.name_str() == Some(TRACKED_PERSON_NAME)
            && keyword.value_str() == Some(TRACKED_PERSON_VALUE)
        {
            cleaned.trump_person_keyword_rank.clone_from(&keyword.rank);
        }
    }

    cleaned
}

/// Serializes a cleaned record as one CRLF-terminated JSON line.
///
/// # Errors
///
/// Returns [`PipelineError::Serialize`] if serialization fails.
pub fn to_json_line(record: &CleanedArticleRecord) -> Result<String, PipelineError> {
    let mut line = serde_json::to_string(record).map_err(|e| PipelineError::Serialize {
        context: format!("cleaned article \"{}\"", record.headline),
        source: e,
    })?;
    line.push_str(LINE_TERMINATOR);
    Ok(line)
}
