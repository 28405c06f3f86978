//! Notification-driven raw-to-cleaned transform.

use newsetl_core::{
    chart_date_from_key, cleaned_key, NotificationRecord, StorageNotification, TransformSummary,
    OBJECT_CREATED_PUT,
};
use newsetl_storage::ObjectStore;

use crate::clean::{clean_article, to_json_line};
use crate::error::PipelineError;
use crate::series::update_chart_series;
use crate::validate::validate_article;

/// Location of the chart series document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTarget {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSettings {
    /// Bucket holding both raw and cleaned objects.
    pub bucket: String,
    pub raw_prefix: String,
    pub cleaned_prefix: String,
    /// Series to update after each object; `None` skips series maintenance.
    pub chart: Option<ChartTarget>,
}

/// A notification record that passed the shape checks.
struct RawObject<'a> {
    key: &'a str,
    cleaned_key: String,
}

/// Transforms every raw object named by `notification`.
///
/// Records that are not `ObjectCreated:Put` events, lack a bucket or key,
/// or point outside `settings.bucket`/`settings.raw_prefix` are logged and
/// skipped. For each remaining object, every line is validated and cleaned,
/// and the cleaned lines are written to the same key under
/// `settings.cleaned_prefix`. The cleaned object is written even when no
/// line survives.
///
/// When `settings.chart` is set, the series entry for each object's date
/// receives the running total of articles cleaned so far in this call, not
/// the object's own count. For a notification naming more than one object
/// the later entries are therefore inflated.
///
/// # Errors
///
/// Storage failures and a corrupt chart document abort the call. Objects
/// already written stay written.
pub async fn transform_notification(
    store: &dyn ObjectStore,
    settings: &TransformSettings,
    notification: &StorageNotification,
) -> Result<TransformSummary, PipelineError> {
    let mut article_count = 0usize;

    for record in &notification.records {
        let Some(object) = accept_record(settings, record) else {
            continue;
        };

        let raw = store.get_text(&settings.bucket, object.key).await?;
        let (body, cleaned_count, line_count) = clean_object(&raw)?;
        let size = body.len();
        store
            .put_object(&settings.bucket, &object.cleaned_key, body.into_bytes())
            .await?;

        article_count += cleaned_count;
        tracing::info!(
            bucket = %settings.bucket,
            raw_key = object.key,
            cleaned_key = %object.cleaned_key,
            lines = line_count,
            article_count = cleaned_count,
            dropped = line_count - cleaned_count,
            size,
            "transformed object"
        );

        if let Some(chart) = &settings.chart {
            let Some(date) = chart_date_from_key(&object.cleaned_key) else {
                tracing::warn!(
                    cleaned_key = %object.cleaned_key,
                    "no YYYY/MM/DD segment in key; chart not updated"
                );
                continue;
            };
            // Known-incorrect for multi-object batches: this is the running
            // total across the notification, not this object's count.
            update_chart_series(store, &chart.bucket, &chart.key, &date, article_count as u64)
                .await?;
        }
    }

    let summary = TransformSummary {
        object_count: notification.records.len(),
        article_count,
    };
    tracing::info!(
        object_count = summary.object_count,
        article_count = summary.article_count,
        "transform finished"
    );
    Ok(summary)
}

fn accept_record<'a>(
    settings: &TransformSettings,
    record: &'a NotificationRecord,
) -> Option<RawObject<'a>> {
    let event_name = record.event_name.as_deref().unwrap_or_default();
    if event_name != OBJECT_CREATED_PUT {
        tracing::warn!(event_name, "skipping notification: not an object creation");
        return None;
    }

    let (Some(bucket), Some(key)) = (record.bucket_name(), record.object_key()) else {
        tracing::warn!("skipping notification: no bucket or object key");
        return None;
    };

    if bucket != settings.bucket {
        tracing::warn!(
            bucket,
            key,
            expected_bucket = %settings.bucket,
            "skipping notification: unexpected bucket"
        );
        return None;
    }

    let Some(cleaned_key) = cleaned_key(key, &settings.raw_prefix, &settings.cleaned_prefix)
    else {
        tracing::warn!(
            bucket,
            key,
            expected_prefix = %settings.raw_prefix,
            "skipping notification: key outside raw prefix"
        );
        return None;
    };

    Some(RawObject { key, cleaned_key })
}

/// Returns the cleaned body, the number of cleaned lines, and the number of
/// non-empty input lines.
fn clean_object(raw: &str) -> Result<(String, usize, usize), PipelineError> {
    let mut body = String::new();
    let mut cleaned = 0usize;
    let mut lines = 0usize;

    for line in raw.lines().filter(|l| !l.trim().is_empty()) {
        lines += 1;
        let Ok(record) = validate_article(line) else {
            continue;
        };
        body.push_str(&to_json_line(&clean_article(&record))?);
        cleaned += 1;
    }

    Ok((body, cleaned, lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsetl_core::events::{BucketRef, ObjectRef, S3Entity};

    fn settings() -> TransformSettings {
        TransformSettings {
            bucket: "news".into(),
            raw_prefix: "json-raw/".into(),
            cleaned_prefix: "json-clean/".into(),
            chart: None,
        }
    }

    fn record(event: Option<&str>, bucket: Option<&str>, key: Option<&str>) -> NotificationRecord {
        NotificationRecord {
            event_name: event.map(str::to_owned),
            s3: Some(S3Entity {
                bucket: bucket.map(|name| BucketRef { name: name.into() }),
                object: key.map(|key| ObjectRef { key: key.into() }),
            }),
        }
    }

    #[test]
    fn accepts_put_in_raw_prefix() {
        let rec = record(
            Some(OBJECT_CREATED_PUT),
            Some("news"),
            Some("json-raw/2021/03/01.json"),
        );
        let obj = accept_record(&settings(), &rec).unwrap();
        assert_eq!(obj.key, "json-raw/2021/03/01.json");
        assert_eq!(obj.cleaned_key, "json-clean/2021/03/01.json");
    }

    #[test]
    fn rejects_other_event_types() {
        let rec = record(
            Some("ObjectCreated:Copy"),
            Some("news"),
            Some("json-raw/2021/03/01.json"),
        );
        assert!(accept_record(&settings(), &rec).is_none());
        let rec = record(None, Some("news"), Some("json-raw/2021/03/01.json"));
        assert!(accept_record(&settings(), &rec).is_none());
    }

    #[test]
    fn rejects_missing_location() {
        let rec = record(Some(OBJECT_CREATED_PUT), None, Some("json-raw/a.json"));
        assert!(accept_record(&settings(), &rec).is_none());
        let rec = record(Some(OBJECT_CREATED_PUT), Some("news"), None);
        assert!(accept_record(&settings(), &rec).is_none());
        let rec = NotificationRecord {
            event_name: Some(OBJECT_CREATED_PUT.into()),
            s3: None,
        };
        assert!(accept_record(&settings(), &rec).is_none());
    }

    #[test]
    fn rejects_wrong_bucket_or_prefix() {
        let rec = record(
            Some(OBJECT_CREATED_PUT),
            Some("other"),
            Some("json-raw/2021/03/01.json"),
        );
        assert!(accept_record(&settings(), &rec).is_none());
        let rec = record(
            Some(OBJECT_CREATED_PUT),
            Some("news"),
            Some("json-clean/2021/03/01.json"),
        );
        assert!(accept_record(&settings(), &rec).is_none());
    }

    #[test]
    fn clean_object_keeps_order_and_drops_invalid_lines() {
        let raw = concat!(
            r#"{"headline":{"main":"one"},"pub_date":"2021-03-01"}"#,
            "\r\n",
            "not json\r\n",
            r#"{"headline":{"main":"two"},"pub_date":"2021-03-01"}"#,
            "\r\n",
            "\r\n",
        );
        let (body, cleaned, lines) = clean_object(raw).unwrap();
        assert_eq!(cleaned, 2);
        assert_eq!(lines, 3);
        let headlines: Vec<String> = body
            .split_terminator("\r\n")
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["headline"].to_string())
            .collect();
        assert_eq!(headlines, vec!["\"one\"", "\"two\""]);
    }

    #[test]
    fn clean_object_of_empty_body_is_empty() {
        assert_eq!(clean_object("").unwrap(), (String::new(), 0, 0));
    }
}
