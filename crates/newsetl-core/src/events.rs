//! Inbound trigger payloads and the outcome reported back to the invoker.
//!
//! Two triggers drive the pipeline: a scheduled timer event carrying the
//! current time (the fetch path), and a storage notification listing newly
//! created objects (the transform path). Both are delivered as JSON by the
//! surrounding infrastructure.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::EventError;

/// The only notification event name the transform path acts on.
pub const OBJECT_CREATED_PUT: &str = "ObjectCreated:Put";

const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Timer event for the daily fetch. `time` is interpreted as "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub time: String,
}

impl ScheduledEvent {
    #[must_use]
    pub fn at(time: NaiveDateTime) -> Self {
        Self {
            time: time.format(EVENT_TIME_FORMAT).to_string(),
        }
    }

    /// The calendar day to harvest: the event time minus 24 hours.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidTime`] if `time` is not in
    /// `%Y-%m-%dT%H:%M:%SZ` form.
    pub fn target_day(&self) -> Result<NaiveDate, EventError> {
        let now = NaiveDateTime::parse_from_str(&self.time, EVENT_TIME_FORMAT).map_err(|e| {
            EventError::InvalidTime {
                value: self.time.clone(),
                source: e,
            }
        })?;
        now.checked_sub_signed(Duration::hours(24))
            .map(|t| t.date())
            .ok_or_else(|| EventError::OutOfRange(self.time.clone()))
    }
}

/// A batch of storage notifications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageNotification {
    #[serde(rename = "Records", default)]
    pub records: Vec<NotificationRecord>,
}

impl StorageNotification {
    /// Builds a single-record creation notification, used when the transform
    /// is driven in-process instead of by the storage service.
    #[must_use]
    pub fn object_created(bucket: &str, key: &str) -> Self {
        Self {
            records: vec![NotificationRecord {
                event_name: Some(OBJECT_CREATED_PUT.to_string()),
                s3: Some(S3Entity {
                    bucket: Some(BucketRef {
                        name: bucket.to_string(),
                    }),
                    object: Some(ObjectRef {
                        key: key.to_string(),
                    }),
                }),
            }],
        }
    }
}

/// One entry of a [`StorageNotification`]. Every field is optional so that a
/// malformed entry can be skipped instead of failing the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    #[serde(rename = "eventName", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Entity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Entity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<BucketRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

impl NotificationRecord {
    #[must_use]
    pub fn bucket_name(&self) -> Option<&str> {
        self.s3
            .as_ref()?
            .bucket
            .as_ref()
            .map(|b| b.name.as_str())
    }

    #[must_use]
    pub fn object_key(&self) -> Option<&str> {
        self.s3.as_ref()?.object.as_ref().map(|o| o.key.as_str())
    }
}

/// Structured result of one invocation: an HTTP-like status code plus a
/// small JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationOutcome<B> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: B,
}

/// Body of the fetch outcome. `total_hits` is `None` when no page succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSummary {
    #[serde(rename = "totalHits")]
    pub total_hits: Option<u64>,
}

/// Body of the transform outcome.
///
/// `object_count` counts every notification record received, including the
/// ones that were skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSummary {
    #[serde(rename = "objectCount")]
    pub object_count: usize,
    #[serde(rename = "articleCount")]
    pub article_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_day_is_previous_calendar_day() {
        let event = ScheduledEvent {
            time: "2021-03-02T06:00:00Z".to_string(),
        };
        assert_eq!(
            event.target_day().unwrap(),
            NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()
        );
    }

    #[test]
    fn target_day_crosses_year_boundary() {
        let event = ScheduledEvent {
            time: "2021-01-01T00:00:00Z".to_string(),
        };
        assert_eq!(
            event.target_day().unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 31).unwrap()
        );
    }

    #[test]
    fn target_day_rejects_other_formats() {
        let event = ScheduledEvent {
            time: "2021-03-02 06:00:00".to_string(),
        };
        assert!(matches!(
            event.target_day(),
            Err(EventError::InvalidTime { .. })
        ));
    }

    #[test]
    fn scheduled_event_at_round_trips_through_target_day() {
        let now = NaiveDate::from_ymd_opt(2024, 7, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let event = ScheduledEvent::at(now);
        assert_eq!(event.time, "2024-07-15T12:30:00Z");
        assert_eq!(
            event.target_day().unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 14).unwrap()
        );
    }

    #[test]
    fn notification_parses_storage_service_shape() {
        let raw = serde_json::json!({
            "Records": [{
                "eventVersion": "2.1",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": "news-archive", "arn": "arn:aws:s3:::news-archive" },
                    "object": { "key": "json-raw/2021/03/01.json", "size": 1024 }
                }
            }]
        });
        let notification: StorageNotification = serde_json::from_value(raw).unwrap();
        assert_eq!(notification.records.len(), 1);
        let record = &notification.records[0];
        assert_eq!(record.event_name.as_deref(), Some(OBJECT_CREATED_PUT));
        assert_eq!(record.bucket_name(), Some("news-archive"));
        assert_eq!(record.object_key(), Some("json-raw/2021/03/01.json"));
    }

    #[test]
    fn notification_tolerates_missing_location() {
        let raw = serde_json::json!({
            "Records": [{ "eventName": "ObjectRemoved:Delete" }, { "s3": { "bucket": { "name": "b" } } }]
        });
        let notification: StorageNotification = serde_json::from_value(raw).unwrap();
        assert!(notification.records[0].bucket_name().is_none());
        assert_eq!(notification.records[1].bucket_name(), Some("b"));
        assert!(notification.records[1].object_key().is_none());
    }

    #[test]
    fn object_created_builds_single_put_record() {
        let n = StorageNotification::object_created("bucket", "json-raw/2021/03/01.json");
        assert_eq!(n.records.len(), 1);
        assert_eq!(n.records[0].event_name.as_deref(), Some(OBJECT_CREATED_PUT));
        assert_eq!(n.records[0].object_key(), Some("json-raw/2021/03/01.json"));
    }

    #[test]
    fn outcome_serializes_with_invoker_field_names() {
        let outcome = InvocationOutcome {
            status_code: 200,
            body: TransformSummary {
                object_count: 2,
                article_count: 17,
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "statusCode": 200, "body": { "objectCount": 2, "articleCount": 17 } })
        );
    }

    #[test]
    fn fetch_summary_without_hits_is_null() {
        let json = serde_json::to_value(FetchSummary { total_hits: None }).unwrap();
        assert_eq!(json, serde_json::json!({ "totalHits": null }));
    }
}
