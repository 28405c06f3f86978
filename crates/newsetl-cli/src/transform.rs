//! `newsetl transform`: clean the raw objects named in a notification.

use newsetl_core::{AppConfig, InvocationOutcome, StorageNotification, TransformSummary};
use newsetl_pipeline::{transform_notification, ChartTarget, TransformSettings};
use newsetl_storage::ObjectStore;

const STATUS_OK: u16 = 200;

pub(crate) fn settings(config: &AppConfig) -> TransformSettings {
    TransformSettings {
        bucket: config.s3_bucket.clone(),
        raw_prefix: config.raw_data_prefix.clone(),
        cleaned_prefix: config.cleaned_data_prefix.clone(),
        chart: config.chart_data_key.as_ref().map(|key| ChartTarget {
            bucket: config.chart_data_bucket.clone(),
            key: key.clone(),
        }),
    }
}

pub(crate) async fn run(
    config: &AppConfig,
    store: &dyn ObjectStore,
    notification: &StorageNotification,
) -> anyhow::Result<InvocationOutcome<TransformSummary>> {
    tracing::info!(
        records = notification.records.len(),
        "received storage notification"
    );
    let summary = transform_notification(store, &settings(config), notification).await?;
    Ok(InvocationOutcome {
        status_code: STATUS_OK,
        body: summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::test_config;

    fn config(chart_data_key: Option<&str>) -> AppConfig {
        AppConfig {
            chart_data_key: chart_data_key.map(str::to_owned),
            ..test_config()
        }
    }

    #[test]
    fn settings_without_chart_key_skip_series() {
        let s = settings(&config(None));
        assert_eq!(s.bucket, "news-data");
        assert_eq!(s.raw_prefix, "json-raw/");
        assert_eq!(s.cleaned_prefix, "json-clean/");
        assert!(s.chart.is_none());
    }

    #[test]
    fn settings_with_chart_key_target_chart_bucket() {
        let s = settings(&config(Some("chart/data.json")));
        assert_eq!(
            s.chart,
            Some(ChartTarget {
                bucket: "news-dashboard".into(),
                key: "chart/data.json".into(),
            })
        );
    }
}
