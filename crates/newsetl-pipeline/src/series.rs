//! The dashboard's per-day article count series.
//!
//! The series lives in a single JSON document shaped
//! `{"chartData": [["YYYY-MM-DD", count], ...]}`, kept sorted by date with at
//! most one entry per date. Zero-padded ISO dates sort lexicographically in
//! chronological order, so string comparison is enough.
//!
//! Updates are an unguarded read-modify-write of the whole document. Two
//! transforms running at the same time can both read the old series and the
//! later write silently drops the earlier one's entry. Closing that gap
//! would need a conditional put keyed on the object's ETag, or routing every
//! update through a single writer.

use newsetl_storage::ObjectStore;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    #[serde(rename = "chartData", default)]
    pub chart_data: Vec<(String, u64)>,
}

/// What [`upsert_entry`] did to the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesChange {
    /// An entry for the date existed and held `previous`.
    Overwritten { previous: u64 },
    /// Inserted before the first later date, at `index`.
    Inserted { index: usize },
    /// No later date existed.
    Appended,
}

/// Sets `date` to `count`, keeping the series sorted and unique by date.
pub fn upsert_entry(series: &mut ChartSeries, date: &str, count: u64) -> SeriesChange {
    for (index, entry) in series.chart_data.iter_mut().enumerate() {
        match entry.0.as_str().cmp(date) {
            std::cmp::Ordering::Equal => {
                let previous = entry.1;
                entry.1 = count;
                return SeriesChange::Overwritten { previous };
            }
            std::cmp::Ordering::Greater => {
                series.chart_data.insert(index, (date.to_owned(), count));
                return SeriesChange::Inserted { index };
            }
            std::cmp::Ordering::Less => {}
        }
    }
    series.chart_data.push((date.to_owned(), count));
    SeriesChange::Appended
}

/// Reads the series at `bucket`/`key`, upserts `(date, count)`, and writes
/// the whole document back.
///
/// A missing document is treated as an empty series.
///
/// # Errors
///
/// Returns [`PipelineError::CorruptChartData`] if the existing document is
/// not a valid series, and [`PipelineError::Storage`] on any other read or
/// write failure.
pub async fn update_chart_series(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    date: &str,
    count: u64,
) -> Result<SeriesChange, PipelineError> {
    let mut series = match store.get_object(bucket, key).await {
        Ok(bytes) => serde_json::from_slice::<ChartSeries>(&bytes).map_err(|e| {
            PipelineError::CorruptChartData {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                source: e,
            }
        })?,
        Err(e) if e.is_not_found() => {
            tracing::info!(bucket, key, "no chart data yet; starting an empty series");
            ChartSeries::default()
        }
        Err(e) => return Err(e.into()),
    };

    let change = upsert_entry(&mut series, date, count);
    match change {
        SeriesChange::Overwritten { previous } => {
            tracing::info!(date, count, previous, "overwrote chart entry");
        }
        SeriesChange::Inserted { index } => {
            tracing::info!(date, count, index, "inserted chart entry");
        }
        SeriesChange::Appended => {
            tracing::info!(date, count, "appended chart entry");
        }
    }

    let body = serde_json::to_vec(&series).map_err(|e| PipelineError::Serialize {
        context: format!("chart series s3://{bucket}/{key}"),
        source: e,
    })?;
    store.put_object(bucket, key, body).await?;

    Ok(change)
}
