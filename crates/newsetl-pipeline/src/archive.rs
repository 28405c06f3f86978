//! Raw archive writer for a harvested day.

use newsetl_core::{raw_day_key, raw_page_key, ArchiveLayout};
use newsetl_search::DayHarvest;
use newsetl_storage::ObjectStore;
use serde_json::Value;

use crate::error::PipelineError;
use crate::LINE_TERMINATOR;

/// Objects written for one harvest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveReceipt {
    /// Keys written, in write order.
    pub keys: Vec<String>,
    pub document_count: usize,
    pub bytes_written: usize,
}

/// Writes a harvest to `bucket` under `raw_prefix`.
///
/// With [`ArchiveLayout::Daily`] the whole day becomes one object at
/// `<raw_prefix>YYYY/MM/DD.json`, written even when the harvest is empty so
/// the day is marked as processed. With [`ArchiveLayout::PerPage`] each
/// fetched page becomes its own object keyed by date and offset, and an
/// empty harvest writes nothing.
///
/// Existing objects are replaced.
///
/// # Errors
///
/// Returns [`PipelineError::Storage`] if a write fails. Objects written
/// before the failure are left in place.
pub async fn archive_harvest(
    store: &dyn ObjectStore,
    bucket: &str,
    raw_prefix: &str,
    layout: ArchiveLayout,
    harvest: &DayHarvest,
) -> Result<ArchiveReceipt, PipelineError> {
    let mut receipt = ArchiveReceipt::default();

    match layout {
        ArchiveLayout::Daily => {
            let key = raw_day_key(raw_prefix, harvest.day);
            let body = json_lines(harvest.documents())?;
            write(store, bucket, key, body, harvest.document_count(), &mut receipt).await?;
        }
        ArchiveLayout::PerPage => {
            for page in &harvest.pages {
                let key = raw_page_key(raw_prefix, harvest.day, page.offset);
                let body = json_lines(page.docs.iter())?;
                write(store, bucket, key, body, page.docs.len(), &mut receipt).await?;
            }
        }
    }

    Ok(receipt)
}

async fn write(
    store: &dyn ObjectStore,
    bucket: &str,
    key: String,
    body: String,
    document_count: usize,
    receipt: &mut ArchiveReceipt,
) -> Result<(), PipelineError> {
    let size = body.len();
    store.put_object(bucket, &key, body.into_bytes()).await?;
    tracing::info!(bucket, key = %key, size, document_count, "archived raw articles");

    receipt.keys.push(key);
    receipt.document_count += document_count;
    receipt.bytes_written += size;
    Ok(())
}

fn json_lines<'a>(docs: impl Iterator<Item = &'a Value>) -> Result<String, PipelineError> {
    let mut body = String::new();
    for doc in docs {
        let line = serde_json::to_string(doc).map_err(|e| PipelineError::Serialize {
            context: "raw article".to_string(),
            source: e,
        })?;
        body.push_str(&line);
        body.push_str(LINE_TERMINATOR);
    }
    Ok(body)
}
