//! `newsetl fetch`: harvest one day and write the raw archive.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use newsetl_core::{AppConfig, FetchSummary, InvocationOutcome, ScheduledEvent};
use newsetl_pipeline::{archive_harvest, ArchiveReceipt};
use newsetl_search::{ArticleSearchClient, HarvestOptions};
use newsetl_storage::ObjectStore;

use crate::event_input::read_event;

/// Where the harvested day comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TargetDay {
    /// A scheduled event payload on disk or stdin.
    Event(PathBuf),
    /// An event time given inline.
    Time(String),
    /// An explicit day, bypassing the 24-hour look-back.
    Day(NaiveDate),
    /// The current time, as if a scheduled event fired now.
    Now,
}

impl TargetDay {
    pub(crate) fn from_args(
        event: Option<PathBuf>,
        time: Option<String>,
        day: Option<NaiveDate>,
    ) -> Self {
        match (event, time, day) {
            (Some(path), _, _) => Self::Event(path),
            (None, Some(time), _) => Self::Time(time),
            (None, None, Some(day)) => Self::Day(day),
            (None, None, None) => Self::Now,
        }
    }

    pub(crate) async fn resolve(self, now: NaiveDateTime) -> anyhow::Result<NaiveDate> {
        let event = match self {
            Self::Day(day) => return Ok(day),
            Self::Event(path) => read_event::<ScheduledEvent>(&path).await?,
            Self::Time(time) => ScheduledEvent { time },
            Self::Now => ScheduledEvent::at(now),
        };
        Ok(event.target_day()?)
    }
}

pub(crate) struct FetchOutcome {
    pub(crate) invocation: InvocationOutcome<FetchSummary>,
    pub(crate) receipt: ArchiveReceipt,
}

pub(crate) fn harvest_options(config: &AppConfig) -> HarvestOptions {
    HarvestOptions {
        page_delay: Duration::from_millis(config.search_page_delay_ms),
        max_pages: config.search_max_pages,
    }
}

pub(crate) async fn run(
    config: &AppConfig,
    store: &dyn ObjectStore,
    target: TargetDay,
) -> anyhow::Result<FetchOutcome> {
    let day = target.resolve(Utc::now().naive_utc()).await?;
    fetch_and_archive(config, store, day).await
}

/// Harvests `day` and archives whatever was collected, including an empty
/// or partial harvest.
pub(crate) async fn fetch_and_archive(
    config: &AppConfig,
    store: &dyn ObjectStore,
    day: NaiveDate,
) -> anyhow::Result<FetchOutcome> {
    let client = ArticleSearchClient::with_base_url(
        &config.search_api_key,
        &config.search_query,
        config.search_request_timeout_secs,
        &config.search_user_agent,
        &config.search_base_url,
    )?;

    tracing::info!(%day, query = client.query(), "starting daily harvest");
    let harvest = client.fetch_day(day, harvest_options(config)).await?;

    let receipt = archive_harvest(
        store,
        &config.s3_bucket,
        &config.raw_data_prefix,
        config.archive_layout,
        &harvest,
    )
    .await?;

    let invocation = InvocationOutcome {
        status_code: harvest.status,
        body: FetchSummary {
            total_hits: harvest.total_hits,
        },
    };
    tracing::info!(
        %day,
        status_code = invocation.status_code,
        total_hits = ?invocation.body.total_hits,
        documents = receipt.document_count,
        objects = receipt.keys.len(),
        "fetch finished"
    );

    Ok(FetchOutcome {
        invocation,
        receipt,
    })
}
