//! Day-scoped paginated harvest for `ArticleSearchClient`.

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::Value;

use crate::client::{ArticleSearchClient, PageOutcome};
use crate::error::SearchError;
use crate::types::SearchPage;

/// Status reported when every requested page succeeded.
pub const STATUS_OK: u16 = 200;

/// Pacing and bounds for [`ArticleSearchClient::fetch_day`].
#[derive(Debug, Clone, Copy)]
pub struct HarvestOptions {
    /// Wait between successive page requests, applied only when continuing.
    pub page_delay: Duration,
    /// Hard ceiling on pages requested for one day.
    pub max_pages: u32,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_secs(6),
            max_pages: 100,
        }
    }
}

/// Everything collected for one day.
#[derive(Debug, Clone)]
pub struct DayHarvest {
    pub day: NaiveDate,
    /// Status of the last page request: 200 unless a page was rejected.
    pub status: u16,
    /// `totalHits` from the last successful page, `None` if none succeeded.
    pub total_hits: Option<u64>,
    /// Successful pages, in request order.
    pub pages: Vec<SearchPage>,
}

impl DayHarvest {
    /// All documents across all pages, in page order.
    pub fn documents(&self) -> impl Iterator<Item = &Value> {
        self.pages.iter().flat_map(|p| p.docs.iter())
    }

    #[must_use]
    pub fn document_count(&self) -> usize {
        self.pages.iter().map(|p| p.docs.len()).sum()
    }
}

impl ArticleSearchClient {
    /// Fetches every page of results for `day`, starting at page 0.
    ///
    /// Pagination continues while `offset + page_len < total_hits`, sleeping
    /// `options.page_delay` before each follow-up request. A non-2xx status
    /// ends pagination immediately and becomes the harvest status; pages
    /// collected before it are kept. Reaching `options.max_pages` also ends
    /// pagination, with a warning.
    ///
    /// # Errors
    ///
    /// Propagates transport and body-decoding failures from
    /// [`Self::fetch_page`]; these abort the harvest.
    pub async fn fetch_day(
        &self,
        day: NaiveDate,
        options: HarvestOptions,
    ) -> Result<DayHarvest, SearchError> {
        let date = day.format("%Y%m%d").to_string();
        let mut harvest = DayHarvest {
            day,
            status: STATUS_OK,
            total_hits: None,
            pages: Vec::new(),
        };
        let mut page_num = 0u32;

        loop {
            match self.fetch_page(day, page_num).await? {
                PageOutcome::Rejected { status } => {
                    tracing::warn!(
                        date = %date,
                        page = page_num,
                        error_code = status,
                        "search page rejected; ending pagination"
                    );
                    harvest.status = status;
                    break;
                }
                PageOutcome::Page(page) => {
                    tracing::info!(
                        date = %date,
                        page = page_num,
                        offset = page.offset,
                        total_hits = page.total_hits,
                        headlines = ?page.headlines(),
                        "fetched search page"
                    );

                    let has_more = page.has_more();
                    harvest.total_hits = Some(page.total_hits);
                    harvest.pages.push(page);
                    page_num += 1;

                    if !has_more {
                        break;
                    }
                    if page_num >= options.max_pages {
                        tracing::warn!(
                            date = %date,
                            max_pages = options.max_pages,
                            collected = harvest.document_count(),
                            "page limit reached with results outstanding; ending pagination"
                        );
                        break;
                    }
                    if !options.page_delay.is_zero() {
                        tokio::time::sleep(options.page_delay).await;
                    }
                }
            }
        }

        Ok(harvest)
    }
}
