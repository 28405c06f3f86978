//! HTTP client for the article search REST API.
//!
//! Wraps `reqwest` with API key management, day-scoped query construction,
//! and typed page deserialization. Non-2xx statuses are surfaced as
//! [`PageOutcome::Rejected`] rather than errors: the caller decides that a
//! rejected page simply ends pagination.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};

use crate::error::SearchError;
use crate::types::{SearchEnvelope, SearchPage};

/// Result of requesting one page.
#[derive(Debug)]
pub enum PageOutcome {
    /// 2xx response with a decoded page.
    Page(SearchPage),
    /// Non-2xx response; pagination should stop.
    Rejected { status: u16 },
}

/// Client for the article search API.
///
/// Manages the HTTP client, API key, fixed search term, and endpoint URL. The
/// endpoint is always supplied by the caller, so tests can point it at a mock
/// server.
pub struct ArticleSearchClient {
    client: Client,
    api_key: String,
    query: String,
    base_url: Url,
}

impl ArticleSearchClient {
    /// Creates a client for the search endpoint at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        query: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| SearchError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            query: query.to_owned(),
            base_url,
        })
    }

    /// The fixed search term every request carries.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Requests one page of results for a single calendar day.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network failure.
    /// - [`SearchError::Deserialize`] if a 2xx body does not match the
    ///   expected envelope.
    pub async fn fetch_page(&self, day: NaiveDate, page: u32) -> Result<PageOutcome, SearchError> {
        let url = self.build_url(day, page);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(PageOutcome::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let envelope: SearchEnvelope =
            serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
                context: format!("search page (day={day}, page={page})"),
                source: e,
            })?;

        Ok(PageOutcome::Page(SearchPage {
            page,
            total_hits: envelope.response.meta.hits,
            offset: envelope.response.meta.offset,
            docs: envelope.response.docs,
        }))
    }

    /// Builds the request URL for one page of a single-day query, with all
    /// query parameters percent-encoded via [`Url::query_pairs_mut`].
    fn build_url(&self, day: NaiveDate, page: u32) -> Url {
        let date = day.format("%Y%m%d").to_string();
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("begin_date", &date)
            .append_pair("end_date", &date)
            .append_pair("facet", "true")
            .append_pair("facet_fields", "section_name")
            .append_pair("page", &page.to_string())
            .append_pair("q", &self.query)
            .append_pair("api-key", &self.api_key);
        url
    }
}
