#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Environment {
    /// Log format used when none is configured: readable output while
    /// developing, JSON lines everywhere else.
    #[must_use]
    pub fn default_log_format(self) -> LogFormat {
        match self {
            Environment::Development => LogFormat::Pretty,
            Environment::Test | Environment::Production => LogFormat::Json,
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line; the default outside development.
    Json,
    /// Human-readable output; the default in development.
    Pretty,
}

/// How a day's harvested pages are laid out in object storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveLayout {
    /// One object per day at `<raw prefix>YYYY/MM/DD.json`.
    Daily,
    /// One object per fetched page at `<raw prefix>YYYYMMDD-<offset>.json`.
    PerPage,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub log_format: LogFormat,
    pub search_api_key: String,
    pub search_base_url: String,
    pub search_query: String,
    pub search_request_timeout_secs: u64,
    pub search_user_agent: String,
    pub search_page_delay_ms: u64,
    pub search_max_pages: u32,
    pub s3_bucket: String,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub raw_data_prefix: String,
    pub cleaned_data_prefix: String,
    pub archive_layout: ArchiveLayout,
    pub chart_data_bucket: String,
    pub chart_data_key: Option<String>,
    pub fetch_schedule: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("search_api_key", &"[redacted]")
            .field("search_base_url", &self.search_base_url)
            .field("search_query", &self.search_query)
            .field(
                "search_request_timeout_secs",
                &self.search_request_timeout_secs,
            )
            .field("search_user_agent", &self.search_user_agent)
            .field("search_page_delay_ms", &self.search_page_delay_ms)
            .field("search_max_pages", &self.search_max_pages)
            .field("s3_bucket", &self.s3_bucket)
            .field("s3_region", &self.s3_region)
            .field("s3_endpoint", &self.s3_endpoint)
            .field("raw_data_prefix", &self.raw_data_prefix)
            .field("cleaned_data_prefix", &self.cleaned_data_prefix)
            .field("archive_layout", &self.archive_layout)
            .field("chart_data_bucket", &self.chart_data_bucket)
            .field("chart_data_key", &self.chart_data_key)
            .field("fetch_schedule", &self.fetch_schedule)
            .finish()
    }
}
