//! Shared configuration, trigger events, and storage key conventions for the
//! `newsetl` article pipeline.

pub mod app_config;
pub mod config;
pub mod events;
pub mod keys;

use thiserror::Error;

pub use app_config::{AppConfig, ArchiveLayout, Environment, LogFormat};
pub use config::{load_app_config, load_app_config_from_env};
pub use events::{
    FetchSummary, InvocationOutcome, NotificationRecord, ScheduledEvent, StorageNotification,
    TransformSummary, OBJECT_CREATED_PUT,
};
pub use keys::{chart_date_from_key, cleaned_key, raw_day_key, raw_page_key};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("invalid event time \"{value}\": {source}")]
    InvalidTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("event time {0} has no previous day")]
    OutOfRange(String),
}
