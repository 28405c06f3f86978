use newsetl_storage::StorageError;
use thiserror::Error;

/// Invocation-level failures. Anything returned here aborts the invocation;
/// per-record and per-notification problems are logged and skipped instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON serialization error for {context}: {source}")]
    Serialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("chart data at s3://{bucket}/{key} is not a valid series: {source}")]
    CorruptChartData {
        bucket: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
