use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("{operation} failed for s3://{bucket}/{key}: {message}")]
    Backend {
        operation: &'static str,
        bucket: String,
        key: String,
        message: String,
    },

    #[error("object s3://{bucket}/{key} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        bucket: String,
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl StorageError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
