//! Object storage seam for the pipeline.
//!
//! Components never talk to S3 directly: they receive an [`ObjectStore`]
//! handle constructed at the invocation boundary. [`S3ObjectStore`] is the
//! production backend; [`MemoryObjectStore`] backs tests and dry runs.

pub mod error;
pub mod memory;
pub mod s3;

use async_trait::async_trait;

pub use error::StorageError;
pub use memory::MemoryObjectStore;
pub use s3::{create_s3_client, S3Config, S3ObjectStore};

/// Whole-object get/put keyed by `(bucket, key)`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Reads the full body of an object.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Writes `body` as the full content of an object, replacing any
    /// previous version.
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), StorageError>;

    /// Reads an object and decodes it as UTF-8.
    async fn get_text(&self, bucket: &str, key: &str) -> Result<String, StorageError> {
        let bytes = self.get_object(bucket, key).await?;
        String::from_utf8(bytes).map_err(|e| StorageError::InvalidUtf8 {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            source: e,
        })
    }
}
