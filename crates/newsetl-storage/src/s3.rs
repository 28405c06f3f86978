//! S3-backed [`ObjectStore`].

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::error::StorageError;
use crate::ObjectStore;

/// Connection settings for the S3 client.
#[derive(Debug, Clone, Default)]
pub struct S3Config {
    /// AWS region; falls back to the default provider chain when unset.
    pub region: Option<String>,
    /// Custom endpoint URL (for LocalStack). Enables path-style addressing.
    pub endpoint: Option<String>,
}

impl S3Config {
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

/// Creates an S3 client from configuration and the ambient AWS credentials.
pub async fn create_s3_client(config: &S3Config) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let shared = loader.load().await;
    let builder = aws_sdk_s3::config::Builder::from(&shared);
    let s3_config = if config.endpoint.is_some() {
        builder.force_path_style(true).build()
    } else {
        builder.build()
    };

    Client::from_conf(s3_config)
}

/// [`ObjectStore`] over an `aws_sdk_s3::Client`.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from `config` and wraps it.
    pub async fn connect(config: &S3Config) -> Self {
        Self::new(create_s3_client(config).await)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        tracing::debug!(bucket, key, "getting object");

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    StorageError::NotFound {
                        bucket: bucket.to_owned(),
                        key: key.to_owned(),
                    }
                } else {
                    StorageError::Backend {
                        operation: "get_object",
                        bucket: bucket.to_owned(),
                        key: key.to_owned(),
                        message: DisplayErrorContext(&e).to_string(),
                    }
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Backend {
                operation: "get_object",
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                message: format!("failed to read body: {e}"),
            })?;

        Ok(bytes.to_vec())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| StorageError::Backend {
                operation: "put_object",
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::debug!(bucket, key, size, "put object");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_config_builder() {
        let config = S3Config::default()
            .with_region("us-east-1")
            .with_endpoint("http://localhost:4566");

        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn s3_config_default_uses_provider_chain() {
        let config = S3Config::default();
        assert!(config.region.is_none());
        assert!(config.endpoint.is_none());
    }
}
