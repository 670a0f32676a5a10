use super::{PublishError, PublishResult, ReportPublisher};
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

/// Publishes reports into a single S3 bucket
#[derive(Clone)]
pub struct S3Publisher {
    client: S3Client,
    bucket: String,
}

impl S3Publisher {
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a publisher for an optional bucket, failing when none is configured
    pub fn for_bucket(client: S3Client, bucket: Option<&str>) -> PublishResult<Self> {
        match bucket {
            Some(bucket) if !bucket.trim().is_empty() => Ok(Self::new(client, bucket)),
            _ => Err(PublishError::MissingDestination),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ReportPublisher for S3Publisher {
    async fn put(&self, key: &str, body: Vec<u8>) -> PublishResult<()> {
        debug!("Uploading {} bytes to s3://{}/{}", body.len(), self.bucket, key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("text/csv")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| PublishError::Rejected(DisplayErrorContext(&err).to_string()))?;

        Ok(())
    }

    fn destination(&self) -> String {
        format!("s3://{}", self.bucket)
    }
}
