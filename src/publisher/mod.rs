//! Report publishing
//!
//! A publisher takes the finished report bytes and stores them under a key.
//! Failures are surfaced as-is; nothing is retried here.

use async_trait::async_trait;
use thiserror::Error;

pub mod local;
pub mod memory;
pub mod s3;

pub use local::LocalPublisher;
pub use memory::MemoryPublisher;
pub use s3::S3Publisher;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Object store rejected the upload: {0}")]
    Rejected(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No destination bucket configured")]
    MissingDestination,
}

pub type PublishResult<T> = Result<T, PublishError>;

#[async_trait]
pub trait ReportPublisher: Send + Sync {
    /// Store `body` under `key`
    async fn put(&self, key: &str, body: Vec<u8>) -> PublishResult<()>;

    /// Human readable destination, used in log lines
    fn destination(&self) -> String;
}
