use super::{PublishResult, ReportPublisher};
use async_trait::async_trait;
use std::path::PathBuf;

/// Writes reports to a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalPublisher {
    root: PathBuf,
}

impl LocalPublisher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ReportPublisher for LocalPublisher {
    async fn put(&self, key: &str, body: Vec<u8>) -> PublishResult<()> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, body).await?;
        Ok(())
    }

    fn destination(&self) -> String {
        self.root.display().to_string()
    }
}
