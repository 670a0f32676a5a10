use super::{PublishError, PublishResult, ReportPublisher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory publisher for tests, optionally rejecting every upload
#[derive(Default)]
pub struct MemoryPublisher {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    reject_with: Option<String>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            reject_with: Some(message.into()),
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .ok()
            .and_then(|objects| objects.get(key).cloned())
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|objects| objects.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReportPublisher for MemoryPublisher {
    async fn put(&self, key: &str, body: Vec<u8>) -> PublishResult<()> {
        if let Some(message) = &self.reject_with {
            return Err(PublishError::Rejected(message.clone()));
        }
        let mut objects = self
            .objects
            .lock()
            .map_err(|e| PublishError::Rejected(format!("store poisoned: {e}")))?;
        objects.insert(key.to_string(), body);
        Ok(())
    }

    fn destination(&self) -> String {
        "memory".to_string()
    }
}
