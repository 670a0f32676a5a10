use super::{AccountDirectory, AccountPage, AccountRecord, ProviderError, ProviderResult};
use async_trait::async_trait;
use std::sync::Mutex;

/// Scripted account directory for tests and local runs
///
/// Page `n` carries the continuation token `page-{n+1}` unless it is the
/// last page. A failure can be injected at any page index.
pub struct MockAccountDirectory {
    pages: Vec<AccountPage>,
    failure: Option<(usize, ProviderError)>,
    requested: Mutex<Vec<Option<String>>>,
}

impl MockAccountDirectory {
    /// Build a directory from record pages, chaining them with tokens
    pub fn with_pages(pages: Vec<Vec<AccountRecord>>) -> Self {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(index, records)| AccountPage {
                records,
                next_token: (index + 1 < count).then(|| format!("page-{}", index + 1)),
            })
            .collect();
        Self::with_raw_pages(pages)
    }

    /// Build a directory from pages whose tokens are taken as given
    pub fn with_raw_pages(pages: Vec<AccountPage>) -> Self {
        Self {
            pages,
            failure: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Fail the request for page `index` with `error`
    pub fn failing_at(mut self, index: usize, error: ProviderError) -> Self {
        self.failure = Some((index, error));
        self
    }

    /// Tokens passed to every `list` call so far, in call order
    pub fn requested_tokens(&self) -> Vec<Option<String>> {
        self.requested
            .lock()
            .map(|requested| requested.clone())
            .unwrap_or_default()
    }

    fn page_index(token: Option<&str>) -> ProviderResult<usize> {
        match token {
            None => Ok(0),
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|index| index.parse().ok())
                .ok_or_else(|| {
                    ProviderError::Service(format!("unknown continuation token: {token}"))
                }),
        }
    }
}

#[async_trait]
impl AccountDirectory for MockAccountDirectory {
    async fn list(&self, next_token: Option<String>) -> ProviderResult<AccountPage> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(next_token.clone());
        }

        let index = Self::page_index(next_token.as_deref())?;

        if let Some((_, error)) = self
            .failure
            .as_ref()
            .filter(|(failing_index, _)| *failing_index == index)
        {
            return Err(error.clone());
        }

        if self.pages.is_empty() && index == 0 {
            return Ok(AccountPage::default());
        }

        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| ProviderError::Service(format!("no page at index {index}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::AccountStatus;
    use chrono::Utc;

    #[tokio::test]
    async fn test_pages_are_chained_with_tokens() {
        let record = AccountRecord::new("a", AccountStatus::Active, Utc::now());
        let directory = MockAccountDirectory::with_pages(vec![vec![record.clone()], vec![record]]);

        let first = directory.list(None).await.unwrap();
        assert_eq!(first.next_token.as_deref(), Some("page-1"));

        let second = directory.list(first.next_token).await.unwrap();
        assert!(second.next_token.is_none());
    }

    #[tokio::test]
    async fn test_unknown_token_is_an_error() {
        let directory = MockAccountDirectory::with_pages(vec![vec![]]);

        let result = directory.list(Some("bogus".to_string())).await;

        assert!(matches!(result, Err(ProviderError::Service(_))));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let directory = MockAccountDirectory::with_pages(vec![vec![]])
            .failing_at(0, ProviderError::AccessDenied("denied".to_string()));

        let result = directory.list(None).await;

        assert_eq!(
            result.unwrap_err(),
            ProviderError::AccessDenied("denied".to_string())
        );
        assert_eq!(directory.requested_tokens(), vec![None]);
    }
}
