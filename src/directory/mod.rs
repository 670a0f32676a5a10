//! Account directory access
//!
//! The directory is a paginated source of organization accounts. The
//! `AccountDirectory` trait is the seam between the report job and the
//! provider; `list_all_accounts` drains every page of it.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone};
use thiserror::Error;
use tracing::{debug, info};

pub mod mock;
pub mod organizations;

pub use mock::MockAccountDirectory;
pub use organizations::OrganizationsDirectory;

/// Directory provider error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Directory service unreachable: {0}")]
    Unreachable(String),
    #[error("Access denied: {0}")]
    AccessDenied(String),
    #[error("Request throttled: {0}")]
    Throttled(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Directory service error: {0}")]
    Service(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Suspended,
    PendingClosure,
    Other(String),
}

impl AccountStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Suspended => "SUSPENDED",
            AccountStatus::PendingClosure => "PENDING_CLOSURE",
            AccountStatus::Other(status) => status,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

impl From<&str> for AccountStatus {
    fn from(status: &str) -> Self {
        match status {
            "ACTIVE" => AccountStatus::Active,
            "SUSPENDED" => AccountStatus::Suspended,
            "PENDING_CLOSURE" => AccountStatus::PendingClosure,
            other => AccountStatus::Other(other.to_string()),
        }
    }
}

/// A single organization account as returned by the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: String,
    pub status: AccountStatus,
    /// Join time as a naive UTC instant
    pub joined: NaiveDateTime,
}

impl AccountRecord {
    /// Build a record, normalizing the join time to naive UTC
    pub fn new<Tz: TimeZone>(
        id: impl Into<String>,
        status: AccountStatus,
        joined: DateTime<Tz>,
    ) -> Self {
        Self {
            id: id.into(),
            status,
            joined: joined.naive_utc(),
        }
    }
}

/// One page of a directory listing
#[derive(Debug, Clone, Default)]
pub struct AccountPage {
    pub records: Vec<AccountRecord>,
    pub next_token: Option<String>,
}

#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Fetch the page following `next_token`, or the first page when `None`
    async fn list(&self, next_token: Option<String>) -> ProviderResult<AccountPage>;
}

/// Page through the directory until no continuation token is returned
pub async fn list_all_accounts(
    directory: &dyn AccountDirectory,
) -> ProviderResult<Vec<AccountRecord>> {
    info!("Getting the list of accounts from the account directory");

    let mut accounts = Vec::new();
    let mut next_token = None;
    let mut pages = 0usize;

    loop {
        let page = directory.list(next_token.take()).await?;
        pages += 1;
        debug!(
            "Fetched page {} with {} accounts",
            pages,
            page.records.len()
        );
        accounts.extend(page.records);

        match page.next_token {
            Some(token) if !token.is_empty() => next_token = Some(token),
            _ => break,
        }
    }

    info!("Listed {} accounts across {} pages", accounts.len(), pages);
    Ok(accounts)
}
