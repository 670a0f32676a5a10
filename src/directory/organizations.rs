use super::{AccountDirectory, AccountPage, AccountRecord, AccountStatus, ProviderError, ProviderResult};
use async_trait::async_trait;
use aws_sdk_organizations::Client as OrganizationsClient;
use aws_sdk_organizations::error::{DisplayErrorContext, SdkError};
use aws_sdk_organizations::operation::list_accounts::ListAccountsError;
use aws_sdk_organizations::primitives::DateTime as SmithyDateTime;
use aws_sdk_organizations::types::Account;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Account directory backed by AWS Organizations `ListAccounts`
#[derive(Clone)]
pub struct OrganizationsDirectory {
    client: OrganizationsClient,
}

impl OrganizationsDirectory {
    pub fn new(client: OrganizationsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountDirectory for OrganizationsDirectory {
    async fn list(&self, next_token: Option<String>) -> ProviderResult<AccountPage> {
        let output = self
            .client
            .list_accounts()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(map_list_accounts_error)?;

        let records = output
            .accounts()
            .iter()
            .map(convert_account)
            .collect::<ProviderResult<Vec<_>>>()?;

        debug!(
            "ListAccounts returned {} accounts (more pages: {})",
            records.len(),
            output.next_token().is_some()
        );

        Ok(AccountPage {
            records,
            next_token: output.next_token().map(str::to_string),
        })
    }
}

/// Convert an Organizations account into a record, rejecting incomplete entries
pub fn convert_account(account: &Account) -> ProviderResult<AccountRecord> {
    let id = account
        .id()
        .ok_or_else(|| ProviderError::MalformedResponse("account without an id".to_string()))?;

    #[allow(deprecated)]
    let status = account.status().ok_or_else(|| {
        ProviderError::MalformedResponse(format!("account {id} has no status"))
    })?;

    let joined = account.joined_timestamp().ok_or_else(|| {
        ProviderError::MalformedResponse(format!("account {id} has no join timestamp"))
    })?;
    let joined = convert_timestamp(joined).ok_or_else(|| {
        ProviderError::MalformedResponse(format!("account {id} has an out of range join timestamp"))
    })?;

    Ok(AccountRecord::new(
        id,
        AccountStatus::from(status.as_str()),
        joined,
    ))
}

fn convert_timestamp(timestamp: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}

fn map_list_accounts_error(err: SdkError<ListAccountsError>) -> ProviderError {
    let message = DisplayErrorContext(&err).to_string();

    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            ProviderError::Unreachable(message)
        }
        SdkError::ResponseError(_) => ProviderError::MalformedResponse(message),
        _ => match err.as_service_error() {
            Some(service_err) if service_err.is_access_denied_exception() => {
                ProviderError::AccessDenied(message)
            }
            Some(service_err) if service_err.is_aws_organizations_not_in_use_exception() => {
                ProviderError::AccessDenied(message)
            }
            Some(service_err) if service_err.is_too_many_requests_exception() => {
                ProviderError::Throttled(message)
            }
            _ => ProviderError::Service(message),
        },
    }
}
