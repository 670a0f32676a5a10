use super::{Job, JobResult};
use crate::{
    cohort::{Histogram, aggregate},
    config::ReportConfig,
    directory::{AccountDirectory, list_all_accounts},
    error::AppError,
    publisher::ReportPublisher,
    report::to_csv_bytes,
};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Output of a single report computation
#[derive(Debug, Clone)]
pub struct CohortReport {
    /// Reference time every account age was measured against
    pub generated_at: NaiveDateTime,
    pub accounts_listed: usize,
    pub histogram: Histogram,
    pub csv: Vec<u8>,
}

/// Enumerate the directory and render the cohort report for `now`
pub async fn build_report(
    directory: &dyn AccountDirectory,
    now: NaiveDateTime,
) -> Result<CohortReport, AppError> {
    let accounts = list_all_accounts(directory).await?;
    let histogram = aggregate(&accounts, now);
    let csv = to_csv_bytes(&histogram)?;

    Ok(CohortReport {
        generated_at: now,
        accounts_listed: accounts.len(),
        histogram,
        csv,
    })
}

/// Job that lists every account, buckets them into cohorts and publishes the CSV
pub struct CohortReportJob {
    directory: Arc<dyn AccountDirectory>,
    publisher: Arc<dyn ReportPublisher>,
    config: ReportConfig,
}

impl CohortReportJob {
    pub fn new(
        directory: Arc<dyn AccountDirectory>,
        publisher: Arc<dyn ReportPublisher>,
        config: ReportConfig,
    ) -> Self {
        Self {
            directory,
            publisher,
            config,
        }
    }

    /// List and aggregate without publishing
    pub async fn compute_at(&self, now: NaiveDateTime) -> Result<CohortReport, AppError> {
        build_report(self.directory.as_ref(), now).await
    }

    /// Run the full pipeline with `now` as the reference time
    pub async fn execute_at(&self, now: NaiveDateTime) -> Result<CohortReport, AppError> {
        let report = self.compute_at(now).await?;

        info!(
            "Sending {} to {}",
            self.config.object_key,
            self.publisher.destination()
        );
        self.publisher
            .put(&self.config.object_key, report.csv.clone())
            .await?;
        info!("Completed the file upload");

        Ok(report)
    }
}

#[async_trait]
impl Job for CohortReportJob {
    fn name(&self) -> &str {
        "account_cohorts"
    }

    async fn execute(&self) -> Result<JobResult, AppError> {
        let report = self.execute_at(Utc::now().naive_utc()).await?;
        Ok(JobResult::success_with_count(report.accounts_listed as u64))
    }
}
