pub mod cohort_report;

use crate::error::AppError;
use async_trait::async_trait;

pub use cohort_report::{CohortReport, CohortReportJob, build_report};

/// Result of job execution
#[derive(Debug, Clone)]
pub struct JobResult {
    pub success: bool,
    pub message: String,
    pub items_processed: u64,
}

impl JobResult {
    pub fn success_with_count(count: u64) -> Self {
        Self {
            success: true,
            message: format!("Successfully processed {count} items"),
            items_processed: count,
        }
    }
}

/// Trait for executable jobs
#[async_trait]
pub trait Job: Send + Sync {
    /// Get the job name for logging and identification
    fn name(&self) -> &str;

    /// Execute the job and return the result
    async fn execute(&self) -> Result<JobResult, AppError>;
}
