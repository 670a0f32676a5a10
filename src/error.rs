use crate::directory::ProviderError;
use crate::publisher::PublishError;
use crate::report::ReportError;
use thiserror::Error;

/// Top-level error for a report run
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Account directory error: {0}")]
    Provider(#[from] ProviderError),
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}
