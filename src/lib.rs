pub mod aws;
pub mod cohort;
pub mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod jobs;
pub mod publisher;
pub mod report;

pub use config::Config;
pub use error::AppError;
