use crate::{
    Config,
    aws::AwsClients,
    cohort::age_in_months,
    directory::{OrganizationsDirectory, list_all_accounts},
    error::AppError,
    jobs::{CohortReportJob, Job, build_report},
    publisher::{LocalPublisher, PublishError, ReportPublisher, S3Publisher},
};
use chrono::Utc;
use clap::Subcommand;
use std::{io::Write, path::PathBuf, sync::Arc};
use tracing::info;

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the cohort report and publish it
    Run {
        #[arg(long, help = "Print the report to stdout instead of publishing it")]
        dry_run: bool,

        #[arg(long, help = "Write the report into this directory instead of S3")]
        output_dir: Option<PathBuf>,
    },
    /// List the organization's accounts with their cohort month
    Accounts,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            dry_run: false,
            output_dir: None,
        }
    }
}

pub async fn handle_command(command: Commands, config: &Config) -> Result<(), AppError> {
    match command {
        Commands::Run {
            dry_run,
            output_dir,
        } => run_report(config, dry_run, output_dir).await,
        Commands::Accounts => list_accounts(config).await,
    }
}

async fn run_report(
    config: &Config,
    dry_run: bool,
    output_dir: Option<PathBuf>,
) -> Result<(), AppError> {
    let clients = AwsClients::new(&config.aws).await;
    let directory = Arc::new(OrganizationsDirectory::new(clients.organizations.clone()));

    if dry_run {
        info!("DRY RUN: report will be printed, not published");
        let report = build_report(directory.as_ref(), Utc::now().naive_utc()).await?;
        std::io::stdout()
            .write_all(&report.csv)
            .map_err(PublishError::from)?;
        return Ok(());
    }

    let publisher: Arc<dyn ReportPublisher> = match output_dir {
        Some(dir) => Arc::new(LocalPublisher::new(dir)),
        None => Arc::new(S3Publisher::for_bucket(
            clients.s3.clone(),
            config.report.destination_bucket.as_deref(),
        )?),
    };

    let job = CohortReportJob::new(directory, publisher, config.report.clone());

    info!("Running job: {}", job.name());
    let result = job.execute().await?;
    info!("{}", result.message);
    Ok(())
}

async fn list_accounts(config: &Config) -> Result<(), AppError> {
    let clients = AwsClients::new(&config.aws).await;
    let directory = OrganizationsDirectory::new(clients.organizations);
    let now = Utc::now().naive_utc();

    let accounts = list_all_accounts(&directory).await?;

    println!("ID             STATUS           JOINED               AGE (MONTHS)");
    for account in &accounts {
        let age = age_in_months(account.joined, now)
            .map(|months| months.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<14} {:<16} {:<20} {}",
            account.id,
            account.status.as_str(),
            account.joined.format("%Y-%m-%d %H:%M:%S"),
            age
        );
    }
    println!();
    println!("Total accounts: {}", accounts.len());
    Ok(())
}
