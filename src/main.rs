use account_cohorts::Config;
use account_cohorts::commands::{Commands, handle_command};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "account-cohorts")]
#[command(about = "Monthly account-age cohort report for AWS Organizations")]
struct Cli {
    #[arg(short, long, help = "Path to configuration file")]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_from_file(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.level))
        .init();

    info!("Starting account cohort report");

    if let Err(e) = handle_command(cli.command.unwrap_or_default(), &config).await {
        error!("Command failed: {}", e);
        std::process::exit(1);
    }
}
