mod config;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use hr_seed::{DryRunPlan, Seeder};
use platform_client::ApiClient;
use platform_obs::{ObsConfig, init_tracing};
use rand::{SeedableRng, rngs::StdRng};
use tracing::error;

use crate::config::SeedConfig;

const DEFAULT_BASE_URL: &str = "http://localhost:8082";

#[derive(Parser, Debug)]
#[command(
    name = "populate-db",
    version,
    about = "Populate the personnel database with test data"
)]
struct Cli {
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_BASE_URL, help = "API base URL")]
    base_url: String,
    /// Show what would be created without making API calls.
    #[arg(long)]
    dry_run: bool,
    /// Seed the random generator to reproduce a previous run's data.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();

    if cli.dry_run {
        print!("{}", DryRunPlan::default());
        return Ok(ExitCode::SUCCESS);
    }

    let config = SeedConfig::load(cli.base_url)?;
    let client = ApiClient::new(&config.base_url, config.request_timeout)?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let rule = "=".repeat(50);
    println!("{rule}\nPERSONNEL DATABASE POPULATION SCRIPT\n{rule}");
    println!("Target API: {}", client.base_url());

    let mut seeder = Seeder::new(client, rng, config.settings);
    match seeder.run().await {
        Ok(summary) => {
            print!("\n{summary}");
            println!("\n✓ Database population completed successfully!");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(error = %err, "seeding aborted");
            println!("\n✗ Aborting: {err}");
            println!("\n✗ Database population failed!");
            Ok(ExitCode::FAILURE)
        }
    }
}
