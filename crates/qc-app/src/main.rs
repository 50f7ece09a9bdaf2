//! Main application entry point

use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qc_data::{ClientConfig, CsvTable, HttpQueryService, NullPatterns};

mod cli;
mod workflow;

use cli::{Cli, Commands};
use workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose {
        EnvFilter::new("debug,reqwest=info,hyper=info,hyper_util=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::load().context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }
    info!("Query service: {}", config.api_url);

    let service = HttpQueryService::new(config).context("Failed to build HTTP client")?;
    let workflow = Workflow::new(Arc::new(service));

    let output = match cli.command {
        Commands::Health => workflow.health().await?,
        Commands::Upload { file } => workflow.upload(&file).await?,
        Commands::Ask { table, question, chart } => {
            workflow.ask(Some(table.as_str()), &question, &chart).await?
        }
        Commands::Run { file, question, chart } => {
            workflow.upload(&file).await?;
            workflow.ask(None, &question, &chart).await?
        }
        Commands::Chart { csv, chart } => {
            let table = CsvTable::open(csv.clone(), NullPatterns::default())
                .await
                .with_context(|| format!("Failed to read {}", csv.display()))?;
            workflow.chart(table.into_rows(), &chart)
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
