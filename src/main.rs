use anyhow::Result;
use clap::{Parser, Subcommand};
use syra_core::{config::Config, migration, server, telemetry};
use tracing::info;

/// Syra Core API server
#[derive(Debug, Parser)]
#[command(name = "syra-core", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the HTTP API (default)
    Serve {
        /// Apply pending migrations before serving
        #[arg(long)]
        migrate: bool,
    },
    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let prometheus_handle = telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or(Commands::Serve { migrate: false }) {
        Commands::Serve { migrate } => {
            info!("Starting Syra Core Service");
            info!("HTTP server listening on {}", config.http_addr());
            server::run(config, migrate, prometheus_handle).await
        }
        Commands::Migrate => {
            let pool = migration::connect(&config.database).await?;
            migration::run_migrations(&pool).await?;
            pool.close().await;
            Ok(())
        }
    }
}
