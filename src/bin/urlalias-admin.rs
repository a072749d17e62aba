use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use urlalias::config::Config;
use urlalias::logging;
use urlalias::service::{ServiceError, Shortener};
use urlalias::storage;

#[derive(Parser)]
#[command(name = "urlalias-admin")]
#[command(about = "Manage stored aliases directly against the configured database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a URL, optionally under a chosen alias
    Save {
        /// Absolute URL to store
        url: String,
        /// Alias to use instead of a generated one
        #[arg(long)]
        alias: Option<String>,
    },
    /// Print the URL stored under an alias
    Resolve {
        alias: String,
    },
    /// Delete an alias
    Delete {
        alias: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    logging::init(config.env);

    let storage = storage::connect(&config.database).await?;
    let shortener = Arc::new(Shortener::new(storage, config.alias));

    match cli.command {
        Commands::Save { url, alias } => match shortener.save(&url, alias.as_deref()).await {
            Ok(saved) => println!("✅ Saved {} as '{}' (id {})", url, saved.alias, saved.id),
            Err(e) => report(e)?,
        },
        Commands::Resolve { alias } => match shortener.resolve(&alias).await {
            Ok(url) => println!("{}", url),
            Err(e) => report(e)?,
        },
        Commands::Delete { alias } => match shortener.delete(&alias).await {
            Ok(()) => println!("✅ Deleted '{}'", alias),
            Err(e) => report(e)?,
        },
    }

    Ok(())
}

fn report(err: ServiceError) -> Result<()> {
    match err {
        ServiceError::Internal(e) => Err(e.context("operation failed")),
        other => Err(other.into()),
    }
}
