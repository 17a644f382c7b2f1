mod classify;
mod db;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dealerdb-cli")]
#[command(about = "DealerDB command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Classify review text locally with the built-in vocabulary
    Classify {
        /// Review text to classify
        text: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database answers
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Load makes, models, dealers and sample reviews from the inventory file
    Seed {
        /// Inventory YAML to load instead of `DEALERDB_INVENTORY_PATH`
        #[arg(long)]
        inventory: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Db { command }) => {
            let config = dealerdb_core::load_app_config()?;
            let pool_config = dealerdb_db::PoolConfig::from_app_config(&config);
            let pool = dealerdb_db::connect_pool(&config.database_url, pool_config).await?;

            match command {
                DbCommands::Ping => db::run_ping(&pool).await?,
                DbCommands::Migrate => db::run_migrate(&pool).await?,
                DbCommands::Seed { inventory } => {
                    let path = inventory.unwrap_or_else(|| config.inventory_path.clone());
                    db::run_seed(&pool, &path).await?;
                }
            }
        }
        Some(Commands::Classify { text, json }) => {
            println!("{}", classify::render(&text, json)?);
        }
        None => println!("dealerdb-cli ready; see --help for commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
