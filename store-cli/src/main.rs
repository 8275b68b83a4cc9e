//! msgstore CLI: store, list, load and delete captured messages. Config from env.

mod backend;
mod config;
mod logger;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use message_core::{Message, MessageStore};
use tracing::info;

use crate::backend::open_store;
use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "msgstore")]
#[command(about = "Message store CLI: store, list, load, delete, delete-all, count")]
#[command(long_about = "Message store CLI: store, list, load, delete, delete-all, count.\n\n\
The backend comes from MESSAGE_STORE_BACKEND (sqlite or memory). With memory, each \
msgstore run starts empty and keeps nothing after it exits, so a message stored by one \
command is not visible to the next; use sqlite to keep messages between runs.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a message read from a JSON file; prints its id.
    Store { file: PathBuf },
    /// List message summaries in insertion order.
    List {
        #[arg(short, long, default_value = "0")]
        start: usize,
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },
    /// Print the full message with the given id.
    Load { id: String },
    /// Delete the message with the given id (no error if it is missing).
    Delete { id: String },
    /// Delete every stored message.
    DeleteAll,
    /// Print the number of stored messages.
    Count,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::load()?;
    config.validate()?;
    logger::init_tracing(&config.log_file)?;

    let store = open_store(&config).await?;
    run(cli.command, store.as_ref()).await
}

async fn run(command: Commands, store: &dyn MessageStore) -> Result<()> {
    match command {
        Commands::Store { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let message: Message = serde_json::from_str(&json)
                .with_context(|| format!("{} is not a valid message document", file.display()))?;
            let id = store.store(message).await?;
            info!(id = %id, "Stored message");
            println!("{}", id);
        }
        Commands::List { start, limit } => {
            let messages = store.list(start, limit).await?;
            println!("{}", serde_json::to_string_pretty(&messages)?);
        }
        Commands::Load { id } => {
            let message = store.load(&id).await?;
            println!("{}", serde_json::to_string_pretty(&message)?);
        }
        Commands::Delete { id } => {
            store.delete_one(&id).await?;
            info!(id = %id, "Deleted message");
        }
        Commands::DeleteAll => {
            store.delete_all().await?;
            info!("Deleted all messages");
        }
        Commands::Count => {
            println!("{}", store.count().await?);
        }
    }
    Ok(())
}
