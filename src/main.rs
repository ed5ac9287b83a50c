use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use summarizz::api::create_router;
use summarizz::config::CONFIG;
use summarizz::db::{ContentRepo, Database, UserRepo};
use summarizz::search::{InMemoryStore, MongoStore, PrefixStore, SearchService};
use summarizz::seed::SeedFile;

#[derive(Parser)]
#[command(name = "summarizz", about = "Summarizz user and content search service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the search API
    Serve {
        /// Use an in-process store instead of MongoDB
        #[arg(long)]
        in_memory: bool,
        /// Seed file loaded into the in-memory store at startup
        #[arg(long, requires = "in_memory")]
        seed: Option<PathBuf>,
    },
    /// Insert users and contents from a JSON seed file into MongoDB
    Seed { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    match Cli::parse().command {
        Command::Serve { in_memory, seed } => serve(in_memory, seed).await,
        Command::Seed { file } => {
            let db = Database::from_config().await?;
            SeedFile::load(&file)?.into_mongo(&db).await
        }
    }
}

async fn serve(in_memory: bool, seed: Option<PathBuf>) -> anyhow::Result<()> {
    let store: Arc<dyn PrefixStore> = if in_memory {
        let store = InMemoryStore::new();
        if let Some(path) = seed {
            SeedFile::load(&path)?.into_memory(&store)?;
        }
        log::warn!("Serving from the in-memory store; data is not persisted");
        Arc::new(store)
    } else {
        let db = Database::from_config().await?;
        UserRepo::new(&db).ensure_indexes().await?;
        ContentRepo::new(&db).ensure_indexes().await?;
        Arc::new(MongoStore::new(db))
    };

    let app = create_router(Arc::new(SearchService::new(store)));

    let addr = CONFIG.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    log::info!("Server is listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    log::info!("Shutting down");
}
