//! itemdesk - Serverless item CRUD handler backed by a single DynamoDB table

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use itemdesk::api::{self, AppState};
use itemdesk::config::{Config, StoreKind};
use itemdesk::handler::ItemHandler;
use itemdesk::store::{DynamoStore, ItemStore, MemoryStore};
use itemdesk::types::ItemEvent;

#[derive(Parser)]
#[command(name = "itemdesk")]
#[command(about = "Serverless item CRUD handler backed by a single DynamoDB table")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the in-memory store instead of DynamoDB
    #[arg(long, global = true)]
    memory: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run inside the serverless runtime (default)
    Lambda,

    /// Start a local HTTP server exposing the item routes
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Handle a single event read from a file or stdin and print the response
    Invoke {
        /// Event JSON file; stdin when omitted
        event: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Lambda);

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("itemdesk={},tower_http=debug", log_level).into()
    });
    // CloudWatch stamps every line itself and does not render colours
    let in_lambda = matches!(command, Commands::Lambda);
    tracing_subscriber::registry()
        .with(filter)
        .with(in_lambda.then(|| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_target(false)
        }))
        .with((!in_lambda).then(|| tracing_subscriber::fmt::layer()))
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    // Load config
    let mut config = Config::load(cli.config.as_deref())
        .with_context(|| format!("failed to load config from {:?}", cli.config))?;
    if cli.memory {
        config.store = StoreKind::Memory;
    }

    let handler = build_handler(&config).await;

    match command {
        Commands::Lambda => {
            tracing::info!(table = %config.table_name, store = ?config.store, "Starting serverless runtime");
            itemdesk::lambda::run(handler)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }

        Commands::Serve { port } => {
            let port = port.unwrap_or(config.http_port);
            tracing::info!("Starting HTTP server on port {}", port);

            let router = api::create_router(AppState::new(handler));
            let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

            println!("itemdesk server running at http://localhost:{}", port);
            println!("  Items:  http://localhost:{}/items", port);
            println!("  Health: http://localhost:{}/health", port);

            axum::serve(listener, router).await?;
        }

        Commands::Invoke { event } => {
            let raw = match &event {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read event {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let event: ItemEvent = serde_json::from_str(&raw).context("event is not valid JSON")?;
            let response = handler.handle(event).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Build the store once for the lifetime of the process
async fn build_handler(config: &Config) -> ItemHandler {
    let store: Arc<dyn ItemStore> = match config.store {
        StoreKind::Dynamo => Arc::new(DynamoStore::from_config(config).await),
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; items are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };
    ItemHandler::new(store)
}
