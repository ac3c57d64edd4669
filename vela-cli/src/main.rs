use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use vela_core::{Diagnostic, LookupKey, Resolver, RetryPolicy};
use vela_genesys::{GenesysClient, GenesysConfig, directories};

#[derive(Parser)]
#[command(name = "vela")]
#[command(about = "Resolve Genesys Cloud entity names to IDs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an entity name to its ID, waiting out propagation delays
    Resolve {
        /// Entity type (see `vela entities`)
        entity: String,
        /// Name to resolve
        key: String,
        /// Give up after this many seconds
        #[arg(long, default_value_t = 15)]
        max_wait: u64,
        /// Pause between poll attempts, in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval: u64,
        /// Print the full matched entry as JSON instead of just the ID
        #[arg(long)]
        json: bool,
    },
    /// List the entity types that can be resolved
    Entities,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Resolve {
            entity,
            key,
            max_wait,
            interval,
            json,
        } => run_resolve(&entity, &key, max_wait, interval, json).await,
        Commands::Entities => run_entities(),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_resolve(
    entity: &str,
    key: &str,
    max_wait: u64,
    interval: u64,
    json: bool,
) -> Result<(), String> {
    let config = GenesysConfig::from_env().map_err(|e| e.to_string())?;
    let client = GenesysClient::connect(&config)
        .await
        .map_err(|e| e.to_string())?;
    let registry = directories::registry(Arc::new(client));

    let resolver = Resolver::new(RetryPolicy::new(
        Duration::from_secs(max_wait),
        Duration::from_millis(interval),
    ));

    // Ctrl-C aborts the in-flight resolution instead of letting it sit
    // out the rest of its deadline.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling resolution");
            signal_cancel.cancel();
        }
    });

    let key = LookupKey::new(key);
    match registry.resolve(&resolver, entity, &key, &cancel).await {
        Ok(entry) => {
            if json {
                let rendered = serde_json::to_string_pretty(&entry)
                    .map_err(|e| format!("failed to render entry: {e}"))?;
                println!("{rendered}");
            } else {
                println!("{}", entry.id);
            }
            Ok(())
        }
        Err(err) => Err(Diagnostic::from_resolve_error(&err).to_string()),
    }
}

fn run_entities() -> Result<(), String> {
    for spec in directories::ALL {
        println!("{}", spec.entity);
    }
    Ok(())
}
