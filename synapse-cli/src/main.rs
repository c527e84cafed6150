//! Synapse CLI
//!
//! Runs the upload API and exposes the storage gateway from the shell.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use synapse_api::{ApiConfig, ApiServer};
use synapse_core::types::{byte_stream, ResolvedLocation, UploadResult};
use synapse_gateway::PinningGateway;

/// Synapse - content-addressed uploads with IPFS pinning and local fallback
#[derive(Parser)]
#[command(name = "synapse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Override the local upload directory
    #[arg(long, global = true, env = "UPLOAD_DIR")]
    upload_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080", env = "PORT")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Store a file through the gateway and print its address
    Upload {
        /// File to upload
        path: PathBuf,
    },

    /// Resolve a storage address to a local path or gateway link
    Resolve {
        /// Address returned by an earlier upload
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "synapse=debug,tower_http=debug,info"
    } else {
        "synapse=info,warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let mut config = ApiConfig::from_env();
    if let Some(dir) = cli.upload_dir {
        config.gateway.upload_dir = dir;
    }

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(config, port, &bind).await,
        Commands::Upload { path } => cmd_upload(config, &path).await,
        Commands::Resolve { address } => cmd_resolve(config, &address).await,
    }
}

fn build_gateway(config: ApiConfig) -> Result<PinningGateway> {
    PinningGateway::with_config(config.gateway, config.credentials)
        .context("Failed to initialise storage gateway")
}

/// Run the API server
async fn cmd_serve(config: ApiConfig, port: u16, bind: &str) -> Result<()> {
    let storage = if config.credentials.is_some() {
        "Pinata (IPFS)".green()
    } else {
        format!("local disk ({})", config.gateway.upload_dir.display()).yellow()
    };

    println!("{}", "🚀 Starting Synapse API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("   {} {}", "Storage:".dimmed(), storage);
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config).context("Failed to configure API server")?;

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}

/// Store a file through the gateway
async fn cmd_upload(config: ApiConfig, path: &Path) -> Result<()> {
    let gateway = build_gateway(config)?;

    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let size = file.metadata().await?.len();
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    println!("{} {} ({} bytes)", "📤 Uploading:".cyan().bold(), filename, size);
    debug!(remote = gateway.uses_remote(), "Selected storage backend");

    let address = gateway
        .store(&filename, byte_stream(file))
        .await
        .context("Upload failed")?;

    let result = UploadResult {
        result: address,
        filename,
        size,
    };

    println!("{}", "✅ Stored".green().bold());
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// Resolve a storage address
async fn cmd_resolve(config: ApiConfig, address: &str) -> Result<()> {
    let gateway = build_gateway(config)?;

    let location = gateway
        .resolve(address)
        .await
        .with_context(|| format!("Failed to resolve '{}'", address))?;

    match location {
        ResolvedLocation::LocalFile { path } => {
            println!("{} {}", "📁 Local file:".green().bold(), path.display());
        }
        ResolvedLocation::Redirect { url } => {
            println!("{} {}", "🌐 Gateway link:".green().bold(), url);
        }
    }

    Ok(())
}
