//! ctxlog demo server.
//!
//! Serves a small order API whose handlers log through the request's
//! log context:
//!
//! ```text
//! curl -H 'x-request-id: r1' localhost:8080/orders/0
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tokio::net::TcpListener;

use ctxlog::config::{load_config, LogConfig};
use ctxlog::http::HttpServer;
use ctxlog::observability::init_logging;

#[derive(Parser)]
#[command(name = "ctxlog-demo")]
#[command(about = "Demo HTTP server logging with request context", long_about = None)]
struct Cli {
    /// TOML file with the logger configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address.
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Override the configured level.
    #[arg(short, long)]
    level: Option<String>,

    /// Console text output instead of JSON.
    #[arg(long)]
    console: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path).unwrap_or_else(|e| {
            eprintln!("{e} --> load_config({})", path.display());
            process::exit(1);
        }),
        None => LogConfig::default(),
    };
    if let Some(level) = cli.level {
        config.level = level;
    }
    config.console |= cli.console;

    // An unusable configuration stops the process before anything is served
    if let Err(e) = init_logging(&config) {
        eprintln!("{e}");
        process::exit(1);
    }
    let logger = ctxlog::init(&config)?.clone();

    tracing::info!(
        level = %config.level,
        stack = config.stack,
        console = config.console,
        no_color = config.no_color,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&cli.bind).await?;
    HttpServer::new(logger).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
