use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use minihttp::config::Config;
use minihttp::handlers;
use minihttp::routing::Router;
use minihttp::server;

#[derive(Debug, Parser)]
#[command(name = "minihttp", version, about = "Minimal HTTP/1.1 server")]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:4221
    #[arg(short, long)]
    listen: Option<String>,

    /// Directory served and written by the /files routes
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::from_file(path)?.with_env(|key| std::env::var(key).ok()),
        None => Config::load(),
    };

    if let Some(listen) = args.listen {
        cfg.server.listen_addr = listen;
    }
    if let Some(directory) = args.directory {
        cfg.static_files.directory = Some(directory);
    }
    if let Some(level) = args.log_level {
        cfg.log_level = level;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level)),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let mut router = Router::new();
    handlers::register_defaults(&mut router, cfg.static_files.directory.clone())?;
    tracing::info!(
        routes = router.len(),
        static_dir = ?cfg.static_files.directory,
        "Router ready"
    );

    tokio::select! {
        res = server::listener::run(&cfg, router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
