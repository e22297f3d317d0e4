//! Kavach daemon: entry point for the wallet API and demo tooling.

mod app;
mod config;
mod demo;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use kavach_rpc::{AppState, RpcServer};
use kavach_utils::{init_logging, LogFormat};

use crate::app::App;
use crate::config::KavachConfig;

#[derive(Parser)]
#[command(name = "kavach", about = "Kavach digital identity wallet")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "KAVACH_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for the LMDB store.
    #[arg(long, env = "KAVACH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "KAVACH_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "KAVACH_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        /// API port (defaults to the config value, 7080).
        #[arg(long, env = "KAVACH_API_PORT")]
        port: Option<u16>,
    },
    /// Run the seeker → holder → verification scenario once.
    Demo,
    /// Print an audit log, newest first.
    Audit {
        /// Show the bank portal's log instead of the holder's.
        #[arg(long)]
        bank: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = match cli.config.as_deref() {
        Some(path) => match KavachConfig::from_toml_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (KavachConfig::default(), Some(e)),
        },
        None => (KavachConfig::default(), None),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    init_logging(config.log_format, &config.log_level);
    match (&cli.config, load_error) {
        (Some(_), Some(e)) => tracing::warn!("{e}, using defaults"),
        (Some(path), None) => tracing::info!("Loaded config from {}", path.display()),
        _ => {}
    }

    let app = App::open(&config)?;

    match cli.command {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.api_port);
            tracing::info!(
                "Starting Kavach API on port {} (data dir {})",
                port,
                app.env.path().display()
            );
            let state = Arc::new(AppState::new(app.wallet.clone(), app.portal.clone()));
            let server = RpcServer::new(port, state);
            tokio::select! {
                result = server.start() => result?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping API");
                }
            }
            tracing::info!("Kavach daemon exited cleanly");
        }
        Command::Demo => {
            demo::run(&app).await?;
        }
        Command::Audit { bank } => {
            let entries = if bank {
                app.portal.audit_log()?
            } else {
                app.wallet.audit_log()?
            };
            if entries.is_empty() {
                println!("audit log is empty");
            }
            for entry in entries {
                println!(
                    "{:>15} {:<8} {:<24} {}",
                    entry.time.as_millis(),
                    entry.status.to_string(),
                    entry.action,
                    entry.details
                );
            }
        }
    }

    Ok(())
}
