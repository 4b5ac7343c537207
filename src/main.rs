use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use confserver::config::{resolve_config, Overrides};
use confserver::lifecycle::{self, StartupError};
use confserver::observability::logging;

/// Serve a JSON configuration file over HTTP.
#[derive(Parser)]
#[command(name = "confserver", version)]
#[command(about = "Serve a JSON configuration file over HTTP", long_about = None)]
struct Cli {
    /// The JSON document to serve.
    #[arg(value_name = "CONFFILE")]
    conf_file: PathBuf,

    /// The port to run the conf server on.
    #[arg(long)]
    port: Option<u16>,

    /// The host and port of a master conf server where clients should be
    /// redirected to. E.g.: 10.0.0.30:6666
    #[arg(long = "redirect-to", value_name = "HOST:PORT")]
    redirect_to: Option<String>,

    /// Optional TOML file with server settings; flags override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let overrides = Overrides {
        port: cli.port,
        master: cli.redirect_to,
        log_level: cli.log_level,
        document: Some(cli.conf_file),
    };

    let config = match resolve_config(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            logging::init(None);
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    logging::init(Some(&config.observability.log_level));
    tracing::info!("confserver v{} starting", env!("CARGO_PKG_VERSION"));

    match lifecycle::run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e @ StartupError::MissingDocument(_)) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}
