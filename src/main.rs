use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Serves the payroll engine's calculations over HTTP.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding region.yaml, rates.yaml, tax.yaml and holidays/.
    #[arg(long, env = "PAYROLL_CONFIG_DIR", default_value = "./config/au_2026")]
    config: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "PAYROLL_BIND", default_value = "0.0.0.0:5001")]
    bind: SocketAddr,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.log_level);
    debug!("Log level set to {}", args.log_level.to_string().to_lowercase());

    match serve(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load(&args.config)?;
    info!(
        region = %config.region().code,
        holidays = config.public_holidays().len(),
        tax_schedule = %config.tax_schedule().name,
        "Loaded configuration from {}",
        args.config.display()
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}

pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        // RUST_LOG exists; use it.
        Some(_) => EnvFilter::from_default_env(),
        // The binary and library share a crate name, so one directive covers both.
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
