//! surface-router gateway binary
//!
//! Loads configuration, installs logging and serves the HTTP API.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use surface_router::config::Config;
use surface_router::server::HttpServer;
use surface_router::utils::logging::init_logging;

#[derive(Debug, Parser)]
#[command(name = "gateway", version, about = "Multi-provider AI router with structured-output recovery")]
struct Args {
    /// Path to the YAML configuration file; defaults apply when it is absent
    #[arg(
        short,
        long,
        env = "SURFACE_ROUTER_CONFIG",
        default_value = "config/gateway.yaml"
    )]
    config: PathBuf,
}

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = match Config::load(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let result = match HttpServer::new(&config) {
        Ok(server) => server.start().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "gateway stopped with an error");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
