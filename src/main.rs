//! CareSync Command Line Interface
//!
//! A terminal client for the CareSync mental-health support forum.

use caresync::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "caresync=info".into()),
        )
        .init();

    let command = match cli::parse_args() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run(command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
