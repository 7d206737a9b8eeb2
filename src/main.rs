use anyhow::Result;
use tutor_feedback::{config, server};
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up LLM_* variables from a local .env before reading the environment
    dotenv::dotenv().ok();

    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = validate_log_level(&config.server.logs.level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // RUST_LOG directives override the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.server.logs.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    info!(
        "Starting tutor feedback server on port {}",
        config.server.port
    );

    server::run(config).await?;

    Ok(())
}
