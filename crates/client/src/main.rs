//! Arena battle client binary.
//!
//! Runs headless battles between the player and the enemy, printing the
//! battle log to stdout.
//!
//! # Examples
//!
//! ```bash
//! # One battle with a fixed seed
//! BATTLE_SEED=42 cargo run -p battle-client
//!
//! # Five rounds as JSON, debug logs to a file
//! BATTLE_ROUNDS=5 BATTLE_OUTPUT=json BATTLE_LOG_DIR=logs RUST_LOG=debug cargo run -p battle-client
//! ```

use anyhow::Result;
use battle_client::config::ClientConfig;
use battle_client::logging::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting arena client");
    tracing::info!("Rounds: {}", config.rounds);
    tracing::info!("Seed: {:?}", config.engine.seed);

    battle_client::run(config).await
}
