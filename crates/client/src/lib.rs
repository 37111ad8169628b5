//! Headless battle client.
//!
//! Boots a [`BattleEngine`], prints every combat event as it happens, resets
//! between rounds and tears the engine down on exit. The engine does all the
//! work; this crate only observes it and issues lifecycle commands.

pub mod config;
pub mod logging;
pub mod observer;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use battle_runtime::{BattleEngine, Event, LifecycleEvent, Topic};

use config::ClientConfig;
use observer::TextObserver;

/// Run `config.rounds` battles, writing output to stdout.
pub async fn run(config: ClientConfig) -> Result<()> {
    let engine = BattleEngine::builder()
        .config(config.engine.clone())
        .autostart(false)
        .build()
        .await?;
    let handle = engine.handle();

    let mut combat = handle.subscribe(Topic::Combat);
    let mut lifecycle = handle.subscribe(Topic::Lifecycle);
    let mut observer = TextObserver::new(std::io::stdout().lock(), config.format);

    let mut round = 1;
    let mut epoch = handle.start().await?;
    observer.started(round, &handle.snapshot())?;

    loop {
        tokio::select! {
            biased;

            event = combat.recv() => match event {
                Ok(Event::Combat(notice)) if notice.epoch == epoch => {
                    observer.combat(&notice)?;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Observer lagged, skipped {} combat events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            event = lifecycle.recv() => match event {
                Ok(Event::Lifecycle(LifecycleEvent::BattleEnded { epoch: ended, outcome })) if ended == epoch => {
                    observer.finished(ended, outcome)?;
                    info!(round, outcome = outcome.message(), "Round finished");
                    if round >= config.rounds {
                        break;
                    }
                    round += 1;
                    epoch = handle.reset().await?;
                    observer.started(round, &handle.snapshot())?;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Observer lagged, skipped {} lifecycle events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping battle");
                break;
            }
        }
    }

    engine.teardown().await?;
    Ok(())
}
