//! speedo — terminal front-end for a perfSONAR-style speed gauge.
//!
//! Polls a measurement archive on a coarse period and animates the gauge
//! toward each new sample on a fine refresh tick.
//!
//! Run with:  `RUST_LOG=info speedo`

use anyhow::Result;
use speedo_poll::PollScheduler;
use speedo_widget::{Gauge, LabelRenderer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("speedo v{} starting", env!("CARGO_PKG_VERSION"));

    let config = speedo_config::load(speedo_config::default_path())?;

    let renderer = LabelRenderer::new(config.gauge.max_value, config.style.clone());
    let mut gauge = Gauge::new(&config.gauge, Box::new(renderer))?;
    if config.gauge.do_intro {
        gauge.intro().await;
    }

    let mut samples = PollScheduler::new(&config.poll)?.spawn();

    loop {
        tokio::select! {
            batch = samples.recv() => match batch {
                Some(batch) => gauge.append(batch).await,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                gauge.stop();
                break;
            }
        }
    }

    Ok(())
}
