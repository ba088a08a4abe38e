use std::time::Duration;

use speedo_config::PollConfig;
use speedo_core::{Batch, Result, SpeedoError};
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, warn};

use crate::payload;

/// Polls the measurement archive on a fixed period and forwards decoded
/// sample batches on a channel.
///
/// A failed or slow request is not retried within the cycle — the next
/// scheduled poll is the implicit retry, and the animation clock absorbs
/// the gap through its starving/stale states.
pub struct PollScheduler {
    config: PollConfig,
    period: Duration,
}

impl PollScheduler {
    pub fn new(config: &PollConfig) -> Result<Self> {
        if config.data_period <= 0.0 {
            return Err(SpeedoError::Config("\"data_period\" must be > 0".into()));
        }
        Ok(Self {
            config: config.clone(),
            period: Duration::from_secs_f64(config.data_period),
        })
    }

    /// Spawn the background poll task.  The task stops when the receiver is
    /// dropped.
    pub fn spawn(self) -> mpsc::Receiver<Batch> {
        let (tx, rx) = mpsc::channel(4);

        tokio::spawn(async move {
            let client = match reqwest::Client::builder().timeout(self.period).build() {
                Ok(client) => client,
                Err(e) => {
                    warn!("cannot build HTTP client: {e}; polling disabled");
                    return;
                }
            };
            let mut ticker = time::interval(self.period);

            loop {
                ticker.tick().await;
                match self.fetch(&client).await {
                    Ok(batch) if batch.is_empty() => debug!("poll returned no samples"),
                    Ok(batch) => {
                        debug!(samples = batch.len(), "poll delivered samples");
                        if tx.send(batch).await.is_err() {
                            break; // all receivers dropped
                        }
                    }
                    Err(e) => warn!("poll failed: {e}; retrying next cycle"),
                }
            }
        });

        rx
    }

    async fn fetch(&self, client: &reqwest::Client) -> Result<Batch> {
        let body = client
            .get(&self.config.endpoint)
            .query(&self.query_pairs())
            .send()
            .await
            .map_err(|e| SpeedoError::Poll(format!("request: {e}")))?
            .error_for_status()
            .map_err(|e| SpeedoError::Poll(format!("status: {e}")))?
            .text()
            .await
            .map_err(|e| SpeedoError::Poll(format!("body: {e}")))?;

        payload::decode(&body)
    }

    /// Query parameters in the form the `updateData.cgi` service expects.
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let cfg = &self.config;
        let mut pairs = vec![
            ("resolution", cfg.resolution.to_string()),
            ("npoints", cfg.npoints.to_string()),
            ("fakeServiceMode", cfg.fake_service_mode.to_string()),
        ];
        if let Some(host) = &cfg.host_name {
            pairs.push(("hostName", host.clone()));
        }
        if let Some(interface) = &cfg.if_name {
            pairs.push(("ifName", interface.clone()));
        }
        if let Some(direction) = &cfg.direction {
            pairs.push(("direction", direction.clone()));
        }
        pairs
    }
}
