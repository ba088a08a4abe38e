use serde::{Deserialize, Serialize};
use speedo_core::{GaugeOptions, StyleOptions};

/// Root configuration structure parsed from `speedo.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedoConfig {
    /// Animation / cadence options for the gauge.
    pub gauge: GaugeOptions,
    /// Visual options forwarded to the renderer.
    pub style: StyleOptions,
    /// Measurement-archive polling settings.
    pub poll: PollConfig,
}

/// Settings for the measurement-archive poll loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Data endpoint serving `{"servdata": {"data": [...]}}` payloads.
    pub endpoint: String,
    /// Seconds between polls.
    pub data_period: f64,
    /// Archive resolution, in seconds per point.
    pub resolution: u32,
    /// How many points to request per poll.
    pub npoints: u32,
    /// Ask the service to synthesize data instead of reading the archive.
    pub fake_service_mode: u32,
    /// Measurement host to query, if the deployment scopes by host.
    pub host_name: Option<String>,
    /// Interface name on the measurement host.
    pub if_name: Option<String>,
    /// Traffic direction (`"in"` / `"out"`).
    pub direction: Option<String>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8090/updateData.cgi".to_string(),
            data_period: 5.0,
            resolution: 5,
            npoints: 5,
            fake_service_mode: 0,
            host_name: None,
            if_name: None,
            direction: None,
        }
    }
}
