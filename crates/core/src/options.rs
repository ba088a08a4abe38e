use serde::{Deserialize, Serialize};

use crate::error::{Result, SpeedoError};

/// Animation and data-cadence options for one gauge instance.
///
/// All periods are in seconds.  The cadence options must satisfy
/// `refresh_period ≤ min_data_period ≤ data_stale_period`; see
/// [`GaugeOptions::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeOptions {
    /// Upper clamp bound for displayed values (e.g. link capacity in Mbps).
    pub max_value: f64,
    /// Bounded random perturbation, as a fraction of `max_value`.
    pub jitter_percent: f64,
    /// How often the display refreshes (one animation tick).
    pub refresh_period: f64,
    /// Minimum time the display dwells on one real data value.
    pub min_data_period: f64,
    /// Age without fresh data after which the display goes stale.
    pub data_stale_period: f64,
    /// Replace the raw target with the max of the recent raw values, so
    /// brief traffic spikes are not visually under-represented.
    pub use_max_value_smoothing: bool,
    /// Size of the smoothing window (number of raw values).
    pub max_value_smoothing_history: usize,
    /// Play an attract-mode sweep (0 → max → 0 → max) at startup.
    pub do_intro: bool,
}

impl Default for GaugeOptions {
    fn default() -> Self {
        Self {
            max_value: 10_000.0,
            jitter_percent: 0.001,
            refresh_period: 0.100,
            min_data_period: 2.0,
            data_stale_period: 15.0,
            use_max_value_smoothing: true,
            max_value_smoothing_history: 4,
            do_intro: false,
        }
    }
}

impl GaugeOptions {
    /// Sanity-check option combinations.  Violations are fatal: the widget
    /// must refuse to initialize.
    pub fn validate(&self) -> Result<()> {
        if self.max_value <= 0.0 {
            return Err(SpeedoError::Config("\"max_value\" must be > 0".into()));
        }
        if self.data_stale_period <= 0.0 {
            return Err(SpeedoError::Config(
                "\"data_stale_period\" must be > 0".into(),
            ));
        }
        if self.min_data_period <= 0.0 {
            return Err(SpeedoError::Config("\"min_data_period\" must be > 0".into()));
        }
        if self.refresh_period <= 0.0 {
            return Err(SpeedoError::Config("\"refresh_period\" must be > 0".into()));
        }
        if self.data_stale_period < self.min_data_period {
            return Err(SpeedoError::Config(
                "\"min_data_period\" must be <= \"data_stale_period\"".into(),
            ));
        }
        if self.min_data_period < self.refresh_period {
            return Err(SpeedoError::Config(
                "\"refresh_period\" must be <= \"min_data_period\"".into(),
            ));
        }
        Ok(())
    }
}

/// Purely visual options, carried through to the renderer untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Number of bars in the gauge column.
    pub num_bars: u32,
    /// How much of each bar slot is lit.
    pub percent_bar: f64,
    /// Alpha used for the unlit portion of the gauge.
    pub empty_alpha: f64,
    /// Alpha used when the display is stale.
    pub stale_alpha: f64,
    /// Width fraction used when the display is stale.
    pub stale_width: f64,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            num_bars: 70,
            percent_bar: 0.6,
            empty_alpha: 0.3,
            stale_alpha: 0.4,
            stale_width: 0.75,
        }
    }
}
