use std::io::Write;

use speedo_core::{Reading, Result, SpeedoError, StyleOptions};

/// Drawing seam for the gauge.
///
/// The tick driver hands every [`Reading`] to the renderer.  A draw failure
/// never stops the animation loop — the driver logs it and holds the last
/// known value.
pub trait Renderer: Send + std::fmt::Debug {
    fn draw(&mut self, reading: &Reading) -> Result<()>;
}

/// Minimal terminal renderer: a one-line bar plus a `"<n> Gbps"` label,
/// redrawn in place.  A stale display is dimmed and narrowed.
///
/// The alpha fields of [`StyleOptions`] only mean something to renderers
/// with a real color surface; this one uses `num_bars` and `stale_width`.
#[derive(Debug)]
pub struct LabelRenderer {
    max_value: f64,
    style: StyleOptions,
}

impl LabelRenderer {
    pub fn new(max_value: f64, style: StyleOptions) -> Self {
        Self { max_value, style }
    }

    fn line(&self, reading: &Reading) -> String {
        let mut bars = self.style.num_bars as usize;
        if reading.stale {
            bars = (bars as f64 * self.style.stale_width).round() as usize;
        }
        let lit = ((bars as f64 * reading.value / self.max_value).round() as usize).min(bars);
        let bar: String = std::iter::repeat('|')
            .take(lit)
            .chain(std::iter::repeat('.').take(bars - lit))
            .collect();

        // Label reads from the dwell target, not the jittered per-tick
        // value, so the number holds steady between samples: Mbps floored,
        // displayed as Gbps.
        let gbps = reading.target.floor() / 1000.0;
        if reading.stale {
            format!("\x1b[2m[{bar}] {gbps} Gbps (stale)\x1b[0m")
        } else {
            format!("[{bar}] {gbps} Gbps")
        }
    }
}

impl Renderer for LabelRenderer {
    fn draw(&mut self, reading: &Reading) -> Result<()> {
        let mut out = std::io::stdout().lock();
        write!(out, "\r\x1b[K{}", self.line(reading))
            .and_then(|()| out.flush())
            .map_err(|e| SpeedoError::Render(format!("stdout: {e}")))
    }
}
