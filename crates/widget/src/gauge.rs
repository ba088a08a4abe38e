use std::sync::Arc;
use std::time::Duration;

use speedo_core::{AnimationClock, Batch, GaugeOptions, Result, SampleBuffer};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, warn};

use crate::render::Renderer;

/// Everything the tick driver needs under one lock.  The poll side (via
/// [`Gauge::append`]) and the driver task run on separate tasks, so the
/// buffer is mutex-guarded rather than relying on call order.
#[derive(Debug)]
struct Inner {
    buffer: SampleBuffer,
    clock: AnimationClock,
    renderer: Box<dyn Renderer>,
}

/// One gauge widget instance.
///
/// Owns its sample buffer, animation clock and refresh-timer task; nothing
/// is shared across widgets.  The refresh timer is armed lazily on the first
/// accepted append, stops itself once the display goes stale, and is
/// re-armed by the next accepted append.
#[derive(Debug)]
pub struct Gauge {
    inner: Arc<Mutex<Inner>>,
    driver: Option<JoinHandle<()>>,
    refresh: Duration,
    max_value: f64,
}

impl Gauge {
    /// Build a gauge, refusing to initialize on invalid options.
    pub fn new(opts: &GaugeOptions, renderer: Box<dyn Renderer>) -> Result<Self> {
        let clock = AnimationClock::new(opts)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                buffer: SampleBuffer::new(),
                clock,
                renderer,
            })),
            driver: None,
            refresh: Duration::from_secs_f64(opts.refresh_period),
            max_value: opts.max_value,
        })
    }

    /// Feed a batch of samples to the widget.
    ///
    /// Arms the refresh timer if the buffer accepted at least one sample and
    /// no driver is running.  An empty or fully-duplicate batch changes
    /// nothing and never (re)arms.
    pub async fn append(&mut self, batch: Batch) {
        let (accepted, stale) = {
            let mut inner = self.inner.lock().await;
            let accepted = inner.buffer.append(batch);
            (accepted, inner.clock.is_stale())
        };
        debug!(accepted, "batch appended");
        if accepted > 0 {
            // A stale clock means any old driver is already past its last
            // tick, even if its task has not quite finished; re-arm without
            // waiting for the handle to settle.
            self.arm(stale);
        }
    }

    /// Attract-mode sweep played before real data arrives: zero to full
    /// scale and back, twice.
    pub async fn intro(&mut self) {
        let max = self.max_value;
        self.append(Batch::Unkeyed(vec![0.0, max, 0.0, max])).await;
    }

    /// Whether the refresh timer is currently running.
    pub fn is_running(&self) -> bool {
        self.driver.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the widget: cancel the refresh timer immediately.  (The poll
    /// timer belongs to the scheduler and stops when its receiver drops.)
    pub fn stop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }

    fn arm(&mut self, force: bool) {
        if self.is_running() {
            if !force {
                return;
            }
            // With a stale clock the running driver has either rendered its
            // stale frame and is exiting, or was just armed and has not
            // ticked yet.  Replace it outright instead of racing its
            // shutdown; only ever one interval per widget.
            if let Some(old) = self.driver.take() {
                old.abort();
            }
        }
        debug!("arming refresh timer");

        let inner = Arc::clone(&self.inner);
        let period = self.refresh;
        self.driver = Some(tokio::spawn(async move {
            let mut ticker = time::interval(period);
            loop {
                ticker.tick().await;

                let mut gauge = inner.lock().await;
                let Inner {
                    buffer,
                    clock,
                    renderer,
                } = &mut *gauge;

                let reading = clock.tick(buffer);
                if let Err(e) = renderer.draw(&reading) {
                    // Never let a per-tick failure stop the loop; the last
                    // drawn value simply holds.
                    warn!("render failed: {e}");
                }
                if reading.stale {
                    debug!("display stale; releasing refresh timer");
                    break;
                }
            }
        }));
    }
}

impl Drop for Gauge {
    fn drop(&mut self) {
        self.stop();
    }
}
