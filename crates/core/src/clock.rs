use std::collections::VecDeque;

use rand::Rng;

use crate::buffer::SampleBuffer;
use crate::error::Result;
use crate::options::GaugeOptions;
use crate::sample::Sample;

/// What the gauge should display for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Interpolated (and possibly jittered) value, clamped to `[0, max_value]`.
    pub value: f64,
    /// The value the display is moving toward (post smoothing).  Stable for
    /// a whole dwell period, so numeric labels read from this rather than
    /// the flickering per-tick `value`.
    pub target: f64,
    /// `true` once no fresh sample has arrived within the stale window.
    /// The tick driver must stop its timer when it sees this; the renderer
    /// draws the frozen value with a de-emphasized treatment.
    pub stale: bool,
}

/// Fixed-rate animation state machine for one gauge.
///
/// Each call to [`tick`](AnimationClock::tick) advances one refresh step:
///
/// - **Interpolating** — between two real samples the displayed value moves
///   linearly from the previous target to the next over `min_data_period`.
/// - **Advancing** — once the dwell period has elapsed and the buffer has a
///   pending sample, the target shifts and the step counter resets.
/// - **Starving** — dwell elapsed but the buffer is empty: hold the target
///   value and keep counting.
/// - **Stale** — starving past `data_stale_period`: freeze and tell the
///   driver to release its timer.  A fresh append re-arms the clock from
///   outside; the clock itself never restarts.
#[derive(Debug)]
pub struct AnimationClock {
    max_value: f64,
    jitter_percent: f64,
    use_smoothing: bool,
    history_len: usize,
    /// Refresh steps per real data value (`min_data_period / refresh_period`).
    min_steps: f64,
    /// Refresh steps until staleness (`data_stale_period / refresh_period`).
    max_steps: f64,

    steps: u64,
    stale: bool,
    current: f64,
    next: f64,
    history: VecDeque<f64>,
}

impl AnimationClock {
    /// Build a clock from validated options; invalid combinations are fatal.
    pub fn new(opts: &GaugeOptions) -> Result<Self> {
        opts.validate()?;
        Ok(Self {
            max_value: opts.max_value,
            jitter_percent: opts.jitter_percent,
            use_smoothing: opts.use_max_value_smoothing,
            history_len: opts.max_value_smoothing_history,
            min_steps: opts.min_data_period / opts.refresh_period,
            max_steps: opts.data_stale_period / opts.refresh_period,
            steps: 0,
            stale: true,
            current: 0.0,
            next: 0.0,
            history: VecDeque::new(),
        })
    }

    /// Advance one refresh step, pulling from `buffer` when the dwell period
    /// allows, and return the value to display.
    pub fn tick(&mut self, buffer: &mut SampleBuffer) -> Reading {
        self.tick_with(buffer, &mut rand::rng())
    }

    fn tick_with<R: Rng>(&mut self, buffer: &mut SampleBuffer, rng: &mut R) -> Reading {
        self.steps += 1;

        let mut value;
        if !self.stale && (self.steps as f64) < self.min_steps {
            // Take one more step toward the target.
            let diff = self.next - self.current;
            value = self.current + diff * self.steps as f64 / self.min_steps;
        } else if let Some(sample) = buffer.take_next() {
            // Dwell over (or first data ever) — shift to a new target.
            self.steps = 0;
            self.stale = false;
            self.current = self.next;
            self.next = self.smoothed_target(sample);
            value = self.current;
        } else {
            // Starving: hold the target until the stale window runs out.
            if self.steps as f64 > self.max_steps {
                tracing::debug!("no data within stale window; display going stale");
                self.stale = true;
            }
            value = self.next;
        }

        // Jitter after smoothing, before clamping.  The ordering is load
        // bearing for the displayed output; don't swap these.
        if !self.stale && self.jitter_percent > 0.0 {
            let reach = self.max_value * self.jitter_percent;
            value = (value - reach) + 2.0 * reach * rng.random::<f64>();
        }

        Reading {
            value: value.clamp(0.0, self.max_value),
            target: self.next,
            stale: self.stale,
        }
    }

    fn smoothed_target(&mut self, sample: Sample) -> f64 {
        if !self.use_smoothing {
            return sample.value;
        }
        self.history.push_back(sample.value);
        if self.history.len() > self.history_len {
            self.history.pop_front();
        }
        self.history.iter().copied().fold(f64::MIN, f64::max)
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// The value the display is currently moving toward.
    pub fn target(&self) -> f64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Batch;

    fn quiet_opts() -> GaugeOptions {
        // jitter off and smoothing off for deterministic values
        GaugeOptions {
            max_value: 100.0,
            jitter_percent: 0.0,
            refresh_period: 0.1,
            min_data_period: 2.0,
            data_stale_period: 15.0,
            use_max_value_smoothing: false,
            ..Default::default()
        }
    }

    fn keyed(pairs: &[(f64, f64)]) -> Batch {
        Batch::Keyed(pairs.iter().map(|&(t, v)| Sample::new(t, v)).collect())
    }

    #[test]
    fn invalid_options_refuse_construction() {
        let opts = GaugeOptions {
            min_data_period: 1.0,
            refresh_period: 2.0,
            ..Default::default()
        };
        assert!(AnimationClock::new(&opts).is_err());
    }

    #[test]
    fn starts_stale_at_zero() {
        let clock = AnimationClock::new(&quiet_opts()).unwrap();
        assert!(clock.is_stale());
        assert_eq!(clock.target(), 0.0);
    }

    #[test]
    fn first_tick_consumes_and_emits_previous_target() {
        let mut clock = AnimationClock::new(&quiet_opts()).unwrap();
        let mut buf = SampleBuffer::new();
        buf.append(keyed(&[(1.0, 10.0)]));

        let reading = clock.tick(&mut buf);
        assert_eq!(
            reading,
            Reading {
                value: 0.0,
                target: 10.0,
                stale: false
            }
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn dwell_is_twenty_ticks_at_default_cadence() {
        // min_data_period=2, refresh_period=0.1 → 20 steps per value
        let mut clock = AnimationClock::new(&quiet_opts()).unwrap();
        let mut buf = SampleBuffer::new();
        buf.append(keyed(&[(1.0, 10.0), (2.0, 20.0)]));

        clock.tick(&mut buf); // consumes (1.0, 10.0)

        // 19 interpolation ticks from 0 toward 10, in 0.5 increments.
        for step in 1..20u32 {
            let reading = clock.tick(&mut buf);
            assert!(!reading.stale);
            let expected = 10.0 * f64::from(step) / 20.0;
            assert!(
                (reading.value - expected).abs() < 1e-9,
                "step {step}: got {}, expected {expected}",
                reading.value
            );
            assert_eq!(reading.target, 10.0, "consumed early at step {step}");
        }

        // The 20th tick lands on the old target and consumes the next sample.
        let reading = clock.tick(&mut buf);
        assert_eq!(reading.value, 10.0);
        assert_eq!(clock.target(), 20.0);
    }

    #[test]
    fn equal_current_and_next_holds_flat() {
        let mut clock = AnimationClock::new(&quiet_opts()).unwrap();
        let mut buf = SampleBuffer::new();
        buf.append(keyed(&[(1.0, 0.0)]));
        clock.tick(&mut buf);
        for _ in 0..10 {
            assert_eq!(clock.tick(&mut buf).value, 0.0);
        }
    }

    #[test]
    fn starving_holds_target_then_goes_stale() {
        // data_stale_period=15, refresh_period=0.1 → stale after 151 empty ticks
        let mut clock = AnimationClock::new(&quiet_opts()).unwrap();
        let mut buf = SampleBuffer::new();
        buf.append(Batch::from(50.0));
        clock.tick(&mut buf); // consume; steps reset

        for tick in 1..=150u32 {
            let reading = clock.tick(&mut buf);
            assert!(!reading.stale, "went stale early at tick {tick}");
        }
        let reading = clock.tick(&mut buf);
        assert!(reading.stale);
        assert_eq!(reading.value, 50.0, "stale display freezes at the target");
    }

    #[test]
    fn fresh_data_after_stale_resumes() {
        let mut clock = AnimationClock::new(&quiet_opts()).unwrap();
        let mut buf = SampleBuffer::new();
        buf.append(keyed(&[(1.0, 50.0)]));
        clock.tick(&mut buf);
        for _ in 0..151 {
            clock.tick(&mut buf);
        }
        assert!(clock.is_stale());

        buf.append(keyed(&[(2.0, 80.0)]));
        let reading = clock.tick(&mut buf);
        assert!(!reading.stale);
        assert_eq!(clock.target(), 80.0);
    }

    #[test]
    fn smoothing_takes_max_over_window() {
        let opts = GaugeOptions {
            use_max_value_smoothing: true,
            max_value_smoothing_history: 3,
            ..quiet_opts()
        };
        let mut clock = AnimationClock::new(&opts).unwrap();
        let mut buf = SampleBuffer::new();

        let mut targets = Vec::new();
        for (i, raw) in [10.0, 50.0, 20.0, 5.0].into_iter().enumerate() {
            buf.append(keyed(&[(i as f64 + 1.0, raw)]));
            clock.tick(&mut buf); // consume tick
            targets.push(clock.target());
            for _ in 1..20 {
                clock.tick(&mut buf); // run out the dwell period
            }
        }
        assert_eq!(targets, vec![10.0, 50.0, 50.0, 50.0]);
    }

    #[test]
    fn jittered_values_stay_clamped() {
        let opts = GaugeOptions {
            max_value: 100.0,
            jitter_percent: 0.05,
            use_max_value_smoothing: false,
            ..quiet_opts()
        };
        let mut clock = AnimationClock::new(&opts).unwrap();
        let mut buf = SampleBuffer::new();

        // Targets at both clamp edges so jitter pushes out of range.
        buf.append(Batch::Unkeyed(vec![0.0, 100.0, 0.0, 100.0]));
        for _ in 0..200 {
            let reading = clock.tick(&mut buf);
            assert!(
                (0.0..=100.0).contains(&reading.value),
                "value {} escaped clamp",
                reading.value
            );
        }
    }

    #[test]
    fn stale_reading_is_never_jittered() {
        let opts = GaugeOptions {
            jitter_percent: 0.5,
            ..quiet_opts()
        };
        let mut clock = AnimationClock::new(&opts).unwrap();
        let mut buf = SampleBuffer::new();
        buf.append(Batch::from(50.0));
        clock.tick(&mut buf);
        for _ in 0..151 {
            clock.tick(&mut buf);
        }
        let a = clock.tick(&mut buf);
        let b = clock.tick(&mut buf);
        assert!(a.stale && b.stale);
        assert_eq!(a.value, 50.0);
        assert_eq!(b.value, 50.0);
    }
}
