use std::collections::VecDeque;

use crate::sample::{Batch, Sample};

/// Ordered queue of pending samples for one gauge instance.
///
/// The producer (poll task) appends at the tail, the consumer (animation
/// tick) pops from the front.  Timestamps are strictly increasing: a keyed
/// sample whose timestamp is at or below the last accepted key is an
/// old/duplicate retransmission and is dropped.
///
/// The buffer never drives the display itself — arming the refresh timer on
/// first data arrival is the owning widget's job.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    pending: VecDeque<Sample>,
    last_key: f64,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of samples, returning how many were accepted.
    ///
    /// Keyed batches have their leading stale entries (timestamp ≤ last
    /// accepted key) filtered out before the survivors are queued.  Unkeyed
    /// values carry no upstream key; each one is assigned `last_key + 1` so
    /// the ordering invariant holds for them too.  An empty batch is a no-op.
    pub fn append(&mut self, batch: Batch) -> usize {
        match batch {
            Batch::Keyed(samples) => {
                let stale = samples
                    .iter()
                    .take_while(|s| s.timestamp <= self.last_key)
                    .count();
                if stale > 0 {
                    tracing::debug!(dropped = stale, "dropped old/duplicate samples");
                }

                let fresh = &samples[stale..];
                if let Some(last) = fresh.last() {
                    self.last_key = last.timestamp;
                }
                self.pending.extend(fresh.iter().copied());
                fresh.len()
            }
            Batch::Unkeyed(values) => {
                let accepted = values.len();
                for value in values {
                    self.last_key += 1.0;
                    self.pending.push_back(Sample::new(self.last_key, value));
                }
                accepted
            }
        }
    }

    /// Remove and return the oldest pending sample.
    pub fn take_next(&mut self) -> Option<Sample> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Timestamp of the newest sample ever accepted.
    pub fn last_key(&self) -> f64 {
        self.last_key
    }
}
