use serde::{Deserialize, Serialize};

/// One measurement point from the upstream data source.
///
/// `timestamp` is the archive key in seconds and must be strictly increasing
/// within a buffer; `value` is the measured rate (e.g. Mbps).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// One delivery of data to a [`SampleBuffer`](crate::SampleBuffer).
///
/// The upstream payload is either a sequence of `[timestamp, value]` pairs or
/// bare scalar values with no key of their own.  Keyed batches go through
/// duplicate filtering; unkeyed values get keys synthesized by the buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    /// Bare values in arrival order, no upstream timestamps.
    Unkeyed(Vec<f64>),
    /// Already-ordered `(timestamp, value)` samples.
    Keyed(Vec<Sample>),
}

impl Batch {
    pub fn len(&self) -> usize {
        match self {
            Batch::Unkeyed(values) => values.len(),
            Batch::Keyed(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<f64> for Batch {
    fn from(value: f64) -> Self {
        Batch::Unkeyed(vec![value])
    }
}
