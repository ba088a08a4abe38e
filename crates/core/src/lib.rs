pub mod buffer;
pub mod clock;
pub mod error;
pub mod options;
pub mod sample;

pub use buffer::SampleBuffer;
pub use clock::{AnimationClock, Reading};
pub use error::{Result, SpeedoError};
pub use options::{GaugeOptions, StyleOptions};
pub use sample::{Batch, Sample};
