pub mod gauge;
pub mod render;

pub use gauge::Gauge;
pub use render::{LabelRenderer, Renderer};
