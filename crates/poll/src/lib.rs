pub mod payload;
pub mod scheduler;

pub use payload::decode;
pub use scheduler::PollScheduler;
