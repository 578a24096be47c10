mod engine;
mod error;
pub mod events;
mod http_step;
mod local_steps;
mod onchain_step;
mod result;

pub use engine::{Engine, EngineConfig};
pub use error::{ExternalCallError, StepError};
pub use events::{Event, EventSink, NoOpEventSink, StdoutEventSink};
pub use result::{RunResult, StepRecord};
