#![forbid(unsafe_code)]

//! Runtime engine for executing tollgate workflows.
//!
//! Definition parsing and validation live in `tollgate-core`; this crate
//! owns step execution, calldata encoding, and the collaborator traits the
//! surrounding platform implements.

pub mod calldata;
pub mod executor;
pub mod http;
pub mod proxy;
pub mod retry;
pub mod transaction;

pub use crate::executor::{
    Engine, EngineConfig, Event, EventSink, ExternalCallError, NoOpEventSink, RunResult,
    StdoutEventSink, StepError, StepRecord,
};
pub use crate::http::{HttpClient, HttpError, ReqwestHttpClient};
pub use crate::retry::RetryPolicy;
