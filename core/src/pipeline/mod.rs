// flight_reservation/src/pipeline/mod.rs

//! A small synchronous step engine: named steps, handlers that continue or stop,
//! assembled once and run against a mutable context.

pub mod control;
pub mod definition;
pub mod error;
pub mod execution;
pub mod step;

pub use control::{PipelineControl, PipelineResult};
pub use definition::{Pipeline, PipelineBuilder};
pub use error::PipelineError;
pub use step::{Handler, StepDef};
