// flight_reservation/src/pipeline/error.rs
use thiserror::Error;

/// Errors raised by the pipeline engine itself, as opposed to errors returned by handlers.
///
/// Handler error types must be `From<PipelineError>` so assembly problems can travel
/// through the same channel as business failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Step declared more than once: {step_name}")]
  DuplicateStep { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },
}
