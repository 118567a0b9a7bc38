// flight_reservation/src/pipeline/step.rs

//! Step definitions and the handler type run for each step.

use super::control::PipelineControl;

/// Type alias for a pipeline step handler.
///
/// A handler borrows the pipeline context mutably for the duration of its call and
/// returns `Continue` to proceed or `Stop` to halt the pipeline. An `Err` aborts the
/// run and is returned to the caller unchanged.
pub type Handler<TCtx, Err> = Box<dyn Fn(&mut TCtx) -> Result<PipelineControl, Err> + Send + Sync>;

/// Definition of a pipeline step: its name and whether it may be left without handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  pub name: String,
  pub optional: bool,
}

impl StepDef {
  pub fn new(name: impl Into<String>, optional: bool) -> Self {
    Self {
      name: name.into(),
      optional,
    }
  }
}
