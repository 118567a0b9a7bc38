// flight_reservation/src/pipeline/control.rs

//! Signals for controlling pipeline flow and the outcome of a pipeline run.

/// Signal from a handler indicating whether the pipeline should continue or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Continue with the remaining handlers of this step and the steps after it.
  Continue,
  /// Halt the pipeline. No further handlers in the current step or later steps run.
  Stop,
}

impl PipelineControl {
  /// `Continue` when `flag` is true, `Stop` otherwise.
  pub fn continue_if(flag: bool) -> Self {
    if flag {
      PipelineControl::Continue
    } else {
      PipelineControl::Stop
    }
  }
}

/// Outcome of a full pipeline execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every step ran to completion.
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}
