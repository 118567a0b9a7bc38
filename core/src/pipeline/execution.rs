// flight_reservation/src/pipeline/execution.rs

//! Contains `Pipeline::run()`, which walks the steps and their handlers in order.

use tracing::{event, instrument, span, Level};

use super::control::{PipelineControl, PipelineResult};
use super::definition::Pipeline;
use super::error::PipelineError;

impl<TCtx, Err> Pipeline<TCtx, Err>
where
  TCtx: 'static,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Executes the pipeline against `ctx`.
  ///
  /// Steps run head first. A handler returning `Stop` ends the walk with
  /// `PipelineResult::Stopped`; later handlers and steps are skipped, not failed.
  /// A handler error ends the walk and is returned as is.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      pipeline_context_type = %std::any::type_name::<TCtx>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub fn run(&self, ctx: &mut TCtx) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step_def.name.as_str(),
        step_index = step_idx,
        optional = step_def.optional
      );
      let _step_span_guard = step_span.enter();

      let Some(handlers) = self.handlers.get(&step_def.name).filter(|v| !v.is_empty()) else {
        // build() guarantees this is an optional step.
        event!(Level::DEBUG, "Optional step has no handlers, skipping.");
        continue;
      };

      for (handler_idx, handler_fn) in handlers.iter().enumerate() {
        match handler_fn(ctx) {
          Ok(PipelineControl::Continue) => {}
          Ok(PipelineControl::Stop) => {
            event!(Level::INFO, handler_index = handler_idx, "Pipeline stopped by a handler.");
            return Ok(PipelineResult::Stopped);
          }
          Err(e) => {
            event!(Level::ERROR, handler_index = handler_idx, error = %e, "Handler failed.");
            return Err(e);
          }
        }
      }
      event!(Level::DEBUG, "Step processing finished successfully.");
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(PipelineResult::Completed)
  }
}
