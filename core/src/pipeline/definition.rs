// flight_reservation/src/pipeline/definition.rs

//! Contains the `Pipeline<TCtx, Err>` struct and the builder that assembles it.
//!
//! A pipeline is assembled exactly once. After `PipelineBuilder::build` succeeds the
//! step order and handlers are frozen; there are no insert/remove operations on a
//! built pipeline.

use std::collections::HashMap;

use tracing::{event, Level};

use super::control::PipelineControl;
use super::error::PipelineError;
use super::step::{Handler, StepDef};

/// An ordered, immutable sequence of named steps, each backed by one or more handlers.
///
/// `TCtx` is the context type every handler receives by mutable reference.
/// `Err` is the error type handlers return; it must be constructible from `PipelineError`.
pub struct Pipeline<TCtx, Err>
where
  TCtx: 'static,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef>,
  pub(crate) handlers: HashMap<String, Vec<Handler<TCtx, Err>>>,
}

impl<TCtx, Err> Pipeline<TCtx, Err>
where
  TCtx: 'static,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Starts assembling a pipeline from `(step name, optional)` pairs, in execution order.
  pub fn builder(step_defs: &[(&str, bool)]) -> PipelineBuilder<TCtx, Err> {
    PipelineBuilder::new(step_defs)
  }

  /// Step names in execution order.
  pub fn step_names(&self) -> impl Iterator<Item = &str> {
    self.steps.iter().map(|s| s.name.as_str())
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }
}

impl<TCtx, Err> std::fmt::Debug for Pipeline<TCtx, Err>
where
  TCtx: 'static,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("steps", &self.steps)
      .field(
        "handler_counts",
        &self
          .steps
          .iter()
          .map(|s| self.handlers.get(&s.name).map_or(0, Vec::len))
          .collect::<Vec<_>>(),
      )
      .finish()
  }
}

/// Collects step definitions and handlers, then validates them into a `Pipeline`.
///
/// Registration errors (unknown or duplicate steps) are remembered and reported by
/// `build`, so assembly reads as a single fluent chain.
pub struct PipelineBuilder<TCtx, Err>
where
  TCtx: 'static,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  steps: Vec<StepDef>,
  handlers: HashMap<String, Vec<Handler<TCtx, Err>>>,
  first_error: Option<PipelineError>,
}

impl<TCtx, Err> PipelineBuilder<TCtx, Err>
where
  TCtx: 'static,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub fn new(step_defs: &[(&str, bool)]) -> Self {
    let mut builder = Self {
      steps: Vec::with_capacity(step_defs.len()),
      handlers: HashMap::new(),
      first_error: None,
    };
    for (name, optional) in step_defs {
      builder = builder.step(*name, *optional);
    }
    builder
  }

  /// Appends a step definition after the ones already declared.
  pub fn step(mut self, name: impl Into<String>, optional: bool) -> Self {
    let name = name.into();
    if self.steps.iter().any(|s| s.name == name) {
      self.record(PipelineError::DuplicateStep { step_name: name });
      return self;
    }
    self.steps.push(StepDef::new(name, optional));
    self
  }

  /// Registers a handler for a declared step. Handlers of one step run in registration order.
  pub fn on<UserErr>(
    mut self,
    step_name: &str,
    handler_fn: impl Fn(&mut TCtx) -> Result<PipelineControl, UserErr> + Send + Sync + 'static,
  ) -> Self
  where
    UserErr: Into<Err> + 'static,
  {
    if !self.steps.iter().any(|s| s.name == step_name) {
      self.record(PipelineError::StepNotFound {
        step_name: step_name.to_string(),
      });
      return self;
    }
    let handler: Handler<TCtx, Err> = Box::new(move |ctx| handler_fn(ctx).map_err(Into::into));
    self.handlers.entry(step_name.to_string()).or_default().push(handler);
    self
  }

  /// Validates the assembly and freezes it.
  pub fn build(self) -> Result<Pipeline<TCtx, Err>, PipelineError> {
    if let Some(err) = self.first_error {
      event!(Level::ERROR, error = %err, "Pipeline assembly failed.");
      return Err(err);
    }
    for step in &self.steps {
      let has_handlers = self.handlers.get(&step.name).is_some_and(|v| !v.is_empty());
      if !has_handlers && !step.optional {
        event!(Level::ERROR, step_name = %step.name, "Non-optional step has no handlers.");
        return Err(PipelineError::HandlerMissing {
          step_name: step.name.clone(),
        });
      }
    }
    event!(Level::DEBUG, num_steps = self.steps.len(), "Pipeline assembled.");
    Ok(Pipeline {
      steps: self.steps,
      handlers: self.handlers,
    })
  }

  fn record(&mut self, err: PipelineError) {
    if self.first_error.is_none() {
      self.first_error = Some(err);
    }
  }
}
