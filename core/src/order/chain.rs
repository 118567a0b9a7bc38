// flight_reservation/src/order/chain.rs

use std::sync::Arc;

use tracing::{event, instrument, Level};

use super::confirmation::ConfirmationSink;
use super::context::OrderContext;
use super::stages;
use crate::error::{ReservationError, Result};
use crate::pipeline::{Pipeline, PipelineResult};

pub const VALIDATION_STEP: &str = "validation";
pub const PAYMENT_STEP: &str = "payment";
pub const CLOSURE_STEP: &str = "closure";
pub const CONFIRMATION_STEP: &str = "confirmation";

/// The order-processing chain: validation, payment, closure, confirmation.
///
/// Assembled once, at construction, and immutable afterwards.
pub struct OrderChain {
  pipeline: Pipeline<OrderContext, ReservationError>,
}

impl OrderChain {
  pub fn new(confirmations: Arc<dyn ConfirmationSink>) -> Result<Self> {
    let pipeline = Pipeline::<OrderContext, ReservationError>::builder(&[
      (VALIDATION_STEP, false),
      (PAYMENT_STEP, false),
      (CLOSURE_STEP, false),
      (CONFIRMATION_STEP, false),
    ])
    .on(VALIDATION_STEP, stages::validate)
    .on(PAYMENT_STEP, stages::charge)
    .on(CLOSURE_STEP, stages::close)
    .on(CONFIRMATION_STEP, move |ctx: &mut OrderContext| {
      stages::confirm(ctx, confirmations.as_ref())
    })
    .build()?;
    Ok(Self { pipeline })
  }

  pub fn step_names(&self) -> impl Iterator<Item = &str> {
    self.pipeline.step_names()
  }

  /// Drives `ctx` through the chain.
  ///
  /// The answer is the context's success flag, whether the walk completed or a stage
  /// stopped it. Faults propagate unchanged.
  #[instrument(name = "OrderChain::run", skip_all, fields(order_id = ?ctx.order().map(|o| o.id())))]
  pub fn run(&self, ctx: &mut OrderContext) -> Result<bool> {
    let result = self.pipeline.run(ctx)?;
    if result == PipelineResult::Stopped {
      event!(Level::DEBUG, success = ctx.is_success(), "Order chain stopped early.");
    }
    Ok(ctx.is_success())
  }
}

impl std::fmt::Debug for OrderChain {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OrderChain").field("pipeline", &self.pipeline).finish()
  }
}
