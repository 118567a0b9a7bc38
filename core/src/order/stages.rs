// flight_reservation/src/order/stages.rs

//! The individual order-processing stages.
//!
//! Each stage inspects and updates an `OrderContext` and tells the caller whether to go
//! on. `OrderChain` runs all four through the pipeline engine; `FlightOrder::process_payment`
//! runs the first three directly. Both share these functions.

use chrono::Utc;
use tracing::{debug, warn};

use super::confirmation::{Confirmation, ConfirmationSink};
use super::context::OrderContext;
use crate::error::{RejectionReason, ReservationError, Result};
use crate::pipeline::PipelineControl;

fn missing(what: &'static str) -> ReservationError {
  ReservationError::PipelineInput { missing: what }
}

/// Stops with success on a closed order, fails fast on missing input or invalid payment
/// information, continues otherwise.
pub fn validate(ctx: &mut OrderContext) -> Result<PipelineControl> {
  let order = ctx.order().ok_or_else(|| missing("order"))?;
  if order.is_closed() {
    debug!(order_id = %order.id(), "Order already closed; reporting success without charging.");
    ctx.mark_success();
    return Ok(PipelineControl::Stop);
  }

  let strategy = ctx.payment_strategy().ok_or(ReservationError::MissingPaymentStrategy)?;
  if !strategy.validate() {
    warn!(order_id = %order.id(), method = strategy.name(), "Payment information is not valid.");
    return Err(ReservationError::rejected(
      strategy.name(),
      RejectionReason::InvalidCredentials,
    ));
  }
  Ok(PipelineControl::Continue)
}

/// Charges the order's price and records the outcome. Continues only if paid.
pub fn charge(ctx: &mut OrderContext) -> Result<PipelineControl> {
  let price = ctx.order().ok_or_else(|| missing("order"))?.price();
  let strategy = ctx
    .payment_strategy()
    .ok_or(ReservationError::MissingPaymentStrategy)?;
  let paid = strategy.pay(price)?;
  debug!(%price, method = strategy.name(), paid, "Charge attempted.");
  ctx.record_charge(paid);
  Ok(PipelineControl::continue_if(paid))
}

/// Closes the order after a successful charge; the signal mirrors the success flag.
pub fn close(ctx: &mut OrderContext) -> Result<PipelineControl> {
  let success = ctx.is_success();
  if success {
    let order = ctx.order_mut().ok_or_else(|| missing("order"))?;
    order.close();
    debug!(order_id = %order.id(), "Order closed.");
  }
  Ok(PipelineControl::continue_if(success))
}

/// Emits a confirmation for a successful order. Never changes the outcome.
pub fn confirm(ctx: &mut OrderContext, sink: &dyn ConfirmationSink) -> Result<PipelineControl> {
  if ctx.is_success() {
    let order = ctx.order().ok_or_else(|| missing("order"))?;
    let payment_method = ctx
      .payment_strategy()
      .map_or_else(String::new, |s| s.name().to_string());
    sink.confirm(&Confirmation {
      order_id: order.id(),
      amount: order.price(),
      payment_method,
      confirmed_at: Utc::now(),
    });
  }
  Ok(PipelineControl::continue_if(ctx.is_success()))
}
