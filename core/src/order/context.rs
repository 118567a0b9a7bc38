// flight_reservation/src/order/context.rs

//! The per-attempt carrier handed from stage to stage.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::payment::PaymentStrategy;

/// The payment-relevant part of an order: identity, amount due and the closed flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
  id: Uuid,
  price: Decimal,
  closed: bool,
}

impl OrderRecord {
  pub fn new(id: Uuid, price: Decimal) -> Self {
    Self {
      id,
      price,
      closed: false,
    }
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn price(&self) -> Decimal {
    self.price
  }

  pub fn is_closed(&self) -> bool {
    self.closed
  }

  /// Closing is terminal.
  pub(crate) fn close(&mut self) {
    self.closed = true;
  }
}

/// Single-use context for one payment attempt.
///
/// The payment strategy is captured when the context is built; reconfiguring the order
/// afterwards does not affect a run already in progress. `success` starts false and,
/// once true, stays true.
#[derive(Debug)]
pub struct OrderContext {
  order: Option<OrderRecord>,
  payment_strategy: Option<Arc<dyn PaymentStrategy>>,
  success: bool,
}

impl OrderContext {
  pub fn new(order: Option<OrderRecord>, payment_strategy: Option<Arc<dyn PaymentStrategy>>) -> Self {
    Self {
      order,
      payment_strategy,
      success: false,
    }
  }

  pub fn order(&self) -> Option<&OrderRecord> {
    self.order.as_ref()
  }

  pub(crate) fn order_mut(&mut self) -> Option<&mut OrderRecord> {
    self.order.as_mut()
  }

  pub fn payment_strategy(&self) -> Option<&Arc<dyn PaymentStrategy>> {
    self.payment_strategy.as_ref()
  }

  pub fn is_success(&self) -> bool {
    self.success
  }

  pub(crate) fn mark_success(&mut self) {
    self.success = true;
  }

  /// Records the outcome of a charge.
  pub(crate) fn record_charge(&mut self, paid: bool) {
    self.success |= paid;
  }

  pub fn into_order(self) -> Option<OrderRecord> {
    self.order
  }
}
