// flight_reservation/src/order/confirmation.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

/// Record emitted once an order has been paid and closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
  pub order_id: Uuid,
  pub amount: Decimal,
  pub payment_method: String,
  pub confirmed_at: DateTime<Utc>,
}

/// Destination for confirmations. Reporting only: a sink cannot fail the order.
pub trait ConfirmationSink: Send + Sync {
  fn confirm(&self, confirmation: &Confirmation);
}

/// Default sink; writes confirmations to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingConfirmationSink;

impl ConfirmationSink for TracingConfirmationSink {
  fn confirm(&self, confirmation: &Confirmation) {
    info!(
      order_id = %confirmation.order_id,
      amount = %confirmation.amount,
      payment_method = %confirmation.payment_method,
      confirmed_at = %confirmation.confirmed_at,
      "Order processed successfully."
    );
  }
}
