// flight_reservation/src/payment/strategy.rs

//! The `PaymentStrategy` trait every payment method implements.

use rust_decimal::Decimal;

use crate::error::Result;

/// A pluggable payment algorithm for a fixed amount.
///
/// Implementations own only the instrument they were built with (a card, a credential
/// pair) and a handle to whatever backend they charge. They never see the order.
///
/// Calls are synchronous. A strategy whose backend never answers stalls its order;
/// callers that need a deadline must impose it around `pay`.
pub trait PaymentStrategy: Send + Sync + std::fmt::Debug {
  /// Whether the held instrument is present, well formed and currently acceptable.
  fn validate(&self) -> bool;

  /// Charges `amount`.
  ///
  /// Re-validates first and fails fast. Returns `Ok(true)` only after the irreversible
  /// effect happened. Refusals are `ReservationError::PaymentRejected`, with the reason
  /// telling a bad credential apart from missing funds. Never retries.
  fn pay(&self, amount: Decimal) -> Result<bool>;

  /// Human readable name of the payment method, e.g. "Credit Card".
  fn name(&self) -> &str;
}
