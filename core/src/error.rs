// flight_reservation/src/error.rs
use anyhow::Error as AnyhowError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::pipeline::PipelineError;

/// Why a payment strategy refused to charge.
///
/// A bad credential or amount should not be retried with the same strategy, while
/// insufficient funds can be recovered by offering another payment method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
  #[error("payment information is not valid")]
  InvalidCredentials,

  #[error("insufficient funds (balance {balance}, requested {amount})")]
  InsufficientFunds { balance: Decimal, amount: Decimal },

  /// Charges must be positive or zero; a negative charge would credit the instrument.
  #[error("amount {amount} cannot be charged")]
  InvalidAmount { amount: Decimal },
}

impl RejectionReason {
  /// True when the caller should offer an alternate payment method rather than abort.
  pub fn suggests_alternate_method(&self) -> bool {
    matches!(self, RejectionReason::InsufficientFunds { .. })
  }
}

#[derive(Debug, Error)]
pub enum ReservationError {
  /// Payment processing was requested but no strategy is configured on the order.
  #[error("No payment strategy has been set.")]
  MissingPaymentStrategy,

  #[error("Payment rejected by {method}: {reason}")]
  PaymentRejected { method: String, reason: RejectionReason },

  #[error("Payment backend failure for {method}. Source: {source}")]
  PaymentBackend {
    method: String,
    #[source]
    source: AnyhowError,
  },

  /// The order context handed to the pipeline lacks a required part.
  #[error("Order context is missing: {missing}")]
  PipelineInput { missing: &'static str },

  #[error("Pipeline assembly error: {0}")]
  Pipeline(#[from] PipelineError),

  #[error("Order rejected: {reason}")]
  OrderRejected { reason: String },

  #[error("Invalid flight: {0}")]
  InvalidFlight(String),

  #[error("Configuration error: {0}")]
  Config(String),
}

impl ReservationError {
  pub(crate) fn rejected(method: &str, reason: RejectionReason) -> Self {
    ReservationError::PaymentRejected {
      method: method.to_string(),
      reason,
    }
  }

  /// The rejection reason, if this error is a payment rejection.
  pub fn rejection_reason(&self) -> Option<&RejectionReason> {
    match self {
      ReservationError::PaymentRejected { reason, .. } => Some(reason),
      _ => None,
    }
  }
}

pub type Result<T, E = ReservationError> = std::result::Result<T, E>;
