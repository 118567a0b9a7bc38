// flight_reservation/src/payment/paypal.rs

//! Credential-pair payments authorized against an account directory.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use super::backend::CredentialDirectory;
use super::strategy::PaymentStrategy;
use crate::error::{RejectionReason, ReservationError, Result};

const METHOD_NAME: &str = "PayPal";

/// Pays with an email/secret pair. There is no balance: a charge succeeds whenever the
/// credentials are authorized by the directory.
#[derive(Clone)]
pub struct PayPalPayment {
  email: String,
  secret: String,
  directory: Arc<dyn CredentialDirectory>,
}

impl PayPalPayment {
  pub fn new(email: impl Into<String>, secret: impl Into<String>, directory: Arc<dyn CredentialDirectory>) -> Self {
    Self {
      email: email.into(),
      secret: secret.into(),
      directory,
    }
  }

  pub fn email(&self) -> &str {
    &self.email
  }
}

impl std::fmt::Debug for PayPalPayment {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PayPalPayment")
      .field("email", &self.email)
      .finish_non_exhaustive()
  }
}

impl PaymentStrategy for PayPalPayment {
  fn validate(&self) -> bool {
    if self.email.is_empty() || self.secret.is_empty() {
      return false;
    }
    match self.directory.secret_for(&self.email) {
      Ok(stored) => stored.as_deref() == Some(self.secret.as_str()),
      Err(e) => {
        warn!(email = %self.email, error = %e, "Credential lookup failed during validation.");
        false
      }
    }
  }

  #[instrument(name = "PayPalPayment::pay", skip(self), fields(email = %self.email))]
  fn pay(&self, amount: Decimal) -> Result<bool> {
    if amount < Decimal::ZERO {
      return Err(ReservationError::rejected(METHOD_NAME, RejectionReason::InvalidAmount { amount }));
    }
    if !self.validate() {
      return Err(ReservationError::rejected(METHOD_NAME, RejectionReason::InvalidCredentials));
    }
    info!(%amount, "Paid using PayPal.");
    Ok(true)
  }

  fn name(&self) -> &str {
    METHOD_NAME
  }
}
