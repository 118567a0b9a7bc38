// flight_reservation/src/payment/credit_card.rs

//! Balance-bearing card payments.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use super::backend::BalanceLedger;
use super::strategy::PaymentStrategy;
use crate::error::{RejectionReason, ReservationError, Result};

const METHOD_NAME: &str = "Credit Card";

/// A payment card as presented by the customer.
#[derive(Clone, PartialEq, Eq)]
pub struct CreditCard {
  number: String,
  expires_on: NaiveDate,
  cvv: String,
}

impl CreditCard {
  /// `expires_on` is the last day the card may be charged. Spaces in `number` are ignored.
  pub fn new(number: impl AsRef<str>, expires_on: NaiveDate, cvv: impl Into<String>) -> Self {
    Self {
      number: number.as_ref().chars().filter(|c| !c.is_whitespace()).collect(),
      expires_on,
      cvv: cvv.into(),
    }
  }

  pub fn number(&self) -> &str {
    &self.number
  }

  pub fn expires_on(&self) -> NaiveDate {
    self.expires_on
  }

  /// Structural check: 13 to 19 digits passing Luhn, a 3 or 4 digit CVV, not expired on `today`.
  pub fn is_valid_on(&self, today: NaiveDate) -> bool {
    let number_ok = (13..=19).contains(&self.number.len()) && luhn_checksum_ok(&self.number);
    let cvv_ok = (3..=4).contains(&self.cvv.len()) && self.cvv.bytes().all(|b| b.is_ascii_digit());
    number_ok && cvv_ok && today <= self.expires_on
  }

  fn masked_number(&self) -> String {
    let hidden = self.number.chars().count().saturating_sub(4);
    format!("****{}", self.number.chars().skip(hidden).collect::<String>())
  }
}

impl std::fmt::Debug for CreditCard {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CreditCard")
      .field("number", &self.masked_number())
      .field("expires_on", &self.expires_on)
      .finish_non_exhaustive()
  }
}

fn luhn_checksum_ok(number: &str) -> bool {
  if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
    return false;
  }
  let sum: u32 = number
    .bytes()
    .rev()
    .enumerate()
    .map(|(idx, b)| {
      let digit = u32::from(b - b'0');
      if idx % 2 == 1 {
        let doubled = digit * 2;
        if doubled > 9 {
          doubled - 9
        } else {
          doubled
        }
      } else {
        digit
      }
    })
    .sum();
  sum % 10 == 0
}

/// Charges a `CreditCard` against the issuer's `BalanceLedger`.
///
/// The charge is rejected when it would take the balance below zero, and negative
/// amounts are refused before the ledger is touched.
///
/// The balance is read and then written back through two ledger calls. Keeping that
/// pair atomic across orders charging the same card is the ledger's job; the per-order
/// lock in `FlightOrder` only serializes attempts on one order.
#[derive(Debug, Clone)]
pub struct CreditCardPayment {
  card: CreditCard,
  ledger: Arc<dyn BalanceLedger>,
}

impl CreditCardPayment {
  pub fn new(card: CreditCard, ledger: Arc<dyn BalanceLedger>) -> Self {
    Self { card, ledger }
  }

  pub fn card(&self) -> &CreditCard {
    &self.card
  }

  /// Current balance of the card as recorded by the issuer.
  pub fn balance(&self) -> Result<Option<Decimal>> {
    self.ledger.balance(self.card.number()).map_err(|source| ReservationError::PaymentBackend {
      method: METHOD_NAME.to_string(),
      source,
    })
  }
}

impl PaymentStrategy for CreditCardPayment {
  fn validate(&self) -> bool {
    if !self.card.is_valid_on(Utc::now().date_naive()) {
      debug!(card = ?self.card, "Card failed structural validation.");
      return false;
    }
    match self.ledger.balance(self.card.number()) {
      Ok(known) => known.is_some(),
      Err(e) => {
        warn!(card = ?self.card, error = %e, "Issuer lookup failed during validation.");
        false
      }
    }
  }

  #[instrument(name = "CreditCardPayment::pay", skip(self), fields(card = ?self.card))]
  fn pay(&self, amount: Decimal) -> Result<bool> {
    if amount < Decimal::ZERO {
      warn!(%amount, "Refusing negative charge.");
      return Err(ReservationError::rejected(METHOD_NAME, RejectionReason::InvalidAmount { amount }));
    }
    if !self.validate() {
      return Err(ReservationError::rejected(METHOD_NAME, RejectionReason::InvalidCredentials));
    }
    let balance = self
      .balance()?
      .ok_or_else(|| ReservationError::rejected(METHOD_NAME, RejectionReason::InvalidCredentials))?;

    let remaining = balance - amount;
    if remaining < Decimal::ZERO {
      warn!(%balance, %amount, "Card limit reached.");
      return Err(ReservationError::rejected(
        METHOD_NAME,
        RejectionReason::InsufficientFunds { balance, amount },
      ));
    }

    self
      .ledger
      .set_balance(self.card.number(), remaining)
      .map_err(|source| ReservationError::PaymentBackend {
        method: METHOD_NAME.to_string(),
        source,
      })?;
    info!(%amount, %remaining, "Paid using credit card.");
    Ok(true)
  }

  fn name(&self) -> &str {
    METHOD_NAME
  }
}
