// flight_reservation/tests/payment_strategy_tests.rs
mod common;

use anyhow::anyhow;
use chrono::{Duration, Utc};
use common::*;
use flight_reservation::{
  BalanceLedger, CredentialDirectory, CreditCard, CreditCardPayment, InMemoryBalanceLedger,
  InMemoryCredentialDirectory, PayPalPayment, PaymentStrategy, RejectionReason, ReservationError,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serial_test::serial;
use std::sync::Arc;

/// Ledger whose backend is down.
#[derive(Debug)]
struct UnreachableLedger;

impl BalanceLedger for UnreachableLedger {
  fn balance(&self, _instrument: &str) -> anyhow::Result<Option<Decimal>> {
    Err(anyhow!("issuer unreachable"))
  }

  fn set_balance(&self, _instrument: &str, _balance: Decimal) -> anyhow::Result<()> {
    Err(anyhow!("issuer unreachable"))
  }
}

/// Ledger that answers reads but refuses writes.
#[derive(Debug)]
struct ReadOnlyLedger(InMemoryBalanceLedger);

impl BalanceLedger for ReadOnlyLedger {
  fn balance(&self, instrument: &str) -> anyhow::Result<Option<Decimal>> {
    self.0.balance(instrument)
  }

  fn set_balance(&self, _instrument: &str, _balance: Decimal) -> anyhow::Result<()> {
    Err(anyhow!("ledger is read-only"))
  }
}

fn ledger_with(balance: Decimal) -> Arc<InMemoryBalanceLedger> {
  Arc::new(InMemoryBalanceLedger::new().with_balance(VISA_TEST_NUMBER, balance))
}

#[test]
#[serial]
fn test_card_payment_debits_the_ledger() {
  setup_tracing();
  let ledger = ledger_with(dec!(150));
  let payment = CreditCardPayment::new(valid_card(VISA_TEST_NUMBER), ledger.clone());

  assert!(payment.validate());
  assert!(payment.pay(dec!(100)).unwrap());
  assert_eq!(ledger.balance(VISA_TEST_NUMBER).unwrap(), Some(dec!(50)));
  assert_eq!(payment.balance().unwrap(), Some(dec!(50)));
  assert_eq!(payment.name(), "Credit Card");
}

#[test]
#[serial]
fn test_card_payment_may_empty_the_balance_exactly() {
  setup_tracing();
  let ledger = ledger_with(dec!(100));
  let payment = CreditCardPayment::new(valid_card(VISA_TEST_NUMBER), ledger.clone());

  assert!(payment.pay(dec!(100)).unwrap());
  assert_eq!(ledger.balance(VISA_TEST_NUMBER).unwrap(), Some(Decimal::ZERO));
}

#[test]
#[serial]
fn test_card_payment_rejects_insufficient_funds_and_keeps_balance() {
  setup_tracing();
  let ledger = ledger_with(dec!(50));
  let payment = CreditCardPayment::new(valid_card(VISA_TEST_NUMBER), ledger.clone());

  let err = payment.pay(dec!(100)).unwrap_err();
  assert_eq!(
    err.rejection_reason(),
    Some(&RejectionReason::InsufficientFunds {
      balance: dec!(50),
      amount: dec!(100)
    })
  );
  assert!(err.rejection_reason().unwrap().suggests_alternate_method());
  assert_eq!(ledger.balance(VISA_TEST_NUMBER).unwrap(), Some(dec!(50)));
}

#[test]
#[serial]
fn test_card_unknown_to_issuer_is_invalid() {
  setup_tracing();
  let ledger = ledger_with(dec!(500));
  let payment = CreditCardPayment::new(valid_card(MASTERCARD_TEST_NUMBER), ledger);

  assert!(!payment.validate());
  let err = payment.pay(dec!(10)).unwrap_err();
  assert_eq!(err.rejection_reason(), Some(&RejectionReason::InvalidCredentials));
  assert!(!err.rejection_reason().unwrap().suggests_alternate_method());
}

#[test]
#[serial]
fn test_expired_card_is_invalid() {
  setup_tracing();
  let ledger = ledger_with(dec!(500));
  let expired = CreditCard::new(VISA_TEST_NUMBER, (Utc::now() - Duration::days(40)).date_naive(), "123");
  let payment = CreditCardPayment::new(expired, ledger.clone());

  assert!(!payment.validate());
  assert!(matches!(
    payment.pay(dec!(10)),
    Err(ReservationError::PaymentRejected {
      reason: RejectionReason::InvalidCredentials,
      ..
    })
  ));
  assert_eq!(ledger.balance(VISA_TEST_NUMBER).unwrap(), Some(dec!(500)));
}

#[test]
#[serial]
fn test_card_debug_output_masks_the_number() {
  let card = valid_card(VISA_TEST_NUMBER);
  let rendered = format!("{:?}", card);
  assert!(!rendered.contains(VISA_TEST_NUMBER));
  assert!(rendered.contains("1111"));
}

#[test]
#[serial]
fn test_backend_outage_is_a_backend_error_not_a_rejection() {
  setup_tracing();
  let payment = CreditCardPayment::new(valid_card(VISA_TEST_NUMBER), Arc::new(UnreachableLedger));

  // Validation cannot reach the issuer and reports the card as unusable.
  assert!(!payment.validate());
  assert!(matches!(payment.balance(), Err(ReservationError::PaymentBackend { .. })));
}

#[test]
#[serial]
fn test_failed_debit_write_surfaces_as_backend_error() {
  setup_tracing();
  let ledger = ReadOnlyLedger(InMemoryBalanceLedger::new().with_balance(VISA_TEST_NUMBER, dec!(300)));
  let payment = CreditCardPayment::new(valid_card(VISA_TEST_NUMBER), Arc::new(ledger));

  let err = payment.pay(dec!(100)).unwrap_err();
  match err {
    ReservationError::PaymentBackend { method, source } => {
      assert_eq!(method, "Credit Card");
      assert_eq!(source.to_string(), "ledger is read-only");
    }
    other => panic!("Expected PaymentBackend, got {:?}", other),
  }
}

#[test]
#[serial]
fn test_paypal_authorizes_matching_credentials() {
  setup_tracing();
  let directory: Arc<dyn CredentialDirectory> =
    Arc::new(InMemoryCredentialDirectory::new().with_account("amanda@ya.com", "amanda1985"));
  let payment = PayPalPayment::new("amanda@ya.com", "amanda1985", directory);

  assert!(payment.validate());
  assert!(payment.pay(dec!(1000000)).unwrap());
  // No balance tracking: charging again is still authorized.
  assert!(payment.pay(dec!(1000000)).unwrap());
  assert_eq!(payment.name(), "PayPal");
  assert_eq!(payment.email(), "amanda@ya.com");
}

#[test]
#[serial]
fn test_paypal_rejects_wrong_or_unknown_credentials() {
  setup_tracing();
  let directory: Arc<dyn CredentialDirectory> =
    Arc::new(InMemoryCredentialDirectory::new().with_account("amanda@ya.com", "amanda1985"));

  let wrong_secret = PayPalPayment::new("amanda@ya.com", "guess", directory.clone());
  let unknown = PayPalPayment::new("nobody@ya.com", "amanda1985", directory.clone());
  let empty = PayPalPayment::new("", "", directory);

  for payment in [wrong_secret, unknown, empty] {
    assert!(!payment.validate());
    let err = payment.pay(dec!(1)).unwrap_err();
    assert_eq!(err.rejection_reason(), Some(&RejectionReason::InvalidCredentials));
  }
}

#[test]
#[serial]
fn test_paypal_debug_output_hides_the_secret() {
  let directory: Arc<dyn CredentialDirectory> = Arc::new(InMemoryCredentialDirectory::new());
  let payment = PayPalPayment::new("amanda@ya.com", "amanda1985", directory);
  assert!(!format!("{:?}", payment).contains("amanda1985"));
}

#[test]
#[serial]
fn test_negative_charge_is_refused_and_leaves_the_balance_alone() {
  setup_tracing();
  let ledger = ledger_with(Decimal::ZERO);
  let card = CreditCardPayment::new(valid_card(VISA_TEST_NUMBER), ledger.clone());

  let err = card.pay(dec!(-500)).unwrap_err();
  assert_eq!(
    err.rejection_reason(),
    Some(&RejectionReason::InvalidAmount { amount: dec!(-500) })
  );
  assert!(!err.rejection_reason().unwrap().suggests_alternate_method());
  assert_eq!(ledger.balance(VISA_TEST_NUMBER).unwrap(), Some(Decimal::ZERO));

  let directory: Arc<dyn CredentialDirectory> =
    Arc::new(InMemoryCredentialDirectory::new().with_account("amanda@ya.com", "amanda1985"));
  let paypal = PayPalPayment::new("amanda@ya.com", "amanda1985", directory);
  assert!(matches!(
    paypal.pay(dec!(-1)).unwrap_err().rejection_reason(),
    Some(RejectionReason::InvalidAmount { .. })
  ));
}
