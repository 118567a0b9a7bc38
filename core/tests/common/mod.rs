// flight_reservation/tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use chrono::{Duration, NaiveDate, Utc};
use flight_reservation::{
  Aircraft, Confirmation, ConfirmationSink, CreditCard, Customer, FlightObserver, Passenger, PaymentStrategy,
  RejectionReason, ReservationError, ScheduledFlight,
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixtures ---
pub const VISA_TEST_NUMBER: &str = "4111111111111111";
pub const MASTERCARD_TEST_NUMBER: &str = "5555555555554444";

pub fn valid_card(number: &str) -> CreditCard {
  CreditCard::new(number, far_future(), "123")
}

pub fn far_future() -> NaiveDate {
  (Utc::now() + Duration::days(3 * 365)).date_naive()
}

pub fn customer(name: &str) -> Customer {
  Customer::new(name, format!("{}@example.com", name.to_lowercase()))
}

pub fn passengers(names: &[&str]) -> Vec<Passenger> {
  names.iter().map(|n| Passenger::new(*n)).collect()
}

pub fn flight(number: u32, capacity: u32, price: Decimal) -> Arc<ScheduledFlight> {
  let aircraft = Arc::new(Aircraft::new("A350", capacity, 12));
  Arc::new(
    ScheduledFlight::builder(number, aircraft)
      .route("FRA", "LHR")
      .departure_time(Utc::now() + Duration::days(7))
      .price(price)
      .build()
      .unwrap(),
  )
}

// --- Recording observer ---
#[derive(Default)]
pub struct RecordingObserver {
  pub label: String,
  pub log: Arc<Mutex<Vec<String>>>,
}

impl RecordingObserver {
  pub fn new(label: &str, log: Arc<Mutex<Vec<String>>>) -> Self {
    Self {
      label: label.to_string(),
      log,
    }
  }

  fn push(&self, entry: String) {
    self.log.lock().push(format!("{}:{}", self.label, entry));
  }
}

impl FlightObserver for RecordingObserver {
  fn on_passengers_added(&self, _flight: &ScheduledFlight, count: usize) {
    self.push(format!("added({})", count));
  }

  fn on_passengers_removed(&self, _flight: &ScheduledFlight, count: usize) {
    self.push(format!("removed({})", count));
  }

  fn on_price_changed(&self, _flight: &ScheduledFlight, old: Decimal, new: Decimal) {
    self.push(format!("price({}->{})", old, new));
  }

  fn on_cancelled(&self, _flight: &ScheduledFlight) {
    self.push("cancelled".to_string());
  }
}

// --- Counting strategy ---

/// How a `CountingStrategy` answers `pay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayOutcome {
  Paid,
  Declined,
  InsufficientFunds,
}

/// Strategy double recording how often each operation ran.
#[derive(Debug)]
pub struct CountingStrategy {
  pub name: &'static str,
  pub valid: bool,
  pub outcome: PayOutcome,
  pub validate_calls: AtomicUsize,
  pub pay_calls: AtomicUsize,
  pub charged: Mutex<Vec<Decimal>>,
}

impl CountingStrategy {
  pub fn new(name: &'static str, valid: bool, outcome: PayOutcome) -> Arc<Self> {
    Arc::new(Self {
      name,
      valid,
      outcome,
      validate_calls: AtomicUsize::new(0),
      pay_calls: AtomicUsize::new(0),
      charged: Mutex::new(Vec::new()),
    })
  }

  pub fn paying(name: &'static str) -> Arc<Self> {
    Self::new(name, true, PayOutcome::Paid)
  }

  pub fn pays(&self) -> usize {
    self.pay_calls.load(Ordering::SeqCst)
  }

  pub fn validations(&self) -> usize {
    self.validate_calls.load(Ordering::SeqCst)
  }
}

impl PaymentStrategy for CountingStrategy {
  fn validate(&self) -> bool {
    self.validate_calls.fetch_add(1, Ordering::SeqCst);
    self.valid
  }

  fn pay(&self, amount: Decimal) -> flight_reservation::Result<bool> {
    self.pay_calls.fetch_add(1, Ordering::SeqCst);
    // Widen the window in which a second, unguarded caller could slip in.
    std::thread::sleep(std::time::Duration::from_millis(5));
    match self.outcome {
      PayOutcome::Paid => {
        self.charged.lock().push(amount);
        Ok(true)
      }
      PayOutcome::Declined => Ok(false),
      PayOutcome::InsufficientFunds => Err(ReservationError::PaymentRejected {
        method: self.name.to_string(),
        reason: RejectionReason::InsufficientFunds {
          balance: Decimal::ZERO,
          amount,
        },
      }),
    }
  }

  fn name(&self) -> &str {
    self.name
  }
}

// --- Recording confirmation sink ---
#[derive(Default)]
pub struct RecordingConfirmations {
  pub received: Mutex<Vec<Confirmation>>,
}

impl RecordingConfirmations {
  pub fn count(&self) -> usize {
    self.received.lock().len()
  }
}

impl ConfirmationSink for RecordingConfirmations {
  fn confirm(&self, confirmation: &Confirmation) {
    self.received.lock().push(confirmation.clone());
  }
}
