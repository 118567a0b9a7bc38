// flight_reservation/src/order/flight_order.rs

//! The order entity and its two equivalent payment surfaces.

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

use super::chain::OrderChain;
use super::confirmation::{ConfirmationSink, TracingConfirmationSink};
use super::context::{OrderContext, OrderRecord};
use super::stages;
use crate::error::{ReservationError, Result};
use crate::flight::{Customer, Passenger, ScheduledFlight};
use crate::payment::{
  BalanceLedger, CreditCard, CreditCardPayment, CredentialDirectory, PayPalPayment, PaymentStrategy,
};
use crate::pipeline::PipelineControl;

type Stage = fn(&mut OrderContext) -> Result<PipelineControl>;

/// Validation, payment and closure, as run by `process_payment`.
const DIRECT_STAGES: [Stage; 3] = [stages::validate, stages::charge, stages::close];

/// Everything a payment attempt may touch. Guarded by one mutex per order so that
/// concurrent attempts cannot both see the order open and both charge.
#[derive(Debug)]
struct PaymentState {
  record: OrderRecord,
  strategy: Option<Arc<dyn PaymentStrategy>>,
}

/// A customer's purchase spanning one or more scheduled flights.
#[derive(Debug)]
pub struct FlightOrder {
  id: Uuid,
  customer: Customer,
  passengers: Vec<Passenger>,
  flights: Vec<Arc<ScheduledFlight>>,
  price: Decimal,
  payment: Mutex<PaymentState>,
  chain: OrderChain,
}

impl FlightOrder {
  /// Creates an open order whose confirmations go to the `tracing` log.
  pub fn new(
    customer: Customer,
    passengers: Vec<Passenger>,
    flights: Vec<Arc<ScheduledFlight>>,
    price: Decimal,
  ) -> Result<Self> {
    Self::with_confirmation_sink(customer, passengers, flights, price, Arc::new(TracingConfirmationSink))
  }

  pub fn with_confirmation_sink(
    customer: Customer,
    passengers: Vec<Passenger>,
    flights: Vec<Arc<ScheduledFlight>>,
    price: Decimal,
    confirmations: Arc<dyn ConfirmationSink>,
  ) -> Result<Self> {
    if flights.is_empty() {
      return Err(ReservationError::OrderRejected {
        reason: "an order must contain at least one flight".to_string(),
      });
    }
    if price < Decimal::ZERO {
      return Err(ReservationError::OrderRejected {
        reason: format!("price cannot be negative (got {})", price),
      });
    }
    let id = Uuid::new_v4();
    Ok(Self {
      id,
      customer,
      passengers,
      flights,
      price,
      payment: Mutex::new(PaymentState {
        record: OrderRecord::new(id, price),
        strategy: None,
      }),
      chain: OrderChain::new(confirmations)?,
    })
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn customer(&self) -> &Customer {
    &self.customer
  }

  pub fn passengers(&self) -> &[Passenger] {
    &self.passengers
  }

  pub fn flights(&self) -> &[Arc<ScheduledFlight>] {
    &self.flights
  }

  pub fn price(&self) -> Decimal {
    self.price
  }

  pub fn is_closed(&self) -> bool {
    self.payment.lock().record.is_closed()
  }

  /// Name of the configured payment method, if any.
  pub fn payment_method(&self) -> Option<String> {
    self.payment.lock().strategy.as_ref().map(|s| s.name().to_string())
  }

  /// Replaces any previously configured strategy.
  pub fn set_payment_strategy(&self, strategy: Arc<dyn PaymentStrategy>) {
    self.payment.lock().strategy = Some(strategy);
  }

  /// Validates, charges and closes in one call.
  ///
  /// A closed order reports `Ok(true)` without touching the strategy. Fails with
  /// `MissingPaymentStrategy` when nothing is configured and with `PaymentRejected` when
  /// the strategy refuses. `Ok(false)` means the strategy declined without an error;
  /// the order stays open.
  #[instrument(name = "FlightOrder::process_payment", skip(self), fields(order_id = %self.id))]
  pub fn process_payment(&self) -> Result<bool> {
    self.attempt(|ctx| {
      for stage in DIRECT_STAGES {
        if stage(ctx)? == PipelineControl::Stop {
          break;
        }
      }
      Ok(ctx.is_success())
    })
  }

  /// Configures `strategy` and drives the order through the processing chain.
  pub fn process_with_chain(&self, strategy: Arc<dyn PaymentStrategy>) -> Result<bool> {
    self.set_payment_strategy(strategy);
    self.run_chain()
  }

  /// Drives the order through the processing chain with the configured strategy.
  #[instrument(name = "FlightOrder::run_chain", skip(self), fields(order_id = %self.id))]
  pub fn run_chain(&self) -> Result<bool> {
    self.attempt(|ctx| self.chain.run(ctx))
  }

  /// Pays by card through `process_payment`.
  pub fn process_with_credit_card(&self, card: CreditCard, ledger: Arc<dyn BalanceLedger>) -> Result<bool> {
    self.set_payment_strategy(Arc::new(CreditCardPayment::new(card, ledger)));
    self.process_payment()
  }

  /// Pays with PayPal credentials through `process_payment`.
  pub fn process_with_paypal(
    &self,
    email: impl Into<String>,
    secret: impl Into<String>,
    directory: Arc<dyn CredentialDirectory>,
  ) -> Result<bool> {
    self.set_payment_strategy(Arc::new(PayPalPayment::new(email, secret, directory)));
    self.process_payment()
  }

  /// Runs one payment attempt under the order's lock and commits the record afterwards,
  /// whatever the outcome.
  fn attempt(&self, drive: impl FnOnce(&mut OrderContext) -> Result<bool>) -> Result<bool> {
    let mut state = self.payment.lock();
    let mut ctx = OrderContext::new(Some(state.record.clone()), state.strategy.clone());
    let outcome = drive(&mut ctx);
    if let Some(record) = ctx.into_order() {
      state.record = record;
    }
    if let Ok(true) = outcome {
      info!(closed = state.record.is_closed(), "Payment processed.");
    }
    outcome
  }
}
