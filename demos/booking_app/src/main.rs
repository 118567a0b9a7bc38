// demos/booking_app/src/main.rs

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use flight_reservation::{
  Aircraft, BookingPolicy, CreditCard, CreditCardPayment, Customer, FlightOrder, InMemoryBalanceLedger,
  InMemoryCredentialDirectory, LoggingFlightObserver, Passenger, PayPalPayment, ReservationConfig,
  ReservationError, ScheduledFlight,
};
use rust_decimal::Decimal;
use tracing::Level;

const CARD_NUMBER: &str = "4111 1111 1111 1111";
const PAYPAL_EMAIL: &str = "amanda@ya.com";
const PAYPAL_SECRET: &str = "amanda1985";

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .init();

  let config = ReservationConfig::from_env().context("loading reservation configuration")?;
  let policy = BookingPolicy::new(&config);

  let outbound = schedule(&config, 1, "LHR", "JFK", 1)?;
  let inbound = schedule(&config, 2, "JFK", "LHR", 8)?;
  for flight in [&outbound, &inbound] {
    flight.subscribe(Arc::new(LoggingFlightObserver));
  }

  let amanda = Customer::new("Amanda", PAYPAL_EMAIL);
  let travellers = vec![Passenger::new("Amanda"), Passenger::new("Max")];

  // Peter is on the default no-fly list.
  let peter = Customer::new("Peter", "peter@example.com");
  if let Err(e) = policy.place_order(peter, vec![Passenger::new("Peter")], vec![inbound.clone()]) {
    tracing::warn!(error = %e, "Booking refused.");
  }

  let order = policy.place_order(amanda, travellers, vec![outbound.clone(), inbound.clone()])?;
  tracing::info!(order_id = %order.id(), price = %order.price(), "Order placed; paying by card.");

  // The card can cover one ticket, not the whole order.
  let ledger =
    Arc::new(InMemoryBalanceLedger::new().with_balance(CARD_NUMBER.replace(' ', ""), config.default_ticket_price));
  let card = CreditCard::new(CARD_NUMBER, (Utc::now() + Duration::days(365)).date_naive(), "737");
  pay_with_fallback(&order, CreditCardPayment::new(card, ledger))?;

  // Repeat payment is a no-op.
  let again = order.run_chain()?;
  tracing::info!(closed = order.is_closed(), again, "Second payment attempt.");

  inbound.set_price(config.default_ticket_price * Decimal::TWO)?;
  inbound.remove_passengers(&[Passenger::new("Max"), Passenger::new("Nobody")]);
  outbound.cancel();

  Ok(())
}

fn schedule(
  config: &ReservationConfig,
  number: u32,
  from: &str,
  to: &str,
  days_ahead: i64,
) -> anyhow::Result<Arc<ScheduledFlight>> {
  let aircraft = Arc::new(Aircraft::new("Boeing 787", 242, 12));
  let flight = config
    .schedule(number, aircraft)
    .route(from, to)
    .departure_time(Utc::now() + Duration::days(days_ahead))
    .build()?;
  Ok(Arc::new(flight))
}

/// Tries the card; offers PayPal when the card is short of funds and gives up otherwise.
fn pay_with_fallback(order: &FlightOrder, card: CreditCardPayment) -> anyhow::Result<()> {
  match order.process_with_chain(Arc::new(card)) {
    Ok(paid) => {
      tracing::info!(paid, "Card payment finished.");
      Ok(())
    }
    Err(e @ ReservationError::PaymentRejected { .. }) => {
      let retry = e.rejection_reason().is_some_and(|r| r.suggests_alternate_method());
      if !retry {
        return Err(e.into());
      }
      tracing::warn!(error = %e, "Card declined; falling back to PayPal.");
      let directory = Arc::new(InMemoryCredentialDirectory::new().with_account(PAYPAL_EMAIL, PAYPAL_SECRET));
      let paid = order.process_with_chain(Arc::new(PayPalPayment::new(PAYPAL_EMAIL, PAYPAL_SECRET, directory)))?;
      tracing::info!(paid, method = ?order.payment_method(), "PayPal payment finished.");
      Ok(())
    }
    Err(e) => Err(e.into()),
  }
}
