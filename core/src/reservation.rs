// flight_reservation/src/reservation.rs

//! Order placement: who may book, whether the seats exist, and what it costs.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::config::ReservationConfig;
use crate::error::{ReservationError, Result};
use crate::flight::{Customer, Passenger, ScheduledFlight};
use crate::order::{ConfirmationSink, FlightOrder, TracingConfirmationSink};

/// Eligibility rules applied before an order is created.
#[derive(Clone)]
pub struct BookingPolicy {
  no_fly_list: Vec<String>,
  confirmations: Arc<dyn ConfirmationSink>,
}

impl BookingPolicy {
  pub fn new(config: &ReservationConfig) -> Self {
    Self {
      no_fly_list: config.no_fly_list.clone(),
      confirmations: Arc::new(TracingConfirmationSink),
    }
  }

  /// Sink handed to every order this policy places.
  pub fn with_confirmation_sink(mut self, confirmations: Arc<dyn ConfirmationSink>) -> Self {
    self.confirmations = confirmations;
    self
  }

  pub fn no_fly_list(&self) -> &[String] {
    &self.no_fly_list
  }

  fn is_banned(&self, name: &str) -> bool {
    self.no_fly_list.iter().any(|banned| banned == name)
  }

  /// Nobody involved is on the no-fly list, no flight is listed twice, and every flight has
  /// a seat for every passenger.
  pub fn is_eligible(&self, customer: &Customer, passengers: &[Passenger], flights: &[Arc<ScheduledFlight>]) -> bool {
    self.rejection_reason(customer, passengers, flights).is_none()
  }

  fn rejection_reason(
    &self,
    customer: &Customer,
    passengers: &[Passenger],
    flights: &[Arc<ScheduledFlight>],
  ) -> Option<String> {
    if self.is_banned(&customer.name) {
      return Some(format!("customer {} is on the no-fly list", customer.name));
    }
    if let Some(p) = passengers.iter().find(|p| self.is_banned(&p.name)) {
      return Some(format!("passenger {} is on the no-fly list", p.name));
    }
    // Seats are checked per flight, so each flight may appear only once.
    for (idx, flight) in flights.iter().enumerate() {
      if flights[..idx].iter().any(|earlier| Arc::ptr_eq(earlier, flight)) {
        return Some(format!("flight {} is listed more than once", flight));
      }
    }
    let wanted = u32::try_from(passengers.len()).unwrap_or(u32::MAX);
    if let Some(full) = flights.iter().find(|f| f.available_capacity() < wanted) {
      return Some(format!(
        "flight {} has {} seats left, {} requested",
        full,
        full.available_capacity(),
        passengers.len()
      ));
    }
    None
  }

  /// Creates an order and books `passengers` onto every flight.
  ///
  /// The price is the sum of the flights' current prices times the number of passengers.
  /// Observers of each flight are notified as the passengers are added.
  #[instrument(skip_all, fields(customer = %customer.name, passengers = passengers.len(), flights = flights.len()))]
  pub fn place_order(
    &self,
    customer: Customer,
    passengers: Vec<Passenger>,
    flights: Vec<Arc<ScheduledFlight>>,
  ) -> Result<FlightOrder> {
    if flights.is_empty() {
      return Err(ReservationError::OrderRejected {
        reason: "an order must contain at least one flight".to_string(),
      });
    }
    if passengers.is_empty() {
      return Err(ReservationError::OrderRejected {
        reason: "an order must carry at least one passenger".to_string(),
      });
    }
    if let Some(reason) = self.rejection_reason(&customer, &passengers, &flights) {
      warn!(%reason, "Order rejected.");
      return Err(ReservationError::OrderRejected { reason });
    }

    let fare: Decimal = flights.iter().map(|f| f.current_price()).sum();
    let price = fare * Decimal::from(passengers.len());

    for flight in &flights {
      flight.add_passengers(&passengers);
    }

    let order = FlightOrder::with_confirmation_sink(customer, passengers, flights, price, self.confirmations.clone())?;
    info!(order_id = %order.id(), %price, "Order placed.");
    Ok(order)
  }
}

impl std::fmt::Debug for BookingPolicy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BookingPolicy")
      .field("no_fly_list", &self.no_fly_list)
      .finish_non_exhaustive()
  }
}

impl Default for BookingPolicy {
  fn default() -> Self {
    Self::new(&ReservationConfig::default())
  }
}
