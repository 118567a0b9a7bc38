// flight_reservation/src/flight/scheduled.rs

//! The observable, bookable flight.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::aircraft::CapacityProvider;
use super::observer::{FlightEvent, FlightObserver};
use super::passenger::Passenger;
use super::registry::{ObserverRegistry, SubscriptionId};
use crate::config::DEFAULT_TICKET_PRICE;
use crate::error::{ReservationError, Result};

#[derive(Debug)]
struct FlightState {
  passengers: Vec<Passenger>,
  price: Decimal,
  cancelled: bool,
}

/// A flight on a given date that passengers can be booked onto.
///
/// Every mutator applies its change, releases the state lock, then notifies the
/// currently subscribed observers in registration order before returning.
///
/// The flight does not refuse over-capacity bookings. Whoever adds passengers checks
/// `available_capacity` first (see `BookingPolicy`).
#[derive(Debug)]
pub struct ScheduledFlight {
  number: u32,
  departure: String,
  arrival: String,
  departure_time: DateTime<Utc>,
  aircraft: Arc<dyn CapacityProvider>,
  state: RwLock<FlightState>,
  observers: ObserverRegistry,
}

impl ScheduledFlight {
  pub fn builder(number: u32, aircraft: Arc<dyn CapacityProvider>) -> ScheduledFlightBuilder {
    ScheduledFlightBuilder::new(number, aircraft)
  }

  pub fn number(&self) -> u32 {
    self.number
  }

  pub fn departure(&self) -> &str {
    &self.departure
  }

  pub fn arrival(&self) -> &str {
    &self.arrival
  }

  pub fn departure_time(&self) -> DateTime<Utc> {
    self.departure_time
  }

  pub fn aircraft(&self) -> &Arc<dyn CapacityProvider> {
    &self.aircraft
  }

  pub fn capacity(&self) -> u32 {
    self.aircraft.passenger_capacity()
  }

  pub fn crew_capacity(&self) -> u32 {
    self.aircraft.crew_capacity()
  }

  /// Seats left: capacity minus booked passengers, floored at zero.
  pub fn available_capacity(&self) -> u32 {
    let booked = u32::try_from(self.state.read().passengers.len()).unwrap_or(u32::MAX);
    self.capacity().saturating_sub(booked)
  }

  pub fn passengers(&self) -> Vec<Passenger> {
    self.state.read().passengers.clone()
  }

  pub fn passenger_count(&self) -> usize {
    self.state.read().passengers.len()
  }

  pub fn current_price(&self) -> Decimal {
    self.state.read().price
  }

  pub fn is_cancelled(&self) -> bool {
    self.state.read().cancelled
  }

  pub fn subscribe(&self, observer: Arc<dyn FlightObserver>) -> SubscriptionId {
    self.observers.subscribe(observer)
  }

  pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
    self.observers.unsubscribe(id)
  }

  pub fn observer_count(&self) -> usize {
    self.observers.len()
  }

  #[instrument(skip_all, fields(flight = %self, count = passengers.len()))]
  pub fn add_passengers(&self, passengers: &[Passenger]) {
    self.state.write().passengers.extend_from_slice(passengers);
    debug!("Passengers added.");
    self.observers.publish(
      self,
      FlightEvent::PassengersAdded {
        count: passengers.len(),
      },
    );
  }

  /// Removes the first matching entry for each requested passenger and returns how many
  /// were actually removed. Observers hear about that count only when it is non-zero.
  #[instrument(skip_all, fields(flight = %self, requested = passengers.len()))]
  pub fn remove_passengers(&self, passengers: &[Passenger]) -> usize {
    let mut removed = 0;
    {
      let mut state = self.state.write();
      for passenger in passengers {
        if let Some(idx) = state.passengers.iter().position(|booked| booked == passenger) {
          state.passengers.remove(idx);
          removed += 1;
        }
      }
    }
    debug!(removed, "Passengers removed.");
    if removed > 0 {
      self.observers.publish(self, FlightEvent::PassengersRemoved { count: removed });
    }
    removed
  }

  /// Replaces the ticket price. Negative prices are refused and nobody is notified.
  pub fn set_price(&self, new: Decimal) -> Result<()> {
    if new < Decimal::ZERO {
      return Err(ReservationError::InvalidFlight(format!(
        "price cannot be negative (got {}) for flight {}",
        new, self
      )));
    }
    let old = std::mem::replace(&mut self.state.write().price, new);
    debug!(flight = %self, %old, %new, "Price replaced.");
    self.observers.publish(self, FlightEvent::PriceChanged { old, new });
    Ok(())
  }

  /// Marks the flight cancelled and notifies observers. Cancelling twice is a no-op;
  /// returns whether this call performed the cancellation.
  pub fn cancel(&self) -> bool {
    let newly_cancelled = !std::mem::replace(&mut self.state.write().cancelled, true);
    if newly_cancelled {
      debug!(flight = %self, "Flight cancelled.");
      self.observers.publish(self, FlightEvent::Cancelled);
    }
    newly_cancelled
  }
}

impl std::fmt::Display for ScheduledFlight {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}-{}-{}/{}",
      self.aircraft.model(),
      self.number,
      self.departure,
      self.arrival
    )
  }
}

/// Builder for `ScheduledFlight`. Route and departure time are required.
#[derive(Debug)]
pub struct ScheduledFlightBuilder {
  number: u32,
  aircraft: Arc<dyn CapacityProvider>,
  departure: Option<String>,
  arrival: Option<String>,
  departure_time: Option<DateTime<Utc>>,
  passengers: Vec<Passenger>,
  price: Decimal,
}

impl ScheduledFlightBuilder {
  fn new(number: u32, aircraft: Arc<dyn CapacityProvider>) -> Self {
    Self {
      number,
      aircraft,
      departure: None,
      arrival: None,
      departure_time: None,
      passengers: Vec::new(),
      price: DEFAULT_TICKET_PRICE,
    }
  }

  pub fn route(mut self, departure: impl Into<String>, arrival: impl Into<String>) -> Self {
    self.departure = Some(departure.into());
    self.arrival = Some(arrival.into());
    self
  }

  pub fn departure_time(mut self, at: DateTime<Utc>) -> Self {
    self.departure_time = Some(at);
    self
  }

  pub fn passengers(mut self, passengers: Vec<Passenger>) -> Self {
    self.passengers = passengers;
    self
  }

  pub fn price(mut self, price: Decimal) -> Self {
    self.price = price;
    self
  }

  pub fn build(self) -> Result<ScheduledFlight> {
    let Self {
      number,
      aircraft,
      departure,
      arrival,
      departure_time,
      passengers,
      price,
    } = self;
    let missing = |what: &str| ReservationError::InvalidFlight(format!("{} must be set for flight {}", what, number));
    let departure = departure.ok_or_else(|| missing("departure airport"))?;
    let arrival = arrival.ok_or_else(|| missing("arrival airport"))?;
    let departure_time = departure_time.ok_or_else(|| missing("departure time"))?;
    if price < Decimal::ZERO {
      return Err(ReservationError::InvalidFlight(format!(
        "price cannot be negative (got {}) for flight {}",
        price, number
      )));
    }
    let capacity = usize::try_from(aircraft.passenger_capacity()).unwrap_or(usize::MAX);
    if passengers.len() > capacity {
      return Err(ReservationError::InvalidFlight(format!(
        "{} initial passengers exceed capacity {} of flight {}",
        passengers.len(),
        capacity,
        number
      )));
    }

    Ok(ScheduledFlight {
      number,
      departure,
      arrival,
      departure_time,
      aircraft,
      state: RwLock::new(FlightState {
        passengers,
        price,
        cancelled: false,
      }),
      observers: ObserverRegistry::new(),
    })
  }
}
