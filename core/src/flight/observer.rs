// flight_reservation/src/flight/observer.rs

//! The callback surface for scheduled-flight mutations.

use rust_decimal::Decimal;
use tracing::info;

use super::scheduled::ScheduledFlight;

/// What changed on a flight. Delivered after the change is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEvent {
  PassengersAdded { count: usize },
  /// `count` is the number actually removed, never the number requested.
  PassengersRemoved { count: usize },
  PriceChanged { old: Decimal, new: Decimal },
  Cancelled,
}

/// A listener for flight mutations.
///
/// Callbacks run synchronously on the mutating thread, before the mutating call
/// returns, with no flight lock held. An observer may therefore read the flight and
/// may subscribe or unsubscribe observers (itself included) from inside a callback.
/// Every method defaults to doing nothing.
pub trait FlightObserver: Send + Sync {
  fn on_passengers_added(&self, _flight: &ScheduledFlight, _count: usize) {}

  fn on_passengers_removed(&self, _flight: &ScheduledFlight, _count: usize) {}

  fn on_price_changed(&self, _flight: &ScheduledFlight, _old: Decimal, _new: Decimal) {}

  fn on_cancelled(&self, _flight: &ScheduledFlight) {}
}

pub(crate) fn dispatch(observer: &dyn FlightObserver, flight: &ScheduledFlight, event: FlightEvent) {
  match event {
    FlightEvent::PassengersAdded { count } => observer.on_passengers_added(flight, count),
    FlightEvent::PassengersRemoved { count } => observer.on_passengers_removed(flight, count),
    FlightEvent::PriceChanged { old, new } => observer.on_price_changed(flight, old, new),
    FlightEvent::Cancelled => observer.on_cancelled(flight),
  }
}

/// Writes every flight event to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingFlightObserver;

impl FlightObserver for LoggingFlightObserver {
  fn on_passengers_added(&self, flight: &ScheduledFlight, count: usize) {
    info!(flight = %flight, count, "Passengers added.");
  }

  fn on_passengers_removed(&self, flight: &ScheduledFlight, count: usize) {
    info!(flight = %flight, count, "Passengers removed.");
  }

  fn on_price_changed(&self, flight: &ScheduledFlight, old: Decimal, new: Decimal) {
    info!(flight = %flight, %old, %new, "Price changed.");
  }

  fn on_cancelled(&self, flight: &ScheduledFlight) {
    info!(flight = %flight, "Flight cancelled.");
  }
}
