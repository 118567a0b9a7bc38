// flight_reservation/src/flight/mod.rs

//! Scheduled flights, their capacity providers, and the observers watching them.

pub mod aircraft;
pub mod observer;
pub mod passenger;
pub mod registry;
pub mod scheduled;

pub use aircraft::{Aircraft, CapacityProvider};
pub use observer::{FlightEvent, FlightObserver, LoggingFlightObserver};
pub use passenger::{Customer, Passenger};
pub use registry::{ObserverRegistry, SubscriptionId};
pub use scheduled::{ScheduledFlight, ScheduledFlightBuilder};
