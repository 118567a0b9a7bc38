// flight_reservation/src/lib.rs

//! Flight reservation core: observable scheduled flights, pluggable payment
//! strategies, and a step pipeline that pays for orders.
//!
//!  - `ScheduledFlight` carries passengers and a price and notifies subscribed
//!    `FlightObserver`s synchronously after every change.
//!  - `PaymentStrategy` abstracts a payment method; cards and PayPal ship here.
//!  - `FlightOrder` pays either in one call (`process_payment`) or through the
//!    validation, payment, closure, confirmation chain (`process_with_chain`).
//!    Both give the same answer for the same inputs, and a closed order is never
//!    charged again.
//!  - `BookingPolicy` decides who may book and places orders.

pub mod config;
pub mod error;
pub mod flight;
pub mod order;
pub mod payment;
pub mod pipeline;
pub mod reservation;

// --- Re-exports for the Public API ---

pub use crate::config::{ReservationConfig, DEFAULT_TICKET_PRICE};
pub use crate::error::{RejectionReason, ReservationError, Result};

pub use crate::flight::{
  Aircraft, CapacityProvider, Customer, FlightEvent, FlightObserver, LoggingFlightObserver, Passenger,
  ScheduledFlight, SubscriptionId,
};

pub use crate::order::{
  Confirmation, ConfirmationSink, FlightOrder, OrderChain, OrderContext, OrderRecord, TracingConfirmationSink,
};

pub use crate::payment::{
  BalanceLedger, CreditCard, CreditCardPayment, CredentialDirectory, InMemoryBalanceLedger,
  InMemoryCredentialDirectory, PayPalPayment, PaymentStrategy,
};

pub use crate::pipeline::{Pipeline, PipelineBuilder, PipelineControl, PipelineError, PipelineResult};

pub use crate::reservation::BookingPolicy;

/*
    Paying for a booking:
    1. Build `ScheduledFlight`s and subscribe any observers.
    2. `BookingPolicy::place_order` checks eligibility, books the passengers and
       prices the order.
    3. Pick a `PaymentStrategy` (card against a `BalanceLedger`, PayPal against a
       `CredentialDirectory`, or your own).
    4. `order.process_with_chain(strategy)`; on `PaymentRejected` consult
       `RejectionReason::suggests_alternate_method` before trying another method.
*/
