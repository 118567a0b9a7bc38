// flight_reservation/src/order/mod.rs

//! Orders and the chain that pays, closes and confirms them.

pub mod chain;
pub mod confirmation;
pub mod context;
pub mod flight_order;
pub mod stages;

pub use chain::{OrderChain, CLOSURE_STEP, CONFIRMATION_STEP, PAYMENT_STEP, VALIDATION_STEP};
pub use confirmation::{Confirmation, ConfirmationSink, TracingConfirmationSink};
pub use context::{OrderContext, OrderRecord};
pub use flight_order::FlightOrder;
