// flight_reservation/src/payment/mod.rs

//! Payment strategies and the backends they charge.

pub mod backend;
pub mod credit_card;
pub mod paypal;
pub mod strategy;

pub use backend::{BalanceLedger, CredentialDirectory, InMemoryBalanceLedger, InMemoryCredentialDirectory};
pub use credit_card::{CreditCard, CreditCardPayment};
pub use paypal::PayPalPayment;
pub use strategy::PaymentStrategy;
