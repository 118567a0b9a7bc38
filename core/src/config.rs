// flight_reservation/src/config.rs

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use dotenvy::dotenv;
use rust_decimal::Decimal;

use crate::error::{ReservationError, Result};
use crate::flight::{CapacityProvider, ScheduledFlight, ScheduledFlightBuilder};

/// Ticket price a flight starts with when none is given.
pub const DEFAULT_TICKET_PRICE: Decimal = Decimal::ONE_HUNDRED;

pub const ENV_DEFAULT_TICKET_PRICE: &str = "RESERVATION_DEFAULT_TICKET_PRICE";
pub const ENV_NO_FLY_LIST: &str = "RESERVATION_NO_FLY_LIST";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationConfig {
  pub default_ticket_price: Decimal,
  /// Names that may neither place nor travel on an order.
  pub no_fly_list: Vec<String>,
}

impl Default for ReservationConfig {
  fn default() -> Self {
    Self {
      default_ticket_price: DEFAULT_TICKET_PRICE,
      no_fly_list: vec!["Peter".to_string(), "Johannes".to_string()],
    }
  }
}

impl ReservationConfig {
  /// Loads `.env` if present, then reads the `RESERVATION_*` variables.
  /// Unset variables keep their defaults; unparsable ones are an error.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    let config = Self::from_vars(|name| env::var(name).ok())?;
    tracing::info!(
      default_ticket_price = %config.default_ticket_price,
      no_fly_entries = config.no_fly_list.len(),
      "Reservation configuration loaded."
    );
    Ok(config)
  }

  /// Same as `from_env`, reading variables through `lookup`.
  pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let mut config = Self::default();

    if let Some(raw) = lookup(ENV_DEFAULT_TICKET_PRICE) {
      let price = Decimal::from_str(raw.trim())
        .map_err(|e| ReservationError::Config(format!("Invalid {}: {}", ENV_DEFAULT_TICKET_PRICE, e)))?;
      if price < Decimal::ZERO {
        return Err(ReservationError::Config(format!(
          "Invalid {}: price cannot be negative ({})",
          ENV_DEFAULT_TICKET_PRICE, price
        )));
      }
      config.default_ticket_price = price;
    }

    if let Some(raw) = lookup(ENV_NO_FLY_LIST) {
      config.no_fly_list = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    }

    Ok(config)
  }

  /// Starts a flight priced at the configured default ticket price.
  pub fn schedule(&self, number: u32, aircraft: Arc<dyn CapacityProvider>) -> ScheduledFlightBuilder {
    ScheduledFlight::builder(number, aircraft).price(self.default_ticket_price)
  }
}
