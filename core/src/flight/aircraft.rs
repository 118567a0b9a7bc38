// flight_reservation/src/flight/aircraft.rs

/// Seat capacity of whatever flies a scheduled flight.
///
/// How an aircraft is classified or created is outside this crate; a flight only needs
/// these numbers.
pub trait CapacityProvider: Send + Sync + std::fmt::Debug {
  fn model(&self) -> &str;
  fn passenger_capacity(&self) -> u32;
  fn crew_capacity(&self) -> u32;
}

/// Plain capacity record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aircraft {
  pub model: String,
  pub passenger_capacity: u32,
  pub crew_capacity: u32,
}

impl Aircraft {
  pub fn new(model: impl Into<String>, passenger_capacity: u32, crew_capacity: u32) -> Self {
    Self {
      model: model.into(),
      passenger_capacity,
      crew_capacity,
    }
  }
}

impl CapacityProvider for Aircraft {
  fn model(&self) -> &str {
    &self.model
  }

  fn passenger_capacity(&self) -> u32 {
    self.passenger_capacity
  }

  fn crew_capacity(&self) -> u32 {
    self.crew_capacity
  }
}
