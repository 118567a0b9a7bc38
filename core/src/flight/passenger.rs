// flight_reservation/src/flight/passenger.rs

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Passenger {
  pub name: String,
}

impl Passenger {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }
}

/// The person placing and paying for an order. Not necessarily one of its passengers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
  pub name: String,
  pub email: String,
}

impl Customer {
  pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      email: email.into(),
    }
  }
}
