// flight_reservation/src/payment/backend.rs

//! Payment backends consulted by the concrete strategies.
//!
//! Both are opaque external services from the core's point of view. Their failures
//! are reported as `anyhow::Error` and wrapped by the strategy that called them.

use std::collections::HashMap;

use anyhow::Result as AnyResult;
use parking_lot::RwLock;
use rust_decimal::Decimal;

/// Balance store keyed by instrument (e.g. a card number).
///
/// Reads and writes are separate calls. An implementation shared by concurrent charges
/// must make a read followed by `set_balance` atomic per instrument itself.
pub trait BalanceLedger: Send + Sync + std::fmt::Debug {
  /// Current balance, or `None` if the instrument is unknown to the issuer.
  fn balance(&self, instrument: &str) -> AnyResult<Option<Decimal>>;

  fn set_balance(&self, instrument: &str, balance: Decimal) -> AnyResult<()>;
}

/// Credential store mapping an account identifier to its secret.
pub trait CredentialDirectory: Send + Sync + std::fmt::Debug {
  fn secret_for(&self, identifier: &str) -> AnyResult<Option<String>>;
}

#[derive(Debug, Default)]
pub struct InMemoryBalanceLedger {
  balances: RwLock<HashMap<String, Decimal>>,
}

impl InMemoryBalanceLedger {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style helper for seeding a balance.
  pub fn with_balance(self, instrument: impl Into<String>, balance: Decimal) -> Self {
    self.balances.write().insert(instrument.into(), balance);
    self
  }
}

impl BalanceLedger for InMemoryBalanceLedger {
  fn balance(&self, instrument: &str) -> AnyResult<Option<Decimal>> {
    Ok(self.balances.read().get(instrument).copied())
  }

  fn set_balance(&self, instrument: &str, balance: Decimal) -> AnyResult<()> {
    self.balances.write().insert(instrument.to_string(), balance);
    Ok(())
  }
}

#[derive(Debug, Default)]
pub struct InMemoryCredentialDirectory {
  secrets: RwLock<HashMap<String, String>>,
}

impl InMemoryCredentialDirectory {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_account(self, identifier: impl Into<String>, secret: impl Into<String>) -> Self {
    self.secrets.write().insert(identifier.into(), secret.into());
    self
  }
}

impl CredentialDirectory for InMemoryCredentialDirectory {
  fn secret_for(&self, identifier: &str) -> AnyResult<Option<String>> {
    Ok(self.secrets.read().get(identifier).cloned())
  }
}
