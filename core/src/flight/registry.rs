// flight_reservation/src/flight/registry.rs

//! Subscription registry behind a flight's observers.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{event, Level};

use super::observer::{dispatch, FlightEvent, FlightObserver};
use super::scheduled::ScheduledFlight;

/// Detachable handle returned by `subscribe`. Pass it to `unsubscribe` to stop delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Observers keyed by subscription id.
///
/// Ids grow monotonically, so iteration order is registration order. `publish` takes
/// a snapshot of the current observers and releases the lock before delivering, so
/// callbacks may change the registry freely: changes apply from the next publish on.
#[derive(Default)]
pub struct ObserverRegistry {
  next_id: AtomicU64,
  observers: RwLock<BTreeMap<SubscriptionId, Arc<dyn FlightObserver>>>,
}

impl ObserverRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn subscribe(&self, observer: Arc<dyn FlightObserver>) -> SubscriptionId {
    let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
    self.observers.write().insert(id, observer);
    id
  }

  /// Returns false if `id` was not (or no longer) registered.
  pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
    self.observers.write().remove(&id).is_some()
  }

  pub fn len(&self) -> usize {
    self.observers.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.observers.read().is_empty()
  }

  pub(crate) fn publish(&self, flight: &ScheduledFlight, flight_event: FlightEvent) {
    let snapshot: Vec<Arc<dyn FlightObserver>> = self.observers.read().values().cloned().collect();
    event!(Level::TRACE, ?flight_event, observers = snapshot.len(), "Publishing flight event.");
    for observer in &snapshot {
      dispatch(observer.as_ref(), flight, flight_event);
    }
  }
}

impl std::fmt::Debug for ObserverRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ObserverRegistry")
      .field("observers", &self.len())
      .finish()
  }
}
