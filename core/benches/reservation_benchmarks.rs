use chrono::{Duration, Utc};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use flight_reservation::{
  Aircraft, Confirmation, ConfirmationSink, FlightObserver, FlightOrder, Passenger, Pipeline, PipelineControl,
  PaymentStrategy, ReservationError, ScheduledFlight,
};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// --- Benchmark doubles ---

/// Always valid, always pays. Keeps the backend out of the measurement.
#[derive(Debug)]
struct FreeStrategy;

impl PaymentStrategy for FreeStrategy {
  fn validate(&self) -> bool {
    true
  }

  fn pay(&self, _amount: Decimal) -> flight_reservation::Result<bool> {
    Ok(true)
  }

  fn name(&self) -> &str {
    "Free"
  }
}

struct DiscardConfirmations;

impl ConfirmationSink for DiscardConfirmations {
  fn confirm(&self, _confirmation: &Confirmation) {}
}

#[derive(Default)]
struct CountingObserver {
  seen: AtomicU64,
}

impl FlightObserver for CountingObserver {
  fn on_passengers_added(&self, _flight: &ScheduledFlight, count: usize) {
    self.seen.fetch_add(count as u64, Ordering::Relaxed);
  }
}

fn bench_flight(capacity: u32) -> Arc<ScheduledFlight> {
  let aircraft = Arc::new(Aircraft::new("A380", capacity, 20));
  Arc::new(
    ScheduledFlight::builder(1, aircraft)
      .route("FRA", "JFK")
      .departure_time(Utc::now() + Duration::days(30))
      .build()
      .unwrap(),
  )
}

fn fresh_order() -> FlightOrder {
  FlightOrder::with_confirmation_sink(
    flight_reservation::Customer::new("Bench", "bench@example.com"),
    vec![Passenger::new("Bench")],
    vec![bench_flight(10)],
    Decimal::ONE_HUNDRED,
    Arc::new(DiscardConfirmations),
  )
  .unwrap()
}

// --- Benchmark Functions ---

fn bench_order_payment(c: &mut Criterion) {
  let mut group = c.benchmark_group("OrderPayment");
  let strategy: Arc<dyn PaymentStrategy> = Arc::new(FreeStrategy);

  group.bench_function("chain_open_order", |b| {
    b.iter_batched(
      fresh_order,
      |order| order.process_with_chain(strategy.clone()).unwrap(),
      BatchSize::SmallInput,
    );
  });

  group.bench_function("direct_open_order", |b| {
    b.iter_batched(
      fresh_order,
      |order| {
        order.set_payment_strategy(strategy.clone());
        order.process_payment().unwrap()
      },
      BatchSize::SmallInput,
    );
  });

  let closed = fresh_order();
  closed.process_with_chain(strategy.clone()).unwrap();
  group.bench_function("chain_closed_order", |b| b.iter(|| closed.run_chain().unwrap()));

  group.finish();
}

fn bench_pipeline_steps(c: &mut Criterion) {
  let mut group = c.benchmark_group("PipelineSteps");

  for num_steps in [1usize, 4, 16] {
    let names: Vec<String> = (0..num_steps).map(|i| format!("step_{}", i)).collect();
    let defs: Vec<(&str, bool)> = names.iter().map(|n| (n.as_str(), false)).collect();
    let mut builder = Pipeline::<u64, ReservationError>::builder(&defs);
    for name in &names {
      builder = builder.on(name, |ctx: &mut u64| {
        *ctx = ctx.wrapping_add(1);
        Ok::<_, ReservationError>(PipelineControl::Continue)
      });
    }
    let pipeline = builder.build().unwrap();

    group.throughput(Throughput::Elements(num_steps as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_steps), &pipeline, |b, p| {
      b.iter(|| {
        let mut ctx = 0u64;
        p.run(&mut ctx).unwrap()
      });
    });
  }

  group.finish();
}

fn bench_observer_fan_out(c: &mut Criterion) {
  let mut group = c.benchmark_group("ObserverFanOut");
  let batch = vec![Passenger::new("A"), Passenger::new("B")];

  for num_observers in [0usize, 1, 8, 64] {
    let flight = bench_flight(u32::MAX);
    for _ in 0..num_observers {
      flight.subscribe(Arc::new(CountingObserver::default()));
    }

    group.bench_with_input(BenchmarkId::from_parameter(num_observers), &flight, |b, f| {
      b.iter(|| {
        f.add_passengers(&batch);
        f.remove_passengers(&batch)
      });
    });
  }

  group.finish();
}

criterion_group!(benches, bench_order_payment, bench_pipeline_steps, bench_observer_fan_out);
criterion_main!(benches);
