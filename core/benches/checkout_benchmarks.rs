use async_trait::async_trait;
use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pesan::api::{Credential, OrderApi};
use pesan::model::{
  BookingDraft, ConfirmedBooking, CreateOrderRequest, OrderCreated, PaymentSession, PickupLocation, SubmittedBooking,
};
use pesan::{
  validate_on, CheckoutOutcome, ContextData, Navigator, Notice, Notifier, OrderPaymentSequencer, PesanError,
  PesanResult, StepControl, Workflow,
};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

// --- In-memory collaborators ---
struct InstantBackend;

#[async_trait]
impl OrderApi for InstantBackend {
  async fn create_order(&self, _credential: &Credential, _request: &CreateOrderRequest) -> PesanResult<OrderCreated> {
    Ok(OrderCreated { id: 42 })
  }

  async fn initiate_payment(&self, _credential: &Credential, _order_id: i64) -> PesanResult<PaymentSession> {
    Ok(PaymentSession {
      snap_token: None,
      redirect_url: Some("https://pay.example/abc".to_string()),
    })
  }
}

struct Discard;

impl Navigator for Discard {
  fn navigate(&self, url: &str) {
    criterion::black_box(url);
  }
}

impl Notifier for Discard {
  fn notify(&self, notice: Notice) {
    criterion::black_box(notice);
  }
}

fn day(d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn pickups(n: i64) -> Vec<PickupLocation> {
  (1..=n)
    .map(|id| PickupLocation {
      id,
      name: format!("Pickup {id}"),
    })
    .collect()
}

fn confirmed() -> ConfirmedBooking {
  ConfirmedBooking {
    booking: SubmittedBooking {
      pickup_location_id: 1,
      date: day(20),
      depart_time: "08:00".to_string(),
      return_time: "16:00".to_string(),
      quantity: 2,
    },
    destination_id: Some(3),
    destination_name: "Bromo Sunrise".to_string(),
    pickup_name: "Pickup 1".to_string(),
    unit_price: 100_000,
    estimated_total: 200_000,
  }
}

// --- Benchmark Functions ---

fn bench_validation(c: &mut Criterion) {
  let mut group = c.benchmark_group("Validation");
  let valid = BookingDraft {
    pickup_location_id: Some(1),
    date: Some(day(20)),
    depart_time: Some("08:00".to_string()),
    return_time: Some("16:00".to_string()),
    quantity: 2,
  };
  let empty = BookingDraft::default();

  for num_pickups in [1i64, 50, 500] {
    let locations = pickups(num_pickups);
    group.bench_with_input(BenchmarkId::new("valid_draft", num_pickups), &locations, |b, locations| {
      b.iter(|| validate_on(criterion::black_box(&valid), locations, day(18)))
    });
  }
  let locations = pickups(10);
  group.bench_function("empty_draft", |b| {
    b.iter(|| validate_on(criterion::black_box(&empty), &locations, day(18)))
  });
  group.finish();
}

fn bench_workflow_steps(c: &mut Criterion) {
  let mut group = c.benchmark_group("WorkflowSteps");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 3, 10] {
    let names: Vec<String> = (0..num_steps).map(|i| format!("step_{i}")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut workflow = Workflow::<u64, PesanError>::new("bench", &name_refs);
    for name in &names {
      workflow.on_step(name, |ctx: ContextData<u64>| async move {
        *ctx.write() += 1;
        Ok::<_, PesanError>(StepControl::Continue)
      });
    }
    let workflow = Arc::new(workflow);

    group.throughput(Throughput::Elements(num_steps as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_steps), &num_steps, |b, _| {
      b.to_async(&rt).iter_batched(
        || ContextData::new(0u64),
        |ctx| {
          let workflow = workflow.clone();
          async move { workflow.run(ctx).await.unwrap() }
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

fn bench_checkout_sequence(c: &mut Criterion) {
  let mut group = c.benchmark_group("CheckoutSequence");
  let rt = Runtime::new().unwrap();
  let credential = Credential::new("bench-token").unwrap();
  let backend: Arc<dyn OrderApi> = Arc::new(InstantBackend);
  let effects = Arc::new(Discard);

  // A redirect leaves the sequencer paying, so every iteration gets a fresh one.
  group.bench_function("create_pay_redirect", |b| {
    b.to_async(&rt).iter_batched(
      || OrderPaymentSequencer::new(backend.clone(), effects.clone(), effects.clone()),
      |sequencer| {
        let credential = credential.clone();
        async move {
          let outcome = sequencer.submit(confirmed(), &credential).await;
          assert!(matches!(outcome, CheckoutOutcome::Redirected { .. }));
        }
      },
      criterion::BatchSize::SmallInput,
    );
  });
  group.finish();
}

criterion_group!(benches, bench_validation, bench_workflow_steps, bench_checkout_sequence);
criterion_main!(benches);
