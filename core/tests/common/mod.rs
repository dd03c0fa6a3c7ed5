// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use pesan::api::{AccountApi, CatalogApi, Credential, GeocodeApi, LogScope, OrderApi, Page, TicketApi};
use pesan::model::{
  ActivityLogItem, BookingDraft, ConfirmedBooking, CreateOrderRequest, Destination, NamedRef, OrderCreated,
  PaymentSession, PaymentStatus, PickupLocation, ProfileUpdate, RegisterRequest, ReverseGeocodeResponse,
  SubmittedBooking, TeamMember, Testimonial, TicketDetail, TicketSummary, UserProfile,
};
use pesan::{Navigator, Notice, Notifier, PesanError, PesanResult};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::Level;

// --- Fixtures ---

pub const DESTINATION_ID: i64 = 3;
pub const ORDER_ID: i64 = 42;
pub const GATEWAY_URL: &str = "https://app.sandbox.midtrans.com/snap/v2/vtweb/abc";

pub fn today() -> NaiveDate {
  NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn pickups() -> Vec<PickupLocation> {
  vec![
    PickupLocation {
      id: 1,
      name: "Malang Kota".to_string(),
    },
    PickupLocation {
      id: 2,
      name: "Batu".to_string(),
    },
  ]
}

pub fn destination() -> Destination {
  Destination {
    id: DESTINATION_ID,
    name: "Bromo Sunrise".to_string(),
    price: 100_000,
    image_url: None,
    description: None,
    include: Vec::new(),
    ketentuan: Vec::new(),
    perhatian: Vec::new(),
    category: None,
    region: None,
  }
}

pub fn named(id: i64, name: &str) -> NamedRef {
  NamedRef {
    id,
    name: name.to_string(),
  }
}

/// A destination listed under `category`.
pub fn listed_destination(id: i64, name: &str, category: &str) -> Destination {
  Destination {
    id,
    name: name.to_string(),
    category: Some(named(id * 10, category)),
    ..destination()
  }
}

/// `{pickup 1, 2026-10-20, 08:00, 16:00, qty 2}`
pub fn valid_draft() -> BookingDraft {
  BookingDraft {
    pickup_location_id: Some(1),
    date: Some(date(2026, 10, 20)),
    depart_time: Some("08:00".to_string()),
    return_time: Some("16:00".to_string()),
    quantity: 2,
  }
}

pub fn submitted_booking() -> SubmittedBooking {
  SubmittedBooking {
    pickup_location_id: 1,
    date: date(2026, 10, 20),
    depart_time: "08:00".to_string(),
    return_time: "16:00".to_string(),
    quantity: 2,
  }
}

pub fn confirmed_booking() -> ConfirmedBooking {
  ConfirmedBooking {
    booking: submitted_booking(),
    destination_id: Some(DESTINATION_ID),
    destination_name: "Bromo Sunrise".to_string(),
    pickup_name: "Malang Kota".to_string(),
    unit_price: 100_000,
    estimated_total: 200_000,
  }
}

pub fn credential() -> Credential {
  Credential::new("test-token").unwrap()
}

pub fn ticket(id: i64, code: &str, destination: &str, date: &str, status: PaymentStatus) -> TicketSummary {
  TicketSummary {
    id,
    ticket_code: code.to_string(),
    destination_name: destination.to_string(),
    date: date.to_string(),
    payment_status: status,
  }
}

// --- Fake backend ---

/// A canned answer: data, or a non-2xx status with its message.
pub type Reply<T> = Result<T, (u16, String)>;

fn answer<T: Clone>(endpoint: &str, reply: &Reply<T>) -> PesanResult<T> {
  reply.clone().map_err(|(status, message)| PesanError::Api {
    endpoint: endpoint.to_string(),
    status,
    message,
  })
}

pub struct FakeBackend {
  pub destination: Mutex<Reply<Destination>>,
  pub destinations: Mutex<Reply<Vec<Destination>>>,
  pub categories: Mutex<Reply<Vec<NamedRef>>>,
  pub regions: Mutex<Reply<Vec<NamedRef>>>,
  pub team: Mutex<Reply<Vec<TeamMember>>>,
  pub pickups: Mutex<Reply<Vec<PickupLocation>>>,
  pub create_order: Mutex<Reply<OrderCreated>>,
  pub payment: Mutex<Reply<PaymentSession>>,
  pub tickets: Mutex<Reply<Page<TicketSummary>>>,
  pub ticket_detail: Mutex<Reply<TicketDetail>>,
  pub pdf: Mutex<Reply<Vec<u8>>>,
  pub profile: Mutex<Reply<UserProfile>>,
  pub logs: Mutex<Reply<Page<ActivityLogItem>>>,
  pub testimonials: Mutex<Reply<Page<Testimonial>>>,
  pub register: Mutex<Reply<()>>,
  pub update_profile: Mutex<Reply<()>>,

  /// Every call in arrival order, e.g. `create_order`, `initiate_payment:42`.
  pub calls: Mutex<Vec<String>>,
  pub order_requests: Mutex<Vec<CreateOrderRequest>>,
  pub registrations: Mutex<Vec<RegisterRequest>>,
  pub profile_updates: Mutex<Vec<(i64, ProfileUpdate)>>,
  /// When set, `create_order` waits for a notification before answering.
  pub hold_create_order: Mutex<Option<Arc<Notify>>>,
}

impl Default for FakeBackend {
  fn default() -> Self {
    Self {
      destination: Mutex::new(Ok(destination())),
      destinations: Mutex::new(Ok(Vec::new())),
      categories: Mutex::new(Ok(Vec::new())),
      regions: Mutex::new(Ok(Vec::new())),
      team: Mutex::new(Ok(Vec::new())),
      pickups: Mutex::new(Ok(pickups())),
      create_order: Mutex::new(Ok(OrderCreated { id: ORDER_ID })),
      payment: Mutex::new(Ok(PaymentSession {
        snap_token: Some("snap-abc".to_string()),
        redirect_url: Some(GATEWAY_URL.to_string()),
      })),
      tickets: Mutex::new(Ok(Page::empty(5))),
      ticket_detail: Mutex::new(Err((404, "Tiket tidak ditemukan".to_string()))),
      pdf: Mutex::new(Ok(b"%PDF-1.4".to_vec())),
      profile: Mutex::new(Err((401, "Unauthorized".to_string()))),
      logs: Mutex::new(Ok(Page::empty(10))),
      testimonials: Mutex::new(Ok(Page::empty(6))),
      register: Mutex::new(Ok(())),
      update_profile: Mutex::new(Ok(())),
      calls: Mutex::new(Vec::new()),
      order_requests: Mutex::new(Vec::new()),
      registrations: Mutex::new(Vec::new()),
      profile_updates: Mutex::new(Vec::new()),
      hold_create_order: Mutex::new(None),
    }
  }
}

impl FakeBackend {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  fn record(&self, call: impl Into<String>) {
    self.calls.lock().push(call.into());
  }
}

#[async_trait]
impl CatalogApi for FakeBackend {
  async fn pickup_locations(&self) -> PesanResult<Vec<PickupLocation>> {
    self.record("pickup_locations");
    answer("/api/pickup-locations", &self.pickups.lock())
  }

  async fn destination(&self, id: i64) -> PesanResult<Destination> {
    self.record(format!("destination:{id}"));
    answer("/api/destinations", &self.destination.lock())
  }

  async fn destinations(&self) -> PesanResult<Vec<Destination>> {
    self.record("destinations");
    answer("/api/destinations", &self.destinations.lock())
  }

  async fn categories(&self) -> PesanResult<Vec<NamedRef>> {
    self.record("categories");
    answer("/api/category", &self.categories.lock())
  }

  async fn regions(&self) -> PesanResult<Vec<NamedRef>> {
    self.record("regions");
    answer("/api/region", &self.regions.lock())
  }

  async fn team(&self) -> PesanResult<Vec<TeamMember>> {
    self.record("team");
    answer("/api/team", &self.team.lock())
  }

  async fn testimonials(&self, page: u32, limit: u32) -> PesanResult<Page<Testimonial>> {
    self.record(format!("testimonials:{page}:{limit}"));
    answer("/api/testimoni", &self.testimonials.lock())
  }
}

#[async_trait]
impl OrderApi for FakeBackend {
  async fn create_order(&self, _credential: &Credential, request: &CreateOrderRequest) -> PesanResult<OrderCreated> {
    self.record("create_order");
    self.order_requests.lock().push(request.clone());
    let hold = self.hold_create_order.lock().clone();
    if let Some(hold) = hold {
      hold.notified().await;
    }
    answer("/api/orders", &self.create_order.lock())
  }

  async fn initiate_payment(&self, _credential: &Credential, order_id: i64) -> PesanResult<PaymentSession> {
    self.record(format!("initiate_payment:{order_id}"));
    answer("/api/orders/pay", &self.payment.lock())
  }
}

#[async_trait]
impl TicketApi for FakeBackend {
  async fn my_tickets(&self, _credential: &Credential, page: u32, limit: u32) -> PesanResult<Page<TicketSummary>> {
    self.record(format!("my_tickets:{page}:{limit}"));
    answer("/api/orders/me", &self.tickets.lock())
  }

  async fn ticket_detail(&self, _credential: &Credential, order_id: i64) -> PesanResult<TicketDetail> {
    self.record(format!("ticket_detail:{order_id}"));
    answer("/api/orders/ticket", &self.ticket_detail.lock())
  }

  async fn ticket_pdf(&self, _credential: &Credential, order_id: i64) -> PesanResult<Vec<u8>> {
    self.record(format!("ticket_pdf:{order_id}"));
    answer("/api/orders/ticket/pdf", &self.pdf.lock())
  }
}

#[async_trait]
impl AccountApi for FakeBackend {
  async fn profile(&self, _credential: &Credential) -> PesanResult<UserProfile> {
    self.record("profile");
    answer("/api/users/profile", &self.profile.lock())
  }

  async fn activity_logs(
    &self,
    _credential: &Credential,
    scope: LogScope,
    page: u32,
    limit: u32,
  ) -> PesanResult<Page<ActivityLogItem>> {
    self.record(format!("activity_logs:{scope:?}:{page}:{limit}"));
    answer("/api/activity-logs", &self.logs.lock())
  }

  async fn register(&self, request: &RegisterRequest) -> PesanResult<()> {
    self.record("register");
    self.registrations.lock().push(request.clone());
    answer("/api/auth/register", &self.register.lock())
  }

  async fn update_profile(&self, _credential: &Credential, user_id: i64, update: &ProfileUpdate) -> PesanResult<()> {
    self.record(format!("update_profile:{user_id}"));
    self.profile_updates.lock().push((user_id, update.clone()));
    answer("/api/users", &self.update_profile.lock())
  }
}

/// Geocoder answering every position with the same canned reply.
pub struct FakeGeocoder {
  pub reply: Mutex<Reply<ReverseGeocodeResponse>>,
  pub positions: Mutex<Vec<(f64, f64)>>,
}

impl FakeGeocoder {
  pub fn new(reply: Reply<ReverseGeocodeResponse>) -> Self {
    Self {
      reply: Mutex::new(reply),
      positions: Mutex::new(Vec::new()),
    }
  }
}

#[async_trait]
impl GeocodeApi for FakeGeocoder {
  async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> PesanResult<ReverseGeocodeResponse> {
    self.positions.lock().push((latitude, longitude));
    answer("/reverse", &self.reply.lock())
  }
}

// --- Recording effects ---

#[derive(Default)]
pub struct RecordingNavigator {
  pub urls: Mutex<Vec<String>>,
}

impl RecordingNavigator {
  pub fn urls(&self) -> Vec<String> {
    self.urls.lock().clone()
  }
}

impl Navigator for RecordingNavigator {
  fn navigate(&self, url: &str) {
    self.urls.lock().push(url.to_string());
  }
}

#[derive(Default)]
pub struct RecordingNotifier {
  pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
  pub fn notices(&self) -> Vec<Notice> {
    self.notices.lock().clone()
  }
}

impl Notifier for RecordingNotifier {
  fn notify(&self, notice: Notice) {
    self.notices.lock().push(notice);
  }
}

/// A sequencer over `backend` plus the effects it reports to.
pub struct Harness {
  pub backend: Arc<FakeBackend>,
  pub navigator: Arc<RecordingNavigator>,
  pub notifier: Arc<RecordingNotifier>,
  pub sequencer: Arc<pesan::OrderPaymentSequencer>,
}

impl Harness {
  pub fn new(backend: Arc<FakeBackend>) -> Self {
    let navigator = Arc::new(RecordingNavigator::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let sequencer = Arc::new(pesan::OrderPaymentSequencer::new(
      backend.clone(),
      navigator.clone(),
      notifier.clone(),
    ));
    Self {
      backend,
      navigator,
      notifier,
      sequencer,
    }
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
