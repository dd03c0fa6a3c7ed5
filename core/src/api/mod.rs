// pesan/src/api/mod.rs

//! Contracts of the backend REST API consumed by the front end, split by
//! concern so each component depends only on the calls it makes.

pub mod http;
pub mod session;

use crate::error::PesanResult;
use crate::model::{
  ActivityLogItem, CreateOrderRequest, Destination, NamedRef, OrderCreated, PaymentSession, PickupLocation,
  ProfileUpdate, RegisterRequest, ReverseGeocodeResponse, TeamMember, Testimonial, TicketDetail, TicketSummary,
  UserProfile,
};
use async_trait::async_trait;
use serde::Deserialize;

pub use http::{ClientConfig, HttpBackend};
pub use session::Credential;

/// `{status, message, data}` envelope wrapped around every JSON answer.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
  #[serde(default)]
  pub status: u16,
  #[serde(default)]
  pub message: String,
  pub data: T,
}

/// Paginated listing as returned under `data`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Page<T> {
  #[serde(default = "Vec::new")]
  pub items: Vec<T>,
  #[serde(default = "first_page")]
  pub page: u32,
  #[serde(default)]
  pub limit: u32,
  #[serde(default)]
  pub total_items: u64,
  #[serde(default = "first_page")]
  pub total_pages: u32,
}

fn first_page() -> u32 {
  1
}

impl<T> Page<T> {
  /// A single empty page; what listings fall back to when loading fails.
  pub fn empty(limit: u32) -> Self {
    Self {
      items: Vec::new(),
      page: 1,
      limit,
      total_items: 0,
      total_pages: 1,
    }
  }
}

/// Unpaginated `{items}` listing (destinations, categories, regions).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Listing<T> {
  #[serde(default = "Vec::new")]
  pub items: Vec<T>,
}

/// Which activity log to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogScope {
  /// Login/logout history of admins (`/api/activity-logs/admin`).
  Admin,
  /// The current user's own history (`/api/activity-logs`).
  Own,
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
  async fn pickup_locations(&self) -> PesanResult<Vec<PickupLocation>>;

  async fn destination(&self, id: i64) -> PesanResult<Destination>;

  /// `GET /api/destinations`, every destination at once.
  async fn destinations(&self) -> PesanResult<Vec<Destination>>;

  async fn categories(&self) -> PesanResult<Vec<NamedRef>>;

  async fn regions(&self) -> PesanResult<Vec<NamedRef>>;

  async fn team(&self) -> PesanResult<Vec<TeamMember>>;

  async fn testimonials(&self, page: u32, limit: u32) -> PesanResult<Page<Testimonial>>;
}

#[async_trait]
pub trait OrderApi: Send + Sync {
  /// `POST /api/orders`. One request, never retried.
  async fn create_order(&self, credential: &Credential, request: &CreateOrderRequest) -> PesanResult<OrderCreated>;

  /// `POST /api/orders/{id}/pay`.
  async fn initiate_payment(&self, credential: &Credential, order_id: i64) -> PesanResult<PaymentSession>;
}

#[async_trait]
pub trait TicketApi: Send + Sync {
  async fn my_tickets(&self, credential: &Credential, page: u32, limit: u32) -> PesanResult<Page<TicketSummary>>;

  async fn ticket_detail(&self, credential: &Credential, order_id: i64) -> PesanResult<TicketDetail>;

  /// Raw PDF bytes of the e-ticket.
  async fn ticket_pdf(&self, credential: &Credential, order_id: i64) -> PesanResult<Vec<u8>>;
}

#[async_trait]
pub trait AccountApi: Send + Sync {
  async fn profile(&self, credential: &Credential) -> PesanResult<UserProfile>;

  async fn activity_logs(
    &self,
    credential: &Credential,
    scope: LogScope,
    page: u32,
    limit: u32,
  ) -> PesanResult<Page<ActivityLogItem>>;

  /// `POST /api/auth/register`. Needs no credential.
  async fn register(&self, request: &RegisterRequest) -> PesanResult<()>;

  /// `PATCH /api/users/{id}` with the update as multipart form data.
  async fn update_profile(&self, credential: &Credential, user_id: i64, update: &ProfileUpdate) -> PesanResult<()>;
}

/// Turns a position into a place description.
#[async_trait]
pub trait GeocodeApi: Send + Sync {
  async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> PesanResult<ReverseGeocodeResponse>;
}
