// pesan/src/api/http.rs

//! `HttpBackend`: the `reqwest` implementation of every backend contract.
//! Pointed at a Nominatim instance it also answers reverse-geocoding.

use crate::api::session::Credential;
use crate::api::{AccountApi, ApiResponse, CatalogApi, GeocodeApi, Listing, LogScope, OrderApi, Page, TicketApi};
use crate::error::{PesanError, PesanResult};
use crate::model::{
  ActivityLogItem, CreateOrderRequest, Destination, NamedRef, OrderCreated, PaymentSession, PickupLocation,
  ProfileUpdate, RegisterRequest, ReverseGeocodeResponse, TeamMember, Testimonial, TicketDetail, TicketSummary,
  UserProfile,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Public Nominatim instance used for reverse-geocoding.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

const USER_AGENT: &str = concat!("pesan/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Origin (and optional path prefix) every `/api/...` path is appended to.
  pub base_url: String,
  pub timeout: Duration,
}

impl ClientConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      timeout: DEFAULT_TIMEOUT,
    }
  }
}

enum RequestBody {
  Json(serde_json::Value),
  Form(Form),
}

fn json_body<T: serde::Serialize>(endpoint: &str, value: &T) -> PesanResult<RequestBody> {
  serde_json::to_value(value)
    .map(RequestBody::Json)
    .map_err(|source| PesanError::Decode {
      endpoint: endpoint.to_string(),
      source,
    })
}

fn profile_form(update: &ProfileUpdate) -> Form {
  let mut form = Form::new();
  for (field, value) in update.text_fields() {
    form = form.text(field, value.to_string());
  }
  if let Some(avatar) = &update.avatar {
    form = form.part("avatar", Part::bytes(avatar.bytes.clone()).file_name(avatar.file_name.clone()));
  }
  form
}

/// Body of a non-2xx answer; only the message is of interest.
#[derive(Deserialize)]
struct ErrorBody {
  #[serde(default)]
  message: Option<String>,
}

pub struct HttpBackend {
  client: reqwest::Client,
  base_url: String,
}

impl HttpBackend {
  pub fn new(config: &ClientConfig) -> PesanResult<Self> {
    let base_url = config.base_url.trim().trim_end_matches('/').to_string();
    Url::parse(&base_url)
      .map_err(|e| PesanError::Config(format!("invalid API base URL '{}': {}", config.base_url, e)))?;
    let client = reqwest::Client::builder()
      .timeout(config.timeout)
      .user_agent(USER_AGENT)
      .build()
      .map_err(|e| PesanError::Config(format!("cannot build HTTP client: {}", e)))?;
    Ok(Self { client, base_url })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Absolute URL for an `/api/...` path (which may carry a query string).
  pub fn endpoint(&self, path: &str) -> PesanResult<Url> {
    let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
    Url::parse(&joined).map_err(|e| PesanError::Internal(format!("bad endpoint '{}': {}", joined, e)))
  }

  #[instrument(name = "HttpBackend::send", skip(self, credential, body), err(Display))]
  async fn send(
    &self,
    method: Method,
    path: &str,
    credential: Option<&Credential>,
    body: Option<RequestBody>,
  ) -> PesanResult<Vec<u8>> {
    let url = self.endpoint(path)?;
    let mut request = self.client.request(method, url);
    if let Some(credential) = credential {
      request = request.bearer_auth(credential.token());
    }
    match body {
      Some(RequestBody::Json(body)) => request = request.json(&body),
      Some(RequestBody::Form(form)) => request = request.multipart(form),
      None => {}
    }

    let transport = |source| PesanError::Transport {
      endpoint: path.to_string(),
      source,
    };
    let response = request.send().await.map_err(transport)?;
    let status = response.status();
    let bytes = response.bytes().await.map_err(transport)?;

    if !status.is_success() {
      let message = serde_json::from_slice::<ErrorBody>(&bytes)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_default();
      warn!(status = status.as_u16(), %message, "Backend returned an error status.");
      return Err(PesanError::Api {
        endpoint: path.to_string(),
        status: status.as_u16(),
        message,
      });
    }
    debug!(status = status.as_u16(), len = bytes.len(), "Backend answered.");
    Ok(bytes.to_vec())
  }

  async fn data<T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    credential: Option<&Credential>,
    body: Option<RequestBody>,
  ) -> PesanResult<T> {
    let envelope: ApiResponse<T> = self.json(method, path, credential, body).await?;
    Ok(envelope.data)
  }

  async fn json<T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    credential: Option<&Credential>,
    body: Option<RequestBody>,
  ) -> PesanResult<T> {
    let bytes = self.send(method, path, credential, body).await?;
    serde_json::from_slice::<T>(&bytes).map_err(|source| PesanError::Decode {
      endpoint: path.to_string(),
      source,
    })
  }

  /// Items of an optional `{items}` listing; a missing listing has none.
  async fn listing<T: DeserializeOwned>(&self, path: &str) -> PesanResult<Vec<T>> {
    let listing: Option<Listing<T>> = self.data(Method::GET, path, None, None).await?;
    Ok(listing.map(|l| l.items).unwrap_or_default())
  }
}

#[async_trait]
impl CatalogApi for HttpBackend {
  async fn pickup_locations(&self) -> PesanResult<Vec<PickupLocation>> {
    // A `data` that is not a list counts as "no pickup locations".
    let data: serde_json::Value = self.data(Method::GET, "/api/pickup-locations", None, None).await?;
    Ok(serde_json::from_value(data).unwrap_or_default())
  }

  async fn destination(&self, id: i64) -> PesanResult<Destination> {
    self.data(Method::GET, &format!("/api/destinations/{id}"), None, None).await
  }

  async fn destinations(&self) -> PesanResult<Vec<Destination>> {
    self.listing("/api/destinations").await
  }

  async fn categories(&self) -> PesanResult<Vec<NamedRef>> {
    self.listing("/api/category").await
  }

  async fn regions(&self) -> PesanResult<Vec<NamedRef>> {
    self.listing("/api/region").await
  }

  async fn team(&self) -> PesanResult<Vec<TeamMember>> {
    let team: Option<Vec<TeamMember>> = self.data(Method::GET, "/api/team", None, None).await?;
    Ok(team.unwrap_or_default())
  }

  async fn testimonials(&self, page: u32, limit: u32) -> PesanResult<Page<Testimonial>> {
    self
      .data(Method::GET, &format!("/api/testimoni?page={page}&limit={limit}"), None, None)
      .await
  }
}

#[async_trait]
impl OrderApi for HttpBackend {
  async fn create_order(&self, credential: &Credential, request: &CreateOrderRequest) -> PesanResult<OrderCreated> {
    let body = json_body("/api/orders", request)?;
    self.data(Method::POST, "/api/orders", Some(credential), Some(body)).await
  }

  async fn initiate_payment(&self, credential: &Credential, order_id: i64) -> PesanResult<PaymentSession> {
    self
      .data(Method::POST, &format!("/api/orders/{order_id}/pay"), Some(credential), None)
      .await
  }
}

#[async_trait]
impl TicketApi for HttpBackend {
  async fn my_tickets(&self, credential: &Credential, page: u32, limit: u32) -> PesanResult<Page<TicketSummary>> {
    self
      .data(
        Method::GET,
        &format!("/api/orders/me?page={page}&limit={limit}"),
        Some(credential),
        None,
      )
      .await
  }

  async fn ticket_detail(&self, credential: &Credential, order_id: i64) -> PesanResult<TicketDetail> {
    self
      .data(Method::GET, &format!("/api/orders/{order_id}/ticket"), Some(credential), None)
      .await
  }

  async fn ticket_pdf(&self, credential: &Credential, order_id: i64) -> PesanResult<Vec<u8>> {
    self
      .send(Method::GET, &format!("/api/orders/{order_id}/ticket/pdf"), Some(credential), None)
      .await
  }
}

#[async_trait]
impl AccountApi for HttpBackend {
  async fn profile(&self, credential: &Credential) -> PesanResult<UserProfile> {
    self.data(Method::GET, "/api/users/profile", Some(credential), None).await
  }

  async fn activity_logs(
    &self,
    credential: &Credential,
    scope: LogScope,
    page: u32,
    limit: u32,
  ) -> PesanResult<Page<ActivityLogItem>> {
    let base = match scope {
      LogScope::Admin => "/api/activity-logs/admin",
      LogScope::Own => "/api/activity-logs",
    };
    self
      .data(
        Method::GET,
        &format!("{base}?page={page}&limit={limit}"),
        Some(credential),
        None,
      )
      .await
  }

  async fn register(&self, request: &RegisterRequest) -> PesanResult<()> {
    let body = json_body("/api/auth/register", request)?;
    self
      .send(Method::POST, "/api/auth/register", None, Some(body))
      .await
      .map(|_| ())
  }

  async fn update_profile(&self, credential: &Credential, user_id: i64, update: &ProfileUpdate) -> PesanResult<()> {
    self
      .send(
        Method::PATCH,
        &format!("/api/users/{user_id}"),
        Some(credential),
        Some(RequestBody::Form(profile_form(update))),
      )
      .await
      .map(|_| ())
  }
}

#[async_trait]
impl GeocodeApi for HttpBackend {
  async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> PesanResult<ReverseGeocodeResponse> {
    // zoom=18 resolves down to buildings and streets.
    self
      .json(
        Method::GET,
        &format!("/reverse?format=json&lat={latitude}&lon={longitude}&zoom=18&addressdetails=1"),
        None,
        None,
      )
      .await
  }
}
