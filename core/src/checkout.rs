// pesan/src/checkout.rs

//! The checkout page: loads what the booking form needs and wires
//! form submit -> confirmation gate -> order/payment sequencer.

use crate::api::{CatalogApi, Credential};
use crate::gate::ConfirmationGate;
use crate::model::catalog::pickup_name;
use crate::model::{ConfirmedBooking, Destination, FieldValue};
use crate::sequencer::{CheckoutOutcome, OrderPaymentSequencer};
use crate::validator::BookingForm;
use chrono::NaiveDate;
use reqwest::Url;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const DESTINATION_NOT_FOUND: &str = "Destinasi tidak ditemukan";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
  Loading,
  Ready,
  NotFound,
}

/// What pressing the form's submit button led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// Validation failed; the form holds the per-field errors.
  Invalid,
  /// No credential. The user is sent to `login_url` and comes back here.
  LoginRequired { login_url: String },
  /// The confirmation gate is open.
  Confirming(ConfirmedBooking),
  /// The page has no destination to book.
  Unavailable,
}

/// `/login?redirect=<return_path>`, with the return path percent-encoded.
pub fn login_url(return_path: &str) -> String {
  let mut url = match Url::parse("http://localhost/login") {
    Ok(url) => url,
    Err(_) => return "/login".to_string(),
  };
  url.query_pairs_mut().append_pair("redirect", return_path);
  match url.query() {
    Some(query) => format!("{}?{}", url.path(), query),
    None => url.path().to_string(),
  }
}

pub struct CheckoutPage {
  destination_id: Option<i64>,
  destination: Option<Destination>,
  state: PageState,
  form: BookingForm,
  gate: ConfirmationGate,
  sequencer: Arc<OrderPaymentSequencer>,
  credential: Option<Credential>,
  error_visible: bool,
}

impl CheckoutPage {
  /// A page for `destination_id` (0 or `None` means no destination).
  pub fn new(
    destination_id: Option<i64>,
    sequencer: Arc<OrderPaymentSequencer>,
    credential: Option<Credential>,
  ) -> Self {
    let gate = ConfirmationGate::new(sequencer.paying_flag());
    Self {
      destination_id: destination_id.filter(|id| *id != 0),
      destination: None,
      state: PageState::Loading,
      form: BookingForm::new(Vec::new(), 0),
      gate,
      sequencer,
      credential,
      error_visible: false,
    }
  }

  /// Pins the form's notion of "today".
  pub fn with_today(mut self, today: NaiveDate) -> Self {
    self.form = self.form.with_today(today);
    self
  }

  /// Loads the destination and the pickup locations.
  ///
  /// The page is `NotFound` when the destination cannot be loaded. A failing
  /// pickup list leaves the selection empty, which makes any pickup invalid.
  #[instrument(name = "CheckoutPage::mount", skip_all, fields(destination_id = ?self.destination_id))]
  pub async fn mount(&mut self, catalog: &dyn CatalogApi) -> PageState {
    let Some(id) = self.destination_id else {
      warn!("No destination to check out.");
      self.state = PageState::NotFound;
      return self.state;
    };

    match catalog.destination(id).await {
      Ok(destination) => {
        self.form.set_unit_price(destination.price);
        self.destination = Some(destination);
      }
      Err(e) => {
        warn!(error = %e, "Destination could not be loaded.");
        self.state = PageState::NotFound;
        return self.state;
      }
    }

    let pickups = catalog.pickup_locations().await.unwrap_or_else(|e| {
      warn!(error = %e, "Pickup locations could not be loaded.");
      Vec::new()
    });
    info!(pickups = pickups.len(), "Checkout page ready.");
    self.form.set_pickup_locations(pickups);
    self.state = PageState::Ready;
    self.state
  }

  pub fn state(&self) -> PageState {
    self.state
  }

  pub fn destination(&self) -> Option<&Destination> {
    self.destination.as_ref()
  }

  pub fn form(&self) -> &BookingForm {
    &self.form
  }

  pub fn form_mut(&mut self) -> &mut BookingForm {
    &mut self.form
  }

  pub fn update_field(&mut self, value: FieldValue) {
    self.form.update_field(value);
  }

  pub fn gate(&self) -> &ConfirmationGate {
    &self.gate
  }

  /// Where the login page sends the user back to.
  pub fn return_path(&self) -> String {
    match self.destination_id {
      Some(id) => format!("/pesan?destinationId={id}"),
      None => "/pesan".to_string(),
    }
  }

  pub fn submit(&mut self) -> SubmitOutcome {
    if self.state != PageState::Ready {
      return SubmitOutcome::Unavailable;
    }
    let Some(booking) = self.form.submit() else {
      return SubmitOutcome::Invalid;
    };
    if self.credential.is_none() {
      info!("Checkout needs a login first.");
      return SubmitOutcome::LoginRequired {
        login_url: login_url(&self.return_path()),
      };
    }
    let pickup = pickup_name(self.form.pickup_locations(), booking.pickup_location_id).map(str::to_string);
    let confirmed = self
      .gate
      .present(booking, self.destination.as_ref(), pickup.as_deref())
      .clone();
    SubmitOutcome::Confirming(confirmed)
  }

  /// Closes the confirmation without ordering. Ignored while paying.
  pub fn cancel(&mut self) -> bool {
    self.gate.cancel(|| info!("Checkout cancelled."))
  }

  /// Confirms the presented booking and runs the checkout.
  ///
  /// `None` when nothing was presented or a checkout is already running.
  pub async fn confirm(&mut self) -> Option<CheckoutOutcome> {
    let credential = self.credential.clone()?;
    let sequencer = self.sequencer.clone();
    let outcome = self
      .gate
      .confirm(|booking| async move { sequencer.submit(booking, &credential).await })
      .await?;
    if outcome == CheckoutOutcome::Failed {
      self.error_visible = true;
    }
    Some(outcome)
  }

  pub fn error_visible(&self) -> bool {
    self.error_visible
  }

  pub fn dismiss_error(&mut self) {
    self.error_visible = false;
  }
}
