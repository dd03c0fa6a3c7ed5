// pesan/src/model/order.rs
use crate::model::booking::SubmittedBooking;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
  pub destination_id: i64,
  pub pickup_location_id: i64,
  pub quantity: u8,
  pub date: NaiveDate,
  pub departure_time: String,
  pub return_time: String,
}

impl CreateOrderRequest {
  pub fn new(destination_id: i64, booking: &SubmittedBooking) -> Self {
    Self {
      destination_id,
      pickup_location_id: booking.pickup_location_id,
      quantity: booking.quantity,
      date: booking.date,
      departure_time: booking.depart_time.clone(),
      return_time: booking.return_time.clone(),
    }
  }
}

/// The only part of a created order the client keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrderCreated {
  pub id: i64,
}

/// Answer of `POST /api/orders/{id}/pay`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
  #[serde(default)]
  pub snap_token: Option<String>,
  #[serde(default)]
  pub redirect_url: Option<String>,
}

impl PaymentSession {
  /// The redirect URL if it is an absolute http(s) URL.
  pub fn usable_redirect(&self) -> Option<&str> {
    let url = self.redirect_url.as_deref()?.trim();
    if url.is_empty() {
      return None;
    }
    match reqwest::Url::parse(url) {
      Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => self.redirect_url.as_deref(),
      _ => None,
    }
  }
}
