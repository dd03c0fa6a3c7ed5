// pesan/src/model/booking.rs

//! Booking input as the user builds it, and the values it turns into once
//! validated and confirmed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Departure slots offered by the form.
pub const DEPART_TIMES: [&str; 6] = ["07:00", "08:00", "09:00", "10:00", "11:00", "12:00"];

/// Return slots offered by the form.
pub const RETURN_TIMES: [&str; 4] = ["15:00", "16:00", "17:00", "18:00"];

pub const MIN_QUANTITY: u8 = 1;
pub const MAX_QUANTITY: u8 = 16;

/// Fields of the booking form that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
  PickupLocationId,
  Date,
  DepartTime,
  ReturnTime,
  Quantity,
}

impl BookingField {
  pub fn as_str(&self) -> &'static str {
    match self {
      BookingField::PickupLocationId => "pickupLocationId",
      BookingField::Date => "date",
      BookingField::DepartTime => "departTime",
      BookingField::ReturnTime => "returnTime",
      BookingField::Quantity => "quantity",
    }
  }
}

impl fmt::Display for BookingField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A value typed into one field of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
  PickupLocation(Option<i64>),
  Date(Option<NaiveDate>),
  DepartTime(Option<String>),
  ReturnTime(Option<String>),
  Quantity(u8),
}

impl FieldValue {
  pub fn field(&self) -> BookingField {
    match self {
      FieldValue::PickupLocation(_) => BookingField::PickupLocationId,
      FieldValue::Date(_) => BookingField::Date,
      FieldValue::DepartTime(_) => BookingField::DepartTime,
      FieldValue::ReturnTime(_) => BookingField::ReturnTime,
      FieldValue::Quantity(_) => BookingField::Quantity,
    }
  }
}

/// Unsubmitted, possibly invalid booking input. Lives only in UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
  pub pickup_location_id: Option<i64>,
  pub date: Option<NaiveDate>,
  pub depart_time: Option<String>,
  pub return_time: Option<String>,
  pub quantity: u8,
}

impl Default for BookingDraft {
  fn default() -> Self {
    Self {
      pickup_location_id: None,
      date: None,
      depart_time: None,
      return_time: None,
      quantity: MIN_QUANTITY,
    }
  }
}

impl BookingDraft {
  pub fn apply(&mut self, value: FieldValue) {
    match value {
      FieldValue::PickupLocation(id) => self.pickup_location_id = id,
      FieldValue::Date(date) => self.date = date,
      FieldValue::DepartTime(time) => self.depart_time = time.filter(|t| !t.is_empty()),
      FieldValue::ReturnTime(time) => self.return_time = time.filter(|t| !t.is_empty()),
      FieldValue::Quantity(quantity) => self.quantity = quantity,
    }
  }
}

/// A draft that passed validation: every field is present and in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedBooking {
  pub pickup_location_id: i64,
  pub date: NaiveDate,
  pub depart_time: String,
  pub return_time: String,
  pub quantity: u8,
}

/// A submitted booking enriched with display data and the price estimate.
/// Discarded on cancel, consumed by the sequencer on confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedBooking {
  pub booking: SubmittedBooking,
  /// `None` when the destination could not be resolved.
  pub destination_id: Option<i64>,
  pub destination_name: String,
  pub pickup_name: String,
  pub unit_price: u64,
  pub estimated_total: u64,
}
