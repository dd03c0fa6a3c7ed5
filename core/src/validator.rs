// pesan/src/validator.rs

//! Booking Form Validator: holds the in-progress `BookingDraft`, validates it
//! and hands a `SubmittedBooking` onward. Never performs network I/O.

use crate::format::format_idr;
use crate::model::booking::{
  BookingDraft, BookingField, FieldValue, SubmittedBooking, DEPART_TIMES, MAX_QUANTITY, MIN_QUANTITY, RETURN_TIMES,
};
use crate::model::catalog::PickupLocation;
use chrono::{Local, NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use tracing::debug;

pub const MSG_PICKUP_REQUIRED: &str = "Lokasi penjemputan wajib dipilih";
pub const MSG_PICKUP_UNKNOWN: &str = "Lokasi penjemputan tidak tersedia";
pub const MSG_DATE_REQUIRED: &str = "Tanggal keberangkatan wajib dipilih";
pub const MSG_DATE_PAST: &str = "Tanggal keberangkatan tidak boleh sebelum hari ini";
pub const MSG_DEPART_REQUIRED: &str = "Waktu berangkat wajib dipilih";
pub const MSG_RETURN_REQUIRED: &str = "Waktu pulang wajib dipilih";
pub const MSG_RETURN_NOT_AFTER_DEPART: &str = "Waktu pulang harus lebih besar dari waktu berangkat";

pub fn depart_not_allowed_message() -> String {
  format!("Waktu berangkat harus salah satu dari: {}", DEPART_TIMES.join(", "))
}

pub fn return_not_allowed_message() -> String {
  format!("Waktu pulang harus salah satu dari: {}", RETURN_TIMES.join(", "))
}

pub fn quantity_out_of_range_message() -> String {
  format!("Jumlah tiket harus antara {} dan {}", MIN_QUANTITY, MAX_QUANTITY)
}

/// Result of validating a draft. `errors` is keyed by field, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
  pub valid: bool,
  pub errors: BTreeMap<BookingField, String>,
}

impl Validation {
  pub fn error(&self, field: BookingField) -> Option<&str> {
    self.errors.get(&field).map(String::as_str)
  }
}

fn parse_slot(value: &str) -> Option<NaiveTime> {
  NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// `return <= depart`, compared as times of day when both parse and as text
/// otherwise.
fn return_not_after_depart(depart: &str, ret: &str) -> bool {
  match (parse_slot(depart), parse_slot(ret)) {
    (Some(d), Some(r)) => r <= d,
    _ => ret <= depart,
  }
}

/// Validates `draft` against the loaded pickup list and the given calendar day.
///
/// Every rule is evaluated, so a draft missing several fields reports all of
/// them. When the return time is both outside its slot list and not after the
/// departure time, the ordering message is the one kept.
pub fn validate_on(draft: &BookingDraft, pickup_locations: &[PickupLocation], today: NaiveDate) -> Validation {
  let mut errors = BTreeMap::new();

  match draft.pickup_location_id {
    None => {
      errors.insert(BookingField::PickupLocationId, MSG_PICKUP_REQUIRED.to_string());
    }
    Some(id) if !pickup_locations.iter().any(|p| p.id == id) => {
      errors.insert(BookingField::PickupLocationId, MSG_PICKUP_UNKNOWN.to_string());
    }
    Some(_) => {}
  }

  match draft.date {
    None => {
      errors.insert(BookingField::Date, MSG_DATE_REQUIRED.to_string());
    }
    Some(date) if date < today => {
      errors.insert(BookingField::Date, MSG_DATE_PAST.to_string());
    }
    Some(_) => {}
  }

  let depart = draft.depart_time.as_deref().filter(|t| !t.is_empty());
  let ret = draft.return_time.as_deref().filter(|t| !t.is_empty());

  match depart {
    None => {
      errors.insert(BookingField::DepartTime, MSG_DEPART_REQUIRED.to_string());
    }
    Some(t) if !DEPART_TIMES.contains(&t) => {
      errors.insert(BookingField::DepartTime, depart_not_allowed_message());
    }
    Some(_) => {}
  }

  match ret {
    None => {
      errors.insert(BookingField::ReturnTime, MSG_RETURN_REQUIRED.to_string());
    }
    Some(t) if !RETURN_TIMES.contains(&t) => {
      errors.insert(BookingField::ReturnTime, return_not_allowed_message());
    }
    Some(_) => {}
  }

  if let (Some(d), Some(r)) = (depart, ret) {
    if return_not_after_depart(d, r) {
      errors.insert(BookingField::ReturnTime, MSG_RETURN_NOT_AFTER_DEPART.to_string());
    }
  }

  if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&draft.quantity) {
    errors.insert(BookingField::Quantity, quantity_out_of_range_message());
  }

  Validation {
    valid: errors.is_empty(),
    errors,
  }
}

/// `validate_on` against the local calendar date.
pub fn validate(draft: &BookingDraft, pickup_locations: &[PickupLocation]) -> Validation {
  validate_on(draft, pickup_locations, Local::now().date_naive())
}

/// Continuation receiving each successfully submitted booking.
pub type SubmitFn = Box<dyn FnMut(SubmittedBooking) + Send>;

/// The booking form: draft, per-field errors, and the submit action.
pub struct BookingForm {
  pickup_locations: Vec<PickupLocation>,
  unit_price: u64,
  draft: BookingDraft,
  errors: BTreeMap<BookingField, String>,
  today: Option<NaiveDate>,
  on_submit: Option<SubmitFn>,
}

impl BookingForm {
  pub fn new(pickup_locations: Vec<PickupLocation>, unit_price: u64) -> Self {
    Self {
      pickup_locations,
      unit_price,
      draft: BookingDraft::default(),
      errors: BTreeMap::new(),
      today: None,
      on_submit: None,
    }
  }

  /// Calls `on_submit` with every booking that passes validation.
  pub fn with_on_submit(mut self, on_submit: impl FnMut(SubmittedBooking) + Send + 'static) -> Self {
    self.on_submit = Some(Box::new(on_submit));
    self
  }

  /// Pins "today" instead of reading the local clock.
  pub fn with_today(mut self, today: NaiveDate) -> Self {
    self.today = Some(today);
    self
  }

  pub fn draft(&self) -> &BookingDraft {
    &self.draft
  }

  pub fn pickup_locations(&self) -> &[PickupLocation] {
    &self.pickup_locations
  }

  pub fn set_pickup_locations(&mut self, pickup_locations: Vec<PickupLocation>) {
    self.pickup_locations = pickup_locations;
  }

  pub fn set_unit_price(&mut self, unit_price: u64) {
    self.unit_price = unit_price;
  }

  pub fn errors(&self) -> &BTreeMap<BookingField, String> {
    &self.errors
  }

  pub fn error(&self, field: BookingField) -> Option<&str> {
    self.errors.get(&field).map(String::as_str)
  }

  /// Updates one field and clears that field's error.
  pub fn update_field(&mut self, value: FieldValue) {
    let field = value.field();
    self.draft.apply(value);
    self.errors.remove(&field);
  }

  pub fn increment_quantity(&mut self) {
    self.draft.quantity = self.draft.quantity.saturating_add(1).min(MAX_QUANTITY);
  }

  pub fn decrement_quantity(&mut self) {
    self.draft.quantity = self.draft.quantity.saturating_sub(1).max(MIN_QUANTITY);
  }

  pub fn estimated_total(&self) -> u64 {
    self.unit_price.saturating_mul(u64::from(self.draft.quantity))
  }

  /// Label of the submit button: `IDR 100.000`.
  pub fn total_label(&self) -> String {
    format_idr(self.estimated_total())
  }

  fn today(&self) -> NaiveDate {
    self.today.unwrap_or_else(|| Local::now().date_naive())
  }

  pub fn validate(&self) -> Validation {
    validate_on(&self.draft, &self.pickup_locations, self.today())
  }

  /// Validates the draft. Invalid: stores the errors and returns `None`.
  /// Valid: clears the errors, calls the continuation and returns the booking.
  pub fn submit(&mut self) -> Option<SubmittedBooking> {
    let validation = self.validate();
    if !validation.valid {
      debug!(fields = ?validation.errors.keys().collect::<Vec<_>>(), "Booking form rejected.");
      self.errors = validation.errors;
      return None;
    }
    self.errors.clear();

    let booking = self.submitted()?;
    if let Some(on_submit) = self.on_submit.as_mut() {
      on_submit(booking.clone());
    }
    Some(booking)
  }

  fn submitted(&self) -> Option<SubmittedBooking> {
    Some(SubmittedBooking {
      pickup_location_id: self.draft.pickup_location_id?,
      date: self.draft.date?,
      depart_time: self.draft.depart_time.clone()?,
      return_time: self.draft.return_time.clone()?,
      quantity: self.draft.quantity,
    })
  }
}
