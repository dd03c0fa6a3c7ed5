// tests/validator_tests.rs
mod common;

use common::*;
use pesan::model::{BookingDraft, BookingField, FieldValue, SubmittedBooking};
use pesan::validator::{
  depart_not_allowed_message, quantity_out_of_range_message, return_not_allowed_message, validate_on, BookingForm,
  MSG_DATE_PAST, MSG_DATE_REQUIRED, MSG_DEPART_REQUIRED, MSG_PICKUP_REQUIRED, MSG_PICKUP_UNKNOWN,
  MSG_RETURN_NOT_AFTER_DEPART, MSG_RETURN_REQUIRED,
};
use std::sync::{Arc, Mutex};

#[test]
fn test_valid_draft_has_no_errors() {
  let validation = validate_on(&valid_draft(), &pickups(), today());
  assert!(validation.valid);
  assert!(validation.errors.is_empty());
}

#[test]
fn test_empty_draft_reports_every_required_field() {
  let validation = validate_on(&BookingDraft::default(), &pickups(), today());

  assert!(!validation.valid);
  assert_eq!(validation.error(BookingField::PickupLocationId), Some(MSG_PICKUP_REQUIRED));
  assert_eq!(validation.error(BookingField::Date), Some(MSG_DATE_REQUIRED));
  assert_eq!(validation.error(BookingField::DepartTime), Some(MSG_DEPART_REQUIRED));
  assert_eq!(validation.error(BookingField::ReturnTime), Some(MSG_RETURN_REQUIRED));
  // Default quantity is 1, which is in range.
  assert_eq!(validation.error(BookingField::Quantity), None);
}

#[test]
fn test_messages_are_the_exact_user_texts() {
  assert_eq!(
    depart_not_allowed_message(),
    "Waktu berangkat harus salah satu dari: 07:00, 08:00, 09:00, 10:00, 11:00, 12:00"
  );
  assert_eq!(
    return_not_allowed_message(),
    "Waktu pulang harus salah satu dari: 15:00, 16:00, 17:00, 18:00"
  );
  assert_eq!(quantity_out_of_range_message(), "Jumlah tiket harus antara 1 dan 16");
}

#[test]
fn test_unknown_pickup_is_rejected() {
  let mut draft = valid_draft();
  draft.pickup_location_id = Some(99);
  let validation = validate_on(&draft, &pickups(), today());
  assert_eq!(validation.error(BookingField::PickupLocationId), Some(MSG_PICKUP_UNKNOWN));

  // With no pickup list loaded, no pickup can be valid.
  let validation = validate_on(&valid_draft(), &[], today());
  assert_eq!(validation.error(BookingField::PickupLocationId), Some(MSG_PICKUP_UNKNOWN));
}

#[test]
fn test_date_before_today_is_rejected_but_today_is_fine() {
  let mut draft = valid_draft();
  draft.date = Some(date(2026, 10, 17));
  assert_eq!(
    validate_on(&draft, &pickups(), today()).error(BookingField::Date),
    Some(MSG_DATE_PAST)
  );

  draft.date = Some(today());
  assert!(validate_on(&draft, &pickups(), today()).valid);
}

#[test]
fn test_times_outside_offered_slots_are_rejected() {
  let mut draft = valid_draft();
  draft.depart_time = Some("06:00".to_string());
  draft.return_time = Some("19:00".to_string());
  let validation = validate_on(&draft, &pickups(), today());

  assert_eq!(
    validation.error(BookingField::DepartTime),
    Some(depart_not_allowed_message().as_str())
  );
  assert_eq!(
    validation.error(BookingField::ReturnTime),
    Some(return_not_allowed_message().as_str())
  );
}

#[test]
fn test_ordering_message_wins_over_slot_message() {
  // 09:00 is not a return slot and is not after 10:00: one message, the ordering one.
  let mut draft = valid_draft();
  draft.depart_time = Some("10:00".to_string());
  draft.return_time = Some("09:00".to_string());
  let validation = validate_on(&draft, &pickups(), today());

  assert_eq!(validation.error(BookingField::ReturnTime), Some(MSG_RETURN_NOT_AFTER_DEPART));
  assert_eq!(validation.error(BookingField::DepartTime), None);
}

#[test]
fn test_every_offered_slot_pair_is_ordered() {
  // All departure slots end by 12:00 and all return slots start at 15:00.
  for depart in pesan::model::DEPART_TIMES {
    for ret in pesan::model::RETURN_TIMES {
      let mut draft = valid_draft();
      draft.depart_time = Some(depart.to_string());
      draft.return_time = Some(ret.to_string());
      assert!(validate_on(&draft, &pickups(), today()).valid, "{depart} -> {ret}");
    }
  }
}

#[test]
fn test_quantity_bounds() {
  for (quantity, ok) in [(0u8, false), (1, true), (16, true), (17, false)] {
    let mut draft = valid_draft();
    draft.quantity = quantity;
    let validation = validate_on(&draft, &pickups(), today());
    assert_eq!(validation.valid, ok, "quantity {quantity}");
    if !ok {
      assert_eq!(
        validation.error(BookingField::Quantity),
        Some(quantity_out_of_range_message().as_str())
      );
    }
  }
}

#[test]
fn test_validate_is_idempotent() {
  let mut draft = BookingDraft::default();
  draft.return_time = Some("16:00".to_string());
  let first = validate_on(&draft, &pickups(), today());
  let second = validate_on(&draft, &pickups(), today());
  assert_eq!(first, second);
}

#[test]
fn test_update_field_clears_only_that_error() {
  let mut form = BookingForm::new(pickups(), 100_000).with_today(today());
  assert!(form.submit().is_none());
  assert!(form.error(BookingField::Date).is_some());
  assert!(form.error(BookingField::DepartTime).is_some());

  form.update_field(FieldValue::Date(Some(date(2026, 10, 20))));

  assert_eq!(form.error(BookingField::Date), None);
  assert_eq!(form.error(BookingField::DepartTime), Some(MSG_DEPART_REQUIRED));
  assert_eq!(form.draft().date, Some(date(2026, 10, 20)));
}

#[test]
fn test_empty_time_counts_as_missing() {
  let mut form = BookingForm::new(pickups(), 100_000).with_today(today());
  form.update_field(FieldValue::DepartTime(Some(String::new())));
  assert_eq!(form.draft().depart_time, None);
}

#[test]
fn test_quantity_stepper_clamps_and_updates_total() {
  let mut form = BookingForm::new(pickups(), 100_000).with_today(today());
  form.decrement_quantity();
  assert_eq!(form.draft().quantity, 1);
  assert_eq!(form.total_label(), "IDR 100.000");

  for _ in 0..20 {
    form.increment_quantity();
  }
  assert_eq!(form.draft().quantity, 16);
  assert_eq!(form.estimated_total(), 1_600_000);
}

#[test]
fn test_submit_calls_continuation_once_with_booking() {
  let received: Arc<Mutex<Vec<SubmittedBooking>>> = Arc::default();
  let sink = received.clone();
  let mut form = BookingForm::new(pickups(), 100_000)
    .with_today(today())
    .with_on_submit(move |booking| sink.lock().unwrap().push(booking));

  let draft = valid_draft();
  form.update_field(FieldValue::PickupLocation(draft.pickup_location_id));
  form.update_field(FieldValue::Date(draft.date));
  form.update_field(FieldValue::DepartTime(draft.depart_time));
  form.update_field(FieldValue::ReturnTime(draft.return_time));
  form.update_field(FieldValue::Quantity(draft.quantity));

  let booking = form.submit().expect("valid draft submits");

  assert_eq!(booking, submitted_booking());
  assert_eq!(*received.lock().unwrap(), vec![submitted_booking()]);
  assert!(form.errors().is_empty());
}

#[test]
fn test_invalid_submit_does_not_call_continuation() {
  let calls = Arc::new(Mutex::new(0));
  let counter = calls.clone();
  let mut form = BookingForm::new(pickups(), 100_000)
    .with_today(today())
    .with_on_submit(move |_| *counter.lock().unwrap() += 1);

  form.update_field(FieldValue::PickupLocation(Some(1)));
  assert!(form.submit().is_none());
  assert_eq!(*calls.lock().unwrap(), 0);
  assert_eq!(form.errors().len(), 3);
}
