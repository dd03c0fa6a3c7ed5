// tests/gate_tests.rs
mod common;

use common::*;
use pesan::gate::{confirm_booking, summary_lines, CONFIRM_LABEL, CONFIRM_LABEL_PAYING, UNRESOLVED};
use pesan::{ConfirmationGate, PayingFlag};

#[test]
fn test_present_computes_estimate_from_price_and_quantity() {
  let mut gate = ConfirmationGate::new(PayingFlag::new(false));
  let confirmed = gate
    .present(submitted_booking(), Some(&destination()), Some("Malang Kota"))
    .clone();

  assert_eq!(confirmed, confirmed_booking());
  assert!(gate.is_open());
}

#[test]
fn test_estimate_is_price_times_quantity_for_every_quantity() {
  for price in [0u64, 1, 75_000, 1_250_000] {
    let mut destination = destination();
    destination.price = price;
    for quantity in 1..=16u8 {
      let mut booking = submitted_booking();
      booking.quantity = quantity;

      let confirmed = confirm_booking(booking, Some(&destination), Some("Malang Kota"));

      assert_eq!(confirmed.unit_price, price);
      assert_eq!(
        confirmed.estimated_total,
        price * u64::from(quantity),
        "price {price}, quantity {quantity}"
      );
    }
  }
}

#[test]
fn test_unresolved_names_render_as_dash() {
  let confirmed = confirm_booking(submitted_booking(), None, None);

  assert_eq!(confirmed.destination_name, UNRESOLVED);
  assert_eq!(confirmed.pickup_name, UNRESOLVED);
  assert_eq!(confirmed.destination_id, None);
  assert_eq!(confirmed.estimated_total, 0);
}

#[test]
fn test_summary_lines() {
  let lines = summary_lines(&confirmed_booking());
  let expected: Vec<(&str, String)> = vec![
    ("Destinasi", "Bromo Sunrise".into()),
    ("Pickup", "Malang Kota".into()),
    ("Tanggal", "20 Oktober 2026".into()),
    ("Waktu", "08:00 – 16:00".into()),
    ("Jumlah", "2 orang".into()),
    ("Estimasi Total", "IDR 200.000".into()),
  ];
  assert_eq!(lines, expected);
}

#[test]
fn test_cancel_discards_without_side_effects() {
  let mut gate = ConfirmationGate::new(PayingFlag::new(false));
  gate.present(submitted_booking(), Some(&destination()), Some("Malang Kota"));

  let mut cancelled = 0;
  assert!(gate.cancel(|| cancelled += 1));
  assert_eq!(cancelled, 1);
  assert!(!gate.is_open());
  assert!(gate.summary_lines().is_empty());

  // Nothing left to cancel.
  assert!(!gate.cancel(|| cancelled += 1));
  assert_eq!(cancelled, 1);
}

#[test]
fn test_controls_disabled_while_paying() {
  let paying = PayingFlag::new(false);
  let mut gate = ConfirmationGate::new(paying.clone());
  gate.present(submitted_booking(), Some(&destination()), Some("Malang Kota"));
  assert!(gate.controls_enabled());
  assert_eq!(gate.confirm_label(), CONFIRM_LABEL);

  *paying.write() = true;

  assert!(!gate.controls_enabled());
  assert_eq!(gate.confirm_label(), CONFIRM_LABEL_PAYING);
  assert!(!gate.cancel(|| panic!("cancel must be ignored while paying")));
  assert!(gate.is_open());
}

#[tokio::test]
async fn test_confirm_hands_booking_over_exactly_once() {
  let mut gate = ConfirmationGate::new(PayingFlag::new(false));
  gate.present(submitted_booking(), Some(&destination()), Some("Malang Kota"));

  let handed = gate.confirm(|booking| async move { booking }).await;
  assert_eq!(handed, Some(confirmed_booking()));
  assert!(!gate.is_open());

  let again = gate.confirm(|booking| async move { booking }).await;
  assert_eq!(again, None);
}

#[tokio::test]
async fn test_confirm_ignored_while_paying() {
  let paying = PayingFlag::new(true);
  let mut gate = ConfirmationGate::new(paying);
  gate.present(submitted_booking(), Some(&destination()), Some("Malang Kota"));

  let handed = gate
    .confirm(|_booking| async move { panic!("continuation must not run while paying") })
    .await;
  assert_eq!(handed, None::<()>);
  assert!(gate.is_open());
}
