// pesan/src/gate.rs

//! Checkout Confirmation Gate: shows what is about to be ordered and only
//! lets the order/payment calls happen after an explicit confirmation.

use crate::format::{format_date_id, format_idr};
use crate::model::{ConfirmedBooking, Destination, SubmittedBooking};
use crate::sequencer::PayingFlag;
use std::future::Future;
use tracing::debug;

/// Shown for a destination or pickup location that could not be resolved.
pub const UNRESOLVED: &str = "-";

pub const CONFIRM_LABEL: &str = "Pesan Sekarang";
pub const CONFIRM_LABEL_PAYING: &str = "Memproses...";

/// Builds the confirmed booking for `booking`. The estimate is the
/// destination's per-person price times the quantity, 0 if unresolved.
pub fn confirm_booking(
  booking: SubmittedBooking,
  destination: Option<&Destination>,
  pickup_name: Option<&str>,
) -> ConfirmedBooking {
  let unit_price = destination.map(|d| d.price).unwrap_or(0);
  ConfirmedBooking {
    destination_id: destination.map(|d| d.id),
    destination_name: destination.map_or_else(|| UNRESOLVED.to_string(), |d| d.name.clone()),
    pickup_name: pickup_name
      .filter(|n| !n.trim().is_empty())
      .unwrap_or(UNRESOLVED)
      .to_string(),
    unit_price,
    estimated_total: unit_price.saturating_mul(u64::from(booking.quantity)),
    booking,
  }
}

pub struct ConfirmationGate {
  paying: PayingFlag,
  pending: Option<ConfirmedBooking>,
}

impl ConfirmationGate {
  /// `paying` is the sequencer's in-flight flag.
  pub fn new(paying: PayingFlag) -> Self {
    Self { paying, pending: None }
  }

  /// Opens the gate for `booking`, replacing anything presented before.
  pub fn present(
    &mut self,
    booking: SubmittedBooking,
    destination: Option<&Destination>,
    pickup_name: Option<&str>,
  ) -> &ConfirmedBooking {
    let confirmed = confirm_booking(booking, destination, pickup_name);
    debug!(estimated_total = confirmed.estimated_total, "Confirmation presented.");
    self.pending.insert(confirmed)
  }

  pub fn is_open(&self) -> bool {
    self.pending.is_some()
  }

  pub fn pending(&self) -> Option<&ConfirmedBooking> {
    self.pending.as_ref()
  }

  pub fn is_paying(&self) -> bool {
    *self.paying.read()
  }

  /// Both buttons are disabled while a checkout is in flight.
  pub fn controls_enabled(&self) -> bool {
    !self.is_paying()
  }

  pub fn confirm_label(&self) -> &'static str {
    if self.is_paying() {
      CONFIRM_LABEL_PAYING
    } else {
      CONFIRM_LABEL
    }
  }

  /// Discards the presented booking and calls `on_cancel` once. Ignored while
  /// paying or when nothing is presented; returns whether it took effect.
  pub fn cancel(&mut self, on_cancel: impl FnOnce()) -> bool {
    if self.is_paying() {
      debug!("Cancel ignored while paying.");
      return false;
    }
    match self.pending.take() {
      Some(_) => {
        on_cancel();
        true
      }
      None => false,
    }
  }

  /// Hands the presented booking to `on_confirm` exactly once and awaits it.
  ///
  /// Returns `None` without calling `on_confirm` when nothing is presented or
  /// a checkout is already in flight. The booking is consumed either way the
  /// continuation ends; a failed checkout needs a fresh `present`.
  pub async fn confirm<F, Fut, T>(&mut self, on_confirm: F) -> Option<T>
  where
    F: FnOnce(ConfirmedBooking) -> Fut,
    Fut: Future<Output = T>,
  {
    if self.is_paying() {
      debug!("Confirm ignored while paying.");
      return None;
    }
    let confirmed = self.pending.take()?;
    Some(on_confirm(confirmed).await)
  }

  /// Rows of the confirmation dialog, in display order.
  pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
    self.pending.as_ref().map(summary_lines).unwrap_or_default()
  }
}

pub fn summary_lines(confirmed: &ConfirmedBooking) -> Vec<(&'static str, String)> {
  let booking = &confirmed.booking;
  vec![
    ("Destinasi", confirmed.destination_name.clone()),
    ("Pickup", confirmed.pickup_name.clone()),
    ("Tanggal", format_date_id(booking.date)),
    ("Waktu", format!("{} – {}", booking.depart_time, booking.return_time)),
    ("Jumlah", format!("{} orang", booking.quantity)),
    ("Estimasi Total", format_idr(confirmed.estimated_total)),
  ]
}
