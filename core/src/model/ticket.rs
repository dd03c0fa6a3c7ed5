// pesan/src/model/ticket.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
  Paid,
  Pending,
  Failed,
  Expired,
  /// Any status this client does not know; shown like an expired one.
  #[serde(other)]
  Unknown,
}

impl PaymentStatus {
  pub const ALL: [PaymentStatus; 4] = [
    PaymentStatus::Paid,
    PaymentStatus::Pending,
    PaymentStatus::Failed,
    PaymentStatus::Expired,
  ];

  /// Label shown on ticket badges and used by the status filter.
  pub fn label(&self) -> &'static str {
    match self {
      PaymentStatus::Paid => "Sudah Dibayar",
      PaymentStatus::Pending => "Menunggu Konfirmasi",
      PaymentStatus::Failed => "Gagal",
      PaymentStatus::Expired | PaymentStatus::Unknown => "Kedaluwarsa",
    }
  }

  /// Only the known statuses are selectable by label.
  pub fn from_label(label: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|s| s.label() == label)
  }
}

/// One row of "Tiket Saya".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummary {
  pub id: i64,
  pub ticket_code: String,
  pub destination_name: String,
  /// ISO date text as the backend sends it.
  pub date: String,
  pub payment_status: PaymentStatus,
}

/// E-ticket detail from `GET /api/orders/{id}/ticket`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetail {
  pub ticket_code: String,
  pub is_paid: bool,
  pub user_name: String,
  pub user_phone: String,
  pub destination_name: String,
  pub pickup_location_name: String,
  pub destination_price: u64,
  pub quantity: u32,
  pub total_price: u64,
  pub date: String,
  pub departure_time: String,
  pub return_time: String,
  pub created_at: String,
}

impl TicketDetail {
  pub fn pdf_file_name(&self) -> String {
    format!("tiket-{}.pdf", self.ticket_code)
  }
}
