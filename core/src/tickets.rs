// pesan/src/tickets.rs

//! "Tiket Saya": the user's paginated orders, a client-side filter over the
//! loaded page, e-ticket detail and its PDF.

use crate::api::{Credential, Page, TicketApi};
use crate::error::PesanResult;
use crate::model::{PaymentStatus, TicketDetail, TicketSummary};
use tracing::{debug, instrument, warn};

pub const TICKETS_PAGE_LIMIT: u32 = 5;

/// Label of the "no status filter" option.
pub const ALL_STATUSES_LABEL: &str = "Semua";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
  #[default]
  All,
  Only(PaymentStatus),
}

impl StatusFilter {
  /// Unknown labels select everything.
  pub fn from_label(label: &str) -> Self {
    PaymentStatus::from_label(label).map_or(StatusFilter::All, StatusFilter::Only)
  }

  pub fn label(&self) -> &'static str {
    match self {
      StatusFilter::All => ALL_STATUSES_LABEL,
      StatusFilter::Only(status) => status.label(),
    }
  }

  pub fn matches(&self, status: PaymentStatus) -> bool {
    match self {
      StatusFilter::All => true,
      StatusFilter::Only(wanted) => *wanted == status,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketQuery {
  pub text: String,
  pub status: StatusFilter,
}

impl TicketQuery {
  /// Destination name and ticket code match case-insensitively; the date
  /// text matches as typed.
  pub fn matches(&self, ticket: &TicketSummary) -> bool {
    if !self.status.matches(ticket.payment_status) {
      return false;
    }
    let text = self.text.trim();
    if text.is_empty() {
      return true;
    }
    let needle = text.to_lowercase();
    ticket.destination_name.to_lowercase().contains(&needle)
      || ticket.ticket_code.to_lowercase().contains(&needle)
      || ticket.date.contains(text)
  }
}

pub fn filter_tickets<'a>(tickets: &'a [TicketSummary], query: &TicketQuery) -> Vec<&'a TicketSummary> {
  tickets.iter().filter(|t| query.matches(t)).collect()
}

/// One page of the user's tickets plus the filter applied on top of it.
#[derive(Debug, Clone)]
pub struct TicketList {
  page: Page<TicketSummary>,
  limit: u32,
  query: TicketQuery,
}

impl TicketList {
  pub fn new(limit: u32) -> Self {
    let limit = limit.max(1);
    Self {
      page: Page::empty(limit),
      limit,
      query: TicketQuery::default(),
    }
  }

  /// Loads `page`. Without a credential nothing is requested; a failed fetch
  /// is logged. Both leave a single empty page.
  #[instrument(name = "TicketList::load", skip(self, api, credential), fields(limit = self.limit))]
  pub async fn load(&mut self, api: &dyn TicketApi, credential: Option<&Credential>, page: u32) {
    let Some(credential) = credential else {
      debug!("Not logged in, showing no tickets.");
      self.page = Page::empty(self.limit);
      return;
    };
    self.page = match api.my_tickets(credential, page.max(1), self.limit).await {
      Ok(tickets) => tickets,
      Err(e) => {
        warn!(error = %e, "Tickets could not be loaded.");
        Page::empty(self.limit)
      }
    };
  }

  /// Changes the search text. A changed filter goes back to the first page;
  /// the page to load is returned when another page is shown.
  pub fn set_text(&mut self, text: impl Into<String>) -> Option<u32> {
    let text = text.into();
    if self.query.text == text {
      return None;
    }
    self.query.text = text;
    self.back_to_first_page()
  }

  pub fn set_status(&mut self, status: StatusFilter) -> Option<u32> {
    if self.query.status == status {
      return None;
    }
    self.query.status = status;
    self.back_to_first_page()
  }

  fn back_to_first_page(&self) -> Option<u32> {
    (self.page() != 1).then_some(1)
  }

  pub fn query(&self) -> &TicketQuery {
    &self.query
  }

  pub fn page(&self) -> u32 {
    self.page.page
  }

  pub fn total_pages(&self) -> u32 {
    self.page.total_pages.max(1)
  }

  /// Page to load for "next", if there is one.
  pub fn next_page(&self) -> Option<u32> {
    (self.page() < self.total_pages()).then(|| self.page() + 1)
  }

  pub fn prev_page(&self) -> Option<u32> {
    (self.page() > 1).then(|| self.page() - 1)
  }

  /// Tickets of the loaded page that pass the filter.
  pub fn visible(&self) -> Vec<&TicketSummary> {
    filter_tickets(&self.page.items, &self.query)
  }
}

impl Default for TicketList {
  fn default() -> Self {
    Self::new(TICKETS_PAGE_LIMIT)
  }
}

#[instrument(skip(api, credential), err(Display))]
pub async fn ticket_detail(api: &dyn TicketApi, credential: &Credential, order_id: i64) -> PesanResult<TicketDetail> {
  api.ticket_detail(credential, order_id).await
}

/// A downloaded e-ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPdf {
  pub file_name: String,
  pub bytes: Vec<u8>,
}

#[instrument(skip(api, credential, detail), fields(ticket_code = %detail.ticket_code), err(Display))]
pub async fn download_ticket_pdf(
  api: &dyn TicketApi,
  credential: &Credential,
  order_id: i64,
  detail: &TicketDetail,
) -> PesanResult<TicketPdf> {
  let bytes = api.ticket_pdf(credential, order_id).await?;
  if bytes.is_empty() {
    warn!("Ticket PDF is empty.");
  }
  Ok(TicketPdf {
    file_name: detail.pdf_file_name(),
    bytes,
  })
}
