// src/lib.rs

//! Pesan: the checkout side of a tourism booking front end.
//!
//! A booking goes through three components, in this order:
//!  - `validator::BookingForm` collects and validates the booking input.
//!  - `gate::ConfirmationGate` shows the summary and price estimate and waits
//!    for an explicit confirmation.
//!  - `sequencer::OrderPaymentSequencer` creates the order, starts its payment
//!    and navigates to the payment gateway, at most one run at a time.
//!
//! The sequencer runs on a small step engine (`Workflow`) with named steps,
//! before/on/after handlers and early stopping. Backend access goes through
//! the traits in `api`, implemented over HTTP by `api::HttpBackend`.
//!
//! Around the checkout sit the rest of the front end's operations: browsing
//! destinations (`catalog`), the search card (`search`), tickets, payment
//! resume and the account pages.

pub mod account;
pub mod api;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod effects;
pub mod error;
pub mod format;
pub mod gate;
pub mod model;
pub mod payment;
pub mod search;
pub mod sequencer;
pub mod tickets;
pub mod validator;
pub mod workflow;

// --- Re-exports for the Public API ---

// Step engine
pub use crate::core::context_data::ContextData;
pub use crate::core::control::{StepControl, WorkflowResult};
pub use crate::workflow::Workflow;

// Checkout components
pub use crate::checkout::{CheckoutPage, PageState, SubmitOutcome};
pub use crate::gate::ConfirmationGate;
pub use crate::sequencer::{CheckoutOutcome, OrderPaymentSequencer, PayingFlag};
pub use crate::validator::{validate, validate_on, BookingForm, Validation};

pub use crate::api::{ClientConfig, Credential, HttpBackend};
pub use crate::effects::{Navigator, Notice, Notifier};
pub use crate::error::{PesanError, PesanResult};

/*
    Checkout flow:
    1. `CheckoutPage::mount()` loads the destination and the pickup locations.
    2. Field edits go through `update_field()`; `submit()` validates and, with a
       credential present, opens the confirmation gate.
    3. `confirm()` hands the confirmed booking to the sequencer, which runs
       `create_order` -> `initiate_payment` -> `redirect_to_gateway`.
    4. Any failure shows one generic notice and re-enables the page.
*/
