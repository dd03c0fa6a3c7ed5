// pesan/src/sequencer.rs

//! Order-Payment Sequencer: creates the order, starts its payment and sends
//! the user to the payment gateway, strictly in that order.

use crate::api::{Credential, OrderApi};
use crate::core::context_data::ContextData;
use crate::core::control::{StepControl, WorkflowResult};
use crate::effects::{Navigator, Notice, Notifier};
use crate::error::PesanError;
use crate::model::{ConfirmedBooking, CreateOrderRequest, PaymentSession, SubmittedBooking};
use crate::workflow::Workflow;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub const STEP_CREATE_ORDER: &str = "create_order";
pub const STEP_INITIATE_PAYMENT: &str = "initiate_payment";
pub const STEP_REDIRECT: &str = "redirect_to_gateway";

/// Whether a checkout is in flight. Shared with the confirmation gate, which
/// disables its controls while it is set.
pub type PayingFlag = ContextData<bool>;

/// Data of a single checkout run, filled in step by step.
#[derive(Debug)]
pub struct CheckoutRun {
  pub destination_id: Option<i64>,
  pub booking: SubmittedBooking,
  pub credential: Credential,
  pub order_id: Option<i64>,
  pub payment: Option<PaymentSession>,
  /// Redirect of `payment`, once checked to be usable.
  pub gateway_url: Option<String>,
  pub redirected_to: Option<String>,
}

impl CheckoutRun {
  pub fn new(confirmed: ConfirmedBooking, credential: Credential) -> Self {
    Self {
      destination_id: confirmed.destination_id,
      booking: confirmed.booking,
      credential,
      order_id: None,
      payment: None,
      gateway_url: None,
      redirected_to: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
  /// The navigator was sent to the gateway. `paying` stays set.
  Redirected { order_id: i64, url: String },
  /// Some step failed. The failure notice was shown and `paying` cleared.
  Failed,
  /// Another checkout is already in flight. Nothing was sent.
  AlreadyInProgress,
}

/// Sets the paying flag for the lifetime of one run and clears it again on
/// drop, unless the run ended in a redirect.
struct PayingGuard {
  flag: PayingFlag,
  armed: bool,
}

impl PayingGuard {
  fn acquire(flag: &PayingFlag) -> Option<Self> {
    let mut paying = flag.write();
    if *paying {
      return None;
    }
    *paying = true;
    Some(Self {
      flag: flag.clone(),
      armed: true,
    })
  }

  fn keep(mut self) {
    self.armed = false;
  }
}

impl Drop for PayingGuard {
  fn drop(&mut self) {
    if self.armed {
      *self.flag.write() = false;
    }
  }
}

pub struct OrderPaymentSequencer {
  workflow: Workflow<CheckoutRun, PesanError>,
  paying: PayingFlag,
  notifier: Arc<dyn Notifier>,
}

impl OrderPaymentSequencer {
  pub fn new(api: Arc<dyn OrderApi>, navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
    let mut workflow = Workflow::new("checkout", &[STEP_CREATE_ORDER, STEP_INITIATE_PAYMENT, STEP_REDIRECT]);

    workflow.before_step(STEP_CREATE_ORDER, |run: ContextData<CheckoutRun>| {
      let resolved = run.read().destination_id.is_some();
      if !resolved {
        warn!("Booking has no resolved destination, not creating an order.");
      }
      let control = if resolved { StepControl::Continue } else { StepControl::Stop };
      std::future::ready(Ok::<_, PesanError>(control))
    });

    let order_api = api.clone();
    workflow.on_step(STEP_CREATE_ORDER, move |run: ContextData<CheckoutRun>| {
      let api = order_api.clone();
      async move {
        let (request, credential) = {
          let guard = run.read();
          let destination_id = guard
            .destination_id
            .ok_or_else(|| PesanError::NotFound("destination of the booking".to_string()))?;
          (CreateOrderRequest::new(destination_id, &guard.booking), guard.credential.clone())
        };
        let created = api.create_order(&credential, &request).await?;
        info!(order_id = created.id, "Order created.");
        run.write().order_id = Some(created.id);
        Ok::<_, PesanError>(StepControl::Continue)
      }
    });

    let payment_api = api;
    workflow.on_step(STEP_INITIATE_PAYMENT, move |run: ContextData<CheckoutRun>| {
      let api = payment_api.clone();
      async move {
        let (order_id, credential) = {
          let guard = run.read();
          let order_id = guard
            .order_id
            .ok_or_else(|| PesanError::Internal("payment started without an order".to_string()))?;
          (order_id, guard.credential.clone())
        };
        let payment = api.initiate_payment(&credential, order_id).await?;
        info!(order_id, has_redirect = payment.redirect_url.is_some(), "Payment initiated.");
        run.write().payment = Some(payment);
        Ok::<_, PesanError>(StepControl::Continue)
      }
    });

    // Only a session with a usable redirect may reach the redirect step.
    workflow.after_step(STEP_INITIATE_PAYMENT, |run: ContextData<CheckoutRun>| {
      let checked = {
        let mut guard = run.write();
        let order_id = guard.order_id.unwrap_or_default();
        let usable = guard
          .payment
          .as_ref()
          .and_then(PaymentSession::usable_redirect)
          .map(str::to_string);
        match usable {
          Some(url) => {
            guard.gateway_url = Some(url);
            Ok(StepControl::Continue)
          }
          None => Err(PesanError::MissingRedirect { order_id }),
        }
      };
      std::future::ready(checked)
    });

    workflow.on_step(STEP_REDIRECT, move |run: ContextData<CheckoutRun>| {
      let navigator = navigator.clone();
      async move {
        let url = run
          .read()
          .gateway_url
          .clone()
          .ok_or_else(|| PesanError::Internal("redirect without a checked gateway URL".to_string()))?;
        navigator.navigate(&url);
        run.write().redirected_to = Some(url);
        Ok::<_, PesanError>(StepControl::Continue)
      }
    });

    Self {
      workflow,
      paying: PayingFlag::new(false),
      notifier,
    }
  }

  /// Handle on the paying flag, for components that render from it.
  pub fn paying_flag(&self) -> PayingFlag {
    self.paying.clone()
  }

  pub fn is_paying(&self) -> bool {
    *self.paying.read()
  }

  /// Runs one checkout for `booking`.
  ///
  /// At most one run is in flight: a call made while `paying` is set returns
  /// `AlreadyInProgress` without touching the backend. Any failure shows the
  /// generic failure notice and clears `paying`. A redirect leaves it set
  /// since the page is being replaced.
  #[instrument(
    name = "OrderPaymentSequencer::submit",
    skip_all,
    fields(destination_id = ?booking.destination_id, quantity = booking.booking.quantity)
  )]
  pub async fn submit(&self, booking: ConfirmedBooking, credential: &Credential) -> CheckoutOutcome {
    let Some(guard) = PayingGuard::acquire(&self.paying) else {
      info!("Checkout already in progress, ignoring submission.");
      return CheckoutOutcome::AlreadyInProgress;
    };

    let run = ContextData::new(CheckoutRun::new(booking, credential.clone()));
    match self.workflow.run(run.clone()).await {
      Ok(WorkflowResult::Completed) => {
        let redirected = {
          let state = run.read();
          state.order_id.zip(state.redirected_to.clone())
        };
        match redirected {
          Some((order_id, url)) => {
            guard.keep();
            info!(order_id, %url, "Redirected to payment gateway.");
            CheckoutOutcome::Redirected { order_id, url }
          }
          None => {
            warn!("Checkout completed without a redirect.");
            self.fail(guard)
          }
        }
      }
      Ok(WorkflowResult::Stopped) => {
        warn!("Checkout stopped before creating an order.");
        self.fail(guard)
      }
      Err(e) => {
        error!(error = %e, "Checkout failed.");
        self.fail(guard)
      }
    }
  }

  fn fail(&self, guard: PayingGuard) -> CheckoutOutcome {
    drop(guard);
    self.notifier.notify(Notice::checkout_failed());
    CheckoutOutcome::Failed
  }
}
