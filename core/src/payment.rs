// pesan/src/payment.rs

//! Resuming payment of an existing order from a `/payment/{ref}` link, where
//! `ref` is the base64 text of the order id.

use crate::api::{Credential, OrderApi};
use crate::error::{PesanError, PesanResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Url;
use tracing::{info, instrument};

pub const PAYMENT_FAILED_MESSAGE: &str = "Tidak dapat memproses pembayaran";

/// The `ref` path segment for `order_id`.
pub fn encode_order_reference(order_id: i64) -> String {
  STANDARD.encode(order_id.to_string())
}

fn percent_decode(reference: &str) -> Option<String> {
  let mut url = Url::parse("http://localhost/payment").ok()?;
  url.set_query(Some(&format!("ref={reference}")));
  let (_, value) = url.query_pairs().find(|(k, _)| *k == "ref")?;
  // Form decoding turns a literal '+' into a space; base64 has no spaces.
  Some(value.replace(' ', "+"))
}

/// Order id carried by a payment link reference (percent-encoded or not).
pub fn decode_order_reference(reference: &str) -> PesanResult<i64> {
  let invalid = || PesanError::InvalidOrderReference {
    reference: reference.to_string(),
  };
  let text = percent_decode(reference.trim()).ok_or_else(invalid)?;
  let bytes = STANDARD.decode(text.as_bytes()).map_err(|_| invalid())?;
  let id = String::from_utf8(bytes).map_err(|_| invalid())?;
  match id.trim().parse::<i64>() {
    Ok(id) if id > 0 => Ok(id),
    _ => Err(invalid()),
  }
}

/// Starts payment for the order behind `reference` and returns the gateway
/// URL for the "Bayar Sekarang" button.
#[instrument(skip(api, credential), err(Display))]
pub async fn resume_payment(api: &dyn OrderApi, credential: &Credential, reference: &str) -> PesanResult<String> {
  let order_id = decode_order_reference(reference)?;
  let session = api.initiate_payment(credential, order_id).await?;
  let url = session
    .usable_redirect()
    .map(str::to_string)
    .ok_or(PesanError::MissingRedirect { order_id })?;
  info!(order_id, "Payment session ready.");
  Ok(url)
}

/// What the payment page shows for a failed `resume_payment`.
pub fn payment_error_message(err: &PesanError) -> String {
  err
    .backend_message()
    .unwrap_or(PAYMENT_FAILED_MESSAGE)
    .to_string()
}
