// pesan/src/account.rs

//! Sign-up, profile, activity logs and testimonials.

use crate::api::{AccountApi, CatalogApi, Credential, LogScope, Page};
use crate::error::{PesanError, PesanResult};
use crate::model::account::DEFAULT_AVATAR;
use crate::model::{ActivityLogItem, ProfileUpdate, RegisterRequest, Testimonial, UserProfile};
use tracing::{info, instrument, warn};

pub const LOG_PAGE_LIMIT: u32 = 10;
pub const TESTIMONIAL_PAGE_LIMIT: u32 = 6;

pub const REGISTRATION_FAILED: &str = "Pendaftaran gagal. Coba lagi.";
pub const SERVER_UNREACHABLE: &str = "Tidak dapat terhubung ke server.";
pub const PROFILE_UPDATE_FAILED: &str = "Gagal update profile";

/// Absolute avatars are used as is, relative ones are served by the API
/// origin, and a missing one falls back to the bundled default.
pub fn avatar_url(api_base_url: &str, avatar: Option<&str>) -> String {
  match avatar.map(str::trim).filter(|a| !a.is_empty()) {
    None => DEFAULT_AVATAR.to_string(),
    Some(a) if a.starts_with("http") => a.to_string(),
    Some(a) => format!(
      "{}/{}",
      api_base_url.trim_end_matches('/'),
      a.trim_start_matches('/')
    ),
  }
}

/// The logged-in user's profile with `avatar` resolved to a displayable URL.
#[instrument(skip(api, credential), err(Display))]
pub async fn load_profile(api: &dyn AccountApi, credential: &Credential, api_base_url: &str) -> PesanResult<UserProfile> {
  let mut profile = api.profile(credential).await?;
  profile.avatar = Some(avatar_url(api_base_url, profile.avatar.as_deref()));
  Ok(profile)
}

#[instrument(skip(api, request), fields(email = %request.email), err(Display))]
pub async fn register(api: &dyn AccountApi, request: &RegisterRequest) -> PesanResult<()> {
  api.register(request).await?;
  info!("Account registered.");
  Ok(())
}

/// What the sign-up form shows for a failed registration.
pub fn registration_error_message(err: &PesanError) -> String {
  match err {
    PesanError::Transport { .. } => SERVER_UNREACHABLE.to_string(),
    other => other.backend_message().unwrap_or(REGISTRATION_FAILED).to_string(),
  }
}

/// Sends `update` for the user `user_id`, then reloads the profile.
#[instrument(skip(api, credential, update), err(Display))]
pub async fn update_profile(
  api: &dyn AccountApi,
  credential: &Credential,
  user_id: i64,
  update: &ProfileUpdate,
  api_base_url: &str,
) -> PesanResult<UserProfile> {
  api.update_profile(credential, user_id, update).await?;
  info!(fields = update.text_fields().len(), avatar = update.avatar.is_some(), "Profile updated.");
  load_profile(api, credential, api_base_url).await
}

/// The backend's message, or the generic one when it gave none.
pub fn profile_update_error_message(err: &PesanError) -> String {
  err.backend_message().unwrap_or(PROFILE_UPDATE_FAILED).to_string()
}

/// A page of activity logs. Any failure shows as one empty page.
#[instrument(skip(api, credential))]
pub async fn activity_log_page(
  api: &dyn AccountApi,
  credential: &Credential,
  scope: LogScope,
  page: u32,
  limit: u32,
) -> Page<ActivityLogItem> {
  match api.activity_logs(credential, scope, page.max(1), limit).await {
    Ok(logs) => logs,
    Err(e) => {
      warn!(error = %e, "Activity logs could not be loaded.");
      Page::empty(limit)
    }
  }
}

/// A page of testimonials, keeping only approved ones.
#[instrument(skip(api), err(Display))]
pub async fn approved_testimonials(api: &dyn CatalogApi, page: u32) -> PesanResult<Page<Testimonial>> {
  let mut testimonials = api.testimonials(page.max(1), TESTIMONIAL_PAGE_LIMIT).await?;
  testimonials.items.retain(Testimonial::is_approved);
  Ok(testimonials)
}
