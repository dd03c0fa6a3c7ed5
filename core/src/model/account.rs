// pesan/src/model/account.rs
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_AVATAR: &str = "/images/default-avatar.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  pub id: i64,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub notelp: String,
  #[serde(default)]
  pub role: String,
  #[serde(default)]
  pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogItem {
  pub id: i64,
  pub description: String,
  pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
  pub id: i64,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub message: String,
  #[serde(default)]
  pub rating: u8,
  pub approval_status: String,
}

impl Testimonial {
  pub fn is_approved(&self) -> bool {
    self.approval_status == "APPROVED"
  }
}

/// Role every self-registered account gets.
pub const DEFAULT_ROLE: &str = "User";

/// Body of `POST /api/auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
  pub name: String,
  pub email: String,
  pub password: String,
  pub notelp: String,
  pub role: String,
}

impl RegisterRequest {
  pub fn new(
    name: impl Into<String>,
    email: impl Into<String>,
    password: impl Into<String>,
    notelp: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into().trim().to_string(),
      email: email.into().trim().to_string(),
      password: password.into(),
      notelp: notelp.into().trim().to_string(),
      role: DEFAULT_ROLE.to_string(),
    }
  }
}

impl fmt::Debug for RegisterRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RegisterRequest")
      .field("name", &self.name)
      .field("email", &self.email)
      .field("password", &"***")
      .field("notelp", &self.notelp)
      .field("role", &self.role)
      .finish()
  }
}

/// A new avatar image to upload with a profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
  pub file_name: String,
  pub bytes: Vec<u8>,
}

/// Fields sent as multipart form data to `PATCH /api/users/{id}`. Blank
/// text fields are left out, so they keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
  pub name: Option<String>,
  pub notelp: Option<String>,
  pub avatar: Option<AvatarUpload>,
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ProfileUpdate {
  pub fn new(name: Option<String>, notelp: Option<String>, avatar: Option<AvatarUpload>) -> Self {
    Self {
      name: non_blank(name),
      notelp: non_blank(notelp),
      avatar,
    }
  }

  /// `(field, value)` pairs of the text parts, in form order.
  pub fn text_fields(&self) -> Vec<(&'static str, &str)> {
    let mut fields = Vec::new();
    if let Some(name) = &self.name {
      fields.push(("name", name.as_str()));
    }
    if let Some(notelp) = &self.notelp {
      fields.push(("notelp", notelp.as_str()));
    }
    fields
  }
}
