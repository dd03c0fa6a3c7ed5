// pesan/src/api/session.rs

//! The bearer credential handed explicitly to every authenticated call.

use std::fmt;

/// An access token issued at login. Never read from ambient storage inside the
/// library; whoever owns the login session passes it in.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
  /// Wraps a token. Blank tokens mean "not logged in" and yield `None`.
  pub fn new(token: impl Into<String>) -> Option<Self> {
    let token = token.into();
    if token.trim().is_empty() {
      None
    } else {
      Some(Credential(token.trim().to_string()))
    }
  }

  pub fn token(&self) -> &str {
    &self.0
  }
}

// Keeps tokens out of logs.
impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Credential(***)")
  }
}
