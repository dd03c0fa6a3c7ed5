// pesan/src/effects.rs

//! What the checkout components ask of the surrounding shell: a full-page
//! navigation and a user-visible notice. Both are plain traits so the library
//! never touches a browser or terminal directly.

/// Replaces the current page with another URL (not a client-side route change).
pub trait Navigator: Send + Sync {
  fn navigate(&self, url: &str);
}

/// Shows a dismissable dialog with a fixed title and description.
pub trait Notifier: Send + Sync {
  fn notify(&self, notice: Notice);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub title: String,
  pub description: String,
}

impl Notice {
  pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      description: description.into(),
    }
  }

  /// The one notice shown for any failed checkout, whatever went wrong.
  pub fn checkout_failed() -> Self {
    Self::new("Gagal ❌", "Lengkapi data atau coba lagi.")
  }
}
