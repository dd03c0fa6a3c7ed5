// pesan/src/catalog.rs

//! Destination browsing: every destination grouped under the category tabs,
//! with display fallbacks for incomplete entries. Also the team listing.

use crate::api::CatalogApi;
use crate::error::PesanResult;
use crate::model::{Destination, NamedRef, TeamMember};
use tracing::{debug, instrument, warn};

pub const UNNAMED_DESTINATION: &str = "Tanpa Nama";
pub const NO_DESCRIPTION: &str = "Deskripsi belum tersedia";
pub const UNKNOWN_REGION: &str = "Lokasi tidak diketahui";
pub const DEFAULT_DESTINATION_IMAGE: &str = "/images/default.jpg";
/// Shown when the active category has no destinations.
pub const NO_DESTINATIONS: &str = "Destinasi tidak tersedia";

/// Fills in what a card cannot render without: a name and a description.
pub fn with_display_fallbacks(mut destination: Destination) -> Destination {
  if destination.name.trim().is_empty() {
    destination.name = UNNAMED_DESTINATION.to_string();
  }
  if destination.description.as_deref().map_or(true, |d| d.trim().is_empty()) {
    destination.description = Some(NO_DESCRIPTION.to_string());
  }
  destination
}

pub fn region_label(destination: &Destination) -> &str {
  destination.region.as_ref().map_or(UNKNOWN_REGION, |r| r.name.as_str())
}

pub fn image_url(destination: &Destination) -> &str {
  destination
    .image_url
    .as_deref()
    .filter(|u| !u.trim().is_empty())
    .unwrap_or(DEFAULT_DESTINATION_IMAGE)
}

/// Category tabs over the full destination list. The first category is
/// active after loading; without an active category nothing is shown.
#[derive(Debug, Clone, Default)]
pub struct DestinationBrowser {
  categories: Vec<NamedRef>,
  destinations: Vec<Destination>,
  active_category: Option<String>,
}

impl DestinationBrowser {
  pub fn new() -> Self {
    Self::default()
  }

  /// Loads categories and destinations. Either one failing leaves its list
  /// empty.
  #[instrument(name = "DestinationBrowser::load", skip_all)]
  pub async fn load(&mut self, api: &dyn CatalogApi) {
    self.categories = api.categories().await.unwrap_or_else(|e| {
      warn!(error = %e, "Categories could not be loaded.");
      Vec::new()
    });
    self.active_category = self.categories.first().map(|c| c.name.clone());

    self.destinations = match api.destinations().await {
      Ok(destinations) => destinations.into_iter().map(with_display_fallbacks).collect(),
      Err(e) => {
        warn!(error = %e, "Destinations could not be loaded.");
        Vec::new()
      }
    };
    debug!(
      categories = self.categories.len(),
      destinations = self.destinations.len(),
      "Destinations loaded."
    );
  }

  pub fn categories(&self) -> &[NamedRef] {
    &self.categories
  }

  pub fn active_category(&self) -> Option<&str> {
    self.active_category.as_deref()
  }

  /// Switches to the category called `name`. Unknown names change nothing.
  pub fn select_category(&mut self, name: &str) -> bool {
    let known = self.categories.iter().any(|c| c.name == name);
    if known {
      self.active_category = Some(name.to_string());
    }
    known
  }

  /// Destinations of the active category.
  pub fn visible(&self) -> Vec<&Destination> {
    let Some(active) = self.active_category.as_deref() else {
      return Vec::new();
    };
    self
      .destinations
      .iter()
      .filter(|d| d.category.as_ref().is_some_and(|c| c.name == active))
      .collect()
  }

  /// The empty-state text, when there is nothing to show.
  pub fn empty_message(&self) -> Option<&'static str> {
    self.visible().is_empty().then_some(NO_DESTINATIONS)
  }
}

#[instrument(skip(api), err(Display))]
pub async fn team_members(api: &dyn CatalogApi) -> PesanResult<Vec<TeamMember>> {
  api.team().await
}
