// pesan/src/search.rs

//! The home page search card: pick a category and/or a region and get the
//! search page path; plus the "your location" line above it.

use crate::api::{CatalogApi, GeocodeApi};
use crate::model::NamedRef;
use tracing::{instrument, warn};

pub const SELECTION_REQUIRED: &str = "Silakan pilih kategori atau daerah";

pub const LOCATION_PERMISSION_DENIED: &str = "Izin lokasi ditolak";
pub const LOCATION_LOOKUP_FAILED: &str = "Gagal mendeteksi lokasi (Coba refresh)";

#[derive(Debug, Clone, Default)]
pub struct SearchForm {
  categories: Vec<NamedRef>,
  regions: Vec<NamedRef>,
  category: Option<NamedRef>,
  region: Option<NamedRef>,
}

fn pick(options: &[NamedRef], id: i64) -> Option<NamedRef> {
  options.iter().find(|o| o.id == id).cloned()
}

impl SearchForm {
  pub fn new() -> Self {
    Self::default()
  }

  /// Loads both pickers. A picker whose list fails to load stays empty.
  #[instrument(name = "SearchForm::load", skip_all)]
  pub async fn load(&mut self, api: &dyn CatalogApi) {
    self.categories = api.categories().await.unwrap_or_else(|e| {
      warn!(error = %e, "Categories could not be loaded.");
      Vec::new()
    });
    self.regions = api.regions().await.unwrap_or_else(|e| {
      warn!(error = %e, "Regions could not be loaded.");
      Vec::new()
    });
  }

  pub fn categories(&self) -> &[NamedRef] {
    &self.categories
  }

  pub fn regions(&self) -> &[NamedRef] {
    &self.regions
  }

  /// Selects the category with `id`, if it is one of the loaded ones.
  pub fn select_category(&mut self, id: i64) -> bool {
    self.category = pick(&self.categories, id);
    self.category.is_some()
  }

  pub fn select_region(&mut self, id: i64) -> bool {
    self.region = pick(&self.regions, id);
    self.region.is_some()
  }

  pub fn selected_category(&self) -> Option<&NamedRef> {
    self.category.as_ref()
  }

  pub fn selected_region(&self) -> Option<&NamedRef> {
    self.region.as_ref()
  }

  /// `/search?category=<id>&area=<id>` with whichever of the two is chosen.
  /// Choosing neither is refused with `SELECTION_REQUIRED`.
  pub fn search_path(&self) -> Result<String, &'static str> {
    let mut params = Vec::new();
    if let Some(category) = &self.category {
      params.push(format!("category={}", category.id));
    }
    if let Some(region) = &self.region {
      params.push(format!("area={}", region.id));
    }
    if params.is_empty() {
      return Err(SELECTION_REQUIRED);
    }
    Ok(format!("/search?{}", params.join("&")))
  }
}

/// Text for the "Lokasi Kamu" line. `position` is `None` when the user did
/// not allow location access.
#[instrument(skip(api))]
pub async fn location_label(api: &dyn GeocodeApi, position: Option<(f64, f64)>) -> String {
  let Some((latitude, longitude)) = position else {
    return LOCATION_PERMISSION_DENIED.to_string();
  };
  match api.reverse_geocode(latitude, longitude).await {
    Ok(answer) => answer.address_text(),
    Err(e) => {
      warn!(error = %e, "Reverse geocoding failed.");
      LOCATION_LOOKUP_FAILED.to_string()
    }
  }
}
