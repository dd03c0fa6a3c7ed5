// pesan/src/model/catalog.rs
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A named departure point selectable during booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupLocation {
  pub id: i64,
  pub name: String,
}

/// `{id, name}` reference: a destination's category and region, and the
/// entries of the category and region pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
  pub id: i64,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
  pub id: i64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub name: String,
  /// Price per person in rupiah.
  pub price: u64,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub include: Vec<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub ketentuan: Vec<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub perhatian: Vec<String>,
  #[serde(default)]
  pub category: Option<NamedRef>,
  #[serde(default)]
  pub region: Option<NamedRef>,
}

/// A member of the team shown on the about page and managed by admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
  pub id: i64,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub job: String,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(default)]
  pub image_public_id: Option<String>,
}

/// Looks up the display name of a pickup location.
pub fn pickup_name(locations: &[PickupLocation], id: i64) -> Option<&str> {
  locations.iter().find(|p| p.id == id).map(|p| p.name.as_str())
}
