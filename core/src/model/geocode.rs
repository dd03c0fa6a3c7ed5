// pesan/src/model/geocode.rs

//! Reverse-geocoding answers. Every field is optional; the address text is
//! assembled by trying alternatives in a fixed order.

use serde::Deserialize;

pub const LOCATION_FOUND_FALLBACK: &str = "Lokasi ditemukan";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeocodeAddress {
  pub city: Option<String>,
  pub town: Option<String>,
  pub village: Option<String>,
  pub county: Option<String>,
  pub state: Option<String>,
  pub city_district: Option<String>,
  pub suburb: Option<String>,
  pub road: Option<String>,
  pub house_number: Option<String>,
  pub amenity: Option<String>,
  pub postcode: Option<String>,
  pub building: Option<String>,
  pub pedestrian: Option<String>,
  pub neighbourhood: Option<String>,
  pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReverseGeocodeResponse {
  pub address: Option<GeocodeAddress>,
  pub display_name: Option<String>,
}

/// First candidate that is present and not blank.
fn first_of<'a>(candidates: &[&'a Option<String>]) -> &'a str {
  candidates
    .iter()
    .filter_map(|c| (*c).as_deref())
    .find(|s| !s.trim().is_empty())
    .unwrap_or("")
}

fn join_non_blank(parts: &[&str], sep: &str) -> String {
  parts
    .iter()
    .map(|p| p.trim())
    .filter(|p| !p.is_empty())
    .collect::<Vec<_>>()
    .join(sep)
}

impl ReverseGeocodeResponse {
  /// "Venue, Street No. N, District, City, State", dropping missing parts.
  pub fn address_text(&self) -> String {
    let empty = GeocodeAddress::default();
    let addr = self.address.as_ref().unwrap_or(&empty);

    let street = first_of(&[&addr.road, &addr.pedestrian]);
    let number = match first_of(&[&addr.house_number]) {
      "" => String::new(),
      n => format!("No. {n}"),
    };
    let venue = first_of(&[&addr.amenity, &addr.building]);
    let district = first_of(&[&addr.city_district, &addr.suburb, &addr.village, &addr.neighbourhood]);
    let city = first_of(&[&addr.city, &addr.town, &addr.county]);
    let state = first_of(&[&addr.state]);

    let street_line = join_non_blank(&[street, number.as_str()], " ");
    let first_part = join_non_blank(&[venue, street_line.as_str()], ", ");
    let text = join_non_blank(&[first_part.as_str(), district, city, state], ", ");
    if !text.is_empty() {
      return text;
    }
    match self.display_name.as_deref().map(str::trim) {
      Some(name) if !name.is_empty() => name.to_string(),
      _ => LOCATION_FOUND_FALLBACK.to_string(),
    }
  }
}
