//! Address geocoding
//!
//! The [`Geocoder`] trait turns a free-text address into a WGS84 point.
//! [`NominatimGeocoder`] queries an OpenStreetMap Nominatim search endpoint,
//! restricted to the configured country codes and asking for a single result.

use crate::config::GeocoderConfig;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

/// Resolves addresses to geographic points
pub trait Geocoder: Send + Sync {
    /// Geocode an address; [`Error::AddressNotFound`] when nothing matches
    fn geocode(&self, address: &str) -> impl Future<Output = Result<GeoPoint>> + Send;
}

/// One entry of a Nominatim search response
///
/// Coordinates are serialized as strings; other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
struct NominatimPlace {
    lon: String,
    lat: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimPlace {
    fn to_point(&self) -> Result<GeoPoint> {
        let parse = |name: &str, value: &str| {
            value.trim().parse::<f64>().map_err(|_| {
                Error::geocoding(format!("Invalid {} in geocoder response: '{}'", name, value))
            })
        };

        Ok(GeoPoint {
            lon: parse("longitude", &self.lon)?,
            lat: parse("latitude", &self.lat)?,
        })
    }
}

/// Nominatim search client
///
/// Reuses one `reqwest::Client` with the configured timeout and User-Agent.
pub struct NominatimGeocoder {
    http: reqwest::Client,
    base_url: String,
    country_codes: String,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::geocoding(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            country_codes: config.country_codes.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeoPoint> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", address),
                ("format", "json"),
                ("addressdetails", "1"),
                ("countrycodes", self.country_codes.as_str()),
                ("limit", "1"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        let places: Vec<NominatimPlace> = serde_json::from_slice(&bytes)
            .map_err(|e| Error::geocoding(format!("Invalid geocoder response: {}", e)))?;

        tracing::debug!(
            results = places.len(),
            address = address,
            "Nominatim search completed"
        );

        let place = places
            .first()
            .ok_or_else(|| Error::address_not_found(address))?;

        if let Some(name) = &place.display_name {
            tracing::debug!(display_name = name.as_str(), "Address matched");
        }

        place.to_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let geocoder = NominatimGeocoder::new(&GeocoderConfig::default()).unwrap();
        assert_eq!(
            geocoder.base_url(),
            "https://nominatim.openstreetmap.org/search"
        );
        assert_eq!(geocoder.country_codes, "be");
    }

    #[test]
    fn test_place_deserialize_with_extra_fields() {
        let json = r#"[{
            "place_id": 123456,
            "licence": "Data © OpenStreetMap contributors, ODbL 1.0.",
            "osm_type": "way",
            "lat": "50.8467",
            "lon": "4.3525",
            "display_name": "Grand-Place, Bruxelles, Belgique",
            "address": {"road": "Grand-Place", "postcode": "1000", "country_code": "be"},
            "boundingbox": ["50.8460", "50.8474", "4.3515", "4.3535"]
        }]"#;

        let places: Vec<NominatimPlace> = serde_json::from_str(json).unwrap();
        assert_eq!(places.len(), 1);

        let point = places[0].to_point().unwrap();
        assert!((point.lon - 4.3525).abs() < 1e-9);
        assert!((point.lat - 50.8467).abs() < 1e-9);
    }

    #[test]
    fn test_empty_result_list() {
        let places: Vec<NominatimPlace> = serde_json::from_str("[]").unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn test_unparseable_coordinate() {
        let place = NominatimPlace {
            lon: "east".to_string(),
            lat: "50.0".to_string(),
            display_name: None,
        };
        assert!(matches!(place.to_point(), Err(Error::Geocoding { .. })));
    }
}
