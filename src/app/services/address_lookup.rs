//! Address to accessibility lookup
//!
//! Chains the geocoder, the projector and the resolver. Input validation
//! happens here so that the HTTP layer and the CLI share the same rules.

use crate::app::adapters::geocoder::{GeoPoint, Geocoder};
use crate::app::adapters::projection::CoordinateProjector;
use crate::app::services::accessibility_resolver::{AccessibilityReport, AccessibilityResolver};
use crate::constants::{
    ADDRESS_COUNTRY, MIN_ADDRESS_LEN, MIN_NUMBER_LEN, MIN_STREET_LEN, POSTAL_CODE_LEN,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Projected point in Lambert 2008 metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

/// Address split into its parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredAddress {
    pub street: String,
    pub number: String,
    pub postal_code: String,
    #[serde(default)]
    pub city: Option<String>,
}

impl StructuredAddress {
    /// Check field lengths
    pub fn validate(&self) -> Result<()> {
        check_min_len("street", &self.street, MIN_STREET_LEN)?;
        check_min_len("number", &self.number, MIN_NUMBER_LEN)?;

        if char_len(&self.postal_code) != POSTAL_CODE_LEN {
            return Err(Error::data_validation(format!(
                "postal_code must be exactly {} characters, got '{}'",
                POSTAL_CODE_LEN, self.postal_code
            )));
        }
        Ok(())
    }

    /// Free-text form sent to the geocoder; a blank city is left out
    pub fn to_query(&self) -> String {
        match self.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(city) => format!(
                "{} {}, {} {}, {}",
                self.street, self.number, self.postal_code, city, ADDRESS_COUNTRY
            ),
            None => format!(
                "{} {}, {}, {}",
                self.street, self.number, self.postal_code, ADDRESS_COUNTRY
            ),
        }
    }
}

/// Result of a free-text address lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressScoreResponse {
    pub address_input: String,
    pub geocoding: GeoPoint,
    pub lambert2008: ProjectedPoint,
    #[serde(flatten)]
    pub report: AccessibilityReport,
}

/// Result of a structured address lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredScoreResponse {
    pub address_input_structured: StructuredAddress,
    pub address_built_for_geocoding: String,
    pub geocoding: GeoPoint,
    pub lambert2008: ProjectedPoint,
    #[serde(flatten)]
    pub report: AccessibilityReport,
}

/// Result of a lookup by projected coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointScoreResponse {
    pub lambert2008: ProjectedPoint,
    #[serde(flatten)]
    pub report: AccessibilityReport,
}

/// Geocode, project and resolve addresses against the loaded grid
pub struct AddressLookupService<G, P> {
    geocoder: G,
    projector: P,
    resolver: AccessibilityResolver,
}

impl<G, P> AddressLookupService<G, P>
where
    G: Geocoder,
    P: CoordinateProjector,
{
    pub fn new(geocoder: G, projector: P, resolver: AccessibilityResolver) -> Self {
        Self {
            geocoder,
            projector,
            resolver,
        }
    }

    pub fn resolver(&self) -> &AccessibilityResolver {
        &self.resolver
    }

    /// Number of cells in the underlying grid
    pub fn cell_count(&self) -> usize {
        self.resolver.index().cell_count()
    }

    /// Score a free-text address
    pub async fn score_by_address(&self, address: &str) -> Result<AddressScoreResponse> {
        check_min_len("address", address, MIN_ADDRESS_LEN)?;

        let (geocoding, lambert2008, report) = self.locate(address).await?;

        Ok(AddressScoreResponse {
            address_input: address.to_string(),
            geocoding,
            lambert2008,
            report,
        })
    }

    /// Score an address given as street, number, postal code and city
    pub async fn score_structured(
        &self,
        address: StructuredAddress,
    ) -> Result<StructuredScoreResponse> {
        address.validate()?;

        let query = address.to_query();
        let (geocoding, lambert2008, report) = self.locate(&query).await?;

        Ok(StructuredScoreResponse {
            address_input_structured: address,
            address_built_for_geocoding: query,
            geocoding,
            lambert2008,
            report,
        })
    }

    /// Score an already projected point
    pub fn score_by_point(&self, x: f64, y: f64) -> Result<PointScoreResponse> {
        let report = self.resolver.resolve(x, y)?;
        Ok(PointScoreResponse {
            lambert2008: ProjectedPoint { x, y },
            report,
        })
    }

    /// Score a WGS84 point
    pub fn score_by_lon_lat(&self, lon: f64, lat: f64) -> Result<PointScoreResponse> {
        let (x, y) = self.projector.project(lon, lat)?;
        self.score_by_point(x, y)
    }

    async fn locate(
        &self,
        query: &str,
    ) -> Result<(GeoPoint, ProjectedPoint, AccessibilityReport)> {
        let point = self.geocoder.geocode(query).await?;
        let (x, y) = self.projector.project(point.lon, point.lat)?;
        debug!(
            "Geocoded '{}' to ({}, {}), Lambert 2008 ({:.2}, {:.2})",
            query, point.lon, point.lat, x, y
        );

        let report = self.resolver.resolve(x, y)?;
        info!("Address '{}' resolved to cell {}", query, report.cell.id);

        Ok((point, ProjectedPoint { x, y }, report))
    }
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn check_min_len(field: &str, value: &str, min: usize) -> Result<()> {
    if char_len(value) < min {
        return Err(Error::data_validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    Ok(())
}
