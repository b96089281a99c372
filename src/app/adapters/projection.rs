//! Geographic to Belgian Lambert 2008 projection
//!
//! Lambert Conformal Conic with two standard parallels on the GRS80
//! ellipsoid. WGS84 coordinates from the geocoder are treated as ETRS89,
//! the datum difference being well below the size of a grid cell.

use crate::constants::lambert2008;
use crate::{Error, Result};
use std::f64::consts::FRAC_PI_4;

/// Projects geographic coordinates to the grid's planar system
pub trait CoordinateProjector: Send + Sync {
    /// Project a longitude/latitude pair in degrees to `(x, y)` metres
    fn project(&self, lon: f64, lat: f64) -> Result<(f64, f64)>;
}

/// EPSG:3812 projection with its constants precomputed
#[derive(Debug, Clone, Copy)]
pub struct Lambert2008 {
    semi_major_axis: f64,
    eccentricity: f64,
    n: f64,
    f: f64,
    rho0: f64,
    lon0: f64,
    false_easting: f64,
    false_northing: f64,
}

impl Default for Lambert2008 {
    fn default() -> Self {
        Self::new()
    }
}

impl Lambert2008 {
    pub fn new() -> Self {
        let a = lambert2008::SEMI_MAJOR_AXIS;
        let flattening = 1.0 / lambert2008::INVERSE_FLATTENING;
        let e = (flattening * (2.0 - flattening)).sqrt();

        let phi1 = lambert2008::STANDARD_PARALLEL_1.to_radians();
        let phi2 = lambert2008::STANDARD_PARALLEL_2.to_radians();
        let phi0 = lambert2008::LATITUDE_OF_ORIGIN.to_radians();

        let m1 = m(phi1, e);
        let m2 = m(phi2, e);
        let t0 = t(phi0, e);
        let t1 = t(phi1, e);
        let t2 = t(phi2, e);

        let n = (m1.ln() - m2.ln()) / (t1.ln() - t2.ln());
        let f = m1 / (n * t1.powf(n));

        Self {
            semi_major_axis: a,
            eccentricity: e,
            n,
            f,
            rho0: a * f * t0.powf(n),
            lon0: lambert2008::CENTRAL_MERIDIAN.to_radians(),
            false_easting: lambert2008::FALSE_EASTING,
            false_northing: lambert2008::FALSE_NORTHING,
        }
    }

    /// Cone constant
    pub fn cone_constant(&self) -> f64 {
        self.n
    }
}

impl CoordinateProjector for Lambert2008 {
    fn project(&self, lon: f64, lat: f64) -> Result<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(Error::projection(format!(
                "Non-finite coordinates ({}, {})",
                lon, lat
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(Error::projection(format!("Longitude {} out of range", lon)));
        }
        // The poles have no image on a cone tangent to the northern hemisphere
        if lat <= -90.0 || lat >= 90.0 {
            return Err(Error::projection(format!("Latitude {} out of range", lat)));
        }

        let phi = lat.to_radians();
        let rho = self.semi_major_axis * self.f * t(phi, self.eccentricity).powf(self.n);
        let theta = self.n * (lon.to_radians() - self.lon0);

        let x = self.false_easting + rho * theta.sin();
        let y = self.false_northing + self.rho0 - rho * theta.cos();

        if !x.is_finite() || !y.is_finite() {
            return Err(Error::projection(format!(
                "Projection of ({}, {}) is not finite",
                lon, lat
            )));
        }

        Ok((x, y))
    }
}

fn m(phi: f64, e: f64) -> f64 {
    phi.cos() / (1.0 - (e * phi.sin()).powi(2)).sqrt()
}

fn t(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}
