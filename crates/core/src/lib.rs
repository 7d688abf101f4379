//! Core units, constants, and shared primitives for the Impact Viewer workspace.

/// Constants shared between the client, projectors, and exporters.
pub mod constants {
    /// Propagation horizon sent with every simulation request (days).
    pub const DEFAULT_PROPAGATE_DAYS: u32 = 30;
    /// Metres of map-circle radius per kilometre of crater diameter.
    pub const CRATER_RADIUS_M_PER_DIAMETER_KM: f64 = 500.0;
    /// Latitude bound in degrees.
    pub const MAX_LATITUDE_DEG: f64 = 90.0;
    /// Longitude bound in degrees.
    pub const MAX_LONGITUDE_DEG: f64 = 180.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::CRATER_RADIUS_M_PER_DIAMETER_KM;

    /// Map-circle radius in metres for a crater diameter in kilometres.
    #[inline]
    pub fn crater_radius_m(diameter_km: f64) -> f64 {
        diameter_km * CRATER_RADIUS_M_PER_DIAMETER_KM
    }
}

/// Geographic coordinate checks.
pub mod geo {
    use super::constants::{MAX_LATITUDE_DEG, MAX_LONGITUDE_DEG};

    /// True when `lat` is finite and within [-90, 90].
    #[inline]
    pub fn valid_latitude(lat: f64) -> bool {
        lat.is_finite() && (-MAX_LATITUDE_DEG..=MAX_LATITUDE_DEG).contains(&lat)
    }

    /// True when `lon` is finite and within [-180, 180].
    #[inline]
    pub fn valid_longitude(lon: f64) -> bool {
        lon.is_finite() && (-MAX_LONGITUDE_DEG..=MAX_LONGITUDE_DEG).contains(&lon)
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Heliocentric position in scene units (AU for the reference service).
    pub type Vector3 = [f64; 3];

    /// Origin of the heliocentric frame.
    pub const ORIGIN: Vector3 = [0.0, 0.0, 0.0];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(v: &Vector3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}
