//! Physical and mathematical constants used across the routing engine.

use std::f64::consts::PI;

/// Mathematical constants
pub const TWO_PI: f64 = 2.0 * PI;
pub const DEG_TO_RAD: f64 = PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / PI;

/// Earth physical constants (WGS84)
pub const EARTH_RADIUS_KM: f64 = 6378.137;
pub const EARTH_ROTATION_RATE_RAD_S: f64 = 7.2921159e-5;

/// Atmospheric margin added to the Earth radius for line-of-sight occlusion
/// tests (C1): a segment passing within this altitude of the surface is
/// treated as blocked even if it clears the solid sphere.
pub const ATMOSPHERE_MARGIN_KM: f64 = 20.0;

/// Effective occlusion radius used by `geometry::los_clear`.
pub const LOS_OCCLUSION_RADIUS_KM: f64 = EARTH_RADIUS_KM + ATMOSPHERE_MARGIN_KM;

/// Time constants. Internal time is UTC days (fractional Julian-day style);
/// these convert at the UTC boundary (`chrono::DateTime<Utc>` <-> `f64`).
pub const SECONDS_PER_DAY: f64 = 86400.0;
pub const J2000_EPOCH_JD: f64 = 2451545.0;

/// Below this elevation a satellite is considered below the local horizon
/// for uplink/downlink purposes (C2).
pub const MIN_ELEVATION_DEG: f64 = 0.0;

/// Numeric tolerances shared by the oracle (C4) and geometry (C1).
pub const RATE_SLOPE_TOLERANCE: f64 = 1e-12;
pub const TIME_TOLERANCE_DAYS: f64 = 1e-9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_conversions_round_trip() {
        assert!((DEG_TO_RAD * 180.0 - PI).abs() < 1e-15);
        assert!((RAD_TO_DEG * PI - 180.0).abs() < 1e-15);
        assert!((TWO_PI - 2.0 * PI).abs() < 1e-15);
    }

    #[test]
    fn occlusion_radius_includes_margin() {
        assert_eq!(LOS_OCCLUSION_RADIUS_KM, EARTH_RADIUS_KM + 20.0);
    }
}
