//! The `Topocentric` consumed interface (§6): elevation and slant range of a
//! satellite as seen from a ground site. Split out from the SKR adapter
//! because, like the propagator, it is a piece of orbital-mechanics
//! machinery the routing core treats as externally supplied.

use crate::constants::{DEG_TO_RAD, EARTH_ROTATION_RATE_RAD_S, RAD_TO_DEG, TWO_PI};
use crate::geometry::Vec3;
use crate::node::GroundSiteDescriptor;
use crate::propagator::UtcDays;

/// Elevation (degrees above horizon) and slant range (km) of a satellite
/// position as seen from a ground site at a given time.
pub trait Topocentric: Send + Sync {
    fn elevation_deg(&self, site: &GroundSiteDescriptor, sat_eci: &Vec3, t: UtcDays) -> f64;
    fn slant_range_km(&self, site: &GroundSiteDescriptor, sat_eci: &Vec3, t: UtcDays) -> f64;
}

/// Reference implementation: rotates the site into the ECI frame by the
/// sidereal angle accumulated since the epoch, then applies the standard
/// topocentric elevation formula. Adequate for routing purposes; hosts
/// needing IERS-grade precision (polar motion, UT1-UTC) should substitute
/// their own implementation.
pub struct SimpleTopocentric;

impl SimpleTopocentric {
    pub fn new() -> Self {
        Self
    }

    fn site_eci(&self, site: &GroundSiteDescriptor, t: UtcDays) -> Vec3 {
        use crate::constants::EARTH_RADIUS_KM;

        let lat = site.latitude_deg * DEG_TO_RAD;
        let lon0 = site.longitude_deg * DEG_TO_RAD;
        let r = EARTH_RADIUS_KM + site.altitude_km;

        let seconds_since_epoch = t * crate::constants::SECONDS_PER_DAY;
        let sidereal_rotation = (EARTH_ROTATION_RATE_RAD_S * seconds_since_epoch) % TWO_PI;
        let lon = lon0 + sidereal_rotation;

        Vec3::new(
            r * lat.cos() * lon.cos(),
            r * lat.cos() * lon.sin(),
            r * lat.sin(),
        )
    }

    fn local_frame(&self, site: &GroundSiteDescriptor, t: UtcDays) -> (Vec3, Vec3, Vec3) {
        let site_pos = self.site_eci(site, t);
        let up = site_pos.normalize();
        let lat = site.latitude_deg * DEG_TO_RAD;
        let lon0 = site.longitude_deg * DEG_TO_RAD;
        let seconds_since_epoch = t * crate::constants::SECONDS_PER_DAY;
        let lon = lon0 + (EARTH_ROTATION_RATE_RAD_S * seconds_since_epoch) % TWO_PI;

        let east = Vec3::new(-lon.sin(), lon.cos(), 0.0);
        let north = Vec3::new(
            -lat.sin() * lon.cos(),
            -lat.sin() * lon.sin(),
            lat.cos(),
        );
        (east, north, up)
    }
}

impl Default for SimpleTopocentric {
    fn default() -> Self {
        Self::new()
    }
}

impl Topocentric for SimpleTopocentric {
    fn elevation_deg(&self, site: &GroundSiteDescriptor, sat_eci: &Vec3, t: UtcDays) -> f64 {
        let site_pos = self.site_eci(site, t);
        let (_, _, up) = self.local_frame(site, t);
        let rel = sat_eci - site_pos;
        let range = rel.norm();
        if range < f64::EPSILON {
            return 90.0;
        }
        (rel.dot(&up) / range).asin() * RAD_TO_DEG
    }

    fn slant_range_km(&self, site: &GroundSiteDescriptor, sat_eci: &Vec3, t: UtcDays) -> f64 {
        let site_pos = self.site_eci(site, t);
        (sat_eci - site_pos).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directly_overhead_is_ninety_degrees() {
        use crate::constants::EARTH_RADIUS_KM;

        let topo = SimpleTopocentric::new();
        let site = GroundSiteDescriptor {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_km: 0.0,
        };
        // At t=0 the site's longitude rotation is zero, so a satellite
        // directly above (0,0) on the equator is straight up.
        let sat = Vec3::new(EARTH_RADIUS_KM + 500.0, 0.0, 0.0);
        let elev = topo.elevation_deg(&site, &sat, 0.0);
        assert!((elev - 90.0).abs() < 1e-6);
    }

    #[test]
    fn slant_range_matches_altitude_when_overhead() {
        use crate::constants::EARTH_RADIUS_KM;

        let topo = SimpleTopocentric::new();
        let site = GroundSiteDescriptor {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_km: 0.0,
        };
        let sat = Vec3::new(EARTH_RADIUS_KM + 500.0, 0.0, 0.0);
        let range = topo.slant_range_km(&site, &sat, 0.0);
        assert!((range - 500.0).abs() < 1e-6);
    }
}
