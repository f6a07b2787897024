//! The `Propagator` consumed interface (§6) and its reference implementations
//! (C10 expansion). The routing core depends only on the trait; everything
//! below the trait line is a convenience for callers who don't bring their
//! own orbital-mechanics engine.

use chrono::{DateTime, TimeZone, Utc};

use crate::constants::SECONDS_PER_DAY;
use crate::error::{Result, RoutingError};
use crate::geometry::Vec3;
use crate::node::NodeDescriptor;

/// UTC time expressed as fractional days since the Unix epoch, matching the
/// internal representation used by `TimeWindow` (§3).
pub type UtcDays = f64;

pub fn utc_days_to_datetime(t: UtcDays) -> DateTime<Utc> {
    let seconds = t * SECONDS_PER_DAY;
    Utc.timestamp_opt(seconds.floor() as i64, ((seconds.fract()) * 1e9) as u32)
        .single()
        .expect("UTC day value out of range")
}

pub fn datetime_to_utc_days(dt: DateTime<Utc>) -> UtcDays {
    dt.timestamp() as f64 / SECONDS_PER_DAY + dt.timestamp_subsec_nanos() as f64 / 1e9 / SECONDS_PER_DAY
}

/// Position and velocity of a node at one instant, in an Earth-centered
/// inertial frame (km, km/s). Ground sites report a zero velocity.
#[derive(Debug, Clone, Copy)]
pub struct StateVector {
    pub position_km: Vec3,
    pub velocity_km_s: Vec3,
}

/// Propagates a node descriptor to a state vector at a given time.
/// Implementations MUST be pure functions of `(descriptor, t)` and
/// re-entrant (§6).
pub trait Propagator: Send + Sync {
    fn propagate(&self, descriptor: &NodeDescriptor, t: UtcDays) -> Result<StateVector>;
}

/// Reference propagator backed by the `sgp4` crate for satellites; ground
/// sites are returned as a fixed ECEF-style position with zero velocity
/// (§4.3: "ground stations... sampling is a no-op").
#[cfg(feature = "sgp4-propagator")]
pub struct Sgp4Propagator;

#[cfg(feature = "sgp4-propagator")]
impl Sgp4Propagator {
    pub fn new() -> Self {
        Self
    }

    fn propagate_satellite(
        &self,
        sat: &crate::node::SatelliteDescriptor,
        t: UtcDays,
    ) -> Result<StateVector> {
        let epoch = utc_days_to_datetime(sat.epoch_jd - crate::constants::J2000_EPOCH_JD + 2440587.5);
        let elements = sgp4::Elements {
            object_name: None,
            international_designator: None,
            norad_id: sat.catalog_number,
            classification: sgp4::Classification::Unclassified,
            datetime: epoch.naive_utc(),
            mean_motion_dot: 0.0,
            mean_motion_ddot: 0.0,
            drag_term: sat.bstar,
            element_set_number: 1,
            inclination: sat.inclination_deg,
            right_ascension: sat.raan_deg,
            eccentricity: sat.eccentricity,
            argument_of_perigee: sat.arg_perigee_deg,
            mean_anomaly: sat.mean_anomaly_deg,
            mean_motion: sat.mean_motion_rev_per_day,
            revolution_number: 1,
            ephemeris_type: 0,
        };

        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| RoutingError::propagation(format!("{e:?}")))?;

        let target = utc_days_to_datetime(t);
        let minutes_since_epoch = target.signed_duration_since(epoch).num_seconds() as f64 / 60.0;

        let prediction = constants
            .propagate(sgp4::MinutesSinceEpoch(minutes_since_epoch))
            .map_err(|e| RoutingError::propagation(format!("{e:?}")))?;

        Ok(StateVector {
            position_km: Vec3::new(
                prediction.position[0],
                prediction.position[1],
                prediction.position[2],
            ),
            velocity_km_s: Vec3::new(
                prediction.velocity[0],
                prediction.velocity[1],
                prediction.velocity[2],
            ),
        })
    }
}

#[cfg(feature = "sgp4-propagator")]
impl Default for Sgp4Propagator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "sgp4-propagator")]
impl Propagator for Sgp4Propagator {
    fn propagate(&self, descriptor: &NodeDescriptor, t: UtcDays) -> Result<StateVector> {
        match descriptor {
            NodeDescriptor::Satellite(sat) => self.propagate_satellite(sat, t),
            NodeDescriptor::GroundSite(site) => Ok(ground_site_state(site)),
        }
    }
}

fn ground_site_state(site: &crate::node::GroundSiteDescriptor) -> StateVector {
    use crate::constants::{DEG_TO_RAD, EARTH_RADIUS_KM};

    let lat = site.latitude_deg * DEG_TO_RAD;
    let lon = site.longitude_deg * DEG_TO_RAD;
    let r = EARTH_RADIUS_KM + site.altitude_km;

    StateVector {
        position_km: Vec3::new(
            r * lat.cos() * lon.cos(),
            r * lat.cos() * lon.sin(),
            r * lat.sin(),
        ),
        velocity_km_s: Vec3::new(0.0, 0.0, 0.0),
    }
}

/// A propagator driven by a user-supplied closure, independent of orbital
/// mechanics entirely. Used by the integration tests in §8 to reproduce
/// deterministic scenarios without depending on `sgp4`.
pub struct StaticPropagator<F>
where
    F: Fn(&NodeDescriptor, UtcDays) -> StateVector + Send + Sync,
{
    f: F,
}

impl<F> StaticPropagator<F>
where
    F: Fn(&NodeDescriptor, UtcDays) -> StateVector + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Propagator for StaticPropagator<F>
where
    F: Fn(&NodeDescriptor, UtcDays) -> StateVector + Send + Sync,
{
    fn propagate(&self, descriptor: &NodeDescriptor, t: UtcDays) -> Result<StateVector> {
        Ok((self.f)(descriptor, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::GroundSiteDescriptor;

    #[test]
    fn static_propagator_is_pure() {
        let prop = StaticPropagator::new(|_desc, t| StateVector {
            position_km: Vec3::new(t, 0.0, 0.0),
            velocity_km_s: Vec3::new(0.0, 0.0, 0.0),
        });
        let desc = NodeDescriptor::GroundSite(GroundSiteDescriptor {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_km: 0.0,
        });
        let state = prop.propagate(&desc, 3.5).unwrap();
        assert_eq!(state.position_km.x, 3.5);
    }

    #[test]
    fn utc_days_round_trip() {
        let t = 19_600.25;
        let dt = utc_days_to_datetime(t);
        let back = datetime_to_utc_days(dt);
        assert!((back - t).abs() < 1e-9);
    }
}
