//! Node identity and descriptors (§3, §9 design notes).
//!
//! Satellites and ground stations are modeled as a tagged variant rather
//! than via a shared trait/inheritance hierarchy: the SKR adapter (C2)
//! dispatches on exactly the four combinations of this tag, and nothing
//! else in the routing core needs virtual dispatch.

use serde::{Deserialize, Serialize};

/// Discriminates the two kinds of routable endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Satellite,
    GroundStation,
}

/// Raw orbital elements for a satellite, sufficient to drive a `Propagator`.
/// Field names and units follow the catalogue convention used by the
/// `sgp4` crate's two-line-element sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteDescriptor {
    pub catalog_number: u64,
    pub epoch_jd: f64,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub eccentricity: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    pub mean_motion_rev_per_day: f64,
    pub bstar: f64,
}

/// Fixed site location for a ground station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundSiteDescriptor {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

/// The opaque descriptor a `Node` carries, consumed by the propagator and
/// the topocentric-conversion helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeDescriptor {
    Satellite(SatelliteDescriptor),
    GroundSite(GroundSiteDescriptor),
}

/// Identity of a routable endpoint. Identifiers are unique within a
/// planning run; by convention satellites use positive catalogue numbers
/// and ground stations use negative assigned slots, but the core itself
/// treats `id` as an opaque key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub kind: NodeKind,
    pub descriptor: NodeDescriptor,
}

impl Node {
    pub fn satellite(id: i64, descriptor: SatelliteDescriptor) -> Self {
        Self {
            id,
            kind: NodeKind::Satellite,
            descriptor: NodeDescriptor::Satellite(descriptor),
        }
    }

    pub fn ground_station(id: i64, descriptor: GroundSiteDescriptor) -> Self {
        Self {
            id,
            kind: NodeKind::GroundStation,
            descriptor: NodeDescriptor::GroundSite(descriptor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_tag_kind_correctly() {
        let sat = Node::satellite(
            1,
            SatelliteDescriptor {
                catalog_number: 1,
                epoch_jd: 2451545.0,
                inclination_deg: 55.0,
                raan_deg: 0.0,
                eccentricity: 0.001,
                arg_perigee_deg: 0.0,
                mean_anomaly_deg: 0.0,
                mean_motion_rev_per_day: 14.2,
                bstar: 0.0,
            },
        );
        assert_eq!(sat.kind, NodeKind::Satellite);

        let gs = Node::ground_station(
            -1,
            GroundSiteDescriptor {
                latitude_deg: 40.0,
                longitude_deg: -105.0,
                altitude_km: 1.6,
            },
        );
        assert_eq!(gs.kind, NodeKind::GroundStation);
    }
}
