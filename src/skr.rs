//! Secret-key-rate adapter (C2): dispatches to one of four link models by
//! node-kind pair, mirroring `skr-utils.h`'s `fibre_link` / `ground_to_sat_uplink`
//! / `sat_to_ground_downlink` / `inter_sat_link` / `get_inter_node_skr`.

use crate::constants::MIN_ELEVATION_DEG;
use crate::geometry::{los_clear, Vec3};
use crate::node::{GroundSiteDescriptor, Node, NodeDescriptor, NodeKind};
use crate::propagator::{StateVector, UtcDays};
use crate::topocentric::Topocentric;

/// The physical channel model, consumed as a pure function of geometry
/// (§6). Each method returns non-negative bits/s.
pub trait SkrModel: Send + Sync {
    fn sat_sat(&self, pos_a: &Vec3, pos_b: &Vec3) -> f64;
    fn uplink(&self, site: &GroundSiteDescriptor, elevation_deg: f64, slant_range_km: f64) -> f64;
    fn downlink(&self, site: &GroundSiteDescriptor, elevation_deg: f64, slant_range_km: f64) -> f64;
    fn fiber(&self, site_a: &GroundSiteDescriptor, site_b: &GroundSiteDescriptor) -> f64;
}

/// Reference SKR model: free-space links fall off with the inverse square
/// of range (diffraction-limited channel loss), fiber falls off linearly
/// with great-circle distance (attenuation per km). Hosts with a real
/// CV-QKD finite-size key-rate model substitute their own `SkrModel`.
pub struct DefaultSkrModel {
    pub sat_sat_reference_rate_bps: f64,
    pub uplink_reference_rate_bps: f64,
    pub downlink_reference_rate_bps: f64,
    pub fiber_attenuation_db_per_km: f64,
    pub fiber_reference_rate_bps: f64,
}

impl Default for DefaultSkrModel {
    fn default() -> Self {
        Self {
            sat_sat_reference_rate_bps: 1.0e6,
            uplink_reference_rate_bps: 1.0e5,
            downlink_reference_rate_bps: 1.0e5,
            fiber_attenuation_db_per_km: 0.2,
            fiber_reference_rate_bps: 1.0e7,
        }
    }
}

impl SkrModel for DefaultSkrModel {
    fn sat_sat(&self, pos_a: &Vec3, pos_b: &Vec3) -> f64 {
        let range_km = (pos_b - pos_a).norm().max(1.0);
        self.sat_sat_reference_rate_bps / (range_km * range_km)
    }

    fn uplink(&self, _site: &GroundSiteDescriptor, elevation_deg: f64, slant_range_km: f64) -> f64 {
        if elevation_deg < MIN_ELEVATION_DEG {
            return 0.0;
        }
        let range_km = slant_range_km.max(1.0);
        self.uplink_reference_rate_bps / (range_km * range_km)
    }

    fn downlink(&self, _site: &GroundSiteDescriptor, elevation_deg: f64, slant_range_km: f64) -> f64 {
        if elevation_deg < MIN_ELEVATION_DEG {
            return 0.0;
        }
        let range_km = slant_range_km.max(1.0);
        self.downlink_reference_rate_bps / (range_km * range_km)
    }

    fn fiber(&self, site_a: &GroundSiteDescriptor, site_b: &GroundSiteDescriptor) -> f64 {
        let dist_km = great_circle_distance_km(site_a, site_b).max(1.0);
        let loss_db = self.fiber_attenuation_db_per_km * dist_km;
        self.fiber_reference_rate_bps * 10f64.powf(-loss_db / 10.0)
    }
}

fn great_circle_distance_km(a: &GroundSiteDescriptor, b: &GroundSiteDescriptor) -> f64 {
    use crate::constants::{DEG_TO_RAD, EARTH_RADIUS_KM};

    let lat1 = a.latitude_deg * DEG_TO_RAD;
    let lat2 = b.latitude_deg * DEG_TO_RAD;
    let dlat = lat2 - lat1;
    let dlon = (b.longitude_deg - a.longitude_deg) * DEG_TO_RAD;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Bundles an `SkrModel` with a `Topocentric` helper and dispatches over
/// the four node-kind pairs (§4.2's table). This is the oracle's (C4) sole
/// point of contact with link physics.
pub struct SkrAdapter {
    model: Box<dyn SkrModel>,
    topo: Box<dyn Topocentric>,
}

impl SkrAdapter {
    pub fn new(model: Box<dyn SkrModel>, topo: Box<dyn Topocentric>) -> Self {
        Self { model, topo }
    }

    /// Instantaneous rate (bits/s) between `src` and `dst` given their
    /// state vectors at time `t`. Returns 0 when LOS is blocked or the
    /// satellite is below the local horizon; never negative.
    pub fn rate(&self, src: &Node, src_state: &StateVector, dst: &Node, dst_state: &StateVector, t: UtcDays) -> f64 {
        match (src.kind, dst.kind) {
            (NodeKind::Satellite, NodeKind::Satellite) => {
                if !los_clear(&src_state.position_km, &dst_state.position_km) {
                    return 0.0;
                }
                self.model.sat_sat(&src_state.position_km, &dst_state.position_km)
            }
            (NodeKind::GroundStation, NodeKind::Satellite) => {
                let site = ground_site(src);
                let elev = self.topo.elevation_deg(site, &dst_state.position_km, t);
                let range = self.topo.slant_range_km(site, &dst_state.position_km, t);
                self.model.uplink(site, elev, range)
            }
            (NodeKind::Satellite, NodeKind::GroundStation) => {
                let site = ground_site(dst);
                let elev = self.topo.elevation_deg(site, &src_state.position_km, t);
                let range = self.topo.slant_range_km(site, &src_state.position_km, t);
                self.model.downlink(site, elev, range)
            }
            (NodeKind::GroundStation, NodeKind::GroundStation) => {
                self.model.fiber(ground_site(src), ground_site(dst))
            }
        }
    }
}

fn ground_site(node: &Node) -> &GroundSiteDescriptor {
    match &node.descriptor {
        NodeDescriptor::GroundSite(site) => site,
        NodeDescriptor::Satellite(_) => unreachable!("node kind tag must match descriptor variant"),
    }
}
