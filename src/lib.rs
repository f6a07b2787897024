//! Time-dependent max-capacity routing engine for QKD-secured satellite and
//! ground-station constellations.
//!
//! Given a set of nodes (satellites and ground stations), a source, a
//! destination, and a planning window, `plan_max_capacity` finds the
//! largest data volume that can be moved from source to destination within
//! the window, and the path that achieves it. Internally this runs a
//! binary search (C7) over candidate volumes, each checked by a
//! time-dependent shortest-path solver (C6) that treats a Simpson-rule
//! transfer-time integrator (C4) as its edge-weight oracle.
//!
//! Orbital propagation and the physical secret-key-rate model are
//! consumed interfaces (`Propagator`, `SkrModel`, `Topocentric`); this
//! crate ships reference implementations for standalone use but expects
//! production hosts to supply their own.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod heap;
pub mod node;
pub mod oracle;
pub mod path;
pub mod propagator;
pub mod skr;
pub mod tdsp;
pub mod topocentric;
pub mod trajectory;

mod optimizer;

pub use config::{load_planning_config, save_planning_config, PlanningConfig};
pub use error::{Result, RoutingError};
pub use node::{GroundSiteDescriptor, Node, NodeDescriptor, NodeKind, SatelliteDescriptor};
pub use optimizer::PlanResult;
pub use path::{Path, PathHop};
pub use propagator::{Propagator, StateVector, UtcDays};
pub use skr::{DefaultSkrModel, SkrAdapter, SkrModel};
pub use topocentric::{SimpleTopocentric, Topocentric};
pub use trajectory::{SampledState, TimeWindow, Trajectory, TrajectoryCache};

#[cfg(feature = "sgp4-propagator")]
pub use propagator::Sgp4Propagator;

/// The single public entry point (§6). Builds a trajectory cache over
/// `window`, then drives the capacity optimizer between `src_id` and
/// `dst_id`.
///
/// Returns `RoutingError::UnknownNode` if either id is absent from `nodes`,
/// and `RoutingError::Configuration` if `window` has non-positive `dt` or
/// `t_end <= t_start` (§7). `TimeWindow`'s fields are public, so a caller
/// can construct one by struct literal and bypass `TimeWindow::new`; this
/// entry point re-validates rather than trusting construction.
pub fn plan_max_capacity(
    nodes: &[Node],
    src_id: i64,
    dst_id: i64,
    window: TimeWindow,
    propagator: &dyn Propagator,
    adapter: &SkrAdapter,
    config: &PlanningConfig,
) -> Result<PlanResult> {
    window.validate()?;
    if !nodes.iter().any(|n| n.id == src_id) {
        return Err(RoutingError::UnknownNode(src_id));
    }
    if !nodes.iter().any(|n| n.id == dst_id) {
        return Err(RoutingError::UnknownNode(dst_id));
    }

    let cache = TrajectoryCache::build(nodes, &window, propagator)?;
    Ok(optimizer::optimize(nodes, src_id, dst_id, &window, &cache, adapter, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::GroundSiteDescriptor;

    fn sample_nodes() -> Vec<Node> {
        vec![
            Node::ground_station(0, GroundSiteDescriptor { latitude_deg: 0.0, longitude_deg: 0.0, altitude_km: 0.0 }),
            Node::ground_station(1, GroundSiteDescriptor { latitude_deg: 0.0, longitude_deg: 1.0, altitude_km: 0.0 }),
        ]
    }

    #[test]
    fn rejects_unknown_source() {
        let nodes = sample_nodes();
        let window = TimeWindow::new(0.0, 1.0, 0.1).unwrap();
        let propagator = propagator::StaticPropagator::new(|_d, t| StateVector {
            position_km: geometry::Vec3::new(t, 0.0, 0.0),
            velocity_km_s: geometry::Vec3::new(0.0, 0.0, 0.0),
        });
        let adapter = SkrAdapter::new(Box::new(DefaultSkrModel::default()), Box::new(SimpleTopocentric::new()));
        let config = PlanningConfig::default();

        let result = plan_max_capacity(&nodes, 999, 1, window, &propagator, &adapter, &config);
        assert!(matches!(result, Err(RoutingError::UnknownNode(999))));
    }

    #[test]
    fn rejects_invalid_window_even_when_built_by_struct_literal() {
        let nodes = sample_nodes();
        // Bypasses `TimeWindow::new`'s checks entirely.
        let window = TimeWindow { t_start: 1.0, t_end: 0.0, dt: 0.1 };
        let propagator = propagator::StaticPropagator::new(|_d, t| StateVector {
            position_km: geometry::Vec3::new(t, 0.0, 0.0),
            velocity_km_s: geometry::Vec3::new(0.0, 0.0, 0.0),
        });
        let adapter = SkrAdapter::new(Box::new(DefaultSkrModel::default()), Box::new(SimpleTopocentric::new()));
        let config = PlanningConfig::default();

        let result = plan_max_capacity(&nodes, 0, 1, window, &propagator, &adapter, &config);
        assert!(matches!(result, Err(RoutingError::Configuration(_))));
    }

    #[test]
    fn plans_a_capacity_between_two_reachable_ground_stations() {
        let nodes = sample_nodes();
        let window = TimeWindow::new(0.0, 10.0, 1.0).unwrap();
        let propagator = propagator::StaticPropagator::new(|_d, t| StateVector {
            position_km: geometry::Vec3::new(t, 0.0, 0.0),
            velocity_km_s: geometry::Vec3::new(0.0, 0.0, 0.0),
        });
        let adapter = SkrAdapter::new(Box::new(DefaultSkrModel::default()), Box::new(SimpleTopocentric::new()));
        let config = PlanningConfig { initial_d_hi: 1000.0, ..PlanningConfig::default() };

        let result = plan_max_capacity(&nodes, 0, 1, window, &propagator, &adapter, &config).unwrap();
        match result {
            PlanResult::Feasible { max_data_size, path } => {
                assert!(max_data_size > 0.0);
                assert_eq!(path.hops.first().unwrap().node_id, 0);
                assert_eq!(path.hops.last().unwrap().node_id, 1);
            }
            PlanResult::Infeasible => panic!("expected feasible plan"),
        }
    }
}
