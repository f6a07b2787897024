//! Trajectory cache (C3): pre-sampled per-node state series over a fixed
//! planning window, built once and shared read-only for the remainder of
//! a run.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::error::{Result, RoutingError};
use crate::geometry::Vec3;
use crate::node::Node;
use crate::propagator::{Propagator, StateVector, UtcDays};

/// Planning interval `[t_start, t_end]` sampled at a fixed step `dt`, all
/// in UTC days (§3).
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub t_start: UtcDays,
    pub t_end: UtcDays,
    pub dt: UtcDays,
}

impl TimeWindow {
    pub fn new(t_start: UtcDays, t_end: UtcDays, dt: UtcDays) -> Result<Self> {
        let window = Self { t_start, t_end, dt };
        window.validate()?;
        Ok(window)
    }

    /// Re-checks the invariants `new` enforces at construction (§3):
    /// `t_end > t_start`, `dt > 0`, and the sample count fits an `i32`.
    /// Every field on `TimeWindow` is `pub` so a caller can build one by
    /// struct literal and skip `new`; callers that accept a `TimeWindow`
    /// from outside the crate (the public boundary, §7) MUST call this
    /// before using it.
    pub fn validate(&self) -> Result<()> {
        if self.t_end <= self.t_start {
            return Err(RoutingError::configuration("t_end must be greater than t_start"));
        }
        if self.dt <= 0.0 {
            return Err(RoutingError::configuration("dt must be positive"));
        }
        if self.sample_count() > i32::MAX as usize {
            return Err(RoutingError::configuration("window produces too many samples for i32 indexing"));
        }
        Ok(())
    }

    /// `N = ceil((t_end - t_start) / dt) + 1` (§3).
    pub fn sample_count(&self) -> usize {
        (((self.t_end - self.t_start) / self.dt).ceil() as usize) + 1
    }

    pub fn time_at(&self, index: usize) -> UtcDays {
        self.t_start + index as f64 * self.dt
    }

    /// First sample index at or after `t`, per the oracle's index convention (§4.4).
    pub fn index_at_or_after(&self, t: UtcDays) -> i64 {
        ((t - self.t_start) / self.dt).ceil() as i64
    }
}

/// A node's kinematic state at one sample instant.
#[derive(Debug, Clone, Copy)]
pub struct SampledState {
    pub time: UtcDays,
    pub position_km: Vec3,
    pub velocity_km_s: Vec3,
}

/// Ordered, immutable sequence of `SampledState`s for a single node:
/// `trajectory[i]` represents `t_start + i * dt`.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub samples: Vec<SampledState>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SampledState> {
        self.samples.get(index)
    }
}

/// Owns every node's `Trajectory` for the duration of one planning run.
pub struct TrajectoryCache {
    trajectories: HashMap<i64, Trajectory>,
}

impl TrajectoryCache {
    /// Builds trajectories for every node by sampling the propagator at
    /// each grid point. Construction is parallel across nodes (§4.3): each
    /// node's samples are independent, so the fan-out is a plain
    /// work-stealing map rather than anything the oracle or solver see.
    pub fn build(nodes: &[Node], window: &TimeWindow, propagator: &dyn Propagator) -> Result<Self> {
        let n = window.sample_count();

        let built: Result<Vec<(i64, Trajectory)>> = nodes
            .par_iter()
            .map(|node| -> Result<(i64, Trajectory)> {
                let mut samples = Vec::with_capacity(n);
                for i in 0..n {
                    let t = window.time_at(i);
                    let state: StateVector = propagator.propagate(&node.descriptor, t)?;
                    samples.push(SampledState {
                        time: t,
                        position_km: state.position_km,
                        velocity_km_s: state.velocity_km_s,
                    });
                }
                Ok((node.id, Trajectory { samples }))
            })
            .collect();

        let trajectories: HashMap<i64, Trajectory> = built?.into_iter().collect();

        tracing::info!(
            nodes = trajectories.len(),
            samples_per_node = n,
            "trajectory cache built"
        );

        Ok(Self { trajectories })
    }

    pub fn get(&self, node_id: i64) -> Option<&Trajectory> {
        self.trajectories.get(&node_id)
    }

    pub fn contains(&self, node_id: i64) -> bool {
        self.trajectories.contains_key(&node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{GroundSiteDescriptor, Node, NodeDescriptor};
    use crate::propagator::StaticPropagator;

    #[test]
    fn window_sample_count_matches_spec_formula() {
        let w = TimeWindow::new(0.0, 9.0 * (1.0 / 1440.0), 1.0 / 1440.0).unwrap();
        assert_eq!(w.sample_count(), 10);
    }

    #[test]
    fn rejects_non_positive_dt() {
        assert!(TimeWindow::new(0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn rejects_inverted_window() {
        assert!(TimeWindow::new(1.0, 0.0, 0.1).is_err());
    }

    #[test]
    fn validate_catches_invariants_bypassed_by_struct_literal() {
        let bypassed = TimeWindow { t_start: 1.0, t_end: 0.0, dt: 0.1 };
        assert!(bypassed.validate().is_err());

        let ok = TimeWindow { t_start: 0.0, t_end: 1.0, dt: 0.1 };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn build_samples_every_node_at_every_grid_point() {
        let window = TimeWindow::new(0.0, 1.0, 0.25).unwrap();
        let nodes = vec![
            Node::ground_station(
                -1,
                GroundSiteDescriptor { latitude_deg: 0.0, longitude_deg: 0.0, altitude_km: 0.0 },
            ),
        ];
        let propagator = StaticPropagator::new(|_desc: &NodeDescriptor, t| crate::propagator::StateVector {
            position_km: Vec3::new(t, 0.0, 0.0),
            velocity_km_s: Vec3::new(0.0, 0.0, 0.0),
        });
        let cache = TrajectoryCache::build(&nodes, &window, &propagator).unwrap();
        let traj = cache.get(-1).unwrap();
        assert_eq!(traj.len(), window.sample_count());
        assert_eq!(traj.get(2).unwrap().position_km.x, 0.5);
    }
}
