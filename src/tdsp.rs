//! Modified time-dependent Dijkstra (C6): uses the transfer-time oracle as
//! the edge-weight function and the lazy-deletion heap as the frontier.
//! Grounded on `link-capacity-path.c`'s `TDSP_fixed_size`, with the
//! predecessor back-pointers walked through a `HashMap` instead of raw
//! `GArray` indices, and the heap's empty-signal bug (§9) fixed by
//! propagating `Option` rather than checking a local pointer against NULL.

use std::collections::HashMap;

use crate::heap::IndexedMinHeap;
use crate::node::Node;
use crate::oracle::{transfer_time, INFEASIBLE};
use crate::path::{Path, PathHop};
use crate::propagator::UtcDays;
use crate::skr::SkrAdapter;
use crate::trajectory::{TimeWindow, TrajectoryCache};

/// Per-node scratch during one solver run (§3).
struct TdspState {
    tentative: f64,
    predecessor: Option<i64>,
}

/// Runs the modified Dijkstra for a fixed data volume `data_size`. Returns
/// `None` if `dst_id` is unreachable from `src_id` within `window`, or if
/// either id is absent from `nodes` (the public boundary rejects unknown
/// ids earlier; this is the internal not-found case for direct callers).
pub fn solve(
    nodes: &[Node],
    src_id: i64,
    dst_id: i64,
    data_size: f64,
    window: &TimeWindow,
    cache: &TrajectoryCache,
    adapter: &SkrAdapter,
) -> Option<Path> {
    let by_id: HashMap<i64, &Node> = nodes.iter().map(|n| (n.id, n)).collect();
    if !by_id.contains_key(&src_id) || !by_id.contains_key(&dst_id) {
        return None;
    }

    let mut states: HashMap<i64, TdspState> = nodes
        .iter()
        .map(|n| {
            let tentative = if n.id == src_id { window.t_start } else { INFEASIBLE };
            (n.id, TdspState { tentative, predecessor: None })
        })
        .collect();

    let mut heap = IndexedMinHeap::new();
    for n in nodes {
        heap.push(states[&n.id].tentative, n.id);
    }

    loop {
        let (key, u_id) = match heap.pop_min() {
            Some(entry) => entry,
            None => break,
        };

        // Stale entry: a later relaxation already lowered this node's key.
        if (key - states[&u_id].tentative).abs() > f64::EPSILON {
            continue;
        }

        if u_id == dst_id {
            break;
        }
        if key >= INFEASIBLE {
            break;
        }

        let u_node = by_id[&u_id];
        let u_time: UtcDays = key;

        for v_node in nodes {
            if v_node.id == u_id || v_node.id == src_id {
                continue;
            }

            let candidate = transfer_time(u_node, v_node, cache, adapter, window, data_size, u_time);

            let v_state = states.get_mut(&v_node.id).expect("node present in states map");
            if candidate < v_state.tentative {
                v_state.tentative = candidate;
                v_state.predecessor = Some(u_id);
                heap.push(candidate, v_node.id);
                tracing::debug!(from = u_id, to = v_node.id, arrival = candidate, "relaxed");
            }
        }
    }

    let dst_state = states.get(&dst_id)?;
    if dst_state.tentative >= INFEASIBLE {
        tracing::debug!(src_id, dst_id, "solver exhausted frontier without reaching destination");
        return None;
    }

    Some(reconstruct_path(&states, nodes, src_id, dst_id, window))
}

fn reconstruct_path(
    states: &HashMap<i64, TdspState>,
    nodes: &[Node],
    src_id: i64,
    dst_id: i64,
    window: &TimeWindow,
) -> Path {
    let kind_of: HashMap<i64, crate::node::NodeKind> = nodes.iter().map(|n| (n.id, n.kind)).collect();

    let mut reversed = Vec::new();
    let mut current = dst_id;
    loop {
        let state = &states[&current];
        reversed.push(PathHop {
            node_id: current,
            kind: kind_of[&current],
            arrival_time: state.tentative,
        });
        match state.predecessor {
            Some(prev) => current = prev,
            None => break,
        }
    }

    debug_assert_eq!(reversed.last().map(|h| h.node_id), Some(src_id));
    let _ = window;
    reversed.reverse();
    Path { hops: reversed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{GroundSiteDescriptor, Node};
    use crate::propagator::StaticPropagator;
    use crate::skr::{DefaultSkrModel, SkrAdapter};
    use crate::topocentric::SimpleTopocentric;

    fn flat_nodes(ids: &[i64]) -> Vec<Node> {
        ids.iter()
            .map(|&id| {
                Node::ground_station(
                    id,
                    GroundSiteDescriptor { latitude_deg: 0.0, longitude_deg: id as f64, altitude_km: 0.0 },
                )
            })
            .collect()
    }

    // S1 — degenerate straight line: A -> B -> C reachable, C -> anything not.
    #[test]
    fn s1_degenerate_straight_line() {
        let nodes = flat_nodes(&[0, 1, 2]);
        let window = TimeWindow::new(0.0, 10.0, 1.0).unwrap();
        let propagator = StaticPropagator::new(|_d, t| crate::propagator::StateVector {
            position_km: crate::geometry::Vec3::new(t, 0.0, 0.0),
            velocity_km_s: crate::geometry::Vec3::new(0.0, 0.0, 0.0),
        });
        let cache = TrajectoryCache::build(&nodes, &window, &propagator).unwrap();
        let adapter = SkrAdapter::new(Box::new(DefaultSkrModel::default()), Box::new(SimpleTopocentric::new()));

        let result = solve(&nodes, 0, 2, 1.0, &window, &cache, &adapter);
        assert!(result.is_some());
        let path = result.unwrap();
        assert_eq!(path.hops.first().unwrap().node_id, 0);
        assert_eq!(path.hops.last().unwrap().node_id, 2);
    }

    #[test]
    fn unreachable_destination_returns_none() {
        let nodes = flat_nodes(&[0, 1]);
        let window = TimeWindow::new(0.0, 1.0, 1.0).unwrap();
        let propagator = StaticPropagator::new(|_d, _t| crate::propagator::StateVector {
            position_km: crate::geometry::Vec3::new(1.0e9, 1.0e9, 1.0e9),
            velocity_km_s: crate::geometry::Vec3::new(0.0, 0.0, 0.0),
        });
        let cache = TrajectoryCache::build(&nodes, &window, &propagator).unwrap();
        let adapter = SkrAdapter::new(Box::new(DefaultSkrModel::default()), Box::new(SimpleTopocentric::new()));

        // Unknown destination id.
        let result = solve(&nodes, 0, 99, 1.0, &window, &cache, &adapter);
        assert!(result.is_none());
    }
}
