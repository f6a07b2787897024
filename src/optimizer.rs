//! Capacity optimizer (C7): binary search over the deliverable data volume,
//! driving the TDSP solver. Grounded on `link-capacity-path.c`'s
//! `get_max_link_path`, replacing its `printf` trial log with `tracing`
//! events and its fixed `low=0, high=25000000` bounds with
//! `PlanningConfig`-supplied values (§9's "inconsistent binary-search
//! upper bounds" open question).

use crate::config::PlanningConfig;
use crate::node::Node;
use crate::path::Path;
use crate::skr::SkrAdapter;
use crate::tdsp::solve;
use crate::trajectory::{TimeWindow, TrajectoryCache};

/// Outcome of a capacity-planning run (§6's `PlanResult`).
pub enum PlanResult {
    Feasible { max_data_size: f64, path: Path },
    Infeasible,
}

/// Binary search on `data_size` (§4.7). Monotonicity of the oracle's
/// earliest-finish time in both `t` and `data_size` guarantees that if
/// `D` is deliverable, every `D' < D` is too, which is what makes
/// bisection valid here.
pub fn optimize(
    nodes: &[Node],
    src_id: i64,
    dst_id: i64,
    window: &TimeWindow,
    cache: &TrajectoryCache,
    adapter: &SkrAdapter,
    config: &PlanningConfig,
) -> PlanResult {
    let mut low = 0.0_f64;
    let mut high = if config.warm_up_doubling {
        warm_up_upper_bound(nodes, src_id, dst_id, window, cache, adapter, config.initial_d_hi)
    } else {
        config.initial_d_hi
    };

    let mut best: Option<(f64, Path)> = None;
    let epsilon = config.epsilon;

    while low <= high {
        let mid = (low + high) / 2.0;
        tracing::info!(candidate_data_size = mid, "trying capacity");

        match solve(nodes, src_id, dst_id, mid, window, cache, adapter) {
            Some(path) => {
                tracing::info!(candidate_data_size = mid, hops = path.hop_count(), "found path");
                best = Some((mid, path));
                low = mid + epsilon;
            }
            None => {
                tracing::info!(candidate_data_size = mid, "no path");
                high = mid - epsilon;
            }
        }
    }

    match best {
        Some((max_data_size, path)) => {
            tracing::info!(max_data_size, hops = path.hop_count(), "planning complete");
            PlanResult::Feasible { max_data_size, path }
        }
        None => {
            tracing::info!("planning complete: infeasible");
            PlanResult::Infeasible
        }
    }
}

/// Doubles the candidate upper bound until it is infeasible, so the
/// subsequent bisection starts from a bound known to exceed the true
/// maximum. Opt-in via `PlanningConfig::warm_up_doubling` (§4.7's open
/// question on bound selection); the default design bisects the static
/// bound directly.
fn warm_up_upper_bound(
    nodes: &[Node],
    src_id: i64,
    dst_id: i64,
    window: &TimeWindow,
    cache: &TrajectoryCache,
    adapter: &SkrAdapter,
    initial: f64,
) -> f64 {
    let mut bound = initial.max(1.0);
    while solve(nodes, src_id, dst_id, bound, window, cache, adapter).is_some() {
        bound *= 2.0;
    }
    bound
}
