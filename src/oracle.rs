//! Transfer-time oracle (C4), the hard subsystem: given a data volume and a
//! start time, returns the earliest time a hop between two cached
//! trajectories can deliver that volume, by composite Simpson integration
//! over sampled rates with closed-form partial-interval handling at both
//! ends. Transcribed from `get_transfer_time`/`accum_pre_start`/
//! `accum_post_end`, fixing the NULL-out-parameter and hash-table-lookup
//! idioms of the source with ordinary Rust control flow.

use crate::constants::RATE_SLOPE_TOLERANCE;
use crate::node::Node;
use crate::propagator::UtcDays;
use crate::skr::SkrAdapter;
use crate::trajectory::TrajectoryCache;
use crate::trajectory::TimeWindow;

/// Sentinel standing in for "unreachable within the window" everywhere in
/// the routing core — the largest finite `f64`, never actual infinity, so
/// ordinary arithmetic comparisons keep working (§7).
pub const INFEASIBLE: f64 = f64::MAX;

/// Earliest time at which `data_size` bits can be moved from `src` to `dst`
/// if transmission starts at `time`. Returns `INFEASIBLE` when no such
/// time exists within `window`.
pub fn transfer_time(
    src: &Node,
    dst: &Node,
    cache: &TrajectoryCache,
    adapter: &SkrAdapter,
    window: &TimeWindow,
    data_size: f64,
    time: UtcDays,
) -> f64 {
    let src_traj = match cache.get(src.id) {
        Some(t) => t,
        None => return INFEASIBLE,
    };
    let dst_traj = match cache.get(dst.id) {
        Some(t) => t,
        None => return INFEASIBLE,
    };
    let history_len = src_traj.len().min(dst_traj.len());

    let rate = |i: usize| -> f64 {
        let a = src_traj.get(i).expect("index bounded by history_len");
        let b = dst_traj.get(i).expect("index bounded by history_len");
        let a_state = crate::propagator::StateVector {
            position_km: a.position_km,
            velocity_km_s: a.velocity_km_s,
        };
        let b_state = crate::propagator::StateVector {
            position_km: b.position_km,
            velocity_km_s: b.velocity_km_s,
        };
        adapter.rate(src, &a_state, dst, &b_state, window.time_at(i))
    };

    transfer_time_with_rate(data_size, time, window, history_len, &rate)
}

/// The pure integration core, parameterized over a rate function so it can
/// be exercised directly by tests without a full trajectory cache / SKR
/// adapter in play.
pub fn transfer_time_with_rate(
    data_size: f64,
    time: UtcDays,
    window: &TimeWindow,
    history_len: usize,
    rate: &dyn Fn(usize) -> f64,
) -> f64 {
    let start_i_signed = window.index_at_or_after(time);
    if start_i_signed < 0 || start_i_signed as usize >= history_len.saturating_sub(1) {
        return INFEASIBLE;
    }
    let start_i = start_i_signed as usize;
    let dt = window.dt;

    // Phase A: pre-start partial, t -> tau_start_i.
    let mut accum = accum_pre_start(time, start_i, window, rate);
    if accum >= data_size {
        return window.t_start + start_i as f64 * dt;
    }

    let mut prev_skr = 0.0_f64;
    let mut i = start_i;
    if i >= history_len {
        return INFEASIBLE;
    }
    let mut skr = rate(i);

    let mut next_i = start_i + 1;
    if next_i >= history_len {
        return INFEASIBLE;
    }
    let mut next_skr = rate(next_i);

    // pre_x_0 -> x_0 -> x_1
    let mut check_term = accum + (dt / 3.0) * skr + (dt / 3.0) * next_skr;

    while check_term < data_size {
        if next_i >= history_len - 1 {
            return INFEASIBLE;
        }

        if i == start_i + 1 {
            accum += (dt / 3.0) * prev_skr;
        } else if (i - start_i) % 2 == 0 {
            accum += (dt * 4.0 / 3.0) * prev_skr;
        } else {
            accum += (dt * 2.0 / 3.0) * prev_skr;
        }

        prev_skr = skr;
        i = next_i;
        skr = next_skr;
        next_i += 1;
        next_skr = rate(next_i);

        check_term = if (i - start_i) == 1 {
            accum + (dt / 3.0) * prev_skr + (dt * 4.0 / 3.0) * skr + (dt / 3.0) * next_skr
        } else if (next_i - start_i) % 2 == 0 {
            // next_i is even: finish the Simpson cell with next_i.
            accum + (dt * 2.0 / 3.0) * prev_skr + (dt * 4.0 / 3.0) * skr + (dt / 3.0) * next_skr
        } else {
            // next_i is odd: finish Simpson with i and trapezoid to next_i.
            accum + (dt * 4.0 / 3.0) * prev_skr + (dt / 3.0) * skr + 0.5 * dt * (skr + next_skr)
        };
    }

    // Phase C: post-end partial, tau_i -> t_finish.
    if i == start_i {
        let data_left = data_size - accum;
        return accum_post_end(data_left, i, window, rate);
    } else if (i - start_i) % 2 == 0 {
        accum += (dt * 4.0 / 3.0) * prev_skr;
        accum += (dt / 3.0) * skr;
    } else {
        accum += (dt / 3.0) * prev_skr;
        accum += 0.5 * dt * (skr + prev_skr);
    }

    let data_left = data_size - accum;
    accum_post_end(data_left, i, window, rate)
}

/// Trapezoidal area from the actual start time `x_i_mid` to the first
/// on-grid sample `tau_start_i`, linearly interpolating the rate at
/// `x_i_mid` between `tau_{start_i - 1}` and `tau_start_i`. Zero when the
/// start time already lands on a grid point or `start_i` is the first
/// sample.
fn accum_pre_start(
    x_i_mid: UtcDays,
    start_i: usize,
    window: &TimeWindow,
    rate: &dyn Fn(usize) -> f64,
) -> f64 {
    if start_i == 0 {
        return 0.0;
    }

    let dt = window.dt;
    let x_i = window.t_start + start_i as f64 * dt;
    let y_i = rate(start_i);
    let x_i_prev = x_i - dt;
    let y_i_prev = rate(start_i - 1);

    let slope = (y_i - y_i_prev) / dt;
    let y_start = y_i_prev + (x_i_mid - x_i_prev) * slope;

    0.5 * (x_i - x_i_mid) * (y_start + y_i)
}

/// Solves for the finish time within the final partial interval
/// `[tau_i, tau_{i+1}]`, assuming the rate varies linearly between the two
/// endpoints. Returns `INFEASIBLE` if the root falls beyond `t_end`.
fn accum_post_end(
    data_size: f64,
    start_i: usize,
    window: &TimeWindow,
    rate: &dyn Fn(usize) -> f64,
) -> f64 {
    let dt = window.dt;
    let x_i = window.t_start + start_i as f64 * dt;
    let y_i = rate(start_i);
    let y_i_nxt = rate(start_i + 1);

    let a = (y_i_nxt - y_i) / dt;
    let b = 2.0 * y_i;
    let c = -2.0 * data_size;

    if a.abs() < RATE_SLOPE_TOLERANCE {
        if y_i.abs() < RATE_SLOPE_TOLERANCE {
            return INFEASIBLE;
        }
        let answer = x_i + data_size / y_i;
        return if answer > window.t_end { INFEASIBLE } else { answer };
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return INFEASIBLE;
    }
    let x_mid = (-b + discriminant.sqrt()) / (2.0 * a);
    let answer = x_i + x_mid;

    if answer > window.t_end {
        INFEASIBLE
    } else {
        answer
    }
}
