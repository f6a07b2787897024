//! Planning configuration (C9 expansion): the knobs the binary-search
//! optimizer uses, serializable so a host can tune and persist them
//! independently of any single planning run. Named after the teacher's
//! `load_constellation_config`/`save_constellation_config` pair.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Binary-search precision, in the same units as `data_size` (§4.7).
    pub epsilon: f64,
    /// Initial upper bound for the binary search (§9 open question: the
    /// source's two revisions disagree on `80_000` vs `25_000_000`; this
    /// crate defaults to the larger, and exposes it for tuning).
    pub initial_d_hi: f64,
    /// When true, doubles `initial_d_hi` until infeasible before
    /// bisecting, instead of bisecting the static bound directly.
    pub warm_up_doubling: bool,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            initial_d_hi: 25_000_000.0,
            warm_up_doubling: false,
        }
    }
}

pub fn load_planning_config(path: impl AsRef<Path>) -> Result<PlanningConfig> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn save_planning_config(config: &PlanningConfig, path: impl AsRef<Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(config)?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let dir = std::env::temp_dir().join("qkd_maxcap_router_config_test.json");
        let config = PlanningConfig { epsilon: 0.5, initial_d_hi: 42.0, warm_up_doubling: true };
        save_planning_config(&config, &dir).unwrap();
        let loaded = load_planning_config(&dir).unwrap();
        assert_eq!(loaded.epsilon, config.epsilon);
        assert_eq!(loaded.initial_d_hi, config.initial_d_hi);
        assert_eq!(loaded.warm_up_doubling, config.warm_up_doubling);
        let _ = std::fs::remove_file(&dir);
    }
}
