//! Output path types (§3).

use serde::{Deserialize, Serialize};

use crate::node::NodeKind;
use crate::propagator::UtcDays;

/// One hop in a computed path: the node, its kind, and the time the
/// transfer reaches it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathHop {
    pub node_id: i64,
    pub kind: NodeKind,
    pub arrival_time: UtcDays,
}

/// A complete source-to-destination route. `hops[0]` is always the source
/// at the window's start time; `hops.last()` is the destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    pub hops: Vec<PathHop>,
}

impl Path {
    pub fn arrival_time(&self) -> Option<UtcDays> {
        self.hops.last().map(|h| h.arrival_time)
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }
}
