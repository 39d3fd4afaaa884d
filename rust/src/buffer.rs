//! Slack per phase: how far its end can slip before a dependent phase moves.

use crate::forward::{project_end, PhaseTiming};
use crate::graph::PhaseGraph;
use crate::index::Slot;

/// Buffer days per phase, indexed by slot.
///
/// A phase's latest allowable end is the earliest start among its direct
/// successors, or the overall project end when it has none. Because every
/// successor starts no earlier than this phase ends, the result is never
/// negative.
pub fn compute_buffers(graph: &PhaseGraph, timings: &[PhaseTiming]) -> Vec<i64> {
    let Some(overall_end) = project_end(timings) else {
        return Vec::new();
    };

    (0..graph.len())
        .map(|slot| {
            let latest_end = graph
                .successors(slot as Slot)
                .iter()
                .map(|&succ| timings[succ as usize].start)
                .min()
                .unwrap_or(overall_end);
            (latest_end - timings[slot].end).num_days()
        })
        .collect()
}
