//! Critical path: the predecessor chain with the largest summed duration.
//!
//! Durations here are nominal days. The critical duration is compared against
//! a project's working-day window, so weekend expansion does not apply.

use crate::config::TieBreak;
use crate::graph::PhaseGraph;
use crate::index::Slot;
use crate::models::PhaseId;

/// The longest chain through the graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CriticalPath {
    /// Summed nominal duration along the chain.
    pub duration: i64,
    /// Phases on the chain, first to last.
    pub phases: Vec<PhaseId>,
}

impl CriticalPath {
    pub fn contains(&self, phase_id: PhaseId) -> bool {
        self.phases.contains(&phase_id)
    }
}

/// Longest summed duration of any chain ending at each phase, indexed by slot.
///
/// `path[p] = duration(p) + max(path[q] for q in preds(p))`, filled in
/// topological order so each value is computed exactly once. Sums saturate
/// at `i64::MAX`.
pub fn path_durations(graph: &PhaseGraph) -> Vec<i64> {
    let mut path = vec![0i64; graph.len()];
    for &slot in graph.topological_order() {
        let longest_pred = graph
            .predecessors(slot)
            .iter()
            .map(|&pred| path[pred as usize])
            .max()
            .unwrap_or(0);
        path[slot as usize] = graph.duration(slot).saturating_add(longest_pred);
    }
    path
}

/// Maximum path duration over all terminal phases; 0 for an empty graph.
pub fn critical_duration(graph: &PhaseGraph) -> i64 {
    let path = path_durations(graph);
    graph
        .terminals()
        .iter()
        .map(|&slot| path[slot as usize])
        .max()
        .unwrap_or(0)
}

/// Compute the critical path, walking back from the heaviest terminal phase.
pub fn critical_path(graph: &PhaseGraph, tie_break: TieBreak) -> CriticalPath {
    let path = path_durations(graph);

    let Some(mut current) = pick_heaviest(graph, &path, &graph.terminals(), tie_break) else {
        return CriticalPath::default();
    };
    let duration = path[current as usize];

    let mut phases = vec![graph.phase_id(current)];
    while let Some(pred) = pick_heaviest(graph, &path, graph.predecessors(current), tie_break) {
        phases.push(graph.phase_id(pred));
        current = pred;
    }
    phases.reverse();

    CriticalPath { duration, phases }
}

/// The candidate with the largest path duration, ties resolved by `tie_break`.
fn pick_heaviest(
    graph: &PhaseGraph,
    path: &[i64],
    candidates: &[Slot],
    tie_break: TieBreak,
) -> Option<Slot> {
    let mut best: Option<Slot> = None;
    for &slot in candidates {
        let Some(current) = best else {
            best = Some(slot);
            continue;
        };
        let (value, best_value) = (path[slot as usize], path[current as usize]);
        let wins_tie = match tie_break {
            TieBreak::LowestId => graph.phase_id(slot) < graph.phase_id(current),
            TieBreak::InputOrder => slot < current,
        };
        if value > best_value || (value == best_value && wins_tie) {
            best = Some(slot);
        }
    }
    best
}
