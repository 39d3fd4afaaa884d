//! Phase dependency graph for one project.
//!
//! Edges run predecessor -> phase. The graph is validated to be acyclic when
//! it is built, so every algorithm downstream can walk `topological_order()`
//! without guarding against cycles.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::index::{PhaseIndex, Slot};
use crate::models::{Phase, PhaseId};

/// Longest accepted nominal phase duration, in days (about 2,700 years).
///
/// Keeps path sums far from `i64` overflow and rejects values no calendar
/// could hold.
pub const MAX_DURATION_DAYS: i64 = 1_000_000;

/// Error types for graph construction and phase-set validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The same phase id appears twice in the snapshot.
    DuplicatePhase(PhaseId),
    /// The predecessor relation has a cycle; carries the phases that could not be ordered.
    CircularDependency(Vec<PhaseId>),
    /// Two phases share a number.
    DuplicateNumber(String),
    /// Two phases share a name.
    DuplicateName(String),
    /// A phase has a blank name.
    EmptyName(PhaseId),
    /// A phase duration exceeds [`MAX_DURATION_DAYS`].
    DurationOutOfRange(PhaseId),
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicatePhase(id) => write!(f, "Duplicate phase id {}", id),
            GraphError::CircularDependency(ids) => {
                write!(f, "Circular dependency detected between phases {:?}", ids)
            }
            GraphError::DuplicateNumber(number) => {
                write!(f, "Phase number {:?} is used more than once", number)
            }
            GraphError::DuplicateName(name) => {
                write!(f, "Phase name {:?} is used more than once", name)
            }
            GraphError::EmptyName(id) => write!(f, "Phase {} has an empty name", id),
            GraphError::DurationOutOfRange(id) => write!(
                f,
                "Phase {} has a duration above {} days",
                id, MAX_DURATION_DAYS
            ),
        }
    }
}

impl std::error::Error for GraphError {}

/// Read-only adjacency view over a snapshot of phases.
#[derive(Debug, Clone)]
pub struct PhaseGraph {
    index: PhaseIndex,
    durations: Vec<i64>,
    preds: Vec<Vec<Slot>>,
    succs: Vec<Vec<Slot>>,
    topo_order: Vec<Slot>,
    dangling_edges: Vec<(PhaseId, PhaseId)>,
}

impl PhaseGraph {
    /// Build the graph and check that it is acyclic.
    ///
    /// Durations above [`MAX_DURATION_DAYS`] are rejected.
    ///
    /// Predecessor ids that do not name a phase of the snapshot are dropped
    /// and reported through [`PhaseGraph::dangling_edges`]. Repeated edges
    /// between the same pair collapse into one.
    pub fn new(phases: &[Phase]) -> Result<Self, GraphError> {
        let mut index = PhaseIndex::with_capacity(phases.len());
        let mut durations = Vec::with_capacity(phases.len());
        for phase in phases {
            if index.insert(phase.id).is_none() {
                return Err(GraphError::DuplicatePhase(phase.id));
            }
            let duration = phase.effective_duration();
            if duration > MAX_DURATION_DAYS {
                return Err(GraphError::DurationOutOfRange(phase.id));
            }
            durations.push(duration);
        }

        let n = index.len();
        let mut preds: Vec<Vec<Slot>> = vec![Vec::new(); n];
        let mut succs: Vec<Vec<Slot>> = vec![Vec::new(); n];
        let mut dangling_edges = Vec::new();

        for (slot, phase) in phases.iter().enumerate() {
            for &pred_id in &phase.predecessors {
                let Some(pred) = index.slot(pred_id) else {
                    dangling_edges.push((phase.id, pred_id));
                    continue;
                };
                if preds[slot].contains(&pred) {
                    continue;
                }
                preds[slot].push(pred);
                succs[pred as usize].push(slot as Slot);
            }
        }

        let topo_order = topological_sort(&index, &preds, &succs)?;

        Ok(Self {
            index,
            durations,
            preds,
            succs,
            topo_order,
            dangling_edges,
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn phase_id(&self, slot: Slot) -> PhaseId {
        self.index.id(slot)
    }

    #[inline]
    pub fn slot(&self, id: PhaseId) -> Option<Slot> {
        self.index.slot(id)
    }

    /// Phase ids in snapshot order.
    pub fn phase_ids(&self) -> &[PhaseId] {
        self.index.ids()
    }

    /// Nominal duration in days (unset counts as zero).
    #[inline]
    pub fn duration(&self, slot: Slot) -> i64 {
        self.durations[slot as usize]
    }

    #[inline]
    pub fn predecessors(&self, slot: Slot) -> &[Slot] {
        &self.preds[slot as usize]
    }

    #[inline]
    pub fn successors(&self, slot: Slot) -> &[Slot] {
        &self.succs[slot as usize]
    }

    /// Slots ordered so that every predecessor precedes its successors.
    pub fn topological_order(&self) -> &[Slot] {
        &self.topo_order
    }

    /// Phases that are no other phase's predecessor, in snapshot order.
    pub fn terminals(&self) -> Vec<Slot> {
        (0..self.len() as Slot)
            .filter(|&slot| self.succs[slot as usize].is_empty())
            .collect()
    }

    /// `(phase, missing predecessor)` pairs dropped while building.
    pub fn dangling_edges(&self) -> &[(PhaseId, PhaseId)] {
        &self.dangling_edges
    }

    /// Every phase reachable from `phase_id` by following successor edges.
    ///
    /// The phase itself is not included. Unknown ids yield an empty set.
    pub fn transitive_successors(&self, phase_id: PhaseId) -> FxHashSet<PhaseId> {
        let mut result = FxHashSet::default();
        let Some(start) = self.slot(phase_id) else {
            return result;
        };

        let mut seen = vec![false; self.len()];
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            for &succ in self.successors(current) {
                if !seen[succ as usize] {
                    seen[succ as usize] = true;
                    result.insert(self.phase_id(succ));
                    stack.push(succ);
                }
            }
        }
        result
    }

    /// Phases that may be offered as predecessors of `phase_id` without
    /// closing a cycle: everything except the phase and its transitive
    /// successors, in snapshot order.
    ///
    /// For an id not in the graph (a phase being created) every phase qualifies.
    pub fn predecessor_candidates(&self, phase_id: PhaseId) -> Vec<PhaseId> {
        let excluded = self.transitive_successors(phase_id);
        self.phase_ids()
            .iter()
            .copied()
            .filter(|&id| id != phase_id && !excluded.contains(&id))
            .collect()
    }

    /// Whether the edge `predecessor -> phase_id` keeps the graph acyclic.
    pub fn can_add_predecessor(&self, phase_id: PhaseId, predecessor: PhaseId) -> bool {
        if phase_id == predecessor || self.slot(predecessor).is_none() {
            return false;
        }
        !self.transitive_successors(phase_id).contains(&predecessor)
    }
}

/// Kahn's algorithm over predecessor counts. Ready phases are taken in slot
/// order, so the result is deterministic for a given snapshot.
fn topological_sort(
    index: &PhaseIndex,
    preds: &[Vec<Slot>],
    succs: &[Vec<Slot>],
) -> Result<Vec<Slot>, GraphError> {
    let mut in_degree: Vec<usize> = preds.iter().map(|p| p.len()).collect();

    let mut queue: VecDeque<Slot> = (0..in_degree.len() as Slot)
        .filter(|&slot| in_degree[slot as usize] == 0)
        .collect();

    let mut result = Vec::with_capacity(in_degree.len());

    while let Some(slot) = queue.pop_front() {
        result.push(slot);
        for &succ in &succs[slot as usize] {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    if result.len() != in_degree.len() {
        let stuck = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree > 0)
            .map(|(slot, _)| index.id(slot as Slot))
            .collect();
        return Err(GraphError::CircularDependency(stuck));
    }

    Ok(result)
}
