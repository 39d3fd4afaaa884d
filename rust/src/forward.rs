//! Forward pass: calendar dates for every phase.

use chrono::{Days, NaiveDate};

use crate::calendar::expand_duration;
use crate::engine::SchedulerError;
use crate::graph::PhaseGraph;
use crate::{log_debug, log_steps};

/// Dates computed for one phase by the forward pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseTiming {
    pub start: NaiveDate,
    /// Exclusive end.
    pub end: NaiveDate,
    /// Nominal duration plus the weekend days it spans.
    pub actual_duration: i64,
}

/// Assign start and end dates to every phase, anchored at `project_start`.
///
/// A phase without predecessors starts at the anchor; any other phase starts
/// at the latest end among its direct predecessors. The graph's topological
/// order guarantees those ends are known when the phase is reached.
///
/// Returns timings indexed by slot, or [`SchedulerError::DateOutOfRange`]
/// for the first phase whose end falls past the last representable date.
pub fn forward_schedule(
    graph: &PhaseGraph,
    project_start: NaiveDate,
    verbosity: u8,
) -> Result<Vec<PhaseTiming>, SchedulerError> {
    let mut timings: Vec<Option<PhaseTiming>> = vec![None; graph.len()];

    for &slot in graph.topological_order() {
        let start = graph
            .predecessors(slot)
            .iter()
            .filter_map(|&pred| timings[pred as usize].map(|t| t.end))
            .max()
            .unwrap_or(project_start);

        let nominal = graph.duration(slot);
        let actual_duration = expand_duration(start, nominal);
        let end = u64::try_from(actual_duration)
            .ok()
            .and_then(|days| start.checked_add_days(Days::new(days)))
            .ok_or(SchedulerError::DateOutOfRange(graph.phase_id(slot)))?;

        log_debug!(
            verbosity,
            "phase {}: nominal {}d -> actual {}d from {}",
            graph.phase_id(slot),
            nominal,
            actual_duration,
            start
        );
        log_steps!(
            verbosity,
            "phase {} scheduled {} .. {}",
            graph.phase_id(slot),
            start,
            end
        );

        timings[slot as usize] = Some(PhaseTiming {
            start,
            end,
            actual_duration,
        });
    }

    // Every slot appears once in the topological order.
    Ok(timings.into_iter().flatten().collect())
}

/// Latest end date over all phases, or `None` for an empty schedule.
pub fn project_end(timings: &[PhaseTiming]) -> Option<NaiveDate> {
    timings.iter().map(|t| t.end).max()
}
