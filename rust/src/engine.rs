//! Scheduling engine: forward pass, critical path and buffers for one project.

use chrono::NaiveDate;
use thiserror::Error;

use crate::buffer::compute_buffers;
use crate::config::SchedulingConfig;
use crate::critical_path::critical_path;
use crate::forward::forward_schedule;
use crate::graph::{GraphError, PhaseGraph};
use crate::index::Slot;
use crate::models::{Phase, PhaseId, Project, ScheduleResult, ScheduledPhase};
use crate::{log_steps, log_summary};

/// Errors that can occur during scheduling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Circular dependency detected between phases {0:?}")]
    CircularDependency(Vec<PhaseId>),
    #[error("Duplicate phase id: {0}")]
    DuplicatePhase(PhaseId),
    #[error("Invalid phase label: {0}")]
    InvalidLabel(String),
    #[error("Unknown tie-break rule: {0}")]
    UnknownTieBreak(String),
    #[error("Phase {0} has a duration above the supported maximum")]
    DurationOutOfRange(PhaseId),
    #[error("Phase {0} would end past the last representable date")]
    DateOutOfRange(PhaseId),
}

impl From<GraphError> for SchedulerError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::CircularDependency(ids) => SchedulerError::CircularDependency(ids),
            GraphError::DuplicatePhase(id) => SchedulerError::DuplicatePhase(id),
            GraphError::DurationOutOfRange(id) => SchedulerError::DurationOutOfRange(id),
            other @ (GraphError::DuplicateNumber(_)
            | GraphError::DuplicateName(_)
            | GraphError::EmptyName(_)) => SchedulerError::InvalidLabel(other.to_string()),
        }
    }
}

/// Schedule the phases of `project`.
///
/// Phases owned by other projects are ignored. A project without a start
/// date or without phases yields an empty result rather than an error.
pub fn schedule_project(
    project: &Project,
    phases: &[Phase],
    config: &SchedulingConfig,
) -> Result<ScheduleResult, SchedulerError> {
    let verbosity = config.verbosity;

    let Some(project_start) = project.start_date else {
        log_summary!(
            verbosity,
            "project {} has no start date, nothing to schedule",
            project.id
        );
        return Ok(ScheduleResult::default());
    };

    let owned: Vec<Phase> = phases
        .iter()
        .filter(|p| p.project_id == project.id)
        .cloned()
        .collect();
    if owned.len() != phases.len() {
        log_steps!(
            verbosity,
            "ignoring {} phases of other projects",
            phases.len() - owned.len()
        );
    }

    schedule(&owned, project_start, config)
}

/// Schedule a snapshot of phases anchored at `project_start`.
///
/// Runs the forward pass, the critical-path analysis and the buffer
/// computation, and returns one record per phase ordered by start date
/// (phases starting on the same day keep their snapshot order).
pub fn schedule(
    phases: &[Phase],
    project_start: NaiveDate,
    config: &SchedulingConfig,
) -> Result<ScheduleResult, SchedulerError> {
    let verbosity = config.verbosity;
    let tie_break = config.tie_break()?;

    if phases.is_empty() {
        log_summary!(verbosity, "no phases to schedule");
        return Ok(ScheduleResult::default());
    }

    let graph = PhaseGraph::new(phases)?;
    for (phase_id, missing) in graph.dangling_edges() {
        log_steps!(
            verbosity,
            "phase {} names unknown predecessor {}, edge ignored",
            phase_id,
            missing
        );
    }

    let timings = forward_schedule(&graph, project_start, verbosity)?;
    let critical = critical_path(&graph, tie_break);
    let buffers = compute_buffers(&graph, &timings);

    let mut scheduled_phases: Vec<ScheduledPhase> = timings
        .iter()
        .zip(&buffers)
        .enumerate()
        .map(|(slot, (timing, &buffer))| {
            let phase_id = graph.phase_id(slot as Slot);
            ScheduledPhase {
                phase_id,
                start_date: timing.start,
                end_date: timing.end,
                actual_duration: timing.actual_duration,
                buffered_duration: timing.actual_duration + buffer,
                is_critical: critical.contains(phase_id),
            }
        })
        .collect();
    scheduled_phases.sort_by_key(|p| p.start_date);

    log_summary!(
        verbosity,
        "scheduled {} phases from {}, critical duration {}d via {:?}",
        scheduled_phases.len(),
        project_start,
        critical.duration,
        critical.phases
    );

    Ok(ScheduleResult {
        scheduled_phases,
        critical_duration: critical.duration,
        critical_path: critical.phases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_phase(id: PhaseId, duration: Option<i64>, preds: Vec<PhaseId>) -> Phase {
        Phase {
            id,
            number: id.to_string(),
            name: format!("Phase {}", id),
            duration_days: duration,
            project_id: 1,
            predecessors: preds,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(start: Option<NaiveDate>) -> Project {
        Project {
            id: 1,
            title: "Office move".to_string(),
            start_date: start,
            end_date: None,
        }
    }

    /// A(5) -> B(10) -> C(7), B -> D(3), starting Wednesday 2025-11-12.
    fn sample_phases() -> Vec<Phase> {
        vec![
            make_phase(1, Some(5), vec![]),
            make_phase(2, Some(10), vec![1]),
            make_phase(3, Some(7), vec![2]),
            make_phase(4, Some(3), vec![2]),
        ]
    }

    #[test]
    fn test_end_to_end_schedule() {
        let result = schedule_project(
            &project(Some(date(2025, 11, 12))),
            &sample_phases(),
            &SchedulingConfig::default(),
        )
        .unwrap();

        let a = result.get(1).unwrap();
        assert_eq!(a.start_date, date(2025, 11, 12));
        assert_eq!(a.actual_duration, 7);
        assert_eq!(a.end_date, date(2025, 11, 19));

        let b = result.get(2).unwrap();
        assert_eq!(b.start_date, a.end_date);
        assert_eq!(b.actual_duration, 14);
        assert_eq!(b.end_date, date(2025, 12, 3));

        let c = result.get(3).unwrap();
        assert_eq!(c.start_date, b.end_date);
        assert_eq!(c.actual_duration, 9);
        assert_eq!(c.end_date, date(2025, 12, 12));
        assert_eq!(c.buffer(), 0);

        let d = result.get(4).unwrap();
        assert_eq!(d.start_date, b.end_date);
        assert_eq!(d.actual_duration, 3);
        assert_eq!(d.end_date, date(2025, 12, 6));
        assert_eq!(d.buffer(), 6);
        assert_eq!(d.buffered_duration, 9);

        assert_eq!(result.critical_duration, 22);
        assert_eq!(result.critical_path, vec![1, 2, 3]);
        assert!(a.is_critical && b.is_critical && c.is_critical);
        assert!(!d.is_critical);

        for phase in &result.scheduled_phases {
            assert!(phase.buffered_duration >= phase.actual_duration);
        }
    }

    #[test]
    fn test_results_ordered_by_start() {
        // Declared last-first; output follows start dates.
        let mut phases = sample_phases();
        phases.reverse();
        let result = schedule(&phases, date(2025, 11, 12), &SchedulingConfig::default()).unwrap();

        let ids: Vec<PhaseId> = result.scheduled_phases.iter().map(|p| p.phase_id).collect();
        // C and D start together and keep snapshot order (D was declared first).
        assert_eq!(ids, vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_missing_start_date_yields_empty() {
        let result =
            schedule_project(&project(None), &sample_phases(), &SchedulingConfig::default())
                .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.critical_duration, 0);
        assert!(result.critical_path.is_empty());
    }

    #[test]
    fn test_no_phases_yields_empty() {
        let result = schedule_project(
            &project(Some(date(2025, 11, 12))),
            &[],
            &SchedulingConfig::default(),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_foreign_phases_ignored() {
        let mut phases = sample_phases();
        let mut stranger = make_phase(99, Some(50), vec![]);
        stranger.project_id = 2;
        phases.push(stranger);

        let result = schedule_project(
            &project(Some(date(2025, 11, 12))),
            &phases,
            &SchedulingConfig::default(),
        )
        .unwrap();
        assert_eq!(result.scheduled_phases.len(), 4);
        assert!(result.get(99).is_none());
        assert_eq!(result.critical_duration, 22);
    }

    #[test]
    fn test_cycle_is_an_error() {
        let phases = vec![
            make_phase(1, Some(1), vec![2]),
            make_phase(2, Some(1), vec![1]),
        ];
        let err = schedule(&phases, date(2025, 11, 12), &SchedulingConfig::default()).unwrap_err();
        assert_eq!(err, SchedulerError::CircularDependency(vec![1, 2]));
        assert!(err.to_string().contains("Circular dependency"));
    }

    #[test]
    fn test_unknown_tie_break_is_an_error() {
        let config = SchedulingConfig {
            tie_break: "alphabetical".to_string(),
            verbosity: 0,
        };
        let err = schedule(&sample_phases(), date(2025, 11, 12), &config).unwrap_err();
        assert_eq!(err, SchedulerError::UnknownTieBreak("alphabetical".to_string()));
    }

    #[test]
    fn test_missing_predecessor_is_ignored() {
        // Phase 2 names only an id that is not in the snapshot.
        let phases = vec![
            make_phase(1, Some(5), vec![]),
            make_phase(2, Some(7), vec![99]),
        ];
        let start = date(2025, 11, 12);
        let result = schedule(&phases, start, &SchedulingConfig::default()).unwrap();

        let orphan = result.get(2).unwrap();
        assert_eq!(orphan.start_date, start);
        assert!(orphan.is_critical);
        assert_eq!(result.critical_duration, 7);
        assert_eq!(result.critical_path, vec![2]);
        assert_eq!(result.scheduled_phases.len(), 2);
    }

    #[test]
    fn test_oversized_duration_is_an_error() {
        let phases = vec![make_phase(1, Some(200_000_000), vec![])];
        let err = schedule(&phases, date(2025, 11, 12), &SchedulingConfig::default()).unwrap_err();
        assert_eq!(err, SchedulerError::DurationOutOfRange(1));
    }

    #[test]
    fn test_end_past_calendar_is_an_error() {
        let phases = vec![
            make_phase(1, Some(2), vec![]),
            make_phase(2, Some(30), vec![1]),
        ];
        let late_start = NaiveDate::MAX - chrono::Duration::days(20);
        let err = schedule(&phases, late_start, &SchedulingConfig::default()).unwrap_err();
        assert_eq!(err, SchedulerError::DateOutOfRange(2));
        assert!(err.to_string().contains("representable date"));
    }

    #[test]
    fn test_label_errors_convert() {
        let err: SchedulerError = GraphError::DuplicateName("Build".to_string()).into();
        assert!(matches!(err, SchedulerError::InvalidLabel(msg) if msg.contains("Build")));
    }
}
