//! Feasibility gates run before a phase or a project window is saved.
//!
//! The only semantic failure is a critical duration longer than the
//! project's working-day window. It is reported as a [`WindowCheck`] so the
//! caller can show both figures; structural problems (cycles, duplicate ids)
//! surface as [`GraphError`].

use chrono::NaiveDate;
use rustc_hash::FxHashSet;

use crate::calendar::working_days_between;
use crate::critical_path::critical_duration;
use crate::graph::{GraphError, PhaseGraph};
use crate::models::{Phase, PhaseEdit, PhaseId, Project, WindowCheck};

/// Compare the critical duration of `phases` against `[start, end]`.
///
/// Without both dates there is no window to exceed.
pub fn check_window(
    phases: &[Phase],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<WindowCheck, GraphError> {
    let graph = PhaseGraph::new(phases)?;
    let duration = critical_duration(&graph);

    Ok(match (start, end) {
        (Some(start), Some(end)) => WindowCheck::new(duration, working_days_between(start, end)),
        _ => WindowCheck::unbounded(duration),
    })
}

/// Check new window dates for `project` against its current phases.
pub fn check_project_dates(
    project: &Project,
    phases: &[Phase],
    new_start: Option<NaiveDate>,
    new_end: Option<NaiveDate>,
) -> Result<WindowCheck, GraphError> {
    let owned = phases_of(project, phases);
    check_window(&owned, new_start, new_end)
}

/// Check a proposed phase change against `project`'s current window.
///
/// The edit replaces the duration and predecessors of the phase it names.
/// An edit without a phase id, or naming an id the project does not have,
/// is added as a new phase. A predecessor set that would close a cycle is
/// reported as [`GraphError::CircularDependency`].
pub fn check_phase_edit(
    project: &Project,
    phases: &[Phase],
    edit: &PhaseEdit,
) -> Result<WindowCheck, GraphError> {
    let mut proposed = phases_of(project, phases);

    let existing = edit
        .phase_id
        .and_then(|id| proposed.iter_mut().find(|p| p.id == id));

    match existing {
        Some(phase) => {
            phase.duration_days = edit.duration_days;
            phase.predecessors = edit.predecessors.clone();
        }
        None => {
            let id = edit.phase_id.unwrap_or_else(|| unused_id(&proposed));
            proposed.push(Phase {
                id,
                number: String::new(),
                name: String::new(),
                duration_days: edit.duration_days,
                project_id: project.id,
                predecessors: edit.predecessors.clone(),
            });
        }
    }

    check_window(&proposed, project.start_date, project.end_date)
}

/// Numbers and names must be unique within a project and names non-blank.
pub fn validate_phase_labels(phases: &[Phase]) -> Result<(), GraphError> {
    let mut numbers: FxHashSet<&str> = FxHashSet::default();
    let mut names: FxHashSet<&str> = FxHashSet::default();

    for phase in phases {
        if phase.name.trim().is_empty() {
            return Err(GraphError::EmptyName(phase.id));
        }
        if !numbers.insert(phase.number.as_str()) {
            return Err(GraphError::DuplicateNumber(phase.number.clone()));
        }
        if !names.insert(phase.name.as_str()) {
            return Err(GraphError::DuplicateName(phase.name.clone()));
        }
    }
    Ok(())
}

fn phases_of(project: &Project, phases: &[Phase]) -> Vec<Phase> {
    phases
        .iter()
        .filter(|p| p.project_id == project.id)
        .cloned()
        .collect()
}

fn unused_id(phases: &[Phase]) -> PhaseId {
    phases.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}
