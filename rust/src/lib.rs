//! Phase scheduling engine: dependency graph, working-day calendar,
//! forward date propagation, critical path and buffer computation.
//!
//! Every entry point is a pure function over a snapshot of one project's
//! phases. The Python module is a thin layer over the Rust API.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;

pub mod buffer;
pub mod calendar;
mod config;
pub mod critical_path;
pub mod engine;
pub mod forward;
pub mod graph;
mod index;
pub mod logging;
mod models;
pub mod validation;

pub use buffer::compute_buffers;
pub use calendar::{count_weekend_days, expand_duration, working_days_between};
pub use config::{SchedulingConfig, TieBreak};
pub use critical_path::{critical_duration, critical_path, path_durations, CriticalPath};
pub use engine::{schedule, schedule_project, SchedulerError};
pub use forward::{forward_schedule, PhaseTiming};
pub use graph::{GraphError, PhaseGraph};
pub use index::{PhaseIndex, Slot};
pub use models::{
    Phase, PhaseEdit, PhaseId, Project, ScheduleResult, ScheduledPhase, WindowCheck,
};
pub use validation::{check_phase_edit, check_project_dates, check_window, validate_phase_labels};

fn value_error(err: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Compute start/end dates, buffers and the critical path for a project.
///
/// # Arguments
/// * `project` - Project supplying the anchor start date
/// * `phases` - Phases with their predecessor ids; phases of other projects are ignored
/// * `config` - Scheduling configuration (tie-break rule, verbosity)
///
/// # Returns
/// * ScheduleResult, empty when the project has no start date or no phases
///
/// # Raises
/// * ValueError on circular dependencies, duplicate phase ids or an unknown tie-break rule
#[pyfunction]
#[pyo3(name = "schedule_project", signature = (project, phases, config=None))]
fn py_schedule_project(
    project: Project,
    phases: Vec<Phase>,
    config: Option<SchedulingConfig>,
) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();
    schedule_project(&project, &phases, &config).map_err(value_error)
}

/// Critical duration and critical path phase ids (first to last).
#[pyfunction]
#[pyo3(name = "critical_path", signature = (phases, tie_break="lowest_id"))]
fn py_critical_path(phases: Vec<Phase>, tie_break: &str) -> PyResult<(i64, Vec<PhaseId>)> {
    let tie_break = TieBreak::parse(tie_break).map_err(value_error)?;
    let graph = PhaseGraph::new(&phases).map_err(value_error)?;
    let path = critical_path(&graph, tie_break);
    Ok((path.duration, path.phases))
}

/// Compare the critical duration of `phases` with the working days of a window.
#[pyfunction]
#[pyo3(name = "check_window", signature = (phases, start_date=None, end_date=None))]
fn py_check_window(
    phases: Vec<Phase>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> PyResult<WindowCheck> {
    check_window(&phases, start_date, end_date).map_err(value_error)
}

/// Check a proposed new or edited phase before it is saved.
#[pyfunction]
#[pyo3(name = "check_phase_edit")]
fn py_check_phase_edit(
    project: Project,
    phases: Vec<Phase>,
    edit: PhaseEdit,
) -> PyResult<WindowCheck> {
    check_phase_edit(&project, &phases, &edit).map_err(value_error)
}

/// Check proposed project dates before they are saved.
#[pyfunction]
#[pyo3(name = "check_project_dates", signature = (project, phases, start_date=None, end_date=None))]
fn py_check_project_dates(
    project: Project,
    phases: Vec<Phase>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> PyResult<WindowCheck> {
    check_project_dates(&project, &phases, start_date, end_date).map_err(value_error)
}

/// Raise ValueError if phase numbers or names clash or a name is blank.
#[pyfunction]
#[pyo3(name = "validate_phase_labels")]
fn py_validate_phase_labels(phases: Vec<Phase>) -> PyResult<()> {
    validate_phase_labels(&phases).map_err(value_error)
}

/// Ids of every phase reachable from `phase_id` through successor edges.
#[pyfunction]
#[pyo3(name = "transitive_successors")]
fn py_transitive_successors(phases: Vec<Phase>, phase_id: PhaseId) -> PyResult<Vec<PhaseId>> {
    let graph = PhaseGraph::new(&phases).map_err(value_error)?;
    let mut ids: Vec<PhaseId> = graph.transitive_successors(phase_id).into_iter().collect();
    ids.sort_unstable();
    Ok(ids)
}

/// Phases that can become predecessors of `phase_id` without closing a cycle.
#[pyfunction]
#[pyo3(name = "predecessor_candidates")]
fn py_predecessor_candidates(phases: Vec<Phase>, phase_id: PhaseId) -> PyResult<Vec<PhaseId>> {
    let graph = PhaseGraph::new(&phases).map_err(value_error)?;
    Ok(graph.predecessor_candidates(phase_id))
}

#[pyfunction]
#[pyo3(name = "count_weekend_days")]
fn py_count_weekend_days(start_date: NaiveDate, days: i64) -> i64 {
    count_weekend_days(start_date, days)
}

#[pyfunction]
#[pyo3(name = "working_days_between")]
fn py_working_days_between(start_date: NaiveDate, end_date: NaiveDate) -> i64 {
    working_days_between(start_date, end_date)
}

/// The phaseplan.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Phase>()?;
    m.add_class::<Project>()?;
    m.add_class::<PhaseEdit>()?;
    m.add_class::<ScheduledPhase>()?;
    m.add_class::<ScheduleResult>()?;
    m.add_class::<WindowCheck>()?;

    // Config types
    m.add_class::<SchedulingConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_schedule_project, m)?)?;
    m.add_function(wrap_pyfunction!(py_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(py_check_window, m)?)?;
    m.add_function(wrap_pyfunction!(py_check_phase_edit, m)?)?;
    m.add_function(wrap_pyfunction!(py_check_project_dates, m)?)?;
    m.add_function(wrap_pyfunction!(py_validate_phase_labels, m)?)?;
    m.add_function(wrap_pyfunction!(py_transitive_successors, m)?)?;
    m.add_function(wrap_pyfunction!(py_predecessor_candidates, m)?)?;
    m.add_function(wrap_pyfunction!(py_count_weekend_days, m)?)?;
    m.add_function(wrap_pyfunction!(py_working_days_between, m)?)?;

    Ok(())
}
