//! Core data types for the phase scheduling engine.

use chrono::NaiveDate;
use pyo3::prelude::*;

/// Stable phase identity as assigned by the store.
pub type PhaseId = i64;

/// A unit of work inside a project.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Phase {
    #[pyo3(get, set)]
    pub id: PhaseId,
    /// Display code, unique within the project (e.g. "1.2").
    #[pyo3(get, set)]
    pub number: String,
    #[pyo3(get, set)]
    pub name: String,
    /// Nominal duration in calendar days; `None` is scheduled as zero.
    #[pyo3(get, set)]
    pub duration_days: Option<i64>,
    #[pyo3(get, set)]
    pub project_id: i64,
    /// Phases that must finish before this one starts.
    #[pyo3(get, set)]
    pub predecessors: Vec<PhaseId>,
}

#[pymethods]
impl Phase {
    #[new]
    #[pyo3(signature = (id, number, name, project_id, duration_days=None, predecessors=None))]
    fn new(
        id: PhaseId,
        number: String,
        name: String,
        project_id: i64,
        duration_days: Option<i64>,
        predecessors: Option<Vec<PhaseId>>,
    ) -> Self {
        Self {
            id,
            number,
            name,
            duration_days,
            project_id,
            predecessors: predecessors.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Phase(id={}, number={:?}, name={:?}, duration_days={:?}, preds={})",
            self.id,
            self.number,
            self.name,
            self.duration_days,
            self.predecessors.len()
        )
    }
}

impl Phase {
    /// Duration used by the algorithms: unset and negative values count as zero.
    #[inline]
    pub fn effective_duration(&self) -> i64 {
        self.duration_days.unwrap_or(0).max(0)
    }
}

/// A project and its allotted calendar window.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Project {
    #[pyo3(get, set)]
    pub id: i64,
    #[pyo3(get, set)]
    pub title: String,
    #[pyo3(get, set)]
    pub start_date: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub end_date: Option<NaiveDate>,
}

#[pymethods]
impl Project {
    #[new]
    #[pyo3(signature = (id, title, start_date=None, end_date=None))]
    fn new(
        id: i64,
        title: String,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            title,
            start_date,
            end_date,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Project(id={}, title={:?}, start={:?}, end={:?})",
            self.id, self.title, self.start_date, self.end_date
        )
    }
}

/// A proposed change to a project's phase set, checked before it is saved.
///
/// `phase_id = None` describes a phase that does not exist yet.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct PhaseEdit {
    #[pyo3(get, set)]
    pub phase_id: Option<PhaseId>,
    #[pyo3(get, set)]
    pub duration_days: Option<i64>,
    #[pyo3(get, set)]
    pub predecessors: Vec<PhaseId>,
}

#[pymethods]
impl PhaseEdit {
    #[new]
    #[pyo3(signature = (phase_id=None, duration_days=None, predecessors=None))]
    fn new(
        phase_id: Option<PhaseId>,
        duration_days: Option<i64>,
        predecessors: Option<Vec<PhaseId>>,
    ) -> Self {
        Self {
            phase_id,
            duration_days,
            predecessors: predecessors.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PhaseEdit(phase_id={:?}, duration_days={:?}, preds={:?})",
            self.phase_id, self.duration_days, self.predecessors
        )
    }
}

/// Computed schedule for one phase.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledPhase {
    #[pyo3(get)]
    pub phase_id: PhaseId,
    #[pyo3(get)]
    pub start_date: NaiveDate,
    /// Exclusive: the day after the last worked day.
    #[pyo3(get)]
    pub end_date: NaiveDate,
    /// Nominal duration expanded over the weekends it spans.
    #[pyo3(get)]
    pub actual_duration: i64,
    /// Actual duration plus the slack before a dependent phase is delayed.
    #[pyo3(get)]
    pub buffered_duration: i64,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl ScheduledPhase {
    fn __repr__(&self) -> String {
        format!(
            "ScheduledPhase(phase_id={}, start={}, end={}, critical={})",
            self.phase_id, self.start_date, self.end_date, self.is_critical
        )
    }
}

impl ScheduledPhase {
    /// Days the phase can slip without delaying anything that depends on it.
    pub fn buffer(&self) -> i64 {
        self.buffered_duration - self.actual_duration
    }
}

/// Result of scheduling one project.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct ScheduleResult {
    #[pyo3(get)]
    pub scheduled_phases: Vec<ScheduledPhase>,
    #[pyo3(get)]
    pub critical_duration: i64,
    /// Phases on the critical path, first to last.
    #[pyo3(get)]
    pub critical_path: Vec<PhaseId>,
}

#[pymethods]
impl ScheduleResult {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(phases={}, critical_duration={}, critical_path={:?})",
            self.scheduled_phases.len(),
            self.critical_duration,
            self.critical_path
        )
    }
}

impl ScheduleResult {
    pub fn is_empty(&self) -> bool {
        self.scheduled_phases.is_empty()
    }

    pub fn get(&self, phase_id: PhaseId) -> Option<&ScheduledPhase> {
        self.scheduled_phases
            .iter()
            .find(|p| p.phase_id == phase_id)
    }
}

/// Outcome of comparing the critical duration with a project's working-day window.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowCheck {
    #[pyo3(get)]
    pub exceeds_window: bool,
    #[pyo3(get)]
    pub critical_duration: i64,
    #[pyo3(get)]
    pub available_working_days: i64,
}

#[pymethods]
impl WindowCheck {
    fn __repr__(&self) -> String {
        format!(
            "WindowCheck(exceeds_window={}, critical_duration={}, available_working_days={})",
            self.exceeds_window, self.critical_duration, self.available_working_days
        )
    }
}

impl WindowCheck {
    pub fn new(critical_duration: i64, available_working_days: i64) -> Self {
        Self {
            exceeds_window: critical_duration > available_working_days,
            critical_duration,
            available_working_days,
        }
    }

    /// A check that never blocks, used when the project has no complete window.
    pub fn unbounded(critical_duration: i64) -> Self {
        Self {
            exceeds_window: false,
            critical_duration,
            available_working_days: 0,
        }
    }
}
