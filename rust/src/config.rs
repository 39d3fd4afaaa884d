//! Configuration types for the scheduling engine.

use pyo3::prelude::*;

use crate::engine::SchedulerError;

/// How to choose between phases whose path durations are equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// The lowest phase id wins.
    #[default]
    LowestId,
    /// The phase seen first in the supplied snapshot wins.
    InputOrder,
}

impl TieBreak {
    pub fn parse(name: &str) -> Result<Self, SchedulerError> {
        match name {
            "lowest_id" => Ok(Self::LowestId),
            "input_order" => Ok(Self::InputOrder),
            other => Err(SchedulerError::UnknownTieBreak(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowestId => "lowest_id",
            Self::InputOrder => "input_order",
        }
    }
}

/// Configuration for a scheduling run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SchedulingConfig {
    /// Tie-break rule for the critical path: "lowest_id" or "input_order"
    #[pyo3(get, set)]
    pub tie_break: String,
    /// Verbosity level: 0=silent, 1=summary, 2=steps, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default().as_str().to_string(),
            verbosity: 0,
        }
    }
}

#[pymethods]
impl SchedulingConfig {
    #[new]
    #[pyo3(signature = (tie_break=None, verbosity=None))]
    fn new(tie_break: Option<String>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            tie_break: tie_break.unwrap_or(defaults.tie_break),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulingConfig(tie_break={:?}, verbosity={})",
            self.tie_break, self.verbosity
        )
    }
}

impl SchedulingConfig {
    pub fn tie_break(&self) -> Result<TieBreak, SchedulerError> {
        TieBreak::parse(&self.tie_break)
    }
}
