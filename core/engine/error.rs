use crate::model::TargetName;
use crate::resolver::ResolverError;
use thiserror::*;

/// A task raised an error while running inside a target.
///
#[derive(Error, Debug)]
#[error("Target '{target}' failed at task #{position} ({task}): {source:#}")]
pub struct TaskExecutionError {
    pub target: TargetName,
    pub position: usize,
    pub task: String,
    pub source: anyhow::Error,
}

impl TaskExecutionError {
    pub fn target(&self) -> &TargetName {
        &self.target
    }

    /// The message of the underlying error, without the target and task prefix.
    pub fn message(&self) -> String {
        format!("{:#}", self.source)
    }
}

/// A planned target was not started because a target it depends on failed, either earlier in this
/// run or in an earlier request of the same build session.
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot execute '{target}' - '{failed}' failed or was not executed.")]
pub struct UnmetDependency {
    pub target: TargetName,
    pub failed: TargetName,
}

/// Every failure collected during a keep-going run, in the order they happened.
///
#[derive(Debug)]
pub struct AggregateFailure {
    failures: Vec<TaskExecutionError>,
}

impl AggregateFailure {
    pub(crate) fn new(failures: Vec<TaskExecutionError>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[TaskExecutionError] {
        &self.failures
    }

    /// The failure that happened first.
    pub fn first(&self) -> Option<&TaskExecutionError> {
        self.failures.first()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl std::fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} targets failed", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateFailure {}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Configuration(#[from] ResolverError),

    #[error(transparent)]
    Target(#[from] TaskExecutionError),

    #[error(transparent)]
    Aggregate(#[from] AggregateFailure),

    #[error(transparent)]
    UnmetDependency(#[from] UnmetDependency),
}
