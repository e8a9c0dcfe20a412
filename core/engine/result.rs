use super::*;
use crate::model::{BuildId, TargetName};
use crate::resolver::ResolverError;
use std::collections::BTreeSet;
use std::time::Duration;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum BuildStatus {
    Succeeded,
    Failed,
    PartiallyFailed,
}

impl BuildStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Succeeded)
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BuildStatus::Succeeded => "succeeded",
            BuildStatus::Failed => "failed",
            BuildStatus::PartiallyFailed => "partially failed",
        })
    }
}

/// Everything a single `Engine::execute` call did.
///
#[derive(Debug)]
pub struct ExecutionResult {
    pub(crate) build_id: BuildId,
    pub(crate) status: BuildStatus,
    pub(crate) executed: Vec<TargetName>,
    pub(crate) skipped: BTreeSet<TargetName>,
    pub(crate) poisoned: Vec<TargetName>,
    pub(crate) failures: Vec<TaskExecutionError>,
    pub(crate) unmet: Vec<UnmetDependency>,
    pub(crate) configuration_error: Option<ResolverError>,
    pub(crate) duration: Duration,
}

impl ExecutionResult {
    pub fn build_id(&self) -> BuildId {
        self.build_id
    }

    pub fn status(&self) -> BuildStatus {
        self.status
    }

    /// Every target that was started, in the order they were started. Targets skipped by their
    /// guard and targets that failed are included.
    pub fn executed(&self) -> &[TargetName] {
        &self.executed
    }

    /// Targets that were started but skipped because of their `if`/`unless` guard.
    pub fn skipped(&self) -> &BTreeSet<TargetName> {
        &self.skipped
    }

    /// Targets that were never started because something they depend on failed.
    pub fn poisoned(&self) -> &[TargetName] {
        &self.poisoned
    }

    pub fn failures(&self) -> &[TaskExecutionError] {
        &self.failures
    }

    /// Targets that could not start because a target failed in an earlier request of the same
    /// build session.
    pub fn unmet_dependencies(&self) -> &[UnmetDependency] {
        &self.unmet
    }

    pub fn configuration_error(&self) -> Option<&ResolverError> {
        self.configuration_error.as_ref()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turn this result into an error if anything went wrong.
    ///
    /// A configuration problem wins over everything else. A single failure is returned as-is, and
    /// more than one is wrapped in an `AggregateFailure` with the first failure first. With no task
    /// failures at all, the first target blocked by an earlier failure is the error.
    ///
    pub fn into_result(mut self) -> Result<Self, BuildError> {
        if let Some(err) = self.configuration_error.take() {
            return Err(err.into());
        }
        match self.failures.len() {
            0 if !self.unmet.is_empty() => Err(self.unmet.remove(0).into()),
            0 => Ok(self),
            1 => {
                let failures = std::mem::take(&mut self.failures);
                match failures.into_iter().next() {
                    Some(failure) => Err(failure.into()),
                    None => Ok(self),
                }
            }
            _ => {
                let failures = std::mem::take(&mut self.failures);
                Err(AggregateFailure::new(failures).into())
            }
        }
    }
}
