use crate::engine::BuildStatus;
use crate::model::{BuildId, TargetName};
use std::time::Duration;

/// How important a logged message is. Ordered from most to least important, so a message is shown
/// when its severity is `<=` the configured threshold.
///
#[derive(Default, Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    Error,
    Warn,
    #[default]
    Info,
    Verbose,
    Debug,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Verbose => "verbose",
            Severity::Debug => "debug",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildEvent {
    BuildStarted {
        build_id: BuildId,
        targets: Vec<TargetName>,
        keep_going: bool,
    },
    BuildFinished {
        build_id: BuildId,
        status: BuildStatus,
        attempted: u64,
        failures: Vec<String>,
        /// Time spent on this request.
        duration: Duration,
        /// Time since the engine's `Config` was created.
        total_duration: Duration,
    },
}

/// How an attempted target ended.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum TargetOutcome {
    Completed,
    Skipped,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TargetEvent {
    TargetStarted {
        target: TargetName,
    },
    TargetFinished {
        target: TargetName,
        outcome: TargetOutcome,
        error: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskEvent {
    TaskStarted {
        target: TargetName,
        task: String,
        position: usize,
    },
    TaskFinished {
        target: TargetName,
        task: String,
        position: usize,
        error: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogEvent {
    MessageLogged {
        severity: Severity,
        message: String,
        target: Option<TargetName>,
        task: Option<String>,
    },
}

impl LogEvent {
    pub(crate) fn message<S>(severity: Severity, message: S) -> Self
    where
        S: Into<String>,
    {
        LogEvent::MessageLogged {
            severity,
            message: message.into(),
            target: None,
            task: None,
        }
    }

    pub(crate) fn target_message<S>(severity: Severity, target: &TargetName, message: S) -> Self
    where
        S: Into<String>,
    {
        LogEvent::MessageLogged {
            severity,
            message: message.into(),
            target: Some(target.clone()),
            task: None,
        }
    }
}

#[derive(Default, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Event {
    /// The "nothing happened" event.
    #[default]
    Noop,
    BuildEvent(BuildEvent),
    TargetEvent(TargetEvent),
    TaskEvent(TaskEvent),
    LogEvent(LogEvent),
}

impl From<BuildEvent> for Event {
    fn from(value: BuildEvent) -> Self {
        Event::BuildEvent(value)
    }
}

impl From<TargetEvent> for Event {
    fn from(value: TargetEvent) -> Self {
        Event::TargetEvent(value)
    }
}

impl From<TaskEvent> for Event {
    fn from(value: TaskEvent) -> Self {
        Event::TaskEvent(value)
    }
}

impl From<LogEvent> for Event {
    fn from(value: LogEvent) -> Self {
        Event::LogEvent(value)
    }
}
