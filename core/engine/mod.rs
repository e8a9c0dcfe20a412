//! # Execution Controller
//!
//! The `Engine` turns an `ExecutionRequest` into an `ExecutionResult`. It asks its `Executor` for a
//! plan, then walks the plan in order: every planned target is either poisoned by an earlier
//! failure, skipped by its guard, or run task by task.
//!
//! In fail-fast mode the first failure ends the run. In keep-going mode failures are collected and
//! everything that does not depend on a failed target still runs.
//!
//! Executors that remember targets across requests also remember which of them failed. A later
//! request poisons anything that depends on such a target, the same way a failure in the current
//! run would.
//!

mod context;
mod error;
mod request;
mod result;

pub use context::*;
pub use error::*;
pub use request::*;
pub use result::*;

use crate::config::Config;
use crate::events::event::*;
use crate::events::{Listener, Listeners};
use crate::executor::{Executor, ExecutorKind};
use crate::model::{BuildId, PropertyResolver, Target, TargetGraph, TargetName};
use crate::resolver::ResolverError;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::*;

#[derive(Debug)]
pub struct Engine {
    graph: Arc<TargetGraph>,
    config: Config,
    executor: Box<dyn Executor>,
    listeners: Listeners,
    build_id: BuildId,
}

/// Book-keeping for a single run through a plan.
#[derive(Default)]
struct Run {
    executed: Vec<TargetName>,
    skipped: BTreeSet<TargetName>,
    poisoned: Vec<TargetName>,
    failed: Vec<TargetName>,
    failures: Vec<TaskExecutionError>,
    unmet: Vec<UnmetDependency>,
    configuration_error: Option<ResolverError>,
}

impl Engine {
    pub fn new<G>(graph: G, config: Config) -> Self
    where
        G: Into<Arc<TargetGraph>>,
    {
        let executor = config.executor().executor();
        Self {
            graph: graph.into(),
            config,
            executor,
            listeners: Listeners::new(),
            build_id: BuildId::next(),
        }
    }

    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: Listener + 'static,
    {
        self.listeners.add(listener)
    }

    pub fn graph(&self) -> &TargetGraph {
        &self.graph
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn build_id(&self) -> BuildId {
        self.build_id
    }

    pub fn executor_kind(&self) -> ExecutorKind {
        self.executor.kind()
    }

    /// Start a new build session: a fresh `BuildId`, and an executor that has forgotten every
    /// target it saw before.
    ///
    pub fn start_session(&mut self) -> BuildId {
        self.build_id = BuildId::next();
        self.executor.reset();
        debug!("Started build session {}", self.build_id);
        self.build_id
    }

    #[instrument(name = "Engine::execute", skip(self, properties))]
    pub fn execute(
        &mut self,
        request: &ExecutionRequest,
        properties: &dyn PropertyResolver,
    ) -> ExecutionResult {
        let started_at = Instant::now();
        let graph = self.graph.clone();
        let keep_going = request.is_keep_going();

        self.listeners.fire(BuildEvent::BuildStarted {
            build_id: self.build_id,
            targets: request.targets().to_vec(),
            keep_going,
        });

        let mut run = Run::default();

        match self.executor.plan(&graph, request.targets()) {
            Err(err) => {
                self.listeners
                    .fire(LogEvent::message(Severity::Error, err.to_string()));
                run.configuration_error = Some(err);
            }
            Ok(plan) => {
                self.listeners.fire(LogEvent::message(
                    Severity::Verbose,
                    build_sequence_message(request.targets(), &plan),
                ));
                self.run_plan(&graph, &plan, keep_going, properties, &mut run);
            }
        }

        let status = run.status(keep_going);
        let duration = started_at.elapsed();

        let mut failures: Vec<String> = run.failures.iter().map(|f| f.to_string()).collect();
        failures.extend(run.unmet.iter().map(|u| u.to_string()));
        if let Some(err) = &run.configuration_error {
            failures.push(err.to_string());
        }
        self.listeners.fire(BuildEvent::BuildFinished {
            build_id: self.build_id,
            status,
            attempted: run.executed.len() as u64,
            failures,
            duration,
            total_duration: self.config.created_at().elapsed(),
        });

        ExecutionResult {
            build_id: self.build_id,
            status,
            executed: run.executed,
            skipped: run.skipped,
            poisoned: run.poisoned,
            failures: run.failures,
            unmet: run.unmet,
            configuration_error: run.configuration_error,
            duration,
        }
    }

    fn run_plan(
        &mut self,
        graph: &TargetGraph,
        plan: &[TargetName],
        keep_going: bool,
        properties: &dyn PropertyResolver,
        run: &mut Run,
    ) {
        let earlier_failures: Vec<TargetName> = self.executor.failed().to_vec();

        for name in plan {
            if !run.failed.is_empty() && !keep_going {
                break;
            }
            if !run.failed.is_empty() || !earlier_failures.is_empty() {
                let deps = graph.transitive_dependencies(name.as_str());
                if let Some(failed) = run.failed.iter().find(|f| deps.contains(*f)).cloned() {
                    debug!("Not starting {} because {} failed", name, failed);
                    self.poison(name, &failed, run);
                    continue;
                }
                if let Some(failed) = earlier_failures.iter().find(|f| deps.contains(*f)) {
                    debug!("Not starting {} because {} failed in an earlier request", name, failed);
                    self.poison(name, failed, run);
                    run.unmet.push(UnmetDependency {
                        target: name.clone(),
                        failed: failed.clone(),
                    });
                    if !keep_going {
                        break;
                    }
                    continue;
                }
            }

            let target = match graph.get(name.as_str()) {
                Some(target) => target,
                None => {
                    let err = ResolverError::unknown_target(name.clone(), None, graph.project());
                    self.listeners
                        .fire(LogEvent::message(Severity::Error, err.to_string()));
                    run.configuration_error = Some(err);
                    break;
                }
            };

            self.executor.record(name);
            run.executed.push(name.clone());

            if let Err(err) = self.run_target(target, properties, run) {
                self.listeners.fire(LogEvent::target_message(
                    Severity::Error,
                    name,
                    format!("Target '{}' failed with message '{}'", name, err.message()),
                ));
                self.listeners.fire(TargetEvent::TargetFinished {
                    target: name.clone(),
                    outcome: TargetOutcome::Failed,
                    error: Some(err.to_string()),
                });
                self.executor.record_failure(name);
                run.failed.push(name.clone());
                run.failures.push(err);
            }
        }
    }

    fn poison(&mut self, name: &TargetName, failed: &TargetName, run: &mut Run) {
        self.listeners.fire(LogEvent::target_message(
            Severity::Error,
            name,
            format!(
                "Cannot execute '{}' - '{}' failed or was not executed.",
                name, failed
            ),
        ));
        run.poisoned.push(name.clone());
    }

    /// Run a single target, firing `TargetStarted` and, unless it fails, `TargetFinished`.
    fn run_target(
        &mut self,
        target: &Target,
        properties: &dyn PropertyResolver,
        run: &mut Run,
    ) -> Result<(), TaskExecutionError> {
        let name = target.name();
        self.listeners.fire(TargetEvent::TargetStarted {
            target: name.clone(),
        });

        let decision = target.guard().evaluate(properties);
        if let Some(reason) = decision.reason() {
            run.skipped.insert(name.clone());
            self.listeners
                .fire(LogEvent::target_message(Severity::Verbose, name, reason));
            self.listeners.fire(TargetEvent::TargetFinished {
                target: name.clone(),
                outcome: TargetOutcome::Skipped,
                error: None,
            });
            return Ok(());
        }

        for (idx, task) in target.body().iter().enumerate() {
            let position = idx + 1;
            let kind = task.kind().to_string();
            self.listeners.fire(TaskEvent::TaskStarted {
                target: name.clone(),
                task: kind.clone(),
                position,
            });

            let mut ctx = TaskContext {
                build_id: self.build_id,
                target: name,
                task: &kind,
                position,
                properties,
                listeners: &mut self.listeners,
            };
            let result = task.execute(&mut ctx);

            self.listeners.fire(TaskEvent::TaskFinished {
                target: name.clone(),
                task: kind.clone(),
                position,
                error: result.as_ref().err().map(|err| format!("{:#}", err)),
            });

            if let Err(source) = result {
                return Err(TaskExecutionError {
                    target: name.clone(),
                    position,
                    task: kind,
                    source,
                });
            }
        }

        self.listeners.fire(TargetEvent::TargetFinished {
            target: name.clone(),
            outcome: TargetOutcome::Completed,
            error: None,
        });
        Ok(())
    }
}

impl Run {
    fn status(&self, keep_going: bool) -> BuildStatus {
        if self.configuration_error.is_some() {
            return BuildStatus::Failed;
        }
        match (self.failures.len(), self.unmet.len()) {
            (0, 0) => BuildStatus::Succeeded,
            _ if !keep_going => BuildStatus::Failed,
            (1, 0) if self.executed.len() == 1 => BuildStatus::Failed,
            _ if self.executed.is_empty() => BuildStatus::Failed,
            _ => BuildStatus::PartiallyFailed,
        }
    }
}

fn build_sequence_message(requested: &[TargetName], plan: &[TargetName]) -> String {
    let requested: Vec<String> = requested.iter().map(|t| format!("`{}`", t)).collect();
    let plan: Vec<&str> = plan.iter().map(|t| t.as_str()).collect();
    format!(
        "Build sequence for target(s) {} is [{}]",
        requested.join(", "),
        plan.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Properties;

    #[test]
    fn build_sequence_lists_requested_and_planned_targets() {
        let msg = build_sequence_message(
            &["dist".into(), "docs".into()],
            &["init".into(), "dist".into(), "docs".into()],
        );
        assert_eq!(msg, "Build sequence for target(s) `dist`, `docs` is [init, dist, docs]");
    }

    #[test]
    fn status_is_failed_when_only_the_failing_target_ran() {
        let mut run = Run::default();
        run.executed.push("a".into());
        run.failures.push(TaskExecutionError {
            target: "a".into(),
            position: 1,
            task: "fail".into(),
            source: anyhow::anyhow!("boom"),
        });
        assert_eq!(run.status(false), BuildStatus::Failed);
        assert_eq!(run.status(true), BuildStatus::Failed);

        run.executed.push("b".into());
        assert_eq!(run.status(false), BuildStatus::Failed);
        assert_eq!(run.status(true), BuildStatus::PartiallyFailed);
    }

    #[test]
    fn targets_blocked_by_earlier_failures_fail_the_run() {
        let mut run = Run::default();
        run.unmet.push(UnmetDependency {
            target: "B".into(),
            failed: "C".into(),
        });
        assert_eq!(run.status(false), BuildStatus::Failed);
        assert_eq!(run.status(true), BuildStatus::Failed);

        run.executed.push("D".into());
        assert_eq!(run.status(true), BuildStatus::PartiallyFailed);
    }

    #[test]
    fn configuration_errors_always_fail() {
        let run = Run {
            configuration_error: Some(ResolverError::unknown_target("x", None, "default")),
            ..Run::default()
        };
        assert_eq!(run.status(true), BuildStatus::Failed);
    }

    #[test]
    fn start_session_changes_the_build_id() {
        let graph = TargetGraph::builder().build().unwrap();
        let mut engine = Engine::new(graph, Config::default());
        let first = engine.build_id();
        let second = engine.start_session();
        assert_ne!(first, second);
        assert_eq!(engine.build_id(), second);
    }

    #[test]
    fn empty_requests_succeed_without_doing_anything() {
        let graph = TargetGraph::builder().build().unwrap();
        let mut engine = Engine::new(graph, Config::default());
        let result = engine.execute(&ExecutionRequest::default(), &Properties::new());
        assert!(result.is_success());
        assert!(result.executed().is_empty());
    }
}
