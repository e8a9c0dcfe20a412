use super::*;
use crate::resolver::resolve;
use tracing::*;

/// Resolves the whole request like the `DefaultExecutor`, but remembers every target attempted
/// during the build session and leaves those out of any later plan. A target runs at most once per
/// session, no matter how many requests reach it.
///
#[derive(Debug, Default)]
pub struct SingleCheckExecutor {
    state: ExecutorState,
}

impl SingleCheckExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ExecutorState {
        &self.state
    }
}

impl Executor for SingleCheckExecutor {
    fn kind(&self) -> ExecutorKind {
        ExecutorKind::SingleCheck
    }

    #[instrument(name = "SingleCheckExecutor::plan", skip(self, graph))]
    fn plan(
        &mut self,
        graph: &TargetGraph,
        requested: &[TargetName],
    ) -> Result<Vec<TargetName>, ResolverError> {
        let plan: Vec<TargetName> = resolve(graph, requested)?
            .into_iter()
            .filter(|target| !self.state.has_executed(target.as_str()))
            .collect();
        debug!(
            "{} targets already executed in this session",
            self.state.len()
        );
        Ok(plan)
    }

    fn record(&mut self, target: &TargetName) {
        self.state.mark_executed(target);
    }

    fn record_failure(&mut self, target: &TargetName) {
        self.state.mark_failed(target);
    }

    fn failed(&self) -> &[TargetName] {
        self.state.failed()
    }

    fn reset(&mut self) {
        self.state.clear();
    }
}
