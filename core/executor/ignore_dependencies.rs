use super::*;
use tracing::*;

/// Plans exactly what was requested, in the order it was requested. Dependencies are not looked
/// at: the caller is in charge of running things in a sensible order.
///
#[derive(Debug, Default)]
pub struct IgnoreDependenciesExecutor;

impl IgnoreDependenciesExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for IgnoreDependenciesExecutor {
    fn kind(&self) -> ExecutorKind {
        ExecutorKind::IgnoreDependencies
    }

    #[instrument(name = "IgnoreDependenciesExecutor::plan", skip(self, graph))]
    fn plan(
        &mut self,
        graph: &TargetGraph,
        requested: &[TargetName],
    ) -> Result<Vec<TargetName>, ResolverError> {
        if let Some(unknown) = requested.iter().find(|name| !graph.contains(name.as_str())) {
            return Err(ResolverError::unknown_target(
                unknown,
                None,
                graph.project(),
            ));
        }
        Ok(requested.to_vec())
    }
}
