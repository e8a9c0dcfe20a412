use super::*;
use crate::resolver::resolve;
use tracing::*;

/// Resolves the whole request in one go, so a target shared by several requested targets runs
/// only once per request. Nothing is remembered between requests.
///
#[derive(Debug, Default)]
pub struct DefaultExecutor;

impl DefaultExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for DefaultExecutor {
    fn kind(&self) -> ExecutorKind {
        ExecutorKind::Default
    }

    #[instrument(name = "DefaultExecutor::plan", skip(self, graph))]
    fn plan(
        &mut self,
        graph: &TargetGraph,
        requested: &[TargetName],
    ) -> Result<Vec<TargetName>, ResolverError> {
        resolve(graph, requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Target;

    fn diamond() -> TargetGraph {
        TargetGraph::builder()
            .target(Target::builder("A").depends_on(["C"]))
            .target(Target::builder("B").depends_on(["C"]))
            .target(Target::builder("C"))
            .build()
            .unwrap()
    }

    #[test]
    fn plans_the_resolved_closure() {
        let mut executor = DefaultExecutor::new();
        let plan = executor
            .plan(&diamond(), &["A".into(), "B".into()])
            .unwrap();
        assert_eq!(plan, &["C", "A", "B"]);
    }

    #[test]
    fn does_not_remember_previous_requests() {
        let graph = diamond();
        let mut executor = DefaultExecutor::new();
        let first = executor.plan(&graph, &["A".into()]).unwrap();
        for target in &first {
            executor.record(target);
        }
        let second = executor.plan(&graph, &["A".into()]).unwrap();
        assert_eq!(first, second);
    }
}
