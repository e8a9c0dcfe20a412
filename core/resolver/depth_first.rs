use super::*;
use crate::model::Target;
use fxhash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Visiting,
    Visited,
}

/// A depth-first topological sort over a `TargetGraph`.
///
/// A resolver is good for a single call to `resolve`: the visited set it builds up is what
/// prevents a target reached through several paths from being appended twice, and the stack of
/// targets currently being visited is what lets us report the full path of a cycle.
///
pub struct Resolver<'g> {
    graph: &'g TargetGraph,
    state: FxHashMap<TargetName, VisitState>,
    visiting: Vec<TargetName>,
    order: Vec<TargetName>,
}

impl<'g> Resolver<'g> {
    pub fn new(graph: &'g TargetGraph) -> Self {
        Self {
            graph,
            state: FxHashMap::default(),
            visiting: vec![],
            order: vec![],
        }
    }

    pub fn resolve<N>(mut self, roots: &[N]) -> Result<Vec<TargetName>, ResolverError>
    where
        N: AsRef<str>,
    {
        for root in roots {
            if !self.state.contains_key(root.as_ref()) {
                self.visit(root.as_ref())?;
            }
        }
        Ok(self.order)
    }

    /// Walks everything reachable from `root` with an explicit stack of frames, each holding a
    /// target and the index of the next dependency to look at. The depth of a dependency chain is
    /// bounded by the heap and not by the thread's stack.
    fn visit(&mut self, root: &str) -> Result<(), ResolverError> {
        let mut frames: Vec<(&'g Target, usize)> = vec![(self.enter(root)?, 0)];

        while let Some((target, next)) = frames.last_mut() {
            let target: &'g Target = *target;
            let dep = match target.depends_on().get(*next) {
                Some(dep) => dep,
                None => {
                    frames.pop();
                    self.leave(target);
                    continue;
                }
            };
            *next += 1;

            match self.state.get(dep.as_str()).copied() {
                None => frames.push((self.enter(dep.as_str())?, 0)),
                Some(VisitState::Visiting) => return Err(self.cycle_through(dep)),
                Some(VisitState::Visited) => (),
            }
        }

        Ok(())
    }

    /// Look up `name` and mark it as being visited.
    fn enter(&mut self, name: &str) -> Result<&'g Target, ResolverError> {
        let graph = self.graph;
        let target = graph.get(name).ok_or_else(|| {
            ResolverError::unknown_target(name, self.visiting.last().cloned(), graph.project())
        })?;
        self.state.insert(target.name().clone(), VisitState::Visiting);
        self.visiting.push(target.name().clone());
        Ok(target)
    }

    /// Every dependency of `target` is in the order, so it can go in too.
    fn leave(&mut self, target: &Target) {
        let name = target.name().clone();
        self.visiting.pop();
        self.state.insert(name.clone(), VisitState::Visited);
        self.order.push(name);
    }

    fn cycle_through(&self, dep: &TargetName) -> ResolverError {
        let start = self
            .visiting
            .iter()
            .position(|t| t == dep)
            .unwrap_or_default();
        let mut path: Vec<TargetName> = self.visiting[start..].to_vec();
        path.push(dep.clone());
        ResolverError::CyclicDependency { path }
    }
}
