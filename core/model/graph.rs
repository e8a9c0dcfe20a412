use super::*;
use crate::resolver::{Resolver, ResolverError};
use fxhash::{FxHashMap, FxHashSet};
use thiserror::*;
use tracing::*;

/// The full collection of targets of a project.
///
/// Targets live in a single arena keyed by name; edges between them are names, never references,
/// so the graph can be shared read-only with everything that needs to look at it. Once built, a
/// graph never changes.
///
#[derive(Debug, Default)]
pub struct TargetGraph {
    project: String,
    targets: FxHashMap<TargetName, Target>,
    order: Vec<TargetName>,
    default_target: Option<TargetName>,
}

impl TargetGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// All target names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &TargetName> {
        self.order.iter()
    }

    /// All targets, in declaration order.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.order.iter().filter_map(|name| self.targets.get(name))
    }

    pub fn default_target(&self) -> Option<&TargetName> {
        self.default_target.as_ref()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every target reachable through the dependency edges of `name`, not including `name` itself
    /// unless it sits on a cycle. Names that are not declared in the graph are ignored.
    ///
    pub fn transitive_dependencies(&self, name: &str) -> FxHashSet<TargetName> {
        let mut seen: FxHashSet<TargetName> = FxHashSet::default();
        let mut stack: Vec<&TargetName> = self
            .get(name)
            .map(|t| t.depends_on().iter().collect())
            .unwrap_or_default();

        while let Some(dep) = stack.pop() {
            if !seen.insert(dep.clone()) {
                continue;
            }
            if let Some(target) = self.get(dep.as_str()) {
                stack.extend(target.depends_on().iter());
            }
        }

        seen
    }

    /// Whether `target` depends on `other`, directly or indirectly.
    pub fn depends_on(&self, target: &str, other: &str) -> bool {
        self.transitive_dependencies(target).contains(other)
    }

    /// Resolve every declared target, so that missing dependencies and cycles anywhere in the
    /// graph are caught before anything runs.
    ///
    #[instrument(name = "TargetGraph::validate", skip(self))]
    pub fn validate(&self) -> Result<(), ResolverError> {
        let order = Resolver::new(self).resolve(&self.order)?;
        debug!("Complete build sequence is {:?}", order);
        Ok(())
    }
}

/// Collects targets and extension points, and turns them into a `TargetGraph`.
///
#[derive(Debug, Default)]
pub struct GraphBuilder {
    project: Option<String>,
    targets: Vec<Target>,
    default_target: Option<TargetName>,
}

impl GraphBuilder {
    pub fn project<S>(mut self, project: S) -> Self
    where
        S: Into<String>,
    {
        self.project = Some(project.into());
        self
    }

    pub fn target<T>(mut self, target: T) -> Self
    where
        T: Into<Target>,
    {
        self.targets.push(target.into());
        self
    }

    pub fn targets<I, T>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Target>,
    {
        self.targets.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn extension_point<N, I, D>(self, name: N, depends_on: I) -> Self
    where
        N: Into<TargetName>,
        I: IntoIterator<Item = D>,
        D: Into<TargetName>,
    {
        self.target(
            Target::builder(name)
                .kind(TargetKind::ExtensionPoint)
                .depends_on(depends_on),
        )
    }

    pub fn default_target<N>(mut self, name: N) -> Self
    where
        N: Into<TargetName>,
    {
        self.default_target = Some(name.into());
        self
    }

    #[instrument(name = "GraphBuilder::build", skip(self))]
    pub fn build(self) -> Result<TargetGraph, GraphError> {
        let project = self.project.unwrap_or_else(|| "default".to_string());

        let mut order = Vec::with_capacity(self.targets.len());
        let mut targets: FxHashMap<TargetName, Target> = FxHashMap::default();
        let mut extensions: Vec<(TargetName, ExtensionOf)> = vec![];

        for target in self.targets {
            if target.name().is_empty() {
                return Err(GraphError::InvalidTargetName {
                    name: target.name().to_string(),
                });
            }
            if targets.contains_key(target.name()) {
                return Err(GraphError::DuplicateTarget {
                    name: target.name().clone(),
                });
            }
            if target.is_extension_point() && !target.body().is_empty() {
                return Err(GraphError::ExtensionPointWithBody {
                    name: target.name().clone(),
                });
            }
            if let Some(ext) = target.extension_of() {
                extensions.push((target.name().clone(), ext.clone()));
            }
            order.push(target.name().clone());
            targets.insert(target.name().clone(), target);
        }

        for (name, ext) in extensions {
            match targets.get_mut(&ext.point) {
                Some(point) if point.is_extension_point() => {
                    debug!("Adding {} to extension point {}", name, ext.point);
                    point.add_dependency(name);
                }
                Some(_) => {
                    return Err(GraphError::NotAnExtensionPoint {
                        target: name,
                        point: ext.point,
                    })
                }
                None => match ext.on_missing {
                    OnMissingExtensionPoint::Fail => {
                        return Err(GraphError::MissingExtensionPoint {
                            target: name,
                            point: ext.point,
                        })
                    }
                    OnMissingExtensionPoint::Warn => {
                        warn!(
                            "Extension point '{}' used by target '{}' does not exist, ignoring it",
                            ext.point, name
                        );
                    }
                    OnMissingExtensionPoint::Ignore => (),
                },
            }
        }

        if let Some(default_target) = &self.default_target {
            if !targets.contains_key(default_target) {
                return Err(GraphError::UnknownDefaultTarget {
                    name: default_target.clone(),
                });
            }
        }

        Ok(TargetGraph {
            project,
            targets,
            order,
            default_target: self.default_target,
        })
    }
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Duplicate target '{name}'")]
    DuplicateTarget { name: TargetName },

    #[error("Invalid target name {name:?}: target names cannot be empty")]
    InvalidTargetName { name: String },

    #[error("Extension point '{name}' cannot have tasks")]
    ExtensionPointWithBody { name: TargetName },

    #[error("Can't add target '{target}' to extension point '{point}' because the extension point is unknown.")]
    MissingExtensionPoint { target: TargetName, point: TargetName },

    #[error("Referenced target '{point}' of '{target}' is not an extension point")]
    NotAnExtensionPoint { target: TargetName, point: TargetName },

    #[error("Default target '{name}' does not exist in the project")]
    UnknownDefaultTarget { name: TargetName },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> TargetGraph {
        TargetGraph::builder()
            .target(Target::builder("A").depends_on(["C"]))
            .target(Target::builder("B").depends_on(["C"]))
            .target(Target::builder("C"))
            .build()
            .unwrap()
    }

    #[test]
    fn names_keep_declaration_order() {
        let graph = diamond();
        let names: Vec<&str> = graph.names().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn duplicate_targets_are_rejected() {
        let result = TargetGraph::builder()
            .target(Target::builder("compile"))
            .target(Target::builder("compile"))
            .build();
        assert_matches!(result, Err(GraphError::DuplicateTarget { name }) if name == "compile");
    }

    #[test]
    fn empty_names_are_rejected() {
        let result = TargetGraph::builder().target(Target::builder("")).build();
        assert_matches!(result, Err(GraphError::InvalidTargetName { .. }));
    }

    #[test]
    fn transitive_dependencies_follow_every_edge() {
        let graph = TargetGraph::builder()
            .target(Target::builder("init"))
            .target(Target::builder("compile").depends_on(["init"]))
            .target(Target::builder("test").depends_on(["compile"]))
            .target(Target::builder("clean"))
            .build()
            .unwrap();

        let deps = graph.transitive_dependencies("test");
        assert_eq!(deps.len(), 2);
        assert!(deps.contains("init"));
        assert!(deps.contains("compile"));
        assert!(graph.depends_on("test", "init"));
        assert!(!graph.depends_on("init", "test"));
        assert!(!graph.depends_on("test", "clean"));
    }

    #[test]
    fn transitive_dependencies_terminate_on_cycles() {
        let graph = TargetGraph::builder()
            .target(Target::builder("A").depends_on(["B"]))
            .target(Target::builder("B").depends_on(["A"]))
            .build()
            .unwrap();
        let deps = graph.transitive_dependencies("A");
        assert!(deps.contains("A"));
        assert!(deps.contains("B"));
    }

    #[test]
    fn extension_points_collect_their_extensions() {
        let graph = TargetGraph::builder()
            .extension_point("ready", ["init"])
            .target(Target::builder("init"))
            .target(
                Target::builder("compile")
                    .extension_of("ready", OnMissingExtensionPoint::Fail),
            )
            .build()
            .unwrap();

        let ready = graph.get("ready").unwrap();
        assert!(ready.is_extension_point());
        assert_eq!(ready.depends_on(), &["init", "compile"]);
    }

    #[test]
    fn missing_extension_points_fail_by_default() {
        let result = TargetGraph::builder()
            .target(Target::builder("compile").extension_of("ready", Default::default()))
            .build();
        assert_matches!(
            result,
            Err(GraphError::MissingExtensionPoint { target, point })
                if target == "compile" && point == "ready"
        );
    }

    #[test]
    fn missing_extension_points_can_be_ignored() {
        for policy in [OnMissingExtensionPoint::Warn, OnMissingExtensionPoint::Ignore] {
            let graph = TargetGraph::builder()
                .target(Target::builder("compile").extension_of("ready", policy))
                .build()
                .unwrap();
            assert!(graph.get("compile").unwrap().depends_on().is_empty());
        }
    }

    #[test]
    fn only_extension_points_can_be_extended() {
        let result = TargetGraph::builder()
            .target(Target::builder("init"))
            .target(Target::builder("compile").extension_of("init", Default::default()))
            .build();
        assert_matches!(result, Err(GraphError::NotAnExtensionPoint { .. }));
    }

    #[test]
    fn default_target_must_exist() {
        let result = TargetGraph::builder()
            .target(Target::builder("init"))
            .default_target("dist")
            .build();
        assert_matches!(result, Err(GraphError::UnknownDefaultTarget { name }) if name == "dist");

        let graph = TargetGraph::builder()
            .project("demo")
            .target(Target::builder("init"))
            .default_target("init")
            .build()
            .unwrap();
        assert_eq!(graph.default_target().unwrap(), "init");
        assert_eq!(graph.project(), "demo");
    }

    #[test]
    fn validate_finds_problems_outside_of_any_request() {
        let graph = TargetGraph::builder()
            .target(Target::builder("clean"))
            .target(Target::builder("compile").depends_on(["missing"]))
            .build()
            .unwrap();
        assert_matches!(
            graph.validate(),
            Err(ResolverError::UnknownTarget { name, .. }) if name == "missing"
        );

        assert!(diamond().validate().is_ok());
    }
}
