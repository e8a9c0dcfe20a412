use crate::tasks::{TaskRegistry, TaskRegistryError};
use anvil_core::{GraphError, OnMissingExtensionPoint, Target, TargetGraph};
use serde_derive::{Deserialize, Serialize};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::*;
use tracing::*;

#[derive(Error, Debug)]
pub enum BuildFileError {
    #[error("Could not find a build file at {0:?}")]
    BuildFileNotFound(PathBuf),

    #[error(transparent)]
    IOError(std::io::Error),

    #[error("Could not parse build file: {0}")]
    ParseError(serde_json::Error),

    #[error("Target '{target}' has a bad task #{position}: {source}")]
    TaskError {
        target: String,
        position: usize,
        source: TaskRegistryError,
    },

    #[error(transparent)]
    GraphError(#[from] GraphError),
}

/// A single entry in the `tasks` list of a target. The `task` field picks the kind of task, and
/// everything else is handed to that task as its configuration.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskEntry {
    pub task: String,

    #[serde(flatten)]
    pub config: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<String>,

    #[serde(default, rename = "if", skip_serializing_if = "Option::is_none")]
    pub if_condition: Option<String>,

    #[serde(default, rename = "unless", skip_serializing_if = "Option::is_none")]
    pub unless_condition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_of: Option<String>,

    #[serde(default)]
    pub on_missing_extension_point: OnMissingExtensionPoint,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskEntry>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionPointEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<String>,
}

/// A struct representing an `anvil.json` file.
///
/// Comments are allowed anywhere in the file.
///
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_target: Option<String>,

    #[serde(default)]
    pub targets: Vec<TargetEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension_points: Vec<ExtensionPointEntry>,
}

impl BuildFile {
    #[tracing::instrument(name = "BuildFile::read_from_file")]
    pub fn read_from_file(path: &Path) -> Result<Self, BuildFileError> {
        let file = std::fs::File::open(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => BuildFileError::BuildFileNotFound(path.to_path_buf()),
            _ => BuildFileError::IOError(err),
        })?;

        let reader = json_comments::StripComments::new(BufReader::new(file));

        serde_json::from_reader(reader).map_err(BuildFileError::ParseError)
    }

    pub fn parse(contents: &str) -> Result<Self, BuildFileError> {
        let reader = json_comments::StripComments::new(contents.as_bytes());
        serde_json::from_reader(reader).map_err(BuildFileError::ParseError)
    }

    /// Build the `TargetGraph` described by this file, creating every task through `registry`.
    #[tracing::instrument(name = "BuildFile::into_graph", skip(self, registry))]
    pub fn into_graph(self, registry: &TaskRegistry) -> Result<TargetGraph, BuildFileError> {
        let mut graph = TargetGraph::builder();

        if let Some(project) = self.project {
            graph = graph.project(project);
        }

        for point in self.extension_points {
            graph = graph.extension_point(point.name, point.depends);
        }

        for entry in self.targets {
            let mut target = Target::builder(entry.name.as_str()).depends_on(entry.depends);

            if let Some(description) = entry.description {
                target = target.description(description);
            }
            if let Some(property) = entry.if_condition {
                target = target.if_condition(property);
            }
            if let Some(property) = entry.unless_condition {
                target = target.unless_condition(property);
            }
            if let Some(point) = entry.extension_of {
                target = target.extension_of(point, entry.on_missing_extension_point);
            }

            for (idx, task) in entry.tasks.into_iter().enumerate() {
                let descriptor = registry
                    .create(&task.task, serde_json::Value::Object(task.config))
                    .map_err(|source| BuildFileError::TaskError {
                        target: entry.name.clone(),
                        position: idx + 1,
                        source,
                    })?;
                target = target.boxed_task(descriptor);
            }

            graph = graph.target(target);
        }

        if let Some(default_target) = self.default_target {
            graph = graph.default_target(default_target);
        }

        let graph = graph.build()?;
        debug!("Loaded {} targets", graph.len());
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const BUILD_FILE: &str = r#"
    {
        // comments are fine
        "project": "demo",
        "default": "test",
        "targets": [
            { "name": "init", "tasks": [ { "task": "echo", "message": "hello" } ] },
            { "name": "compile", "depends": ["init"], "extension_of": "ready" },
            {
                "name": "test",
                "description": "Runs the tests",
                "depends": ["ready"],
                "unless": "skip.tests"
            }
        ],
        "extension_points": [ { "name": "ready", "depends": ["init"] } ]
    }
    "#;

    #[test]
    fn loads_targets_and_extension_points() {
        let graph = BuildFile::parse(BUILD_FILE)
            .unwrap()
            .into_graph(&TaskRegistry::new())
            .unwrap();

        assert_eq!(graph.project(), "demo");
        assert_eq!(graph.default_target().unwrap(), "test");
        assert_eq!(graph.get("init").unwrap().body().len(), 1);
        assert_eq!(graph.get("ready").unwrap().depends_on(), &["init", "compile"]);

        let test = graph.get("test").unwrap();
        assert_eq!(test.description(), Some("Runs the tests"));
        assert_eq!(
            test.guard().unless_condition.as_ref().map(|p| p.name()),
            Some("skip.tests")
        );
    }

    #[test]
    fn unknown_tasks_point_at_the_target() {
        let result = BuildFile::parse(
            r#"{ "targets": [ { "name": "dist", "tasks": [ { "task": "zip" } ] } ] }"#,
        )
        .unwrap()
        .into_graph(&TaskRegistry::new());

        assert_matches!(
            result,
            Err(BuildFileError::TaskError { target, position: 1, source: TaskRegistryError::UnknownTask { .. } })
                if target == "dist"
        );
    }

    #[test]
    fn graph_errors_are_passed_through() {
        let result = BuildFile::parse(r#"{ "targets": [ { "name": "a" }, { "name": "a" } ] }"#)
            .unwrap()
            .into_graph(&TaskRegistry::new());
        assert_matches!(
            result,
            Err(BuildFileError::GraphError(GraphError::DuplicateTarget { .. }))
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert_matches!(
            BuildFile::parse(r#"{ "targetz": [] }"#),
            Err(BuildFileError::ParseError(_))
        );
    }
}
