use crate::model::TargetName;
use thiserror::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error(
        "Target \"{name}\" does not exist in the project \"{project}\".{}",
        used_from(.used_by)
    )]
    UnknownTarget {
        name: TargetName,
        used_by: Option<TargetName>,
        project: String,
    },

    #[error("Circular dependency: {}", render_cycle(.path))]
    CyclicDependency { path: Vec<TargetName> },
}

impl ResolverError {
    pub(crate) fn unknown_target<N>(name: N, used_by: Option<TargetName>, project: &str) -> Self
    where
        N: Into<TargetName>,
    {
        Self::UnknownTarget {
            name: name.into(),
            used_by,
            project: project.to_string(),
        }
    }
}

fn used_from(used_by: &Option<TargetName>) -> String {
    match used_by {
        Some(parent) => format!(" It is used from target \"{parent}\"."),
        None => String::new(),
    }
}

fn render_cycle(path: &[TargetName]) -> String {
    path.iter()
        .map(TargetName::as_str)
        .collect::<Vec<&str>>()
        .join(" -> ")
}
