use super::*;
use serde_derive::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::*;

#[derive(
    Default, Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutorKind {
    /// Resolve the whole request at once and run each target in it once.
    #[default]
    Default,

    /// Like `Default`, but never run a target twice during the same build session.
    SingleCheck,

    /// Run exactly the requested targets, without looking at their dependencies.
    IgnoreDependencies,
}

#[derive(Error, Debug)]
pub enum ExecutorKindError {
    #[error(
        "Invalid executor {0}. Valid executors are: default, single-check, and ignore-dependencies."
    )]
    InvalidExecutor(String),
}

impl ExecutorKind {
    pub fn executor(&self) -> Box<dyn Executor> {
        match self {
            ExecutorKind::Default => Box::new(DefaultExecutor::new()),
            ExecutorKind::SingleCheck => Box::new(SingleCheckExecutor::new()),
            ExecutorKind::IgnoreDependencies => Box::new(IgnoreDependenciesExecutor::new()),
        }
    }
}

impl FromStr for ExecutorKind {
    type Err = ExecutorKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "single-check" => Ok(Self::SingleCheck),
            "ignore-dependencies" => Ok(Self::IgnoreDependencies),
            _ => Err(ExecutorKindError::InvalidExecutor(s.into())),
        }
    }
}

impl std::fmt::Display for ExecutorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::SingleCheck => "single-check",
            Self::IgnoreDependencies => "ignore-dependencies",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl quickcheck::Arbitrary for ExecutorKind {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            g.choose(&[
                Self::Default,
                Self::SingleCheck,
                Self::IgnoreDependencies,
            ])
            .unwrap()
            .to_owned()
        }
    }

    #[quickcheck]
    fn kinds_parse_back_from_their_names(kind: ExecutorKind) {
        assert_eq!(kind.to_string().parse::<ExecutorKind>().unwrap(), kind);
    }

    #[quickcheck]
    fn executors_report_their_kind(kind: ExecutorKind) {
        assert_eq!(kind.executor().kind(), kind);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_matches!(
            "parallel".parse::<ExecutorKind>(),
            Err(ExecutorKindError::InvalidExecutor(name)) if name == "parallel"
        );
    }
}
