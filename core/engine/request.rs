use crate::config::Config;
use crate::model::TargetName;

/// The targets a caller asked for, in the order they were asked for, and whether to keep going
/// past failures while running them.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionRequest {
    targets: Vec<TargetName>,
    keep_going: bool,
}

impl ExecutionRequest {
    pub fn new<I, N>(targets: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<TargetName>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            keep_going: false,
        }
    }

    /// A request for `targets` that uses the keep-going mode set in `config`.
    pub fn from_config<I, N>(config: &Config, targets: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<TargetName>,
    {
        Self::new(targets).keep_going(config.keep_going())
    }

    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn targets(&self) -> &[TargetName] {
        &self.targets
    }

    pub fn is_keep_going(&self) -> bool {
        self.keep_going
    }
}
