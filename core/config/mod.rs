use crate::executor::ExecutorKind;
use std::time::Instant;
use thiserror::*;

/// A collection of flags and options that affect how the engine runs. This is not specific to a
/// single request; a request can still override `keep_going` for itself.
///
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(error = "ConfigError"))]
pub struct Config {
    /// The executor strategy used to plan every request.
    #[builder(default)]
    executor: ExecutorKind,

    /// Keep running independent targets after a failure, instead of stopping at the first one.
    #[builder(default = "false")]
    keep_going: bool,

    /// The time at which this configuration was created. Every `BuildFinished` event reports the
    /// time elapsed since then as the total build time.
    #[builder(default = "self.default_created_at()")]
    created_at: Instant,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executor: ExecutorKind::default(),
            keep_going: false,
            created_at: Instant::now(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn executor(&self) -> ExecutorKind {
        self.executor
    }

    pub fn keep_going(&self) -> bool {
        self.keep_going
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}

impl ConfigBuilder {
    fn default_created_at(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Attempted to build a Config struct while missing fields: {0:?}")]
    BuilderError(derive_builder::UninitializedFieldError),
}

impl From<derive_builder::UninitializedFieldError> for ConfigError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::BuilderError(err)
    }
}
