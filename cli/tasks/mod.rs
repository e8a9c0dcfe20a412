//! # Task Registry
//!
//! Maps the `task` field of a build file entry to the code that builds a `TaskDescriptor` from the
//! rest of that entry. The engine never sees the registry; only the build file loader does.
//!

mod echo;
mod exec;
mod fail;
mod property_check;

pub use echo::*;
pub use exec::*;
pub use fail::*;
pub use property_check::*;

use anvil_core::TaskDescriptor;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use thiserror::*;

type TaskFactory = Box<dyn Fn(serde_json::Value) -> Result<Box<dyn TaskDescriptor>, serde_json::Error>>;

#[derive(Error, Debug)]
pub enum TaskRegistryError {
    #[error("Unknown task kind '{kind}'. Available tasks are: {}", .available.join(", "))]
    UnknownTask { kind: String, available: Vec<String> },

    #[error("Invalid configuration for task '{kind}': {source}")]
    InvalidConfig {
        kind: String,
        source: serde_json::Error,
    },
}

pub struct TaskRegistry {
    factories: BTreeMap<String, TaskFactory>,
}

impl Default for TaskRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register::<EchoTask>(EchoTask::KIND);
        registry.register::<FailTask>(FailTask::KIND);
        registry.register::<ExecTask>(ExecTask::KIND);
        registry.register::<PropertyCheckTask>(PropertyCheckTask::KIND);
        registry
    }
}

impl TaskRegistry {
    /// A registry with every built-in task.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::default(),
        }
    }

    /// Register `T` under `kind`. Its configuration is deserialized from the build file entry.
    pub fn register<T>(&mut self, kind: &str)
    where
        T: TaskDescriptor + DeserializeOwned + 'static,
    {
        self.factories.insert(
            kind.to_string(),
            Box::new(
                |config: serde_json::Value| -> Result<Box<dyn TaskDescriptor>, serde_json::Error> {
                    let task: T = serde_json::from_value(config)?;
                    Ok(Box::new(task))
                },
            ),
        );
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    #[tracing::instrument(name = "TaskRegistry::create", skip(self))]
    pub fn create(
        &self,
        kind: &str,
        config: serde_json::Value,
    ) -> Result<Box<dyn TaskDescriptor>, TaskRegistryError> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| TaskRegistryError::UnknownTask {
                kind: kind.to_string(),
                available: self.kinds().map(str::to_string).collect(),
            })?;

        factory(config).map_err(|source| TaskRegistryError::InvalidConfig {
            kind: kind.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
