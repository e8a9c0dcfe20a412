use anvil_core::events::event::Severity;
use anvil_core::{TaskContext, TaskDescriptor};
use serde_derive::Deserialize;

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    #[default]
    Info,
    Verbose,
    Debug,
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Severity::Error,
            Level::Warn => Severity::Warn,
            Level::Info => Severity::Info,
            Level::Verbose => Severity::Verbose,
            Level::Debug => Severity::Debug,
        }
    }
}

/// Logs a message.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EchoTask {
    message: String,

    #[serde(default)]
    level: Level,
}

impl EchoTask {
    pub const KIND: &'static str = "echo";
}

impl TaskDescriptor for EchoTask {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), anyhow::Error> {
        ctx.log(self.level.into(), self.message.clone());
        Ok(())
    }
}
