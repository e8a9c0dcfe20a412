use anvil_core::{TaskContext, TaskDescriptor};
use serde_derive::Deserialize;

/// Always fails with the configured message.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FailTask {
    message: String,
}

impl FailTask {
    pub const KIND: &'static str = "fail";
}

impl TaskDescriptor for FailTask {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn execute(&self, _ctx: &mut TaskContext<'_>) -> Result<(), anyhow::Error> {
        Err(anyhow::anyhow!("{}", self.message))
    }
}
