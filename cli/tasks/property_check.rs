use anvil_core::events::event::Severity;
use anvil_core::{TaskContext, TaskDescriptor};
use serde_derive::Deserialize;

/// Fails unless `property` is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyCheckTask {
    property: String,
}

impl PropertyCheckTask {
    pub const KIND: &'static str = "property-check";
}

impl TaskDescriptor for PropertyCheckTask {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), anyhow::Error> {
        match ctx.property(&self.property) {
            Some(value) => {
                ctx.log(
                    Severity::Verbose,
                    format!("Property '{}' is '{}'", self.property, value),
                );
                Ok(())
            }
            None => Err(anyhow::anyhow!("Property '{}' is not set", self.property)),
        }
    }
}
