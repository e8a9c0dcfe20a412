use anvil_core::events::event::Severity;
use anvil_core::{TaskContext, TaskDescriptor};
use anyhow::*;
use serde_derive::Deserialize;
use std::path::PathBuf;
use std::process::Command;
use tracing::*;

/// Runs a process and waits for it. Fails if it can't be spawned or exits with a non-zero status.
///
/// Whatever the process writes is logged line by line: standard output as `info`, standard error
/// as `warn`.
///
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecTask {
    command: PathBuf,

    #[serde(default)]
    args: Vec<String>,

    #[serde(default)]
    dir: Option<PathBuf>,
}

impl ExecTask {
    pub const KIND: &'static str = "exec";
}

impl TaskDescriptor for ExecTask {
    fn kind(&self) -> &str {
        Self::KIND
    }

    #[tracing::instrument(name = "ExecTask::execute", skip(ctx))]
    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), anyhow::Error> {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }

        debug!("Executing {:?}", &cmd);

        let output = cmd
            .output()
            .context(format!("Could not spawn {:?}", self.command))?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            ctx.log(Severity::Info, line);
        }
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            ctx.log(Severity::Warn, line);
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(anyhow!(
                "{} exited with {}",
                self.command.display(),
                output.status
            ))
        }
    }
}
