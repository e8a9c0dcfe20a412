use crate::engine::TaskContext;

/// A single step in the body of a target.
///
/// Task descriptors arrive fully configured from whoever loaded the graph. The engine never looks
/// inside them: it only calls `execute` and wraps whatever error comes back with the target name
/// and the position of the task within the body.
///
/// A task may block for as long as it needs to (spawn a process, wait on a thread pool, etc). The
/// engine waits for it to return before moving on.
///
pub trait TaskDescriptor: std::fmt::Debug {
    /// The kind of task this is, such as `exec` or `echo`. Used for diagnostics only.
    fn kind(&self) -> &str;

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), anyhow::Error>;
}
