use crate::events::event::{LogEvent, Severity};
use crate::events::Listeners;
use crate::model::{BuildId, PropertyRef, PropertyResolver, TargetName};

/// What a task gets to see while it runs: the target it belongs to, the property snapshot of the
/// current request, and a way to log messages that end up as `MessageLogged` events.
///
pub struct TaskContext<'a> {
    pub(crate) build_id: BuildId,
    pub(crate) target: &'a TargetName,
    pub(crate) task: &'a str,
    pub(crate) position: usize,
    pub(crate) properties: &'a dyn PropertyResolver,
    pub(crate) listeners: &'a mut Listeners,
}

impl<'a> TaskContext<'a> {
    pub fn build_id(&self) -> BuildId {
        self.build_id
    }

    pub fn target(&self) -> &TargetName {
        self.target
    }

    /// The 1-based position of the running task in its target's body.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn property(&self, name: &str) -> Option<String> {
        self.properties.resolve(&PropertyRef::new(name))
    }

    pub fn log<S>(&mut self, severity: Severity, message: S)
    where
        S: Into<String>,
    {
        self.listeners.fire(LogEvent::MessageLogged {
            severity,
            message: message.into(),
            target: Some(self.target.clone()),
            task: Some(self.task.to_string()),
        });
    }
}

impl<'a> std::fmt::Debug for TaskContext<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskContext")
            .field("build_id", &self.build_id)
            .field("target", &self.target)
            .field("task", &self.task)
            .field("position", &self.position)
            .finish()
    }
}
