use super::event::*;
use super::Listener;
use tracing::*;

/// Forwards build events to `tracing`.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl TracingListener {
    pub fn new() -> Self {
        Self
    }
}

impl Listener for TracingListener {
    fn on_build_event(&mut self, event: &BuildEvent) {
        match event {
            BuildEvent::BuildStarted {
                build_id,
                targets,
                keep_going,
            } => info!(%build_id, ?targets, keep_going, "build started"),
            BuildEvent::BuildFinished {
                build_id,
                status,
                attempted,
                failures,
                duration,
                total_duration,
            } if failures.is_empty() => {
                info!(%build_id, ?status, attempted, ?duration, ?total_duration, "build finished")
            }
            BuildEvent::BuildFinished {
                build_id,
                status,
                attempted,
                failures,
                duration,
                total_duration,
            } => error!(
                %build_id,
                ?status,
                attempted,
                ?failures,
                ?duration,
                ?total_duration,
                "build finished"
            ),
        }
    }

    fn on_target_event(&mut self, event: &TargetEvent) {
        match event {
            TargetEvent::TargetStarted { target } => debug!(%target, "target started"),
            TargetEvent::TargetFinished {
                target,
                outcome,
                error: Some(error),
            } => error!(%target, ?outcome, %error, "target finished"),
            TargetEvent::TargetFinished {
                target, outcome, ..
            } => debug!(%target, ?outcome, "target finished"),
        }
    }

    fn on_task_event(&mut self, event: &TaskEvent) {
        match event {
            TaskEvent::TaskStarted {
                target,
                task,
                position,
            } => trace!(%target, %task, position, "task started"),
            TaskEvent::TaskFinished {
                target,
                task,
                position,
                error: Some(error),
            } => error!(%target, %task, position, %error, "task failed"),
            TaskEvent::TaskFinished {
                target,
                task,
                position,
                ..
            } => trace!(%target, %task, position, "task finished"),
        }
    }

    fn on_log_event(&mut self, event: &LogEvent) {
        let LogEvent::MessageLogged {
            severity,
            message,
            target,
            ..
        } = event;
        let target = target.as_ref().map(|t| t.as_str()).unwrap_or_default();
        match severity {
            Severity::Error => error!(target_name = target, "{}", message),
            Severity::Warn => warn!(target_name = target, "{}", message),
            Severity::Info => info!(target_name = target, "{}", message),
            Severity::Verbose => debug!(target_name = target, "{}", message),
            Severity::Debug => trace!(target_name = target, "{}", message),
        }
    }
}
