use crate::model::TargetName;
use fxhash::FxHashSet;

/// The set of targets an executor has already seen attempted, and which of those failed.
///
#[derive(Debug, Default, Clone)]
pub struct ExecutorState {
    executed: FxHashSet<TargetName>,
    failed: Vec<TargetName>,
}

impl ExecutorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_executed(&self, target: &str) -> bool {
        self.executed.contains(target)
    }

    pub fn mark_executed(&mut self, target: &TargetName) {
        self.executed.insert(target.clone());
    }

    /// Remember that `target` was attempted and did not complete.
    pub fn mark_failed(&mut self, target: &TargetName) {
        self.executed.insert(target.clone());
        if !self.failed.contains(target) {
            self.failed.push(target.clone());
        }
    }

    /// Failed targets, in the order they failed.
    pub fn failed(&self) -> &[TargetName] {
        &self.failed
    }

    pub fn clear(&mut self) {
        self.executed.clear();
        self.failed.clear();
    }

    pub fn len(&self) -> usize {
        self.executed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executed.is_empty()
    }
}
