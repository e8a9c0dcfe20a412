//! # Executor Strategies
//!
//! An `Executor` decides which targets a request will actually attempt, and in which order. All
//! of them produce a plan up front; the `Engine` then walks the plan and tells the executor about
//! every target it attempted, so strategies that remember things across requests can do so.
//!

mod default;
mod ignore_dependencies;
mod kind;
mod single_check;
mod state;

pub use default::*;
pub use ignore_dependencies::*;
pub use kind::*;
pub use single_check::*;
pub use state::*;

use crate::model::{TargetGraph, TargetName};
use crate::resolver::ResolverError;

pub trait Executor: std::fmt::Debug {
    fn kind(&self) -> ExecutorKind;

    /// The sequence of targets to attempt for a request for `requested`.
    fn plan(
        &mut self,
        graph: &TargetGraph,
        requested: &[TargetName],
    ) -> Result<Vec<TargetName>, ResolverError>;

    /// Called by the engine every time a planned target is attempted.
    fn record(&mut self, _target: &TargetName) {}

    /// Called by the engine when an attempted target fails.
    fn record_failure(&mut self, _target: &TargetName) {}

    /// Targets that failed in an earlier request and that this executor will not plan again.
    /// Anything depending on one of them cannot run.
    fn failed(&self) -> &[TargetName] {
        &[]
    }

    /// Forget anything remembered so far. Called when a new build session starts.
    fn reset(&mut self) {}
}
