//! # Anvil Core
//!
//! The flow begins by building a `TargetGraph` (usually from a build file parsed outside of this
//! crate) and a `Config`, and using them to create a new `Engine`. From there, the `Engine` asks
//! its `Executor` for a plan, runs every planned `Target` in order, and hands back an
//! `ExecutionResult` describing what ran, what was skipped, and what failed.
//!
//! Everything the engine observes along the way is fired, synchronously, into the registered
//! `Listener`s as `Event`s.
//!

pub(crate) mod config;
pub mod engine;
pub mod events;
pub mod executor;
pub mod model;
pub mod resolver;

pub use config::*;
pub use engine::{
    AggregateFailure, BuildError, BuildStatus, Engine, ExecutionRequest, ExecutionResult,
    TaskContext, TaskExecutionError, UnmetDependency,
};
pub use executor::{ExecutorKind, ExecutorKindError};
pub use model::{
    BuildId, GraphError, Guard, GuardDecision, OnMissingExtensionPoint, Properties,
    PropertyRef, PropertyResolver, Target, TargetGraph, TargetKind, TargetName, TaskDescriptor,
};
pub use resolver::ResolverError;

#[macro_use]
extern crate derive_builder;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
