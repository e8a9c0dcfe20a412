//! # The Target Graph model
//!
//! Targets are stored in a single arena owned by the `TargetGraph` and refer to each other only by
//! `TargetName`. Nothing in here knows how to run anything: task bodies are opaque
//! `TaskDescriptor`s handed to us by whoever loaded the graph.
//!

mod build_id;
mod graph;
mod properties;
mod target;
mod target_name;
mod task;

pub use build_id::*;
pub use graph::*;
pub use properties::*;
pub use target::*;
pub use target_name::*;
pub use task::*;
