//! # Build Events
//!
//! None of these events include references to the graph or to any task, and they are all
//! self-contained with primitives that make them easy to print, record, or ship somewhere else.
//!
//! Events are fired synchronously, on the thread running the build, into every registered
//! `Listener`. For any target that is attempted, exactly one `TargetStarted` is followed by
//! exactly one `TargetFinished`, and the `TaskStarted`/`TaskFinished` pairs of its body are nested
//! in between.
//!
mod channel;
pub mod event;
mod listener;
mod tracing_listener;

pub use channel::*;
pub use listener::*;
pub use tracing_listener::*;
