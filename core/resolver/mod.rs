//! # Topological Target Resolution
//!
//! Turns a list of requested target names into a linear order in which every target appears after
//! all of its dependencies. Resolution is a pure query over a `TargetGraph`: nothing is executed
//! and nothing is remembered between calls.
//!

mod depth_first;
mod error;

pub use depth_first::*;
pub use error::*;

use crate::model::{TargetGraph, TargetName};
use tracing::*;

/// Resolve the closure of `names` in `graph`.
///
/// Roots are visited in the order given, and the dependencies of every target in their declaration
/// order. A target reachable through several paths appears only once.
///
#[instrument(name = "resolver::resolve", skip(graph))]
pub fn resolve<N>(graph: &TargetGraph, names: &[N]) -> Result<Vec<TargetName>, ResolverError>
where
    N: AsRef<str> + std::fmt::Debug,
{
    let order = Resolver::new(graph).resolve(names)?;
    debug!(
        "Build sequence for target(s) {} is {:?}",
        names
            .iter()
            .map(|n| format!("`{}'", n.as_ref()))
            .collect::<Vec<String>>()
            .join(", "),
        order
    );
    Ok(order)
}
