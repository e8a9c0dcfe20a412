mod run;
mod targets;

pub use run::*;
pub use targets::*;
