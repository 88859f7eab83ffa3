//! Feature and target construction for the per-horizon models.

pub mod dataset;
pub mod features;
pub mod targets;

pub use dataset::*;
pub use features::*;
pub use targets::*;
