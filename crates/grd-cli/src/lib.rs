//! CLI library components for the discharge dataset tools.

pub mod logging;
pub mod summary;
