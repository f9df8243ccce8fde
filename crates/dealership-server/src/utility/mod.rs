//! Crate-internal helpers.

pub(crate) mod tracing_targets;

pub(crate) use tracing_targets::*;
