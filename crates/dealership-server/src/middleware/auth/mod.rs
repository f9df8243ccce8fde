//! Authentication and authorization gates.

mod authenticate;
mod gate;
mod require_admin;

pub use authenticate::Authenticate;
pub use gate::{Gate, GatePipeline, PipelineState, RouterGateExt, run_pipeline};
pub use require_admin::RequireAdmin;
