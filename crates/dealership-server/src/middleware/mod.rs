//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Gates: bearer authentication and administrator authorization, composed
//!   into per-route pipelines.
//! - Security: CORS for the storefront frontend.
//! - Observability: request IDs and request tracing.
//! - Recovery: panics, timeouts and tower errors become error responses.
//!
//! ```rust,ignore
//! use dealership_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt,
//!     RouterSecurityExt,
//! };
//!
//! let app = router
//!     .with_security(&CorsConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod auth;
mod observability;
mod recovery;
mod security;

pub use auth::{
    Authenticate, Gate, GatePipeline, PipelineState, RequireAdmin, RouterGateExt, run_pipeline,
};
pub use observability::{REQUEST_ID_HEADER, RouterObservabilityExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, RouterSecurityExt};
