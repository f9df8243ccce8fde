//! Application state, configuration and the services handlers depend on.

mod config;
mod policy;
mod security;
mod service_state;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::policy::{Caller, PolicyError};
pub use crate::service::security::{Claims, TOKEN_LIFETIME, TokenCodec, TokenConfig, TokenError};
pub use crate::service::service_state::{RoutePolicy, ServiceState};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};
