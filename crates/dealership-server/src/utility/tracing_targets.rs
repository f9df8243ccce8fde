//! Centralized tracing target constants for structured logging.
//!
//! Handlers declare their own `TRACING_TARGET`. The targets below are shared
//! by the middleware and services so logs can be filtered per concern.

/// Bearer token extraction and verification.
pub const TRACING_TARGET_AUTHENTICATION: &str = "dealership_server::authentication";

/// Role and ownership checks.
pub const TRACING_TARGET_AUTHORIZATION: &str = "dealership_server::authorization";

/// Error recovery including middleware errors and request timeouts.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "dealership_server::recovery::error";

/// Panic recovery including handler panics.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "dealership_server::recovery::panic";

/// Token signing and verification.
pub const TRACING_TARGET_TOKEN_CODEC: &str = "dealership_server::token_codec";

/// Service state assembly and shutdown.
pub const TRACING_TARGET_SERVICE_STATE: &str = "dealership_server::service_state";
