//! Credential verification failure to HTTP error conversion.

use crate::handler::{Error, ErrorKind};
use crate::service::TokenError;

/// Tracing target for rejected credentials.
const TRACING_TARGET: &str = "dealership_server::handler::tokens";

impl From<TokenError> for Error<'static> {
    fn from(error: TokenError) -> Self {
        tracing::debug!(target: TRACING_TARGET, error = %error, "token rejected");
        ErrorKind::Unauthorized.into_error()
    }
}
