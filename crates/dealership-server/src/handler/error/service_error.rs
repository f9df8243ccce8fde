//! Service error to HTTP error conversion.

use crate::handler::{Error as HttpError, ErrorKind};
use crate::{Error, ErrorKind as ServiceErrorKind};

/// Tracing target for service error conversions.
const TRACING_TARGET: &str = "dealership_server::handler::service";

impl From<Error> for HttpError<'static> {
    fn from(error: Error) -> Self {
        match error.kind() {
            ServiceErrorKind::Config => {
                tracing::error!(target: TRACING_TARGET, error = %error, "invalid service configuration");
            }
            _ => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = %error.kind(),
                    "service operation failed"
                );
            }
        }

        ErrorKind::InternalServerError.with_error(error.message().to_owned())
    }
}
