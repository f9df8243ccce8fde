//! Store failure to HTTP error conversion.

use dealership_store::StoreError;

use crate::handler::{Error, ErrorKind};

/// Tracing target for store failures surfaced to clients.
const TRACING_TARGET: &str = "dealership_server::handler::store";

impl From<StoreError> for Error<'static> {
    fn from(error: StoreError) -> Self {
        match &error {
            StoreError::Timeout(timeout) => {
                tracing::error!(target: TRACING_TARGET, timeout = ?timeout, "store operation timed out");
            }
            StoreError::Connection(_) => {
                tracing::error!(target: TRACING_TARGET, error = %error, "store connection failed");
            }
            _ => {
                tracing::error!(target: TRACING_TARGET, error = %error, "store operation failed");
            }
        }

        ErrorKind::InternalServerError.with_error(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_are_internal_with_detail() {
        let error = Error::from(StoreError::Unexpected("disk on fire".into()));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.error(), Some("Unexpected error: disk on fire"));
    }
}
