//! Ownership policy violation to HTTP error conversion.

use crate::handler::{Error, ErrorKind};
use crate::service::PolicyError;
use crate::utility::TRACING_TARGET_AUTHORIZATION as TRACING_TARGET;

impl From<PolicyError> for Error<'static> {
    fn from(error: PolicyError) -> Self {
        tracing::debug!(target: TRACING_TARGET, error = %error, "ownership policy denied request");

        match error {
            PolicyError::EmptyOwner => ErrorKind::BadRequest.with_message(error.to_string()),
            PolicyError::NotOwner => ErrorKind::Forbidden.into_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_errors_map_to_status() {
        assert_eq!(Error::from(PolicyError::EmptyOwner).kind(), ErrorKind::BadRequest);
        assert_eq!(Error::from(PolicyError::NotOwner).kind(), ErrorKind::Forbidden);
    }
}
