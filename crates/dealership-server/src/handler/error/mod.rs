//! [`Error`], [`ErrorKind`] and [`Result`].

mod http_error;
mod policy_error;
mod service_error;
mod store_error;
mod token_error;

pub use http_error::{Error, ErrorKind, Result};
