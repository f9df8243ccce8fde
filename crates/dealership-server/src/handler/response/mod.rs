//! Response types for HTTP handlers.

mod error_response;
mod outcomes;
mod records;
mod tokens;

pub use error_response::ErrorResponse;
pub use outcomes::*;
pub use records::*;
pub use tokens::*;
