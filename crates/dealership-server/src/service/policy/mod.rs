//! Authorization policies.
//!
//! The ownership policy decides whether a caller may act on a record owned
//! by some email, and how ticket listings and creations are scoped.

mod ownership;

pub use ownership::{Caller, PolicyError};
