//! Request extractors.
//!
//! - [`Identity`] reads the claims attached by the authentication gate.
//! - [`Caller`] adds the caller's role from the user directory.
//! - [`Json`], [`Path`] and [`Query`] wrap the axum extractors so that
//!   rejections use the standard error body.
//!
//! [`Caller`]: crate::service::Caller

mod caller;
mod identity;
pub mod reject;

pub use crate::extract::identity::Identity;
pub use crate::extract::reject::{Json, Path, Query};
pub use crate::service::Caller;
