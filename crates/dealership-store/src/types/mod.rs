//! Enumerations and value types shared by the models and repositories.

mod catalog_kind;
mod outcome;
mod ownership;
mod user_role;

pub use catalog_kind::CatalogKind;
pub use outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};
pub use ownership::HasOwner;
pub use user_role::UserRole;
