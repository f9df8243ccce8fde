//! Request types for HTTP handlers.

mod carts;
mod paths;
mod tickets;
mod users;

pub use carts::*;
pub use paths::*;
pub use tickets::*;
pub use users::*;
