//! Repository traits and their Postgres implementations.
//!
//! Every backend implements the four repositories plus [`Store`]. Services
//! hold the backend as a [`SharedStore`] so the concrete type is chosen once
//! at startup.

mod cart;
mod catalog;
mod ticket;
mod user;

use std::sync::Arc;

pub use cart::CartRepository;
pub use catalog::CatalogRepository;
pub use ticket::TicketRepository;
pub use user::UserRepository;

use crate::PgClient;

/// A complete store backend.
#[async_trait::async_trait]
pub trait Store:
    UserRepository + TicketRepository + CatalogRepository + CartRepository + 'static
{
    /// Short backend name used in logs.
    fn backend(&self) -> &'static str;

    /// Releases the backend's resources.
    ///
    /// Operations issued after closing fail or see an empty store.
    async fn close(&self);
}

/// Type-erased, cheaply clonable store handle.
pub type SharedStore = Arc<dyn Store>;

#[async_trait::async_trait]
impl Store for PgClient {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn close(&self) {
        PgClient::close(self);
    }
}
