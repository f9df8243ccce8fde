//! Catalog repository for categories, products and shop items.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use crate::model::{CatalogDocument, Document, NewCatalogDocument};
use crate::types::{CatalogKind, DeleteOutcome, UpdateOutcome};
use crate::{PgClient, StoreResult, schema};

/// Repository for catalog documents.
#[async_trait::async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Lists every document of a catalog, oldest first.
    async fn list_documents(&self, kind: CatalogKind) -> StoreResult<Vec<CatalogDocument>>;

    /// Finds a document by identifier.
    async fn find_document(
        &self,
        kind: CatalogKind,
        document_id: Uuid,
    ) -> StoreResult<Option<CatalogDocument>>;

    /// Inserts a document.
    async fn create_document(
        &self,
        kind: CatalogKind,
        new_document: NewCatalogDocument,
    ) -> StoreResult<CatalogDocument>;

    /// Merges fields into a document.
    async fn merge_document(
        &self,
        kind: CatalogKind,
        document_id: Uuid,
        fields: Document,
    ) -> StoreResult<UpdateOutcome>;

    /// Permanently deletes a document.
    async fn delete_document(
        &self,
        kind: CatalogKind,
        document_id: Uuid,
    ) -> StoreResult<DeleteOutcome>;
}

/// Runs `$body` with `$table` bound to the schema module of `$kind`.
///
/// The catalog tables share their columns but are distinct diesel types.
macro_rules! with_catalog_table {
    ($kind:expr, $table:ident => $body:expr) => {
        match $kind {
            CatalogKind::Category => {
                use schema::categories as $table;
                $body
            }
            CatalogKind::Product => {
                use schema::products as $table;
                $body
            }
            CatalogKind::ShopItem => {
                use schema::shop_items as $table;
                $body
            }
        }
    };
}

#[async_trait::async_trait]
impl CatalogRepository for PgClient {
    async fn list_documents(&self, kind: CatalogKind) -> StoreResult<Vec<CatalogDocument>> {
        let mut conn = self.get_connection().await?;
        let documents = with_catalog_table!(kind, t => {
            t::table
                .select((t::id, t::document, t::created_at, t::updated_at))
                .order(t::created_at.asc())
                .load::<CatalogDocument>(&mut *conn)
                .await?
        });

        Ok(documents)
    }

    async fn find_document(
        &self,
        kind: CatalogKind,
        document_id: Uuid,
    ) -> StoreResult<Option<CatalogDocument>> {
        let mut conn = self.get_connection().await?;
        let document = with_catalog_table!(kind, t => {
            t::table
                .filter(t::id.eq(document_id))
                .select((t::id, t::document, t::created_at, t::updated_at))
                .first::<CatalogDocument>(&mut *conn)
                .await
                .optional()?
        });

        Ok(document)
    }

    async fn create_document(
        &self,
        kind: CatalogKind,
        new_document: NewCatalogDocument,
    ) -> StoreResult<CatalogDocument> {
        let mut conn = self.get_connection().await?;
        let document = with_catalog_table!(kind, t => {
            diesel::insert_into(t::table)
                .values((
                    t::id.eq(new_document.id),
                    t::document.eq(new_document.document),
                ))
                .returning((t::id, t::document, t::created_at, t::updated_at))
                .get_result::<CatalogDocument>(&mut *conn)
                .await?
        });

        Ok(document)
    }

    async fn merge_document(
        &self,
        kind: CatalogKind,
        document_id: Uuid,
        fields: Document,
    ) -> StoreResult<UpdateOutcome> {
        let mut conn = self.get_connection().await?;
        let now = Timestamp::from(jiff::Timestamp::now());
        let affected = with_catalog_table!(kind, t => {
            diesel::update(t::table.filter(t::id.eq(document_id)))
                .set((
                    t::document.eq(t::document.concat(Value::Object(fields))),
                    t::updated_at.eq(now),
                ))
                .execute(&mut *conn)
                .await?
        });

        Ok(UpdateOutcome::from_affected(affected))
    }

    async fn delete_document(
        &self,
        kind: CatalogKind,
        document_id: Uuid,
    ) -> StoreResult<DeleteOutcome> {
        let mut conn = self.get_connection().await?;
        let affected = with_catalog_table!(kind, t => {
            diesel::delete(t::table.filter(t::id.eq(document_id)))
                .execute(&mut *conn)
                .await?
        });

        Ok(DeleteOutcome::from_affected(affected))
    }
}
