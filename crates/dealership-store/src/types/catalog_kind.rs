//! Catalog collections sharing the `{id, document}` shape.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Selects one of the catalog tables.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CatalogKind {
    /// Product categories, the only catalog with public writes.
    Category,
    /// Vehicles and parts listed for sale.
    Product,
    /// Items shown in the storefront.
    ShopItem,
}
