// ABOUTME: Item type definitions
// ABOUTME: Purchasable pieces inside a collection, with list-valued media and sizing columns

use std::fmt;
use std::str::FromStr;

use atelier_core::ValidationError;
use atelier_storage::{Field, ListInput, Record, SortKey, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::columns;
use crate::patch::double_option;

/// Product line an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Bridal,
    Boutique,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bridal => "BRIDAL",
            Category::Boutique => "BOUTIQUE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BRIDAL" => Ok(Category::Bridal),
            "BOUTIQUE" => Ok(Category::Boutique),
            _ => Err(ValidationError::invalid("category", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub images: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub fabric: Option<String>,
    pub fabric_composition: Option<String>,
    pub category: Option<Category>,
    pub is_available: bool,
    pub likes_count: i64,
    pub collection_id: String,
    /// Name of the owning collection
    pub collection_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub enum ItemField {
    Name,
    Slug,
    Description,
    Price,
    Images,
    Colors,
    Sizes,
    Fabric,
    FabricComposition,
    Category,
    IsAvailable,
    LikesCount,
    CollectionId,
    SearchKey,
}

impl Field for ItemField {
    fn column(self) -> &'static str {
        match self {
            ItemField::Name => "name",
            ItemField::Slug => "slug",
            ItemField::Description => "description",
            ItemField::Price => "price",
            ItemField::Images => "images",
            ItemField::Colors => "colors",
            ItemField::Sizes => "sizes",
            ItemField::Fabric => "fabric",
            ItemField::FabricComposition => "fabric_composition",
            ItemField::Category => "category",
            ItemField::IsAvailable => "is_available",
            ItemField::LikesCount => "likes_count",
            ItemField::CollectionId => "collection_id",
            ItemField::SearchKey => "search_key",
        }
    }
}

impl Record for Item {
    type Field = ItemField;

    const TABLE: &'static str = "items";
    const ENTITY: &'static str = "Item";
    const SELECT: &'static str = r#"
        SELECT items.*,
            (SELECT collections.name FROM collections WHERE collections.id = items.collection_id) AS collection_name
        FROM items"#;
    const DEFAULT_ORDER: &'static [SortKey] = &[SortKey::asc("name")];

    fn from_row(row: &SqliteRow) -> StorageResult<Self> {
        let category: Option<String> = row.try_get("category").map_err(StorageError::Sqlx)?;
        let category = category
            .map(|c| c.parse::<Category>())
            .transpose()
            .map_err(|e| StorageError::Decode(e.to_string()))?;

        Ok(Item {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            name: row.try_get("name").map_err(StorageError::Sqlx)?,
            slug: row.try_get("slug").map_err(StorageError::Sqlx)?,
            description: row.try_get("description").map_err(StorageError::Sqlx)?,
            price: columns::price(row, "price")?,
            images: columns::list(row, "images")?,
            colors: columns::list(row, "colors")?,
            sizes: columns::list(row, "sizes")?,
            fabric: row.try_get("fabric").map_err(StorageError::Sqlx)?,
            fabric_composition: row.try_get("fabric_composition").map_err(StorageError::Sqlx)?,
            category,
            is_available: row.try_get("is_available").map_err(StorageError::Sqlx)?,
            likes_count: row.try_get("likes_count").map_err(StorageError::Sqlx)?,
            collection_id: row.try_get("collection_id").map_err(StorageError::Sqlx)?,
            collection_name: row.try_get("collection_name").map_err(StorageError::Sqlx)?,
            created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
            updated_at: row.try_get("updated_at").map_err(StorageError::Sqlx)?,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemCreateInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub images: Option<ListInput>,
    #[serde(default)]
    pub colors: Option<ListInput>,
    #[serde(default)]
    pub sizes: Option<ListInput>,
    #[serde(default)]
    pub fabric: Option<String>,
    #[serde(default)]
    pub fabric_composition: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub collection_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemUpdateInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price: Option<Decimal>,
    /// `null` or an empty list clears the column
    #[serde(default, deserialize_with = "double_option")]
    pub images: Option<Option<ListInput>>,
    #[serde(default, deserialize_with = "double_option")]
    pub colors: Option<Option<ListInput>>,
    #[serde(default, deserialize_with = "double_option")]
    pub sizes: Option<Option<ListInput>>,
    #[serde(default, deserialize_with = "double_option")]
    pub fabric: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub fabric_composition: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<Category>>,
    #[serde(default)]
    pub is_available: Option<bool>,
    #[serde(default)]
    pub collection_id: Option<String>,
}

/// Query filters for listing items
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemListFilter {
    #[serde(default)]
    pub available_only: bool,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("bridal".parse::<Category>().unwrap(), Category::Bridal);
        assert_eq!(" BOUTIQUE ".parse::<Category>().unwrap(), Category::Boutique);
        assert!("evening".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde() {
        assert_eq!(serde_json::to_string(&Category::Bridal).unwrap(), r#""BRIDAL""#);
        let parsed: Category = serde_json::from_str(r#""BOUTIQUE""#).unwrap();
        assert_eq!(parsed, Category::Boutique);
    }

    #[test]
    fn test_update_input_distinguishes_null() {
        let input: ItemUpdateInput =
            serde_json::from_str(r#"{"colors": null, "price": "12.50"}"#).unwrap();

        assert_eq!(input.colors, Some(None));
        assert!(input.sizes.is_none());
        assert_eq!(input.price, Some(Decimal::new(1250, 2)));
    }
}
