// ABOUTME: Collection type definitions
// ABOUTME: Collections belong to a suite and own items

use atelier_storage::{Field, Record, SortKey, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::columns;
use crate::patch::double_option;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub display_order: i64,
    pub suite_id: String,
    /// Name of the owning suite
    pub suite_name: Option<String>,
    /// Ids of the items in this collection
    pub item_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub enum CollectionField {
    Name,
    Slug,
    Description,
    Image,
    IsActive,
    DisplayOrder,
    SuiteId,
    SearchKey,
}

impl Field for CollectionField {
    fn column(self) -> &'static str {
        match self {
            CollectionField::Name => "name",
            CollectionField::Slug => "slug",
            CollectionField::Description => "description",
            CollectionField::Image => "image",
            CollectionField::IsActive => "is_active",
            CollectionField::DisplayOrder => "display_order",
            CollectionField::SuiteId => "suite_id",
            CollectionField::SearchKey => "search_key",
        }
    }
}

impl Record for Collection {
    type Field = CollectionField;

    const TABLE: &'static str = "collections";
    const ENTITY: &'static str = "Collection";
    const SELECT: &'static str = r#"
        SELECT collections.*,
            (SELECT suites.name FROM suites WHERE suites.id = collections.suite_id) AS suite_name,
            (SELECT json_group_array(items.id) FROM items WHERE items.collection_id = collections.id) AS item_ids
        FROM collections"#;
    const DEFAULT_ORDER: &'static [SortKey] = &[SortKey::asc("display_order"), SortKey::asc("name")];

    fn from_row(row: &SqliteRow) -> StorageResult<Self> {
        Ok(Collection {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            name: row.try_get("name").map_err(StorageError::Sqlx)?,
            slug: row.try_get("slug").map_err(StorageError::Sqlx)?,
            description: row.try_get("description").map_err(StorageError::Sqlx)?,
            image: row.try_get("image").map_err(StorageError::Sqlx)?,
            is_active: row.try_get("is_active").map_err(StorageError::Sqlx)?,
            display_order: row.try_get("display_order").map_err(StorageError::Sqlx)?,
            suite_id: row.try_get("suite_id").map_err(StorageError::Sqlx)?,
            suite_name: row.try_get("suite_name").map_err(StorageError::Sqlx)?,
            item_ids: columns::list(row, "item_ids")?,
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionCreateInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i64,
    pub suite_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionUpdateInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub display_order: Option<i64>,
    #[serde(default)]
    pub suite_id: Option<String>,
}

/// Query filters for listing collections
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionListFilter {
    #[serde(default)]
    pub active_only: bool,
    #[serde(default)]
    pub search: Option<String>,
}
