// ABOUTME: Suite type definitions
// ABOUTME: Top-level catalog groupings that own collections

use atelier_storage::{Field, Record, SortKey, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::collections::Collection;
use crate::patch::double_option;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub enum SuiteField {
    Name,
    Slug,
    Description,
    IsActive,
}

impl Field for SuiteField {
    fn column(self) -> &'static str {
        match self {
            SuiteField::Name => "name",
            SuiteField::Slug => "slug",
            SuiteField::Description => "description",
            SuiteField::IsActive => "is_active",
        }
    }
}

impl Record for Suite {
    type Field = SuiteField;

    const TABLE: &'static str = "suites";
    const ENTITY: &'static str = "Suite";
    const SELECT: &'static str = "SELECT * FROM suites";
    const DEFAULT_ORDER: &'static [SortKey] = &[SortKey::asc("name")];

    fn from_row(row: &SqliteRow) -> StorageResult<Self> {
        Ok(Suite {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            name: row.try_get("name").map_err(StorageError::Sqlx)?,
            slug: row.try_get("slug").map_err(StorageError::Sqlx)?,
            description: row.try_get("description").map_err(StorageError::Sqlx)?,
            is_active: row.try_get("is_active").map_err(StorageError::Sqlx)?,
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
pub struct SuiteCreateInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteUpdateInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A suite together with the collections it owns
#[derive(Debug, Clone, Serialize)]
pub struct SuiteWithCollections {
    #[serde(flatten)]
    pub suite: Suite,
    pub collections: Vec<Collection>,
}
