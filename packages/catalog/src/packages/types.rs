// ABOUTME: Package type definitions
// ABOUTME: Priced service bundles with a feature list and an optional brochure link

use atelier_storage::{Field, ListInput, Record, SortKey, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::columns;
use crate::patch::double_option;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub pdf_url: Option<String>,
    /// Public brochure link, mirrors `pdf_url`
    #[serde(default)]
    pub download_link: Option<String>,
    pub is_active: bool,
    pub is_popular: bool,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub enum PackageField {
    Name,
    Slug,
    Price,
    Description,
    Features,
    PdfUrl,
    IsActive,
    IsPopular,
    DisplayOrder,
    SearchKey,
}

impl Field for PackageField {
    fn column(self) -> &'static str {
        match self {
            PackageField::Name => "name",
            PackageField::Slug => "slug",
            PackageField::Price => "price",
            PackageField::Description => "description",
            PackageField::Features => "features",
            PackageField::PdfUrl => "pdf_url",
            PackageField::IsActive => "is_active",
            PackageField::IsPopular => "is_popular",
            PackageField::DisplayOrder => "display_order",
            PackageField::SearchKey => "search_key",
        }
    }
}

impl Record for Package {
    type Field = PackageField;

    const TABLE: &'static str = "packages";
    const ENTITY: &'static str = "Package";
    const SELECT: &'static str = "SELECT * FROM packages";
    const DEFAULT_ORDER: &'static [SortKey] = &[SortKey::asc("display_order"), SortKey::asc("name")];

    fn from_row(row: &SqliteRow) -> StorageResult<Self> {
        let pdf_url: Option<String> = row.try_get("pdf_url").map_err(StorageError::Sqlx)?;

        Ok(Package {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            name: row.try_get("name").map_err(StorageError::Sqlx)?,
            slug: row.try_get("slug").map_err(StorageError::Sqlx)?,
            price: columns::price(row, "price")?,
            description: row.try_get("description").map_err(StorageError::Sqlx)?,
            features: columns::list(row, "features")?,
            download_link: pdf_url.clone(),
            pdf_url,
            is_active: row.try_get("is_active").map_err(StorageError::Sqlx)?,
            is_popular: row.try_get("is_popular").map_err(StorageError::Sqlx)?,
            display_order: row.try_get("display_order").map_err(StorageError::Sqlx)?,
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
pub struct PackageCreateInput {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Option<ListInput>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub display_order: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageUpdateInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub features: Option<Option<ListInput>>,
    #[serde(default, deserialize_with = "double_option")]
    pub pdf_url: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_popular: Option<bool>,
    #[serde(default)]
    pub display_order: Option<i64>,
}

/// Query filters for listing packages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageListFilter {
    #[serde(default)]
    pub active_only: bool,
    #[serde(default)]
    pub popular_only: bool,
}
