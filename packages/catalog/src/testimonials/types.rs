// ABOUTME: Testimonial type definitions
// ABOUTME: Client reviews with a bounded rating and a display order

use atelier_storage::{Field, Record, SortKey, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::patch::double_option;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub client_name: String,
    pub review_text: Option<String>,
    pub rating: i64,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub enum TestimonialField {
    ClientName,
    ReviewText,
    Rating,
    DisplayOrder,
    ClientNameKey,
    SearchKey,
}

impl Field for TestimonialField {
    fn column(self) -> &'static str {
        match self {
            TestimonialField::ClientName => "client_name",
            TestimonialField::ReviewText => "review_text",
            TestimonialField::Rating => "rating",
            TestimonialField::DisplayOrder => "display_order",
            TestimonialField::ClientNameKey => "client_name_key",
            TestimonialField::SearchKey => "search_key",
        }
    }
}

impl Record for Testimonial {
    type Field = TestimonialField;

    const TABLE: &'static str = "testimonials";
    const ENTITY: &'static str = "Testimonial";
    const SELECT: &'static str = "SELECT * FROM testimonials";
    const DEFAULT_ORDER: &'static [SortKey] = &[SortKey::asc("display_order")];

    fn from_row(row: &SqliteRow) -> StorageResult<Self> {
        Ok(Testimonial {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            client_name: row.try_get("client_name").map_err(StorageError::Sqlx)?,
            review_text: row.try_get("review_text").map_err(StorageError::Sqlx)?,
            rating: row.try_get("rating").map_err(StorageError::Sqlx)?,
            display_order: row.try_get("display_order").map_err(StorageError::Sqlx)?,
            created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
            updated_at: row.try_get("updated_at").map_err(StorageError::Sqlx)?,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialCreateInput {
    pub client_name: String,
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default)]
    pub rating: i64,
    #[serde(default)]
    pub display_order: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestimonialUpdateInput {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub review_text: Option<Option<String>>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub display_order: Option<i64>,
}

/// Query filters for listing testimonials.
///
/// `search` takes precedence over the rating range, which takes precedence
/// over plain ordering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestimonialListFilter {
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub min_rating: Option<i64>,
    #[serde(default)]
    pub max_rating: Option<i64>,
}

/// Parse an `order_by` value such as `rating` or `-created_at`.
///
/// A leading `-` sorts descending. Unknown fields fall back to ascending
/// display order.
pub fn parse_order_by(order_by: &str) -> SortKey {
    let (descending, field) = match order_by.trim().strip_prefix('-') {
        Some(field) => (true, field),
        None => (false, order_by.trim()),
    };

    let column = match field {
        "display_order" => "display_order",
        "rating" => "rating",
        "created_at" => "created_at",
        "client_name" => "client_name",
        _ => return SortKey::asc("display_order"),
    };

    if descending {
        SortKey::desc(column)
    } else {
        SortKey::asc(column)
    }
}
