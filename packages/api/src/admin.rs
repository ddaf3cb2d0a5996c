// ABOUTME: Administrative scaffolding for the catalog
// ABOUTME: Declarative view descriptors per entity and form-encoded create endpoints

use std::str::FromStr;

use atelier_catalog::{CatalogError, Category, DbState, ItemCreateInput, PackageCreateInput};
use atelier_core::ValidationError;
use atelier_storage::ListInput;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Form,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::response::{ApiError, ApiResponse};

/// How an admin UI should render a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    /// A list column edited as newline-delimited text
    ListTextArea,
    Integer,
    Decimal,
    Boolean,
    Choice,
    Relation,
    Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> AdminField {
    AdminField {
        name,
        label,
        kind,
        help_text: None,
    }
}

const fn list_field(name: &'static str, label: &'static str, help_text: &'static str) -> AdminField {
    AdminField {
        name,
        label,
        kind: FieldKind::ListTextArea,
        help_text: Some(help_text),
    }
}

/// Admin view descriptor for one entity
#[derive(Debug, Clone, Serialize)]
pub struct AdminView {
    pub identity: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub group: &'static str,
    pub fields: &'static [AdminField],
    pub searchable_fields: &'static [&'static str],
    pub sortable_fields: &'static [&'static str],
}

impl AdminView {
    /// Names of the fields edited as newline-delimited lists
    pub fn list_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.kind == FieldKind::ListTextArea)
            .map(|f| f.name)
            .collect()
    }
}

const PRODUCT_GROUP: &str = "Product Management";
const MARKETING_GROUP: &str = "Marketing";

pub static ADMIN_VIEWS: &[AdminView] = &[
    AdminView {
        identity: "suites",
        label: "Suites",
        icon: "fa fa-building",
        group: PRODUCT_GROUP,
        fields: &[
            field("id", "ID", FieldKind::Text),
            field("name", "Name", FieldKind::Text),
            field("slug", "Slug", FieldKind::Text),
            field("description", "Description", FieldKind::TextArea),
            field("is_active", "Active", FieldKind::Boolean),
            field("created_at", "Created", FieldKind::Timestamp),
            field("updated_at", "Updated", FieldKind::Timestamp),
        ],
        searchable_fields: &["name", "description"],
        sortable_fields: &["name", "created_at"],
    },
    AdminView {
        identity: "collections",
        label: "Collections",
        icon: "fa fa-folder",
        group: PRODUCT_GROUP,
        fields: &[
            field("id", "ID", FieldKind::Text),
            field("name", "Name", FieldKind::Text),
            field("slug", "Slug", FieldKind::Text),
            field("description", "Description", FieldKind::TextArea),
            field("image", "Image URL", FieldKind::Text),
            field("suite_id", "Suite", FieldKind::Relation),
            field("is_active", "Active", FieldKind::Boolean),
            field("display_order", "Display order", FieldKind::Integer),
            field("created_at", "Created", FieldKind::Timestamp),
            field("updated_at", "Updated", FieldKind::Timestamp),
        ],
        searchable_fields: &["name", "description"],
        sortable_fields: &["name", "display_order", "created_at"],
    },
    AdminView {
        identity: "items",
        label: "Items",
        icon: "fa fa-shirt",
        group: PRODUCT_GROUP,
        fields: &[
            field("id", "ID", FieldKind::Text),
            field("name", "Name", FieldKind::Text),
            field("slug", "Slug", FieldKind::Text),
            field("description", "Description", FieldKind::TextArea),
            field("price", "Price", FieldKind::Decimal),
            list_field("images", "Image URLs", "Enter image URLs, one per line"),
            list_field("colors", "Available Colors", "Enter available colors, one per line"),
            list_field("sizes", "Available Sizes", "Enter available sizes, one per line"),
            field("fabric", "Fabric", FieldKind::Text),
            field("fabric_composition", "Fabric composition", FieldKind::Text),
            field("category", "Category", FieldKind::Choice),
            field("is_available", "Available", FieldKind::Boolean),
            field("likes_count", "Likes", FieldKind::Integer),
            field("collection_id", "Collection", FieldKind::Relation),
            field("created_at", "Created", FieldKind::Timestamp),
            field("updated_at", "Updated", FieldKind::Timestamp),
        ],
        searchable_fields: &["name", "description", "fabric", "fabric_composition"],
        sortable_fields: &["name", "price", "created_at", "updated_at"],
    },
    AdminView {
        identity: "packages",
        label: "Packages",
        icon: "fa fa-box",
        group: MARKETING_GROUP,
        fields: &[
            field("id", "ID", FieldKind::Text),
            field("name", "Name", FieldKind::Text),
            field("slug", "Slug", FieldKind::Text),
            field("price", "Price", FieldKind::Decimal),
            field("description", "Description", FieldKind::TextArea),
            list_field("features", "Features", "Enter package features, one per line"),
            field("pdf_url", "Brochure PDF URL", FieldKind::Text),
            field("is_active", "Active", FieldKind::Boolean),
            field("is_popular", "Popular", FieldKind::Boolean),
            field("display_order", "Display order", FieldKind::Integer),
            field("created_at", "Created", FieldKind::Timestamp),
            field("updated_at", "Updated", FieldKind::Timestamp),
        ],
        searchable_fields: &["name", "description"],
        sortable_fields: &["name", "price", "display_order", "created_at"],
    },
    AdminView {
        identity: "testimonials",
        label: "Testimonials",
        icon: "fa fa-quote-left",
        group: MARKETING_GROUP,
        fields: &[
            field("id", "ID", FieldKind::Text),
            field("client_name", "Client", FieldKind::Text),
            field("review_text", "Review", FieldKind::TextArea),
            field("rating", "Rating", FieldKind::Integer),
            field("display_order", "Display order", FieldKind::Integer),
            field("created_at", "Created", FieldKind::Timestamp),
            field("updated_at", "Updated", FieldKind::Timestamp),
        ],
        searchable_fields: &["client_name", "review_text"],
        sortable_fields: &["client_name", "rating", "display_order", "created_at"],
    },
];

pub fn find_view(identity: &str) -> Option<&'static AdminView> {
    ADMIN_VIEWS.iter().find(|view| view.identity == identity)
}

/// List every admin view descriptor
pub async fn list_views() -> impl IntoResponse {
    (StatusCode::OK, ResponseJson(ApiResponse::success(ADMIN_VIEWS))).into_response()
}

/// Get one admin view descriptor by identity
pub async fn get_view(Path(identity): Path<String>) -> impl IntoResponse {
    match find_view(&identity) {
        Some(view) => (StatusCode::OK, ResponseJson(ApiResponse::success(view))).into_response(),
        None => ApiError::not_found("Admin view", identity).into_response(),
    }
}

// HTML forms send every input as text, with blank strings for untouched fields

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Checkbox semantics: absent means false
fn checkbox(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("on" | "true" | "1" | "yes")
    )
}

fn parse_price(raw: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(raw.trim()).map_err(|_| ValidationError::invalid("price", raw))
}

fn parse_display_order(raw: Option<String>) -> Result<i64, ValidationError> {
    match non_blank(raw) {
        Some(value) => value
            .parse::<i64>()
            .map_err(|_| ValidationError::invalid("display_order", value)),
        None => Ok(0),
    }
}

#[derive(Debug, Deserialize)]
pub struct PackageForm {
    pub name: String,
    pub price: String,
    pub description: Option<String>,
    /// Newline-delimited features
    pub features: Option<String>,
    pub pdf_url: Option<String>,
    pub is_active: Option<String>,
    pub is_popular: Option<String>,
    pub display_order: Option<String>,
}

impl PackageForm {
    pub fn into_input(self) -> Result<PackageCreateInput, ValidationError> {
        Ok(PackageCreateInput {
            name: self.name,
            price: parse_price(&self.price)?,
            description: non_blank(self.description),
            features: self.features.map(ListInput::Text),
            pdf_url: non_blank(self.pdf_url),
            is_active: checkbox(self.is_active.as_deref()),
            is_popular: checkbox(self.is_popular.as_deref()),
            display_order: parse_display_order(self.display_order)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ItemForm {
    pub name: String,
    pub price: String,
    pub description: Option<String>,
    /// Newline-delimited image URLs
    pub images: Option<String>,
    pub colors: Option<String>,
    pub sizes: Option<String>,
    pub fabric: Option<String>,
    pub fabric_composition: Option<String>,
    pub category: Option<String>,
    pub is_available: Option<String>,
    pub collection_id: String,
}

impl ItemForm {
    pub fn into_input(self) -> Result<ItemCreateInput, ValidationError> {
        let category = non_blank(self.category)
            .map(|c| Category::from_str(&c))
            .transpose()?;

        Ok(ItemCreateInput {
            name: self.name,
            description: non_blank(self.description),
            price: parse_price(&self.price)?,
            images: self.images.map(ListInput::Text),
            colors: self.colors.map(ListInput::Text),
            sizes: self.sizes.map(ListInput::Text),
            fabric: non_blank(self.fabric),
            fabric_composition: non_blank(self.fabric_composition),
            category,
            is_available: checkbox(self.is_available.as_deref()),
            collection_id: self.collection_id,
        })
    }
}

/// Create a package from an admin form submission
pub async fn create_package_form(
    State(db): State<DbState>,
    Form(form): Form<PackageForm>,
) -> impl IntoResponse {
    info!("Admin creating package: {}", form.name);

    let input = match form.into_input() {
        Ok(input) => input,
        Err(e) => return ApiError::from(CatalogError::from(e)).into_response(),
    };

    match db.package_storage.create(input).await {
        Ok(package) => {
            (StatusCode::CREATED, ResponseJson(ApiResponse::success(package))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Create an item from an admin form submission
pub async fn create_item_form(
    State(db): State<DbState>,
    Form(form): Form<ItemForm>,
) -> impl IntoResponse {
    info!("Admin creating item: {}", form.name);

    let input = match form.into_input() {
        Ok(input) => input,
        Err(e) => return ApiError::from(CatalogError::from(e)).into_response(),
    };

    match db.item_storage.create(input).await {
        Ok(item) => (StatusCode::CREATED, ResponseJson(ApiResponse::success(item))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_view() {
        let view = find_view("items").unwrap();
        assert_eq!(view.label, "Items");
        assert_eq!(view.list_fields(), vec!["images", "colors", "sizes"]);
        assert!(find_view("users").is_none());
    }

    #[test]
    fn test_every_view_has_unique_identity() {
        let mut identities: Vec<_> = ADMIN_VIEWS.iter().map(|v| v.identity).collect();
        identities.sort();
        identities.dedup();
        assert_eq!(identities.len(), ADMIN_VIEWS.len());
    }

    #[test]
    fn test_checkbox_values() {
        assert!(checkbox(Some("on")));
        assert!(checkbox(Some("TRUE")));
        assert!(!checkbox(Some("")));
        assert!(!checkbox(None));
    }

    #[test]
    fn test_package_form_conversion() {
        let form = PackageForm {
            name: "Gold".to_string(),
            price: " 1200.50 ".to_string(),
            description: Some("   ".to_string()),
            features: Some("Fitting\nSteaming".to_string()),
            pdf_url: None,
            is_active: Some("on".to_string()),
            is_popular: None,
            display_order: Some("".to_string()),
        };

        let input = form.into_input().unwrap();
        assert_eq!(input.price, Decimal::new(120050, 2));
        assert!(input.description.is_none());
        assert_eq!(input.features, Some(ListInput::Text("Fitting\nSteaming".to_string())));
        assert!(input.is_active);
        assert!(!input.is_popular);
        assert_eq!(input.display_order, 0);
    }

    #[test]
    fn test_item_form_rejects_bad_price_and_category() {
        let form = ItemForm {
            name: "Gown".to_string(),
            price: "cheap".to_string(),
            description: None,
            images: None,
            colors: None,
            sizes: None,
            fabric: None,
            fabric_composition: None,
            category: None,
            is_available: None,
            collection_id: "c".to_string(),
        };
        assert!(form.into_input().is_err());

        let form = ItemForm {
            name: "Gown".to_string(),
            price: "10".to_string(),
            description: None,
            images: None,
            colors: None,
            sizes: None,
            fabric: None,
            fabric_composition: None,
            category: Some("evening".to_string()),
            is_available: None,
            collection_id: "c".to_string(),
        };
        assert!(form.into_input().is_err());
    }
}
