// ABOUTME: Item storage layer using SQLite
// ABOUTME: CRUD for items with collection checks, list columns, filters and the like counter

use atelier_core::constants::{MAX_FABRIC_LEN, MAX_NAME_LEN};
use atelier_core::{search_key, validate_name, validate_optional_text, validate_price};
use atelier_storage::{list_codec, Assignment, Filter, PageParams, Record, Repository, SqlValue};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::types::{Category, Item, ItemCreateInput, ItemField, ItemListFilter, ItemUpdateInput};
use crate::collections::Collection;
use crate::columns;
use crate::error::{CatalogError, CatalogResult};
use crate::slug::create_with_slug;

const ENTITY: &str = "Item";

pub struct ItemStorage {
    repo: Repository<Item>,
    collections: Repository<Collection>,
}

fn category_value(category: Option<Category>) -> SqlValue {
    SqlValue::NullableText(category.map(|c| c.as_str().to_string()))
}

impl ItemStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: Repository::new(pool.clone()),
            collections: Repository::new(pool),
        }
    }

    async fn ensure_collection_exists(&self, collection_id: &str) -> CatalogResult<()> {
        let exists = self
            .collections
            .exists_where(&Filter::new().eq("id", collection_id))
            .await?;

        if !exists {
            warn!("Rejected item write for missing collection {}", collection_id);
            return Err(CatalogError::Integrity(format!(
                "Collection {} does not exist",
                collection_id
            )));
        }
        Ok(())
    }

    /// Create a new item inside an existing collection
    pub async fn create(&self, input: ItemCreateInput) -> CatalogResult<Item> {
        let name = validate_name("name", &input.name, MAX_NAME_LEN)?;
        validate_price("price", input.price)?;
        validate_optional_text("fabric", input.fabric.as_deref(), MAX_FABRIC_LEN)?;
        validate_optional_text(
            "fabric_composition",
            input.fabric_composition.as_deref(),
            MAX_NAME_LEN,
        )?;

        self.ensure_collection_exists(&input.collection_id).await?;

        debug!("Creating item: {} (collection: {})", name, input.collection_id);

        // Item names may repeat, so the slug is the only unique column
        let key = search_key([Some(name.as_str()), input.description.as_deref()]);
        let images = SqlValue::list(input.images.and_then(list_codec::normalize));
        let colors = SqlValue::list(input.colors.and_then(list_codec::normalize));
        let sizes = SqlValue::list(input.sizes.and_then(list_codec::normalize));
        let item = create_with_slug(&self.repo, &name, |slug| {
            vec![
                Assignment::new(ItemField::Name, name.as_str()),
                Assignment::new(ItemField::Slug, slug),
                Assignment::new(ItemField::Description, input.description.clone()),
                Assignment::new(ItemField::Price, columns::price_value(input.price)),
                Assignment::new(ItemField::Images, images.clone()),
                Assignment::new(ItemField::Colors, colors.clone()),
                Assignment::new(ItemField::Sizes, sizes.clone()),
                Assignment::new(ItemField::Fabric, input.fabric.clone()),
                Assignment::new(ItemField::FabricComposition, input.fabric_composition.clone()),
                Assignment::new(ItemField::Category, category_value(input.category)),
                Assignment::new(ItemField::IsAvailable, input.is_available),
                Assignment::new(ItemField::CollectionId, input.collection_id.as_str()),
                Assignment::new(ItemField::SearchKey, key.as_str()),
            ]
        })
        .await?;

        info!("Created item {} ({})", item.name, item.id);
        Ok(item)
    }

    /// Get an item with its collection name
    pub async fn get(&self, item_id: &str) -> CatalogResult<Item> {
        self.repo
            .get(item_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, item_id))
    }

    pub async fn get_by_slug(&self, slug: &str) -> CatalogResult<Option<Item>> {
        debug!("Fetching item by slug: {}", slug);
        Ok(self.repo.find_one(&Filter::new().eq("slug", slug)).await?)
    }

    /// List items, optionally narrowed by availability, category and a
    /// name/description search
    pub async fn list(&self, filter: &ItemListFilter, page: PageParams) -> CatalogResult<(Vec<Item>, i64)> {
        let mut query = Filter::new();
        if filter.available_only {
            query = query.eq("is_available", true);
        }
        if let Some(category) = filter.category {
            query = query.eq("category", category.as_str());
        }
        if let Some(term) = filter.search.as_deref().filter(|t| !t.trim().is_empty()) {
            query = query.search(&["search_key"], term.trim());
        }

        let items = self.repo.find_where(&query, Item::DEFAULT_ORDER, page).await?;
        let total = self.repo.count_where(&query).await?;
        Ok((items, total))
    }

    /// Items of one collection. An unknown collection yields an empty page.
    pub async fn list_by_collection(
        &self,
        collection_id: &str,
        page: PageParams,
    ) -> CatalogResult<(Vec<Item>, i64)> {
        let query = Filter::new().eq("collection_id", collection_id);
        let items = self.repo.find_where(&query, Item::DEFAULT_ORDER, page).await?;
        let total = self.repo.count_where(&query).await?;
        Ok((items, total))
    }

    /// Apply a partial update. The slug keeps its original value on rename.
    pub async fn update(&self, item_id: &str, input: ItemUpdateInput) -> CatalogResult<Item> {
        let existing = self.get(item_id).await?;
        let mut changes = Vec::new();

        let name = input
            .name
            .as_deref()
            .map(|name| validate_name("name", name, MAX_NAME_LEN))
            .transpose()?;
        if let Some(name) = &name {
            changes.push(Assignment::new(ItemField::Name, name.as_str()));
        }
        if let Some(description) = &input.description {
            changes.push(Assignment::new(ItemField::Description, description.clone()));
        }
        if name.is_some() || input.description.is_some() {
            let description = match &input.description {
                Some(description) => description.as_deref(),
                None => existing.description.as_deref(),
            };
            let name = name.as_deref().unwrap_or(&existing.name);
            changes.push(Assignment::new(ItemField::SearchKey, search_key([Some(name), description])));
        }
        if let Some(price) = input.price {
            validate_price("price", price)?;
            changes.push(Assignment::new(ItemField::Price, columns::price_value(price)));
        }
        if let Some(images) = input.images {
            changes.push(Assignment::new(
                ItemField::Images,
                SqlValue::list(images.and_then(list_codec::normalize)),
            ));
        }
        if let Some(colors) = input.colors {
            changes.push(Assignment::new(
                ItemField::Colors,
                SqlValue::list(colors.and_then(list_codec::normalize)),
            ));
        }
        if let Some(sizes) = input.sizes {
            changes.push(Assignment::new(
                ItemField::Sizes,
                SqlValue::list(sizes.and_then(list_codec::normalize)),
            ));
        }
        if let Some(fabric) = input.fabric {
            validate_optional_text("fabric", fabric.as_deref(), MAX_FABRIC_LEN)?;
            changes.push(Assignment::new(ItemField::Fabric, fabric));
        }
        if let Some(composition) = input.fabric_composition {
            validate_optional_text("fabric_composition", composition.as_deref(), MAX_NAME_LEN)?;
            changes.push(Assignment::new(ItemField::FabricComposition, composition));
        }
        if let Some(category) = input.category {
            changes.push(Assignment::new(ItemField::Category, category_value(category)));
        }
        if let Some(is_available) = input.is_available {
            changes.push(Assignment::new(ItemField::IsAvailable, is_available));
        }
        if let Some(collection_id) = input.collection_id {
            if collection_id != existing.collection_id {
                self.ensure_collection_exists(&collection_id).await?;
                changes.push(Assignment::new(ItemField::CollectionId, collection_id));
            }
        }

        let item = self.repo.update(&existing, changes).await?;

        info!("Updated item {}", item.id);
        Ok(item)
    }

    /// Increment the like counter by one
    pub async fn like(&self, item_id: &str) -> CatalogResult<Item> {
        let item = self
            .repo
            .increment(item_id, ItemField::LikesCount, 1)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, item_id))?;

        debug!("Item {} now has {} likes", item.id, item.likes_count);
        Ok(item)
    }

    /// Delete an item. Its collection is left untouched.
    pub async fn delete(&self, item_id: &str) -> CatalogResult<Item> {
        let item = self
            .repo
            .delete(item_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, item_id))?;

        info!("Deleted item {} ({})", item.name, item.id);
        Ok(item)
    }
}
