// ABOUTME: Collection storage layer using SQLite
// ABOUTME: CRUD for collections with suite checks, search and per-suite listing

use atelier_core::constants::{MAX_NAME_LEN, MAX_URL_LEN};
use atelier_core::{search_key, validate_name, validate_optional_text};
use atelier_storage::{Assignment, Filter, PageParams, Record, Repository};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::types::{
    Collection, CollectionCreateInput, CollectionField, CollectionListFilter, CollectionUpdateInput,
};
use crate::error::{CatalogError, CatalogResult};
use crate::slug::create_with_slug;
use crate::suites::Suite;

const ENTITY: &str = "Collection";

pub struct CollectionStorage {
    repo: Repository<Collection>,
    suites: Repository<Suite>,
}

impl CollectionStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: Repository::new(pool.clone()),
            suites: Repository::new(pool),
        }
    }

    async fn ensure_suite_exists(&self, suite_id: &str) -> CatalogResult<()> {
        if self.suites.get(suite_id).await?.is_none() {
            warn!("Rejected collection write for missing suite {}", suite_id);
            return Err(CatalogError::Integrity(format!(
                "Suite {} does not exist",
                suite_id
            )));
        }
        Ok(())
    }

    async fn name_taken(&self, name: &str) -> CatalogResult<bool> {
        Ok(self.repo.exists_where(&Filter::new().eq("name", name)).await?)
    }

    /// Create a new collection inside an existing suite
    pub async fn create(&self, input: CollectionCreateInput) -> CatalogResult<Collection> {
        let name = validate_name("name", &input.name, MAX_NAME_LEN)?;
        validate_optional_text("image", input.image.as_deref(), MAX_URL_LEN)?;

        if self.name_taken(&name).await? {
            return Err(CatalogError::already_exists(ENTITY, "name", name));
        }
        self.ensure_suite_exists(&input.suite_id).await?;

        debug!("Creating collection: {} (suite: {})", name, input.suite_id);

        let key = search_key([Some(name.as_str()), input.description.as_deref()]);
        let collection = create_with_slug(&self.repo, &name, |slug| {
            vec![
                Assignment::new(CollectionField::Name, name.as_str()),
                Assignment::new(CollectionField::Slug, slug),
                Assignment::new(CollectionField::Description, input.description.clone()),
                Assignment::new(CollectionField::Image, input.image.clone()),
                Assignment::new(CollectionField::IsActive, input.is_active),
                Assignment::new(CollectionField::DisplayOrder, input.display_order),
                Assignment::new(CollectionField::SuiteId, input.suite_id.as_str()),
                Assignment::new(CollectionField::SearchKey, key.as_str()),
            ]
        })
        .await
        .map_err(CatalogError::on_conflict(ENTITY, "name", &name))?;

        info!("Created collection {} ({})", collection.name, collection.id);
        Ok(collection)
    }

    /// Get a collection with its item ids and suite name
    pub async fn get(&self, collection_id: &str) -> CatalogResult<Collection> {
        self.repo
            .get(collection_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, collection_id))
    }

    pub async fn get_by_slug(&self, slug: &str) -> CatalogResult<Option<Collection>> {
        debug!("Fetching collection by slug: {}", slug);
        Ok(self.repo.find_one(&Filter::new().eq("slug", slug)).await?)
    }

    /// List collections by display order. `search` matches name or description
    /// regardless of case.
    pub async fn list(
        &self,
        filter: &CollectionListFilter,
        page: PageParams,
    ) -> CatalogResult<(Vec<Collection>, i64)> {
        let mut query = Filter::new();
        if filter.active_only {
            query = query.eq("is_active", true);
        }
        if let Some(term) = filter.search.as_deref().filter(|t| !t.trim().is_empty()) {
            query = query.search(&["search_key"], term.trim());
        }

        let collections = self
            .repo
            .find_where(&query, Collection::DEFAULT_ORDER, page)
            .await?;
        let total = self.repo.count_where(&query).await?;
        Ok((collections, total))
    }

    /// Collections of one suite. An unknown suite yields an empty page.
    pub async fn list_by_suite(
        &self,
        suite_id: &str,
        page: PageParams,
    ) -> CatalogResult<(Vec<Collection>, i64)> {
        let query = Filter::new().eq("suite_id", suite_id);
        let collections = self
            .repo
            .find_where(&query, Collection::DEFAULT_ORDER, page)
            .await?;
        let total = self.repo.count_where(&query).await?;
        Ok((collections, total))
    }

    /// Apply a partial update. The slug keeps its original value on rename.
    pub async fn update(
        &self,
        collection_id: &str,
        input: CollectionUpdateInput,
    ) -> CatalogResult<Collection> {
        let existing = self.get(collection_id).await?;
        let mut changes = Vec::new();
        let mut conflict_name = existing.name.clone();

        if let Some(name) = input.name {
            let name = validate_name("name", &name, MAX_NAME_LEN)?;
            if name != existing.name {
                if self.name_taken(&name).await? {
                    return Err(CatalogError::already_exists(ENTITY, "name", name));
                }
                changes.push(Assignment::new(CollectionField::Name, name.as_str()));
                conflict_name = name;
            }
        }
        if let Some(description) = &input.description {
            changes.push(Assignment::new(CollectionField::Description, description.clone()));
        }
        if conflict_name != existing.name || input.description.is_some() {
            let description = match &input.description {
                Some(description) => description.as_deref(),
                None => existing.description.as_deref(),
            };
            let key = search_key([Some(conflict_name.as_str()), description]);
            changes.push(Assignment::new(CollectionField::SearchKey, key));
        }
        if let Some(image) = input.image {
            validate_optional_text("image", image.as_deref(), MAX_URL_LEN)?;
            changes.push(Assignment::new(CollectionField::Image, image));
        }
        if let Some(is_active) = input.is_active {
            changes.push(Assignment::new(CollectionField::IsActive, is_active));
        }
        if let Some(display_order) = input.display_order {
            changes.push(Assignment::new(CollectionField::DisplayOrder, display_order));
        }
        if let Some(suite_id) = input.suite_id {
            if suite_id != existing.suite_id {
                self.ensure_suite_exists(&suite_id).await?;
                changes.push(Assignment::new(CollectionField::SuiteId, suite_id));
            }
        }

        let collection = self
            .repo
            .update(&existing, changes)
            .await
            .map_err(CatalogError::on_conflict(ENTITY, "name", &conflict_name))?;

        info!("Updated collection {}", collection.id);
        Ok(collection)
    }

    /// Delete a collection together with its items
    pub async fn delete(&self, collection_id: &str) -> CatalogResult<Collection> {
        let collection = self
            .repo
            .delete(collection_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, collection_id))?;

        info!("Deleted collection {} ({})", collection.name, collection.id);
        Ok(collection)
    }
}
