// ABOUTME: Suite storage layer using SQLite
// ABOUTME: CRUD for suites with slug allocation, duplicate name checks and collection loading

use std::collections::HashMap;

use atelier_core::constants::MAX_NAME_LEN;
use atelier_core::validate_name;
use atelier_storage::{Assignment, Filter, PageParams, Record, Repository};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::types::{Suite, SuiteCreateInput, SuiteField, SuiteUpdateInput, SuiteWithCollections};
use crate::collections::Collection;
use crate::error::{CatalogError, CatalogResult};
use crate::slug::create_with_slug;

const ENTITY: &str = "Suite";

pub struct SuiteStorage {
    repo: Repository<Suite>,
    collections: Repository<Collection>,
}

fn active_filter(active_only: bool) -> Filter {
    if active_only {
        Filter::new().eq("is_active", true)
    } else {
        Filter::new()
    }
}

impl SuiteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: Repository::new(pool.clone()),
            collections: Repository::new(pool),
        }
    }

    /// Create a new suite
    pub async fn create(&self, input: SuiteCreateInput) -> CatalogResult<Suite> {
        let name = validate_name("name", &input.name, MAX_NAME_LEN)?;

        if self.get_by_name(&name).await?.is_some() {
            return Err(CatalogError::already_exists(ENTITY, "name", name));
        }

        debug!("Creating suite: {}", name);

        let suite = create_with_slug(&self.repo, &name, |slug| {
            vec![
                Assignment::new(SuiteField::Name, name.as_str()),
                Assignment::new(SuiteField::Slug, slug),
                Assignment::new(SuiteField::Description, input.description.clone()),
                Assignment::new(SuiteField::IsActive, input.is_active),
            ]
        })
        .await
        .map_err(CatalogError::on_conflict(ENTITY, "name", &name))?;

        info!("Created suite {} ({})", suite.name, suite.id);
        Ok(suite)
    }

    /// Get a single suite by ID
    pub async fn get(&self, suite_id: &str) -> CatalogResult<Suite> {
        self.repo
            .get(suite_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, suite_id))
    }

    /// Get a suite by its exact name
    pub async fn get_by_name(&self, name: &str) -> CatalogResult<Option<Suite>> {
        debug!("Fetching suite by name: {}", name);
        Ok(self.repo.find_one(&Filter::new().eq("name", name)).await?)
    }

    pub async fn get_by_slug(&self, slug: &str) -> CatalogResult<Option<Suite>> {
        debug!("Fetching suite by slug: {}", slug);
        Ok(self.repo.find_one(&Filter::new().eq("slug", slug)).await?)
    }

    /// List suites ordered by name, with the total matching count
    pub async fn list(&self, active_only: bool, page: PageParams) -> CatalogResult<(Vec<Suite>, i64)> {
        let filter = active_filter(active_only);
        let suites = self
            .repo
            .find_where(&filter, Suite::DEFAULT_ORDER, page)
            .await?;
        let total = self.repo.count_where(&filter).await?;
        Ok((suites, total))
    }

    /// List suites with their collections loaded in one extra query
    pub async fn list_with_collections(
        &self,
        active_only: bool,
        page: PageParams,
    ) -> CatalogResult<(Vec<SuiteWithCollections>, i64)> {
        let (suites, total) = self.list(active_only, page).await?;

        let suite_ids: Vec<String> = suites.iter().map(|s| s.id.clone()).collect();
        let collections = self
            .collections
            .find_all(
                &Filter::new().in_list("suite_id", &suite_ids),
                Collection::DEFAULT_ORDER,
            )
            .await?;

        let mut by_suite: HashMap<String, Vec<Collection>> = HashMap::new();
        for collection in collections {
            by_suite
                .entry(collection.suite_id.clone())
                .or_default()
                .push(collection);
        }

        let with_collections = suites
            .into_iter()
            .map(|suite| SuiteWithCollections {
                collections: by_suite.remove(&suite.id).unwrap_or_default(),
                suite,
            })
            .collect();

        Ok((with_collections, total))
    }

    /// Apply a partial update. The slug keeps its original value on rename.
    pub async fn update(&self, suite_id: &str, input: SuiteUpdateInput) -> CatalogResult<Suite> {
        let existing = self.get(suite_id).await?;
        let mut changes = Vec::new();
        let mut new_name = None;

        if let Some(name) = input.name {
            let name = validate_name("name", &name, MAX_NAME_LEN)?;
            if name != existing.name {
                if self.get_by_name(&name).await?.is_some() {
                    return Err(CatalogError::already_exists(ENTITY, "name", name));
                }
                changes.push(Assignment::new(SuiteField::Name, name.as_str()));
                new_name = Some(name);
            }
        }
        if let Some(description) = input.description {
            changes.push(Assignment::new(SuiteField::Description, description));
        }
        if let Some(is_active) = input.is_active {
            changes.push(Assignment::new(SuiteField::IsActive, is_active));
        }

        let conflict_name = new_name.unwrap_or_else(|| existing.name.clone());
        let suite = self
            .repo
            .update(&existing, changes)
            .await
            .map_err(CatalogError::on_conflict(ENTITY, "name", &conflict_name))?;

        info!("Updated suite {}", suite.id);
        Ok(suite)
    }

    /// Delete a suite. Its collections and their items go with it.
    pub async fn delete(&self, suite_id: &str) -> CatalogResult<Suite> {
        let suite = self
            .repo
            .delete(suite_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, suite_id))?;

        info!("Deleted suite {} ({})", suite.name, suite.id);
        Ok(suite)
    }

    pub async fn count(&self) -> CatalogResult<i64> {
        Ok(self.repo.count().await?)
    }
}
