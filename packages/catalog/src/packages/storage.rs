// ABOUTME: Package storage layer using SQLite
// ABOUTME: CRUD for service packages with duplicate name checks, flags and name search

use atelier_core::constants::{MAX_NAME_LEN, MAX_URL_LEN};
use atelier_core::{
    fold_case, validate_display_order, validate_name, validate_optional_text, validate_price,
};
use atelier_storage::{list_codec, Assignment, Filter, PageParams, Record, Repository, SqlValue};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::types::{Package, PackageCreateInput, PackageField, PackageListFilter, PackageUpdateInput};
use crate::columns;
use crate::error::{CatalogError, CatalogResult};
use crate::slug::create_with_slug;

const ENTITY: &str = "Package";

pub struct PackageStorage {
    repo: Repository<Package>,
}

impl PackageStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: Repository::new(pool),
        }
    }

    /// Create a new package
    pub async fn create(&self, input: PackageCreateInput) -> CatalogResult<Package> {
        let name = validate_name("name", &input.name, MAX_NAME_LEN)?;
        validate_price("price", input.price)?;
        validate_display_order(input.display_order)?;
        validate_optional_text("pdf_url", input.pdf_url.as_deref(), MAX_URL_LEN)?;

        if self.get_by_name(&name).await?.is_some() {
            return Err(CatalogError::already_exists(ENTITY, "name", name));
        }

        debug!("Creating package: {}", name);

        let features = SqlValue::list(input.features.and_then(list_codec::normalize));
        let package = create_with_slug(&self.repo, &name, |slug| {
            vec![
                Assignment::new(PackageField::Name, name.as_str()),
                Assignment::new(PackageField::Slug, slug),
                Assignment::new(PackageField::Price, columns::price_value(input.price)),
                Assignment::new(PackageField::Description, input.description.clone()),
                Assignment::new(PackageField::Features, features.clone()),
                Assignment::new(PackageField::PdfUrl, input.pdf_url.clone()),
                Assignment::new(PackageField::IsActive, input.is_active),
                Assignment::new(PackageField::IsPopular, input.is_popular),
                Assignment::new(PackageField::DisplayOrder, input.display_order),
                Assignment::new(PackageField::SearchKey, fold_case(&name)),
            ]
        })
        .await
        .map_err(CatalogError::on_conflict(ENTITY, "name", &name))?;

        info!("Created package {} ({})", package.name, package.id);
        Ok(package)
    }

    pub async fn get(&self, package_id: &str) -> CatalogResult<Package> {
        self.repo
            .get(package_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, package_id))
    }

    pub async fn get_by_slug(&self, slug: &str) -> CatalogResult<Option<Package>> {
        debug!("Fetching package by slug: {}", slug);
        Ok(self.repo.find_one(&Filter::new().eq("slug", slug)).await?)
    }

    pub async fn get_by_name(&self, name: &str) -> CatalogResult<Option<Package>> {
        debug!("Fetching package by name: {}", name);
        Ok(self.repo.find_one(&Filter::new().eq("name", name)).await?)
    }

    /// List packages by display order
    pub async fn list(
        &self,
        filter: &PackageListFilter,
        page: PageParams,
    ) -> CatalogResult<(Vec<Package>, i64)> {
        let mut query = Filter::new();
        if filter.active_only {
            query = query.eq("is_active", true);
        }
        if filter.popular_only {
            query = query.eq("is_popular", true);
        }

        let packages = self
            .repo
            .find_where(&query, Package::DEFAULT_ORDER, page)
            .await?;
        let total = self.repo.count_where(&query).await?;
        Ok((packages, total))
    }

    /// Case-insensitive substring search on the package name
    pub async fn search_by_name(
        &self,
        term: &str,
        page: PageParams,
    ) -> CatalogResult<(Vec<Package>, i64)> {
        let query = Filter::new().search(&["search_key"], term.trim());
        let packages = self
            .repo
            .find_where(&query, Package::DEFAULT_ORDER, page)
            .await?;
        let total = self.repo.count_where(&query).await?;
        Ok((packages, total))
    }

    /// Apply a partial update. The slug keeps its original value on rename.
    pub async fn update(&self, package_id: &str, input: PackageUpdateInput) -> CatalogResult<Package> {
        let existing = self.get(package_id).await?;
        let mut changes = Vec::new();
        let mut conflict_name = existing.name.clone();

        if let Some(name) = input.name {
            let name = validate_name("name", &name, MAX_NAME_LEN)?;
            if name != existing.name {
                if self.get_by_name(&name).await?.is_some() {
                    return Err(CatalogError::already_exists(ENTITY, "name", name));
                }
                changes.push(Assignment::new(PackageField::Name, name.as_str()));
                changes.push(Assignment::new(PackageField::SearchKey, fold_case(&name)));
                conflict_name = name;
            }
        }
        if let Some(price) = input.price {
            validate_price("price", price)?;
            changes.push(Assignment::new(PackageField::Price, columns::price_value(price)));
        }
        if let Some(description) = input.description {
            changes.push(Assignment::new(PackageField::Description, description));
        }
        if let Some(features) = input.features {
            changes.push(Assignment::new(
                PackageField::Features,
                SqlValue::list(features.and_then(list_codec::normalize)),
            ));
        }
        if let Some(pdf_url) = input.pdf_url {
            validate_optional_text("pdf_url", pdf_url.as_deref(), MAX_URL_LEN)?;
            changes.push(Assignment::new(PackageField::PdfUrl, pdf_url));
        }
        if let Some(is_active) = input.is_active {
            changes.push(Assignment::new(PackageField::IsActive, is_active));
        }
        if let Some(is_popular) = input.is_popular {
            changes.push(Assignment::new(PackageField::IsPopular, is_popular));
        }
        if let Some(display_order) = input.display_order {
            validate_display_order(display_order)?;
            changes.push(Assignment::new(PackageField::DisplayOrder, display_order));
        }

        let package = self
            .repo
            .update(&existing, changes)
            .await
            .map_err(CatalogError::on_conflict(ENTITY, "name", &conflict_name))?;

        info!("Updated package {}", package.id);
        Ok(package)
    }

    pub async fn delete(&self, package_id: &str) -> CatalogResult<Package> {
        let package = self
            .repo
            .delete(package_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, package_id))?;

        info!("Deleted package {} ({})", package.name, package.id);
        Ok(package)
    }

    /// Whether a package with this id exists
    pub async fn exists(&self, package_id: &str) -> CatalogResult<bool> {
        Ok(self
            .repo
            .exists_where(&Filter::new().eq("id", package_id))
            .await?)
    }
}
