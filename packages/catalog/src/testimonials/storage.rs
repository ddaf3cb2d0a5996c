// ABOUTME: Testimonial storage layer using SQLite
// ABOUTME: CRUD for testimonials with case-insensitive client names, ordering, search and rating ranges

use atelier_core::constants::{MAX_CLIENT_NAME_LEN, MAX_RATING, MIN_RATING};
use atelier_core::{
    fold_case, search_key, validate_display_order, validate_name, validate_rating,
    validate_review_text, ValidationError,
};
use atelier_storage::{Assignment, Filter, PageParams, Record, Repository, SortKey};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::types::{
    parse_order_by, Testimonial, TestimonialCreateInput, TestimonialField, TestimonialListFilter,
    TestimonialUpdateInput,
};
use crate::error::{CatalogError, CatalogResult};

const ENTITY: &str = "Testimonial";

/// Unique column holding the case-folded client name
const CLIENT_NAME_KEY: &str = "client_name_key";

const BY_RATING: &[SortKey] = &[SortKey::desc("rating"), SortKey::asc("display_order")];

pub struct TestimonialStorage {
    repo: Repository<Testimonial>,
}

impl TestimonialStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: Repository::new(pool),
        }
    }

    /// Create a new testimonial. Client names are unique regardless of case.
    pub async fn create(&self, input: TestimonialCreateInput) -> CatalogResult<Testimonial> {
        let client_name = validate_name("client_name", &input.client_name, MAX_CLIENT_NAME_LEN)?;
        let review_text = validate_review_text(input.review_text.as_deref())?;
        validate_rating(input.rating)?;
        validate_display_order(input.display_order)?;

        if self.get_by_client_name(&client_name).await?.is_some() {
            return Err(CatalogError::already_exists(ENTITY, "client_name", client_name));
        }

        debug!("Creating testimonial for {}", client_name);

        let key = search_key([Some(client_name.as_str()), review_text.as_deref()]);
        let testimonial = self
            .repo
            .create(vec![
                Assignment::new(TestimonialField::ClientName, client_name.as_str()),
                Assignment::new(TestimonialField::ClientNameKey, fold_case(&client_name)),
                Assignment::new(TestimonialField::ReviewText, review_text),
                Assignment::new(TestimonialField::Rating, input.rating),
                Assignment::new(TestimonialField::DisplayOrder, input.display_order),
                Assignment::new(TestimonialField::SearchKey, key),
            ])
            .await
            .map_err(CatalogError::on_key_conflict(
                ENTITY,
                CLIENT_NAME_KEY,
                "client_name",
                &client_name,
            ))?;

        info!("Created testimonial {} ({})", testimonial.client_name, testimonial.id);
        Ok(testimonial)
    }

    pub async fn get(&self, testimonial_id: &str) -> CatalogResult<Testimonial> {
        self.repo
            .get(testimonial_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, testimonial_id))
    }

    /// Case-insensitive lookup by client name
    pub async fn get_by_client_name(&self, client_name: &str) -> CatalogResult<Option<Testimonial>> {
        debug!("Fetching testimonial by client name: {}", client_name);
        Ok(self
            .repo
            .find_one(&Filter::new().eq_folded(CLIENT_NAME_KEY, client_name))
            .await?)
    }

    /// List testimonials ordered by an `order_by` expression
    pub async fn list(
        &self,
        order_by: Option<&str>,
        page: PageParams,
    ) -> CatalogResult<(Vec<Testimonial>, i64)> {
        let order = [order_by.map(parse_order_by).unwrap_or(SortKey::asc("display_order"))];
        let testimonials = self.repo.find_where(&Filter::new(), &order, page).await?;
        let total = self.repo.count().await?;
        Ok((testimonials, total))
    }

    /// Case-insensitive search over client name and review text
    pub async fn search(&self, term: &str, page: PageParams) -> CatalogResult<(Vec<Testimonial>, i64)> {
        let query = Filter::new().search(&["search_key"], term.trim());
        let testimonials = self
            .repo
            .find_where(&query, Testimonial::DEFAULT_ORDER, page)
            .await?;
        let total = self.repo.count_where(&query).await?;
        Ok((testimonials, total))
    }

    /// Testimonials whose rating falls in `min..=max`, best rated first
    pub async fn by_rating(
        &self,
        min_rating: i64,
        max_rating: i64,
        page: PageParams,
    ) -> CatalogResult<(Vec<Testimonial>, i64)> {
        validate_rating(min_rating)?;
        validate_rating(max_rating)?;
        if min_rating > max_rating {
            return Err(ValidationError::invalid(
                "min_rating",
                format!("{} is greater than max_rating {}", min_rating, max_rating),
            )
            .into());
        }

        let query = Filter::new()
            .gte("rating", min_rating)
            .lte("rating", max_rating);
        let testimonials = self.repo.find_where(&query, BY_RATING, page).await?;
        let total = self.repo.count_where(&query).await?;
        Ok((testimonials, total))
    }

    /// Dispatch a list request: search wins over the rating range, which
    /// wins over plain ordering
    pub async fn query(
        &self,
        filter: &TestimonialListFilter,
        page: PageParams,
    ) -> CatalogResult<(Vec<Testimonial>, i64)> {
        if let Some(term) = filter.search.as_deref().filter(|t| !t.trim().is_empty()) {
            return self.search(term, page).await;
        }

        if filter.min_rating.is_some() || filter.max_rating.is_some() {
            return self
                .by_rating(
                    filter.min_rating.unwrap_or(MIN_RATING),
                    filter.max_rating.unwrap_or(MAX_RATING),
                    page,
                )
                .await;
        }

        self.list(filter.order_by.as_deref(), page).await
    }

    pub async fn update(
        &self,
        testimonial_id: &str,
        input: TestimonialUpdateInput,
    ) -> CatalogResult<Testimonial> {
        let existing = self.get(testimonial_id).await?;
        let mut changes = Vec::new();
        let mut conflict_name = existing.client_name.clone();

        if let Some(client_name) = input.client_name {
            let client_name = validate_name("client_name", &client_name, MAX_CLIENT_NAME_LEN)?;
            if fold_case(&client_name) != fold_case(&existing.client_name) {
                if self.get_by_client_name(&client_name).await?.is_some() {
                    return Err(CatalogError::already_exists(ENTITY, "client_name", client_name));
                }
            }
            if client_name != existing.client_name {
                changes.push(Assignment::new(TestimonialField::ClientName, client_name.as_str()));
                changes.push(Assignment::new(
                    TestimonialField::ClientNameKey,
                    fold_case(&client_name),
                ));
                conflict_name = client_name;
            }
        }
        let review_text = input
            .review_text
            .map(|text| validate_review_text(text.as_deref()))
            .transpose()?;
        if let Some(review_text) = &review_text {
            changes.push(Assignment::new(TestimonialField::ReviewText, review_text.clone()));
        }
        if conflict_name != existing.client_name || review_text.is_some() {
            let review = match &review_text {
                Some(review_text) => review_text.as_deref(),
                None => existing.review_text.as_deref(),
            };
            let key = search_key([Some(conflict_name.as_str()), review]);
            changes.push(Assignment::new(TestimonialField::SearchKey, key));
        }
        if let Some(rating) = input.rating {
            validate_rating(rating)?;
            changes.push(Assignment::new(TestimonialField::Rating, rating));
        }
        if let Some(display_order) = input.display_order {
            validate_display_order(display_order)?;
            changes.push(Assignment::new(TestimonialField::DisplayOrder, display_order));
        }

        let testimonial = self
            .repo
            .update(&existing, changes)
            .await
            .map_err(CatalogError::on_key_conflict(
                ENTITY,
                CLIENT_NAME_KEY,
                "client_name",
                &conflict_name,
            ))?;

        info!("Updated testimonial {}", testimonial.id);
        Ok(testimonial)
    }

    pub async fn delete(&self, testimonial_id: &str) -> CatalogResult<Testimonial> {
        let testimonial = self
            .repo
            .delete(testimonial_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, testimonial_id))?;

        info!("Deleted testimonial {}", testimonial.id);
        Ok(testimonial)
    }

    pub async fn count(&self) -> CatalogResult<i64> {
        Ok(self.repo.count().await?)
    }
}
