// ABOUTME: Catalog error taxonomy
// ABOUTME: Not found, duplicate, validation and integrity failures raised by the entity repositories

use atelier_core::ValidationError;
use atelier_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} with {field} '{value}' already exists")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Integrity constraint violated: {0}")]
    Integrity(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn already_exists(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            field,
            value: value.into(),
        }
    }

    /// Map a storage failure on a write, turning a unique violation on the
    /// `field` column into `AlreadyExists`. Covers the race between the
    /// duplicate pre-check and the insert.
    pub(crate) fn on_conflict<'a>(
        entity: &'static str,
        field: &'static str,
        value: &'a str,
    ) -> impl FnOnce(StorageError) -> CatalogError + 'a {
        Self::on_key_conflict(entity, field, field, value)
    }

    /// Like `on_conflict` for fields enforced through a separate key column
    /// (`client_name` is unique through `client_name_key`). Violations on any
    /// other column stay integrity errors.
    pub(crate) fn on_key_conflict<'a>(
        entity: &'static str,
        column: &'static str,
        field: &'static str,
        value: &'a str,
    ) -> impl FnOnce(StorageError) -> CatalogError + 'a {
        move |err| {
            if err.is_conflict_on(column) {
                CatalogError::already_exists(entity, field, value)
            } else {
                err.into()
            }
        }
    }
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Integrity(message) => CatalogError::Integrity(message),
            StorageError::Conflict(message) => CatalogError::Integrity(message),
            other => CatalogError::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_already_exists() {
        let map = CatalogError::on_conflict("Suite", "name", "Spring");
        let err = map(StorageError::Conflict("UNIQUE constraint failed: suites.name".into()));

        assert!(matches!(
            err,
            CatalogError::AlreadyExists { entity: "Suite", field: "name", ref value } if value == "Spring"
        ));
    }

    #[test]
    fn test_conflict_on_other_column_is_not_a_duplicate_name() {
        let map = CatalogError::on_conflict("Suite", "name", "Spring?");
        let err = map(StorageError::Conflict("UNIQUE constraint failed: suites.slug".into()));

        assert!(matches!(err, CatalogError::Integrity(_)));
    }

    #[test]
    fn test_key_column_conflict_reports_field() {
        let map = CatalogError::on_key_conflict("Testimonial", "client_name_key", "client_name", "ZOË");
        let err = map(StorageError::Conflict(
            "UNIQUE constraint failed: testimonials.client_name_key".into(),
        ));

        assert!(matches!(
            err,
            CatalogError::AlreadyExists { field: "client_name", ref value, .. } if value == "ZOË"
        ));
    }

    #[test]
    fn test_integrity_passes_through() {
        let err: CatalogError = StorageError::Integrity("FOREIGN KEY constraint failed".into()).into();
        assert!(matches!(err, CatalogError::Integrity(_)));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            CatalogError::not_found("Item", "abc").to_string(),
            "Item not found: abc"
        );
        assert_eq!(
            CatalogError::already_exists("Package", "name", "Gold").to_string(),
            "Package with name 'Gold' already exists"
        );
    }
}
