// ABOUTME: Core utilities, constants and validation for the Atelier catalog
// ABOUTME: Foundational package shared by storage, catalog, api and cli

pub mod constants;
pub mod utils;
pub mod validation;

// Re-export utilities
pub use utils::{fold_case, generate_id, search_key, slug_with_suffix, slugify};

// Re-export validation
pub use validation::{
    validate_display_order, validate_name, validate_optional_text, validate_price,
    validate_rating, validate_review_text, ValidationError,
};
