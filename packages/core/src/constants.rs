// ABOUTME: Environment variable names and shared defaults
// ABOUTME: Centralized definitions used by the cli configuration and the API layer

// Database
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DEFAULT_DATABASE_URL: &str = "sqlite:atelier.db";

// Application
pub const SECRET_KEY: &str = "SECRET_KEY";
pub const ENVIRONMENT: &str = "ENVIRONMENT";
pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const API_V1_STR: &str = "API_V1_STR";

pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_PROJECT_NAME: &str = "Atelier Catalog API";
pub const DEFAULT_API_V1_STR: &str = "/api/v1";

// Server
pub const PORT: &str = "PORT";
pub const CORS_ORIGIN: &str = "CORS_ORIGIN";

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CORS_ORIGIN: &str = "*";

/// Minimum secret length accepted in production
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

// Field limits
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_CLIENT_NAME_LEN: usize = 100;
pub const MAX_FABRIC_LEN: usize = 100;
pub const MAX_URL_LEN: usize = 512;
pub const MAX_REVIEW_LEN: usize = 2000;
pub const MIN_REVIEW_LEN: usize = 10;
pub const MIN_RATING: i64 = 0;
pub const MAX_RATING: i64 = 5;
