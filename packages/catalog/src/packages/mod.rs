// ABOUTME: Package management module
// ABOUTME: Provides types and storage for service packages

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
