// ABOUTME: Item management module
// ABOUTME: Provides types and storage for catalog items

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
