// ABOUTME: Suite management module
// ABOUTME: Provides types and storage for catalog suites

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
