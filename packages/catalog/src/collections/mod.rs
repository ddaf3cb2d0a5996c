// ABOUTME: Collection management module
// ABOUTME: Provides types and storage for collections within a suite

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
