// ABOUTME: Testimonial management module
// ABOUTME: Provides types and storage for client testimonials

pub mod storage;
pub mod types;

pub use storage::*;
pub use types::*;
