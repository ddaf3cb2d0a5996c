// ABOUTME: Catalog entities and their storage layers
// ABOUTME: Suites, collections, items, packages and testimonials on top of the generic repository

mod columns;
pub mod db;
pub mod error;
pub mod patch;
mod slug;

pub mod collections;
pub mod items;
pub mod packages;
pub mod suites;
pub mod testimonials;

pub use db::DbState;
pub use error::{CatalogError, CatalogResult};

pub use collections::{
    Collection, CollectionCreateInput, CollectionListFilter, CollectionStorage,
    CollectionUpdateInput,
};
pub use items::{Category, Item, ItemCreateInput, ItemListFilter, ItemStorage, ItemUpdateInput};
pub use packages::{
    Package, PackageCreateInput, PackageListFilter, PackageStorage, PackageUpdateInput,
};
pub use suites::{Suite, SuiteCreateInput, SuiteStorage, SuiteUpdateInput, SuiteWithCollections};
pub use testimonials::{
    parse_order_by, Testimonial, TestimonialCreateInput, TestimonialListFilter,
    TestimonialStorage, TestimonialUpdateInput,
};
