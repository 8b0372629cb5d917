mod dto;
pub mod repo;
mod repo_types;
pub mod services;

pub use dto::{ListingQuery, NewListing};
pub use repo_types::{Category, Listing, ListingMode, ViewMode};
pub use services::{sample_listings, visible_listings, CatalogError, CatalogStore};
