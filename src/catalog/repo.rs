use crate::catalog::repo_types::Listing;
use crate::storage::{self, KeyValueStore};

/// Key for the persisted listing collection.
pub const LISTINGS_KEY: &str = "marketplace/listings";

impl Listing {
    /// Load every listing, in insertion order.
    pub fn load_all(store: &dyn KeyValueStore) -> anyhow::Result<Vec<Listing>> {
        Ok(storage::get_json(store, LISTINGS_KEY)?.unwrap_or_default())
    }

    /// Append one listing and persist the collection.
    pub fn append(store: &dyn KeyValueStore, listing: &Listing) -> anyhow::Result<()> {
        let mut listings = Listing::load_all(store)?;
        listings.push(listing.clone());
        storage::put_json(store, LISTINGS_KEY, &listings)
    }

    /// Replace the whole collection.
    pub fn save_all(store: &dyn KeyValueStore, listings: &[Listing]) -> anyhow::Result<()> {
        storage::put_json(store, LISTINGS_KEY, &listings)
    }
}
