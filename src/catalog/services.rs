use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::accounts::User;
use crate::catalog::dto::{ListingQuery, NewListing};
use crate::catalog::repo_types::{Category, Listing, ListingMode};
use crate::storage::KeyValueStore;

/// Catalog operation failures, shown to the end user as-is.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Please fill in all required fields")]
    MissingRequiredField,
    #[error("Enter a price greater than zero")]
    InvalidPrice,
    #[error("Only seller accounts can post listings")]
    NotASeller,
    #[error("Unknown category")]
    UnknownCategory,
    #[error("Unknown listing mode")]
    UnknownMode,
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Owns the append-only listing collection.
#[derive(Clone)]
pub struct CatalogStore {
    store: Arc<dyn KeyValueStore>,
}

impl CatalogStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Post a new listing on behalf of `seller`. The seller's identity
    /// fields are copied onto the listing; later account changes never
    /// reach posted listings.
    #[instrument(skip(self, fields, seller))]
    pub fn add_listing(&self, fields: &NewListing, seller: &User) -> Result<Listing, CatalogError> {
        if !seller.role.can_sell() {
            warn!(user_id = %seller.id, "listing rejected: buyer-only account");
            return Err(CatalogError::NotASeller);
        }

        let name = fields.name.trim();
        let category_token = fields.category.trim();
        let mode_token = fields.mode.trim();
        if name.is_empty() || category_token.is_empty() || mode_token.is_empty() {
            warn!("listing rejected: missing required fields");
            return Err(CatalogError::MissingRequiredField);
        }
        let category = Category::parse(category_token).ok_or(CatalogError::UnknownCategory)?;
        let mode = ListingMode::parse(mode_token).ok_or(CatalogError::UnknownMode)?;

        // Donated listings are always free; anything else needs a positive price.
        let price = if mode == ListingMode::Donate {
            0.0
        } else {
            match fields.price {
                Some(p) if p > 0.0 => p,
                _ => {
                    warn!("listing rejected: missing or non-positive price");
                    return Err(CatalogError::InvalidPrice);
                }
            }
        };

        let listing = Listing {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
            mode,
            price,
            description: fields
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            image: fields.image.clone(),
            seller_id: seller.id,
            seller_name: seller.name.clone(),
            seller_college: seller.college.clone(),
            seller_email: seller.email.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        Listing::append(self.store.as_ref(), &listing)?;

        info!(listing_id = %listing.id, seller_id = %seller.id, category = %category, mode = %mode, "listing posted");
        Ok(listing)
    }

    /// Every listing, in insertion order.
    pub fn all_listings(&self) -> Result<Vec<Listing>, CatalogError> {
        Ok(Listing::load_all(self.store.as_ref())?)
    }

    /// Initialize an empty catalog with `samples`. A catalog with any
    /// listing at all is left alone. Returns whether seeding happened.
    #[instrument(skip(self, samples))]
    pub fn seed_if_empty(&self, samples: Vec<Listing>) -> Result<bool, CatalogError> {
        let existing = Listing::load_all(self.store.as_ref())?;
        if !existing.is_empty() {
            return Ok(false);
        }
        Listing::save_all(self.store.as_ref(), &samples)?;
        info!(count = samples.len(), "catalog seeded with starter listings");
        Ok(true)
    }
}

/// The visible subset of `listings` under `query`. Pure: no side effects,
/// original order preserved, recomputed fresh on every call.
pub fn visible_listings(listings: &[Listing], query: &ListingQuery) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| query.matches(listing))
        .cloned()
        .collect()
}

/// Fixed starter records shown before anyone has posted.
pub fn sample_listings() -> Vec<Listing> {
    let posted = OffsetDateTime::now_utc();
    let sample = |name: &str, category: Category, mode: ListingMode, price: f64, description: &str| {
        Listing {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
            mode,
            price,
            description: Some(description.to_string()),
            image: None,
            seller_id: Uuid::nil(),
            seller_name: "Campus Market".to_string(),
            seller_college: "Student Services".to_string(),
            seller_email: "market@campus.edu".to_string(),
            created_at: posted,
        }
    };

    vec![
        sample(
            "Notebook Set",
            Category::Stationery,
            ListingMode::Buy,
            8.0,
            "Pack of five ruled notebooks, barely used.",
        ),
        sample(
            "Lab Coat",
            Category::Lab,
            ListingMode::Donate,
            0.0,
            "Size M white coat, good condition.",
        ),
        sample(
            "Calculator",
            Category::Tech,
            ListingMode::Buy,
            15.0,
            "Scientific model with cover, all keys working.",
        ),
        sample(
            "Organic Chemistry Textbook",
            Category::Books,
            ListingMode::Borrow,
            5.0,
            "Eighth edition, some highlighting.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_set_spans_the_mode_split() {
        let samples = sample_listings();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples.iter().filter(|l| l.mode.is_free()).count(), 2);
        for l in &samples {
            if l.mode == ListingMode::Donate {
                assert_eq!(l.price, 0.0);
            } else {
                assert!(l.price > 0.0);
            }
        }
    }
}
