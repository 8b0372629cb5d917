use serde::Deserialize;

use crate::catalog::repo_types::{Category, Listing, ListingMode, ViewMode};

/// Raw listing fields as submitted by the posting form. Category and mode
/// arrive as selector tokens; the store parses and validates them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewListing {
    pub name: String,
    pub category: String,
    pub mode: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Current filter selections. An unset selector matches every listing.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub search: String,
    pub category: Option<Category>,
    pub mode: Option<ListingMode>,
    pub view: ViewMode,
}

impl ListingQuery {
    /// Build a query from raw selector tokens. Empty or unrecognized
    /// tokens leave the corresponding filter unset; an unrecognized view
    /// token falls back to the full feed.
    pub fn from_raw(search: &str, category: &str, mode: &str, view: &str) -> Self {
        Self {
            search: search.to_string(),
            category: Category::parse(category),
            mode: ListingMode::parse(mode),
            view: ViewMode::parse(view).unwrap_or_default(),
        }
    }

    /// Whether `listing` passes every active filter: case-insensitive
    /// substring match on name or description, exact category and mode
    /// match, and the free-only view restriction.
    pub fn matches(&self, listing: &Listing) -> bool {
        let term = self.search.to_lowercase();
        let text_match = term.is_empty()
            || listing.name.to_lowercase().contains(&term)
            || listing
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term));

        let category_match = self.category.map_or(true, |c| c == listing.category);
        let mode_match = self.mode.map_or(true, |m| m == listing.mode);
        let view_match = match self.view {
            ViewMode::All => true,
            ViewMode::Free => listing.mode.is_free(),
        };

        text_match && category_match && mode_match && view_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn listing(name: &str, description: Option<&str>, category: Category, mode: ListingMode) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
            mode,
            price: if mode == ListingMode::Donate { 0.0 } else { 10.0 },
            description: description.map(str::to_string),
            image: None,
            seller_id: Uuid::new_v4(),
            seller_name: "Priya".to_string(),
            seller_college: "Engineering".to_string(),
            seller_email: "priya@campus.edu".to_string(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = ListingQuery::default();
        let l = listing("Desk Lamp", None, Category::Misc, ListingMode::Buy);
        assert!(query.matches(&l));
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let query = ListingQuery::from_raw("LAMP", "", "", "all");
        assert!(query.matches(&listing("Desk lamp", None, Category::Misc, ListingMode::Buy)));

        let query = ListingQuery::from_raw("clip-on", "", "", "all");
        assert!(query.matches(&listing(
            "Desk Lamp",
            Some("Clip-on, warm white"),
            Category::Misc,
            ListingMode::Buy,
        )));
        assert!(!query.matches(&listing("Desk Lamp", None, Category::Misc, ListingMode::Buy)));
    }

    #[test]
    fn category_and_mode_filters_are_exact() {
        let l = listing("Beaker Set", None, Category::Lab, ListingMode::Borrow);

        assert!(ListingQuery::from_raw("", "lab", "", "all").matches(&l));
        assert!(!ListingQuery::from_raw("", "tech", "", "all").matches(&l));
        assert!(ListingQuery::from_raw("", "", "borrow", "all").matches(&l));
        assert!(!ListingQuery::from_raw("", "", "buy", "all").matches(&l));
    }

    #[test]
    fn free_view_keeps_only_borrow_and_donate() {
        let query = ListingQuery::from_raw("", "", "", "free");
        assert!(query.matches(&listing("Beaker Set", None, Category::Lab, ListingMode::Borrow)));
        assert!(query.matches(&listing("Old Charger", None, Category::Tech, ListingMode::Donate)));
        assert!(!query.matches(&listing("Headphones", None, Category::Tech, ListingMode::Buy)));
    }

    #[test]
    fn unrecognized_selector_tokens_leave_filters_unset() {
        let query = ListingQuery::from_raw("", "furniture", "rent", "weird");
        assert_eq!(query.category, None);
        assert_eq!(query.mode, None);
        assert_eq!(query.view, ViewMode::All);
    }

    #[test]
    fn all_filters_must_hold_together() {
        let l = listing(
            "Organic Chemistry Textbook",
            Some("Eighth edition"),
            Category::Books,
            ListingMode::Borrow,
        );
        assert!(ListingQuery::from_raw("chem", "books", "borrow", "free").matches(&l));
        assert!(!ListingQuery::from_raw("chem", "books", "donate", "free").matches(&l));
    }
}
