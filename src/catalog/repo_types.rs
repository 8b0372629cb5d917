use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Listing categories available on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Stationery,
    Lab,
    Tech,
    Books,
    Misc,
}

impl Category {
    /// Parse the lowercase token used by the UI selectors.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "stationery" => Some(Self::Stationery),
            "lab" => Some(Self::Lab),
            "tech" => Some(Self::Tech),
            "books" => Some(Self::Books),
            "misc" => Some(Self::Misc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stationery => "stationery",
            Self::Lab => "lab",
            Self::Tech => "tech",
            Self::Books => "books",
            Self::Misc => "misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a listing changes hands: sold, lent, or given away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    Buy,
    Borrow,
    Donate,
}

impl ListingMode {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "buy" => Some(Self::Buy),
            "borrow" => Some(Self::Borrow),
            "donate" => Some(Self::Donate),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Borrow => "borrow",
            Self::Donate => "donate",
        }
    }

    /// Borrowed and donated listings cost nothing up front.
    pub fn is_free(self) -> bool {
        matches!(self, Self::Borrow | Self::Donate)
    }
}

impl fmt::Display for ListingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feed view: everything, or only free-to-take listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    All,
    Free,
}

impl ViewMode {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "all" => Some(Self::All),
            "free" => Some(Self::Free),
            _ => None,
        }
    }
}

/// Listing record persisted in the catalog collection. Seller identity is
/// snapshotted at posting time, not linked to the live user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub mode: ListingMode,
    pub price: f64, // always 0 for donated listings
    pub description: Option<String>,
    /// Opaque image reference (e.g. a data URL); never inspected here.
    pub image: Option<String>,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub seller_college: String,
    pub seller_email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
