use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Account roles. `Both` may buy and sell; `Buyer` may only buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Both,
}

impl Role {
    pub fn can_sell(self) -> bool {
        matches!(self, Role::Both)
    }
}

/// User record persisted in the accounts collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,                // unique user ID
    pub name: String,
    pub email: String,           // unique key among users, exact match
    pub password_hash: String,   // argon2 hash; hand callers a PublicUser, never this record
    pub college: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
