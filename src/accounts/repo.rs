use crate::accounts::repo_types::User;
use crate::storage::{self, KeyValueStore};

/// Key for the persisted user collection.
pub const USERS_KEY: &str = "marketplace/users";
/// Key for the persisted session record.
pub const SESSION_KEY: &str = "marketplace/session";

impl User {
    /// Load every registered user, in registration order.
    pub fn load_all(store: &dyn KeyValueStore) -> anyhow::Result<Vec<User>> {
        Ok(storage::get_json(store, USERS_KEY)?.unwrap_or_default())
    }

    /// Find a user by exact stored email.
    pub fn find_by_email(store: &dyn KeyValueStore, email: &str) -> anyhow::Result<Option<User>> {
        let users = User::load_all(store)?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    /// Append a new user to the collection and persist it.
    pub fn append(store: &dyn KeyValueStore, user: &User) -> anyhow::Result<()> {
        let mut users = User::load_all(store)?;
        users.push(user.clone());
        storage::put_json(store, USERS_KEY, &users)
    }
}

/// Read the persisted session record, if any.
pub fn load_session(store: &dyn KeyValueStore) -> anyhow::Result<Option<User>> {
    storage::get_json(store, SESSION_KEY)
}

/// Make `user` the active session.
pub fn store_session(store: &dyn KeyValueStore, user: &User) -> anyhow::Result<()> {
    storage::put_json(store, SESSION_KEY, user)
}

/// Drop the active session.
pub fn clear_session(store: &dyn KeyValueStore) -> anyhow::Result<()> {
    store.remove(SESSION_KEY)
}
