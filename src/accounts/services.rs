use std::sync::Arc;

use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::accounts::dto::{LoginRequest, RegisterRequest};
use crate::accounts::repo;
use crate::accounts::repo_types::User;
use crate::storage::KeyValueStore;

/// Account operation failures. Every message is meant to be shown to the
/// end user as-is; none is fatal to the store.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Name must be at least 2 characters")]
    InvalidName,
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least 6 characters")]
    WeakPassword,
    #[error("College must be at least 2 characters")]
    InvalidCollege,
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Owns the persisted user collection and the single active session.
#[derive(Clone)]
pub struct AccountStore {
    store: Arc<dyn KeyValueStore>,
}

impl AccountStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Create an account and establish it as the active session.
    ///
    /// A taken email wins over any other rejection; the remaining checks
    /// run in form order.
    #[instrument(skip(self, req))]
    pub fn register(&self, req: &RegisterRequest) -> Result<User, AccountError> {
        let email = req.email.trim();
        if User::find_by_email(self.store.as_ref(), email)?.is_some() {
            warn!(email = %email, "registration rejected: email already registered");
            return Err(AccountError::EmailTaken);
        }

        let name = req.name.trim();
        if name.chars().count() < 2 {
            warn!("registration rejected: name too short");
            return Err(AccountError::InvalidName);
        }
        if !is_valid_email(email) {
            warn!(email = %email, "registration rejected: invalid email");
            return Err(AccountError::InvalidEmail);
        }
        if req.password.len() < 6 {
            warn!("registration rejected: password too short");
            return Err(AccountError::WeakPassword);
        }
        let college = req.college.trim();
        if college.chars().count() < 2 {
            warn!("registration rejected: college too short");
            return Err(AccountError::InvalidCollege);
        }

        let password_hash = hash_password(&req.password)?;
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            college: college.to_string(),
            role: req.role,
            created_at: OffsetDateTime::now_utc(),
        };
        User::append(self.store.as_ref(), &user)?;
        repo::store_session(self.store.as_ref(), &user)?;

        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(user)
    }

    /// Check credentials against the stored records and establish a
    /// session on success. Every rejection is the same error; callers get
    /// no hint whether the email or the password was wrong.
    #[instrument(skip(self, req))]
    pub fn authenticate(&self, req: &LoginRequest) -> Result<User, AccountError> {
        let email = req.email.trim();
        if !is_valid_email(email) || req.password.len() < 6 {
            warn!("login rejected: malformed credentials");
            return Err(AccountError::InvalidCredentials);
        }

        let user = match User::find_by_email(self.store.as_ref(), email)? {
            Some(u) => u,
            None => {
                warn!(email = %email, "login unknown email");
                return Err(AccountError::InvalidCredentials);
            }
        };

        if !verify_password(&req.password, &user.password_hash)? {
            warn!(user_id = %user.id, "login invalid password");
            return Err(AccountError::InvalidCredentials);
        }

        repo::store_session(self.store.as_ref(), &user)?;
        info!(user_id = %user.id, email = %user.email, "user logged in");
        Ok(user)
    }

    /// The active session's user. Absent or unreadable session records
    /// both read as logged out.
    pub fn current_session(&self) -> Option<User> {
        match repo::load_session(self.store.as_ref()) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "session record unreadable; treating as logged out");
                None
            }
        }
    }

    /// End the active session. Listings are not touched.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AccountError> {
        repo::clear_session(self.store.as_ref())?;
        info!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let password = "orange-bicycle-42";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("first-password").expect("hashing should succeed");
        assert!(!verify_password("second-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}

#[cfg(test)]
mod email_tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("rhea@campus.edu"));
        assert!(is_valid_email("first.last@dept.uni.ac.in"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.edu"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaced name@campus.edu"));
        assert!(!is_valid_email("two@@campus.edu"));
    }
}
