mod dto;
pub mod repo;
mod repo_types;
pub mod services;

pub use dto::{LoginRequest, PublicUser, RegisterRequest};
pub use repo_types::{Role, User};
pub use services::{AccountError, AccountStore};
