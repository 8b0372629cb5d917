//! Core stores for a campus classifieds marketplace.
//!
//! Two components own all state: [`accounts`] (user records and the single
//! active session) and [`catalog`] (the append-only listing collection and
//! its filter query). Everything persists to durable string-keyed storage
//! behind [`storage::KeyValueStore`]. The UI layer is expected to be a thin
//! adapter that constructs one [`state::AppState`] and calls the store
//! operations; no business logic belongs there.

pub mod accounts;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod state;
pub mod storage;
