//! Data-access layer for the finance dashboard.
//!
//! This crate is a thin client: it talks to the backend HTTP API and to
//! the identity provider's token endpoint, and persists nothing locally
//! beyond the session file. Fetched records are aggregated by the
//! [`engine`] crate; this one owns credentials, refresh, dispatch and the
//! typed endpoint surface.
pub use api::{ApiClient, DashboardData};
pub use config::ClientConfig;
pub use credentials::{CredentialPair, CredentialStore, FileStore, MemoryStore};
pub use error::{ApiError, Result};
pub use refresh::SessionRefresher;

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod refresh;
