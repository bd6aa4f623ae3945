//! Core domain logic for PhoneBook.
//! This crate is the single source of truth for contact invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
pub use repo::contact_repo::{
    ContactRef, ContactRepository, RepoError, RepoResult, SqliteContactRepository,
};
pub use service::contact_service::ContactService;
pub use store::{ContactStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
