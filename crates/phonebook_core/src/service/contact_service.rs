//! Contact use-case service.
//!
//! # Responsibility
//! - Provide add/edit/delete/search entry points for core callers.
//! - Emit metadata-only log events for every mutation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Contact field values never appear in log lines.

use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::repo::contact_repo::{ContactRepository, RepoError, RepoResult};
use log::{debug, info, warn};

/// Use-case service wrapper for contact CRUD operations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists contacts, optionally narrowed by substring search.
    pub fn list(&self, filter: Option<&str>) -> RepoResult<Vec<Contact>> {
        let contacts = self.repo.list_contacts(filter)?;
        debug!(
            "event=contact_list module=contacts status=ok filtered={} count={}",
            filter.is_some_and(|text| !text.is_empty()),
            contacts.len()
        );
        Ok(contacts)
    }

    pub fn find_by_name(&self, name: &str) -> RepoResult<Option<Contact>> {
        self.repo.find_by_name(name)
    }

    pub fn get(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.get_contact(id)
    }

    /// Adds a contact and returns its new id.
    pub fn add(&self, draft: &ContactDraft) -> RepoResult<ContactId> {
        let result = self.repo.create_contact(draft);
        log_outcome("contact_add", &result, |id| format!("contact_id={id}"));
        result
    }

    /// Overwrites every contact named `old_name`.
    pub fn update_by_name(&self, old_name: &str, draft: &ContactDraft) -> RepoResult<usize> {
        let result = self.repo.update_by_name(old_name, draft);
        log_outcome("contact_update", &result, |changed| {
            format!("target=name changed={changed}")
        });
        result
    }

    pub fn update_by_id(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()> {
        let result = self.repo.update_contact(id, draft);
        log_outcome("contact_update", &result, |_| {
            format!("target=id contact_id={id}")
        });
        result
    }

    /// Removes every contact named `name`.
    pub fn delete_by_name(&self, name: &str) -> RepoResult<usize> {
        let result = self.repo.delete_by_name(name);
        log_outcome("contact_delete", &result, |removed| {
            format!("target=name removed={removed}")
        });
        result
    }

    pub fn delete_by_id(&self, id: ContactId) -> RepoResult<()> {
        let result = self.repo.delete_contact(id);
        log_outcome("contact_delete", &result, |_| {
            format!("target=id contact_id={id}")
        });
        result
    }

    pub fn count(&self) -> RepoResult<usize> {
        self.repo.count_contacts()
    }
}

fn log_outcome<T>(event: &str, result: &RepoResult<T>, describe: impl FnOnce(&T) -> String) {
    match result {
        Ok(value) => info!(
            "event={} module=contacts status=ok {}",
            event,
            describe(value)
        ),
        Err(RepoError::Validation(err)) => info!(
            "event={} module=contacts status=rejected reason=\"{}\"",
            event, err
        ),
        Err(RepoError::NotFound(target)) => warn!(
            "event={} module=contacts status=not_found target={}",
            event, target
        ),
        Err(err) => warn!(
            "event={} module=contacts status=error error={}",
            event, err
        ),
    }
}
